//! Size and alignment lookup under C layout rules.

use super::modifier::Modifier;
use super::node::{Aggregate, Field, TypeNode};
use super::primitive::Primitive;

/// Bitfields are packed into storage units of this many bits.
const BITFIELD_UNIT_BITS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataModel {
    pub pointer_bytes: usize,
    pub long_bytes: usize,
    pub long_double_bytes: usize,
    pub long_double_align: usize,
}

impl DataModel {
    pub const LP64: Self = Self {
        pointer_bytes: 8,
        long_bytes: 8,
        long_double_bytes: 16,
        long_double_align: 16,
    };

    pub const ILP32: Self = Self {
        pointer_bytes: 4,
        long_bytes: 4,
        long_double_bytes: 16,
        long_double_align: 16,
    };
}

impl Default for DataModel {
    fn default() -> Self {
        Self::LP64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeLayout {
    pub size: usize,
    pub align: usize,
}

impl TypeLayout {
    const fn natural(size: usize) -> Self {
        Self { size, align: size }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateLayout {
    pub size: usize,
    pub align: usize,
    /// Bit offset of every field, in declaration order.
    pub offsets_bits: Vec<usize>,
}

/// Size and alignment of `node`, or `None` for incomplete types (void, unknown, opaque
/// aggregates, unbounded arrays, raw fragments).
pub fn layout_of(node: &TypeNode, model: &DataModel) -> Option<TypeLayout> {
    let pointer = TypeLayout::natural(model.pointer_bytes);
    match node {
        TypeNode::Primitive(primitive) => primitive_layout(*primitive, model),
        TypeNode::Object(_)
        | TypeNode::Block(_)
        | TypeNode::FunctionPointer
        | TypeNode::Pointer(_) => Some(pointer),
        TypeNode::Array { element, size } => {
            let element = layout_of(element, model)?;
            let count = (*size)?;
            Some(TypeLayout {
                size: element.size.checked_mul(count)?,
                align: element.align,
            })
        }
        TypeNode::BitField(_) | TypeNode::Other(_) => None,
        TypeNode::Struct(_) | TypeNode::Union(_) => {
            let layout = aggregate_layout(node, model)?;
            Some(TypeLayout {
                size: layout.size,
                align: layout.align,
            })
        }
        TypeNode::Modified(Modifier::Complex, inner) => {
            let inner = layout_of(inner, model)?;
            Some(TypeLayout {
                size: inner.size.checked_mul(2)?,
                align: inner.align,
            })
        }
        TypeNode::Modified(_, inner) => layout_of(inner, model),
    }
}

fn primitive_layout(primitive: Primitive, model: &DataModel) -> Option<TypeLayout> {
    let layout = match primitive {
        Primitive::Char | Primitive::UChar | Primitive::Bool => TypeLayout::natural(1),
        Primitive::Short | Primitive::UShort => TypeLayout::natural(2),
        Primitive::Int | Primitive::UInt | Primitive::Float => TypeLayout::natural(4),
        Primitive::Long | Primitive::ULong => TypeLayout::natural(model.long_bytes),
        Primitive::LongLong | Primitive::ULongLong | Primitive::Double => TypeLayout::natural(8),
        Primitive::Int128 | Primitive::UInt128 => TypeLayout::natural(16),
        Primitive::LongDouble => TypeLayout {
            size: model.long_double_bytes,
            align: model.long_double_align,
        },
        Primitive::Class | Primitive::Selector | Primitive::CharPtr | Primitive::Atom => {
            TypeLayout::natural(model.pointer_bytes)
        }
        Primitive::Void | Primitive::VoidConst | Primitive::VoidIn | Primitive::Unknown => {
            return None;
        }
    };
    Some(layout)
}

/// Field placement for a struct or union with a known field list.
pub fn aggregate_layout(node: &TypeNode, model: &DataModel) -> Option<AggregateLayout> {
    match node {
        TypeNode::Struct(aggregate) => struct_layout(aggregate, model),
        TypeNode::Union(aggregate) => union_layout(aggregate, model),
        _ => None,
    }
}

fn struct_layout(aggregate: &Aggregate, model: &DataModel) -> Option<AggregateLayout> {
    let fields = aggregate.fields.as_ref()?;
    let mut offsets_bits = Vec::with_capacity(fields.len());
    let mut cursor_bits = 0usize;
    let mut align = 1usize;
    for field in fields {
        if let Some(width) = bit_width(field)? {
            if width == 0 || cursor_bits % BITFIELD_UNIT_BITS + width > BITFIELD_UNIT_BITS {
                cursor_bits = round_up(cursor_bits, BITFIELD_UNIT_BITS)?;
            }
            offsets_bits.push(cursor_bits);
            cursor_bits = cursor_bits.checked_add(width)?;
            align = align.max(BITFIELD_UNIT_BITS / 8);
            continue;
        }
        let layout = layout_of(&field.ty, model)?;
        cursor_bits = round_up(cursor_bits, layout.align.max(1).checked_mul(8)?)?;
        offsets_bits.push(cursor_bits);
        cursor_bits = cursor_bits.checked_add(layout.size.checked_mul(8)?)?;
        align = align.max(layout.align);
    }
    let bytes = round_up(cursor_bits, 8)? / 8;
    Some(AggregateLayout {
        size: round_up(bytes, align)?,
        align,
        offsets_bits,
    })
}

fn union_layout(aggregate: &Aggregate, model: &DataModel) -> Option<AggregateLayout> {
    let fields = aggregate.fields.as_ref()?;
    let mut size = 0usize;
    let mut align = 1usize;
    for field in fields {
        let layout = match bit_width(field)? {
            Some(width) => TypeLayout {
                size: round_up(width, BITFIELD_UNIT_BITS)? / 8,
                align: BITFIELD_UNIT_BITS / 8,
            },
            None => layout_of(&field.ty, model)?,
        };
        size = size.max(layout.size);
        align = align.max(layout.align);
    }
    Some(AggregateLayout {
        size: round_up(size, align)?,
        align,
        offsets_bits: vec![0; fields.len()],
    })
}

/// `Some(None)` for ordinary fields; `None` for negative widths, which have no layout.
fn bit_width(field: &Field) -> Option<Option<usize>> {
    match field.bit_width {
        Some(width) => usize::try_from(width).ok().map(Some),
        None => Some(None),
    }
}

/// `None` when the rounded value does not fit in `usize`.
fn round_up(value: usize, multiple: usize) -> Option<usize> {
    if multiple <= 1 {
        Some(value)
    } else {
        value.div_ceil(multiple).checked_mul(multiple)
    }
}

impl TypeNode {
    pub fn layout(&self, model: &DataModel) -> Option<TypeLayout> {
        layout_of(self, model)
    }
}

#[cfg(test)]
mod tests {
    //! C layout expectations for common Foundation shapes.
    use super::*;
    use crate::objc::types::decode::decode;

    fn layout(encoding: &str) -> Option<TypeLayout> {
        decode(encoding).and_then(|node| node.layout(&DataModel::LP64))
    }

    #[test]
    fn scalar_and_pointer_sizes_follow_the_model() {
        assert_eq!(layout("q"), Some(TypeLayout { size: 8, align: 8 }));
        assert_eq!(
            decode("l").and_then(|n| n.layout(&DataModel::ILP32)),
            Some(TypeLayout { size: 4, align: 4 }),
            "long shrinks under ILP32"
        );
        assert_eq!(layout("^{Opaque}"), Some(TypeLayout { size: 8, align: 8 }), "pointers to opaque types are complete");
        assert_eq!(layout("jd"), Some(TypeLayout { size: 16, align: 8 }), "complex doubles the size");
    }

    #[test]
    fn incomplete_types_have_no_layout() {
        assert_eq!(layout("v"), None, "void has no size");
        assert_eq!(layout("{Opaque}"), None, "opaque struct has no size");
        assert_eq!(layout("[i]"), None, "unbounded array has no size");
    }

    #[test]
    fn struct_fields_are_aligned() {
        let node = decode("{?=cid}").expect("decodes");
        let placed = aggregate_layout(&node, &DataModel::LP64).expect("complete struct");
        assert_eq!(placed.offsets_bits, vec![0, 32, 64], "int aligns to 4, double to 8");
        assert_eq!((placed.size, placed.align), (16, 8));
        assert_eq!(layout("{CGRect={CGPoint=dd}{CGSize=dd}}"), Some(TypeLayout { size: 32, align: 8 }));
        assert_eq!(layout("{S=c[3s]}"), Some(TypeLayout { size: 8, align: 2 }), "array aligns like its element");
    }

    #[test]
    fn bitfields_pack_into_storage_units() {
        let node = decode("{Flags=b1b3b4b30}").expect("decodes");
        let placed = aggregate_layout(&node, &DataModel::LP64).expect("complete struct");
        assert_eq!(placed.offsets_bits, vec![0, 1, 4, 32], "b30 spills into the next unit");
        assert_eq!(placed.size, 8, "two storage units are used");
    }

    #[test]
    fn oversized_inputs_have_no_layout() {
        // sizes that overflow usize report no layout instead of wrapping
        assert_eq!(layout("j[1152921504606846976d]"), None, "complex doubling overflows");
        assert_eq!(
            layout("{S=[4611686018427387904c]}"),
            None,
            "field size in bits overflows"
        );
        assert_eq!(
            layout("(?=[2305843009213693952q])"),
            None,
            "array size overflows before the union sees it"
        );
        assert_eq!(round_up(usize::MAX, 8), None, "rounding past usize::MAX fails");
    }

    #[test]
    fn unions_take_the_largest_member() {
        let node = decode("(?=cdb3)").expect("decodes");
        let placed = aggregate_layout(&node, &DataModel::LP64).expect("complete union");
        assert_eq!((placed.size, placed.align), (8, 8));
        assert_eq!(placed.offsets_bits, vec![0, 0, 0], "union members share offset zero");
    }
}
