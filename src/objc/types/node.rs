//! The decoded type tree. Children are owned through `Box`/`Vec`, so a node is a plain value that
//! can be cloned, compared, and shared across threads without coordination.

use smallvec::SmallVec;

use super::modifier::{Modifier, Qualifiers};
use super::primitive::Primitive;

/// Argument lists of a block signature; most blocks take few arguments.
pub type BlockArguments = SmallVec<[TypeNode; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeNode {
    Primitive(Primitive),
    /// `@`, `@"NSString"`, `@"<NSCopying>"`. `None` is a bare `id`.
    Object(Option<String>),
    /// `@?` or `@?<...>`. `None` is a block whose signature was not encoded.
    Block(Option<Box<BlockSignature>>),
    FunctionPointer,
    Array {
        element: Box<TypeNode>,
        size: Option<usize>,
    },
    Pointer(Box<TypeNode>),
    BitField(i32),
    Struct(Aggregate),
    Union(Aggregate),
    Modified(Modifier, Box<TypeNode>),
    /// Raw fragment that no production could make sense of.
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockSignature {
    pub returns: TypeNode,
    pub arguments: BlockArguments,
}

/// Shared payload of structs and unions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub name: Option<String>,
    /// `None` when the encoding only declared the aggregate (`{Name}`), `Some(empty)` for `{Name=}`.
    pub fields: Option<Vec<Field>>,
}

impl Aggregate {
    pub fn new(name: Option<String>, fields: Option<Vec<Field>>) -> Self {
        Self { name, fields }
    }

    pub fn is_opaque(&self) -> bool {
        self.fields.is_none()
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or(&[])
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub ty: TypeNode,
    pub name: Option<String>,
    pub bit_width: Option<i32>,
}

impl Field {
    pub fn new(ty: TypeNode, name: Option<String>) -> Self {
        let bit_width = match ty {
            TypeNode::BitField(width) => Some(width),
            _ => None,
        };
        Self {
            ty,
            name,
            bit_width,
        }
    }

    pub fn anonymous(ty: TypeNode) -> Self {
        Self::new(ty, None)
    }

    pub fn named(name: impl Into<String>, ty: TypeNode) -> Self {
        Self::new(ty, Some(name.into()))
    }

    pub fn is_bitfield(&self) -> bool {
        self.bit_width.is_some()
    }
}

impl From<Primitive> for TypeNode {
    fn from(value: Primitive) -> Self {
        TypeNode::Primitive(value)
    }
}

impl TypeNode {
    pub const INT: TypeNode = TypeNode::Primitive(Primitive::Int);
    pub const DOUBLE: TypeNode = TypeNode::Primitive(Primitive::Double);
    pub const VOID: TypeNode = TypeNode::Primitive(Primitive::Void);
    pub const ID: TypeNode = TypeNode::Object(None);

    pub fn object(name: impl Into<String>) -> Self {
        TypeNode::Object(Some(name.into()))
    }

    pub fn protocol_object(protocol: &str) -> Self {
        TypeNode::Object(Some(format!("<{protocol}>")))
    }

    pub fn pointer(pointee: TypeNode) -> Self {
        TypeNode::Pointer(Box::new(pointee))
    }

    pub fn array(element: TypeNode, size: Option<usize>) -> Self {
        TypeNode::Array {
            element: Box::new(element),
            size,
        }
    }

    pub fn modified(modifier: Modifier, inner: TypeNode) -> Self {
        TypeNode::Modified(modifier, Box::new(inner))
    }

    pub fn block<I>(returns: TypeNode, arguments: I) -> Self
    where
        I: IntoIterator<Item = TypeNode>,
    {
        TypeNode::Block(Some(Box::new(BlockSignature {
            returns,
            arguments: arguments.into_iter().collect(),
        })))
    }

    pub fn opaque_block() -> Self {
        TypeNode::Block(None)
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        if let TypeNode::Primitive(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_aggregate(&self) -> Option<&Aggregate> {
        match self {
            TypeNode::Struct(aggregate) | TypeNode::Union(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, TypeNode::Union(_))
    }

    /// Peels every `Modified` wrapper and reports the qualifiers that were applied.
    pub fn strip_modifiers(&self) -> (Qualifiers, &TypeNode) {
        let mut qualifiers = Qualifiers::empty();
        let mut current = self;
        while let TypeNode::Modified(modifier, inner) = current {
            qualifiers |= modifier.flag();
            current = inner;
        }
        (qualifiers, current)
    }

    /// Class part of `@"Name"` or `@"Name<Proto>"`; `None` for `id` and protocol-only ids.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeNode::Object(Some(name)) if !name.starts_with('<') => {
                name.split('<').next()
            }
            _ => None,
        }
    }

    /// Protocol names from `@"<A><B>"` or `@"NSObject<A>"`.
    pub fn protocol_names(&self) -> Vec<&str> {
        let TypeNode::Object(Some(name)) = self else {
            return Vec::new();
        };
        let mut protocols = Vec::new();
        let mut rest = name.as_str();
        while let Some(open) = rest.find('<') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('>') else {
                break;
            };
            protocols.push(&after[..close]);
            rest = &after[close + 1..];
        }
        protocols
    }
}
