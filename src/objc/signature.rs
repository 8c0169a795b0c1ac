//! Method type strings as reported by the runtime (`v24@0:8@16`): a return type, an optional frame
//! size, and one argument type per parameter, each optionally followed by its frame offset.

use std::fmt;

use smallvec::SmallVec;

use super::types::{Cursor, DecodeError, DecodeResult, Decoder, Qualifiers, TypeNode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub ty: TypeNode,
    pub offset: Option<isize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    return_type: TypeNode,
    frame_size: Option<usize>,
    arguments: SmallVec<[Argument; 4]>,
}

impl MethodSignature {
    pub fn parse(types: &str) -> DecodeResult<Self> {
        Self::parse_with(&Decoder::default(), types)
    }

    /// Every argument must decode; a single failure fails the signature.
    pub fn parse_with(decoder: &Decoder, types: &str) -> DecodeResult<Self> {
        let cursor = Cursor::new(types);
        if cursor.is_empty() {
            return Err(DecodeError::MissingReturnType);
        }
        let returns = decoder.decode_type(cursor)?;
        let (frame, mut cursor) = read_offset(returns.rest)?;
        let frame_size = frame
            .map(|value| {
                usize::try_from(value).map_err(|_| DecodeError::Malformed {
                    offset: returns.rest.offset(),
                    production: "frame size",
                })
            })
            .transpose()?;

        let mut arguments = SmallVec::new();
        while !cursor.is_empty() {
            let decoded = decoder.decode_type(cursor)?;
            let (offset, rest) = read_offset(decoded.rest)?;
            arguments.push(Argument {
                ty: decoded.node,
                offset,
            });
            cursor = rest;
        }

        Ok(Self {
            return_type: returns.node,
            frame_size,
            arguments,
        })
    }

    pub fn return_type(&self) -> &TypeNode {
        &self.return_type
    }

    pub fn frame_size(&self) -> Option<usize> {
        self.frame_size
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument_types(&self) -> impl Iterator<Item = &TypeNode> {
        self.arguments.iter().map(|argument| &argument.ty)
    }

    pub fn number_of_arguments(&self) -> usize {
        self.arguments.len()
    }

    pub fn return_type_encoding(&self) -> String {
        self.return_type.encoded()
    }

    pub fn argument_type_encodings(&self) -> Vec<String> {
        self.argument_types().map(TypeNode::encoded).collect()
    }

    pub fn is_oneway(&self) -> bool {
        let (qualifiers, _) = self.return_type.strip_modifiers();
        qualifiers.contains(Qualifiers::ONEWAY)
    }

    /// Full method type string, frame offsets included.
    pub fn encoded(&self) -> String {
        let mut out = self.return_type.encoded();
        if let Some(frame) = self.frame_size {
            out.push_str(&frame.to_string());
        }
        for argument in &self.arguments {
            argument.ty.encode_into(&mut out);
            if let Some(offset) = argument.offset {
                out.push_str(&offset.to_string());
            }
        }
        out
    }

    /// Method type string with frame offsets stripped.
    pub fn encoded_types(&self) -> String {
        let mut out = self.return_type.encoded();
        for ty in self.argument_types() {
            ty.encode_into(&mut out);
        }
        out
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.return_type)?;
        for (index, ty) in self.argument_types().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        f.write_str(")")
    }
}

fn read_offset(cursor: Cursor<'_>) -> DecodeResult<(Option<isize>, Cursor<'_>)> {
    let Some((digits, rest)) = cursor.take_digits(true) else {
        return Ok((None, cursor));
    };
    let value = digits.parse::<isize>().map_err(|_| DecodeError::Malformed {
        offset: cursor.offset(),
        production: "frame offset",
    })?;
    Ok((Some(value), rest))
}

#[cfg(test)]
mod tests {
    //! Runtime-style method type strings.
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::objc::types::{Modifier, Primitive};

    #[test]
    fn offsets_are_split_from_types() {
        // v24@0:8@16 is -(void)method:(id)arg on a 64-bit runtime
        let signature = MethodSignature::parse("v24@0:8@16").expect("signature parses");
        assert_eq!(signature.return_type(), &TypeNode::VOID);
        assert_eq!(signature.frame_size(), Some(24));
        assert_eq!(
            signature.arguments(),
            &[
                Argument {
                    ty: TypeNode::ID,
                    offset: Some(0)
                },
                Argument {
                    ty: TypeNode::Primitive(Primitive::Selector),
                    offset: Some(8)
                },
                Argument {
                    ty: TypeNode::ID,
                    offset: Some(16)
                },
            ]
        );
        assert_eq!(signature.encoded(), "v24@0:8@16", "offsets are re-emitted");
        assert_eq!(signature.encoded_types(), "v@:@", "offsets can be stripped");
    }

    #[test]
    fn signatures_without_offsets() {
        let signature = MethodSignature::parse("@@:@\"NSString\"").expect("signature parses");
        assert_eq!(signature.frame_size(), None);
        assert_eq!(signature.number_of_arguments(), 3);
        assert_eq!(
            signature.argument_type_encodings(),
            vec!["@", ":", "@\"NSString\""]
        );
        assert_eq!(signature.return_type_encoding(), "@");
    }

    #[test]
    fn oneway_return_is_detected() {
        let signature = MethodSignature::parse("Vv16@0:8").expect("signature parses");
        assert!(signature.is_oneway(), "V qualifier marks a oneway method");
        assert_eq!(
            signature.return_type(),
            &TypeNode::modified(Modifier::Oneway, TypeNode::VOID)
        );
    }

    #[test]
    fn composite_arguments_and_display() {
        let signature =
            MethodSignature::parse("B32@0:8{CGPoint=dd}16").expect("signature parses");
        assert_eq!(signature.arguments()[2].offset, Some(16));
        assert_eq!(
            signature.to_string(),
            "BOOL (id, SEL, struct CGPoint {\n    double x0;\n    double x1;\n})"
        );
    }

    #[test]
    fn failures_are_reported() {
        assert_eq!(MethodSignature::parse(""), Err(DecodeError::MissingReturnType));
        assert_eq!(
            MethodSignature::parse("v16@0Z8"),
            Err(DecodeError::UnknownSymbol {
                offset: 5,
                symbol: 'Z'
            })
        );
    }
}
