//! Canonical re-encoding. Every node has exactly one spelling, the inverse of the decode table, and
//! composite nodes emit their children in the order the decoder consumes them.

use super::node::{Aggregate, Field, TypeNode};

/// Canonical encoding string for `node`.
pub fn encoded(node: &TypeNode) -> String {
    node.encoded()
}

impl TypeNode {
    pub fn encoded(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    pub fn encode_into(&self, out: &mut String) {
        match self {
            TypeNode::Primitive(primitive) => out.push(char::from(primitive.code())),
            TypeNode::Object(None) => out.push('@'),
            TypeNode::Object(Some(name)) => {
                out.push_str("@\"");
                out.push_str(name);
                out.push('"');
            }
            TypeNode::Block(None) => out.push_str("@?"),
            TypeNode::Block(Some(signature)) => {
                out.push_str("@?<");
                signature.returns.encode_into(out);
                out.push_str("@?");
                for argument in &signature.arguments {
                    argument.encode_into(out);
                }
                out.push('>');
            }
            TypeNode::FunctionPointer => out.push_str("^?"),
            TypeNode::Array { element, size } => {
                out.push('[');
                if let Some(size) = size {
                    out.push_str(&size.to_string());
                }
                element.encode_into(out);
                out.push(']');
            }
            TypeNode::Pointer(pointee) => {
                out.push('^');
                pointee.encode_into(out);
            }
            TypeNode::BitField(width) => {
                out.push('b');
                out.push_str(&width.to_string());
            }
            TypeNode::Struct(aggregate) => encode_aggregate(aggregate, '{', '}', out),
            TypeNode::Union(aggregate) => encode_aggregate(aggregate, '(', ')', out),
            TypeNode::Modified(modifier, inner) => {
                out.push(char::from(modifier.code()));
                inner.encode_into(out);
            }
            TypeNode::Other(raw) => out.push_str(raw),
        }
    }
}

fn encode_aggregate(aggregate: &Aggregate, open: char, close: char, out: &mut String) {
    out.push(open);
    out.push_str(aggregate.name.as_deref().unwrap_or("?"));
    if let Some(fields) = &aggregate.fields {
        out.push('=');
        for field in fields {
            encode_field(field, out);
        }
    }
    out.push(close);
}

fn encode_field(field: &Field, out: &mut String) {
    if let Some(name) = &field.name {
        out.push('"');
        out.push_str(name);
        out.push('"');
    }
    match (field.bit_width, &field.ty) {
        (Some(width), ty) if !matches!(ty, TypeNode::BitField(_)) => {
            out.push('b');
            out.push_str(&width.to_string());
        }
        (_, ty) => ty.encode_into(out),
    }
}
