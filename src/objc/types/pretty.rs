//! C-style rendering of a type tree for diagnostics. The output is meant for people and is never
//! parsed back.

use std::fmt;

use super::node::{Aggregate, Field, TypeNode};

pub const DEFAULT_INDENT: &str = "    ";

/// Renders `node` as a C declaration, nesting aggregate bodies by one `indent` unit per level.
pub fn decoded(node: &TypeNode, indent: &str) -> String {
    node.decoded(indent)
}

impl TypeNode {
    pub fn decoded(&self, indent: &str) -> String {
        PrettyPrinter::new(indent).type_name(self, 0)
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decoded(DEFAULT_INDENT))
    }
}

struct PrettyPrinter<'i> {
    unit: &'i str,
}

impl<'i> PrettyPrinter<'i> {
    fn new(unit: &'i str) -> Self {
        Self { unit }
    }

    fn type_name(&self, node: &TypeNode, level: usize) -> String {
        match node {
            TypeNode::Primitive(primitive) => primitive.c_name().to_owned(),
            TypeNode::Object(None) => "id".to_owned(),
            TypeNode::Object(Some(name)) if name.starts_with('<') => format!("id {name}"),
            TypeNode::Object(Some(name)) => format!("{name} *"),
            TypeNode::Block(None) => "id /* block */".to_owned(),
            TypeNode::Block(Some(signature)) => format!(
                "{} (^)({})",
                self.type_name(&signature.returns, level),
                self.parameter_list(&signature.arguments, level)
            ),
            TypeNode::FunctionPointer => "void (*)()".to_owned(),
            TypeNode::Array { .. } => self.declaration(node, "", level),
            TypeNode::Pointer(pointee) if needs_declarator(pointee) => {
                self.declaration(node, "", level)
            }
            TypeNode::Pointer(pointee) => {
                let inner = self.type_name(pointee, level);
                if inner.ends_with('*') {
                    format!("{inner}*")
                } else {
                    format!("{inner} *")
                }
            }
            TypeNode::BitField(width) => format!("unsigned int : {width}"),
            TypeNode::Struct(aggregate) => self.aggregate("struct", aggregate, level),
            TypeNode::Union(aggregate) => self.aggregate("union", aggregate, level),
            TypeNode::Modified(modifier, inner) => {
                format!("{} {}", modifier.keyword(), self.type_name(inner, level))
            }
            TypeNode::Other(raw) => raw.clone(),
        }
    }

    fn parameter_list(&self, arguments: &[TypeNode], level: usize) -> String {
        if arguments.is_empty() {
            return "void".to_owned();
        }
        arguments
            .iter()
            .map(|argument| self.type_name(argument, level))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn aggregate(&self, keyword: &str, aggregate: &Aggregate, level: usize) -> String {
        let mut out = keyword.to_owned();
        if let Some(name) = aggregate.name.as_deref().filter(|name| !name.is_empty()) {
            out.push(' ');
            out.push_str(name);
        }
        let Some(fields) = &aggregate.fields else {
            return out;
        };
        if fields.is_empty() {
            out.push_str(" {}");
            return out;
        }
        out.push_str(" {\n");
        for (index, field) in fields.iter().enumerate() {
            out.push_str(&self.unit.repeat(level + 1));
            out.push_str(&self.field(field, index, level + 1));
            out.push_str(";\n");
        }
        out.push_str(&self.unit.repeat(level));
        out.push('}');
        out
    }

    fn field(&self, field: &Field, index: usize, level: usize) -> String {
        let name = match &field.name {
            Some(name) => name.clone(),
            None => format!("x{index}"),
        };
        match (field.bit_width, &field.ty) {
            (Some(width), _) => format!("unsigned int {name} : {width}"),
            (None, ty) => self.declaration(ty, &name, level),
        }
    }

    /// Places `name` where C puts the declarator: inside array suffixes and block/function
    /// pointer parentheses, next to a trailing `*` otherwise. An empty `name` yields an abstract
    /// declarator such as `int (*)[3]`.
    fn declaration(&self, node: &TypeNode, name: &str, level: usize) -> String {
        match node {
            TypeNode::Array { element, size } => {
                let declarator = match size {
                    Some(size) => format!("{name}[{size}]"),
                    None => format!("{name}[]"),
                };
                self.declaration(element, &declarator, level)
            }
            TypeNode::Block(Some(signature)) => format!(
                "{} (^{name})({})",
                self.type_name(&signature.returns, level),
                self.parameter_list(&signature.arguments, level)
            ),
            TypeNode::FunctionPointer => format!("void (*{name})()"),
            TypeNode::Pointer(pointee) if needs_declarator(pointee) => {
                let declarator = match pointee.as_ref() {
                    TypeNode::Array { .. } => format!("(*{name})"),
                    _ => format!("*{name}"),
                };
                self.declaration(pointee, &declarator, level)
            }
            _ => {
                let ty = self.type_name(node, level);
                if name.is_empty() {
                    ty
                } else if ty.ends_with('*') || name.starts_with('[') {
                    format!("{ty}{name}")
                } else {
                    format!("{ty} {name}")
                }
            }
        }
    }
}

/// Types whose declarator wraps around the name instead of preceding it.
fn needs_declarator(node: &TypeNode) -> bool {
    match node {
        TypeNode::Array { .. } | TypeNode::Block(Some(_)) | TypeNode::FunctionPointer => true,
        TypeNode::Pointer(pointee) => needs_declarator(pointee),
        _ => false,
    }
}
