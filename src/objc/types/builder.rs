//! Fluent construction of aggregates for callers that describe types by hand instead of decoding.

use super::node::{Aggregate, Field, TypeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateKind {
    Struct,
    Union,
}

pub struct AggregateBuilder {
    kind: AggregateKind,
    name: Option<String>,
    fields: Option<Vec<Field>>,
}

impl AggregateBuilder {
    pub fn new(kind: AggregateKind, name: Option<&str>) -> Self {
        Self {
            kind,
            name: name.map(str::to_owned),
            fields: Some(Vec::new()),
        }
    }

    fn push(mut self, field: Field) -> Self {
        self.fields.get_or_insert_with(Vec::new).push(field);
        self
    }

    pub fn field(self, name: &str, ty: TypeNode) -> Self {
        self.push(Field::named(name, ty))
    }

    pub fn anonymous(self, ty: TypeNode) -> Self {
        self.push(Field::anonymous(ty))
    }

    pub fn bitfield(self, name: &str, width: i32) -> Self {
        self.push(Field::named(name, TypeNode::BitField(width)))
    }

    /// Drops the field list so the aggregate encodes as a bare declaration.
    pub fn opaque(mut self) -> Self {
        self.fields = None;
        self
    }

    pub fn build(self) -> TypeNode {
        let aggregate = Aggregate::new(self.name, self.fields);
        match self.kind {
            AggregateKind::Struct => TypeNode::Struct(aggregate),
            AggregateKind::Union => TypeNode::Union(aggregate),
        }
    }
}

impl TypeNode {
    pub fn structure(name: Option<&str>) -> AggregateBuilder {
        AggregateBuilder::new(AggregateKind::Struct, name)
    }

    pub fn union(name: Option<&str>) -> AggregateBuilder {
        AggregateBuilder::new(AggregateKind::Union, name)
    }
}
