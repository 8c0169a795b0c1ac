//! Depth-first traversal over a type tree without recursion.

use smallvec::SmallVec;

use super::node::TypeNode;

#[derive(Clone, Debug)]
struct Frame<'a> {
    depth: usize,
    node: &'a TypeNode,
}

/// Pre-order iterator yielding `(depth, node)`; the root is at depth zero.
pub struct TypeWalker<'a> {
    stack: SmallVec<[Frame<'a>; 8]>,
}

impl<'a> TypeWalker<'a> {
    pub fn new(root: &'a TypeNode) -> Self {
        let mut stack = SmallVec::new();
        stack.push(Frame {
            depth: 0,
            node: root,
        });
        Self { stack }
    }

    fn push_children(&mut self, frame: &Frame<'a>) {
        let depth = frame.depth + 1;
        let mut children: SmallVec<[&'a TypeNode; 4]> = SmallVec::new();
        match frame.node {
            TypeNode::Block(Some(signature)) => {
                children.push(&signature.returns);
                children.extend(signature.arguments.iter());
            }
            TypeNode::Array { element, .. } => children.push(element),
            TypeNode::Pointer(inner) | TypeNode::Modified(_, inner) => children.push(inner),
            TypeNode::Struct(aggregate) | TypeNode::Union(aggregate) => {
                children.extend(aggregate.fields().iter().map(|field| &field.ty));
            }
            _ => {}
        }
        // reversed so the first child is popped first
        for node in children.into_iter().rev() {
            self.stack.push(Frame { depth, node });
        }
    }
}

impl<'a> Iterator for TypeWalker<'a> {
    type Item = (usize, &'a TypeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        self.push_children(&frame);
        Some((frame.depth, frame.node))
    }
}

impl TypeNode {
    pub fn walk(&self) -> TypeWalker<'_> {
        TypeWalker::new(self)
    }

    /// Distinct `@"..."` names in visit order.
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, node) in self.walk() {
            if let TypeNode::Object(Some(name)) = node {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn contains_bitfields(&self) -> bool {
        self.walk()
            .any(|(_, node)| matches!(node, TypeNode::BitField(_)))
    }

    /// Nesting depth of the deepest node; a leaf has depth zero.
    pub fn max_depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    //! Traversal order and the summaries built on top of it.
    use super::*;
    use crate::objc::types::decode::decode;

    #[test]
    fn walker_visits_in_pre_order() {
        // children follow their parent, siblings keep encoding order
        let node = decode("{S=^i[2d]}").expect("decodes");
        let visited: Vec<_> = node.walk().map(|(depth, node)| (depth, node.encoded())).collect();
        assert_eq!(
            visited,
            vec![
                (0, "{S=^i[2d]}".to_owned()),
                (1, "^i".to_owned()),
                (2, "i".to_owned()),
                (1, "[2d]".to_owned()),
                (2, "d".to_owned()),
            ],
            "walker should perform a pre-order DFS"
        );
    }

    #[test]
    fn referenced_classes_are_deduplicated() {
        let node = decode("@?<@\"NSArray\"@?@\"NSError\"@\"NSArray\">").expect("decodes");
        assert_eq!(node.referenced_classes(), vec!["NSArray", "NSError"]);
    }

    #[test]
    fn summaries_report_bitfields_and_depth() {
        let node = decode("{Outer={Inner=b1}}").expect("decodes");
        assert!(node.contains_bitfields(), "nested bitfield should be found");
        assert_eq!(node.max_depth(), 2, "outer -> inner -> bitfield");
        assert_eq!(TypeNode::INT.max_depth(), 0, "leaves have depth zero");
    }
}
