use crate::node::{Children, Node, NodeKind};

/// Leaf predicate for structural filtering.
///
/// A leaf matches when its name contains `id`. A query without an id (or
/// with an empty one) matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub id: Option<String>,
}

impl Query {
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => name.contains(id),
            _ => false,
        }
    }
}

impl Node {
    /// Rebuild this node restricted to the leaves matching `query`.
    ///
    /// An index node always yields an index node with the same keys; a
    /// branch with nothing left is kept as an empty placeholder. A leaf
    /// collection yields `None` when no leaf matches.
    pub fn filter(&self, query: &Query) -> Option<Node> {
        match &self.kind {
            NodeKind::Index(children) => {
                let mut kept = Children::default();
                for (key, child) in children.iter() {
                    let found = child
                        .filter(query)
                        .unwrap_or_else(|| Node::derived_from(child));
                    kept.insert(key.to_string(), found);
                }
                Some(Node::derived_from(self).with_kind(NodeKind::Index(kept)))
            }
            NodeKind::Leaves(items) => {
                let matched: Vec<_> = items
                    .iter()
                    .filter(|leaf| query.matches(&leaf.borrow().name))
                    .cloned()
                    .collect();
                if matched.is_empty() {
                    None
                } else {
                    Some(Node::derived_from(self).with_kind(NodeKind::Leaves(matched)))
                }
            }
            NodeKind::Empty => None,
        }
    }
}
