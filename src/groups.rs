use crate::leaf::LeafRef;
use crate::node::{Children, Node, NodeKind};
use crate::pattern::extract_id;

impl Node {
    /// Cluster leaves by the id embedded in their names.
    ///
    /// A leaf collection splits into one collection per id, in first-seen
    /// order; leaves without an id are dropped. An index node groups each
    /// child and merges the results by id, so every returned node holds, for
    /// one id, the matching part of each child under that child's key.
    pub fn groups(&self) -> Vec<Node> {
        match &self.kind {
            NodeKind::Leaves(items) => {
                let mut clusters: Vec<(String, Vec<LeafRef>)> = Vec::new();
                for leaf in items {
                    let name = leaf.name();
                    let Some(id) = extract_id(&name) else {
                        continue;
                    };
                    match clusters.iter_mut().find(|(key, _)| key == id) {
                        Some((_, members)) => members.push(leaf.clone()),
                        None => clusters.push((id.to_string(), vec![leaf.clone()])),
                    }
                }
                clusters
                    .into_iter()
                    .map(|(key, members)| self.group_node(key, NodeKind::Leaves(members)))
                    .collect()
            }
            NodeKind::Index(children) => {
                let mut merged: Vec<(String, Children)> = Vec::new();
                for (child_key, child) in children.iter() {
                    for found in child.groups() {
                        let Some(id) = found.group_key().map(str::to_owned) else {
                            continue;
                        };
                        let slot = match merged.iter().position(|(key, _)| *key == id) {
                            Some(pos) => pos,
                            None => {
                                merged.push((id, Children::default()));
                                merged.len() - 1
                            }
                        };
                        merged[slot].1.insert(child_key.to_string(), found);
                    }
                }
                merged
                    .into_iter()
                    .map(|(key, parts)| self.group_node(key, NodeKind::Index(parts)))
                    .collect()
            }
            NodeKind::Empty => Vec::new(),
        }
    }

    fn group_node(&self, key: String, kind: NodeKind) -> Node {
        let mut node = Node::derived_from(self).with_kind(kind);
        node.group_key = Some(key);
        node
    }
}
