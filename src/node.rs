//! The hierarchy node: either an index of named children or an ordered
//! collection of leaves.

use std::collections::HashMap;
use std::fmt;

use crate::leaf::LeafRef;

/// Key path from the root to a node. Used as the non-owning parent handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Named children of an index node, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Children {
    nodes: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl Children {
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&idx| &self.nodes[idx].1)
    }

    /// Insert `node` under `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: String, node: Node) {
        match self.index.get(&key) {
            Some(&idx) => self.nodes[idx].1 = node,
            None => {
                self.index.insert(key.clone(), self.nodes.len());
                self.nodes.push((key, node));
            }
        }
    }

    pub(crate) fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> Node) -> &mut Node {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.nodes.len();
                self.index.insert(key.to_string(), idx);
                self.nodes.push((key.to_string(), make()));
                idx
            }
        };
        &mut self.nodes[idx].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Not committed to a shape yet. Also stands in for a branch with no
    /// matches in a filtered tree.
    Empty,
    Index(Children),
    Leaves(Vec<LeafRef>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodePath>,
    pub(crate) path: NodePath,
    pub(crate) group_key: Option<String>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn root() -> Self {
        Self {
            depth: 0,
            parent: None,
            path: NodePath::root(),
            group_key: None,
            kind: NodeKind::Empty,
        }
    }

    /// A fresh, unanchored collection (used for cross-branch results).
    pub(crate) fn detached() -> Self {
        Self::root()
    }

    pub(crate) fn child_of(&self, key: &str) -> Self {
        Self {
            depth: self.depth + 1,
            parent: Some(self.path.clone()),
            path: self.path.child(key),
            group_key: None,
            kind: NodeKind::Empty,
        }
    }

    /// An empty node standing for a derived view of `source` (filter and
    /// grouping results). Its parent handle points at `source`.
    pub(crate) fn derived_from(source: &Node) -> Self {
        Self {
            depth: source.depth,
            parent: Some(source.path.clone()),
            path: source.path.clone(),
            group_key: source.group_key.clone(),
            kind: NodeKind::Empty,
        }
    }

    pub(crate) fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<&NodePath> {
        self.parent.as_ref()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// The id this node was grouped under, for nodes produced by `groups`.
    pub fn group_key(&self) -> Option<&str> {
        self.group_key.as_deref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, NodeKind::Index(_))
    }

    pub fn is_leaves(&self) -> bool {
        matches!(self.kind, NodeKind::Leaves(_))
    }

    /// Number of leaves held directly. Index nodes report zero.
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leaves held directly by this node.
    pub fn leaves(&self) -> &[LeafRef] {
        match &self.kind {
            NodeKind::Leaves(items) => items,
            _ => &[],
        }
    }

    /// Direct children of an index node, or `None` for any other shape.
    pub fn form(&self) -> Option<&Children> {
        match &self.kind {
            NodeKind::Index(children) if !children.is_empty() => Some(children),
            _ => None,
        }
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.form()?.get(key)
    }

    /// Insert `node` as the child `key`, committing an untyped node to the
    /// index shape. Returns false on a leaf collection.
    pub fn insert_child(&mut self, key: String, node: Node) -> bool {
        if matches!(self.kind, NodeKind::Empty) {
            self.kind = NodeKind::Index(Children::default());
        }
        match &mut self.kind {
            NodeKind::Index(children) => {
                children.insert(key, node);
                true
            }
            _ => false,
        }
    }

    /// Append a leaf. Only leaf collections (or untyped nodes, which become
    /// one) accept leaves; returns false on an index node.
    pub fn push(&mut self, leaf: LeafRef) -> bool {
        match &mut self.kind {
            NodeKind::Empty => {
                self.kind = NodeKind::Leaves(vec![leaf]);
                true
            }
            NodeKind::Leaves(items) => {
                items.push(leaf);
                true
            }
            NodeKind::Index(_) => false,
        }
    }

    /// Half-open slice of the leaf collection. Negative offsets count from
    /// the end; `end = None` runs to the end. Out-of-range bounds clamp, so
    /// the result may be empty but never fails.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Node {
        let items = self.leaves();
        let len = items.len() as isize;
        let clamp = |offset: isize| {
            if offset < 0 {
                (len + offset).max(0)
            } else {
                offset.min(len)
            }
        };
        let from = clamp(start);
        let to = end.map_or(len, clamp);
        let picked = if from < to {
            items[from as usize..to as usize].to_vec()
        } else {
            Vec::new()
        };
        Node {
            depth: self.depth,
            parent: self.parent.clone(),
            path: self.path.clone(),
            group_key: self.group_key.clone(),
            kind: NodeKind::Leaves(picked),
        }
    }

    /// One-leaf slice at `index`; `-1` is the last leaf.
    pub fn get(&self, index: isize) -> Node {
        match index.checked_add(1) {
            Some(0) | None => self.slice(index, None),
            Some(end) => self.slice(index, Some(end)),
        }
    }

    pub fn first(&self) -> Node {
        self.get(0)
    }

    pub fn last(&self) -> Node {
        self.get(-1)
    }

    /// Every leaf reachable from this node, in child insertion order.
    pub fn fields(&self) -> Vec<LeafRef> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut Vec<LeafRef>) {
        match &self.kind {
            NodeKind::Empty => {}
            NodeKind::Leaves(items) => out.extend(items.iter().cloned()),
            NodeKind::Index(children) => {
                for child in children.values() {
                    child.collect_fields(out);
                }
            }
        }
    }

    /// Follow a parent handle (or any path) down from this node, treated as
    /// the root.
    pub fn resolve(&self, path: &NodePath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, key| node.child(key))
    }
}
