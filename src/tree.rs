//! Builds the hierarchy from a flat enumeration of leaf records.

use tracing::debug;

use crate::leaf::{LeafRef, LeafSource};
use crate::node::{Node, NodeKind};
use crate::pattern::normalize;

pub const DEFAULT_DELIMITER: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Separator between segments of a leaf name.
    pub delimiter: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// Counters from one parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub indexed: usize,
    /// Names without a delimiter.
    pub unstructured: usize,
    /// Names whose path collides with an existing node of the other shape.
    pub conflicting: usize,
}

/// Build a fresh root from `source`.
pub fn parse<S: LeafSource + ?Sized>(source: &S, options: &ParseOptions) -> Node {
    let mut root = Node::root();
    root.parse_into(source, options);
    root
}

impl Node {
    /// Index every leaf of `source` under this node.
    ///
    /// Leaves already present at their slot are not appended again, so
    /// parsing the same source twice yields the same tree.
    pub fn parse_into<S: LeafSource + ?Sized>(
        &mut self,
        source: &S,
        options: &ParseOptions,
    ) -> ParseStats {
        let mut stats = ParseStats::default();
        for leaf in source.leaves() {
            let name = leaf.name();
            if name.is_empty() || options.delimiter.is_empty() {
                stats.unstructured += 1;
                continue;
            }
            let segments: Vec<String> = name
                .split(options.delimiter.as_str())
                .map(|segment| normalize(segment).into_owned())
                .collect();
            if segments.len() < 2 {
                stats.unstructured += 1;
                continue;
            }
            if self.insert_leaf(&segments, leaf) {
                stats.indexed += 1;
            } else {
                debug!(name = %name, "leaf path conflicts with an existing node, skipped");
                stats.conflicting += 1;
            }
        }
        debug!(
            indexed = stats.indexed,
            unstructured = stats.unstructured,
            conflicting = stats.conflicting,
            "parsed leaf records"
        );
        stats
    }

    fn insert_leaf(&mut self, segments: &[String], leaf: LeafRef) -> bool {
        let Some((head, rest)) = segments.split_first() else {
            let present = self.leaves().iter().any(|l| l.ptr_eq(&leaf));
            return present || self.push(leaf);
        };
        if self.is_leaves() {
            return false;
        }
        if matches!(self.kind, NodeKind::Empty) {
            self.kind = NodeKind::Index(Default::default());
        }
        let template = self.child_of(head);
        match &mut self.kind {
            NodeKind::Index(children) => children
                .get_or_insert_with(head, || template)
                .insert_leaf(rest, leaf),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{LeafRecord, share};

    fn leaves(names: &[&str]) -> Vec<LeafRef> {
        share(names.iter().map(|n| LeafRecord::text(*n, *n)).collect())
    }

    #[test]
    fn builds_module_group_field_levels() {
        let leaves = leaves(&["mod/grp/name", "mod/grp/age", "mod/other/x"]);
        let root = parse(&leaves, &ParseOptions::default());
        let module = root.child("mod").unwrap();
        let group = module.child("grp").unwrap();
        let field = group.child("name").unwrap();
        assert_eq!(module.depth(), 1);
        assert_eq!(group.depth(), 2);
        assert_eq!(field.depth(), 3);
        assert_eq!(field.leaves(), &leaves[0..1]);
        assert_eq!(group.form().unwrap().keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(module.form().unwrap().keys().collect::<Vec<_>>(), vec!["grp", "other"]);
    }

    #[test]
    fn list_suffixed_siblings_share_slot() {
        let leaves = leaves(&["a/b/x123456", "a/b/x789012"]);
        let root = parse(&leaves, &ParseOptions::default());
        let x = root.child("a").and_then(|a| a.child("b")).and_then(|b| b.child("x")).unwrap();
        assert_eq!(x.leaves(), leaves.as_slice());
    }

    #[test]
    fn undelimited_names_are_skipped() {
        let leaves = leaves(&["plain", "", "a/b"]);
        let mut root = Node::root();
        let stats = root.parse_into(&leaves, &ParseOptions::default());
        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.unstructured, 2);
        assert_eq!(root.fields(), vec![leaves[2].clone()]);
    }

    #[test]
    fn two_segment_names_make_leaf_collections_at_depth_two() {
        let leaves = leaves(&["a/b"]);
        let root = parse(&leaves, &ParseOptions::default());
        let b = root.child("a").unwrap().child("b").unwrap();
        assert!(b.is_leaves());
        assert_eq!(b.depth(), 2);
    }

    #[test]
    fn shape_conflicts_are_skipped() {
        let leaves = leaves(&["a/b", "a/b/c", "x/y/z", "x/y"]);
        let mut root = Node::root();
        let stats = root.parse_into(&leaves, &ParseOptions::default());
        assert_eq!(stats.indexed, 2);
        assert_eq!(stats.conflicting, 2);
        assert_eq!(root.fields(), vec![leaves[0].clone(), leaves[2].clone()]);
    }

    #[test]
    fn reparse_is_idempotent() {
        let leaves = leaves(&["a/b/c", "a/b/c", "a/d/e"]);
        let mut root = Node::root();
        root.parse_into(&leaves, &ParseOptions::default());
        let once = root.clone();
        root.parse_into(&leaves, &ParseOptions::default());
        assert_eq!(root, once);
    }

    #[test]
    fn custom_delimiter() {
        let leaves = leaves(&["a:b:c", "a/b/c"]);
        let options = ParseOptions {
            delimiter: ":".into(),
        };
        let root = parse(&leaves, &options);
        assert_eq!(root.fields(), vec![leaves[0].clone()]);
        assert!(root.child("a").and_then(|a| a.child("b")).is_some());
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn name_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-c]{1,2}",
                "[a-c]{1,2}/[a-c]{1,2}/[a-c]{1,2}",
                "[a-c]{1,2}/[a-c]{1,2}/[a-c]{1,2}[0-9]{6}",
            ]
        }

        proptest! {
            #[test]
            fn fields_are_delimited_leaves_in_order(names in prop::collection::vec(name_strategy(), 0..30)) {
                let leaves = share(names.iter().map(|n| LeafRecord::text(n.clone(), "")).collect());
                let root = parse(&leaves, &ParseOptions::default());
                let fields = root.fields();
                let expected: Vec<LeafRef> = leaves
                    .iter()
                    .filter(|l| l.name().contains('/'))
                    .cloned()
                    .collect();
                // Same three-level names never conflict, so every delimited
                // leaf is indexed; fields groups them per slot.
                prop_assert_eq!(fields.len(), expected.len());
                for leaf in &expected {
                    prop_assert!(fields.contains(leaf));
                }
                for leaf in &fields {
                    prop_assert!(leaf.name().contains('/'));
                }
                // Within one slot, enumeration order survives.
                let slot = |leaf: &LeafRef| -> Vec<String> {
                    leaf.name().split('/').map(|s| normalize(s).into_owned()).collect()
                };
                let position = |leaf: &LeafRef| leaves.iter().position(|l| l.ptr_eq(leaf));
                for pair in fields.windows(2) {
                    if slot(&pair[0]) == slot(&pair[1]) {
                        prop_assert!(position(&pair[0]) < position(&pair[1]));
                    }
                }
            }
        }
    }
}
