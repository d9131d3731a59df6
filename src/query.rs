//! Path lookups with fallback search.
//!
//! Each segment of a dotted path is resolved against the current node in
//! three tiers:
//!
//! 1. a direct child with that key;
//! 2. a grandchild with that key, under the first child that has one;
//! 3. a recursive search inside each child, in insertion order.
//!
//! `find` keeps the first match at every step. `find_all` gathers the leaves
//! of every searched match instead of descending into it.

use tracing::trace;

use crate::filter::Query;
use crate::node::Node;

pub const PATH_SEPARATOR: char = '.';

impl Node {
    /// Resolve `path`, first match wins.
    pub fn find(&self, path: &str) -> Option<&Node> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |base, segment| base.resolve_segment(segment))
    }

    /// `find`, then restrict the result to leaves matching `query`.
    pub fn find_with(&self, path: &str, query: &Query) -> Option<Node> {
        self.find(path)?.filter(query)
    }

    /// Collect the leaves held by every tier-2 or tier-3 match of each
    /// segment into one flat collection. `None` if nothing was collected.
    ///
    /// A direct child hit moves the walk down and contributes nothing, so a
    /// path made only of direct keys yields `None`. Searched hits contribute
    /// their own leaves but leave the walk where it is, and a segment nothing
    /// resolves is passed over.
    pub fn find_all(&self, path: &str) -> Option<Node> {
        let mut base = self;
        let mut found = Node::detached();
        for segment in path.split(PATH_SEPARATOR) {
            if let Some(child) = base.child(segment) {
                base = child;
                continue;
            }
            let Some(form) = base.form() else {
                continue;
            };
            let mut hits: Vec<&Node> = form.values().filter_map(|child| child.child(segment)).collect();
            if hits.is_empty() {
                hits = form
                    .values()
                    .filter_map(|child| child.resolve_segment(segment))
                    .collect();
            }
            trace!(segment, at = %base.path(), hits = hits.len(), "collected search hits");
            for hit in hits {
                for leaf in hit.leaves() {
                    found.push(leaf.clone());
                }
            }
        }
        if found.is_empty() { None } else { Some(found) }
    }

    pub fn find_all_with(&self, path: &str, query: &Query) -> Option<Node> {
        self.find_all(path)?.filter(query)
    }

    fn resolve_segment(&self, segment: &str) -> Option<&Node> {
        if let Some(child) = self.child(segment) {
            return Some(child);
        }
        let form = self.form()?;
        if let Some(found) = form.values().find_map(|child| child.child(segment)) {
            trace!(segment, at = %self.path(), "resolved one level down");
            return Some(found);
        }
        let found = form.values().find_map(|child| child.resolve_segment(segment));
        if found.is_some() {
            trace!(segment, at = %self.path(), "resolved by recursive search");
        }
        found
    }
}
