use serde::{Serialize, Serializer};
use tracing::debug;

use crate::leaf::LeafRef;
use crate::node::Node;
use crate::pattern::extract_id;

/// Arity-normalized fold result: nothing, exactly one value, or several.
///
/// Serializes as `false`, the bare value, or an array respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Fetched<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Fetched::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Fetched::None => 0,
            Fetched::One(_) => 1,
            Fetched::Many(items) => items.len(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Fetched::None => Vec::new(),
            Fetched::One(item) => vec![item],
            Fetched::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for Fetched<T> {
    fn from(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Fetched::None,
            1 => Fetched::One(items.remove(0)),
            _ => Fetched::Many(items),
        }
    }
}

impl<T: Serialize> Serialize for Fetched<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fetched::None => serializer.serialize_bool(false),
            Fetched::One(item) => item.serialize(serializer),
            Fetched::Many(items) => items.serialize(serializer),
        }
    }
}

impl Node {
    /// Fold every reachable leaf left to right.
    pub fn reduce<B>(&self, init: B, f: impl FnMut(B, &LeafRef) -> B) -> B {
        self.fields().iter().fold(init, f)
    }

    /// Fold into a list starting empty, then normalize its arity.
    pub fn fetch<T>(&self, f: impl FnMut(Vec<T>, &LeafRef) -> Vec<T>) -> Fetched<T> {
        Fetched::from(self.reduce(Vec::new(), f))
    }

    /// Visit every reachable leaf with its position in `fields`.
    pub fn each(&self, mut f: impl FnMut(usize, &LeafRef)) {
        for (idx, leaf) in self.fields().iter().enumerate() {
            f(idx, leaf);
        }
    }

    /// Distinct numeric ids embedded in the leaf names, first seen first.
    ///
    /// An id too long for `u64` is left out (and logged at debug); `groups`
    /// still clusters on its digits.
    pub fn id(&self) -> Fetched<u64> {
        self.fetch(|mut ids, leaf| {
            let record = leaf.borrow();
            let Some(digits) = extract_id(&record.name) else {
                return ids;
            };
            match digits.parse::<u64>() {
                Ok(id) if !ids.contains(&id) => ids.push(id),
                Ok(_) => {}
                Err(_) => debug!(name = %record.name, "id does not fit in u64, skipped"),
            }
            ids
        })
    }
}
