use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Input type of a leaf record, as far as the index cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    #[default]
    Text,
    Checkbox,
    Radio,
    #[serde(alias = "select-one", alias = "select-multiple")]
    Select,
    #[serde(other)]
    Other,
}

impl LeafKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeafKind::Text => "text",
            LeafKind::Checkbox => "checkbox",
            LeafKind::Radio => "radio",
            LeafKind::Select => "select",
            LeafKind::Other => "other",
        }
    }
}

/// One externally owned form field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeafRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: LeafKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

impl LeafRecord {
    pub fn new(name: impl Into<String>, kind: LeafKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, LeafKind::Text, value)
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, LeafKind::Checkbox, value)
        }
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, LeafKind::Radio, value)
        }
    }
}

/// Shared handle onto a leaf record.
///
/// The index never owns records; it keeps handles so that mutations made
/// through a query result (value, required marker, ...) are visible to the
/// layer that enumerated the records. Equality is identity.
#[derive(Clone)]
pub struct LeafRef(Rc<RefCell<LeafRecord>>);

impl LeafRef {
    pub fn new(record: LeafRecord) -> Self {
        Self(Rc::new(RefCell::new(record)))
    }

    pub fn borrow(&self) -> Ref<'_, LeafRecord> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, LeafRecord> {
        self.0.borrow_mut()
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn kind(&self) -> LeafKind {
        self.0.borrow().kind
    }

    /// A detached copy of the current record state.
    pub fn snapshot(&self) -> LeafRecord {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &LeafRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for LeafRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for LeafRef {}

impl fmt::Debug for LeafRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LeafRef").field(&*self.0.borrow()).finish()
    }
}

impl From<LeafRecord> for LeafRef {
    fn from(record: LeafRecord) -> Self {
        Self::new(record)
    }
}

/// Wrap owned records into shared handles, preserving order.
pub fn share(records: Vec<LeafRecord>) -> Vec<LeafRef> {
    records.into_iter().map(LeafRef::new).collect()
}

/// Enumeration of the leaf records to index, in document order.
pub trait LeafSource {
    fn leaves(&self) -> Vec<LeafRef>;
}

impl LeafSource for [LeafRef] {
    fn leaves(&self) -> Vec<LeafRef> {
        self.to_vec()
    }
}

impl LeafSource for Vec<LeafRef> {
    fn leaves(&self) -> Vec<LeafRef> {
        self.clone()
    }
}
