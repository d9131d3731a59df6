//! Reading and writing leaf state through a node.

use crate::fold::Fetched;
use crate::node::Node;
use crate::pattern::{extract_size, is_state_field, mark_required, replace_size, unmark_required};

/// A value assigned to every leaf under a node.
///
/// State fields (checkbox, radio) get checked when `Text` equals their own
/// value, or unconditionally for `Bool(true)`. Other fields take the value
/// as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl Node {
    /// Current values: every plain field, plus state fields that are checked
    /// or selected.
    pub fn value(&self) -> Fetched<String> {
        self.fetch(|mut values, leaf| {
            let record = leaf.borrow();
            if !is_state_field(record.kind) || record.checked || record.selected {
                values.push(record.value.clone());
            }
            values
        })
    }

    pub fn set_value(&self, value: impl Into<FieldValue>) {
        let value = value.into();
        self.each(|_, leaf| {
            let mut record = leaf.borrow_mut();
            if is_state_field(record.kind) {
                record.checked = match &value {
                    FieldValue::Text(text) => record.value == *text,
                    FieldValue::Bool(all) => *all,
                };
            } else {
                record.value = match &value {
                    FieldValue::Text(text) => text.clone(),
                    FieldValue::Bool(flag) => flag.to_string(),
                };
            }
        });
    }

    /// Add or strip the required marker on every leaf's class attribute.
    pub fn set_required(&self, required: bool) {
        self.each(|_, leaf| {
            let mut record = leaf.borrow_mut();
            record.class_name = if required {
                mark_required(&record.class_name)
            } else {
                unmark_required(&record.class_name)
            };
        });
    }

    /// Rewrite the `WxH` size carried in each leaf's value to the first size
    /// found in `descriptor`. Returns false, touching nothing, when the
    /// descriptor holds no size.
    pub fn set_size(&self, descriptor: &str) -> bool {
        let Some(size) = extract_size(descriptor) else {
            return false;
        };
        self.each(|_, leaf| {
            let mut record = leaf.borrow_mut();
            let resized = replace_size(&record.value, size).into_owned();
            record.value = resized;
        });
        true
    }
}
