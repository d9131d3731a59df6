//! Lexical shapes recognized in leaf names.
//!
//! Every other component goes through these helpers when it needs to read
//! structure out of a name: list suffixes collapse repeated siblings into one
//! tree slot, ids drive grouping, and size descriptors / required markers are
//! rewritten by the value mutators.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::leaf::LeafKind;

static LIST_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^0-9]+)[0-9]{6,}").unwrap());
static ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{5,}").unwrap());
static SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)x([0-9]+)").unwrap());
static REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s+)required\b").unwrap());

const REQUIRED_TOKEN: &str = "required";

/// True if the segment carries a numeric list suffix: a non-digit run
/// followed by six or more digits.
pub fn is_list_suffixed(segment: &str) -> bool {
    LIST_SUFFIX.is_match(segment)
}

/// Strip the list suffix from a segment so numbered siblings share a slot.
///
/// Only the first suffixed run is rewritten; `field000123` becomes `field`,
/// while a segment without a non-digit prefix (`123456`) is left alone.
pub fn normalize(segment: &str) -> Cow<'_, str> {
    LIST_SUFFIX.replacen(segment, 1, "$1")
}

/// The first run of five or more digits anywhere in `name`.
pub fn extract_id(name: &str) -> Option<&str> {
    ID.find(name).map(|m| m.as_str())
}

/// A `WxH` size descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u64,
    pub height: u64,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The first `WxH` pair found in `text`.
pub fn extract_size(text: &str) -> Option<Size> {
    let caps = SIZE.captures(text)?;
    Some(Size {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

/// Replace the first `WxH` pair in `text` with `size`.
pub fn replace_size(text: &str, size: Size) -> Cow<'_, str> {
    SIZE.replacen(text, 1, size.to_string().as_str())
}

pub fn is_required_marked(class: &str) -> bool {
    REQUIRED.is_match(class)
}

/// Add the required marker token to a class string. Already-marked strings
/// come back unchanged.
pub fn mark_required(class: &str) -> String {
    if is_required_marked(class) {
        class.to_string()
    } else if class.trim().is_empty() {
        REQUIRED_TOKEN.to_string()
    } else {
        format!("{class} {REQUIRED_TOKEN}")
    }
}

/// Remove every required marker token from a class string.
pub fn unmark_required(class: &str) -> String {
    REQUIRED.replace_all(class, "").trim().to_string()
}

/// Checkboxes and radios only contribute their value when checked.
pub fn is_state_field(kind: LeafKind) -> bool {
    matches!(kind, LeafKind::Checkbox | LeafKind::Radio)
}
