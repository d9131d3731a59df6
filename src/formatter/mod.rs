pub mod json;
pub mod text;

use std::io::Write;

use serde::Serialize;

use crate::fold::Fetched;
use crate::leaf::LeafRecord;
use crate::node::Node;

/// One group produced by `groups`: its id key and the names of its leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub leaves: Vec<String>,
}

impl GroupSummary {
    pub fn from_node(node: &Node) -> Self {
        Self {
            key: node.group_key().unwrap_or_default().to_string(),
            leaves: node.fields().iter().map(|leaf| leaf.name()).collect(),
        }
    }
}

/// Result of one command, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Tree(Node),
    Leaves(Vec<LeafRecord>),
    Values(Fetched<String>),
    Ids(Fetched<u64>),
    Groups(Vec<GroupSummary>),
    NoMatch { path: String },
}

impl Report {
    pub fn is_match(&self) -> bool {
        !matches!(self, Report::NoMatch { .. })
    }
}

pub trait Formatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write);
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}
