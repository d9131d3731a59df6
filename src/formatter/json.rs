use std::io::Write;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::formatter::{Formatter, Report};
use crate::leaf::LeafRecord;
use crate::node::{Node, NodeKind};

pub struct JsonFormatter;

/// An index node as an object in child order, a leaf collection as an array
/// of records, an empty node as `null`.
struct TreeView<'a>(&'a Node);

impl Serialize for TreeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.kind() {
            NodeKind::Empty => serializer.serialize_none(),
            NodeKind::Leaves(items) => {
                let records: Vec<LeafRecord> = items.iter().map(|leaf| leaf.snapshot()).collect();
                records.serialize(serializer)
            }
            NodeKind::Index(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children.iter() {
                    map.serialize_entry(key, &TreeView(child))?;
                }
                map.end()
            }
        }
    }
}

#[derive(Serialize)]
struct NoMatchOutput<'a> {
    path: &'a str,
    matched: bool,
}

fn to_json(report: &Report) -> serde_json::Result<String> {
    match report {
        Report::Tree(root) => serde_json::to_string_pretty(&TreeView(root)),
        Report::Leaves(records) => serde_json::to_string_pretty(records),
        Report::Values(values) => serde_json::to_string_pretty(values),
        Report::Ids(ids) => serde_json::to_string_pretty(ids),
        Report::Groups(groups) => serde_json::to_string_pretty(groups),
        Report::NoMatch { path } => serde_json::to_string_pretty(&NoMatchOutput {
            path,
            matched: false,
        }),
    }
}

impl Formatter for JsonFormatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write) {
        match to_json(report) {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
            }
            Err(e) => tracing::warn!("failed to serialize report: {e}"),
        }
    }
}
