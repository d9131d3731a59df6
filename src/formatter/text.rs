use std::io::Write;

use crate::fold::Fetched;
use crate::formatter::{Formatter, Report};
use crate::leaf::LeafRecord;
use crate::node::{Node, NodeKind};

pub struct TextFormatter;

fn leaf_line(record: &LeafRecord) -> String {
    let mut line = format!("{} [{}] = {:?}", record.name, record.kind.as_str(), record.value);
    if record.checked {
        line.push_str(" (checked)");
    }
    if record.selected {
        line.push_str(" (selected)");
    }
    line
}

fn write_fetched<T: std::fmt::Display>(fetched: &Fetched<T>, out: &mut dyn Write) {
    match fetched {
        Fetched::None => {}
        Fetched::One(item) => {
            let _ = writeln!(out, "{item}");
        }
        Fetched::Many(items) => {
            for item in items {
                let _ = writeln!(out, "{item}");
            }
        }
    }
}

fn write_node(node: &Node, indent: usize, out: &mut dyn Write) {
    let pad = "  ".repeat(indent);
    match node.kind() {
        NodeKind::Empty => {}
        NodeKind::Leaves(items) => {
            for leaf in items {
                let _ = writeln!(out, "{pad}- {}", leaf_line(&leaf.borrow()));
            }
        }
        NodeKind::Index(children) => {
            for (key, child) in children.iter() {
                match child.kind() {
                    NodeKind::Empty => {
                        let _ = writeln!(out, "{pad}{key} (empty)");
                    }
                    NodeKind::Leaves(items) => {
                        let _ = writeln!(out, "{pad}{key} ({})", items.len());
                    }
                    NodeKind::Index(_) => {
                        let _ = writeln!(out, "{pad}{key}");
                    }
                }
                write_node(child, indent + 1, out);
            }
        }
    }
}

impl Formatter for TextFormatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write) {
        match report {
            Report::Tree(root) => write_node(root, 0, out),
            Report::Leaves(records) => {
                for record in records {
                    let _ = writeln!(out, "{}", leaf_line(record));
                }
            }
            Report::Values(values) => write_fetched(values, out),
            Report::Ids(ids) => write_fetched(ids, out),
            Report::Groups(groups) => {
                for group in groups {
                    let _ = writeln!(out, "{}: {}", group.key, group.leaves.join(", "));
                }
            }
            Report::NoMatch { path } => {
                let _ = writeln!(out, "no match for `{path}`");
            }
        }
    }
}
