//! Hierarchical index over path-named form fields.
//!
//! Leaf records named like `module/group/field` are indexed into a tree of
//! [`node::Node`]s that can be searched with dotted paths, filtered by id,
//! folded, grouped and written back through shared leaf handles.

pub mod anchor;
pub mod cli;
pub mod config;
pub mod filter;
pub mod fold;
pub mod formatter;
pub mod groups;
pub mod leaf;
pub mod node;
pub mod pattern;
pub mod query;
pub mod source;
pub mod tree;
pub mod value;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use cli::{Args, Command};
use config::load_config;
use filter::Query;
use formatter::{GroupSummary, Report, create_formatter};
use leaf::{LeafRecord, share};
use node::Node;
use source::{SourceFormat, leaves_from_str, load_leaves};
use tree::ParseOptions;

/// Run one command. Returns the exit code: 0 = matched, 1 = no match.
pub fn run(args: Args) -> Result<i32> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    run_to(args, &mut lock)
}

/// `run`, writing the report to `out` instead of stdout.
pub fn run_to(args: Args, out: &mut dyn Write) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let delimiter = args
        .delimiter
        .clone()
        .unwrap_or_else(|| config.delimiter().to_string());
    if delimiter.is_empty() {
        anyhow::bail!("--delimiter must not be empty");
    }
    let format = args.format.as_deref().unwrap_or(config.format());
    debug!(delimiter = %delimiter, format, "resolved settings");

    let records = read_leaves(&args.leaves)?;
    debug!(count = records.len(), "loaded leaf records");

    let leaves = share(records);
    let mut root = Node::root();
    let stats = root.parse_into(&leaves, &ParseOptions { delimiter });
    if stats.indexed == 0 && !leaves.is_empty() {
        tracing::warn!("no leaf name contains the delimiter; the index is empty");
    }

    let report = execute(&root, &args.command);
    create_formatter(format).format_to(&report, out);
    Ok(if report.is_match() { 0 } else { 1 })
}

fn read_leaves(path: &Path) -> Result<Vec<LeafRecord>> {
    if path != Path::new("-") {
        return load_leaves(path);
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read leaf records from stdin")?;
    leaves_from_str(&input, SourceFormat::Json).context("failed to parse leaf records from stdin")
}

fn snapshots(node: &Node) -> Vec<LeafRecord> {
    node.fields().iter().map(|leaf| leaf.snapshot()).collect()
}

/// Leaves of a lookup result; a result holding no leaf is a miss.
fn leaves_report(found: Option<Node>, path: &str) -> Report {
    let records = found.as_ref().map(snapshots).unwrap_or_default();
    if records.is_empty() {
        return Report::NoMatch {
            path: path.to_string(),
        };
    }
    Report::Leaves(records)
}

/// Evaluate `command` against an indexed tree.
pub fn execute(root: &Node, command: &Command) -> Report {
    match command {
        Command::Tree => Report::Tree(root.clone()),
        Command::Find { path, id } => {
            let found = match id {
                Some(id) => root.find_with(path, &Query::id(id.as_str())),
                None => root.find(path).cloned(),
            };
            leaves_report(found, path)
        }
        Command::FindAll { path, id } => {
            let found = match id {
                Some(id) => root.find_all_with(path, &Query::id(id.as_str())),
                None => root.find_all(path),
            };
            leaves_report(found, path)
        }
        Command::Value { path }
        | Command::Ids { path }
        | Command::Groups { path }
        | Command::Set { path, .. } => {
            let Some(node) = root.find(path) else {
                return Report::NoMatch { path: path.clone() };
            };
            match command {
                Command::Value { .. } => Report::Values(node.value()),
                Command::Ids { .. } => Report::Ids(node.id()),
                Command::Groups { .. } => {
                    Report::Groups(node.groups().iter().map(GroupSummary::from_node).collect())
                }
                _ => {
                    if let Some(value) = command.assigned_value() {
                        node.set_value(value);
                    }
                    Report::Leaves(snapshots(node))
                }
            }
        }
    }
}
