use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::value::FieldValue;

#[derive(Parser, Debug)]
#[command(name = "fieldtree", version, about = "Query a hierarchical index of path-named form fields")]
pub struct Args {
    /// Leaf records file (.json, .yml or .yaml); `-` reads JSON from stdin
    pub leaves: PathBuf,

    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format [default: from config, else text]
    #[arg(short, long, global = true, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Segment delimiter inside leaf names [default: from config, else /]
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Enable debug output on stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the indexed hierarchy
    Tree,
    /// First match for a dotted path
    Find {
        path: String,
        /// Keep only leaves whose name contains this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Every match for a dotted path, as one flat collection
    FindAll {
        path: String,
        /// Keep only leaves whose name contains this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Current values under a path
    Value { path: String },
    /// Distinct numeric ids under a path
    Ids { path: String },
    /// Leaves under a path grouped by id
    Groups { path: String },
    /// Assign a value to every leaf under a path
    Set {
        path: String,
        #[arg(required_unless_present = "all")]
        value: Option<String>,
        /// Check every checkbox/radio regardless of its value
        #[arg(long, conflicts_with = "value")]
        all: bool,
    },
}

impl Command {
    /// The value a `set` command assigns. `--all` means literal `true`.
    pub fn assigned_value(&self) -> Option<FieldValue> {
        match self {
            Command::Set { all: true, .. } => Some(FieldValue::Bool(true)),
            Command::Set {
                value: Some(value), ..
            } => Some(FieldValue::Text(value.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn find_with_id() {
        let args = parse(&["fieldtree", "leaves.json", "find", "mod.name", "--id", "00012"]);
        assert_eq!(args.leaves, PathBuf::from("leaves.json"));
        assert_eq!(
            args.command,
            Command::Find {
                path: "mod.name".into(),
                id: Some("00012".into())
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = parse(&["fieldtree", "l.yml", "tree", "--format", "json", "--debug"]);
        assert_eq!(args.format.as_deref(), Some("json"));
        assert!(args.debug);
        assert_eq!(args.command, Command::Tree);
    }

    #[test]
    fn invalid_format_rejected() {
        assert!(Args::try_parse_from(["fieldtree", "l.json", "tree", "--format", "xml"]).is_err());
    }

    #[test]
    fn set_value_or_all() {
        let args = parse(&["fieldtree", "l.json", "set", "color", "red"]);
        assert_eq!(args.command.assigned_value(), Some(FieldValue::Text("red".into())));

        let args = parse(&["fieldtree", "l.json", "set", "color", "--all"]);
        assert_eq!(args.command.assigned_value(), Some(FieldValue::Bool(true)));

        assert!(Args::try_parse_from(["fieldtree", "l.json", "set", "color"]).is_err());
        assert!(Args::try_parse_from(["fieldtree", "l.json", "set", "color", "red", "--all"]).is_err());
    }

    #[test]
    fn non_set_commands_assign_nothing() {
        let args = parse(&["fieldtree", "l.json", "value", "color"]);
        assert_eq!(args.command.assigned_value(), None);
    }
}
