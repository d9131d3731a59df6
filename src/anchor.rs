//! Contract with the presentation layer that owns the visual elements.
//!
//! The index decides which leaf anchors a node and where the label sits
//! relative to it; mapping that onto a concrete element tree is up to the
//! embedding application's [`ElementResolver`].

use crate::leaf::{LeafKind, LeafRef};
use crate::node::{Node, NodeKind};

/// Where the label of a field lives, relative to the field itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    /// Radios are wrapped by their label.
    Parent,
    /// Checkboxes: the label precedes the wrapping element.
    ParentPreviousSibling,
    PreviousSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnchor {
    pub leaf: LeafRef,
    pub position: LabelPosition,
}

/// The visual element standing for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Depth 1. The resolver climbs from the field to the module container.
    Module(FieldAnchor),
    /// Depth 2. The resolver climbs from the field to the group container.
    Group(FieldAnchor),
    Field(FieldAnchor),
}

impl Anchor {
    pub fn field(&self) -> &FieldAnchor {
        match self {
            Anchor::Module(field) | Anchor::Group(field) | Anchor::Field(field) => field,
        }
    }
}

pub trait ElementResolver {
    type Element;

    fn resolve(&self, anchor: &Anchor) -> Option<Self::Element>;

    fn text(&self, element: &Self::Element) -> String;

    fn set_markup(&self, element: &Self::Element, markup: &str);
}

impl Node {
    pub fn anchor(&self) -> Option<Anchor> {
        match self.depth {
            1 => self.first_field_anchor().map(Anchor::Module),
            2 => self.first_field_anchor().map(Anchor::Group),
            _ => self.field_anchor().map(Anchor::Field),
        }
    }

    /// Field anchor of the first leaf collection found depth-first.
    fn first_field_anchor(&self) -> Option<FieldAnchor> {
        match &self.kind {
            NodeKind::Index(children) => children.values().find_map(Node::first_field_anchor),
            _ => self.field_anchor(),
        }
    }

    /// The first leaf that is not a radio, or is a checked radio. A group of
    /// unchecked radios falls back to its first leaf.
    fn field_anchor(&self) -> Option<FieldAnchor> {
        let items = self.leaves();
        let leaf = items
            .iter()
            .find(|leaf| {
                let record = leaf.borrow();
                record.kind != LeafKind::Radio || record.checked
            })
            .or_else(|| items.first())?;
        let position = match leaf.kind() {
            LeafKind::Radio => LabelPosition::Parent,
            LeafKind::Checkbox => LabelPosition::ParentPreviousSibling,
            _ => LabelPosition::PreviousSibling,
        };
        Some(FieldAnchor {
            leaf: leaf.clone(),
            position,
        })
    }

    /// Text of the title element for this module, group or field.
    pub fn title<R: ElementResolver>(&self, resolver: &R) -> Option<String> {
        let element = resolver.resolve(&self.anchor()?)?;
        Some(resolver.text(&element))
    }

    /// Replace the markup of the title element. False if nothing resolved.
    pub fn set_title<R: ElementResolver>(&self, resolver: &R, markup: &str) -> bool {
        let Some(element) = self.anchor().and_then(|anchor| resolver.resolve(&anchor)) else {
            return false;
        };
        resolver.set_markup(&element, markup);
        true
    }

    pub fn label<R: ElementResolver>(&self, resolver: &R) -> Option<String> {
        self.title(resolver)
    }

    pub fn set_label<R: ElementResolver>(&self, resolver: &R, markup: &str) -> bool {
        self.set_title(resolver, markup)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::leaf::{LeafRecord, share};
    use crate::tree::{ParseOptions, parse};

    /// Labels keyed by "<scope>:<leaf name>".
    #[derive(Default)]
    struct Labels {
        text: RefCell<HashMap<String, String>>,
    }

    impl Labels {
        fn key(anchor: &Anchor) -> String {
            let scope = match anchor {
                Anchor::Module(_) => "module",
                Anchor::Group(_) => "group",
                Anchor::Field(_) => "field",
            };
            format!("{scope}:{}", anchor.field().leaf.name())
        }

        fn with(self, key: &str, text: &str) -> Self {
            self.text.borrow_mut().insert(key.into(), text.into());
            self
        }
    }

    impl ElementResolver for Labels {
        type Element = String;

        fn resolve(&self, anchor: &Anchor) -> Option<String> {
            let key = Self::key(anchor);
            self.text.borrow().contains_key(&key).then_some(key)
        }

        fn text(&self, element: &String) -> String {
            self.text.borrow()[element].clone()
        }

        fn set_markup(&self, element: &String, markup: &str) {
            self.text.borrow_mut().insert(element.clone(), markup.into());
        }
    }

    fn tree(records: Vec<LeafRecord>) -> (Node, Vec<LeafRef>) {
        let leaves = share(records);
        (parse(&leaves, &ParseOptions::default()), leaves)
    }

    #[test]
    fn depth_selects_anchor_kind() {
        let (root, leaves) = tree(vec![
            LeafRecord::text("m/g/name", ""),
            LeafRecord::text("m/g/age", ""),
        ]);
        let module = root.find("m").unwrap().anchor().unwrap();
        let group = root.find("m.g").unwrap().anchor().unwrap();
        let field = root.find("age").unwrap().anchor().unwrap();
        assert!(matches!(&module, Anchor::Module(f) if f.leaf == leaves[0]));
        assert!(matches!(&group, Anchor::Group(f) if f.leaf == leaves[0]));
        assert!(matches!(&field, Anchor::Field(f) if f.leaf == leaves[1]));
        assert_eq!(field.field().position, LabelPosition::PreviousSibling);
        assert!(root.anchor().is_none());
    }

    #[test]
    fn radio_anchor_prefers_checked() {
        let (root, leaves) = tree(vec![
            LeafRecord::radio("m/g/r", "a", false),
            LeafRecord::radio("m/g/r", "b", true),
        ]);
        let anchor = root.find("r").unwrap().anchor().unwrap();
        assert_eq!(anchor.field().leaf, leaves[1]);
        assert_eq!(anchor.field().position, LabelPosition::Parent);
    }

    #[test]
    fn unchecked_radios_fall_back_to_first() {
        let (root, leaves) = tree(vec![
            LeafRecord::radio("m/g/r", "a", false),
            LeafRecord::radio("m/g/r", "b", false),
        ]);
        let anchor = root.find("r").unwrap().anchor().unwrap();
        assert_eq!(anchor.field().leaf, leaves[0]);
    }

    #[test]
    fn checkbox_label_position() {
        let (root, _) = tree(vec![LeafRecord::checkbox("m/g/c", "on", false)]);
        let anchor = root.find("c").unwrap().anchor().unwrap();
        assert_eq!(anchor.field().position, LabelPosition::ParentPreviousSibling);
    }

    #[test]
    fn title_and_label_through_resolver() {
        let (root, _) = tree(vec![LeafRecord::text("m/g/name", "")]);
        let labels = Labels::default()
            .with("field:m/g/name", "Name")
            .with("module:m/g/name", "Profile");
        let name = root.find("name").unwrap();
        assert_eq!(name.title(&labels), Some("Name".into()));
        assert_eq!(name.label(&labels), Some("Name".into()));
        assert_eq!(root.find("m").unwrap().title(&labels), Some("Profile".into()));
        assert_eq!(root.find("g").unwrap().title(&labels), None);

        assert!(name.set_label(&labels, "<b>Full name</b>"));
        assert_eq!(name.title(&labels), Some("<b>Full name</b>".into()));
        assert!(!root.find("g").unwrap().set_title(&labels, "x"));
    }

    #[test]
    fn empty_collection_has_no_anchor() {
        let (root, _) = tree(vec![LeafRecord::text("m/g/name", "")]);
        assert!(root.find("name").unwrap().get(3).anchor().is_none());
    }
}
