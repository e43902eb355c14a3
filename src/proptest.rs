//! Proptest support
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module helps you write a proptest for a mapper by
//! generating arbitrary well-formed event sequences, shaped the way
//! [`Reader`](crate::Reader) produces them: names split into namespace and
//! local name, namespace declarations as `xmlns` attributes.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xmlproc = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use ahash::HashSet;
use proptest::prelude::*;

use crate::event::{Attribute, Event, ProcessingInstruction, StartElement};
use crate::qname::{QName, XMLNS, XML_NAMESPACE};

// "x" and "y" double as undeclared prefixes, "urn:1" never resolves
const NAMESPACES: &[&str] = &[
    "",
    "http://example.com/x",
    "http://example.com/y",
    "x",
    "urn:1",
];
const ATTRIBUTE_NAMESPACES: &[&str] = &["", "http://example.com/x", "y", "urn:1", XML_NAMESPACE];
const PREFIXES: &[&str] = &["", "x", "y"];
const URIS: &[&str] = &["http://example.com/x", "http://example.com/y"];
const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s"];
const PI_NAMES: &[&str] = &["pi1", "pi2", "pi3"];
const XML_STRING: &str = "[\u{000a}\u{0009}][\u{0020}-\u{D7FF}][\u{E000}-\u{FFFD}]*";
const XML_STRING_WITHOUT_WHITESPACE: &str = "[\u{0020}-\u{D7FF}][\u{E000}-\u{FFFD}]*";
const WHITESPACE: &str = "[ \t\n]*";

/// An element with its content, as generated by [`arb_element`].
#[derive(Debug, Clone)]
pub struct TreeElement {
    /// The element name.
    pub name: QName,
    /// Namespace declarations as `(prefix, uri)`; the empty prefix declares
    /// the default namespace.
    pub declarations: Vec<(String, String)>,
    /// Attributes other than namespace declarations.
    pub attributes: Vec<Attribute>,
    /// Content.
    pub children: Vec<TreeContent>,
}

/// Content of a [`TreeElement`].
#[derive(Debug, Clone)]
pub enum TreeContent {
    /// A nested element.
    Element(TreeElement),
    /// Text, possibly whitespace only.
    Text(String),
    /// A comment.
    Comment(String),
    /// A processing instruction.
    ProcessingInstruction(String, Option<String>),
}

impl TreeElement {
    /// The events for this element, from its start to its end.
    pub fn events(&self) -> Vec<Event> {
        let mut events = Vec::new();
        self.push_events(&mut events);
        events
    }

    fn push_events(&self, events: &mut Vec<Event>) {
        let mut start = StartElement::new(self.name.clone());
        for (prefix, uri) in &self.declarations {
            let name = if prefix.is_empty() {
                QName::new(XMLNS)
            } else {
                QName::ns(XMLNS, prefix.clone())
            };
            start = start.with_attribute(name, uri.clone());
        }
        start.attributes.extend(self.attributes.iter().cloned());
        events.push(start.into());
        for child in &self.children {
            match child {
                TreeContent::Element(element) => element.push_events(events),
                TreeContent::Text(text) => events.push(Event::text(text.clone())),
                TreeContent::Comment(comment) => events.push(Event::comment(comment.clone())),
                TreeContent::ProcessingInstruction(target, data) => {
                    events.push(Event::ProcessingInstruction(ProcessingInstruction {
                        target: target.clone(),
                        data: data.clone(),
                    }))
                }
            }
        }
        events.push(Event::end(self.name.clone()));
    }
}

fn qname(namespace: &str, local: &str) -> QName {
    if namespace.is_empty() {
        QName::new(local)
    } else {
        QName::ns(namespace, local)
    }
}

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (
        prop::sample::select(ATTRIBUTE_NAMES),
        prop::sample::select(ATTRIBUTE_NAMESPACES),
        XML_STRING_WITHOUT_WHITESPACE,
    )
        .prop_map(|(name, namespace, value)| Attribute::new(qname(namespace, name), value))
}

fn arb_declaration() -> impl Strategy<Value = (String, String)> {
    (prop::sample::select(PREFIXES), prop::sample::select(URIS))
        .prop_map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
}

fn arb_comment() -> impl Strategy<Value = String> {
    XML_STRING.prop_filter("comment", |s| !s.contains('-'))
}

fn arb_processing_instruction() -> impl Strategy<Value = (String, Option<String>)> {
    (
        prop::sample::select(PI_NAMES),
        prop::option::of(
            XML_STRING_WITHOUT_WHITESPACE
                .prop_filter("non-empty string", |s| !s.is_empty() && !s.contains("?>")),
        ),
    )
        .prop_map(|(target, data)| (target.to_string(), data))
}

fn arb_content() -> impl Strategy<Value = TreeContent> {
    let leaf = prop_oneof![
        XML_STRING.prop_map(TreeContent::Text),
        WHITESPACE.prop_map(TreeContent::Text),
        arb_comment().prop_map(TreeContent::Comment),
        arb_processing_instruction()
            .prop_map(|(target, data)| TreeContent::ProcessingInstruction(target, data)),
    ];

    leaf.prop_recursive(
        6,   // levels deep
        128, // maximum size of 128 nodes
        8,   // up to 8 items per collection
        |inner| {
            (
                prop::sample::select(ELEMENT_NAMES),
                prop::sample::select(NAMESPACES),
                prop::collection::vec(inner, 0..8),
                prop::collection::vec(arb_attribute(), 0..4),
                prop::collection::vec(arb_declaration(), 0..3),
            )
                .prop_map(|(name, namespace, children, attributes, declarations)| {
                    TreeContent::Element(TreeElement {
                        name: qname(namespace, name),
                        declarations: unduplicate_declarations(&declarations),
                        attributes: unduplicate_attributes(&attributes),
                        children,
                    })
                })
        },
    )
}

prop_compose! {
    /// Generate a random element with content.
    pub fn arb_element()(name in prop::sample::select(ELEMENT_NAMES),
                         namespace in prop::sample::select(NAMESPACES),
                         children in prop::collection::vec(arb_content(), 0..8),
                         attributes in prop::collection::vec(arb_attribute(), 0..4),
                         declarations in prop::collection::vec(arb_declaration(), 0..3)) -> TreeElement {
        TreeElement {
            name: qname(namespace, name),
            declarations: unduplicate_declarations(&declarations),
            attributes: unduplicate_attributes(&attributes),
            children,
        }
    }
}

fn unduplicate_attributes(attributes: &[Attribute]) -> Vec<Attribute> {
    let mut seen = HashSet::default();
    attributes
        .iter()
        .filter(|attribute| seen.insert(attribute.name.clone()))
        .cloned()
        .collect()
}

fn unduplicate_declarations(declarations: &[(String, String)]) -> Vec<(String, String)> {
    let mut seen = HashSet::default();
    declarations
        .iter()
        .filter(|(prefix, _)| seen.insert(prefix.clone()))
        .cloned()
        .collect()
}

/// Generate the events of a random well-formed document.
///
/// Example:
///
/// ```notrust
/// use xmlproc::proptest::arb_events;
/// use xmlproc::mappers::Pruner;
///
/// proptest! {
///   #[test]
///   fn test_pruner_keeps_elements(events in arb_events()) {
///     let mut out = Vec::new();
///     let mut processor = Processor::new();
///     processor.add_mapper(Pruner);
///     processor.process(events.into_iter().map(Ok), &mut out).unwrap();
///     prop_assert!(!out.is_empty());
///   }
/// }
/// ```
pub fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    (prop::collection::vec(arb_comment(), 0..3), arb_element()).prop_map(
        |(comments, element)| {
            let mut events = comments.into_iter().map(Event::comment).collect::<Vec<_>>();
            events.extend(element.events());
            events
        },
    )
}
