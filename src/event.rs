use crate::qname::QName;

/// The type of an event.
///
/// Use this if you are interested in the kind of event without needing to
/// match on it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EventType {
    /// Start of an element.
    StartElement,
    /// End of an element.
    EndElement,
    /// Text.
    Text,
    /// Comment.
    Comment,
    /// Processing instruction, including the XML declaration.
    ProcessingInstruction,
    /// Other `<!...>` markup, like a doctype.
    Directive,
}

/// A single event of a streamed XML document.
///
/// Events flow from an [`EventSource`](crate::EventSource) through the
/// mappers of a [`Processor`](crate::Processor) into an
/// [`EventSink`](crate::EventSink).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Start of an element, i.e. `<foo a="A">`.
    StartElement(StartElement),
    /// End of an element, i.e. `</foo>`.
    EndElement(EndElement),
    /// Text, with entities already decoded.
    Text(String),
    /// Comment, i.e. `<!--foo-->`. Holds the text between the markers.
    Comment(String),
    /// Processing instruction, i.e. `<?target data?>`.
    ProcessingInstruction(ProcessingInstruction),
    /// Directive, i.e. `<!DOCTYPE doc>`. Holds the text between `<!` and `>`.
    Directive(String),
}

impl Event {
    /// Start element event without attributes.
    pub fn start(name: QName) -> Self {
        Event::StartElement(StartElement::new(name))
    }

    /// End element event.
    pub fn end(name: QName) -> Self {
        Event::EndElement(EndElement { name })
    }

    /// Text event.
    pub fn text(content: impl Into<String>) -> Self {
        Event::Text(content.into())
    }

    /// Comment event.
    pub fn comment(content: impl Into<String>) -> Self {
        Event::Comment(content.into())
    }

    /// Returns the type of the event.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::StartElement(_) => EventType::StartElement,
            Event::EndElement(_) => EventType::EndElement,
            Event::Text(_) => EventType::Text,
            Event::Comment(_) => EventType::Comment,
            Event::ProcessingInstruction(_) => EventType::ProcessingInstruction,
            Event::Directive(_) => EventType::Directive,
        }
    }
}

impl From<StartElement> for Event {
    fn from(element: StartElement) -> Self {
        Event::StartElement(element)
    }
}

impl From<EndElement> for Event {
    fn from(element: EndElement) -> Self {
        Event::EndElement(element)
    }
}

/// An attribute of a start element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Attribute name.
    pub name: QName,
    /// Attribute value, with entities already decoded.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Start of an element.
///
/// Attributes are kept in document order. Namespace declarations are
/// attributes too, until the tokenizer or a mapper says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartElement {
    /// Element name.
    pub name: QName,
    /// Attributes, in document order.
    pub attributes: Vec<Attribute>,
}

impl StartElement {
    /// A start element without attributes.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute, builder style.
    ///
    /// ```rust
    /// use xmlproc::{QName, StartElement};
    ///
    /// let element = StartElement::new(QName::new("doc"))
    ///     .with_attribute(QName::new("a"), "A");
    /// assert_eq!(element.attribute("a"), Some("A"));
    /// assert_eq!(element.attribute("b"), None);
    /// ```
    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Value of the first attribute with this local name, in any namespace.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Mutable value of the first attribute with this local name.
    pub fn attribute_mut(&mut self, local: &str) -> Option<&mut String> {
        self.attributes
            .iter_mut()
            .find(|a| a.name.local == local)
            .map(|a| &mut a.value)
    }

    /// The end element matching this start element.
    pub fn end(&self) -> EndElement {
        EndElement {
            name: self.name.clone(),
        }
    }
}

/// End of an element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndElement {
    /// Element name.
    pub name: QName,
}

/// Processing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingInstruction {
    /// The target, i.e. `xml-stylesheet`.
    pub target: String,
    /// Everything after the target, if anything.
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        assert_eq!(
            Event::start(QName::new("a")).event_type(),
            EventType::StartElement
        );
        assert_eq!(Event::end(QName::new("a")).event_type(), EventType::EndElement);
        assert_eq!(Event::text("t").event_type(), EventType::Text);
        assert_eq!(Event::comment("c").event_type(), EventType::Comment);
        assert_eq!(
            Event::Directive("DOCTYPE doc".to_string()).event_type(),
            EventType::Directive
        );
    }

    #[test]
    fn test_end_matches_start() {
        let start = StartElement::new(QName::ns("http://example.com", "a"))
            .with_attribute(QName::new("b"), "B");
        assert_eq!(start.end().name, start.name);
    }

    #[test]
    fn test_attribute_mut() {
        let mut start = StartElement::new(QName::new("a")).with_attribute(QName::new("b"), "B");
        if let Some(value) = start.attribute_mut("b") {
            value.push('!');
        }
        assert_eq!(start.attribute("b"), Some("B!"));
    }
}
