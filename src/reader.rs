use std::borrow::Cow;
use std::collections::VecDeque;

use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::entity::parse_entities;
use crate::error::Error;
use crate::event::{Attribute, EndElement, Event, ProcessingInstruction, StartElement};
use crate::qname::{QName, XMLNS, XML_NAMESPACE};

/// Reads events from XML text.
///
/// Element and attribute prefixes are resolved to namespace URIs. Namespace
/// declarations stay attributes: `xmlns:p="..."` gets namespace `xmlns` and
/// local name `p`, `xmlns="..."` gets no namespace and local name `xmlns`.
/// A prefix that isn't declared is kept as the namespace as is. An empty
/// element `<a/>` produces both a start and an end element.
///
/// ```rust
/// use xmlproc::{Event, QName, Reader};
///
/// let events = Reader::new(r#"<a xmlns:p="urn:x"><p:b/></a>"#)
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(events.len(), 4);
/// assert_eq!(events[1], Event::start(QName::ns("urn:x", "b")));
/// # Ok::<(), xmlproc::Error>(())
/// ```
pub struct Reader<'a> {
    input: &'a str,
    tokenizer: Tokenizer<'a>,
    // declarations per open element, innermost last
    declarations: Vec<Vec<(&'a str, Cow<'a, str>)>>,
    open: Vec<OpenElement<'a>>,
    pending: Option<PendingElement<'a>>,
    queue: VecDeque<Event>,
    dtd_start: Option<usize>,
    done: bool,
}

struct OpenElement<'a> {
    prefix: &'a str,
    local: &'a str,
    name: QName,
}

struct PendingElement<'a> {
    prefix: &'a str,
    local: &'a str,
    attributes: Vec<(&'a str, &'a str, Cow<'a, str>)>,
}

fn qualified(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

// the text between `<!` and `>`
fn directive(markup: &str) -> String {
    let markup = markup.strip_prefix("<!").unwrap_or(markup);
    markup.strip_suffix('>').unwrap_or(markup).to_string()
}

impl<'a> Reader<'a> {
    /// A reader over the given XML text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            tokenizer: Tokenizer::from(input),
            declarations: Vec::new(),
            open: Vec::new(),
            pending: None,
            queue: VecDeque::new(),
            dtd_start: None,
            done: false,
        }
    }

    fn namespace_by_prefix(&self, prefix: &str) -> Option<String> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE.to_string());
        }
        let found = self
            .declarations
            .iter()
            .rev()
            .find_map(|scope| scope.iter().find(|(p, _)| *p == prefix))
            .map(|(_, uri)| uri.to_string());
        match found {
            // xmlns="" takes the default namespace away again
            Some(uri) if uri.is_empty() => None,
            Some(uri) => Some(uri),
            // an unprefixed name without default namespace has no namespace
            None if prefix.is_empty() => None,
            // an undeclared prefix is passed on as it is
            None => Some(prefix.to_string()),
        }
    }

    fn element_name(&self, prefix: &str, local: &str) -> QName {
        QName {
            namespace: self.namespace_by_prefix(prefix),
            local: local.to_string(),
        }
    }

    fn attribute_name(&self, prefix: &str, local: &str) -> QName {
        if prefix == XMLNS {
            QName::ns(XMLNS, local)
        } else if prefix.is_empty() {
            QName::new(local)
        } else {
            self.element_name(prefix, local)
        }
    }

    fn open_element(&mut self, pending: PendingElement<'a>) {
        let declarations = pending
            .attributes
            .iter()
            .filter_map(|(prefix, local, value)| {
                if *prefix == XMLNS {
                    Some((*local, value.clone()))
                } else if prefix.is_empty() && *local == XMLNS {
                    Some(("", value.clone()))
                } else {
                    None
                }
            })
            .collect();
        self.declarations.push(declarations);

        let name = self.element_name(pending.prefix, pending.local);
        let attributes = pending
            .attributes
            .iter()
            .map(|(prefix, local, value)| {
                Attribute::new(self.attribute_name(prefix, local), value.to_string())
            })
            .collect();
        self.queue.push_back(Event::StartElement(StartElement {
            name: name.clone(),
            attributes,
        }));
        self.open.push(OpenElement {
            prefix: pending.prefix,
            local: pending.local,
            name,
        });
    }

    fn close_element(&mut self, prefix: &str, local: &str) -> Result<(), Error> {
        // nothing open: the close tag can't match anything
        let open = self
            .open
            .pop()
            .ok_or_else(|| Error::InvalidCloseTag(String::new(), qualified(prefix, local)))?;
        if open.prefix != prefix || open.local != local {
            return Err(Error::InvalidCloseTag(
                qualified(open.prefix, open.local),
                qualified(prefix, local),
            ));
        }
        self.declarations.pop();
        self.queue
            .push_back(Event::EndElement(EndElement { name: open.name }));
        Ok(())
    }

    fn handle(&mut self, token: Token<'a>) -> Result<(), Error> {
        match token {
            Token::Declaration {
                version,
                encoding,
                standalone,
                ..
            } => {
                let mut data = format!("version=\"{}\"", version.as_str());
                if let Some(encoding) = encoding {
                    data.push_str(&format!(" encoding=\"{}\"", encoding.as_str()));
                }
                if let Some(standalone) = standalone {
                    let standalone = if standalone { "yes" } else { "no" };
                    data.push_str(&format!(" standalone=\"{}\"", standalone));
                }
                self.queue
                    .push_back(Event::ProcessingInstruction(ProcessingInstruction {
                        target: "xml".to_string(),
                        data: Some(data),
                    }));
            }
            Token::ProcessingInstruction {
                target, content, ..
            } => {
                self.queue
                    .push_back(Event::ProcessingInstruction(ProcessingInstruction {
                        target: target.as_str().to_string(),
                        data: content.map(|c| c.as_str().to_string()),
                    }));
            }
            Token::Comment { text, .. } => {
                self.queue.push_back(Event::comment(text.as_str()));
            }
            Token::DtdStart { span, .. } => {
                self.dtd_start = Some(span.start());
            }
            Token::DtdEnd { span } => {
                let start = self.dtd_start.take().unwrap_or_else(|| span.start());
                let markup = &self.input[start..span.end()];
                self.queue.push_back(Event::Directive(directive(markup)));
            }
            Token::EmptyDtd { span, .. } => {
                self.queue
                    .push_back(Event::Directive(directive(span.as_str())));
            }
            // part of the doctype directive
            Token::EntityDeclaration { .. } => {}
            Token::ElementStart { prefix, local, .. } => {
                self.pending = Some(PendingElement {
                    prefix: prefix.as_str(),
                    local: local.as_str(),
                    attributes: Vec::new(),
                });
            }
            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => {
                let value = parse_entities(value.as_str())?;
                if let Some(pending) = &mut self.pending {
                    pending
                        .attributes
                        .push((prefix.as_str(), local.as_str(), value));
                }
            }
            Token::ElementEnd {
                end: ElementEnd::Close(prefix, local),
                ..
            } => {
                self.close_element(prefix.as_str(), local.as_str())?;
            }
            Token::ElementEnd { end, .. } => {
                // the tokenizer only ends a start tag it began
                if let Some(pending) = self.pending.take() {
                    let (prefix, local) = (pending.prefix, pending.local);
                    self.open_element(pending);
                    if matches!(end, ElementEnd::Empty) {
                        self.close_element(prefix, local)?;
                    }
                }
            }
            Token::Text { text } => {
                let text = parse_entities(text.as_str())?;
                self.queue.push_back(Event::Text(text.into_owned()));
            }
            Token::Cdata { text, .. } => {
                self.queue.push_back(Event::text(text.as_str()));
            }
        }
        Ok(())
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<Event, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }
            let result = match self.tokenizer.next() {
                Some(Ok(token)) => self.handle(token),
                Some(Err(e)) => Err(e.into()),
                None => {
                    self.done = true;
                    match self.open.last() {
                        Some(open) => Err(Error::UnclosedTag(qualified(open.prefix, open.local))),
                        None => Ok(()),
                    }
                }
            };
            if let Err(e) = result {
                self.done = true;
                self.queue.clear();
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(xml: &str) -> Vec<Event> {
        Reader::new(xml).collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_prefixed() {
        assert_eq!(
            events(r#"<a xmlns:p="urn:x"><p:b/></a>"#),
            vec![
                StartElement::new(QName::new("a"))
                    .with_attribute(QName::ns("xmlns", "p"), "urn:x")
                    .into(),
                Event::start(QName::ns("urn:x", "b")),
                Event::end(QName::ns("urn:x", "b")),
                Event::end(QName::new("a")),
            ]
        );
    }

    #[test]
    fn test_default_namespace() {
        assert_eq!(
            events(r#"<a xmlns="urn:x" c="C"><b/></a>"#),
            vec![
                StartElement::new(QName::ns("urn:x", "a"))
                    .with_attribute(QName::new("xmlns"), "urn:x")
                    .with_attribute(QName::new("c"), "C")
                    .into(),
                Event::start(QName::ns("urn:x", "b")),
                Event::end(QName::ns("urn:x", "b")),
                Event::end(QName::ns("urn:x", "a")),
            ]
        );
    }

    #[test]
    fn test_default_namespace_undeclared() {
        let events = events(r#"<a xmlns="urn:x"><b xmlns=""/></a>"#);
        assert_eq!(events[2], Event::end(QName::new("b")));
    }

    #[test]
    fn test_undeclared_prefix_passed_on() {
        assert_eq!(
            events(r#"<ns:tag/>"#),
            vec![
                Event::start(QName::ns("ns", "tag")),
                Event::end(QName::ns("ns", "tag")),
            ]
        );
    }

    #[test]
    fn test_xml_prefix() {
        let events = events(r#"<a xml:space="preserve"/>"#);
        assert_eq!(
            events[0],
            StartElement::new(QName::new("a"))
                .with_attribute(QName::ns(XML_NAMESPACE, "space"), "preserve")
                .into()
        );
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            events(r#"<a b="x&amp;y&#xA;">1 &lt; 2<![CDATA[&amp;]]></a>"#),
            vec![
                StartElement::new(QName::new("a"))
                    .with_attribute(QName::new("b"), "x&y\n")
                    .into(),
                Event::text("1 < 2"),
                Event::text("&amp;"),
                Event::end(QName::new("a")),
            ]
        );
    }

    #[test]
    fn test_misc() {
        assert_eq!(
            events(r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE a><a><!--c--><?pi data?></a>"#),
            vec![
                Event::ProcessingInstruction(ProcessingInstruction {
                    target: "xml".to_string(),
                    data: Some(r#"version="1.0" encoding="UTF-8""#.to_string()),
                }),
                Event::Directive("DOCTYPE a".to_string()),
                Event::start(QName::new("a")),
                Event::comment("c"),
                Event::ProcessingInstruction(ProcessingInstruction {
                    target: "pi".to_string(),
                    data: Some("data".to_string()),
                }),
                Event::end(QName::new("a")),
            ]
        );
    }

    #[test]
    fn test_doctype_internal_subset() {
        let events = events(r#"<!DOCTYPE a [<!ENTITY e "x">]><a/>"#);
        assert_eq!(
            events[0],
            Event::Directive(r#"DOCTYPE a [<!ENTITY e "x">]"#.to_string())
        );
    }

    #[test]
    fn test_invalid_close_tag() {
        let err = Reader::new("<doc><a></doc>")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCloseTag(expected, found) if expected == "a" && found == "doc"));
    }

    #[test]
    fn test_start_tags_pair_with_attributes() {
        let mut reader = Reader::new(r#"<a x="1"><b y="2"/><c></c></a>"#);
        let events = reader.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(
            events,
            vec![
                StartElement::new(QName::new("a"))
                    .with_attribute(QName::new("x"), "1")
                    .into(),
                StartElement::new(QName::new("b"))
                    .with_attribute(QName::new("y"), "2")
                    .into(),
                Event::end(QName::new("b")),
                Event::start(QName::new("c")),
                Event::end(QName::new("c")),
                Event::end(QName::new("a")),
            ]
        );
        assert!(reader.pending.is_none());
        assert!(reader.open.is_empty());
    }

    #[test]
    fn test_unclosed_tag() {
        let err = Reader::new("<doc>").collect::<Result<Vec<_>, _>>().unwrap_err();
        assert!(matches!(err, Error::UnclosedTag(name) if name == "doc"));
    }

    #[test]
    fn test_tokenizer_error_stops() {
        let mut reader = Reader::new("<doc><");
        assert_eq!(reader.next().unwrap().unwrap(), Event::start(QName::new("doc")));
        assert!(matches!(reader.next(), Some(Err(Error::Parser(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_invalid_entity() {
        let err = Reader::new("<doc>&nope;</doc>")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEntity(entity) if entity == "nope"));
    }
}
