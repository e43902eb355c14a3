use std::borrow::Cow;

use genawaiter::rc::gen;
use genawaiter::yield_;

use crate::entity::{serialize_attribute, serialize_text};
use crate::event::Event;
use crate::qname::XMLNS;

use super::fullname::FullnameSerializer;

/// What a piece of serialized output represents.
#[derive(Debug, PartialEq)]
pub(crate) enum Output<'a> {
    /// Start tag open, i.e `<foo` or `<ns:foo`
    StartTagOpen(Cow<'a, str>),
    /// Start tag close, always `>`
    StartTagClose,
    /// End tag, i.e. `</foo>` or `</ns:foo>`
    EndTag(Cow<'a, str>),
    /// Generated namespace declaration, i.e. `xmlns:n0="http://example.com"`.
    /// The empty prefix declares the default namespace.
    Prefix(Cow<'a, str>, &'a str),
    /// Attribute, i.e. `foo="bar"`
    Attribute(Cow<'a, str>, &'a str),
    /// Text, i.e. `foo`
    Text(&'a str),
    /// Comment, i.e. `<!-- foo -->`
    Comment(&'a str),
    /// Processing instruction, i.e. `<?foo bar?>`
    ProcessingInstruction(&'a str, Option<&'a str>),
    /// Directive, i.e. `<!DOCTYPE foo>`
    Directive(&'a str),
}

pub(crate) fn gen_outputs(event: &Event) -> impl Iterator<Item = Output> + '_ {
    gen!({
        match event {
            Event::StartElement(element) => {
                let mut fullname_serializer = FullnameSerializer::new();
                let declared_default = element
                    .attributes
                    .iter()
                    .find(|a| a.name.namespace().is_none() && a.name.local == XMLNS)
                    .map(|a| a.value.as_str());

                // an unresolved element namespace becomes the default
                // namespace, unless the element declares a default itself;
                // a different declared default forces a generated prefix
                match (element.name.namespace(), declared_default) {
                    (Some(namespace), Some(declared)) if declared != namespace => {
                        yield_!(Output::StartTagOpen(
                            fullname_serializer.prefixed_element_fullname(&element.name)
                        ));
                    }
                    (Some(namespace), None) => {
                        yield_!(Output::StartTagOpen(
                            fullname_serializer.element_fullname(&element.name)
                        ));
                        yield_!(Output::Prefix(Cow::Borrowed(""), namespace));
                    }
                    _ => {
                        yield_!(Output::StartTagOpen(
                            fullname_serializer.element_fullname(&element.name)
                        ));
                    }
                }

                let attributes = element
                    .attributes
                    .iter()
                    .map(|a| {
                        (
                            fullname_serializer.attribute_fullname(&a.name),
                            a.value.as_str(),
                        )
                    })
                    .collect::<Vec<_>>();
                for (prefix, namespace) in fullname_serializer.into_generated() {
                    yield_!(Output::Prefix(Cow::Owned(prefix), namespace));
                }
                for (name, value) in attributes {
                    yield_!(Output::Attribute(name, value));
                }

                yield_!(Output::StartTagClose);
            }
            Event::EndElement(element) => {
                let fullname_serializer = FullnameSerializer::new();
                yield_!(Output::EndTag(
                    fullname_serializer.element_fullname(&element.name)
                ));
            }
            Event::Text(text) => {
                yield_!(Output::Text(text));
            }
            Event::Comment(comment) => {
                yield_!(Output::Comment(comment));
            }
            Event::ProcessingInstruction(pi) => {
                yield_!(Output::ProcessingInstruction(&pi.target, pi.data.as_deref()));
            }
            Event::Directive(directive) => {
                yield_!(Output::Directive(directive));
            }
        }
    })
    .into_iter()
}

/// An [`Output`] rendered as text.
pub(crate) struct OutputToken {
    /// Whether the token is prefixed by a space character.
    pub(crate) space: bool,
    /// The token.
    ///
    /// This is a fragment of XML like `<foo` or `a="A"` or `>`, etc.
    pub(crate) text: String,
}

pub(crate) fn render_output(output: &Output) -> OutputToken {
    use Output::*;
    match output {
        StartTagOpen(name) => OutputToken {
            space: false,
            text: format!("<{}", name),
        },
        StartTagClose => OutputToken {
            space: false,
            text: ">".to_string(),
        },
        EndTag(name) => OutputToken {
            space: false,
            text: format!("</{}>", name),
        },
        Prefix(prefix, namespace) => {
            let namespace = serialize_attribute(namespace);
            if prefix.is_empty() {
                OutputToken {
                    space: true,
                    text: format!("xmlns=\"{}\"", namespace),
                }
            } else {
                OutputToken {
                    space: true,
                    text: format!("xmlns:{}=\"{}\"", prefix, namespace),
                }
            }
        }
        Attribute(name, value) => OutputToken {
            space: true,
            text: format!("{}=\"{}\"", name, serialize_attribute(value)),
        },
        Text(text) => OutputToken {
            space: false,
            text: serialize_text(text).into_owned(),
        },
        Comment(text) => OutputToken {
            space: false,
            text: format!("<!--{}-->", text),
        },
        ProcessingInstruction(target, data) => {
            if let Some(data) = data {
                OutputToken {
                    space: false,
                    text: format!("<?{} {}?>", target, data),
                }
            } else {
                OutputToken {
                    space: false,
                    text: format!("<?{}?>", target),
                }
            }
        }
        Directive(text) => OutputToken {
            space: false,
            text: format!("<!{}>", text),
        },
    }
}
