use std::fmt;

/// Everything that can go wrong while processing a document.
///
/// Errors come from three places: the event source (parsing), a mapper in
/// the chain, or the event sink (serialization). Whichever happens first
/// aborts [`Processor::process`](crate::Processor::process) and is returned
/// as is.
#[derive(Debug)]
pub enum Error {
    /// An entity reference without a closing `;`.
    UnclosedEntity(String),
    /// An entity reference that isn't predefined or a character reference.
    InvalidEntity(String),
    /// A close tag that doesn't match the open element.
    ///
    /// Contains the expected name and the name found, both as written. The
    /// expected name is empty if no element was open.
    InvalidCloseTag(String, String),
    /// The input ended while this element was still open.
    UnclosedTag(String),
    /// The detected encoding label isn't known.
    UnknownEncoding(String),
    /// A mapper refused an event.
    Mapper(Box<dyn std::error::Error + Send + Sync>),
    /// An end element was written that doesn't match the open start element.
    ///
    /// Contains the expected name and the name found.
    UnmatchedEndTag(String, String),
    /// An end element was written while no element was open.
    UnexpectedEndTag(String),
    /// Underlying I/O error.
    Io(std::io::Error),
    /// Tokenizer error.
    Parser(xmlparser::Error),
}

impl Error {
    /// Wrap a mapper's own failure.
    ///
    /// ```rust
    /// use xmlproc::Error;
    ///
    /// let err = Error::mapper("attribute `id` is missing");
    /// assert_eq!(err.to_string(), "mapper failed: attribute `id` is missing");
    /// ```
    pub fn mapper(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Mapper(e.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnclosedEntity(entity) => write!(f, "unclosed entity: &{}", entity),
            Error::InvalidEntity(entity) => write!(f, "invalid entity: &{};", entity),
            Error::InvalidCloseTag(expected, found) => {
                write!(f, "invalid close tag: expected </{}>, found </{}>", expected, found)
            }
            Error::UnclosedTag(name) => write!(f, "unclosed tag: <{}>", name),
            Error::UnknownEncoding(label) => write!(f, "unknown encoding: {}", label),
            Error::Mapper(e) => write!(f, "mapper failed: {}", e),
            Error::UnmatchedEndTag(expected, found) => {
                write!(f, "end tag </{}> does not match start tag <{}>", found, expected)
            }
            Error::UnexpectedEndTag(name) => write!(f, "unexpected end tag </{}>", name),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Parser(e) => write!(f, "parser error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Mapper(e) => Some(e.as_ref()),
            Error::Io(e) => Some(e),
            Error::Parser(e) => Some(e),
            _ => None,
        }
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parser(e)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
