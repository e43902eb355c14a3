use std::fmt::{Display, Formatter};

/// The namespace tokenizers put namespace declaration attributes in.
///
/// `xmlns:foo="..."` arrives as an attribute with namespace `xmlns` and
/// local name `foo`. The default declaration `xmlns="..."` arrives without
/// namespace and with local name `xmlns`.
pub const XMLNS: &str = "xmlns";

/// The namespace bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The name of an element or attribute.
///
/// Before namespace normalization a name is split: `namespace` holds the
/// namespace URI (or, for names from a sloppy tokenizer, a bare prefix) and
/// `local` the local name without any colon. After normalization the name
/// is joined: `local` holds the full `prefix:local` text and `namespace` is
/// cleared.
///
/// An empty namespace string means the same as no namespace at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QName {
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Local name.
    pub local: String,
}

impl QName {
    /// A name that isn't in a namespace.
    ///
    /// ```rust
    /// use xmlproc::QName;
    ///
    /// let name = QName::new("doc");
    /// assert_eq!(name.namespace(), None);
    /// assert_eq!(name.local(), "doc");
    /// ```
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// A name in a namespace.
    ///
    /// ```rust
    /// use xmlproc::QName;
    ///
    /// let name = QName::ns("http://example.com", "doc");
    /// assert_eq!(name.namespace(), Some("http://example.com"));
    /// assert_eq!(name.to_string(), "{http://example.com}doc");
    /// ```
    pub fn ns(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// The namespace, or `None` if the name isn't in one.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// The local name.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Whether this name is in the given namespace.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace() == Some(namespace)
    }

    /// Join the name with a prefix and drop the namespace.
    pub(crate) fn join_prefix(&mut self, prefix: &str) {
        self.local = format!("{}:{}", prefix, self.local);
        self.namespace = None;
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.namespace() {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}
