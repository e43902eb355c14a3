// Tokenizers hand us names as (namespace URI, local name) pairs. Consumers
// that don't know about namespaces want `prefix:local` text instead. We
// rebuild the prefixes from the declarations seen so far, tracking one scope
// per open element.

use crate::error::Error;
use crate::event::{EndElement, Event, StartElement};
use crate::mapper::{Mapped, Mapper};
use crate::qname::{QName, XMLNS};

/// A prefix bound to a namespace URI. The empty prefix is the default
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceBinding {
    /// The prefix, empty for the default namespace.
    pub prefix: String,
    /// The namespace URI.
    pub uri: String,
}

/// The namespace declarations of a single element.
///
/// Lookups return the first matching binding, so if an element declares the
/// same prefix twice the first declaration wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    bindings: Vec<NamespaceBinding>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding.
    pub fn set(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.bindings.push(NamespaceBinding {
            prefix: prefix.into(),
            uri: uri.into(),
        });
    }

    /// First binding for this prefix.
    pub fn find_prefix(&self, prefix: &str) -> Option<&NamespaceBinding> {
        self.bindings.iter().find(|b| b.prefix == prefix)
    }

    /// First binding for this namespace URI.
    pub fn find_uri(&self, uri: &str) -> Option<&NamespaceBinding> {
        self.bindings.iter().find(|b| b.uri == uri)
    }

    /// All bindings, in declaration order.
    pub fn bindings(&self) -> &[NamespaceBinding] {
        &self.bindings
    }

    /// Whether this scope declares nothing.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// One [`Scope`] per open element.
///
/// Lookups search the innermost scope first, so an inner declaration shadows
/// an outer one for as long as its element is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeStack {
    // innermost scope last
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Close the innermost scope. Does nothing if the stack is empty.
    pub fn pop(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    /// Add a binding to the innermost scope, opening one if there is none.
    pub fn set(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        if self.scopes.is_empty() {
            self.push();
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.set(prefix, uri);
        }
    }

    /// Innermost binding for this prefix.
    pub fn find_prefix(&self, prefix: &str) -> Option<&NamespaceBinding> {
        self.scopes.iter().rev().find_map(|s| s.find_prefix(prefix))
    }

    /// Innermost binding for this namespace URI.
    pub fn find_uri(&self, uri: &str) -> Option<&NamespaceBinding> {
        self.scopes.iter().rev().find_map(|s| s.find_uri(uri))
    }

    /// Number of open scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether no scope is open.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// The innermost scope.
    pub fn innermost(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Drop all scopes.
    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    /// Rewrite a name to its `prefix:local` form.
    ///
    /// A name without namespace is left alone. A namespace equal to the
    /// innermost default namespace is dropped without adding a prefix, even
    /// if a prefix for it is in scope too. Otherwise the innermost prefix
    /// bound to the namespace is used. A namespace made up of ASCII letters
    /// only is taken to be a prefix already. Anything else stays unresolved.
    pub fn resolve(&self, name: &mut QName) {
        let namespace = match name.namespace() {
            Some(namespace) => namespace.to_string(),
            None => return,
        };

        if let Some(default) = self.find_prefix("") {
            if default.uri == namespace {
                name.namespace = None;
                return;
            }
        }

        if let Some(binding) = self.find_uri(&namespace) {
            name.join_prefix(&binding.prefix);
            return;
        }

        if namespace.bytes().all(|b| b.is_ascii_alphabetic()) {
            name.join_prefix(&namespace);
        }
    }
}

/// Rewrites namespaced names to `prefix:local` names.
///
/// Every start element opens a scope holding the namespaces it declares;
/// the matching end element closes it. Element and attribute names are then
/// rewritten using the prefixes in scope, and `xmlns:foo` declarations are
/// re-emitted literally.
///
/// ```rust
/// use xmlproc::mappers::NamespaceNormalizer;
/// use xmlproc::{Event, Mapped, Mapper, QName, StartElement};
///
/// let mut normalizer = NamespaceNormalizer::new();
/// let start = StartElement::new(QName::ns("urn:x", "a"))
///     .with_attribute(QName::ns("xmlns", "p"), "urn:x");
/// let mapped = normalizer.map(start.into())?;
/// assert_eq!(
///     mapped,
///     Mapped::Keep(
///         StartElement::new(QName::new("p:a"))
///             .with_attribute(QName::new("xmlns:p"), "urn:x")
///             .into()
///     )
/// );
/// # Ok::<(), xmlproc::Error>(())
/// ```
///
/// A normalizer handles a single document; use [`reset`](Self::reset) before
/// reusing it.
#[derive(Debug, Clone, Default)]
pub struct NamespaceNormalizer {
    stack: ScopeStack,
}

impl NamespaceNormalizer {
    /// A normalizer without any namespaces in scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer starting out with the given stack, i.e. to process a
    /// fragment of a larger document.
    pub fn with_stack(stack: ScopeStack) -> Self {
        Self { stack }
    }

    /// The namespaces currently in scope.
    pub fn stack(&self) -> &ScopeStack {
        &self.stack
    }

    /// Mutable access to the namespaces in scope.
    pub fn stack_mut(&mut self) -> &mut ScopeStack {
        &mut self.stack
    }

    /// Forget all open scopes so another document can be processed.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    fn start_element(&mut self, mut element: StartElement) -> StartElement {
        self.stack.push();
        for attribute in &element.attributes {
            if attribute.name.in_namespace(XMLNS) {
                self.stack
                    .set(attribute.name.local.as_str(), attribute.value.as_str());
            } else if attribute.name.namespace().is_none() && attribute.name.local == XMLNS {
                self.stack.set("", attribute.value.as_str());
            }
        }

        self.stack.resolve(&mut element.name);
        for attribute in &mut element.attributes {
            if attribute.name.in_namespace(XMLNS) {
                attribute.name.join_prefix(XMLNS);
            } else {
                self.stack.resolve(&mut attribute.name);
            }
        }
        element
    }

    fn end_element(&mut self, mut element: EndElement) -> EndElement {
        self.stack.resolve(&mut element.name);
        self.stack.pop();
        element
    }
}

impl Mapper for NamespaceNormalizer {
    fn map(&mut self, event: Event) -> Result<Mapped, Error> {
        Ok(Mapped::Keep(match event {
            Event::StartElement(element) => self.start_element(element).into(),
            Event::EndElement(element) => self.end_element(element).into(),
            event => event,
        }))
    }
}
