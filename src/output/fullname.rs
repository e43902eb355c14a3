// Names arrive here either already joined (`prefix:local`, no namespace) or,
// when nothing resolved them, still carrying a namespace URI. The latter
// need a declaration written along with them.

use std::borrow::Cow;

use crate::qname::{QName, XMLNS, XML_NAMESPACE};

pub(crate) struct FullnameSerializer<'a> {
    // prefixes generated for the start tag being written
    generated: Vec<(String, &'a str)>,
}

impl<'a> FullnameSerializer<'a> {
    pub(crate) fn new() -> Self {
        Self {
            generated: Vec::new(),
        }
    }

    // an element in an unresolved namespace is written with its local name
    // only; the caller declares the namespace as the default
    pub(crate) fn element_fullname(&self, name: &'a QName) -> Cow<'a, str> {
        Cow::Borrowed(name.local())
    }

    // an element whose literal `xmlns` declares another namespace can't use
    // the default namespace, so it gets a generated prefix
    pub(crate) fn prefixed_element_fullname(&mut self, name: &'a QName) -> Cow<'a, str> {
        match name.namespace() {
            Some(namespace) => Cow::Owned(format!(
                "{}:{}",
                self.generated_prefix(namespace),
                name.local()
            )),
            None => Cow::Borrowed(name.local()),
        }
    }

    pub(crate) fn attribute_fullname(&mut self, name: &'a QName) -> Cow<'a, str> {
        let namespace = match name.namespace() {
            Some(namespace) => namespace,
            None => return Cow::Borrowed(name.local()),
        };
        let prefix = if namespace == XMLNS {
            XMLNS.to_string()
        } else if namespace == XML_NAMESPACE {
            "xml".to_string()
        } else {
            self.generated_prefix(namespace)
        };
        Cow::Owned(format!("{}:{}", prefix, name.local()))
    }

    fn generated_prefix(&mut self, namespace: &'a str) -> String {
        if let Some((prefix, _)) = self.generated.iter().find(|(_, ns)| *ns == namespace) {
            return prefix.clone();
        }
        let prefix = format!("n{}", self.generated.len());
        self.generated.push((prefix.clone(), namespace));
        prefix
    }

    pub(crate) fn into_generated(self) -> Vec<(String, &'a str)> {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_no_namespace() {
        let name = QName::new("p:a");
        let fullname_serializer = FullnameSerializer::new();
        assert_eq!(
            fullname_serializer.element_fullname(&name),
            Cow::Borrowed("p:a")
        );
    }

    #[test]
    fn test_element_unresolved_namespace() {
        let name = QName::ns("http://example.com", "a");
        let fullname_serializer = FullnameSerializer::new();
        assert_eq!(fullname_serializer.element_fullname(&name), "a");
    }

    #[test]
    fn test_prefixed_element_shares_generated_prefix() {
        let element = QName::ns("http://example.com/x", "e");
        let attribute = QName::ns("http://example.com/x", "a");
        let mut fullname_serializer = FullnameSerializer::new();
        assert_eq!(
            fullname_serializer.prefixed_element_fullname(&element),
            "n0:e"
        );
        assert_eq!(fullname_serializer.attribute_fullname(&attribute), "n0:a");
        assert_eq!(
            fullname_serializer.into_generated(),
            vec![("n0".to_string(), "http://example.com/x")]
        );
    }

    #[test]
    fn test_attribute_no_namespace() {
        let name = QName::new("a");
        let mut fullname_serializer = FullnameSerializer::new();
        assert_eq!(fullname_serializer.attribute_fullname(&name), "a");
        assert!(fullname_serializer.into_generated().is_empty());
    }

    #[test]
    fn test_attribute_xml_and_xmlns() {
        let space = QName::ns(XML_NAMESPACE, "space");
        let declaration = QName::ns(XMLNS, "p");
        let mut fullname_serializer = FullnameSerializer::new();
        assert_eq!(fullname_serializer.attribute_fullname(&space), "xml:space");
        assert_eq!(fullname_serializer.attribute_fullname(&declaration), "xmlns:p");
        assert!(fullname_serializer.into_generated().is_empty());
    }

    #[test]
    fn test_attribute_generated_prefixes() {
        let x1 = QName::ns("http://example.com/x", "a");
        let y = QName::ns("http://example.com/y", "b");
        let x2 = QName::ns("http://example.com/x", "c");
        let mut fullname_serializer = FullnameSerializer::new();
        assert_eq!(fullname_serializer.attribute_fullname(&x1), "n0:a");
        assert_eq!(fullname_serializer.attribute_fullname(&y), "n1:b");
        assert_eq!(fullname_serializer.attribute_fullname(&x2), "n0:c");
        assert_eq!(
            fullname_serializer.into_generated(),
            vec![
                ("n0".to_string(), "http://example.com/x"),
                ("n1".to_string(), "http://example.com/y"),
            ]
        );
    }
}
