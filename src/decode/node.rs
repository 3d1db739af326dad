/// Generic node tree over an XML document
use crate::errors::DecodeError;
use roxmltree::Document;

/// Key holding an element's own text when it also has attributes or children
pub const TEXT_KEY: &str = "$text";

/// Untyped element tree.
///
/// Attributes and child elements land in the same keyed map, so a field can
/// be read the same way whichever form the feed used. A tag seen more than
/// once under one parent becomes a `Sequence`; a tag seen exactly once stays
/// a bare node. Callers that expect repetition normalize through
/// [`Node::occurrences`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(String),
    Object(Vec<(String, Node)>),
    Sequence(Vec<Node>),
}

impl Node {
    /// Parse raw bytes into `(root tag, tree)`
    pub fn parse(bytes: &[u8]) -> Result<(String, Node), DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        Ok((root.tag_name().name().to_string(), Node::from_element(root)))
    }

    fn from_element(element: roxmltree::Node<'_, '_>) -> Node {
        let mut entries: Vec<(String, Node)> = Vec::new();

        for attr in element.attributes() {
            push_entry(&mut entries, attr.name(), Node::Leaf(attr.value().to_string()));
        }
        for child in element.children().filter(|c| c.is_element()) {
            push_entry(&mut entries, child.tag_name().name(), Node::from_element(child));
        }

        let text: String = element
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();

        if entries.is_empty() {
            Node::Leaf(text)
        } else {
            if !text.trim().is_empty() {
                entries.push((TEXT_KEY.to_string(), Node::Leaf(text)));
            }
            Node::Object(entries)
        }
    }

    /// Scalar text of a leaf, or of an element that also carries attributes
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Object(_) => match self.get(TEXT_KEY) {
                Some(Node::Leaf(text)) => Some(text),
                _ => None,
            },
            Node::Sequence(_) => None,
        }
    }

    /// Look up a keyed child; leaves and sequences have none
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Every occurrence of a possibly-repeated node, in document order
    pub fn occurrences(&self) -> Vec<&Node> {
        match self {
            Node::Sequence(items) => items.iter().collect(),
            single => vec![single],
        }
    }
}

fn push_entry(entries: &mut Vec<(String, Node)>, key: &str, value: Node) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some((_, Node::Sequence(items))) => items.push(value),
        Some((_, existing)) => {
            let first = std::mem::replace(existing, Node::Sequence(Vec::new()));
            *existing = Node::Sequence(vec![first, value]);
        }
        None => entries.push((key.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(xml: &str) -> Node {
        Node::parse(xml.as_bytes()).unwrap().1
    }

    #[test]
    fn test_single_child_stays_bare() {
        let root = tree(r#"<dish><target name="JNO"/></dish>"#);
        let target = root.get("target").unwrap();
        assert!(matches!(target, Node::Object(_)));
        assert_eq!(target.occurrences().len(), 1);
    }

    #[test]
    fn test_repeated_children_become_sequence() {
        let root = tree(r#"<dish><target name="A"/><target name="B"/><target name="C"/></dish>"#);
        let targets = root.get("target").unwrap().occurrences();
        let names: Vec<_> = targets
            .iter()
            .map(|t| t.get("name").cloned())
            .collect();
        assert_eq!(
            names,
            vec![
                Some(Node::Leaf("A".to_string())),
                Some(Node::Leaf("B".to_string())),
                Some(Node::Leaf("C".to_string())),
            ]
        );
    }

    #[test]
    fn test_interleaved_tags_keep_relative_order() {
        let root = tree(r#"<dsn><station name="s1"/><dish name="d1"/><station name="s2"/><dish name="d2"/></dsn>"#);
        let stations = root.get("station").unwrap().occurrences();
        assert_eq!(stations[1].get("name"), Some(&Node::Leaf("s2".to_string())));
        let dishes = root.get("dish").unwrap().occurrences();
        assert_eq!(dishes[0].get("name"), Some(&Node::Leaf("d1".to_string())));
    }

    #[test]
    fn test_attribute_and_element_are_interchangeable() {
        let a = tree(r#"<site name="mdscc"/>"#);
        let b = tree(r#"<site><name>mdscc</name></site>"#);
        assert_eq!(a.get("name"), b.get("name"));
    }

    #[test]
    fn test_text_only_element_is_leaf() {
        let root = tree(r#"<dsn><timestamp>1770497799000</timestamp></dsn>"#);
        assert_eq!(
            root.get("timestamp"),
            Some(&Node::Leaf("1770497799000".to_string()))
        );
    }

    #[test]
    fn test_text_kept_beside_attributes() {
        let root = tree(r#"<dsn><timestamp unit="ms">1770497799000</timestamp></dsn>"#);
        let timestamp = root.get("timestamp").unwrap();
        assert!(matches!(timestamp, Node::Object(_)));
        assert_eq!(timestamp.get("unit"), Some(&Node::Leaf("ms".to_string())));
        assert_eq!(timestamp.text(), Some("1770497799000"));
    }

    #[test]
    fn test_whitespace_between_children_is_not_text() {
        let root = tree("<dish>\n  <target name=\"A\"/>\n</dish>");
        assert_eq!(root.get(TEXT_KEY), None);
        assert_eq!(root.text(), None);
    }

    #[test]
    fn test_malformed_document_is_structural() {
        let err = Node::parse(b"<dsn><dish></dsn>").unwrap_err();
        assert!(matches!(err, DecodeError::Structural(_)));
    }

    #[test]
    fn test_invalid_utf8_is_structural() {
        let err = Node::parse(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(matches!(err, DecodeError::Structural(_)));
    }
}
