//! XML element tree
//!
//! A small owned tree, close to what the legacy documents need: element
//! name, ordered attributes, the text before the first child, the children,
//! and the tail text that follows the element inside its parent. Lookups
//! return `Option` so every default is chosen at the call site.

use indexmap::IndexMap;

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name, including any prefix.
    pub name: String,
    /// Attributes in document order.
    pub attributes: IndexMap<String, String>,
    /// Character data (text and CDATA) before the first child element.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
    /// Character data after this element's end tag, up to the next sibling.
    pub tail: String,
}

impl XmlElement {
    /// Create an empty element with the given tag name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First direct child with the given tag name.
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == tag)
    }

    /// All direct children with the given tag name, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Text of the first direct child with the given tag name.
    ///
    /// `None` when there is no such child; an empty string when the child
    /// exists but holds no leading text.
    pub fn find_text(&self, tag: &str) -> Option<&str> {
        self.find(tag).map(|child| child.text.as_str())
    }

    /// Whether the element has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }
}
