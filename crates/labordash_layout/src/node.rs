//! Document tree: elements, text, and read-only queries.
//!
//! Attributes and inline styles live in `IndexMap`s so that serialization
//! follows insertion order and two builds of the same page are byte-identical.

use indexmap::IndexMap;

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children
    Element(Element),
    /// Character data
    Text(String),
}

impl Node {
    /// Get as element, if it is one
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    id: Option<String>,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    style: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the element id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more whitespace-separated classes
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an inline style property
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Append a child
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several children
    #[must_use]
    pub fn children<N, I>(mut self, nodes: I) -> Self
    where
        N: Into<Node>,
        I: IntoIterator<Item = N>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Tag name
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Element id, if set
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Classes in insertion order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check for a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Get an attribute value
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attributes in insertion order
    #[must_use]
    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    /// Get an inline style property
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Inline style in insertion order
    #[must_use]
    pub fn styles(&self) -> &IndexMap<String, String> {
        &self.style
    }

    /// Direct children
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Check if this is a heading element (`h1`..`h6`)
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self.tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }

    /// Visit this element and every descendant element, depth-first in document order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            if let Node::Element(el) = child {
                el.walk(visit);
            }
        }
    }

    /// Collect every element (including this one) matching a predicate
    #[must_use]
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if pred(el) {
                found.push(el);
            }
        });
        found
    }

    /// Find the first element with the given id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find_all(|el| el.element_id() == Some(id))
            .into_iter()
            .next()
    }

    /// Concatenated text of all descendant text nodes
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => collect_text(inner, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div")
            .id("root")
            .class("row mb-3")
            .child(
                Element::new("h3")
                    .id("summary")
                    .class("section-header")
                    .text("Executive Summary"),
            )
            .child(Element::new("p").class("text-muted").text("Projected ").child(
                Element::new("strong").text("shortages"),
            ))
    }

    #[test]
    fn test_class_splits_and_dedups() {
        let el = Element::new("div").class("mb-3  section-header").class("mb-3");
        assert_eq!(el.classes(), &["mb-3".to_string(), "section-header".to_string()]);
        assert!(el.has_class("section-header"));
        assert!(!el.has_class("mb"));
    }

    #[test]
    fn test_attr_insertion_order() {
        let el = Element::new("button")
            .attr("type", "button")
            .attr("role", "tab")
            .attr("aria-selected", "true");
        let names: Vec<&str> = el.attrs().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["type", "role", "aria-selected"]);
    }

    #[test]
    fn test_attr_overwrite_keeps_position() {
        let el = Element::new("a").attr("href", "#").attr("class", "x").attr("href", "#jobs");
        assert_eq!(el.get_attr("href"), Some("#jobs"));
        assert_eq!(el.attrs().keys().next().map(String::as_str), Some("href"));
    }

    #[test]
    fn test_find_by_id() {
        let root = sample();
        let heading = root.find_by_id("summary").unwrap();
        assert_eq!(heading.tag(), "h3");
        assert!(heading.is_heading());
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_find_all_document_order() {
        let root = sample();
        let tags: Vec<&str> = root.find_all(|_| true).iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["div", "h3", "p", "strong"]);
    }

    #[test]
    fn test_text_content() {
        let root = sample();
        assert_eq!(root.text_content(), "Executive SummaryProjected shortages");
    }

    #[test]
    fn test_node_conversions() {
        let node: Node = "hello".into();
        assert_eq!(node, Node::Text("hello".to_string()));
        assert!(node.as_element().is_none());

        let node: Node = Element::new("hr").into();
        assert_eq!(node.as_element().map(Element::tag), Some("hr"));
    }
}
