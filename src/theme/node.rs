//! Markup tree produced by the components

use crate::helpers::html_escape;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node of rendered markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output
    Text(String),
    /// Trusted HTML written as-is (configured snippets such as the footer copyright)
    Raw(String),
    /// A sequence of sibling nodes without a wrapping element
    Fragment(Vec<Node>),
}

/// An HTML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order; `None` marks a boolean attribute
    pub attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    /// Set a valueless attribute such as `defer` or `async`
    pub fn flag(mut self, name: &str) -> Self {
        if !self.attrs.iter().any(|(n, _)| n == name) {
            self.attrs.push((name.to_string(), None));
        }
        self
    }

    /// Shorthand for the `class` attribute
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Add a text child
    pub fn text(self, text: &str) -> Self {
        self.child(Node::text(text))
    }

    /// Value of an attribute, if set with a value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether an attribute is present, with or without a value
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::empty()
    }
}

impl Node {
    pub fn text(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    pub fn raw(html: &str) -> Self {
        Node::Raw(html.to_string())
    }

    /// A node that renders nothing
    pub fn empty() -> Self {
        Node::Fragment(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Element(_) => false,
            Node::Text(s) | Node::Raw(s) => s.is_empty(),
            Node::Fragment(nodes) => nodes.iter().all(Node::is_empty),
        }
    }

    /// Serialise to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&html_escape(value));
                        out.push('"');
                    }
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text content
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Raw(_) => String::new(),
            Node::Fragment(nodes) => nodes.iter().map(Node::text_content).collect(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// All elements with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        match self {
            Node::Element(element) => {
                if element.tag == tag {
                    found.push(element);
                }
                for child in &element.children {
                    child.collect(tag, found);
                }
            }
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.collect(tag, found);
                }
            }
            Node::Text(_) | Node::Raw(_) => {}
        }
    }

    /// All elements carrying the given class
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_where(&|e| {
            e.get_attr("class")
                .map(|c| c.split_whitespace().any(|c| c == class))
                .unwrap_or(false)
        })
    }

    fn find_where<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Element(element) => {
                    if pred(element) {
                        found.push(element);
                    }
                    stack.extend(element.children.iter().rev());
                }
                Node::Fragment(nodes) => stack.extend(nodes.iter().rev()),
                Node::Text(_) | Node::Raw(_) => {}
            }
        }
        found
    }
}

/// Start building an element
pub fn el(tag: &str) -> Element {
    Element::new(tag)
}
