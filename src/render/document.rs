//! In-memory output document.
//!
//! A small arena-backed element tree implementing [`MountTarget`]. It keeps
//! exactly what the engine writes (tags, attributes, text runs and control
//! values) and serializes it the way a DOM `innerHTML` getter does.

use super::target::{is_input_like_tag, MountTarget};

/// HTML elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle of an element inside an [`OutputDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Element(NodeId),
}

#[derive(Debug, Clone)]
struct OutputNode {
    tag: String,
    attributes: Vec<(String, String)>,
    /// Value of input-like controls.
    value: String,
    children: Vec<Content>,
}

impl OutputNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: String::new(),
            children: Vec::new(),
        }
    }
}

/// Arena-backed element tree with a single root.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    nodes: Vec<OutputNode>,
}

impl OutputDocument {
    /// Create a document whose root element has the given tag.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![OutputNode::new(root_tag)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Only an input-like root keeps a value; nested controls hold children.
    fn holds_value(&self, node: NodeId) -> bool {
        node == self.root() && is_input_like_tag(&self.nodes[node.0].tag)
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        &self.nodes[node.0].attributes
    }

    /// Value of an input-like control.
    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.nodes[node.0].value = value.to_string();
    }

    /// Append a text run as the last child of `node`.
    pub fn push_text(&mut self, node: NodeId, text: &str) {
        let children = &mut self.nodes[node.0].children;
        match children.last_mut() {
            Some(Content::Text(run)) => run.push_str(text),
            _ => children.push(Content::Text(text.to_string())),
        }
    }

    /// Element children of `node` in order.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .filter_map(|c| match c {
                Content::Element(id) => Some(*id),
                Content::Text(_) => None,
            })
            .collect()
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for child in &self.nodes[node.0].children {
            match child {
                Content::Text(text) => out.push_str(text),
                Content::Element(id) => self.collect_text(*id, out),
            }
        }
    }

    /// Serialized markup of the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in &self.nodes[node.0].children {
            match child {
                Content::Text(text) => escape_text(text, &mut out),
                Content::Element(id) => self.write_outer_html(*id, &mut out),
            }
        }
        out
    }

    /// Serialized markup of `node` itself, including its tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outer_html(node, &mut out);
        out
    }

    fn write_outer_html(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }

        out.push_str(&self.inner_html(node));
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

impl MountTarget for OutputDocument {
    type Handle = NodeId;

    fn root(&self) -> NodeId {
        OutputDocument::root(self)
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.tag(node)
    }

    fn clear(&mut self, node: NodeId) {
        let holds_value = self.holds_value(node);
        let element = &mut self.nodes[node.0];
        if holds_value {
            element.value.clear();
        } else {
            // Detached descendants stay in the arena but are unreachable
            element.children.clear();
        }
    }

    fn push_char(&mut self, node: NodeId, ch: char) {
        if self.holds_value(node) {
            self.nodes[node.0].value.push(ch);
        } else {
            let mut buf = [0u8; 4];
            self.push_text(node, ch.encode_utf8(&mut buf));
        }
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(OutputNode::new(tag));
        self.nodes[parent.0].children.push(Content::Element(id));
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attributes = &mut self.nodes[node.0].attributes;
        match attributes
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_ascii_lowercase(), value.to_string())),
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_html_serialization() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        let bold = doc.append_element(root, "b");
        doc.push_text(bold, "Hi");
        doc.push_text(root, " there");
        assert_eq!(doc.inner_html(root), "<b>Hi</b> there");
        assert_eq!(doc.outer_html(root), "<div><b>Hi</b> there</div>");
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        doc.push_text(root, "a");
        doc.append_element(root, "br");
        let img = doc.append_element(root, "img");
        doc.set_attribute(img, "src", "x.png");
        assert_eq!(doc.inner_html(root), r#"a<br><img src="x.png">"#);
    }

    #[test]
    fn test_escaping() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        let link = doc.append_element(root, "a");
        doc.set_attribute(link, "title", r#"say "hi" & go"#);
        doc.push_text(link, "1 < 2 & 3 > 2");
        assert_eq!(
            doc.inner_html(root),
            r#"<a title="say &quot;hi&quot; &amp; go">1 &lt; 2 &amp; 3 &gt; 2</a>"#
        );
    }

    #[test]
    fn test_push_char_merges_text_runs() {
        let mut doc = OutputDocument::new("p");
        let root = doc.root();
        for ch in "abc".chars() {
            doc.push_char(root, ch);
        }
        assert_eq!(doc.inner_html(root), "abc");
        assert!(doc.child_elements(root).is_empty());
    }

    #[test]
    fn test_input_value_and_clear() {
        let mut doc = OutputDocument::new("INPUT");
        let root = doc.root();
        assert_eq!(doc.tag(root), "input");
        doc.set_value(root, "old");
        doc.push_char(root, '!');
        assert_eq!(doc.value(root), "old!");
        assert_eq!(doc.inner_html(root), "");

        doc.clear(root);
        assert_eq!(doc.value(root), "");
    }

    #[test]
    fn test_clear_removes_children() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        doc.push_text(root, "old");
        doc.append_element(root, "span");
        doc.clear(root);
        assert_eq!(doc.inner_html(root), "");
        assert_eq!(doc.text_content(root), "");
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        doc.set_attribute(root, "class", "a");
        doc.set_attribute(root, "CLASS", "b");
        assert_eq!(doc.attributes(root).len(), 1);
        assert_eq!(doc.attribute(root, "class"), Some("b"));
    }

    #[test]
    fn test_nested_textarea_holds_text_content() {
        let mut doc = OutputDocument::new("div");
        let root = doc.root();
        let area = doc.append_element(root, "textarea");
        doc.push_char(area, 'h');
        doc.push_char(area, 'i');
        assert_eq!(doc.value(area), "");
        assert_eq!(doc.inner_html(root), "<textarea>hi</textarea>");
    }
}
