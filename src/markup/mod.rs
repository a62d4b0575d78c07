//! Markup fragment model.
//!
//! Markup strings are parsed with the host HTML parser (`scraper`, backed by
//! html5ever) and converted into an immutable tree of [`FragmentNode`]s that
//! the render engine walks. Only text and element nodes survive conversion;
//! comments and other node kinds are dropped.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// A parsed markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Text(String),
    Element(ElementNode),
}

/// An element node with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Lower-case tag name.
    pub tag: String,
    /// Attributes as reported by the parser, unfiltered.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<FragmentNode>,
}

impl ElementNode {
    /// Attributes that are safe to copy onto an output element.
    pub fn safe_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(name, _)| !is_event_handler(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether this element has no children (void or empty element).
    pub fn is_childless(&self) -> bool {
        self.children.is_empty()
    }
}

impl FragmentNode {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            FragmentNode::Text(text) => out.push_str(text),
            FragmentNode::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Parse a markup string into a sequence of fragment nodes.
///
/// Malformed markup is recovered the way the HTML parser recovers it.
pub fn parse_fragment(markup: &str) -> Vec<FragmentNode> {
    let fragment = Html::parse_fragment(markup);
    convert_children(fragment.root_element())
}

/// Text content of a markup string with all tags removed.
pub fn text_content(markup: &str) -> String {
    parse_fragment(markup)
        .iter()
        .map(FragmentNode::text_content)
        .collect()
}

/// Whether an attribute name looks like an inline event handler (`on*`, any case).
pub fn is_event_handler(name: &str) -> bool {
    name.get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

fn convert_children(parent: ElementRef<'_>) -> Vec<FragmentNode> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                // Adjacent text runs can appear after parser recovery
                if let Some(FragmentNode::Text(prev)) = nodes.last_mut() {
                    prev.push_str(text);
                } else {
                    nodes.push(FragmentNode::Text(text.to_string()));
                }
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    nodes.push(FragmentNode::Element(convert_element(element)));
                }
            }
            _ => {}
        }
    }
    nodes
}

fn convert_element(element: ElementRef<'_>) -> ElementNode {
    let value = element.value();
    ElementNode {
        tag: value.name().to_ascii_lowercase(),
        attributes: value
            .attrs()
            .map(|(name, val)| (name.to_string(), val.to_string()))
            .collect(),
        children: convert_children(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &FragmentNode) -> &ElementNode {
        match node {
            FragmentNode::Element(el) => el,
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_text_and_element() {
        let nodes = parse_fragment("<b>Hi</b> there");
        assert_eq!(nodes.len(), 2);

        let bold = element(&nodes[0]);
        assert_eq!(bold.tag, "b");
        assert_eq!(bold.children, vec![FragmentNode::Text("Hi".to_string())]);
        assert_eq!(nodes[1], FragmentNode::Text(" there".to_string()));
    }

    #[test]
    fn test_parse_preserves_whitespace() {
        let nodes = parse_fragment("  a \n b  ");
        assert_eq!(nodes, vec![FragmentNode::Text("  a \n b  ".to_string())]);
    }

    #[test]
    fn test_void_element_has_no_children() {
        let nodes = parse_fragment("one<br>two");
        assert_eq!(nodes.len(), 3);
        let br = element(&nodes[1]);
        assert_eq!(br.tag, "br");
        assert!(br.is_childless());
    }

    #[test]
    fn test_comments_are_dropped() {
        let nodes = parse_fragment("a<!-- note -->b");
        assert_eq!(nodes, vec![FragmentNode::Text("ab".to_string())]);
    }

    #[test]
    fn test_text_content_strips_tags() {
        assert_eq!(text_content("<p>Hello <i>World</i></p>"), "Hello World");
        assert_eq!(text_content("plain"), "plain");
        assert_eq!(text_content(""), "");
    }

    #[test]
    fn test_event_handler_detection() {
        assert!(is_event_handler("onclick"));
        assert!(is_event_handler("ONCLICK"));
        assert!(is_event_handler("onMouseOver"));
        assert!(is_event_handler("on"));
        assert!(!is_event_handler("o"));
        assert!(!is_event_handler("class"));
        assert!(!is_event_handler("data-on"));
    }

    #[test]
    fn test_safe_attributes_filter_handlers() {
        let nodes = parse_fragment(r#"<a href="/x" onclick="evil()" OnLoad="x">link</a>"#);
        let link = element(&nodes[0]);
        let safe: Vec<_> = link.safe_attributes().collect();
        assert_eq!(safe, vec![("href", "/x")]);
    }

    #[test]
    fn test_attributes_in_source_order() {
        let nodes = parse_fragment(r#"<a id="z" href="/x" class="c" data-k="v">t</a>"#);
        let names: Vec<_> = element(&nodes[0])
            .attributes
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "href", "class", "data-k"]);
    }

    #[test]
    fn test_node_text_content() {
        let nodes = parse_fragment("<p>a<b>b</b>c</p>d");
        assert_eq!(nodes[0].text_content(), "abc");
        assert_eq!(nodes[1].text_content(), "d");
    }
}
