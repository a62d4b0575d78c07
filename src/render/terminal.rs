//! Terminal mount target.
//!
//! Streams revealed characters straight to a writer, styling them from the
//! enclosing tags. A terminal cannot take output back, so the element tree
//! only exists as a list of tags used to pick styles and line breaks.

use std::io::{self, Write};

use console::Style;

use super::target::{is_input_like_tag, MountTarget};

/// Tags that start on a fresh line.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "pre", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6", "tr",
    "section", "article", "header", "footer",
];

/// Handle of an element written to a [`TerminalTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermNode(usize);

#[derive(Debug)]
struct TermElement {
    tag: String,
    parent: Option<usize>,
}

/// Mount target that writes to a terminal (or any writer).
pub struct TerminalTarget<W: Write> {
    out: W,
    elements: Vec<TermElement>,
    at_line_start: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalTarget<W> {
    /// Create a target whose root element has the given tag.
    pub fn new(out: W, root_tag: &str) -> Self {
        Self {
            out,
            elements: vec![TermElement {
                tag: root_tag.to_ascii_lowercase(),
                parent: None,
            }],
            at_line_start: true,
            error: None,
        }
    }

    /// Terminate the last line, flush, and report the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.at_line_start {
            self.write_str("\n");
        }
        if let Err(e) = self.out.flush() {
            self.error.get_or_insert(e);
        }
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn write_str(&mut self, s: &str) {
        if self.error.is_some() || s.is_empty() {
            return;
        }
        let result = self.out.write_all(s.as_bytes()).and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Terminal write failed: {}", e);
            self.error = Some(e);
            return;
        }
        self.at_line_start = s.ends_with('\n');
    }

    fn break_line(&mut self) {
        if !self.at_line_start {
            self.write_str("\n");
        }
    }

    fn ancestors(&self, node: TermNode) -> impl Iterator<Item = &str> {
        let mut current = Some(node.0);
        std::iter::from_fn(move || {
            let idx = current?;
            let element = &self.elements[idx];
            current = element.parent;
            Some(element.tag.as_str())
        })
    }

    /// Style accumulated from `node` and its ancestors.
    fn style_for(&self, node: TermNode) -> Style {
        let mut style = Style::new();
        for tag in self.ancestors(node) {
            style = match tag {
                "b" | "strong" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => style.bold(),
                "i" | "em" | "cite" => style.italic(),
                "u" | "ins" => style.underlined(),
                "s" | "del" => style.dim(),
                "code" | "pre" | "kbd" | "samp" => style.cyan(),
                "a" => style.blue().underlined(),
                "mark" => style.black().on_yellow(),
                "small" => style.dim(),
                _ => style,
            };
        }
        style
    }
}

impl<W: Write> MountTarget for TerminalTarget<W> {
    type Handle = TermNode;

    fn root(&self) -> TermNode {
        TermNode(0)
    }

    fn tag_name(&self, node: TermNode) -> &str {
        &self.elements[node.0].tag
    }

    fn clear(&mut self, _node: TermNode) {
        // Written output stays on screen; continue on a fresh line
        self.break_line();
    }

    fn push_char(&mut self, node: TermNode, ch: char) {
        let mut buf = [0u8; 4];
        let text = ch.encode_utf8(&mut buf);
        let plain_root = node == self.root() && is_input_like_tag(self.tag_name(node));
        if plain_root || ch.is_whitespace() {
            self.write_str(text);
            return;
        }
        let styled = self.style_for(node).apply_to(text).to_string();
        self.write_str(&styled);
    }

    fn append_element(&mut self, parent: TermNode, tag: &str) -> TermNode {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "br" => self.write_str("\n"),
            "hr" => {
                self.break_line();
                let rule = Style::new().dim().apply_to("─".repeat(40)).to_string();
                self.write_str(&rule);
                self.write_str("\n");
            }
            "li" => {
                self.break_line();
                self.write_str("  • ");
            }
            t if BLOCK_TAGS.contains(&t) => self.break_line(),
            _ => {}
        }

        let id = self.elements.len();
        self.elements.push(TermElement {
            tag,
            parent: Some(parent.0),
        });
        TermNode(id)
    }

    fn set_attribute(&mut self, _node: TermNode, _name: &str, _value: &str) {
        // Attributes have no terminal representation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};

    #[tokio::test]
    async fn test_terminal_plain_output() {
        console::set_colors_enabled(false);
        let mut target = TerminalTarget::new(Vec::new(), "div");
        render(&mut target, "<p>one</p><p>two<br>three</p>", RenderOptions::instant())
            .await
            .unwrap();
        let out = String::from_utf8(target.finish().unwrap()).unwrap();
        assert_eq!(out, "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn test_terminal_list_bullets() {
        console::set_colors_enabled(false);
        let mut target = TerminalTarget::new(Vec::new(), "div");
        render(&mut target, "<ul><li>a</li><li>b</li></ul>", RenderOptions::instant())
            .await
            .unwrap();
        let out = String::from_utf8(target.finish().unwrap()).unwrap();
        assert_eq!(out, "  • a\n  • b\n");
    }

    #[tokio::test]
    async fn test_terminal_input_root_strips_tags() {
        let mut target = TerminalTarget::new(Vec::new(), "textarea");
        render(&mut target, "<b>Hi</b> you", RenderOptions::instant())
            .await
            .unwrap();
        let out = String::from_utf8(target.finish().unwrap()).unwrap();
        assert_eq!(out, "Hi you\n");
    }

    #[test]
    fn test_style_follows_ancestors() {
        let mut target = TerminalTarget::new(Vec::new(), "div");
        let root = target.root();
        let bold = target.append_element(root, "b");
        let italic = target.append_element(bold, "i");
        let tags: Vec<_> = target.ancestors(italic).collect();
        assert_eq!(tags, vec!["i", "b", "div"]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_error_reported_by_finish() {
        let mut target = TerminalTarget::new(FailingWriter, "div");
        render(&mut target, "abc", RenderOptions::instant())
            .await
            .unwrap();
        let err = target.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
