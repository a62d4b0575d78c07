//! Mount target capability.

use std::fmt::Debug;

/// Tags of plain-text controls that hold a value instead of child elements.
const INPUT_LIKE_TAGS: &[&str] = &["input", "textarea"];

/// An externally owned element tree the engine writes into.
///
/// Nodes are addressed by an opaque handle. The engine only appends to the
/// tree or clears it; creating and destroying the root is the caller's job.
pub trait MountTarget {
    type Handle: Copy + Debug;

    /// The element the render was mounted on.
    fn root(&self) -> Self::Handle;

    /// Tag name of a node.
    fn tag_name(&self, node: Self::Handle) -> &str;

    /// Remove all content of a node (its value when the root is an
    /// input-like control).
    fn clear(&mut self, node: Self::Handle);

    /// Append one character to a node's text content, or to the root's value
    /// when the root is an input-like control. Input-like elements created
    /// by the walk receive text content like any other element.
    fn push_char(&mut self, node: Self::Handle, ch: char);

    /// Create an element and append it as the last child of `parent`.
    fn append_element(&mut self, parent: Self::Handle, tag: &str) -> Self::Handle;

    fn set_attribute(&mut self, node: Self::Handle, name: &str, value: &str);

    /// Whether a node is a plain-text control.
    fn is_input_like(&self, node: Self::Handle) -> bool {
        is_input_like_tag(self.tag_name(node))
    }
}

/// Case-insensitive check against the input-like tag set.
pub fn is_input_like_tag(tag: &str) -> bool {
    INPUT_LIKE_TAGS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_like_tags() {
        assert!(is_input_like_tag("input"));
        assert!(is_input_like_tag("TEXTAREA"));
        assert!(is_input_like_tag("Input"));
        assert!(!is_input_like_tag("div"));
        assert!(!is_input_like_tag("select"));
    }
}
