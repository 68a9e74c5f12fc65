//! Comments attached to syntax nodes.
//!
//! Comments are not tree nodes. The parser (or an edit) attaches them to the
//! nearest node in one of four positions, and the printer interleaves them
//! with the node's text.

use rustc_hash::FxHashMap;

use crate::{NodeId, Span};

/// Lexical form of a comment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
    /// `/** text */`
    Javadoc,
    /// A run of whitespace the parser kept as a comment (blank lines).
    Whitespace,
}

/// A single comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub style: CommentStyle,
    /// Comment text. Comments read from source include their delimiters;
    /// generated comments may carry only the body, which is framed when printed.
    pub text: String,
    /// Byte range in the original text; `None` for generated comments.
    pub span: Option<Span>,
    /// Column the comment started at in the source, if known.
    pub indent: Option<u32>,
}

impl Comment {
    /// A comment read from the original text.
    pub fn original(style: CommentStyle, text: &str, span: Span, indent: u32) -> Self {
        Comment {
            style,
            text: text.to_owned(),
            span: Some(span),
            indent: Some(indent),
        }
    }

    /// A comment created by an edit.
    pub fn generated(style: CommentStyle, text: &str) -> Self {
        Comment {
            style,
            text: text.to_owned(),
            span: None,
            indent: None,
        }
    }

    #[inline]
    pub fn is_doc(&self) -> bool {
        self.style == CommentStyle::Javadoc
    }
}

/// Where a comment sits relative to its node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentPosition {
    /// Before the node, on lines of their own or at the start of its line.
    Preceding,
    /// After the node, on the same line.
    Inline,
    /// After the node, on following lines.
    Trailing,
    /// Inside an otherwise empty body.
    Inner,
}

/// All comments of one node, in source order per position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentSet {
    preceding: Vec<Comment>,
    inline: Vec<Comment>,
    trailing: Vec<Comment>,
    inner: Vec<Comment>,
    changed: bool,
}

impl CommentSet {
    pub fn new() -> Self {
        CommentSet::default()
    }

    fn list_mut(&mut self, position: CommentPosition) -> &mut Vec<Comment> {
        match position {
            CommentPosition::Preceding => &mut self.preceding,
            CommentPosition::Inline => &mut self.inline,
            CommentPosition::Trailing => &mut self.trailing,
            CommentPosition::Inner => &mut self.inner,
        }
    }

    pub fn get(&self, position: CommentPosition) -> &[Comment] {
        match position {
            CommentPosition::Preceding => &self.preceding,
            CommentPosition::Inline => &self.inline,
            CommentPosition::Trailing => &self.trailing,
            CommentPosition::Inner => &self.inner,
        }
    }

    /// Attach a comment found in the source. Does not count as an edit.
    pub fn attach(&mut self, position: CommentPosition, comment: Comment) {
        self.list_mut(position).push(comment);
    }

    /// Add a comment as part of an edit.
    pub fn add(&mut self, position: CommentPosition, comment: Comment) {
        self.list_mut(position).push(comment);
        self.changed = true;
    }

    /// Remove all comments at `position` as part of an edit.
    pub fn clear(&mut self, position: CommentPosition) {
        let list = self.list_mut(position);
        if !list.is_empty() {
            list.clear();
            self.changed = true;
        }
    }

    /// The set carries edits the original text does not reflect.
    #[inline]
    pub fn has_pending_edits(&self) -> bool {
        self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.preceding.is_empty()
            && self.inline.is_empty()
            && self.trailing.is_empty()
            && self.inner.is_empty()
    }
}

/// Comment sets by node.
#[derive(Clone, Debug, Default)]
pub struct CommentMap {
    sets: FxHashMap<NodeId, CommentSet>,
}

impl CommentMap {
    pub fn new() -> Self {
        CommentMap::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&CommentSet> {
        self.sets.get(&id)
    }

    /// Comments of `id` at `position`; empty when the node has none.
    pub fn at(&self, id: NodeId, position: CommentPosition) -> &[Comment] {
        self.sets.get(&id).map_or(&[], |set| set.get(position))
    }

    /// The set of `id`, created empty on first use.
    pub fn entry(&mut self, id: NodeId) -> &mut CommentSet {
        self.sets.entry(id).or_default()
    }

    pub fn has_pending_edits(&self, id: NodeId) -> bool {
        self.sets.get(&id).is_some_and(CommentSet::has_pending_edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_not_an_edit() {
        let mut map = CommentMap::new();
        let id = NodeId::new(1);
        map.entry(id).attach(
            CommentPosition::Preceding,
            Comment::original(CommentStyle::Line, "// hi", Span::new(0, 5), 0),
        );
        assert!(!map.has_pending_edits(id));
        assert_eq!(map.at(id, CommentPosition::Preceding).len(), 1);
        assert!(map.at(id, CommentPosition::Trailing).is_empty());
    }

    #[test]
    fn add_and_clear_mark_edits() {
        let mut set = CommentSet::new();
        set.clear(CommentPosition::Inline);
        assert!(!set.has_pending_edits());
        set.add(
            CommentPosition::Inline,
            Comment::generated(CommentStyle::Block, "note"),
        );
        assert!(set.has_pending_edits());
        assert!(!set.is_empty());
    }

    #[test]
    fn unknown_node_has_no_comments() {
        let map = CommentMap::new();
        assert!(map.at(NodeId::new(9), CommentPosition::Inner).is_empty());
        assert!(map.get(NodeId::new(9)).is_none());
    }
}
