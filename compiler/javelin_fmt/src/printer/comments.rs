//! Comment emission.
//!
//! Every node's comments print at most once per slot. The handled set is
//! journaled so that a rolled-back speculative render forgets the comments
//! it printed and the retry prints them again.

use javelin_ir::{Comment, CommentPosition, CommentStyle, NodeId};
use rustc_hash::FxHashSet;

use super::Printer;
use crate::buffer::Emit;

/// Which group of a node's comments has been printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Preceding,
    Inner,
    Trailing,
}

#[derive(Default)]
pub(super) struct HandledComments {
    handled: FxHashSet<(NodeId, Slot)>,
    journal: Vec<(NodeId, Slot)>,
}

impl HandledComments {
    /// Mark a slot handled; `false` if it already was.
    fn insert(&mut self, id: NodeId, slot: Slot) -> bool {
        if self.handled.insert((id, slot)) {
            self.journal.push((id, slot));
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn contains(&self, id: NodeId, slot: Slot) -> bool {
        self.handled.contains(&(id, slot))
    }

    /// Every comment of `id` is covered by copied text.
    pub(super) fn mark_all(&mut self, id: NodeId) {
        for slot in [Slot::Preceding, Slot::Inner, Slot::Trailing] {
            self.insert(id, slot);
        }
    }

    pub(super) fn mark(&self) -> usize {
        self.journal.len()
    }

    pub(super) fn rollback(&mut self, mark: usize) {
        for entry in self.journal.drain(mark..) {
            self.handled.remove(&entry);
        }
    }
}

/// Lines of a comment's text, each without its leading blanks. A trailing
/// line holding only blanks is dropped.
fn comment_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut segments = text.split('\n').peekable();
    while let Some(segment) = segments.next() {
        let trimmed = segment.trim_start_matches(|c: char| c <= ' ');
        if segments.peek().is_some() || !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    lines
}

impl Printer<'_> {
    /// Comments before `id`, with a structured doc comment rendered in place
    /// of the raw javadoc it replaces.
    pub(super) fn print_preceding_comments(&mut self, id: NodeId) -> Emit {
        if !self.handled.insert(id, Slot::Preceding) {
            return Ok(());
        }
        let map = self.comments;
        let comments = map.at(id, CommentPosition::Preceding);
        let docs = self.docs;
        let mut doc = docs.get(&id);
        let javadoc = comments.iter().rposition(Comment::is_doc);
        for (i, comment) in comments.iter().enumerate() {
            match doc {
                Some(tree) if Some(i) == javadoc => {
                    self.print_doc_comment(tree)?;
                    doc = None;
                }
                _ => self.print_comment(comment, true)?,
            }
        }
        if let Some(tree) = doc {
            self.print_doc_comment(tree)?;
        }
        Ok(())
    }

    /// Inner comments of a node whose body is not empty, printed after it.
    pub(super) fn print_inner_comments_as_trailing(&mut self, id: NodeId) -> Emit {
        if !self.handled.insert(id, Slot::Inner) {
            return Ok(());
        }
        let map = self.comments;
        for comment in map.at(id, CommentPosition::Inner) {
            self.print_comment_after(comment)?;
        }
        Ok(())
    }

    /// Inner comments of a body, right after its opening brace.
    pub(super) fn print_inner_comments(&mut self, id: NodeId) -> Emit {
        if !self.handled.insert(id, Slot::Inner) {
            return Ok(());
        }
        let map = self.comments;
        for comment in map.at(id, CommentPosition::Inner) {
            self.print_comment(comment, false)?;
        }
        Ok(())
    }

    pub(super) fn print_trailing_comments(&mut self, id: NodeId) -> Emit {
        if !self.handled.insert(id, Slot::Trailing) {
            return Ok(());
        }
        let map = self.comments;
        for comment in map.at(id, CommentPosition::Inline) {
            self.print_comment_after(comment)?;
        }
        for comment in map.at(id, CommentPosition::Trailing) {
            self.print_comment(comment, false)?;
        }
        Ok(())
    }

    /// Print one comment. `preceding` is set for comments that lead into
    /// the text after them.
    pub(super) fn print_comment(&mut self, comment: &Comment, preceding: bool) -> Emit {
        self.print_comment_with(comment, preceding, true)
    }

    /// A comment on the line of the node before it. The token that follows
    /// decides its own spacing.
    fn print_comment_after(&mut self, comment: &Comment) -> Emit {
        self.print_comment_with(comment, true, false)
    }

    fn print_comment_with(&mut self, comment: &Comment, preceding: bool, space_after: bool) -> Emit {
        if comment.style == CommentStyle::Whitespace {
            return Ok(());
        }
        let only_whitespace = self.out.is_whitespace_line();
        let text = comment.text.as_str();
        let lines = comment_lines(text);
        let raw_body = !text.starts_with('/');
        let no_blank_line = self.out.last_blank_lines() == 0;

        if self.original.starts_line(comment) {
            if no_blank_line && !preceding {
                self.newline();
            }
            self.out.to_line_start();
        } else {
            match comment.indent {
                Some(0) => {
                    if !preceding && no_blank_line && comment.style != CommentStyle::Line {
                        self.newline();
                    }
                    self.out.to_line_start();
                }
                Some(_) if !preceding => {
                    if no_blank_line && comment.style != CommentStyle::Line {
                        self.newline();
                    }
                    self.to_left_margin()?;
                }
                None if !preceding => {
                    if no_blank_line {
                        self.newline();
                    }
                    self.to_left_margin()?;
                }
                _ => self.need_space()?,
            }
        }

        if raw_body {
            match comment.style {
                CommentStyle::Line => self.print("// ")?,
                CommentStyle::Block => self.print("/* ")?,
                CommentStyle::Javadoc => {
                    if !only_whitespace {
                        self.newline();
                    }
                    self.to_left_margin()?;
                    self.print("/**")?;
                    self.newline();
                    self.to_left_margin()?;
                    self.print(" * ")?;
                }
                CommentStyle::Whitespace => {}
            }
        }

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.newline();
                self.to_left_margin()?;
                if raw_body {
                    self.print(" * ")?;
                } else if line.starts_with('*') {
                    self.print(" ")?;
                }
            }
            self.print(line)?;
        }

        if raw_body {
            match comment.style {
                CommentStyle::Block => self.print(" */")?,
                CommentStyle::Javadoc => {
                    self.newline();
                    self.to_left_margin()?;
                    self.print(" */")?;
                    self.newline();
                    return self.to_left_margin();
                }
                CommentStyle::Line | CommentStyle::Whitespace => {}
            }
        }

        if only_whitespace || comment.style == CommentStyle::Line {
            self.newline();
            self.to_left_margin()
        } else if space_after {
            self.need_space()
        } else {
            Ok(())
        }
    }
}
