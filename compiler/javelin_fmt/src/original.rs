//! Access to the original source text.
//!
//! Decides which subtrees may be copied verbatim and which bytes such a copy
//! covers. The printer copies through it and the width estimator measures
//! through it, so both see the same text.

use std::ops::Range;

use javelin_ir::{Comment, CommentMap, CommentPosition, NodeId, NodeKind, SyntaxTree};

/// A verbatim range that does not fit the original text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("inconsistent copy range {from}..{to} in source of {len} bytes")]
pub struct CopyRangeError {
    pub from: usize,
    pub to: usize,
    pub len: usize,
}

#[derive(Copy, Clone)]
pub(crate) struct OriginalSource<'a> {
    pub text: &'a str,
    tree: &'a SyntaxTree,
    comments: &'a CommentMap,
}

impl<'a> OriginalSource<'a> {
    pub(crate) fn new(text: &'a str, tree: &'a SyntaxTree, comments: &'a CommentMap) -> Self {
        OriginalSource {
            text,
            tree,
            comments,
        }
    }

    pub(crate) fn comments(&self) -> &'a CommentMap {
        self.comments
    }

    /// The comment began a line of the original text.
    pub(crate) fn starts_line(&self, comment: &Comment) -> bool {
        let Some(span) = comment.span else {
            return false;
        };
        let start = span.start_usize();
        start > 0
            && self.text.as_bytes().get(start - 1) == Some(&b'\n')
            && self.text.get(start..span.end_usize()) == Some(comment.text.as_str())
    }

    /// Whether `run` can be copied from the original text.
    ///
    /// Every node must be unchanged down to its leaves and carry no comment
    /// edits; a run of several nodes must be contiguous siblings of one
    /// baseline statement or member list.
    pub(crate) fn is_copy_eligible(&self, run: &[NodeId]) -> bool {
        if run.is_empty() {
            return false;
        }
        if run.len() > 1 && !self.tree.is_contiguous_baseline_run(run) {
            return false;
        }
        run.iter().all(|&id| self.is_pristine(id))
    }

    fn is_pristine(&self, id: NodeId) -> bool {
        if self.tree.try_get(id).is_none() || self.tree.span(id).is_none() {
            return false;
        }
        // C-style array declarators have no contiguous span of their own.
        if matches!(self.tree.kind(id), NodeKind::ArrayType(_)) {
            return false;
        }
        self.tree
            .descendants(id)
            .all(|d| self.tree.is_unchanged(d) && !self.comments.has_pending_edits(d))
    }

    /// Bytes a copy of `run` covers: from the first node (or its preceding
    /// comments) to the end of the last node's inline and trailing comments.
    pub(crate) fn copy_range(
        &self,
        run: &[NodeId],
        include_comments: bool,
    ) -> Result<Range<usize>, CopyRangeError> {
        let len = self.text.len();
        let bad = |from, to| CopyRangeError { from, to, len };
        let (Some(&first), Some(&last)) = (run.first(), run.last()) else {
            return Err(bad(0, 0));
        };
        let (Some(first_span), Some(last_span)) = (self.tree.span(first), self.tree.span(last))
        else {
            return Err(bad(0, 0));
        };

        let mut from = first_span.start_usize();
        if include_comments {
            for comment in self.comments.at(first, CommentPosition::Preceding) {
                if let Some(span) = comment.span {
                    from = from.min(span.start_usize());
                }
            }
        }
        let mut to = last_span.end_usize();
        for id in self.tree.descendants(last) {
            for position in [CommentPosition::Inline, CommentPosition::Trailing] {
                for comment in self.comments.at(id, position) {
                    if let Some(span) = comment.span {
                        to = to.max(span.end_usize());
                    }
                }
            }
        }

        if from > to
            || to > len
            || !self.text.is_char_boundary(from)
            || !self.text.is_char_boundary(to)
        {
            return Err(bad(from, to));
        }
        Ok(from..to)
    }

    /// Source text around `offset`, for diagnostics.
    pub(crate) fn context(&self, offset: usize) -> &'a str {
        let mut start = offset.min(self.text.len()).saturating_sub(40);
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (offset + 40).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        &self.text[start..end]
    }
}

#[cfg(test)]
mod tests {
    use javelin_ir::{Comment, CommentStyle, Span};

    use super::*;

    const SOURCE: &str = "// lead\nint x = 1; // tail\nint y = 2;\n";

    fn fixture() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        let mut tree = SyntaxTree::new();
        let one = tree.alloc_original(
            NodeKind::Literal(javelin_ir::Literal {
                kind: javelin_ir::LiteralKind::Int,
                value: "1".to_owned(),
            }),
            Span::new(16, 17),
        );
        let x = tree.alloc_original(NodeKind::ExprStmt(one), Span::new(8, 18));
        let two = tree.alloc_original(
            NodeKind::Literal(javelin_ir::Literal {
                kind: javelin_ir::LiteralKind::Int,
                value: "2".to_owned(),
            }),
            Span::new(35, 36),
        );
        let y = tree.alloc_original(NodeKind::ExprStmt(two), Span::new(27, 37));
        let block = tree.alloc_original(
            NodeKind::Block {
                stmts: vec![x, y],
                is_static: false,
            },
            Span::new(0, 38),
        );
        tree.set_baseline_root(block);
        (tree, block, x, y)
    }

    fn comments(x: NodeId) -> CommentMap {
        let mut map = CommentMap::new();
        map.entry(x).attach(
            CommentPosition::Preceding,
            Comment::original(CommentStyle::Line, "// lead", Span::new(0, 7), 0),
        );
        map.entry(x).attach(
            CommentPosition::Inline,
            Comment::original(CommentStyle::Line, "// tail", Span::new(19, 26), 11),
        );
        map
    }

    #[test]
    fn range_includes_comments() {
        let (tree, _, x, _) = fixture();
        let map = comments(x);
        let source = OriginalSource::new(SOURCE, &tree, &map);
        assert_eq!(source.copy_range(&[x], true), Ok(0..26));
        assert_eq!(source.copy_range(&[x], false), Ok(8..26));
    }

    #[test]
    fn runs_must_be_contiguous_siblings() {
        let (tree, _, x, y) = fixture();
        let map = CommentMap::new();
        let source = OriginalSource::new(SOURCE, &tree, &map);
        assert!(source.is_copy_eligible(&[x, y]));
        assert!(!source.is_copy_eligible(&[y, x]));
        assert!(!source.is_copy_eligible(&[]));
    }

    #[test]
    fn comment_edits_block_copy() {
        let (tree, block, x, _) = fixture();
        let mut map = CommentMap::new();
        map.entry(x)
            .add(CommentPosition::Trailing, Comment::generated(CommentStyle::Line, "new"));
        let source = OriginalSource::new(SOURCE, &tree, &map);
        assert!(!source.is_copy_eligible(&[x]));
        assert!(!source.is_copy_eligible(&[block]));
    }

    #[test]
    fn generated_nodes_are_not_copied() {
        let (mut tree, _, _, _) = fixture();
        let fresh = tree.ident("z");
        let map = CommentMap::new();
        let source = OriginalSource::new(SOURCE, &tree, &map);
        assert!(!source.is_copy_eligible(&[fresh]));
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut tree = SyntaxTree::new();
        let id = tree.alloc_original(NodeKind::Empty, Span::new(5, 500));
        let map = CommentMap::new();
        let source = OriginalSource::new(SOURCE, &tree, &map);
        assert_eq!(
            source.copy_range(&[id], true),
            Err(CopyRangeError {
                from: 5,
                to: 500,
                len: SOURCE.len()
            })
        );
    }
}
