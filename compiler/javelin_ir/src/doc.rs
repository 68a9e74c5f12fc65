//! Structured documentation comments.
//!
//! A declaration's javadoc can be supplied as a tree instead of raw text; the
//! printer then renders it with the configured framing instead of copying
//! the comment.

use rustc_hash::FxHashMap;

use crate::NodeId;

/// A parsed `/** ... */` comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocComment {
    pub first_sentence: Vec<DocNode>,
    pub body: Vec<DocNode>,
    /// Block tags (`@param`, `@return`, ...) in order.
    pub block_tags: Vec<DocNode>,
}

/// One element of a documentation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocNode {
    /// Plain text, possibly spanning lines.
    Text(String),
    /// HTML entity name, printed as `&name;`.
    Entity(String),

    // Inline tags
    /// `{@link ref label}` or `{@linkplain ref label}`.
    Link {
        plain: bool,
        reference: String,
        label: Vec<DocNode>,
    },
    /// `{@code text}` or `{@literal text}`.
    Code {
        literal: bool,
        text: String,
    },
    /// `{@value}` or `{@value ref}`.
    Value(Option<String>),
    InheritDoc,
    DocRoot,
    UnknownInline {
        name: String,
        content: Vec<DocNode>,
    },

    // Block tags
    Param {
        name: String,
        /// Printed as `<name>`.
        is_type_param: bool,
        description: Vec<DocNode>,
    },
    Return(Vec<DocNode>),
    /// `@throws`, or `@exception` when `exception_keyword` is set.
    Throws {
        exception_keyword: bool,
        name: String,
        description: Vec<DocNode>,
    },
    See(Vec<DocNode>),
    Since(Vec<DocNode>),
    Author(Vec<DocNode>),
    Version(Vec<DocNode>),
    Deprecated(Vec<DocNode>),
    Serial(Vec<DocNode>),
    UnknownBlock {
        name: String,
        content: Vec<DocNode>,
    },
}

impl DocNode {
    /// Whether this is a block tag that starts its own line.
    pub fn is_block_tag(&self) -> bool {
        matches!(
            self,
            DocNode::Param { .. }
                | DocNode::Return(_)
                | DocNode::Throws { .. }
                | DocNode::See(_)
                | DocNode::Since(_)
                | DocNode::Author(_)
                | DocNode::Version(_)
                | DocNode::Deprecated(_)
                | DocNode::Serial(_)
                | DocNode::UnknownBlock { .. }
        )
    }

    pub fn text(text: &str) -> Self {
        DocNode::Text(text.to_owned())
    }
}

/// Doc trees by declaration node.
pub type DocMap = FxHashMap<NodeId, DocComment>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_tags_are_recognized() {
        assert!(DocNode::Return(vec![]).is_block_tag());
        assert!(!DocNode::text("x").is_block_tag());
        assert!(!DocNode::InheritDoc.is_block_tag());
    }
}
