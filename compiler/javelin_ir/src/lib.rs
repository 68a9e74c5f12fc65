//! Javelin IR - syntax trees for the Java source printer
//!
//! This crate contains the data the printer consumes:
//! - Spans into the original source text
//! - The syntax tree arena (`SyntaxTree`, `NodeKind`, `NodeId`)
//! - Declaration modifiers
//! - Comments and structured doc comments, attached per node
//! - The read-only symbol table used for name resolution
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - **Share Unchanged Subtrees**: an edited tree reuses baseline nodes, so
//!   "unchanged" is a flag on the node rather than a tree diff

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod comment;
mod doc;
mod ids;
mod modifiers;
mod span;
mod symbols;
pub mod tree;

pub use comment::{Comment, CommentMap, CommentPosition, CommentSet, CommentStyle};
pub use doc::{DocComment, DocMap, DocNode};
pub use ids::{ElementId, NodeId, Tag};
pub use modifiers::Modifiers;
pub use span::{Span, SpanError};
pub use symbols::{Element, ElementKind, SymbolTable};
pub use tree::ops::{
    prec, BinaryOp, ClassKind, LiteralKind, PrimitiveKind, UnaryOp, WildcardBound,
};
pub use tree::{ClassDecl, Literal, MethodDecl, Node, NodeKind, SyntaxTree, VariableDecl};
