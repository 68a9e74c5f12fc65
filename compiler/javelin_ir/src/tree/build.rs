//! Shorthand constructors for generated nodes.
//!
//! Refactorings build new subtrees from a handful of shapes over and over;
//! these keep call sites readable.

use super::ops::{BinaryOp, LiteralKind, PrimitiveKind};
use super::{Literal, NodeKind, SyntaxTree, VariableDecl};
use crate::{ElementId, Modifiers, NodeId};

impl SyntaxTree {
    pub fn ident(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Ident(name.to_owned()))
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> NodeId {
        self.alloc(NodeKind::PrimitiveType(kind))
    }

    /// A type or member reference resolved to `element`.
    pub fn name_ref(&mut self, element: ElementId, written: &str) -> NodeId {
        self.alloc(NodeKind::NameRef {
            element: Some(element),
            written: written.to_owned(),
        })
    }

    pub fn literal(&mut self, kind: LiteralKind, value: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal {
            kind,
            value: value.to_owned(),
        }))
    }

    pub fn int_literal(&mut self, value: i64) -> NodeId {
        self.literal(LiteralKind::Int, &value.to_string())
    }

    pub fn string_literal(&mut self, value: &str) -> NodeId {
        self.literal(LiteralKind::String, value)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.alloc(NodeKind::Binary { op, lhs, rhs })
    }

    pub fn call(&mut self, target: Option<NodeId>, name: &str, args: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::MethodCall {
            target,
            type_args: Vec::new(),
            name: name.to_owned(),
            args,
        })
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.alloc(NodeKind::ExprStmt(expr))
    }

    pub fn block(&mut self, stmts: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Block {
            stmts,
            is_static: false,
        })
    }

    pub fn return_stmt(&mut self, expr: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::Return(expr))
    }

    /// A variable with no modifiers: a parameter, or a local when `init` is set.
    pub fn variable(&mut self, ty: NodeId, name: &str, init: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::Variable(VariableDecl {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            ty: Some(ty),
            name: name.to_owned(),
            init,
            varargs: false,
        }))
    }
}
