//! Width Estimation
//!
//! Predicts how wide a subtree prints on one line without printing it. The
//! printer asks before committing to an `IfLong` layout for list items,
//! operands and the parts of a `for` header.
//!
//! The estimate follows the printer's inline emission: same token tables
//! (see [`crate::tokens`]), same resolved names, same verbatim text for
//! subtrees that will be copied. Traversal stops as soon as the running
//! total passes the budget.
//!
//! # Saturation
//!
//! Constructs that never print on one line (blocks, anonymous class bodies,
//! lambdas with block bodies, declarations) and copied text that spans
//! lines report `budget + 1`: "does not fit", whatever the budget. So do
//! comments that end their line: line comments, javadoc, multi-line text
//! and trailing comments.

mod helpers;

#[cfg(test)]
mod tests;

use javelin_ir::{
    prec, Comment, CommentMap, CommentPosition, CommentStyle, NodeId, NodeKind, SyntaxTree,
};

use crate::config::StyleConfig;
use crate::imports::ResolvedNames;
use crate::original::OriginalSource;
use crate::tokens::{self, Separator};

pub(crate) use helpers::{char_display_width, text_width};

/// The running total passed the budget.
struct Exceeded;

type Measure = Result<(), Exceeded>;

/// Width accumulated so far, bounded by the budget.
struct Tally {
    total: usize,
    budget: usize,
}

impl Tally {
    #[inline]
    fn add(&mut self, width: usize) -> Measure {
        self.total = self.total.saturating_add(width);
        if self.total > self.budget {
            Err(Exceeded)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn text(&mut self, text: &str) -> Measure {
        self.add(text_width(text))
    }

    #[inline]
    fn space_if(&mut self, cond: bool) -> Measure {
        self.add(usize::from(cond))
    }

    fn saturate(&mut self) -> Measure {
        self.total = self.budget.saturating_add(1);
        Err(Exceeded)
    }
}

/// Single-line width calculator for printer subtrees.
#[derive(Copy, Clone)]
pub struct WidthEstimator<'a> {
    tree: &'a SyntaxTree,
    style: &'a StyleConfig,
    original: OriginalSource<'a>,
    names: &'a ResolvedNames,
}

impl<'a> WidthEstimator<'a> {
    /// Create an estimator over `tree`, printed from `source` with `style`.
    pub fn new(
        tree: &'a SyntaxTree,
        style: &'a StyleConfig,
        source: &'a str,
        comments: &'a CommentMap,
        names: &'a ResolvedNames,
    ) -> Self {
        WidthEstimator {
            tree,
            style,
            original: OriginalSource::new(source, tree, comments),
            names,
        }
    }

    pub(crate) fn with_original(
        tree: &'a SyntaxTree,
        style: &'a StyleConfig,
        original: OriginalSource<'a>,
        names: &'a ResolvedNames,
    ) -> Self {
        WidthEstimator {
            tree,
            style,
            original,
            names,
        }
    }

    /// Inline width of `node`, or a value above `budget` when it is wider
    /// (or cannot print on one line).
    pub fn estimate(&self, node: NodeId, budget: usize) -> usize {
        let mut tally = Tally { total: 0, budget };
        match self.node(&mut tally, node, prec::NONE) {
            Ok(()) => tally.total,
            Err(Exceeded) => tally.total.max(budget.saturating_add(1)),
        }
    }

    /// Inline width of `nodes` separated by commas.
    pub fn estimate_list(&self, nodes: &[NodeId], budget: usize) -> usize {
        let mut tally = Tally { total: 0, budget };
        let comma = Separator::comma(&self.style.spacing);
        match self.list(&mut tally, nodes, comma) {
            Ok(()) => tally.total,
            Err(Exceeded) => tally.total.max(budget.saturating_add(1)),
        }
    }

    fn list(&self, tally: &mut Tally, nodes: &[NodeId], separator: Separator) -> Measure {
        for (i, &id) in nodes.iter().enumerate() {
            if i > 0 {
                tally.add(separator.width())?;
            }
            self.node(tally, id, prec::NONE)?;
        }
        Ok(())
    }

    /// Measure the text a verbatim copy of `id` would produce, if it is
    /// copied at all.
    fn copied(&self, tally: &mut Tally, id: NodeId) -> Option<Measure> {
        if !self.original.is_copy_eligible(&[id]) {
            return None;
        }
        let range = self.original.copy_range(&[id], true).ok()?;
        let text = &self.original.text[range];
        if text.contains('\n') {
            return Some(tally.saturate());
        }
        Some(tally.text(text))
    }

    fn node(&self, tally: &mut Tally, id: NodeId, context_prec: i8) -> Measure {
        let Some(node) = self.tree.try_get(id) else {
            return Ok(());
        };
        if tokens::precedence(&node.kind) < context_prec {
            tally.add(2)?;
            return self.node(tally, id, prec::NONE);
        }
        if let Some(measure) = self.copied(tally, id) {
            return measure;
        }
        let comments = self.original.comments();
        for comment in comments.at(id, CommentPosition::Preceding) {
            self.comment(tally, comment, true)?;
        }
        self.kind(tally, id, &node.kind)?;
        for position in [CommentPosition::Inner, CommentPosition::Inline] {
            for comment in comments.at(id, position) {
                self.comment(tally, comment, false)?;
            }
        }
        if comments
            .at(id, CommentPosition::Trailing)
            .iter()
            .any(|c| c.style != CommentStyle::Whitespace)
        {
            return tally.saturate();
        }
        Ok(())
    }

    /// A comment printed between tokens: a separating space, the framed
    /// text and, before the next token, another space.
    fn comment(&self, tally: &mut Tally, comment: &Comment, space_after: bool) -> Measure {
        match comment.style {
            CommentStyle::Whitespace => return Ok(()),
            CommentStyle::Line | CommentStyle::Javadoc => return tally.saturate(),
            CommentStyle::Block => {}
        }
        let text = comment.text.trim_start_matches(|c: char| c <= ' ');
        if text.contains('\n') || comment.indent == Some(0) || self.original.starts_line(comment) {
            return tally.saturate();
        }
        tally.add(1)?;
        if comment.text.starts_with('/') {
            tally.text(text)?;
        } else {
            tally.add("/*  */".len())?;
            tally.text(text)?;
        }
        tally.space_if(space_after)
    }

    fn kind(&self, tally: &mut Tally, id: NodeId, kind: &NodeKind) -> Measure {
        let spacing = &self.style.spacing;
        match kind {
            NodeKind::Ident(name) => tally.text(name),
            NodeKind::NameRef { written, .. } => {
                tally.text(self.names.get(id).unwrap_or(written.as_str()))
            }
            NodeKind::Literal(literal) => tally.text(&tokens::literal_text(literal)),
            NodeKind::PrimitiveType(kind) => tally.text(kind.keyword()),
            NodeKind::Erroneous(text) => {
                if text.contains('\n') {
                    tally.saturate()
                } else {
                    tally.text(text)
                }
            }

            NodeKind::FieldAccess { target, name } => {
                self.node(tally, *target, prec::POSTFIX)?;
                tally.add(1)?;
                tally.text(name)
            }
            NodeKind::MethodCall {
                target,
                type_args,
                name,
                args,
            } => {
                if let Some(target) = target {
                    self.node(tally, *target, prec::POSTFIX)?;
                    tally.add(1)?;
                }
                self.type_args(tally, type_args)?;
                tally.text(name)?;
                self.call_args(tally, args)
            }
            NodeKind::NewClass {
                outer,
                type_args,
                class,
                args,
                body,
            } => {
                if let Some(outer) = outer {
                    self.node(tally, *outer, prec::POSTFIX)?;
                    tally.add(1)?;
                }
                tally.text("new ")?;
                self.type_args(tally, type_args)?;
                self.node(tally, *class, prec::NONE)?;
                self.call_args(tally, args)?;
                if body.is_some() {
                    return tally.saturate();
                }
                Ok(())
            }
            NodeKind::NewArray {
                elem_type,
                dims,
                extra_dims,
                init,
            } => {
                let within = spacing.within_array_init_brackets;
                if let Some(elem_type) = elem_type {
                    tally.text("new ")?;
                    self.node(tally, *elem_type, prec::NONE)?;
                }
                for &dim in dims {
                    tally.add(tokens::parens_width(within))?;
                    self.node(tally, dim, prec::NONE)?;
                }
                tally.add(usize::from(*extra_dims) * 2)?;
                if let Some(init) = init {
                    tally.space_if(spacing.before_array_init_left_brace && elem_type.is_some())?;
                    tally.add(tokens::parens_width(spacing.within_braces && !init.is_empty()))?;
                    self.list(tally, init, Separator::comma(spacing))?;
                }
                Ok(())
            }
            NodeKind::Parens(expr) => {
                tally.add(tokens::parens_width(spacing.within_parens))?;
                self.node(tally, *expr, prec::NONE)
            }
            NodeKind::Assign { lhs, rhs } => {
                self.node(tally, *lhs, prec::ASSIGN + 1)?;
                tally.add(tokens::spaced_width("=", spacing.around_assign_ops))?;
                self.node(tally, *rhs, prec::ASSIGN)
            }
            NodeKind::CompoundAssign { op, lhs, rhs } => {
                self.node(tally, *lhs, prec::ASSIGN_OP + 1)?;
                tally.add(tokens::spaced_width(op.text(), spacing.around_assign_ops) + 1)?;
                self.node(tally, *rhs, prec::ASSIGN_OP)
            }
            NodeKind::Unary { op, operand } => {
                let operand_kind = self.tree.kind(*operand);
                if op.is_prefix() {
                    tally.space_if(spacing.around_unary_ops)?;
                    tally.text(op.text())?;
                    tally.space_if(tokens::unary_needs_space(*op, operand_kind, spacing))?;
                } else {
                    tally.text(op.text())?;
                }
                self.node(tally, *operand, op.precedence())
            }
            NodeKind::Binary { op, lhs, rhs } => {
                let own = op.precedence();
                self.node(tally, *lhs, own)?;
                tally.space_if(spacing.around_binary_ops)?;
                tally.text(op.text())?;
                let rhs_kind = self.tree.kind(*rhs);
                tally.space_if(tokens::binary_needs_space(*op, rhs_kind, spacing))?;
                self.node(tally, *rhs, own + 1)
            }
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let around = spacing.around_ternary_ops;
                self.node(tally, *cond, prec::CONDITIONAL + 1)?;
                tally.add(tokens::spaced_width("?", around))?;
                self.node(tally, *then_expr, prec::CONDITIONAL)?;
                tally.add(tokens::spaced_width(":", around))?;
                self.node(tally, *else_expr, prec::CONDITIONAL)
            }
            NodeKind::Cast { ty, expr } => {
                tally.add(tokens::parens_width(spacing.within_type_cast_parens))?;
                self.node(tally, *ty, prec::NONE)?;
                tally.space_if(spacing.after_type_cast)?;
                self.node(tally, *expr, prec::PREFIX)
            }
            NodeKind::InstanceOf { expr, ty } => {
                self.node(tally, *expr, prec::ORDERING)?;
                tally.text(" instanceof ")?;
                self.node(tally, *ty, prec::NONE)
            }
            NodeKind::ArrayAccess { array, index } => {
                self.node(tally, *array, prec::POSTFIX)?;
                tally.add(2)?;
                self.node(tally, *index, prec::NONE)
            }
            NodeKind::Lambda { params, body } => {
                self.lambda_params(tally, params)?;
                tally.text(tokens::lambda_arrow(spacing))?;
                if matches!(self.tree.kind(*body), NodeKind::Block { .. }) {
                    return tally.saturate();
                }
                tally.space_if(spacing.around_lambda_arrow)?;
                self.node(tally, *body, prec::NONE)
            }
            NodeKind::MemberRef { target, name } => {
                self.node(tally, *target, prec::POSTFIX)?;
                tally.text(tokens::method_ref_colons(spacing))?;
                tally.text(name)
            }

            NodeKind::BindingPattern(var) => self.node(tally, *var, prec::NONE),
            NodeKind::RecordPattern {
                deconstructor,
                nested,
            } => {
                self.node(tally, *deconstructor, prec::NONE)?;
                tally.add(2)?;
                self.list(tally, nested, Separator::comma(spacing))
            }

            NodeKind::ArrayType(elem) => {
                self.node(tally, *elem, prec::NONE)?;
                tally.add(2)
            }
            NodeKind::AnnotatedType { annotations, ty } => {
                for &annotation in annotations {
                    self.node(tally, annotation, prec::NONE)?;
                    tally.add(1)?;
                }
                self.node(tally, *ty, prec::NONE)
            }
            NodeKind::ParameterizedType { base, args } => {
                self.node(tally, *base, prec::NONE)?;
                tally.add(2)?;
                self.list(tally, args, Separator::comma(spacing))
            }
            NodeKind::Wildcard { bound } => {
                tally.add(1)?;
                if let Some((kind, ty)) = bound {
                    tally.add(kind.keyword().len() + 2)?;
                    self.node(tally, *ty, prec::NONE)?;
                }
                Ok(())
            }
            NodeKind::UnionType(alternatives) => {
                self.list(tally, alternatives, Separator::union(spacing))
            }
            NodeKind::IntersectionType(bounds) => {
                self.list(tally, bounds, Separator::intersection(spacing))
            }
            NodeKind::TypeParameter { name, bounds } => {
                tally.text(name)?;
                if !bounds.is_empty() {
                    tally.text(" extends ")?;
                    self.list(tally, bounds, Separator::intersection(spacing))?;
                }
                Ok(())
            }
            NodeKind::Annotation { ty, args } => {
                tally.add(1)?;
                self.node(tally, *ty, prec::NONE)?;
                if !args.is_empty() {
                    tally.space_if(spacing.before_annotation_paren)?;
                    tally.add(tokens::parens_width(spacing.within_annotation_parens))?;
                    self.list(tally, args, Separator::comma(spacing))?;
                }
                Ok(())
            }
            NodeKind::Variable(var) => {
                for &annotation in &var.annotations {
                    self.node(tally, annotation, prec::NONE)?;
                    tally.add(1)?;
                }
                tally.add(var.modifiers.printed_width())?;
                if let Some(ty) = var.ty {
                    match (var.varargs, self.tree.kind(ty)) {
                        (true, NodeKind::ArrayType(elem)) => {
                            self.node(tally, *elem, prec::NONE)?;
                            tally.add(3)?;
                        }
                        (true, _) => {
                            self.node(tally, ty, prec::NONE)?;
                            tally.add(3)?;
                        }
                        (false, _) => self.node(tally, ty, prec::NONE)?,
                    }
                    tally.add(1)?;
                }
                tally.text(&var.name)?;
                if let Some(init) = var.init {
                    tally.add(tokens::spaced_width("=", spacing.around_assign_ops))?;
                    self.node(tally, init, prec::NONE)?;
                }
                Ok(())
            }
            NodeKind::EnumConstant {
                annotations,
                name,
                args,
                body,
            } => {
                for &annotation in annotations {
                    self.node(tally, annotation, prec::NONE)?;
                    tally.add(1)?;
                }
                tally.text(name)?;
                if !args.is_empty() {
                    self.call_args(tally, args)?;
                }
                if body.is_some() {
                    return tally.saturate();
                }
                Ok(())
            }
            NodeKind::Import { name, is_static } => {
                tally.text("import ")?;
                if *is_static {
                    tally.text("static ")?;
                }
                tally.text(name)?;
                tally.add(1)
            }

            NodeKind::CompilationUnit { .. }
            | NodeKind::Package { .. }
            | NodeKind::Class(_)
            | NodeKind::Module { .. }
            | NodeKind::Requires { .. }
            | NodeKind::Exports { .. }
            | NodeKind::Opens { .. }
            | NodeKind::Uses(_)
            | NodeKind::Provides { .. }
            | NodeKind::Method(_)
            | NodeKind::Block { .. }
            | NodeKind::Empty
            | NodeKind::ExprStmt(_)
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::DoWhile { .. }
            | NodeKind::For { .. }
            | NodeKind::ForEach { .. }
            | NodeKind::Labeled { .. }
            | NodeKind::Switch { .. }
            | NodeKind::SwitchExpr { .. }
            | NodeKind::Case { .. }
            | NodeKind::Synchronized { .. }
            | NodeKind::Try { .. }
            | NodeKind::Catch { .. }
            | NodeKind::Return(_)
            | NodeKind::Throw(_)
            | NodeKind::Break(_)
            | NodeKind::Continue(_)
            | NodeKind::Yield(_)
            | NodeKind::Assert { .. } => tally.saturate(),
        }
    }

    fn type_args(&self, tally: &mut Tally, type_args: &[NodeId]) -> Measure {
        if type_args.is_empty() {
            return Ok(());
        }
        tally.add(2)?;
        self.list(tally, type_args, Separator::comma(&self.style.spacing))
    }

    /// `(args)` of a call or constructor invocation.
    fn call_args(&self, tally: &mut Tally, args: &[NodeId]) -> Measure {
        let spacing = &self.style.spacing;
        tally.space_if(spacing.before_method_call_paren)?;
        tally.add(tokens::parens_width(
            spacing.within_method_call_parens && !args.is_empty(),
        ))?;
        self.list(tally, args, Separator::comma(spacing))
    }

    fn lambda_params(&self, tally: &mut Tally, params: &[NodeId]) -> Measure {
        let spacing = &self.style.spacing;
        if !lambda_needs_parens(self.tree, params, self.style) {
            if let Some(NodeKind::Variable(var)) = params.first().map(|&p| self.tree.kind(p)) {
                return tally.text(&var.name);
            }
        }
        tally.add(tokens::parens_width(
            spacing.within_lambda_parens && !params.is_empty(),
        ))?;
        self.list(tally, params, Separator::comma(spacing))
    }
}

/// Whether a lambda's parameter list is written in parentheses: always
/// unless it is a single implicitly typed parameter.
pub(crate) fn lambda_needs_parens(tree: &SyntaxTree, params: &[NodeId], style: &StyleConfig) -> bool {
    if style.placement.parens_around_single_lambda_param || params.len() != 1 {
        return true;
    }
    params
        .iter()
        .any(|&p| !matches!(tree.kind(p), NodeKind::Variable(var) if var.ty.is_none()))
}
