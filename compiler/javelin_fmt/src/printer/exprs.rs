//! Expressions with wrap points: calls, operators, lambdas, creation.

use javelin_ir::{prec, BinaryOp, NodeId, NodeKind, UnaryOp};

use super::stmts::BlockLayout;
use super::{PrintContext, Printer};
use crate::buffer::Emit;
use crate::config::WrapStyle;
use crate::tokens::{self, Separator};
use crate::width::lambda_needs_parens;

impl Printer<'_> {
    /// `(args)` of a call, constructor invocation or enum constant.
    pub(super) fn print_call_args(&mut self, args: &[NodeId], cx: PrintContext) -> Emit {
        let style = self.style;
        let spacing = &style.spacing;
        let within = spacing.within_method_call_parens && !args.is_empty();
        self.space_if(spacing.before_method_call_paren)?;
        self.print(tokens::open_paren(within))?;
        let column = self.out.column();
        let indent = self.wrap_column(style.alignment.call_args, column);
        self.wrap_trees(
            args,
            style.wrap.method_call_args,
            indent,
            false,
            Separator::comma(spacing),
            cx,
        )?;
        self.print(tokens::close_paren(within))
    }

    pub(super) fn print_method_call(
        &mut self,
        target: Option<NodeId>,
        type_args: &[NodeId],
        name: &str,
        args: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let dot_first = !style.wrap.after_dot_in_chained_calls;
        if let Some(target) = target {
            self.print_tree(target, cx.with_prec(prec::POSTFIX))?;
            if !dot_first {
                self.print(".")?;
            }
            if matches!(tree.kind(target), NodeKind::MethodCall { .. }) {
                let wrap = match style.wrap.chained_method_calls {
                    WrapStyle::IfLong => {
                        !self.fits(self.call_width(type_args, name, args), false)
                    }
                    WrapStyle::Always => true,
                    WrapStyle::Never => false,
                };
                if wrap {
                    let column = self.continuation_column();
                    self.wrap_to(column)?;
                }
            }
            if dot_first {
                self.print(".")?;
            }
        }
        self.print_type_args(type_args, cx)?;
        self.print(name)?;
        self.print_call_args(args, cx)
    }

    /// Width of one link of a call chain: type arguments, name and parens.
    fn call_width(&self, type_args: &[NodeId], name: &str, args: &[NodeId]) -> usize {
        let budget = self.out.right_margin().saturating_sub(self.out.column());
        let mut width = name.len() + 2;
        if !type_args.is_empty() {
            width += self.estimator.estimate_list(type_args, budget) + 2;
        }
        width.saturating_add(self.estimator.estimate_list(args, budget))
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the fields of NodeKind::NewClass")]
    pub(super) fn print_new_class(
        &mut self,
        id: NodeId,
        outer: Option<NodeId>,
        type_args: &[NodeId],
        class: NodeId,
        args: &[NodeId],
        body: Option<&[NodeId]>,
        cx: PrintContext,
    ) -> Emit {
        if let Some(outer) = outer {
            self.print_tree(outer, cx.with_prec(prec::POSTFIX))?;
            self.print(".")?;
        }
        self.print("new ")?;
        self.print_type_args(type_args, cx)?;
        self.print_tree(class, cx.with_prec(prec::NONE))?;
        self.print_call_args(args, cx)?;
        if let Some(body) = body {
            let layout = BlockLayout {
                placement: self.style.braces.other,
                space_before: self.style.spacing.before_class_decl_left_brace,
                members: true,
                comments: true,
            };
            self.print_block(None, body, layout, cx.in_class(id))?;
        }
        Ok(())
    }

    pub(super) fn print_new_array(
        &mut self,
        elem_type: Option<NodeId>,
        dims: &[NodeId],
        extra_dims: u8,
        init: Option<&[NodeId]>,
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let spacing = &style.spacing;
        let expr = cx.with_prec(prec::NONE);
        if let Some(elem_type) = elem_type {
            self.print("new ")?;
            self.print_tree(elem_type, expr)?;
        }
        let within = spacing.within_array_init_brackets;
        for &dim in dims {
            self.print(if within { "[ " } else { "[" })?;
            self.print_tree(dim, expr)?;
            self.print(if within { " ]" } else { "]" })?;
        }
        for _ in 0..extra_dims {
            self.print("[]")?;
        }
        let Some(elems) = init else {
            return Ok(());
        };
        if elem_type.is_some() && spacing.before_array_init_left_brace {
            self.need_space()?;
        }
        let within = spacing.within_braces && !elems.is_empty();
        self.print(if within { "{ " } else { "{" })?;
        let column = self.out.column();
        let indent = self.wrap_column(style.alignment.array_init, column);
        self.wrap_trees(
            elems,
            style.wrap.array_init,
            indent,
            false,
            Separator::comma(spacing),
            cx,
        )?;
        self.print(if within { " }" } else { "}" })
    }

    // Operators

    pub(super) fn print_assign(&mut self, lhs: NodeId, rhs: NodeId, cx: PrintContext) -> Emit {
        let column = self.out.column();
        self.print_tree(lhs, cx.with_prec(prec::ASSIGN + 1))?;
        self.wrap_assign_op("=", column, |p| p.print_tree(rhs, cx.with_prec(prec::ASSIGN)))
    }

    pub(super) fn print_compound_assign(
        &mut self,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let around = style.spacing.around_assign_ops;
        let column = self.out.column();
        self.print_tree(lhs, cx.with_prec(prec::ASSIGN_OP + 1))?;
        self.space_if(around)?;
        self.print(op.text())?;
        self.print("=")?;
        match style.wrap.assign_ops {
            WrapStyle::IfLong if self.fits(self.estimate(rhs), around) => self.space_if(around)?,
            WrapStyle::IfLong | WrapStyle::Always => {
                let indent = self.wrap_column(style.alignment.assignment, column);
                self.wrap_to(indent)?;
            }
            WrapStyle::Never => self.space_if(around)?,
        }
        self.print_tree(rhs, cx.with_prec(prec::ASSIGN_OP))
    }

    pub(super) fn print_unary(&mut self, op: UnaryOp, operand: NodeId, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let spacing = &self.style.spacing;
        let around = spacing.around_unary_ops;
        let operand_cx = cx.with_prec(op.precedence());
        if !op.is_prefix() {
            self.print_tree(operand, operand_cx)?;
            return self.print(op.text());
        }
        let space = tokens::unary_needs_space(op, tree.kind(operand), spacing);
        if around {
            self.need_space()?;
        }
        self.print(op.text())?;
        self.space_if(space)?;
        self.print_tree(operand, operand_cx)
    }

    pub(super) fn print_binary(
        &mut self,
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
        cx: PrintContext,
    ) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let own = op.precedence();
        let column = self.out.column();
        self.print_tree(lhs, cx.with_prec(own))?;
        self.space_if(style.spacing.around_binary_ops)?;
        self.print(op.text())?;
        let space = tokens::binary_needs_space(op, tree.kind(rhs), &style.spacing);
        match style.wrap.binary_ops {
            WrapStyle::IfLong if self.fits(self.estimate(rhs), space) => self.space_if(space)?,
            WrapStyle::IfLong | WrapStyle::Always => {
                let indent = self.wrap_column(style.alignment.binary_op, column);
                self.wrap_to(indent)?;
            }
            WrapStyle::Never => self.space_if(space)?,
        }
        self.print_tree(rhs, cx.with_prec(own + 1))
    }

    pub(super) fn print_conditional(
        &mut self,
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
        cx: PrintContext,
    ) -> Emit {
        let around = self.style.spacing.around_ternary_ops;
        self.print_tree(cond, cx.with_prec(prec::CONDITIONAL + 1))?;
        self.wrap_ternary(then_expr, around)?;
        self.print(if around { "? " } else { "?" })?;
        self.print_tree(then_expr, cx.with_prec(prec::CONDITIONAL))?;
        self.wrap_ternary(else_expr, around)?;
        self.print(if around { ": " } else { ":" })?;
        self.print_tree(else_expr, cx.with_prec(prec::CONDITIONAL))
    }

    /// Space or line break before `?` or `:`.
    fn wrap_ternary(&mut self, branch: NodeId, around: bool) -> Emit {
        match self.style.wrap.ternary_ops {
            WrapStyle::IfLong if self.fits(self.estimate(branch), true) => self.space_if(around),
            WrapStyle::IfLong | WrapStyle::Always => {
                let column = self.continuation_column();
                self.wrap_to(column)
            }
            WrapStyle::Never => self.space_if(around),
        }
    }

    pub(super) fn print_lambda(&mut self, params: &[NodeId], body: NodeId, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let spacing = &style.spacing;
        let around = spacing.around_lambda_arrow;
        if lambda_needs_parens(tree, params, style) {
            let within = spacing.within_lambda_parens && !params.is_empty();
            self.print(tokens::open_paren(within))?;
            let column = self.out.column();
            let indent = self.wrap_column(style.alignment.lambda_params, column);
            self.wrap_trees(
                params,
                style.wrap.lambda_params,
                indent,
                true,
                Separator::comma(spacing),
                cx.in_params(),
            )?;
            self.print(tokens::close_paren(within))?;
        } else if let Some(&param) = params.first() {
            self.print_tree(param, cx.in_params().with_prec(prec::NONE))?;
        }
        self.print(tokens::lambda_arrow(spacing))?;

        if let NodeKind::Block { stmts, .. } = tree.kind(body) {
            let layout = BlockLayout {
                placement: style.braces.other,
                space_before: around,
                members: false,
                comments: false,
            };
            return self.print_block(Some(body), stmts, layout, cx.statement());
        }
        match style.wrap.binary_ops {
            WrapStyle::IfLong if self.fits(self.estimate(body), around) => self.space_if(around)?,
            WrapStyle::IfLong | WrapStyle::Always => {
                let column = self.continuation_column();
                self.wrap_to(column)?;
            }
            WrapStyle::Never => self.space_if(around)?,
        }
        self.print_tree(body, cx.statement().with_prec(prec::NONE))
    }
}
