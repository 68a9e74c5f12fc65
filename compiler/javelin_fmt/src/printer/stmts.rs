//! Statements, blocks and statement lists.

use javelin_ir::{prec, NodeId, NodeKind};

use super::{PrintContext, Printer};
use crate::buffer::{Emit, Overflow};
use crate::config::{BracePlacement, BracesGeneration, WrapStyle};
use crate::dangling_else::has_dangling_else;
use crate::tokens::{self, Separator};

/// Options of [`Printer::print_block`].
#[derive(Copy, Clone, Debug)]
pub(super) struct BlockLayout {
    pub placement: BracePlacement,
    pub space_before: bool,
    /// The statements are class members (anonymous class bodies).
    pub members: bool,
    /// Print the block node's own preceding and trailing comments.
    pub comments: bool,
}

impl Printer<'_> {
    /// Print a statement or member on its own: blank lines before (unless
    /// `first`), optional move to the left margin, the tree, blank lines
    /// after and an optional newline.
    pub(super) fn print_stat(
        &mut self,
        id: NodeId,
        first: bool,
        column: bool,
        newline: bool,
        cx: PrintContext,
    ) -> Emit {
        if !first {
            self.blank_lines_for(id, true, cx)?;
        }
        if column {
            self.to_left_margin()?;
        }
        self.print_tree(id, cx.statement())?;
        self.blank_lines_for(id, false, cx)?;
        if newline {
            self.end_line();
        }
        Ok(())
    }

    /// A statement or member list, copied as one run when possible.
    pub(super) fn print_stats(&mut self, stats: &[NodeId], cx: PrintContext) -> Emit {
        if self.try_print_original(stats, true)? {
            return Ok(());
        }
        for (i, &stat) in stats.iter().enumerate() {
            self.print_stat(stat, i == 0, true, false, cx)?;
        }
        Ok(())
    }

    /// Print `{ stats }`. `block` is the block node when there is one; a
    /// bare statement list (a generated block around a single statement,
    /// an anonymous class body) passes `None`.
    pub(super) fn print_block(
        &mut self,
        block: Option<NodeId>,
        stats: &[NodeId],
        layout: BlockLayout,
        cx: PrintContext,
    ) -> Emit {
        if let (true, Some(block)) = (layout.comments, block) {
            self.print_preceding_comments(block)?;
        }
        let old = self.indent();
        let brace_column = self.place_open_brace(layout.placement, old)?;
        if layout.space_before {
            self.need_space()?;
        }
        self.print("{")?;
        if let Some(block) = block {
            self.print_inner_comments(block)?;
        }
        if !stats.is_empty() {
            if layout.members {
                self.out
                    .blank_lines(self.style.blank_lines.after_anonymous_class_header);
            } else {
                self.newline();
            }
            self.print_stats(stats, cx)?;
        }
        self.out.to_column(brace_column)?;
        self.undent(old);
        self.print("}")?;
        if let (true, Some(block)) = (layout.comments, block) {
            self.print_trailing_comments(block)?;
        }
        Ok(())
    }

    /// Move to where an opening brace goes. `outer` is the margin of the
    /// header, the current margin already that of the body. Returns the
    /// column of the closing brace.
    pub(super) fn place_open_brace(
        &mut self,
        placement: BracePlacement,
        outer: usize,
    ) -> Result<usize, Overflow> {
        let column = match placement {
            BracePlacement::SameLine => return Ok(outer),
            BracePlacement::NewLine => outer,
            BracePlacement::NewLineHalfIndented => outer + self.style.indent_size() / 2,
            BracePlacement::NewLineIndented => self.left_margin(),
        };
        self.newline();
        self.out.to_column(column)?;
        Ok(column)
    }

    fn other_block(&self, space_before: bool) -> BlockLayout {
        BlockLayout {
            placement: self.style.braces.other,
            space_before,
            members: false,
            comments: false,
        }
    }

    /// Print a node as a block: its statements if it is one, otherwise the
    /// node wrapped in generated braces.
    fn print_as_block(&mut self, stmt: NodeId, space_before: bool, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let layout = self.other_block(space_before);
        match tree.kind(stmt) {
            NodeKind::Block { stmts, .. } => self.print_block(Some(stmt), stmts, layout, cx),
            _ => self.print_block(None, std::slice::from_ref(&stmt), layout, cx),
        }
    }

    /// Body of `if`, `for`, `while` and `do`: braces per `braces`, an
    /// unbraced statement indented and wrapped per `wrap`.
    pub(super) fn print_indented_stat(
        &mut self,
        stmt: NodeId,
        braces: BracesGeneration,
        space_before: bool,
        wrap: WrapStyle,
        cx: PrintContext,
    ) -> Emit {
        let tree = self.tree;
        let mut stmt = stmt;
        match braces {
            BracesGeneration::Generate => return self.print_as_block(stmt, space_before, cx),
            BracesGeneration::Eliminate => {
                while let NodeKind::Block { stmts, .. } = tree.kind(stmt) {
                    let [only] = stmts.as_slice() else {
                        break;
                    };
                    if matches!(tree.kind(*only), NodeKind::Variable(_)) {
                        break;
                    }
                    self.print_preceding_comments(stmt)?;
                    stmt = *only;
                }
            }
            BracesGeneration::LeaveAlone => {}
        }
        if let NodeKind::Block { stmts, .. } = tree.kind(stmt) {
            let layout = self.other_block(space_before);
            return self.print_block(Some(stmt), stmts, layout, cx);
        }
        let old = self.indent();
        let column = self.left_margin();
        let result = self.wrap_tree(wrap, space_before, column, |p| {
            p.print_stat(stmt, false, false, false, cx)
        });
        self.undent(old);
        result
    }

    /// `{ ... }` as a statement, or a static or instance initializer.
    pub(super) fn print_block_stmt(
        &mut self,
        id: NodeId,
        stmts: &[NodeId],
        is_static: bool,
        cx: PrintContext,
    ) -> Emit {
        if is_static {
            self.print("static")?;
        }
        let space = is_static && self.style.spacing.before_statement_left_brace;
        let layout = self.other_block(space);
        self.print_block(Some(id), stmts, layout, cx.statement())
    }

    /// `(` of a statement header, with the space before it when configured.
    fn open_header_paren(&mut self, space_before: bool) -> Emit {
        self.space_if(space_before)?;
        self.print(tokens::open_paren(
            self.style.spacing.within_statement_parens,
        ))
    }

    fn close_header_paren(&mut self) -> Emit {
        self.print(tokens::close_paren(
            self.style.spacing.within_statement_parens,
        ))
    }

    /// `keyword (expr)`.
    fn print_header(&mut self, keyword: &str, space: bool, expr: NodeId, cx: PrintContext) -> Emit {
        self.print(keyword)?;
        self.open_header_paren(space)?;
        self.print_tree(expr, cx.with_prec(prec::NONE))?;
        self.close_header_paren()
    }

    pub(super) fn print_if(
        &mut self,
        cond: NodeId,
        then_stmt: NodeId,
        else_stmt: Option<NodeId>,
        cx: PrintContext,
    ) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let braces = style.redundant_braces.if_braces;
        let brace_space = style.spacing.before_statement_left_brace;
        self.print_header("if", style.spacing.before_if_paren, cond, cx)?;

        let mut prev_block = (matches!(tree.kind(then_stmt), NodeKind::Block { .. })
            && braces != BracesGeneration::Eliminate)
            || braces == BracesGeneration::Generate;
        if else_stmt.is_some() && has_dangling_else(tree, then_stmt) {
            self.print_as_block(then_stmt, brace_space, cx)?;
            prev_block = true;
        } else {
            self.print_indented_stat(then_stmt, braces, brace_space, style.wrap.if_statement, cx)?;
        }

        let Some(else_stmt) = else_stmt else {
            return Ok(());
        };
        if style.placement.else_on_new_line || !prev_block {
            self.newline();
            self.to_left_margin()?;
        } else if style.spacing.before_else {
            self.need_space()?;
        }
        self.print("else")?;
        if matches!(tree.kind(else_stmt), NodeKind::If { .. }) && style.placement.special_else_if {
            self.need_space()?;
            self.print_stat(else_stmt, true, false, false, cx)
        } else {
            self.print_indented_stat(else_stmt, braces, brace_space, style.wrap.if_statement, cx)
        }
    }

    pub(super) fn print_while(&mut self, cond: NodeId, body: NodeId, cx: PrintContext) -> Emit {
        let style = self.style;
        self.print_header("while", style.spacing.before_while_paren, cond, cx)?;
        self.print_indented_stat(
            body,
            style.redundant_braces.while_braces,
            style.spacing.before_statement_left_brace,
            style.wrap.while_statement,
            cx,
        )
    }

    pub(super) fn print_do_while(&mut self, body: NodeId, cond: NodeId, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let braces = style.redundant_braces.do_while_braces;
        self.print("do")?;
        let brace_space = style.spacing.before_statement_left_brace;
        self.space_if(brace_space)?;
        self.print_indented_stat(body, braces, false, style.wrap.do_while_statement, cx)?;

        let prev_block = matches!(tree.kind(body), NodeKind::Block { .. })
            || braces == BracesGeneration::Generate;
        if style.placement.while_on_new_line || !prev_block {
            self.newline();
            self.to_left_margin()?;
        } else if style.spacing.before_while {
            self.need_space()?;
        }
        self.print_header("while", style.spacing.before_while_paren, cond, cx)?;
        self.print(";")
    }

    pub(super) fn print_for(
        &mut self,
        init: &[NodeId],
        cond: Option<NodeId>,
        step: &[NodeId],
        body: NodeId,
        cx: PrintContext,
    ) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let spacing = &style.spacing;
        let expr = cx.with_prec(prec::NONE);
        self.print("for")?;
        self.open_header_paren(spacing.before_for_paren)?;
        let column = self.out.column();

        // A declaration list shares the first variable's type and modifiers.
        let declares = init
            .first()
            .is_some_and(|&first| matches!(tree.kind(first), NodeKind::Variable(_)));
        if declares {
            for (i, &var) in init.iter().enumerate() {
                if i == 0 {
                    self.print_tree(var, expr)?;
                    continue;
                }
                self.print(",")?;
                self.space_if(spacing.after_comma)?;
                let NodeKind::Variable(decl) = tree.kind(var) else {
                    self.print_tree(var, expr)?;
                    continue;
                };
                self.print(&decl.name)?;
                if let Some(value) = decl.init {
                    let around = spacing.around_assign_ops;
                    self.print(&tokens::spaced("=", around))?;
                    self.print_tree(value, expr)?;
                }
            }
        } else {
            self.print_separated(init, Separator::comma(spacing), cx)?;
        }

        let semicolon = if spacing.before_semi { " ;" } else { ";" };
        let wrap_column = self.wrap_column(style.alignment.for_header, column);
        self.print(semicolon)?;
        if let Some(cond) = cond {
            self.wrap_for_part(self.estimate(cond), wrap_column)?;
            self.print_tree(cond, expr)?;
        }
        self.print(semicolon)?;
        if !step.is_empty() {
            let width = self.estimator.estimate_list(
                step,
                self.out.right_margin().saturating_sub(self.out.column()),
            );
            self.wrap_for_part(width, wrap_column)?;
            self.print_separated(step, Separator::comma(spacing), cx)?;
        }
        self.close_header_paren()?;
        self.print_indented_stat(
            body,
            style.redundant_braces.for_braces,
            spacing.before_statement_left_brace,
            style.wrap.for_statement,
            cx,
        )
    }

    /// Space or line break before the condition or update of a `for`.
    fn wrap_for_part(&mut self, width: usize, wrap_column: usize) -> Emit {
        let style = self.style;
        let after_semi = style.spacing.after_semi;
        match style.wrap.for_header {
            WrapStyle::IfLong if self.fits(width, true) => self.space_if(after_semi),
            WrapStyle::IfLong | WrapStyle::Always => self.wrap_to(wrap_column),
            WrapStyle::Never => self.space_if(after_semi),
        }
    }

    pub(super) fn print_for_each(
        &mut self,
        var: NodeId,
        iterable: NodeId,
        body: NodeId,
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let spacing = &style.spacing;
        let expr = cx.with_prec(prec::NONE);
        self.print("for")?;
        self.open_header_paren(spacing.before_for_paren)?;
        self.print_tree(var, expr)?;
        self.print(if spacing.before_colon { " :" } else { ":" })?;
        self.space_if(spacing.after_colon)?;
        self.print_tree(iterable, expr)?;
        self.close_header_paren()?;
        self.print_indented_stat(
            body,
            style.redundant_braces.for_braces,
            spacing.before_statement_left_brace,
            style.wrap.for_statement,
            cx,
        )
    }

    pub(super) fn print_labeled(&mut self, label: &str, body: NodeId, cx: PrintContext) -> Emit {
        let margins = &self.style.margins;
        let absolute = margins.absolute_label_indent;
        let label_indent = margins.label_indent;
        let label_column = if absolute { 0 } else { self.left_margin() };
        self.out.to_column(label_column)?;
        self.print(label)?;
        self.print(":")?;
        let old = self.out.indent(label_indent);
        let result = self
            .to_left_margin()
            .and_then(|()| self.print_stat(body, true, false, false, cx));
        self.undent(old);
        result
    }

    pub(super) fn print_switch(&mut self, selector: NodeId, cases: &[NodeId], cx: PrintContext) -> Emit {
        let style = self.style;
        self.print_header("switch", style.spacing.before_switch_paren, selector, cx)?;
        let mut brace_column = self.left_margin();
        match style.braces.other {
            BracePlacement::SameLine => {}
            BracePlacement::NewLine => {
                self.newline();
                self.out.to_column(brace_column)?;
            }
            BracePlacement::NewLineHalfIndented => {
                brace_column += style.indent_size() / 2;
                self.newline();
                self.out.to_column(brace_column)?;
            }
            BracePlacement::NewLineIndented => {
                brace_column += style.indent_size();
                self.newline();
                self.out.to_column(brace_column)?;
            }
        }
        if style.spacing.before_statement_left_brace {
            self.need_space()?;
        }
        self.print("{")?;
        if !cases.is_empty() {
            self.newline();
            self.print_stats(cases, cx)?;
            self.out.to_column(brace_column)?;
        }
        self.print("}")
    }

    pub(super) fn print_case(
        &mut self,
        labels: &[NodeId],
        guard: Option<NodeId>,
        arrow: bool,
        body: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        let old = if self.style.margins.indent_cases_from_switch {
            self.indent()
        } else {
            self.left_margin()
        };
        let result = self.print_case_inner(labels, guard, arrow, body, cx);
        self.undent(old);
        result
    }

    fn print_case_inner(
        &mut self,
        labels: &[NodeId],
        guard: Option<NodeId>,
        arrow: bool,
        body: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        self.to_left_margin()?;
        if labels.is_empty() {
            self.print("default")?;
        } else {
            self.print("case ")?;
            let comma = Separator {
                text: ",",
                space_before: false,
                space_after: true,
            };
            self.print_separated(labels, comma, cx)?;
        }
        if let Some(guard) = guard {
            self.need_space()?;
            self.print("when ")?;
            self.print_tree(guard, cx.with_prec(prec::NONE))?;
        }
        if arrow {
            self.print(" -> ")?;
            return match body {
                [rule] => self.print_case_rule(*rule, cx),
                _ => Ok(()),
            };
        }
        self.print(":")?;
        self.newline();
        self.indent();
        self.print_stats(body, cx)
    }

    /// Body of an arrow case: a block or statement as is, an expression
    /// completed with `;`.
    fn print_case_rule(&mut self, rule: NodeId, cx: PrintContext) -> Emit {
        if self.tree.kind(rule).is_statement() {
            return self.print_tree(rule, cx.statement());
        }
        self.print_tree(rule, cx.with_prec(prec::NONE))?;
        self.print(";")
    }

    pub(super) fn print_synchronized(&mut self, lock: NodeId, body: NodeId, cx: PrintContext) -> Emit {
        let style = self.style;
        self.print_header("synchronized", style.spacing.before_synchronized_paren, lock, cx)?;
        self.print_as_block(body, style.spacing.before_statement_left_brace, cx)
    }

    pub(super) fn print_try(
        &mut self,
        resources: &[NodeId],
        body: NodeId,
        catches: &[NodeId],
        finally: Option<NodeId>,
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let brace_space = style.spacing.before_statement_left_brace;
        self.print("try")?;
        if !resources.is_empty() {
            self.print(" (")?;
            for (i, &resource) in resources.iter().enumerate() {
                if i > 0 {
                    self.print(";")?;
                    self.space_if(style.spacing.after_semi)?;
                }
                self.print_tree_generated(resource, cx.with_prec(prec::NONE))?;
            }
            self.print(") ")?;
        }
        self.print_as_block(body, brace_space, cx)?;
        for &catch in catches {
            self.print_stat(catch, true, false, false, cx)?;
        }
        if let Some(finally) = finally {
            if style.placement.finally_on_new_line {
                self.newline();
                self.to_left_margin()?;
            } else if style.spacing.before_finally {
                self.need_space()?;
            }
            self.print("finally")?;
            self.print_as_block(finally, brace_space, cx)?;
        }
        Ok(())
    }

    pub(super) fn print_catch(&mut self, param: NodeId, body: NodeId, cx: PrintContext) -> Emit {
        let style = self.style;
        if style.placement.catch_on_new_line {
            self.newline();
            self.to_left_margin()?;
        } else if style.spacing.before_catch {
            self.need_space()?;
        }
        self.print_header("catch", style.spacing.before_catch_paren, param, cx)?;
        self.print_as_block(body, style.spacing.before_statement_left_brace, cx)
    }

    pub(super) fn print_assert(&mut self, cond: NodeId, detail: Option<NodeId>, cx: PrintContext) -> Emit {
        let style = self.style;
        let expr = cx.with_prec(prec::NONE);
        self.print("assert ")?;
        self.print_tree(cond, expr)?;
        if let Some(detail) = detail {
            let after_colon = style.spacing.after_colon;
            self.print(if style.spacing.before_colon { " :" } else { ":" })?;
            match style.wrap.assert_detail {
                WrapStyle::IfLong if self.fits(self.estimate(detail), true) => {
                    self.space_if(after_colon)?;
                }
                WrapStyle::IfLong | WrapStyle::Always => {
                    let column = self.continuation_column();
                    self.wrap_to(column)?;
                }
                WrapStyle::Never => self.space_if(after_colon)?,
            }
            self.print_tree(detail, expr)?;
        }
        self.print(";")
    }
}
