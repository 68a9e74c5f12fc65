//! Printer Engine
//!
//! Walks a syntax tree and renders it into an [`OutputBuffer`]. Unchanged
//! subtrees are copied from the original text; everything else is generated
//! according to the [`StyleConfig`].
//!
//! # Architecture
//!
//! - `print_tree` is the single entry for every node: it parenthesizes by
//!   precedence, tries a verbatim copy, prints the node's comments and
//!   records the tag span.
//! - Declarations, statements and expressions live in `decls`, `stmts` and
//!   `exprs`, one `match` arm per [`NodeKind`].
//! - Line-wrap decisions (`wrap`) either ask the [`WidthEstimator`] or render
//!   speculatively against a hard margin and roll back on [`Overflow`].
//! - Ambient state (enclosing class, parameter list, precedence) travels in a
//!   [`PrintContext`] value.

mod blank_lines;
mod comments;
mod context;
mod decls;
mod doc;
mod exprs;
mod header;
mod stmts;
mod verbatim;
mod wrap;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use javelin_ir::{prec, CommentMap, DocMap, NodeId, NodeKind, SyntaxTree, Tag};
use rustc_hash::FxHashMap;

use crate::buffer::{Emit, ObserverId, Overflow, OutputBuffer};
use crate::config::StyleConfig;
use crate::imports::ResolvedNames;
use crate::original::OriginalSource;
use crate::reindent::ReindentRegions;
use crate::span_map::SpanMap;
use crate::tokens;
use crate::width::WidthEstimator;

use comments::HandledComments;
pub(crate) use context::PrintContext;

/// Everything a print call borrows.
#[derive(Copy, Clone)]
pub(crate) struct PrinterParts<'a> {
    pub tree: &'a SyntaxTree,
    pub source: &'a str,
    pub style: &'a StyleConfig,
    pub comments: &'a CommentMap,
    pub docs: &'a DocMap,
    pub tags: &'a FxHashMap<NodeId, Tag>,
    pub names: &'a ResolvedNames,
    pub added_imports: &'a [String],
    pub initial_offset: usize,
}

/// Text, tag spans and reindent regions of one print call.
pub(crate) struct Rendered {
    pub text: String,
    pub spans: SpanMap,
    pub reindent_regions: Vec<Range<usize>>,
}

pub(crate) struct Printer<'a> {
    tree: &'a SyntaxTree,
    style: &'a StyleConfig,
    comments: &'a CommentMap,
    docs: &'a DocMap,
    tags: &'a FxHashMap<NodeId, Tag>,
    original: OriginalSource<'a>,
    names: &'a ResolvedNames,
    added_imports: &'a [String],
    estimator: WidthEstimator<'a>,
    out: OutputBuffer,
    regions: Rc<RefCell<ReindentRegions>>,
    observer: ObserverId,
    spans: SpanMap,
    handled: HandledComments,
    initial_offset: usize,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(parts: PrinterParts<'a>) -> Self {
        let style = parts.style;
        let original = OriginalSource::new(parts.source, parts.tree, parts.comments);
        let mut out = OutputBuffer::new(
            style.right_margin(),
            style.margins.tab_size,
            style.margins.expand_tabs,
        );
        let regions = Rc::new(RefCell::new(ReindentRegions::new()));
        let observer = out.register_observer(regions.clone());
        Printer {
            tree: parts.tree,
            style,
            comments: parts.comments,
            docs: parts.docs,
            tags: parts.tags,
            original,
            names: parts.names,
            added_imports: parts.added_imports,
            estimator: WidthEstimator::with_original(parts.tree, style, original, parts.names),
            out,
            regions,
            observer,
            spans: SpanMap::new(),
            handled: HandledComments::default(),
            initial_offset: parts.initial_offset,
        }
    }

    /// Print `root` as a top-level construct.
    pub(crate) fn print_root(&mut self, root: NodeId) {
        if let Err(Overflow) = self.print_tree(root, PrintContext::root()) {
            tracing::warn!(
                kind = self.tree.try_get(root).map_or("unknown", |n| n.kind.name()),
                "speculative overflow escaped the printer; output kept"
            );
        }
    }

    pub(crate) fn finish(mut self) -> Rendered {
        self.out.unregister_observer(self.observer);
        let regions = std::mem::take(&mut *self.regions.borrow_mut());
        Rendered {
            text: self.out.into_string(),
            spans: self.spans,
            reindent_regions: regions.into_shifted(self.initial_offset),
        }
    }

    // Buffer shorthands

    #[inline]
    fn print(&mut self, s: &str) -> Emit {
        self.out.append(s)
    }

    #[inline]
    fn space_if(&mut self, cond: bool) -> Emit {
        if cond {
            self.out.append_char(' ')
        } else {
            Ok(())
        }
    }

    #[inline]
    fn need_space(&mut self) -> Emit {
        self.out.need_space()
    }

    #[inline]
    fn newline(&mut self) {
        self.out.newline(true);
    }

    /// End the current line. A line holding only indentation is cut back
    /// to its start instead.
    fn end_line(&mut self) {
        if self.out.is_whitespace_line() {
            self.out.to_line_start();
        } else {
            self.newline();
        }
    }

    #[inline]
    fn to_left_margin(&mut self) -> Emit {
        self.out.to_left_margin()
    }

    #[inline]
    fn left_margin(&self) -> usize {
        self.out.left_margin()
    }

    /// Column of wrapped continuation lines.
    #[inline]
    fn continuation_column(&self) -> usize {
        self.out.left_margin() + self.style.continuation_indent()
    }

    /// Column for wrapped items: the first item's column when aligned,
    /// otherwise the continuation indent.
    fn wrap_column(&self, align: bool, first_item: usize) -> usize {
        if align {
            first_item
        } else {
            self.continuation_column()
        }
    }

    /// Indent one step; returns the previous margin for [`Self::undent`].
    fn indent(&mut self) -> usize {
        self.out.indent(self.style.indent_size())
    }

    fn undent(&mut self, old: usize) {
        self.out.set_left_margin(old);
    }

    fn record_span(&mut self, id: NodeId, start: usize) {
        if let Some(&tag) = self.tags.get(&id) {
            let offset = self.initial_offset;
            self.spans
                .insert(tag, start + offset..self.out.len() + offset);
        }
    }

    // Trees

    /// Print any node: parenthesize it if the context binds tighter, copy it
    /// verbatim when possible, otherwise generate it with its comments.
    pub(crate) fn print_tree(&mut self, id: NodeId, cx: PrintContext) -> Emit {
        self.print_tree_with(id, cx, true)
    }

    /// Print a node from the tree alone, never from the original text.
    fn print_tree_generated(&mut self, id: NodeId, cx: PrintContext) -> Emit {
        self.print_tree_with(id, cx, false)
    }

    fn print_tree_with(&mut self, id: NodeId, cx: PrintContext, allow_copy: bool) -> Emit {
        let tree = self.tree;
        let Some(node) = tree.try_get(id) else {
            return Ok(());
        };
        if tokens::precedence(&node.kind) < cx.prec {
            self.print("(")?;
            self.print_tree_with(id, cx.with_prec(prec::NONE), allow_copy)?;
            return self.print(")");
        }
        if allow_copy && self.try_print_original(&[id], cx.comments)? {
            return Ok(());
        }
        if cx.comments {
            self.print_preceding_comments(id)?;
        }
        let start = self.out.len();
        self.print_kind(id, &node.kind, cx)?;
        self.record_span(id, start);
        if cx.comments {
            self.print_inner_comments_as_trailing(id)?;
            self.print_trailing_comments(id)?;
        }
        Ok(())
    }

    fn print_kind(&mut self, id: NodeId, kind: &'a NodeKind, cx: PrintContext) -> Emit {
        match kind {
            NodeKind::CompilationUnit {
                package,
                imports,
                types,
            } => self.print_unit(*package, imports, types, cx),
            NodeKind::Package { annotations, name } => self.print_package(annotations, name, cx),
            NodeKind::Import { name, is_static } => self.print_import(name, *is_static),
            NodeKind::Class(class) => self.print_class(id, class, cx),
            NodeKind::Method(method) => self.print_method(method, cx),
            NodeKind::Variable(var) => self.print_variable(var, cx),
            NodeKind::EnumConstant {
                annotations,
                name,
                args,
                body,
            } => self.print_enum_constant(id, annotations, name, args, body.as_deref(), cx),
            NodeKind::Annotation { ty, args } => self.print_annotation(*ty, args, cx),
            NodeKind::TypeParameter { name, bounds } => self.print_type_parameter(name, bounds, cx),
            NodeKind::Module {
                annotations,
                open,
                name,
                directives,
            } => self.print_module(id, annotations, *open, name, directives, cx),
            NodeKind::Requires {
                is_static,
                transitive,
                name,
            } => self.print_requires(*is_static, *transitive, name),
            NodeKind::Exports { package, modules } => self.print_exports("exports", package, modules),
            NodeKind::Opens { package, modules } => self.print_exports("opens", package, modules),
            NodeKind::Uses(service) => {
                self.print("uses ")?;
                self.print_tree(*service, cx.with_prec(prec::NONE))?;
                self.print(";")
            }
            NodeKind::Provides {
                service,
                implementations,
            } => self.print_provides(*service, implementations, cx),

            NodeKind::Block { stmts, is_static } => self.print_block_stmt(id, stmts, *is_static, cx),
            NodeKind::Empty => self.print(";"),
            NodeKind::ExprStmt(expr) => {
                self.print_tree(*expr, cx.with_prec(prec::NONE))?;
                self.print(";")
            }
            NodeKind::If {
                cond,
                then_stmt,
                else_stmt,
            } => self.print_if(*cond, *then_stmt, *else_stmt, cx),
            NodeKind::While { cond, body } => self.print_while(*cond, *body, cx),
            NodeKind::DoWhile { body, cond } => self.print_do_while(*body, *cond, cx),
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => self.print_for(init, *cond, step, *body, cx),
            NodeKind::ForEach {
                var,
                iterable,
                body,
            } => self.print_for_each(*var, *iterable, *body, cx),
            NodeKind::Labeled { label, body } => self.print_labeled(label, *body, cx),
            NodeKind::Switch { selector, cases } | NodeKind::SwitchExpr { selector, cases } => {
                self.print_switch(*selector, cases, cx)
            }
            NodeKind::Case {
                labels,
                guard,
                arrow,
                body,
            } => self.print_case(labels, *guard, *arrow, body, cx),
            NodeKind::Synchronized { lock, body } => self.print_synchronized(*lock, *body, cx),
            NodeKind::Try {
                resources,
                body,
                catches,
                finally,
            } => self.print_try(resources, *body, catches, *finally, cx),
            NodeKind::Catch { param, body } => self.print_catch(*param, *body, cx),
            NodeKind::Return(expr) => {
                self.print("return")?;
                if let Some(expr) = expr {
                    self.need_space()?;
                    self.print_tree(*expr, cx.with_prec(prec::NONE))?;
                }
                self.print(";")
            }
            NodeKind::Throw(expr) => {
                self.print("throw ")?;
                self.print_tree(*expr, cx.with_prec(prec::NONE))?;
                self.print(";")
            }
            NodeKind::Break(label) => self.print_jump("break", label.as_deref()),
            NodeKind::Continue(label) => self.print_jump("continue", label.as_deref()),
            NodeKind::Yield(expr) => {
                self.print("yield")?;
                self.need_space()?;
                self.print_tree(*expr, cx.with_prec(prec::NONE))?;
                self.print(";")
            }
            NodeKind::Assert { cond, detail } => self.print_assert(*cond, *detail, cx),

            NodeKind::Ident(name) => self.print(name),
            NodeKind::Literal(literal) => self.print_literal(id, literal),
            NodeKind::FieldAccess { target, name } => {
                self.print_tree(*target, cx.with_prec(prec::POSTFIX))?;
                self.print(".")?;
                self.print(name)
            }
            NodeKind::MethodCall {
                target,
                type_args,
                name,
                args,
            } => self.print_method_call(*target, type_args, name, args, cx),
            NodeKind::NewClass {
                outer,
                type_args,
                class,
                args,
                body,
            } => self.print_new_class(id, *outer, type_args, *class, args, body.as_deref(), cx),
            NodeKind::NewArray {
                elem_type,
                dims,
                extra_dims,
                init,
            } => self.print_new_array(*elem_type, dims, *extra_dims, init.as_deref(), cx),
            NodeKind::Parens(expr) => {
                let within = self.style.spacing.within_parens;
                self.print(tokens::open_paren(within))?;
                self.print_tree(*expr, cx.with_prec(prec::NONE))?;
                self.print(tokens::close_paren(within))
            }
            NodeKind::Assign { lhs, rhs } => self.print_assign(*lhs, *rhs, cx),
            NodeKind::CompoundAssign { op, lhs, rhs } => {
                self.print_compound_assign(*op, *lhs, *rhs, cx)
            }
            NodeKind::Unary { op, operand } => self.print_unary(*op, *operand, cx),
            NodeKind::Binary { op, lhs, rhs } => self.print_binary(*op, *lhs, *rhs, cx),
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => self.print_conditional(*cond, *then_expr, *else_expr, cx),
            NodeKind::Cast { ty, expr } => {
                let spacing = &self.style.spacing;
                let within = spacing.within_type_cast_parens;
                let after = spacing.after_type_cast;
                self.print(tokens::open_paren(within))?;
                self.print_tree(*ty, cx.with_prec(prec::NONE))?;
                self.print(tokens::close_paren(within))?;
                if after {
                    self.need_space()?;
                }
                self.print_tree(*expr, cx.with_prec(prec::PREFIX))
            }
            NodeKind::InstanceOf { expr, ty } => {
                self.print_tree(*expr, cx.with_prec(prec::ORDERING))?;
                self.print(" instanceof ")?;
                self.print_tree(*ty, cx.with_prec(prec::NONE))
            }
            NodeKind::ArrayAccess { array, index } => {
                self.print_tree(*array, cx.with_prec(prec::POSTFIX))?;
                self.print("[")?;
                self.print_tree(*index, cx.with_prec(prec::NONE))?;
                self.print("]")
            }
            NodeKind::Lambda { params, body } => self.print_lambda(params, *body, cx),
            NodeKind::MemberRef { target, name } => {
                self.print_tree(*target, cx.with_prec(prec::POSTFIX))?;
                self.print(tokens::method_ref_colons(&self.style.spacing))?;
                self.print(name)
            }

            NodeKind::BindingPattern(var) => {
                self.print_tree(*var, cx.in_params().with_prec(prec::NONE))
            }
            NodeKind::RecordPattern {
                deconstructor,
                nested,
            } => {
                self.print_tree(*deconstructor, cx.with_prec(prec::NONE))?;
                self.print("(")?;
                self.print_separated(nested, tokens::Separator::comma(&self.style.spacing), cx)?;
                self.print(")")
            }

            NodeKind::PrimitiveType(kind) => self.print(kind.keyword()),
            NodeKind::NameRef { written, .. } => {
                let names = self.names;
                self.print(names.get(id).unwrap_or(written))
            }
            NodeKind::ArrayType(elem) => {
                self.print_tree(*elem, cx.with_prec(prec::NONE))?;
                self.print("[]")
            }
            NodeKind::ParameterizedType { base, args } => {
                self.print_tree(*base, cx.with_prec(prec::NONE))?;
                self.print_type_args(args, cx)
            }
            NodeKind::Wildcard { bound } => {
                self.print("?")?;
                if let Some((kind, ty)) = bound {
                    self.print(" ")?;
                    self.print(kind.keyword())?;
                    self.print(" ")?;
                    self.print_tree(*ty, cx.with_prec(prec::NONE))?;
                }
                Ok(())
            }
            NodeKind::UnionType(alternatives) => {
                let separator = tokens::Separator::union(&self.style.spacing);
                let column = self.out.column();
                let indent = self.wrap_column(self.style.alignment.union_types, column);
                self.wrap_trees(alternatives, self.style.wrap.union_types, indent, false, separator, cx)
            }
            NodeKind::IntersectionType(bounds) => {
                let separator = tokens::Separator::intersection(&self.style.spacing);
                self.print_separated(bounds, separator, cx)
            }
            NodeKind::AnnotatedType { annotations, ty } => {
                self.print_annotations(annotations, cx.in_params())?;
                self.print_tree(*ty, cx.with_prec(prec::NONE))
            }
            NodeKind::Erroneous(text) => self.print(text),
        }
    }

    /// Items joined by `separator` without any wrapping.
    fn print_separated(
        &mut self,
        items: &[NodeId],
        separator: tokens::Separator,
        cx: PrintContext,
    ) -> Emit {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.space_if(separator.space_before)?;
                self.print(separator.text)?;
                self.space_if(separator.space_after)?;
            }
            self.print_tree(item, cx.with_prec(prec::NONE))?;
        }
        Ok(())
    }

    /// `<A, B>` when `args` is non-empty.
    fn print_type_args(&mut self, args: &[NodeId], cx: PrintContext) -> Emit {
        if args.is_empty() {
            return Ok(());
        }
        self.print("<")?;
        self.print_separated(args, tokens::Separator::comma(&self.style.spacing), cx)?;
        self.print(">")
    }

    fn print_jump(&mut self, keyword: &str, label: Option<&str>) -> Emit {
        self.print(keyword)?;
        if let Some(label) = label {
            self.need_space()?;
            self.print(label)?;
        }
        self.print(";")
    }

    /// Literals read from the source keep their spelling (`0x1F`, `1_000L`).
    fn print_literal(&mut self, id: NodeId, literal: &javelin_ir::Literal) -> Emit {
        let source = self.original.text;
        if let Some(text) = self
            .tree
            .span(id)
            .and_then(|span| source.get(span.to_range()))
        {
            return self.print(text);
        }
        self.print(&tokens::literal_text(literal))
    }
}
