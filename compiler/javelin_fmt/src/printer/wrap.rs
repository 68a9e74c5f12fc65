//! Line-wrap decisions.
//!
//! Two strategies: lists, operators and keywords ask the width estimator
//! whether the next piece fits; single trees (initializers, unbraced
//! statement bodies) are rendered speculatively against a hard margin and
//! re-rendered on a new line when they overflow.

use javelin_ir::{prec, NodeId};

use super::{PrintContext, Printer};
use crate::buffer::{Emit, Overflow};
use crate::config::WrapStyle;
use crate::tokens::Separator;

impl Printer<'_> {
    /// Break the line and move to `column`.
    pub(super) fn wrap_to(&mut self, column: usize) -> Emit {
        self.newline();
        self.out.to_column(column)
    }

    /// Whether `width` more columns (plus an optional space) still fit
    /// before the right margin.
    pub(super) fn fits(&self, width: usize, space: bool) -> bool {
        self.out
            .column()
            .saturating_add(width)
            .saturating_add(usize::from(space))
            <= self.out.right_margin()
    }

    /// Estimated width of `id` from the current column.
    pub(super) fn estimate(&self, id: NodeId) -> usize {
        let budget = self.out.right_margin().saturating_sub(self.out.column());
        self.estimator.estimate(id, budget)
    }

    /// Print `items` joined by `separator`, breaking before items per
    /// `style`. The first item is considered only with `wrap_first`, and
    /// then at most as `IfLong`.
    pub(super) fn wrap_trees(
        &mut self,
        items: &[NodeId],
        style: WrapStyle,
        wrap_indent: usize,
        wrap_first: bool,
        separator: Separator,
        cx: PrintContext,
    ) -> Emit {
        for (i, &item) in items.iter().enumerate() {
            let first = i == 0;
            if !first {
                self.space_if(separator.space_before)?;
                self.print(separator.text)?;
            }
            if !first || wrap_first {
                let space = separator.space_after && !first;
                let effective = if first && style != WrapStyle::Never {
                    WrapStyle::IfLong
                } else {
                    style
                };
                match effective {
                    WrapStyle::IfLong if self.fits(self.estimate(item), space) => {
                        self.space_if(space)?;
                    }
                    WrapStyle::IfLong | WrapStyle::Always => self.wrap_to(wrap_indent)?,
                    WrapStyle::Never => self.space_if(space)?,
                }
            }
            self.print_tree(item, cx.with_prec(prec::NONE))?;
        }
        Ok(())
    }

    /// Dotted names joined by commas, breaking before names per `style`.
    pub(super) fn wrap_names(&mut self, names: &[String], style: WrapStyle, wrap_indent: usize) -> Emit {
        let separator = Separator::comma(&self.style.spacing);
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.space_if(separator.space_before)?;
                self.print(separator.text)?;
                let space = separator.space_after;
                match style {
                    WrapStyle::IfLong if self.fits(name.len(), space) => self.space_if(space)?,
                    WrapStyle::IfLong | WrapStyle::Always => self.wrap_to(wrap_indent)?,
                    WrapStyle::Never => self.space_if(space)?,
                }
            }
            self.print(name)?;
        }
        Ok(())
    }

    /// A space or a line break before `keyword`, then the keyword.
    pub(super) fn wrap_keyword(&mut self, keyword: &str, style: WrapStyle) -> Emit {
        match style {
            WrapStyle::IfLong if self.fits(keyword.len(), false) => self.print(" ")?,
            WrapStyle::IfLong | WrapStyle::Always => {
                let column = self.continuation_column();
                self.wrap_to(column)?;
            }
            WrapStyle::Never => self.print(" ")?,
        }
        self.print(keyword)
    }

    /// Render `print` inline, or on a new line at `column_after_wrap`.
    ///
    /// `IfLong` first renders inline with the hard margin set; on
    /// [`Overflow`] the buffer and the comment journal are rolled back and
    /// the wrapped form is printed instead.
    pub(super) fn wrap_tree(
        &mut self,
        style: WrapStyle,
        space_before: bool,
        column_after_wrap: usize,
        mut print: impl FnMut(&mut Self) -> Emit,
    ) -> Emit {
        match style {
            WrapStyle::Never => {
                if space_before {
                    self.need_space()?;
                }
                print(self)
            }
            WrapStyle::IfLong => {
                let prev = self.out.harden();
                let mark = self.out.mark();
                let journal = self.handled.mark();
                let attempt = if space_before {
                    self.need_space().and_then(|()| print(self))
                } else {
                    print(self)
                };
                self.out.restore(prev);
                match attempt {
                    Ok(()) => Ok(()),
                    Err(Overflow) => {
                        self.out.rollback(mark);
                        self.handled.rollback(journal);
                        tracing::trace!(column = column_after_wrap, "inline render overflowed, wrapping");
                        self.wrap_always(column_after_wrap, print)
                    }
                }
            }
            WrapStyle::Always => self.wrap_always(column_after_wrap, print),
        }
    }

    fn wrap_always(&mut self, column: usize, mut print: impl FnMut(&mut Self) -> Emit) -> Emit {
        if self.out.column() > 0 {
            self.newline();
        }
        self.out.to_column(column)?;
        print(self)
    }

    /// An assignment operator followed by its right-hand side, wrapped per
    /// the assignment style. `column` is where the left-hand side started.
    pub(super) fn wrap_assign_op(
        &mut self,
        op: &str,
        column: usize,
        mut print: impl FnMut(&mut Self) -> Emit,
    ) -> Emit {
        let style = self.style;
        let around = style.spacing.around_assign_ops;
        let op_first = style.wrap.after_assign_ops;
        if op_first {
            self.space_if(around)?;
            self.print(op)?;
        }
        let column_after_wrap = self.wrap_column(style.alignment.assignment, column);
        self.wrap_tree(style.wrap.assign_ops, around, column_after_wrap, |p| {
            if !op_first {
                p.print(op)?;
                p.space_if(around)?;
            }
            print(p)
        })
    }
}
