//! Blank lines around declarations.

use javelin_ir::{NodeId, NodeKind};

use super::{PrintContext, Printer};
use crate::buffer::Emit;

impl<'a> Printer<'a> {
    /// Members of a class body, anonymous class body or enum constant body.
    pub(super) fn class_members(&self, class: NodeId) -> &'a [NodeId] {
        let tree = self.tree;
        match tree.kind(class) {
            NodeKind::Class(decl) => &decl.members,
            NodeKind::NewClass {
                body: Some(body), ..
            }
            | NodeKind::EnumConstant {
                body: Some(body), ..
            } => body,
            _ => &[],
        }
    }

    fn is_anonymous(&self, class: NodeId) -> bool {
        matches!(
            self.tree.kind(class),
            NodeKind::NewClass { .. } | NodeKind::EnumConstant { .. }
        )
    }

    /// Normalize blank lines before (`before`) or after a declaration.
    ///
    /// Classes use the class counts. Methods and fields use their own
    /// counts, except next to the braces of the enclosing body, where the
    /// header and closing-brace counts apply. Other nodes are left alone.
    pub(super) fn blank_lines_for(&mut self, id: NodeId, before: bool, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let counts = &style.blank_lines;
        match tree.kind(id) {
            NodeKind::Class(class) => {
                if !before && !class.members.is_empty() {
                    return Ok(());
                }
                let n = if before {
                    counts.before_class
                } else {
                    counts.after_class
                };
                self.out.blank_lines(n);
                self.to_left_margin()
            }
            NodeKind::Method(_) => {
                let Some(class) = cx.enclosing_class else {
                    return Ok(());
                };
                let members = self.class_members(class);
                if !members.contains(&id) {
                    return Ok(());
                }
                let anonymous = self.is_anonymous(class);
                let n = match (before, anonymous) {
                    (true, _) if members.first() != Some(&id) => counts.before_methods,
                    (false, _) if members.last() != Some(&id) => counts.after_methods,
                    (true, true) => counts.after_anonymous_class_header,
                    (true, false) => counts.after_class_header,
                    (false, true) => counts.before_anonymous_class_closing_brace,
                    (false, false) => counts.before_class_closing_brace,
                };
                self.out.blank_lines(n);
                self.to_left_margin()
            }
            NodeKind::Variable(_) => {
                let Some(class) = cx.enclosing_class else {
                    return Ok(());
                };
                let members = self.class_members(class);
                if self.is_anonymous(class) || !members.contains(&id) {
                    return Ok(());
                }
                let n = if before {
                    if members.first() == Some(&id) {
                        counts.after_class_header
                    } else {
                        counts.before_fields
                    }
                } else if members.last() == Some(&id) {
                    counts.before_class_closing_brace
                } else {
                    counts.after_fields
                };
                self.out.blank_lines(n);
                if before {
                    self.to_left_margin()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
