//! Fragments of declaration headers.

use javelin_ir::{prec, ClassDecl, ClassKind, MethodDecl, Modifiers, NodeId, NodeKind, VariableDecl};

use super::{PrintContext, Printer};
use crate::buffer::{Emit, Overflow};
use crate::header::Placeholder;
use crate::tokens::Separator;

type Fragments = Vec<(Placeholder, String)>;

impl<'a> Printer<'a> {
    /// Print the header of `node` piece by piece, without comments or
    /// wrapping. Empty for nodes that are not declarations.
    pub(crate) fn header_fragments(&mut self, node: NodeId) -> Fragments {
        let tree = self.tree;
        let cx = PrintContext {
            comments: false,
            ..PrintContext::root()
        }
        .with_prec(prec::NONE);
        let mut parts = Fragments::new();
        match tree.kind(node) {
            NodeKind::Method(method) => self.method_fragments(node, method, cx, &mut parts),
            NodeKind::Class(class) => self.class_fragments(class, cx, &mut parts),
            NodeKind::Variable(var) => self.variable_fragments(var, cx, &mut parts),
            _ => {}
        }
        parts
    }

    fn method_fragments(
        &mut self,
        id: NodeId,
        method: &'a MethodDecl,
        cx: PrintContext,
        parts: &mut Fragments,
    ) {
        let tree = self.tree;
        let comma = Separator::comma(&self.style.spacing);
        self.push_common(&method.annotations, method.modifiers, cx, parts);
        match method.return_type {
            None => {
                let name = match tree.baseline_parent(id).map(|parent| tree.kind(parent)) {
                    Some(NodeKind::Class(class)) => class.name.clone(),
                    _ => method.name.clone(),
                };
                parts.push((Placeholder::Name, name));
            }
            Some(ty) => {
                if !method.type_params.is_empty() {
                    let text = self.fragment(|p| p.print_type_args(&method.type_params, cx));
                    parts.push((Placeholder::TypeParameters, text));
                }
                let text = self.fragment(|p| p.print_tree(ty, cx));
                parts.push((Placeholder::Type, text));
                parts.push((Placeholder::Name, method.name.clone()));
            }
        }
        let text = self.fragment(|p| {
            p.print("(")?;
            p.print_separated(&method.params, comma, cx.in_params())?;
            p.print(")")
        });
        parts.push((Placeholder::Parameters, text));
        if !method.throws.is_empty() {
            let text = self.fragment(|p| {
                p.print("throws ")?;
                p.print_separated(&method.throws, comma, cx)
            });
            parts.push((Placeholder::Throws, text));
        }
    }

    fn class_fragments(&mut self, class: &'a ClassDecl, cx: PrintContext, parts: &mut Fragments) {
        let comma = Separator::comma(&self.style.spacing);
        let interface = matches!(class.kind, ClassKind::Interface | ClassKind::Annotation);
        let implied = match class.kind {
            ClassKind::Interface | ClassKind::Annotation => Modifiers::ABSTRACT,
            ClassKind::Enum => Modifiers::FINAL,
            ClassKind::Class => Modifiers::empty(),
        };
        self.push_common(&class.annotations, class.modifiers - implied, cx, parts);
        parts.push((Placeholder::Name, class.name.clone()));
        if !class.type_params.is_empty() {
            let text = self.fragment(|p| p.print_type_args(&class.type_params, cx));
            parts.push((Placeholder::TypeParameters, text));
        }
        if let (false, Some(extends)) = (interface, class.extends) {
            let text = self.fragment(|p| {
                p.print("extends ")?;
                p.print_tree(extends, cx)
            });
            parts.push((Placeholder::Extends, text));
        }
        if !class.implements.is_empty() {
            let (placeholder, keyword) = if interface {
                (Placeholder::Extends, "extends ")
            } else {
                (Placeholder::Implements, "implements ")
            };
            let text = self.fragment(|p| {
                p.print(keyword)?;
                p.print_separated(&class.implements, comma, cx)
            });
            parts.push((placeholder, text));
        }
    }

    fn variable_fragments(&mut self, var: &'a VariableDecl, cx: PrintContext, parts: &mut Fragments) {
        self.push_common(&var.annotations, var.modifiers, cx, parts);
        if let Some(ty) = var.ty {
            let text = self.fragment(|p| p.print_tree(ty, cx));
            parts.push((Placeholder::Type, text));
        }
        parts.push((Placeholder::Name, var.name.clone()));
    }

    fn push_common(
        &mut self,
        annotations: &[NodeId],
        flags: Modifiers,
        cx: PrintContext,
        parts: &mut Fragments,
    ) {
        let text = self.fragment(|p| p.print_annotations(annotations, cx.in_params()));
        parts.push((Placeholder::Annotations, text));
        let text = self.fragment(|p| p.print_flags(flags, cx.in_params()));
        parts.push((Placeholder::Flags, text));
    }

    /// Text printed by `print`, trimmed, and removed from the buffer.
    fn fragment(&mut self, print: impl FnOnce(&mut Self) -> Emit) -> String {
        let start = self.out.len();
        if let Err(Overflow) = print(self) {
            tracing::warn!("overflow while printing a header fragment");
        }
        let text = self.out.as_str().get(start..).unwrap_or_default().trim().to_owned();
        self.out.trim(start);
        text
    }
}
