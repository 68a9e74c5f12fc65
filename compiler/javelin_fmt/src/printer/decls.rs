//! Declarations: compilation unit, imports, classes, members.

use javelin_ir::{prec, ClassDecl, ClassKind, MethodDecl, Modifiers, NodeId, NodeKind, VariableDecl};

use super::stmts::BlockLayout;
use super::{PrintContext, Printer};
use crate::buffer::Emit;
use crate::config::WrapStyle;
use crate::tokens::Separator;

/// One line of the import block.
#[derive(Copy, Clone, Debug)]
enum ImportLine<'t> {
    Existing(NodeId),
    Added(&'t str),
}

impl<'a> Printer<'a> {
    pub(super) fn print_unit(
        &mut self,
        package: Option<NodeId>,
        imports: &'a [NodeId],
        types: &'a [NodeId],
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let counts = &style.blank_lines;
        if let Some(package) = package {
            self.out.blank_lines(counts.before_package);
            self.print_tree(package, cx)?;
            self.out.blank_lines(counts.after_package);
        }

        let lines = self.merged_imports(imports);
        if !lines.is_empty() {
            let before = if package.is_some() {
                counts.before_imports.max(counts.after_package)
            } else {
                counts.before_imports
            };
            self.out.blank_lines(before);
            let mut last_group = None;
            for line in lines {
                let (name, is_static) = self.import_key(line);
                let group = style.imports.group_of(name, is_static);
                if last_group.is_some() && group != last_group {
                    self.out.blank_lines(1);
                }
                last_group = group;
                match line {
                    ImportLine::Existing(id) => self.print_stat(id, true, false, false, cx)?,
                    ImportLine::Added(name) => self.print_import(name, false)?,
                }
                self.newline();
            }
            if !types.is_empty() {
                self.out.blank_lines(counts.after_imports);
            }
        }

        for (i, &ty) in types.iter().enumerate() {
            let first = i == 0 && self.out.is_empty();
            self.print_stat(ty, first, false, true, cx)?;
        }
        Ok(())
    }

    fn import_key(&self, line: ImportLine<'a>) -> (&'a str, bool) {
        let tree = self.tree;
        match line {
            ImportLine::Existing(id) => match tree.kind(id) {
                NodeKind::Import { name, is_static } => (name.as_str(), *is_static),
                _ => ("", false),
            },
            ImportLine::Added(name) => (name, false),
        }
    }

    /// Existing imports in tree order with the added ones inserted before
    /// the first import that sorts after them (static imports last).
    fn merged_imports(&self, imports: &'a [NodeId]) -> Vec<ImportLine<'a>> {
        let mut lines: Vec<ImportLine<'a>> =
            imports.iter().map(|&id| ImportLine::Existing(id)).collect();
        let mut added: Vec<&'a str> = self.added_imports.iter().map(String::as_str).collect();
        added.sort_unstable();
        for name in added {
            let at = lines
                .iter()
                .position(|&line| {
                    let (other, is_static) = self.import_key(line);
                    is_static || other > name
                })
                .unwrap_or(lines.len());
            lines.insert(at, ImportLine::Added(name));
        }
        lines
    }

    pub(super) fn print_package(
        &mut self,
        annotations: &[NodeId],
        name: &str,
        cx: PrintContext,
    ) -> Emit {
        self.print_annotations(annotations, cx)?;
        self.print("package ")?;
        self.print(name)?;
        self.print(";")
    }

    pub(super) fn print_import(&mut self, name: &str, is_static: bool) -> Emit {
        self.print("import ")?;
        if is_static {
            self.print("static ")?;
        }
        self.print(name)?;
        self.print(";")
    }

    // Modules

    pub(super) fn print_module(
        &mut self,
        id: NodeId,
        annotations: &[NodeId],
        open: bool,
        name: &str,
        directives: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        self.to_left_margin()?;
        self.print_annotations(annotations, cx)?;
        if open {
            self.print("open ")?;
        }
        self.print("module ")?;
        self.print(name)?;

        let old = self.indent();
        let brace_column = self.place_open_brace(style.braces.module_decl, old)?;
        if style.spacing.before_module_decl_left_brace {
            self.need_space()?;
        }
        self.print("{")?;
        if directives.is_empty() {
            self.print_inner_comments(id)?;
        } else {
            self.print_inner_comments_as_trailing(id)?;
            self.out.blank_lines(style.blank_lines.after_module_header);
            if !self.try_print_original(directives, true)? {
                for (i, &directive) in directives.iter().enumerate() {
                    self.print_stat(directive, i == 0, true, true, cx)?;
                }
            }
            self.out
                .blank_lines(style.blank_lines.before_module_closing_brace);
        }
        self.out.to_column(brace_column)?;
        self.undent(old);
        self.print("}")
    }

    pub(super) fn print_requires(&mut self, is_static: bool, transitive: bool, name: &str) -> Emit {
        self.print("requires ")?;
        if is_static {
            self.print("static ")?;
        }
        if transitive {
            self.print("transitive ")?;
        }
        self.print(name)?;
        self.print(";")
    }

    /// `exports` or `opens`, qualified by target modules when there are any.
    pub(super) fn print_exports(&mut self, keyword: &str, package: &str, modules: &[String]) -> Emit {
        let style = self.style;
        self.print(keyword)?;
        self.print(" ")?;
        self.print(package)?;
        if !modules.is_empty() {
            self.wrap_keyword("to ", style.wrap.exports_to_keyword)?;
            let column = self.out.column();
            let indent = self.wrap_column(style.alignment.exports, column);
            self.wrap_names(modules, style.wrap.exports_to_list, indent)?;
        }
        self.print(";")
    }

    pub(super) fn print_provides(
        &mut self,
        service: NodeId,
        implementations: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        self.print("provides ")?;
        self.print_tree(service, cx.with_prec(prec::NONE))?;
        self.wrap_keyword("with ", style.wrap.provides_with_keyword)?;
        let column = self.out.column();
        let indent = self.wrap_column(style.alignment.provides, column);
        self.wrap_trees(
            implementations,
            style.wrap.provides_with_list,
            indent,
            false,
            Separator::comma(&style.spacing),
            cx,
        )?;
        self.print(";")
    }

    // Modifiers and annotations

    /// Modifier keywords, then a space (or a line break when configured).
    pub(super) fn print_flags(&mut self, flags: Modifiers, cx: PrintContext) -> Emit {
        let mut any = false;
        for keyword in flags.keywords() {
            if any {
                self.print(" ")?;
            }
            self.print(keyword)?;
            any = true;
        }
        if !any {
            return Ok(());
        }
        if self.style.placement.new_line_after_modifiers && !cx.in_params {
            self.to_left_margin()
        } else {
            self.need_space()
        }
    }

    /// Declaration annotations: wrapped between each other per style, and
    /// followed by a line break. Parameter annotations stay inline.
    pub(super) fn print_annotations(&mut self, annotations: &[NodeId], cx: PrintContext) -> Emit {
        if annotations.is_empty() {
            return Ok(());
        }
        let expr = cx.with_prec(prec::NONE);
        if cx.in_params {
            for &annotation in annotations {
                self.print_tree(annotation, expr)?;
                self.print(" ")?;
            }
            return Ok(());
        }
        for (i, &annotation) in annotations.iter().enumerate() {
            if i > 0 {
                match self.style.wrap.annotations {
                    WrapStyle::IfLong if self.fits(self.estimate(annotation), true) => {
                        self.print(" ")?;
                    }
                    WrapStyle::IfLong | WrapStyle::Always => {
                        let margin = self.left_margin();
                        self.wrap_to(margin)?;
                    }
                    WrapStyle::Never => self.print(" ")?,
                }
            }
            self.print_tree(annotation, expr)?;
        }
        self.to_left_margin()
    }

    pub(super) fn print_annotation(&mut self, ty: NodeId, args: &[NodeId], cx: PrintContext) -> Emit {
        let style = self.style;
        self.print("@")?;
        self.print_tree(ty, cx.with_prec(prec::NONE))?;
        if args.is_empty() {
            return Ok(());
        }
        let within = style.spacing.within_annotation_parens;
        self.space_if(style.spacing.before_annotation_paren)?;
        self.print(if within { "( " } else { "(" })?;
        let indent = self.continuation_column();
        self.wrap_trees(
            args,
            style.wrap.annotation_args,
            indent,
            false,
            Separator::comma(&style.spacing),
            cx,
        )?;
        self.print(if within { " )" } else { ")" })
    }

    pub(super) fn print_type_parameter(
        &mut self,
        name: &str,
        bounds: &[NodeId],
        cx: PrintContext,
    ) -> Emit {
        self.print(name)?;
        if bounds.is_empty() {
            return Ok(());
        }
        self.print(" extends ")?;
        self.print_separated(bounds, Separator::intersection(&self.style.spacing), cx)
    }

    // Classes

    pub(super) fn print_class(&mut self, id: NodeId, class: &'a ClassDecl, cx: PrintContext) -> Emit {
        let style = self.style;
        self.to_left_margin()?;
        self.print_annotations(&class.annotations, cx)?;

        let mut flags = class.modifiers - Modifiers::ABSTRACT;
        if class.kind == ClassKind::Enum {
            flags -= Modifiers::FINAL;
        }
        self.print_flags(flags, cx)?;
        if class.kind == ClassKind::Class && class.modifiers.contains(Modifiers::ABSTRACT) {
            self.print("abstract ")?;
        }

        if class.kind == ClassKind::Annotation {
            self.print("@")?;
        }
        self.print(class.kind.keyword())?;
        self.print(" ")?;
        self.print(&class.name)?;
        self.print_type_args(&class.type_params, cx)?;
        match class.kind {
            ClassKind::Interface | ClassKind::Annotation => {
                self.print_supertypes("extends ", &class.implements, cx)?;
            }
            ClassKind::Class | ClassKind::Enum => {
                if let Some(extends) = class.extends {
                    self.wrap_keyword("extends ", style.wrap.extends_implements_keyword)?;
                    self.print_tree(extends, cx.with_prec(prec::NONE))?;
                }
                self.print_supertypes("implements ", &class.implements, cx)?;
            }
        }

        let nested = cx.enclosing_class.is_some();
        let old = if nested || style.margins.indent_top_level_class_members {
            self.indent()
        } else {
            self.left_margin()
        };
        let brace_column = self.place_open_brace(style.braces.class_decl, old)?;
        if style.spacing.before_class_decl_left_brace {
            self.need_space()?;
        }
        self.print("{")?;

        let members = class.members.as_slice();
        if members.is_empty() {
            self.print_inner_comments(id)?;
        } else {
            self.print_inner_comments_as_trailing(id)?;
            self.out.blank_lines(style.blank_lines.after_class_header);
            let inner = cx.in_class(id);
            if !self.try_print_original(members, true)? {
                self.print_members(class.kind, members, inner)?;
            }
            self.out
                .blank_lines(style.blank_lines.before_class_closing_brace);
        }
        self.out.to_column(brace_column)?;
        self.undent(old);
        self.print("}")
    }

    fn print_supertypes(&mut self, keyword: &str, types: &[NodeId], cx: PrintContext) -> Emit {
        if types.is_empty() {
            return Ok(());
        }
        let style = self.style;
        self.wrap_keyword(keyword, style.wrap.extends_implements_keyword)?;
        let column = self.out.column();
        let indent = self.wrap_column(style.alignment.implements, column);
        self.wrap_trees(
            types,
            style.wrap.extends_implements_list,
            indent,
            false,
            Separator::comma(&style.spacing),
            cx,
        )
    }

    /// Members of a class body. The leading constants of an enum print as
    /// one group.
    fn print_members(&mut self, kind: ClassKind, members: &[NodeId], cx: PrintContext) -> Emit {
        let tree = self.tree;
        let mut rest = members;
        let mut first = true;
        if kind == ClassKind::Enum {
            let count = members
                .iter()
                .take_while(|&&m| matches!(tree.kind(m), NodeKind::EnumConstant { .. }))
                .count();
            let (constants, others) = members.split_at(count);
            if !constants.is_empty() {
                self.print_enum_constants(constants, !others.is_empty(), cx)?;
                self.newline();
                first = false;
            }
            rest = others;
        }
        for &member in rest {
            self.print_stat(member, first, true, true, cx)?;
            first = false;
        }
        Ok(())
    }

    fn print_enum_constants(
        &mut self,
        constants: &[NodeId],
        semicolon: bool,
        cx: PrintContext,
    ) -> Emit {
        let style = self.style;
        let spacing = &style.spacing;
        for (i, &constant) in constants.iter().enumerate() {
            let mut column = i == 0;
            if i > 0 {
                self.print(if spacing.before_comma { " ," } else { "," })?;
                match style.wrap.enum_constants {
                    WrapStyle::IfLong if self.fits(self.estimate(constant), true) => {
                        self.space_if(spacing.after_comma)?;
                    }
                    WrapStyle::IfLong | WrapStyle::Always => {
                        self.newline();
                        column = true;
                    }
                    WrapStyle::Never => self.space_if(spacing.after_comma)?,
                }
            }
            self.print_stat(constant, false, column, false, cx)?;
        }
        if semicolon {
            self.print(";")?;
        }
        Ok(())
    }

    pub(super) fn print_enum_constant(
        &mut self,
        id: NodeId,
        annotations: &[NodeId],
        name: &str,
        args: &[NodeId],
        body: Option<&[NodeId]>,
        cx: PrintContext,
    ) -> Emit {
        self.print_annotations(annotations, cx)?;
        self.print(name)?;
        if !args.is_empty() {
            self.print_call_args(args, cx)?;
        }
        if let Some(body) = body {
            let layout = BlockLayout {
                placement: self.style.braces.other,
                space_before: self.style.spacing.before_class_decl_left_brace,
                members: true,
                comments: false,
            };
            self.print_block(None, body, layout, cx.in_class(id))?;
        }
        Ok(())
    }

    // Members

    pub(super) fn print_method(&mut self, method: &'a MethodDecl, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let style = self.style;
        let spacing = &style.spacing;
        let comma = Separator::comma(spacing);
        self.print_annotations(&method.annotations, cx)?;
        self.print_flags(method.modifiers, cx)?;
        if !method.type_params.is_empty() {
            self.print_type_args(&method.type_params, cx)?;
            self.need_space()?;
        }
        match method.return_type {
            Some(ty) => {
                self.print_tree(ty, cx.with_prec(prec::NONE))?;
                self.need_space()?;
                self.print(&method.name)?;
            }
            None => {
                let name = match cx.enclosing_class.map(|class| tree.kind(class)) {
                    Some(NodeKind::Class(class)) => class.name.as_str(),
                    _ => method.name.as_str(),
                };
                self.print(name)?;
            }
        }

        self.print(if spacing.before_method_decl_paren { " (" } else { "(" })?;
        let within = spacing.within_method_decl_parens && !method.params.is_empty();
        self.space_if(within)?;
        let column = self.out.column();
        let indent = self.wrap_column(style.alignment.method_params, column);
        self.wrap_trees(
            &method.params,
            style.wrap.method_params,
            indent,
            true,
            comma,
            cx.in_params(),
        )?;
        if within {
            self.need_space()?;
        }
        self.print(")")?;

        if !method.throws.is_empty() {
            self.wrap_keyword("throws ", style.wrap.throws_keyword)?;
            let column = self.out.column();
            let indent = self.wrap_column(style.alignment.throws, column);
            self.wrap_trees(&method.throws, style.wrap.throws_list, indent, true, comma, cx)?;
        }

        match &method.body {
            Some(body) => {
                let stmts = match tree.kind(*body) {
                    NodeKind::Block { stmts, .. } => stmts.as_slice(),
                    _ => std::slice::from_ref(body),
                };
                let layout = BlockLayout {
                    placement: style.braces.method_decl,
                    space_before: spacing.before_method_decl_left_brace,
                    members: false,
                    comments: true,
                };
                self.print_block(Some(*body), stmts, layout, cx.statement())
            }
            None => {
                if let Some(value) = method.default_value {
                    self.print(" default ")?;
                    self.print_tree(value, cx.with_prec(prec::NONE))?;
                }
                self.print(";")
            }
        }
    }

    pub(super) fn print_variable(&mut self, var: &'a VariableDecl, cx: PrintContext) -> Emit {
        let tree = self.tree;
        let expr = cx.with_prec(prec::NONE);
        self.print_annotations(&var.annotations, cx)?;
        self.print_flags(var.modifiers, cx)?;
        if let Some(ty) = var.ty {
            match (var.varargs, tree.kind(ty)) {
                (true, NodeKind::ArrayType(elem)) => {
                    self.print_tree(*elem, expr)?;
                    self.print("...")?;
                }
                (true, _) => {
                    self.print_tree(ty, expr)?;
                    self.print("...")?;
                }
                (false, _) => self.print_tree(ty, expr)?,
            }
            self.need_space()?;
        }
        self.print(&var.name)?;
        if let Some(init) = var.init {
            let column = self.out.column().saturating_sub(var.name.len());
            self.wrap_assign_op("=", column, |p| p.print_tree(init, expr))?;
        }
        if cx.prec == prec::NOT_EXPRESSION {
            self.print(";")?;
        }
        Ok(())
    }
}
