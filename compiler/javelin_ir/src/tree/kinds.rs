//! Node kinds.
//!
//! One closed sum type covers declarations, statements, expressions and types.
//! Child references are [`NodeId`]s into the same [`SyntaxTree`](super::SyntaxTree).

use super::ops::{BinaryOp, ClassKind, LiteralKind, PrimitiveKind, UnaryOp, WildcardBound};
use crate::{ElementId, Modifiers, NodeId};

/// A class, interface, enum or annotation type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<NodeId>,
    pub kind: ClassKind,
    pub name: String,
    pub type_params: Vec<NodeId>,
    pub extends: Option<NodeId>,
    /// `implements` list; for interfaces this is the `extends` list.
    pub implements: Vec<NodeId>,
    pub members: Vec<NodeId>,
    /// Symbol of the declared type, when known.
    pub element: Option<ElementId>,
}

/// A method or constructor declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<NodeId>,
    pub type_params: Vec<NodeId>,
    /// `None` for constructors.
    pub return_type: Option<NodeId>,
    pub name: String,
    /// [`NodeKind::Variable`] nodes.
    pub params: Vec<NodeId>,
    pub throws: Vec<NodeId>,
    /// `None` for abstract and native methods.
    pub body: Option<NodeId>,
    /// Annotation member default value.
    pub default_value: Option<NodeId>,
}

/// A field, local variable, parameter or resource declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<NodeId>,
    /// `None` for implicitly typed lambda parameters.
    pub ty: Option<NodeId>,
    pub name: String,
    pub init: Option<NodeId>,
    /// Variable arity parameter; `ty` is then the array type whose element
    /// type is printed followed by `...`.
    pub varargs: bool,
}

/// A literal value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Unquoted, unescaped value (`"a\nb"` is stored with a real newline).
    pub value: String,
}

/// Every syntactic construct the printer understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    // Declarations
    CompilationUnit {
        package: Option<NodeId>,
        imports: Vec<NodeId>,
        types: Vec<NodeId>,
    },
    Package {
        annotations: Vec<NodeId>,
        name: String,
    },
    /// `name` is the dotted import target, including a trailing `.*` for
    /// on-demand imports.
    Import {
        name: String,
        is_static: bool,
    },
    Class(ClassDecl),
    Method(MethodDecl),
    Variable(VariableDecl),
    EnumConstant {
        annotations: Vec<NodeId>,
        name: String,
        args: Vec<NodeId>,
        body: Option<Vec<NodeId>>,
    },
    Annotation {
        ty: NodeId,
        args: Vec<NodeId>,
    },
    TypeParameter {
        name: String,
        bounds: Vec<NodeId>,
    },
    /// `module` declaration; `directives` are the requires, exports, opens,
    /// uses and provides nodes in source order.
    Module {
        annotations: Vec<NodeId>,
        open: bool,
        name: String,
        directives: Vec<NodeId>,
    },
    Requires {
        is_static: bool,
        transitive: bool,
        name: String,
    },
    /// Empty `modules` exports to everyone.
    Exports {
        package: String,
        modules: Vec<String>,
    },
    Opens {
        package: String,
        modules: Vec<String>,
    },
    Uses(NodeId),
    Provides {
        service: NodeId,
        implementations: Vec<NodeId>,
    },

    // Statements
    Block {
        stmts: Vec<NodeId>,
        is_static: bool,
    },
    Empty,
    ExprStmt(NodeId),
    If {
        cond: NodeId,
        then_stmt: NodeId,
        else_stmt: Option<NodeId>,
    },
    While {
        cond: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        cond: NodeId,
    },
    For {
        init: Vec<NodeId>,
        cond: Option<NodeId>,
        step: Vec<NodeId>,
        body: NodeId,
    },
    ForEach {
        var: NodeId,
        iterable: NodeId,
        body: NodeId,
    },
    Labeled {
        label: String,
        body: NodeId,
    },
    Switch {
        selector: NodeId,
        cases: Vec<NodeId>,
    },
    /// Empty `labels` is the `default` case. An `arrow` case holds exactly
    /// one body node: an expression, a block or a throw statement.
    Case {
        labels: Vec<NodeId>,
        guard: Option<NodeId>,
        arrow: bool,
        body: Vec<NodeId>,
    },
    Synchronized {
        lock: NodeId,
        body: NodeId,
    },
    Try {
        resources: Vec<NodeId>,
        body: NodeId,
        catches: Vec<NodeId>,
        finally: Option<NodeId>,
    },
    Catch {
        param: NodeId,
        body: NodeId,
    },
    Return(Option<NodeId>),
    Throw(NodeId),
    Break(Option<String>),
    Continue(Option<String>),
    Yield(NodeId),
    Assert {
        cond: NodeId,
        detail: Option<NodeId>,
    },

    // Expressions
    Ident(String),
    Literal(Literal),
    FieldAccess {
        target: NodeId,
        name: String,
    },
    MethodCall {
        target: Option<NodeId>,
        type_args: Vec<NodeId>,
        name: String,
        args: Vec<NodeId>,
    },
    NewClass {
        outer: Option<NodeId>,
        type_args: Vec<NodeId>,
        class: NodeId,
        args: Vec<NodeId>,
        body: Option<Vec<NodeId>>,
    },
    NewArray {
        elem_type: Option<NodeId>,
        dims: Vec<NodeId>,
        /// Trailing `[]` pairs without a dimension expression.
        extra_dims: u8,
        init: Option<Vec<NodeId>>,
    },
    Parens(NodeId),
    Assign {
        lhs: NodeId,
        rhs: NodeId,
    },
    CompoundAssign {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Conditional {
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    },
    Cast {
        ty: NodeId,
        expr: NodeId,
    },
    InstanceOf {
        expr: NodeId,
        ty: NodeId,
    },
    ArrayAccess {
        array: NodeId,
        index: NodeId,
    },
    /// `params` are [`NodeKind::Variable`] nodes; `body` is an expression or a block.
    Lambda {
        params: Vec<NodeId>,
        body: NodeId,
    },
    MemberRef {
        target: NodeId,
        name: String,
    },
    SwitchExpr {
        selector: NodeId,
        cases: Vec<NodeId>,
    },
    /// Type pattern; `var` is a [`NodeKind::Variable`] without initializer.
    BindingPattern(NodeId),
    RecordPattern {
        deconstructor: NodeId,
        nested: Vec<NodeId>,
    },

    // Types and symbol references
    PrimitiveType(PrimitiveKind),
    /// A reference to a type or a static member that may print simple or
    /// qualified depending on imports. `written` is the text to fall back on
    /// when `element` is absent or cannot be resolved.
    NameRef {
        element: Option<ElementId>,
        written: String,
    },
    ArrayType(NodeId),
    ParameterizedType {
        base: NodeId,
        args: Vec<NodeId>,
    },
    Wildcard {
        bound: Option<(WildcardBound, NodeId)>,
    },
    UnionType(Vec<NodeId>),
    IntersectionType(Vec<NodeId>),
    AnnotatedType {
        annotations: Vec<NodeId>,
        ty: NodeId,
    },

    /// Unparseable source text, printed as-is.
    Erroneous(String),
}

impl NodeKind {
    /// Whether this kind is a statement (including local declarations).
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Block { .. }
                | NodeKind::Empty
                | NodeKind::ExprStmt(_)
                | NodeKind::If { .. }
                | NodeKind::While { .. }
                | NodeKind::DoWhile { .. }
                | NodeKind::For { .. }
                | NodeKind::ForEach { .. }
                | NodeKind::Labeled { .. }
                | NodeKind::Switch { .. }
                | NodeKind::Synchronized { .. }
                | NodeKind::Try { .. }
                | NodeKind::Return(_)
                | NodeKind::Throw(_)
                | NodeKind::Break(_)
                | NodeKind::Continue(_)
                | NodeKind::Yield(_)
                | NodeKind::Assert { .. }
        )
    }

    /// Short name of the kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit { .. } => "compilation unit",
            NodeKind::Package { .. } => "package",
            NodeKind::Import { .. } => "import",
            NodeKind::Class(_) => "class",
            NodeKind::Method(_) => "method",
            NodeKind::Variable(_) => "variable",
            NodeKind::EnumConstant { .. } => "enum constant",
            NodeKind::Annotation { .. } => "annotation",
            NodeKind::TypeParameter { .. } => "type parameter",
            NodeKind::Module { .. } => "module",
            NodeKind::Requires { .. } => "requires",
            NodeKind::Exports { .. } => "exports",
            NodeKind::Opens { .. } => "opens",
            NodeKind::Uses(_) => "uses",
            NodeKind::Provides { .. } => "provides",
            NodeKind::Block { .. } => "block",
            NodeKind::Empty => "empty statement",
            NodeKind::ExprStmt(_) => "expression statement",
            NodeKind::If { .. } => "if",
            NodeKind::While { .. } => "while",
            NodeKind::DoWhile { .. } => "do-while",
            NodeKind::For { .. } => "for",
            NodeKind::ForEach { .. } => "enhanced for",
            NodeKind::Labeled { .. } => "labeled statement",
            NodeKind::Switch { .. } => "switch",
            NodeKind::Case { .. } => "case",
            NodeKind::Synchronized { .. } => "synchronized",
            NodeKind::Try { .. } => "try",
            NodeKind::Catch { .. } => "catch",
            NodeKind::Return(_) => "return",
            NodeKind::Throw(_) => "throw",
            NodeKind::Break(_) => "break",
            NodeKind::Continue(_) => "continue",
            NodeKind::Yield(_) => "yield",
            NodeKind::Assert { .. } => "assert",
            NodeKind::Ident(_) => "identifier",
            NodeKind::Literal(_) => "literal",
            NodeKind::FieldAccess { .. } => "field access",
            NodeKind::MethodCall { .. } => "method call",
            NodeKind::NewClass { .. } => "new class",
            NodeKind::NewArray { .. } => "new array",
            NodeKind::Parens(_) => "parenthesized",
            NodeKind::Assign { .. } => "assignment",
            NodeKind::CompoundAssign { .. } => "compound assignment",
            NodeKind::Unary { .. } => "unary",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Conditional { .. } => "conditional",
            NodeKind::Cast { .. } => "cast",
            NodeKind::InstanceOf { .. } => "instanceof",
            NodeKind::ArrayAccess { .. } => "array access",
            NodeKind::Lambda { .. } => "lambda",
            NodeKind::MemberRef { .. } => "member reference",
            NodeKind::SwitchExpr { .. } => "switch expression",
            NodeKind::BindingPattern(_) => "binding pattern",
            NodeKind::RecordPattern { .. } => "record pattern",
            NodeKind::PrimitiveType(_) => "primitive type",
            NodeKind::NameRef { .. } => "name reference",
            NodeKind::ArrayType(_) => "array type",
            NodeKind::ParameterizedType { .. } => "parameterized type",
            NodeKind::Wildcard { .. } => "wildcard",
            NodeKind::UnionType(_) => "union type",
            NodeKind::IntersectionType(_) => "intersection type",
            NodeKind::AnnotatedType { .. } => "annotated type",
            NodeKind::Erroneous(_) => "erroneous",
        }
    }

    /// Collect direct children in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.for_each_child(|id| out.push(id));
        out
    }

    /// Visit direct children in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        let all = |ids: &[NodeId], f: &mut dyn FnMut(NodeId)| {
            for &id in ids {
                f(id);
            }
        };
        match self {
            NodeKind::CompilationUnit {
                package,
                imports,
                types,
            } => {
                package.iter().copied().for_each(&mut f);
                all(imports, &mut f);
                all(types, &mut f);
            }
            NodeKind::Package { annotations, .. } => all(annotations, &mut f),
            NodeKind::Class(c) => {
                all(&c.annotations, &mut f);
                all(&c.type_params, &mut f);
                c.extends.iter().copied().for_each(&mut f);
                all(&c.implements, &mut f);
                all(&c.members, &mut f);
            }
            NodeKind::Method(m) => {
                all(&m.annotations, &mut f);
                all(&m.type_params, &mut f);
                m.return_type.iter().copied().for_each(&mut f);
                all(&m.params, &mut f);
                all(&m.throws, &mut f);
                m.body.iter().copied().for_each(&mut f);
                m.default_value.iter().copied().for_each(&mut f);
            }
            NodeKind::Variable(v) => {
                all(&v.annotations, &mut f);
                v.ty.iter().copied().for_each(&mut f);
                v.init.iter().copied().for_each(&mut f);
            }
            NodeKind::EnumConstant {
                annotations,
                args,
                body,
                ..
            } => {
                all(annotations, &mut f);
                all(args, &mut f);
                if let Some(body) = body {
                    all(body, &mut f);
                }
            }
            NodeKind::Annotation { ty, args } => {
                f(*ty);
                all(args, &mut f);
            }
            NodeKind::TypeParameter { bounds, .. } => all(bounds, &mut f),
            NodeKind::Module {
                annotations,
                directives,
                ..
            } => {
                all(annotations, &mut f);
                all(directives, &mut f);
            }
            NodeKind::Uses(service) => f(*service),
            NodeKind::Provides {
                service,
                implementations,
            } => {
                f(*service);
                all(implementations, &mut f);
            }
            NodeKind::Block { stmts, .. } => all(stmts, &mut f),
            NodeKind::ExprStmt(e) | NodeKind::Throw(e) | NodeKind::Yield(e) => f(*e),
            NodeKind::If {
                cond,
                then_stmt,
                else_stmt,
            } => {
                f(*cond);
                f(*then_stmt);
                else_stmt.iter().copied().for_each(&mut f);
            }
            NodeKind::While { cond, body } => {
                f(*cond);
                f(*body);
            }
            NodeKind::DoWhile { body, cond } => {
                f(*body);
                f(*cond);
            }
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => {
                all(init, &mut f);
                cond.iter().copied().for_each(&mut f);
                all(step, &mut f);
                f(*body);
            }
            NodeKind::ForEach {
                var,
                iterable,
                body,
            } => {
                f(*var);
                f(*iterable);
                f(*body);
            }
            NodeKind::Labeled { body, .. } => f(*body),
            NodeKind::Switch { selector, cases } | NodeKind::SwitchExpr { selector, cases } => {
                f(*selector);
                all(cases, &mut f);
            }
            NodeKind::Case {
                labels,
                guard,
                body,
                ..
            } => {
                all(labels, &mut f);
                guard.iter().copied().for_each(&mut f);
                all(body, &mut f);
            }
            NodeKind::Synchronized { lock, body } => {
                f(*lock);
                f(*body);
            }
            NodeKind::Try {
                resources,
                body,
                catches,
                finally,
            } => {
                all(resources, &mut f);
                f(*body);
                all(catches, &mut f);
                finally.iter().copied().for_each(&mut f);
            }
            NodeKind::Catch { param, body } => {
                f(*param);
                f(*body);
            }
            NodeKind::Return(e) => e.iter().copied().for_each(&mut f),
            NodeKind::Assert { cond, detail } => {
                f(*cond);
                detail.iter().copied().for_each(&mut f);
            }
            NodeKind::FieldAccess { target, .. } | NodeKind::MemberRef { target, .. } => {
                f(*target);
            }
            NodeKind::MethodCall {
                target,
                type_args,
                args,
                ..
            } => {
                target.iter().copied().for_each(&mut f);
                all(type_args, &mut f);
                all(args, &mut f);
            }
            NodeKind::NewClass {
                outer,
                type_args,
                class,
                args,
                body,
            } => {
                outer.iter().copied().for_each(&mut f);
                all(type_args, &mut f);
                f(*class);
                all(args, &mut f);
                if let Some(body) = body {
                    all(body, &mut f);
                }
            }
            NodeKind::NewArray {
                elem_type,
                dims,
                init,
                ..
            } => {
                elem_type.iter().copied().for_each(&mut f);
                all(dims, &mut f);
                if let Some(init) = init {
                    all(init, &mut f);
                }
            }
            NodeKind::Parens(e) | NodeKind::ArrayType(e) | NodeKind::BindingPattern(e) => f(*e),
            NodeKind::RecordPattern {
                deconstructor,
                nested,
            } => {
                f(*deconstructor);
                all(nested, &mut f);
            }
            NodeKind::AnnotatedType { annotations, ty } => {
                all(annotations, &mut f);
                f(*ty);
            }
            NodeKind::Assign { lhs, rhs }
            | NodeKind::CompoundAssign { lhs, rhs, .. }
            | NodeKind::Binary { lhs, rhs, .. } => {
                f(*lhs);
                f(*rhs);
            }
            NodeKind::Unary { operand, .. } => f(*operand),
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                f(*cond);
                f(*then_expr);
                f(*else_expr);
            }
            NodeKind::Cast { ty, expr } => {
                f(*ty);
                f(*expr);
            }
            NodeKind::InstanceOf { expr, ty } => {
                f(*expr);
                f(*ty);
            }
            NodeKind::ArrayAccess { array, index } => {
                f(*array);
                f(*index);
            }
            NodeKind::Lambda { params, body } => {
                all(params, &mut f);
                f(*body);
            }
            NodeKind::ParameterizedType { base, args } => {
                f(*base);
                all(args, &mut f);
            }
            NodeKind::Wildcard { bound } => {
                if let Some((_, b)) = bound {
                    f(*b);
                }
            }
            NodeKind::UnionType(items) | NodeKind::IntersectionType(items) => all(items, &mut f),
            NodeKind::Import { .. }
            | NodeKind::Requires { .. }
            | NodeKind::Exports { .. }
            | NodeKind::Opens { .. }
            | NodeKind::Empty
            | NodeKind::Break(_)
            | NodeKind::Continue(_)
            | NodeKind::Ident(_)
            | NodeKind::Literal(_)
            | NodeKind::PrimitiveType(_)
            | NodeKind::NameRef { .. }
            | NodeKind::Erroneous(_) => {}
        }
    }

    /// The statement or member list this node owns, if any.
    ///
    /// Runs of siblings are only copied verbatim when they are contiguous in
    /// one of these lists.
    pub fn statement_list(&self) -> Option<&[NodeId]> {
        match self {
            NodeKind::CompilationUnit { types, .. } => Some(types),
            NodeKind::Class(c) => Some(&c.members),
            NodeKind::Block { stmts, .. } => Some(stmts),
            NodeKind::Module { directives, .. } => Some(directives),
            NodeKind::Case {
                body, arrow: false, ..
            } => Some(body),
            NodeKind::EnumConstant { body, .. } | NodeKind::NewClass { body, .. } => {
                body.as_deref()
            }
            _ => None,
        }
    }
}
