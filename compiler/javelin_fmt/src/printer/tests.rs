use javelin_ir::{
    BinaryOp, ClassDecl, ClassKind, Comment, CommentMap, CommentPosition, CommentStyle, DocComment,
    DocMap, DocNode, MethodDecl, Modifiers, NodeId, NodeKind, PrimitiveKind, SyntaxTree,
    VariableDecl,
};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use super::{Printer, PrinterParts};
use crate::config::{BracePlacement, BracesGeneration, StyleConfig, WrapStyle};
use crate::imports::ResolvedNames;

fn render(tree: &SyntaxTree, style: &StyleConfig, root: NodeId) -> String {
    render_with(tree, style, &CommentMap::new(), &DocMap::default(), root)
}

fn render_with(
    tree: &SyntaxTree,
    style: &StyleConfig,
    comments: &CommentMap,
    docs: &DocMap,
    root: NodeId,
) -> String {
    let tags = FxHashMap::default();
    let names = ResolvedNames::new();
    let mut printer = Printer::new(PrinterParts {
        tree,
        source: "",
        style,
        comments,
        docs,
        tags: &tags,
        names: &names,
        added_imports: &[],
        initial_offset: 0,
    });
    printer.print_root(root);
    printer.finish().text
}

fn int_param(tree: &mut SyntaxTree, name: &str) -> NodeId {
    let ty = tree.primitive(PrimitiveKind::Int);
    tree.variable(ty, name, None)
}

fn implicit_param(tree: &mut SyntaxTree, name: &str) -> NodeId {
    tree.alloc(NodeKind::Variable(VariableDecl {
        modifiers: Modifiers::empty(),
        annotations: Vec::new(),
        ty: None,
        name: name.to_owned(),
        init: None,
        varargs: false,
    }))
}

fn method(tree: &mut SyntaxTree, name: &str, params: Vec<NodeId>, body: Option<NodeId>) -> NodeId {
    let void = tree.primitive(PrimitiveKind::Void);
    tree.alloc(NodeKind::Method(MethodDecl {
        modifiers: Modifiers::empty(),
        annotations: Vec::new(),
        type_params: Vec::new(),
        return_type: Some(void),
        name: name.to_owned(),
        params,
        throws: Vec::new(),
        body,
        default_value: None,
    }))
}

fn class(tree: &mut SyntaxTree, name: &str, members: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::Class(ClassDecl {
        modifiers: Modifiers::empty(),
        annotations: Vec::new(),
        kind: ClassKind::Class,
        name: name.to_owned(),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        members,
        element: None,
    }))
}

fn call_stmt(tree: &mut SyntaxTree, name: &str) -> NodeId {
    let call = tree.call(None, name, Vec::new());
    tree.expr_stmt(call)
}

fn if_stmt(tree: &mut SyntaxTree, cond: &str, then_stmt: NodeId, else_stmt: Option<NodeId>) -> NodeId {
    let cond = tree.ident(cond);
    tree.alloc(NodeKind::If {
        cond,
        then_stmt,
        else_stmt,
    })
}

#[test]
fn class_with_method() {
    let mut tree = SyntaxTree::new();
    let a = int_param(&mut tree, "a");
    let b = int_param(&mut tree, "b");
    let ret = tree.return_stmt(None);
    let body = tree.block(vec![ret]);
    let foo = method(&mut tree, "foo", vec![a, b], Some(body));
    let root = class(&mut tree, "A", vec![foo]);

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "class A {\n    void foo(int a, int b) {\n        return;\n    }\n}"
    );
}

#[test]
fn methods_are_separated_by_blank_lines() {
    let mut tree = SyntaxTree::new();
    let first_body = tree.block(Vec::new());
    let first = method(&mut tree, "a", Vec::new(), Some(first_body));
    let second_body = tree.block(Vec::new());
    let second = method(&mut tree, "b", Vec::new(), Some(second_body));
    let root = class(&mut tree, "A", vec![first, second]);

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "class A {\n    void a() {\n    }\n\n    void b() {\n    }\n}"
    );
}

#[test]
fn parameters_stay_on_one_line_when_they_fit() {
    let mut tree = SyntaxTree::new();
    let a = int_param(&mut tree, "a");
    let b = int_param(&mut tree, "b");
    let root = method(&mut tree, "foo", vec![a, b], None);

    let mut style = StyleConfig::with_right_margin(80);
    style.wrap.method_params = WrapStyle::IfLong;
    assert_eq!(render(&tree, &style, root), "void foo(int a, int b);");
}

#[test]
fn long_parameter_lists_wrap_at_continuation_indent() {
    let mut tree = SyntaxTree::new();
    let a = int_param(&mut tree, "a");
    let b = int_param(&mut tree, "b");
    let root = method(&mut tree, "foo", vec![a, b], None);

    let mut style = StyleConfig::with_right_margin(20);
    style.wrap.method_params = WrapStyle::IfLong;
    assert_eq!(render(&tree, &style, root), "void foo(int a,\n        int b);");
}

#[test]
fn parentheses_follow_precedence() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("a");
    let b = tree.ident("b");
    let c = tree.ident("c");
    let sum = tree.binary(BinaryOp::Add, a, b);
    let product = tree.binary(BinaryOp::Mul, sum, c);
    let stmt = tree.expr_stmt(product);
    assert_eq!(render(&tree, &StyleConfig::default(), stmt), "(a + b) * c;");

    let a = tree.ident("a");
    let b = tree.ident("b");
    let c = tree.ident("c");
    let inner = tree.binary(BinaryOp::Sub, b, c);
    let outer = tree.binary(BinaryOp::Sub, a, inner);
    let stmt = tree.expr_stmt(outer);
    assert_eq!(render(&tree, &StyleConfig::default(), stmt), "a - (b - c);");
}

#[test]
fn unbraced_if_else() {
    let mut tree = SyntaxTree::new();
    let then_stmt = tree.return_stmt(None);
    let else_stmt = tree.return_stmt(None);
    let root = if_stmt(&mut tree, "x", then_stmt, Some(else_stmt));

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "if (x)\n    return;\nelse\n    return;"
    );
}

#[test]
fn generated_braces() {
    let mut tree = SyntaxTree::new();
    let then_stmt = tree.return_stmt(None);
    let root = if_stmt(&mut tree, "x", then_stmt, None);

    let mut style = StyleConfig::default();
    style.redundant_braces.if_braces = BracesGeneration::Generate;
    assert_eq!(render(&tree, &style, root), "if (x) {\n    return;\n}");
}

#[test]
fn dangling_else_gets_braces() {
    let mut tree = SyntaxTree::new();
    let x = call_stmt(&mut tree, "x");
    let inner = if_stmt(&mut tree, "b", x, None);
    let y = call_stmt(&mut tree, "y");
    let root = if_stmt(&mut tree, "a", inner, Some(y));

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "if (a) {\n    if (b)\n        x();\n} else\n    y();"
    );
}

#[test]
fn lambda_parameter_parentheses() {
    let mut tree = SyntaxTree::new();
    let a = implicit_param(&mut tree, "a");
    let b = implicit_param(&mut tree, "b");
    let lhs = tree.ident("a");
    let rhs = tree.ident("b");
    let sum = tree.binary(BinaryOp::Add, lhs, rhs);
    let pair = tree.alloc(NodeKind::Lambda {
        params: vec![a, b],
        body: sum,
    });
    assert_eq!(render(&tree, &StyleConfig::default(), pair), "(a, b) -> a + b");

    let x = implicit_param(&mut tree, "x");
    let body = tree.ident("x");
    let single = tree.alloc(NodeKind::Lambda {
        params: vec![x],
        body,
    });
    assert_eq!(render(&tree, &StyleConfig::default(), single), "x -> x");

    let mut style = StyleConfig::default();
    style.placement.parens_around_single_lambda_param = true;
    assert_eq!(render(&tree, &style, single), "(x) -> x");
}

#[test]
fn unit_with_package_and_imports() {
    let mut tree = SyntaxTree::new();
    let package = tree.alloc(NodeKind::Package {
        annotations: Vec::new(),
        name: "p".to_owned(),
    });
    let import = tree.alloc(NodeKind::Import {
        name: "java.util.List".to_owned(),
        is_static: false,
    });
    let ty = class(&mut tree, "A", Vec::new());
    let unit = tree.alloc(NodeKind::CompilationUnit {
        package: Some(package),
        imports: vec![import],
        types: vec![ty],
    });

    assert_eq!(
        render(&tree, &StyleConfig::default(), unit),
        "package p;\n\nimport java.util.List;\n\nclass A {\n}\n"
    );
}

#[test]
fn local_variable_with_initializer() {
    let mut tree = SyntaxTree::new();
    let ty = tree.primitive(PrimitiveKind::Int);
    let one = tree.int_literal(1);
    let root = tree.variable(ty, "count", Some(one));
    assert_eq!(render(&tree, &StyleConfig::default(), root), "int count = 1;");
}

fn note(comments: &mut CommentMap, id: NodeId, position: CommentPosition, style: CommentStyle, text: &str) {
    comments.entry(id).add(position, Comment::generated(style, text));
}

#[test]
fn javadoc_sits_directly_above_its_declaration() {
    let mut tree = SyntaxTree::new();
    let body = tree.block(Vec::new());
    let m = method(&mut tree, "m", Vec::new(), Some(body));
    let root = class(&mut tree, "A", vec![m]);
    let mut comments = CommentMap::new();
    note(&mut comments, m, CommentPosition::Preceding, CommentStyle::Javadoc, "Doc text.");

    assert_eq!(
        render_with(&tree, &StyleConfig::default(), &comments, &DocMap::default(), root),
        "class A {\n    /**\n     * Doc text.\n     */\n    void m() {\n    }\n}"
    );
}

#[test]
fn structured_doc_replaces_raw_javadoc() {
    let mut tree = SyntaxTree::new();
    let a = int_param(&mut tree, "a");
    let body = tree.block(Vec::new());
    let m = method(&mut tree, "m", vec![a], Some(body));
    let root = class(&mut tree, "A", vec![m]);
    let mut comments = CommentMap::new();
    note(&mut comments, m, CommentPosition::Preceding, CommentStyle::Javadoc, "Old text.");
    let mut docs = DocMap::default();
    docs.insert(
        m,
        DocComment {
            first_sentence: vec![DocNode::text("Sums "), DocNode::Code {
                literal: false,
                text: "a".to_owned(),
            }, DocNode::text(".")],
            body: Vec::new(),
            block_tags: vec![
                DocNode::Param {
                    name: "a".to_owned(),
                    is_type_param: false,
                    description: vec![DocNode::text("first")],
                },
                DocNode::Return(vec![DocNode::text("nothing")]),
            ],
        },
    );

    assert_eq!(
        render_with(&tree, &StyleConfig::default(), &comments, &docs, root),
        "class A {\n    /**\n     * Sums {@code a}.\n     * @param a first\n     * @return nothing\n     */\n    void m(int a) {\n    }\n}"
    );
}

#[test]
fn inline_comment_before_closing_paren() {
    let mut tree = SyntaxTree::new();
    let b = tree.ident("b");
    let call = tree.call(None, "f", vec![b]);
    let root = tree.expr_stmt(call);
    let mut comments = CommentMap::new();
    note(&mut comments, b, CommentPosition::Inline, CommentStyle::Block, "note");

    assert_eq!(
        render_with(&tree, &StyleConfig::default(), &comments, &DocMap::default(), root),
        "f(b /* note */);"
    );
}

#[test]
fn preceding_and_trailing_comments_get_their_own_lines() {
    let mut tree = SyntaxTree::new();
    let x = call_stmt(&mut tree, "x");
    let y = call_stmt(&mut tree, "y");
    let root = tree.block(vec![x, y]);
    let mut comments = CommentMap::new();
    note(&mut comments, x, CommentPosition::Preceding, CommentStyle::Line, "first");
    note(&mut comments, y, CommentPosition::Trailing, CommentStyle::Line, "done");

    assert_eq!(
        render_with(&tree, &StyleConfig::default(), &comments, &DocMap::default(), root),
        "{\n    // first\n    x();\n    y();\n    // done\n}"
    );
}

#[test]
fn inner_comment_of_empty_block() {
    let mut tree = SyntaxTree::new();
    let root = tree.block(Vec::new());
    let mut comments = CommentMap::new();
    note(&mut comments, root, CommentPosition::Inner, CommentStyle::Block, "empty");

    assert_eq!(
        render_with(&tree, &StyleConfig::default(), &comments, &DocMap::default(), root),
        "{\n    /* empty */\n}"
    );
}

fn while_stmt(tree: &mut SyntaxTree, cond: &str, body: NodeId) -> NodeId {
    let cond = tree.ident(cond);
    tree.alloc(NodeKind::While { cond, body })
}

#[test]
fn overflowing_body_is_rendered_again_on_its_own_line() {
    let mut tree = SyntaxTree::new();
    let short = call_stmt(&mut tree, "f");
    let fits = while_stmt(&mut tree, "x", short);
    let long = call_stmt(&mut tree, "longername");
    let wraps = while_stmt(&mut tree, "x", long);

    let mut style = StyleConfig::with_right_margin(20);
    style.wrap.while_statement = WrapStyle::IfLong;
    assert_eq!(render(&tree, &style, fits), "while (x) f();");
    assert_eq!(render(&tree, &style, wraps), "while (x)\n    longername();");
}

#[test]
fn comments_printed_by_an_overflowing_attempt_print_again() {
    let mut tree = SyntaxTree::new();
    let long = call_stmt(&mut tree, "longername");
    let root = while_stmt(&mut tree, "x", long);
    let mut comments = CommentMap::new();
    note(&mut comments, long, CommentPosition::Preceding, CommentStyle::Block, "c");

    let mut style = StyleConfig::with_right_margin(20);
    style.wrap.while_statement = WrapStyle::IfLong;
    assert_eq!(
        render_with(&tree, &style, &comments, &DocMap::default(), root),
        "while (x)\n    /* c */\n    longername();"
    );
}

fn braced_if(tree: &mut SyntaxTree) -> NodeId {
    let x = call_stmt(tree, "x");
    let body = tree.block(vec![x]);
    if_stmt(tree, "c", body, None)
}

#[test]
fn brace_placements() {
    let mut tree = SyntaxTree::new();
    let root = braced_if(&mut tree);
    let mut style = StyleConfig::default();
    assert_eq!(render(&tree, &style, root), "if (c) {\n    x();\n}");

    style.braces.other = BracePlacement::NewLine;
    assert_eq!(render(&tree, &style, root), "if (c)\n{\n    x();\n}");

    style.braces.other = BracePlacement::NewLineIndented;
    assert_eq!(render(&tree, &style, root), "if (c)\n    {\n    x();\n    }");

    style.braces.other = BracePlacement::NewLineHalfIndented;
    assert_eq!(render(&tree, &style, root), "if (c)\n  {\n    x();\n  }");
}

#[test]
fn loop_braces_are_eliminated_or_generated() {
    let mut tree = SyntaxTree::new();
    let x = call_stmt(&mut tree, "x");
    let block = tree.block(vec![x]);
    let braced = while_stmt(&mut tree, "c", block);
    let mut style = StyleConfig::default();
    style.redundant_braces.while_braces = BracesGeneration::Eliminate;
    assert_eq!(render(&tree, &style, braced), "while (c)\n    x();");

    let ty = tree.primitive(PrimitiveKind::Int);
    let v = tree.variable(ty, "v", None);
    let declares = tree.block(vec![v]);
    let kept = while_stmt(&mut tree, "c", declares);
    assert_eq!(render(&tree, &style, kept), "while (c) {\n    int v;\n}");

    let y = call_stmt(&mut tree, "y");
    let forever = tree.alloc(NodeKind::For {
        init: Vec::new(),
        cond: None,
        step: Vec::new(),
        body: y,
    });
    style.redundant_braces.for_braces = BracesGeneration::Generate;
    assert_eq!(render(&tree, &style, forever), "for (;;) {\n    y();\n}");
}

fn case(tree: &mut SyntaxTree, labels: Vec<NodeId>, guard: Option<NodeId>, arrow: bool, body: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::Case {
        labels,
        guard,
        arrow,
        body,
    })
}

#[test]
fn colon_cases() {
    let mut tree = SyntaxTree::new();
    let one = tree.int_literal(1);
    let x = call_stmt(&mut tree, "x");
    let stop = tree.alloc(NodeKind::Break(None));
    let first = case(&mut tree, vec![one], None, false, vec![x, stop]);
    let selector = tree.ident("k");
    let root = tree.alloc(NodeKind::Switch {
        selector,
        cases: vec![first],
    });

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "switch (k) {\n    case 1:\n        x();\n        break;\n}"
    );
}

#[test]
fn switch_expression_with_arrow_cases() {
    let mut tree = SyntaxTree::new();
    let one = tree.int_literal(1);
    let ten = tree.int_literal(10);
    let first = case(&mut tree, vec![one], None, true, vec![ten]);
    let zero = tree.int_literal(0);
    let other = case(&mut tree, Vec::new(), None, true, vec![zero]);
    let selector = tree.ident("k");
    let switch = tree.alloc(NodeKind::SwitchExpr {
        selector,
        cases: vec![first, other],
    });
    let ty = tree.primitive(PrimitiveKind::Int);
    let root = tree.variable(ty, "r", Some(switch));

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "int r = switch (k) {\n    case 1 -> 10;\n    default -> 0;\n};"
    );
}

#[test]
fn guarded_pattern_cases() {
    let mut tree = SyntaxTree::new();
    let string = tree.ident("String");
    let s = tree.variable(string, "s", None);
    let pattern = tree.alloc(NodeKind::BindingPattern(s));
    let target = tree.ident("s");
    let guard = tree.call(Some(target), "isEmpty", Vec::new());
    let x = call_stmt(&mut tree, "x");
    let first = case(&mut tree, vec![pattern], Some(guard), true, vec![x]);
    let empty = tree.block(Vec::new());
    let other = case(&mut tree, Vec::new(), None, true, vec![empty]);
    let selector = tree.ident("o");
    let root = tree.alloc(NodeKind::Switch {
        selector,
        cases: vec![first, other],
    });

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "switch (o) {\n    case String s when s.isEmpty() -> x();\n    default -> {\n    }\n}"
    );
}

#[test]
fn record_patterns_and_annotated_types() {
    let mut tree = SyntaxTree::new();
    let o = tree.ident("o");
    let point = tree.ident("Point");
    let x = int_param(&mut tree, "x");
    let y = int_param(&mut tree, "y");
    let bind_x = tree.alloc(NodeKind::BindingPattern(x));
    let bind_y = tree.alloc(NodeKind::BindingPattern(y));
    let pattern = tree.alloc(NodeKind::RecordPattern {
        deconstructor: point,
        nested: vec![bind_x, bind_y],
    });
    let test = tree.alloc(NodeKind::InstanceOf { expr: o, ty: pattern });
    assert_eq!(
        render(&tree, &StyleConfig::default(), test),
        "o instanceof Point(int x, int y)"
    );

    let non_null = tree.ident("NonNull");
    let annotation = tree.alloc(NodeKind::Annotation {
        ty: non_null,
        args: Vec::new(),
    });
    let string = tree.ident("String");
    let ty = tree.alloc(NodeKind::AnnotatedType {
        annotations: vec![annotation],
        ty: string,
    });
    let root = tree.variable(ty, "s", None);
    assert_eq!(render(&tree, &StyleConfig::default(), root), "@NonNull String s;");
}

fn module(tree: &mut SyntaxTree, open: bool, directives: Vec<NodeId>) -> NodeId {
    tree.alloc(NodeKind::Module {
        annotations: Vec::new(),
        open,
        name: "com.x".to_owned(),
        directives,
    })
}

#[test]
fn module_directives() {
    let mut tree = SyntaxTree::new();
    let requires = tree.alloc(NodeKind::Requires {
        is_static: false,
        transitive: true,
        name: "java.base".to_owned(),
    });
    let exports = tree.alloc(NodeKind::Exports {
        package: "p".to_owned(),
        modules: vec!["a".to_owned(), "b".to_owned()],
    });
    let opens = tree.alloc(NodeKind::Opens {
        package: "q".to_owned(),
        modules: Vec::new(),
    });
    let used = tree.ident("Service");
    let uses = tree.alloc(NodeKind::Uses(used));
    let service = tree.ident("Service");
    let implementation = tree.ident("Impl");
    let provides = tree.alloc(NodeKind::Provides {
        service,
        implementations: vec![implementation],
    });
    let root = module(&mut tree, false, vec![requires, exports, opens, uses, provides]);

    assert_eq!(
        render(&tree, &StyleConfig::default(), root),
        "module com.x {\n    requires transitive java.base;\n    exports p to a, b;\n    opens q;\n    uses Service;\n    provides Service with Impl;\n}"
    );
}

#[test]
fn open_module_with_brace_on_new_line() {
    let mut tree = SyntaxTree::new();
    let requires = tree.alloc(NodeKind::Requires {
        is_static: true,
        transitive: false,
        name: "a".to_owned(),
    });
    let root = module(&mut tree, true, vec![requires]);
    let mut style = StyleConfig::default();
    style.braces.module_decl = BracePlacement::NewLine;

    assert_eq!(
        render(&tree, &style, root),
        "open module com.x\n{\n    requires static a;\n}"
    );
}

#[test]
fn qualified_exports_wrap_aligned() {
    let mut tree = SyntaxTree::new();
    let exports = tree.alloc(NodeKind::Exports {
        package: "p".to_owned(),
        modules: vec!["alpha".to_owned(), "beta".to_owned()],
    });
    let root = module(&mut tree, false, vec![exports]);
    let mut style = StyleConfig::default();
    style.wrap.exports_to_list = WrapStyle::Always;
    style.alignment.exports = true;

    assert_eq!(
        render(&tree, &style, root),
        "module com.x {\n    exports p to alpha,\n                 beta;\n}"
    );
}
