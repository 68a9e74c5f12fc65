use javelin_ir::{
    BinaryOp, ClassDecl, ClassKind, Comment, CommentMap, CommentPosition, CommentStyle, Modifiers,
    NodeKind, SymbolTable, SyntaxTree, VariableDecl,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::config::StyleConfig;
use crate::imports::ImportAnalysis;

fn measure(tree: &SyntaxTree, node: NodeId, budget: usize) -> usize {
    let style = StyleConfig::default();
    let comments = CommentMap::new();
    let names = ResolvedNames::new();
    WidthEstimator::new(tree, &style, "", &comments, &names).estimate(node, budget)
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

#[test]
fn binary_operators_are_spaced() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("a");
    let b = tree.ident("b");
    let sum = tree.binary(BinaryOp::Add, a, b);
    assert_eq!(measure(&tree, sum, 80), 5);
}

#[test]
fn precedence_adds_parentheses() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("a");
    let b = tree.ident("b");
    let c = tree.ident("c");
    let sum = tree.binary(BinaryOp::Add, a, b);
    let product = tree.binary(BinaryOp::Mul, sum, c);
    // (a + b) * c
    assert_eq!(measure(&tree, product, 80), 11);
}

#[test]
fn calls_and_literals() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("a");
    let s = tree.string_literal("hi");
    let call = tree.call(None, "foo", vec![a, s]);
    // foo(a, "hi")
    assert_eq!(measure(&tree, call, 80), 12);

    let target = tree.ident("list");
    let chained = tree.call(Some(target), "size", Vec::new());
    assert_eq!(measure(&tree, chained, 80), 11);
}

#[test]
fn wider_than_budget_exceeds_it() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("alpha");
    let b = tree.ident("beta");
    let sum = tree.binary(BinaryOp::Add, a, b);
    assert!(measure(&tree, sum, 6) > 6);
    assert_eq!(measure(&tree, sum, 12), 12);
}

#[test]
fn block_lambda_never_fits() {
    let mut tree = SyntaxTree::new();
    let x = implicit_param(&mut tree, "x");
    let body = tree.block(Vec::new());
    let lambda = tree.alloc(NodeKind::Lambda {
        params: vec![x],
        body,
    });
    assert_eq!(measure(&tree, lambda, 100), 101);
}

#[test]
fn expression_lambda_params() {
    let mut tree = SyntaxTree::new();
    let x = implicit_param(&mut tree, "x");
    let body = tree.ident("x");
    let single = tree.alloc(NodeKind::Lambda {
        params: vec![x],
        body,
    });
    // x -> x
    assert_eq!(measure(&tree, single, 80), 6);

    let a = implicit_param(&mut tree, "a");
    let b = implicit_param(&mut tree, "b");
    let lhs = tree.ident("a");
    let rhs = tree.ident("b");
    let sum = tree.binary(BinaryOp::Add, lhs, rhs);
    let pair = tree.alloc(NodeKind::Lambda {
        params: vec![a, b],
        body: sum,
    });
    // (a, b) -> a + b
    assert_eq!(measure(&tree, pair, 80), 15);
}

#[test]
fn statements_saturate() {
    let mut tree = SyntaxTree::new();
    let ret = tree.return_stmt(None);
    assert_eq!(measure(&tree, ret, 40), 41);
}

#[test]
fn name_refs_use_resolved_names() {
    let mut tree = SyntaxTree::new();
    let mut symbols = SymbolTable::new();
    let list = symbols.class("java.util.List");
    let ty = tree.name_ref(list, "java.util.List");
    let field = tree.variable(ty, "items", None);
    let class = tree.alloc(NodeKind::Class(ClassDecl {
        modifiers: Modifiers::empty(),
        annotations: Vec::new(),
        kind: ClassKind::Class,
        name: "A".to_owned(),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        members: vec![field],
        element: None,
    }));
    let unit = tree.alloc(NodeKind::CompilationUnit {
        package: None,
        imports: Vec::new(),
        types: vec![class],
    });

    let style = StyleConfig::default();
    let comments = CommentMap::new();
    let original = OriginalSource::new("", &tree, &comments);
    let plan = ImportAnalysis::analyze(&tree, &symbols, &style.imports, original, unit);
    let resolved = WidthEstimator::new(&tree, &style, "", &comments, &plan.names);
    assert_eq!(resolved.estimate(ty, 80), "List".len());
    // List items
    assert_eq!(resolved.estimate(field, 80), 10);

    assert_eq!(measure(&tree, ty, 80), "java.util.List".len());
}

#[test]
fn lists_join_with_commas() {
    let mut tree = SyntaxTree::new();
    let a = tree.ident("a");
    let b = tree.ident("b");
    let c = tree.ident("c");
    let style = StyleConfig::default();
    let comments = CommentMap::new();
    let names = ResolvedNames::new();
    let estimator = WidthEstimator::new(&tree, &style, "", &comments, &names);
    assert_eq!(estimator.estimate_list(&[a, b, c], 80), 7);
    assert_eq!(estimator.estimate_list(&[], 80), 0);
}

fn with_comment(tree: &SyntaxTree, node: NodeId, position: CommentPosition, comment: Comment) -> usize {
    let style = StyleConfig::default();
    let mut comments = CommentMap::new();
    comments.entry(node).add(position, comment);
    let names = ResolvedNames::new();
    WidthEstimator::new(tree, &style, "", &comments, &names).estimate(node, 80)
}

#[test]
fn inline_block_comments_are_measured() {
    let mut tree = SyntaxTree::new();
    let b = tree.ident("b");
    let note = Comment::generated(CommentStyle::Block, "note");
    // b /* note */
    assert_eq!(with_comment(&tree, b, CommentPosition::Inline, note), 12);
}

#[test]
fn comments_that_end_the_line_saturate() {
    let mut tree = SyntaxTree::new();
    let b = tree.ident("b");
    let line = Comment::generated(CommentStyle::Line, "note");
    assert_eq!(with_comment(&tree, b, CommentPosition::Inline, line), 81);
    let block = Comment::generated(CommentStyle::Block, "note");
    assert_eq!(with_comment(&tree, b, CommentPosition::Trailing, block), 81);
    let multi_line = Comment::generated(CommentStyle::Block, "one\ntwo");
    assert_eq!(with_comment(&tree, b, CommentPosition::Preceding, multi_line), 81);
}

#[test]
fn patterns_and_annotated_types() {
    let mut tree = SyntaxTree::new();
    let point = tree.ident("Point");
    let int = tree.primitive(javelin_ir::PrimitiveKind::Int);
    let x = tree.variable(int, "x", None);
    let bind_x = tree.alloc(NodeKind::BindingPattern(x));
    let int = tree.primitive(javelin_ir::PrimitiveKind::Int);
    let y = tree.variable(int, "y", None);
    let bind_y = tree.alloc(NodeKind::BindingPattern(y));
    let pattern = tree.alloc(NodeKind::RecordPattern {
        deconstructor: point,
        nested: vec![bind_x, bind_y],
    });
    // Point(int x, int y)
    assert_eq!(measure(&tree, pattern, 80), 19);

    let marker = tree.ident("A");
    let annotation = tree.alloc(NodeKind::Annotation {
        ty: marker,
        args: Vec::new(),
    });
    let string = tree.ident("String");
    let annotated = tree.alloc(NodeKind::AnnotatedType {
        annotations: vec![annotation],
        ty: string,
    });
    // @A String
    assert_eq!(measure(&tree, annotated, 80), 9);
}

#[test]
fn switch_expressions_saturate() {
    let mut tree = SyntaxTree::new();
    let selector = tree.ident("k");
    let switch = tree.alloc(NodeKind::SwitchExpr {
        selector,
        cases: Vec::new(),
    });
    assert_eq!(measure(&tree, switch, 80), 81);
}
