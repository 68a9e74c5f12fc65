use super::ops::PrimitiveKind;
use super::*;

fn sample() -> (SyntaxTree, NodeId, [NodeId; 3]) {
    let mut tree = SyntaxTree::new();
    let a = tree.alloc_original(NodeKind::Empty, Span::new(2, 3));
    let b = tree.alloc_original(NodeKind::Empty, Span::new(4, 5));
    let c = tree.alloc_original(NodeKind::Empty, Span::new(6, 7));
    let block = tree.alloc_original(
        NodeKind::Block {
            stmts: vec![a, b, c],
            is_static: false,
        },
        Span::new(0, 9),
    );
    tree.set_baseline_root(block);
    (tree, block, [a, b, c])
}

#[test]
fn alloc_flags() {
    let mut tree = SyntaxTree::new();
    let orig = tree.alloc_original(NodeKind::Empty, Span::new(0, 1));
    let generated = tree.primitive(PrimitiveKind::Int);
    assert!(tree.is_unchanged(orig));
    assert!(!tree.is_unchanged(generated));
    assert_eq!(tree.span(generated), None);
    assert_eq!(tree.len(), 2);
}

#[test]
fn baseline_parents_are_indexed() {
    let (tree, block, [a, b, c]) = sample();
    assert_eq!(tree.baseline_parent(a), Some(block));
    assert_eq!(tree.baseline_parent(c), Some(block));
    assert_eq!(tree.baseline_parent(block), None);
    assert_eq!(tree.children(block), vec![a, b, c]);
}

#[test]
fn contiguous_runs() {
    let (tree, _, [a, b, c]) = sample();
    assert!(tree.is_contiguous_baseline_run(&[a, b]));
    assert!(tree.is_contiguous_baseline_run(&[b, c]));
    assert!(tree.is_contiguous_baseline_run(&[a, b, c]));
    assert!(!tree.is_contiguous_baseline_run(&[a, c]));
    assert!(!tree.is_contiguous_baseline_run(&[b, a]));
    assert!(!tree.is_contiguous_baseline_run(&[]));
}

#[test]
fn derive_leaves_original_in_place() {
    let (mut tree, block, [a, _, c]) = sample();
    let edited = tree.derive(block, |kind| {
        if let NodeKind::Block { stmts, .. } = kind {
            stmts.remove(1);
        }
    });
    assert!(!tree.is_unchanged(edited));
    assert_eq!(tree.children(edited), vec![a, c]);
    assert_eq!(tree.children(block).len(), 3);
}

#[test]
fn descendants_preorder() {
    let mut tree = SyntaxTree::new();
    let one = tree.int_literal(1);
    let two = tree.int_literal(2);
    let sum = tree.binary(ops::BinaryOp::Add, one, two);
    let stmt = tree.expr_stmt(sum);
    let order: Vec<_> = tree.descendants(stmt).collect();
    assert_eq!(order, vec![stmt, sum, one, two]);
}

#[test]
fn foreign_ids_read_as_empty() {
    let (tree, _, _) = sample();
    let foreign = NodeId::new(99);
    assert!(tree.try_get(foreign).is_none());
    assert_eq!(tree.kind(foreign), &NodeKind::Empty);
    assert_eq!(tree.span(foreign), None);
    assert!(!tree.is_unchanged(foreign));
    assert!(tree.children(foreign).is_empty());
}

#[test]
fn guards_and_directives_are_children() {
    let mut tree = SyntaxTree::new();
    let label = tree.ident("s");
    let guard = tree.ident("ok");
    let body = tree.ident("x");
    let rule = tree.alloc(NodeKind::Case {
        labels: vec![label],
        guard: Some(guard),
        arrow: true,
        body: vec![body],
    });
    assert_eq!(tree.children(rule), vec![label, guard, body]);
    assert_eq!(tree.kind(rule).statement_list(), None);

    let service = tree.ident("S");
    let uses = tree.alloc(NodeKind::Uses(service));
    let module = tree.alloc(NodeKind::Module {
        annotations: Vec::new(),
        open: false,
        name: "m".to_owned(),
        directives: vec![uses],
    });
    assert_eq!(tree.children(module), vec![uses]);
    assert_eq!(tree.kind(module).statement_list(), Some(&[uses][..]));
    assert_eq!(tree.kind(module).name(), "module");
}
