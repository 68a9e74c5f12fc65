//! Dangling `else` detection.

use javelin_ir::{NodeId, NodeKind, SyntaxTree};

/// Whether `stmt` ends in an `if` without `else`, so an `else` printed
/// after it would bind to that inner `if`.
pub fn has_dangling_else(tree: &SyntaxTree, stmt: NodeId) -> bool {
    let mut current = stmt;
    loop {
        current = match tree.kind(current) {
            NodeKind::If {
                else_stmt: None, ..
            } => return true,
            NodeKind::While { body, .. }
            | NodeKind::DoWhile { body, .. }
            | NodeKind::For { body, .. }
            | NodeKind::ForEach { body, .. }
            | NodeKind::Synchronized { body, .. }
            | NodeKind::Labeled { body, .. } => *body,
            NodeKind::Block { stmts, .. } if stmts.len() == 1 => stmts[0],
            _ => return false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn if_stmt(tree: &mut SyntaxTree, else_stmt: Option<NodeId>) -> NodeId {
        let cond = tree.ident("c");
        let then_stmt = tree.alloc(NodeKind::Empty);
        tree.alloc(NodeKind::If {
            cond,
            then_stmt,
            else_stmt,
        })
    }

    #[test]
    fn bare_if_dangles() {
        let mut tree = SyntaxTree::new();
        let stmt = if_stmt(&mut tree, None);
        assert!(has_dangling_else(&tree, stmt));
    }

    #[test]
    fn loops_and_single_blocks_are_transparent() {
        let mut tree = SyntaxTree::new();
        let inner = if_stmt(&mut tree, None);
        let block = tree.block(vec![inner]);
        let cond = tree.ident("c");
        let lp = tree.alloc(NodeKind::While { cond, body: block });
        let labeled = tree.alloc(NodeKind::Labeled {
            label: "outer".to_owned(),
            body: lp,
        });
        assert!(has_dangling_else(&tree, labeled));
    }

    #[test]
    fn complete_if_and_multi_statement_blocks_do_not() {
        let mut tree = SyntaxTree::new();
        let other = tree.alloc(NodeKind::Empty);
        let complete = if_stmt(&mut tree, Some(other));
        assert!(!has_dangling_else(&tree, complete));

        let inner = if_stmt(&mut tree, None);
        let extra = tree.alloc(NodeKind::Empty);
        let block = tree.block(vec![inner, extra]);
        assert!(!has_dangling_else(&tree, block));
    }
}
