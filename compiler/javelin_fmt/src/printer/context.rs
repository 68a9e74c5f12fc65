//! Per-position printing state.

use javelin_ir::{prec, NodeId};

/// State that depends on where in the tree a node is printed.
///
/// Passed by value into every printing function; a callee that needs a
/// different setting for its children derives a modified copy, so nothing
/// has to be restored on the way back out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PrintContext {
    /// Class or anonymous class body whose members are being printed.
    pub enclosing_class: Option<NodeId>,
    /// Printing the parameter list of a method or lambda.
    pub in_params: bool,
    /// Precedence the surrounding expression requires.
    pub prec: i8,
    /// Print comments attached to the nodes.
    pub comments: bool,
}

impl PrintContext {
    pub(crate) fn root() -> Self {
        PrintContext {
            enclosing_class: None,
            in_params: false,
            prec: prec::NOT_EXPRESSION,
            comments: true,
        }
    }

    #[must_use]
    pub(crate) fn with_prec(self, prec: i8) -> Self {
        PrintContext { prec, ..self }
    }

    #[must_use]
    pub(crate) fn in_class(self, class: NodeId) -> Self {
        PrintContext {
            enclosing_class: Some(class),
            in_params: false,
            ..self
        }
    }

    #[must_use]
    pub(crate) fn in_params(self) -> Self {
        PrintContext {
            in_params: true,
            ..self
        }
    }

    /// Statement position, as used for statements and member declarations.
    #[must_use]
    pub(crate) fn statement(self) -> Self {
        PrintContext {
            prec: prec::NOT_EXPRESSION,
            in_params: false,
            ..self
        }
    }
}
