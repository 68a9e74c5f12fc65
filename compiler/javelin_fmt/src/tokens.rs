//! Token text shared by the printer and the width estimator.
//!
//! Every separator, operator and generated literal is spelled here once, so
//! the estimate of a construct and its printed form agree on widths.

use std::borrow::Cow;
use std::fmt::Write;

use javelin_ir::{prec, BinaryOp, Literal, LiteralKind, NodeKind, UnaryOp};

use crate::config::Spacing;

/// A list separator and the spaces around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Separator {
    pub text: &'static str,
    pub space_before: bool,
    pub space_after: bool,
}

impl Separator {
    pub(crate) fn comma(spacing: &Spacing) -> Self {
        Separator {
            text: ",",
            space_before: spacing.before_comma,
            space_after: spacing.after_comma,
        }
    }

    /// `|` between the alternatives of a multi-catch.
    pub(crate) fn union(spacing: &Spacing) -> Self {
        Separator {
            text: "|",
            space_before: spacing.around_binary_ops,
            space_after: spacing.around_binary_ops,
        }
    }

    /// `&` between the bounds of a type variable.
    pub(crate) fn intersection(spacing: &Spacing) -> Self {
        Separator {
            text: "&",
            space_before: spacing.around_binary_ops,
            space_after: spacing.around_binary_ops,
        }
    }

    /// Width including both optional spaces.
    pub(crate) fn width(self) -> usize {
        self.text.len() + usize::from(self.space_before) + usize::from(self.space_after)
    }
}

/// Binding strength of an expression form. Forms that never need
/// parentheses report `i8::MAX`.
///
/// A node printed where the context requires a higher precedence than its
/// own is parenthesized.
pub(crate) fn precedence(kind: &NodeKind) -> i8 {
    match kind {
        NodeKind::Lambda { .. } | NodeKind::Assign { .. } => prec::ASSIGN,
        NodeKind::CompoundAssign { .. } => prec::ASSIGN_OP,
        NodeKind::Conditional { .. } => prec::CONDITIONAL,
        NodeKind::Binary { op, .. } => op.precedence(),
        NodeKind::Unary { op, .. } => op.precedence(),
        NodeKind::Cast { .. } => prec::PREFIX,
        NodeKind::InstanceOf { .. } => prec::ORDERING,
        _ => i8::MAX,
    }
}

/// `(` and `)` with optional inner padding.
pub(crate) fn parens_width(within: bool) -> usize {
    if within {
        4
    } else {
        2
    }
}

pub(crate) fn open_paren(within: bool) -> &'static str {
    if within {
        "( "
    } else {
        "("
    }
}

pub(crate) fn close_paren(within: bool) -> &'static str {
    if within {
        " )"
    } else {
        ")"
    }
}

/// Operator text surrounded by spaces when `around` is set.
pub(crate) fn spaced(op: &str, around: bool) -> Cow<'_, str> {
    if around {
        Cow::Owned(format!(" {op} "))
    } else {
        Cow::Borrowed(op)
    }
}

pub(crate) fn spaced_width(op: &str, around: bool) -> usize {
    op.len() + if around { 2 } else { 0 }
}

/// A binary operator whose right operand starts with the same sign needs a
/// space even when operators are not spaced (`a - -b`, `a + ++b`).
pub(crate) fn binary_needs_space(op: BinaryOp, rhs: &NodeKind, spacing: &Spacing) -> bool {
    if spacing.around_binary_ops {
        return true;
    }
    match rhs {
        NodeKind::Unary { op: unary, .. } => matches!(
            (op, unary),
            (BinaryOp::Add, UnaryOp::Pos | UnaryOp::PreInc)
                | (BinaryOp::Sub, UnaryOp::Neg | UnaryOp::PreDec)
        ),
        _ => false,
    }
}

/// A prefix operator applied to an operand starting with the same sign
/// needs a separating space (`- -x`, `+ ++x`).
pub(crate) fn unary_needs_space(op: UnaryOp, operand: &NodeKind, spacing: &Spacing) -> bool {
    if !op.is_prefix() {
        return false;
    }
    if spacing.around_unary_ops {
        return true;
    }
    match operand {
        NodeKind::Unary { op: inner, .. } => matches!(
            (op, inner),
            (UnaryOp::Pos | UnaryOp::PreInc, UnaryOp::Pos | UnaryOp::PreInc)
                | (UnaryOp::Neg | UnaryOp::PreDec, UnaryOp::Neg | UnaryOp::PreDec)
        ),
        _ => false,
    }
}

/// The arrow without the space that follows it; the body supplies that.
pub(crate) fn lambda_arrow(spacing: &Spacing) -> &'static str {
    if spacing.around_lambda_arrow {
        " ->"
    } else {
        "->"
    }
}

pub(crate) fn method_ref_colons(spacing: &Spacing) -> &'static str {
    if spacing.around_method_ref_colons {
        " :: "
    } else {
        "::"
    }
}

/// Source text of a generated literal.
pub(crate) fn literal_text(literal: &Literal) -> Cow<'_, str> {
    let value = literal.value.as_str();
    match literal.kind {
        LiteralKind::Int | LiteralKind::Double | LiteralKind::Boolean => Cow::Borrowed(value),
        LiteralKind::Null => Cow::Borrowed("null"),
        LiteralKind::Long if value.ends_with(&['L', 'l'][..]) => Cow::Borrowed(value),
        LiteralKind::Long => Cow::Owned(format!("{value}L")),
        LiteralKind::Float if value.ends_with(&['F', 'f'][..]) => Cow::Borrowed(value),
        LiteralKind::Float => Cow::Owned(format!("{value}F")),
        LiteralKind::Char => Cow::Owned(quote(value, '\'')),
        LiteralKind::String => Cow::Owned(quote(value, '"')),
    }
}

fn quote(value: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for c in value.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' if delimiter == '"' => out.push_str("\\\""),
            '\'' if delimiter == '\'' => out.push_str("\\'"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}
