//! Declaration Headers
//!
//! One-line headers of methods, classes and variables for outlines and
//! navigators. A template such as `"%flags% %type% %name%%parameters%"` is
//! filled with the printed pieces of the declaration:
//!
//! | Placeholder | Piece |
//! |---|---|
//! | `%annotations%` | annotations |
//! | `%flags%` | modifier keywords |
//! | `%typeparameters%` | `<T, U>` |
//! | `%type%` | return or variable type |
//! | `%name%` | name (class name for constructors) |
//! | `%parameters%` | `(int a, String b)` |
//! | `%throws%` | `throws E1, E2` |
//! | `%extends%` | `extends Base` (interfaces: the extended list) |
//! | `%implements%` | `implements I1, I2` |
//!
//! Placeholders without a piece, and any other `%word%`, print as nothing.
//! Type names print as written; no imports are planned.

use javelin_ir::{NodeId, NodeKind};

use crate::imports::ResolvedNames;
use crate::printer::Printer;
use crate::PrintInput;

/// A piece of a declaration header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Placeholder {
    Annotations,
    Flags,
    TypeParameters,
    Type,
    Name,
    Parameters,
    Throws,
    Extends,
    Implements,
}

impl Placeholder {
    pub(crate) const fn token(self) -> &'static str {
        match self {
            Placeholder::Annotations => "%annotations%",
            Placeholder::Flags => "%flags%",
            Placeholder::TypeParameters => "%typeparameters%",
            Placeholder::Type => "%type%",
            Placeholder::Name => "%name%",
            Placeholder::Parameters => "%parameters%",
            Placeholder::Throws => "%throws%",
            Placeholder::Extends => "%extends%",
            Placeholder::Implements => "%implements%",
        }
    }
}

/// Header of a method or constructor.
pub fn method_header(input: &PrintInput<'_>, method: NodeId, template: &str) -> String {
    header(input, method, template, |kind| matches!(kind, NodeKind::Method(_)))
}

/// Header of a class, interface, enum or annotation type.
pub fn class_header(input: &PrintInput<'_>, class: NodeId, template: &str) -> String {
    header(input, class, template, |kind| matches!(kind, NodeKind::Class(_)))
}

/// Header of a field, local variable or parameter.
pub fn variable_header(input: &PrintInput<'_>, variable: NodeId, template: &str) -> String {
    header(input, variable, template, |kind| matches!(kind, NodeKind::Variable(_)))
}

fn header(
    input: &PrintInput<'_>,
    node: NodeId,
    template: &str,
    accepts: fn(&NodeKind) -> bool,
) -> String {
    let names = ResolvedNames::new();
    let fragments = match input.tree.try_get(node) {
        Some(n) if accepts(&n.kind) => {
            let mut printer = Printer::new(input.parts(&names, &[]));
            printer.header_fragments(node)
        }
        _ => Vec::new(),
    };
    let mut text = template.to_owned();
    for (placeholder, value) in &fragments {
        text = text.replace(placeholder.token(), value);
    }
    strip_placeholders(&text)
}

/// Remove every `%word%` (ASCII lowercase letters, possibly none).
fn strip_placeholders(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let word = after.bytes().take_while(u8::is_ascii_lowercase).count();
        if after.as_bytes().get(word) == Some(&b'%') {
            rest = &after[word + 1..];
        } else {
            out.push('%');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
