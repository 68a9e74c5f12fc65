//! Operators, primitive types and literal kinds.

/// Binding strength of expression forms, loosest first.
///
/// Mirrors the Java operator precedence table. A child printed at a position
/// requiring precedence `p` is parenthesized when its own precedence is lower.
pub mod prec {
    /// Statement position: expression statements and declarations.
    pub const NOT_EXPRESSION: i8 = -1;
    /// No surrounding operator.
    pub const NONE: i8 = 0;
    pub const ASSIGN: i8 = 1;
    pub const ASSIGN_OP: i8 = 2;
    pub const CONDITIONAL: i8 = 3;
    pub const OR: i8 = 4;
    pub const AND: i8 = 5;
    pub const BIT_OR: i8 = 6;
    pub const BIT_XOR: i8 = 7;
    pub const BIT_AND: i8 = 8;
    pub const EQUALITY: i8 = 9;
    pub const ORDERING: i8 = 10;
    pub const SHIFT: i8 = 11;
    pub const ADDITIVE: i8 = 12;
    pub const MULTIPLICATIVE: i8 = 13;
    pub const PREFIX: i8 = 14;
    pub const POSTFIX: i8 = 15;
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Source text of the operator.
    pub const fn text(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    /// Precedence of the operator (see [`prec`]).
    pub const fn precedence(self) -> i8 {
        match self {
            BinaryOp::Or => prec::OR,
            BinaryOp::And => prec::AND,
            BinaryOp::BitOr => prec::BIT_OR,
            BinaryOp::BitXor => prec::BIT_XOR,
            BinaryOp::BitAnd => prec::BIT_AND,
            BinaryOp::Eq | BinaryOp::NotEq => prec::EQUALITY,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => prec::ORDERING,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => prec::SHIFT,
            BinaryOp::Add | BinaryOp::Sub => prec::ADDITIVE,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => prec::MULTIPLICATIVE,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
    Complement,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    /// Source text of the operator.
    pub const fn text(self) -> &'static str {
        match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Complement => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }

    /// Whether the operator is written before its operand.
    pub const fn is_prefix(self) -> bool {
        !matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }

    /// Precedence of the operator (see [`prec`]).
    pub const fn precedence(self) -> i8 {
        if self.is_prefix() {
            prec::PREFIX
        } else {
            prec::POSTFIX
        }
    }
}

/// Primitive type keywords.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    /// Keyword text.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }
}

/// Kind of a literal value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

/// Bound kind of a wildcard type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends,
    Super,
}

impl WildcardBound {
    /// Keyword text.
    pub const fn keyword(self) -> &'static str {
        match self {
            WildcardBound::Extends => "extends",
            WildcardBound::Super => "super",
        }
    }
}

/// Flavor of a type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    /// Declaration keyword, without a leading `@` for annotation types.
    pub const fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface | ClassKind::Annotation => "interface",
            ClassKind::Enum => "enum",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn postfix_operators_are_not_prefix() {
        assert!(UnaryOp::Neg.is_prefix());
        assert!(!UnaryOp::PostInc.is_prefix());
        assert_eq!(UnaryOp::PostDec.text(), "--");
    }
}
