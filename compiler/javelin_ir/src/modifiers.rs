//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Java modifier keywords attached to a declaration.
    ///
    /// Iteration order of [`Modifiers::keywords`] is the canonical source order
    /// (`public protected private abstract static final ...`).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const TRANSIENT = 1 << 6;
        const VOLATILE = 1 << 7;
        const SYNCHRONIZED = 1 << 8;
        const NATIVE = 1 << 9;
        const STRICTFP = 1 << 10;
        const DEFAULT = 1 << 11;
        const SEALED = 1 << 12;
        const NON_SEALED = 1 << 13;
    }
}

const KEYWORDS: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::STRICTFP, "strictfp"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::SEALED, "sealed"),
    (Modifiers::NON_SEALED, "non-sealed"),
];

impl Modifiers {
    /// Keywords of the set flags, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        KEYWORDS
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
    }

    /// Width of the keywords joined by single spaces, including one trailing
    /// space when any flag is set.
    pub fn printed_width(self) -> usize {
        self.keywords().map(|kw| kw.len() + 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_in_canonical_order() {
        let mods = Modifiers::FINAL | Modifiers::PUBLIC | Modifiers::STATIC;
        let kws: Vec<_> = mods.keywords().collect();
        assert_eq!(kws, vec!["public", "static", "final"]);
    }

    #[test]
    fn printed_width_counts_trailing_space() {
        assert_eq!(Modifiers::empty().printed_width(), 0);
        assert_eq!(Modifiers::PRIVATE.printed_width(), "private ".len());
    }
}
