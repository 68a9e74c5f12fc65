//! Style configuration.
//!
//! `StyleConfig` is read-only for the duration of a print. It is grouped by
//! concern; every group has a `Default` following the conventional Java
//! layout (right margin 80, indent 4, continuation indent 8, braces on the
//! same line, no wrapping unless a line is too long where noted).

#[cfg(test)]
mod tests;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default right margin.
pub const RIGHT_MARGIN: usize = 80;

/// Default indentation step.
pub const INDENT_SIZE: usize = 4;

/// Default continuation indentation for wrapped lines.
pub const CONTINUATION_INDENT: usize = 8;

/// Default tab width.
pub const TAB_SIZE: usize = 8;

/// How a list of items or a single construct may be split across lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WrapStyle {
    /// Keep on one line regardless of width.
    #[default]
    Never,
    /// Break only when the item would cross the right margin.
    IfLong,
    /// Always break before the item.
    Always,
}

/// Where the opening brace of a body goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BracePlacement {
    #[default]
    SameLine,
    /// On its own line at the header's indentation.
    NewLine,
    /// On its own line at the body's indentation.
    NewLineIndented,
    /// On its own line, half an indent step in.
    NewLineHalfIndented,
}

/// Treatment of braces around a single-statement body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BracesGeneration {
    /// Always wrap the body in a block.
    Generate,
    /// Keep whatever the tree has.
    #[default]
    LeaveAlone,
    /// Unwrap blocks holding exactly one statement.
    Eliminate,
}

/// Margins and indentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Margins {
    pub right_margin: usize,
    pub tab_size: usize,
    pub indent_size: usize,
    pub continuation_indent: usize,
    /// Pad with spaces only; otherwise runs of `tab_size` columns become tabs.
    pub expand_tabs: bool,
    /// Extra indentation of a labeled statement's body.
    pub label_indent: usize,
    /// Labels start at column 0 instead of the current margin.
    pub absolute_label_indent: bool,
    pub indent_top_level_class_members: bool,
    pub indent_cases_from_switch: bool,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            right_margin: RIGHT_MARGIN,
            tab_size: TAB_SIZE,
            indent_size: INDENT_SIZE,
            continuation_indent: CONTINUATION_INDENT,
            expand_tabs: true,
            label_indent: 0,
            absolute_label_indent: false,
            indent_top_level_class_members: true,
            indent_cases_from_switch: true,
        }
    }
}

/// Per-construct wrap styles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WrapStyles {
    pub extends_implements_keyword: WrapStyle,
    pub extends_implements_list: WrapStyle,
    pub method_params: WrapStyle,
    pub lambda_params: WrapStyle,
    pub method_call_args: WrapStyle,
    pub annotation_args: WrapStyle,
    pub annotations: WrapStyle,
    pub chained_method_calls: WrapStyle,
    /// Break after the `.` of a chained call instead of before it.
    pub after_dot_in_chained_calls: bool,
    pub throws_keyword: WrapStyle,
    pub throws_list: WrapStyle,
    pub array_init: WrapStyle,
    pub enum_constants: WrapStyle,
    pub union_types: WrapStyle,
    /// `to` of qualified `exports` and `opens` directives.
    pub exports_to_keyword: WrapStyle,
    pub exports_to_list: WrapStyle,
    /// `with` of `provides` directives.
    pub provides_with_keyword: WrapStyle,
    pub provides_with_list: WrapStyle,
    /// Parts of a `for` header after the first `;`.
    pub for_header: WrapStyle,
    /// Unbraced bodies of `for` and enhanced `for`.
    pub for_statement: WrapStyle,
    pub if_statement: WrapStyle,
    pub while_statement: WrapStyle,
    pub do_while_statement: WrapStyle,
    pub assert_detail: WrapStyle,
    pub binary_ops: WrapStyle,
    pub ternary_ops: WrapStyle,
    pub assign_ops: WrapStyle,
    /// Keep the assignment operator at the end of the first line when wrapping.
    pub after_assign_ops: bool,
}

impl Default for WrapStyles {
    fn default() -> Self {
        WrapStyles {
            extends_implements_keyword: WrapStyle::Never,
            extends_implements_list: WrapStyle::Never,
            method_params: WrapStyle::Never,
            lambda_params: WrapStyle::Never,
            method_call_args: WrapStyle::Never,
            annotation_args: WrapStyle::Never,
            annotations: WrapStyle::Always,
            chained_method_calls: WrapStyle::Never,
            after_dot_in_chained_calls: false,
            throws_keyword: WrapStyle::Never,
            throws_list: WrapStyle::Never,
            array_init: WrapStyle::Never,
            enum_constants: WrapStyle::Never,
            union_types: WrapStyle::Never,
            exports_to_keyword: WrapStyle::Never,
            exports_to_list: WrapStyle::Never,
            provides_with_keyword: WrapStyle::Never,
            provides_with_list: WrapStyle::Never,
            for_header: WrapStyle::Never,
            for_statement: WrapStyle::Always,
            if_statement: WrapStyle::Always,
            while_statement: WrapStyle::Always,
            do_while_statement: WrapStyle::Always,
            assert_detail: WrapStyle::Never,
            binary_ops: WrapStyle::Never,
            ternary_ops: WrapStyle::Never,
            assign_ops: WrapStyle::Never,
            after_assign_ops: false,
        }
    }
}

/// Brace placement per declaration kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BracePlacements {
    pub class_decl: BracePlacement,
    pub module_decl: BracePlacement,
    pub method_decl: BracePlacement,
    /// Statements, initializers, lambdas and anonymous class bodies.
    pub other: BracePlacement,
}

/// Brace generation per statement kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RedundantBraces {
    pub if_braces: BracesGeneration,
    pub for_braces: BracesGeneration,
    pub while_braces: BracesGeneration,
    pub do_while_braces: BracesGeneration,
}

/// Whether wrapped items align with the first item or use continuation indent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Alignment {
    pub method_params: bool,
    pub lambda_params: bool,
    pub call_args: bool,
    pub implements: bool,
    pub throws: bool,
    pub array_init: bool,
    pub binary_op: bool,
    pub assignment: bool,
    pub for_header: bool,
    pub union_types: bool,
    /// Target modules of `exports` and `opens`.
    pub exports: bool,
    /// Implementations listed by `provides`.
    pub provides: bool,
}

/// Spacing toggles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Spacing {
    pub before_method_decl_paren: bool,
    pub before_method_call_paren: bool,
    pub before_annotation_paren: bool,
    pub before_if_paren: bool,
    pub before_for_paren: bool,
    pub before_while_paren: bool,
    pub before_catch_paren: bool,
    pub before_switch_paren: bool,
    pub before_synchronized_paren: bool,

    pub around_binary_ops: bool,
    pub around_ternary_ops: bool,
    pub around_assign_ops: bool,
    pub around_unary_ops: bool,
    pub around_lambda_arrow: bool,
    pub around_method_ref_colons: bool,

    pub before_comma: bool,
    pub after_comma: bool,
    pub before_semi: bool,
    pub after_semi: bool,
    pub before_colon: bool,
    pub after_colon: bool,
    pub after_type_cast: bool,

    pub before_class_decl_left_brace: bool,
    pub before_module_decl_left_brace: bool,
    pub before_method_decl_left_brace: bool,
    /// `if`, `else`, loops, `try`, `catch`, `finally`, `switch`,
    /// `synchronized` and static initializers.
    pub before_statement_left_brace: bool,
    pub before_array_init_left_brace: bool,

    pub before_else: bool,
    pub before_catch: bool,
    pub before_finally: bool,
    pub before_while: bool,

    pub within_parens: bool,
    pub within_method_decl_parens: bool,
    pub within_method_call_parens: bool,
    pub within_annotation_parens: bool,
    pub within_lambda_parens: bool,
    /// `if`, `for`, `while`, `switch`, `catch` and `synchronized` headers.
    pub within_statement_parens: bool,
    pub within_type_cast_parens: bool,
    pub within_array_init_brackets: bool,
    pub within_braces: bool,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing {
            before_method_decl_paren: false,
            before_method_call_paren: false,
            before_annotation_paren: false,
            before_if_paren: true,
            before_for_paren: true,
            before_while_paren: true,
            before_catch_paren: true,
            before_switch_paren: true,
            before_synchronized_paren: true,

            around_binary_ops: true,
            around_ternary_ops: true,
            around_assign_ops: true,
            around_unary_ops: false,
            around_lambda_arrow: true,
            around_method_ref_colons: false,

            before_comma: false,
            after_comma: true,
            before_semi: false,
            after_semi: true,
            before_colon: true,
            after_colon: true,
            after_type_cast: true,

            before_class_decl_left_brace: true,
            before_module_decl_left_brace: true,
            before_method_decl_left_brace: true,
            before_statement_left_brace: true,
            before_array_init_left_brace: false,

            before_else: true,
            before_catch: true,
            before_finally: true,
            before_while: true,

            within_parens: false,
            within_method_decl_parens: false,
            within_method_call_parens: false,
            within_annotation_parens: false,
            within_lambda_parens: false,
            within_statement_parens: false,
            within_type_cast_parens: false,
            within_array_init_brackets: false,
            within_braces: false,
        }
    }
}

/// Keyword placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Placement {
    pub else_on_new_line: bool,
    pub while_on_new_line: bool,
    pub catch_on_new_line: bool,
    pub finally_on_new_line: bool,
    pub new_line_after_modifiers: bool,
    /// Print `else if` on one line.
    pub special_else_if: bool,
    /// Always parenthesize a single implicitly typed lambda parameter.
    pub parens_around_single_lambda_param: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            else_on_new_line: false,
            while_on_new_line: false,
            catch_on_new_line: false,
            finally_on_new_line: false,
            new_line_after_modifiers: false,
            special_else_if: true,
            parens_around_single_lambda_param: false,
        }
    }
}

/// Blank line counts around declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BlankLines {
    pub before_package: usize,
    pub after_package: usize,
    pub before_imports: usize,
    pub after_imports: usize,
    pub before_class: usize,
    pub after_class: usize,
    pub after_class_header: usize,
    pub before_class_closing_brace: usize,
    pub after_anonymous_class_header: usize,
    pub before_anonymous_class_closing_brace: usize,
    pub before_fields: usize,
    pub after_fields: usize,
    pub before_methods: usize,
    pub after_methods: usize,
    pub after_module_header: usize,
    pub before_module_closing_brace: usize,
}

impl Default for BlankLines {
    fn default() -> Self {
        BlankLines {
            before_package: 0,
            after_package: 1,
            before_imports: 1,
            after_imports: 1,
            before_class: 1,
            after_class: 0,
            after_class_header: 0,
            before_class_closing_brace: 0,
            after_anonymous_class_header: 0,
            before_anonymous_class_closing_brace: 0,
            before_fields: 0,
            after_fields: 0,
            before_methods: 1,
            after_methods: 0,
            after_module_header: 0,
            before_module_closing_brace: 0,
        }
    }
}

/// Import handling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ImportStyle {
    /// Packages imported on demand (`import pkg.*;`) instead of per class.
    pub star_packages: Vec<String>,
    /// Import nested classes directly instead of through their outer class.
    pub import_inner_classes: bool,
    /// Prefixes defining import groups, in print order. Imports matching no
    /// prefix form a group after the listed ones; static imports follow as
    /// a group of their own. Empty disables grouping.
    pub groups: Vec<String>,
}

impl ImportStyle {
    /// Whether on-demand import is configured for `package`.
    pub fn is_star_package(&self, package: &str) -> bool {
        self.star_packages.iter().any(|p| p == package)
    }

    /// Group index of an import; `None` when grouping is disabled.
    pub fn group_of(&self, name: &str, is_static: bool) -> Option<usize> {
        if self.groups.is_empty() {
            return None;
        }
        if is_static {
            return Some(self.groups.len() + 1);
        }
        let best = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, prefix)| {
                name.starts_with(prefix.as_str())
                    && (name.len() == prefix.len()
                        || prefix.ends_with('.')
                        || name.as_bytes().get(prefix.len()) == Some(&b'.'))
            })
            .max_by_key(|(_, prefix)| prefix.len())
            .map(|(i, _)| i);
        Some(best.unwrap_or(self.groups.len()))
    }
}

/// Complete style policy for a print.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StyleConfig {
    pub margins: Margins,
    pub wrap: WrapStyles,
    pub braces: BracePlacements,
    pub redundant_braces: RedundantBraces,
    pub alignment: Alignment,
    pub spacing: Spacing,
    pub placement: Placement,
    pub blank_lines: BlankLines,
    pub imports: ImportStyle,
}

impl StyleConfig {
    /// Default style with the given right margin.
    pub fn with_right_margin(right_margin: usize) -> Self {
        let mut config = StyleConfig::default();
        config.margins.right_margin = right_margin;
        config
    }

    /// Default style with the given indent size.
    pub fn with_indent_size(indent_size: usize) -> Self {
        let mut config = StyleConfig::default();
        config.margins.indent_size = indent_size;
        config
    }

    #[inline]
    pub fn right_margin(&self) -> usize {
        self.margins.right_margin
    }

    #[inline]
    pub fn indent_size(&self) -> usize {
        self.margins.indent_size
    }

    #[inline]
    pub fn continuation_indent(&self) -> usize {
        self.margins.continuation_indent
    }
}
