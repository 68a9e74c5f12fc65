use super::*;

#[test]
fn default_matches_conventional_java_style() {
    let config = StyleConfig::default();
    assert_eq!(config.right_margin(), 80);
    assert_eq!(config.margins.tab_size, 8);
    assert_eq!(config.indent_size(), 4);
    assert_eq!(config.continuation_indent(), 8);
    assert_eq!(config.braces.class_decl, BracePlacement::SameLine);
    assert_eq!(config.wrap.method_params, WrapStyle::Never);
    assert_eq!(config.redundant_braces.if_braces, BracesGeneration::LeaveAlone);
}

#[test]
fn with_right_margin_keeps_other_defaults() {
    let config = StyleConfig::with_right_margin(20);
    assert_eq!(config.right_margin(), 20);
    assert_eq!(config.indent_size(), INDENT_SIZE);
}

#[test]
fn with_indent_size() {
    let config = StyleConfig::with_indent_size(2);
    assert_eq!(config.indent_size(), 2);
    assert_eq!(config.right_margin(), RIGHT_MARGIN);
}

#[test]
fn star_packages() {
    let mut imports = ImportStyle::default();
    imports.star_packages.push("java.util".to_owned());
    assert!(imports.is_star_package("java.util"));
    assert!(!imports.is_star_package("java.util.concurrent"));
}

#[test]
fn import_groups_prefer_longest_prefix() {
    let imports = ImportStyle {
        groups: vec!["java".to_owned(), "java.util".to_owned(), "org".to_owned()],
        ..ImportStyle::default()
    };
    assert_eq!(imports.group_of("java.io.File", false), Some(0));
    assert_eq!(imports.group_of("java.util.List", false), Some(1));
    assert_eq!(imports.group_of("org.x.Y", false), Some(2));
    assert_eq!(imports.group_of("com.x.Y", false), Some(3));
    assert_eq!(imports.group_of("java.util.List", true), Some(4));
    // `javax` is not inside the `java` package.
    assert_eq!(imports.group_of("javax.swing.JList", false), Some(3));
}

#[test]
fn grouping_disabled_by_default() {
    assert_eq!(ImportStyle::default().group_of("java.util.List", false), None);
}
