use javelin_ir::{
    ClassDecl, ClassKind, CommentMap, ElementKind, Modifiers, NodeKind, Span, SymbolTable,
    SyntaxTree,
};
use pretty_assertions::assert_eq;

use super::*;

struct Fixture {
    tree: SyntaxTree,
    symbols: SymbolTable,
    style: ImportStyle,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            tree: SyntaxTree::new(),
            symbols: SymbolTable::new(),
            style: ImportStyle::default(),
        }
    }

    fn class(&mut self, name: &str, element: Option<ElementId>, members: Vec<NodeId>) -> NodeId {
        self.tree.alloc(NodeKind::Class(ClassDecl {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            kind: ClassKind::Class,
            name: name.to_owned(),
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            members,
            element,
        }))
    }

    /// A field whose type references `element`; returns (field, type ref).
    fn field_of(&mut self, element: ElementId, written: &str, name: &str) -> (NodeId, NodeId) {
        let ty = self.tree.name_ref(element, written);
        (self.tree.variable(ty, name, None), ty)
    }

    fn unit(&mut self, package: &str, imports: &[&str], types: Vec<NodeId>) -> NodeId {
        let package = self.tree.alloc(NodeKind::Package {
            annotations: Vec::new(),
            name: package.to_owned(),
        });
        let imports = imports
            .iter()
            .map(|name| {
                self.tree.alloc(NodeKind::Import {
                    name: (*name).to_owned(),
                    is_static: false,
                })
            })
            .collect();
        self.tree.alloc(NodeKind::CompilationUnit {
            package: Some(package),
            imports,
            types,
        })
    }

    fn analyze(&self, root: NodeId) -> ImportPlan {
        let comments = CommentMap::new();
        let original = OriginalSource::new("", &self.tree, &comments);
        ImportAnalysis::analyze(&self.tree, &self.symbols, &self.style, original, root)
    }
}

#[test]
fn second_type_with_same_simple_name_is_qualified() {
    let mut f = Fixture::new();
    let util_list = f.symbols.class("java.util.List");
    let other_list = f.symbols.class("pkg.List");
    let (a, a_ty) = f.field_of(util_list, "List", "a");
    let (b, b_ty) = f.field_of(other_list, "pkg.List", "b");
    let class = f.class("A", None, vec![a, b]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("List"));
    assert_eq!(plan.names.get(b_ty), Some("pkg.List"));
    assert_eq!(plan.added, vec!["java.util.List".to_owned()]);
}

#[test]
fn implicit_packages_need_no_import() {
    let mut f = Fixture::new();
    let string = f.symbols.class("java.lang.String");
    let helper = f.symbols.class("p.Helper");
    let (a, a_ty) = f.field_of(string, "String", "a");
    let (b, b_ty) = f.field_of(helper, "Helper", "b");
    let class = f.class("A", None, vec![a, b]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("String"));
    assert_eq!(plan.names.get(b_ty), Some("Helper"));
    assert!(plan.added.is_empty());
}

#[test]
fn existing_import_shadows_same_package_type() {
    let mut f = Fixture::new();
    let imported = f.symbols.class("a.List");
    let local = f.symbols.class("p.List");
    let (x, x_ty) = f.field_of(local, "List", "x");
    let (y, y_ty) = f.field_of(imported, "List", "y");
    let class = f.class("A", None, vec![x, y]);
    let unit = f.unit("p", &["a.List"], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(x_ty), Some("p.List"));
    assert_eq!(plan.names.get(y_ty), Some("List"));
    assert!(plan.added.is_empty());
}

#[test]
fn star_packages_add_one_on_demand_import() {
    let mut f = Fixture::new();
    f.style.star_packages.push("java.util".to_owned());
    let list = f.symbols.class("java.util.List");
    let map = f.symbols.class("java.util.Map");
    let (a, a_ty) = f.field_of(list, "List", "a");
    let (b, b_ty) = f.field_of(map, "Map", "b");
    let class = f.class("A", None, vec![a, b]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("List"));
    assert_eq!(plan.names.get(b_ty), Some("Map"));
    assert_eq!(plan.added, vec!["java.util.*".to_owned()]);
}

#[test]
fn existing_on_demand_import_is_reused() {
    let mut f = Fixture::new();
    let list = f.symbols.class("java.util.List");
    let (a, a_ty) = f.field_of(list, "List", "a");
    let class = f.class("A", None, vec![a]);
    let unit = f.unit("p", &["java.util.*"], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("List"));
    assert!(plan.added.is_empty());
}

#[test]
fn nested_types_go_through_their_outer_type() {
    let mut f = Fixture::new();
    let map = f.symbols.class("java.util.Map");
    let entry = f.symbols.add(ElementKind::Interface, "Entry", map);
    let (a, a_ty) = f.field_of(entry, "Map.Entry", "a");
    let class = f.class("A", None, vec![a]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("Map.Entry"));
    assert_eq!(plan.added, vec!["java.util.Map".to_owned()]);

    f.style.import_inner_classes = true;
    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("Entry"));
    assert_eq!(plan.added, vec!["java.util.Map.Entry".to_owned()]);
}

#[test]
fn static_members_print_through_owner() {
    let mut f = Fixture::new();
    let collections = f.symbols.class("java.util.Collections");
    let empty = f.symbols.add(ElementKind::Method, "emptyList", collections);
    let target = f.tree.name_ref(empty, "Collections.emptyList");
    let call = f.tree.expr_stmt(target);
    let body = f.tree.block(vec![call]);
    let class = f.class("A", None, vec![body]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(target), Some("Collections.emptyList"));
    assert_eq!(plan.added, vec!["java.util.Collections".to_owned()]);
}

#[test]
fn enclosing_classes_make_members_visible() {
    let mut f = Fixture::new();
    let outer = f.symbols.class("q.Outer");
    let inner = f.symbols.add(ElementKind::Class, "Inner", outer);
    let count = f.symbols.add(ElementKind::Field, "COUNT", outer);
    let (a, a_ty) = f.field_of(inner, "Outer.Inner", "a");
    let count_ref = f.tree.name_ref(count, "Outer.COUNT");
    let init = f.tree.expr_stmt(count_ref);
    let class = f.class("Outer", Some(outer), vec![a, init]);
    let unit = f.unit("q", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), Some("Inner"));
    assert_eq!(plan.names.get(count_ref), Some("COUNT"));
    assert!(plan.added.is_empty());
}

#[test]
fn unknown_elements_print_as_written() {
    let mut f = Fixture::new();
    let bogus = ElementId::new(42);
    let (a, a_ty) = f.field_of(bogus, "Missing", "a");
    let class = f.class("A", None, vec![a]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(a_ty), None);
    assert!(plan.added.is_empty());
}

#[test]
fn unchanged_subtrees_are_not_resolved() {
    let mut f = Fixture::new();
    let list = f.symbols.class("java.util.List");
    let ty = f.tree.alloc_original(
        NodeKind::NameRef {
            element: Some(list),
            written: "List".to_owned(),
        },
        Span::new(0, 4),
    );
    let class = f.class("A", None, vec![ty]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(ty), None);
    assert!(plan.added.is_empty());
}

#[test]
fn names_used_by_copied_code_are_not_rebound() {
    let mut f = Fixture::new();
    let lang_string = f.symbols.class("java.lang.String");
    let other_string = f.symbols.class("com.x.String");
    let (t, t_ty) = f.field_of(other_string, "com.x.String", "t");
    let copied_ty = f.tree.alloc_original(
        NodeKind::NameRef {
            element: Some(lang_string),
            written: "String".to_owned(),
        },
        Span::new(0, 6),
    );
    let s = f.tree.alloc_original(
        NodeKind::Variable(javelin_ir::VariableDecl {
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            ty: Some(copied_ty),
            name: "s".to_owned(),
            init: None,
            varargs: false,
        }),
        Span::new(0, 9),
    );
    // The generated field comes first; the claim must still win.
    let class = f.class("A", None, vec![t, s]);
    let unit = f.unit("p", &[], vec![class]);

    let plan = f.analyze(unit);
    assert_eq!(plan.names.get(t_ty), Some("com.x.String"));
    assert!(plan.added.is_empty());
}
