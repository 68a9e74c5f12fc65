//! Read-only symbol oracle.
//!
//! The printer never resolves names itself. Semantic analysis hands it a
//! table of the packages, types and members that tree references point at,
//! linked by their enclosing element.

use rustc_hash::FxHashMap;

use crate::ElementId;

/// What an element is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    Class,
    Interface,
    Enum,
    Annotation,
    Field,
    Method,
}

impl ElementKind {
    /// Classes, interfaces, enums and annotation types.
    #[inline]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            ElementKind::Class | ElementKind::Interface | ElementKind::Enum | ElementKind::Annotation
        )
    }
}

/// A named program element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    /// Simple name; for packages the full dotted name.
    pub name: String,
    /// Package of a top-level type, type of a member or nested type.
    /// `None` for packages.
    pub enclosing: Option<ElementId>,
}

/// Elements referenced from one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    elements: Vec<Element>,
    by_qualified_name: FxHashMap<String, ElementId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId::new(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        self.elements.push(element);
        if let Some(qualified) = self.qualified_name(id) {
            self.by_qualified_name.insert(qualified, id);
        }
        id
    }

    /// Add a package (or return the existing one).
    pub fn package(&mut self, name: &str) -> ElementId {
        if let Some(&id) = self.by_qualified_name.get(name) {
            if self.kind(id) == Some(ElementKind::Package) {
                return id;
            }
        }
        self.push(Element {
            kind: ElementKind::Package,
            name: name.to_owned(),
            enclosing: None,
        })
    }

    /// Add a type or member enclosed by `enclosing`.
    pub fn add(&mut self, kind: ElementKind, name: &str, enclosing: ElementId) -> ElementId {
        self.push(Element {
            kind,
            name: name.to_owned(),
            enclosing: Some(enclosing),
        })
    }

    /// Add a class by its qualified name, creating the package as needed.
    pub fn class(&mut self, qualified: &str) -> ElementId {
        match qualified.rsplit_once('.') {
            Some((pkg, simple)) => {
                let pkg = self.package(pkg);
                self.add(ElementKind::Class, simple, pkg)
            }
            None => {
                let pkg = self.package("");
                self.add(ElementKind::Class, qualified, pkg)
            }
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.get(id).map(|e| e.kind)
    }

    pub fn simple_name(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    pub fn enclosing(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.enclosing)
    }

    pub fn is_type(&self, id: ElementId) -> bool {
        self.kind(id).is_some_and(ElementKind::is_type)
    }

    /// Dotted name from the package down. Members of the unnamed package
    /// have no package prefix.
    pub fn qualified_name(&self, id: ElementId) -> Option<String> {
        let element = self.get(id)?;
        match element.enclosing {
            None => Some(element.name.clone()),
            Some(outer) => {
                let prefix = self.qualified_name(outer)?;
                if prefix.is_empty() {
                    Some(element.name.clone())
                } else {
                    Some(format!("{prefix}.{}", element.name))
                }
            }
        }
    }

    /// Package containing `id` (a package is its own package).
    pub fn package_of(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        loop {
            let element = self.get(current)?;
            if element.kind == ElementKind::Package {
                return Some(current);
            }
            current = element.enclosing?;
        }
    }

    /// Whether `inner` is `outer` or nested (at any depth) inside it.
    pub fn is_within(&self, inner: ElementId, outer: ElementId) -> bool {
        let mut current = Some(inner);
        while let Some(id) = current {
            if id == outer {
                return true;
            }
            current = self.enclosing(id);
        }
        false
    }

    pub fn lookup(&self, qualified: &str) -> Option<ElementId> {
        self.by_qualified_name.get(qualified).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        let mut table = SymbolTable::new();
        let list = table.class("java.util.List");
        let entry = table.add(ElementKind::Interface, "Entry", list);
        let size = table.add(ElementKind::Method, "size", list);
        assert_eq!(table.qualified_name(entry).as_deref(), Some("java.util.List.Entry"));
        assert_eq!(table.lookup("java.util.List"), Some(list));
        assert!(table.is_type(entry));
        assert!(!table.is_type(size));
        assert_eq!(table.package_of(size), table.lookup("java.util"));
    }

    #[test]
    fn packages_are_shared() {
        let mut table = SymbolTable::new();
        let a = table.class("p.A");
        let b = table.class("p.B");
        assert_eq!(table.package_of(a), table.package_of(b));
    }

    #[test]
    fn unnamed_package() {
        let mut table = SymbolTable::new();
        let a = table.class("A");
        assert_eq!(table.qualified_name(a).as_deref(), Some("A"));
    }

    #[test]
    fn nesting() {
        let mut table = SymbolTable::new();
        let outer = table.class("p.Outer");
        let inner = table.add(ElementKind::Class, "Inner", outer);
        assert!(table.is_within(inner, outer));
        assert!(!table.is_within(outer, inner));
    }
}
