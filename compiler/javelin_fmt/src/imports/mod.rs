//! Import analysis.
//!
//! Decides, for every symbol reference the printer will generate, whether it
//! prints as a simple name or qualified, and which imports the file needs
//! for that. It runs as a pre-pass over the tree so that imports required by
//! references deep inside a class body are known before the import block is
//! printed.
//!
//! # Resolution order
//!
//! For a reference to element `E`:
//!
//! 1. `E` is visible through class nesting at the reference: simple name.
//! 2. `E` is a top-level type of the current package or of `java.lang`:
//!    simple name, unless an import already claims the simple name.
//! 3. `E` is explicitly imported: simple name.
//! 4. Another element already prints under `E`'s simple name: qualified
//!    (a nested type qualifies through its resolved outer type).
//! 5. `E` is a field or method: `Owner.member` with the owner resolved by
//!    these same rules.
//! 6. `E`'s package is imported on demand, or configured to be: the
//!    on-demand import is added if missing, simple name.
//! 7. Otherwise a single-type import is added, simple name.
//!
//! Subtrees that will be copied verbatim are not resolved, their text is
//! fixed. Simple names they use are claimed before resolution starts, so
//! no generated reference can import a type that would rebind them.

#[cfg(test)]
mod tests;

use javelin_ir::{ElementId, ElementKind, NodeId, NodeKind, SymbolTable, SyntaxTree};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::ImportStyle;
use crate::original::OriginalSource;

/// Package whose types are always in scope.
const JAVA_LANG: &str = "java.lang";

/// Printed text of symbol references, by node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedNames {
    names: FxHashMap<NodeId, String>,
}

impl ResolvedNames {
    pub fn new() -> Self {
        ResolvedNames::default()
    }

    /// Text to print for `id`; `None` leaves the reference as written.
    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Result of [`ImportAnalysis::analyze`].
#[derive(Clone, Debug, Default)]
pub struct ImportPlan {
    pub names: ResolvedNames,
    /// Imports to add, in the order they were first needed. On-demand
    /// imports end in `.*`.
    pub added: Vec<String>,
}

/// Name resolution state for one print call.
pub struct ImportAnalysis<'a> {
    tree: &'a SyntaxTree,
    symbols: &'a SymbolTable,
    style: &'a ImportStyle,
    original: OriginalSource<'a>,
    package: String,
    /// Qualified names of single-type and single-static imports.
    explicit: FxHashSet<String>,
    /// Containers imported on demand.
    on_demand: FxHashSet<String>,
    /// Simple name to the qualified name that currently prints unqualified.
    simple_names: FxHashMap<String, String>,
    enclosing: Vec<ElementId>,
    plan: ImportPlan,
}

impl<'a> ImportAnalysis<'a> {
    /// Resolve every generated reference under `root`.
    ///
    /// The package and existing imports come from the compilation unit:
    /// `root` itself, or the tree's baseline root when printing a subtree.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn analyze(
        tree: &'a SyntaxTree,
        symbols: &'a SymbolTable,
        style: &'a ImportStyle,
        original: OriginalSource<'a>,
        root: NodeId,
    ) -> ImportPlan {
        let mut analysis = ImportAnalysis {
            tree,
            symbols,
            style,
            original,
            package: String::new(),
            explicit: FxHashSet::default(),
            on_demand: FxHashSet::default(),
            simple_names: FxHashMap::default(),
            enclosing: Vec::new(),
            plan: ImportPlan::default(),
        };
        let unit = Some(root)
            .filter(|&id| matches!(tree.kind(id), NodeKind::CompilationUnit { .. }))
            .or_else(|| tree.baseline_root())
            .filter(|&id| matches!(tree.kind(id), NodeKind::CompilationUnit { .. }));
        if let Some(unit) = unit {
            analysis.seed(unit);
            if unit != root {
                analysis.claim_copied(unit);
            }
        }
        analysis.claim_copied(root);
        analysis.visit(root);
        tracing::debug!(
            resolved = analysis.plan.names.len(),
            added = analysis.plan.added.len(),
            "import analysis done"
        );
        analysis.plan
    }

    /// Record the package, existing imports and the unit's own types.
    fn seed(&mut self, unit: NodeId) {
        let NodeKind::CompilationUnit {
            package,
            imports,
            types,
        } = self.tree.kind(unit)
        else {
            return;
        };
        if let Some(&package) = package.as_ref() {
            if let NodeKind::Package { name, .. } = self.tree.kind(package) {
                self.package.clone_from(name);
            }
        }
        for &import in imports {
            let NodeKind::Import { name, is_static } = self.tree.kind(import) else {
                continue;
            };
            if let Some(container) = name.strip_suffix(".*") {
                self.on_demand.insert(container.to_owned());
                continue;
            }
            self.explicit.insert(name.clone());
            if !is_static {
                let simple = name.rsplit('.').next().unwrap_or(name);
                self.simple_names.insert(simple.to_owned(), name.clone());
            }
        }
        for &ty in types {
            if let NodeKind::Class(class) = self.tree.kind(ty) {
                let qualified = self.qualify_in_package(&class.name);
                self.simple_names.insert(class.name.clone(), qualified);
            }
        }
    }

    fn qualify_in_package(&self, simple: &str) -> String {
        if self.package.is_empty() {
            simple.to_owned()
        } else {
            format!("{}.{simple}", self.package)
        }
    }

    /// Claim the simple names that copied subtrees under `id` print.
    fn claim_copied(&mut self, id: NodeId) {
        if self.tree.try_get(id).is_none() {
            return;
        }
        if !self.original.is_copy_eligible(&[id]) {
            for child in self.tree.children(id) {
                self.claim_copied(child);
            }
            return;
        }
        for node in self.tree.descendants(id) {
            let NodeKind::NameRef {
                element: Some(element),
                written,
            } = self.tree.kind(node)
            else {
                continue;
            };
            if written.contains('.') || !self.symbols.is_type(*element) {
                continue;
            }
            if let Some(qualified) = self.symbols.qualified_name(*element) {
                self.simple_names.entry(written.clone()).or_insert(qualified);
            }
        }
    }

    fn visit(&mut self, id: NodeId) {
        if self.tree.try_get(id).is_none() || self.original.is_copy_eligible(&[id]) {
            return;
        }
        match self.tree.kind(id) {
            NodeKind::NameRef {
                element: Some(element),
                ..
            } => {
                if let Some(text) = self.resolve(*element) {
                    self.plan.names.names.insert(id, text);
                }
            }
            NodeKind::Class(class) => {
                let pushed = class.element.map(|e| self.enclosing.push(e)).is_some();
                for child in self.tree.children(id) {
                    self.visit(child);
                }
                if pushed {
                    self.enclosing.pop();
                }
            }
            kind => {
                for child in kind.children() {
                    self.visit(child);
                }
            }
        }
    }

    /// Printed text for a reference to `element`; `None` when the symbol
    /// table cannot place it.
    fn resolve(&mut self, element: ElementId) -> Option<String> {
        let kind = self.symbols.kind(element)?;
        match kind {
            ElementKind::Package => self.symbols.qualified_name(element),
            ElementKind::Field | ElementKind::Method => self.resolve_member(element),
            _ => self.resolve_type(element),
        }
    }

    fn resolve_member(&mut self, member: ElementId) -> Option<String> {
        let name = self.symbols.simple_name(member)?.to_owned();
        let owner = self.symbols.enclosing(member)?;
        if self.visible_by_nesting(owner) {
            return Some(name);
        }
        let qualified = self.symbols.qualified_name(member)?;
        if self.explicit.contains(&qualified) {
            return Some(name);
        }
        let owner_text = self.resolve(owner)?;
        Some(format!("{owner_text}.{name}"))
    }

    /// `ty` is one of the classes around the reference or an outer class
    /// of one of them.
    fn visible_by_nesting(&self, ty: ElementId) -> bool {
        self.enclosing
            .iter()
            .any(|&class| self.symbols.is_within(class, ty))
    }

    fn resolve_type(&mut self, ty: ElementId) -> Option<String> {
        let simple = self.symbols.simple_name(ty)?.to_owned();
        let qualified = self.symbols.qualified_name(ty)?;
        let outer = self.symbols.enclosing(ty)?;
        let nested = self.symbols.is_type(outer);

        // 1. Nesting: the type itself or a member type of an enclosing class.
        if self.visible_by_nesting(ty) || (nested && self.visible_by_nesting(outer)) {
            return Some(simple);
        }

        let claimed_by_other = self
            .simple_names
            .get(&simple)
            .is_some_and(|other| *other != qualified);

        // 2. Implicitly imported packages.
        if !nested && !claimed_by_other {
            let package = self.symbols.qualified_name(outer)?;
            if package == self.package || package == JAVA_LANG {
                self.simple_names.insert(simple.clone(), qualified);
                return Some(simple);
            }
        }

        // 3. Explicit imports.
        if self.explicit.contains(&qualified) {
            return Some(simple);
        }

        // 4. Clash.
        if claimed_by_other {
            tracing::trace!(%qualified, "simple name taken, printing qualified");
            if nested {
                let outer_text = self.resolve(outer)?;
                return Some(format!("{outer_text}.{simple}"));
            }
            return Some(qualified);
        }

        if nested && !self.style.import_inner_classes {
            let outer_text = self.resolve(outer)?;
            return Some(format!("{outer_text}.{simple}"));
        }

        // 6. On-demand import.
        let container = self.symbols.qualified_name(outer)?;
        if self.on_demand.contains(&container) || self.style.is_star_package(&container) {
            if self.on_demand.insert(container.clone()) {
                tracing::debug!(%container, "adding on-demand import");
                self.plan.added.push(format!("{container}.*"));
            }
            self.simple_names.insert(simple.clone(), qualified);
            return Some(simple);
        }

        // 7. Single-type import.
        tracing::debug!(%qualified, "adding import");
        self.plan.added.push(qualified.clone());
        self.explicit.insert(qualified.clone());
        self.simple_names.insert(simple.clone(), qualified);
        Some(simple)
    }
}
