//! Import resolution: which package an alias in a source file refers to.
//!
//! Each import spec of a file becomes an [`ImportBinding`] mapping the local
//! alias to the package's import path and, for packages inside the scanned
//! module, its directory on disk:
//!
//! - `import "example.com/app/other"` maps `"other"` to `example.com/app/other`
//!   in `<root>/other`
//! - `import o "example.com/app/other"` maps `"o"` to the same package
//! - `import "fmt"` maps `"fmt"` to `fmt` with no directory, so it is never followed

use std::collections::HashMap;
use std::path::PathBuf;

use crate::module::ModuleDescriptor;
use crate::syntax::{ImportSpec, SourceFile};

/// How one import spec of a file resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Name used in the file to refer to the package. Empty when it can't be
    /// derived (an import of the module root without an explicit name).
    pub alias: String,
    /// Package directory, only for imports inside the scanned module.
    pub absolute_path: Option<PathBuf>,
    /// Fully-qualified import path.
    pub import_path: String,
}

impl ImportBinding {
    /// Whether the import points into the scanned module.
    pub fn is_internal(&self) -> bool {
        self.absolute_path.is_some()
    }
}

/// Resolve a single import spec against the module being scanned.
///
/// Imports outside the module keep an alias derived from the last segment
/// of their path, but no directory.
pub fn resolve(spec: &ImportSpec, descriptor: &ModuleDescriptor) -> ImportBinding {
    let (absolute_path, derived_alias) = match descriptor.relative_import(&spec.path) {
        Some(relative) => (
            Some(descriptor.dir_for_relative(relative)),
            last_segment(relative),
        ),
        None => (None, last_segment(&spec.path)),
    };

    ImportBinding {
        alias: spec.name.clone().or(derived_alias).unwrap_or_default(),
        absolute_path,
        import_path: spec.path.clone(),
    }
}

fn last_segment(path: &str) -> Option<String> {
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Alias → binding map for one source file.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    bindings: HashMap<String, ImportBinding>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding. Blank (`_`), dot (`.`) and empty aliases can't be used
    /// to qualify a type and are dropped; returns whether the binding was kept.
    /// A later binding for the same alias replaces the earlier one.
    pub fn insert(&mut self, binding: ImportBinding) -> bool {
        if matches!(binding.alias.as_str(), "" | "_" | ".") {
            return false;
        }
        self.bindings.insert(binding.alias.clone(), binding);
        true
    }

    pub fn get(&self, alias: &str) -> Option<&ImportBinding> {
        self.bindings.get(alias)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Resolve every import of a parsed file.
pub fn resolve_all(file: &SourceFile, descriptor: &ModuleDescriptor) -> ImportTable {
    let mut table = ImportTable::new();
    for spec in &file.imports {
        table.insert(resolve(spec, descriptor));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor::new("/src/app", "example.com/app")
    }

    #[test]
    fn test_internal_import_derives_alias() {
        let binding = resolve(&ImportSpec::new("example.com/app/other"), &descriptor());
        assert_eq!(binding.alias, "other");
        assert_eq!(
            binding.absolute_path,
            Some(PathBuf::from("/src/app").join("other"))
        );
        assert_eq!(binding.import_path, "example.com/app/other");
        assert!(binding.is_internal());
    }

    #[test]
    fn test_nested_internal_import() {
        let binding = resolve(
            &ImportSpec::new("example.com/app/internal/store"),
            &descriptor(),
        );
        assert_eq!(binding.alias, "store");
        assert_eq!(
            binding.absolute_path,
            Some(PathBuf::from("/src/app").join("internal").join("store"))
        );
    }

    #[test]
    fn test_explicit_alias_wins() {
        let binding = resolve(
            &ImportSpec::named("p", "example.com/app/pkg"),
            &descriptor(),
        );
        assert_eq!(binding.alias, "p");
        assert_eq!(binding.import_path, "example.com/app/pkg");
    }

    #[test]
    fn test_external_import_is_not_followed() {
        let binding = resolve(&ImportSpec::new("github.com/google/uuid"), &descriptor());
        assert_eq!(binding.alias, "uuid");
        assert_eq!(binding.absolute_path, None);
        assert!(!binding.is_internal());
    }

    #[test]
    fn test_prefix_must_end_on_segment() {
        let binding = resolve(&ImportSpec::new("example.com/application/x"), &descriptor());
        assert!(!binding.is_internal());
    }

    #[test]
    fn test_module_root_import_has_no_derived_alias() {
        let binding = resolve(&ImportSpec::new("example.com/app"), &descriptor());
        assert_eq!(binding.alias, "");
        assert_eq!(binding.absolute_path, Some(PathBuf::from("/src/app")));

        let named = resolve(&ImportSpec::named("app", "example.com/app"), &descriptor());
        assert_eq!(named.alias, "app");
    }

    #[test]
    fn test_table_drops_unusable_aliases() {
        let mut table = ImportTable::new();
        assert!(!table.insert(resolve(&ImportSpec::named("_", "example.com/app/x"), &descriptor())));
        assert!(!table.insert(resolve(&ImportSpec::named(".", "example.com/app/y"), &descriptor())));
        assert!(!table.insert(resolve(&ImportSpec::new("example.com/app"), &descriptor())));
        assert!(table.insert(resolve(&ImportSpec::new("example.com/app/z"), &descriptor())));
        assert_eq!(table.len(), 1);
        assert!(table.get("z").is_some());
        assert!(table.get("_").is_none());
    }

    #[test]
    fn test_resolve_all() {
        let file = crate::syntax::parse(
            r#"
            package models

            import (
                "fmt"
                o "example.com/app/other"
            )
        "#,
        )
        .unwrap();
        let table = resolve_all(&file, &descriptor());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("o").unwrap().import_path, "example.com/app/other");
        assert!(!table.get("fmt").unwrap().is_internal());
    }
}
