//! Symbol types shared by the extractor and the generator.

use std::fmt;
use std::path::PathBuf;

/// An exported struct type that goes into the registry.
///
/// Either declared in a scanned file, or referenced from a field of such a
/// declaration through a package-qualified type. Two references denote the
/// same registry entry when their [`key`](SymbolReference::key)s are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolReference {
    /// Import path of the package that declares the type.
    pub package_import_path: String,
    pub type_name: String,
    /// The scanned file for local declarations; the package directory for
    /// referenced types, whose declaring file is never opened.
    pub declaring_file: PathBuf,
}

impl SymbolReference {
    pub fn new(
        package_import_path: impl Into<String>,
        type_name: impl Into<String>,
        declaring_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_import_path: package_import_path.into(),
            type_name: type_name.into(),
            declaring_file: declaring_file.into(),
        }
    }

    /// Identity of the registry entry: `(import path, type name)`.
    pub fn key(&self) -> (&str, &str) {
        (&self.package_import_path, &self.type_name)
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.package_import_path, self.type_name)
    }
}

/// A locally declared struct together with the cross-package types its
/// fields reference (one level deep).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSymbol {
    pub symbol: SymbolReference,
    pub references: Vec<SymbolReference>,
}

impl ExtractedSymbol {
    /// The declaration followed by its references, in field order.
    pub fn into_symbols(self) -> impl Iterator<Item = SymbolReference> {
        std::iter::once(self.symbol).chain(self.references)
    }
}

/// Flatten extracted declarations into the registry order.
pub fn flatten(extracted: impl IntoIterator<Item = ExtractedSymbol>) -> Vec<SymbolReference> {
    extracted
        .into_iter()
        .flat_map(ExtractedSymbol::into_symbols)
        .collect()
}
