//! Source file scanner that extracts exported struct types.
//!
//! For every non-`main` package file, each exported top-level struct
//! declaration becomes a [`SymbolReference`] in the file's own package. Its
//! fields are then inspected: a field whose type is (or wraps, through
//! pointers, slices, arrays or maps) a package-qualified type such as
//! `*other.Address` is resolved through the file's imports, and if the
//! package lives inside the scanned module the referenced type is added too.
//!
//! Only one level is followed. The referenced package's files are never
//! opened, so fields of a referenced type are not inspected.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::discovery::list_files;
use crate::error::{Error, Result};
use crate::generator::RegistryGenerator;
use crate::module::ModuleDescriptor;
use crate::resolver::{ImportTable, resolve_all};
use crate::syntax::{self, Field, TypeDecl};
use crate::types::{ExtractedSymbol, SymbolReference, flatten};

/// Package clause of program entry points, which can't be imported.
const MAIN_PACKAGE: &str = "main";

/// Extract the flattened registry symbols of one file.
pub fn extract(path: &Path, descriptor: &ModuleDescriptor) -> Result<Vec<SymbolReference>> {
    Ok(flatten(extract_file(path, descriptor)?))
}

/// Read and parse one file, returning each exported struct with its references.
pub fn extract_file(path: &Path, descriptor: &ModuleDescriptor) -> Result<Vec<ExtractedSymbol>> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_source(path, &source, descriptor)
}

/// Like [`extract_file`] for source text already in memory. `path` decides
/// the package import path and must lie under the module root.
pub fn extract_source(
    path: &Path,
    source: &str,
    descriptor: &ModuleDescriptor,
) -> Result<Vec<ExtractedSymbol>> {
    let file = syntax::parse(source).map_err(|err| Error::parse(path, err))?;

    if file.package == MAIN_PACKAGE {
        debug!(path = %path.display(), "skipping main package");
        return Ok(Vec::new());
    }

    let package_import_path = descriptor.import_path_for_file(path).ok_or_else(|| {
        Error::configuration(path, "source file is outside the module root")
    })?;
    let imports = resolve_all(&file, descriptor);

    let extracted: Vec<_> = file
        .types
        .iter()
        .filter(|decl| decl.is_struct() && decl.is_exported() && !decl.has_type_params)
        .map(|decl| extract_decl(decl, path, &package_import_path, &imports))
        .collect();

    debug!(
        path = %path.display(),
        package = %package_import_path,
        declarations = extracted.len(),
        "extracted symbols"
    );
    Ok(extracted)
}

fn extract_decl(
    decl: &TypeDecl,
    path: &Path,
    package_import_path: &str,
    imports: &ImportTable,
) -> ExtractedSymbol {
    let symbol = SymbolReference::new(package_import_path, &decl.name, path);
    let references = decl
        .fields()
        .iter()
        .flat_map(|field| field_references(field, imports))
        .collect();

    ExtractedSymbol { symbol, references }
}

/// Cross-package struct references of one field.
fn field_references(field: &Field, imports: &ImportTable) -> Vec<SymbolReference> {
    let mut references = Vec::new();
    for (alias, type_name) in field.ty.qualified_refs() {
        let Some(binding) = imports.get(alias) else {
            trace!(alias, type_name, "no import for qualifier");
            continue;
        };
        let Some(dir) = &binding.absolute_path else {
            trace!(import = %binding.import_path, type_name, "external package, not followed");
            continue;
        };
        if !syntax::is_exported(type_name) {
            continue;
        }
        references.push(SymbolReference::new(
            &binding.import_path,
            type_name,
            dir.as_path(),
        ));
    }
    references
}

impl RegistryGenerator {
    /// Parse a single Go source file and add its symbols.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> goreg_codegen::Result<()> {
    /// use goreg_codegen::{ModuleDescriptor, RegistryGenerator};
    ///
    /// let descriptor = ModuleDescriptor::load("/src/app")?;
    /// let mut generator = RegistryGenerator::new();
    /// generator.add_source_file("/src/app/models/user.go", &descriptor)?;
    /// generator.write_to_file("global_generate.go")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_file(
        &mut self,
        path: impl AsRef<Path>,
        descriptor: &ModuleDescriptor,
    ) -> Result<&mut Self> {
        let symbols = extract(path.as_ref(), descriptor)?;
        self.add_symbols(symbols);
        Ok(self)
    }

    /// Parse Go source from a string, as if it were the file at `path`.
    pub fn add_source_str(
        &mut self,
        path: impl AsRef<Path>,
        source: &str,
        descriptor: &ModuleDescriptor,
    ) -> Result<&mut Self> {
        let extracted = extract_source(path.as_ref(), source, descriptor)?;
        self.add_symbols(flatten(extracted));
        Ok(self)
    }

    /// Scan every non-test `.go` file under the module root, in file-name order.
    ///
    /// Stops at the first file that fails to read or parse; nothing is added
    /// in that case.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> goreg_codegen::Result<()> {
    /// use goreg_codegen::{ModuleDescriptor, RegistryGenerator};
    ///
    /// let descriptor = ModuleDescriptor::load(".")?;
    /// let mut generator = RegistryGenerator::new();
    /// generator.add_source_dir(&descriptor)?;
    /// generator.write_to_file("global_generate.go")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_source_dir(&mut self, descriptor: &ModuleDescriptor) -> Result<&mut Self> {
        let files = list_files(descriptor.root())?;
        debug!(count = files.len(), "found source files");

        let mut symbols = Vec::new();
        for file in &files {
            symbols.extend(extract(file, descriptor)?);
        }
        self.add_symbols(symbols);
        Ok(self)
    }
}
