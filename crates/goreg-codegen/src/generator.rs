//! Go registry file generator.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::SymbolReference;

/// File written when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "global_generate.go";
pub const DEFAULT_PACKAGE_NAME: &str = "main";
pub const DEFAULT_VAR_NAME: &str = "globals";

const DEFAULT_HEADER: &str = "Code generated by goreg. DO NOT EDIT.";

/// Collects symbols and renders them as a Go file holding a registry
/// variable, one `new(T)` entry per symbol:
///
/// ```go
/// var globals = []interface{}{
/// 	new(appmodels.User),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RegistryGenerator {
    symbols: Vec<SymbolReference>,

    /// Package clause of the generated file
    package_name: String,

    /// Name of the registry variable
    var_name: String,

    /// Custom header comment
    header: Option<String>,

    /// Drop repeated imports and entries
    dedup: bool,
}

impl Default for RegistryGenerator {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            var_name: DEFAULT_VAR_NAME.to_string(),
            header: None,
            dedup: false,
        }
    }
}

impl RegistryGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) -> &mut Self {
        self.package_name = package_name.into();
        self
    }

    pub fn set_var_name(&mut self, var_name: impl Into<String>) -> &mut Self {
        self.var_name = var_name.into();
        self
    }

    /// Set a custom header comment for the generated file.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Render each import and each entry only once.
    ///
    /// Off by default: the same package imported by two symbols then gets
    /// two import lines, and a type referenced twice gets two entries.
    pub fn dedup(&mut self, enabled: bool) -> &mut Self {
        self.dedup = enabled;
        self
    }

    pub fn add_symbol(&mut self, symbol: SymbolReference) -> &mut Self {
        self.symbols.push(symbol);
        self
    }

    pub fn add_symbols(&mut self, symbols: impl IntoIterator<Item = SymbolReference>) -> &mut Self {
        self.symbols.extend(symbols);
        self
    }

    /// Everything added so far, in insertion order.
    pub fn symbols(&self) -> &[SymbolReference] {
        &self.symbols
    }

    /// The symbols that will be rendered, after deduplication if enabled.
    pub fn entries(&self) -> Vec<&SymbolReference> {
        if !self.dedup {
            return self.symbols.iter().collect();
        }
        let mut seen = HashSet::new();
        self.symbols
            .iter()
            .filter(|symbol| seen.insert(symbol.key()))
            .collect()
    }

    /// Generate the Go source as a string.
    pub fn generate(&self) -> String {
        let mut output = String::new();

        let header = self.header.as_deref().unwrap_or(DEFAULT_HEADER);
        for line in header.lines() {
            if line.is_empty() {
                output.push_str("//\n");
            } else {
                output.push_str("// ");
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push('\n');

        output.push_str(&format!("package {}\n\n", self.package_name));

        let entries = self.entries();
        if entries.is_empty() {
            output.push_str(&format!("var {} = []interface{{}}{{}}\n", self.var_name));
            return output;
        }

        output.push_str(&self.generate_imports(&entries));
        output.push('\n');

        output.push_str(&format!("var {} = []interface{{}}{{\n", self.var_name));
        for symbol in &entries {
            output.push_str(&format!(
                "\tnew({}.{}),\n",
                registry_alias(&symbol.package_import_path),
                symbol.type_name
            ));
        }
        output.push_str("}\n");

        output
    }

    /// Write the generated code to a file, replacing any existing content.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let code = self.generate();
        fs::write(path, code).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), entries = self.entries().len(), "wrote registry");
        Ok(())
    }

    /// Write the generated code to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let code = self.generate();
        writer.write_all(code.as_bytes())
    }

    fn generate_imports(&self, entries: &[&SymbolReference]) -> String {
        let mut seen = HashSet::new();
        let mut output = String::from("import (\n");
        for symbol in entries {
            let path = symbol.package_import_path.as_str();
            let alias = registry_alias(path);
            let line = format!("\t{alias} \"{path}\"\n");
            if self.dedup && !seen.insert(line.clone()) {
                continue;
            }
            output.push_str(&line);
        }
        output.push_str(")\n");
        output
    }
}

/// Local name the registry file uses for a package: the last two path
/// segments run together, so `example.com/app/models` becomes `appmodels`.
///
/// Characters that can't appear in a Go identifier become `_`, and a leading
/// digit gets a `_` prefix.
pub fn registry_alias(import_path: &str) -> String {
    let segments: Vec<&str> = import_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let start = segments.len().saturating_sub(2);

    let mut alias: String = segments[start..]
        .concat()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if alias.is_empty() || alias.starts_with(|c: char| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    alias
}

/// Render `symbols` as a registry file in package `package_name` and write it
/// to `output_file`.
pub fn emit(
    symbols: &[SymbolReference],
    output_file: impl AsRef<Path>,
    package_name: &str,
) -> Result<()> {
    RegistryGenerator::new()
        .set_package_name(package_name)
        .add_symbols(symbols.iter().cloned())
        .write_to_file(output_file)
}
