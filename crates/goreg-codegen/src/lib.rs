//! # goreg-codegen
//!
//! Registry generator for Go modules. Scans every non-test `.go` file of a
//! module, collects the exported struct types, and writes a Go file that
//! instantiates each of them:
//!
//! ```go
//! package main
//!
//! import (
//! 	appmodels "example.com/app/models"
//! 	appother "example.com/app/other"
//! )
//!
//! var globals = []interface{}{
//! 	new(appmodels.User),
//! 	new(appother.Address),
//! }
//! ```
//!
//! Struct types from other packages of the same module are included when a
//! scanned struct has a field of that type, so `Address` shows up above even
//! if only `User` lives in a scanned file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use goreg_codegen::{ModuleDescriptor, RegistryGenerator};
//!
//! fn main() -> goreg_codegen::Result<()> {
//!     let descriptor = ModuleDescriptor::load("path/to/module")?;
//!
//!     RegistryGenerator::new()
//!         .add_source_dir(&descriptor)?
//!         .write_to_file("path/to/module/global_generate.go")?;
//!
//!     Ok(())
//! }
//! ```

mod discovery;
mod error;
mod extractor;
mod generator;
mod module;
mod resolver;
pub mod syntax;
mod types;

pub use discovery::{is_source_file, list_files};
pub use error::{Error, Result};
pub use extractor::{extract, extract_file, extract_source};
pub use generator::{
    DEFAULT_OUTPUT_FILE, DEFAULT_PACKAGE_NAME, DEFAULT_VAR_NAME, RegistryGenerator, emit,
    registry_alias,
};
pub use module::{GO_MOD, ModuleDescriptor, module_cache_path, module_cache_path_with, module_path};
pub use resolver::{ImportBinding, ImportTable, resolve, resolve_all};
pub use types::{ExtractedSymbol, SymbolReference, flatten};
