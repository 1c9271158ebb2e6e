//! A declaration-level Go front end.
//!
//! Enough of Go's grammar to read package clauses, imports and type
//! declarations, including struct fields and their type expressions. Function
//! bodies and value declarations are skipped with balanced-delimiter scanning.

mod ast;
mod error;
mod lexer;
mod parser;
mod token;

pub use ast::{Field, ImportSpec, SourceFile, TypeDecl, TypeExpr, is_exported};
pub use error::{SyntaxError, SyntaxResult};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Spanned, Token};

/// Parse a complete Go source file.
pub fn parse(source: &str) -> SyntaxResult<SourceFile> {
    Parser::new(source)?.parse()
}
