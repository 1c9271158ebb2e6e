use tracing::trace;

use super::ast::{Field, ImportSpec, SourceFile, TypeDecl, TypeExpr};
use super::error::{SyntaxError, SyntaxResult};
use super::lexer::Lexer;
use super::token::{Spanned, Token};

/// A recursive-descent parser for the declaration level of a Go file.
///
/// Package clause, imports and type declarations are parsed fully. Function,
/// method, `var` and `const` declarations are skipped by scanning to the
/// terminating `;` with balanced delimiters, so their bodies are never
/// checked beyond that.
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    pub fn new(source: &str) -> SyntaxResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    pub fn parse(mut self) -> SyntaxResult<SourceFile> {
        self.consume_semicolons();
        self.consume(&Token::Package)?;
        let package = self.parse_identifier()?;
        self.expect_end_of_decl()?;
        trace!(package = %package, "parsed package clause");

        let mut imports = Vec::new();
        self.consume_semicolons();
        while self.current_token() == &Token::Import {
            self.parse_import_decl(&mut imports)?;
            self.consume_semicolons();
        }

        let mut types = Vec::new();
        loop {
            match self.current_token() {
                Token::Eof => break,
                Token::Semicolon => self.advance(),
                Token::Type => self.parse_type_decl(&mut types)?,
                Token::Func | Token::Var | Token::Const => self.skip_decl()?,
                Token::Import => {
                    return Err(self.error("imports must appear before other declarations"));
                }
                other => {
                    let message = format!("non-declaration statement outside function body: {other}");
                    return Err(self.error(message));
                }
            }
        }

        Ok(SourceFile {
            package,
            imports,
            types,
        })
    }

    fn current(&self) -> &Spanned {
        // The lexer always terminates the stream with `Eof`.
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn current_token(&self) -> &Token {
        &self.current().token
    }

    fn peek_token(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)].token
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let current = self.current();
        SyntaxError::new(current.line, current.column, message)
    }

    fn consume(&mut self, expected: &Token) -> SyntaxResult<()> {
        if self.current_token() != expected {
            let message = format!("expected {expected}, found {}", self.current_token());
            return Err(self.error(message));
        }
        self.advance();
        Ok(())
    }

    fn consume_optional(&mut self, expected: &Token) -> bool {
        if self.current_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_semicolons(&mut self) {
        while self.current_token() == &Token::Semicolon {
            self.advance();
        }
    }

    /// A declaration ends with `;` (possibly inserted) or at end of file.
    fn expect_end_of_decl(&mut self) -> SyntaxResult<()> {
        match self.current_token() {
            Token::Semicolon => {
                self.advance();
                Ok(())
            }
            Token::Eof => Ok(()),
            other => {
                let message = format!("expected `;` or newline, found {other}");
                Err(self.error(message))
            }
        }
    }

    fn parse_identifier(&mut self) -> SyntaxResult<String> {
        match self.current_token().clone() {
            Token::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("expected identifier, found {other}"))),
        }
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> SyntaxResult<()> {
        self.consume(&Token::Import)?;

        if self.consume_optional(&Token::LParen) {
            loop {
                self.consume_semicolons();
                if self.consume_optional(&Token::RParen) {
                    break;
                }
                imports.push(self.parse_import_spec()?);
                if self.current_token() != &Token::RParen {
                    self.consume(&Token::Semicolon)?;
                }
            }
        } else {
            imports.push(self.parse_import_spec()?);
        }

        self.expect_end_of_decl()
    }

    fn parse_import_spec(&mut self) -> SyntaxResult<ImportSpec> {
        let name = match self.current_token().clone() {
            Token::Ident(name) => {
                self.advance();
                Some(name)
            }
            Token::Dot => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };

        match self.current_token().clone() {
            Token::String(path) if !path.is_empty() => {
                self.advance();
                Ok(ImportSpec { name, path })
            }
            Token::String(_) => Err(self.error("invalid import path: empty string")),
            other => Err(self.error(format!("expected import path, found {other}"))),
        }
    }

    fn parse_type_decl(&mut self, types: &mut Vec<TypeDecl>) -> SyntaxResult<()> {
        self.consume(&Token::Type)?;

        if self.consume_optional(&Token::LParen) {
            loop {
                self.consume_semicolons();
                if self.consume_optional(&Token::RParen) {
                    break;
                }
                types.push(self.parse_type_spec()?);
                if self.current_token() != &Token::RParen {
                    self.consume(&Token::Semicolon)?;
                }
            }
        } else {
            types.push(self.parse_type_spec()?);
        }

        self.expect_end_of_decl()
    }

    fn parse_type_spec(&mut self) -> SyntaxResult<TypeDecl> {
        let name = self.parse_identifier()?;

        let has_type_params = self.at_type_params();
        if has_type_params {
            self.skip_balanced()?;
        }
        let is_alias = self.consume_optional(&Token::Assign);
        let ty = self.parse_type()?;

        trace!(name = %name, "parsed type spec");
        Ok(TypeDecl {
            name,
            has_type_params,
            is_alias,
            ty,
        })
    }

    /// Tell `type T[P any] ...` apart from the array type in `type T [N]int`.
    ///
    /// A parameter list starts with an identifier followed by a constraint or
    /// a comma; an array length is a single (possibly qualified) constant.
    fn at_type_params(&self) -> bool {
        if self.current_token() != &Token::LBracket {
            return false;
        }
        if !matches!(self.peek_token(1), Token::Ident(_)) {
            return false;
        }
        matches!(
            self.peek_token(2),
            Token::Ident(_)
                | Token::Comma
                | Token::Interface
                | Token::Struct
                | Token::Map
                | Token::Chan
                | Token::Func
                | Token::LBracket
                | Token::Tilde
        )
    }

    fn parse_type(&mut self) -> SyntaxResult<TypeExpr> {
        match self.current_token().clone() {
            Token::Ident(name) => {
                self.advance();
                let ty = if self.consume_optional(&Token::Dot) {
                    let member = self.parse_identifier()?;
                    TypeExpr::qualified(name, member)
                } else {
                    TypeExpr::Ident(name)
                };
                // Generic instantiation, e.g. `list.List[int]`: the arguments are dropped.
                if self.current_token() == &Token::LBracket {
                    self.skip_balanced()?;
                }
                Ok(ty)
            }
            Token::Star => {
                self.advance();
                Ok(TypeExpr::pointer(self.parse_type()?))
            }
            Token::LBracket => {
                // `[]T`, or `[N]T` / `[...]T` with the length skipped.
                self.skip_balanced()?;
                Ok(TypeExpr::slice(self.parse_type()?))
            }
            Token::Map => {
                self.advance();
                self.consume(&Token::LBracket)?;
                let key = self.parse_type()?;
                self.consume(&Token::RBracket)?;
                let value = self.parse_type()?;
                Ok(TypeExpr::map(key, value))
            }
            Token::Chan => {
                self.advance();
                self.consume_optional(&Token::Arrow);
                self.parse_type()?;
                Ok(TypeExpr::FuncOrChan)
            }
            Token::Arrow => {
                self.advance();
                self.consume(&Token::Chan)?;
                self.parse_type()?;
                Ok(TypeExpr::FuncOrChan)
            }
            Token::Func => {
                self.advance();
                self.skip_signature()?;
                Ok(TypeExpr::FuncOrChan)
            }
            Token::Interface => {
                self.advance();
                if self.current_token() != &Token::LBrace {
                    return Err(self.error(format!(
                        "expected `{{` after `interface`, found {}",
                        self.current_token()
                    )));
                }
                self.skip_balanced()?;
                Ok(TypeExpr::Interface)
            }
            Token::Struct => {
                self.advance();
                Ok(TypeExpr::Struct(self.parse_struct_fields()?))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.consume(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(self.error(format!("expected type, found {other}"))),
        }
    }

    fn parse_struct_fields(&mut self) -> SyntaxResult<Vec<Field>> {
        self.consume(&Token::LBrace)?;

        let mut fields = Vec::new();
        loop {
            self.consume_semicolons();
            if self.consume_optional(&Token::RBrace) {
                break;
            }

            fields.push(self.parse_field()?);

            if self.current_token() != &Token::RBrace {
                self.consume(&Token::Semicolon)?;
            }
        }

        Ok(fields)
    }

    fn parse_field(&mut self) -> SyntaxResult<Field> {
        let embedded = match (self.current_token(), self.peek_token(1)) {
            (Token::Star, _) => true,
            (Token::Ident(_), Token::Dot | Token::Semicolon | Token::RBrace | Token::String(_)) => {
                true
            }
            (Token::Ident(_), Token::LBracket) => self.at_embedded_instance(),
            _ => false,
        };

        let names = if embedded {
            Vec::new()
        } else {
            let mut names = vec![self.parse_identifier()?];
            while self.consume_optional(&Token::Comma) {
                names.push(self.parse_identifier()?);
            }
            names
        };

        let ty = self.parse_type()?;

        let tag = match self.current_token().clone() {
            Token::String(tag) => {
                self.advance();
                Some(tag)
            }
            _ => None,
        };

        Ok(Field { names, ty, tag })
    }

    /// Whether `Name[...]` at the current position ends the field, making it an
    /// embedded generic instance rather than a field name followed by an array type.
    fn at_embedded_instance(&self) -> bool {
        let mut depth = 0usize;
        let mut offset = 1;
        loop {
            match self.peek_token(offset) {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                Token::Eof => return false,
                _ => {}
            }
            offset += 1;
        }
        matches!(
            self.peek_token(offset + 1),
            Token::Semicolon | Token::RBrace | Token::String(_)
        )
    }

    /// Skip `(params) results` after `func`.
    fn skip_signature(&mut self) -> SyntaxResult<()> {
        if self.current_token() != &Token::LParen {
            return Err(self.error(format!(
                "expected `(` after `func`, found {}",
                self.current_token()
            )));
        }
        self.skip_balanced()?;

        match self.current_token() {
            Token::LParen => self.skip_balanced(),
            Token::Ident(_)
            | Token::Star
            | Token::LBracket
            | Token::Map
            | Token::Chan
            | Token::Arrow
            | Token::Func
            | Token::Struct
            | Token::Interface => self.parse_type().map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Skip from an opening delimiter through its matching closer.
    fn skip_balanced(&mut self) -> SyntaxResult<()> {
        let mut stack = Vec::new();
        loop {
            let token = self.current_token().clone();
            match token {
                Token::LParen | Token::LBracket | Token::LBrace => stack.push(token),
                Token::RParen | Token::RBracket | Token::RBrace => {
                    self.pop_matching(&mut stack, &token)?;
                }
                Token::Eof => return Err(self.error("unexpected end of file")),
                _ => {}
            }
            self.advance();
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    /// Skip a `func`, `var` or `const` declaration through its terminating `;`.
    fn skip_decl(&mut self) -> SyntaxResult<()> {
        let mut stack = Vec::new();
        loop {
            let token = self.current_token().clone();
            match token {
                Token::Eof if stack.is_empty() => return Ok(()),
                Token::Eof => return Err(self.error("unexpected end of file")),
                Token::Semicolon if stack.is_empty() => {
                    self.advance();
                    return Ok(());
                }
                Token::LParen | Token::LBracket | Token::LBrace => stack.push(token),
                Token::RParen | Token::RBracket | Token::RBrace => {
                    self.pop_matching(&mut stack, &token)?;
                }
                _ => {}
            }
            self.advance();
        }
    }

    fn pop_matching(&self, stack: &mut Vec<Token>, closer: &Token) -> SyntaxResult<()> {
        let expected_opener = match closer {
            Token::RParen => Token::LParen,
            Token::RBracket => Token::LBracket,
            _ => Token::LBrace,
        };
        match stack.pop() {
            Some(opener) if opener == expected_opener => Ok(()),
            _ => Err(self.error(format!("unexpected {closer}"))),
        }
    }
}
