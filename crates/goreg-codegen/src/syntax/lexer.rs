//! Go tokenizer with automatic semicolon insertion.

use super::error::{SyntaxError, SyntaxResult};
use super::token::{Spanned, Token};

/// Longest operators first so that prefix matching picks `<<=` over `<<` over `<`.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=",
    "<<", ">>", "&^", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "(", ")", "[", "]", "{",
    "}", ",", ";", ".", "+", "-", "*", "/", "%", "&", "|", "^", "<", ">", "=", "!", ":", "~",
];

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Spanned>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        // A leading byte order mark is ignored.
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Consume the whole source. The returned stream always ends with [`Token::Eof`].
    pub fn tokenize(mut self) -> SyntaxResult<Vec<Spanned>> {
        while let Some(c) = self.peek(0) {
            match c {
                '\n' => {
                    self.insert_semicolon();
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek(1) == Some('/') => self.line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment()?,
                '"' => self.string()?,
                '`' => self.raw_string()?,
                '\'' => self.rune()?,
                c if is_ident_start(c) => self.ident(),
                c if c.is_ascii_digit() => self.number(),
                '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
                _ => self.punct()?,
            }
        }

        self.insert_semicolon();
        self.push(Token::Eof, self.line, self.column);
        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn push(&mut self, token: Token, line: usize, column: usize) {
        self.tokens.push(Spanned {
            token,
            line,
            column,
        });
    }

    /// A line break after an identifier, literal, `++`, `--`, `)`, `]` or `}` ends the statement.
    fn insert_semicolon(&mut self) {
        if self
            .tokens
            .last()
            .is_some_and(|last| last.token.ends_statement())
        {
            self.push(Token::Semicolon, self.line, self.column);
        }
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self) -> SyntaxResult<()> {
        let (line, column) = (self.line, self.column);
        self.bump();
        self.bump();

        let mut spans_lines = false;
        loop {
            match self.peek(0) {
                None => return Err(SyntaxError::new(line, column, "comment not terminated")),
                Some('*') if self.peek(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some(c) => {
                    if c == '\n' && !spans_lines {
                        spans_lines = true;
                        self.insert_semicolon();
                    }
                    self.bump();
                }
            }
        }
        Ok(())
    }

    fn string(&mut self) -> SyntaxResult<()> {
        let (line, column) = (self.line, self.column);
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(SyntaxError::new(
                        line,
                        column,
                        "string literal not terminated",
                    ));
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('\'') => value.push('\''),
                    // Numeric and unicode escapes are kept as written.
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => {
                        return Err(SyntaxError::new(
                            line,
                            column,
                            "string literal not terminated",
                        ));
                    }
                },
                Some(c) => value.push(c),
            }
        }

        self.push(Token::String(value), line, column);
        Ok(())
    }

    fn raw_string(&mut self) -> SyntaxResult<()> {
        let (line, column) = (self.line, self.column);
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(SyntaxError::new(
                        line,
                        column,
                        "raw string literal not terminated",
                    ));
                }
                Some('`') => break,
                Some('\r') => {}
                Some(c) => value.push(c),
            }
        }

        self.push(Token::String(value), line, column);
        Ok(())
    }

    fn rune(&mut self) -> SyntaxResult<()> {
        let (line, column) = (self.line, self.column);
        self.bump();

        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(SyntaxError::new(line, column, "rune literal not terminated"));
                }
                Some('\'') => break,
                Some('\\') => {
                    value.push('\\');
                    match self.bump() {
                        Some(c) if c != '\n' => value.push(c),
                        _ => {
                            return Err(SyntaxError::new(
                                line,
                                column,
                                "rune literal not terminated",
                            ));
                        }
                    }
                }
                Some(c) => value.push(c),
            }
        }

        if value.is_empty() {
            return Err(SyntaxError::new(line, column, "empty rune literal"));
        }
        self.push(Token::Rune(value), line, column);
        Ok(())
    }

    fn ident(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut name = String::new();
        while let Some(c) = self.peek(0) {
            if !is_ident_continue(c) {
                break;
            }
            name.push(c);
            self.bump();
        }

        let token = Token::keyword(&name).unwrap_or(Token::Ident(name));
        self.push(token, line, column);
    }

    fn number(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            let is_exponent_sign = (c == '+' || c == '-') && {
                let hex = text.starts_with("0x") || text.starts_with("0X");
                match text.chars().last() {
                    Some('p' | 'P') => true,
                    Some('e' | 'E') => !hex,
                    _ => false,
                }
            };
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || is_exponent_sign) {
                break;
            }
            text.push(c);
            self.bump();
        }

        self.push(Token::Number(text), line, column);
    }

    fn punct(&mut self) -> SyntaxResult<()> {
        let (line, column) = (self.line, self.column);
        let Some(op) = OPERATORS.iter().find(|op| self.starts_with(op)) else {
            let c = self.peek(0).unwrap_or_default();
            return Err(SyntaxError::new(
                line,
                column,
                format!("unexpected character `{c}`"),
            ));
        };

        for _ in 0..op.chars().count() {
            self.bump();
        }

        let token = match *op {
            "(" => Token::LParen,
            ")" => Token::RParen,
            "[" => Token::LBracket,
            "]" => Token::RBracket,
            "{" => Token::LBrace,
            "}" => Token::RBrace,
            "," => Token::Comma,
            ";" => Token::Semicolon,
            "." => Token::Dot,
            "..." => Token::Ellipsis,
            "*" => Token::Star,
            "=" => Token::Assign,
            "<-" => Token::Arrow,
            "~" => Token::Tilde,
            other => Token::Operator(other.to_string()),
        };
        self.push(token, line, column);
        Ok(())
    }

    fn starts_with(&self, op: &str) -> bool {
        op.chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i) == Some(expected))
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn test_semicolon_inserted_after_identifier() {
        assert_eq!(
            tokens("package models\n"),
            vec![Token::Package, ident("models"), Token::Semicolon, Token::Eof]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        assert_eq!(
            tokens("struct {\n}\n"),
            vec![Token::Struct, Token::LBrace, Token::RBrace, Token::Semicolon, Token::Eof]
        );
    }

    #[test]
    fn test_semicolon_inserted_at_eof() {
        assert_eq!(
            tokens("x"),
            vec![ident("x"), Token::Semicolon, Token::Eof]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            tokens("// line\na /* inline */ b\n"),
            vec![ident("a"), ident("b"), Token::Semicolon, Token::Eof]
        );
    }

    #[test]
    fn test_multiline_block_comment_acts_as_newline() {
        assert_eq!(
            tokens("a /* one\ntwo */ b"),
            vec![
                ident("a"),
                Token::Semicolon,
                ident("b"),
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            tokens(r#""example.com/app" `json:"name"`"#),
            vec![
                Token::String("example.com/app".to_string()),
                Token::String("json:\"name\"".to_string()),
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_raw_string_spans_lines() {
        let toks = Lexer::new("`a\nb` x").tokenize().unwrap();
        assert_eq!(toks[0].token, Token::String("a\nb".to_string()));
        assert_eq!(toks[1].token, ident("x"));
        assert_eq!(toks[1].line, 2);
    }

    #[test]
    fn test_type_operators() {
        assert_eq!(
            tokens("*[]map <-chan ... ~ = :="),
            vec![
                Token::Star,
                Token::LBracket,
                Token::RBracket,
                Token::Map,
                Token::Arrow,
                Token::Chan,
                Token::Ellipsis,
                Token::Tilde,
                Token::Assign,
                Token::Operator(":=".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("0x1F 1e+9 3.14 0x1p-2 1_000"),
            vec![
                Token::Number("0x1F".to_string()),
                Token::Number("1e+9".to_string()),
                Token::Number("3.14".to_string()),
                Token::Number("0x1p-2".to_string()),
                Token::Number("1_000".to_string()),
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_runes() {
        assert_eq!(
            tokens(r"'a' '\n' '\''"),
            vec![
                Token::Rune("a".to_string()),
                Token::Rune("\\n".to_string()),
                Token::Rune("\\'".to_string()),
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(
            tokens("Größe"),
            vec![ident("Größe"), Token::Semicolon, Token::Eof]
        );
    }

    #[test]
    fn test_positions() {
        let toks = Lexer::new("package p\n\ntype T int").tokenize().unwrap();
        let ty = toks.iter().find(|s| s.token == Token::Type).unwrap();
        assert_eq!((ty.line, ty.column), (3, 1));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("import \"fmt\n").tokenize().unwrap_err();
        assert_eq!((err.line, err.column), (1, 8));
        assert!(err.message.contains("string literal not terminated"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("/* never closed").tokenize().unwrap_err();
        assert!(err.message.contains("comment not terminated"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("type # T").tokenize().unwrap_err();
        assert_eq!(err.column, 6);
        assert!(err.message.contains('#'));
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let toks = Lexer::new("\u{feff}package p\n").tokenize().unwrap();
        assert_eq!(toks[0].token, Token::Package);
        assert_eq!((toks[0].line, toks[0].column), (1, 1));

        let err = Lexer::new("package p\n\u{feff}").tokenize().unwrap_err();
        assert_eq!(err.line, 2);
    }
}
