use std::fmt;

/// A Go token, as far as the declaration-level parser needs to tell them apart.
///
/// Only the keywords that open a declaration or a type literal get their own
/// variant. Statement keywords (`return`, `break`, ...) come out as
/// [`Token::Ident`], which is also what automatic semicolon insertion expects
/// for `return`, `break`, `continue` and `fallthrough`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    /// Interpreted or raw string literal, with quotes removed.
    String(String),
    Rune(String),
    Number(String),

    // Keywords
    Package,
    Import,
    Type,
    Func,
    Var,
    Const,
    Struct,
    Interface,
    Map,
    Chan,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,

    // Operators that appear in type syntax
    Star,
    Assign,
    Arrow,
    Tilde,
    /// Any other operator, kept verbatim.
    Operator(String),

    Eof,
}

impl Token {
    pub(crate) fn keyword(ident: &str) -> Option<Token> {
        let token = match ident {
            "package" => Token::Package,
            "import" => Token::Import,
            "type" => Token::Type,
            "func" => Token::Func,
            "var" => Token::Var,
            "const" => Token::Const,
            "struct" => Token::Struct,
            "interface" => Token::Interface,
            "map" => Token::Map,
            "chan" => Token::Chan,
            _ => return None,
        };
        Some(token)
    }

    /// Whether a newline directly after this token becomes a `;`.
    pub(crate) fn ends_statement(&self) -> bool {
        match self {
            Token::Ident(_)
            | Token::String(_)
            | Token::Rune(_)
            | Token::Number(_)
            | Token::RParen
            | Token::RBracket
            | Token::RBrace => true,
            Token::Operator(op) => op == "++" || op == "--",
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier `{name}`"),
            Token::String(value) => write!(f, "string {value:?}"),
            Token::Rune(value) => write!(f, "rune '{value}'"),
            Token::Number(value) => write!(f, "number `{value}`"),
            Token::Package => f.write_str("`package`"),
            Token::Import => f.write_str("`import`"),
            Token::Type => f.write_str("`type`"),
            Token::Func => f.write_str("`func`"),
            Token::Var => f.write_str("`var`"),
            Token::Const => f.write_str("`const`"),
            Token::Struct => f.write_str("`struct`"),
            Token::Interface => f.write_str("`interface`"),
            Token::Map => f.write_str("`map`"),
            Token::Chan => f.write_str("`chan`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::LBrace => f.write_str("`{`"),
            Token::RBrace => f.write_str("`}`"),
            Token::Comma => f.write_str("`,`"),
            Token::Semicolon => f.write_str("`;`"),
            Token::Dot => f.write_str("`.`"),
            Token::Ellipsis => f.write_str("`...`"),
            Token::Star => f.write_str("`*`"),
            Token::Assign => f.write_str("`=`"),
            Token::Arrow => f.write_str("`<-`"),
            Token::Tilde => f.write_str("`~`"),
            Token::Operator(op) => write!(f, "`{op}`"),
            Token::Eof => f.write_str("end of file"),
        }
    }
}

/// A token with the position of its first character (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}
