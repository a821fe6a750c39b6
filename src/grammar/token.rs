//! Token types for the Harte lexer.

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based column of the first character.
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A run of letters, digits, `#` and `b`: roots, shorthands, degrees.
    /// The parser decides what a word is from where it appears.
    Word(String),

    // Delimiters
    Colon,
    Slash,
    LParen,
    RParen,
    Comma,
    Star,

    Eof,
}

impl TokenKind {
    /// How the token reads in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Word(w) => format!("'{w}'"),
            TokenKind::Colon => "':'".into(),
            TokenKind::Slash => "'/'".into(),
            TokenKind::LParen => "'('".into(),
            TokenKind::RParen => "')'".into(),
            TokenKind::Comma => "','".into(),
            TokenKind::Star => "'*'".into(),
            TokenKind::Eof => "end of input".into(),
        }
    }
}
