//! Lexer for Harte chord symbols.
//!
//! Converts source text into a stream of [`Token`]s. Whitespace between
//! tokens is skipped, since annotated corpora write `F:(b3, 5, b7)`.

use super::token::{Token, TokenKind};
use crate::error::HarteError;

pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, HarteError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    col: self.col(),
                });
                break;
            }

            let ch = self.peek();
            let token = match ch {
                ':' => self.single_char(TokenKind::Colon),
                '/' => self.single_char(TokenKind::Slash),
                '(' => self.single_char(TokenKind::LParen),
                ')' => self.single_char(TokenKind::RParen),
                ',' => self.single_char(TokenKind::Comma),
                '*' => self.single_char(TokenKind::Star),
                c if is_word_char(c) => self.lex_word(),
                _ => {
                    return Err(HarteError::grammar(
                        self.source,
                        format!("unexpected character: '{ch}'"),
                        self.col(),
                    ));
                }
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn col(&self) -> usize {
        self.pos + 1
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let col = self.col();
        self.advance();
        Token { kind, col }
    }

    fn lex_word(&mut self) -> Token {
        let col = self.col();
        let mut word = String::new();
        while !self.is_at_end() && is_word_char(self.peek()) {
            word.push(self.advance());
        }
        Token {
            kind: TokenKind::Word(word),
            col,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '#'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn word(s: &str) -> TokenKind {
        TokenKind::Word(s.to_string())
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn full_chord() {
        assert_eq!(
            kinds("C#:min7(*b3,11)/b7"),
            vec![
                word("C#"),
                TokenKind::Colon,
                word("min7"),
                TokenKind::LParen,
                TokenKind::Star,
                word("b3"),
                TokenKind::Comma,
                word("11"),
                TokenKind::RParen,
                TokenKind::Slash,
                word("b7"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn whitespace_between_degrees_is_skipped() {
        assert_eq!(
            kinds("F:(b3, 5)"),
            vec![
                word("F"),
                TokenKind::Colon,
                TokenKind::LParen,
                word("b3"),
                TokenKind::Comma,
                word("5"),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn columns_are_one_based() {
        let tokens = Lexer::new("C:maj").tokenize().unwrap();
        let cols: Vec<usize> = tokens.iter().map(|t| t.col).collect();
        assert_eq!(cols, vec![1, 2, 3, 6]);
    }

    #[test]
    fn unexpected_character() {
        let err = Lexer::new("C:maj7-").tokenize().unwrap_err();
        match err {
            HarteError::Grammar { col, message, input } => {
                assert_eq!(col, 7);
                assert!(message.contains('-'));
                assert_eq!(input, "C:maj7-");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
