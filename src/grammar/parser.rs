//! Parser for Harte chord symbols.
//!
//! Recursive descent over the token stream:
//!
//! ```text
//! chord       := note (':' shorthand? degree_list?)? ('/' bass)?
//! note        := natural ('#'+ | 'b'+)?
//! shorthand   := [a-z0-9]+
//! degree_list := '(' degree (',' degree)* ')'
//! degree      := '*'? ('#'+ | 'b'+)? number
//! bass        := ('#'+ | 'b'+)? number
//! ```
//!
//! The `N` symbol never reaches this parser; [`super::HarteParser`] handles
//! it before tokenizing.

use super::ast::*;
use super::token::{Token, TokenKind};
use crate::error::HarteError;

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    pub fn parse(&mut self) -> Result<ChordTree, HarteError> {
        if self.check(&TokenKind::Eof) {
            return Err(self.error("empty chord symbol", self.peek().col));
        }

        let root = self.parse_root()?;
        let mut shorthand = None;
        let mut degrees = Vec::new();

        if self.check(&TokenKind::Colon) {
            let colon = self.advance().col;
            if let TokenKind::Word(_) = self.peek().kind {
                shorthand = Some(self.parse_shorthand()?);
            }
            if self.check(&TokenKind::LParen) {
                degrees = self.parse_degree_list()?;
            }
            if shorthand.is_none() && degrees.is_empty() {
                return Err(self.error("expected a shorthand or a degree list after ':'", colon + 1));
            }
        }

        let bass = if self.check(&TokenKind::Slash) {
            self.advance();
            Some(self.expect_degree_word()?)
        } else {
            None
        };

        if !self.check(&TokenKind::Eof) {
            let t = self.peek();
            return Err(self.error(format!("unexpected {} after chord", t.kind.describe()), t.col));
        }

        Ok(ChordTree::Chord(ChordNode {
            root,
            shorthand,
            degrees,
            bass,
        }))
    }

    fn parse_root(&mut self) -> Result<WordNode, HarteError> {
        let t = self.peek();
        match &t.kind {
            TokenKind::Word(w) if is_note_word(w) => {
                let node = WordNode {
                    text: w.clone(),
                    col: t.col,
                };
                self.advance();
                Ok(node)
            }
            TokenKind::Word(w) => Err(self.error(format!("invalid root note '{w}'"), t.col)),
            other => Err(self.error(
                format!("expected a root note, got {}", other.describe()),
                t.col,
            )),
        }
    }

    fn parse_shorthand(&mut self) -> Result<WordNode, HarteError> {
        let node = self.expect_word("shorthand")?;
        let well_formed = node
            .text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(self.error(format!("malformed shorthand '{}'", node.text), node.col));
        }
        Ok(node)
    }

    fn parse_degree_list(&mut self) -> Result<Vec<DegreeNode>, HarteError> {
        self.expect(TokenKind::LParen)?;
        let mut degrees = Vec::new();

        loop {
            let omitted = if self.check(&TokenKind::Star) {
                self.advance();
                true
            } else {
                false
            };
            let word = self.expect_degree_word()?;
            degrees.push(DegreeNode { omitted, word });

            let t = self.peek();
            match t.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RParen => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(self.error(
                        format!("expected ',' or ')', got {}", t.kind.describe()),
                        t.col,
                    ));
                }
            }
        }

        Ok(degrees)
    }

    // --- Utility methods ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, HarteError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            let t = self.peek();
            Err(self.error(
                format!("expected {}, got {}", kind.describe(), t.kind.describe()),
                t.col,
            ))
        }
    }

    fn expect_word(&mut self, what: &str) -> Result<WordNode, HarteError> {
        let t = self.peek();
        match &t.kind {
            TokenKind::Word(w) => {
                let node = WordNode {
                    text: w.clone(),
                    col: t.col,
                };
                self.advance();
                Ok(node)
            }
            other => Err(self.error(format!("expected {what}, got {}", other.describe()), t.col)),
        }
    }

    fn expect_degree_word(&mut self) -> Result<WordNode, HarteError> {
        let node = self.expect_word("a degree")?;
        if !is_degree_word(&node.text) {
            return Err(self.error(format!("expected a degree, got '{}'", node.text), node.col));
        }
        Ok(node)
    }

    fn error(&self, message: impl Into<String>, col: usize) -> HarteError {
        HarteError::grammar(self.source, message, col)
    }
}

/// `natural ('#'+ | 'b'+)?`
fn is_note_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(letter) = chars.next() else {
        return false;
    };
    let rest = chars.as_str();
    ('A'..='G').contains(&letter)
        && (rest.chars().all(|c| c == '#') || rest.chars().all(|c| c == 'b'))
}

/// Accidentals then digits. Mixed accidentals pass here and are rejected
/// when the degree is typed.
fn is_degree_word(word: &str) -> bool {
    let digits = word.trim_start_matches(['#', 'b']);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lexer::Lexer;

    fn parse(src: &str) -> Result<ChordTree, HarteError> {
        let mut lexer = Lexer::new(src);
        let tokens = lexer.tokenize()?;
        let mut parser = Parser::new(src, tokens);
        parser.parse()
    }

    fn node(src: &str) -> ChordNode {
        match parse(src).unwrap() {
            ChordTree::Chord(node) => node,
            ChordTree::NoChord => panic!("expected a chord"),
        }
    }

    fn error_col(src: &str) -> usize {
        match parse(src).unwrap_err() {
            HarteError::Grammar { col, .. } => col,
            other => panic!("expected a grammar error, got {other:?}"),
        }
    }

    #[test]
    fn parse_bare_root() {
        let chord = node("C");
        assert_eq!(chord.root.text, "C");
        assert!(chord.shorthand.is_none());
        assert!(chord.degrees.is_empty());
        assert!(chord.bass.is_none());
    }

    #[test]
    fn parse_shorthand() {
        let chord = node("Bb:min7");
        assert_eq!(chord.root.text, "Bb");
        assert_eq!(chord.shorthand.unwrap().text, "min7");
    }

    #[test]
    fn parse_full_chord() {
        let chord = node("C:maj7(4,*5,b6)/b4");
        assert_eq!(chord.shorthand.as_ref().unwrap().text, "maj7");
        let tokens: Vec<String> = chord.degrees.iter().map(DegreeNode::token).collect();
        assert_eq!(tokens, ["4", "*5", "b6"]);
        assert_eq!(chord.bass.unwrap().text, "b4");
    }

    #[test]
    fn parse_degree_list_without_shorthand() {
        let chord = node("F:(b3, 11, b7, 5)");
        assert!(chord.shorthand.is_none());
        assert_eq!(chord.degrees.len(), 4);
        assert_eq!(chord.degrees[1].word.text, "11");
    }

    #[test]
    fn parse_slash_chord_without_colon() {
        let chord = node("G/3");
        assert_eq!(chord.bass.unwrap().text, "3");
    }

    #[test]
    fn mixed_accidentals_are_left_for_typing() {
        let chord = node("C:(#b3)");
        assert_eq!(chord.degrees[0].word.text, "#b3");
    }

    #[test]
    fn error_unbalanced_parens() {
        assert_eq!(error_col("C:(3,5"), 7);
    }

    #[test]
    fn error_missing_root() {
        assert_eq!(error_col(":maj"), 1);
        assert_eq!(error_col("H:maj"), 1);
        assert_eq!(error_col("c:maj"), 1);
    }

    #[test]
    fn error_empty_input() {
        assert_eq!(error_col(""), 1);
    }

    #[test]
    fn error_non_numeric_degree() {
        assert_eq!(error_col("C:(3,x)"), 6);
        assert_eq!(error_col("C/maj"), 3);
    }

    #[test]
    fn error_malformed_shorthand() {
        assert_eq!(error_col("C:Maj7"), 3);
        assert_eq!(error_col("C:maj#"), 3);
    }

    #[test]
    fn error_dangling_colon() {
        assert_eq!(error_col("C:"), 3);
        assert_eq!(error_col("C:/3"), 3);
    }

    #[test]
    fn error_empty_degree_list() {
        assert!(parse("C:maj()").is_err());
        assert!(parse("C:(3,)").is_err());
    }

    #[test]
    fn error_trailing_tokens() {
        assert_eq!(error_col("C:maj)"), 6);
        assert_eq!(error_col("C:maj/3/5"), 8);
        assert!(parse("C maj").is_err());
    }

    #[test]
    fn error_root_glued_to_shorthand() {
        assert!(parse("Cmaj7").is_err());
    }
}
