//! Parse tree for Harte chord symbols.
//!
//! The tree keeps the words exactly as written, with their columns. Typing
//! and table lookups happen later, in the transform and resolve stages.

/// A parsed chord symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum ChordTree {
    /// The reserved `N` symbol: no chord is sounding.
    NoChord,
    Chord(ChordNode),
}

/// `root (':' shorthand? degree_list?)? ('/' bass)?`
#[derive(Debug, Clone, PartialEq)]
pub struct ChordNode {
    pub root: WordNode,
    pub shorthand: Option<WordNode>,
    /// Empty when the chord has no degree list.
    pub degrees: Vec<DegreeNode>,
    pub bass: Option<WordNode>,
}

/// A word as it appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct WordNode {
    pub text: String,
    pub col: usize,
}

/// One entry of a degree list, `*b3` or `11`.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeNode {
    pub omitted: bool,
    pub word: WordNode,
}

impl DegreeNode {
    /// The token text including the omission marker.
    pub fn token(&self) -> String {
        if self.omitted {
            format!("*{}", self.word.text)
        } else {
            self.word.text.clone()
        }
    }
}
