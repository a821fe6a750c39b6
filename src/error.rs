//! Error types shared by the parser, resolver and interval conversion.

use thiserror::Error;

/// An error raised while parsing or normalising a Harte chord.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarteError {
    /// The input does not match the Harte grammar.
    #[error("[col {col}] invalid Harte chord {input:?}: {message}")]
    Grammar {
        input: String,
        message: String,
        col: usize,
    },
    /// The shorthand is not in the shorthand table.
    #[error("unknown shorthand {shorthand:?} in chord {input:?}")]
    UnknownShorthand { input: String, shorthand: String },
    /// A degree token is malformed (mixed accidentals, zero, out of range...).
    /// `input` is the chord it came from, empty for a standalone token.
    #[error("invalid degree {degree:?}{}: {reason}", in_chord(.input))]
    InvalidDegree {
        input: String,
        degree: String,
        reason: String,
    },
    /// The operation needs chord content but got the `N` chord.
    #[error("the chord {input:?} is empty")]
    EmptyChord { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Grammar,
    UnknownShorthand,
    InvalidDegree,
    EmptyChord,
}

impl HarteError {
    pub fn grammar(input: impl Into<String>, message: impl Into<String>, col: usize) -> Self {
        Self::Grammar {
            input: input.into(),
            message: message.into(),
            col,
        }
    }

    pub fn unknown_shorthand(input: impl Into<String>, shorthand: impl Into<String>) -> Self {
        Self::UnknownShorthand {
            input: input.into(),
            shorthand: shorthand.into(),
        }
    }

    pub fn invalid_degree(degree: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDegree {
            input: String::new(),
            degree: degree.into(),
            reason: reason.into(),
        }
    }

    pub fn empty(input: impl Into<String>) -> Self {
        Self::EmptyChord {
            input: input.into(),
        }
    }

    /// Attach the chord text to a degree error raised by a bare token.
    pub fn in_chord(self, chord: &str) -> Self {
        match self {
            Self::InvalidDegree {
                input,
                degree,
                reason,
            } if input.is_empty() => Self::InvalidDegree {
                input: chord.to_string(),
                degree,
                reason,
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Grammar { .. } => ErrorKind::Grammar,
            Self::UnknownShorthand { .. } => ErrorKind::UnknownShorthand,
            Self::InvalidDegree { .. } => ErrorKind::InvalidDegree,
            Self::EmptyChord { .. } => ErrorKind::EmptyChord,
        }
    }
}

fn in_chord(input: &str) -> String {
    if input.is_empty() {
        String::new()
    } else {
        format!(" in chord {input:?}")
    }
}
