//! Scale degrees as written in Harte chords: `3`, `b7`, `#11`, `*5`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarteError;

/// Highest degree number accepted (three diatonic octaves).
pub const MAX_DEGREE: u8 = 21;

/// Accidental runs longer than this are rejected.
pub(crate) const MAX_ACCIDENTALS: usize = 4;

/// Semitones above the root for the natural simple degrees 1..=7.
const NATURAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A degree token: optional omission marker, homogeneous accidentals, number.
///
/// Degrees order by number first and alteration second, so `b3 < 3 < #3 < b4`.
/// Compound degrees keep their number (`9` is not `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Degree {
    omitted: bool,
    alteration: i8,
    number: u8,
}

impl Degree {
    /// The unaltered root, `1`.
    pub const ROOT: Degree = Degree {
        omitted: false,
        alteration: 0,
        number: 1,
    };

    /// Unchecked constructor for tables built at compile time.
    pub(crate) const fn from_parts(number: u8, alteration: i8) -> Self {
        Self {
            omitted: false,
            alteration,
            number,
        }
    }

    pub fn new(number: u8, alteration: i8) -> Result<Self, HarteError> {
        let degree = Self {
            omitted: false,
            alteration,
            number,
        };
        if number == 0 || number > MAX_DEGREE {
            return Err(HarteError::invalid_degree(
                degree.to_string(),
                format!("degree number must be in 1..={MAX_DEGREE}"),
            ));
        }
        if alteration.unsigned_abs() as usize > MAX_ACCIDENTALS {
            return Err(HarteError::invalid_degree(
                degree.to_string(),
                format!("at most {MAX_ACCIDENTALS} accidentals are supported"),
            ));
        }
        Ok(degree)
    }

    /// The omission form of this degree (`*3`).
    pub fn omitted(self) -> Self {
        Self {
            omitted: true,
            ..self
        }
    }

    /// This degree without its omission marker.
    pub fn bare(self) -> Self {
        Self {
            omitted: false,
            ..self
        }
    }

    pub fn is_omitted(&self) -> bool {
        self.omitted
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Signed accidental count: `#` is +1, `b` is -1.
    pub fn alteration(&self) -> i8 {
        self.alteration
    }

    /// Octave-reduced number in 1..=7 (`9` → 2, `8` → 1).
    pub fn simple_number(&self) -> u8 {
        (self.number - 1) % 7 + 1
    }

    /// Whole octaves above the simple degree.
    pub fn octaves(&self) -> u8 {
        (self.number - 1) / 7
    }

    pub fn is_root(&self) -> bool {
        self.bare() == Self::ROOT
    }

    /// Any spelling of the third (`b3`, `3`, `#3`, `10`...).
    pub fn is_third(&self) -> bool {
        self.simple_number() == 3
    }

    /// Any spelling of the fifth (`b5`, `5`, `#5`, `12`...).
    pub fn is_fifth(&self) -> bool {
        self.simple_number() == 5
    }

    /// Fractional sort key: `b3` → 2.9, `3` → 3.0, `#3` → 3.1.
    pub fn sort_key(&self) -> f32 {
        self.number as f32 + 0.1 * self.alteration as f32
    }

    /// Chromatic distance above the root.
    pub fn semitones(&self) -> i32 {
        NATURAL_SEMITONES[(self.simple_number() - 1) as usize]
            + 12 * self.octaves() as i32
            + self.alteration as i32
    }

    /// Natural semitones for a simple or compound number, ignoring accidentals.
    pub(crate) fn natural_semitones(number: u8) -> i32 {
        let simple = ((number - 1) % 7) as usize;
        NATURAL_SEMITONES[simple] + 12 * ((number - 1) / 7) as i32
    }
}

impl Ord for Degree {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then(self.alteration.cmp(&other.alteration))
            .then(self.omitted.cmp(&other.omitted))
    }
}

impl PartialOrd for Degree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.omitted {
            f.write_str("*")?;
        }
        let accidental = if self.alteration > 0 { "#" } else { "b" };
        for _ in 0..self.alteration.unsigned_abs() {
            f.write_str(accidental)?;
        }
        write!(f, "{}", self.number)
    }
}

impl FromStr for Degree {
    type Err = HarteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (omitted, rest) = match s.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let digits_at = rest
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| HarteError::invalid_degree(s, "missing degree number"))?;
        let (accidentals, digits) = rest.split_at(digits_at);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(HarteError::invalid_degree(s, "non-numeric degree number"));
        }

        let sharps = accidentals.chars().filter(|&c| c == '#').count();
        let flats = accidentals.chars().filter(|&c| c == 'b').count();
        if sharps + flats != accidentals.len() {
            return Err(HarteError::invalid_degree(s, "unexpected accidental character"));
        }
        if sharps > 0 && flats > 0 {
            return Err(HarteError::invalid_degree(s, "mixed sharps and flats"));
        }
        if sharps.max(flats) > MAX_ACCIDENTALS {
            return Err(HarteError::invalid_degree(
                s,
                format!("at most {MAX_ACCIDENTALS} accidentals are supported"),
            ));
        }

        let number: u8 = digits
            .parse()
            .map_err(|_| HarteError::invalid_degree(s, "degree number out of range"))?;
        let alteration = sharps as i8 - flats as i8;

        let degree = Degree::new(number, alteration).map_err(|_| {
            HarteError::invalid_degree(s, format!("degree number must be in 1..={MAX_DEGREE}"))
        })?;
        Ok(if omitted { degree.omitted() } else { degree })
    }
}

impl TryFrom<String> for Degree {
    type Error = HarteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Degree> for String {
    fn from(degree: Degree) -> Self {
        degree.to_string()
    }
}
