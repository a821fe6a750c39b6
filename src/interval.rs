//! Generic intervals (quality + number) derived from Harte degrees.
//!
//! Quality follows the octave-reduced number: 1, 4 and 5 sit on the
//! perfect axis, every other number on the major/minor axis. The number
//! itself keeps compound values, so `9` becomes a major ninth whose
//! `simple_name` is `M2`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::degree::Degree;
use crate::error::HarteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

impl Quality {
    pub fn symbol(self) -> char {
        match self {
            Quality::Perfect => 'P',
            Quality::Major => 'M',
            Quality::Minor => 'm',
            Quality::Augmented => 'A',
            Quality::Diminished => 'd',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'P' => Some(Quality::Perfect),
            'M' => Some(Quality::Major),
            'm' => Some(Quality::Minor),
            'A' => Some(Quality::Augmented),
            'd' => Some(Quality::Diminished),
            _ => None,
        }
    }
}

/// A diatonic interval independent of any pitch spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    quality: Quality,
    number: u8,
}

impl Interval {
    pub fn new(quality: Quality, number: u8) -> Result<Self, HarteError> {
        let interval = Self { quality, number };
        if number == 0 {
            return Err(HarteError::invalid_degree(
                interval.name(),
                "interval number must be positive",
            ));
        }
        let fits_axis = match quality {
            Quality::Perfect => is_perfect_number(number),
            Quality::Major | Quality::Minor => !is_perfect_number(number),
            Quality::Augmented | Quality::Diminished => true,
        };
        if !fits_axis {
            return Err(HarteError::invalid_degree(
                interval.name(),
                format!("{:?} does not apply to a {}", quality, ordinal(number)),
            ));
        }
        Ok(interval)
    }

    /// Convert a degree, renormalising accidentals that have no direct quality
    /// (`##4` → `P5`, `bbb3` → `m2`).
    pub fn from_degree(degree: &Degree) -> Result<Self, HarteError> {
        if degree.is_omitted() {
            return Err(HarteError::invalid_degree(
                degree.to_string(),
                "an omitted degree has no interval",
            ));
        }
        normalise(degree, degree.number(), degree.alteration() as i32)
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn simple_number(&self) -> u8 {
        (self.number - 1) % 7 + 1
    }

    /// Wider than an octave. The octave itself is simple, although
    /// [`simple_number`](Self::simple_number) folds it to 1.
    pub fn is_compound(&self) -> bool {
        self.number > 8
    }

    /// Chromatic size in semitones (`d1` is -1).
    pub fn semitones(&self) -> i32 {
        Degree::natural_semitones(self.number) + self.offset()
    }

    /// Name with the full number: `M9`, `P11`.
    pub fn name(&self) -> String {
        format!("{}{}", self.quality.symbol(), self.number)
    }

    /// Name with the octave-reduced number: `M2`, `P4`.
    pub fn simple_name(&self) -> String {
        format!("{}{}", self.quality.symbol(), self.simple_number())
    }

    /// The Harte degree spelling this interval (`m3` → `b3`, `d7` → `bb7`).
    /// Fails for numbers past the degree range (`M30`).
    pub fn to_degree(&self) -> Result<Degree, HarteError> {
        Degree::new(self.number, self.offset() as i8)
    }

    /// Semitones away from the natural degree of the same number.
    fn offset(&self) -> i32 {
        let perfect = is_perfect_number(self.number);
        match self.quality {
            Quality::Perfect | Quality::Major => 0,
            Quality::Minor => -1,
            Quality::Augmented => 1,
            Quality::Diminished if perfect => -1,
            Quality::Diminished => -2,
        }
    }
}

fn is_perfect_number(number: u8) -> bool {
    matches!((number.max(1) - 1) % 7 + 1, 1 | 4 | 5)
}

fn ordinal(number: u8) -> String {
    let suffix = match (number % 10, number % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{number}{suffix}")
}

fn normalise(written: &Degree, number: u8, alteration: i32) -> Result<Interval, HarteError> {
    let quality = match (is_perfect_number(number), alteration) {
        (true, 0) => Some(Quality::Perfect),
        (true, 1) | (false, 1) => Some(Quality::Augmented),
        (true, -1) | (false, -2) => Some(Quality::Diminished),
        (false, 0) => Some(Quality::Major),
        (false, -1) => Some(Quality::Minor),
        _ => None,
    };
    if let Some(quality) = quality {
        return Ok(Interval { quality, number });
    }

    // Move one step towards the accidental and keep the semitone size.
    let next = if alteration > 0 {
        number + 1
    } else if number > 1 {
        number - 1
    } else {
        return Err(HarteError::invalid_degree(
            written.to_string(),
            "cannot be lowered below a unison",
        ));
    };
    let shift = Degree::natural_semitones(next) - Degree::natural_semitones(number);
    normalise(written, next, alteration - shift)
}

/// Convert a Harte degree token to an interval.
pub fn to_interval(token: &str) -> Result<Interval, HarteError> {
    let degree: Degree = token.parse()?;
    Interval::from_degree(&degree)
}

impl Degree {
    /// Inverse of [`Interval::from_degree`] for directly representable intervals.
    pub fn from_interval(interval: &Interval) -> Result<Degree, HarteError> {
        interval.to_degree()
    }

    pub fn to_interval(&self) -> Result<Interval, HarteError> {
        Interval::from_degree(self)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.symbol(), self.number)
    }
}

impl FromStr for Interval {
    type Err = HarteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let quality = chars
            .next()
            .and_then(Quality::from_symbol)
            .ok_or_else(|| HarteError::invalid_degree(s, "missing interval quality"))?;
        let number: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| HarteError::invalid_degree(s, "invalid interval number"))?;
        Interval::new(quality, number)
    }
}

impl TryFrom<String> for Interval {
    type Error = HarteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.name()
    }
}
