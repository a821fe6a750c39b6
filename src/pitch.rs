//! Note names and a small spelled-pitch model.
//!
//! Chords only need pitches through [`PitchModel`]: build a root from its
//! name, transpose it by generic intervals, compare heights. [`Western`]
//! implements that with letter arithmetic, so `F` up an augmented fourth is
//! spelled `B`, never `Cb`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::degree::MAX_ACCIDENTALS;
use crate::error::HarteError;
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Position in C D E F G A B.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Semitones above C.
    pub fn semitones(self) -> i32 {
        [0, 2, 4, 5, 7, 9, 11][self as usize]
    }

    fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(7) as usize]
    }
}

/// A root spelling: letter plus homogeneous accidentals (`C`, `F#`, `Bbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteName {
    letter: Letter,
    alteration: i8,
}

impl NoteName {
    pub fn new(letter: Letter, alteration: i8) -> Self {
        Self { letter, alteration }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn alteration(&self) -> i8 {
        self.alteration
    }

    /// Pitch class in 0..12 (C = 0).
    pub fn pitch_class(&self) -> u8 {
        (self.letter.semitones() + self.alteration as i32).rem_euclid(12) as u8
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let accidental = if self.alteration > 0 { "#" } else { "b" };
        for _ in 0..self.alteration.unsigned_abs() {
            f.write_str(accidental)?;
        }
        Ok(())
    }
}

impl FromStr for NoteName {
    type Err = HarteError;

    /// Format: `<letter><accidentals>` with `#`s or `b`s, never both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| HarteError::grammar(s, "expected a root note A-G", 1))?;

        let rest = chars.as_str();
        let sharps = rest.chars().take_while(|&c| c == '#').count();
        let flats = rest.chars().take_while(|&c| c == 'b').count();
        if sharps + flats != rest.len() {
            return Err(HarteError::grammar(
                s,
                format!("invalid accidentals {rest:?} after root {}", letter.as_char()),
                2,
            ));
        }
        if rest.len() > MAX_ACCIDENTALS {
            return Err(HarteError::grammar(
                s,
                format!("at most {MAX_ACCIDENTALS} accidentals are supported"),
                2,
            ));
        }

        Ok(Self {
            letter,
            alteration: sharps as i8 - flats as i8,
        })
    }
}

impl TryFrom<String> for NoteName {
    type Error = HarteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteName> for String {
    fn from(name: NoteName) -> Self {
        name.to_string()
    }
}

/// A spelled pitch with an octave (C4 = middle C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledPitch {
    pub name: NoteName,
    pub octave: i8,
}

impl SpelledPitch {
    pub fn new(name: NoteName, octave: i8) -> Self {
        Self { name, octave }
    }

    pub fn pitch_class(&self) -> u8 {
        self.name.pitch_class()
    }

    /// MIDI-style height: C-1 = 0, C4 = 60, A4 = 69. May leave 0..=127.
    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.name.letter.semitones() + self.name.alteration as i32
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// The narrow pitch interface chords are converted through.
pub trait PitchModel {
    type Pitch;

    fn note_from_name(&self, name: &str) -> Result<Self::Pitch, HarteError>;

    fn transpose(&self, pitch: &Self::Pitch, interval: &Interval) -> Self::Pitch;

    fn compare_octave(&self, a: &Self::Pitch, b: &Self::Pitch) -> Ordering;
}

/// Twelve-tone pitches spelled on the seven letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Western {
    pub default_octave: i8,
}

impl Western {
    pub fn new(default_octave: i8) -> Self {
        Self { default_octave }
    }
}

impl Default for Western {
    fn default() -> Self {
        Self::new(4)
    }
}

impl PitchModel for Western {
    type Pitch = SpelledPitch;

    /// Accepts `Eb` (default octave) or `Eb3`.
    fn note_from_name(&self, name: &str) -> Result<SpelledPitch, HarteError> {
        let split = name
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(name.len());
        let (spelling, octave) = name.split_at(split);
        let note: NoteName = spelling.parse()?;
        let octave = if octave.is_empty() {
            self.default_octave
        } else {
            octave
                .parse()
                .map_err(|_| HarteError::grammar(name, "invalid octave", split + 1))?
        };
        Ok(SpelledPitch::new(note, octave))
    }

    fn transpose(&self, pitch: &SpelledPitch, interval: &Interval) -> SpelledPitch {
        let steps = pitch.name.letter.index()
            + 7 * pitch.octave as i32
            + interval.number() as i32
            - 1;
        let letter = Letter::from_index(steps);
        let octave = steps.div_euclid(7);
        let natural = (octave + 1) * 12 + letter.semitones();
        let target = pitch.midi() + interval.semitones();
        SpelledPitch::new(
            NoteName::new(letter, saturate(target - natural)),
            saturate(octave),
        )
    }

    fn compare_octave(&self, a: &SpelledPitch, b: &SpelledPitch) -> Ordering {
        a.midi().cmp(&b.midi())
    }
}

fn saturate(value: i32) -> i8 {
    i8::try_from(value).unwrap_or(if value < 0 { i8::MIN } else { i8::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::to_interval;

    fn note(s: &str) -> NoteName {
        s.parse().unwrap()
    }

    #[test]
    fn parse_naturals() {
        for (name, pc) in [("C", 0), ("D", 2), ("E", 4), ("F", 5), ("G", 7), ("A", 9), ("B", 11)] {
            assert_eq!(note(name).pitch_class(), pc, "{name}");
        }
    }

    #[test]
    fn parse_accidentals() {
        assert_eq!(note("C#").pitch_class(), 1);
        assert_eq!(note("Bb").pitch_class(), 10);
        assert_eq!(note("Cb").pitch_class(), 11);
        assert_eq!(note("B#").pitch_class(), 0);
        assert_eq!(note("Ebb").alteration(), -2);
        assert_eq!(note("F##").pitch_class(), 7);
    }

    #[test]
    fn display_round_trip() {
        for name in ["C", "F#", "Bb", "Ebb", "G##"] {
            assert_eq!(note(name).to_string(), name);
        }
    }

    #[test]
    fn invalid_names() {
        assert!("".parse::<NoteName>().is_err());
        assert!("H".parse::<NoteName>().is_err());
        assert!("c".parse::<NoteName>().is_err());
        assert!("C#b".parse::<NoteName>().is_err());
        assert!("Cx".parse::<NoteName>().is_err());
    }

    #[test]
    fn accidentals_are_capped() {
        assert_eq!("B####".parse::<NoteName>().unwrap().alteration, 4);
        assert_eq!("Dbbbb".parse::<NoteName>().unwrap().alteration, -4);
        assert!(matches!(
            "B#####".parse::<NoteName>(),
            Err(HarteError::Grammar { col: 2, .. })
        ));
        let long = format!("C{}", "#".repeat(200));
        assert!(long.parse::<NoteName>().is_err());
    }

    #[test]
    fn middle_c_and_a4() {
        let model = Western::default();
        assert_eq!(model.note_from_name("C4").unwrap().midi(), 60);
        assert_eq!(model.note_from_name("A4").unwrap().midi(), 69);
        assert_eq!(model.note_from_name("C").unwrap().octave, 4);
        assert_eq!(model.note_from_name("Eb2").unwrap().midi(), 39);
        assert_eq!(model.note_from_name("C-1").unwrap().midi(), 0);
    }

    #[test]
    fn transpose_spells_by_letter() {
        let model = Western::default();
        let f = model.note_from_name("F").unwrap();
        let b = model.transpose(&f, &to_interval("#11").unwrap());
        assert_eq!(b.name.to_string(), "B");
        assert_eq!(b.octave, 5);

        let c = model.note_from_name("C").unwrap();
        assert_eq!(model.transpose(&c, &to_interval("b3").unwrap()).name.to_string(), "Eb");
        assert_eq!(model.transpose(&c, &to_interval("#5").unwrap()).name.to_string(), "G#");
        assert_eq!(model.transpose(&c, &to_interval("bb7").unwrap()).name.to_string(), "Bbb");
    }

    #[test]
    fn transpose_across_octave_boundary() {
        let model = Western::default();
        let a = model.note_from_name("A3").unwrap();
        let up = model.transpose(&a, &to_interval("3").unwrap());
        assert_eq!(up.to_string(), "C#4");
        assert_eq!(up.midi() - a.midi(), 4);
    }

    #[test]
    fn transpose_down_a_diminished_unison() {
        let model = Western::default();
        let c = model.note_from_name("C4").unwrap();
        let cb = model.transpose(&c, &to_interval("b1").unwrap());
        assert_eq!(cb.to_string(), "Cb4");
        assert_eq!(cb.midi(), 59);
    }

    #[test]
    fn transpose_saturates_at_the_top_octave() {
        let model = Western::default();
        let b = model.note_from_name("B127").unwrap();
        let high = model.transpose(&b, &to_interval("9").unwrap());
        assert_eq!(high.octave, i8::MAX);
        assert_eq!(high.name.letter, Letter::C);
    }

    #[test]
    fn compare_by_height() {
        let model = Western::default();
        let b_sharp = model.note_from_name("B#3").unwrap();
        let c = model.note_from_name("C4").unwrap();
        let d = model.note_from_name("D4").unwrap();
        assert_eq!(model.compare_octave(&b_sharp, &c), Ordering::Equal);
        assert_eq!(model.compare_octave(&c, &d), Ordering::Less);
    }
}
