//! Chord model: degrees, descriptors, the shorthand table, resolution and
//! prettifying, plus the [`Chord`] value tying them together.

pub mod degree;
pub mod descriptor;
pub mod prettify;
pub mod resolve;
pub mod shorthand;

pub use degree::{Degree, MAX_DEGREE};
pub use descriptor::ChordDescriptor;
pub use prettify::prettify;
pub use resolve::{resolve, CanonicalDegreeSet};
pub use shorthand::{ShorthandDef, ShorthandTable, TableError, DEFAULT_TABLE};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::HarteError;
use crate::interval::{Interval, Quality};
use crate::pitch::{NoteName, PitchModel};

/// A parsed chord: what was written plus what it resolves to.
///
/// The `N` chord has no canonical set; its pitch and interval views are
/// empty and [`Chord::prettify`] fails with [`HarteError::EmptyChord`].
#[derive(Debug, Clone)]
pub struct Chord {
    descriptor: ChordDescriptor,
    canonical: Option<CanonicalDegreeSet>,
    table: Arc<ShorthandTable>,
}

impl Chord {
    /// Resolve `descriptor` against `table`.
    pub fn new(descriptor: ChordDescriptor, table: Arc<ShorthandTable>) -> Result<Self, HarteError> {
        let canonical = if descriptor.is_no_chord() {
            None
        } else {
            Some(resolve(&descriptor, &table).map_err(|e| e.in_chord(&descriptor.to_string()))?)
        };
        Ok(Self {
            descriptor,
            canonical,
            table,
        })
    }

    pub fn descriptor(&self) -> &ChordDescriptor {
        &self.descriptor
    }

    pub fn canonical(&self) -> Option<&CanonicalDegreeSet> {
        self.canonical.as_ref()
    }

    pub fn is_no_chord(&self) -> bool {
        self.descriptor.is_no_chord()
    }

    pub fn root(&self) -> Option<NoteName> {
        self.descriptor.root
    }

    pub fn shorthand(&self) -> Option<&str> {
        self.descriptor.shorthand.as_deref()
    }

    /// The explicit degree list as written, omissions included.
    pub fn degrees(&self) -> &[Degree] {
        &self.descriptor.degrees
    }

    /// The bass degree, `1` in root position.
    pub fn bass(&self) -> Degree {
        self.descriptor.bass_or_root()
    }

    pub fn bass_is_root(&self) -> bool {
        self.bass() == Degree::ROOT
    }

    pub fn contains_shorthand(&self) -> bool {
        self.descriptor.shorthand.is_some()
    }

    /// Every sounding degree when a shorthand is present, the explicit list
    /// when only degrees were written, `None` for a bare root or `N`.
    pub fn unwrap_shorthand(&self) -> Option<Vec<Degree>> {
        if self.contains_shorthand() {
            self.canonical.as_ref().map(|set| set.degrees().to_vec())
        } else if !self.descriptor.degrees.is_empty() {
            Some(self.descriptor.degrees.clone())
        } else {
            None
        }
    }

    /// Intervals above the root for every sounding degree.
    pub fn intervals(&self) -> Result<Vec<Interval>, HarteError> {
        match &self.canonical {
            Some(set) => set
                .intervals()
                .map_err(|e| e.in_chord(&self.descriptor.to_string())),
            None => Ok(Vec::new()),
        }
    }

    /// Simple interval names above the root, unison excluded (`C:min` →
    /// `m3`, `P5`).
    pub fn interval_names(&self) -> Result<Vec<String>, HarteError> {
        let names = self
            .intervals()?
            .iter()
            .filter(|i| !(i.number() == 1 && i.quality() == Quality::Perfect))
            .map(Interval::simple_name)
            .collect();
        Ok(names)
    }

    /// Pitches of every sounding degree, in canonical degree order.
    pub fn pitches<M: PitchModel>(&self, model: &M) -> Result<Vec<M::Pitch>, HarteError> {
        let (Some(root), Some(set)) = (self.root(), &self.canonical) else {
            return Ok(Vec::new());
        };
        let root = model.note_from_name(&root.to_string())?;
        let pitches = set
            .intervals()?
            .iter()
            .map(|interval| model.transpose(&root, interval))
            .collect();
        Ok(pitches)
    }

    /// Pitch of the bass degree, `None` for `N`.
    pub fn bass_pitch<M: PitchModel>(&self, model: &M) -> Result<Option<M::Pitch>, HarteError> {
        let Some(root) = self.root() else {
            return Ok(None);
        };
        let root = model.note_from_name(&root.to_string())?;
        let interval = Interval::from_degree(&self.bass())
            .map_err(|e| e.in_chord(&self.descriptor.to_string()))?;
        Ok(Some(model.transpose(&root, &interval)))
    }

    /// Absolute pitch classes (C = 0).
    pub fn pitch_classes(&self) -> BTreeSet<u8> {
        self.canonical
            .as_ref()
            .map(CanonicalDegreeSet::pitch_classes)
            .unwrap_or_default()
    }

    /// The shortest Harte string for this chord.
    pub fn prettify(&self) -> Result<String, HarteError> {
        match &self.canonical {
            Some(set) => Ok(prettify(set, &self.table)),
            None => Err(HarteError::empty(self.descriptor.to_string())),
        }
    }
}

/// Chords are equal when root, explicit degrees and bass agree.
impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
            && self.degrees() == other.degrees()
            && self.bass() == other.bass()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.descriptor, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Western;

    fn chord(desc: ChordDescriptor) -> Chord {
        Chord::new(desc, Arc::new(ShorthandTable::default())).unwrap()
    }

    fn c() -> NoteName {
        "C".parse().unwrap()
    }

    fn deg(s: &str) -> Degree {
        s.parse().unwrap()
    }

    #[test]
    fn accessors() {
        let ch = chord(
            ChordDescriptor::new(c())
                .with_shorthand("min7")
                .with_degrees(vec![deg("11")])
                .with_bass(deg("b3")),
        );
        assert_eq!(ch.shorthand(), Some("min7"));
        assert!(ch.contains_shorthand());
        assert_eq!(ch.degrees(), &[deg("11")]);
        assert_eq!(ch.bass(), deg("b3"));
        assert!(!ch.bass_is_root());
        assert_eq!(ch.to_string(), "C:min7(11)/b3");
    }

    #[test]
    fn unwrap_shorthand() {
        let ch = chord(ChordDescriptor::new(c()).with_shorthand("maj"));
        assert_eq!(ch.unwrap_shorthand(), Some(vec![deg("1"), deg("3"), deg("5")]));
        let ch = chord(ChordDescriptor::new(c()).with_degrees(vec![deg("3"), deg("b7")]));
        assert_eq!(ch.unwrap_shorthand(), Some(vec![deg("3"), deg("b7")]));
        assert_eq!(chord(ChordDescriptor::new(c())).unwrap_shorthand(), None);
    }

    #[test]
    fn interval_names_skip_unison() {
        let ch = chord(ChordDescriptor::new(c()).with_shorthand("min"));
        assert_eq!(ch.interval_names().unwrap(), ["m3", "P5"]);
    }

    #[test]
    fn pitches_follow_degree_spelling() {
        let f: NoteName = "F".parse().unwrap();
        let ch = chord(ChordDescriptor::new(f).with_shorthand("maj7").with_degrees(vec![deg("#11")]));
        let names: Vec<String> = ch
            .pitches(&Western::default())
            .unwrap()
            .iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(names, ["F", "A", "C", "E", "B"]);
    }

    #[test]
    fn bass_pitch() {
        let ch = chord(ChordDescriptor::new(c()).with_shorthand("maj").with_bass(deg("3")));
        let bass = ch.bass_pitch(&Western::default()).unwrap().unwrap();
        assert_eq!(bass.to_string(), "E4");
    }

    #[test]
    fn no_chord_is_empty() {
        let ch = chord(ChordDescriptor::no_chord());
        assert!(ch.is_no_chord());
        assert!(ch.canonical().is_none());
        assert!(ch.intervals().unwrap().is_empty());
        assert!(ch.pitches(&Western::default()).unwrap().is_empty());
        assert!(ch.pitch_classes().is_empty());
        assert_eq!(ch.prettify().unwrap_err(), HarteError::empty("N"));
    }

    #[test]
    fn equality_ignores_shorthand() {
        let a = chord(ChordDescriptor::new(c()).with_shorthand("maj"));
        let b = chord(ChordDescriptor::new(c()).with_shorthand("min"));
        assert_eq!(a, b);
        let c3 = chord(ChordDescriptor::new(c()).with_bass(deg("3")));
        assert_ne!(a, c3);
    }
}
