//! Degree resolver — expands a descriptor into its canonical degree set.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::degree::Degree;
use super::descriptor::ChordDescriptor;
use super::shorthand::ShorthandTable;
use crate::error::HarteError;
use crate::interval::Interval;
use crate::pitch::NoteName;

/// Assumed when nothing names the triad: a major third and a perfect fifth.
const DEFAULT_TRIAD: [Degree; 2] = [Degree::from_parts(3, 0), Degree::from_parts(5, 0)];

/// Sorted, de-duplicated degrees a chord actually sounds, root and bass
/// included. Never contains omission markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalDegreeSet {
    root: NoteName,
    degrees: Vec<Degree>,
    bass: Degree,
    #[serde(skip)]
    bass_in_body: bool,
}

impl CanonicalDegreeSet {
    /// Build a set from chord-body degrees and a bass. The bass is added if
    /// the body does not already contain it.
    pub fn new(
        root: NoteName,
        degrees: impl IntoIterator<Item = Degree>,
        bass: Degree,
    ) -> Result<Self, HarteError> {
        let mut body = BTreeSet::new();
        for degree in degrees {
            if degree.is_omitted() {
                return Err(HarteError::invalid_degree(
                    degree.to_string(),
                    "a canonical degree set cannot hold omissions",
                ));
            }
            body.insert(degree);
        }
        if bass.is_omitted() {
            return Err(HarteError::invalid_degree(
                bass.to_string(),
                "the bass cannot be an omission",
            ));
        }
        Ok(Self::assemble(root, body, Some(bass)))
    }

    fn assemble(root: NoteName, mut body: BTreeSet<Degree>, bass: Option<Degree>) -> Self {
        let bass_in_body = bass.map_or(true, |b| body.contains(&b));
        if let Some(b) = bass {
            body.insert(b);
        }
        Self {
            root,
            degrees: body.into_iter().collect(),
            bass: bass.unwrap_or(Degree::ROOT),
            bass_in_body,
        }
    }

    pub fn root(&self) -> NoteName {
        self.root
    }

    pub fn degrees(&self) -> &[Degree] {
        &self.degrees
    }

    pub fn bass(&self) -> Degree {
        self.bass
    }

    pub fn contains(&self, degree: &Degree) -> bool {
        self.degrees.contains(degree)
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// The chord body: every degree except a bass that is only there as the bass.
    pub fn body(&self) -> Vec<Degree> {
        self.degrees
            .iter()
            .filter(|d| self.bass_in_body || **d != self.bass)
            .copied()
            .collect()
    }

    /// True when the bass sounds but does not belong to the chord body.
    pub fn bass_is_added(&self) -> bool {
        !self.bass_in_body && self.contains(&self.bass)
    }

    /// Semitones above the root, in degree order.
    pub fn semitones(&self) -> Vec<i32> {
        self.degrees.iter().map(Degree::semitones).collect()
    }

    /// Absolute pitch classes (C = 0) of every sounding degree.
    pub fn pitch_classes(&self) -> BTreeSet<u8> {
        let root = self.root.pitch_class() as i32;
        self.degrees
            .iter()
            .map(|d| (root + d.semitones()).rem_euclid(12) as u8)
            .collect()
    }

    pub fn intervals(&self) -> Result<Vec<Interval>, HarteError> {
        self.degrees.iter().map(Interval::from_degree).collect()
    }
}

/// Resolve a descriptor against a shorthand table.
///
/// 1. Start from the shorthand's degrees; without a shorthand, from nothing
///    when the explicit degrees mention a root, third or fifth, otherwise
///    from the default triad.
/// 2. Add the explicit degrees.
/// 3. Apply omissions: a bare `*N` drops every implied spelling of N, an
///    altered one (`*b3`) only that spelling; explicit degrees are dropped by
///    exact match.
/// 4. Add the root unless `*1` is present, then the bass.
pub fn resolve(
    descriptor: &ChordDescriptor,
    table: &ShorthandTable,
) -> Result<CanonicalDegreeSet, HarteError> {
    let root = descriptor
        .root
        .ok_or_else(|| HarteError::empty(descriptor.to_string()))?;

    let omissions: HashSet<Degree> = descriptor.omissions().collect();
    let additions: Vec<Degree> = descriptor.additions().collect();

    let implied: Vec<Degree> = match &descriptor.shorthand {
        Some(name) => table
            .get(name)
            .ok_or_else(|| HarteError::unknown_shorthand(descriptor.to_string(), name.as_str()))?
            .to_vec(),
        None if additions.iter().any(names_triad) => Vec::new(),
        None => DEFAULT_TRIAD.to_vec(),
    };

    let mut body: BTreeSet<Degree> = implied
        .into_iter()
        .filter(|d| !omissions.iter().any(|o| omits_implied(o, d)))
        .collect();
    body.extend(additions.into_iter().filter(|d| !omissions.contains(d)));

    let root_suppressed = omissions.contains(&Degree::ROOT);
    if !root_suppressed {
        body.insert(Degree::ROOT);
    }
    let bass = match descriptor.bass {
        Some(bass) => Some(bass),
        None if root_suppressed => None,
        None => Some(Degree::ROOT),
    };

    let set = CanonicalDegreeSet::assemble(root, body, bass);
    tracing::debug!(chord = %descriptor, degrees = ?set.degrees, "resolved chord");
    Ok(set)
}

/// Degrees that pin the triad down: any root, third or fifth spelling.
pub(crate) fn names_triad(degree: &Degree) -> bool {
    matches!(degree.simple_number(), 1 | 3 | 5)
}

fn omits_implied(omission: &Degree, degree: &Degree) -> bool {
    if omission.alteration() == 0 {
        omission.number() == degree.number()
    } else {
        omission == degree
    }
}
