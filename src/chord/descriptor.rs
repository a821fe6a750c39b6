//! Flat, typed description of a chord symbol as written.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::degree::Degree;
use crate::pitch::NoteName;

/// Root, optional shorthand, explicit degrees in input order, optional bass.
///
/// A descriptor without a root is the `N` (no chord) symbol and carries
/// nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordDescriptor {
    pub root: Option<NoteName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degrees: Vec<Degree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass: Option<Degree>,
}

impl ChordDescriptor {
    pub fn new(root: NoteName) -> Self {
        Self {
            root: Some(root),
            ..Self::default()
        }
    }

    pub fn no_chord() -> Self {
        Self::default()
    }

    pub fn with_shorthand(mut self, shorthand: impl Into<String>) -> Self {
        self.shorthand = Some(shorthand.into());
        self
    }

    pub fn with_degrees(mut self, degrees: Vec<Degree>) -> Self {
        self.degrees = degrees;
        self
    }

    pub fn with_bass(mut self, bass: Degree) -> Self {
        self.bass = Some(bass);
        self
    }

    pub fn is_no_chord(&self) -> bool {
        self.root.is_none()
    }

    /// Degrees marked with `*`, without the marker.
    pub fn omissions(&self) -> impl Iterator<Item = Degree> + '_ {
        self.degrees
            .iter()
            .filter(|d| d.is_omitted())
            .map(|d| d.bare())
    }

    /// Explicit degrees that are not omissions.
    pub fn additions(&self) -> impl Iterator<Item = Degree> + '_ {
        self.degrees.iter().filter(|d| !d.is_omitted()).copied()
    }

    /// The bass degree, `1` when the chord is in root position.
    pub fn bass_or_root(&self) -> Degree {
        self.bass.unwrap_or(Degree::ROOT)
    }
}

impl fmt::Display for ChordDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return f.write_str("N");
        };
        write!(f, "{root}")?;
        if self.shorthand.is_some() || !self.degrees.is_empty() {
            f.write_str(":")?;
        }
        if let Some(shorthand) = &self.shorthand {
            f.write_str(shorthand)?;
        }
        if !self.degrees.is_empty() {
            let list: Vec<String> = self.degrees.iter().map(Degree::to_string).collect();
            write!(f, "({})", list.join(","))?;
        }
        if let Some(bass) = self.bass {
            write!(f, "/{bass}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(s: &str) -> Degree {
        s.parse().unwrap()
    }

    #[test]
    fn no_chord_displays_as_n() {
        let desc = ChordDescriptor::no_chord();
        assert!(desc.is_no_chord());
        assert_eq!(desc.to_string(), "N");
    }

    #[test]
    fn display_renders_harte() {
        let c: NoteName = "C".parse().unwrap();
        assert_eq!(ChordDescriptor::new(c).to_string(), "C");
        assert_eq!(ChordDescriptor::new(c).with_shorthand("min7").to_string(), "C:min7");
        assert_eq!(
            ChordDescriptor::new(c)
                .with_shorthand("maj7")
                .with_degrees(vec![deg("4"), deg("*5")])
                .with_bass(deg("b4"))
                .to_string(),
            "C:maj7(4,*5)/b4"
        );
        assert_eq!(ChordDescriptor::new(c).with_bass(deg("3")).to_string(), "C/3");
    }

    #[test]
    fn omissions_and_additions() {
        let c: NoteName = "C".parse().unwrap();
        let desc = ChordDescriptor::new(c).with_degrees(vec![deg("3"), deg("*5"), deg("b7")]);
        assert_eq!(desc.omissions().collect::<Vec<_>>(), vec![deg("5")]);
        assert_eq!(desc.additions().collect::<Vec<_>>(), vec![deg("3"), deg("b7")]);
        assert_eq!(desc.bass_or_root(), Degree::ROOT);
    }

    #[test]
    fn yaml_output_skips_empty_parts() {
        let c: NoteName = "Db".parse().unwrap();
        let yaml = serde_yaml::to_string(&ChordDescriptor::new(c).with_shorthand("maj")).unwrap();
        assert_eq!(yaml, "root: Db\nshorthand: maj\n");
    }
}
