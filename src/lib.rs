//! Harte — chord-symbol parsing, degree resolution and prettifying.
//!
//! ```
//! let set = harte::resolve("C:min7").unwrap();
//! assert_eq!(set.pitch_classes().into_iter().collect::<Vec<_>>(), [0, 3, 7, 10]);
//! assert_eq!(harte::prettify("C:(3,5,b7,9)").unwrap(), "C:9");
//! ```

pub mod chord;
pub mod config;
pub mod error;
pub mod grammar;
pub mod interval;
pub mod pitch;

pub use chord::{CanonicalDegreeSet, Chord, ChordDescriptor, Degree, ShorthandDef, ShorthandTable};
pub use config::{ConfigError, HarteConfig};
pub use error::{ErrorKind, HarteError};
pub use grammar::HarteParser;
pub use interval::{to_interval, Interval, Quality};
pub use pitch::{NoteName, PitchModel, SpelledPitch, Western};

/// Parse text with the default parser.
pub fn parse(text: &str) -> Result<ChordDescriptor, HarteError> {
    HarteParser::global().parse(text)
}

/// Parse and resolve text with the default parser.
pub fn resolve(text: &str) -> Result<CanonicalDegreeSet, HarteError> {
    HarteParser::global().degrees(text)
}

/// Shortest equivalent Harte string, using the default parser.
pub fn prettify(text: &str) -> Result<String, HarteError> {
    HarteParser::global().prettify(text)
}

/// A [`Chord`] built by the default parser.
pub fn chord(text: &str) -> Result<Chord, HarteError> {
    HarteParser::global().chord(text)
}
