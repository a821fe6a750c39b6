//! Tree-to-descriptor transform.
//!
//! Reduces a [`ChordTree`] to a flat [`ChordDescriptor`]: words become typed
//! roots and degrees, the degree list keeps its input order. Shorthand names
//! are copied through untouched; whether they exist is the resolver's call.

use crate::chord::degree::Degree;
use crate::chord::descriptor::ChordDescriptor;
use crate::error::HarteError;
use crate::pitch::NoteName;

use super::ast::*;

/// Transform a parse tree into a descriptor. `source` is the chord text the
/// tree was parsed from; errors name it.
pub fn to_descriptor(tree: &ChordTree, source: &str) -> Result<ChordDescriptor, HarteError> {
    let node = match tree {
        ChordTree::NoChord => return Ok(ChordDescriptor::no_chord()),
        ChordTree::Chord(node) => node,
    };

    let root = node.root.text.parse::<NoteName>().map_err(|e| match e {
        HarteError::Grammar { message, col, .. } => {
            HarteError::grammar(source, message, node.root.col + col - 1)
        }
        other => other,
    })?;
    let degrees = node
        .degrees
        .iter()
        .map(|d| d.token().parse::<Degree>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.in_chord(source))?;
    let bass = node
        .bass
        .as_ref()
        .map(|b| b.text.parse::<Degree>())
        .transpose()
        .map_err(|e| e.in_chord(source))?;

    Ok(ChordDescriptor {
        root: Some(root),
        shorthand: node.shorthand.as_ref().map(|s| s.text.clone()),
        degrees,
        bass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lexer::Lexer;
    use crate::grammar::parser::Parser;

    fn transform(src: &str) -> Result<ChordDescriptor, HarteError> {
        let tokens = Lexer::new(src).tokenize()?;
        let tree = Parser::new(src, tokens).parse()?;
        to_descriptor(&tree, src)
    }

    #[test]
    fn no_chord() {
        let desc = to_descriptor(&ChordTree::NoChord, "N").unwrap();
        assert!(desc.is_no_chord());
    }

    #[test]
    fn degrees_keep_input_order() {
        let desc = transform("F:(b3, 11, b7, 5)").unwrap();
        let names: Vec<String> = desc.degrees.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["b3", "11", "b7", "5"]);
        assert!(desc.shorthand.is_none());
        assert!(desc.bass.is_none());
    }

    #[test]
    fn unknown_shorthand_passes_through() {
        let desc = transform("C:xyz").unwrap();
        assert_eq!(desc.shorthand.as_deref(), Some("xyz"));
    }

    #[test]
    fn typed_root_and_bass() {
        let desc = transform("Eb:maj7(*5)/7").unwrap();
        assert_eq!(desc.root.unwrap().to_string(), "Eb");
        assert_eq!(desc.bass.unwrap().to_string(), "7");
        assert!(desc.degrees[0].is_omitted());
    }

    #[test]
    fn mixed_accidentals_are_invalid_degrees() {
        let err = transform("C:(#b3)").unwrap_err();
        assert!(matches!(err, HarteError::InvalidDegree { .. }));
        let err = transform("C/#b3").unwrap_err();
        assert!(matches!(err, HarteError::InvalidDegree { .. }));
    }

    #[test]
    fn degree_errors_name_the_chord() {
        match transform("C:maj(9,#b3)").unwrap_err() {
            HarteError::InvalidDegree { input, degree, .. } => {
                assert_eq!(input, "C:maj(9,#b3)");
                assert_eq!(degree, "#b3");
            }
            other => panic!("expected an invalid degree, got {other:?}"),
        }
        match transform("G:maj7/0").unwrap_err() {
            HarteError::InvalidDegree { input, .. } => assert_eq!(input, "G:maj7/0"),
            other => panic!("expected an invalid degree, got {other:?}"),
        }
    }

    #[test]
    fn root_errors_point_into_the_chord() {
        match transform("B#####:aug").unwrap_err() {
            HarteError::Grammar { input, col, .. } => {
                assert_eq!(input, "B#####:aug");
                assert_eq!(col, 2);
            }
            other => panic!("expected a grammar error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_degree() {
        assert!(matches!(
            transform("C:(0)"),
            Err(HarteError::InvalidDegree { .. })
        ));
        assert!(matches!(
            transform("C:(99)"),
            Err(HarteError::InvalidDegree { .. })
        ));
    }
}
