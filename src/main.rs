//! harte — inspect and normalise Harte chord symbols.
//!
//! Every subcommand takes chords as arguments, or one per line on stdin when
//! none are given. Each chord is handled on its own: failures are reported on
//! stderr, the rest still print, and the exit status is non-zero if any failed.

use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::Level;

use harte::{HarteConfig, HarteError, HarteParser, Western};

#[derive(Debug, Parser)]
#[command(name = "harte", version)]
#[command(about = "Parse, resolve and prettify Harte chord symbols.")]
struct Cli {
    /// Config file (defaults to ~/.harte/config.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Show the parsed descriptor of each chord.
    Parse { chords: Vec<String> },

    /// Resolve each chord to its canonical degree set.
    Degrees { chords: Vec<String> },

    /// Intervals above the root, e.g. `C:min` → `P1 m3 P5`.
    Intervals { chords: Vec<String> },

    /// Spelled pitches of each chord.
    Pitches {
        chords: Vec<String>,

        /// Octave of the root (overrides the config).
        #[arg(long)]
        octave: Option<i8>,
    },

    /// Shortest equivalent Harte string for each chord.
    Prettify { chords: Vec<String> },

    /// Prettify a chord file line by line, keeping `N` and blank lines.
    Normalize {
        /// Input file (stdin when absent).
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct DegreeReport {
    chord: String,
    degrees: Vec<String>,
    bass: String,
    pitch_classes: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct IntervalReport {
    chord: String,
    intervals: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PitchReport {
    chord: String,
    pitches: Vec<String>,
    bass: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match HarteConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => HarteConfig::load().unwrap_or_default(),
    };
    let parser = match config.parser() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.cmd {
        Command::Parse { chords } => each_chord(chords, |text| {
            print_yaml(&parser.parse(text)?);
            Ok(())
        }),
        Command::Degrees { chords } => each_chord(chords, |text| degrees(&parser, text)),
        Command::Intervals { chords } => each_chord(chords, |text| intervals(&parser, text)),
        Command::Pitches { chords, octave } => {
            let model = match octave {
                Some(octave) => Western::new(octave),
                None => config.pitch_model(),
            };
            each_chord(chords, |text| pitches(&parser, &model, text))
        }
        Command::Prettify { chords } => each_chord(chords, |text| {
            println!("{}", parser.prettify(text)?);
            Ok(())
        }),
        Command::Normalize { file } => normalize(&parser, file),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::warn!(failed, "some chords could not be processed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Run `f` over the argument chords, or stdin lines when there are none.
/// Returns the number of chords that failed.
fn each_chord(
    chords: Vec<String>,
    mut f: impl FnMut(&str) -> Result<(), HarteError>,
) -> io::Result<usize> {
    let inputs = if chords.is_empty() {
        io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
    } else {
        chords
    };

    let mut failed = 0;
    for text in inputs.iter().filter(|t| !t.trim().is_empty()) {
        if let Err(e) = f(text) {
            eprintln!("error: {e}");
            failed += 1;
        }
    }
    Ok(failed)
}

fn degrees(parser: &HarteParser, text: &str) -> Result<(), HarteError> {
    let set = parser.degrees(text)?;
    print_yaml(&DegreeReport {
        chord: text.trim().to_string(),
        degrees: set.degrees().iter().map(ToString::to_string).collect(),
        bass: set.bass().to_string(),
        pitch_classes: set.pitch_classes().into_iter().collect(),
    });
    Ok(())
}

fn intervals(parser: &HarteParser, text: &str) -> Result<(), HarteError> {
    let chord = parser.chord(text)?;
    print_yaml(&IntervalReport {
        chord: chord.to_string(),
        intervals: chord.intervals()?.iter().map(|i| i.name()).collect(),
    });
    Ok(())
}

fn pitches(parser: &HarteParser, model: &Western, text: &str) -> Result<(), HarteError> {
    let chord = parser.chord(text)?;
    print_yaml(&PitchReport {
        chord: chord.to_string(),
        pitches: chord.pitches(model)?.iter().map(ToString::to_string).collect(),
        bass: chord.bass_pitch(model)?.map(|p| p.to_string()),
    });
    Ok(())
}

/// Prettify every line of a chord file. Lines that fail are echoed unchanged
/// so the output stays aligned with the input.
fn normalize(parser: &HarteParser, file: Option<PathBuf>) -> io::Result<usize> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut failed = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match parser.normalize_line(&line) {
            Ok(pretty) => println!("{pretty}"),
            Err(e) => {
                eprintln!("line {}: {e}", idx + 1);
                println!("{line}");
                failed += 1;
            }
        }
    }
    Ok(failed)
}

fn print_yaml<T: Serialize>(value: &T) {
    match serde_yaml::to_string(value) {
        Ok(yaml) => print!("---\n{yaml}"),
        Err(e) => tracing::error!(error = %e, "cannot serialise output"),
    }
}
