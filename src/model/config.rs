use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "phrasewise",
    about = "Find note sequences and phrases in the melodic line of a MIDI file!"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Mode of the key: major|minor.
    #[arg(short, long, global = true, default_value = "minor")]
    pub mode: String,

    /// Index of the MIDI track holding the melody. Track 0 is usually tempo/meta only.
    #[arg(short, long, global = true, default_value_t = 1)]
    pub track: usize,

    /// Write a colored LilyPond score of the result to this path.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Print the resulting notes as JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the first occurrence of a sequence of notes, e.g. `find-sequence song.mid C C D E F`.
    FindSequence {
        /// Path to the target MIDI file.
        midi: PathBuf,

        /// Tonic of the key, e.g. `D` or `Bb`.
        key: String,

        /// Notes to search for, e.g. `C# D Eb`.
        #[arg(required = true)]
        notes: Vec<String>,
    },

    /// Find the notes between two sequences, e.g. `find-phrase song.mid Bb C D E -- G F E`.
    FindPhrase {
        /// Path to the target MIDI file.
        midi: PathBuf,

        /// Tonic of the key, e.g. `D` or `Bb`.
        key: String,

        /// Notes that open the phrase.
        #[arg(required = true)]
        start: Vec<String>,

        /// Notes that close the phrase, after `--`.
        #[arg(last = true, required = true)]
        end: Vec<String>,
    },
}
