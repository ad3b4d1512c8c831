use crate::decoder::decode;
use crate::error::{AnalysisError, Result};
use crate::model::duration::{Duration, duration_for};
use crate::model::recording::{Note, Recording};
use crate::model::spelling::Spelling;
use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// A non-empty, ordered list of spellings to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(Vec<Spelling>);

impl Pattern {
    pub fn new(spellings: Vec<Spelling>) -> Result<Self> {
        if spellings.is_empty() {
            return Err(AnalysisError::EmptyPattern);
        }
        Ok(Self(spellings))
    }

    /// Parse user-typed note symbols such as `["C", "D", "Eb"]`, failing on the first bad one.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self> {
        let spellings = symbols
            .iter()
            .map(|symbol| symbol.as_ref().parse())
            .collect::<Result<Vec<Spelling>>>()?;
        Self::new(spellings)
    }

    pub fn spellings(&self) -> &[Spelling] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches_at(&self, window: &[Note]) -> bool {
        window.len() == self.0.len()
            && window
                .iter()
                .zip(self.0.iter())
                .all(|(note, spelling)| note.is_enharmonic_with(spelling))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spelling) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", spelling)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteSequenceMatch {
    /// Contiguous notes, one per pattern element.
    pub sequence: Vec<Note>,
    pub start_tick: u64,
}

impl NoteSequenceMatch {
    pub fn last_note(&self) -> Option<&Note> {
        self.sequence.last()
    }
}

fn sorted(notes: &[Note]) -> Vec<Note> {
    let mut notes = notes.to_vec();
    // stable: equal start ticks keep their decode order
    notes.sort_by_key(|note| note.start_tick);
    notes
}

/// Leftmost exact match of `pattern` among notes starting at or after `search_from_tick`.
pub fn find_sequence(
    notes: &[Note],
    pattern: &Pattern,
    search_from_tick: u64,
) -> Option<NoteSequenceMatch> {
    let notes = sorted(notes);
    find_in_sorted(&notes, pattern, search_from_tick)
}

fn find_in_sorted(
    notes: &[Note],
    pattern: &Pattern,
    search_from_tick: u64,
) -> Option<NoteSequenceMatch> {
    let start_index = notes
        .iter()
        .position(|note| note.start_tick >= search_from_tick)?;

    let found = notes[start_index..]
        .windows(pattern.len())
        .find(|window| pattern.matches_at(window))?;

    let start_tick = found[0].start_tick;
    debug!("Matched [{}] at tick {}", pattern, start_tick);

    Some(NoteSequenceMatch {
        sequence: found.to_vec(),
        start_tick,
    })
}

/// Every note from the start of `start_pattern` up to the end of the first `end_pattern`
/// that begins strictly after it. Empty when either bound is missing.
pub fn find_phrase(notes: &[Note], start_pattern: &Pattern, end_pattern: &Pattern) -> Vec<Note> {
    let notes = sorted(notes);
    phrase_in_sorted(&notes, start_pattern, end_pattern)
}

fn phrase_in_sorted(notes: &[Note], start_pattern: &Pattern, end_pattern: &Pattern) -> Vec<Note> {
    let Some(start_match) = find_in_sorted(notes, start_pattern, 0) else {
        debug!("No start sequence [{}]", start_pattern);
        return Vec::new();
    };

    // nothing can start after the last representable tick
    let Some(search_from_tick) = start_match.start_tick.checked_add(1) else {
        return Vec::new();
    };

    let Some(end_match) = find_in_sorted(notes, end_pattern, search_from_tick) else {
        debug!(
            "No end sequence [{}] after tick {}",
            end_pattern, start_match.start_tick
        );
        return Vec::new();
    };

    let Some(phrase_end_tick) = end_match.last_note().map(Note::end_tick) else {
        return Vec::new();
    };

    notes
        .iter()
        .filter(|note| {
            note.start_tick >= start_match.start_tick && note.start_tick < phrase_end_tick
        })
        .cloned()
        .collect()
}

/// Decoded notes of one line, kept sorted by start tick.
#[derive(Debug, Clone)]
pub struct MonophonicSequence {
    notes: Vec<Note>,
    resolution: u32,
}

impl MonophonicSequence {
    pub fn new(notes: Vec<Note>, resolution: u32) -> Self {
        Self {
            notes: sorted(&notes),
            resolution,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn duration_of(&self, note: &Note) -> Result<Duration> {
        duration_for(note.duration_ticks, self.resolution)
    }

    pub fn find_sequence(
        &self,
        pattern: &Pattern,
        search_from_tick: u64,
    ) -> Option<NoteSequenceMatch> {
        find_in_sorted(&self.notes, pattern, search_from_tick)
    }

    pub fn find_phrase(&self, start_pattern: &Pattern, end_pattern: &Pattern) -> Vec<Note> {
        phrase_in_sorted(&self.notes, start_pattern, end_pattern)
    }
}

/// Decode a recording into a searchable sequence.
pub fn analyze(recording: &Recording) -> Result<MonophonicSequence> {
    let notes = decode(&recording.events)?;
    info!(
        "Decoded {} notes at {} ticks per quarter..!",
        notes.len(),
        recording.resolution
    );
    Ok(MonophonicSequence::new(notes, recording.resolution))
}
