use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// Semitones above C for the natural note.
    pub fn semitone_offset(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn symbol(self) -> char {
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
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub const ALL: [Accidental; 3] = [Accidental::Natural, Accidental::Sharp, Accidental::Flat];

    pub fn semitone_offset(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        }
    }
}

/// A letter name plus accidental. Equality is structural: `C#` and `Db` are different
/// spellings of the same pitch class.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Spelling {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    pub const fn sharp(letter: Letter) -> Self {
        Self::new(letter, Accidental::Sharp)
    }

    pub const fn flat(letter: Letter) -> Self {
        Self::new(letter, Accidental::Flat)
    }

    /// Pitch class (0..=11) this spelling sounds as, independent of any key.
    pub fn base_pitch_class(&self) -> u8 {
        (self.letter.semitone_offset() + self.accidental.semitone_offset()).rem_euclid(12) as u8
    }

    /// Whether a raw chromatic pitch sounds as this spelling, in any octave.
    pub fn is_enharmonic_with(&self, raw_pitch: u8) -> bool {
        self.base_pitch_class() == raw_pitch % 12
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.symbol())?;
        match self.accidental {
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
            Accidental::Natural => Ok(()),
        }
    }
}

impl FromStr for Spelling {
    type Err = AnalysisError;

    /// Accepts the seventeen note symbols a user would type for the chromatic scale,
    /// e.g. `C`, `C#`, `Db`, `Bb`. Spellings like `E#` or `Cb` are rejected.
    fn from_str(symbol: &str) -> Result<Self> {
        let invalid = || AnalysisError::InvalidSpelling(symbol.to_owned());

        let mut chars = symbol.chars();
        let letter = match chars.next().ok_or_else(invalid)? {
            'C' => Letter::C,
            'D' => Letter::D,
            'E' => Letter::E,
            'F' => Letter::F,
            'G' => Letter::G,
            'A' => Letter::A,
            'B' => Letter::B,
            _ => return Err(invalid()),
        };
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some('#') => Accidental::Sharp,
            Some('b') => Accidental::Flat,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        match (letter, accidental) {
            (Letter::E | Letter::B, Accidental::Sharp) | (Letter::C | Letter::F, Accidental::Flat) => {
                Err(invalid())
            }
            _ => Ok(Spelling::new(letter, accidental)),
        }
    }
}

/// A spelled pitch in scientific octave numbering (middle C is C4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub spelling: Spelling,
    pub octave: i32,
}

impl Pitch {
    pub fn new(spelling: Spelling, octave: i32) -> Self {
        Self { spelling, octave }
    }

    pub fn to_raw_pitch(&self) -> i32 {
        (self.octave + 1) * 12
            + self.spelling.letter.semitone_offset()
            + self.spelling.accidental.semitone_offset()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.spelling, self.octave)
    }
}
