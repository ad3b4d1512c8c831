use crate::error::{AnalysisError, Result};
use crate::model::spelling::{Letter, Pitch, Spelling};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Which of the two fixed spelling tables a key uses for every pitch class.
///
/// This is a coarse "sharp-ish key vs flat-ish key" split, not a key-signature model: it
/// spells diatonic scale tones correctly but does not track chromatic alterations
/// within a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingTable {
    SharpPreferring,
    FlatPreferring,
}

const SHARP_SPELLINGS: [Spelling; 12] = [
    Spelling::natural(Letter::C),
    Spelling::sharp(Letter::C),
    Spelling::natural(Letter::D),
    Spelling::sharp(Letter::D),
    Spelling::natural(Letter::E),
    Spelling::natural(Letter::F),
    Spelling::sharp(Letter::F),
    Spelling::natural(Letter::G),
    Spelling::sharp(Letter::G),
    Spelling::natural(Letter::A),
    Spelling::sharp(Letter::A),
    Spelling::natural(Letter::B),
];

const FLAT_SPELLINGS: [Spelling; 12] = [
    Spelling::natural(Letter::C),
    Spelling::flat(Letter::D),
    Spelling::natural(Letter::D),
    Spelling::flat(Letter::E),
    Spelling::natural(Letter::E),
    Spelling::natural(Letter::F),
    Spelling::flat(Letter::G),
    Spelling::natural(Letter::G),
    Spelling::flat(Letter::A),
    Spelling::natural(Letter::A),
    Spelling::flat(Letter::B),
    Spelling::natural(Letter::B),
];

// Sharp side of the circle of fifths.
const SHARP_MAJOR_TONICS: [Spelling; 7] = [
    Spelling::natural(Letter::C),
    Spelling::natural(Letter::G),
    Spelling::natural(Letter::D),
    Spelling::natural(Letter::A),
    Spelling::natural(Letter::E),
    Spelling::natural(Letter::B),
    Spelling::sharp(Letter::F),
];

const SHARP_MINOR_TONICS: [Spelling; 6] = [
    Spelling::natural(Letter::A),
    Spelling::natural(Letter::E),
    Spelling::natural(Letter::B),
    Spelling::sharp(Letter::F),
    Spelling::sharp(Letter::C),
    Spelling::sharp(Letter::G),
];

impl SpellingTable {
    pub fn for_tonic(tonic: Spelling, mode: Mode) -> Self {
        let sharp_tonics: &[Spelling] = match mode {
            Mode::Major => &SHARP_MAJOR_TONICS,
            Mode::Minor => &SHARP_MINOR_TONICS,
        };

        if sharp_tonics.contains(&tonic) {
            SpellingTable::SharpPreferring
        } else {
            SpellingTable::FlatPreferring
        }
    }

    fn spellings(self) -> &'static [Spelling; 12] {
        match self {
            SpellingTable::SharpPreferring => &SHARP_SPELLINGS,
            SpellingTable::FlatPreferring => &FLAT_SPELLINGS,
        }
    }

    pub fn spelling_for(self, pitch_class: u8) -> Result<Spelling> {
        self.spellings()
            .get(pitch_class as usize)
            .copied()
            .ok_or(AnalysisError::InvalidPitchClass(pitch_class))
    }
}

/// A tonic and mode. The spelling table is chosen once, when the key is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    tonic: Spelling,
    mode: Mode,
    table: SpellingTable,
}

impl Key {
    pub fn new(tonic: Spelling, mode: Mode) -> Self {
        Self {
            tonic,
            mode,
            table: SpellingTable::for_tonic(tonic, mode),
        }
    }

    pub fn from_symbol(symbol: &str, mode: Mode) -> Result<Self> {
        Ok(Self::new(symbol.parse()?, mode))
    }

    pub fn tonic(&self) -> Spelling {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn table(&self) -> SpellingTable {
        self.table
    }

    pub fn spelling_for(&self, pitch_class: u8) -> Result<Spelling> {
        self.table.spelling_for(pitch_class)
    }

    /// Spell a raw chromatic pitch (0..=127) in this key.
    pub fn pitch_for(&self, raw_pitch: u8) -> Pitch {
        let spelling = self.table.spellings()[(raw_pitch % 12) as usize];
        let octave = raw_pitch as i32 / 12 - 1;

        Pitch::new(spelling, octave)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Major => "major",
            Mode::Minor => "minor",
        };
        write!(f, "{} {}", self.tonic, mode)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::spelling::Accidental;

    #[test]
    fn sharp_and_flat_keys() {
        for symbol in ["C", "G", "D", "A", "E", "B", "F#"] {
            let key = Key::from_symbol(symbol, Mode::Major).unwrap();
            assert_eq!(key.table(), SpellingTable::SharpPreferring, "{} major", symbol);
        }
        for symbol in ["F", "Bb", "Eb", "Ab", "Db", "Gb", "C#"] {
            let key = Key::from_symbol(symbol, Mode::Major).unwrap();
            assert_eq!(key.table(), SpellingTable::FlatPreferring, "{} major", symbol);
        }

        for symbol in ["A", "E", "B", "F#", "C#", "G#"] {
            let key = Key::from_symbol(symbol, Mode::Minor).unwrap();
            assert_eq!(key.table(), SpellingTable::SharpPreferring, "{} minor", symbol);
        }
        for symbol in ["D", "G", "C", "F", "Bb", "Eb"] {
            let key = Key::from_symbol(symbol, Mode::Minor).unwrap();
            assert_eq!(key.table(), SpellingTable::FlatPreferring, "{} minor", symbol);
        }
    }

    #[test]
    fn key_dependent_enharmonic_spelling() {
        let f_major = Key::new(Spelling::natural(Letter::F), Mode::Major);
        let b_major = Key::new(Spelling::natural(Letter::B), Mode::Major);

        assert_eq!(f_major.pitch_for(70).spelling, Spelling::flat(Letter::B));
        assert_eq!(b_major.pitch_for(70).spelling, Spelling::sharp(Letter::A));
        assert_eq!(f_major.pitch_for(70).octave, 4);

        for tonic in ["C", "F", "B", "Bb", "F#", "Eb"] {
            for mode in [Mode::Major, Mode::Minor] {
                let key = Key::from_symbol(tonic, mode).unwrap();
                assert_eq!(key.pitch_for(60), Pitch::new(Spelling::natural(Letter::C), 4));
            }
        }
    }

    #[test]
    fn invalid_pitch_class() {
        let key = Key::new(Spelling::natural(Letter::D), Mode::Minor);

        assert_eq!(key.spelling_for(11), Ok(Spelling::natural(Letter::B)));
        assert_eq!(key.spelling_for(12), Err(AnalysisError::InvalidPitchClass(12)));
        assert_eq!(key.spelling_for(255), Err(AnalysisError::InvalidPitchClass(255)));
    }

    #[test]
    fn invalid_tonic_symbol() {
        assert!(matches!(
            Key::from_symbol("H", Mode::Major),
            Err(AnalysisError::InvalidSpelling(_))
        ));
    }

    #[test]
    fn pitch_spelling_round_trip() {
        let keys = [
            Key::new(Spelling::natural(Letter::C), Mode::Major),
            Key::new(Spelling::flat(Letter::E), Mode::Major),
            Key::new(Spelling::sharp(Letter::G), Mode::Minor),
            Key::new(Spelling::natural(Letter::D), Mode::Minor),
        ];

        for key in keys {
            for letter in Letter::ALL {
                for accidental in Accidental::ALL {
                    let spelling = Spelling::new(letter, accidental);

                    for octave in -1..=9 {
                        let raw = Pitch::new(spelling, octave).to_raw_pitch();
                        let pitch_class = raw.rem_euclid(12) as u8;
                        let respelled = key.spelling_for(pitch_class).unwrap();

                        assert_eq!(respelled.base_pitch_class(), spelling.base_pitch_class());
                        assert_eq!(respelled.base_pitch_class(), pitch_class);
                        if let Ok(raw) = u8::try_from(raw) {
                            assert!(spelling.is_enharmonic_with(raw));
                            assert!(respelled.is_enharmonic_with(raw));
                        }
                    }
                }
            }
        }
    }
}
