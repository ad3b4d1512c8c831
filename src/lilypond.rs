//! LilyPond source for a list of notes, with each note head coloured by its chromatic scale
//! degree (https://www.musanim.com/HarmonicColoring/).

use crate::error::{AnalysisError, Result};
use crate::model::duration::SUPPORTED_RESOLUTION;
use crate::model::key::{Key, Mode};
use crate::model::recording::Note;
use crate::model::spelling::{Accidental, Spelling};
use anyhow::Context;
use log::info;
use std::fs;
use std::path::Path;

const LILYPOND_VERSION: &str = "2.20.0";
const MIDDLE_C: u8 = 60;

/// RGB per chromatic degree, index 0 is the tonic.
const DEGREE_COLORS: [[u8; 3]; 12] = [
    [0x00, 0x00, 0xFF], // I
    [0xCC, 0xCC, 0x00], // I#
    [0x66, 0x00, 0x99], // II
    [0x00, 0xCC, 0x99], // IIIb
    [0xFF, 0x00, 0x00], // III
    [0x00, 0x66, 0xFF], // IV
    [0xFF, 0xFF, 0x00], // IV#
    [0x66, 0x00, 0x99], // V
    [0x00, 0xAA, 0x00], // V#
    [0xCC, 0x00, 0x99], // VI
    [0x00, 0xFF, 0xFF], // VIIb
    [0xFF, 0x66, 0x00], // VII
];

fn spelling_name(spelling: Spelling) -> String {
    let base = spelling.letter.symbol().to_ascii_lowercase();
    let suffix = match spelling.accidental {
        Accidental::Sharp => "is",
        Accidental::Flat => "es",
        Accidental::Natural => "",
    };
    format!("{}{}", base, suffix)
}

fn octave_marks(octave: i32) -> String {
    if octave > 3 {
        "'".repeat((octave - 3) as usize)
    } else {
        ",".repeat((3 - octave) as usize)
    }
}

/// Absolute LilyPond pitch, e.g. `bes'` for raw pitch 70 in F major.
pub fn pitch_to_lilypond(raw_pitch: u8, key: &Key) -> String {
    let pitch = key.pitch_for(raw_pitch);
    spelling_name(pitch.spelling) + &octave_marks(pitch.octave)
}

/// Nearest undotted note value at or below `ticks`.
pub fn lilypond_duration(ticks: u64, resolution: u32) -> Result<&'static str> {
    if resolution != SUPPORTED_RESOLUTION {
        return Err(AnalysisError::UnsupportedResolution(resolution));
    }

    let value = match ticks {
        1920.. => "1",
        960.. => "2",
        480.. => "4",
        240.. => "8",
        120.. => "16",
        _ => "32",
    };
    Ok(value)
}

/// Degree 1..=12 by semitone distance from the tonic. The key's spelling table plays no
/// part here.
pub fn chromatic_degree(raw_pitch: u8, key: &Key) -> usize {
    let tonic = key.tonic().base_pitch_class() as usize;
    (raw_pitch as usize % 12 + 12 - tonic) % 12 + 1
}

fn rgb_values(degree: usize) -> String {
    let [r, g, b] = DEGREE_COLORS[(degree - 1) % 12];
    format!(
        "{:.2} {:.2} {:.2}",
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0
    )
}

pub fn render_score(notes: &[Note], key: &Key, resolution: u32) -> Result<String> {
    let mode = match key.mode() {
        Mode::Major => "\\major",
        Mode::Minor => "\\minor",
    };
    let clef = match notes.iter().map(|n| n.raw_pitch).min() {
        Some(lowest) if lowest < MIDDLE_C => "bass",
        _ => "treble",
    };

    let mut lily = String::new();
    lily.push_str(&format!("\\version \"{}\"\n\n", LILYPOND_VERSION));
    lily.push_str("\\score {\n");
    lily.push_str("  \\new Staff {\n");
    lily.push_str("    \\time 4/4\n");
    lily.push_str(&format!(
        "    \\key {} {}\n",
        spelling_name(key.tonic()),
        mode
    ));
    lily.push_str(&format!("    \\clef {}\n\n", clef));

    for note in notes {
        let degree = chromatic_degree(note.raw_pitch, key);
        lily.push_str(&format!(
            "    \\once \\override NoteHead.color = #(rgb-color {})\n",
            rgb_values(degree)
        ));
        lily.push_str(&format!(
            "    {}{}\n",
            pitch_to_lilypond(note.raw_pitch, key),
            lilypond_duration(note.duration_ticks, resolution)?
        ));
    }

    lily.push_str("  }\n");
    lily.push_str("  \\layout { }\n");
    lily.push_str("  \\midi { }\n");
    lily.push_str("}\n");

    Ok(lily)
}

pub fn write_score<P: AsRef<Path>>(path: P, source: &str) -> anyhow::Result<()> {
    fs::write(path.as_ref(), source)
        .with_context(|| format!("Failed to write score to {}", path.as_ref().display()))?;
    info!("Wrote LilyPond score to {}..!", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::spelling::Letter;

    const MIDI_C4: u8 = 60;
    const MIDI_AS4: u8 = 70;
    const MIDI_B4: u8 = 71;

    fn major(spelling: Spelling) -> Key {
        Key::new(spelling, Mode::Major)
    }

    #[test]
    fn enharmonic_spelling_in_different_keys() {
        let cases = [
            ("F major", MIDI_AS4, major(Spelling::natural(Letter::F)), "bes'"),
            ("B major", MIDI_AS4, major(Spelling::natural(Letter::B)), "ais'"),
            ("C major", MIDI_AS4, major(Spelling::natural(Letter::C)), "ais'"),
            ("Bb major", MIDI_AS4, major(Spelling::flat(Letter::B)), "bes'"),
            ("F# major", MIDI_AS4, major(Spelling::sharp(Letter::F)), "ais'"),
            ("C major", MIDI_C4, major(Spelling::natural(Letter::C)), "c'"),
            ("F major", MIDI_C4, major(Spelling::natural(Letter::F)), "c'"),
            ("B major", MIDI_C4, major(Spelling::natural(Letter::B)), "c'"),
            ("F major", MIDI_B4, major(Spelling::natural(Letter::F)), "b'"),
            ("Bb major", MIDI_B4, major(Spelling::flat(Letter::B)), "b'"),
        ];

        for (name, raw_pitch, key, expected) in cases {
            assert_eq!(
                pitch_to_lilypond(raw_pitch, &key),
                expected,
                "Incorrect spelling for MIDI pitch {} in key of {}",
                raw_pitch,
                name
            );
        }
    }

    #[test]
    fn octave_notation() {
        let key = major(Spelling::natural(Letter::C));
        assert_eq!(pitch_to_lilypond(24, &key), "c,,");
        assert_eq!(pitch_to_lilypond(36, &key), "c,");
        assert_eq!(pitch_to_lilypond(48, &key), "c");
        assert_eq!(pitch_to_lilypond(60, &key), "c'");
        assert_eq!(pitch_to_lilypond(72, &key), "c''");
    }

    #[test]
    fn duration_thresholds() {
        assert_eq!(lilypond_duration(1920, 480), Ok("1"));
        assert_eq!(lilypond_duration(1440, 480), Ok("2"));
        assert_eq!(lilypond_duration(960, 480), Ok("2"));
        assert_eq!(lilypond_duration(480, 480), Ok("4"));
        assert_eq!(lilypond_duration(479, 480), Ok("8"));
        assert_eq!(lilypond_duration(120, 480), Ok("16"));
        assert_eq!(lilypond_duration(10, 480), Ok("32"));
        assert_eq!(
            lilypond_duration(480, 96),
            Err(AnalysisError::UnsupportedResolution(96))
        );
    }

    #[test]
    fn degree_is_distance_from_tonic() {
        let d_minor = Key::new(Spelling::natural(Letter::D), Mode::Minor);
        assert_eq!(chromatic_degree(62, &d_minor), 1);
        assert_eq!(chromatic_degree(74, &d_minor), 1);
        assert_eq!(chromatic_degree(61, &d_minor), 12);
        assert_eq!(chromatic_degree(69, &d_minor), 8);
        assert_eq!(rgb_values(1), "0.00 0.00 1.00");
    }

    #[test]
    fn render_colored_score() {
        let key = Key::new(Spelling::natural(Letter::D), Mode::Minor);
        let notes = [
            Note {
                raw_pitch: 50,
                start_tick: 0,
                duration_ticks: 480,
                velocity: 80,
                channel: 0,
            },
            Note {
                raw_pitch: 58,
                start_tick: 480,
                duration_ticks: 240,
                velocity: 80,
                channel: 0,
            },
        ];

        let score = render_score(&notes, &key, 480).unwrap();
        assert!(score.starts_with("\\version \"2.20.0\""));
        assert!(score.contains("\\key d \\minor"));
        assert!(score.contains("\\clef bass"));
        assert!(score.contains("    d4\n"));
        assert!(score.contains("    bes8\n"));
        assert!(score.contains("#(rgb-color 0.00 0.00 1.00)"));
        assert_eq!(score.matches("NoteHead.color").count(), 2);
        assert!(score.trim_end().ends_with('}'));

        assert!(render_score(&notes, &key, 960).is_err());
    }

    #[test]
    fn treble_clef_for_high_lines() {
        let key = Key::new(Spelling::flat(Letter::E), Mode::Major);
        let notes = [Note {
            raw_pitch: 63,
            start_tick: 0,
            duration_ticks: 1920,
            velocity: 80,
            channel: 0,
        }];

        let score = render_score(&notes, &key, 480).unwrap();
        assert!(score.contains("\\key ees \\major"));
        assert!(score.contains("\\clef treble"));
        assert!(score.contains("    ees'1\n"));
    }
}
