use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use phrasewise::{
    Args, Command, Key, MonophonicSequence, Note, Pattern, analyze, import_midi_file, parse_mode,
    render_score, write_score,
};
use serde_json::json;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mode = parse_mode(&args.mode);

    // Key and patterns are validated before the MIDI file is read.
    let (midi, key, start, end) = match &args.command {
        Command::FindSequence { midi, key, notes } => (
            midi,
            Key::from_symbol(key, mode)?,
            Pattern::from_symbols(notes)?,
            None,
        ),
        Command::FindPhrase {
            midi,
            key,
            start,
            end,
        } => (
            midi,
            Key::from_symbol(key, mode)?,
            Pattern::from_symbols(start)?,
            Some(Pattern::from_symbols(end)?),
        ),
    };

    let sequence = load(midi, args.track)?;
    let (notes, label) = match &end {
        None => (
            sequence
                .find_sequence(&start, 0)
                .map(|found| found.sequence)
                .unwrap_or_default(),
            "sequence",
        ),
        Some(end) => (sequence.find_phrase(&start, end), "phrase"),
    };

    if notes.is_empty() {
        println!("No matching {} found", label);
        return Ok(());
    }

    info!("Found {} of {} notes in {}..!", label, notes.len(), key);
    print_notes(&notes, &key, &sequence, args.json)?;

    if let Some(output) = &args.output {
        let score = render_score(&notes, &key, sequence.resolution())?;
        write_score(output, &score)?;
    }

    Ok(())
}

fn load(midi: &Path, track: usize) -> Result<MonophonicSequence> {
    info!("Importing MIDI file: '{}'...", midi.display());
    let recording = import_midi_file(midi, track)?;

    debug!(
        "Imported track '{}' of '{}' with {} events..!",
        recording
            .metadata
            .track_name
            .clone()
            .unwrap_or_else(|| "<unnamed>".into()),
        recording
            .metadata
            .title
            .clone()
            .unwrap_or_else(|| "<unknown>".into()),
        recording.events.len()
    );

    Ok(analyze(&recording)?)
}

fn print_notes(
    notes: &[Note],
    key: &Key,
    sequence: &MonophonicSequence,
    as_json: bool,
) -> Result<()> {
    if as_json {
        let spelled: Vec<_> = notes
            .iter()
            .map(|note| {
                json!({
                    "pitch": key.pitch_for(note.raw_pitch).to_string(),
                    "raw_pitch": note.raw_pitch,
                    "start_tick": note.start_tick,
                    "duration_ticks": note.duration_ticks,
                    "duration": sequence.duration_of(note).ok(),
                    "velocity": note.velocity,
                    "channel": note.channel,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&spelled)?);
        return Ok(());
    }

    for note in notes {
        let duration = match sequence.duration_of(note) {
            Ok(duration) => duration.name().to_owned(),
            Err(why) => {
                debug!("No duration name for note at {}: {}", note.start_tick, why);
                "-".to_owned()
            }
        };

        println!(
            "{:<5} tick={:<8} ticks={:<6} {:<16} vel={:<3} ch={}",
            key.pitch_for(note.raw_pitch).to_string(),
            note.start_tick,
            note.duration_ticks,
            duration,
            note.velocity,
            note.channel
        );
    }
    Ok(())
}
