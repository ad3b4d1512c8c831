use crate::model::recording::*;
use anyhow::{Result, anyhow};
use log::{debug, warn};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use std::fs;
use std::path::Path;

/// Standard MIDI files usually keep tempo and meta events in track 0 and the music after it.
pub const DEFAULT_TRACK: usize = 1;

pub fn import_midi_file<P: AsRef<Path>>(path: P, track_index: usize) -> Result<Recording> {
    let bytes = fs::read(path.as_ref()).map_err(|e| {
        anyhow!(
            "Failed to read MIDI file {}: {}",
            path.as_ref().display(),
            e
        )
    })?;

    midi_bytes_to_recording(&bytes, path.as_ref(), track_index)
}

fn midi_bytes_to_recording(
    bytes: &[u8],
    source_path: &Path,
    track_index: usize,
) -> Result<Recording> {
    let smf = Smf::parse(bytes).map_err(|e| anyhow!("Failed to parse MIDI: {:?}", e))?;

    let resolution = match smf.header.timing {
        Timing::Metrical(t) => t.as_int() as u32,
        Timing::Timecode(_fps, _subframe) => {
            return Err(anyhow!(
                "SMPTE timecode midi timing is not currently supported..!"
            ));
        }
    };

    debug!("Ticks per quarter note: {}", resolution);
    debug!(
        "MIDI format: {:?}, tracks: {}",
        smf.header.format,
        smf.tracks.len()
    );

    let track = smf.tracks.get(track_index).ok_or_else(|| {
        anyhow!(
            "MIDI file has {} track(s), track {} does not exist..!",
            smf.tracks.len(),
            track_index
        )
    })?;

    let mut track_name: Option<String> = None;
    let mut events: Vec<PitchEvent> = Vec::new();
    let mut abs_tick: u64 = 0;

    for event in track.iter() {
        abs_tick = abs_tick.saturating_add(event.delta.as_int() as u64);

        match &event.kind {
            TrackEventKind::Meta(MetaMessage::TrackName(bytes)) => {
                if track_name.is_none() {
                    let name = String::from_utf8_lossy(bytes).into_owned();
                    debug!("Track name: {}", name);
                    track_name = Some(name);
                }
            }
            TrackEventKind::Midi { channel, message } => {
                let ch: u8 = channel.as_int();

                match message {
                    MidiMessage::NoteOn { key, vel } => {
                        events.push(PitchEvent::on(key.as_int(), abs_tick, vel.as_int(), ch));
                    }
                    MidiMessage::NoteOff { key, vel: _ } => {
                        events.push(PitchEvent::off(key.as_int(), abs_tick, ch));
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    if events.is_empty() {
        warn!(
            "Track {} contains no note events, is this the right track..?",
            track_index
        );
    }

    Ok(Recording {
        metadata: Metadata {
            title: source_path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string()),
            track_name,
        },
        resolution,
        events,
    })
}
