use crate::error::{AnalysisError, Result};
use crate::model::recording::{Note, PitchEvent};
use log::{debug, warn};

/// The pitch currently sounding, waiting for its release.
struct Sounding {
    raw_pitch: u8,
    start_tick: u64,
    velocity: u8,
    channel: u8,
}

/// Decode a time-ordered event stream into monophonic notes.
///
/// A second pitch starting while one is sounding is a [`AnalysisError::PolyphonyViolation`].
/// Releases for any pitch other than the sounding one are ignored, and a note still
/// sounding at the end of the stream is dropped. A release at or before the tick its note
/// started on is a [`AnalysisError::ZeroDurationNote`].
pub fn decode(events: &[PitchEvent]) -> Result<Vec<Note>> {
    let mut notes: Vec<Note> = Vec::new();
    let mut sounding: Option<Sounding> = None;

    for event in events {
        if !event.is_release() {
            if let Some(current) = &sounding {
                return Err(AnalysisError::PolyphonyViolation {
                    tick: event.tick,
                    sounding: current.raw_pitch,
                    incoming: event.raw_pitch,
                });
            }

            sounding = Some(Sounding {
                raw_pitch: event.raw_pitch,
                start_tick: event.tick,
                velocity: event.velocity,
                channel: event.channel,
            });
            continue;
        }

        match sounding.take() {
            Some(current) if current.raw_pitch == event.raw_pitch => {
                let duration_ticks = match event.tick.checked_sub(current.start_tick) {
                    Some(ticks) if ticks > 0 => ticks,
                    _ => {
                        return Err(AnalysisError::ZeroDurationNote {
                            pitch: current.raw_pitch,
                            tick: event.tick,
                        });
                    }
                };

                notes.push(Note {
                    raw_pitch: current.raw_pitch,
                    start_tick: current.start_tick,
                    duration_ticks,
                    velocity: current.velocity,
                    channel: current.channel,
                });
            }
            other => {
                debug!(
                    "Ignoring release of untracked pitch {} ch{} at tick {}..!",
                    event.raw_pitch, event.channel, event.tick
                );
                sounding = other;
            }
        }
    }

    if let Some(current) = sounding {
        warn!(
            "Dropping unterminated note {} ch{} started at tick {}..!",
            current.raw_pitch, current.channel, current.start_tick
        );
    }

    debug!("Decoded {} notes from {} events", notes.len(), events.len());
    Ok(notes)
}
