use crate::model::spelling::Spelling;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    On,
    Off,
}

/// A single timed pitch-on/pitch-off message from one track.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchEvent {
    pub kind: EventKind,
    pub raw_pitch: u8,
    /// Absolute tick, relative to the start of the track.
    pub tick: u64,
    pub velocity: u8,
    pub channel: u8,
}

impl PitchEvent {
    pub fn on(raw_pitch: u8, tick: u64, velocity: u8, channel: u8) -> Self {
        Self {
            kind: EventKind::On,
            raw_pitch,
            tick,
            velocity,
            channel,
        }
    }

    pub fn off(raw_pitch: u8, tick: u64, channel: u8) -> Self {
        Self {
            kind: EventKind::Off,
            raw_pitch,
            tick,
            velocity: 0,
            channel,
        }
    }

    /// NoteOn with velocity 0 is the conventional way of writing a NoteOff.
    pub fn is_release(&self) -> bool {
        self.kind == EventKind::Off || self.velocity == 0
    }
}

/// A decoded note. Spelling is not stored here, it depends on the key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub raw_pitch: u8,
    pub start_tick: u64,
    pub duration_ticks: u64,
    pub velocity: u8,
    pub channel: u8,
}

impl Note {
    /// First tick after the note stops sounding, saturating at `u64::MAX`.
    pub fn end_tick(&self) -> u64 {
        self.start_tick.saturating_add(self.duration_ticks)
    }

    pub fn is_enharmonic_with(&self, spelling: &Spelling) -> bool {
        spelling.is_enharmonic_with(self.raw_pitch)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub track_name: Option<String>,
}

/// The pitch events of one track plus the timing needed to interpret them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Recording {
    pub metadata: Metadata,
    /// Ticks per quarter note.
    pub resolution: u32,
    pub events: Vec<PitchEvent>,
}
