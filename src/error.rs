use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Fatal input conditions. A search that finds nothing is not one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A second pitch started while another was still sounding.
    #[error("Pitch {incoming} started at tick {tick} while pitch {sounding} was still sounding")]
    PolyphonyViolation { tick: u64, sounding: u8, incoming: u8 },

    /// A release at or before the tick its note started on.
    #[error("Pitch {pitch} does not end after it starts (released at tick {tick})")]
    ZeroDurationNote { pitch: u8, tick: u64 },

    #[error("Pitch class must be within 0..=11, got {0}")]
    InvalidPitchClass(u8),

    #[error("Unsupported resolution: {0} ticks per quarter note")]
    UnsupportedResolution(u32),

    #[error("Unsupported duration ticks: {0}")]
    UnsupportedDurationTicks(u64),

    #[error("Search pattern must contain at least one note")]
    EmptyPattern,

    #[error("Invalid note symbol: '{0}'")]
    InvalidSpelling(String),
}
