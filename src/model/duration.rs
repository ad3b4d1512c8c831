use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// The only resolution the quantizer understands.
pub const SUPPORTED_RESOLUTION: u32 = 480;

/// Named note values, each with a dotted variant (one and a half times as long).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duration {
    Whole,
    WholeDotted,
    Half,
    HalfDotted,
    Quarter,
    QuarterDotted,
    Eighth,
    EighthDotted,
    Sixteenth,
    SixteenthDotted,
    ThirtySecond,
    ThirtySecondDotted,
}

impl Duration {
    pub fn is_dotted(self) -> bool {
        matches!(
            self,
            Duration::WholeDotted
                | Duration::HalfDotted
                | Duration::QuarterDotted
                | Duration::EighthDotted
                | Duration::SixteenthDotted
                | Duration::ThirtySecondDotted
        )
    }

    pub fn dotted(self) -> Self {
        match self {
            Duration::Whole | Duration::WholeDotted => Duration::WholeDotted,
            Duration::Half | Duration::HalfDotted => Duration::HalfDotted,
            Duration::Quarter | Duration::QuarterDotted => Duration::QuarterDotted,
            Duration::Eighth | Duration::EighthDotted => Duration::EighthDotted,
            Duration::Sixteenth | Duration::SixteenthDotted => Duration::SixteenthDotted,
            Duration::ThirtySecond | Duration::ThirtySecondDotted => Duration::ThirtySecondDotted,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Duration::Whole => "WHOLE",
            Duration::WholeDotted => "WHOLE_DOTTED",
            Duration::Half => "HALF",
            Duration::HalfDotted => "HALF_DOTTED",
            Duration::Quarter => "QUARTER",
            Duration::QuarterDotted => "QUARTER_DOTTED",
            Duration::Eighth => "EIGHTH",
            Duration::EighthDotted => "EIGHTH_DOTTED",
            Duration::Sixteenth => "SIXTEENTH",
            Duration::SixteenthDotted => "SIXTEENTH_DOTTED",
            Duration::ThirtySecond => "THIRTY_SECOND",
            Duration::ThirtySecondDotted => "THIRTY_SECOND_DOTTED",
        }
    }
}

/// Map an exact tick count to a named duration.
///
/// This is a lookup, not a quantizer in the rounding sense: only resolution 480 is
/// supported and a tick count must hit a table entry exactly. There is no entry for an
/// undotted half note (960 ticks), and the dotted entries are the table's own labels.
pub fn duration_for(ticks: u64, resolution: u32) -> Result<Duration> {
    if resolution != SUPPORTED_RESOLUTION {
        return Err(AnalysisError::UnsupportedResolution(resolution));
    }

    let duration = match ticks {
        1920 => Duration::Whole,
        720 => Duration::HalfDotted,
        480 => Duration::Quarter,
        360 => Duration::QuarterDotted,
        240 => Duration::Eighth,
        180 => Duration::EighthDotted,
        120 => Duration::Sixteenth,
        90 => Duration::SixteenthDotted,
        60 => Duration::ThirtySecond,
        _ => return Err(AnalysisError::UnsupportedDurationTicks(ticks)),
    };

    Ok(duration)
}
