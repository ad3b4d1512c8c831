use crate::model::key::Mode;
use log::info;

pub fn parse_mode(s: &str) -> Mode {
    match s.to_lowercase().as_str() {
        "maj" | "major" | "ionian" => Mode::Major,
        "m" | "min" | "minor" | "aeolian" => Mode::Minor,
        other => {
            info!("Unknown mode '{}', defaulting to `minor`..!", other);
            Mode::Minor
        }
    }
}
