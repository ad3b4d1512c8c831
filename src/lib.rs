mod decoder;
mod error;
mod lilypond;
mod matcher;
mod midi_importer;
mod model;
mod util;

pub use decoder::*;
pub use error::*;
pub use lilypond::*;
pub use matcher::*;
pub use midi_importer::*;
pub use model::config::*;
pub use model::duration::*;
pub use model::key::*;
pub use model::recording::*;
pub use model::spelling::*;
pub use util::*;
