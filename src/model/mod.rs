pub mod config;
pub mod duration;
pub mod key;
pub mod recording;
pub mod spelling;
