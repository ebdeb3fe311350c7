//! Musical data for the melody sequencer: the note-name → frequency table and
//! the validated cyclic melody type.

pub mod melody;
pub mod notes;

pub use melody::{Melody, MelodyError, MelodyStep, SECONDS_PER_BEAT};
pub use notes::NoteName;
