pub mod dsp;
pub mod engine; // Mute/lifecycle state machine, effects, melody sequencer
pub mod prefs;
pub mod sequencing; // Note table and melody data
pub mod synthesis; // Tone scheduling seam and backends
pub mod timer;
