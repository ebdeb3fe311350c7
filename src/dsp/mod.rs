//! Low-level DSP primitives used by the synthesis backends.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside audio-callback voices. They intentionally stay focused
//! on the signal-processing math so the backends can layer on scheduling and
//! mixing.

/// One-shot volume decay envelopes (exponential and linear).
pub mod decay;
/// Oscillator waveforms.
pub mod oscillator;

pub use decay::DecayCurve;
pub use oscillator::Waveform;
