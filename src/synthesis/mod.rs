//! The tone-scheduling seam between the engine and the platform's audio
//! pipeline.
//!
//! The engine only ever asks a [`SynthBackend`] to activate itself and to
//! schedule [`ToneSpec`]s; everything about devices, streams, and realtime
//! rendering lives behind the trait. Tests substitute a [`RecordingBackend`].

#[cfg(feature = "rtrb")]
pub mod device;
pub mod recording;

#[cfg(feature = "rtrb")]
pub use device::DeviceBackend;
pub use recording::RecordingBackend;

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{DecayCurve, Waveform};

/// Everything a backend needs to synthesize one tone: a fire-and-forget
/// oscillator + decay-envelope pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Delay before the tone starts sounding. Zero for everything except the
    /// staggered arpeggio.
    pub offset: Duration,
    pub waveform: Waveform,
    /// Starting frequency in Hz.
    pub frequency: f32,
    /// If set, the frequency glides linearly to this target over `duration`.
    pub sweep_to: Option<f32>,
    /// Tone length in seconds; the voice is cut when it elapses.
    pub duration: f32,
    /// Starting gain in (0, 1].
    pub volume: f32,
    pub curve: DecayCurve,
}

impl ToneSpec {
    /// A plain tone: immediate start, fixed pitch, exponential fade.
    pub fn new(frequency: f32, waveform: Waveform, duration: f32, volume: f32) -> Self {
        Self {
            offset: Duration::ZERO,
            waveform,
            frequency,
            sweep_to: None,
            duration,
            volume,
            curve: DecayCurve::Exponential,
        }
    }

    pub fn with_offset(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sweep(mut self, target: f32) -> Self {
        self.sweep_to = Some(target);
        self
    }

    pub fn with_curve(mut self, curve: DecayCurve) -> Self {
        self.curve = curve;
        self
    }
}

/// Capability interface for the platform's tone-synthesis facility.
pub trait SynthBackend {
    /// Create the audio pipeline on first call, resume it on every call.
    ///
    /// An error means the facility is unavailable (no device, stream refused);
    /// the engine treats that as permanent and goes silent.
    fn activate(&mut self) -> Result<(), SynthError>;

    /// Queue a tone for playback. Fire-and-forget: never blocks, never fails;
    /// a backend under pressure drops the tone instead.
    fn schedule_tone(&mut self, tone: &ToneSpec);
}

/// Errors surfaced by backend activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    /// The host has no default audio output device.
    NoOutputDevice,
    /// The output stream could not be built or started.
    Stream(String),
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::NoOutputDevice => write!(f, "no default audio output device available"),
            SynthError::Stream(msg) => write!(f, "audio output stream failed: {msg}"),
        }
    }
}

impl std::error::Error for SynthError {}
