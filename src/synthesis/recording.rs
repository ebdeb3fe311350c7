use super::{SynthBackend, SynthError, ToneSpec};

/// Test double that records every scheduling call instead of making sound.
///
/// Useful for asserting on exactly what the engine asked the platform to
/// play: frequencies, stagger offsets, envelope curves, and nothing at all
/// when muted.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    scheduled: Vec<ToneSpec>,
    activations: usize,
    fail_activation: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose activation always fails, for exercising the engine's
    /// permanently-disabled path.
    pub fn unavailable() -> Self {
        Self {
            fail_activation: true,
            ..Self::default()
        }
    }

    /// Every tone scheduled so far, in call order.
    pub fn scheduled(&self) -> &[ToneSpec] {
        &self.scheduled
    }

    /// How many times `activate` was called (successfully or not).
    pub fn activations(&self) -> usize {
        self.activations
    }

    pub fn clear(&mut self) {
        self.scheduled.clear();
    }
}

impl SynthBackend for RecordingBackend {
    fn activate(&mut self) -> Result<(), SynthError> {
        self.activations += 1;
        if self.fail_activation {
            Err(SynthError::NoOutputDevice)
        } else {
            Ok(())
        }
    }

    fn schedule_tone(&mut self, tone: &ToneSpec) {
        self.scheduled.push(*tone);
    }
}
