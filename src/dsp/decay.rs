#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gain floor an exponential decay ramps down to.
///
/// An exponential approach to zero never arrives, so the ramp targets a
/// near-silent floor instead and the voice is cut when the duration elapses.
pub const EXP_FLOOR: f32 = 0.01;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayCurve {
    /// Fast perceptual fade; the default for the effect library.
    Exponential,
    /// Straight-line fade to true zero; used by the sad-trombone slide.
    Linear,
}

/// One-shot volume envelope: full level at the start of a tone, near-silence
/// at the end, no attack or sustain stage.
///
/// The level is a pure function of progress through the tone, so a voice can
/// evaluate it from its own sample counter without extra bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct Decay {
    start: f32,
    end: f32,
    curve: DecayCurve,
}

impl Decay {
    pub fn new(volume: f32, curve: DecayCurve) -> Self {
        let end = match curve {
            // Floor never exceeds the start level, or the "decay" would rise.
            DecayCurve::Exponential => EXP_FLOOR.min(volume),
            DecayCurve::Linear => 0.0,
        };
        Self {
            start: volume,
            end,
            curve,
        }
    }

    /// Gain at `progress` through the tone, where 0.0 is the start and 1.0 the
    /// end. Out-of-range progress clamps to the endpoints.
    pub fn level_at(&self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self.curve {
            DecayCurve::Linear => self.start + (self.end - self.start) * p,
            DecayCurve::Exponential => self.start * (self.end / self.start).powf(p),
        }
    }
}
