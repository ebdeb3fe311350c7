use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator Waveforms
====================

The four waveforms cover the timbres the effect library needs:

Sine: the purest tone, a single frequency with no harmonics.
  - Used for the "click" ding, the "yay" arpeggio, and the sad slide.

Triangle: soft and mellow, odd harmonics falling off as 1/n².
  - Used for the "pop" and the background melody (unobtrusive at low volume).

Sawtooth: bright and buzzy, all harmonics.
  - Used for the "no" buzz, where harshness is the point.

Square: hollow and punchy, odd harmonics only.
  - Not used by the built-in effects, but part of the tone contract.

Phase is kept normalized to [0, 1) and advanced by frequency/sample_rate per
sample, so frequency may change between samples (the sad-trombone sweep
re-tunes the oscillator every sample without a phase discontinuity).
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// Phase-accumulator oscillator producing samples in [-1, 1].
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    /// Produce the next sample and advance the phase.
    ///
    /// The sample is computed from the phase *before* the advance, so the
    /// first call after `new`/`reset` returns the waveform at phase zero.
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}
