//! The sound-effect library: five named, parameterless triggers with fixed
//! synthesis parameters.

use std::time::Duration;

use super::ToneEngine;
use crate::dsp::{DecayCurve, Waveform};
use crate::prefs::PrefStore;
use crate::synthesis::{SynthBackend, ToneSpec};
use crate::timer::StepTimer;

/// Rising C-major arpeggio (C5 E5 G5 C6) for the success jingle.
const YAY_ARPEGGIO: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];

/// Gap between successive arpeggio tone starts.
const YAY_STAGGER: Duration = Duration::from_millis(100);

impl<B: SynthBackend, P: PrefStore, T: StepTimer> ToneEngine<B, P, T> {
    /// High-pitched ding for button presses.
    pub fn play_click(&mut self) {
        self.init();
        self.play_tone(800.0, Waveform::Sine, 0.1, 0.05);
    }

    /// Short pop.
    pub fn play_pop(&mut self) {
        self.init();
        self.play_tone(600.0, Waveform::Triangle, 0.05, 0.05);
    }

    /// Success: four staggered arpeggio tones, each an independent one-shot.
    pub fn play_yay(&mut self) {
        self.init();
        for (i, &frequency) in YAY_ARPEGGIO.iter().enumerate() {
            self.schedule(
                ToneSpec::new(frequency, Waveform::Sine, 0.3, 0.1)
                    .with_offset(YAY_STAGGER * i as u32),
            );
        }
    }

    /// Failure: a low sawtooth buzz.
    pub fn play_no(&mut self) {
        self.init();
        self.play_tone(150.0, Waveform::Sawtooth, 0.2, 0.05);
    }

    /// Sad trombone: one tone sliding 400→100 Hz with a linear fade to zero.
    ///
    /// The only effect that bypasses the default exponential envelope.
    pub fn play_sad(&mut self) {
        self.init();
        self.schedule(
            ToneSpec::new(400.0, Waveform::Sine, 1.0, 0.1)
                .with_sweep(100.0)
                .with_curve(DecayCurve::Linear),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use crate::synthesis::RecordingBackend;
    use crate::timer::ManualTimer;

    fn engine() -> ToneEngine<RecordingBackend, MemoryStore, ManualTimer> {
        ToneEngine::new(RecordingBackend::new(), MemoryStore::new(), ManualTimer::new())
    }

    #[test]
    fn click_is_a_short_sine_ding() {
        let mut e = engine();
        e.play_click();

        let tones = e.backend().scheduled();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].frequency, 800.0);
        assert_eq!(tones[0].waveform, Waveform::Sine);
        assert_eq!(tones[0].duration, 0.1);
        assert_eq!(tones[0].volume, 0.05);
        assert_eq!(tones[0].curve, DecayCurve::Exponential);
    }

    #[test]
    fn pop_is_a_triangle_blip() {
        let mut e = engine();
        e.play_pop();

        let tones = e.backend().scheduled();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].frequency, 600.0);
        assert_eq!(tones[0].waveform, Waveform::Triangle);
        assert_eq!(tones[0].duration, 0.05);
    }

    #[test]
    fn yay_schedules_four_staggered_ascending_tones() {
        let mut e = engine();
        e.play_yay();

        let tones = e.backend().scheduled();
        assert_eq!(tones.len(), 4);
        for (i, tone) in tones.iter().enumerate() {
            assert_eq!(tone.frequency, YAY_ARPEGGIO[i]);
            assert_eq!(tone.offset, Duration::from_millis(100 * i as u64));
            assert_eq!(tone.waveform, Waveform::Sine);
            assert_eq!(tone.duration, 0.3);
            assert_eq!(tone.volume, 0.1);
        }
    }

    #[test]
    fn no_is_a_low_sawtooth_buzz() {
        let mut e = engine();
        e.play_no();

        let tones = e.backend().scheduled();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].frequency, 150.0);
        assert_eq!(tones[0].waveform, Waveform::Sawtooth);
        assert_eq!(tones[0].duration, 0.2);
    }

    #[test]
    fn sad_is_a_linear_downward_sweep() {
        let mut e = engine();
        e.play_sad();

        let tones = e.backend().scheduled();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].frequency, 400.0);
        assert_eq!(tones[0].sweep_to, Some(100.0));
        assert_eq!(tones[0].duration, 1.0);
        assert_eq!(tones[0].volume, 0.1);
        assert_eq!(tones[0].curve, DecayCurve::Linear);
    }

    #[test]
    fn effects_self_initialize_the_context() {
        // No explicit init() call; the trigger does it.
        let mut e = engine();
        e.play_no();
        assert_eq!(e.backend().activations(), 1);
        assert_eq!(e.backend().scheduled().len(), 1);
    }
}
