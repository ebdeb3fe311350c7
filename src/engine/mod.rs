//! The audio controller: mute/lifecycle state machine, sound-effect triggers,
//! and the looping melody sequencer.
//!
//! `ToneEngine` owns its three injected capabilities: a [`SynthBackend`] for
//! tone synthesis, a [`PrefStore`] for the one durable preference, and a
//! [`StepTimer`] for the sequencer's single pending deadline. Every public
//! operation is infallible: muted, uninitialized, and backend-unavailable
//! states all degrade to "nothing audible happens".

mod effects;

use std::time::Duration;

use crate::dsp::Waveform;
use crate::prefs::{PrefStore, MUSIC_ENABLED_KEY};
use crate::sequencing::Melody;
use crate::synthesis::{SynthBackend, ToneSpec};
use crate::timer::StepTimer;

/// Gain for background melody notes, soft enough to sit under the effects.
const MELODY_VOLUME: f32 = 0.03;

pub struct ToneEngine<B, P, T> {
    backend: B,
    prefs: P,
    timer: T,
    melody: Melody,
    muted: bool,
    playing: bool,
    note_index: usize,
    /// Backend has been activated at least once and is usable.
    context_ready: bool,
    /// Backend activation failed; the engine is permanently silent.
    disabled: bool,
}

impl<B: SynthBackend, P: PrefStore, T: StepTimer> ToneEngine<B, P, T> {
    /// Engine with the built-in canon melody.
    pub fn new(backend: B, prefs: P, timer: T) -> Self {
        Self::with_melody(backend, prefs, timer, Melody::canon())
    }

    pub fn with_melody(backend: B, prefs: P, timer: T, melody: Melody) -> Self {
        Self {
            backend,
            prefs,
            timer,
            melody,
            muted: false,
            playing: false,
            note_index: 0,
            context_ready: false,
            disabled: false,
        }
    }

    /// Ensure the synthesis context exists and is resumed. Idempotent.
    ///
    /// The first failure latches the engine into a permanently-disabled state
    /// rather than surfacing an error; every play operation then no-ops.
    pub fn init(&mut self) {
        if self.disabled {
            return;
        }
        match self.backend.activate() {
            Ok(()) => self.context_ready = true,
            Err(_) => {
                self.context_ready = false;
                self.disabled = true;
            }
        }
    }

    /// Initialize and start the melody iff the stored preference says so.
    ///
    /// Intended to run once the host has observed a first user interaction.
    pub fn try_auto_start(&mut self) {
        self.init();
        if self.prefs.get(MUSIC_ENABLED_KEY).as_deref() == Some("true") {
            self.start_music();
        }
    }

    /// Fire-and-forget tone with the default exponential fade.
    ///
    /// Silent no-op when the context is not ready or the engine is muted.
    pub fn play_tone(&mut self, frequency: f32, waveform: Waveform, duration: f32, volume: f32) {
        self.schedule(ToneSpec::new(frequency, waveform, duration, volume));
    }

    /// Common guard for every play path.
    fn schedule(&mut self, tone: ToneSpec) {
        if !self.context_ready || self.muted {
            return;
        }
        self.backend.schedule_tone(&tone);
    }

    /// Start the background melody. No-op if already playing, muted, or the
    /// backend is unavailable. Persists the preference as enabled.
    pub fn start_music(&mut self) {
        if self.playing || self.muted {
            return;
        }
        self.init();
        if self.disabled {
            return;
        }
        self.playing = true;
        self.prefs.set(MUSIC_ENABLED_KEY, "true");
        self.play_next_note();
    }

    /// Stop the melody, cancel the pending step, persist the preference as
    /// disabled. Idempotent.
    pub fn stop_music(&mut self) {
        self.playing = false;
        self.timer.cancel();
        self.prefs.set(MUSIC_ENABLED_KEY, "false");
    }

    /// Flip the mute flag and return the new state. Muting stops the melody;
    /// unmuting restarts it (subject to the start guard).
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.stop_music();
        } else {
            self.start_music();
        }
        self.muted
    }

    /// Host pump: run one sequencer step if the armed deadline has elapsed.
    ///
    /// A fire that arrives after `stop_music` finds `playing == false` and
    /// does nothing: no tone, no re-arm.
    pub fn poll(&mut self) {
        if self.timer.fired() {
            self.play_next_note();
        }
    }

    /// One sequencer step: play the current note, advance cyclically, arm the
    /// timer for exactly the played duration.
    fn play_next_note(&mut self) {
        if !self.playing {
            return;
        }

        let step = *self.melody.step(self.note_index);
        let duration = step.seconds();
        self.play_tone(step.note.frequency(), Waveform::Triangle, duration, MELODY_VOLUME);

        self.note_index = (self.note_index + 1) % self.melody.len();
        self.timer.arm(Duration::from_secs_f32(duration));
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Index of the next melody step to play. Always < melody length.
    pub fn current_note_index(&self) -> usize {
        self.note_index
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
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
    fn play_tone_before_init_is_dropped() {
        let mut e = engine();
        e.play_tone(440.0, Waveform::Sine, 0.1, 0.1);
        assert!(e.backend().scheduled().is_empty());
    }

    #[test]
    fn init_is_idempotent_but_always_resumes() {
        let mut e = engine();
        e.init();
        e.init();
        e.init();
        // Every init call reaches the backend (resume semantics)...
        assert_eq!(e.backend().activations(), 3);
        // ...and the engine stays usable.
        e.play_tone(440.0, Waveform::Sine, 0.1, 0.1);
        assert_eq!(e.backend().scheduled().len(), 1);
    }

    #[test]
    fn failed_activation_disables_the_engine_permanently() {
        let mut e = ToneEngine::new(
            RecordingBackend::unavailable(),
            MemoryStore::new(),
            ManualTimer::new(),
        );
        e.init();
        assert!(e.is_disabled());

        // Once disabled, init is never retried and nothing plays.
        e.play_click();
        e.start_music();
        assert!(!e.is_playing());
        assert!(e.backend().scheduled().is_empty());
        assert_eq!(e.backend().activations(), 1);
    }

    #[test]
    fn muted_engine_schedules_nothing() {
        let mut e = engine();
        e.init();
        e.toggle_mute();

        e.play_click();
        e.play_pop();
        e.play_yay();
        e.play_no();
        e.play_sad();
        e.start_music();

        assert!(e.backend().scheduled().is_empty());
    }

    #[test]
    fn start_music_plays_first_note_and_arms_timer() {
        let mut e = engine();
        e.start_music();

        assert!(e.is_playing());
        assert_eq!(e.current_note_index(), 1);
        assert_eq!(e.backend().scheduled().len(), 1);
        assert!(e.timer().is_pending());
        // Canon starts on E5, one beat = 0.5s
        let tone = e.backend().scheduled()[0];
        assert_eq!(tone.frequency, 659.25);
        assert_eq!(tone.waveform, Waveform::Triangle);
        assert_eq!(tone.duration, 0.5);
        assert_eq!(tone.volume, MELODY_VOLUME);
        assert_eq!(e.timer().armed(), &[Duration::from_millis(500)]);
    }

    #[test]
    fn start_music_is_guarded_against_double_start() {
        let mut e = engine();
        e.start_music();
        e.start_music();
        assert_eq!(e.backend().scheduled().len(), 1);
        assert_eq!(e.timer().armed().len(), 1);
    }

    #[test]
    fn note_index_wraps_over_the_melody_length() {
        let mut e = engine();
        let len = e.melody().len();
        e.start_music();
        for n in 1..(2 * len + 3) {
            assert_eq!(e.current_note_index(), n % len);
            e.timer_mut().force_fire();
            e.poll();
        }
    }

    #[test]
    fn toggle_mute_twice_resumes_music() {
        let mut e = engine();
        e.start_music();

        assert!(e.toggle_mute());
        assert!(!e.is_playing());

        assert!(!e.toggle_mute());
        assert!(e.is_playing());
        assert!(e.timer().is_pending());
    }

    #[test]
    fn poll_without_fired_timer_does_nothing() {
        let mut e = engine();
        e.start_music();
        e.backend_mut().clear();
        e.poll();
        assert!(e.backend().scheduled().is_empty());
    }

    #[test]
    fn try_auto_start_respects_stored_preference() {
        let mut e = engine();
        e.try_auto_start();
        assert!(!e.is_playing(), "no stored preference means no music");

        let mut prefs = MemoryStore::new();
        prefs.set(MUSIC_ENABLED_KEY, "true");
        let mut e = ToneEngine::new(RecordingBackend::new(), prefs, ManualTimer::new());
        e.try_auto_start();
        assert!(e.is_playing());
    }
}
