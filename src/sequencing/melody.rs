use std::fmt;

use super::notes::NoteName;

/// Fixed beat scale for melody playback: one beat lasts half a second.
pub const SECONDS_PER_BEAT: f32 = 0.5;

/// One step of a melody: a note and how many beats it is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyStep {
    pub note: NoteName,
    pub beats: f32,
}

impl MelodyStep {
    /// Real-time duration of this step in seconds.
    pub fn seconds(&self) -> f32 {
        self.beats * SECONDS_PER_BEAT
    }
}

/// A non-empty, cyclic sequence of melody steps.
///
/// Validity (at least one step, every beat count positive) is checked at
/// construction, so the sequencer never has to guard against zero-delay
/// rescheduling at runtime.
#[derive(Debug, Clone)]
pub struct Melody {
    steps: Vec<MelodyStep>,
}

impl Melody {
    pub fn new(steps: Vec<MelodyStep>) -> Result<Self, MelodyError> {
        if steps.is_empty() {
            return Err(MelodyError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            if !(step.beats > 0.0) {
                return Err(MelodyError::NonPositiveBeats {
                    index,
                    beats: step.beats,
                });
            }
        }
        Ok(Self { steps })
    }

    /// The built-in background melody: two phrases of Pachelbel's Canon,
    /// simplified to C major, one beat per note.
    pub fn canon() -> Self {
        use NoteName::*;
        let notes = [
            E5, D5, C5, B4, A4, G4, A4, B4, // Phrase 1
            C5, B4, A4, G4, F4, E4, F4, G4, // Phrase 2
        ];
        // All one-beat steps over table notes, so the invariants hold.
        Self {
            steps: notes
                .into_iter()
                .map(|note| MelodyStep { note, beats: 1.0 })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, wrapping cyclically past the end.
    pub fn step(&self, index: usize) -> &MelodyStep {
        &self.steps[index % self.steps.len()]
    }

    pub fn steps(&self) -> &[MelodyStep] {
        &self.steps
    }
}

/// Errors that can occur when building a melody.
#[derive(Debug, Clone, PartialEq)]
pub enum MelodyError {
    /// A melody must have at least one step to loop over.
    Empty,
    /// A zero or negative beat count would re-arm the step timer with no
    /// delay, spinning the sequencer.
    NonPositiveBeats { index: usize, beats: f32 },
}

impl fmt::Display for MelodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MelodyError::Empty => write!(f, "melody has no steps"),
            MelodyError::NonPositiveBeats { index, beats } => {
                write!(f, "melody step {index} has non-positive beat count {beats}")
            }
        }
    }
}

impl std::error::Error for MelodyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canon_is_sixteen_one_beat_steps() {
        let melody = Melody::canon();
        assert_eq!(melody.len(), 16);
        assert!(melody.steps().iter().all(|s| s.beats == 1.0));
        assert_eq!(melody.step(0).note, NoteName::E5);
        assert_eq!(melody.step(15).note, NoteName::G4);
    }

    #[test]
    fn step_indexing_wraps() {
        let melody = Melody::canon();
        assert_eq!(melody.step(16).note, melody.step(0).note);
        assert_eq!(melody.step(33).note, melody.step(1).note);
    }

    #[test]
    fn one_beat_lasts_half_a_second() {
        let step = MelodyStep {
            note: NoteName::C4,
            beats: 1.0,
        };
        assert_eq!(step.seconds(), 0.5);

        let long = MelodyStep {
            note: NoteName::C4,
            beats: 2.0,
        };
        assert_eq!(long.seconds(), 1.0);
    }

    #[test]
    fn empty_melody_is_rejected() {
        assert_eq!(Melody::new(vec![]).unwrap_err(), MelodyError::Empty);
    }

    #[test]
    fn non_positive_beats_are_rejected() {
        let steps = vec![
            MelodyStep {
                note: NoteName::C4,
                beats: 1.0,
            },
            MelodyStep {
                note: NoteName::E4,
                beats: 0.0,
            },
        ];
        assert_eq!(
            Melody::new(steps).unwrap_err(),
            MelodyError::NonPositiveBeats {
                index: 1,
                beats: 0.0
            }
        );
    }
}
