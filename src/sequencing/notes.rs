/*
Note Name Table
===============

The melody sequencer works over a fixed two-octave diatonic range, C4–B5
(middle C up to the B nearly two octaves above). Frequencies are standard
12-TET at A4 = 440 Hz, quoted to two decimals.

Making the note names an enum (rather than a string-keyed map) means "every
note the melody references exists in the table" holds by construction: there
is no unresolvable note to look up.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteName {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
    A5,
    B5,
}

impl NoteName {
    /// Frequency in Hz (12-TET, A4 = 440).
    pub const fn frequency(self) -> f32 {
        match self {
            NoteName::C4 => 261.63,
            NoteName::D4 => 293.66,
            NoteName::E4 => 329.63,
            NoteName::F4 => 349.23,
            NoteName::G4 => 392.00,
            NoteName::A4 => 440.00,
            NoteName::B4 => 493.88,
            NoteName::C5 => 523.25,
            NoteName::D5 => 587.33,
            NoteName::E5 => 659.25,
            NoteName::F5 => 698.46,
            NoteName::G5 => 783.99,
            NoteName::A5 => 880.00,
            NoteName::B5 => 987.77,
        }
    }

    /// Display name, e.g. `"E5"`.
    pub const fn name(self) -> &'static str {
        match self {
            NoteName::C4 => "C4",
            NoteName::D4 => "D4",
            NoteName::E4 => "E4",
            NoteName::F4 => "F4",
            NoteName::G4 => "G4",
            NoteName::A4 => "A4",
            NoteName::B4 => "B4",
            NoteName::C5 => "C5",
            NoteName::D5 => "D5",
            NoteName::E5 => "E5",
            NoteName::F5 => "F5",
            NoteName::G5 => "G5",
            NoteName::A5 => "A5",
            NoteName::B5 => "B5",
        }
    }
}
