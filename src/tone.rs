//! # Tone
//!
//! A [`TonePitch`] in a specific octave.
//!
//! ## Octaves
//! Octave `0` is the octave from C up to B♮ that contains the pitch as written without
//! octave marks. Octaves always change at C, never at the tonika of a key: transposing
//! B♮ up a semitone yields C in the next octave.
//!
//! ## Text Form
//! The pitch in plain-text spelling followed by a signed octave unless it is `0`:
//! `C`, `Cis+1`, `H-1`, `Feses+2`.

use std::fmt;
use std::str::FromStr;

use crate::error::MusicError;
use crate::key::{EnharmonicStyle, MusicalKey};
use crate::pitch::TonePitch;
use crate::transpose::Transposable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    pub pitch: TonePitch,
    pub octave: i32,
}

impl Tone {
    pub fn new(pitch: TonePitch, octave: i32) -> Self {
        Self { pitch, octave }
    }

    /// Move to `pitch`, which is `steps` away in units of `per_octave` steps per octave.
    ///
    /// Whole octaves are carried by truncating division; the remainder crosses the C
    /// boundary when the step of the pitch moved against the direction of `steps`.
    fn carry_octave(&self, pitch: TonePitch, steps: i32, per_octave: i32) -> Tone {
        let pitch_steps = pitch.step() as i32 - self.pitch.step() as i32;
        let mut octave_steps = steps / per_octave;
        if steps < 0 && pitch_steps > 0 {
            octave_steps -= 1;
        } else if steps >= 0 && pitch_steps < 0 {
            octave_steps += 1;
        }
        Tone::new(pitch, self.octave + octave_steps)
    }
}

impl From<TonePitch> for Tone {
    fn from(pitch: TonePitch) -> Self {
        Tone::new(pitch, 0)
    }
}

impl Transposable for Tone {
    fn transpose_chromatic(&self, semitone_steps: i32, style: EnharmonicStyle) -> Tone {
        let pitch = self.pitch.transpose_chromatic(semitone_steps, style);
        self.carry_octave(pitch, semitone_steps, 12)
    }

    fn transpose_chromatic_in_key(&self, semitone_steps: i32, key: MusicalKey) -> Tone {
        let pitch = self.pitch.transpose_chromatic_in_key(semitone_steps, key);
        self.carry_octave(pitch, semitone_steps, 12)
    }

    fn transpose_diatonic(&self, diatonic_steps: i32, key: MusicalKey) -> Tone {
        let pitch = self.pitch.transpose_diatonic(diatonic_steps, key);
        self.carry_octave(pitch, diatonic_steps, 7)
    }
}

impl FromStr for Tone {
    type Err = MusicError;

    /// Parse the text form, e.g. `Cis+1` or `H-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (end, pitch) = TonePitch::from_prefix(text).ok_or_else(|| MusicError::InvalidTone {
            text: s.to_string(),
            message: "missing pitch name".to_string(),
        })?;
        let suffix = &text[end..];
        if suffix.is_empty() {
            return Ok(Tone::new(pitch, 0));
        }
        let octave = suffix.parse::<i32>().map_err(|_| MusicError::InvalidTone {
            text: s.to_string(),
            message: format!("invalid octave '{}'", suffix),
        })?;
        Ok(Tone::new(pitch, octave))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pitch)?;
        if self.octave > 0 {
            write!(f, "+{}", self.octave)?;
        } else if self.octave < 0 {
            write!(f, "{}", self.octave)?;
        }
        Ok(())
    }
}
