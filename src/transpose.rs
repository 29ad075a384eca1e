use crate::error::MusicError;
use crate::interval::{Interval, Steps};
use crate::key::{EnharmonicStyle, MusicalKey};

/// Values that can be moved up or down by semitones or scale degrees.
///
/// Implemented by [`crate::TonePitch`], [`crate::Tone`], [`crate::Chord`] and
/// [`crate::MusicalItem`]. Transposition never mutates; it returns a new value.
pub trait Transposable: Sized {
    /// Move by `semitone_steps`, spelling accidentals according to `style`.
    fn transpose_chromatic(&self, semitone_steps: i32, style: EnharmonicStyle) -> Self;

    /// Move by `semitone_steps`, spelling accidentals as the chromatic scale of `key` does.
    fn transpose_chromatic_in_key(&self, semitone_steps: i32, key: MusicalKey) -> Self;

    /// Move by `diatonic_steps` scale degrees of `key`.
    fn transpose_diatonic(&self, diatonic_steps: i32, key: MusicalKey) -> Self;

    /// Move by `interval`, resolved in the tonal system of `key`.
    ///
    /// Intervals with a semitone count move chromatically in `key`, all others move by
    /// scale degrees.
    fn transpose(&self, interval: Interval, key: MusicalKey) -> Result<Self, MusicError> {
        match interval.resolve(Some(key.tonal_system()))? {
            Steps::Chromatic(semitones) => Ok(self.transpose_chromatic_in_key(semitones, key)),
            Steps::Diatonic(degrees) => Ok(self.transpose_diatonic(degrees, key)),
        }
    }
}
