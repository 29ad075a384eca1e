//! # Musical Values
//!
//! Durations of tones and rests, and the beat (time signature) of a bar.
//!
//! ## Relative and Absolute Values
//! A value with fraction `1` (e.g. [`MusicalValue::WHOLE`]) lasts a full bar whatever the
//! beat is. All other values have a fixed length. [`MusicalValue::to_absolute`] turns a
//! relative value into the absolute value of a bar of the given [`Beat`].
//!
//! ## Variations
//! - **Punctured** (`.`): 3/2 of the value
//! - **Double punctured** (`..`): 7/4 of the value
//! - **Triplet** (`t`): 2/3 of the value
//!
//! ## Text Form
//! `beats/fraction` followed by the variation mark: `1/4`, `1/4.`, `1/8..`, `1/8t`.

use std::fmt;
use std::str::FromStr;

use crate::error::MusicError;

/// A ratio of beats per fraction.
pub trait Fraction {
    fn beats(&self) -> u32;

    fn fraction(&self) -> u32;

    fn as_f64(&self) -> f64 {
        self.beats() as f64 / self.fraction() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variation {
    #[default]
    None,
    Punctured,
    DoublePunctured,
    Triplet,
}

impl Variation {
    /// The mark appended to the text form of a value.
    pub fn mark(self) -> &'static str {
        match self {
            Variation::None => "",
            Variation::Punctured => ".",
            Variation::DoublePunctured => "..",
            Variation::Triplet => "t",
        }
    }
}

impl Fraction for Variation {
    fn beats(&self) -> u32 {
        match self {
            Variation::None => 1,
            Variation::Punctured => 3,
            Variation::DoublePunctured => 7,
            Variation::Triplet => 2,
        }
    }

    fn fraction(&self) -> u32 {
        match self {
            Variation::None => 1,
            Variation::Punctured => 2,
            Variation::DoublePunctured => 4,
            Variation::Triplet => 3,
        }
    }
}

/// Time signature, e.g. 4/4 or 6/8. The fraction is the unit of a regular beat, so
/// 4/4 and 2/2 are different beats even though they fill the same bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beat {
    pub beats: u32,
    pub fraction: u32,
}

impl Beat {
    pub const THREE_FOUR: Beat = Beat::new(3, 4);
    pub const FOUR_FOUR: Beat = Beat::new(4, 4);
    pub const TWO_TWO: Beat = Beat::new(2, 2);
    pub const SIX_EIGHT: Beat = Beat::new(6, 8);

    pub const fn new(beats: u32, fraction: u32) -> Self {
        Self { beats, fraction }
    }
}

impl Default for Beat {
    fn default() -> Self {
        Beat::FOUR_FOUR
    }
}

impl Fraction for Beat {
    fn beats(&self) -> u32 {
        self.beats
    }

    fn fraction(&self) -> u32 {
        self.fraction
    }
}

impl FromStr for Beat {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MusicError::InvalidValue {
            text: s.to_string(),
        };
        let (beats, fraction) = parse_ratio(s.trim()).ok_or_else(invalid)?;
        Ok(Beat::new(beats, fraction))
    }
}

impl fmt::Display for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.fraction)
    }
}

/// The duration of a tone or rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicalValue {
    pub beats: u32,
    pub fraction: u32,
    pub variation: Variation,
}

impl MusicalValue {
    /// A full bar, whatever the beat.
    pub const WHOLE: MusicalValue = MusicalValue::new(1, 1);
    /// Four quarters.
    pub const SEMIBREVE: MusicalValue = MusicalValue::new(4, 4);
    pub const MINIM: MusicalValue = MusicalValue::new(2, 4);
    pub const QUARTER: MusicalValue = MusicalValue::new(1, 4);
    pub const QUAVER: MusicalValue = MusicalValue::new(1, 8);
    pub const SEMIQUAVER: MusicalValue = MusicalValue::new(1, 16);
    pub const DEMISEMIQUAVER: MusicalValue = MusicalValue::new(1, 32);

    pub const fn new(beats: u32, fraction: u32) -> Self {
        Self {
            beats,
            fraction,
            variation: Variation::None,
        }
    }

    pub const fn with_variation(self, variation: Variation) -> Self {
        Self {
            beats: self.beats,
            fraction: self.fraction,
            variation,
        }
    }

    /// `true` if this value lasts a bar rather than a fixed length.
    pub fn is_relative(&self) -> bool {
        self.fraction == 1
    }

    pub fn is_normalized(&self) -> bool {
        self.variation == Variation::None
    }

    fn overflow(&self) -> MusicError {
        MusicError::InvalidValue {
            text: self.to_string(),
        }
    }

    /// The absolute value of this value in a bar of `beat`.
    ///
    /// Fails when the bar length does not fit a `u32`.
    ///
    /// ```
    /// use tonal::{Beat, MusicalValue};
    ///
    /// let bar = MusicalValue::WHOLE.to_absolute(Beat::THREE_FOUR)?;
    /// assert_eq!(bar, MusicalValue::new(3, 4));
    /// let quarter = MusicalValue::QUARTER.to_absolute(Beat::SIX_EIGHT)?;
    /// assert_eq!(quarter, MusicalValue::QUARTER);
    /// # Ok::<(), tonal::MusicError>(())
    /// ```
    pub fn to_absolute(&self, beat: Beat) -> Result<MusicalValue, MusicError> {
        if !self.is_relative() {
            return Ok(*self);
        }
        let beats = beat
            .beats
            .checked_mul(self.beats)
            .ok_or_else(|| self.overflow())?;
        Ok(MusicalValue::new(beats, beat.fraction).with_variation(self.variation))
    }

    /// The same duration without variation, e.g. `1/4.` becomes `3/8`.
    ///
    /// Fails when the normalized ratio does not fit a `u32`.
    pub fn to_normalized(&self) -> Result<MusicalValue, MusicError> {
        if self.is_normalized() {
            return Ok(*self);
        }
        let beats = self.variation.beats().checked_mul(self.beats);
        let fraction = self.variation.fraction().checked_mul(self.fraction);
        match (beats, fraction) {
            (Some(beats), Some(fraction)) => Ok(MusicalValue::new(beats, fraction)),
            _ => Err(self.overflow()),
        }
    }
}

impl Fraction for MusicalValue {
    fn beats(&self) -> u32 {
        self.beats
    }

    fn fraction(&self) -> u32 {
        self.fraction
    }

    /// Length including the variation.
    fn as_f64(&self) -> f64 {
        (self.beats as f64 * self.variation.beats() as f64)
            / (self.fraction as f64 * self.variation.fraction() as f64)
    }
}

impl FromStr for MusicalValue {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MusicError::InvalidValue {
            text: s.to_string(),
        };
        let text = s.trim();
        let (ratio, variation) = if let Some(ratio) = text.strip_suffix("..") {
            (ratio, Variation::DoublePunctured)
        } else if let Some(ratio) = text.strip_suffix('.') {
            (ratio, Variation::Punctured)
        } else if let Some(ratio) = text.strip_suffix('t') {
            (ratio, Variation::Triplet)
        } else {
            (text, Variation::None)
        };
        let (beats, fraction) = parse_ratio(ratio).ok_or_else(invalid)?;
        Ok(MusicalValue::new(beats, fraction).with_variation(variation))
    }
}

impl fmt::Display for MusicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.beats, self.fraction, self.variation.mark())
    }
}

/// Parse `beats/fraction` with both parts positive.
fn parse_ratio(text: &str) -> Option<(u32, u32)> {
    let (beats, fraction) = text.split_once('/')?;
    let beats = beats.trim().parse::<u32>().ok()?;
    let fraction = fraction.trim().parse::<u32>().ok()?;
    if beats == 0 || fraction == 0 {
        return None;
    }
    Some((beats, fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_values() {
        assert!(MusicalValue::WHOLE.is_relative());
        assert!(!MusicalValue::SEMIBREVE.is_relative());
        assert_eq!(
            MusicalValue::WHOLE.to_absolute(Beat::FOUR_FOUR).unwrap(),
            MusicalValue::SEMIBREVE
        );
        assert_eq!(
            MusicalValue::WHOLE.to_absolute(Beat::SIX_EIGHT).unwrap(),
            MusicalValue::new(6, 8)
        );
        assert_eq!(
            MusicalValue::MINIM.to_absolute(Beat::TWO_TWO).unwrap(),
            MusicalValue::MINIM
        );
    }

    #[test]
    fn test_normalized() {
        let dotted = MusicalValue::QUARTER.with_variation(Variation::Punctured);
        assert!(!dotted.is_normalized());
        assert_eq!(dotted.to_normalized().unwrap(), MusicalValue::new(3, 8));
        let triplet = MusicalValue::QUAVER.with_variation(Variation::Triplet);
        assert_eq!(triplet.to_normalized().unwrap(), MusicalValue::new(2, 24));
        assert_eq!(
            MusicalValue::QUARTER
                .with_variation(Variation::DoublePunctured)
                .to_normalized()
                .unwrap(),
            MusicalValue::new(7, 16)
        );
        assert_eq!(
            MusicalValue::QUARTER.to_normalized().unwrap(),
            MusicalValue::QUARTER
        );
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let dotted: MusicalValue = "4294967295/4.".parse().unwrap();
        assert_eq!(
            dotted.to_normalized(),
            Err(MusicError::InvalidValue {
                text: "4294967295/4.".to_string(),
            })
        );
        assert!((dotted.as_f64() - 4294967295.0 * 0.375).abs() < 1.0);

        let triplet: MusicalValue = "1/4294967295t".parse().unwrap();
        assert!(triplet.to_normalized().is_err());

        let relative: MusicalValue = "4294967295/1".parse().unwrap();
        assert!(matches!(
            relative.to_absolute(Beat::FOUR_FOUR),
            Err(MusicError::InvalidValue { .. })
        ));
        assert_eq!(
            relative.to_absolute(Beat::new(1, 4)).unwrap(),
            MusicalValue::new(4294967295, 4)
        );
    }

    #[test]
    fn test_as_f64() {
        assert!((MusicalValue::QUARTER.as_f64() - 0.25).abs() < 1e-9);
        let dotted = MusicalValue::QUARTER.with_variation(Variation::Punctured);
        assert!((dotted.as_f64() - 0.375).abs() < 1e-9);
        assert!((Variation::Triplet.as_f64() - 2.0 / 3.0).abs() < 1e-9);
        assert!((Beat::SIX_EIGHT.as_f64() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_text_form() {
        assert_eq!(MusicalValue::QUARTER.to_string(), "1/4");
        assert_eq!(
            MusicalValue::QUAVER
                .with_variation(Variation::DoublePunctured)
                .to_string(),
            "1/8.."
        );
        assert_eq!(
            "1/4".parse::<MusicalValue>().unwrap(),
            MusicalValue::QUARTER
        );
        assert_eq!(
            "1/4.".parse::<MusicalValue>().unwrap(),
            MusicalValue::QUARTER.with_variation(Variation::Punctured)
        );
        assert_eq!(
            "1/4..".parse::<MusicalValue>().unwrap(),
            MusicalValue::QUARTER.with_variation(Variation::DoublePunctured)
        );
        assert_eq!(
            " 1/8t ".parse::<MusicalValue>().unwrap(),
            MusicalValue::QUAVER.with_variation(Variation::Triplet)
        );
        for text in ["", "1", "1/0", "a/4", "1/4x", "0/4"] {
            assert!(
                matches!(text.parse::<MusicalValue>(), Err(MusicError::InvalidValue { .. })),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_beat() {
        assert_eq!(Beat::default(), Beat::FOUR_FOUR);
        assert_ne!(Beat::FOUR_FOUR, Beat::TWO_TWO);
        assert_eq!(Beat::SIX_EIGHT.to_string(), "6/8");
        assert_eq!("3/4".parse::<Beat>().unwrap(), Beat::THREE_FOUR);
        assert!("3-4".parse::<Beat>().is_err());
    }
}
