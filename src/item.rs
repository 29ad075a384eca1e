//! # Musical Items
//!
//! The entries of a voice: a tone or a rest, each lasting a musical value.
//! Transposing an item moves its tone; a rest is left as it is.
//!
//! ```
//! use tonal::{MusicalItem, MusicalKey, MusicalValue, Tone, TonePitch, Transposable};
//!
//! let rest = MusicalItem::Rest {
//!     value: MusicalValue::QUARTER,
//! };
//! assert!(rest.transpose_chromatic_in_key(3, MusicalKey::CMajor).is_rest());
//!
//! let tone = MusicalItem::Tone {
//!     value: MusicalValue::QUARTER,
//!     tone: Tone::new(TonePitch::A, 0),
//! };
//! let moved = tone.transpose_chromatic_in_key(3, MusicalKey::CMajor);
//! assert_eq!(moved.tone(), Some(Tone::new(TonePitch::C, 1)));
//! ```

use std::fmt;

use crate::key::{EnharmonicStyle, MusicalKey};
use crate::tone::Tone;
use crate::transpose::Transposable;
use crate::value::MusicalValue;

/// A single entry of a voice: either a tone or a rest, each with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicalItem {
    Tone { value: MusicalValue, tone: Tone },
    Rest { value: MusicalValue },
}

impl MusicalItem {
    pub fn value(&self) -> MusicalValue {
        match self {
            MusicalItem::Tone { value, .. } | MusicalItem::Rest { value } => *value,
        }
    }

    pub fn tone(&self) -> Option<Tone> {
        match self {
            MusicalItem::Tone { tone, .. } => Some(*tone),
            MusicalItem::Rest { .. } => None,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, MusicalItem::Rest { .. })
    }

    /// Apply `transpose` to the tone; rests are returned unchanged.
    fn map_tone(&self, transpose: impl FnOnce(&Tone) -> Tone) -> MusicalItem {
        match self {
            MusicalItem::Tone { value, tone } => MusicalItem::Tone {
                value: *value,
                tone: transpose(tone),
            },
            MusicalItem::Rest { .. } => *self,
        }
    }
}

impl Transposable for MusicalItem {
    fn transpose_chromatic(&self, semitone_steps: i32, style: EnharmonicStyle) -> MusicalItem {
        self.map_tone(|tone| tone.transpose_chromatic(semitone_steps, style))
    }

    fn transpose_chromatic_in_key(&self, semitone_steps: i32, key: MusicalKey) -> MusicalItem {
        self.map_tone(|tone| tone.transpose_chromatic_in_key(semitone_steps, key))
    }

    fn transpose_diatonic(&self, diatonic_steps: i32, key: MusicalKey) -> MusicalItem {
        self.map_tone(|tone| tone.transpose_diatonic(diatonic_steps, key))
    }
}

impl fmt::Display for MusicalItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicalItem::Tone { value, tone } => write!(f, "{}:{}", tone, value),
            MusicalItem::Rest { value } => write!(f, "rest:{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::TonePitch;

    #[test]
    fn test_transpose_tone_item() {
        let item = MusicalItem::Tone {
            value: MusicalValue::QUARTER,
            tone: Tone::new(TonePitch::H, 0),
        };
        let moved = item.transpose_chromatic(1, EnharmonicStyle::Normal);
        assert_eq!(moved.tone(), Some(Tone::new(TonePitch::C, 1)));
        assert_eq!(moved.value(), MusicalValue::QUARTER);
        assert_eq!(moved.to_string(), "C+1:1/4");
    }

    #[test]
    fn test_rest_is_unchanged() {
        let rest = MusicalItem::Rest {
            value: MusicalValue::WHOLE,
        };
        assert!(rest.is_rest());
        assert_eq!(rest.transpose_chromatic(5, EnharmonicStyle::Flat), rest);
        assert_eq!(rest.transpose_diatonic(3, MusicalKey::GMajor), rest);
        assert_eq!(rest.tone(), None);
        assert_eq!(rest.to_string(), "rest:1/1");
    }
}
