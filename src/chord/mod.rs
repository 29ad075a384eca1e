//! # Chords
//!
//! A chord symbol as written above a staff: a fundamental tone, a tonal system, an
//! optional slash bass and a list of extensions.
//!
//! ## Identity
//! Two chords are equal when fundamental, tonal system, base tone and extensions (in
//! order) are equal. The symbol text is presentation only, so `CMi`, `Cm`, `CmI` and `c`
//! are the same chord.
//!
//! ## Names
//! A parsed chord keeps the symbol it was read from. Chords built from parts or by
//! transposition are named canonically: the unicode pitch name, lower case plus `m` for
//! minor, the extension text and `/base` when the base differs from the fundamental.
//!
//! ```
//! use tonal::{Chord, ChordExtension, EnharmonicStyle, TonalSystem, TonePitch, Transposable};
//!
//! let chord: Chord = "Ebm7/Bb".parse().unwrap();
//! assert_eq!(chord.fundamental(), TonePitch::Es);
//! assert_eq!(chord.tonal_system(), Some(TonalSystem::Minor));
//! assert_eq!(chord.base(), TonePitch::BFlat);
//! assert_eq!(chord.extensions(), &[ChordExtension::Seven]);
//!
//! let up = chord.transpose_chromatic(2, EnharmonicStyle::Normal);
//! assert_eq!(up.name(), "fm7/C");
//! ```

mod extension;
mod parser;

pub use extension::ChordExtension;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::MusicError;
use crate::interval::{ChromaticInterval, Interval};
use crate::key::{EnharmonicStyle, MusicalKey, TonalSystem};
use crate::pitch::TonePitch;
use crate::symbols::Notation;
use crate::transpose::Transposable;
use parser::ChordParser;

#[derive(Debug, Clone)]
pub struct Chord {
    name: String,
    fundamental: TonePitch,
    tonal_system: Option<TonalSystem>,
    base: TonePitch,
    extensions: Vec<ChordExtension>,
    extensions_text: String,
}

impl Chord {
    /// A chord without extensions or slash bass.
    pub fn new(fundamental: TonePitch, tonal_system: Option<TonalSystem>) -> Self {
        Self::from_parts(
            fundamental,
            tonal_system,
            fundamental,
            Vec::new(),
            String::new(),
        )
    }

    /// Replace the slash bass.
    pub fn with_base(self, base: TonePitch) -> Self {
        Self::from_parts(
            self.fundamental,
            self.tonal_system,
            base,
            self.extensions,
            self.extensions_text,
        )
    }

    /// Replace the extensions; the extension text becomes their canonical names.
    pub fn with_extensions(self, extensions: Vec<ChordExtension>) -> Self {
        let extensions_text = extensions.iter().map(|e| e.name()).collect::<String>();
        Self::from_parts(
            self.fundamental,
            self.tonal_system,
            self.base,
            extensions,
            extensions_text,
        )
    }

    fn from_parts(
        fundamental: TonePitch,
        tonal_system: Option<TonalSystem>,
        base: TonePitch,
        extensions: Vec<ChordExtension>,
        extensions_text: String,
    ) -> Self {
        let mut chord = Self {
            name: String::new(),
            fundamental,
            tonal_system,
            base,
            extensions,
            extensions_text,
        };
        chord.name = chord.name_in(Notation::Unicode);
        chord
    }

    /// Parse a chord symbol such as `C`, `Ebm7`, `F#maj7/A` or `Cis4 add9 no5/A`.
    pub fn parse(symbol: &str) -> Result<Chord, MusicError> {
        let trimmed = symbol.trim();
        let parsed = ChordParser::new(trimmed).parse()?;
        Ok(Self {
            name: trimmed.to_string(),
            fundamental: parsed.fundamental,
            tonal_system: parsed.tonal_system,
            base: parsed.base,
            extensions: parsed.extensions,
            extensions_text: parsed.extensions_text,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fundamental(&self) -> TonePitch {
        self.fundamental
    }

    /// `None` when an extension replaces the third (e.g. `sus4`, `5`, `dim`).
    pub fn tonal_system(&self) -> Option<TonalSystem> {
        self.tonal_system
    }

    /// The slash bass, or the fundamental when there is none.
    pub fn base(&self) -> TonePitch {
        self.base
    }

    pub fn extensions(&self) -> &[ChordExtension] {
        &self.extensions
    }

    /// The extensions exactly as written, including separators.
    pub fn extensions_text(&self) -> &str {
        &self.extensions_text
    }

    /// Canonical name with pitches spelled in `notation`.
    ///
    /// ```
    /// use tonal::{Chord, Notation};
    ///
    /// let chord = Chord::parse("C#7/Bb").unwrap();
    /// assert_eq!(chord.name_in(Notation::Unicode), "C\u{266F}7/B\u{266D}");
    /// assert_eq!(chord.name_in(Notation::Ascii), "C#7/Bb");
    /// assert_eq!(chord.name_in(Notation::Text), "Cis7/B");
    /// ```
    pub fn name_in(&self, notation: Notation) -> String {
        let mut name = match self.tonal_system {
            Some(TonalSystem::Minor) => {
                format!("{}m", self.fundamental.name(notation).to_lowercase())
            }
            _ => self.fundamental.name(notation).to_string(),
        };
        name.push_str(&self.extensions_text);
        if self.base != self.fundamental {
            name.push('/');
            name.push_str(self.base.name(notation));
        }
        name
    }

    /// Intervals sounded above the fundamental, ascending and without duplicates.
    ///
    /// The third follows the tonal system, the perfect fifth is implied unless an
    /// extension removes it, and every extension adds its own intervals.
    ///
    /// ```
    /// use tonal::{Chord, ChromaticInterval::*};
    ///
    /// let chord = Chord::parse("Am7").unwrap();
    /// assert_eq!(chord.intervals(), vec![PerfectUnison, MinorThird, PerfectFifth, MinorSeventh]);
    /// ```
    pub fn intervals(&self) -> Vec<ChromaticInterval> {
        let mut intervals = BTreeSet::new();
        intervals.insert(ChromaticInterval::PerfectUnison);
        let removes_third = self.extensions.iter().any(|e| e.removes_third());
        let removes_fifth = self.extensions.iter().any(|e| e.removes_fifth());
        match self.tonal_system {
            Some(TonalSystem::Major) if !removes_third => {
                intervals.insert(ChromaticInterval::MajorThird);
            }
            Some(TonalSystem::Minor) if !removes_third => {
                intervals.insert(ChromaticInterval::MinorThird);
            }
            _ => {}
        }
        if !removes_fifth {
            intervals.insert(ChromaticInterval::PerfectFifth);
        }
        for extension in &self.extensions {
            intervals.extend(extension.intervals().iter().copied());
        }
        intervals.into_iter().collect()
    }

    /// Same chord on a new fundamental; the base keeps its chromatic distance.
    fn moved_to(&self, fundamental: TonePitch, key: MusicalKey) -> Chord {
        let distance = self.fundamental.interval_to(fundamental).chromatic_steps() as i32;
        let base = self.base.transpose_chromatic_in_key(distance, key);
        Self::from_parts(
            fundamental,
            self.tonal_system,
            base,
            self.extensions.clone(),
            self.extensions_text.clone(),
        )
    }
}

impl Transposable for Chord {
    fn transpose_chromatic(&self, semitone_steps: i32, style: EnharmonicStyle) -> Chord {
        Self::from_parts(
            self.fundamental.transpose_chromatic(semitone_steps, style),
            self.tonal_system,
            self.base.transpose_chromatic(semitone_steps, style),
            self.extensions.clone(),
            self.extensions_text.clone(),
        )
    }

    fn transpose_chromatic_in_key(&self, semitone_steps: i32, key: MusicalKey) -> Chord {
        Self::from_parts(
            self.fundamental
                .transpose_chromatic_in_key(semitone_steps, key),
            self.tonal_system,
            self.base.transpose_chromatic_in_key(semitone_steps, key),
            self.extensions.clone(),
            self.extensions_text.clone(),
        )
    }

    /// Move the fundamental by scale degrees; the base follows chromatically.
    fn transpose_diatonic(&self, diatonic_steps: i32, key: MusicalKey) -> Chord {
        let fundamental = self.fundamental.transpose_diatonic(diatonic_steps, key);
        self.moved_to(fundamental, key)
    }

    /// Move the fundamental by `interval`; the base follows chromatically.
    fn transpose(&self, interval: Interval, key: MusicalKey) -> Result<Chord, MusicError> {
        let fundamental = self.fundamental.transpose(interval, key)?;
        Ok(self.moved_to(fundamental, key))
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.fundamental == other.fundamental
            && self.tonal_system == other.tonal_system
            && self.base == other.base
            && self.extensions == other.extensions
    }
}

impl Eq for Chord {}

impl Hash for Chord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fundamental.hash(state);
        self.tonal_system.hash(state);
        self.base.hash(state);
        self.extensions.hash(state);
    }
}

impl FromStr for Chord {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::parse(s)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Chord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Chord::parse(&symbol).map_err(serde::de::Error::custom)
    }
}
