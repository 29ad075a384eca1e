//! # Pitch Catalog
//!
//! The fixed set of enharmonically spelled pitch classes of the twelve tone system.
//!
//! ## Spellings
//! Every [`TonePitch`] has three spellings that are all accepted by the lookups:
//! - **unicode**: `C♯`, `E♭`, `B♮`, `F𝄫`
//! - **ascii**: `C#`, `Eb`, `H`, `Fbb`
//! - **text** (German): `Cis`, `Es`, `H`, `Feses`
//!
//! ### B and H
//! The text spelling follows the German convention: `B` is B♭ and `H` is B♮.
//! The unicode spelling is unambiguous (`B♭` / `B♮`), which is why it is used
//! for chord names.
//!
//! ## Normal Form
//! Each of the 12 steps has exactly one *normal* spelling (the one used in C major:
//! C C♯ D E♭ E F F♯ G G♯ A B♭ B♮). All other spellings are enharmonic aliases whose
//! [`TonePitch::normal`] points at the normal spelling of the same step.
//!
//! With at most double accidentals there are 35 spellings: step 8 (G♯/A♭) has no
//! double-accidental alias.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::MusicError;
use crate::interval::ChromaticInterval;
use crate::key::{EnharmonicStyle, MusicalKey};
use crate::symbols::{
    Notation, DOUBLE_FLAT_SIGN, DOUBLE_SHARP_SIGN, SINGLE_FLAT_SIGN, SINGLE_SHARP_SIGN,
};
use crate::transpose::Transposable;

/// A pitch class with a concrete enharmonic spelling.
///
/// Variants are declared grouped by step: the normal spelling first, then its aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TonePitch {
    C,
    His,
    Deses,
    Cis,
    Hisis,
    Des,
    D,
    Cisis,
    Eses,
    Es,
    Dis,
    Feses,
    E,
    Disis,
    Fes,
    F,
    Eis,
    Geses,
    Fis,
    Eisis,
    Ges,
    G,
    Fisis,
    Ases,
    Gis,
    As,
    A,
    Gisis,
    Heses,
    BFlat,
    Ais,
    Ceses,
    H,
    Aisis,
    Ces,
}

/// Static data of one catalog entry, indexed by the `TonePitch` discriminant.
struct Spelling {
    unicode: &'static str,
    ascii: &'static str,
    text: &'static str,
    step: u8,
    normal: TonePitch,
}

const fn spelling(
    unicode: &'static str,
    ascii: &'static str,
    text: &'static str,
    step: u8,
    normal: TonePitch,
) -> Spelling {
    Spelling {
        unicode,
        ascii,
        text,
        step,
        normal,
    }
}

static SPELLINGS: [Spelling; 35] = [
    spelling("C", "C", "C", 0, TonePitch::C),
    spelling("H\u{266F}", "H#", "His", 0, TonePitch::C),
    spelling("D\u{1D12B}", "Dbb", "Deses", 0, TonePitch::C),
    spelling("C\u{266F}", "C#", "Cis", 1, TonePitch::Cis),
    spelling("H\u{1D12A}", "H##", "Hisis", 1, TonePitch::Cis),
    spelling("D\u{266D}", "Db", "Des", 1, TonePitch::Cis),
    spelling("D", "D", "D", 2, TonePitch::D),
    spelling("C\u{1D12A}", "C##", "Cisis", 2, TonePitch::D),
    spelling("E\u{1D12B}", "Ebb", "Eses", 2, TonePitch::D),
    spelling("E\u{266D}", "Eb", "Es", 3, TonePitch::Es),
    spelling("D\u{266F}", "D#", "Dis", 3, TonePitch::Es),
    spelling("F\u{1D12B}", "Fbb", "Feses", 3, TonePitch::Es),
    spelling("E", "E", "E", 4, TonePitch::E),
    spelling("D\u{1D12A}", "D##", "Disis", 4, TonePitch::E),
    spelling("F\u{266D}", "Fb", "Fes", 4, TonePitch::E),
    spelling("F", "F", "F", 5, TonePitch::F),
    spelling("E\u{266F}", "E#", "Eis", 5, TonePitch::F),
    spelling("G\u{1D12B}", "Gbb", "Geses", 5, TonePitch::F),
    spelling("F\u{266F}", "F#", "Fis", 6, TonePitch::Fis),
    spelling("E\u{1D12A}", "E##", "Eisis", 6, TonePitch::Fis),
    spelling("G\u{266D}", "Gb", "Ges", 6, TonePitch::Fis),
    spelling("G", "G", "G", 7, TonePitch::G),
    spelling("F\u{1D12A}", "F##", "Fisis", 7, TonePitch::G),
    spelling("A\u{1D12B}", "Abb", "Ases", 7, TonePitch::G),
    spelling("G\u{266F}", "G#", "Gis", 8, TonePitch::Gis),
    spelling("A\u{266D}", "Ab", "As", 8, TonePitch::Gis),
    spelling("A", "A", "A", 9, TonePitch::A),
    spelling("G\u{1D12A}", "G##", "Gisis", 9, TonePitch::A),
    spelling("H\u{1D12B}", "Hbb", "Heses", 9, TonePitch::A),
    spelling("B\u{266D}", "Bb", "B", 10, TonePitch::BFlat),
    spelling("A\u{266F}", "A#", "Ais", 10, TonePitch::BFlat),
    spelling("C\u{1D12B}", "Cbb", "Ceses", 10, TonePitch::BFlat),
    spelling("B\u{266E}", "H", "H", 11, TonePitch::H),
    spelling("A\u{1D12A}", "A##", "Aisis", 11, TonePitch::H),
    spelling("C\u{266D}", "Cb", "Ces", 11, TonePitch::H),
];

const SHARP_SIGN_TONES: [TonePitch; 7] = [
    TonePitch::Fis,
    TonePitch::Cis,
    TonePitch::Gis,
    TonePitch::Dis,
    TonePitch::Ais,
    TonePitch::Eis,
    TonePitch::His,
];

const FLAT_SIGN_TONES: [TonePitch; 7] = [
    TonePitch::BFlat,
    TonePitch::Es,
    TonePitch::As,
    TonePitch::Des,
    TonePitch::Ges,
    TonePitch::Ces,
    TonePitch::Fes,
];

/// Lower-cased spelling -> pitch, for all three spellings of every pitch.
struct NameIndex {
    by_name: HashMap<String, TonePitch>,
    /// Longest spelling in characters; bounds the prefix search.
    max_chars: usize,
}

static NAME_INDEX: Lazy<NameIndex> = Lazy::new(|| {
    let mut by_name = HashMap::with_capacity(TonePitch::ALL.len() * 3);
    let mut max_chars = 0;
    for pitch in TonePitch::ALL {
        for name in [pitch.ascii(), pitch.unicode(), pitch.text()] {
            max_chars = max_chars.max(name.chars().count());
            by_name.insert(name.to_lowercase(), pitch);
        }
    }
    debug!(names = by_name.len(), max_chars, "built pitch name index");
    NameIndex { by_name, max_chars }
});

impl TonePitch {
    /// All pitches in catalog order.
    pub const ALL: [TonePitch; 35] = [
        TonePitch::C,
        TonePitch::His,
        TonePitch::Deses,
        TonePitch::Cis,
        TonePitch::Hisis,
        TonePitch::Des,
        TonePitch::D,
        TonePitch::Cisis,
        TonePitch::Eses,
        TonePitch::Es,
        TonePitch::Dis,
        TonePitch::Feses,
        TonePitch::E,
        TonePitch::Disis,
        TonePitch::Fes,
        TonePitch::F,
        TonePitch::Eis,
        TonePitch::Geses,
        TonePitch::Fis,
        TonePitch::Eisis,
        TonePitch::Ges,
        TonePitch::G,
        TonePitch::Fisis,
        TonePitch::Ases,
        TonePitch::Gis,
        TonePitch::As,
        TonePitch::A,
        TonePitch::Gisis,
        TonePitch::Heses,
        TonePitch::BFlat,
        TonePitch::Ais,
        TonePitch::Ceses,
        TonePitch::H,
        TonePitch::Aisis,
        TonePitch::Ces,
    ];

    fn spelling(self) -> &'static Spelling {
        &SPELLINGS[self as usize]
    }

    /// Number of semitones upwards from C (0-11).
    pub fn step(self) -> u8 {
        self.spelling().step
    }

    /// Spelling with musical signs, e.g. `B♮` or `E♭`.
    pub fn unicode(self) -> &'static str {
        self.spelling().unicode
    }

    /// Spelling with ASCII signs, e.g. `C#` or `Eb`.
    pub fn ascii(self) -> &'static str {
        self.spelling().ascii
    }

    /// German plain-text spelling, e.g. `Cis` or `Es`.
    pub fn text(self) -> &'static str {
        self.spelling().text
    }

    pub fn name(self, notation: Notation) -> &'static str {
        match notation {
            Notation::Unicode => self.unicode(),
            Notation::Ascii => self.ascii(),
            Notation::Text => self.text(),
        }
    }

    /// The normal spelling of this step (itself if already normal).
    pub fn normal(self) -> TonePitch {
        self.spelling().normal
    }

    pub fn is_normal(self) -> bool {
        self.normal() == self
    }

    /// `true` for a single (♯) or double (𝄪) sharp spelling.
    pub fn is_sharp(self) -> bool {
        self.unicode().ends_with(SINGLE_SHARP_SIGN) || self.unicode().ends_with(DOUBLE_SHARP_SIGN)
    }

    /// `true` for a single (♭) or double (𝄫) flat spelling.
    pub fn is_flat(self) -> bool {
        self.unicode().ends_with(SINGLE_FLAT_SIGN) || self.unicode().ends_with(DOUBLE_FLAT_SIGN)
    }

    /// Sharp key-signature tones in circle-of-fifths order (F♯ C♯ G♯ D♯ A♯ E♯ H♯).
    pub fn sharp_sign_tones() -> &'static [TonePitch] {
        &SHARP_SIGN_TONES
    }

    /// Flat key-signature tones in circle-of-fifths order (B♭ E♭ A♭ D♭ G♭ C♭ F♭).
    pub fn flat_sign_tones() -> &'static [TonePitch] {
        &FLAT_SIGN_TONES
    }

    /// Look up a pitch by any of its spellings, ignoring case.
    ///
    /// ```
    /// use tonal::TonePitch;
    ///
    /// assert_eq!(TonePitch::from_name("ciS"), Some(TonePitch::Cis));
    /// assert_eq!(TonePitch::from_name("b"), Some(TonePitch::BFlat));
    /// assert_eq!(TonePitch::from_name("h"), Some(TonePitch::H));
    /// assert_eq!(TonePitch::from_name("w"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<TonePitch> {
        NAME_INDEX.by_name.get(&name.to_lowercase()).copied()
    }

    /// Like [`TonePitch::from_name`] but reports a miss as [`MusicError::UnknownPitchName`].
    pub fn lookup(name: &str) -> Result<TonePitch, MusicError> {
        Self::from_name(name).ok_or_else(|| MusicError::UnknownPitchName {
            name: name.to_string(),
        })
    }

    /// Find the longest prefix of `text` that spells a pitch, ignoring case.
    ///
    /// Returns the prefix length in bytes together with the pitch. Longer prefixes win,
    /// so `"hesesisas"` yields `Heses` rather than `H`.
    ///
    /// ```
    /// use tonal::TonePitch;
    ///
    /// assert_eq!(TonePitch::from_prefix("c#9"), Some((2, TonePitch::Cis)));
    /// assert_eq!(TonePitch::from_prefix("Hub"), Some((1, TonePitch::H)));
    /// assert_eq!(TonePitch::from_prefix("xyz"), None);
    /// ```
    pub fn from_prefix(text: &str) -> Option<(usize, TonePitch)> {
        Self::prefixes(text).into_iter().next()
    }

    /// Every prefix of `text` that spells a pitch, longest first.
    ///
    /// `"Asus2"` yields `As` before `A`; callers fall back to the shorter reading when
    /// the rest of the text does not fit the longer one.
    ///
    /// ```
    /// use tonal::TonePitch;
    ///
    /// assert_eq!(
    ///     TonePitch::prefixes("Esus4"),
    ///     vec![(2, TonePitch::Es), (1, TonePitch::E)]
    /// );
    /// ```
    pub fn prefixes(text: &str) -> Vec<(usize, TonePitch)> {
        let index = &*NAME_INDEX;
        let ends: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(text.len()))
            .take(index.max_chars)
            .collect();
        ends.iter()
            .rev()
            .filter_map(|&end| {
                index
                    .by_name
                    .get(&text[..end].to_lowercase())
                    .map(|&pitch| (end, pitch))
            })
            .collect()
    }

    /// The lower-cased longest pitch prefix of `text`, e.g. `"ces"` for `"ceS4"`.
    pub fn tone_prefix(text: &str) -> Option<String> {
        Self::from_prefix(text).map(|(end, _)| text[..end].to_lowercase())
    }

    /// Upward chromatic interval (0-11 semitones) from this pitch to `target`.
    pub fn interval_to(self, target: TonePitch) -> ChromaticInterval {
        let semitones = (target.step() as i32 - self.step() as i32).rem_euclid(12);
        ChromaticInterval::ALL[semitones as usize]
    }

    /// The normal pitch for a step in 0..12.
    fn normal_at(step: u8) -> TonePitch {
        TonePitch::ALL
            .iter()
            .copied()
            .find(|p| p.step() == step && p.is_normal())
            .unwrap_or(TonePitch::C)
    }

    fn alias_at(step: u8, accept: fn(TonePitch) -> bool) -> Option<TonePitch> {
        TonePitch::ALL
            .iter()
            .copied()
            .find(|&p| p.step() == step && accept(p))
    }
}

impl Transposable for TonePitch {
    /// Transpose by semitones, spelling the result according to `style`.
    ///
    /// `Normal` always yields the normal spelling. `Flat` keeps the normal spelling unless
    /// it is sharp, in which case the first flat alias of that step is used; `Sharp` is
    /// the mirror image. Whole octaves wrap, so `transpose_chromatic(12, _)` normalizes.
    fn transpose_chromatic(&self, semitone_steps: i32, style: EnharmonicStyle) -> TonePitch {
        let target = (self.step() as i32 + semitone_steps).rem_euclid(12) as u8;
        let normal = TonePitch::normal_at(target);
        match style {
            EnharmonicStyle::Normal => normal,
            EnharmonicStyle::Flat if !normal.is_sharp() => normal,
            EnharmonicStyle::Sharp if !normal.is_flat() => normal,
            EnharmonicStyle::Flat => {
                TonePitch::alias_at(target, TonePitch::is_flat).unwrap_or(normal)
            }
            EnharmonicStyle::Sharp => {
                TonePitch::alias_at(target, TonePitch::is_sharp).unwrap_or(normal)
            }
        }
    }

    /// Transpose by semitones and take the spelling from the chromatic scale of `key`.
    fn transpose_chromatic_in_key(&self, semitone_steps: i32, key: MusicalKey) -> TonePitch {
        let index =
            (self.step() as i32 + semitone_steps - key.tonika().step() as i32).rem_euclid(12);
        key.chromatic_scale()[index as usize]
    }

    /// Move by scale degrees within the diatonic scale of `key`.
    ///
    /// The pitch is placed on the highest degree at or below it; a pitch outside the
    /// scale keeps its chromatic distance to that degree after the move.
    fn transpose_diatonic(&self, diatonic_steps: i32, key: MusicalKey) -> TonePitch {
        let (degree, offset) = key.degree_of(*self);
        let target = (degree as i32 + diatonic_steps).rem_euclid(7) as usize;
        let pitch = key.diatonic_scale()[target];
        if offset == 0 {
            pitch
        } else {
            pitch.transpose_chromatic_in_key(offset as i32, key)
        }
    }
}

impl FromStr for TonePitch {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TonePitch::lookup(s.trim())
    }
}

impl fmt::Display for TonePitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for TonePitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.unicode())
    }
}

impl<'de> Deserialize<'de> for TonePitch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        TonePitch::lookup(&name).map_err(serde::de::Error::custom)
    }
}
