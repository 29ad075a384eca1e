//! # Musical Keys
//!
//! The 30 keys of the circle of fifths, from 7 flats (C♭ major / a♭ minor) to 7 sharps
//! (C♯ major / a♯ minor), together with their scales.
//!
//! ## Scale Construction
//! Scales are derived from the tonika and the [`TonalSystem`] alone. Starting at the
//! tonika the builder walks 12 semitones upwards:
//! - every pitch is appended to the chromatic scale
//! - every second pitch is appended to the diatonic scale, except after the positions
//!   where the tonal system has a semitone gap (3 and 7 for major, 2 and 5 for minor),
//!   where the next pitch is appended as well
//! - each next pitch is spelled in the key's [`EnharmonicStyle`], unless a signature
//!   tone of the key has the same step, in which case the signature tone wins
//!
//! The result always has 7 diatonic and 12 chromatic pitches, one per step.
//!
//! ## Signature
//! The key at ordinal `o` has `7 - o / 2` flats when positive, else `o / 2 - 7` sharps.
//! Its signature tones are the first flat or sharp sign tones in circle-of-fifths order.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::MusicError;
use crate::interval::Solmization;
use crate::pitch::TonePitch;
use crate::transpose::Transposable;

/// Major or minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TonalSystem {
    #[default]
    Major,
    Minor,
}

impl TonalSystem {
    /// Diatonic scale sizes after which a semitone (instead of a whole tone) follows.
    pub fn semitone_positions(self) -> (usize, usize) {
        match self {
            TonalSystem::Major => (3, 7),
            TonalSystem::Minor => (2, 5),
        }
    }

    /// Short form used in chord and key notation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            TonalSystem::Major => "maj",
            TonalSystem::Minor => "min",
        }
    }
}

impl fmt::Display for TonalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TonalSystem::Major => write!(f, "major"),
            TonalSystem::Minor => write!(f, "minor"),
        }
    }
}

/// How to spell a pitch that has both a sharp and a flat name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnharmonicStyle {
    /// The normal spelling of C major (C♯ E♭ F♯ G♯ B♭).
    #[default]
    Normal,
    Flat,
    Sharp,
}

impl FromStr for EnharmonicStyle {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(EnharmonicStyle::Normal),
            "flat" => Ok(EnharmonicStyle::Flat),
            "sharp" => Ok(EnharmonicStyle::Sharp),
            other => Err(MusicError::SettingsError(format!(
                "enharmonic-style must be normal, flat or sharp, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for EnharmonicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnharmonicStyle::Normal => write!(f, "normal"),
            EnharmonicStyle::Flat => write!(f, "flat"),
            EnharmonicStyle::Sharp => write!(f, "sharp"),
        }
    }
}

/// A key of the circle of fifths. Relative major and minor keys are adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MusicalKey {
    CesMajor,
    AsMinor,
    GesMajor,
    EsMinor,
    DesMajor,
    BMinor,
    AsMajor,
    FMinor,
    EsMajor,
    CMinor,
    BMajor,
    GMinor,
    FMajor,
    DMinor,
    CMajor,
    AMinor,
    GMajor,
    EMinor,
    DMajor,
    HMinor,
    AMajor,
    FisMinor,
    EMajor,
    CisMinor,
    HMajor,
    GisMinor,
    FisMajor,
    DisMinor,
    CisMajor,
    AisMinor,
}

/// Scales derived once per key.
struct KeyScale {
    style: EnharmonicStyle,
    signature: Vec<TonePitch>,
    diatonic: Vec<TonePitch>,
    chromatic: Vec<TonePitch>,
}

static KEY_SCALES: Lazy<Vec<KeyScale>> = Lazy::new(|| {
    let scales: Vec<KeyScale> = MusicalKey::ALL.iter().map(|key| build_scale(*key)).collect();
    debug!(keys = scales.len(), "built musical key scales");
    scales
});

fn build_scale(key: MusicalKey) -> KeyScale {
    let sign_count = key.sign_count();
    let (style, signature): (EnharmonicStyle, Vec<TonePitch>) = if sign_count < 0 {
        let flats = sign_count.unsigned_abs() as usize;
        (EnharmonicStyle::Flat, TonePitch::flat_sign_tones()[..flats].to_vec())
    } else if sign_count > 0 {
        let sharps = sign_count as usize;
        (EnharmonicStyle::Sharp, TonePitch::sharp_sign_tones()[..sharps].to_vec())
    } else {
        (EnharmonicStyle::Normal, Vec::new())
    };

    let (first_semitone, second_semitone) = key.tonal_system().semitone_positions();
    let mut diatonic = Vec::with_capacity(7);
    let mut chromatic = Vec::with_capacity(12);
    let mut tone = key.tonika();
    let mut add_diatonic = true;
    for _ in 0..12 {
        if add_diatonic {
            diatonic.push(tone);
        }
        chromatic.push(tone);
        let next = tone.transpose_chromatic(1, style);
        tone = signature
            .iter()
            .copied()
            .find(|sign| sign.step() == next.step())
            .unwrap_or(next);
        let size = diatonic.len();
        if !add_diatonic || (size != first_semitone && size != second_semitone) {
            add_diatonic = !add_diatonic;
        }
    }

    KeyScale {
        style,
        signature,
        diatonic,
        chromatic,
    }
}

impl MusicalKey {
    pub const ALL: [MusicalKey; 30] = [
        MusicalKey::CesMajor,
        MusicalKey::AsMinor,
        MusicalKey::GesMajor,
        MusicalKey::EsMinor,
        MusicalKey::DesMajor,
        MusicalKey::BMinor,
        MusicalKey::AsMajor,
        MusicalKey::FMinor,
        MusicalKey::EsMajor,
        MusicalKey::CMinor,
        MusicalKey::BMajor,
        MusicalKey::GMinor,
        MusicalKey::FMajor,
        MusicalKey::DMinor,
        MusicalKey::CMajor,
        MusicalKey::AMinor,
        MusicalKey::GMajor,
        MusicalKey::EMinor,
        MusicalKey::DMajor,
        MusicalKey::HMinor,
        MusicalKey::AMajor,
        MusicalKey::FisMinor,
        MusicalKey::EMajor,
        MusicalKey::CisMinor,
        MusicalKey::HMajor,
        MusicalKey::GisMinor,
        MusicalKey::FisMajor,
        MusicalKey::DisMinor,
        MusicalKey::CisMajor,
        MusicalKey::AisMinor,
    ];

    fn scale(self) -> &'static KeyScale {
        &KEY_SCALES[self as usize]
    }

    pub fn tonika(self) -> TonePitch {
        match self {
            MusicalKey::CesMajor => TonePitch::Ces,
            MusicalKey::AsMinor | MusicalKey::AsMajor => TonePitch::As,
            MusicalKey::GesMajor => TonePitch::Ges,
            MusicalKey::EsMinor | MusicalKey::EsMajor => TonePitch::Es,
            MusicalKey::DesMajor => TonePitch::Des,
            MusicalKey::BMinor | MusicalKey::BMajor => TonePitch::BFlat,
            MusicalKey::FMinor | MusicalKey::FMajor => TonePitch::F,
            MusicalKey::CMinor | MusicalKey::CMajor => TonePitch::C,
            MusicalKey::GMinor | MusicalKey::GMajor => TonePitch::G,
            MusicalKey::DMinor | MusicalKey::DMajor => TonePitch::D,
            MusicalKey::AMinor | MusicalKey::AMajor => TonePitch::A,
            MusicalKey::EMinor | MusicalKey::EMajor => TonePitch::E,
            MusicalKey::HMinor | MusicalKey::HMajor => TonePitch::H,
            MusicalKey::FisMinor | MusicalKey::FisMajor => TonePitch::Fis,
            MusicalKey::CisMinor | MusicalKey::CisMajor => TonePitch::Cis,
            MusicalKey::GisMinor => TonePitch::Gis,
            MusicalKey::DisMinor => TonePitch::Dis,
            MusicalKey::AisMinor => TonePitch::Ais,
        }
    }

    pub fn tonal_system(self) -> TonalSystem {
        if (self as usize) % 2 == 0 {
            TonalSystem::Major
        } else {
            TonalSystem::Minor
        }
    }

    /// Display name; capitalized for major, lower case for minor.
    pub fn name(self) -> &'static str {
        match self {
            MusicalKey::CesMajor => "Ces",
            MusicalKey::AsMinor => "as",
            MusicalKey::GesMajor => "Ges",
            MusicalKey::EsMinor => "es",
            MusicalKey::DesMajor => "Des",
            MusicalKey::BMinor => "b\u{266D}",
            MusicalKey::AsMajor => "As",
            MusicalKey::FMinor => "f",
            MusicalKey::EsMajor => "Es",
            MusicalKey::CMinor => "c",
            MusicalKey::BMajor => "B\u{266D}",
            MusicalKey::GMinor => "g",
            MusicalKey::FMajor => "F",
            MusicalKey::DMinor => "d",
            MusicalKey::CMajor => "C",
            MusicalKey::AMinor => "a",
            MusicalKey::GMajor => "G",
            MusicalKey::EMinor => "e",
            MusicalKey::DMajor => "D",
            MusicalKey::HMinor => "b\u{266E}",
            MusicalKey::AMajor => "A",
            MusicalKey::FisMinor => "fis",
            MusicalKey::EMajor => "E",
            MusicalKey::CisMinor => "cis",
            MusicalKey::HMajor => "B\u{266E}",
            MusicalKey::GisMinor => "gis",
            MusicalKey::FisMajor => "Fis",
            MusicalKey::DisMinor => "dis",
            MusicalKey::CisMajor => "Cis",
            MusicalKey::AisMinor => "ais",
        }
    }

    /// Number of accidentals in the signature: negative for flats, positive for sharps.
    ///
    /// ```
    /// use tonal::MusicalKey;
    ///
    /// assert_eq!(MusicalKey::CesMajor.sign_count(), -7);
    /// assert_eq!(MusicalKey::AMinor.sign_count(), 0);
    /// assert_eq!(MusicalKey::EMajor.sign_count(), 4);
    /// ```
    pub fn sign_count(self) -> i32 {
        (self as i32) / 2 - 7
    }

    pub fn enharmonic_style(self) -> EnharmonicStyle {
        self.scale().style
    }

    /// The pitches carrying the key signature's accidentals, in circle-of-fifths order.
    pub fn signature_tones(self) -> &'static [TonePitch] {
        &self.scale().signature
    }

    /// The 7 pitches of the key, starting at the tonika.
    pub fn diatonic_scale(self) -> &'static [TonePitch] {
        &self.scale().diatonic
    }

    /// The 12 pitches of the key, one per step, starting at the tonika.
    pub fn chromatic_scale(self) -> &'static [TonePitch] {
        &self.scale().chromatic
    }

    /// The diatonic-scale pitch sung as `syllable` in this key.
    ///
    /// ```
    /// use tonal::{MusicalKey, Solmization, TonePitch};
    ///
    /// assert_eq!(MusicalKey::GMajor.tone(Solmization::Ti), TonePitch::Fis);
    /// assert_eq!(MusicalKey::AMinor.tone(Solmization::La), TonePitch::A);
    /// ```
    pub fn tone(self, syllable: Solmization) -> TonePitch {
        let degree = syllable.diatonic_steps(self.tonal_system()) as usize;
        self.diatonic_scale()[degree]
    }

    /// Locate `pitch` on the diatonic scale.
    ///
    /// Returns the highest degree whose pitch is at or below `pitch` (relative to the
    /// tonika) and the remaining semitone distance, which is 0 for scale pitches.
    pub fn degree_of(self, pitch: TonePitch) -> (usize, u8) {
        let tonika = self.tonika().step() as i32;
        let relative = |p: TonePitch| (p.step() as i32 - tonika).rem_euclid(12) as u8;
        let target = relative(pitch);
        self.diatonic_scale()
            .iter()
            .enumerate()
            .rev()
            .map(|(degree, &p)| (degree, relative(p)))
            .find(|&(_, step)| step <= target)
            .map(|(degree, step)| (degree, target - step))
            .unwrap_or((0, target))
    }

    /// The key with the same tonal system whose tonika is `semitone_steps` away.
    ///
    /// The new tonika is spelled in this key's enharmonic style. If no key is built on
    /// that spelling (e.g. G♯ major) the enharmonic key with the same step is used.
    ///
    /// ```
    /// use tonal::MusicalKey;
    ///
    /// assert_eq!(MusicalKey::CisMajor.transpose_chromatic(5), MusicalKey::FisMajor);
    /// assert_eq!(MusicalKey::CMajor.transpose_chromatic(8), MusicalKey::AsMajor);
    /// ```
    pub fn transpose_chromatic(self, semitone_steps: i32) -> MusicalKey {
        let system = self.tonal_system();
        let tonika = self
            .tonika()
            .transpose_chromatic(semitone_steps, self.enharmonic_style());
        let same_system = || {
            MusicalKey::ALL
                .into_iter()
                .filter(move |k| k.tonal_system() == system)
        };
        same_system()
            .find(|k| k.tonika() == tonika)
            .or_else(|| same_system().find(|k| k.tonika().step() == tonika.step()))
            .unwrap_or(self)
    }

    /// Look up a key by its exact display name (case distinguishes major from minor).
    pub fn from_name(name: &str) -> Option<MusicalKey> {
        MusicalKey::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl FromStr for MusicalKey {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MusicalKey::from_name(s.trim()).ok_or_else(|| MusicError::UnknownKey {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name(), self.tonal_system())
    }
}

impl Serialize for MusicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for MusicalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
