//! # Settings
//!
//! How pitches and chords are rendered and how transposition without a key spells its
//! results. Settings are read from YAML:
//!
//! ```yaml
//! notation: ascii          # unicode | ascii | text
//! enharmonic-style: flat   # normal | flat | sharp
//! key: Es                  # display name of a key, optional
//! ```
//!
//! All fields are optional; missing fields keep their defaults (unicode, normal, no key).

use serde::Deserialize;
use tracing::debug;

use crate::chord::Chord;
use crate::error::MusicError;
use crate::key::{EnharmonicStyle, MusicalKey};
use crate::pitch::TonePitch;
use crate::symbols::Notation;
use crate::transpose::Transposable;

/// Settings as written in YAML, before validation.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawSettings {
    pub notation: Option<String>,
    pub enharmonic_style: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub notation: Notation,
    pub enharmonic_style: EnharmonicStyle,
    /// When set, transposition spells results as this key's chromatic scale does.
    pub key: Option<MusicalKey>,
}

impl Settings {
    /// Read settings from YAML.
    ///
    /// ```
    /// use tonal::{EnharmonicStyle, MusicalKey, Notation, Settings};
    ///
    /// let settings = Settings::from_yaml("notation: text\nkey: Es\n").unwrap();
    /// assert_eq!(settings.notation, Notation::Text);
    /// assert_eq!(settings.enharmonic_style, EnharmonicStyle::Normal);
    /// assert_eq!(settings.key, Some(MusicalKey::EsMajor));
    /// ```
    pub fn from_yaml(content: &str) -> Result<Settings, MusicError> {
        let raw: RawSettings = if content.trim().is_empty() {
            RawSettings::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| MusicError::SettingsError(e.to_string()))?
        };

        let notation = match &raw.notation {
            Some(notation) => notation.parse::<Notation>()?,
            None => Notation::default(),
        };

        let enharmonic_style = match &raw.enharmonic_style {
            Some(style) => style.parse::<EnharmonicStyle>()?,
            None => EnharmonicStyle::default(),
        };

        let key = match &raw.key {
            Some(name) => Some(MusicalKey::from_name(name.trim()).ok_or_else(|| {
                MusicError::SettingsError(format!("Invalid key: {}", name))
            })?),
            None => None,
        };

        let settings = Settings {
            notation,
            enharmonic_style,
            key,
        };
        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Render `pitch` in the configured notation.
    pub fn pitch_name(&self, pitch: TonePitch) -> &'static str {
        pitch.name(self.notation)
    }

    /// Transpose `chord` by `semitone_steps`, in the configured key if there is one.
    pub fn transpose_chord(&self, chord: &Chord, semitone_steps: i32) -> Chord {
        match self.key {
            Some(key) => chord.transpose_chromatic_in_key(semitone_steps, key),
            None => chord.transpose_chromatic(semitone_steps, self.enharmonic_style),
        }
    }
}
