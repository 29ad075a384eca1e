//! Accidental signs and the notations pitch names can be rendered in.

use std::fmt;
use std::str::FromStr;

use crate::error::MusicError;

/// ♭
pub const SINGLE_FLAT_SIGN: char = '\u{266D}';
/// ♮
pub const NEUTRAL_SIGN: char = '\u{266E}';
/// ♯
pub const SINGLE_SHARP_SIGN: char = '\u{266F}';
/// 𝄫
pub const DOUBLE_FLAT_SIGN: char = '\u{1D12B}';
/// 𝄪
pub const DOUBLE_SHARP_SIGN: char = '\u{1D12A}';

/// Which of the three spellings of a pitch to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notation {
    /// Musical signs: `C♯`, `E♭`, `B♮`, `F𝄫`
    #[default]
    Unicode,
    /// Plain ASCII signs: `C#`, `Eb`, `H`, `Fbb`
    Ascii,
    /// German plain text: `Cis`, `Es`, `H`, `Feses`
    Text,
}

impl FromStr for Notation {
    type Err = MusicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unicode" => Ok(Notation::Unicode),
            "ascii" => Ok(Notation::Ascii),
            "text" => Ok(Notation::Text),
            other => Err(MusicError::SettingsError(format!(
                "notation must be unicode, ascii or text, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Unicode => write!(f, "unicode"),
            Notation::Ascii => write!(f, "ascii"),
            Notation::Text => write!(f, "text"),
        }
    }
}
