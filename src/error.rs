//! # Error Types
//!
//! This module defines the error type shared by every fallible operation of the crate.
//!
//! All failures are local to the call that produced them: a lookup that found nothing,
//! a chord symbol that could not be tokenized, or an interval that cannot be resolved.
//! No operation leaves a partially-built value behind.
//!
//! ## Error Kinds
//! - `UnknownPitchName` - a pitch name matched none of the catalog spellings
//! - `MalformedChordSymbol` - a chord symbol has no leading pitch or an unknown extension token
//! - `UnresolvableInterval` - an interval yields neither chromatic nor diatonic steps
//! - `UnknownKey` - a key display name matched none of the 30 keys
//! - `InvalidTone` / `InvalidValue` - malformed tone or note-value text
//! - `SettingsError` - YAML settings could not be read
//!
//! ## Usage
//! ```rust
//! use tonal::{parse_chord, MusicError};
//!
//! match parse_chord("Cxyz") {
//!     Ok(chord) => println!("{}", chord),
//!     Err(MusicError::MalformedChordSymbol { position, .. }) => {
//!         eprintln!("cannot read chord symbol after character {}", position);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MusicError {
    /// A pitch name that is neither a unicode, ASCII nor plain-text spelling.
    ///
    /// # Example
    /// ```
    /// # use tonal::MusicError;
    /// let err = MusicError::UnknownPitchName { name: "W".to_string() };
    /// assert_eq!(err.to_string(), "Unknown pitch name: 'W'");
    /// ```
    #[error("Unknown pitch name: '{name}'")]
    UnknownPitchName { name: String },

    /// A chord symbol that could not be parsed.
    ///
    /// `position` is the character index into the trimmed symbol where parsing stopped.
    ///
    /// # Example
    /// ```
    /// # use tonal::MusicError;
    /// let err = MusicError::MalformedChordSymbol {
    ///     symbol: "F/".to_string(),
    ///     position: 1,
    ///     message: "unknown chord extension '/'".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Malformed chord symbol 'F/' at position 1: unknown chord extension '/'"
    /// );
    /// ```
    #[error("Malformed chord symbol '{symbol}' at position {position}: {message}")]
    MalformedChordSymbol {
        symbol: String,
        position: usize,
        message: String,
    },

    /// An interval that reports neither chromatic nor diatonic steps for the requested system.
    #[error("Interval {interval} cannot be resolved without a tonal system")]
    UnresolvableInterval { interval: String },

    /// A key name that is not one of the display names of [`crate::MusicalKey`].
    #[error("Unknown musical key: '{name}'")]
    UnknownKey { name: String },

    /// Tone text such as `Cis+1` that could not be read.
    #[error("Invalid tone '{text}': {message}")]
    InvalidTone { text: String, message: String },

    /// Note-value text such as `1/4.` that could not be read.
    #[error("Invalid musical value: '{text}'")]
    InvalidValue { text: String },

    /// Invalid YAML settings.
    ///
    /// # Example
    /// ```
    /// # use tonal::MusicError;
    /// let err = MusicError::SettingsError("notation must be unicode, ascii or text".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: notation must be unicode, ascii or text");
    /// ```
    #[error("Invalid settings: {0}")]
    SettingsError(String),
}
