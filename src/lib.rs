pub mod chord;
pub mod error;
pub mod interval;
pub mod item;
pub mod key;
pub mod pitch;
pub mod settings;
pub mod symbols;
pub mod tone;
pub mod transpose;
pub mod value;

pub use chord::{Chord, ChordExtension};
pub use error::*;
pub use interval::{ChromaticInterval, DiatonicInterval, Interval, Solmization, Steps};
pub use item::MusicalItem;
pub use key::{EnharmonicStyle, MusicalKey, TonalSystem};
pub use pitch::TonePitch;
pub use settings::Settings;
pub use symbols::Notation;
pub use tone::Tone;
pub use transpose::Transposable;
pub use value::{Beat, Fraction, MusicalValue, Variation};

/// Parse a chord symbol such as `Cmaj7`, `ebm7/Bb` or `a♭sus4add9/f𝄫`.
/// This is the main entry point for the library.
pub fn parse_chord(symbol: &str) -> Result<Chord, MusicError> {
    Chord::parse(symbol)
}

/// Transpose a chord symbol by `semitones` and render it as `settings` configure.
///
/// ```
/// use tonal::{transpose_symbol, Settings};
///
/// let settings = Settings::from_yaml("notation: ascii\nkey: Es").unwrap();
/// assert_eq!(transpose_symbol("Cm7/G", 1, &settings).unwrap(), "dbm7/Ab");
/// ```
pub fn transpose_symbol(
    symbol: &str,
    semitones: i32,
    settings: &Settings,
) -> Result<String, MusicError> {
    let chord = parse_chord(symbol)?;
    let transposed = settings.transpose_chord(&chord, semitones);
    Ok(transposed.name_in(settings.notation))
}
