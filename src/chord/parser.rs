//! Chord symbol parser.
//!
//! Reads symbols such as `C`, `cis`, `Ebm7`, `F#maj7/A`, `a♭sus4add9/f𝄫` or
//! `Cis4 add9 no5/A`. A symbol is made of:
//!
//! 1. **Fundamental** - the longest pitch name at the start that lets the rest parse.
//!    Upper case means major, lower case minor.
//! 2. **Minor marker** - an optional `m`/`M` (also `mi`), unless it starts `maj`. Spaces
//!    between the fundamental and the marker are skipped.
//! 3. **Extensions** - known extension tokens, optionally separated by `-`, `_` or
//!    spaces. An extension replacing the third leaves the chord without tonal system.
//! 4. **Slash bass** - an optional `/` followed by a pitch name. If the text after the
//!    last `/` is not a pitch name it belongs to the extensions (e.g. `C6/9`).

use tracing::{debug, trace};

use super::extension::ChordExtension;
use crate::error::MusicError;
use crate::key::TonalSystem;
use crate::pitch::TonePitch;

/// Characters allowed between extension tokens.
const FILLERS: [char; 3] = ['-', ' ', '_'];

/// The parts of a chord symbol.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedChord {
    pub fundamental: TonePitch,
    pub tonal_system: Option<TonalSystem>,
    pub base: TonePitch,
    pub extensions: Vec<ChordExtension>,
    pub extensions_text: String,
}

/// Cursor over a trimmed chord symbol.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChordParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> ChordParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn error(&self, byte_position: usize, message: String) -> MusicError {
        MusicError::MalformedChordSymbol {
            symbol: self.input.to_string(),
            position: self.input[..byte_position].chars().count(),
            message,
        }
    }

    /// Parse the symbol, trying the longest pitch name first.
    ///
    /// A shorter pitch name is tried when the rest does not parse, so `Esus4` is `E`
    /// with `sus4` rather than `Es` followed by `us4`. If no reading works the error
    /// of the longest one is returned.
    pub fn parse(self) -> Result<ParsedChord, MusicError> {
        let mut first_error = None;
        for (length, fundamental) in TonePitch::prefixes(self.input) {
            match self.parse_after(length, fundamental) {
                Ok(parsed) => return Ok(parsed),
                Err(error) => {
                    trace!(?fundamental, %error, "fundamental rejected");
                    first_error.get_or_insert(error);
                }
            }
        }
        let error =
            first_error.unwrap_or_else(|| self.error(0, "expected a pitch name".to_string()));
        debug!(symbol = self.input, %error, "chord symbol rejected");
        Err(error)
    }

    /// Parse everything after a fundamental spelled by the first `length` bytes.
    fn parse_after(
        mut self,
        length: usize,
        fundamental: TonePitch,
    ) -> Result<ParsedChord, MusicError> {
        let mut tonal_system = match self.peek() {
            Some(c) if c.is_uppercase() => TonalSystem::Major,
            _ => TonalSystem::Minor,
        };
        self.position = length;
        self.skip_spaces();
        trace!(?fundamental, ?tonal_system, "fundamental");

        if self.consume_minor_marker() {
            tonal_system = TonalSystem::Minor;
            trace!(position = self.position, "minor marker");
        }

        let (base, extensions_end) = self.split_base(fundamental);
        let extensions_text = &self.input[self.position..extensions_end];

        let mut tonal_system = Some(tonal_system);
        let mut extensions = Vec::new();
        while self.position < extensions_end {
            let rest = &self.input[self.position..extensions_end];
            let token = rest.trim_start_matches(&FILLERS[..]);
            self.position += rest.len() - token.len();
            if token.is_empty() {
                break;
            }
            let (length, extension) = ChordExtension::from_prefix(token).ok_or_else(|| {
                self.error(self.position, format!("unknown chord extension '{}'", token))
            })?;
            trace!(?extension, position = self.position, "extension");
            if extension.removes_third() {
                tonal_system = None;
            }
            extensions.push(extension);
            self.position += length;
        }

        Ok(ParsedChord {
            fundamental,
            tonal_system,
            base,
            extensions,
            extensions_text: extensions_text.to_string(),
        })
    }

    /// Consume `m`, `M`, `mi` or `MI` unless it is the start of `maj`.
    fn consume_minor_marker(&mut self) -> bool {
        if !matches!(self.peek(), Some('m' | 'M')) {
            return false;
        }
        if self.remaining().to_lowercase().starts_with("maj") {
            return false;
        }
        self.advance();
        if matches!(self.peek(), Some('i' | 'I')) {
            self.advance();
        }
        true
    }

    /// Find the slash bass after the last `/`.
    ///
    /// Returns the base tone (the fundamental if there is none) and the byte offset where
    /// the extensions end.
    fn split_base(&self, fundamental: TonePitch) -> (TonePitch, usize) {
        let rest = self.remaining();
        if let Some(slash) = rest.rfind('/') {
            let base_text = &rest[slash + 1..];
            if let Some(base) = TonePitch::from_name(base_text.trim()) {
                trace!(?base, "slash bass");
                return (base, self.position + slash);
            }
        }
        (fundamental, self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(symbol: &str) -> Result<ParsedChord, MusicError> {
        ChordParser::new(symbol).parse()
    }

    #[test]
    fn test_parse_plain_triads() {
        let c = parse("C").unwrap();
        assert_eq!(c.fundamental, TonePitch::C);
        assert_eq!(c.tonal_system, Some(TonalSystem::Major));
        assert_eq!(c.base, TonePitch::C);
        assert!(c.extensions.is_empty());
        assert_eq!(c.extensions_text, "");

        let c = parse("c").unwrap();
        assert_eq!(c.tonal_system, Some(TonalSystem::Minor));

        let cis = parse("cis").unwrap();
        assert_eq!(cis.fundamental, TonePitch::Cis);
        assert_eq!(cis.tonal_system, Some(TonalSystem::Minor));
    }

    #[test]
    fn test_parse_minor_markers() {
        for symbol in ["Cm", "CM", "Cmi", "CMi", "CmI", "CMI"] {
            let chord = parse(symbol).unwrap();
            assert_eq!(chord.tonal_system, Some(TonalSystem::Minor), "{}", symbol);
            assert!(chord.extensions.is_empty(), "{}", symbol);
        }
        let maj7 = parse("Cmaj7").unwrap();
        assert_eq!(maj7.tonal_system, Some(TonalSystem::Major));
        assert_eq!(maj7.extensions, vec![ChordExtension::Maj7]);

        let minor_add = parse("dmadd9").unwrap();
        assert_eq!(minor_add.tonal_system, Some(TonalSystem::Minor));
        assert_eq!(minor_add.extensions, vec![ChordExtension::Add9]);
    }

    #[test]
    fn test_parse_slash_bass() {
        let chord = parse("C#maj7/E").unwrap();
        assert_eq!(chord.fundamental, TonePitch::Cis);
        assert_eq!(chord.base, TonePitch::E);
        assert_eq!(chord.extensions, vec![ChordExtension::Maj7]);
        assert_eq!(chord.extensions_text, "maj7");

        let chord = parse("a\u{266D}sus4add9/f\u{1D12B}").unwrap();
        assert_eq!(chord.fundamental, TonePitch::As);
        assert_eq!(chord.tonal_system, None);
        assert_eq!(chord.base, TonePitch::Feses);
        assert_eq!(
            chord.extensions,
            vec![ChordExtension::Sus4, ChordExtension::Add9]
        );
        assert_eq!(chord.extensions_text, "sus4add9");
    }

    #[test]
    fn test_parse_slash_without_pitch_is_extension() {
        let chord = parse("C6/9").unwrap();
        assert_eq!(chord.base, TonePitch::C);
        assert_eq!(chord.extensions, vec![ChordExtension::SixNine]);
        assert_eq!(chord.extensions_text, "6/9");

        let chord = parse("C6/9/E").unwrap();
        assert_eq!(chord.base, TonePitch::E);
        assert_eq!(chord.extensions, vec![ChordExtension::SixNine]);
    }

    #[test]
    fn test_parse_fillers() {
        let chord = parse("Cis4 add9 no5/A").unwrap();
        assert_eq!(
            chord.extensions,
            vec![ChordExtension::Four, ChordExtension::Add9, ChordExtension::No5]
        );
        assert_eq!(chord.extensions_text, "4 add9 no5");
        assert_eq!(chord.tonal_system, None);

        let chord = parse("E\u{266D}m-add9/A").unwrap();
        assert_eq!(chord.fundamental, TonePitch::Es);
        assert_eq!(chord.tonal_system, Some(TonalSystem::Minor));
        assert_eq!(chord.extensions, vec![ChordExtension::Add9]);
        assert_eq!(chord.extensions_text, "-add9");

        let chord = parse("C_7__9-").unwrap();
        assert_eq!(
            chord.extensions,
            vec![ChordExtension::Seven, ChordExtension::Nine]
        );
    }

    #[test]
    fn test_parse_space_before_minor_marker() {
        let chord = parse("C m7").unwrap();
        assert_eq!(chord.fundamental, TonePitch::C);
        assert_eq!(chord.tonal_system, Some(TonalSystem::Minor));
        assert_eq!(chord.extensions, vec![ChordExtension::Seven]);
        assert_eq!(chord.extensions_text, "7");

        let chord = parse("C# m").unwrap();
        assert_eq!(chord.fundamental, TonePitch::Cis);
        assert_eq!(chord.tonal_system, Some(TonalSystem::Minor));
        assert!(chord.extensions.is_empty());

        let chord = parse("C maj7").unwrap();
        assert_eq!(chord.tonal_system, Some(TonalSystem::Major));
        assert_eq!(chord.extensions, vec![ChordExtension::Maj7]);
    }

    #[test]
    fn test_parse_falls_back_to_shorter_pitch() {
        let chord = parse("Esus4").unwrap();
        assert_eq!(chord.fundamental, TonePitch::E);
        assert_eq!(chord.tonal_system, None);
        assert_eq!(chord.extensions, vec![ChordExtension::Sus4]);

        let chord = parse("Asus2/E").unwrap();
        assert_eq!(chord.fundamental, TonePitch::A);
        assert_eq!(chord.base, TonePitch::E);
        assert_eq!(chord.extensions, vec![ChordExtension::Sus2]);

        let chord = parse("esus4add9").unwrap();
        assert_eq!(chord.fundamental, TonePitch::E);
        assert_eq!(
            chord.extensions,
            vec![ChordExtension::Sus4, ChordExtension::Add9]
        );

        // the longer name still wins when both readings parse
        let chord = parse("Es7").unwrap();
        assert_eq!(chord.fundamental, TonePitch::Es);
        assert_eq!(chord.extensions, vec![ChordExtension::Seven]);
        let chord = parse("As").unwrap();
        assert_eq!(chord.fundamental, TonePitch::As);
        assert!(chord.extensions.is_empty());
    }

    #[test]
    fn test_parse_longest_tokens() {
        let chord = parse("Csus4no5add11").unwrap();
        assert_eq!(
            chord.extensions,
            vec![ChordExtension::Sus4, ChordExtension::No5, ChordExtension::Add11]
        );
        let chord = parse("G13").unwrap();
        assert_eq!(chord.extensions, vec![ChordExtension::Thirteen]);
        let chord = parse("F\u{0394}").unwrap();
        assert_eq!(chord.extensions, vec![ChordExtension::Maj7]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("W").unwrap_err(),
            MusicError::MalformedChordSymbol {
                symbol: "W".to_string(),
                position: 0,
                message: "expected a pitch name".to_string(),
            }
        );
        assert!(matches!(
            parse("F/"),
            Err(MusicError::MalformedChordSymbol { position: 1, .. })
        ));
        assert!(matches!(
            parse("Cxyz"),
            Err(MusicError::MalformedChordSymbol { position: 1, .. })
        ));
        assert!(matches!(
            parse("E\u{266D}7xyz"),
            Err(MusicError::MalformedChordSymbol { position: 3, .. })
        ));
        assert!(parse("").is_err());
    }
}
