//! Integration tests for the tonal crate
//!
//! Drives the public API from chord symbols and key names through transposition and
//! rendering.

use tonal::{
    parse_chord, transpose_symbol, Chord, ChordExtension, ChromaticInterval, DiatonicInterval,
    EnharmonicStyle, Interval, MusicError, MusicalItem, MusicalKey, MusicalValue, Notation,
    Settings, Solmization, TonalSystem, Tone, TonePitch, Transposable,
};

/// Route parser and settings logs to the test output.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_parse_plain_major_chord() {
    let chord = parse_chord("C").unwrap();
    assert_eq!(chord.tonal_system(), Some(TonalSystem::Major));
    assert_eq!(chord.fundamental(), TonePitch::C);
    assert_eq!(chord.base(), TonePitch::C);
    assert!(chord.extensions().is_empty());
}

#[test]
fn test_parse_minor_chord() {
    let chord = parse_chord("Cm").unwrap();
    assert_eq!(chord.tonal_system(), Some(TonalSystem::Minor));
    assert_eq!(chord, Chord::new(TonePitch::C, Some(TonalSystem::Minor)));
}

#[test]
fn test_parse_slash_chord_with_extension() {
    let expected = Chord::new(TonePitch::Cis, Some(TonalSystem::Major))
        .with_base(TonePitch::E)
        .with_extensions(vec![ChordExtension::Maj7]);
    assert_eq!(parse_chord("C#maj7/E").unwrap(), expected);
}

#[test]
fn test_parse_chord_with_double_flat_bass() {
    let chord = parse_chord("a\u{266D}sus4add9/f\u{1D12B}").unwrap();
    assert_eq!(chord.fundamental(), TonePitch::As);
    assert_eq!(chord.tonal_system(), None);
    assert_eq!(chord.base(), TonePitch::Feses);
    assert_eq!(
        chord.extensions(),
        &[ChordExtension::Sus4, ChordExtension::Add9]
    );
    assert_eq!(chord.extensions_text(), "sus4add9");
}

#[test]
fn test_parse_space_before_minor_marker() {
    let chord = parse_chord("C m7").unwrap();
    assert_eq!(chord.tonal_system(), Some(TonalSystem::Minor));
    assert_eq!(chord.extensions(), &[ChordExtension::Seven]);
    assert_eq!(parse_chord("C# m").unwrap(), parse_chord("c#").unwrap());
}

#[test]
fn test_sus_chords_on_e_and_a_reparse() {
    init_logging();
    let built = Chord::new(TonePitch::A, None).with_extensions(vec![ChordExtension::Sus2]);
    assert_eq!(built.name(), "Asus2");
    assert_eq!(parse_chord(built.name()).unwrap(), built);

    let moved = parse_chord("Dsus4")
        .unwrap()
        .transpose_chromatic(2, EnharmonicStyle::Normal);
    assert_eq!(moved.name(), "Esus4");
    assert_eq!(parse_chord(moved.name()).unwrap(), moved);
}

#[test]
fn test_chord_equality_ignores_surface_text() {
    let c = parse_chord("c").unwrap();
    for symbol in ["CMi", "Cm", "CmI"] {
        assert_eq!(parse_chord(symbol).unwrap(), c, "{}", symbol);
    }
}

#[test]
fn test_transpose_chord_one_semitone() {
    let chord = parse_chord("C").unwrap();
    assert_eq!(
        chord.transpose_chromatic(1, EnharmonicStyle::Normal).name(),
        "C\u{266F}"
    );
}

#[test]
fn test_transpose_chord_by_fourth_into_key() {
    let chord = parse_chord("C\u{266F}7/B\u{266D}").unwrap();
    let key = MusicalKey::CisMajor.transpose_chromatic(5);
    assert_eq!(key, MusicalKey::FisMajor);
    let transposed = chord
        .transpose(Interval::from(ChromaticInterval::PerfectFourth), key)
        .unwrap();
    assert_eq!(transposed, parse_chord("F\u{266F}7/D\u{266F}").unwrap());
}

#[test]
fn test_transpose_chord_by_diatonic_third() {
    let chord = parse_chord("C\u{266F}7/Bb").unwrap();
    let transposed = chord
        .transpose(Interval::from(DiatonicInterval::Third), MusicalKey::CisMajor)
        .unwrap();
    assert_eq!(transposed, parse_chord("E\u{266F}7/D").unwrap());
}

#[test]
fn test_invalid_chord_symbols() {
    init_logging();
    assert!(matches!(
        parse_chord("W"),
        Err(MusicError::MalformedChordSymbol { .. })
    ));
    assert!(matches!(
        parse_chord("F/"),
        Err(MusicError::MalformedChordSymbol { .. })
    ));
    let err = parse_chord("Cxyz").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed chord symbol 'Cxyz' at position 1: unknown chord extension 'xyz'"
    );
}

#[test]
fn test_normal_forms() {
    for pitch in TonePitch::ALL {
        let normal = pitch.normal();
        assert_eq!(normal.normal(), normal);
        assert_eq!(normal.step(), pitch.step());
        if pitch.is_normal() {
            assert_eq!(normal, pitch);
        } else {
            assert_ne!(normal, pitch);
        }
        for style in [
            EnharmonicStyle::Normal,
            EnharmonicStyle::Flat,
            EnharmonicStyle::Sharp,
        ] {
            let moved = pitch.transpose_chromatic(12, style);
            assert_eq!(moved.step(), pitch.step());
        }
        assert_eq!(
            pitch.transpose_chromatic(12, EnharmonicStyle::Normal),
            normal
        );
        assert_eq!(
            pitch.transpose_chromatic(0, EnharmonicStyle::Normal),
            normal
        );
    }
}

#[test]
fn test_every_key_builds_complete_scales() {
    for key in MusicalKey::ALL {
        assert_eq!(key.diatonic_scale().len(), 7);
        assert_eq!(key.chromatic_scale().len(), 12);
        assert_eq!(key.diatonic_scale()[0], key.tonika());
        let mut steps: Vec<u8> = key.chromatic_scale().iter().map(|p| p.step()).collect();
        steps.sort_unstable();
        assert_eq!(steps, (0..12).collect::<Vec<u8>>());
    }
}

#[test]
fn test_solmization_in_relative_keys() {
    let major = MusicalKey::AMajor;
    let minor = MusicalKey::FisMinor;
    for syllable in Solmization::ALL {
        assert_eq!(major.tone(syllable), minor.tone(syllable), "{}", syllable);
    }
    let la = Interval::from(Solmization::La);
    assert_eq!(
        TonePitch::Fis.transpose(la, MusicalKey::FisMinor).unwrap(),
        TonePitch::Fis
    );
    assert_eq!(
        TonePitch::A.transpose(la, MusicalKey::AMajor).unwrap(),
        TonePitch::Fis
    );
}

#[test]
fn test_tone_octaves_across_c() {
    let tone: Tone = "H".parse().unwrap();
    let up = tone.transpose_chromatic_in_key(1, MusicalKey::CMajor);
    assert_eq!(up, Tone::new(TonePitch::C, 1));
    assert_eq!(up.to_string(), "C+1");
    let down = up.transpose_diatonic(-8, MusicalKey::CMajor);
    assert_eq!(down, Tone::new(TonePitch::H, -1));
}

#[test]
fn test_items_in_a_voice() {
    let voice = [
        MusicalItem::Tone {
            value: MusicalValue::QUARTER,
            tone: "G".parse().unwrap(),
        },
        MusicalItem::Rest {
            value: "1/4.".parse().unwrap(),
        },
        MusicalItem::Tone {
            value: MusicalValue::MINIM,
            tone: "H".parse().unwrap(),
        },
    ];
    let moved: Vec<MusicalItem> = voice
        .iter()
        .map(|item| item.transpose_chromatic_in_key(5, MusicalKey::FMajor))
        .collect();
    assert_eq!(moved[0].tone(), Some(Tone::new(TonePitch::C, 1)));
    assert!(moved[1].is_rest());
    assert_eq!(moved[2].tone(), Some(Tone::new(TonePitch::E, 1)));
}

#[test]
fn test_transpose_symbol_with_settings() {
    init_logging();
    let text = Settings::from_yaml("notation: text\nenharmonic-style: flat\n").unwrap();
    assert_eq!(transpose_symbol("F#m7", 2, &text).unwrap(), "asm7");
    assert_eq!(transpose_symbol("C/E", 1, &text).unwrap(), "Des/F");

    let default = Settings::default();
    assert_eq!(default.notation, Notation::Unicode);
    assert_eq!(transpose_symbol("Gsus4", -2, &default).unwrap(), "Fsus4");
    assert!(transpose_symbol("Hxx", 1, &default).is_err());
}
