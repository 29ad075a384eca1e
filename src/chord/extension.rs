//! Chord extension catalog.
//!
//! Each extension is a token appended to the fundamental of a chord symbol, e.g. the
//! `sus4` and `add9` of `Csus4add9`. Extensions are recognized by their canonical name,
//! an alternative name (`j7` for `maj7`) or a symbol (`Δ`), ignoring case.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::interval::ChromaticInterval;
use crate::interval::ChromaticInterval::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordExtension {
    Two,
    Add2,
    Sus2,
    No3,
    Four,
    Add4,
    Sus4,
    Five,
    No5,
    Six,
    SixNine,
    Seven,
    Maj7,
    Nine,
    Add9,
    Maj9,
    Eleven,
    Add11,
    Thirteen,
    Add13,
    Dim,
    Aug,
}

struct ExtensionData {
    name: &'static str,
    remove_third: bool,
    remove_fifth: bool,
    symbol: Option<&'static str>,
    alt_name: Option<&'static str>,
    intervals: &'static [ChromaticInterval],
}

static EXTENSIONS: [ExtensionData; 22] = [
    ExtensionData {
        name: "2",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MajorSecond],
    },
    ExtensionData {
        name: "add2",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("+2"),
        intervals: &[MajorSecond],
    },
    ExtensionData {
        name: "sus2",
        remove_third: true,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MajorSecond, PerfectFifth],
    },
    ExtensionData {
        name: "no3",
        remove_third: true,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[PerfectFifth],
    },
    ExtensionData {
        name: "4",
        remove_third: true,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[PerfectFourth],
    },
    ExtensionData {
        name: "add4",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("+4"),
        intervals: &[PerfectFourth],
    },
    ExtensionData {
        name: "sus4",
        remove_third: true,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[PerfectFourth, PerfectFifth],
    },
    ExtensionData {
        name: "5",
        remove_third: true,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[],
    },
    ExtensionData {
        name: "no5",
        remove_third: false,
        remove_fifth: true,
        symbol: None,
        alt_name: None,
        intervals: &[],
    },
    ExtensionData {
        name: "6",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("maj6"),
        intervals: &[MajorSixth],
    },
    ExtensionData {
        name: "6/9",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MajorSixth, MajorNinth],
    },
    ExtensionData {
        name: "7",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MinorSeventh],
    },
    ExtensionData {
        name: "maj7",
        remove_third: false,
        remove_fifth: false,
        symbol: Some("\u{0394}"),
        alt_name: Some("j7"),
        intervals: &[MajorSeventh],
    },
    ExtensionData {
        name: "9",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MinorSeventh, MajorNinth],
    },
    ExtensionData {
        name: "add9",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("+9"),
        intervals: &[MajorNinth],
    },
    ExtensionData {
        name: "maj9",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("j9"),
        intervals: &[MajorSeventh, MajorNinth],
    },
    ExtensionData {
        name: "11",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MinorSeventh, MajorNinth, PerfectEleventh],
    },
    ExtensionData {
        name: "add11",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: Some("+11"),
        intervals: &[PerfectEleventh],
    },
    ExtensionData {
        name: "13",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MinorSeventh, MajorNinth, PerfectEleventh, MajorThirteenth],
    },
    ExtensionData {
        name: "add13",
        remove_third: false,
        remove_fifth: false,
        symbol: None,
        alt_name: None,
        intervals: &[MajorThirteenth],
    },
    ExtensionData {
        name: "dim",
        remove_third: true,
        remove_fifth: true,
        symbol: Some("\u{00B0}"),
        alt_name: Some("0"),
        intervals: &[MinorThird, DiminishedFifth],
    },
    ExtensionData {
        name: "aug",
        remove_third: true,
        remove_fifth: true,
        symbol: None,
        alt_name: Some("+"),
        intervals: &[MajorThird, MinorSixth],
    },
];

struct ExtensionIndex {
    by_token: HashMap<String, ChordExtension>,
    max_chars: usize,
}

static EXTENSION_INDEX: Lazy<ExtensionIndex> = Lazy::new(|| {
    let mut by_token = HashMap::new();
    let mut max_chars = 0;
    for extension in ChordExtension::ALL {
        let data = extension.data();
        let tokens = std::iter::once(data.name)
            .chain(data.alt_name)
            .chain(data.symbol);
        for token in tokens {
            max_chars = max_chars.max(token.chars().count());
            by_token.insert(token.to_lowercase(), extension);
        }
    }
    debug!(tokens = by_token.len(), max_chars, "built chord extension index");
    ExtensionIndex {
        by_token,
        max_chars,
    }
});

impl ChordExtension {
    pub const ALL: [ChordExtension; 22] = [
        ChordExtension::Two,
        ChordExtension::Add2,
        ChordExtension::Sus2,
        ChordExtension::No3,
        ChordExtension::Four,
        ChordExtension::Add4,
        ChordExtension::Sus4,
        ChordExtension::Five,
        ChordExtension::No5,
        ChordExtension::Six,
        ChordExtension::SixNine,
        ChordExtension::Seven,
        ChordExtension::Maj7,
        ChordExtension::Nine,
        ChordExtension::Add9,
        ChordExtension::Maj9,
        ChordExtension::Eleven,
        ChordExtension::Add11,
        ChordExtension::Thirteen,
        ChordExtension::Add13,
        ChordExtension::Dim,
        ChordExtension::Aug,
    ];

    fn data(self) -> &'static ExtensionData {
        &EXTENSIONS[self as usize]
    }

    /// Canonical token, e.g. `maj7`.
    pub fn name(self) -> &'static str {
        self.data().name
    }

    pub fn symbol(self) -> Option<&'static str> {
        self.data().symbol
    }

    pub fn alt_name(self) -> Option<&'static str> {
        self.data().alt_name
    }

    /// Whether the chord no longer sounds its third (and so has no tonal system).
    pub fn removes_third(self) -> bool {
        self.data().remove_third
    }

    pub fn removes_fifth(self) -> bool {
        self.data().remove_fifth
    }

    /// Intervals above the fundamental that this extension adds.
    pub fn intervals(self) -> &'static [ChromaticInterval] {
        self.data().intervals
    }

    /// Look up an extension by name, alternative name or symbol, ignoring case.
    pub fn from_token(token: &str) -> Option<ChordExtension> {
        EXTENSION_INDEX.by_token.get(&token.to_lowercase()).copied()
    }

    /// Longest extension token at the start of `text`, as byte length and extension.
    ///
    /// ```
    /// use tonal::ChordExtension;
    ///
    /// assert_eq!(ChordExtension::from_prefix("add11"), Some((5, ChordExtension::Add11)));
    /// assert_eq!(ChordExtension::from_prefix("add9no5"), Some((4, ChordExtension::Add9)));
    /// assert_eq!(ChordExtension::from_prefix("xyz"), None);
    /// ```
    pub fn from_prefix(text: &str) -> Option<(usize, ChordExtension)> {
        let index = &*EXTENSION_INDEX;
        let ends: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(text.len()))
            .take(index.max_chars)
            .collect();
        ends.iter().rev().find_map(|&end| {
            index
                .by_token
                .get(&text[..end].to_lowercase())
                .map(|&extension| (end, extension))
        })
    }
}

impl fmt::Display for ChordExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
