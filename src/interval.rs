//! # Interval Algebra
//!
//! Distances between pitches, measured either in semitones or in scale degrees.
//!
//! ## Interval Kinds
//! - [`ChromaticInterval`] - fixed semitone counts from a unison (0) up to a major
//!   thirteenth (21). Each also knows how many scale degrees it spans.
//! - [`DiatonicInterval`] - a number of scale degrees (prime to octave) whose size in
//!   semitones depends on the key it is applied in.
//! - [`Solmization`] - scale-degree syllables (do, re, mi, ...) whose distance from the
//!   tonika depends on whether the key is major or minor.
//!
//! All three are wrapped by [`Interval`], which resolves to [`Steps`] for a given
//! [`TonalSystem`]. Chromatic steps take precedence over diatonic steps.
//!
//! ```
//! use tonal::{ChromaticInterval, Interval, Solmization, Steps, TonalSystem};
//!
//! let fifth = Interval::from(ChromaticInterval::PerfectFifth);
//! assert_eq!(fifth.resolve(None).unwrap(), Steps::Chromatic(7));
//!
//! let mi = Interval::from(Solmization::Mi);
//! assert_eq!(mi.resolve(Some(TonalSystem::Major)).unwrap(), Steps::Chromatic(4));
//! assert!(mi.resolve(None).is_err());
//! ```

use std::fmt;

use crate::error::MusicError;
use crate::key::TonalSystem;

/// A distance in semitones, from unison to a major thirteenth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChromaticInterval {
    PerfectUnison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    DiminishedFifth,
    PerfectFifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    PerfectOctave,
    MinorNinth,
    MajorNinth,
    MinorTenth,
    MajorTenth,
    PerfectEleventh,
    DiminishedTwelfth,
    PerfectTwelfth,
    MinorThirteenth,
    MajorThirteenth,
}

/// Scale degrees spanned by each chromatic interval, indexed by semitones.
const DIATONIC_SPAN: [u8; 22] = [
    0, 1, 1, 2, 2, 3, 4, 4, 5, 5, 6, 6, 7, 8, 8, 9, 9, 10, 11, 11, 12, 12,
];

impl ChromaticInterval {
    pub const ALL: [ChromaticInterval; 22] = [
        ChromaticInterval::PerfectUnison,
        ChromaticInterval::MinorSecond,
        ChromaticInterval::MajorSecond,
        ChromaticInterval::MinorThird,
        ChromaticInterval::MajorThird,
        ChromaticInterval::PerfectFourth,
        ChromaticInterval::DiminishedFifth,
        ChromaticInterval::PerfectFifth,
        ChromaticInterval::MinorSixth,
        ChromaticInterval::MajorSixth,
        ChromaticInterval::MinorSeventh,
        ChromaticInterval::MajorSeventh,
        ChromaticInterval::PerfectOctave,
        ChromaticInterval::MinorNinth,
        ChromaticInterval::MajorNinth,
        ChromaticInterval::MinorTenth,
        ChromaticInterval::MajorTenth,
        ChromaticInterval::PerfectEleventh,
        ChromaticInterval::DiminishedTwelfth,
        ChromaticInterval::PerfectTwelfth,
        ChromaticInterval::MinorThirteenth,
        ChromaticInterval::MajorThirteenth,
    ];

    /// Size in semitones.
    pub fn chromatic_steps(self) -> u8 {
        self as u8
    }

    /// Size in scale degrees (a third spans 2 degrees, an octave 7).
    pub fn diatonic_steps(self) -> u8 {
        DIATONIC_SPAN[self as usize]
    }

    /// The interval spanning exactly `semitones`, if it is in 0..=21.
    ///
    /// ```
    /// use tonal::ChromaticInterval;
    ///
    /// assert_eq!(ChromaticInterval::from_chromatic_steps(4), Some(ChromaticInterval::MajorThird));
    /// assert_eq!(ChromaticInterval::from_chromatic_steps(22), None);
    /// ```
    pub fn from_chromatic_steps(semitones: i32) -> Option<ChromaticInterval> {
        usize::try_from(semitones)
            .ok()
            .and_then(|i| ChromaticInterval::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            ChromaticInterval::PerfectUnison => "perfect unison",
            ChromaticInterval::MinorSecond => "minor second",
            ChromaticInterval::MajorSecond => "major second",
            ChromaticInterval::MinorThird => "minor third",
            ChromaticInterval::MajorThird => "major third",
            ChromaticInterval::PerfectFourth => "perfect fourth",
            ChromaticInterval::DiminishedFifth => "diminished fifth",
            ChromaticInterval::PerfectFifth => "perfect fifth",
            ChromaticInterval::MinorSixth => "minor sixth",
            ChromaticInterval::MajorSixth => "major sixth",
            ChromaticInterval::MinorSeventh => "minor seventh",
            ChromaticInterval::MajorSeventh => "major seventh",
            ChromaticInterval::PerfectOctave => "perfect octave",
            ChromaticInterval::MinorNinth => "minor ninth",
            ChromaticInterval::MajorNinth => "major ninth",
            ChromaticInterval::MinorTenth => "minor tenth",
            ChromaticInterval::MajorTenth => "major tenth",
            ChromaticInterval::PerfectEleventh => "perfect eleventh",
            ChromaticInterval::DiminishedTwelfth => "diminished twelfth",
            ChromaticInterval::PerfectTwelfth => "perfect twelfth",
            ChromaticInterval::MinorThirteenth => "minor thirteenth",
            ChromaticInterval::MajorThirteenth => "major thirteenth",
        }
    }
}

impl fmt::Display for ChromaticInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distance in scale degrees; its size in semitones depends on the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiatonicInterval {
    Prime,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Octave,
}

impl DiatonicInterval {
    pub fn diatonic_steps(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DiatonicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiatonicInterval::Prime => "prime",
            DiatonicInterval::Second => "second",
            DiatonicInterval::Third => "third",
            DiatonicInterval::Fourth => "fourth",
            DiatonicInterval::Fifth => "fifth",
            DiatonicInterval::Sixth => "sixth",
            DiatonicInterval::Seventh => "seventh",
            DiatonicInterval::Octave => "octave",
        };
        f.write_str(name)
    }
}

/// Scale-degree syllables.
///
/// In major `Do` is the tonika; in minor the tonika is `La`, so every syllable sits at
/// a different distance from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solmization {
    Do,
    Re,
    Mi,
    Fa,
    So,
    La,
    Ti,
}

impl Solmization {
    pub const ALL: [Solmization; 7] = [
        Solmization::Do,
        Solmization::Re,
        Solmization::Mi,
        Solmization::Fa,
        Solmization::So,
        Solmization::La,
        Solmization::Ti,
    ];

    /// Semitones above the tonika of a key in `system`.
    pub fn chromatic_steps(self, system: TonalSystem) -> u8 {
        let (major, minor) = match self {
            Solmization::Do => (0, 3),
            Solmization::Re => (2, 5),
            Solmization::Mi => (4, 7),
            Solmization::Fa => (5, 8),
            Solmization::So => (7, 10),
            Solmization::La => (9, 0),
            Solmization::Ti => (11, 2),
        };
        match system {
            TonalSystem::Major => major,
            TonalSystem::Minor => minor,
        }
    }

    /// Scale degrees above the tonika of a key in `system`.
    pub fn diatonic_steps(self, system: TonalSystem) -> u8 {
        let chromatic = self.chromatic_steps(system);
        match system {
            TonalSystem::Minor if chromatic >= 8 => (chromatic + 2) / 2,
            _ => (chromatic + 1) / 2,
        }
    }
}

impl fmt::Display for Solmization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Solmization::Do => "do",
            Solmization::Re => "re",
            Solmization::Mi => "mi",
            Solmization::Fa => "fa",
            Solmization::So => "so",
            Solmization::La => "la",
            Solmization::Ti => "ti",
        };
        f.write_str(name)
    }
}

/// How far to move: either semitones or scale degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steps {
    Chromatic(i32),
    Diatonic(i32),
}

/// Any interval kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Chromatic(ChromaticInterval),
    Diatonic(DiatonicInterval),
    Solmization(Solmization),
}

impl Interval {
    /// Semitones for `system`, or `None` if this interval is not chromatic there.
    pub fn chromatic_steps(&self, system: Option<TonalSystem>) -> Option<i32> {
        match (self, system) {
            (Interval::Chromatic(interval), _) => Some(interval.chromatic_steps() as i32),
            (Interval::Solmization(syllable), Some(system)) => {
                Some(syllable.chromatic_steps(system) as i32)
            }
            _ => None,
        }
    }

    /// Scale degrees for `system`, or `None` if this interval has no degree count there.
    pub fn diatonic_steps(&self, system: Option<TonalSystem>) -> Option<i32> {
        match (self, system) {
            (Interval::Chromatic(interval), _) => Some(interval.diatonic_steps() as i32),
            (Interval::Diatonic(interval), _) => Some(interval.diatonic_steps() as i32),
            (Interval::Solmization(syllable), Some(system)) => {
                Some(syllable.diatonic_steps(system) as i32)
            }
            (Interval::Solmization(_), None) => None,
        }
    }

    /// Resolve into the steps a transposition should move by, preferring semitones.
    pub fn resolve(&self, system: Option<TonalSystem>) -> Result<Steps, MusicError> {
        if let Some(semitones) = self.chromatic_steps(system) {
            return Ok(Steps::Chromatic(semitones));
        }
        if let Some(degrees) = self.diatonic_steps(system) {
            return Ok(Steps::Diatonic(degrees));
        }
        Err(MusicError::UnresolvableInterval {
            interval: self.to_string(),
        })
    }
}

impl From<ChromaticInterval> for Interval {
    fn from(interval: ChromaticInterval) -> Self {
        Interval::Chromatic(interval)
    }
}

impl From<DiatonicInterval> for Interval {
    fn from(interval: DiatonicInterval) -> Self {
        Interval::Diatonic(interval)
    }
}

impl From<Solmization> for Interval {
    fn from(syllable: Solmization) -> Self {
        Interval::Solmization(syllable)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Chromatic(interval) => write!(f, "{}", interval),
            Interval::Diatonic(interval) => write!(f, "{}", interval),
            Interval::Solmization(syllable) => write!(f, "{}", syllable),
        }
    }
}
