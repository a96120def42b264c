use std::fmt;
use std::str::FromStr;

use crate::error::VoicingError;
use crate::guitar::music_note::{PitchClass, ToneSet};

/// 和弦性质
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Power,
    Dominant7,
    Major7,
    Minor7,
    Sus4,
    Sus2,
    Diminished,
    Augmented,
    Sixth,
    SixNine,
    Dominant9,
    Minor9,
    Major9,
    Eleventh,
    Thirteenth,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 17] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Power,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Sus4,
        ChordQuality::Sus2,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sixth,
        ChordQuality::SixNine,
        ChordQuality::Dominant9,
        ChordQuality::Minor9,
        ChordQuality::Major9,
        ChordQuality::Eleventh,
        ChordQuality::Thirteenth,
    ];

    /// 解析和弦后缀，如 `major`, `m7`, `sus4`
    pub fn from_token(token: &str) -> Option<Self> {
        let quality = match token.trim() {
            "major" | "maj" | "M" | "" => ChordQuality::Major,
            "minor" | "min" | "m" => ChordQuality::Minor,
            "5" | "power" => ChordQuality::Power,
            "7" | "dom7" => ChordQuality::Dominant7,
            "maj7" | "M7" => ChordQuality::Major7,
            "m7" | "min7" => ChordQuality::Minor7,
            "sus4" => ChordQuality::Sus4,
            "sus2" => ChordQuality::Sus2,
            "dim" => ChordQuality::Diminished,
            "aug" | "+" => ChordQuality::Augmented,
            "6" => ChordQuality::Sixth,
            "69" => ChordQuality::SixNine,
            "9" => ChordQuality::Dominant9,
            "m9" => ChordQuality::Minor9,
            "maj9" => ChordQuality::Major9,
            "11" => ChordQuality::Eleventh,
            "13" => ChordQuality::Thirteenth,
            _ => return None,
        };
        Some(quality)
    }

    /// 标准后缀
    pub fn token(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Power => "5",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sixth => "6",
            ChordQuality::SixNine => "69",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Minor9 => "m9",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Eleventh => "11",
            ChordQuality::Thirteenth => "13",
        }
    }

    /// 相对根音的音程，单位是半音
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Power => &[0, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sixth => &[0, 4, 7, 9],
            ChordQuality::SixNine => &[0, 4, 7, 9, 14],
            ChordQuality::Dominant9 => &[0, 4, 7, 10, 14],
            ChordQuality::Minor9 => &[0, 3, 7, 10, 14],
            ChordQuality::Major9 => &[0, 4, 7, 11, 14],
            ChordQuality::Eleventh => &[0, 7, 10, 14, 17],
            ChordQuality::Thirteenth => &[0, 4, 7, 10, 14, 21],
        }
    }
}

impl FromStr for ChordQuality {
    type Err = VoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChordQuality::from_token(s).ok_or_else(|| VoicingError::UnknownQuality(s.to_string()))
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The resolved notes of a chord symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTones {
    pub root: PitchClass,
    pub tones: ToneSet,
}

impl ChordTones {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        ChordTones {
            root,
            tones: ToneSet::from_intervals(root, quality.intervals()),
        }
    }

    /// 至少要有几根弦发声：二音和弦 2 根，四音及以上 4 根，其它 3 根
    pub fn min_sounding_strings(&self) -> usize {
        match self.tones.len() {
            0..=2 => 2,
            3 => 3,
            _ => 4,
        }
    }
}

/// 根据根音和和弦后缀查出和弦内音
///
/// Returning `None` (or an empty tone set) means the chord is unsupported;
/// callers treat that as "no result", never as an error.
pub trait ChordToneResolver {
    fn resolve(&self, key: &str, quality: &str) -> Option<ChordTones>;
}

/// 内置的和弦内音查询，覆盖 `ChordQuality` 的全部后缀
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChordResolver;

impl ChordToneResolver for StandardChordResolver {
    fn resolve(&self, key: &str, quality: &str) -> Option<ChordTones> {
        let root = PitchClass::parse(key).ok()?;
        let quality = ChordQuality::from_token(quality)?;
        Some(ChordTones::new(root, quality))
    }
}
