use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

use crate::error::VoicingError;

/// 每个音级的标准写法，下标即音级
pub const CANONICAL_KEYS: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

lazy_static! {
    pub static ref KEYNOTES: HashMap<&'static str, u8> = {
        let mut m = HashMap::new();
        m.insert("C", 0);
        m.insert("B#", 0);
        m.insert("C#", 1);
        m.insert("Db", 1);
        m.insert("D", 2);
        m.insert("D#", 3);
        m.insert("Eb", 3);
        m.insert("E", 4);
        m.insert("Fb", 4);
        m.insert("E#", 5);
        m.insert("F", 5);
        m.insert("F#", 6);
        m.insert("Gb", 6);
        m.insert("G", 7);
        m.insert("G#", 8);
        m.insert("Ab", 8);
        m.insert("A", 9);
        m.insert("A#", 10);
        m.insert("Bb", 10);
        m.insert("B", 11);
        m.insert("Cb", 11);
        m
    };
}

/// A pitch class (chroma) in 12-TET, `0..=11`, C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    /// 音级对应的 MIDI 音符
    pub fn from_midi(midi: u8) -> Self {
        PitchClass(midi % 12)
    }

    /// 解析音名，接受等音写法，如 `C#`, `Db`, `bb`, `F♯`
    pub fn parse(name: &str) -> Result<Self, VoicingError> {
        let normalized = name.trim().replace('♯', "#").replace('♭', "b");
        if let Some(&chroma) = KEYNOTES.get(normalized.as_str()) {
            return Ok(PitchClass(chroma));
        }

        // 首字母小写的情况，例如 "eb"
        let mut chars = normalized.chars();
        if let Some(first) = chars.next() {
            let capitalized = format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
            if let Some(&chroma) = KEYNOTES.get(capitalized.as_str()) {
                return Ok(PitchClass(chroma));
            }
        }

        Err(VoicingError::UnknownKey(name.to_string()))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// 把等音统一成一个标准写法
    pub fn canonical_name(self) -> &'static str {
        CANONICAL_KEYS[self.0 as usize]
    }

    /// 向上移动若干半音
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A set of pitch classes, stored as a 12-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToneSet(u16);

impl ToneSet {
    pub fn new() -> Self {
        ToneSet(0)
    }

    /// 根音加上一组音程（半音数）
    pub fn from_intervals(root: PitchClass, intervals: &[i32]) -> Self {
        intervals
            .iter()
            .map(|&interval| root.transpose(interval))
            .collect()
    }

    pub fn insert(&mut self, pitch_class: PitchClass) {
        self.0 |= 1 << pitch_class.value();
    }

    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.0 & (1 << pitch_class.value()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(&self, other: &ToneSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// 在 `self` 中但不在 `other` 中的音级个数
    pub fn count_missing_from(&self, other: &ToneSet) -> usize {
        (self.0 & !other.0).count_ones() as usize
    }

    /// 按音级升序遍历
    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        (0..12u8)
            .filter(move |pc| self.0 & (1 << pc) != 0)
            .map(PitchClass)
    }
}

impl FromIterator<PitchClass> for ToneSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = ToneSet::new();
        for pitch_class in iter {
            set.insert(pitch_class);
        }
        set
    }
}

/// MIDI 音符的名称，如 40 -> `E2`, 60 -> `C4`
pub fn midi_note_name(midi: u8) -> String {
    let octave = midi as i32 / 12 - 1;
    format!("{}{}", PitchClass::from_midi(midi).canonical_name(), octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enharmonic_spellings() {
        assert_eq!(PitchClass::parse("C#").unwrap(), PitchClass::parse("Db").unwrap());
        assert_eq!(PitchClass::parse("A#").unwrap().canonical_name(), "Bb");
        assert_eq!(PitchClass::parse("G♯").unwrap().canonical_name(), "Ab");
        assert_eq!(PitchClass::parse("eb").unwrap().value(), 3);
        assert_eq!(PitchClass::parse(" B ").unwrap().value(), 11);
        assert!(PitchClass::parse("H").is_err());
        assert!(PitchClass::parse("").is_err());
    }

    #[test]
    fn test_transpose_wraps() {
        let b = PitchClass::parse("B").unwrap();
        assert_eq!(b.transpose(1).canonical_name(), "C");
        assert_eq!(b.transpose(-12), b);
        assert_eq!(PitchClass::new(-1).value(), 11);
    }

    #[test]
    fn test_tone_set() {
        let c = PitchClass::parse("C").unwrap();
        let major = ToneSet::from_intervals(c, &[0, 4, 7]);
        assert_eq!(major.len(), 3);
        assert!(major.contains(PitchClass::new(4)));
        assert!(!major.contains(PitchClass::new(5)));

        let dyad: ToneSet = [PitchClass::new(0), PitchClass::new(7)].into_iter().collect();
        assert!(dyad.is_subset(&major));
        assert_eq!(major.count_missing_from(&dyad), 1);
        assert_eq!(
            major.iter().map(|pc| pc.value()).collect::<Vec<_>>(),
            vec![0, 4, 7]
        );
    }

    #[test]
    fn test_midi_note_name() {
        assert_eq!(midi_note_name(40), "E2");
        assert_eq!(midi_note_name(60), "C4");
        assert_eq!(midi_note_name(61), "C#4");
    }
}
