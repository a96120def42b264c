use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VoicingError;

/// 吉他的弦数，所有按法都是 6 根弦
pub const STRING_COUNT: usize = 6;

/// 可以按到的最高品格
pub const MAX_FRET: u8 = 24;

/// 按下去的品格，只能是 `1..=MAX_FRET`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FretNumber(u8);

impl FretNumber {
    pub fn new(value: u8) -> Result<Self, VoicingError> {
        if (1..=MAX_FRET).contains(&value) {
            Ok(FretNumber(value))
        } else {
            Err(VoicingError::InvalidFret {
                value: value as i32,
                max: MAX_FRET,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// The state of one string in a voicing.
///
/// Serialized as `-1` (muted), `0` (open) or the fret number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Fret {
    Muted,
    Open,
    /// 按弦，品格从 1 开始
    Fretted(FretNumber),
}

impl Fret {
    /// 从 -1/0/n 的数字形式构造
    pub fn from_i32(value: i32) -> Result<Self, VoicingError> {
        match value {
            -1 => Ok(Fret::Muted),
            _ => u8::try_from(value)
                .map_err(|_| VoicingError::InvalidFret {
                    value,
                    max: MAX_FRET,
                })
                .and_then(Fret::at),
        }
    }

    /// 0 为空弦，其它为按弦
    pub fn at(position: u8) -> Result<Self, VoicingError> {
        if position == 0 {
            Ok(Fret::Open)
        } else {
            FretNumber::new(position).map(Fret::Fretted)
        }
    }

    /// 品格数，空弦为 0，静音弦为 None
    pub fn position(self) -> Option<u8> {
        match self {
            Fret::Muted => None,
            Fret::Open => Some(0),
            Fret::Fretted(n) => Some(n.get()),
        }
    }

    /// 只有按弦才返回品格
    pub fn fretted(self) -> Option<u8> {
        match self {
            Fret::Fretted(n) => Some(n.get()),
            _ => None,
        }
    }

    pub fn is_sounding(self) -> bool {
        self != Fret::Muted
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Fret::Muted => -1,
            Fret::Open => 0,
            Fret::Fretted(n) => n.get() as i32,
        }
    }
}

impl From<Fret> for i32 {
    fn from(fret: Fret) -> Self {
        fret.to_i32()
    }
}

impl TryFrom<i32> for Fret {
    type Error = VoicingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Fret::from_i32(value)
    }
}

/// One fret per string, low E string first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FretAssignment(pub [Fret; STRING_COUNT]);

impl FretAssignment {
    pub fn new(frets: [Fret; STRING_COUNT]) -> Self {
        FretAssignment(frets)
    }

    /// 全部静音
    pub fn muted() -> Self {
        FretAssignment([Fret::Muted; STRING_COUNT])
    }

    /// 从 `[-1, 3, 2, 0, 1, 0]` 这样的形式构造
    pub fn from_i32s(values: [i32; STRING_COUNT]) -> Result<Self, VoicingError> {
        let mut frets = [Fret::Muted; STRING_COUNT];
        for (slot, value) in frets.iter_mut().zip(values) {
            *slot = Fret::from_i32(value)?;
        }
        Ok(FretAssignment(frets))
    }

    pub fn frets(&self) -> &[Fret; STRING_COUNT] {
        &self.0
    }

    pub fn to_i32s(&self) -> [i32; STRING_COUNT] {
        self.0.map(Fret::to_i32)
    }

    /// 所有按弦的 (弦索引, 品格)
    pub fn fretted(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(string_index, fret)| fret.fretted().map(|n| (string_index, n)))
    }

    pub fn min_fretted(&self) -> Option<u8> {
        self.fretted().map(|(_, n)| n).min()
    }

    pub fn max_fretted(&self) -> Option<u8> {
        self.fretted().map(|(_, n)| n).max()
    }

    /// 按弦的最高品和最低品之差，空弦不计入
    pub fn span(&self) -> u8 {
        match (self.min_fretted(), self.max_fretted()) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }

    pub fn sounding_count(&self) -> usize {
        self.0.iter().filter(|fret| fret.is_sounding()).count()
    }

    pub fn muted_count(&self) -> usize {
        STRING_COUNT - self.sounding_count()
    }

    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|&&fret| fret == Fret::Open).count()
    }
}

impl fmt::Display for FretAssignment {
    /// 品格都小于 10 时写成 `x32010`，否则用 `-` 分隔
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.0.iter().all(|fret| fret.position().is_none_or(|n| n < 10));
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|fret| match fret.position() {
                None => "x".to_string(),
                Some(n) => n.to_string(),
            })
            .collect();
        if compact {
            write!(f, "{}", parts.concat())
        } else {
            write!(f, "{}", parts.join("-"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fret_conversion() {
        assert_eq!(Fret::from_i32(-1).unwrap(), Fret::Muted);
        assert_eq!(Fret::from_i32(0).unwrap(), Fret::Open);
        assert_eq!(Fret::from_i32(7).unwrap().fretted(), Some(7));
        assert!(Fret::from_i32(-2).is_err());
        assert!(Fret::from_i32(25).is_err());
        assert!(Fret::from_i32(300).is_err());
        assert_eq!(Fret::at(3).unwrap().to_i32(), 3);
        assert_eq!(Fret::at(0).unwrap(), Fret::Open);
    }

    #[test]
    fn test_fret_number_bounds() {
        assert!(matches!(
            FretNumber::new(0),
            Err(VoicingError::InvalidFret { value: 0, max: 24 })
        ));
        assert!(FretNumber::new(25).is_err());
        assert!(FretNumber::new(250).is_err());
        assert!(Fret::at(250).is_err());
        assert_eq!(FretNumber::new(24).unwrap().get(), 24);
        assert_eq!(FretNumber::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_assignment_statistics() {
        let c_major = FretAssignment::from_i32s([-1, 3, 2, 0, 1, 0]).unwrap();
        assert_eq!(c_major.min_fretted(), Some(1));
        assert_eq!(c_major.max_fretted(), Some(3));
        assert_eq!(c_major.span(), 2);
        assert_eq!(c_major.sounding_count(), 5);
        assert_eq!(c_major.muted_count(), 1);
        assert_eq!(c_major.open_count(), 2);
        assert_eq!(c_major.fretted().collect::<Vec<_>>(), vec![(1, 3), (2, 2), (4, 1)]);

        let all_open = FretAssignment::from_i32s([0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(all_open.span(), 0);
        assert_eq!(all_open.min_fretted(), None);
    }

    #[test]
    fn test_display() {
        let c_major = FretAssignment::from_i32s([-1, 3, 2, 0, 1, 0]).unwrap();
        assert_eq!(c_major.to_string(), "x32010");
        let high = FretAssignment::from_i32s([-1, 12, 14, 14, 13, 12]).unwrap();
        assert_eq!(high.to_string(), "x-12-14-14-13-12");
    }

    #[test]
    fn test_json_form() {
        let shape = FretAssignment::from_i32s([0, 2, 2, 0, 0, -1]).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "[0,2,2,0,0,-1]");
        let back: FretAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
        assert!(serde_json::from_str::<FretAssignment>("[0,2,2,0,0,-5]").is_err());
    }
}
