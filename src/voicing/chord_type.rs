use crate::voicing::caged::{CagedFamily, match_template};
use crate::voicing::chord_position::ChordPosition;

/// 开放和弦最低按弦品格的上限
const OPEN_POSITION_MAX_FRET: u8 = 3;

/// 和弦形状的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTypeInfo {
    pub family: Option<CagedFamily>,
    pub is_open: bool,
    pub is_barre: bool,
    pub has_open_strings: bool,
}

/// 开放、封闭，或者两者之间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Openness {
    Open,
    Closed,
    PartiallyOpen,
}

impl Openness {
    pub fn label(self) -> &'static str {
        match self {
            Openness::Open => "开放",
            Openness::Closed => "封闭",
            Openness::PartiallyOpen => "半开放",
        }
    }
}

impl ChordTypeInfo {
    pub fn openness(&self) -> Openness {
        if self.is_open {
            Openness::Open
        } else if self.has_open_strings {
            Openness::PartiallyOpen
        } else {
            Openness::Closed
        }
    }

    /// 例如 ["C型", "开放"]；匹配不到模板时只有开放程度
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::with_capacity(2);
        if let Some(family) = self.family {
            labels.push(family.label());
        }
        labels.push(self.openness().label());
        labels
    }
}

pub fn detect_chord_type(position: &ChordPosition) -> ChordTypeInfo {
    let frets = position.frets();
    let has_open_strings = frets.open_count() > 0;
    let is_barre = !position.barres().is_empty();
    let low_position = frets
        .min_fretted()
        .is_none_or(|fret| fret <= OPEN_POSITION_MAX_FRET);

    ChordTypeInfo {
        family: match_template(&frets).map(|(family, _)| family),
        is_open: has_open_strings && low_position && !is_barre,
        is_barre,
        has_open_strings,
    }
}
