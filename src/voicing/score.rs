// score.rs
use serde::{Deserialize, Serialize};

use crate::guitar::fret::FretAssignment;
use crate::guitar::guitar_chord::ChordTones;
use crate::guitar::guitar_instance::Guitar;
use crate::guitar::music_note::PitchClass;

/// Weights of the practicality cost. Lower total cost = easier, more idiomatic.
///
/// 这些数值是手工调出来的，改动会直接影响排序结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// 每一品跨度
    pub span: f64,
    /// 发声弦之间夹着静音弦的次数
    pub gap: f64,
    /// 每根静音弦
    pub muted: f64,
    /// 按弦的平均品格
    pub avg_fret: f64,
    /// 按弦的最高品格
    pub max_fret: f64,
    pub high_position_threshold: u8,
    pub high_position_penalty: f64,
    pub very_high_position_threshold: u8,
    pub very_high_position_penalty: f64,
    /// 低音不是根音
    pub non_root_bass: f64,
    /// 每根空弦（负数为奖励）
    pub open_string: f64,
    /// 横按形状（负数为奖励）
    pub barre_like: f64,
    pub barre_like_min_strings: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            span: 10.0,
            gap: 12.0,
            muted: 10.0,
            avg_fret: 1.2,
            max_fret: 0.6,
            high_position_threshold: 7,
            high_position_penalty: 14.0,
            very_high_position_threshold: 10,
            very_high_position_penalty: 28.0,
            non_root_bass: 18.0,
            open_string: -2.0,
            barre_like: -10.0,
            barre_like_min_strings: 3,
        }
    }
}

/// 候选按法的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// 手工整理的开放和弦
    Curated,
    /// CAGED 模板生成
    Template,
    /// 外部传入或搜索得到
    External,
}

/// Score offset per candidate source, added after the feasibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceBias {
    pub curated: f64,
    pub template: f64,
    pub external: f64,
}

impl Default for SourceBias {
    fn default() -> Self {
        SourceBias {
            curated: -15.0,
            template: -8.0,
            external: 0.0,
        }
    }
}

impl SourceBias {
    pub fn for_source(&self, source: CandidateSource) -> f64 {
        match source {
            CandidateSource::Curated => self.curated,
            CandidateSource::Template => self.template,
            CandidateSource::External => self.external,
        }
    }
}

/// Pure practicality cost over a fret assignment for one chord.
pub struct PracticalityScorer<'a> {
    guitar: Guitar,
    chord: ChordTones,
    min_sounding_strings: usize,
    weights: &'a ScoreWeights,
}

impl<'a> PracticalityScorer<'a> {
    pub fn new(chord: ChordTones, min_sounding_strings: usize, weights: &'a ScoreWeights) -> Self {
        PracticalityScorer {
            guitar: Guitar::standard(),
            chord,
            min_sounding_strings,
            weights,
        }
    }

    /// 用和弦默认的最少发声弦数
    pub fn for_chord(chord: ChordTones, weights: &'a ScoreWeights) -> Self {
        Self::new(chord, chord.min_sounding_strings(), weights)
    }

    pub fn min_sounding_strings(&self) -> usize {
        self.min_sounding_strings
    }

    /// 可演奏时返回代价，不可演奏时返回 None
    pub fn score(&self, frets: &FretAssignment) -> Option<f64> {
        if !self.is_feasible(frets) {
            return None;
        }

        let weights = self.weights;
        let fretted: Vec<u8> = frets.fretted().map(|(_, fret)| fret).collect();
        let span = frets.span() as f64;
        let gaps = count_gaps(frets) as f64;
        let muted = frets.muted_count() as f64;
        let opens = frets.open_count();
        let avg_fret = if fretted.is_empty() {
            0.0
        } else {
            fretted.iter().map(|&f| f as f64).sum::<f64>() / fretted.len() as f64
        };
        let max_fret = frets.max_fretted().unwrap_or(0);

        let bass_is_root = self
            .guitar
            .bass_note(frets)
            .map(PitchClass::from_midi)
            .is_some_and(|bass| bass == self.chord.root);

        let mut score = span * weights.span
            + gaps * weights.gap
            + muted * weights.muted
            + avg_fret * weights.avg_fret
            + max_fret as f64 * weights.max_fret
            + opens as f64 * weights.open_string;

        if max_fret > weights.high_position_threshold {
            score += weights.high_position_penalty;
        }
        if max_fret > weights.very_high_position_threshold {
            score += weights.very_high_position_penalty;
        }
        if !bass_is_root {
            score += weights.non_root_bass;
        }
        if is_barre_like(frets, weights.barre_like_min_strings) {
            score += weights.barre_like;
        }

        Some(score)
    }

    /// 硬性条件：发声弦数够、有根音、和弦音缺得不多、没有和弦外音
    pub fn is_feasible(&self, frets: &FretAssignment) -> bool {
        if frets.sounding_count() < self.min_sounding_strings {
            return false;
        }

        let used = self.guitar.sounding_tones(frets);
        if !used.contains(self.chord.root) {
            return false;
        }
        if !used.is_subset(&self.chord.tones) {
            return false;
        }

        // 四音及以上的和弦允许省略一个音，三和弦和强力和弦必须完整
        let missing = self.chord.tones.count_missing_from(&used);
        let allowed_missing = if self.chord.tones.len() >= 4 { 1 } else { 0 };
        missing <= allowed_missing
    }
}

/// 发声弦被静音弦隔开的次数，比如 “发声、静音、发声” 算一次
pub fn count_gaps(frets: &FretAssignment) -> usize {
    let mut started = false;
    let mut last_was_sounding = false;
    let mut gaps = 0;
    for fret in frets.frets() {
        if fret.is_sounding() {
            if started && !last_was_sounding {
                gaps += 1;
            }
            started = true;
            last_was_sounding = true;
        } else if started {
            last_was_sounding = false;
        }
    }
    gaps
}

/// 横按形状：最低品上有足够多的弦，并且没有空弦
pub fn is_barre_like(frets: &FretAssignment, min_strings: usize) -> bool {
    let Some(min_fret) = frets.min_fretted() else {
        return false;
    };
    let on_min = frets
        .frets()
        .iter()
        .filter(|fret| fret.fretted() == Some(min_fret))
        .count();
    on_min >= min_strings && frets.open_count() == 0
}
