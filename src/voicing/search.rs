// search.rs
use log::debug;

use crate::config::GenerateOptions;
use crate::guitar::fret::{Fret, FretAssignment, STRING_COUNT};
use crate::guitar::guitar_chord::{ChordToneResolver, ChordTones, StandardChordResolver};
use crate::guitar::guitar_instance::Guitar;
use crate::voicing::chord_position::ChordPosition;
use crate::voicing::score::{PracticalityScorer, ScoreWeights};

/// 一个打过分的按法
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub frets: FretAssignment,
    pub score: f64,
}

/// 回溯搜索的状态
struct FretSearch<'a> {
    candidates: Vec<Vec<Fret>>,
    max_span: u8,
    scorer: PracticalityScorer<'a>,
    current: [Fret; STRING_COUNT],
    results: Vec<ScoredCandidate>,
    pruned: usize,
}

impl FretSearch<'_> {
    /// 每根弦依次决定：静音，或者按某个候选品格
    fn backtrack(&mut self, string_index: usize, min_fret: Option<u8>, max_fret: Option<u8>) {
        if string_index == STRING_COUNT {
            self.push_result();
            return;
        }

        self.current[string_index] = Fret::Muted;
        self.backtrack(string_index + 1, min_fret, max_fret);

        for candidate_index in 0..self.candidates[string_index].len() {
            let candidate = self.candidates[string_index][candidate_index];
            let (next_min, next_max) = match candidate.fretted() {
                // 空弦不计入跨度
                None => (min_fret, max_fret),
                Some(fret) => {
                    let next_min = min_fret.map_or(fret, |m| m.min(fret));
                    let next_max = max_fret.map_or(fret, |m| m.max(fret));
                    if next_max - next_min > self.max_span {
                        self.pruned += 1;
                        continue;
                    }
                    (Some(next_min), Some(next_max))
                }
            };
            self.current[string_index] = candidate;
            self.backtrack(string_index + 1, next_min, next_max);
        }

        self.current[string_index] = Fret::Muted;
    }

    fn push_result(&mut self) {
        let frets = FretAssignment::new(self.current);
        if frets.sounding_count() < self.scorer.min_sounding_strings() {
            return;
        }
        if let Some(score) = self.scorer.score(&frets) {
            self.results.push(ScoredCandidate { frets, score });
        }
    }
}

/// Enumerates every feasible fret assignment for a chord, cheapest first.
///
/// `options` should already be normalized.
pub fn search_fret_assignments(
    chord: &ChordTones,
    options: &GenerateOptions,
    weights: &ScoreWeights,
) -> Vec<ScoredCandidate> {
    if chord.tones.is_empty() {
        return Vec::new();
    }

    let guitar = Guitar::standard();
    let mut search = FretSearch {
        candidates: guitar.candidate_frets(&chord.tones, options.max_fret as u8),
        max_span: options.max_span as u8,
        scorer: PracticalityScorer::for_chord(*chord, weights),
        current: [Fret::Muted; STRING_COUNT],
        results: Vec::new(),
        pruned: 0,
    };
    search.backtrack(0, None, None);

    let FretSearch {
        mut results,
        pruned,
        ..
    } = search;
    debug!(
        "搜索完成: 可用按法 {} 个，跨度剪枝 {} 次",
        results.len(),
        pruned
    );

    // 稳定排序，同分时保持枚举顺序，保证结果可复现
    results.sort_by(|a, b| a.score.total_cmp(&b.score));
    results.truncate(options.max_results as usize);
    results
}

/// Generates raw voicings for `key` + `quality` with the built-in resolver and
/// default weights. Unsupported chords yield an empty list.
pub fn generate_guitar_voicings(
    key: &str,
    quality: &str,
    options: &GenerateOptions,
) -> Vec<ChordPosition> {
    generate_with(
        &StandardChordResolver,
        key,
        quality,
        options,
        &ScoreWeights::default(),
    )
}

pub fn generate_with<R: ChordToneResolver>(
    resolver: &R,
    key: &str,
    quality: &str,
    options: &GenerateOptions,
    weights: &ScoreWeights,
) -> Vec<ChordPosition> {
    let Some(chord) = resolver.resolve(key, quality) else {
        debug!("无法解析和弦 {}{}", key, quality);
        return Vec::new();
    };

    search_fret_assignments(&chord, &options.normalized(), weights)
        .into_iter()
        .map(|candidate| ChordPosition::from_frets(candidate.frets))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::guitar_chord::ChordQuality;
    use crate::guitar::music_note::{CANONICAL_KEYS, PitchClass};

    fn frets(values: [i32; 6]) -> FretAssignment {
        FretAssignment::from_i32s(values).unwrap()
    }

    #[test]
    fn test_open_c_major_ranks_first() {
        let voicings = generate_guitar_voicings("C", "major", &GenerateOptions::default());
        assert_eq!(voicings.len(), 30);
        assert_eq!(voicings[0].frets(), frets([-1, 3, 2, 0, 1, 0]));
    }

    #[test]
    fn test_results_sorted_by_score() {
        let chord = StandardChordResolver.resolve("G", "7").unwrap();
        let results = search_fret_assignments(
            &chord,
            &GenerateOptions::default(),
            &ScoreWeights::default(),
        );
        assert!(!results.is_empty());
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_unsupported_chord_is_empty() {
        let options = GenerateOptions::default();
        assert!(generate_guitar_voicings("H", "major", &options).is_empty());
        assert!(generate_guitar_voicings("C", "lydian", &options).is_empty());
    }

    #[test]
    fn test_span_and_fret_bounds() {
        let options = GenerateOptions {
            max_fret: 9,
            max_span: 3,
            max_results: 200,
        };
        for voicing in generate_guitar_voicings("A", "m7", &options) {
            assert!(voicing.frets().span() <= 3, "{}", voicing.frets());
            assert!(voicing.frets().max_fretted().unwrap_or(0) <= 9);
        }
    }

    #[test]
    fn test_malformed_options_are_clamped() {
        let bad = GenerateOptions {
            max_fret: -4,
            max_span: -2,
            max_results: -1,
        };
        assert_eq!(
            generate_guitar_voicings("D", "major", &bad),
            generate_guitar_voicings("D", "major", &GenerateOptions::default())
        );
    }

    #[test]
    fn test_deterministic_output() {
        let options = GenerateOptions::default();
        let first = generate_guitar_voicings("F#", "minor", &options);
        let second = generate_guitar_voicings("F#", "minor", &options);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_every_voicing_covers_the_chord() {
        let guitar = Guitar::standard();
        let options = GenerateOptions::default();
        for key in CANONICAL_KEYS {
            for quality in [
                ChordQuality::Major,
                ChordQuality::Minor,
                ChordQuality::Power,
                ChordQuality::Dominant7,
                ChordQuality::Sus2,
                ChordQuality::Dominant9,
            ] {
                let chord = StandardChordResolver.resolve(key, quality.token()).unwrap();
                let voicings = generate_guitar_voicings(key, quality.token(), &options);
                let mut seen = std::collections::HashSet::new();
                for voicing in &voicings {
                    let used = guitar.sounding_tones(&voicing.frets());
                    assert!(used.contains(chord.root), "{}{} {}", key, quality, voicing.frets());
                    assert!(used.is_subset(&chord.tones));
                    let allowed = if chord.tones.len() >= 4 { 1 } else { 0 };
                    assert!(chord.tones.count_missing_from(&used) <= allowed);
                    assert!(voicing.frets().span() <= 5);
                    assert!(seen.insert(voicing.frets()), "重复的按法 {}", voicing.frets());
                    for (fret, finger) in voicing.frets().frets().iter().zip(voicing.fingers()) {
                        if fret.fretted().is_none() {
                            assert_eq!(finger, 0);
                        }
                    }
                }
                assert_eq!(PitchClass::parse(key).unwrap(), chord.root);
            }
        }
    }

    #[test]
    fn test_power_chord_allows_two_strings() {
        let voicings = generate_guitar_voicings("A", "5", &GenerateOptions::default());
        assert!(voicings.iter().any(|v| v.frets().sounding_count() == 2));
    }
}
