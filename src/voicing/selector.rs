// selector.rs
use log::{debug, warn};
use std::collections::HashSet;

use crate::config::{PickOptions, VoicingConfig};
use crate::guitar::guitar_chord::{ChordQuality, ChordToneResolver, StandardChordResolver};
use crate::utils::stratified_pick::{Quota, stratified_top_k};
use crate::voicing::caged::generate_template_shapes;
use crate::voicing::chord_position::ChordPosition;
use crate::voicing::open_chords::open_chords_for;
use crate::voicing::score::{CandidateSource, PracticalityScorer};
use crate::voicing::search::generate_with;

/// 把位分区：低把位 (≤4)、中把位 (5–8)、高把位 (≥9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeckBucket {
    Low,
    Mid,
    High,
}

impl NeckBucket {
    pub fn of(position: &ChordPosition) -> Self {
        match position.max_fretted() {
            0..=4 => NeckBucket::Low,
            5..=8 => NeckBucket::Mid,
            _ => NeckBucket::High,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// 低、中、高三个把位的配额
const NECK_QUOTAS: [Quota; 3] = [Quota::new(0.4, 3), Quota::new(0.3, 2), Quota::new(0.2, 1)];

struct ScoredPosition {
    position: ChordPosition,
    score: f64,
}

/// Picks a short, neck-diverse list of practical voicings.
///
/// `known` are positions the caller already has (for example from a chord
/// library), `generated` is usually the output of
/// [`generate_guitar_voicings`](crate::voicing::search::generate_guitar_voicings).
/// Curated open chords and template shapes are added internally.
pub fn pick_practical_voicings(
    key: &str,
    quality: &str,
    known: &[ChordPosition],
    generated: &[ChordPosition],
    options: &PickOptions,
) -> Vec<ChordPosition> {
    let config = VoicingConfig {
        pick: *options,
        ..VoicingConfig::default()
    };
    pick_with(&StandardChordResolver, key, quality, known, generated, &config)
}

pub fn pick_with<R: ChordToneResolver>(
    resolver: &R,
    key: &str,
    quality: &str,
    known: &[ChordPosition],
    generated: &[ChordPosition],
    config: &VoicingConfig,
) -> Vec<ChordPosition> {
    let options = config.pick.normalized();
    let limit = options.limit as usize;

    let chord = match resolver.resolve(key, quality) {
        Some(chord) if !chord.tones.is_empty() => chord,
        _ => {
            // 解析不了的和弦只能用外部给的按法
            warn!("无法解析和弦 {}{}，返回已知的 {} 个按法", key, quality, known.len());
            return known.iter().take(limit).cloned().collect();
        }
    };

    let scorer = PracticalityScorer::for_chord(chord, &config.weights);
    let mut scored = Vec::new();
    let mut push = |position: ChordPosition, source: CandidateSource| {
        if let Some(score) = scorer.score(&position.frets()) {
            scored.push(ScoredPosition {
                position,
                score: score + config.bias.for_source(source),
            });
        }
    };

    // 自定义解析器可能认识内置词表以外的性质，这时只用外部按法
    let chord_quality = ChordQuality::from_token(quality);

    if let Some(chord_quality) = chord_quality {
        for frets in open_chords_for(chord.root, chord_quality) {
            push(ChordPosition::from_frets(*frets), CandidateSource::Curated);
        }
    }
    for position in known.iter().chain(generated) {
        push(position.clone(), CandidateSource::External);
    }
    if let Some(chord_quality) = chord_quality {
        for shape in generate_template_shapes(chord.root, chord_quality, options.max_fret as u8) {
            push(ChordPosition::from_frets(shape.frets), CandidateSource::Template);
        }
    }

    // 稳定排序，同分时保持 开放和弦、外部、模板 的顺序
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut seen = HashSet::new();
    let pool: Vec<ChordPosition> = scored
        .into_iter()
        .filter(|candidate| seen.insert(candidate.position.frets()))
        .map(|candidate| candidate.position)
        .collect();

    let mut bucket_sizes = [0usize; 3];
    for position in &pool {
        bucket_sizes[NeckBucket::of(position).index()] += 1;
    }
    debug!(
        "{}{}: 候选 {} 个，低/中/高把位 {:?}",
        key,
        quality,
        pool.len(),
        bucket_sizes
    );

    stratified_top_k(pool, |position| NeckBucket::of(position).index(), &NECK_QUOTAS, limit)
}

/// 完整流程：先搜索，再把搜索结果交给挑选
pub fn find_voicings(key: &str, quality: &str, config: &VoicingConfig) -> Vec<ChordPosition> {
    find_voicings_with(&StandardChordResolver, key, quality, config)
}

pub fn find_voicings_with<R: ChordToneResolver>(
    resolver: &R,
    key: &str,
    quality: &str,
    config: &VoicingConfig,
) -> Vec<ChordPosition> {
    let generated = generate_with(resolver, key, quality, &config.generate, &config.weights);
    pick_with(resolver, key, quality, &[], &generated, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerateOptions;
    use crate::guitar::fret::FretAssignment;
    use crate::guitar::guitar_chord::ChordTones;
    use crate::guitar::music_note::PitchClass;
    use crate::voicing::search::generate_guitar_voicings;

    fn frets(values: [i32; 6]) -> FretAssignment {
        FretAssignment::from_i32s(values).unwrap()
    }

    fn position(values: [i32; 6]) -> ChordPosition {
        ChordPosition::from_frets(frets(values))
    }

    fn bucket_count(positions: &[ChordPosition]) -> usize {
        positions
            .iter()
            .map(NeckBucket::of)
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_c_major_open_shape_leads() {
        let generated = generate_guitar_voicings("C", "major", &GenerateOptions::default());
        let picked =
            pick_practical_voicings("C", "major", &[], &generated, &PickOptions::default());

        assert_eq!(picked.len(), 10);
        assert_eq!(picked[0].frets(), frets([-1, 3, 2, 0, 1, 0]));
        let open_index = picked
            .iter()
            .position(|p| p.frets() == frets([-1, 3, 2, 0, 1, 0]))
            .unwrap();
        for (index, position) in picked.iter().enumerate() {
            if position.max_fretted() > 9 {
                assert!(index > open_index);
            }
        }
    }

    #[test]
    fn test_c_major_without_external_candidates() {
        let picked = pick_practical_voicings("C", "major", &[], &[], &PickOptions::default());
        // 3 个开放和弦 + 7 个模板，其中 x32010 重复
        assert_eq!(picked.len(), 9);
        assert_eq!(picked[0].frets(), frets([-1, 3, 2, 0, 1, 0]));
        assert_eq!(picked[1].frets(), frets([-1, 3, 2, 0, 1, 3]));
        assert_eq!(picked[2].frets(), frets([0, 3, 2, 0, 1, 0]));
        assert_eq!(bucket_count(&picked), 3);
    }

    #[test]
    fn test_e_minor_open_shape_in_top_three() {
        let generate = GenerateOptions {
            max_fret: 15,
            ..GenerateOptions::default()
        };
        let generated = generate_guitar_voicings("E", "minor", &generate);
        let options = PickOptions {
            limit: 10,
            max_fret: 15,
        };
        let picked = pick_practical_voicings("E", "minor", &[], &generated, &options);
        let open_em = frets([0, 2, 2, 0, 0, 0]);
        assert!(picked.iter().take(3).any(|p| p.frets() == open_em));
    }

    #[test]
    fn test_size_and_spread_without_external_candidates() {
        let options = PickOptions::default();
        for (key, quality) in [("C", "major"), ("Bb", "m7"), ("G", "7"), ("A", "minor"), ("F#", "sus4")] {
            let picked = pick_practical_voicings(key, quality, &[], &[], &options);
            assert!(picked.len() >= 5, "{}{} 只有 {} 个", key, quality, picked.len());
            assert!(picked.len() <= 10);
            assert!(bucket_count(&picked) > 1, "{}{}", key, quality);
        }
        assert_eq!(pick_practical_voicings("Bb", "m7", &[], &[], &options).len(), 7);
    }

    #[test]
    fn test_no_duplicate_patterns() {
        let generated = generate_guitar_voicings("G", "major", &GenerateOptions::default());
        // 外部按法与开放和弦表重复
        let known = vec![position([3, 2, 0, 0, 0, 3]), position([3, 2, 0, 0, 0, 3])];
        let picked =
            pick_practical_voicings("G", "major", &known, &generated, &PickOptions::default());
        let unique: HashSet<FretAssignment> = picked.iter().map(|p| p.frets()).collect();
        assert_eq!(unique.len(), picked.len());
    }

    #[test]
    fn test_deterministic_selection() {
        let config = VoicingConfig::default();
        let first = find_voicings("D", "7", &config);
        let second = find_voicings("D", "7", &config);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_foreign_tones_are_rejected() {
        // D 和弦不属于 C 大三和弦
        let known = vec![position([-1, -1, 0, 2, 3, 2])];
        let picked = pick_practical_voicings("C", "major", &known, &[], &PickOptions::default());
        assert!(!picked.iter().any(|p| p.frets() == known[0].frets()));
    }

    #[test]
    fn test_known_positions_from_json_are_checked() {
        let json = r#"[
            { "frets": [-1, -1, 5, 5, 5, 8], "fingers": [0, 0, 1, 1, 1, 2],
              "base_fret": 5, "barres": [5], "midi_notes": [55, 60, 64, 72] }
        ]"#;
        let known: Vec<ChordPosition> = serde_json::from_str(json).unwrap();
        let picked = pick_practical_voicings("C", "major", &known, &[], &PickOptions::default());
        assert!(picked.contains(&known[0]));

        // 指法、起始品格、横按和音高都与品格对不上
        let broken = r#"[
            { "frets": [-1, -1, 5, 5, 5, 8], "fingers": [1, 1, 1, 1, 1, 1],
              "base_fret": 9, "barres": [3], "midi_notes": [99, 1] }
        ]"#;
        assert!(serde_json::from_str::<Vec<ChordPosition>>(broken).is_err());

        let guitar = crate::guitar::guitar_instance::Guitar::standard();
        for position in &picked {
            let frets = position.frets();
            for (fret, finger) in frets.frets().iter().zip(position.fingers()) {
                assert_eq!(fret.fretted().is_none(), finger == 0, "{}", frets);
            }
            assert!(crate::hand::left_hand::verify_barres(&frets, position.barres()));
            assert!(position.midi_notes().windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(position.midi_notes(), guitar.midi_notes(&frets).as_slice());
        }
    }

    #[test]
    fn test_unresolved_chord_falls_back_to_known() {
        let known: Vec<ChordPosition> = (1..=5)
            .map(|fret| position([-1, fret, fret + 2, fret + 2, fret + 2, fret]))
            .collect();
        let options = PickOptions {
            limit: 3,
            ..PickOptions::default()
        };
        let picked = pick_practical_voicings("C", "lydian", &known, &[], &options);
        assert_eq!(picked, known[..3].to_vec());
        assert!(pick_practical_voicings("H", "major", &[], &[], &options).is_empty());
    }

    #[test]
    fn test_quality_without_templates_uses_external_only() {
        let generated = generate_guitar_voicings("C", "9", &GenerateOptions::default());
        let picked = pick_practical_voicings("C", "9", &[], &generated, &PickOptions::default());
        assert!(!picked.is_empty());
        assert!(picked.iter().all(|p| generated.contains(p)));
    }

    #[test]
    fn test_custom_resolver() {
        /// 只认识 "E" 和 "power"
        struct PowerOnly;

        impl ChordToneResolver for PowerOnly {
            fn resolve(&self, key: &str, quality: &str) -> Option<ChordTones> {
                if key != "E" || quality != "power" {
                    return None;
                }
                let root = PitchClass::parse(key).ok()?;
                Some(ChordTones::new(root, ChordQuality::Power))
            }
        }

        let config = VoicingConfig::default();
        let picked = find_voicings_with(&PowerOnly, "E", "power", &config);
        assert_eq!(picked[0].frets(), frets([0, 2, 2, -1, -1, -1]));
        assert!(find_voicings_with(&PowerOnly, "E", "major", &config).is_empty());
    }

    #[test]
    fn test_neck_buckets() {
        assert_eq!(NeckBucket::of(&position([0, 2, 2, 0, 0, 0])), NeckBucket::Low);
        assert_eq!(NeckBucket::of(&position([-1, 5, 7, 7, 7, 5])), NeckBucket::Mid);
        assert_eq!(NeckBucket::of(&position([8, 10, 10, 9, 8, 8])), NeckBucket::High);
        assert_eq!(NeckBucket::of(&position([0, 0, 0, 0, 0, 0])), NeckBucket::Low);
    }
}
