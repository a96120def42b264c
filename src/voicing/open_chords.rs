// ============================================================
// 常见开放和弦数据库
// 这些是经过实践验证的经典开放和弦指法
// ============================================================

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::guitar::fret::FretAssignment;
use crate::guitar::guitar_chord::ChordQuality;
use crate::guitar::music_note::PitchClass;

use ChordQuality::*;

const X: i32 = -1;

/// (根音, 和弦性质, 品格)，品格从低音 E 弦开始，-1 为静音
const OPEN_CHORDS: &[(&str, ChordQuality, [i32; 6])] = &[
    // === C 系列 ===
    ("C", Major, [X, 3, 2, 0, 1, 0]), // 经典 C
    ("C", Major, [0, 3, 2, 0, 1, 0]), // C 带低音 E
    ("C", Major, [X, 3, 2, 0, 1, 3]),
    ("C", Minor, [X, 3, 1, 0, 1, 3]),
    ("C", Dominant7, [X, 3, 2, 3, 1, 0]),
    ("C", Major7, [X, 3, 2, 0, 0, 0]),
    ("C", Minor7, [X, 3, 1, 3, 1, 3]),
    ("C", Sus4, [X, 3, 3, 0, 1, 1]),
    ("C", Sus2, [X, 3, 0, 0, 3, 3]),
    ("C", Sixth, [X, 3, 2, 2, 1, 0]),
    ("C", Augmented, [X, 3, 2, 1, 1, 0]),
    ("C", Diminished, [X, 3, 1, X, 1, 2]),
    // === D 系列 ===
    ("D", Major, [X, X, 0, 2, 3, 2]), // 经典 D
    ("D", Major, [X, 0, 0, 2, 3, 2]), // D 带低音 A
    ("D", Minor, [X, X, 0, 2, 3, 1]),
    ("D", Minor, [X, 0, 0, 2, 3, 1]),
    ("D", Dominant7, [X, X, 0, 2, 1, 2]),
    ("D", Major7, [X, X, 0, 2, 2, 2]),
    ("D", Minor7, [X, X, 0, 2, 1, 1]),
    ("D", Sus4, [X, X, 0, 2, 3, 3]),
    ("D", Sus2, [X, X, 0, 2, 3, 0]),
    ("D", Sixth, [X, X, 0, 2, 0, 2]),
    ("D", Augmented, [X, X, 0, 3, 3, 2]),
    ("D", Diminished, [X, X, 0, 1, 3, 1]),
    // === E 系列 ===
    ("E", Major, [0, 2, 2, 1, 0, 0]),
    ("E", Minor, [0, 2, 2, 0, 0, 0]),
    ("E", Dominant7, [0, 2, 0, 1, 0, 0]),
    ("E", Dominant7, [0, 2, 2, 1, 3, 0]),
    ("E", Major7, [0, 2, 1, 1, 0, 0]),
    ("E", Minor7, [0, 2, 0, 0, 0, 0]),
    ("E", Minor7, [0, 2, 2, 0, 3, 0]),
    ("E", Sus4, [0, 2, 2, 2, 0, 0]),
    ("E", Sus2, [0, 2, 4, 4, 0, 0]),
    ("E", Power, [0, 2, 2, X, X, X]),
    ("E", Sixth, [0, 2, 2, 1, 2, 0]),
    ("E", Augmented, [0, 3, 2, 1, 1, 0]),
    ("E", Diminished, [X, X, 2, 3, 5, 3]),
    // === F 系列（半开放/易用形式）===
    ("F", Major, [X, X, 3, 2, 1, 1]), // F (简化版)
    ("F", Major, [1, X, 3, 2, 1, 1]),
    ("F", Minor, [X, X, 3, 1, 1, 1]),
    ("F", Dominant7, [X, X, 3, 5, 4, 5]),
    ("F", Major7, [X, X, 3, 2, 1, 0]),
    ("F", Minor7, [X, X, 3, 1, 1, 1]),
    ("F", Sus4, [X, X, 3, 3, 1, 1]),
    ("F", Sus2, [X, X, 3, 0, 1, 1]),
    // === G 系列 ===
    ("G", Major, [3, 2, 0, 0, 0, 3]), // 经典 G
    ("G", Major, [3, 2, 0, 0, 3, 3]),
    ("G", Major, [3, X, 0, 0, 0, 3]),
    ("G", Minor, [3, 1, 0, 0, 3, 3]),
    ("G", Dominant7, [3, 2, 0, 0, 0, 1]),
    ("G", Dominant7, [1, 2, 0, 0, 0, 1]),
    ("G", Major7, [3, 2, 0, 0, 0, 2]),
    ("G", Minor7, [X, 1, 0, 0, 3, 3]),
    ("G", Sus4, [3, 3, 0, 0, 1, 3]),
    ("G", Sus2, [3, 0, 0, 0, 3, 3]),
    ("G", Power, [3, 5, 5, X, X, X]),
    ("G", Sixth, [3, 2, 0, 0, 0, 0]),
    ("G", Augmented, [3, 2, 1, 0, 0, 3]),
    ("G", Diminished, [X, X, 5, 3, 2, 3]),
    // === A 系列 ===
    ("A", Major, [X, 0, 2, 2, 2, 0]),
    ("A", Major, [0, 0, 2, 2, 2, 0]),
    ("A", Minor, [X, 0, 2, 2, 1, 0]),
    ("A", Minor, [0, 0, 2, 2, 1, 0]),
    ("A", Dominant7, [X, 0, 2, 0, 2, 0]),
    ("A", Dominant7, [X, 0, 2, 2, 2, 3]),
    ("A", Major7, [X, 0, 2, 1, 2, 0]),
    ("A", Minor7, [X, 0, 2, 0, 1, 0]),
    ("A", Minor7, [X, 0, 2, 2, 1, 3]),
    ("A", Sus4, [X, 0, 2, 2, 3, 0]),
    ("A", Sus2, [X, 0, 2, 2, 0, 0]),
    ("A", Power, [X, 0, 2, 2, X, X]),
    ("A", Sixth, [X, 0, 2, 2, 2, 2]),
    ("A", Augmented, [X, 0, 3, 2, 2, 1]),
    ("A", Diminished, [X, 0, 1, 2, 1, X]),
    // === B 系列 (多为半封闭) ===
    ("B", Major, [X, 2, 4, 4, 4, 2]),
    ("B", Minor, [X, 2, 4, 4, 3, 2]),
    ("B", Dominant7, [X, 2, 1, 2, 0, 2]), // 开放型
    ("B", Dominant7, [X, 2, 4, 2, 4, 2]),
    ("B", Major7, [X, 2, 4, 3, 4, 2]),
    ("B", Minor7, [X, 2, 0, 2, 0, 2]),
    ("B", Minor7, [X, 2, 4, 2, 3, 2]),
    ("B", Sus4, [X, 2, 4, 4, 5, 2]),
    ("B", Sus2, [X, 2, 4, 4, 2, 2]),
    // === Bb/A# 系列 ===
    ("Bb", Major, [X, 1, 3, 3, 3, 1]),
    ("Bb", Minor, [X, 1, 3, 3, 2, 1]),
    ("Bb", Dominant7, [X, 1, 3, 1, 3, 1]),
    ("Bb", Major7, [X, 1, 3, 2, 3, 1]),
    ("Bb", Minor7, [X, 1, 3, 1, 2, 1]),
    // === Eb/D# 系列 ===
    ("Eb", Major, [X, X, 1, 3, 4, 3]), // D型
    ("Eb", Minor, [X, X, 1, 3, 4, 2]),
    ("Eb", Dominant7, [X, X, 1, 3, 2, 3]),
    ("Eb", Major7, [X, X, 1, 3, 3, 3]),
    ("Eb", Minor7, [X, X, 1, 3, 2, 2]),
    // === Ab/G# 系列 ===
    ("Ab", Major, [4, 6, 6, 5, 4, 4]), // E型横按
    ("Ab", Minor, [4, 6, 6, 4, 4, 4]),
    ("Ab", Dominant7, [4, 6, 4, 5, 4, 4]),
    ("Ab", Major7, [4, 6, 5, 5, 4, 4]),
    ("Ab", Minor7, [4, 6, 4, 4, 4, 4]),
    // === C#/Db 系列 ===
    ("C#", Major, [X, 4, 6, 6, 6, 4]), // A型横按
    ("C#", Minor, [X, 4, 6, 6, 5, 4]),
    ("C#", Dominant7, [X, 4, 6, 4, 6, 4]),
    ("C#", Major7, [X, 4, 6, 5, 6, 4]),
    ("C#", Minor7, [X, 4, 6, 4, 5, 4]),
    // === F#/Gb 系列 ===
    ("F#", Major, [2, 4, 4, 3, 2, 2]),
    ("F#", Minor, [2, 4, 4, 2, 2, 2]),
    ("F#", Dominant7, [2, 4, 2, 3, 2, 2]),
    ("F#", Major7, [2, 4, 3, 3, 2, 2]),
    ("F#", Minor7, [2, 4, 2, 2, 2, 2]),
    ("F#", Sus4, [2, 4, 4, 4, 2, 2]),
    ("F#", Sus2, [2, 4, 4, 1, 2, 2]),
];

lazy_static! {
    /// 以 (音级, 和弦性质) 为键，等音写法在这里被统一
    static ref OPEN_CHORD_TABLE: HashMap<(PitchClass, ChordQuality), Vec<FretAssignment>> = {
        let mut table: HashMap<(PitchClass, ChordQuality), Vec<FretAssignment>> = HashMap::new();
        for (key, quality, frets) in OPEN_CHORDS {
            let root = PitchClass::parse(key).expect("开放和弦表里的音名有误");
            let frets = FretAssignment::from_i32s(*frets).expect("开放和弦表里的品格有误");
            table.entry((root, *quality)).or_default().push(frets);
        }
        table
    };
}

/// 获取特定根音与和弦性质的开放和弦
pub fn open_chords_for(root: PitchClass, quality: ChordQuality) -> &'static [FretAssignment] {
    OPEN_CHORD_TABLE
        .get(&(root, quality))
        .map(|shapes| shapes.as_slice())
        .unwrap_or(&[])
}
