//! CAGED 把位模板
//!
//! Each family is a movable shape anchored on one string. A template gives the
//! fret offset of every string relative to the root fret on that anchor string.

use std::collections::HashSet;

use crate::guitar::fret::{Fret, FretAssignment, MAX_FRET, STRING_COUNT};
use crate::guitar::guitar_chord::ChordQuality;
use crate::guitar::guitar_string::{GuitarString, STANDARD_TUNING_MIDI};
use crate::guitar::music_note::PitchClass;

/// 静音弦
const X: i8 = i8::MAX;

type Template = [i8; STRING_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CagedFamily {
    E,
    A,
    C,
    D,
    G,
    /// 高音 e 弦上的四弦小横按
    TrebleE,
}

impl CagedFamily {
    pub const ALL: [CagedFamily; 6] = [
        CagedFamily::E,
        CagedFamily::A,
        CagedFamily::C,
        CagedFamily::D,
        CagedFamily::G,
        CagedFamily::TrebleE,
    ];

    /// 根音所在的弦
    pub fn root_string(self) -> usize {
        match self {
            CagedFamily::E | CagedFamily::G => 0,
            CagedFamily::A | CagedFamily::C => 1,
            CagedFamily::D => 2,
            CagedFamily::TrebleE => 5,
        }
    }

    /// C型和G型的其它弦在根音品格下方，需要足够的把位空间；
    /// D型从 2 品起，小横按从 3 品起
    pub fn min_root_fret(self) -> u8 {
        match self {
            CagedFamily::C | CagedFamily::G | CagedFamily::TrebleE => 3,
            CagedFamily::D => 2,
            _ => 1,
        }
    }

    /// 根音品格能否放下这个家族的形状；小横按最高到 `max_fret - 2`
    pub fn accepts_root_fret(self, root_fret: u8, max_fret: u8) -> bool {
        if root_fret < self.min_root_fret() {
            return false;
        }
        match self {
            CagedFamily::TrebleE => root_fret as u16 + 2 <= max_fret as u16,
            _ => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CagedFamily::E => "E型",
            CagedFamily::A => "A型",
            CagedFamily::C => "C型",
            CagedFamily::D => "D型",
            CagedFamily::G => "G型",
            CagedFamily::TrebleE => "小横按",
        }
    }

    pub fn template(self, quality: ChordQuality) -> Option<&'static Template> {
        use ChordQuality::*;
        let template: &'static Template = match (self, quality) {
            (CagedFamily::E, Major) => &[0, 2, 2, 1, 0, 0],
            (CagedFamily::E, Minor) => &[0, 2, 2, 0, 0, 0],
            (CagedFamily::E, Dominant7) => &[0, 2, 0, 1, 0, 0],
            (CagedFamily::E, Minor7) => &[0, 2, 0, 0, 0, 0],
            (CagedFamily::E, Major7) => &[0, 2, 1, 1, 0, 0],
            (CagedFamily::E, Sus4) => &[0, 2, 2, 2, 0, 0],
            (CagedFamily::E, Sus2) => &[0, 2, 4, 4, 0, 0],
            (CagedFamily::E, Diminished) => &[0, 1, 2, 0, X, X],
            (CagedFamily::E, Augmented) => &[0, 3, 2, 1, X, X],
            (CagedFamily::E, Power) => &[0, 2, 2, X, X, X],

            (CagedFamily::A, Major) => &[X, 0, 2, 2, 2, 0],
            (CagedFamily::A, Minor) => &[X, 0, 2, 2, 1, 0],
            (CagedFamily::A, Dominant7) => &[X, 0, 2, 0, 2, 0],
            (CagedFamily::A, Minor7) => &[X, 0, 2, 0, 1, 0],
            (CagedFamily::A, Major7) => &[X, 0, 2, 1, 2, 0],
            (CagedFamily::A, Sus4) => &[X, 0, 2, 2, 3, 0],
            (CagedFamily::A, Sus2) => &[X, 0, 2, 2, 0, 0],
            (CagedFamily::A, Diminished) => &[X, 0, 1, 2, 1, X],
            (CagedFamily::A, Augmented) => &[X, 0, 3, 2, 2, X],
            (CagedFamily::A, Power) => &[X, 0, 2, 2, X, X],

            (CagedFamily::C, Major) => &[X, 0, -1, -3, -2, -3],
            (CagedFamily::C, Minor) => &[X, 0, -2, -3, -2, 0],
            (CagedFamily::C, Dominant7) => &[X, 0, -1, 0, -2, -3],
            (CagedFamily::C, Minor7) => &[X, 0, -2, 0, -2, 0],
            (CagedFamily::C, Major7) => &[X, 0, -1, -3, -3, -3],
            (CagedFamily::C, Sus4) => &[X, 0, 0, -3, -2, -2],
            (CagedFamily::C, Sus2) => &[X, 0, -3, -3, 0, 0],
            (CagedFamily::C, Diminished) => &[X, 0, -2, X, -2, -1],
            (CagedFamily::C, Augmented) => &[X, 0, -1, -2, -2, -3],

            (CagedFamily::D, Major) => &[X, X, 0, 2, 3, 2],
            (CagedFamily::D, Minor) => &[X, X, 0, 2, 3, 1],
            (CagedFamily::D, Dominant7) => &[X, X, 0, 2, 1, 2],
            (CagedFamily::D, Minor7) => &[X, X, 0, 2, 1, 1],
            (CagedFamily::D, Major7) => &[X, X, 0, 2, 2, 2],
            (CagedFamily::D, Sus4) => &[X, X, 0, 2, 3, 3],
            (CagedFamily::D, Sus2) => &[X, X, 0, 2, 3, 0],
            (CagedFamily::D, Diminished) => &[X, X, 0, 1, 3, 1],
            (CagedFamily::D, Augmented) => &[X, X, 0, 3, 3, 2],
            (CagedFamily::D, Power) => &[X, X, 0, 2, 3, X],

            (CagedFamily::G, Major) => &[0, -1, -3, -3, -3, 0],
            (CagedFamily::G, Minor) => &[0, -2, -3, -3, 0, 0],
            (CagedFamily::G, Dominant7) => &[0, -1, -3, -3, -3, -2],
            (CagedFamily::G, Minor7) => &[0, -2, -3, -3, 0, -2],
            (CagedFamily::G, Major7) => &[0, -1, -3, -3, -3, -1],
            (CagedFamily::G, Sus4) => &[0, 0, -3, -3, -2, 0],
            (CagedFamily::G, Sus2) => &[0, -3, -3, -3, 0, 0],
            (CagedFamily::G, Augmented) => &[0, -1, -2, -3, -3, 0],

            (CagedFamily::TrebleE, Major) => &[X, X, 2, 1, 0, 0],
            (CagedFamily::TrebleE, Minor) => &[X, X, 2, 0, 0, 0],
            (CagedFamily::TrebleE, Dominant7) => &[X, X, 0, 1, 0, 0],
            (CagedFamily::TrebleE, Minor7) => &[X, X, 0, 0, 0, 0],

            _ => return None,
        };
        Some(template)
    }
}

/// A template instantiated at one root fret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateShape {
    pub family: CagedFamily,
    pub quality: ChordQuality,
    pub root_fret: u8,
    pub frets: FretAssignment,
}

/// 把模板放到某个根音品格上；有弦低于 0 品或高于 `max_fret` 时返回 None
fn instantiate(template: &Template, root_fret: u8, max_fret: u8) -> Option<FretAssignment> {
    let mut frets = [Fret::Muted; STRING_COUNT];
    for (slot, &offset) in frets.iter_mut().zip(template) {
        if offset == X {
            continue;
        }
        let fret = root_fret as i32 + offset as i32;
        if fret < 0 || fret > max_fret as i32 {
            return None;
        }
        *slot = Fret::from_i32(fret).ok()?;
    }
    Some(FretAssignment::new(frets))
}

/// Builds every template shape of `quality` rooted on `root`, up to `max_fret`.
///
/// 按家族顺序输出，按品格模式去重
pub fn generate_template_shapes(
    root: PitchClass,
    quality: ChordQuality,
    max_fret: u8,
) -> Vec<TemplateShape> {
    let mut shapes = Vec::new();
    let mut seen = HashSet::new();

    for family in CagedFamily::ALL {
        let Some(template) = family.template(quality) else {
            continue;
        };
        let anchor = family.root_string();
        let root_string = GuitarString::new(STANDARD_TUNING_MIDI[anchor]);

        for root_fret in root_string.root_frets(root, max_fret) {
            if !family.accepts_root_fret(root_fret, max_fret) {
                continue;
            }
            let Some(frets) = instantiate(template, root_fret, max_fret) else {
                continue;
            };
            if seen.insert(frets) {
                shapes.push(TemplateShape {
                    family,
                    quality,
                    root_fret,
                    frets,
                });
            }
        }
    }

    shapes
}

/// 找出与按法完全一致的模板，包括根音在 0 品的开放形式
pub fn match_template(frets: &FretAssignment) -> Option<(CagedFamily, ChordQuality)> {
    for family in CagedFamily::ALL {
        for quality in ChordQuality::ALL {
            let Some(template) = family.template(quality) else {
                continue;
            };
            let matched = (0..=MAX_FRET)
                .filter_map(|root_fret| instantiate(template, root_fret, MAX_FRET))
                .any(|candidate| candidate == *frets);
            if matched {
                return Some((family, quality));
            }
        }
    }
    None
}
