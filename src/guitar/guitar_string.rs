// guitar_string.rs

use crate::guitar::fret::{Fret, MAX_FRET};
use crate::guitar::music_note::{PitchClass, ToneSet};

/// 标准调弦的空弦 MIDI 音高，从低音 E 弦到高音 e 弦：E2 A2 D3 G3 B3 E4
pub const STANDARD_TUNING_MIDI: [u8; 6] = [40, 45, 50, 55, 59, 64];

/// Represents one string of the guitar by its open pitch.
///
/// Params:
/// - open_midi: MIDI pitch of the open string. 空弦音高
#[derive(Debug, Clone)]
pub struct GuitarString {
    open_midi: u8,
}

impl GuitarString {
    /// Creates a new GuitarString instance.
    pub fn new(open_midi: u8) -> Self {
        GuitarString { open_midi }
    }

    /// 某个按法在这根弦上发出的 MIDI 音高，静音弦为 None
    pub fn midi_at(&self, fret: Fret) -> Option<u8> {
        fret.position().map(|n| self.open_midi + n)
    }

    /// 某个按法在这根弦上的音级
    pub fn pitch_class_at(&self, fret: Fret) -> Option<PitchClass> {
        self.midi_at(fret).map(PitchClass::from_midi)
    }

    /// Every fret in `[0, max_fret]` whose pitch class belongs to the chord.
    ///
    /// 升序返回，这样搜索时会先尝试低把位。`max_fret` 超过指板时按指板截断
    pub fn candidate_frets(&self, tones: &ToneSet, max_fret: u8) -> Vec<Fret> {
        (0..=max_fret.min(MAX_FRET))
            .filter_map(|position| Fret::at(position).ok())
            .filter(|&fret| {
                self.pitch_class_at(fret)
                    .is_some_and(|pitch_class| tones.contains(pitch_class))
            })
            .collect()
    }

    /// 可以作为可移动把位根音的品格，空弦不算（把位和弦的根音总是要按下去的）
    pub fn root_frets(&self, root: PitchClass, max_fret: u8) -> Vec<u8> {
        let open_chroma = PitchClass::from_midi(self.open_midi);
        let first = (root.value() as i32 - open_chroma.value() as i32).rem_euclid(12) as u8;
        (first..=max_fret.min(MAX_FRET))
            .step_by(12)
            .filter(|&fret| fret > 0)
            .collect()
    }
}

/// Creates the six strings of a standard-tuned guitar, low E first.
pub fn create_standard_strings() -> Vec<GuitarString> {
    STANDARD_TUNING_MIDI
        .iter()
        .map(|&open_midi| GuitarString::new(open_midi))
        .collect()
}
