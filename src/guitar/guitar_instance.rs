// src/guitar/guitar_instance.rs

use crate::guitar::fret::{Fret, FretAssignment};
use crate::guitar::guitar_string::{GuitarString, create_standard_strings};
use crate::guitar::music_note::{PitchClass, ToneSet};

#[derive(Debug, Clone)]
pub struct Guitar {
    pub guitar_strings: Vec<GuitarString>,
}

impl Guitar {
    /// 标准调弦的六弦吉他
    pub fn standard() -> Self {
        Guitar {
            guitar_strings: create_standard_strings(),
        }
    }

    /// 每根弦的候选品格，下标是弦索引
    pub fn candidate_frets(&self, tones: &ToneSet, max_fret: u8) -> Vec<Vec<Fret>> {
        self.guitar_strings
            .iter()
            .map(|string| string.candidate_frets(tones, max_fret))
            .collect()
    }

    /// 按法实际发出的 MIDI 音高，按弦的顺序（低音弦在前），未去重
    pub fn sounding_midi(&self, frets: &FretAssignment) -> Vec<u8> {
        self.guitar_strings
            .iter()
            .zip(frets.frets())
            .filter_map(|(string, &fret)| string.midi_at(fret))
            .collect()
    }

    /// 升序并去重后的 MIDI 音高，供播放使用
    pub fn midi_notes(&self, frets: &FretAssignment) -> Vec<u8> {
        let mut midi = self.sounding_midi(frets);
        midi.sort_unstable();
        midi.dedup();
        midi
    }

    /// 按法里出现的所有音级
    pub fn sounding_tones(&self, frets: &FretAssignment) -> ToneSet {
        self.sounding_midi(frets)
            .into_iter()
            .map(PitchClass::from_midi)
            .collect()
    }

    /// 最低的发声音，也就是低音
    pub fn bass_note(&self, frets: &FretAssignment) -> Option<u8> {
        self.sounding_midi(frets).into_iter().min()
    }
}

impl Default for Guitar {
    fn default() -> Self {
        Self::standard()
    }
}
