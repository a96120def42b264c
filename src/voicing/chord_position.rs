use serde::{Deserialize, Serialize};

use crate::error::VoicingError;
use crate::guitar::fret::{FretAssignment, STRING_COUNT};
use crate::guitar::guitar_instance::Guitar;
use crate::hand::left_hand::{assign_fingering, verify_barres};

/// One concrete way to finger a chord, ready for diagram rendering and playback.
///
/// Fingers, barres, base fret and MIDI notes are always derived from the
/// frets. 构造以后不再修改，反序列化时会校验这些字段是否与品格一致
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChordPositionRecord")]
pub struct ChordPosition {
    frets: FretAssignment,
    fingers: [u8; STRING_COUNT],
    base_fret: u8,
    barres: Vec<u8>,
    /// 升序、去重的 MIDI 音高
    midi_notes: Vec<u8>,
}

/// JSON 里的原始字段，校验通过后才变成 `ChordPosition`
#[derive(Deserialize)]
struct ChordPositionRecord {
    frets: FretAssignment,
    fingers: [u8; STRING_COUNT],
    base_fret: u8,
    barres: Vec<u8>,
    midi_notes: Vec<u8>,
}

impl ChordPosition {
    /// 由按法推导出指法、横按和 MIDI 音高
    pub fn from_frets(frets: FretAssignment) -> Self {
        let fingering = assign_fingering(&frets);
        assert!(
            verify_barres(&frets, &fingering.barres),
            "横按品格上少于两根弦: {}",
            frets
        );

        ChordPosition {
            frets,
            fingers: fingering.finger_numbers(),
            base_fret: fingering.base_fret,
            barres: fingering.barres,
            midi_notes: Guitar::standard().midi_notes(&frets),
        }
    }

    pub fn frets(&self) -> FretAssignment {
        self.frets
    }

    pub fn fingers(&self) -> [u8; STRING_COUNT] {
        self.fingers
    }

    pub fn base_fret(&self) -> u8 {
        self.base_fret
    }

    pub fn barres(&self) -> &[u8] {
        &self.barres
    }

    pub fn midi_notes(&self) -> &[u8] {
        &self.midi_notes
    }

    /// 按弦的最高品格，全是空弦时为 0
    pub fn max_fretted(&self) -> u8 {
        self.frets.max_fretted().unwrap_or(0)
    }
}

impl From<FretAssignment> for ChordPosition {
    fn from(frets: FretAssignment) -> Self {
        ChordPosition::from_frets(frets)
    }
}

impl TryFrom<ChordPositionRecord> for ChordPosition {
    type Error = VoicingError;

    fn try_from(record: ChordPositionRecord) -> Result<Self, Self::Error> {
        let derived = ChordPosition::from_frets(record.frets);
        let mismatch = if record.fingers != derived.fingers {
            Some("fingers")
        } else if record.base_fret != derived.base_fret {
            Some("base_fret")
        } else if record.barres != derived.barres {
            Some("barres")
        } else if record.midi_notes != derived.midi_notes {
            Some("midi_notes")
        } else {
            None
        };

        match mismatch {
            None => Ok(derived),
            Some(field) => Err(VoicingError::InvalidPosition {
                frets: record.frets.to_string(),
                reason: format!("{} 与品格不一致", field),
            }),
        }
    }
}
