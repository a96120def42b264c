//! 吉他和弦指法生成与挑选
//!
//! Given a chord root and quality, enumerate playable fret assignments on a
//! standard-tuned six-string guitar, score them for playability, assign
//! fingers and barres, and curate a neck-diverse shortlist.

pub mod config;
pub mod error;
pub mod guitar;
pub mod hand;
pub mod utils;
pub mod voicing;

pub use config::{GenerateOptions, PickOptions, VoicingConfig};
pub use error::VoicingError;
pub use guitar::fret::{Fret, FretAssignment, FretNumber};
pub use guitar::guitar_chord::{ChordQuality, ChordToneResolver, ChordTones, StandardChordResolver};
pub use guitar::music_note::{PitchClass, ToneSet};
pub use voicing::chord_position::ChordPosition;
pub use voicing::search::generate_guitar_voicings;
pub use voicing::selector::{find_voicings, pick_practical_voicings};
