//! 和弦按法的生成、打分和挑选

pub mod caged;
pub mod chord_position;
pub mod chord_type;
pub mod open_chords;
pub mod score;
pub mod search;
pub mod selector;
