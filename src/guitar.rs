//! 吉他模块
//!
//! 包含吉他的各种组件和功能实现

pub mod fret;
pub mod guitar_chord;
pub mod guitar_instance;
pub mod guitar_string;
pub mod music_note;
