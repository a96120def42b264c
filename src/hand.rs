//! 左手指法模块

pub mod left_finger;
pub mod left_hand;
