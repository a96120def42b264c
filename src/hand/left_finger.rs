// src/hand/left_finger.rs

// 手指枚举，0 表示这根弦不用手指（空弦或静音）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Finger {
    Empty = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    /// 超过 4 的编号一律当作小指
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Finger::Empty,
            1 => Finger::Index,
            2 => Finger::Middle,
            3 => Finger::Ring,
            _ => Finger::Pinky,
        }
    }

    pub fn to_u8(&self) -> u8 {
        *self as u8
    }

    /// 下一根手指，到小指为止
    pub fn next(&self) -> Self {
        Finger::from_index(self.to_u8() + 1)
    }
}

impl From<Finger> for u8 {
    fn from(finger: Finger) -> Self {
        finger.to_u8()
    }
}

impl From<u8> for Finger {
    fn from(index: u8) -> Self {
        Finger::from_index(index)
    }
}
