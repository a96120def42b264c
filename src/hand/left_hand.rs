// LeftHand.rs
use crate::guitar::fret::{FretAssignment, STRING_COUNT};
use crate::hand::left_finger::Finger;

/// 左手的指法：每根弦用哪根手指、横按的品格、起始品格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingering {
    pub fingers: [Finger; STRING_COUNT],
    pub barres: Vec<u8>,
    pub base_fret: u8,
}

impl Fingering {
    /// 没有按弦时的指法
    pub fn empty() -> Self {
        Fingering {
            fingers: [Finger::Empty; STRING_COUNT],
            barres: Vec::new(),
            base_fret: 1,
        }
    }

    pub fn finger_numbers(&self) -> [u8; STRING_COUNT] {
        self.fingers.map(|finger| finger.to_u8())
    }
}

/// Assigns finger numbers, barres and the base fret to a fret assignment.
///
/// The lowest fretted position becomes the base fret. If two or more strings
/// share it, the index finger barres them. The remaining notes are taken by
/// fret ascending, higher strings first, and receive the next finger; notes on
/// an already fingered fret reuse that finger. Finger numbers stop at the pinky.
pub fn assign_fingering(frets: &FretAssignment) -> Fingering {
    let mut pressed: Vec<(usize, u8)> = frets.fretted().collect();
    if pressed.is_empty() {
        return Fingering::empty();
    }

    let base_fret = pressed.iter().map(|&(_, fret)| fret).min().unwrap_or(1);

    // 最低品上有两根及以上的弦，用食指横按
    let strings_on_base: Vec<usize> = pressed
        .iter()
        .filter(|&&(_, fret)| fret == base_fret)
        .map(|&(string_index, _)| string_index)
        .collect();
    let mut barres = Vec::new();
    if let (Some(first), Some(last)) = (strings_on_base.first(), strings_on_base.last()) {
        if strings_on_base.len() >= 2 && last - first >= 1 {
            barres.push(base_fret);
        }
    }

    let mut fingers = [Finger::Empty; STRING_COUNT];
    let mut next_finger = if barres.is_empty() {
        Finger::Index
    } else {
        Finger::Middle
    };
    // 已经分配过手指的品格
    let mut used_fingers: Vec<(u8, Finger)> = Vec::new();

    // 先按品格升序，同一品格里高音弦在前
    pressed.sort_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));

    for (string_index, fret) in pressed {
        if barres.contains(&fret) {
            fingers[string_index] = Finger::Index;
            continue;
        }

        if let Some(&(_, finger)) = used_fingers.iter().find(|(used_fret, _)| *used_fret == fret) {
            fingers[string_index] = finger;
        } else {
            fingers[string_index] = next_finger;
            used_fingers.push((fret, next_finger));
            next_finger = next_finger.next();
        }
    }

    Fingering {
        fingers,
        barres,
        base_fret,
    }
}

/// 检查横按是否合法：每个横按品格上至少有两根弦
pub fn verify_barres(frets: &FretAssignment, barres: &[u8]) -> bool {
    barres.iter().all(|&barre| {
        frets
            .fretted()
            .filter(|&(_, fret)| fret == barre)
            .count()
            >= 2
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::fret::Fret;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn fingering_of(values: [i32; 6]) -> Fingering {
        assign_fingering(&FretAssignment::from_i32s(values).unwrap())
    }

    #[test]
    fn test_open_c_major() {
        let fingering = fingering_of([-1, 3, 2, 0, 1, 0]);
        assert_eq!(fingering.finger_numbers(), [0, 3, 2, 0, 1, 0]);
        assert!(fingering.barres.is_empty());
        assert_eq!(fingering.base_fret, 1);
    }

    #[test]
    fn test_e_shape_barre() {
        let fingering = fingering_of([1, 3, 3, 2, 1, 1]);
        assert_eq!(fingering.barres, vec![1]);
        assert_eq!(fingering.base_fret, 1);
        // 同一品的两根弦共用一根手指
        assert_eq!(fingering.finger_numbers(), [1, 3, 3, 2, 1, 1]);
    }

    #[test]
    fn test_a_shape_barre_high_up() {
        let fingering = fingering_of([-1, 5, 7, 7, 6, 5]);
        assert_eq!(fingering.barres, vec![5]);
        assert_eq!(fingering.base_fret, 5);
        assert_eq!(fingering.finger_numbers(), [0, 1, 3, 3, 2, 1]);
    }

    #[test]
    fn test_all_open_or_muted() {
        let fingering = fingering_of([0, 0, 0, 0, 0, -1]);
        assert_eq!(fingering, Fingering::empty());
        assert!(fingering.barres.is_empty());
    }

    #[test]
    fn test_fingers_capped_at_pinky() {
        // 五个不同的品格，手指编号不能超过 4
        let fingering = fingering_of([1, 2, 3, 4, 5, -1]);
        assert_eq!(fingering.finger_numbers(), [1, 2, 3, 4, 4, 0]);
    }

    #[test]
    fn test_random_assignments_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(20240611);
        for _ in 0..2000 {
            let mut values = [0i32; 6];
            for value in values.iter_mut() {
                *value = rng.gen_range(-1..=15);
            }
            let frets = FretAssignment::from_i32s(values).unwrap();
            let fingering = assign_fingering(&frets);

            for (fret, finger) in frets.frets().iter().zip(fingering.fingers) {
                match fret {
                    Fret::Fretted(_) => assert_ne!(finger, Finger::Empty),
                    _ => assert_eq!(finger, Finger::Empty),
                }
                assert!(finger.to_u8() <= 4);
            }
            assert!(verify_barres(&frets, &fingering.barres));
            assert_eq!(fingering.base_fret, frets.min_fretted().unwrap_or(1));
        }
    }
}
