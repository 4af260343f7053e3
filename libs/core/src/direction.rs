use crate::fingerprint::Fingerprint;

/// The arrow selector codes understood by the display.
///
/// These are the raw wire values for [`Command::SetDirection`]: bitmask-style
/// codes, mutually exclusive in practice. Which `Angle` to show for a given
/// recognized [`Direction`] is a layout decision left to the caller.
///
/// [`Command::SetDirection`]: enum.Command.html#variant.SetDirection
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Angle {
    /// Sharp right turn.
    SharpRight = 0x02,

    /// Right turn.
    Right = 0x04,

    /// Slight right turn.
    EasyRight = 0x08,

    /// Continue straight.
    Straight = 0x10,

    /// Slight left turn.
    EasyLeft = 0x20,

    /// Left turn.
    Left = 0x40,

    /// Sharp left turn.
    SharpLeft = 0x80,
}

impl Angle {
    /// Returns the wire byte for this arrow.
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::Angle;
    ///
    /// assert_eq!(0x10, Angle::Straight.code());
    /// assert_eq!(0x40, Angle::Left.code());
    /// ```
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A turn direction recognized from an icon bitmap.
///
/// This is the classifier's output alphabet. It is deliberately distinct from
/// [`Angle`]: the display offers seven arrows while navigation apps draw nine
/// icon shapes, and the mapping between the two belongs to layout
/// configuration, not to this crate.
///
/// [`Angle`]: enum.Angle.html
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Continue straight.
    Straight,

    /// Left turn.
    Left,

    /// Slight left turn.
    EasyLeft,

    /// Slight right turn.
    EasyRight,

    /// Keep left at a fork.
    KeepLeft,

    /// Keep right at a fork.
    KeepRight,

    /// Right turn.
    Right,

    /// Sharp left turn.
    SharpLeft,

    /// Sharp right turn.
    SharpRight,
}

impl Direction {
    /// Returns the classifier output code (0–8) for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::Direction;
    ///
    /// assert_eq!(0, Direction::Straight.code());
    /// assert_eq!(8, Direction::SharpRight.code());
    /// ```
    pub fn code(self) -> u8 {
        match self {
            Direction::Straight => 0,
            Direction::Left => 1,
            Direction::EasyLeft => 2,
            Direction::EasyRight => 3,
            Direction::KeepLeft => 4,
            Direction::KeepRight => 5,
            Direction::Right => 6,
            Direction::SharpLeft => 7,
            Direction::SharpRight => 8,
        }
    }
}

/// Reference fingerprints for the known turn-icon shapes.
///
/// Captured empirically from the icons drawn by navigation apps. The order is
/// fixed: ties in the distance comparison resolve to the first-encountered
/// minimum, so reordering entries would change classification results.
const TEMPLATES: [(u64, Direction); 9] = [
    (0x1010_1010_1038_1000, Direction::Straight),
    (0x40C0_C0C0_C87C_0800, Direction::Left),
    (0x4040_4040_6818_1C00, Direction::EasyLeft),
    (0x0404_0404_2C30_7000, Direction::EasyRight),
    (0x1010_1018_080C_0C00, Direction::KeepLeft),
    (0x1010_1030_2060_6000, Direction::KeepRight),
    (0x0404_0404_647C_2000, Direction::Right),
    (0x4040_404C_7860_4000, Direction::SharpLeft),
    (0x0404_0464_740C_0400, Direction::SharpRight),
];

/// The largest fingerprint distance still accepted as a match.
pub const MAX_MATCH_DISTANCE: u32 = 10;

/// Matches a fingerprint against the template library and returns the closest
/// direction, or `None` when no template is within [`MAX_MATCH_DISTANCE`].
///
/// This is a nearest-neighbor classifier under Hamming distance with a fixed
/// library and a fixed rejection threshold; identical fingerprints always
/// classify identically.
///
/// # Examples
///
/// ```
/// use navhud_core::{classify, Direction, Fingerprint};
///
/// let fingerprint = Fingerprint::from_value(0x1010_1010_1038_1000);
/// assert_eq!(Some(Direction::Straight), classify(&fingerprint));
///
/// let noise = Fingerprint::from_value(0xA5A5_A5A5_A5A5_A5A5);
/// assert_eq!(None, classify(&noise));
/// ```
///
/// [`MAX_MATCH_DISTANCE`]: constant.MAX_MATCH_DISTANCE.html
pub fn classify(fingerprint: &Fingerprint) -> Option<Direction> {
    let mut best = None;
    let mut best_distance = u32::MAX;

    for &(template, direction) in TEMPLATES.iter() {
        let distance = fingerprint.distance(template);
        if distance < best_distance {
            best_distance = distance;
            best = Some(direction);
        }
    }

    best.filter(|_| best_distance <= MAX_MATCH_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_template_matches_with_distance_zero() {
        for &(template, direction) in TEMPLATES.iter() {
            let fingerprint = Fingerprint::from_value(template);
            assert_eq!(0, fingerprint.distance(template));
            assert_eq!(Some(direction), classify(&fingerprint));
        }
    }

    #[test]
    fn near_template_still_matches() {
        // Flip 10 of the first 63 bits of the straight template; distance is
        // exactly at the threshold.
        let fingerprint = Fingerprint::from_value(0x1010_1010_1038_1000 ^ 0x03FF);
        assert_eq!(Some(Direction::Straight), classify(&fingerprint));
    }

    #[test]
    fn distant_fingerprint_is_rejected() {
        assert_eq!(None, classify(&Fingerprint::from_value(0xA5A5_A5A5_A5A5_A5A5)));
        assert_eq!(None, classify(&Fingerprint::from_value(!0)));
    }

    #[test]
    fn high_bit_is_ignored() {
        // Bit 63 is excluded from every comparison, so flipping it alone
        // changes nothing.
        let fingerprint = Fingerprint::from_value(0x1010_1010_1038_1000 | 1 << 63);
        assert_eq!(0, fingerprint.distance(0x1010_1010_1038_1000));
        assert_eq!(Some(Direction::Straight), classify(&fingerprint));
    }

    #[test]
    fn classification_is_deterministic() {
        let fingerprint = Fingerprint::from_value(0x4040_4040_6818_1C00 ^ 0b101);
        let first = classify(&fingerprint);
        for _ in 0..10 {
            assert_eq!(first, classify(&fingerprint));
        }
    }

    #[test]
    fn angle_codes() {
        assert_eq!(0x10, Angle::Straight.code());
        assert_eq!(0x20, Angle::EasyLeft.code());
        assert_eq!(0x40, Angle::Left.code());
        assert_eq!(0x80, Angle::SharpLeft.code());
        assert_eq!(0x08, Angle::EasyRight.code());
        assert_eq!(0x04, Angle::Right.code());
        assert_eq!(0x02, Angle::SharpRight.code());
    }

    #[test]
    fn direction_codes_are_stable() {
        let expected = [
            (Direction::Straight, 0),
            (Direction::Left, 1),
            (Direction::EasyLeft, 2),
            (Direction::EasyRight, 3),
            (Direction::KeepLeft, 4),
            (Direction::KeepRight, 5),
            (Direction::Right, 6),
            (Direction::SharpLeft, 7),
            (Direction::SharpRight, 8),
        ];
        for (direction, code) in expected {
            assert_eq!(code, direction.code());
        }
    }
}
