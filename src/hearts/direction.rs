use crate::*;

/// Where passed cards go, relative to the passing seat.
/// The discriminant is the seat offset and the value used in feature vectors.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum PassDirection {
    #[default]
    Hold = 0,
    Left = 1,
    Opposite = 2,
    Right = 3,
}

impl PassDirection {
    /// Rounds rotate left, right, across, hold.
    pub fn for_round(round: usize) -> Self {
        match round % 4 {
            0 => PassDirection::Left,
            1 => PassDirection::Right,
            2 => PassDirection::Opposite,
            _ => PassDirection::Hold,
        }
    }
    pub fn offset(&self) -> usize {
        *self as usize
    }
    /// Seat receiving the cards passed by `from`, if this round passes at all.
    pub fn receiver(&self, from: Position) -> Option<Position> {
        match self {
            PassDirection::Hold => None,
            _ => Some((from + self.offset()) % N),
        }
    }
}

impl std::fmt::Display for PassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation() {
        assert_eq!(PassDirection::for_round(0), PassDirection::Left);
        assert_eq!(PassDirection::for_round(3), PassDirection::Hold);
        assert_eq!(PassDirection::for_round(4), PassDirection::Left);
    }

    #[test]
    fn receivers() {
        assert_eq!(PassDirection::Left.receiver(3), Some(0));
        assert_eq!(PassDirection::Opposite.receiver(1), Some(3));
        assert_eq!(PassDirection::Right.receiver(0), Some(3));
        assert_eq!(PassDirection::Hold.receiver(0), None);
    }
}
