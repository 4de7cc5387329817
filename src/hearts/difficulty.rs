/// Configured skill of a seat at play time.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "server", derive(clap::ValueEnum))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Expert,
}

impl Difficulty {
    /// Weaker seats read the low-resolution play table.
    pub fn coarse(&self) -> bool {
        matches!(self, Difficulty::Easy | Difficulty::Medium)
    }
    /// How many of the `support` strongest actions get down-weighted.
    pub fn lowered(&self, support: usize) -> usize {
        match self {
            Difficulty::Medium => support / 2,
            Difficulty::Hard => support / 4,
            Difficulty::Easy | Difficulty::Expert => 0,
        }
    }
    /// Rank of the action taken when choosing by predicted value.
    pub fn rank(&self) -> usize {
        match self {
            Difficulty::Expert => 0,
            Difficulty::Hard => 1,
            Difficulty::Medium => 2,
            Difficulty::Easy => 3,
        }
    }
}
