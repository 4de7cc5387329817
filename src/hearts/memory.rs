use crate::cards::*;

/// How many completed tricks a seat keeps track of.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Memory {
    Low,
    Normal,
    #[default]
    High,
    Super,
}

impl Memory {
    pub fn tricks(&self) -> usize {
        match self {
            Memory::Low => 1,
            Memory::Normal => 3,
            Memory::High => 7,
            Memory::Super => crate::HAND_SIZE + 1,
        }
    }
    /// Cards of the most recent completed tricks this memory still holds.
    pub fn recall<'a>(self, history: &'a [Vec<Card>]) -> impl Iterator<Item = &'a Card> + 'a {
        history
            .iter()
            .skip(history.len().saturating_sub(self.tricks()))
            .flatten()
    }
}
