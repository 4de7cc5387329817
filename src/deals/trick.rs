use crate::cards::*;
use crate::*;

/// One completed trick as the simulator recorded it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrickRecord {
    pub starter: Position,
    /// Cards in play order, starting with the starter's lead.
    pub cards: Vec<Card>,
    /// Each seat's legal cards at the moment it played.
    pub playable: [Vec<Card>; N],
}

impl TrickRecord {
    pub fn new(starter: Position) -> Self {
        Self {
            starter,
            ..Self::default()
        }
    }
    /// Position of `player` within the play order of this trick.
    pub fn seat(&self, player: Position) -> usize {
        (player + N - self.starter) % N
    }
    /// Last seat to play; its card completes the trick.
    pub fn closer(&self) -> Position {
        (self.starter + N - 1) % N
    }
    pub fn card(&self, player: Position) -> Option<Card> {
        self.cards.get(self.seat(player)).copied()
    }
}
