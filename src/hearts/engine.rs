use crate::cards::*;
use crate::hearts::*;
use crate::*;
use rand::rngs::SmallRng;

/// Reference rules engine for a 52-card game of Hearts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hearts {
    direction: PassDirection,
}

impl Hearts {
    /// Rounds that open with a pass in the given direction.
    pub fn passing(direction: PassDirection) -> Self {
        Self { direction }
    }
}

impl Rules for Hearts {
    type State = Round;
    fn deal(&self, rng: &mut SmallRng) -> Round {
        Round::deal(self.direction, rng)
    }
    fn turn(&self, round: &Round) -> Position {
        round.turn()
    }
    fn legal_actions(&self, round: &Round) -> Vec<Card> {
        round.legal()
    }
    fn apply(&self, round: &Round, card: Card) -> anyhow::Result<Round> {
        round.apply(card)
    }
    fn is_terminal(&self, round: &Round) -> bool {
        round.is_over()
    }
    fn payoff(&self, round: &Round, player: Position) -> Utility {
        round.payoffs()[player]
    }
    fn situation(&self, round: &Round) -> Situation {
        round.situation()
    }
}
