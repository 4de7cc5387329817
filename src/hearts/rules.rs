use crate::cards::*;
use crate::hearts::*;
use crate::*;
use rand::rngs::SmallRng;

/// The game as seen by live traversal.
///
/// The traversal only needs to know who acts, what they may play, how a card
/// changes the state, and what a finished state is worth. Everything about
/// tricks, suits and scoring stays behind this boundary.
pub trait Rules {
    type State: Clone;
    /// A fresh state at the first decision of a round.
    fn deal(&self, rng: &mut SmallRng) -> Self::State;
    fn turn(&self, state: &Self::State) -> Position;
    fn legal_actions(&self, state: &Self::State) -> Vec<Card>;
    fn apply(&self, state: &Self::State, action: Card) -> anyhow::Result<Self::State>;
    fn is_terminal(&self, state: &Self::State) -> bool;
    /// Only defined for terminal states.
    fn payoff(&self, state: &Self::State, player: Position) -> Utility;
    /// What the acting seat knows, for key derivation.
    fn situation(&self, state: &Self::State) -> Situation;
}
