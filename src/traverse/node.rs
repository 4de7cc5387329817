use crate::cards::*;
use crate::hearts::*;
use crate::*;

/// A decision point on a replayed trajectory.
///
/// `counter` is the number of passes made so far in the pass phase, and the
/// number of completed tricks in the play phase. `played` counts cards
/// already in the current trick.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    phase: Phase,
    player: Position,
    incoming: Option<Card>,
    actions: Vec<Card>,
    counter: usize,
    played: usize,
}

impl Node {
    pub fn pass(player: Position, counter: usize, incoming: Option<Card>, actions: Vec<Card>) -> Self {
        Self {
            phase: Phase::Pass,
            player,
            incoming,
            actions,
            counter,
            played: 0,
        }
    }
    pub fn play(
        player: Position,
        counter: usize,
        played: usize,
        incoming: Option<Card>,
        actions: Vec<Card>,
    ) -> Self {
        Self {
            phase: Phase::Play,
            player,
            incoming,
            actions,
            counter,
            played,
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn player(&self) -> Position {
        self.player
    }
    pub fn incoming(&self) -> Option<Card> {
        self.incoming
    }
    pub fn actions(&self) -> &[Card] {
        &self.actions
    }
    pub fn counter(&self) -> usize {
        self.counter
    }
    pub fn played(&self) -> usize {
        self.played
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} node P{} #{}.{} ({} actions)",
            self.phase,
            self.player,
            self.counter,
            self.played,
            self.actions.len()
        )
    }
}
