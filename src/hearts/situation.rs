use crate::cards::*;
use crate::hearts::*;
use crate::*;

/// Everything a seat knows when it has to decide.
///
/// Built either from a logged deal during replay or from a live [`Round`].
/// Encoders derive keys and feature vectors from it; nothing else reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Situation {
    phase: Phase,
    player: Position,
    legal: Vec<Card>,
    trick: Vec<Card>,
    starter: Position,
    history: Vec<Vec<Card>>,
    direction: PassDirection,
}

impl Situation {
    /// A passing decision: `legal` is the hand minus cards already committed.
    pub fn pass(player: Position, direction: PassDirection, legal: Vec<Card>) -> Self {
        Self {
            phase: Phase::Pass,
            player,
            legal,
            trick: Vec::new(),
            starter: player,
            history: Vec::new(),
            direction,
        }
    }
    /// A card-play decision. `history` holds the cards of every completed trick.
    pub fn play(
        player: Position,
        legal: Vec<Card>,
        trick: Vec<Card>,
        starter: Position,
        history: Vec<Vec<Card>>,
    ) -> Self {
        Self {
            phase: Phase::Play,
            player,
            legal,
            trick,
            starter,
            history,
            direction: PassDirection::Hold,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn player(&self) -> Position {
        self.player
    }
    pub fn legal(&self) -> &[Card] {
        &self.legal
    }
    pub fn trick(&self) -> &[Card] {
        &self.trick
    }
    pub fn starter(&self) -> Position {
        self.starter
    }
    pub fn direction(&self) -> PassDirection {
        self.direction
    }
    pub fn tricks(&self) -> usize {
        self.history.len()
    }
    pub fn history(&self) -> &[Vec<Card>] {
        &self.history
    }

    /// Hearts among the cards this memory still holds.
    pub fn hearts_seen(&self, memory: Memory) -> usize {
        memory
            .recall(&self.history)
            .filter(|c| c.is_heart())
            .count()
    }
    /// Whether the queen of spades is among the remembered cards.
    pub fn queen_seen(&self, memory: Memory) -> bool {
        memory
            .recall(&self.history)
            .any(|c| *c == Card::QUEEN_OF_SPADES)
    }
}

impl std::fmt::Display for Situation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = |cs: &[Card]| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ");
        match self.phase {
            Phase::Pass => write!(
                f,
                "P{} pass {} [{}]",
                self.player,
                self.direction,
                cards(&self.legal)
            ),
            Phase::Play => write!(
                f,
                "P{} trick {} [{}] legal [{}]",
                self.player,
                self.tricks(),
                cards(&self.trick),
                cards(&self.legal)
            ),
        }
    }
}
