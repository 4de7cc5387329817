use crate::cards::*;
use crate::hearts::*;
use crate::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Full state of one round of Hearts, from the deal to the last trick.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    hands: [Vec<Card>; N],
    passes: [Vec<Card>; N],
    direction: PassDirection,
    phase: Phase,
    turn: Position,
    starter: Position,
    trick: Vec<Card>,
    history: Vec<Vec<Card>>,
    points: [u8; N],
    broken: bool,
}

impl Round {
    /// Shuffle and deal thirteen cards to each seat.
    pub fn deal(direction: PassDirection, rng: &mut SmallRng) -> Self {
        let mut deck = Card::deck();
        deck.shuffle(rng);
        let hands = std::array::from_fn(|p| deck[p * HAND_SIZE..(p + 1) * HAND_SIZE].to_vec());
        Self::from_hands(hands, direction)
    }

    /// Start a round from known hands. Seat 0 passes first; without a pass
    /// the holder of the two of clubs leads.
    pub fn from_hands(mut hands: [Vec<Card>; N], direction: PassDirection) -> Self {
        hands.iter_mut().for_each(|hand| hand.sort());
        let mut round = Self {
            hands,
            passes: Default::default(),
            direction,
            phase: Phase::Pass,
            turn: 0,
            starter: 0,
            trick: Vec::with_capacity(N),
            history: Vec::with_capacity(HAND_SIZE),
            points: [0; N],
            broken: false,
        };
        if direction == PassDirection::Hold {
            round.begin();
        }
        round
    }

    pub fn turn(&self) -> Position {
        self.turn
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn direction(&self) -> PassDirection {
        self.direction
    }
    pub fn hand(&self, player: Position) -> &[Card] {
        &self.hands[player]
    }
    pub fn hands(&self) -> &[Vec<Card>; N] {
        &self.hands
    }
    pub fn passes(&self) -> &[Vec<Card>; N] {
        &self.passes
    }
    pub fn starter(&self) -> Position {
        self.starter
    }
    pub fn trick(&self) -> &[Card] {
        &self.trick
    }
    pub fn history(&self) -> &[Vec<Card>] {
        &self.history
    }
    pub fn points(&self) -> [u8; N] {
        self.points
    }
    pub fn is_over(&self) -> bool {
        self.history.len() == HAND_SIZE
    }
    pub fn payoffs(&self) -> [Utility; N] {
        settle(self.points)
    }

    /// Cards the acting seat may choose right now.
    pub fn legal(&self) -> Vec<Card> {
        match self.phase {
            _ if self.is_over() => Vec::new(),
            Phase::Pass => self.hands[self.turn]
                .iter()
                .filter(|c| !self.passes[self.turn].contains(c))
                .copied()
                .collect(),
            Phase::Play => self.playable(),
        }
    }

    fn playable(&self) -> Vec<Card> {
        let ref hand = self.hands[self.turn];
        let opening = self.history.is_empty();
        match self.trick.first() {
            None if opening && hand.contains(&Card::TWO_OF_CLUBS) => vec![Card::TWO_OF_CLUBS],
            None if self.broken || hand.iter().all(Card::is_heart) => hand.clone(),
            None => hand.iter().filter(|c| !c.is_heart()).copied().collect(),
            Some(lead) => {
                let follow = hand
                    .iter()
                    .filter(|c| c.suit() == lead.suit())
                    .copied()
                    .collect::<Vec<_>>();
                let clean = hand
                    .iter()
                    .filter(|c| c.points() == 0)
                    .copied()
                    .collect::<Vec<_>>();
                match () {
                    _ if !follow.is_empty() => follow,
                    _ if opening && !clean.is_empty() => clean,
                    _ => hand.clone(),
                }
            }
        }
    }

    /// The state after the acting seat chooses `card`.
    pub fn apply(&self, card: Card) -> anyhow::Result<Self> {
        if !self.legal().contains(&card) {
            anyhow::bail!("P{} cannot choose {} here", self.turn, card);
        }
        let mut next = self.clone();
        match self.phase {
            Phase::Pass => next.commit(card),
            Phase::Play => next.play(card),
        }
        Ok(next)
    }

    fn commit(&mut self, card: Card) {
        self.passes[self.turn].push(card);
        self.turn = (self.turn + 1) % N;
        if self.passes.iter().all(|p| p.len() == PASS_SIZE) {
            self.exchange();
            self.begin();
        }
    }

    fn exchange(&mut self) {
        for from in 0..N {
            let ref passed = self.passes[from];
            self.hands[from].retain(|c| !passed.contains(c));
        }
        for from in 0..N {
            if let Some(to) = self.direction.receiver(from) {
                let passed = self.passes[from].clone();
                self.hands[to].extend(passed);
            }
        }
        self.hands.iter_mut().for_each(|hand| hand.sort());
    }

    fn begin(&mut self) {
        self.phase = Phase::Play;
        self.turn = self
            .hands
            .iter()
            .position(|hand| hand.contains(&Card::TWO_OF_CLUBS))
            .unwrap_or_default();
        self.starter = self.turn;
    }

    fn play(&mut self, card: Card) {
        self.hands[self.turn].retain(|c| *c != card);
        self.broken |= card.is_heart();
        self.trick.push(card);
        if self.trick.len() < N {
            self.turn = (self.turn + 1) % N;
            return;
        }
        let ref lead = self.trick[0];
        let winner = self
            .trick
            .iter()
            .enumerate()
            .filter(|(_, c)| c.suit() == lead.suit())
            .max_by_key(|(_, c)| c.rank())
            .map(|(i, _)| (self.starter + i) % N)
            .unwrap_or(self.starter);
        self.points[winner] += self.trick.iter().map(Card::points).sum::<u8>();
        self.history.push(std::mem::take(&mut self.trick));
        self.starter = winner;
        self.turn = winner;
    }

    /// What the acting seat knows.
    pub fn situation(&self) -> Situation {
        match self.phase {
            Phase::Pass => Situation::pass(self.turn, self.direction, self.legal()),
            Phase::Play => Situation::play(
                self.turn,
                self.legal(),
                self.trick.clone(),
                self.starter,
                self.history.clone(),
            ),
        }
    }
}

/// Zero-sum payoffs from penalty points.
///
/// A seat that takes every penalty point gives all others the full count
/// instead. The lowest score wins; every other seat pays the difference
/// to it, and the winners split the total evenly.
pub fn settle(points: [u8; N]) -> [Utility; N] {
    let points = match points.iter().position(|p| *p == MOON_POINTS) {
        Some(shooter) => std::array::from_fn(|p| if p == shooter { 0 } else { MOON_POINTS }),
        None => points,
    };
    let best = points.iter().copied().min().unwrap_or_default();
    let winners = points.iter().filter(|p| **p == best).count() as Utility;
    let paid = points
        .iter()
        .map(|p| best as Utility - *p as Utility)
        .sum::<Utility>();
    std::array::from_fn(|p| match points[p] {
        x if x == best => -paid / winners,
        x => best as Utility - x as Utility,
    })
}

impl Arbitrary for Round {
    fn random() -> Self {
        use rand::SeedableRng;
        let ref mut rng = SmallRng::from_rng(&mut rand::rng());
        Self::deal(PassDirection::Hold, rng)
    }
}
