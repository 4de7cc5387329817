use crate::cards::*;
use crate::hearts::*;
use crate::*;

/// Fixed-length numeric description of a situation.
///
/// Play vectors (21 slots): completed tricks, thirteen legal card ids,
/// trick starter, four current-trick card ids in play order, queen of
/// spades seen, hearts seen. Pass vectors (14 slots): pass direction and
/// thirteen legal card ids. Empty slots hold [`SENTINEL`].
#[derive(Debug, Clone, PartialEq)]
pub struct Features(Vec<f32>);

impl Features {
    pub const TRICKS: usize = 0;
    pub const LEGAL: usize = 1;
    pub const STARTER: usize = 1 + HAND_SIZE;
    pub const TRICK: usize = 2 + HAND_SIZE;
    pub const QUEEN: usize = 2 + HAND_SIZE + N;
    pub const HEARTS: usize = 3 + HAND_SIZE + N;
    pub const DIRECTION: usize = 0;

    pub fn new(situation: &Situation, memory: Memory) -> Self {
        match situation.phase() {
            Phase::Play => Self::play(situation, memory),
            Phase::Pass => Self::pass(situation),
        }
    }

    fn play(situation: &Situation, memory: Memory) -> Self {
        let mut slots = vec![SENTINEL; PLAY_FEATURES];
        slots[Self::TRICKS] = situation.tricks() as f32;
        fill(&mut slots[Self::LEGAL..Self::STARTER], situation.legal());
        slots[Self::STARTER] = situation.starter() as f32;
        fill(&mut slots[Self::TRICK..Self::QUEEN], situation.trick());
        slots[Self::QUEEN] = situation.queen_seen(memory) as u8 as f32;
        slots[Self::HEARTS] = situation.hearts_seen(memory) as f32;
        Self(slots)
    }

    fn pass(situation: &Situation) -> Self {
        let mut slots = vec![SENTINEL; PASS_FEATURES];
        slots[Self::DIRECTION] = situation.direction().offset() as f32;
        fill(&mut slots[Self::LEGAL..], situation.legal());
        Self(slots)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn fill(slots: &mut [f32], cards: &[Card]) {
    slots
        .iter_mut()
        .zip(cards.iter())
        .for_each(|(slot, card)| *slot = card.id() as f32);
}

impl From<Features> for Vec<f32> {
    fn from(features: Features) -> Self {
        features.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(n: u8) -> Card {
        Card::try_from(n).unwrap()
    }

    #[test]
    fn play_layout() {
        let history = vec![vec![c(40), c(41), c(37), c(42)], vec![c(14), c(15), c(2), c(3)]];
        let situation = Situation::play(2, vec![c(5), c(9)], vec![c(20)], 1, history);
        let features = Features::new(&situation, Memory::Super);
        let x = features.as_slice();
        assert_eq!(x.len(), PLAY_FEATURES);
        assert_eq!(x[0], 2.0);
        assert_eq!(&x[1..4], &[5.0, 9.0, SENTINEL]);
        assert_eq!(x[14], 1.0);
        assert_eq!(&x[15..19], &[20.0, SENTINEL, SENTINEL, SENTINEL]);
        assert_eq!(x[19], 1.0);
        assert_eq!(x[20], 2.0);
    }

    #[test]
    fn memory_bounds_seen_cards() {
        let history = vec![vec![c(40), c(41), c(37), c(42)], vec![c(1), c(2), c(3), c(4)]];
        let situation = Situation::play(0, vec![c(5)], vec![], 1, history);
        let x = Vec::from(Features::new(&situation, Memory::Low));
        assert_eq!(x[Features::QUEEN], 0.0);
    }

    #[test]
    fn pass_layout() {
        let situation = Situation::pass(0, PassDirection::Right, vec![c(1), c(52)]);
        let x = Vec::from(Features::new(&situation, Memory::High));
        assert_eq!(x.len(), PASS_FEATURES);
        assert_eq!(&x[..4], &[3.0, 1.0, 52.0, SENTINEL]);
    }
}
