use crate::abstraction::*;
use crate::cards::*;
use crate::hearts::*;

/// Canonical-string keys.
///
/// Play: `"{hearts seen}:{queen seen}:{legal ids}:{trick ids}"`.
/// Pass: `"{direction}:{legal ids}"`. Anything else about the situation is
/// deliberately forgotten, so distinct situations may share a key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExactEncoder {
    memory: Memory,
}

impl ExactEncoder {
    pub fn new(memory: Memory) -> Self {
        Self { memory }
    }
}

fn ids(cards: &[Card]) -> Vec<u8> {
    cards.iter().map(Card::id).collect()
}

impl Encoder for ExactEncoder {
    fn encode(&self, situation: &Situation) -> Option<InfoSetKey> {
        Some(InfoSetKey::Exact(match situation.phase() {
            Phase::Play => format!(
                "{}:{}:{:?}:{:?}",
                situation.hearts_seen(self.memory),
                situation.queen_seen(self.memory),
                ids(situation.legal()),
                ids(situation.trick()),
            ),
            Phase::Pass => format!(
                "{}:{:?}",
                situation.direction().offset(),
                ids(situation.legal()),
            ),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(n: u8) -> Card {
        Card::try_from(n).unwrap()
    }

    #[test]
    fn play_key() {
        let history = vec![vec![c(14), c(15), c(16), c(1)]];
        let situation = Situation::play(1, vec![c(1), c(5), c(9)], vec![c(14)], 0, history);
        let key = ExactEncoder::new(Memory::High).encode(&situation);
        assert_eq!(key, Some(InfoSetKey::Exact("3:false:[1, 5, 9]:[14]".to_string())));
    }

    #[test]
    fn pass_key() {
        let situation = Situation::pass(2, PassDirection::Opposite, vec![c(3), c(40)]);
        let key = ExactEncoder::default().encode(&situation);
        assert_eq!(key, Some(InfoSetKey::Exact("2:[3, 40]".to_string())));
    }

    #[test]
    fn actions_index_legal_cards() {
        let situation = Situation::pass(0, PassDirection::Left, vec![c(3), c(40)]);
        let ref encoder = ExactEncoder::default();
        let key = encoder.encode(&situation).unwrap();
        assert_eq!(encoder.action(&key, &situation, 1), Some(c(40)));
        assert_eq!(encoder.action(&key, &situation, 2), None);
    }
}
