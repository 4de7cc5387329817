use crate::abstraction::*;
use crate::hearts::*;

/// Keys carrying the approximator's predicted action values.
/// The regret table is never consulted for these.
#[derive(Debug, Clone)]
pub struct LearnedEncoder<A: Approximator> {
    approximator: A,
    memory: Memory,
}

impl<A: Approximator> LearnedEncoder<A> {
    pub fn new(approximator: A, memory: Memory) -> Self {
        Self {
            approximator,
            memory,
        }
    }
}

impl<A: Approximator> Encoder for LearnedEncoder<A> {
    fn encode(&self, situation: &Situation) -> Option<InfoSetKey> {
        let ref features = Features::new(situation, self.memory);
        match self.approximator.predict(features.as_slice()) {
            Ok(values) if !values.is_empty() && values.iter().all(|v| v.is_finite()) => {
                Some(InfoSetKey::Learned(values))
            }
            Ok(_) => None,
            Err(e) => {
                log::debug!("approximator failed on {}: {}", situation, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::*;

    #[test]
    fn predicts_over_pass_features() {
        let mut weights = vec![vec![0.0; PASS_FEATURES]; 2];
        weights[0][Features::DIRECTION] = 1.0;
        weights[1][Features::LEGAL] = 1.0;
        let model = Linear::new(weights, vec![0.0, 0.0]).unwrap();
        let encoder = LearnedEncoder::new(model, Memory::High);
        let legal = vec![Card::try_from(7u8).unwrap(), Card::TWO_OF_CLUBS];
        let situation = Situation::pass(0, PassDirection::Right, legal);
        assert_eq!(encoder.encode(&situation), Some(InfoSetKey::Learned(vec![3.0, 7.0])));
        assert_eq!(encoder.action(&InfoSetKey::Learned(vec![]), &situation, 1), Some(Card::TWO_OF_CLUBS));
    }

    #[test]
    fn shape_mismatch_is_a_miss() {
        let model = Linear::new(vec![vec![1.0; 3]], vec![0.0]).unwrap();
        let encoder = LearnedEncoder::new(model, Memory::High);
        let situation = Situation::pass(0, PassDirection::Left, vec![Card::TWO_OF_CLUBS]);
        assert_eq!(encoder.encode(&situation), None);
    }
}
