use crate::abstraction::*;
use crate::cards::*;
use crate::hearts::*;

/// Maps situations to table keys and stored action indices back to cards.
///
/// Shared read-only across training shards, hence `Sync`.
pub trait Encoder: Sync {
    /// `None` when the abstraction has nothing for this situation.
    fn encode(&self, situation: &Situation) -> Option<InfoSetKey>;
    /// Card meant by action slot `index` under `key`. Defaults to the
    /// situation's legal list, which is how exact and learned keys index actions.
    fn action(&self, key: &InfoSetKey, situation: &Situation, index: usize) -> Option<Card> {
        let _ = key;
        situation.legal().get(index).copied()
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&self, situation: &Situation) -> Option<InfoSetKey> {
        (**self).encode(situation)
    }
    fn action(&self, key: &InfoSetKey, situation: &Situation, index: usize) -> Option<Card> {
        (**self).action(key, situation, index)
    }
}
