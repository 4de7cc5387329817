use crate::abstraction::*;
use crate::cards::*;
use crate::deals::*;
use crate::hearts::*;
use crate::regret::*;
use crate::traverse::*;
use crate::*;

/// Replays the pass phase of a deal.
///
/// Seats commit one card at a time starting from the traverser and moving
/// around the table; the phase ends after the eleventh commitment.
pub struct PassReplay<'a, E: Encoder> {
    deal: &'a SimulatedDeal,
    encoder: &'a E,
    table: &'a mut RegretTable,
}

impl<'a, E: Encoder> PassReplay<'a, E> {
    pub fn new(deal: &'a SimulatedDeal, encoder: &'a E, table: &'a mut RegretTable) -> Self {
        Self {
            deal,
            encoder,
            table,
        }
    }
    /// How many of its own cards the actor has committed at pass number `k`.
    fn committed(k: usize) -> usize {
        k / N
    }
}

impl<'a, E: Encoder> Replay for PassReplay<'a, E> {
    type E = E;
    fn encoder(&self) -> &E {
        self.encoder
    }
    fn table(&mut self) -> &mut RegretTable {
        self.table
    }
    fn root(&self, walker: Position) -> anyhow::Result<Node> {
        if !self.deal.has_pass() {
            anyhow::bail!("deal has no pass round");
        }
        Ok(Node::pass(walker, 0, None, self.deal.pass_legal(walker, 0)))
    }
    fn terminal(&self, node: &Node) -> bool {
        node.counter() >= PASS_DEPTH
    }
    fn situation(&self, node: &Node) -> anyhow::Result<Situation> {
        Ok(Situation::pass(
            node.player(),
            self.deal.direction,
            node.actions().to_vec(),
        ))
    }
    fn logged(&self, node: &Node) -> anyhow::Result<Card> {
        self.deal
            .passed(node.player(), Self::committed(node.counter()))
    }
    fn child(&self, node: &Node, card: Card) -> anyhow::Result<Node> {
        let next = (node.player() + 1) % N;
        let k = node.counter() + 1;
        Ok(Node::pass(
            next,
            k,
            Some(card),
            self.deal.pass_legal(next, Self::committed(k)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn deal() -> SimulatedDeal {
        RandomSimulator::new(rand::rngs::SmallRng::seed_from_u64(4))
            .simulate(1)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn walks_eleven_passes() {
        let ref deal = deal();
        let ref encoder = ExactEncoder::default();
        let ref mut table = RegretTable::new();
        let replay = PassReplay::new(deal, encoder, table);
        let mut node = replay.root(2).unwrap();
        let mut depth = 0;
        while !replay.terminal(&node) {
            let card = replay.logged(&node).unwrap();
            assert!(node.actions().contains(&card));
            node = replay.child(&node, card).unwrap();
            depth += 1;
        }
        assert_eq!(depth, PASS_DEPTH);
        assert_eq!(node.player(), (2 + PASS_DEPTH) % N);
        assert_eq!(node.actions().len(), HAND_SIZE - 2);
    }

    #[test]
    fn traverser_entries_only() {
        let ref deal = deal();
        let ref encoder = ExactEncoder::default();
        let ref mut table = RegretTable::new();
        PassReplay::new(deal, encoder, table).replay(0, 16.0).unwrap();
        let walker = (0..PASS_SIZE)
            .map(|k| encoder.encode(&deal.pass_situation(0, k)).unwrap())
            .collect::<Vec<_>>();
        for key in walker.iter() {
            let entry = table.get(key).unwrap();
            assert!((entry.policy().iter().sum::<Probability>() - 1.0).abs() < 1e-5);
            assert!(entry.regret().iter().all(|r| *r >= 0.0));
        }
        // opponents' entries are created on visit but never updated
        let ref other = encoder.encode(&deal.pass_situation(1, 0)).unwrap();
        assert_eq!(table.get(other), Some(&RegretEntry::uniform(HAND_SIZE)));
    }

    #[test]
    fn hold_round_has_no_pass_phase() {
        let mut deal = deal();
        deal.direction = PassDirection::Hold;
        let ref encoder = ExactEncoder::default();
        let ref mut table = RegretTable::new();
        assert!(PassReplay::new(&deal, encoder, table).replay(0, 1.0).is_err());
    }
}
