use crate::abstraction::*;
use crate::cards::*;
use crate::deals::*;
use crate::hearts::*;
use crate::regret::*;
use crate::traverse::*;
use crate::*;

/// Replays the card play of a deal, trick by trick.
///
/// The walk starts at the first trick's starter and ends on reaching the
/// final trick, whose cards are forced by then.
pub struct PlayReplay<'a, E: Encoder> {
    deal: &'a SimulatedDeal,
    encoder: &'a E,
    table: &'a mut RegretTable,
}

impl<'a, E: Encoder> PlayReplay<'a, E> {
    pub fn new(deal: &'a SimulatedDeal, encoder: &'a E, table: &'a mut RegretTable) -> Self {
        Self {
            deal,
            encoder,
            table,
        }
    }
    fn last(t: usize) -> bool {
        (t + 1) % HAND_SIZE == 0
    }
    fn open(&self, t: usize, incoming: Option<Card>) -> anyhow::Result<Node> {
        if Self::last(t) {
            return Ok(Node::play(0, t, 0, incoming, Vec::new()));
        }
        let trick = self.deal.trick(t)?;
        Ok(Node::play(
            trick.starter,
            t,
            0,
            incoming,
            trick.playable[trick.starter].clone(),
        ))
    }
}

impl<'a, E: Encoder> Replay for PlayReplay<'a, E> {
    type E = E;
    fn encoder(&self) -> &E {
        self.encoder
    }
    fn table(&mut self) -> &mut RegretTable {
        self.table
    }
    fn root(&self, _: Position) -> anyhow::Result<Node> {
        self.open(0, None)
    }
    fn terminal(&self, node: &Node) -> bool {
        Self::last(node.counter())
    }
    fn situation(&self, node: &Node) -> anyhow::Result<Situation> {
        self.deal.play_situation(node.counter(), node.player())
    }
    fn logged(&self, node: &Node) -> anyhow::Result<Card> {
        self.deal.played(node.counter(), node.player())
    }
    fn child(&self, node: &Node, card: Card) -> anyhow::Result<Node> {
        let t = node.counter();
        let trick = self.deal.trick(t)?;
        match node.player() == trick.closer() {
            true => self.open(t + 1, Some(card)),
            false => {
                let next = (node.player() + 1) % N;
                Ok(Node::play(
                    next,
                    t,
                    node.played() + 1,
                    Some(card),
                    trick.playable[next].clone(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn deal() -> SimulatedDeal {
        RandomSimulator::new(rand::rngs::SmallRng::seed_from_u64(8))
            .simulate(1)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn walks_forty_eight_plays() {
        let ref deal = deal();
        let ref encoder = ExactEncoder::new(Memory::High);
        let ref mut table = RegretTable::new();
        let replay = PlayReplay::new(deal, encoder, table);
        let mut node = replay.root(3).unwrap();
        assert_eq!(node.player(), deal.tricks[0].starter);
        let mut depth = 0;
        while !replay.terminal(&node) {
            let card = replay.logged(&node).unwrap();
            assert_eq!(replay.situation(&node).unwrap().trick().len(), node.played());
            node = replay.child(&node, card).unwrap();
            depth += 1;
        }
        assert_eq!(depth, (HAND_SIZE - 1) * N);
    }

    #[test]
    fn corrupted_log_is_an_error() {
        let mut deal = deal();
        let starter = deal.tricks[2].starter;
        deal.tricks[2].playable[starter].clear();
        let ref encoder = ExactEncoder::new(Memory::High);
        let ref mut table = RegretTable::new();
        assert!(PlayReplay::new(&deal, encoder, table).replay(0, 1.0).is_err());
    }

    #[test]
    fn one_deal_shifts_toward_logged_cards() {
        let ref deal = deal();
        let ref encoder = ExactEncoder::new(Memory::High);
        let ref mut table = RegretTable::new();
        let walker = (0..N)
            .max_by(|a, b| deal.payoffs[*a].total_cmp(&deal.payoffs[*b]))
            .unwrap();
        PlayReplay::new(deal, encoder, table)
            .replay(walker, deal.payoffs[walker])
            .unwrap();
        for t in 0..HAND_SIZE - 1 {
            let ref situation = deal.play_situation(t, walker).unwrap();
            let n = situation.legal().len();
            if n < 2 {
                continue;
            }
            let ref key = encoder.encode(situation).unwrap();
            let card = deal.played(t, walker).unwrap();
            let a = situation.legal().iter().position(|c| *c == card).unwrap();
            let current = table.strategy_for(key, n);
            assert!(current[a] > 1.0 / n as Probability);
            let entry = table.get(key).unwrap();
            assert!(entry.regret().iter().all(|r| *r >= 0.0));
            assert!((table.average(key, n).iter().sum::<Probability>() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn late_tricks_keep_positive_regret() {
        let ref deal = RandomSimulator::new(rand::rngs::SmallRng::seed_from_u64(21))
            .simulate(1)
            .unwrap()
            .remove(0);
        let ref encoder = ExactEncoder::new(Memory::High);
        let ref mut table = RegretTable::new();
        for _ in 0..2 {
            for walker in 0..N {
                PlayReplay::new(deal, encoder, table)
                    .replay(walker, deal.payoffs[walker])
                    .unwrap();
            }
        }
        let walker = (0..N)
            .max_by(|a, b| deal.payoffs[*a].total_cmp(&deal.payoffs[*b]))
            .unwrap();
        let mut checked = 0;
        for t in 8..HAND_SIZE - 1 {
            let ref situation = deal.play_situation(t, walker).unwrap();
            let n = situation.legal().len();
            if n < 2 {
                continue;
            }
            let ref key = encoder.encode(situation).unwrap();
            let card = deal.played(t, walker).unwrap();
            let a = situation.legal().iter().position(|c| *c == card).unwrap();
            let entry = table.get(key).unwrap();
            assert!(entry.regret()[a] > 0.0);
            assert!(entry.regret().iter().all(|r| r.is_finite()));
            checked += 1;
        }
        assert!(checked > 0);
    }
}
