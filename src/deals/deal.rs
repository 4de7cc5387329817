use crate::cards::*;
use crate::deals::*;
use crate::hearts::*;
use crate::*;
use anyhow::Context;

/// The log of one simulated round: everything replay needs to walk the
/// recorded trajectory from any seat's point of view.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulatedDeal {
    pub direction: PassDirection,
    /// Hands as dealt, before any pass.
    pub hands: [Vec<Card>; N],
    /// Cards each seat passed, in the order it committed them. Empty on a hold round.
    pub passes: [Vec<Card>; N],
    pub tricks: Vec<TrickRecord>,
    pub payoffs: [Utility; N],
}

impl SimulatedDeal {
    pub fn has_pass(&self) -> bool {
        self.direction != PassDirection::Hold && self.passes.iter().all(|p| p.len() == PASS_SIZE)
    }

    /// Structural checks so that replay never meets a half-written record.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tricks.len() != HAND_SIZE {
            anyhow::bail!("expected {} tricks, found {}", HAND_SIZE, self.tricks.len());
        }
        for (t, trick) in self.tricks.iter().enumerate() {
            if trick.starter >= N || trick.cards.len() != N {
                anyhow::bail!("trick {} is incomplete", t);
            }
            for player in 0..N {
                let card = trick.card(player).context("missing card")?;
                if !trick.playable[player].contains(&card) {
                    anyhow::bail!("trick {}: P{} played {} outside its legal set", t, player, card);
                }
            }
        }
        if self.direction != PassDirection::Hold {
            for player in 0..N {
                let ref passed = self.passes[player];
                if passed.len() != PASS_SIZE || passed.iter().any(|c| !self.hands[player].contains(c)) {
                    anyhow::bail!("P{} passed cards it was not dealt", player);
                }
            }
        }
        Ok(())
    }

    /// Hand of `player` after committing its first `committed` passes.
    pub fn pass_legal(&self, player: Position, committed: usize) -> Vec<Card> {
        let ref gone = self.passes[player][..committed.min(self.passes[player].len())];
        self.hands[player]
            .iter()
            .filter(|c| !gone.contains(c))
            .copied()
            .collect()
    }
    pub fn pass_situation(&self, player: Position, committed: usize) -> Situation {
        Situation::pass(player, self.direction, self.pass_legal(player, committed))
    }
    /// The `nth` card `player` passed.
    pub fn passed(&self, player: Position, nth: usize) -> anyhow::Result<Card> {
        self.passes[player]
            .get(nth)
            .copied()
            .with_context(|| format!("P{} has no pass #{}", player, nth))
    }

    pub fn trick(&self, t: usize) -> anyhow::Result<&TrickRecord> {
        self.tricks
            .get(t)
            .with_context(|| format!("deal has no trick {}", t))
    }
    /// What `player` knew when it played into trick `t`.
    pub fn play_situation(&self, t: usize, player: Position) -> anyhow::Result<Situation> {
        let trick = self.trick(t)?;
        let seat = trick.seat(player);
        Ok(Situation::play(
            player,
            trick.playable[player].clone(),
            trick.cards[..seat.min(trick.cards.len())].to_vec(),
            trick.starter,
            self.tricks[..t].iter().map(|r| r.cards.clone()).collect(),
        ))
    }
    /// The card `player` played into trick `t`.
    pub fn played(&self, t: usize, player: Position) -> anyhow::Result<Card> {
        self.trick(t)?
            .card(player)
            .with_context(|| format!("trick {} has no card from P{}", t, player))
    }

    /// Every decision point of the round, passes first.
    pub fn situations(&self) -> anyhow::Result<Vec<Situation>> {
        let passes: Vec<Situation> = match self.has_pass() {
            true => (0..N)
                .flat_map(|p| (0..PASS_SIZE).map(move |k| (p, k)))
                .map(|(p, k)| self.pass_situation(p, k))
                .collect(),
            false => Vec::new(),
        };
        let plays = self
            .tricks
            .iter()
            .enumerate()
            .flat_map(|(t, r)| (0..N).map(move |i| (t, (r.starter + i) % N)))
            .map(|(t, p)| self.play_situation(t, p))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(passes.into_iter().chain(plays).collect())
    }
}

impl std::fmt::Display for SimulatedDeal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "deal(pass {}, {} tricks, payoffs {:?})",
            self.direction,
            self.tricks.len(),
            self.payoffs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal() -> SimulatedDeal {
        use rand::SeedableRng;
        let ref mut simulator = RandomSimulator::new(rand::rngs::SmallRng::seed_from_u64(5));
        simulator.simulate(1).unwrap().remove(0)
    }

    #[test]
    fn replays_what_was_played() {
        let deal = deal();
        deal.validate().unwrap();
        for t in 0..HAND_SIZE {
            for player in 0..N {
                let situation = deal.play_situation(t, player).unwrap();
                let card = deal.played(t, player).unwrap();
                assert!(situation.legal().contains(&card));
                assert_eq!(situation.tricks(), t);
                assert_eq!(situation.trick().len(), deal.tricks[t].seat(player));
            }
        }
    }

    #[test]
    fn pass_hands_shrink() {
        let deal = deal();
        assert!(deal.has_pass());
        for player in 0..N {
            for k in 0..PASS_SIZE {
                let legal = deal.pass_legal(player, k);
                assert_eq!(legal.len(), HAND_SIZE - k);
                assert!(legal.contains(&deal.passed(player, k).unwrap()));
            }
        }
        assert!(deal.passed(0, PASS_SIZE).is_err());
    }

    #[test]
    fn decision_points() {
        let deal = deal();
        let situations = deal.situations().unwrap();
        assert_eq!(situations.len(), N * PASS_SIZE + N * HAND_SIZE);
        assert_eq!(situations[0].phase(), Phase::Pass);
        assert_eq!(situations.last().map(Situation::phase), Some(Phase::Play));
    }

    #[test]
    fn truncated_deal_is_rejected() {
        let mut deal = deal();
        deal.tricks.pop();
        assert!(deal.validate().is_err());
        let mut deal = self::deal();
        deal.tricks[4].cards.pop();
        assert!(deal.validate().is_err());
    }
}
