use crate::cards::*;
use crate::deals::*;
use crate::hearts::*;
use crate::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Source of logged deals for training.
pub trait Simulator {
    fn simulate(&mut self, deals: usize) -> anyhow::Result<Vec<SimulatedDeal>>;
}

impl<S: Simulator + ?Sized> Simulator for Box<S> {
    fn simulate(&mut self, deals: usize) -> anyhow::Result<Vec<SimulatedDeal>> {
        (**self).simulate(deals)
    }
}

/// Self-play where every seat picks uniformly among its legal cards.
/// Pass directions rotate from one deal to the next.
#[derive(Debug, Clone)]
pub struct RandomSimulator {
    rng: SmallRng,
    round: usize,
}

impl RandomSimulator {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng, round: 0 }
    }

    fn play(&mut self) -> anyhow::Result<SimulatedDeal> {
        let direction = PassDirection::for_round(self.round);
        self.round += 1;
        let mut round = Round::deal(direction, &mut self.rng);
        let hands = round.hands().clone();
        let mut passes: [Vec<Card>; N] = Default::default();
        let mut tricks = Vec::with_capacity(HAND_SIZE);
        let mut record = None::<TrickRecord>;
        while !round.is_over() {
            let ref legal = round.legal();
            let card = *legal
                .choose(&mut self.rng)
                .ok_or_else(|| anyhow::anyhow!("P{} has no legal card", round.turn()))?;
            let phase = round.phase();
            if phase == Phase::Play {
                let trick = record.get_or_insert_with(|| TrickRecord::new(round.starter()));
                trick.playable[round.turn()] = legal.clone();
                trick.cards.push(card);
            }
            let before = round.history().len();
            let next = round.apply(card)?;
            if phase == Phase::Pass && next.phase() == Phase::Play {
                passes = round.passes().clone();
                passes[round.turn()].push(card);
            }
            if next.history().len() > before {
                tricks.extend(record.take());
            }
            round = next;
        }
        log::trace!("simulated round with points {:?}", round.points());
        Ok(SimulatedDeal {
            direction,
            hands,
            passes,
            tricks,
            payoffs: round.payoffs(),
        })
    }
}

impl Simulator for RandomSimulator {
    fn simulate(&mut self, deals: usize) -> anyhow::Result<Vec<SimulatedDeal>> {
        (0..deals).map(|_| self.play()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn logs_are_consistent() {
        let ref mut simulator = RandomSimulator::new(SmallRng::seed_from_u64(1));
        let deals = simulator.simulate(8).unwrap();
        assert_eq!(deals.len(), 8);
        for deal in deals.iter() {
            deal.validate().unwrap();
            assert!(deal.payoffs.iter().sum::<Utility>().abs() < 1e-4);
            let played = deal.tricks.iter().flat_map(|t| t.cards.iter()).count();
            assert_eq!(played, crate::DECK_SIZE);
        }
        assert_eq!(deals[0].direction, PassDirection::Left);
        assert_eq!(deals[3].direction, PassDirection::Hold);
        assert!(!deals[3].has_pass());
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = RandomSimulator::new(SmallRng::seed_from_u64(9)).simulate(2).unwrap();
        let b = RandomSimulator::new(SmallRng::seed_from_u64(9)).simulate(2).unwrap();
        assert_eq!(a, b);
    }
}
