use crate::abstraction::*;
use crate::cards::*;
use crate::extract::*;
use crate::hearts::*;
use crate::*;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Seat 0 plays from the extractor against three uniformly random seats.
///
/// Needs no table writes, so it is the way to exercise encoders whose keys
/// are never stored.
pub struct Arena<'a, 'b, P, H, L>
where
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    extractor: &'b mut StrategyExtractor<'a, P, H, L>,
    difficulty: Difficulty,
    rng: SmallRng,
}

impl<'a, 'b, P, H, L> Arena<'a, 'b, P, H, L>
where
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    pub fn new(extractor: &'b mut StrategyExtractor<'a, P, H, L>, difficulty: Difficulty, rng: SmallRng) -> Self {
        Self {
            extractor,
            difficulty,
            rng,
        }
    }

    /// Mean payoff of seat 0 over up to `rounds` rounds.
    pub fn evaluate(&mut self, rounds: usize) -> anyhow::Result<Utility> {
        log::info!("evaluating {:?} seat over {} rounds", self.difficulty, rounds);
        let mut total = 0.0;
        let mut played = 0;
        for r in 0..rounds {
            if interrupted() {
                break;
            }
            total += self.round(PassDirection::for_round(r))?[0];
            played += 1;
        }
        let mean = match played {
            0 => 0.0,
            n => total / n as Utility,
        };
        log::info!("seat 0 averaged {:.3} over {} rounds", mean, played);
        Ok(mean)
    }

    fn round(&mut self, direction: PassDirection) -> anyhow::Result<[Utility; N]> {
        let mut round = Round::deal(direction, &mut self.rng);
        let mut queued = Vec::<Card>::new();
        while !round.is_over() {
            let card = match round.turn() {
                0 => self.choose(&round, &mut queued)?,
                p => *round
                    .legal()
                    .choose(&mut self.rng)
                    .ok_or_else(|| anyhow::anyhow!("P{} has no legal card", p))?,
            };
            round = round.apply(card)?;
        }
        log::trace!("round over with points {:?}", round.points());
        Ok(round.payoffs())
    }

    /// Passes are picked three at a time and committed one per turn.
    fn choose(&mut self, round: &Round, queued: &mut Vec<Card>) -> anyhow::Result<Card> {
        let ref situation = round.situation();
        match situation.phase() {
            Phase::Play => self.extractor.select_action(situation, self.difficulty),
            Phase::Pass => {
                if queued.is_empty() {
                    let picks = self.extractor.select_pass(situation, self.difficulty)?;
                    queued.extend(picks.into_iter().rev());
                }
                queued
                    .pop()
                    .filter(|c| situation.legal().contains(c))
                    .ok_or_else(|| anyhow::anyhow!("queued pass is not legal for {}", situation))
            }
        }
    }
}
