use crate::abstraction::*;
use crate::extract::sample;
use crate::hearts::*;
use crate::regret::*;
use crate::*;
use rand::rngs::SmallRng;

/// Full-width external sampling over a live rules engine.
///
/// - Expands every legal card at the traverser's decisions
/// - Samples one card at everyone else's decisions from the current strategy
///
/// Pass decisions read and write the pass table, play decisions the
/// high-resolution play table. Uses plain regret matching.
pub struct ExternalSampling<'a, R, P, Q>
where
    R: Rules,
    P: Encoder,
    Q: Encoder,
{
    rules: &'a R,
    pass: &'a P,
    play: &'a Q,
    tables: &'a mut Tables,
    rng: &'a mut SmallRng,
}

impl<'a, R, P, Q> ExternalSampling<'a, R, P, Q>
where
    R: Rules,
    P: Encoder,
    Q: Encoder,
{
    pub fn new(
        rules: &'a R,
        pass: &'a P,
        play: &'a Q,
        tables: &'a mut Tables,
        rng: &'a mut SmallRng,
    ) -> Self {
        Self {
            rules,
            pass,
            play,
            tables,
            rng,
        }
    }

    /// Deal a fresh state and traverse it for `walker`.
    pub fn iterate(&mut self, walker: Position) -> anyhow::Result<Utility> {
        let ref root = self.rules.deal(self.rng);
        self.traverse(root, walker, 1.0, 1.0)
    }

    pub fn traverse(
        &mut self,
        state: &R::State,
        walker: Position,
        own: Probability,
        opp: Probability,
    ) -> anyhow::Result<Utility> {
        if self.rules.is_terminal(state) {
            return Ok(terminal(self.rules.payoff(state, walker)));
        }
        let ref actions = self.rules.legal_actions(state);
        let n = actions.len();
        if n == 0 {
            anyhow::bail!("P{} has no legal actions", self.rules.turn(state));
        }
        let ref situation = self.rules.situation(state);
        let (table, key) = match situation.phase() {
            Phase::Pass => (Table::Pass, self.pass.encode(situation)),
            Phase::Play => (Table::PlayHigh, self.play.encode(situation)),
        };
        let ref strategy = match key {
            Some(ref key) => self
                .tables
                .get_mut(table)
                .strategy_with::<Proportional>(key, n),
            None => uniform(n),
        };
        if self.rules.turn(state) != walker {
            let a = sample(strategy, self.rng).unwrap_or_default();
            let ref next = self.rules.apply(state, actions[a])?;
            return self.traverse(next, walker, own, opp * strategy[a]);
        }
        let mut values = Vec::with_capacity(n);
        for (action, s) in actions.iter().zip(strategy.iter()) {
            let ref next = self.rules.apply(state, *action)?;
            values.push(self.traverse(next, walker, own * s, opp)?);
        }
        let value = strategy
            .iter()
            .zip(values.iter())
            .map(|(s, v)| s * v)
            .sum::<Utility>();
        if let Some(ref key) = key {
            let ref regrets = values.iter().map(|v| opp * (v - value)).collect::<Vec<_>>();
            let ref policies = strategy.iter().map(|s| own * s).collect::<Vec<_>>();
            self.tables.get_mut(table).update(key, regrets, policies);
        }
        Ok(value)
    }
}
