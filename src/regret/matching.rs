//! Regret matching and the sampling transforms around it.

use crate::*;

/// Turns accumulated regret into a current strategy.
pub trait Matching {
    fn strategy(regret: &[Utility]) -> Vec<Probability>;
}

/// Regret matching with ε mass on every action.
///
/// s(a) = (max(r(a), 0) + ε) / (Σ (max(r, 0) + ε) + c·ε), renormalized so
/// the result is a distribution. Never assigns zero to an action.
#[derive(Debug, Clone, Copy, Default)]
pub struct Regularized;

impl Matching for Regularized {
    fn strategy(regret: &[Utility]) -> Vec<Probability> {
        let weights = regret
            .iter()
            .map(|r| r.max(0.0) + REGRET_EPSILON)
            .collect::<Vec<_>>();
        let denom = weights.iter().sum::<Utility>() + REGRET_CONTROL * REGRET_EPSILON;
        match denom {
            d if d > 0.0 && d.is_finite() => normalize(weights.into_iter().map(|w| w / d).collect()),
            _ => uniform(regret.len()),
        }
    }
}

/// Plain regret matching: positive regret shares, uniform when none is positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Proportional;

impl Matching for Proportional {
    fn strategy(regret: &[Utility]) -> Vec<Probability> {
        normalize(regret.iter().map(|r| r.max(0.0)).collect())
    }
}

pub fn uniform(n: usize) -> Vec<Probability> {
    vec![1.0 / n.max(1) as Probability; n]
}

/// Scale to sum 1, or uniform when there is no usable mass.
pub fn normalize(weights: Vec<Probability>) -> Vec<Probability> {
    let sum = weights
        .iter()
        .filter(|w| w.is_finite())
        .map(|w| w.max(0.0))
        .sum::<Probability>();
    match sum {
        s if s > 0.0 && s.is_finite() => weights
            .into_iter()
            .map(|w| if w.is_finite() { w.max(0.0) / s } else { 0.0 })
            .collect(),
        _ => uniform(weights.len()),
    }
}

/// Sampling distribution at the traverser's own nodes:
/// q(a) = x/n + (1 - x)·s(a).
pub fn explore(strategy: &[Probability]) -> Vec<Probability> {
    let n = strategy.len().max(1) as Probability;
    strategy
        .iter()
        .map(|s| SAMPLING_EXPLORATION / n + (1.0 - SAMPLING_EXPLORATION) * s)
        .collect()
}

/// Compresses terminal payoffs: sign(u)·sqrt(|u|).
pub fn terminal(payoff: Utility) -> Utility {
    payoff.signum() * payoff.abs().sqrt()
}
