use crate::regret::*;
use crate::*;

/// Accumulated regret and cumulative strategy of one information set.
///
/// Both vectors always have the same width. Reads for `n` actions use the
/// first `n` slots, padding with zero regret and zero policy when the entry
/// is narrower.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "(Vec<Utility>, Vec<Probability>)",
    into = "(Vec<Utility>, Vec<Probability>)"
)]
pub struct RegretEntry {
    regret: Vec<Utility>,
    policy: Vec<Probability>,
}

impl RegretEntry {
    /// Zero regret, uniform policy.
    pub fn uniform(n: usize) -> Self {
        Self {
            regret: vec![0.0; n],
            policy: uniform(n),
        }
    }
    pub fn width(&self) -> usize {
        self.regret.len()
    }
    pub fn regret(&self) -> &[Utility] {
        &self.regret
    }
    pub fn policy(&self) -> &[Probability] {
        &self.policy
    }
    /// Grow to at least `n` slots; new slots start at zero.
    pub fn widen(&mut self, n: usize) {
        if n > self.width() {
            self.regret.resize(n, 0.0);
            self.policy.resize(n, 0.0);
        }
    }

    fn slots(values: &[f32], n: usize) -> Vec<f32> {
        (0..n).map(|i| values.get(i).copied().unwrap_or(0.0)).collect()
    }

    /// Current strategy over the first `n` actions.
    pub fn current<M: Matching>(&self, n: usize) -> Vec<Probability> {
        M::strategy(&Self::slots(&self.regret, n))
    }
    /// Normalized cumulative policy over the first `n` actions.
    pub fn average(&self, n: usize) -> Vec<Probability> {
        normalize(Self::slots(&self.policy, n))
    }

    /// Add deltas, then restore the entry's invariants. Non-finite deltas
    /// are dropped and leave their slot as it was.
    pub fn accumulate(&mut self, regret: &[Utility], policy: &[Probability]) {
        self.widen(regret.len().max(policy.len()));
        self.regret
            .iter_mut()
            .zip(regret)
            .filter(|(_, d)| d.is_finite())
            .for_each(|(r, d)| *r += d);
        self.policy
            .iter_mut()
            .zip(policy)
            .filter(|(_, d)| d.is_finite())
            .for_each(|(p, d)| *p += d);
        self.settle();
    }
    /// Elementwise sum with another entry.
    pub fn absorb(&mut self, other: &Self) {
        self.accumulate(&other.regret, &other.policy);
    }
    /// Raw elementwise difference from `base`, without settling.
    pub fn difference(&self, base: &Self) -> Self {
        let n = self.width().max(base.width());
        let minus = |a: &[f32], b: &[f32]| {
            Self::slots(a, n)
                .into_iter()
                .zip(Self::slots(b, n))
                .map(|(x, y)| x - y)
                .collect::<Vec<_>>()
        };
        Self {
            regret: minus(&self.regret, &base.regret),
            policy: minus(&self.policy, &base.policy),
        }
    }
    /// Divide every regret by `n`.
    pub fn scale(&mut self, n: usize) {
        self.regret.iter_mut().for_each(|r| *r /= n as Utility);
    }

    /// Regret floored at zero and capped, policy a distribution.
    fn settle(&mut self) {
        self.regret.iter_mut().for_each(|r| *r = r.clamp(0.0, REGRET_LIMIT));
        self.policy = normalize(std::mem::take(&mut self.policy));
    }
}

impl From<RegretEntry> for (Vec<Utility>, Vec<Probability>) {
    fn from(entry: RegretEntry) -> Self {
        (entry.regret, entry.policy)
    }
}
impl TryFrom<(Vec<Utility>, Vec<Probability>)> for RegretEntry {
    type Error = anyhow::Error;
    fn try_from((regret, policy): (Vec<Utility>, Vec<Probability>)) -> Result<Self, Self::Error> {
        match regret.len() == policy.len() {
            true => Ok(Self { regret, policy }),
            false => Err(anyhow::anyhow!(
                "entry widths differ: {} regrets, {} policies",
                regret.len(),
                policy.len()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariants_after_update() {
        let mut entry = RegretEntry::uniform(3);
        entry.accumulate(&[5.0, -2.0, 1e30], &[-1.0, 0.5, 0.5]);
        assert_eq!(entry.regret(), &[5.0, 0.0, REGRET_LIMIT]);
        assert_eq!(entry.policy(), &[0.0, 0.5, 0.5]);
    }

    #[test]
    fn non_finite_deltas_keep_stored_values() {
        let mut entry = RegretEntry::uniform(3);
        entry.accumulate(&[4.0, 2.0, 0.0], &[0.0, 0.0, 0.0]);
        entry.accumulate(&[Utility::NAN, 1.0, Utility::INFINITY], &[Probability::NAN, 0.0, 0.0]);
        assert_eq!(entry.regret(), &[4.0, 3.0, 0.0]);
        assert!(entry.policy().iter().all(|p| p.is_finite()));
        assert!((entry.policy().iter().sum::<Probability>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_policy_mass_resets_uniform() {
        let mut entry = RegretEntry::uniform(2);
        entry.accumulate(&[0.0, 0.0], &[-0.5, -0.5]);
        assert_eq!(entry.policy(), &[0.5, 0.5]);
    }

    #[test]
    fn widening_pads_zeros() {
        let mut entry = RegretEntry::uniform(2);
        entry.widen(4);
        assert_eq!(entry.width(), 4);
        assert_eq!(entry.regret(), &[0.0; 4]);
        assert_eq!(entry.policy(), &[0.5, 0.5, 0.0, 0.0]);
        assert_eq!(entry.average(2), vec![0.5, 0.5]);
        entry.widen(1);
        assert_eq!(entry.width(), 4);
    }

    #[test]
    fn narrow_reads_pad() {
        let entry = RegretEntry::uniform(2);
        assert_eq!(entry.average(3), vec![0.5, 0.5, 0.0]);
        assert_eq!(entry.current::<Proportional>(3), vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn difference_then_absorb() {
        let base = RegretEntry::uniform(2);
        let mut shard = base.clone();
        shard.accumulate(&[2.0, 0.0], &[0.5, 0.0]);
        let delta = shard.difference(&base);
        let mut merged = base.clone();
        merged.absorb(&delta);
        assert_eq!(merged, shard);
    }

    #[test]
    fn rejects_ragged_json() {
        assert!(serde_json::from_str::<RegretEntry>("[[1.0],[0.5,0.5]]").is_err());
        let entry = serde_json::from_str::<RegretEntry>("[[1.0,0.0],[0.5,0.5]]").unwrap();
        assert_eq!(entry.regret(), &[1.0, 0.0]);
    }
}
