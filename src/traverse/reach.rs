use crate::*;

/// Reach probabilities carried down one sampled trajectory.
///
/// `own` is the traverser's contribution, `opp` everyone else's, and
/// `sample` the probability of having sampled this path at all. All three
/// are kept as natural logs in f64: a full play replay multiplies dozens of
/// small weights, which underflows f32 well before the last trick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reach {
    own: f64,
    opp: f64,
    sample: f64,
}

impl Default for Reach {
    fn default() -> Self {
        Self {
            own: 0.0,
            opp: 0.0,
            sample: 0.0,
        }
    }
}

impl Reach {
    pub fn own(&self) -> f64 {
        self.own.exp()
    }
    pub fn opp(&self) -> f64 {
        self.opp.exp()
    }
    pub fn sample(&self) -> f64 {
        self.sample.exp()
    }
    /// Reach after taking an action with strategy weight `s` and sampling weight `q`.
    pub fn descend(&self, mine: bool, s: Probability, q: Probability) -> Self {
        let s = f64::from(s).ln();
        let q = f64::from(q).ln();
        Self {
            own: if mine { self.own + s } else { self.own },
            opp: if mine { self.opp } else { self.opp + s },
            sample: self.sample + q,
        }
    }
    /// Weight on regret deltas, `opp / sample`.
    pub fn counterfactual(&self) -> Option<Utility> {
        self.ratio(self.opp)
    }
    /// Weight on strategy deltas, `own / sample`.
    pub fn ownership(&self) -> Option<Probability> {
        self.ratio(self.own)
    }
    /// `None` when the path has no sampling mass or the numerator is degenerate.
    /// Finite ratios are capped at the regret ceiling.
    fn ratio(&self, numerator: f64) -> Option<f32> {
        match self.sample.is_finite() && numerator.is_finite() {
            true => Some((numerator - self.sample).exp().min(f64::from(REGRET_LIMIT)) as f32),
            false => None,
        }
    }
}
