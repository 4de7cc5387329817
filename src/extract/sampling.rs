use crate::*;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Inverse-CDF draw of one index. Falls back to a uniform draw when the
/// weights carry no usable mass. `None` only for empty weights.
pub fn sample(weights: &[Probability], rng: &mut SmallRng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let clean = weights
        .iter()
        .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 });
    match WeightedIndex::new(clean) {
        Ok(distribution) => Some(distribution.sample(rng)),
        Err(_) => Some(rng.random_range(0..weights.len())),
    }
}

/// Up to `k` distinct indices. Draws by weight until `k` are found or
/// [`PASS_DRAW_LIMIT`] draws have repeated, then fills at random.
pub fn distinct(weights: &[Probability], k: usize, rng: &mut SmallRng) -> Vec<usize> {
    let k = k.min(weights.len());
    let mut chosen = Vec::with_capacity(k);
    let mut failures = 0;
    while chosen.len() < k && failures < PASS_DRAW_LIMIT {
        match sample(weights, rng) {
            Some(i) if !chosen.contains(&i) => chosen.push(i),
            _ => failures += 1,
        }
    }
    let mut rest = (0..weights.len())
        .filter(|i| !chosen.contains(i))
        .collect::<Vec<_>>();
    rest.shuffle(rng);
    let missing = k - chosen.len();
    chosen.extend(rest.into_iter().take(missing));
    chosen
}
