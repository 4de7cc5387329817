use crate::hearts::*;
use crate::*;

/// Weaken a strategy for lower difficulties.
///
/// Among the `k` actions with positive weight, Medium scales the strongest
/// `k/2` and Hard the strongest `k/4` by [`DISTORTION_FACTOR`]. The result is
/// left unnormalized; sampling normalizes implicitly.
pub fn distort(strategy: &[Probability], difficulty: Difficulty) -> Vec<Probability> {
    let support = strategy.iter().filter(|p| **p > 0.0).count();
    let lowered = difficulty.lowered(support);
    let mut distorted = strategy.to_vec();
    if support <= 1 || lowered == 0 {
        return distorted;
    }
    let mut order = (0..strategy.len()).collect::<Vec<_>>();
    order.sort_by(|a, b| strategy[*b].total_cmp(&strategy[*a]));
    order
        .into_iter()
        .take(lowered)
        .for_each(|i| distorted[i] *= DISTORTION_FACTOR);
    distorted
}
