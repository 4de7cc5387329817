use crate::abstraction::*;
use crate::cards::*;
use crate::hearts::*;
use crate::regret::*;
use crate::traverse::*;
use crate::*;

/// Outcome-sampling traversal along a logged trajectory.
///
/// Each node follows the card the log recorded, so the sampled path is the
/// deal itself. Implementors describe how to walk the log; the provided
/// [`Replay::traverse`] does the regret bookkeeping.
pub trait Replay {
    type E: Encoder;
    fn encoder(&self) -> &Self::E;
    fn table(&mut self) -> &mut RegretTable;

    /// First decision of this phase when `walker` is the traverser.
    fn root(&self, walker: Position) -> anyhow::Result<Node>;
    fn terminal(&self, node: &Node) -> bool;
    /// What the acting seat knew at `node`.
    fn situation(&self, node: &Node) -> anyhow::Result<Situation>;
    /// The card the log says was chosen at `node`.
    fn logged(&self, node: &Node) -> anyhow::Result<Card>;
    fn child(&self, node: &Node, card: Card) -> anyhow::Result<Node>;

    /// Current strategy for a key. A miss gets a uniform strategy that is
    /// never stored; learned values are matched but never stored either.
    fn strategy(&mut self, key: Option<&InfoSetKey>, n: usize) -> Vec<Probability> {
        match key {
            None => uniform(n),
            Some(InfoSetKey::Learned(values)) => Regularized::strategy(
                &(0..n)
                    .map(|i| values.get(i).copied().unwrap_or(0.0))
                    .collect::<Vec<_>>(),
            ),
            Some(key) => self.table().strategy_for(key, n),
        }
    }

    /// Replay this phase of the deal for `walker` and return its value.
    fn replay(&mut self, walker: Position, payoff: Utility) -> anyhow::Result<Utility> {
        let ref root = self.root(walker)?;
        self.traverse(root, walker, Reach::default(), payoff)
    }

    fn traverse(
        &mut self,
        node: &Node,
        walker: Position,
        reach: Reach,
        payoff: Utility,
    ) -> anyhow::Result<Utility> {
        if self.terminal(node) {
            return Ok(terminal(payoff));
        }
        let n = node.actions().len();
        if n == 0 {
            anyhow::bail!("no legal actions at {}", node);
        }
        let ref situation = self.situation(node)?;
        let key = self.encoder().encode(situation);
        let ref strategy = self.strategy(key.as_ref(), n);
        let mine = node.player() == walker;
        let ref sampling = match mine {
            true => explore(strategy),
            false => strategy.clone(),
        };
        let card = self.logged(node)?;
        let a = node
            .actions()
            .iter()
            .position(|c| *c == card)
            .ok_or_else(|| anyhow::anyhow!("logged {} is not legal at {}", card, node))?;
        let q = sampling[a].max(POLICY_MIN);
        let ref child = self.child(node, card)?;
        let value = self.traverse(child, walker, reach.descend(mine, strategy[a], q), payoff)?;
        let ref advantages = (0..n)
            .map(|i| if i == a { value / q } else { 0.0 })
            .collect::<Vec<Utility>>();
        let expected = strategy
            .iter()
            .zip(advantages.iter())
            .map(|(s, v)| s * v)
            .sum::<Utility>();
        if mine {
            if let Some(ref key) = key.filter(InfoSetKey::is_stored) {
                match (reach.counterfactual(), reach.ownership()) {
                    (Some(counterfactual), Some(ownership)) => {
                        let ref regrets = advantages
                            .iter()
                            .map(|v| (v - expected) * counterfactual)
                            .collect::<Vec<_>>();
                        let ref policies = strategy
                            .iter()
                            .map(|s| s * ownership)
                            .collect::<Vec<_>>();
                        log::trace!("update {} at {}", key, node);
                        self.table().update(key, regrets, policies);
                    }
                    _ => log::debug!("degenerate reach {:?} at {}, skipping update", reach, node),
                }
            }
        }
        Ok(expected)
    }
}
