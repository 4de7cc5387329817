use crate::abstraction::*;
use crate::cards::*;
use crate::extract::*;
use crate::hearts::*;
use crate::regret::*;
use crate::*;
use rand::Rng;
use rand::rngs::SmallRng;

/// Play-time reader of trained tables.
///
/// Each decision costs one key derivation, at most one table lookup and the
/// sampling draws. Tables are only borrowed; nothing is written back.
pub struct StrategyExtractor<'a, P, H, L>
where
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    tables: &'a Tables,
    pass: &'a P,
    high: &'a H,
    low: &'a L,
    rng: SmallRng,
}

impl<'a, P, H, L> StrategyExtractor<'a, P, H, L>
where
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    pub fn new(tables: &'a Tables, pass: &'a P, high: &'a H, low: &'a L, rng: SmallRng) -> Self {
        Self {
            tables,
            pass,
            high,
            low,
            rng,
        }
    }

    /// Weaker seats read the coarse play table.
    fn play(&self, difficulty: Difficulty) -> (&'a RegretTable, &'a dyn Encoder) {
        match difficulty.coarse() {
            true => {
                let encoder: &'a dyn Encoder = self.low;
                (self.tables.get(Table::PlayLow), encoder)
            }
            false => {
                let encoder: &'a dyn Encoder = self.high;
                (self.tables.get(Table::PlayHigh), encoder)
            }
        }
    }

    fn any(&mut self, legal: &[Card]) -> Card {
        legal[self.rng.random_range(0..legal.len())]
    }

    /// Choose a card to play. Always returns one of the situation's legal cards.
    pub fn select_action(&mut self, situation: &Situation, difficulty: Difficulty) -> anyhow::Result<Card> {
        if situation.phase() != Phase::Play {
            anyhow::bail!("{} is not a play decision", situation);
        }
        let legal = situation.legal();
        match legal.len() {
            0 => anyhow::bail!("no legal cards for {}", situation),
            1 => return Ok(legal[0]),
            _ => {}
        }
        let (table, encoder) = self.play(difficulty);
        let card = match encoder.encode(situation) {
            None => {
                log::debug!("abstraction miss for {}", situation);
                None
            }
            Some(ref key) => match key {
                InfoSetKey::Learned(values) => {
                    let order = ranked(values, legal.len());
                    order
                        .get(difficulty.rank())
                        .or(order.first())
                        .and_then(|i| encoder.action(key, situation, *i))
                }
                _ if difficulty == Difficulty::Easy => None,
                _ => {
                    let width = table.get(key).map_or(legal.len(), RegretEntry::width);
                    let ref strategy = distort(&table.average(key, width), difficulty);
                    sample(strategy, &mut self.rng)
                        .and_then(|i| encoder.action(key, situation, i))
                        .or_else(|| best(strategy, legal))
                }
            },
        };
        Ok(resolve(card, legal).unwrap_or_else(|| self.any(legal)))
    }

    /// Choose three distinct cards to pass.
    pub fn select_pass(
        &mut self,
        situation: &Situation,
        difficulty: Difficulty,
    ) -> anyhow::Result<[Card; PASS_SIZE]> {
        if situation.phase() != Phase::Pass {
            anyhow::bail!("{} is not a pass decision", situation);
        }
        let legal = situation.legal();
        if legal.len() < PASS_SIZE {
            anyhow::bail!("cannot pass {} cards from {}", PASS_SIZE, situation);
        }
        let table = self.tables.get(Table::Pass);
        let encoder = self.pass;
        let key = encoder.encode(situation);
        let indices = match key {
            None => {
                log::debug!("abstraction miss for {}", situation);
                distinct(&uniform(legal.len()), PASS_SIZE, &mut self.rng)
            }
            Some(InfoSetKey::Learned(ref values)) => ranked(values, legal.len())
                .into_iter()
                .take(PASS_SIZE)
                .collect(),
            Some(ref key) => {
                let width = table.get(key).map_or(legal.len(), RegretEntry::width);
                let strategy = match difficulty {
                    Difficulty::Easy => uniform(width),
                    _ => distort(&table.average(key, width), difficulty),
                };
                distinct(&strategy, PASS_SIZE, &mut self.rng)
            }
        };
        let wanted = indices
            .into_iter()
            .filter_map(|i| match key {
                Some(ref key) => encoder.action(key, situation, i),
                None => legal.get(i).copied(),
            })
            .collect::<Vec<_>>();
        let chosen = nearest_distinct(&wanted, legal, PASS_SIZE);
        <[Card; PASS_SIZE]>::try_from(chosen)
            .map_err(|v| anyhow::anyhow!("picked {} pass cards", v.len()))
    }
}

/// Slot indices below `n`, best predicted value first.
fn ranked(values: &[Utility], n: usize) -> Vec<usize> {
    let mut order = (0..n.min(values.len())).collect::<Vec<_>>();
    order.sort_by(|a, b| values[*b].total_cmp(&values[*a]));
    order
}

/// Legal card at the strongest slot that indexes the legal list.
fn best(strategy: &[Probability], legal: &[Card]) -> Option<Card> {
    strategy
        .iter()
        .take(legal.len())
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .and_then(|(i, _)| legal.get(i).copied())
}

/// The card itself when legal, otherwise the most similar legal card.
fn resolve(card: Option<Card>, legal: &[Card]) -> Option<Card> {
    match card {
        Some(card) if legal.contains(&card) => Some(card),
        Some(card) => card.nearest(legal),
        None => None,
    }
}

/// Map each wanted card to its most similar legal card not yet taken,
/// then top up from the remaining legal cards.
fn nearest_distinct(wanted: &[Card], legal: &[Card], k: usize) -> Vec<Card> {
    let mut chosen = Vec::with_capacity(k);
    for card in wanted.iter() {
        let free = legal
            .iter()
            .filter(|c| !chosen.contains(*c))
            .copied()
            .collect::<Vec<_>>();
        if let Some(near) = card.nearest(&free) {
            chosen.push(near);
        }
        if chosen.len() == k {
            return chosen;
        }
    }
    for card in legal.iter() {
        if chosen.len() == k {
            break;
        }
        if !chosen.contains(card) {
            chosen.push(*card);
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn c(n: u8) -> Card {
        Card::try_from(n).unwrap()
    }

    fn situation() -> Situation {
        Situation::play(1, vec![c(2), c(7), c(11), c(30)], vec![c(5)], 0, vec![])
    }

    fn trained(encoder: &ExactEncoder) -> Tables {
        let mut tables = Tables::default();
        let ref key = encoder.encode(&situation()).unwrap();
        for table in [Table::PlayHigh, Table::PlayLow] {
            tables
                .get_mut(table)
                .update(key, &[0.0; 4], &[10.0, -1.0, -1.0, -1.0]);
        }
        tables
    }

    #[test]
    fn expert_plays_the_trained_card() {
        let ref encoder = ExactEncoder::new(Memory::High);
        let ref tables = trained(encoder);
        let rng = SmallRng::seed_from_u64(0);
        let mut extractor = StrategyExtractor::new(tables, encoder, encoder, encoder, rng);
        for _ in 0..50 {
            let card = extractor.select_action(&situation(), Difficulty::Expert).unwrap();
            assert_eq!(card, c(2));
        }
    }

    #[test]
    fn single_legal_card_short_circuits() {
        let ref encoder = ExactEncoder::default();
        let ref tables = Tables::default();
        let mut extractor =
            StrategyExtractor::new(tables, encoder, encoder, encoder, SmallRng::seed_from_u64(0));
        let situation = Situation::play(0, vec![c(9)], vec![], 0, vec![]);
        assert_eq!(extractor.select_action(&situation, Difficulty::Hard).unwrap(), c(9));
        let empty = Situation::play(0, vec![], vec![], 0, vec![]);
        assert!(extractor.select_action(&empty, Difficulty::Hard).is_err());
    }

    #[test]
    fn decisions_match_their_phase() {
        let ref encoder = ExactEncoder::default();
        let ref tables = Tables::default();
        let mut extractor =
            StrategyExtractor::new(tables, encoder, encoder, encoder, SmallRng::seed_from_u64(0));
        let hand = (1..=13u8).map(c).collect::<Vec<_>>();
        let ref passing = Situation::pass(0, PassDirection::Left, hand);
        assert!(extractor.select_action(passing, Difficulty::Expert).is_err());
        assert!(extractor.select_pass(&situation(), Difficulty::Expert).is_err());
    }

    #[test]
    fn invalid_cluster_still_plays_legally() {
        let mut centroid = vec![SENTINEL; PLAY_FEATURES];
        centroid[Features::LEGAL] = 20.0;
        centroid[Features::LEGAL + 1] = 77.0;
        let ref encoder = ClusterEncoder::new(Centroids::from(vec![centroid]), Memory::High);
        let mut tables = Tables::default();
        for table in [Table::PlayHigh, Table::PlayLow] {
            tables
                .get_mut(table)
                .update(&InfoSetKey::Cluster(0), &[0.0; 6], &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        }
        let ref tables = tables;
        let mut extractor =
            StrategyExtractor::new(tables, encoder, encoder, encoder, SmallRng::seed_from_u64(1));
        let ref situation = situation();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
            for _ in 0..20 {
                let card = extractor.select_action(situation, difficulty).unwrap();
                assert!(situation.legal().contains(&card));
            }
        }
    }

    #[test]
    fn learned_ranks_by_difficulty() {
        let weights = vec![vec![0.0; PLAY_FEATURES]; 4];
        let model = Linear::new(weights, vec![0.5, 3.0, 1.0, 2.0]).unwrap();
        let ref encoder = LearnedEncoder::new(model, Memory::High);
        let ref tables = Tables::default();
        let mut extractor =
            StrategyExtractor::new(tables, encoder, encoder, encoder, SmallRng::seed_from_u64(0));
        let ref situation = situation();
        assert_eq!(extractor.select_action(situation, Difficulty::Expert).unwrap(), c(7));
        assert_eq!(extractor.select_action(situation, Difficulty::Hard).unwrap(), c(30));
        assert_eq!(extractor.select_action(situation, Difficulty::Medium).unwrap(), c(11));
        assert_eq!(extractor.select_action(situation, Difficulty::Easy).unwrap(), c(2));
    }

    #[test]
    fn passes_three_distinct_legal_cards() {
        let ref encoder = ExactEncoder::default();
        let legal = (1..=13u8).map(c).collect::<Vec<_>>();
        let ref situation = Situation::pass(0, PassDirection::Left, legal.clone());
        let mut tables = Tables::default();
        let ref key = encoder.encode(situation).unwrap();
        let mut policy = vec![-1.0; 13];
        policy[12] = 1.0;
        tables.get_mut(Table::Pass).update(key, &[0.0; 13], &policy);
        let ref tables = tables;
        let mut extractor =
            StrategyExtractor::new(tables, encoder, encoder, encoder, SmallRng::seed_from_u64(3));
        for difficulty in [Difficulty::Easy, Difficulty::Expert] {
            let picks = extractor.select_pass(situation, difficulty).unwrap();
            assert!(picks.iter().all(|p| legal.contains(p)));
            assert!(picks[0] != picks[1] && picks[1] != picks[2] && picks[0] != picks[2]);
        }
        let picks = extractor.select_pass(situation, Difficulty::Expert).unwrap();
        assert_eq!(picks[0], c(13));
    }

    #[test]
    fn nearest_distinct_never_repeats() {
        let legal = vec![c(1), c(2), c(40)];
        let chosen = nearest_distinct(&[c(3), c(3), c(3)], &legal, 3);
        assert_eq!(chosen, vec![c(2), c(1), c(40)]);
        assert_eq!(nearest_distinct(&[], &legal, 3), legal);
    }
}
