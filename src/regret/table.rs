use crate::abstraction::*;
use crate::regret::*;
use crate::*;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Regret and cumulative strategy per information set.
///
/// Entries appear on first visit with zero regret and a uniform policy.
/// Learned keys never get an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegretTable(BTreeMap<InfoSetKey, RegretEntry>);

impl RegretTable {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, key: &InfoSetKey) -> Option<&RegretEntry> {
        self.0.get(key)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&InfoSetKey, &RegretEntry)> {
        self.0.iter()
    }

    fn entry(&mut self, key: &InfoSetKey, n: usize) -> &mut RegretEntry {
        let entry = self
            .0
            .entry(key.clone())
            .or_insert_with(|| RegretEntry::uniform(n));
        entry.widen(n);
        entry
    }

    /// Current regularized strategy for `n` actions. Inserts on first visit.
    pub fn strategy_for(&mut self, key: &InfoSetKey, n: usize) -> Vec<Probability> {
        self.strategy_with::<Regularized>(key, n)
    }
    /// Current strategy under any matching rule. Inserts on first visit.
    pub fn strategy_with<M: Matching>(&mut self, key: &InfoSetKey, n: usize) -> Vec<Probability> {
        match key.is_stored() {
            true => self.entry(key, n).current::<M>(n),
            false => uniform(n),
        }
    }
    /// Accumulate deltas into the entry for `key`.
    pub fn update(&mut self, key: &InfoSetKey, regret: &[Utility], policy: &[Probability]) {
        if !key.is_stored() {
            log::trace!("ignoring update for unstored key {}", key);
            return;
        }
        let n = regret.len().max(policy.len());
        self.entry(key, n).accumulate(regret, policy);
    }
    /// Normalized cumulative policy, uniform for an unseen key.
    pub fn average(&self, key: &InfoSetKey, n: usize) -> Vec<Probability> {
        self.0
            .get(key)
            .map(|e| e.average(n))
            .unwrap_or_else(|| uniform(n))
    }
    /// Divide all regrets by the number of iterations performed.
    pub fn average_over(&mut self, iterations: usize) {
        if iterations == 0 {
            return;
        }
        self.0.values_mut().for_each(|e| e.scale(iterations));
    }

    /// Elementwise sum of another table into this one.
    pub fn merge(&mut self, other: Self) {
        for (key, entry) in other.0 {
            match self.0.get_mut(&key) {
                Some(mine) => mine.absorb(&entry),
                None => {
                    let mut fresh = RegretEntry::default();
                    fresh.absorb(&entry);
                    self.0.insert(key, fresh);
                }
            }
        }
    }
    /// What this table gained relative to `base`; entries identical to the base are left out.
    pub fn delta(&self, base: &Self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, e)| base.0.get(*k) != Some(*e))
                .map(|(k, e)| match base.0.get(k) {
                    Some(b) => (k.clone(), e.difference(b)),
                    None => (k.clone(), e.clone()),
                })
                .collect(),
        )
    }

    /// Write as a JSON object of key string to `[[regret], [policy]]`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating table {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .with_context(|| format!("writing table {}", path.display()))?;
        writer.flush()?;
        log::info!("saved {:>10} infosets to {}", self.len(), path.display());
        Ok(())
    }
    /// Read a saved table. A missing file is an empty table.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no table at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening table {}", path.display()))?;
        let table = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))
            .with_context(|| format!("parsing table {}", path.display()))?;
        log::info!("loaded {:>10} infosets from {}", table.len(), path.display());
        Ok(table)
    }
}

impl serde::Serialize for RegretTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, e)| (k.to_string(), e)))
    }
}
impl<'de> serde::Deserialize<'de> for RegretTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, RegretEntry>::deserialize(deserializer)?
            .into_iter()
            .map(|(k, e)| k.parse::<InfoSetKey>().map(|k| (k, e)))
            .collect::<anyhow::Result<BTreeMap<_, _>>>()
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> InfoSetKey {
        InfoSetKey::Exact(s.to_string())
    }

    #[test]
    fn unseen_key_is_uniform_and_reads_are_pure() {
        let mut table = RegretTable::new();
        let ref k = key("0:false:[1, 2, 3]:[]");
        let first = table.strategy_for(k, 3);
        let again = table.strategy_for(k, 3);
        assert_eq!(first, again);
        assert!(first.iter().all(|p| (p - 1.0 / 3.0).abs() < 1e-6));
        assert_eq!(table.get(k), Some(&RegretEntry::uniform(3)));
        assert_eq!(table.average(&key("1:[]"), 2), vec![0.5, 0.5]);
    }

    #[test]
    fn update_keeps_invariants() {
        let mut table = RegretTable::new();
        let ref k = InfoSetKey::Cluster(7);
        table.update(k, &[-3.0, 2e20], &[0.2, -0.9]);
        let entry = table.get(k).unwrap();
        assert!(entry.regret().iter().all(|r| *r >= 0.0 && *r <= REGRET_LIMIT));
        assert!((entry.policy().iter().sum::<Probability>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn learned_keys_are_not_stored() {
        let mut table = RegretTable::new();
        let ref k = InfoSetKey::Learned(vec![1.0, 2.0]);
        assert_eq!(table.strategy_for(k, 2), vec![0.5, 0.5]);
        table.update(k, &[1.0, 1.0], &[0.5, 0.5]);
        assert!(table.is_empty());
    }

    #[test]
    fn averaging_divides_regret() {
        let mut table = RegretTable::new();
        let ref k = key("0:[]");
        table.update(k, &[4.0, 8.0], &[0.0, 0.0]);
        table.average_over(4);
        assert_eq!(table.get(k).unwrap().regret(), &[1.0, 2.0]);
        table.average_over(0);
        assert_eq!(table.get(k).unwrap().regret(), &[1.0, 2.0]);
    }

    #[test]
    fn shard_deltas_merge_back() {
        let mut base = RegretTable::new();
        base.update(&key("a:1"), &[1.0, 0.0], &[0.0, 0.0]);
        let mut shard = base.clone();
        shard.update(&key("a:1"), &[1.0, 3.0], &[0.0, 0.0]);
        shard.update(&key("b:2"), &[0.0, 5.0], &[1.0, 0.0]);
        let delta = shard.delta(&base);
        assert_eq!(delta.len(), 2);
        base.merge(delta);
        assert_eq!(base, shard);
    }

    #[test]
    fn persistence_round_trip() {
        let mut table = RegretTable::new();
        table.update(&key("3:false:[1, 5, 9]:[14]"), &[0.5, 0.25, 0.0], &[0.1, 0.2, 0.7]);
        table.update(&InfoSetKey::Cluster(12), &[1.0], &[1.0]);
        let path = std::env::temp_dir().join(format!("robohearts-table-{}.json", std::process::id()));
        table.save(&path).unwrap();
        let loaded = RegretTable::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, table);
    }

    #[test]
    fn missing_file_is_empty() {
        let path = std::env::temp_dir().join("robohearts-does-not-exist.json");
        assert!(RegretTable::load(&path).unwrap().is_empty());
    }
}
