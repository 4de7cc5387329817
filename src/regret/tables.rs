use crate::regret::*;
use std::path::Path;

/// Which of the three trained tables.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    Pass,
    PlayHigh,
    PlayLow,
}

impl Table {
    pub const fn all() -> [Self; 3] {
        [Table::Pass, Table::PlayHigh, Table::PlayLow]
    }
    pub fn name(&self) -> &'static str {
        match self {
            Table::Pass => "pass",
            Table::PlayHigh => "play-high",
            Table::PlayLow => "play-low",
        }
    }
    pub fn file(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The pass table and the high- and low-resolution play tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pass: RegretTable,
    high: RegretTable,
    low: RegretTable,
}

impl Tables {
    pub fn get(&self, table: Table) -> &RegretTable {
        match table {
            Table::Pass => &self.pass,
            Table::PlayHigh => &self.high,
            Table::PlayLow => &self.low,
        }
    }
    pub fn get_mut(&mut self, table: Table) -> &mut RegretTable {
        match table {
            Table::Pass => &mut self.pass,
            Table::PlayHigh => &mut self.high,
            Table::PlayLow => &mut self.low,
        }
    }
    pub fn len(&self) -> usize {
        Table::all().iter().map(|t| self.get(*t).len()).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn average_over(&mut self, iterations: usize) {
        Table::all()
            .into_iter()
            .for_each(|t| self.get_mut(t).average_over(iterations));
    }
    pub fn merge(&mut self, other: Self) {
        let Self { pass, high, low } = other;
        self.pass.merge(pass);
        self.high.merge(high);
        self.low.merge(low);
    }
    pub fn delta(&self, base: &Self) -> Self {
        Self {
            pass: self.pass.delta(&base.pass),
            high: self.high.delta(&base.high),
            low: self.low.delta(&base.low),
        }
    }

    /// Load all three tables from `dir`; missing files start empty.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            pass: RegretTable::load(&dir.join(Table::Pass.file()))?,
            high: RegretTable::load(&dir.join(Table::PlayHigh.file()))?,
            low: RegretTable::load(&dir.join(Table::PlayLow.file()))?,
        })
    }
    /// Save all three tables. Every table is attempted; the first failure is returned.
    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        Table::all()
            .into_iter()
            .map(|t| self.get(t).save(&dir.join(t.file())))
            .inspect(|result| {
                if let Err(e) = result {
                    log::warn!("failed to save table: {:#}", e);
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}
