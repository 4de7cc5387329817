use crate::*;
use std::path::PathBuf;

/// Which encoder family keys the trained tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "server", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Abstraction {
    #[default]
    Exact,
    Cluster,
    /// Per-table linear models; evaluated against random seats, never trained.
    Learned,
}

/// Parameters of one training run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub iterations: usize,
    pub deals: usize,
    pub shards: usize,
    pub directory: PathBuf,
    pub abstraction: Abstraction,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: CFR_ITERATIONS,
            deals: CFR_DEALS_PER_ITERATION,
            shards: 1,
            directory: PathBuf::from("tables"),
            abstraction: Abstraction::default(),
            seed: 0,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} iterations x {} deals, {} shards, {:?} tables in {}",
            self.iterations,
            self.deals,
            self.shards,
            self.abstraction,
            self.directory.display()
        )
    }
}
