use crate::deals::*;
use anyhow::Context;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;

/// A stored deal log, one JSON record per line, replayed in a loop.
#[derive(Debug, Clone, Default)]
pub struct DealLog {
    deals: Vec<SimulatedDeal>,
    cursor: usize,
}

impl DealLog {
    pub fn new(deals: Vec<SimulatedDeal>) -> Self {
        Self { deals, cursor: 0 }
    }
    pub fn len(&self) -> usize {
        self.deals.len()
    }
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening deal log {}", path.display()))?;
        let deals = std::io::BufReader::new(file)
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|(i, line)| {
                let line = line?;
                serde_json::from_str::<SimulatedDeal>(&line)
                    .with_context(|| format!("{}:{}", path.display(), i + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("loaded {} deals from {}", deals.len(), path.display());
        Ok(Self::new(deals))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating deal log {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        for deal in self.deals.iter() {
            serde_json::to_writer(&mut writer, deal)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Simulator for DealLog {
    fn simulate(&mut self, deals: usize) -> anyhow::Result<Vec<SimulatedDeal>> {
        if self.deals.is_empty() {
            anyhow::bail!("deal log is empty");
        }
        Ok((0..deals)
            .map(|_| {
                let deal = self.deals[self.cursor].clone();
                self.cursor = (self.cursor + 1) % self.deals.len();
                deal
            })
            .collect())
    }
}
