use crate::*;
use std::time::Duration;
use std::time::Instant;

/// Running counts for a training session, reported at a fixed interval.
#[derive(Debug, Clone)]
pub struct Progress {
    epoch: usize,
    deals: usize,
    skipped: usize,
    infos: usize,
    started: Instant,
    checked: Instant,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            epoch: 0,
            deals: 0,
            skipped: 0,
            infos: 0,
            started: Instant::now(),
            checked: Instant::now(),
        }
    }
}

impl Progress {
    pub fn epoch(&self) -> usize {
        self.epoch
    }
    pub fn deals(&self) -> usize {
        self.deals
    }
    pub fn skipped(&self) -> usize {
        self.skipped
    }
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
    /// Record a finished iteration.
    pub fn record(&mut self, tally: Tally, infos: usize) {
        self.epoch += 1;
        self.deals += tally.trained;
        self.skipped += tally.skipped;
        self.infos = infos;
    }
    /// Stats line once per [`TRAINING_LOG_INTERVAL`].
    pub fn checkpoint(&mut self) -> Option<String> {
        match self.checked.elapsed() >= TRAINING_LOG_INTERVAL {
            true => {
                self.checked = Instant::now();
                Some(self.format())
            }
            false => None,
        }
    }
    pub fn format(&self) -> String {
        let rate = self.deals as f64 / self.elapsed().as_secs().max(1) as f64;
        format!(
            "{:<20}{:<20}{:<20}{:<20}{:<20}",
            format!("epoch {}", self.epoch),
            format!("deals {}", self.deals),
            format!("skipped {}", self.skipped),
            format!("infos {}", self.infos),
            format!("D/sec {:.1}", rate),
        )
    }
    pub fn summary(&self) -> String {
        format!("training stopped\n{}", self.format())
    }
}

/// Outcome of replaying a batch of deals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub trained: usize,
    pub skipped: usize,
    pub interrupted: bool,
}

impl std::ops::Add for Tally {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            trained: self.trained + other.trained,
            skipped: self.skipped + other.skipped,
            interrupted: self.interrupted || other.interrupted,
        }
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}
