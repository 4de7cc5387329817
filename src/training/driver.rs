use crate::abstraction::*;
use crate::deals::*;
use crate::hearts::*;
use crate::regret::*;
use crate::training::*;
use crate::traverse::*;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Owns the tables for a training run and feeds them simulated deals.
///
/// Every deal is replayed once per seat: the pass phase into the pass table
/// (when the deal has one) and the play phase into both play tables, each
/// through its own encoder.
pub struct TrainingDriver<S, P, H, L>
where
    S: Simulator,
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    simulator: S,
    pass: P,
    high: H,
    low: L,
    tables: Tables,
    config: Config,
    progress: Progress,
}

impl<S, P, H, L> TrainingDriver<S, P, H, L>
where
    S: Simulator,
    P: Encoder,
    H: Encoder,
    L: Encoder,
{
    pub fn new(simulator: S, pass: P, high: H, low: L, tables: Tables, config: Config) -> Self {
        Self {
            simulator,
            pass,
            high,
            low,
            tables,
            config,
            progress: Progress::default(),
        }
    }
    pub fn tables(&self) -> &Tables {
        &self.tables
    }
    pub fn into_tables(self) -> Tables {
        self.tables
    }
    pub fn progress(&self) -> &Progress {
        &self.progress
    }
    /// Iterations completed by the last run.
    pub fn epochs(&self) -> usize {
        self.progress.epoch()
    }

    /// Train for up to `iterations` rounds of `deals` simulated deals, then
    /// average regrets over the completed iterations and persist.
    pub fn run(&mut self, iterations: usize, deals: usize) -> anyhow::Result<()> {
        log::info!("training {} iterations of {} deals", iterations, deals);
        self.progress = Progress::default();
        for _ in 0..iterations {
            if interrupted() {
                break;
            }
            let batch = match self.simulator.simulate(deals) {
                Ok(batch) => batch,
                Err(e) => {
                    log::warn!("simulator failed, stopping early: {:#}", e);
                    break;
                }
            };
            let tally = self.iterate(&batch);
            if tally.interrupted {
                log::info!("iteration interrupted after {} deals", tally.trained);
                break;
            }
            self.progress.record(tally, self.tables.len());
            log::debug!("{}", self.progress.format());
            if let Some(stats) = self.progress.checkpoint() {
                log::info!("{}", stats);
            }
        }
        log::info!("{}", self.progress.summary());
        self.finish(self.progress.epoch())
    }

    /// External-sampling self-play over a live rules engine.
    pub fn live<R: Rules>(&mut self, rules: &R, iterations: usize) -> anyhow::Result<()> {
        log::info!("live self-play for {} iterations", iterations);
        self.progress = Progress::default();
        let ref mut rng = SmallRng::seed_from_u64(self.config.seed);
        for _ in 0..iterations {
            if interrupted() {
                break;
            }
            let mut tally = Tally::default();
            for walker in 0..N {
                match ExternalSampling::new(rules, &self.pass, &self.high, &mut self.tables, rng)
                    .iterate(walker)
                {
                    Ok(_) => tally.trained += 1,
                    Err(e) => {
                        log::warn!("live traversal for P{} failed: {:#}", walker, e);
                        tally.skipped += 1;
                    }
                }
            }
            self.progress.record(tally, self.tables.len());
            if let Some(stats) = self.progress.checkpoint() {
                log::info!("{}", stats);
            }
        }
        log::info!("{}", self.progress.summary());
        self.finish(self.progress.epoch())
    }

    fn finish(&mut self, completed: usize) -> anyhow::Result<()> {
        self.tables.average_over(completed);
        self.tables
            .save(&self.config.directory)
            .inspect_err(|e| log::warn!("tables kept in memory, save failed: {:#}", e))
    }

    /// Replay one iteration's deals, sharded when configured.
    fn iterate(&mut self, deals: &[SimulatedDeal]) -> Tally {
        let shards = self.config.shards.clamp(1, deals.len().max(1));
        if shards == 1 {
            return Self::batch(&mut self.tables, deals, &self.pass, &self.high, &self.low);
        }
        let chunk = deals.len().div_ceil(shards);
        let ref base = self.tables;
        let (pass, high, low) = (&self.pass, &self.high, &self.low);
        #[cfg(feature = "server")]
        use rayon::prelude::*;
        #[cfg(feature = "server")]
        let chunks = deals.par_chunks(chunk);
        #[cfg(not(feature = "server"))]
        let chunks = deals.chunks(chunk);
        let results = chunks
            .map(|chunk| {
                let mut local = base.clone();
                let tally = Self::batch(&mut local, chunk, pass, high, low);
                (local.delta(base), tally)
            })
            .collect::<Vec<_>>();
        let mut total = Tally::default();
        for (delta, tally) in results {
            self.tables.merge(delta);
            total = total + tally;
        }
        total
    }

    fn batch(tables: &mut Tables, deals: &[SimulatedDeal], pass: &P, high: &H, low: &L) -> Tally {
        let mut tally = Tally::default();
        for deal in deals {
            if interrupted() {
                tally.interrupted = true;
                break;
            }
            match Self::replay(tables, deal, pass, high, low) {
                Ok(()) => tally.trained += 1,
                Err(e) => {
                    log::warn!("skipping {}: {:#}", deal, e);
                    tally.skipped += 1;
                }
            }
        }
        tally
    }

    /// All traversals of one deal. The deal is checked before any table is touched.
    fn replay(tables: &mut Tables, deal: &SimulatedDeal, pass: &P, high: &H, low: &L) -> anyhow::Result<()> {
        deal.validate()?;
        for walker in 0..N {
            let payoff = deal.payoffs[walker];
            if deal.has_pass() {
                PassReplay::new(deal, pass, tables.get_mut(Table::Pass)).replay(walker, payoff)?;
            }
            PlayReplay::new(deal, high, tables.get_mut(Table::PlayHigh)).replay(walker, payoff)?;
            PlayReplay::new(deal, low, tables.get_mut(Table::PlayLow)).replay(walker, payoff)?;
        }
        Ok(())
    }
}
