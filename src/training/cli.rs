use crate::abstraction::*;
use crate::deals::*;
use crate::extract::*;
use crate::hearts::*;
use crate::regret::*;
use crate::training::*;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::Path;
use std::path::PathBuf;

/// Command line of the `trainer` binary.
#[derive(Debug, clap::Parser)]
#[command(name = "trainer", about = "Train Hearts regret tables from simulated deals")]
pub struct Args {
    /// Training iterations
    #[arg(long, default_value_t = CFR_ITERATIONS)]
    iterations: usize,
    /// Simulated deals per iteration
    #[arg(long, default_value_t = CFR_DEALS_PER_ITERATION)]
    deals: usize,
    /// Parallel shards per iteration (defaults to the number of CPUs)
    #[arg(long)]
    shards: Option<usize>,
    /// Directory holding tables and centroids
    #[arg(long, default_value = "tables")]
    dir: PathBuf,
    #[arg(long, value_enum, default_value_t = Abstraction::Exact)]
    abstraction: Abstraction,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Self-play over the live rules engine instead of replaying deals
    #[arg(long)]
    live: bool,
    /// Replay deals from a JSON-lines log instead of simulating them
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Directory holding learned models (defaults to --dir)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Seat strength when playing learned models
    #[arg(long, value_enum, default_value_t = Difficulty::Expert)]
    difficulty: Difficulty,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            iterations: self.iterations,
            deals: self.deals,
            shards: self.shards.unwrap_or_else(num_cpus::get).max(1),
            directory: self.dir.clone(),
            abstraction: self.abstraction,
            seed: self.seed,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.config();
        log::info!("{}", config);
        match config.abstraction {
            Abstraction::Exact => self.train(
                ExactEncoder::new(Memory::High),
                ExactEncoder::new(Memory::High),
                ExactEncoder::new(Memory::Low),
                config,
            ),
            Abstraction::Cluster => {
                let [pass, high, low] = centroids(&config)?;
                self.train(
                    ClusterEncoder::new(pass, Memory::High),
                    ClusterEncoder::new(high, Memory::High),
                    ClusterEncoder::new(low, Memory::Low),
                    config,
                )
            }
            Abstraction::Learned => self.evaluate(&config),
        }
    }

    /// Learned keys are never stored, so learned models are only played,
    /// one evaluation round per configured deal.
    fn evaluate(&self, config: &Config) -> anyhow::Result<()> {
        if self.live || self.replay.is_some() {
            anyhow::bail!("learned models cannot be trained, drop --live and --replay");
        }
        let [pass, high, low] = models(self.model.as_deref().unwrap_or(config.directory.as_path()))?;
        let ref pass = LearnedEncoder::new(pass, Memory::High);
        let ref high = LearnedEncoder::new(high, Memory::High);
        let ref low = LearnedEncoder::new(low, Memory::Low);
        let ref tables = Tables::default();
        let ref mut extractor =
            StrategyExtractor::new(tables, pass, high, low, SmallRng::seed_from_u64(config.seed));
        Arena::new(extractor, self.difficulty, SmallRng::seed_from_u64(config.seed.wrapping_add(1)))
            .evaluate(config.deals)
            .map(|_| ())
    }

    fn train<P, H, L>(
        &self,
        pass: P,
        high: H,
        low: L,
        config: Config,
    ) -> anyhow::Result<()>
    where
        P: Encoder,
        H: Encoder,
        L: Encoder,
    {
        let simulator: Box<dyn Simulator> = match self.replay {
            Some(ref path) => Box::new(DealLog::load(path)?),
            None => Box::new(RandomSimulator::new(SmallRng::seed_from_u64(config.seed))),
        };
        let tables = Tables::load(&config.directory)?;
        let (iterations, deals) = (config.iterations, config.deals);
        let mut driver = TrainingDriver::new(simulator, pass, high, low, tables, config);
        match self.live {
            true => driver.live(&Hearts::default(), iterations),
            false => driver.run(iterations, deals),
        }
    }
}

/// Pass, high and low centroid sets, loaded from the table directory or fit
/// from fresh simulated deals and saved there.
fn centroids(config: &Config) -> anyhow::Result<[Centroids; 3]> {
    let ref dir = config.directory;
    let paths = Table::all().map(|t| dir.join(format!("{}.centroids.json", t.name())));
    if paths.iter().all(|p| p.exists()) {
        let [pass, high, low] = paths;
        return Ok([
            Centroids::load(&pass)?,
            Centroids::load(&high)?,
            Centroids::load(&low)?,
        ]);
    }
    log::info!("fitting centroids from {} simulated deals", KMEANS_TRAINING_DEALS);
    let ref mut rng = SmallRng::seed_from_u64(config.seed);
    let deals = RandomSimulator::new(SmallRng::seed_from_u64(config.seed)).simulate(KMEANS_TRAINING_DEALS)?;
    let mut points = [Vec::new(), Vec::new(), Vec::new()];
    for deal in deals.iter() {
        for situation in deal.situations()? {
            match situation.phase() {
                Phase::Pass => points[0].push(Features::new(&situation, Memory::High).as_slice().to_vec()),
                Phase::Play => {
                    points[1].push(Features::new(&situation, Memory::High).as_slice().to_vec());
                    points[2].push(Features::new(&situation, Memory::Low).as_slice().to_vec());
                }
            }
        }
    }
    let counts = [KMEANS_PASS_COUNT, KMEANS_PLAY_HIGH_COUNT, KMEANS_PLAY_LOW_COUNT];
    let mut fitted = Vec::with_capacity(3);
    for ((points, k), path) in points.iter().zip(counts).zip(paths.iter()) {
        let centroids = Centroids::fit(points, k, KMEANS_TRAINING_ITERATIONS, rng);
        persist(&centroids, path);
        fitted.push(centroids);
    }
    <[Centroids; 3]>::try_from(fitted).map_err(|v| anyhow::anyhow!("fit {} centroid sets", v.len()))
}

/// Pass, high and low models stored as `{table}.model.json`.
fn models(dir: &Path) -> anyhow::Result<[Linear; 3]> {
    let [pass, high, low] = Table::all().map(|t| dir.join(format!("{}.model.json", t.name())));
    Ok([Linear::load(&pass)?, Linear::load(&high)?, Linear::load(&low)?])
}

fn persist(centroids: &Centroids, path: &Path) {
    if let Err(e) = centroids.save(path) {
        log::warn!("centroids kept in memory, save failed: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["trainer", "--shards", "3"]);
        let config = args.config();
        assert_eq!(config.iterations, CFR_ITERATIONS);
        assert_eq!(config.deals, CFR_DEALS_PER_ITERATION);
        assert_eq!(config.shards, 3);
        assert_eq!(config.abstraction, Abstraction::Exact);
        assert!(!args.live);
    }

    #[test]
    fn flags() {
        let args = Args::parse_from([
            "trainer",
            "--abstraction",
            "cluster",
            "--live",
            "--seed",
            "9",
            "--dir",
            "/tmp/hearts",
        ]);
        let config = args.config();
        assert_eq!(config.abstraction, Abstraction::Cluster);
        assert_eq!(config.seed, 9);
        assert_eq!(config.directory, PathBuf::from("/tmp/hearts"));
        assert!(config.shards >= 1);
        assert!(args.live);
    }

    #[test]
    fn learned_flags() {
        let args = Args::parse_from(["trainer", "--abstraction", "learned", "--model", "/tmp/models"]);
        assert_eq!(args.config().abstraction, Abstraction::Learned);
        assert_eq!(args.model, Some(PathBuf::from("/tmp/models")));
        assert_eq!(args.difficulty, Difficulty::Expert);
    }

    #[test]
    fn learned_refuses_training() {
        let args = Args::parse_from(["trainer", "--abstraction", "learned", "--live"]);
        assert!(args.run().is_err());
    }

    #[test]
    fn learned_models_are_played() {
        let ref dir = std::env::temp_dir().join(format!("robohearts-models-{}", std::process::id()));
        std::fs::create_dir_all(dir).unwrap();
        for (table, features) in Table::all().into_iter().zip([PASS_FEATURES, PLAY_FEATURES, PLAY_FEATURES]) {
            let model = Linear::new(vec![vec![0.0; features]; HAND_SIZE], vec![0.0; HAND_SIZE]).unwrap();
            let path = dir.join(format!("{}.model.json", table.name()));
            std::fs::write(path, serde_json::to_string(&model).unwrap()).unwrap();
        }
        let model = dir.to_string_lossy().to_string();
        let args = Args::parse_from(["trainer", "--abstraction", "learned", "--model", &model, "--deals", "2"]);
        let result = args.run();
        std::fs::remove_dir_all(dir).ok();
        result.unwrap();
        let missing = Args::parse_from(["trainer", "--abstraction", "learned", "--model", "/nonexistent/models"]);
        assert!(missing.run().is_err());
    }
}
