//! Counterfactual regret minimization for four-player Hearts.
//!
//! The crate trains tables of regret and average-strategy statistics over
//! abstracted information sets by replaying simulated deals, and reads those
//! tables back at play time to choose passes and cards.
//!
//! # Module Structure
//!
//! - `cards`: Card identities, suits and ranks
//! - `hearts`: Game situation, rules engine, difficulty and memory levels
//! - `deals`: Logged self-play deals and the simulator that produces them
//! - `abstraction`: Information-set keys, feature vectors and encoders
//! - `regret`: Regret/strategy tables and their persistence
//! - `traverse`: Outcome-sampling replay and external-sampling traversals
//! - `training`: Iteration driver, sharding and the trainer command line
//! - `extract`: Inference-time strategy extraction
#![allow(dead_code)]

pub mod abstraction;
pub mod cards;
pub mod deals;
pub mod extract;
pub mod hearts;
pub mod regret;
pub mod training;
pub mod traverse;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Payoffs, counterfactual values and regrets.
pub type Utility = f32;
/// Strategy weights, sampling distributions and reach probabilities.
pub type Probability = f32;
/// Seat index around the table, `0..N`.
pub type Position = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players at the table.
pub const N: usize = 4;
/// Cards in the deck.
pub const DECK_SIZE: usize = 52;
/// Cards dealt to each player, and tricks in a round.
pub const HAND_SIZE: usize = DECK_SIZE / N;
/// Cards each player passes before play.
pub const PASS_SIZE: usize = 3;
/// Pass-phase replay stops after this many passes (all but the last seat's final pass).
pub const PASS_DEPTH: usize = N * PASS_SIZE - 1;
/// Points for taking every heart and the queen of spades.
pub const MOON_POINTS: u8 = 26;

// ============================================================================
// REGRET MATCHING
// s(a) = (max(r(a), 0) + ε) / (Σ (max(r, 0) + ε) + c·ε)
// ============================================================================
/// Regularization mass (ε) added to every action.
pub const REGRET_EPSILON: Utility = 0.001;
/// Control factor (c) on the regularization term in the denominator.
pub const REGRET_CONTROL: Utility = 0.5;
/// Ceiling on cumulative regret.
pub const REGRET_LIMIT: Utility = 1e20;
/// Smallest weight a sampled action may carry.
pub const POLICY_MIN: Probability = 1e-6;

// ============================================================================
// OUTCOME SAMPLING
// q(a) = x/n + (1 - x)·s(a) at the traverser's nodes
// ============================================================================
/// Exploration rate (x) blended into the traverser's sampling strategy.
pub const SAMPLING_EXPLORATION: Probability = 0.6;

// ============================================================================
// FEATURE VECTORS
// ============================================================================
/// Placeholder for empty feature slots.
pub const SENTINEL: f32 = -100.0;
/// Width of the play-phase feature vector.
pub const PLAY_FEATURES: usize = 21;
/// Width of the pass-phase feature vector.
pub const PASS_FEATURES: usize = 14;

// ============================================================================
// K-MEANS CLUSTERING
// ============================================================================
/// Centroids for the high-resolution play abstraction.
pub const KMEANS_PLAY_HIGH_COUNT: usize = 5000;
/// Centroids for the low-resolution play abstraction.
pub const KMEANS_PLAY_LOW_COUNT: usize = 1000;
/// Centroids for the pass abstraction.
pub const KMEANS_PASS_COUNT: usize = 1000;
/// Lloyd's algorithm iterations when fitting a centroid set.
pub const KMEANS_TRAINING_ITERATIONS: usize = 16;
/// Simulated deals used to fit a missing centroid set.
pub const KMEANS_TRAINING_DEALS: usize = 1000;

// ============================================================================
// STRATEGY EXTRACTION
// ============================================================================
/// Multiplier applied to the strongest actions at reduced difficulty.
pub const DISTORTION_FACTOR: Probability = 0.1;
/// Failed draws tolerated while picking distinct pass cards.
pub const PASS_DRAW_LIMIT: usize = 10;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Default training iterations.
pub const CFR_ITERATIONS: usize = 64;
/// Default simulated deals per iteration.
pub const CFR_DEALS_PER_ITERATION: usize = 256;
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Global interrupt flag for graceful shutdown coordination.
#[cfg(feature = "server")]
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
/// Optional training deadline from TRAIN_DURATION env var.
#[cfg(feature = "server")]
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
/// Check if graceful shutdown was requested (via stdin "Q") or deadline reached.
#[cfg(feature = "server")]
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
        || DEADLINE
            .get()
            .map_or(false, |d| std::time::Instant::now() >= *d)
}
/// No-op interrupt check when server feature disabled.
#[cfg(not(feature = "server"))]
pub fn interrupted() -> bool {
    false
}
/// Register graceful interrupt handler. Type "Q" + Enter to stop after the current deal.
/// Optionally set TRAIN_DURATION env var (e.g., "2h", "30m") for timed runs.
#[cfg(feature = "server")]
pub fn brb() {
    if let Ok(duration) = std::env::var("TRAIN_DURATION") {
        if let Some(deadline) = parse_duration(&duration) {
            let _ = DEADLINE.set(std::time::Instant::now() + deadline);
            log::info!("training will stop after {}", duration);
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, finishing current deal...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}
/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
#[cfg(feature = "server")]
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        "d" => Some(std::time::Duration::from_secs(value * 86400)),
        _ => None,
    }
}
