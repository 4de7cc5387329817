//! Trainer Binary
//!
//! Replays simulated deals into the pass and play regret tables.
//!
//! Type "Q" + Enter, or set TRAIN_DURATION, to stop early and still save.

use clap::Parser;
use robohearts::training::Args;

fn main() -> anyhow::Result<()> {
    robohearts::log()?;
    robohearts::brb();
    Args::parse().run()
}
