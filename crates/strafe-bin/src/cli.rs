use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use strafe_sim::{StrafeConfig, StrafeMode};

#[derive(Parser, Debug)]
#[command(
    name = "strafe-sim",
    about = "Simulate A/D counter-strafes with random timing to test strafe analyzers"
)]
pub struct Args {
    /// Path to a JSON config file. Missing file means defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of strafe pairs to simulate.
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// How long each key is held, in milliseconds.
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// Wait between strafe pairs, in milliseconds.
    #[arg(long)]
    pub pair_gap_ms: Option<u64>,

    /// Countdown before the first pair, in milliseconds.
    #[arg(long)]
    pub countdown_ms: Option<u64>,

    /// Lower bound of the late gap range.
    #[arg(long)]
    pub late_min_ms: Option<u64>,

    /// Upper bound of the late gap range.
    #[arg(long)]
    pub late_max_ms: Option<u64>,

    /// Lower bound of the early overlap range.
    #[arg(long)]
    pub early_min_ms: Option<u64>,

    /// Upper bound of the early overlap range.
    #[arg(long)]
    pub early_max_ms: Option<u64>,

    /// Mix early (overlap) patterns in with late ones.
    #[arg(long)]
    pub extended: bool,

    /// Random seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log key events instead of injecting them.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the effective config to this path and exit.
    #[arg(long)]
    pub write_config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Defaults, then the config file, then command-line flags.
    pub fn resolve_config(&self) -> Result<StrafeConfig> {
        let mut config = match &self.config {
            Some(path) => StrafeConfig::load_or_default(path)?,
            None => StrafeConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut StrafeConfig) {
        if let Some(v) = self.iterations {
            config.iterations = v;
        }
        if let Some(v) = self.hold_ms {
            config.hold_ms = v;
        }
        if let Some(v) = self.pair_gap_ms {
            config.pair_gap_ms = v;
        }
        if let Some(v) = self.countdown_ms {
            config.countdown_ms = v;
        }
        if let Some(v) = self.late_min_ms {
            config.late_range_ms.low = v;
        }
        if let Some(v) = self.late_max_ms {
            config.late_range_ms.high = v;
        }
        if let Some(v) = self.early_min_ms {
            config.early_range_ms.low = v;
        }
        if let Some(v) = self.early_max_ms {
            config.early_range_ms.high = v;
        }
        if self.extended {
            config.mode = StrafeMode::Extended;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
