use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::key::KeyBindings;

/// Inclusive millisecond range. `low <= high` once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsRange {
    pub low: u64,
    pub high: u64,
}

impl MsRange {
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, ms: u64) -> bool {
        self.low <= ms && ms <= self.high
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvertedRange {
                name,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Which patterns a run may generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrafeMode {
    /// Late (gap) patterns only: A→D and D→A.
    #[default]
    Basic,
    /// Late and early (overlap) patterns in both directions.
    Extended,
}

/// Run configuration. Immutable once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrafeConfig {
    pub iterations: u32,
    pub hold_ms: u64,
    pub pair_gap_ms: u64,
    pub countdown_ms: u64,
    pub late_range_ms: MsRange,
    pub early_range_ms: MsRange,
    pub mode: StrafeMode,
    /// Character typed for the left key.
    pub left_key: char,
    /// Character typed for the right key.
    pub right_key: char,
    pub seed: Option<u64>,
}

impl Default for StrafeConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            hold_ms: 200,
            pair_gap_ms: 400,
            countdown_ms: 3000,
            late_range_ms: MsRange::new(0, 20),
            early_range_ms: MsRange::new(0, 20),
            mode: StrafeMode::Basic,
            left_key: 'a',
            right_key: 'd',
            seed: None,
        }
    }
}

impl StrafeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        self.late_range_ms.check("late")?;
        if self.mode == StrafeMode::Extended {
            self.early_range_ms.check("early")?;
        }
        if self.left_key == self.right_key {
            return Err(ConfigError::DuplicateBinding(self.left_key));
        }
        Ok(())
    }

    /// Number of distinct patterns this mode can produce.
    pub fn pattern_count(&self) -> usize {
        match self.mode {
            StrafeMode::Basic => 2,
            StrafeMode::Extended => 4,
        }
    }

    pub fn bindings(&self) -> KeyBindings {
        KeyBindings {
            left: self.left_key,
            right: self.right_key,
        }
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn pair_gap(&self) -> Duration {
        Duration::from_millis(self.pair_gap_ms)
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    /// Read and validate config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: StrafeConfig = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns default config if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
