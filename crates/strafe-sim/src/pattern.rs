//! Counter-strafe patterns and their random selection.
//!
//! A pattern is a direction (which key goes first), a timing (whether the
//! second key lands after a gap or during an overlap), and one sampled
//! magnitude in whole milliseconds.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MsRange, StrafeConfig, StrafeMode};
use crate::key::StrafeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// A first, then D.
    AToD,
    /// D first, then A.
    DToA,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Self::AToD, Self::DToA];

    pub fn first(self) -> StrafeKey {
        match self {
            Self::AToD => StrafeKey::Left,
            Self::DToA => StrafeKey::Right,
        }
    }

    pub fn second(self) -> StrafeKey {
        self.first().opposite()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AToD => "A→D",
            Self::DToA => "D→A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timing {
    /// Second key pressed after the first is released.
    Late,
    /// Second key pressed while the first is still held.
    Early,
}

impl Timing {
    pub fn label(self) -> &'static str {
        match self {
            Self::Late => "late",
            Self::Early => "early",
        }
    }

    /// Name of the sampled magnitude in labels.
    pub fn magnitude_kind(self) -> &'static str {
        match self {
            Self::Late => "gap",
            Self::Early => "overlap",
        }
    }
}

/// Pattern shape without its sampled magnitude. Used for tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternKind {
    pub timing: Timing,
    pub direction: Direction,
}

impl PatternKind {
    pub fn new(timing: Timing, direction: Direction) -> Self {
        Self { timing, direction }
    }

    /// "A→D late", "D→A early", ...
    pub fn label(&self) -> String {
        format!("{} {}", self.direction.label(), self.timing.label())
    }
}

/// One generated counter-strafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrafePattern {
    pub timing: Timing,
    pub direction: Direction,
    /// Gap (late) or overlap (early) between the two keys.
    pub magnitude: Duration,
}

impl StrafePattern {
    pub fn late(direction: Direction, gap_ms: u64) -> Self {
        Self {
            timing: Timing::Late,
            direction,
            magnitude: Duration::from_millis(gap_ms),
        }
    }

    pub fn early(direction: Direction, overlap_ms: u64) -> Self {
        Self {
            timing: Timing::Early,
            direction,
            magnitude: Duration::from_millis(overlap_ms),
        }
    }

    pub fn kind(&self) -> PatternKind {
        PatternKind::new(self.timing, self.direction)
    }

    pub fn magnitude_ms(&self) -> u64 {
        self.magnitude.as_millis() as u64
    }

    /// Human-readable label.
    ///
    /// Basic mode only ever produces late patterns, so the timing word is
    /// omitted there: `A→D, gap=10ms`. Extended mode names it:
    /// `A→D late, gap=10ms`, `D→A early, overlap=30ms`.
    pub fn label(&self, mode: StrafeMode) -> String {
        let kind = self.timing.magnitude_kind();
        let ms = self.magnitude_ms();
        match mode {
            StrafeMode::Basic => format!("{}, {kind}={ms}ms", self.direction.label()),
            StrafeMode::Extended => format!(
                "{} {}, {kind}={ms}ms",
                self.direction.label(),
                self.timing.label()
            ),
        }
    }
}

/// Draw a whole number of milliseconds uniformly from `range` (inclusive).
pub fn sample_ms<R: Rng>(range: MsRange, rng: &mut R) -> u64 {
    rng.gen_range(range.low..=range.high)
}

/// Pick a pattern and its magnitude for one iteration.
///
/// Extended mode makes a fair late/early choice first, then a fair
/// direction choice, so each of the four patterns has probability 1/4.
/// `config` must already be validated.
pub fn sample_pattern<R: Rng>(config: &StrafeConfig, rng: &mut R) -> StrafePattern {
    let timing = match config.mode {
        StrafeMode::Basic => Timing::Late,
        StrafeMode::Extended => {
            if rng.gen_bool(0.5) {
                Timing::Early
            } else {
                Timing::Late
            }
        }
    };
    let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];

    let range = match timing {
        Timing::Late => config.late_range_ms,
        Timing::Early => config.early_range_ms,
    };
    let ms = sample_ms(range, rng);

    StrafePattern {
        timing,
        direction,
        magnitude: Duration::from_millis(ms),
    }
}
