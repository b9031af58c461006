use std::collections::BTreeMap;
use std::fmt;

use crate::pattern::{PatternKind, StrafePattern};

/// Count and magnitude spread for one pattern kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStats {
    pub count: u32,
    pub min_ms: u64,
    pub max_ms: u64,
    pub total_ms: u64,
}

impl PatternStats {
    fn first(ms: u64) -> Self {
        Self {
            count: 1,
            min_ms: ms,
            max_ms: ms,
            total_ms: ms,
        }
    }

    fn add(&mut self, ms: u64) {
        self.count = self.count.saturating_add(1);
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
        self.total_ms = self.total_ms.saturating_add(ms);
    }

    pub fn mean_ms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_ms as f64 / f64::from(self.count)
    }
}

/// What a run generated, tallied per pattern kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub seed: Option<u64>,
    pub iterations: u32,
    pub patterns: BTreeMap<PatternKind, PatternStats>,
}

impl RunSummary {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn record(&mut self, pattern: &StrafePattern) {
        let ms = pattern.magnitude_ms();
        self.iterations = self.iterations.saturating_add(1);
        self.patterns
            .entry(pattern.kind())
            .and_modify(|s| s.add(ms))
            .or_insert_with(|| PatternStats::first(ms));
    }

    pub fn count(&self, kind: PatternKind) -> u32 {
        self.patterns.get(&kind).map_or(0, |s| s.count)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} strafes", self.iterations)?;
        if let Some(seed) = self.seed {
            write!(f, " (seed {seed})")?;
        }
        for (kind, stats) in &self.patterns {
            write!(
                f,
                "\n  {:<10} x{:<4} min={}ms max={}ms mean={:.1}ms",
                kind.label(),
                stats.count,
                stats.min_ms,
                stats.max_ms,
                stats.mean_ms()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Direction, Timing};

    #[test]
    fn test_record_tallies() {
        let mut summary = RunSummary::new(Some(5));
        summary.record(&StrafePattern::late(Direction::AToD, 4));
        summary.record(&StrafePattern::late(Direction::AToD, 10));
        summary.record(&StrafePattern::early(Direction::DToA, 7));

        assert_eq!(summary.iterations, 3);
        let late = summary.patterns[&PatternKind::new(Timing::Late, Direction::AToD)];
        assert_eq!(late.count, 2);
        assert_eq!(late.min_ms, 4);
        assert_eq!(late.max_ms, 10);
        assert!((late.mean_ms() - 7.0).abs() < f64::EPSILON);
        assert_eq!(summary.count(PatternKind::new(Timing::Early, Direction::DToA)), 1);
        assert_eq!(summary.count(PatternKind::new(Timing::Early, Direction::AToD)), 0);
    }

    #[test]
    fn test_total_saturates_on_huge_magnitudes() {
        let mut summary = RunSummary::new(None);
        summary.record(&StrafePattern::late(Direction::AToD, u64::MAX));
        summary.record(&StrafePattern::late(Direction::AToD, u64::MAX));

        let stats = summary.patterns[&PatternKind::new(Timing::Late, Direction::AToD)];
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_ms, u64::MAX);
        assert_eq!(stats.max_ms, u64::MAX);
    }

    #[test]
    fn test_display() {
        let mut summary = RunSummary::new(Some(42));
        summary.record(&StrafePattern::late(Direction::DToA, 12));
        let text = summary.to_string();
        assert!(text.starts_with("1 strafes (seed 42)"));
        assert!(text.contains("D→A late"));
        assert!(text.contains("min=12ms max=12ms mean=12.0ms"));
    }
}
