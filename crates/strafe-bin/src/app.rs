use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};
use strafe_sim::{DryRunInjector, RunSummary, Simulator, Sleeper};

use crate::cli::Args;

/// Where key events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    DryRun,
    System,
}

impl Backend {
    pub fn select(args: &Args) -> Self {
        if args.dry_run {
            return Self::DryRun;
        }
        if !cfg!(feature = "inject") {
            warn!("built without the `inject` feature, falling back to dry run");
            return Self::DryRun;
        }
        Self::System
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// `--write-config` wrote the effective config; nothing was run.
    ConfigWritten(PathBuf),
    Finished {
        backend: Backend,
        summary: RunSummary,
        /// Events logged instead of injected, for dry runs.
        skipped_events: Option<usize>,
    },
}

/// Resolve config, then either write it out or run a session.
pub fn execute<S: Sleeper, W: Write>(
    args: &Args,
    sleeper: &mut S,
    out: &mut W,
) -> Result<Outcome> {
    let config = args.resolve_config()?;

    if let Some(path) = &args.write_config {
        config.write(path)?;
        info!("Wrote config to {}", path.display());
        return Ok(Outcome::ConfigWritten(path.clone()));
    }

    let backend = Backend::select(args);
    let mut simulator = Simulator::new(config);
    match backend {
        Backend::DryRun => {
            info!("Dry run: key events are logged, not injected");
            let mut injector = DryRunInjector::new();
            let summary = simulator.run(&mut injector, sleeper, out)?;
            info!("Dry run finished, {} key events not injected", injector.emitted());
            Ok(Outcome::Finished {
                backend,
                summary,
                skipped_events: Some(injector.emitted()),
            })
        }
        Backend::System => {
            let summary = run_system(&mut simulator, sleeper, out)?;
            Ok(Outcome::Finished {
                backend,
                summary,
                skipped_events: None,
            })
        }
    }
}

#[cfg(feature = "inject")]
fn run_system<S: Sleeper, W: Write>(
    simulator: &mut Simulator,
    sleeper: &mut S,
    out: &mut W,
) -> Result<RunSummary> {
    use anyhow::Context;

    let mut injector = strafe_sim::SystemInjector::new(simulator.config().bindings())
        .context("failed to initialize key injection")?;
    Ok(simulator.run(&mut injector, sleeper, out)?)
}

#[cfg(not(feature = "inject"))]
fn run_system<S: Sleeper, W: Write>(
    _simulator: &mut Simulator,
    _sleeper: &mut S,
    _out: &mut W,
) -> Result<RunSummary> {
    anyhow::bail!("built without the `inject` feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use strafe_sim::{MockSleeper, StrafeConfig};
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("strafe-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_dry_run_selects_dry_run_backend() {
        assert_eq!(Backend::select(&parse(&["--dry-run"])), Backend::DryRun);
    }

    #[test]
    fn test_default_backend_follows_feature() {
        let expected = if cfg!(feature = "inject") {
            Backend::System
        } else {
            Backend::DryRun
        };
        assert_eq!(Backend::select(&parse(&[])), expected);
    }

    #[test]
    fn test_dry_run_executes_without_system_injection() {
        let args = parse(&["--dry-run", "-n", "4", "--seed", "3"]);
        let mut sleeper = MockSleeper::new();
        let mut out = Vec::new();

        let outcome = execute(&args, &mut sleeper, &mut out).unwrap();

        match outcome {
            Outcome::Finished {
                backend,
                summary,
                skipped_events,
            } => {
                assert_eq!(backend, Backend::DryRun);
                assert_eq!(summary.iterations, 4);
                assert_eq!(summary.seed, Some(3));
                assert_eq!(skipped_events, Some(4 * 4));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4 + 2);
        assert!(text.ends_with("Done!\n"));
    }

    #[test]
    fn test_write_config_round_trips_and_skips_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("effective.json");
        let args = parse(&[
            "--write-config",
            path.to_str().unwrap(),
            "-n",
            "12",
            "--extended",
            "--early-max-ms",
            "35",
            "--seed",
            "8",
        ]);
        let mut sleeper = MockSleeper::new();
        let mut out = Vec::new();

        let outcome = execute(&args, &mut sleeper, &mut out).unwrap();

        assert!(matches!(outcome, Outcome::ConfigWritten(ref p) if *p == path));
        assert!(out.is_empty());
        assert!(sleeper.requested().is_empty());

        let written = StrafeConfig::read(&path).unwrap();
        assert_eq!(written, args.resolve_config().unwrap());
        assert_eq!(written.iterations, 12);
        assert_eq!(written.early_range_ms.high, 35);
        assert_eq!(written.seed, Some(8));
    }

    #[test]
    fn test_invalid_config_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let args = parse(&["--write-config", path.to_str().unwrap(), "-n", "0"]);

        assert!(execute(&args, &mut MockSleeper::new(), &mut Vec::new()).is_err());
        assert!(!path.exists());
    }
}
