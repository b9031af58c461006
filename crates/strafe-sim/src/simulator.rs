//! The run driver: countdown, N strafe pairs, completion line.

use std::io::Write;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Sleeper;
use crate::config::StrafeConfig;
use crate::error::{InjectError, SimError};
use crate::injector::KeyInjector;
use crate::key::{KeyAction, StrafeKey};
use crate::pattern::{StrafePattern, sample_pattern};
use crate::report::RunSummary;
use crate::sequence::{StrafeSequence, build_sequence};

/// Keys currently held down by the executor.
#[derive(Debug, Default)]
struct HeldKeys {
    keys: Vec<StrafeKey>,
}

impl HeldKeys {
    fn update(&mut self, key: StrafeKey, action: KeyAction) {
        match action {
            KeyAction::Press => {
                if !self.keys.contains(&key) {
                    self.keys.push(key);
                }
            }
            KeyAction::Release => self.keys.retain(|k| *k != key),
        }
    }

    /// Release everything still held, most recent first. Failures are logged.
    fn release_all<I: KeyInjector>(&mut self, injector: &mut I) {
        while let Some(key) = self.keys.pop() {
            match injector.release(key) {
                Ok(()) => debug!("released held key {} after failure", key.label()),
                Err(e) => warn!("could not release held key {}: {e}", key.label()),
            }
        }
    }
}

/// Play one sequence: wait then emit each action, then wait the settle gap.
///
/// If an injection fails, keys pressed so far are released best effort
/// before the error is returned, so the target is not left with a stuck key.
pub fn execute_sequence<I: KeyInjector, S: Sleeper>(
    sequence: &StrafeSequence,
    injector: &mut I,
    sleeper: &mut S,
) -> Result<(), InjectError> {
    let mut held = HeldKeys::default();
    for action in &sequence.actions {
        sleeper.sleep(action.wait_before);
        if let Err(e) = injector.emit(action.event) {
            held.release_all(injector);
            return Err(e);
        }
        held.update(action.event.key, action.event.action);
    }
    sleeper.sleep(sequence.settle);
    Ok(())
}

/// Emit one pattern and print its `[index/total]` label.
pub fn play_pattern<I: KeyInjector, S: Sleeper, W: Write>(
    config: &StrafeConfig,
    pattern: &StrafePattern,
    index: u32,
    injector: &mut I,
    sleeper: &mut S,
    out: &mut W,
) -> Result<(), SimError> {
    let sequence = build_sequence(pattern, config.hold(), config.pair_gap());
    execute_sequence(&sequence, injector, sleeper)?;
    writeln!(
        out,
        "[{index}/{}] {}",
        config.iterations,
        pattern.label(config.mode)
    )
    .map_err(SimError::Output)?;
    Ok(())
}

fn countdown_line(config: &StrafeConfig) -> String {
    let secs = config.countdown_ms as f64 / 1000.0;
    format!(
        "Starting in {secs} seconds... (will do {} strafes)",
        config.iterations
    )
}

/// Run a full session with the given random source.
pub fn run<R: Rng, I: KeyInjector, S: Sleeper, W: Write>(
    config: &StrafeConfig,
    rng: &mut R,
    injector: &mut I,
    sleeper: &mut S,
    out: &mut W,
) -> Result<RunSummary, SimError> {
    config.validate()?;

    writeln!(out, "{}", countdown_line(config)).map_err(SimError::Output)?;
    out.flush().map_err(SimError::Output)?;
    sleeper.sleep(config.countdown());

    let mut summary = RunSummary::new(config.seed);
    for index in 1..=config.iterations {
        let pattern = sample_pattern(config, rng);
        debug!("pattern {index}: {pattern:?}");
        play_pattern(config, &pattern, index, injector, sleeper, out)?;
        summary.record(&pattern);
    }

    writeln!(out, "Done!").map_err(SimError::Output)?;
    Ok(summary)
}

/// Config plus a seeded random source.
///
/// When the config has no seed one is drawn from entropy and kept, so the
/// run can be replayed with `--seed`.
pub struct Simulator {
    config: StrafeConfig,
    seed: u64,
    rng: StdRng,
}

impl Simulator {
    pub fn new(config: StrafeConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &StrafeConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run<I: KeyInjector, S: Sleeper, W: Write>(
        &mut self,
        injector: &mut I,
        sleeper: &mut S,
        out: &mut W,
    ) -> Result<RunSummary, SimError> {
        info!(
            "Running {} strafes in {:?} mode (seed {})",
            self.config.iterations, self.config.mode, self.seed
        );
        let mut summary = run(&self.config, &mut self.rng, injector, sleeper, out)?;
        summary.seed = Some(self.seed);
        Ok(summary)
    }
}
