//! Synthetic counter-strafe input for exercising strafe timing analyzers.
//!
//! Each iteration presses and releases two opposing movement keys with a
//! randomized gap (late) or overlap (early) between them:
//! sample a [`StrafePattern`], lay it out as a [`StrafeSequence`], play it
//! through a [`KeyInjector`] and a [`Sleeper`], print a label.

pub mod clock;
pub mod config;
pub mod error;
pub mod injector;
pub mod key;
pub mod pattern;
pub mod report;
pub mod sequence;
pub mod simulator;
pub mod testing;

pub use clock::{MockSleeper, Sleeper, ThreadSleeper};
pub use config::{MsRange, StrafeConfig, StrafeMode};
pub use error::{ConfigError, InjectError, SimError};
#[cfg(feature = "inject")]
pub use injector::SystemInjector;
pub use injector::{DryRunInjector, KeyInjector};
pub use key::{KeyAction, KeyBindings, KeyEvent, StrafeKey};
pub use pattern::{Direction, PatternKind, StrafePattern, Timing, sample_pattern};
pub use report::{PatternStats, RunSummary};
pub use sequence::{StrafeSequence, TimedAction, build_sequence};
pub use simulator::{Simulator, execute_sequence, play_pattern, run};
