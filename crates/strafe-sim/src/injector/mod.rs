//! Key injection backends.
//!
//! This module provides:
//! - [`KeyInjector`]: the press/release capability the simulator drives
//! - [`DryRunInjector`]: logs events without touching the OS
//! - `SystemInjector`: real OS input through enigo (feature `inject`)

#[cfg(feature = "inject")]
mod system;

#[cfg(feature = "inject")]
pub use system::SystemInjector;

use log::debug;

use crate::error::InjectError;
use crate::key::{KeyAction, KeyEvent, StrafeKey};

/// Abstraction over key injection.
/// Implementations: SystemInjector (enigo), DryRunInjector, RecordingInjector (testing).
pub trait KeyInjector {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError>;

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError>;

    fn emit(&mut self, event: KeyEvent) -> Result<(), InjectError> {
        match event.action {
            KeyAction::Press => self.press(event.key),
            KeyAction::Release => self.release(event.key),
        }
    }
}

impl<T: KeyInjector + ?Sized> KeyInjector for Box<T> {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        (**self).press(key)
    }

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        (**self).release(key)
    }
}

/// Injector that only logs. Used for `--dry-run` and builds without `inject`.
#[derive(Debug, Default)]
pub struct DryRunInjector {
    emitted: usize,
}

impl DryRunInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events that would have been injected.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl KeyInjector for DryRunInjector {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.emitted += 1;
        debug!("dry-run: {}", KeyEvent::press(key));
        Ok(())
    }

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.emitted += 1;
        debug!("dry-run: {}", KeyEvent::release(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_counts_events() {
        let mut injector = DryRunInjector::new();
        injector.emit(KeyEvent::press(StrafeKey::Left)).unwrap();
        injector.emit(KeyEvent::release(StrafeKey::Left)).unwrap();
        assert_eq!(injector.emitted(), 2);
    }

    #[test]
    fn test_boxed_injector_delegates() {
        let mut injector: Box<dyn KeyInjector> = Box::new(DryRunInjector::new());
        assert!(injector.press(StrafeKey::Right).is_ok());
        assert!(injector.release(StrafeKey::Right).is_ok());
    }
}
