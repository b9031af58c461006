use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use log::{debug, info};

use super::KeyInjector;
use crate::error::InjectError;
use crate::key::{KeyBindings, KeyEvent, StrafeKey};

/// OS-level key injection using enigo.
///
/// Events go to whichever window has focus. On macOS the terminal needs
/// accessibility permission, on Linux an X11 session.
pub struct SystemInjector {
    enigo: Enigo,
    bindings: KeyBindings,
}

impl SystemInjector {
    pub fn new(bindings: KeyBindings) -> Result<Self, InjectError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InjectError::Backend(e.to_string()))?;
        info!(
            "System key injection ready (left={:?}, right={:?})",
            bindings.left, bindings.right
        );
        Ok(Self { enigo, bindings })
    }

    fn send(&mut self, key: StrafeKey, direction: Direction) -> Result<(), InjectError> {
        let c = self.bindings.char_for(key);
        self.enigo
            .key(Key::Unicode(c), direction)
            .map_err(|e| InjectError::Key {
                key,
                action: match direction {
                    Direction::Press => "press",
                    _ => "release",
                },
                reason: e.to_string(),
            })
    }
}

impl KeyInjector for SystemInjector {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        debug!("{}", KeyEvent::press(key));
        self.send(key, Direction::Press)
    }

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        debug!("{}", KeyEvent::release(key));
        self.send(key, Direction::Release)
    }
}
