use serde::{Deserialize, Serialize};

/// One of the two opposing movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrafeKey {
    /// Strafe left (A by default).
    Left,
    /// Strafe right (D by default).
    Right,
}

impl StrafeKey {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Display label used in run output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "A",
            Self::Right => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

/// A single instantaneous key event. Never queued or retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: StrafeKey,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn press(key: StrafeKey) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: StrafeKey) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }

    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Press
    }
}

impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.action {
            KeyAction::Press => write!(f, "press({})", self.key.label()),
            KeyAction::Release => write!(f, "release({})", self.key.label()),
        }
    }
}

/// Characters the injector types for each key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: char,
    pub right: char,
}

impl KeyBindings {
    pub fn char_for(&self, key: StrafeKey) -> char {
        match key {
            StrafeKey::Left => self.left,
            StrafeKey::Right => self.right,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: 'a',
            right: 'd',
        }
    }
}
