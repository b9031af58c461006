//! Test doubles for driving the simulator without real input or real time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Sleeper;
use crate::error::InjectError;
use crate::injector::KeyInjector;
use crate::key::{KeyAction, KeyEvent, StrafeKey};

/// Injector that records events in order, optionally failing on one call.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    events: Vec<KeyEvent>,
    calls: usize,
    fail_at: Option<usize>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call`-th injection (0-based) fail. Failed calls are not recorded.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<KeyEvent> {
        self.events
    }

    fn record(&mut self, event: KeyEvent) -> Result<(), InjectError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(InjectError::Key {
                key: event.key,
                action: match event.action {
                    KeyAction::Press => "press",
                    KeyAction::Release => "release",
                },
                reason: "injected failure".to_string(),
            });
        }
        self.events.push(event);
        Ok(())
    }
}

impl KeyInjector for RecordingInjector {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.record(KeyEvent::press(key))
    }

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.record(KeyEvent::release(key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEntry {
    Event(KeyEvent),
    Wait(Duration),
}

/// Shared, interleaved record of key events and waits.
///
/// Hand `injector()` and `sleeper()` to the simulator, then read the
/// combined timeline back with `entries()` or `render()`.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    entries: Rc<RefCell<Vec<TraceEntry>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn injector(&self) -> TraceInjector {
        TraceInjector {
            trace: self.clone(),
        }
    }

    pub fn sleeper(&self) -> TraceSleeper {
        TraceSleeper {
            trace: self.clone(),
        }
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.borrow().clone()
    }

    /// Timeline as `press(A), [200ms], release(A), ...`. Zero waits are omitted.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in self.entries.borrow().iter() {
            let item = match entry {
                TraceEntry::Event(e) => e.to_string(),
                TraceEntry::Wait(d) if d.is_zero() => continue,
                TraceEntry::Wait(d) => format!("[{}ms]", d.as_millis()),
            };
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&item);
        }
        out
    }

    fn push(&self, entry: TraceEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

pub struct TraceInjector {
    trace: Trace,
}

impl KeyInjector for TraceInjector {
    fn press(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.trace.push(TraceEntry::Event(KeyEvent::press(key)));
        Ok(())
    }

    fn release(&mut self, key: StrafeKey) -> Result<(), InjectError> {
        self.trace.push(TraceEntry::Event(KeyEvent::release(key)));
        Ok(())
    }
}

pub struct TraceSleeper {
    trace: Trace,
}

impl Sleeper for TraceSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.trace.push(TraceEntry::Wait(duration));
    }
}
