use std::time::Duration;

/// Abstraction over blocking waits.
/// Implementations: ThreadSleeper (production), MockSleeper (testing).
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread. Best effort: subject to scheduler jitter.
#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl ThreadSleeper {
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Mock sleeper for deterministic testing. Never blocks.
#[derive(Debug, Default)]
pub struct MockSleeper {
    requested: Vec<Duration>,
    elapsed: Duration,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration passed to `sleep`, in order.
    pub fn requested(&self) -> &[Duration] {
        &self.requested
    }

    /// Virtual time that has passed.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.requested.push(duration);
        self.elapsed += duration;
    }
}
