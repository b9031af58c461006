use std::time::Duration;

use crate::key::KeyEvent;
use crate::pattern::{StrafePattern, Timing};

/// A key event and how long to wait before emitting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedAction {
    pub wait_before: Duration,
    pub event: KeyEvent,
}

impl TimedAction {
    pub fn new(wait_before: Duration, event: KeyEvent) -> Self {
        Self { wait_before, event }
    }
}

/// Ordered key actions for one strafe pair, followed by a settle wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrafeSequence {
    pub actions: Vec<TimedAction>,
    /// Wait after the last action, before the next pair.
    pub settle: Duration,
}

impl StrafeSequence {
    pub fn events(&self) -> impl Iterator<Item = KeyEvent> + '_ {
        self.actions.iter().map(|a| a.event)
    }

    /// Sum of every wait in the sequence, settle included.
    pub fn total_duration(&self) -> Duration {
        self.actions
            .iter()
            .map(|a| a.wait_before)
            .sum::<Duration>()
            + self.settle
    }

    /// Index of the first occurrence of `event`.
    pub fn position(&self, event: KeyEvent) -> Option<usize> {
        self.actions.iter().position(|a| a.event == event)
    }
}

/// Lay out the press/release timeline for `pattern`.
///
/// Late:  press X, [hold] release X, [gap] press Y, [hold] release Y.
/// Early: press X, [hold] press Y, [overlap] release X, [hold] release Y.
pub fn build_sequence(
    pattern: &StrafePattern,
    hold: Duration,
    pair_gap: Duration,
) -> StrafeSequence {
    let first = pattern.direction.first();
    let second = pattern.direction.second();
    let offset = pattern.magnitude;

    let actions = match pattern.timing {
        Timing::Late => vec![
            TimedAction::new(Duration::ZERO, KeyEvent::press(first)),
            TimedAction::new(hold, KeyEvent::release(first)),
            TimedAction::new(offset, KeyEvent::press(second)),
            TimedAction::new(hold, KeyEvent::release(second)),
        ],
        Timing::Early => vec![
            TimedAction::new(Duration::ZERO, KeyEvent::press(first)),
            TimedAction::new(hold, KeyEvent::press(second)),
            TimedAction::new(offset, KeyEvent::release(first)),
            TimedAction::new(hold, KeyEvent::release(second)),
        ],
    };

    StrafeSequence {
        actions,
        settle: pair_gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::StrafeKey;
    use crate::pattern::Direction;

    const HOLD: Duration = Duration::from_millis(200);
    const PAIR_GAP: Duration = Duration::from_millis(400);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_late_a_to_d() {
        let seq = build_sequence(&StrafePattern::late(Direction::AToD, 10), HOLD, PAIR_GAP);
        assert_eq!(
            seq.actions,
            vec![
                TimedAction::new(ms(0), KeyEvent::press(StrafeKey::Left)),
                TimedAction::new(ms(200), KeyEvent::release(StrafeKey::Left)),
                TimedAction::new(ms(10), KeyEvent::press(StrafeKey::Right)),
                TimedAction::new(ms(200), KeyEvent::release(StrafeKey::Right)),
            ]
        );
        assert_eq!(seq.settle, ms(400));
    }

    #[test]
    fn test_early_d_to_a() {
        let seq = build_sequence(&StrafePattern::early(Direction::DToA, 30), HOLD, PAIR_GAP);
        assert_eq!(
            seq.actions,
            vec![
                TimedAction::new(ms(0), KeyEvent::press(StrafeKey::Right)),
                TimedAction::new(ms(200), KeyEvent::press(StrafeKey::Left)),
                TimedAction::new(ms(30), KeyEvent::release(StrafeKey::Right)),
                TimedAction::new(ms(200), KeyEvent::release(StrafeKey::Left)),
            ]
        );
        assert_eq!(seq.settle, ms(400));
    }

    #[test]
    fn test_late_orders_release_before_press() {
        for direction in Direction::ALL {
            let seq = build_sequence(&StrafePattern::late(direction, 0), HOLD, PAIR_GAP);
            let released = seq.position(KeyEvent::release(direction.first())).unwrap();
            let pressed = seq.position(KeyEvent::press(direction.second())).unwrap();
            assert!(released < pressed);
        }
    }

    #[test]
    fn test_early_orders_press_before_release() {
        for direction in Direction::ALL {
            let seq = build_sequence(&StrafePattern::early(direction, 0), HOLD, PAIR_GAP);
            let pressed = seq.position(KeyEvent::press(direction.second())).unwrap();
            let released = seq.position(KeyEvent::release(direction.first())).unwrap();
            assert!(pressed < released);
        }
    }

    #[test]
    fn test_every_press_released() {
        for pattern in [
            StrafePattern::late(Direction::AToD, 5),
            StrafePattern::early(Direction::DToA, 5),
        ] {
            let seq = build_sequence(&pattern, HOLD, PAIR_GAP);
            for key in [StrafeKey::Left, StrafeKey::Right] {
                let presses = seq.events().filter(|e| *e == KeyEvent::press(key)).count();
                let releases = seq.events().filter(|e| *e == KeyEvent::release(key)).count();
                assert_eq!(presses, 1);
                assert_eq!(releases, 1);
            }
        }
    }

    #[test]
    fn test_total_duration() {
        let seq = build_sequence(&StrafePattern::late(Direction::AToD, 15), HOLD, PAIR_GAP);
        assert_eq!(seq.total_duration(), ms(200 + 15 + 200 + 400));
    }
}
