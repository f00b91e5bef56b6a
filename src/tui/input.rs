//! Key debounce
//!
//! Some terminals never send release events, so a held key arrives as a
//! stream of presses. Stepping keys repeat after a delay so holding `n`
//! walks through the catalog. Every other key acts once per press.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How a held key fires again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Again after release, or after `ONCE_GAP` when no release arrives
    Once,
    /// Again every `interval` once the key has been down for `delay`
    Held { delay: Duration, interval: Duration },
}

/// Presses closer than this are one keystroke seen twice
const ONCE_GAP: Duration = Duration::from_millis(150);

const STEP: Repeat = Repeat::Held {
    delay: Duration::from_millis(400),
    interval: Duration::from_millis(60),
};

const SCROLL: Repeat = Repeat::Held {
    delay: Duration::from_millis(300),
    interval: Duration::from_millis(30),
};

/// Repeat policy of each explorer key
pub fn repeat_for(key: KeyCode) -> Repeat {
    match key {
        // Previous/next galaxy
        KeyCode::Char('n' | 'N' | 'p') | KeyCode::Up | KeyCode::Down => STEP,
        // Logs panel
        KeyCode::PageUp | KeyCode::PageDown => SCROLL,
        _ => Repeat::Once,
    }
}

#[derive(Debug, Clone, Copy)]
struct Down {
    since: Instant,
    fired: Instant,
}

/// Keys currently held, with when they last fired
#[derive(Debug, Default)]
pub struct KeyGate {
    down: HashMap<KeyCode, Down>,
}

impl KeyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this press of `key` should trigger its action
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let Some(down) = self.down.get_mut(&key) else {
            self.down.insert(
                key,
                Down {
                    since: now,
                    fired: now,
                },
            );
            return true;
        };

        let due = match repeat_for(key) {
            Repeat::Once => now.duration_since(down.fired) >= ONCE_GAP,
            Repeat::Held { delay, interval } => {
                now.duration_since(down.since) >= delay
                    && now.duration_since(down.fired) >= interval
            }
        };
        if due {
            down.fired = now;
        }
        due
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn action_keys_fire_once_per_press() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Char('1'), t0));
        assert!(!gate.press_at(KeyCode::Char('1'), t0 + ms(20)));

        gate.release(KeyCode::Char('1'));
        assert!(gate.press_at(KeyCode::Char('1'), t0 + ms(40)));
    }

    #[test]
    fn missing_release_is_tolerated() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Char('t'), t0));
        // A second deliberate press with no release in between
        assert!(gate.press_at(KeyCode::Char('t'), t0 + ms(200)));
    }

    #[test]
    fn held_step_key_repeats_after_delay() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();
        let n = KeyCode::Char('n');

        assert!(gate.press_at(n, t0));
        assert!(!gate.press_at(n, t0 + ms(100)));
        assert!(gate.press_at(n, t0 + ms(400)));
        // Too soon after the last repeat
        assert!(!gate.press_at(n, t0 + ms(420)));
        assert!(gate.press_at(n, t0 + ms(460)));
    }

    #[test]
    fn keys_are_tracked_separately() {
        let mut gate = KeyGate::new();
        let t0 = Instant::now();

        assert!(gate.press_at(KeyCode::Down, t0));
        assert!(gate.press_at(KeyCode::Up, t0 + ms(10)));
        assert!(!gate.press_at(KeyCode::Down, t0 + ms(20)));
    }

    #[test]
    fn policies() {
        assert_eq!(repeat_for(KeyCode::Char('p')), STEP);
        assert_eq!(repeat_for(KeyCode::PageDown), SCROLL);
        assert_eq!(repeat_for(KeyCode::Enter), Repeat::Once);
        assert_eq!(repeat_for(KeyCode::Char('q')), Repeat::Once);
    }
}
