//! Button debouncing.
//!
//! One [`Debouncer`] per side, owned by the input task. The stable level only
//! flips after the raw level has held steady for the full window; any bounce
//! restarts the window. A press is reported exactly once per stable
//! inactive→active transition, never on release.

use crate::config::DEBOUNCE_MS;

pub struct Debouncer {
    raw: bool,
    stable: bool,
    changed_at_ms: u64,
}

impl Debouncer {
    /// The initial raw reading is taken as already stable, so a button held
    /// at boot does not produce a phantom press.
    #[must_use]
    pub const fn new(initial_raw: bool, now_ms: u64) -> Self {
        Self {
            raw: initial_raw,
            stable: initial_raw,
            changed_at_ms: now_ms,
        }
    }

    /// Feed one raw sample. Returns `true` on a stable press edge.
    pub fn sample(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw != self.raw {
            // any change restarts the window
            self.raw = raw;
            self.changed_at_ms = now_ms;
            return false;
        }
        if now_ms.wrapping_sub(self.changed_at_ms) >= DEBOUNCE_MS && self.stable != raw {
            self.stable = raw;
            return self.stable;
        }
        false
    }

    /// Current debounced level.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_press_emits_exactly_one_event() {
        let mut d = Debouncer::new(false, 0);
        let mut events = 0;
        // press at t=5, held for 100ms, sampled every 5ms
        for t in (5..=105).step_by(5) {
            if d.sample(true, t) {
                events += 1;
            }
        }
        assert_eq!(events, 1);
        assert!(d.is_active());
    }

    #[test]
    fn bounces_shorter_than_window_emit_nothing() {
        let mut d = Debouncer::new(false, 0);
        // 10ms-wide spikes, each shorter than the 20ms window
        let samples = [
            (5, true),
            (10, true),
            (15, false),
            (20, false),
            (25, true),
            (35, false),
            (45, true),
            (55, false),
            (70, false),
            (90, false),
        ];
        for (t, raw) in samples {
            assert!(!d.sample(raw, t), "spurious event at t={t}");
        }
        assert!(!d.is_active());
    }

    #[test]
    fn bounce_during_press_restarts_the_window() {
        let mut d = Debouncer::new(false, 0);
        assert!(!d.sample(true, 0));
        assert!(!d.sample(true, 10));
        // bounce at 15ms: window restarts
        assert!(!d.sample(false, 15));
        assert!(!d.sample(true, 18));
        // only 17ms since the last change: still unstable
        assert!(!d.sample(true, 35));
        // 20ms after the last change the press commits
        assert!(d.sample(true, 38));
    }

    #[test]
    fn release_is_committed_but_not_reported() {
        let mut d = Debouncer::new(false, 0);
        assert!(!d.sample(true, 0));
        assert!(d.sample(true, 25));
        assert!(!d.sample(false, 30));
        assert!(!d.sample(false, 55));
        assert!(!d.is_active());
        // a second full press reports again
        assert!(!d.sample(true, 60));
        assert!(d.sample(true, 85));
    }

    #[test]
    fn held_at_boot_is_not_a_press() {
        let mut d = Debouncer::new(true, 0);
        for t in (5..=200).step_by(5) {
            assert!(!d.sample(true, t));
        }
    }
}
