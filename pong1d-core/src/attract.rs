//! Attract-mode animation registry.
//!
//! Animations implement [`Animation`] and are registered explicitly at
//! startup, in a fixed order, from long-lived instances. The registry
//! rotates through them on a timer and never clears the strip between
//! calls: every plugin owns all of its pixels and its own pacing.

use crate::{
    config::{
        ATTRACT_ROTATE_MS,
        MAX_ANIMATIONS,
    },
    frame::Strip,
};

/// One attract-mode renderer.
///
/// `update` is called far more often than the plugin wants to draw; each
/// implementation rate-limits itself against `now_ms` and must tolerate
/// being `reset` and resumed at any point.
pub trait Animation {
    fn name(&self) -> &'static str;

    /// Start over. Must not assume any prior state.
    fn reset(&mut self);

    /// Render into `strip`. The caller does no clearing.
    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64);
}

pub struct AttractRegistry<'a> {
    slots: [Option<&'a mut dyn Animation>; MAX_ANIMATIONS],
    len: usize,
    active: usize,
    started_at_ms: Option<u64>,
    interrupted: bool,
}

impl<'a> AttractRegistry<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [const { None }; MAX_ANIMATIONS],
            len: 0,
            active: 0,
            started_at_ms: None,
            interrupted: false,
        }
    }

    /// Add an animation. Past capacity this is a silent no-op: fewer
    /// attract variants, never a fault.
    pub fn register(&mut self, animation: &'a mut dyn Animation) {
        if self.len < MAX_ANIMATIONS {
            self.slots[self.len] = Some(animation);
            self.len += 1;
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn active_name(&self) -> Option<&'static str> {
        self.slots.get(self.active)?.as_ref().map(|a| a.name())
    }

    /// Run the active animation, rotating to the next one once it has had
    /// its turn. Safe no-op with nothing registered.
    pub fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if self.len == 0 {
            return;
        }

        match self.started_at_ms {
            None => {
                // first call after construction or an explicit reset
                self.started_at_ms = Some(now_ms);
                if let Some(anim) = &mut self.slots[self.active] {
                    anim.reset();
                }
            }
            Some(started) if now_ms.wrapping_sub(started) >= ATTRACT_ROTATE_MS => {
                self.next(now_ms);
            }
            Some(_) => {}
        }

        if let Some(anim) = &mut self.slots[self.active] {
            anim.update(strip, now_ms);
        }
    }

    /// Force rotation to the next animation, wrapping.
    pub fn next(&mut self, now_ms: u64) {
        if self.len == 0 {
            return;
        }
        self.active = (self.active + 1) % self.len;
        self.started_at_ms = Some(now_ms);
        if let Some(anim) = &mut self.slots[self.active] {
            anim.reset();
        }
    }

    /// Rewind to the first animation and restart its clock.
    pub fn reset_to_first(&mut self, now_ms: u64) {
        self.active = 0;
        self.started_at_ms = Some(now_ms);
        if let Some(anim) = &mut self.slots[self.active] {
            anim.reset();
        }
    }

    // The interrupt flag is a plain signal for the consumer; the registry
    // itself never acts on it.

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn clear_interrupt(&mut self) {
        self.interrupted = false;
    }

    #[must_use]
    pub const fn was_interrupted(&self) -> bool {
        self.interrupted
    }
}

impl Default for AttractRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuffer;

    #[derive(Default)]
    struct Counting {
        resets: usize,
        updates: usize,
    }

    impl Animation for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn update(&mut self, _strip: &mut dyn Strip, _now_ms: u64) {
            self.updates += 1;
        }
    }

    #[test]
    fn rotates_on_schedule_with_one_reset_per_activation() {
        let mut a = Counting::default();
        let mut b = Counting::default();
        let mut c = Counting::default();
        let mut fb = FrameBuffer::<8>::new();

        let mut registry = AttractRegistry::new();
        registry.register(&mut a);
        registry.register(&mut b);
        registry.register(&mut c);

        // 25s of updates at 100ms: two rotations, ending on the third slot
        let mut now = 0;
        while now <= 25_000 {
            registry.update(&mut fb, now);
            now += 100;
        }
        assert_eq!(registry.active_name(), Some("counting"));
        drop(registry);

        assert_eq!(a.resets, 1);
        assert_eq!(b.resets, 1);
        assert_eq!(c.resets, 1);
        assert!(a.updates > 0 && b.updates > 0 && c.updates > 0);
    }

    #[test]
    fn wraps_back_to_the_first_animation() {
        let mut a = Counting::default();
        let mut b = Counting::default();
        let mut fb = FrameBuffer::<8>::new();

        let mut registry = AttractRegistry::new();
        registry.register(&mut a);
        registry.register(&mut b);

        registry.update(&mut fb, 0);
        registry.next(1);
        registry.next(2);
        registry.next(3);
        drop(registry);

        // activation sequence: a (first update), b, a, b
        assert_eq!(a.resets, 2);
        assert_eq!(b.resets, 2);
    }

    #[test]
    fn reset_to_first_restamps_the_clock() {
        let mut a = Counting::default();
        let mut b = Counting::default();
        let mut fb = FrameBuffer::<8>::new();

        let mut registry = AttractRegistry::new();
        registry.register(&mut a);
        registry.register(&mut b);

        registry.update(&mut fb, 0);
        registry.update(&mut fb, ATTRACT_ROTATE_MS); // rotates to b
        registry.reset_to_first(ATTRACT_ROTATE_MS + 1);
        // clock was restamped: no immediate rotation
        registry.update(&mut fb, ATTRACT_ROTATE_MS + 2);
        drop(registry);

        assert_eq!(a.resets, 2);
        assert_eq!(b.resets, 1);
    }

    #[test]
    fn empty_registry_is_a_safe_noop() {
        let mut fb = FrameBuffer::<8>::new();
        let mut registry = AttractRegistry::new();
        registry.update(&mut fb, 0);
        registry.next(0);
        registry.reset_to_first(0);
        assert!(registry.is_empty());
        assert_eq!(registry.active_name(), None);
    }

    #[test]
    fn registration_caps_silently() {
        let mut anims: [Counting; MAX_ANIMATIONS + 4] =
            core::array::from_fn(|_| Counting::default());
        let mut registry = AttractRegistry::new();
        for anim in &mut anims {
            registry.register(anim);
        }
        assert_eq!(registry.len(), MAX_ANIMATIONS);
    }

    #[test]
    fn interrupt_flag_is_consumer_owned() {
        let mut registry = AttractRegistry::new();
        assert!(!registry.was_interrupted());
        registry.interrupt();
        assert!(registry.was_interrupted());
        // updates don't touch it
        let mut fb = FrameBuffer::<8>::new();
        registry.update(&mut fb, 0);
        assert!(registry.was_interrupted());
        registry.clear_interrupt();
        assert!(!registry.was_interrupted());
    }
}
