//! Whole-strip breathing fade that shifts hue on every exhale.

use pong1d_core::{
    Animation,
    Strip,
    math::{
        scale8,
        wave8,
    },
};

use super::hsv;

const FRAME_MS: u64 = 20;

pub struct Breathing {
    phase: u8,
    hue: u8,
    last_ms: u64,
}

impl Breathing {
    pub const fn new() -> Self {
        Self {
            phase: 0,
            hue: 0,
            last_ms: 0,
        }
    }
}

impl Animation for Breathing {
    fn name(&self) -> &'static str {
        "breathing"
    }

    fn reset(&mut self) {
        self.phase = 0;
        self.hue = 0;
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < FRAME_MS {
            return;
        }
        self.last_ms = now_ms;

        // Floor of 20 so the strip never goes fully dark mid-breath.
        let brightness = 20u8.saturating_add(scale8(wave8(self.phase), 235));
        let half = (strip.len() / 2) as i16;
        for i in 0..strip.len() {
            // Slight hue gradient out from the center.
            let offset = (i as i16 - half).unsigned_abs() as u8;
            let pixel_hue = self.hue.wrapping_add(offset.wrapping_mul(3));
            strip.set(i, hsv(pixel_hue, 220, brightness));
        }

        let (next, wrapped) = self.phase.overflowing_add(1);
        self.phase = next;
        if wrapped {
            self.hue = self.hue.wrapping_add(32);
        }
    }
}
