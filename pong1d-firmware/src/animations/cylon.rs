//! Scanning eye with a Gaussian brightness profile, orange-red.
//!
//! The eye slides fully off either end before reversing, so the turnaround
//! reads as the light leaving and coming back rather than bouncing.

use palette::Srgb;
use pong1d_core::{
    Animation,
    Strip,
    config::STRIP_LEN,
};

const FRAME_MS: u64 = 55;

/// Bell-curve brightness across the eye, peak in the middle.
const EYE: [u8; 13] = [13, 32, 67, 120, 183, 235, 255, 235, 183, 120, 67, 32, 13];
const HALF: i16 = EYE.len() as i16 / 2;

pub struct Cylon {
    center: i16,
    dir: i8,
    last_ms: u64,
}

impl Cylon {
    pub const fn new() -> Self {
        Self {
            center: -HALF,
            dir: 1,
            last_ms: 0,
        }
    }
}

impl Animation for Cylon {
    fn name(&self) -> &'static str {
        "cylon"
    }

    fn reset(&mut self) {
        self.center = -HALF;
        self.dir = 1;
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < FRAME_MS {
            return;
        }
        self.last_ms = now_ms;

        strip.clear();
        for (i, &level) in EYE.iter().enumerate() {
            let pos = self.center - HALF + i as i16;
            if pos >= 0 && (pos as usize) < strip.len() {
                strip.set(pos as usize, Srgb::new(level, level / 3, 0));
            }
        }

        self.center += i16::from(self.dir);
        if self.center > STRIP_LEN as i16 + HALF {
            self.dir = -1;
        } else if self.center < -HALF {
            self.dir = 1;
        }
    }
}
