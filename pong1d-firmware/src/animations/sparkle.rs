//! Twinkling starfield with the occasional shooting star.
//!
//! Each pixel fades toward a per-pixel target brightness; new twinkles
//! spawn at random with random hues. Every few seconds a bright streak
//! may sweep across from either end, leaving a short trail.

use palette::Srgb;
use pong1d_core::{
    Animation,
    Rng,
    Strip,
    config::STRIP_LEN,
};

use super::hsv;

const FRAME_MS: u64 = 25;
const STAR_TRAIL: i16 = 6;
const STAR_SPEED: i16 = 2;
const STAR_MIN_GAP_MS: u64 = 3000;

pub struct Sparkle {
    brightness: [u8; STRIP_LEN],
    target: [u8; STRIP_LEN],
    hue: [u8; STRIP_LEN],
    star_pos: i16,
    star_dir: i8,
    last_star_ms: u64,
    last_ms: u64,
    rng: Rng,
}

impl Sparkle {
    pub const fn new() -> Self {
        Self {
            brightness: [0; STRIP_LEN],
            target: [0; STRIP_LEN],
            hue: [0; STRIP_LEN],
            star_pos: -1,
            star_dir: 1,
            last_star_ms: 0,
            last_ms: 0,
            rng: Rng::new(0xA5A5_1234),
        }
    }

    fn star_active(&self) -> bool {
        self.star_pos >= -STAR_TRAIL && self.star_pos < STRIP_LEN as i16 + STAR_TRAIL
    }
}

impl Animation for Sparkle {
    fn name(&self) -> &'static str {
        "sparkle"
    }

    fn reset(&mut self) {
        self.brightness = [0; STRIP_LEN];
        self.target = [0; STRIP_LEN];
        self.hue = [0; STRIP_LEN];
        self.star_pos = -STAR_TRAIL - 1;
        self.star_dir = 1;
        self.last_star_ms = 0;
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < FRAME_MS {
            return;
        }
        self.last_ms = now_ms;

        // Spawn new twinkles on dark pixels.
        for i in 0..STRIP_LEN {
            if self.target[i] == 0 && self.brightness[i] == 0 && self.rng.range(100) < 15 {
                self.target[i] = 80 + self.rng.range(176) as u8;
                self.hue[i] = self.rng.range(256) as u8;
            }
        }

        // Fade in fast, fade out slow.
        for i in 0..STRIP_LEN {
            if self.target[i] > 0 {
                self.brightness[i] = self.brightness[i].saturating_add(20);
                if self.brightness[i] >= self.target[i] {
                    self.brightness[i] = self.target[i];
                    self.target[i] = 0;
                }
            } else {
                self.brightness[i] = self.brightness[i].saturating_sub(8);
            }
        }

        strip.clear();
        for i in 0..STRIP_LEN {
            if self.brightness[i] > 0 {
                strip.set(i, hsv(self.hue[i], 180, self.brightness[i]));
            }
        }

        // Shooting star, white head with a dimming tail.
        if self.star_active() {
            for t in 0..=STAR_TRAIL {
                let pos = self.star_pos - t * i16::from(self.star_dir);
                if pos >= 0 && (pos as usize) < STRIP_LEN {
                    let level = 255u8.saturating_sub((t as u8).saturating_mul(40));
                    strip.blend(pos as usize, Srgb::new(level, level, level));
                }
            }
            self.star_pos += STAR_SPEED * i16::from(self.star_dir);
        } else if now_ms.wrapping_sub(self.last_star_ms) > STAR_MIN_GAP_MS
            && self.rng.range(100) < 5
        {
            self.last_star_ms = now_ms;
            if self.rng.coin() {
                self.star_pos = -STAR_TRAIL;
                self.star_dir = 1;
            } else {
                self.star_pos = STRIP_LEN as i16 + STAR_TRAIL - 1;
                self.star_dir = -1;
            }
        }
    }
}
