//! Rainbow wash with a white dot bouncing end to end over it.

use pong1d_core::{
    Animation,
    Strip,
    config::STRIP_LEN,
};

use super::hsv;

const FRAME_MS: u64 = 40;

pub struct RainbowDot {
    hue: u8,
    pos: i16,
    dir: i8,
    last_ms: u64,
}

impl RainbowDot {
    pub const fn new() -> Self {
        Self {
            hue: 0,
            pos: 0,
            dir: 1,
            last_ms: 0,
        }
    }
}

impl Animation for RainbowDot {
    fn name(&self) -> &'static str {
        "rainbow-dot"
    }

    fn reset(&mut self) {
        self.hue = 0;
        self.pos = 0;
        self.dir = 1;
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < FRAME_MS {
            return;
        }
        self.last_ms = now_ms;

        for i in 0..strip.len() {
            let pixel_hue = self.hue.wrapping_add((i as u8).wrapping_mul(4));
            strip.set(i, hsv(pixel_hue, 255, 90));
        }
        strip.set(self.pos.max(0) as usize, palette::Srgb::new(255, 255, 255));

        self.hue = self.hue.wrapping_add(2);
        self.pos += i16::from(self.dir);
        if self.pos <= 0 {
            self.pos = 0;
            self.dir = 1;
        } else if self.pos >= STRIP_LEN as i16 - 1 {
            self.pos = STRIP_LEN as i16 - 1;
            self.dir = -1;
        }
    }
}
