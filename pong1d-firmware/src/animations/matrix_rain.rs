//! Green code-rain: bright drops falling from the left end, fading trails,
//! occasional glitch flickers on random pixels.

use palette::Srgb;
use pong1d_core::{
    Animation,
    Rng,
    Strip,
    config::STRIP_LEN,
};

const FRAME_MS: u64 = 40;
const DROPS: usize = 6;

#[derive(Clone, Copy)]
struct Drop {
    pos: i16,
    speed: i16,
    /// Frames to wait before (re)spawning.
    delay: u8,
}

impl Drop {
    const fn idle() -> Self {
        Self {
            pos: -1,
            speed: 1,
            delay: 0,
        }
    }
}

pub struct MatrixRain {
    drops: [Drop; DROPS],
    green: [u8; STRIP_LEN],
    last_ms: u64,
    rng: Rng,
}

impl MatrixRain {
    pub const fn new() -> Self {
        Self {
            drops: [Drop::idle(); DROPS],
            green: [0; STRIP_LEN],
            last_ms: 0,
            rng: Rng::new(0x0D15_EA5E),
        }
    }

    fn respawn(&mut self, i: usize) {
        self.drops[i] = Drop {
            pos: 0,
            speed: 1 + self.rng.range(2) as i16,
            delay: self.rng.range(30) as u8,
        };
    }
}

impl Animation for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix-rain"
    }

    fn reset(&mut self) {
        self.drops = [Drop::idle(); DROPS];
        self.green = [0; STRIP_LEN];
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < FRAME_MS {
            return;
        }
        self.last_ms = now_ms;

        // Trails decay every frame.
        for level in &mut self.green {
            *level = level.saturating_sub(25);
        }

        for i in 0..DROPS {
            if self.drops[i].delay > 0 {
                self.drops[i].delay -= 1;
                continue;
            }
            if self.drops[i].pos < 0 || self.drops[i].pos >= STRIP_LEN as i16 {
                self.respawn(i);
                continue;
            }
            self.green[self.drops[i].pos as usize] = 255;
            self.drops[i].pos += self.drops[i].speed;
        }

        // Rare glitch: a lone dim pixel flickering out of sequence.
        if self.rng.range(100) < 3 {
            let at = self.rng.range(STRIP_LEN as u32) as usize;
            self.green[at] = self.green[at].max(90);
        }

        for (i, &g) in self.green.iter().enumerate() {
            strip.set(i, Srgb::new(g / 8, g, g / 16));
        }
    }
}
