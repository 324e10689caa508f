//! Self-playing rally: the ball bounces between the end zones, speeding up
//! until a reset, so passers-by see what the game looks like.

use pong1d_core::{
    Animation,
    Rng,
    Strip,
    config::{
        STRIP_LEN,
        ZONE_SIZE_START,
    },
    render,
};

const DELAY_START_MS: u64 = 120;
const DELAY_MIN_MS: u64 = 50;
const SPEEDUP_MS: u64 = 4;

pub struct PongDemo {
    pos: i16,
    dir: i8,
    delay_ms: u64,
    last_ms: u64,
    rng: Rng,
}

impl PongDemo {
    pub const fn new() -> Self {
        Self {
            pos: (STRIP_LEN / 2) as i16,
            dir: 1,
            delay_ms: DELAY_START_MS,
            last_ms: 0,
            rng: Rng::new(0x5EED_0001),
        }
    }

    fn restart_rally(&mut self) {
        self.pos = (STRIP_LEN / 2) as i16;
        self.dir = if self.rng.coin() { 1 } else { -1 };
        self.delay_ms = DELAY_START_MS;
    }
}

impl Animation for PongDemo {
    fn name(&self) -> &'static str {
        "pong-demo"
    }

    fn reset(&mut self) {
        self.restart_rally();
        self.last_ms = 0;
    }

    fn update(&mut self, strip: &mut dyn Strip, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_ms) < self.delay_ms {
            return;
        }
        self.last_ms = now_ms;

        self.pos += i16::from(self.dir);

        // A perfect player returns at the inner zone edge every time.
        let bounced = if self.pos <= 0 {
            self.pos = 0;
            self.dir = 1;
            true
        } else if self.pos >= STRIP_LEN as i16 - 1 {
            self.pos = STRIP_LEN as i16 - 1;
            self.dir = -1;
            true
        } else {
            false
        };

        if bounced {
            if self.delay_ms > DELAY_MIN_MS + SPEEDUP_MS {
                self.delay_ms -= SPEEDUP_MS;
            } else {
                // Rally "won"; start the next one fresh.
                self.restart_rally();
            }
        }

        strip.clear();
        render::draw_zones(strip, ZONE_SIZE_START);
        render::draw_ball(strip, self.pos, self.dir);
    }
}
