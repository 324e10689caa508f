//! Button lamp driver: two independently dimmable indicator LEDs over LEDC
//! PWM, one per player.
//!
//! All commands are fire-and-forget from the game task's point of view; the
//! async flash/blink helpers only pace themselves, they wait on nothing
//! external.

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelIFace,
        },
        timer::{
            self,
            TimerIFace,
        },
    },
    time::Rate,
};
use pong1d_core::{
    Side,
    config::HIT_FEEDBACK_MS,
    math::wave8,
};

use crate::LampResources;

const BREATH_STEP_MS: u64 = 20;

const FLASH_HOLD_MS: u64 = 30;
const FLASH_FADE_STEP: u8 = 32;
const FLASH_FADE_STEP_MS: u64 = 6;
const FLASH_FADE_STEPS: u64 = (255 + FLASH_FADE_STEP as u64 - 1) / FLASH_FADE_STEP as u64;

// flash_hit runs on the rally's critical path; it may not outlast the
// strip-side feedback pause.
const _: () = assert!(FLASH_HOLD_MS + FLASH_FADE_STEPS * FLASH_FADE_STEP_MS <= HIT_FEEDBACK_MS);

pub struct Indicators<'a> {
    left: channel::Channel<'a, LowSpeed>,
    right: channel::Channel<'a, LowSpeed>,
    breath_phase: u8,
    last_breath_ms: u64,
}

impl From<LampResources<'static>> for Indicators<'static> {
    fn from(res: LampResources<'static>) -> Self {
        let ledc = crate::mk_static!(Ledc<'static>, Ledc::new(res.ledc));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let lstimer = crate::mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        lstimer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(5),
            })
            .unwrap();

        let mut left = ledc.channel(channel::Number::Channel0, res.left);
        left.configure(channel::config::Config {
            timer: lstimer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .unwrap();

        let mut right = ledc.channel(channel::Number::Channel1, res.right);
        right
            .configure(channel::config::Config {
                timer: lstimer,
                duty_pct: 0,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .unwrap();

        Self {
            left,
            right,
            breath_phase: 0,
            last_breath_ms: 0,
        }
    }
}

impl Indicators<'_> {
    pub fn set_brightness(&mut self, side: Side, brightness: u8) {
        let lamp = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        let _ = lamp.set_duty(duty_pct(brightness));
    }

    pub fn set_off(&mut self) {
        self.set_brightness(Side::Left, 0);
        self.set_brightness(Side::Right, 0);
    }

    /// Steady bright light on whichever zones the ball can currently be
    /// returned from.
    pub fn set_zone_active(&mut self, left_on: bool, right_on: bool) {
        self.set_brightness(Side::Left, if left_on { 255 } else { 0 });
        self.set_brightness(Side::Right, if right_on { 255 } else { 0 });
    }

    /// Countdown beat, both lamps in sync with the strip's center pixel.
    pub fn pulse_countdown(&mut self, brightness: u8) {
        self.set_brightness(Side::Left, brightness);
        self.set_brightness(Side::Right, brightness);
    }

    /// Successful return: quick bright flash, then fade out. Must complete
    /// within [`HIT_FEEDBACK_MS`] so it never extends the rally's pause.
    pub async fn flash_hit(&mut self, side: Side) {
        self.set_brightness(side, 255);
        Timer::after(Duration::from_millis(FLASH_HOLD_MS)).await;
        let mut b: u8 = 255;
        while b > 0 {
            b = b.saturating_sub(FLASH_FADE_STEP);
            self.set_brightness(side, b);
            Timer::after(Duration::from_millis(FLASH_FADE_STEP_MS)).await;
        }
    }

    /// Conceded point: three rapid blinks on the loser's lamp.
    pub async fn blink_miss(&mut self, side: Side) {
        for _ in 0..3 {
            self.set_brightness(side, 255);
            Timer::after(Duration::from_millis(100)).await;
            self.set_brightness(side, 0);
            Timer::after(Duration::from_millis(80)).await;
        }
    }

    /// Idle breathing: a slow synchronized fade on both lamps, capped at
    /// half brightness so the attract strip stays the focus.
    pub fn breathe(&mut self, now_ms: u64) {
        if now_ms.wrapping_sub(self.last_breath_ms) < BREATH_STEP_MS {
            return;
        }
        self.last_breath_ms = now_ms;
        self.breath_phase = self.breath_phase.wrapping_add(1);
        let brightness = wave8(self.breath_phase) / 2;
        self.set_brightness(Side::Left, brightness);
        self.set_brightness(Side::Right, brightness);
    }
}

fn duty_pct(brightness: u8) -> u8 {
    (u16::from(brightness) * 100 / 255) as u8
}
