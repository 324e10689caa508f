//! Attract-mode animation plugins.
//!
//! Each animation lives in its own file, keeps its own state and pacing,
//! and is registered once at startup in a fixed order. Adding a new one
//! means writing the plugin and appending a line to [`build_registry`].

mod breathing;
mod cylon;
mod matrix_rain;
mod pong_demo;
mod rainbow_dot;
mod sparkle;

use palette::{
    FromColor,
    Hsv,
    Srgb,
};
use pong1d_core::AttractRegistry;

use crate::mk_static;

/// HSV to 8-bit RGB, hue given as 0..=255 around the wheel.
pub(crate) fn hsv(hue: u8, sat: u8, val: u8) -> Srgb<u8> {
    let hsv = Hsv::new_srgb(
        f32::from(hue) * (360.0 / 256.0),
        f32::from(sat) / 255.0,
        f32::from(val) / 255.0,
    );
    Srgb::from_color(hsv).into_format()
}

/// Build the full attract rotation. Order here is display order.
pub fn build_registry() -> AttractRegistry<'static> {
    let mut registry = AttractRegistry::new();
    registry.register(mk_static!(rainbow_dot::RainbowDot, rainbow_dot::RainbowDot::new()));
    registry.register(mk_static!(cylon::Cylon, cylon::Cylon::new()));
    registry.register(mk_static!(breathing::Breathing, breathing::Breathing::new()));
    registry.register(mk_static!(sparkle::Sparkle, sparkle::Sparkle::new()));
    registry.register(mk_static!(matrix_rain::MatrixRain, matrix_rain::MatrixRain::new()));
    registry.register(mk_static!(pong_demo::PongDemo, pong_demo::PongDemo::new()));
    registry
}
