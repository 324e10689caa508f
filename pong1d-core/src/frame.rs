//! Pixel surface capability and the in-memory framebuffer behind it.
//!
//! Painters and attract animations draw through [`Strip`]; the firmware's
//! WS2812 driver implements it by delegating to a [`FrameBuffer`] and adds
//! the actual transmission. Nothing in this crate flushes: frame pacing is
//! the surface owner's job.

use palette::Srgb;

use crate::{
    config::COLOR_BACKGROUND,
    math::scale8,
};

pub trait Strip {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite one pixel. Out-of-range indices are ignored.
    fn set(&mut self, index: usize, color: Srgb<u8>);

    /// Additive, saturating blend into one pixel.
    fn blend(&mut self, index: usize, color: Srgb<u8>);

    /// Scale one pixel toward black by `amount/256`.
    fn fade_to_black(&mut self, index: usize, amount: u8);

    fn fill(&mut self, color: Srgb<u8>);

    fn clear(&mut self) {
        self.fill(COLOR_BACKGROUND);
    }
}

/// Fixed-size RGB framebuffer.
pub struct FrameBuffer<const N: usize> {
    pixels: [Srgb<u8>; N],
}

impl<const N: usize> FrameBuffer<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [COLOR_BACKGROUND; N],
        }
    }

    #[must_use]
    pub const fn pixels(&self) -> &[Srgb<u8>; N] {
        &self.pixels
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Strip for FrameBuffer<N> {
    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: Srgb<u8>) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = color;
        }
    }

    fn blend(&mut self, index: usize, color: Srgb<u8>) {
        if let Some(px) = self.pixels.get_mut(index) {
            px.red = px.red.saturating_add(color.red);
            px.green = px.green.saturating_add(color.green);
            px.blue = px.blue.saturating_add(color.blue);
        }
    }

    fn fade_to_black(&mut self, index: usize, amount: u8) {
        if let Some(px) = self.pixels.get_mut(index) {
            let keep = 255 - amount;
            px.red = scale8(px.red, keep);
            px.green = scale8(px.green, keep);
            px.blue = scale8(px.blue, keep);
        }
    }

    fn fill(&mut self, color: Srgb<u8>) {
        self.pixels.fill(color);
    }
}
