//! Small integer helpers for pixel math.

/// Scale `value` by `scale/256`, FastLED-style.
#[must_use]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (scale as u16 + 1)) >> 8) as u8
}

/// Smooth 0 → 255 → 0 pulse over one full `theta` period.
///
/// Parabolic approximation of a half sine; good enough for breathing
/// effects and far cheaper than a float `sin`.
#[must_use]
pub const fn wave8(theta: u8) -> u8 {
    let t = theta as u16;
    ((t * (255 - t)) / 64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale8_full_scale_is_identity() {
        for v in [0u8, 1, 80, 254, 255] {
            assert_eq!(scale8(v, 255), v);
        }
    }

    #[test]
    fn scale8_zero_scale_blanks() {
        assert_eq!(scale8(255, 0), 0);
    }

    #[test]
    fn wave8_endpoints_dark_and_peak_bright() {
        assert_eq!(wave8(0), 0);
        assert_eq!(wave8(255), 0);
        assert!(wave8(127) > 250);
        // monotonic rise over the first half
        assert!(wave8(32) < wave8(64));
        assert!(wave8(64) < wave8(100));
    }
}
