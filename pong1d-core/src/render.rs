//! Stateless frame painters for gameplay.
//!
//! Each function writes the pixels it is responsible for and nothing else;
//! callers compose a frame (clear, zones, ball, score) and then flush.

use palette::Srgb;

use crate::{
    config::{
        COLOR_BALL,
        COLOR_COUNTDOWN,
        COLOR_SCORE_LEFT,
        COLOR_SCORE_RIGHT,
        COLOR_ZONE_LEFT,
        COLOR_ZONE_RIGHT,
        STRIP_LEN,
    },
    event::Side,
    frame::Strip,
};

/// Trail fade amounts, nearest first.
const TRAIL_FADE: [u8; 3] = [160, 210, 240];

/// Paint both player zones at the strip's ends.
pub fn draw_zones<S: Strip + ?Sized>(strip: &mut S, zone_size: usize) {
    for i in 0..zone_size {
        strip.set(i, COLOR_ZONE_LEFT);
        strip.set(STRIP_LEN - 1 - i, COLOR_ZONE_RIGHT);
    }
}

/// Paint one zone in a single color (miss flash, hit feedback).
pub fn draw_zone<S: Strip + ?Sized>(strip: &mut S, side: Side, zone_size: usize, color: Srgb<u8>) {
    for i in 0..zone_size {
        match side {
            Side::Left => strip.set(i, color),
            Side::Right => strip.set(STRIP_LEN - 1 - i, color),
        }
    }
}

/// Paint the ball with a 3-pixel comet trail fading out behind it.
pub fn draw_ball<S: Strip + ?Sized>(strip: &mut S, pos: i16, dir: i8) {
    if !(0..STRIP_LEN as i16).contains(&pos) {
        return;
    }
    strip.set(pos as usize, COLOR_BALL);

    for (k, fade) in TRAIL_FADE.iter().enumerate() {
        let t = pos - i16::from(dir) * (k as i16 + 1);
        if (0..STRIP_LEN as i16).contains(&t) {
            strip.set(t as usize, COLOR_BALL);
            strip.fade_to_black(t as usize, *fade);
        }
    }
}

/// Blend one score marker per point, growing inward from the strip center.
pub fn draw_score<S: Strip + ?Sized>(strip: &mut S, score_left: u8, score_right: u8) {
    let center = STRIP_LEN / 2;
    for i in 0..score_left as usize {
        if i + 1 <= center {
            strip.blend(center - 1 - i, COLOR_SCORE_LEFT);
        }
    }
    for i in 0..score_right as usize {
        if center + 1 + i < STRIP_LEN {
            strip.blend(center + 1 + i, COLOR_SCORE_RIGHT);
        }
    }
}

/// The serve countdown beat: zones plus a yellow center pixel when `on`.
pub fn draw_countdown<S: Strip + ?Sized>(strip: &mut S, zone_size: usize, on: bool) {
    strip.clear();
    draw_zones(strip, zone_size);
    if on {
        strip.set(STRIP_LEN / 2, COLOR_COUNTDOWN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{
            COLOR_BACKGROUND,
            ZONE_SIZE_START,
        },
        frame::FrameBuffer,
    };

    fn lit_count(fb: &FrameBuffer<STRIP_LEN>) -> usize {
        fb.pixels()
            .iter()
            .filter(|p| **p != COLOR_BACKGROUND)
            .count()
    }

    #[test]
    fn zones_cover_both_ends_only() {
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_zones(&mut fb, ZONE_SIZE_START);
        assert_eq!(lit_count(&fb), 2 * ZONE_SIZE_START);
        assert_eq!(fb.pixels()[0], COLOR_ZONE_LEFT);
        assert_eq!(fb.pixels()[ZONE_SIZE_START - 1], COLOR_ZONE_LEFT);
        assert_eq!(fb.pixels()[ZONE_SIZE_START], COLOR_BACKGROUND);
        assert_eq!(fb.pixels()[STRIP_LEN - 1], COLOR_ZONE_RIGHT);
    }

    #[test]
    fn ball_trail_points_away_from_travel() {
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_ball(&mut fb, 20, 1);
        assert_eq!(fb.pixels()[20], COLOR_BALL);
        // trail behind (lower indices), dimming with distance
        assert!(fb.pixels()[19].red > fb.pixels()[18].red);
        assert!(fb.pixels()[18].red > fb.pixels()[17].red);
        assert_eq!(fb.pixels()[21], COLOR_BACKGROUND);
        assert_eq!(fb.pixels()[16], COLOR_BACKGROUND);
    }

    #[test]
    fn ball_trail_is_clipped_at_the_edge() {
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_ball(&mut fb, 1, 1);
        assert_eq!(fb.pixels()[1], COLOR_BALL);
        assert_ne!(fb.pixels()[0], COLOR_BACKGROUND);
        // off-strip ball paints nothing
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_ball(&mut fb, -1, -1);
        assert_eq!(lit_count(&fb), 0);
    }

    #[test]
    fn score_markers_grow_inward_from_center() {
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_score(&mut fb, 2, 1);
        let c = STRIP_LEN / 2;
        assert_eq!(fb.pixels()[c - 1], COLOR_SCORE_LEFT);
        assert_eq!(fb.pixels()[c - 2], COLOR_SCORE_LEFT);
        assert_eq!(fb.pixels()[c + 1], COLOR_SCORE_RIGHT);
        assert_eq!(fb.pixels()[c], COLOR_BACKGROUND);
        assert_eq!(fb.pixels()[c + 2], COLOR_BACKGROUND);
    }

    #[test]
    fn countdown_center_pixel_toggles() {
        let mut fb = FrameBuffer::<STRIP_LEN>::new();
        draw_countdown(&mut fb, 8, true);
        assert_eq!(fb.pixels()[STRIP_LEN / 2], COLOR_COUNTDOWN);
        draw_countdown(&mut fb, 8, false);
        assert_eq!(fb.pixels()[STRIP_LEN / 2], COLOR_BACKGROUND);
    }
}
