//! Compile-time game configuration.
//!
//! Everything here is a build-time constant; there is no runtime rule
//! surface. Ball timing derives from [`BALL_DELAY_START_MS`] so the whole
//! speed curve scales from one knob.

use palette::Srgb;

/// Number of pixels on the strip.
pub const STRIP_LEN: usize = 55;

/// Zone size at the start of a match.
pub const ZONE_SIZE_START: usize = 10;
/// The zone never shrinks below this.
pub const ZONE_SIZE_MIN: usize = 5;
/// First score to reach this wins.
pub const SCORE_TO_WIN: u8 = 5;

/// Inter-step ball delay at serve. Main tuning knob for ball speed.
pub const BALL_DELAY_START_MS: u16 = 60;
/// Hard floor for the inter-step delay.
pub const BALL_DELAY_MIN_MS: u16 = BALL_DELAY_START_MS / 5;
/// Flat speedup applied on every successful return.
pub const BALL_SPEEDUP_PER_RETURN_MS: u16 = BALL_DELAY_START_MS / 14;
/// Extra speedup for striking the ball right as it enters the zone,
/// scaling linearly down to zero at the zone's far edge.
pub const BALL_EARLY_HIT_MAX_BONUS_MS: u16 = BALL_DELAY_START_MS / 8;

/// A raw button level must hold this long before it is trusted.
pub const DEBOUNCE_MS: u64 = 20;
/// Input task poll interval.
pub const INPUT_POLL_MS: u64 = 5;
/// Depth of the button event queue. Overflow drops the press.
pub const EVENT_QUEUE_DEPTH: usize = 10;

/// Pause after a successful return while the zone overlay shows. The only
/// feedback allowed to hold up the rally; everything else must fit inside it.
pub const HIT_FEEDBACK_MS: u64 = 80;

/// How long each attract animation plays before rotation.
pub const ATTRACT_ROTATE_MS: u64 = 10_000;
/// Hard ceiling on registered attract animations.
pub const MAX_ANIMATIONS: usize = 16;

// ── Palette ─────────────────────────────────────────────────────────────────

pub const COLOR_BACKGROUND: Srgb<u8> = Srgb::new(0, 0, 0);
pub const COLOR_BALL: Srgb<u8> = Srgb::new(255, 255, 255);
pub const COLOR_ZONE_LEFT: Srgb<u8> = Srgb::new(0, 0, 255);
pub const COLOR_ZONE_RIGHT: Srgb<u8> = Srgb::new(0, 255, 0);
pub const COLOR_MISS: Srgb<u8> = Srgb::new(255, 0, 0);
pub const COLOR_WIN_LEFT: Srgb<u8> = COLOR_ZONE_LEFT;
pub const COLOR_WIN_RIGHT: Srgb<u8> = COLOR_ZONE_RIGHT;
pub const COLOR_SCORE_LEFT: Srgb<u8> = Srgb::new(0, 0, 100);
pub const COLOR_SCORE_RIGHT: Srgb<u8> = Srgb::new(0, 100, 0);
pub const COLOR_HIT_FEEDBACK: Srgb<u8> = Srgb::new(255, 80, 0);
pub const COLOR_COUNTDOWN: Srgb<u8> = Srgb::new(255, 255, 0);
