//! # pong1d-core
//!
//! Platform-independent engine for a two-button 1D Pong game on a single
//! strip of addressable RGB pixels.
//!
//! The crate holds everything that is pure logic over a monotonic
//! millisecond clock:
//! - **Debounce**: per-side raw/stable button state with a restartable window
//! - **Events**: the one bounded SPSC channel shared between the two tasks
//! - **Engine**: the serve/rally/score/game-over state machine with ball
//!   physics and the difficulty ramp
//! - **Render**: stateless frame painters over the [`frame::Strip`] capability
//! - **Attract**: the fixed-capacity animation registry and its rotation
//!
//! Hardware (WS2812 transmission, GPIO, PWM lamps, the executor) lives in the
//! firmware crate. Nothing here blocks; time is always passed in as `now_ms`.

#![no_std]

pub mod attract;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod event;
pub mod frame;
pub mod math;
pub mod render;
pub mod rng;

pub use attract::{
    Animation,
    AttractRegistry,
};
pub use debounce::Debouncer;
pub use engine::{
    Engine,
    MissKind,
    Phase,
    Tick,
};
pub use event::{
    ButtonChannel,
    ButtonEvent,
    ButtonReceiver,
    ButtonSender,
    Side,
};
pub use frame::{
    FrameBuffer,
    Strip,
};
pub use rng::Rng;
