//! Button input capture.
//!
//! A tight poll loop on its own task: sample both lines every 5 ms, debounce
//! each side independently, and push press events into the bounded queue.
//! The loop never blocks on the queue: if it is full the press is dropped,
//! which is indistinguishable from not pressing in time.

use defmt::{
    info,
    warn,
};
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};
use pong1d_core::{
    ButtonEvent,
    ButtonSender,
    Debouncer,
    Side,
    config::INPUT_POLL_MS,
};

use crate::PlayerButtonResources;

/// The two player buttons, wired active-low with internal pull-ups.
pub struct PlayerButtons {
    pub left: Input<'static>,
    pub right: Input<'static>,
}

impl From<PlayerButtonResources<'static>> for PlayerButtons {
    fn from(res: PlayerButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
        }
    }
}

#[embassy_executor::task]
pub async fn input_task(buttons: &'static mut PlayerButtons, events: ButtonSender) {
    info!("input task started");

    let now = Instant::now().as_millis();
    let mut left = Debouncer::new(buttons.left.is_low(), now);
    let mut right = Debouncer::new(buttons.right.is_low(), now);

    loop {
        let now = Instant::now().as_millis();

        if left.sample(buttons.left.is_low(), now)
            && events
                .try_send(ButtonEvent {
                    side: Side::Left,
                    at_ms: now,
                })
                .is_err()
        {
            warn!("event queue full: left press dropped");
        }

        if right.sample(buttons.right.is_low(), now)
            && events
                .try_send(ButtonEvent {
                    side: Side::Right,
                    at_ms: now,
                })
                .is_err()
        {
            warn!("event queue full: right press dropped");
        }

        Timer::after(Duration::from_millis(INPUT_POLL_MS)).await;
    }
}
