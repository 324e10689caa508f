//! Game task: the single consumer of button events and the only thing
//! that ever touches the strip, the lamps, the match state, or the attract
//! registry.
//!
//! The loop body mirrors the engine's phases. All pacing happens here:
//! the rally tick sleeps for the current ball delay, feedback animations
//! run inline, and idle frames are delegated to the registry.

use defmt::{
    debug,
    info,
};
use embassy_futures::join::join;
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use pong1d_core::{
    AttractRegistry,
    ButtonReceiver,
    Engine,
    Phase,
    Rng,
    Side,
    Strip,
    Tick,
    config::{
        COLOR_HIT_FEEDBACK,
        HIT_FEEDBACK_MS,
        COLOR_MISS,
        COLOR_WIN_LEFT,
        COLOR_WIN_RIGHT,
    },
    render,
};

use crate::{
    indicators::Indicators,
    strip::StripLeds,
};

/// Idle loop period; attract animations rate-limit themselves below this.
const IDLE_FRAME_MS: u64 = 10;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::task]
pub async fn game_task(
    strip: &'static mut StripLeds<'static>,
    lamps: &'static mut Indicators<'static>,
    registry: &'static mut AttractRegistry<'static>,
    events: ButtonReceiver,
) {
    info!("game task started: attract mode running");

    let mut engine = Engine::new();
    let mut rng = Rng::new(0x1DB0_07A5);
    registry.reset_to_first(now_ms());

    loop {
        match engine.phase() {
            Phase::Idle => {
                if let Ok(event) = events.try_receive() {
                    // Any press starts a match; which side pressed is
                    // irrelevant. Discard whatever else queued up.
                    while events.try_receive().is_ok() {}
                    registry.interrupt();
                    // A human pressed at an unpredictable instant: as good
                    // a seed as this board gets.
                    rng = Rng::new(event.at_ms as u32);
                    engine.start_match();
                    info!("match started");
                    strip.clear();
                    strip.flush().await;
                    lamps.set_off();
                } else {
                    registry.update(strip, now_ms());
                    lamps.breathe(now_ms());
                    strip.flush().await;
                    Timer::after(Duration::from_millis(IDLE_FRAME_MS)).await;
                }
            }

            Phase::Serve => {
                engine.prepare_serve(&mut rng);
                debug!(
                    "serve: dir={} zone={} ({}-{})",
                    engine.ball_dir(),
                    engine.zone_size(),
                    engine.score(Side::Left),
                    engine.score(Side::Right),
                );
                for _beat in 0..3 {
                    render::draw_countdown(strip, engine.zone_size(), true);
                    lamps.pulse_countdown(255);
                    strip.flush().await;
                    Timer::after(Duration::from_millis(200)).await;

                    render::draw_countdown(strip, engine.zone_size(), false);
                    lamps.pulse_countdown(0);
                    strip.flush().await;
                    Timer::after(Duration::from_millis(200)).await;
                }
                engine.begin_rally();
            }

            Phase::Rally => {
                // Collapse everything that queued up since the last tick
                // into one pressed flag per side.
                let mut left_pressed = false;
                let mut right_pressed = false;
                while let Ok(event) = events.try_receive() {
                    match event.side {
                        Side::Left => left_pressed = true,
                        Side::Right => right_pressed = true,
                    }
                }

                match engine.rally_tick(left_pressed, right_pressed) {
                    Tick::Advanced { hit } => {
                        if let Some(side) = hit {
                            show_return(strip, lamps, &engine, side).await;
                        }
                        strip.clear();
                        render::draw_zones(strip, engine.zone_size());
                        render::draw_ball(strip, engine.ball_pos(), engine.ball_dir());
                        render::draw_score(
                            strip,
                            engine.score(Side::Left),
                            engine.score(Side::Right),
                        );
                        lamps.set_zone_active(
                            engine.ball_in_zone(Side::Left),
                            engine.ball_in_zone(Side::Right),
                        );
                        strip.flush().await;
                        Timer::after(Duration::from_millis(u64::from(engine.ball_delay_ms())))
                            .await;
                    }
                    Tick::Scored { loser, kind } => {
                        info!(
                            "point against {} ({}): score {}-{}",
                            loser,
                            kind,
                            engine.score(Side::Left),
                            engine.score(Side::Right),
                        );
                        show_miss(strip, lamps, &engine, loser).await;
                    }
                }
            }

            Phase::CheckOutcome => {
                if let Some(winner) = engine.resolve() {
                    info!("game over: {} wins", winner);
                }
            }

            Phase::GameOver => {
                let winner = engine.winner().unwrap_or(Side::Left);
                celebrate(strip, lamps, winner).await;
                registry.reset_to_first(now_ms());
                registry.clear_interrupt();
                engine.finish_game();
                info!("attract mode resumed");
            }
        }
    }
}

/// Brief orange overlay on the returner's zone, lamp flashing alongside.
/// The next rally frame repaints everything, so nothing is saved/restored.
/// The lamp flash fits inside the overlay pause, so the rally stalls for
/// exactly `HIT_FEEDBACK_MS`.
async fn show_return(
    strip: &mut StripLeds<'static>,
    lamps: &mut Indicators<'static>,
    engine: &Engine,
    side: Side,
) {
    render::draw_zone(strip, side, engine.zone_size(), COLOR_HIT_FEEDBACK);
    strip.flush().await;
    join(
        Timer::after(Duration::from_millis(HIT_FEEDBACK_MS)),
        lamps.flash_hit(side),
    )
    .await;
}

/// Flash the offending zone red three times, lamp blinking in parallel.
async fn show_miss(
    strip: &mut StripLeds<'static>,
    lamps: &mut Indicators<'static>,
    engine: &Engine,
    loser: Side,
) {
    join(
        async {
            for _ in 0..3 {
                strip.clear();
                render::draw_zone(strip, loser, engine.zone_size(), COLOR_MISS);
                strip.flush().await;
                Timer::after(Duration::from_millis(120)).await;
                strip.clear();
                strip.flush().await;
                Timer::after(Duration::from_millis(80)).await;
            }
        },
        lamps.blink_miss(loser),
    )
    .await;
}

/// Winner-colored celebration: ten full-strip flashes.
async fn celebrate(strip: &mut StripLeds<'static>, lamps: &mut Indicators<'static>, winner: Side) {
    let color = match winner {
        Side::Left => COLOR_WIN_LEFT,
        Side::Right => COLOR_WIN_RIGHT,
    };
    for _ in 0..10 {
        strip.fill(color);
        lamps.set_brightness(winner, 255);
        strip.flush().await;
        Timer::after(Duration::from_millis(120)).await;

        strip.clear();
        lamps.set_brightness(winner, 0);
        strip.flush().await;
        Timer::after(Duration::from_millis(80)).await;
    }
}
