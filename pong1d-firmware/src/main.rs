//! # 1D Pong
//!
//! Two-player reaction game on a single WS2812 strip (ESP32-S3).
//!
//! A bright pixel travels back and forth; each player must press their
//! button while the ball is inside their end zone. Misses score for the
//! opponent, returns speed the ball up, and the zones shrink every serve.
//! First to five wins. While nobody is playing the strip cycles through
//! attract animations until a button press starts the next match.
//!
//! Two tasks, one queue:
//! - `input_task` polls and debounces both buttons, producing press events
//! - `game_task` consumes them and runs the whole match state machine plus
//!   all rendering
//!
//! Nothing else is shared between the tasks.

#![no_std]
#![no_main]

mod animations;
mod game;
mod indicators;
mod input;
mod strip;

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::{
    assign_resources,
    clock::CpuClock,
    timer::timg::TimerGroup,
};
use esp_println as _;
use pong1d_core::{
    AttractRegistry,
    ButtonChannel,
};

use crate::{
    game::game_task,
    indicators::Indicators,
    input::{
        PlayerButtons,
        input_task,
    },
    strip::StripLeds,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        strip: StripResources<'d> {
            io: GPIO5,
            rmt: RMT,
        },
        buttons: PlayerButtonResources<'d> {
            left: GPIO17,
            right: GPIO18,
        },
        lamps: LampResources<'d> {
            left: GPIO9,
            right: GPIO10,
            ledc: LEDC,
        },
    }
}

// ── Bootstrap ───────────────────────────────────────────────────────────────

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // The only state shared between the two tasks.
    static EVENTS: ButtonChannel = ButtonChannel::new();

    let buttons = mk_static!(PlayerButtons, resources.buttons.into());
    let strip = mk_static!(StripLeds<'static>, resources.strip.into());
    let lamps = mk_static!(Indicators<'static>, resources.lamps.into());
    let registry = mk_static!(AttractRegistry<'static>, animations::build_registry());

    info!("1D Pong up: {} attract animations registered", registry.len());

    spawner.must_spawn(input_task(buttons, EVENTS.sender()));
    spawner.must_spawn(game_task(strip, lamps, registry, EVENTS.receiver()));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
