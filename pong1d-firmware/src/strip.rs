//! WS2812 strip driver using the RMT peripheral.
//!
//! Wraps a [`FrameBuffer`] so everything above it draws through the
//! [`Strip`] capability; [`flush`](StripLeds::flush) transmits the buffer
//! and waits out the WS2812 reset time. Transmit failures are logged and
//! absorbed: a dropped frame is invisible at game speed.

extern crate alloc;

use defmt::error;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        PulseCode,
        Rmt,
        Tx,
        TxChannelConfig,
        TxChannelCreator as _,
    },
    time::Rate,
};
use palette::Srgb;
use pong1d_core::{
    FrameBuffer,
    Strip,
    config::STRIP_LEN,
};

use crate::StripResources;

pub struct StripLeds<'a> {
    channel: Option<esp_hal::rmt::Channel<'a, Blocking, Tx>>,
    frame: FrameBuffer<STRIP_LEN>,
}

impl<'a> From<StripResources<'a>> for esp_hal::rmt::Channel<'a, Blocking, Tx> {
    fn from(res: StripResources<'a>) -> Self {
        let rmt = Rmt::new(res.rmt, Rate::from_mhz(40)).unwrap();
        let tx_config = TxChannelConfig::default().with_clk_divider(1);
        rmt.channel0.configure_tx(res.io, tx_config).unwrap()
    }
}

impl<'a> From<StripResources<'a>> for StripLeds<'a> {
    fn from(res: StripResources<'a>) -> Self {
        Self::new(res.into())
    }
}

impl<'a> StripLeds<'a> {
    pub const fn new(channel: esp_hal::rmt::Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
            frame: FrameBuffer::new(),
        }
    }

    /// Flush the framebuffer to the physical strip.
    pub async fn flush(&mut self) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        let pulses = self
            .frame
            .pixels()
            .iter()
            .flat_map(|color| {
                // WS2812 expects GRB byte order
                [
                    Self::byte_to_pulses(color.green),
                    Self::byte_to_pulses(color.red),
                    Self::byte_to_pulses(color.blue),
                ]
                .into_iter()
                .flatten()
            })
            .chain(core::iter::once(PulseCode::end_marker()))
            .collect::<alloc::vec::Vec<_>>();

        let transaction = match channel.transmit(&pulses) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {}", err);
                ch
            }
        });

        // WS2812 reset time
        Timer::after(Duration::from_micros(50)).await;
    }

    // ── Internal helpers ────────────────────────────────────────────────

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high (32 ticks), 0.45 µs low (18 ticks)
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high (16 ticks), 0.85 µs low (34 ticks)
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }

    fn byte_to_pulses(byte: u8) -> [PulseCode; 8] {
        let mut pulses = [PulseCode::default(); 8];
        for (i, pulse) in pulses.iter_mut().enumerate() {
            *pulse = Self::bit_to_pulse((byte >> (7 - i)) & 1 != 0);
        }
        pulses
    }
}

impl Strip for StripLeds<'_> {
    fn len(&self) -> usize {
        self.frame.len()
    }

    fn set(&mut self, index: usize, color: Srgb<u8>) {
        self.frame.set(index, color);
    }

    fn blend(&mut self, index: usize, color: Srgb<u8>) {
        self.frame.blend(index, color);
    }

    fn fade_to_black(&mut self, index: usize, amount: u8) {
        self.frame.fade_to_black(index, amount);
    }

    fn fill(&mut self, color: Srgb<u8>) {
        self.frame.fill(color);
    }
}
