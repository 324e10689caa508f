//! Button events and the one channel shared between the two tasks.
//!
//! The input task is the sole producer and the game task the sole consumer.
//! Both ends are non-blocking: the producer drops on overflow, the consumer
//! drains whatever has accumulated. Nothing except [`ButtonEvent`] values
//! ever crosses this boundary.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{
        Channel,
        Receiver,
        Sender,
    },
};

use crate::config::EVENT_QUEUE_DEPTH;

/// Which end of the strip a player owns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A debounced press, copied by value through the queue.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub side: Side,
    /// Monotonic timestamp of the stable press edge.
    pub at_ms: u64,
}

pub type ButtonChannel = Channel<CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH>;
pub type ButtonSender = Sender<'static, CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH>;
pub type ButtonReceiver =
    Receiver<'static, CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(side: Side, at_ms: u64) -> ButtonEvent {
        ButtonEvent { side, at_ms }
    }

    #[test]
    fn events_drain_in_enqueue_order() {
        let ch = ButtonChannel::new();
        ch.try_send(ev(Side::Left, 10)).unwrap();
        ch.try_send(ev(Side::Right, 11)).unwrap();
        ch.try_send(ev(Side::Left, 12)).unwrap();

        assert_eq!(ch.try_receive().unwrap(), ev(Side::Left, 10));
        assert_eq!(ch.try_receive().unwrap(), ev(Side::Right, 11));
        assert_eq!(ch.try_receive().unwrap(), ev(Side::Left, 12));
        assert!(ch.try_receive().is_err());
    }

    #[test]
    fn overflow_drops_only_the_newest_press() {
        let ch = ButtonChannel::new();
        for i in 0..EVENT_QUEUE_DEPTH as u64 {
            ch.try_send(ev(Side::Left, i)).unwrap();
        }
        // queue full: this press is lost, earlier ones are intact
        assert!(ch.try_send(ev(Side::Right, 99)).is_err());

        for i in 0..EVENT_QUEUE_DEPTH as u64 {
            assert_eq!(ch.try_receive().unwrap().at_ms, i);
        }
        assert!(ch.try_receive().is_err());
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
    }
}
