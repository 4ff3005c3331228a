//! Receive-side plumbing for the serial joystick.
//!
//! Two pieces sit between the UART receive context and the USB report
//! generator:
//!
//! - [`ring`]: a lock-free single-producer/single-consumer byte ring
//!   buffer ([`RingBuffer`]). The receive context holds the push-only
//!   [`Producer`] half; the main loop holds the pop-only [`Consumer`]
//!   half.
//! - [`pipeline`]: [`SerialPipeline`] drains the consumer half through
//!   the line decoder and publishes completed states into a
//!   [`StateSink`].
//!
//! Both are `no_std` with no heap allocation and are exercised by host
//! tests.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod pipeline;
pub mod ring;

pub use pipeline::{SerialPipeline, StateSink};
pub use ring::{Consumer, Overrun, Producer, RingBuffer};

/// Receive ring size used by the firmware. Must be a power of two.
pub const RX_RING_SIZE: usize = 256;
