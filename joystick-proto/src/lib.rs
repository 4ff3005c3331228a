//! Wire formats for the serial-driven USB joystick.
//!
//! This crate holds everything that touches bytes on a wire, with no
//! platform dependencies so it can be tested on the host:
//!
//! - [`types`]: controller state snapshot ([`ControllerState`], [`Buttons`], [`Hat`])
//! - [`decoder`]: the hex line protocol decoder ([`LineDecoder`])
//! - [`report`]: the USB HID input report layout ([`JoystickReport`])
//!
//! # Serial protocol
//!
//! Each state update is one line of exactly 14 hexadecimal characters
//! (case-insensitive) terminated by `\r` or `\n`, encoding 7 bytes:
//!
//! ```text
//! <hat><buttonHigh><buttonLow><leftX><leftY><rightX><rightY>\n
//! ```
//!
//! Non-hex, non-terminator characters are tolerated and skipped inline.
//! There is no checksum and no acknowledgement; the stream is lossy
//! fire-and-forget. Lines with any other number of hex digits are
//! dropped wholesale and the previous state is retained.
//!
//! # Diagnostics
//!
//! The device answers on the same serial link with single marker bytes:
//! [`DIAG_OVERRUN`] when the receive buffer overruns and
//! [`DIAG_REPORT_SENT`] after every HID IN report, as a liveness
//! heartbeat for the host.
//!
//! # Features
//!
//! - **`std`**: standard library support (host testing)
//! - **`defmt`**: `defmt::Format` derives for embedded logging

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod decoder;
pub mod report;
pub mod types;

pub use decoder::{LineDecoder, LINE_BYTES, LINE_NYBBLES};
pub use report::JoystickReport;
pub use types::{Buttons, ControllerState, Hat};

/// Marker byte sent to the host when the receive ring buffer overruns.
pub const DIAG_OVERRUN: u8 = b'X';

/// Marker byte sent to the host after each successful HID IN report.
pub const DIAG_REPORT_SENT: u8 = b'U';
