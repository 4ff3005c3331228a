//! Serial-driven USB HID joystick firmware for RP2040.
//!
//! The device enumerates as a dual-endpoint HID game controller whose
//! button/stick state is driven externally: a host computer streams
//! 14-hex-digit lines over UART and the firmware mirrors the decoded
//! state in USB HID input reports.
//!
//! # Hardware configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Diagnostic markers back to the host |
//! | UART1 RX | 9    | Controller state input (115200 8N1) |
//!
//! # Architecture
//!
//! Embassy tasks, one per timing domain:
//!
//! - **USB task**: runs the `embassy-usb` device stack (enumeration,
//!   configuration, endpoint housekeeping)
//! - **UART RX task**: the receive context; pushes raw bytes into the
//!   SPSC ring buffer and never decodes
//! - **Decode task**: periodically drains the ring through the line
//!   decoder into the shared snapshot, independent of USB state, so
//!   the ring never backs up while the host is absent or suspended
//! - **HID IN task**: writes a fresh report built from the snapshot to
//!   the IN endpoint each time the host polls
//! - **HID OUT task**: receives and discards host-to-device reports,
//!   and services GetReport/SetReport class requests
//! - **Diagnostic task**: forwards queued marker bytes (`X` on ring
//!   overrun, `U` per sent report) out the UART TX
//!
//! The ring buffer is the only channel between the receive context and
//! the decode/report context, so the shared [`SharedState`] snapshot
//! has a single logical writer and needs no coordination beyond its
//! brief critical section.
//!
//! # Features
//!
//! - **`dev-panic`** (default): `panic-probe` (prints panic info via RTT)
//! - **`prod-panic`**: `panic-reset` for production (silent reset)

#![no_std]

// Ensure exactly one panic strategy is selected
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

pub mod shared;
pub mod usb;

pub use shared::SharedState;
pub use usb::{configure_usb_hid, JoystickRequestHandler, REPORT_DESCRIPTOR};
