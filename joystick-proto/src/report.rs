//! USB HID input report layout.

use crate::types::ControllerState;

/// USB HID joystick input report.
///
/// Matches the HID report descriptor advertised by the firmware:
/// one hat byte (4-bit hat switch plus padding), 16 button bits, and
/// four 0-255 axis bytes. Total size: 7 bytes.
///
/// Fields are copied verbatim from [`ControllerState`]; no clamping or
/// validation is applied, so any decoded byte value reaches the host
/// unchanged.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct JoystickReport {
    /// Hat switch position (0-7 directions, 8 = neutral).
    pub hat: u8,
    /// Button bitfield (16 buttons).
    pub buttons: u16,
    /// Left stick X (0-255, 128 center).
    pub left_x: u8,
    /// Left stick Y (0-255, 128 center).
    pub left_y: u8,
    /// Right stick X (0-255, 128 center).
    pub right_x: u8,
    /// Right stick Y (0-255, 128 center).
    pub right_y: u8,
}

impl JoystickReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 7;

    /// Serialize the report to its wire layout.
    ///
    /// The button bitfield goes out little-endian, as HID serializes
    /// bit arrays starting from the least significant bit.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        [
            self.hat,
            buttons[0],
            buttons[1],
            self.left_x,
            self.left_y,
            self.right_x,
            self.right_y,
        ]
    }

    /// Neutral report (hat centered, no buttons, sticks at center).
    #[must_use]
    pub const fn neutral() -> Self {
        Self::from_state(&ControllerState::neutral())
    }

    /// Build a report from a state snapshot.
    #[must_use]
    pub const fn from_state(state: &ControllerState) -> Self {
        Self {
            hat: state.hat.raw(),
            buttons: state.buttons.raw(),
            left_x: state.left_x,
            left_y: state.left_y,
            right_x: state.right_x,
            right_y: state.right_y,
        }
    }
}

impl From<&ControllerState> for JoystickReport {
    fn from(state: &ControllerState) -> Self {
        Self::from_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Buttons, ControllerState, Hat};

    #[test]
    fn test_report_copies_state_verbatim() {
        let state = ControllerState {
            hat: Hat::UP,
            buttons: Buttons(0x0008),
            left_x: 0x08,
            left_y: 0x08,
            right_x: 0x0a,
            right_y: 0x0a,
        };
        let report = JoystickReport::from(&state);
        assert_eq!(report.hat, 0x00);
        assert_eq!(report.buttons, 0x0008);
        assert_eq!(report.to_bytes(), [0x00, 0x08, 0x00, 0x08, 0x08, 0x0a, 0x0a]);
    }

    #[test]
    fn test_report_build_is_idempotent() {
        let state = ControllerState {
            hat: Hat::DOWN_LEFT,
            buttons: Buttons::A | Buttons::PLUS,
            left_x: 0,
            left_y: 255,
            right_x: 128,
            right_y: 1,
        };
        let first = JoystickReport::from(&state);
        let second = JoystickReport::from(&state);
        assert_eq!(first, second);
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_nonsensical_values_pass_through() {
        // Hat 0xff is physically meaningless but must not be clamped
        let state = ControllerState {
            hat: Hat(0xff),
            buttons: Buttons(0xffff),
            left_x: 0,
            left_y: 0,
            right_x: 0,
            right_y: 0,
        };
        let report = JoystickReport::from(&state);
        assert_eq!(report.to_bytes()[0], 0xff);
        assert_eq!(report.buttons, 0xffff);
    }

    #[test]
    fn test_neutral_report() {
        let bytes = JoystickReport::neutral().to_bytes();
        assert_eq!(bytes, [0x08, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80]);
    }
}
