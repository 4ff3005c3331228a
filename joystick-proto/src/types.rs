//! Controller state types: Hat, Buttons, ControllerState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Hat switch position reported as a single byte.
///
/// The eight compass directions plus neutral. Values decoded from the
/// wire are passed through unvalidated, so a `Hat` may carry any byte;
/// the named constants cover the meaningful range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hat(pub u8);

impl Hat {
    pub const UP: Self = Self(0);
    pub const UP_RIGHT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const DOWN_RIGHT: Self = Self(3);
    pub const DOWN: Self = Self(4);
    pub const DOWN_LEFT: Self = Self(5);
    pub const LEFT: Self = Self(6);
    pub const UP_LEFT: Self = Self(7);
    pub const NEUTRAL: Self = Self(8);

    /// Get the raw byte value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check whether the hat is in the neutral (centered) position.
    #[inline]
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.0 == Self::NEUTRAL.0
    }
}

impl Default for Hat {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Button state represented as a bitfield.
///
/// Supports up to 16 buttons; the fourteen buttons of the emulated pad
/// are pre-defined. Implements bitwise operators for ergonomic button
/// manipulation.
///
/// # Example
///
/// ```
/// use joystick_proto::Buttons;
///
/// let buttons = Buttons::A | Buttons::ZR;
/// assert!(buttons.contains(Buttons::A));
/// assert!(!buttons.contains(Buttons::HOME));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const Y: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const A: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const L: Self = Self(1 << 4);
    pub const R: Self = Self(1 << 5);
    pub const ZL: Self = Self(1 << 6);
    pub const ZR: Self = Self(1 << 7);
    pub const MINUS: Self = Self(1 << 8);
    pub const PLUS: Self = Self(1 << 9);
    pub const L_STICK: Self = Self(1 << 10);
    pub const R_STICK: Self = Self(1 << 11);
    pub const HOME: Self = Self(1 << 12);
    pub const CAPTURE: Self = Self(1 << 13);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Analog stick center position (axes run 0-255).
pub const STICK_CENTER: u8 = 0x80;

/// Complete controller state snapshot.
///
/// Written only by the line decoder on a successful full-line decode;
/// read by the report generator on every USB poll. Values are carried
/// verbatim from the wire without clamping or validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub hat: Hat,
    pub buttons: Buttons,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl ControllerState {
    /// Neutral state: hat centered, no buttons, sticks at center.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            hat: Hat::NEUTRAL,
            buttons: Buttons::NONE,
            left_x: STICK_CENTER,
            left_y: STICK_CENTER,
            right_x: STICK_CENTER,
            right_y: STICK_CENTER,
        }
    }

    /// Assemble a state from the 7 decoded line bytes, in wire order:
    /// hat, button-high, button-low, leftX, leftY, rightX, rightY.
    ///
    /// The two button bytes combine into a big-endian 16-bit field.
    #[inline]
    #[must_use]
    pub const fn from_line_bytes(bytes: [u8; 7]) -> Self {
        Self {
            hat: Hat(bytes[0]),
            buttons: Buttons(u16::from_be_bytes([bytes[1], bytes[2]])),
            left_x: bytes[3],
            left_y: bytes[4],
            right_x: bytes[5],
            right_y: bytes[6],
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::ZR;
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::ZR));
        assert!(!buttons.contains(Buttons::HOME));
    }

    #[test]
    fn test_buttons_set_clear() {
        let mut buttons = Buttons::NONE;
        buttons.set(Buttons::CAPTURE, true);
        assert!(buttons.contains(Buttons::CAPTURE));
        buttons.set(Buttons::CAPTURE, false);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_neutral_state() {
        let state = ControllerState::neutral();
        assert!(state.hat.is_neutral());
        assert!(state.buttons.is_empty());
        assert_eq!(state.left_x, STICK_CENTER);
        assert_eq!(state.right_y, STICK_CENTER);
    }

    #[test]
    fn test_from_line_bytes_big_endian_buttons() {
        let state = ControllerState::from_line_bytes([0x04, 0x12, 0x34, 1, 2, 3, 4]);
        assert_eq!(state.hat, Hat::DOWN);
        assert_eq!(state.buttons.raw(), 0x1234);
        assert_eq!(state.left_x, 1);
        assert_eq!(state.right_y, 4);
    }

    #[test]
    fn test_hat_passthrough_out_of_range() {
        // Decoded hat bytes are not validated
        let state = ControllerState::from_line_bytes([0xff, 0, 0, 0, 0, 0, 0]);
        assert_eq!(state.hat.raw(), 0xff);
        assert!(!state.hat.is_neutral());
    }
}
