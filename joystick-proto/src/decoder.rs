//! Line-oriented hex protocol decoder.
//!
//! Accumulates hex characters into a fixed 7-byte frame and yields a
//! [`ControllerState`] when a line terminator arrives with exactly 14
//! nybbles collected. Everything else on the line is ignored in place:
//! a stray non-hex byte neither aborts the line nor consumes a cursor
//! slot.

use crate::types::ControllerState;

/// Number of raw bytes encoded per line.
pub const LINE_BYTES: usize = 7;

/// Number of hex nybbles per complete line.
pub const LINE_NYBBLES: u8 = 14;

/// Streaming decoder for the 14-nybble line protocol.
///
/// Feed it bytes one at a time as they are drained from the receive
/// buffer; it owns its accumulation state exclusively and is reset by
/// every line terminator, successful or not.
///
/// # Example
///
/// ```
/// use joystick_proto::LineDecoder;
///
/// let mut decoder = LineDecoder::new();
/// let mut published = None;
/// for &b in b"00000808080a0a\r" {
///     if let Some(state) = decoder.feed(b) {
///         published = Some(state);
///     }
/// }
/// assert_eq!(published.unwrap().buttons.raw(), 0x0008);
/// ```
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// In-progress frame, packed two nybbles per byte.
    frame: [u8; LINE_BYTES],
    /// Nybble cursor, 0..=14; saturates beyond a full frame so an
    /// overlong line still reads as "not exactly 14" at the terminator.
    nybbles: u8,
}

impl LineDecoder {
    /// Create a decoder with an empty accumulation buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: [0; LINE_BYTES],
            nybbles: 0,
        }
    }

    /// Consume one byte from the serial stream.
    ///
    /// Returns `Some(state)` when the byte terminates a line that
    /// accumulated exactly [`LINE_NYBBLES`] hex digits. A terminator
    /// after any other count discards the partial line silently; the
    /// caller's previous state stays in effect.
    pub fn feed(&mut self, byte: u8) -> Option<ControllerState> {
        match byte {
            b'\r' | b'\n' => {
                let complete = self.nybbles == LINE_NYBBLES;
                let state = if complete {
                    Some(ControllerState::from_line_bytes(self.frame))
                } else {
                    None
                };
                self.reset();
                state
            }
            _ => {
                if let Some(val) = hex_digit(byte) {
                    self.accumulate(val);
                }
                None
            }
        }
    }

    /// Number of hex nybbles accumulated since the last reset.
    #[inline]
    #[must_use]
    pub fn pending_nybbles(&self) -> u8 {
        self.nybbles
    }

    /// Store one 4-bit value at the cursor: high nybble on even
    /// cursor positions, low nybble on odd (big-endian within a byte).
    fn accumulate(&mut self, val: u8) {
        if self.nybbles < LINE_NYBBLES {
            let index = (self.nybbles / 2) as usize;
            if self.nybbles % 2 == 0 {
                self.frame[index] = val << 4;
            } else {
                self.frame[index] |= val;
            }
        }
        // Count past-capacity digits without storing them, so the
        // terminator check rejects overlong lines.
        self.nybbles = self.nybbles.saturating_add(1);
    }

    fn reset(&mut self) {
        self.frame = [0; LINE_BYTES];
        self.nybbles = 0;
    }
}

/// Convert an ASCII hex character to its value, case-insensitively.
#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;
    use crate::types::{Buttons, Hat};

    /// Run a full byte sequence through a fresh decoder and return the
    /// last published state, if any.
    fn decode(input: &[u8]) -> Option<ControllerState> {
        let mut decoder = LineDecoder::new();
        let mut last = None;
        for &b in input {
            if let Some(state) = decoder.feed(b) {
                last = Some(state);
            }
        }
        last
    }

    #[test]
    fn test_decode_clean_line() {
        let state = decode(b"00000808080a0a\r").unwrap();
        assert_eq!(state.hat, Hat::UP);
        assert_eq!(state.buttons, Buttons(0x0008));
        assert_eq!(state.left_x, 0x08);
        assert_eq!(state.left_y, 0x08);
        assert_eq!(state.right_x, 0x0a);
        assert_eq!(state.right_y, 0x0a);
    }

    #[test]
    fn test_decode_uppercase_and_lf() {
        let state = decode(b"08C0FFAABB0110\n").unwrap();
        assert_eq!(state.hat, Hat::NEUTRAL);
        assert_eq!(state.buttons.raw(), 0xC0FF);
        assert_eq!(state.left_x, 0xAA);
        assert_eq!(state.left_y, 0xBB);
        assert_eq!(state.right_x, 0x01);
        assert_eq!(state.right_y, 0x10);
    }

    #[test]
    fn test_nybble_packing_high_then_low() {
        // Odd/even digit pattern distinguishes nybble order per byte
        let state = decode(b"12345678abcdef\n").unwrap();
        assert_eq!(state.hat.raw(), 0x12);
        assert_eq!(state.buttons.raw(), 0x3456);
        assert_eq!(state.left_x, 0x78);
        assert_eq!(state.left_y, 0xab);
        assert_eq!(state.right_x, 0xcd);
        assert_eq!(state.right_y, 0xef);
    }

    #[test]
    fn test_short_line_discarded() {
        // 13 hex digits before the terminator: dropped wholesale
        assert_eq!(decode(b"0000080080800\n"), None);
    }

    #[test]
    fn test_long_line_discarded() {
        // 16 hex digits before the terminator: also dropped
        assert_eq!(decode(b"0000080080800a0a\r"), None);
    }

    #[test]
    fn test_very_long_line_discarded() {
        let mut input = Vec::new();
        input.extend_from_slice(&[b'5'; 300]);
        input.push(b'\n');
        assert_eq!(decode(&input), None);
    }

    #[test]
    fn test_garbage_interleaved_is_skipped() {
        // 'z' and friends are ignored and do not consume cursor slots
        let clean = decode(b"00000808080a0a\r").unwrap();
        let noisy = decode(b"z00z000808 08-0a!0azz\r").unwrap();
        assert_eq!(noisy, clean);
    }

    #[test]
    fn test_terminator_resets_for_next_line() {
        let mut decoder = LineDecoder::new();
        // Garbage partial line, then a valid one
        for &b in b"123\n" {
            assert_eq!(decoder.feed(b), None);
        }
        assert_eq!(decoder.pending_nybbles(), 0);
        let mut last = None;
        for &b in b"04000000000000\n" {
            if let Some(state) = decoder.feed(b) {
                last = Some(state);
            }
        }
        assert_eq!(last.unwrap().hat, Hat::DOWN);
    }

    #[test]
    fn test_crlf_second_terminator_is_empty_line() {
        let mut decoder = LineDecoder::new();
        let mut published = 0;
        for &b in b"00000808080a0a\r\n" {
            if decoder.feed(b).is_some() {
                published += 1;
            }
        }
        // The \n terminates a zero-nybble line and publishes nothing
        assert_eq!(published, 1);
    }

    #[test]
    fn test_multiple_lines_in_one_pass() {
        let mut decoder = LineDecoder::new();
        let mut states = Vec::new();
        for &b in b"01000000000000\n02000000000000\n" {
            if let Some(state) = decoder.feed(b) {
                states.push(state);
            }
        }
        // Decoded in arrival order; the caller's overwrite makes the last win
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].hat, Hat::UP_RIGHT);
        assert_eq!(states[1].hat, Hat::RIGHT);
    }
}
