//! Drain pipeline: ring buffer bytes through the decoder into a sink.

use crate::ring::Consumer;
use joystick_proto::{ControllerState, LineDecoder};

/// Destination for decoded controller states.
///
/// This is the seam between the decoder and whoever owns the shared
/// state snapshot. Each `publish` must overwrite the whole snapshot as
/// one logical update, so a concurrent reader never observes a torn
/// mix of old and new fields.
pub trait StateSink {
    /// Replace the current snapshot with a freshly decoded state.
    fn publish(&mut self, state: ControllerState);
}

/// Polled decode pass over the receive ring buffer.
///
/// Owns the consumer half of the ring and the line decoder. One
/// [`drain`](Self::drain) call per scheduler iteration processes every
/// currently buffered byte; multiple complete lines are decoded in
/// arrival order and each one is published, so the last one wins at
/// the sink (overwrite semantics, no queue of pending states).
pub struct SerialPipeline<'a, const N: usize> {
    rx: Consumer<'a, N>,
    decoder: LineDecoder,
}

impl<'a, const N: usize> SerialPipeline<'a, N> {
    /// Create a pipeline reading from the given consumer half.
    #[must_use]
    pub fn new(rx: Consumer<'a, N>) -> Self {
        Self {
            rx,
            decoder: LineDecoder::new(),
        }
    }

    /// Drain all buffered bytes, publishing each completed line.
    ///
    /// Poll-and-return: never suspends, returns once the ring is empty.
    /// Returns the number of states published this pass.
    pub fn drain(&mut self, sink: &mut impl StateSink) -> usize {
        let mut published = 0;
        while let Some(byte) = self.rx.pop() {
            if let Some(state) = self.decoder.feed(byte) {
                sink.publish(state);
                published += 1;
            }
        }
        published
    }
}
