//! Lock-free single-producer/single-consumer byte ring buffer.
//!
//! The producer half lives in the UART receive context and the
//! consumer half in the main loop, so the two sides never share a
//! critical section. Correctness relies on the SPSC discipline and on
//! `head`/`tail` being plain atomic loads and stores; there is no CAS
//! and nothing ever spins or blocks.
//!
//! The buffer is deliberately lossy: a push into a full buffer still
//! completes (the producer's forward progress is never sacrificed to
//! the consumer's backlog) and the overflow is reported as an
//! [`Overrun`] for the caller to surface as a diagnostic. One slot is
//! kept as the full/empty sentinel, so the usable capacity is the
//! buffer size minus one; a push into that last slot makes `head`
//! catch up with `tail` and the unread backlog is discarded wholesale.

use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

/// The producer detected no free slot; the write completed anyway and
/// the unread backlog was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overrun;

/// Fixed-capacity SPSC byte queue.
///
/// `N` must be a power of two so index arithmetic wraps via masking.
/// Intended use is a single static instance split once at startup:
///
/// ```
/// use joystick_core::RingBuffer;
///
/// let mut ring: RingBuffer<256> = RingBuffer::new();
/// let (mut producer, mut consumer) = ring.split();
/// producer.push(0x42).unwrap();
/// assert_eq!(consumer.pop(), Some(0x42));
/// ```
pub struct RingBuffer<const N: usize> {
    buf: [AtomicU8; N],
    /// Next write slot, producer-owned.
    head: AtomicUsize,
    /// Next read slot, consumer-owned.
    tail: AtomicUsize,
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = N - 1;

    /// Create an empty ring buffer.
    #[must_use]
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "ring size must be a power of two");
        Self {
            buf: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Split the buffer into its producer and consumer halves.
    ///
    /// The exclusive borrow guarantees at most one of each half exists,
    /// which is what makes the lock-free accesses sound.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let ring = &*self;
        (Producer { ring }, Consumer { ring })
    }

    #[inline]
    fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail) & Self::MASK
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Push-only handle, held by the receive context.
pub struct Producer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<'a, const N: usize> Producer<'a, N> {
    /// Append one byte at `head`.
    ///
    /// Never blocks. Returns `Err(Overrun)` when the buffer had no free
    /// slot; the byte is stored regardless, and the caller decides how
    /// to signal the loss.
    pub fn push(&mut self, byte: u8) -> Result<(), Overrun> {
        let head = self.ring.head.load(Ordering::Relaxed);
        let tail = self.ring.tail.load(Ordering::Acquire);
        let next = head.wrapping_add(1) & RingBuffer::<N>::MASK;

        self.ring.buf[head].store(byte, Ordering::Relaxed);
        self.ring.head.store(next, Ordering::Release);

        if next == tail {
            Err(Overrun)
        } else {
            Ok(())
        }
    }

    /// Number of buffered, unread bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check whether the buffer holds no unread bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pop-only handle, held by the main-loop context.
pub struct Consumer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<'a, const N: usize> Consumer<'a, N> {
    /// Read and remove the oldest byte, or `None` when empty.
    pub fn pop(&mut self) -> Option<u8> {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        let head = self.ring.head.load(Ordering::Acquire);
        if head == tail {
            return None;
        }

        let byte = self.ring.buf[tail].load(Ordering::Relaxed);
        let next = tail.wrapping_add(1) & RingBuffer::<N>::MASK;
        self.ring.tail.store(next, Ordering::Release);
        Some(byte)
    }

    /// Number of buffered, unread bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check whether the buffer holds no unread bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut ring: RingBuffer<256> = RingBuffer::new();
        let (mut producer, mut consumer) = ring.split();

        for i in 0..200u8 {
            producer.push(i).unwrap();
        }
        assert_eq!(consumer.len(), 200);

        let drained: Vec<u8> = core::iter::from_fn(|| consumer.pop()).collect();
        let expected: Vec<u8> = (0..200).collect();
        assert_eq!(drained, expected);
        assert!(consumer.is_empty());
    }

    #[test]
    fn test_wraparound() {
        let mut ring: RingBuffer<8> = RingBuffer::new();
        let (mut producer, mut consumer) = ring.split();

        // Cycle well past the capacity in small batches
        for round in 0..50u8 {
            for i in 0..5 {
                producer.push(round.wrapping_mul(5).wrapping_add(i)).unwrap();
            }
            for i in 0..5 {
                assert_eq!(consumer.pop(), Some(round.wrapping_mul(5).wrapping_add(i)));
            }
        }
        assert_eq!(consumer.pop(), None);
    }

    #[test]
    fn test_usable_capacity_is_size_minus_one() {
        let mut ring: RingBuffer<8> = RingBuffer::new();
        let (mut producer, _consumer) = ring.split();

        for i in 0..7 {
            assert_eq!(producer.push(i), Ok(()));
        }
        assert_eq!(producer.len(), 7);
    }

    #[test]
    fn test_overrun_signals_and_head_advances() {
        let mut ring: RingBuffer<8> = RingBuffer::new();
        let (mut producer, mut consumer) = ring.split();

        for i in 0..7 {
            producer.push(i).unwrap();
        }
        // The eighth write lands in the sentinel slot: overrun, and the
        // queue collapses to empty (head caught up with tail).
        assert_eq!(producer.push(7), Err(Overrun));
        assert_eq!(consumer.pop(), None);

        // Forward progress is preserved: pushes keep working afterwards
        producer.push(42).unwrap();
        assert_eq!(consumer.pop(), Some(42));
    }

    #[test]
    fn test_full_sized_ring_round_trip() {
        let mut ring: RingBuffer<256> = RingBuffer::new();
        let (mut producer, mut consumer) = ring.split();

        for i in 0..255u8 {
            assert_eq!(producer.push(i), Ok(()));
        }
        for i in 0..255u8 {
            assert_eq!(consumer.pop(), Some(i));
        }
        assert_eq!(consumer.pop(), None);
    }
}
