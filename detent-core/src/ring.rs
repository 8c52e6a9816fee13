//! SPSC sample ring for the interrupt-to-task handoff
//!
//! Single producer (the pin-change ISR), single consumer (the polling
//! task). The producer never blocks and never overwrites: when the ring is
//! full a new sample is dropped and counted. One slot is always kept free
//! to distinguish full from empty, so a ring of size `N` holds at most
//! `N - 1` samples. `N` must be a power of two (checked at compile time)
//! so the index wrap is a single mask.
//!
//! # Memory ordering
//! Each index is written by exactly one side. The producer stores the slot
//! value, then publishes the write index with `Release`; the consumer loads
//! the write index with `Acquire` before reading the slot. The read index
//! is published the same way in the other direction, so a slot is never
//! reused before the consumer is done with it. All traffic is load/store
//! (no read-modify-write), which ARMv6-M targets support natively.

use core::sync::atomic::{AtomicU32, AtomicU8, AtomicUsize, Ordering};

use crate::decode::PinCode;

/// Default ring size; 31 usable samples between `update()` calls
pub const DEFAULT_CAPACITY: usize = 32;

/// Fixed-capacity SPSC queue of 2-bit pin codes
///
/// `new()` is const so the ring can live in a `static` shared between the
/// interrupt and the task. Exactly one [`Producer`] and one [`Consumer`]
/// may be active; creating a second handle of either kind breaks the
/// single-writer/single-reader discipline the ring depends on.
pub struct SampleRing<const N: usize = DEFAULT_CAPACITY> {
    slots: [AtomicU8; N],
    write: AtomicUsize,
    read: AtomicUsize,
    dropped: AtomicU32,
}

impl<const N: usize> SampleRing<N> {
    const MASK: usize = N - 1;
    const CAPACITY_IS_POWER_OF_TWO: () = assert!(N.is_power_of_two() && N >= 2);

    pub const fn new() -> Self {
        let () = Self::CAPACITY_IS_POWER_OF_TWO;
        Self {
            slots: [const { AtomicU8::new(0) }; N],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Create the producer handle (interrupt side)
    pub fn producer(&self) -> Producer<'_, N> {
        Producer { ring: self }
    }

    /// Create the consumer handle (task side)
    pub fn consumer(&self) -> Consumer<'_, N> {
        Consumer { ring: self }
    }

    /// Samples dropped because the ring was full, since construction
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer end: owned by the interrupt context
pub struct Producer<'a, const N: usize> {
    ring: &'a SampleRing<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Try to queue one sample
    ///
    /// O(1), never blocks, never overwrites unread data. Returns false
    /// (and counts the drop) if the ring is full.
    pub fn push(&mut self, code: PinCode) -> bool {
        let write = self.ring.write.load(Ordering::Relaxed);
        let next = (write + 1) & SampleRing::<N>::MASK;
        if next == self.ring.read.load(Ordering::Acquire) {
            // Only the producer writes the drop counter, so a plain
            // load/store pair is enough (and ARMv6-M has no atomic add).
            let dropped = self.ring.dropped.load(Ordering::Relaxed);
            self.ring.dropped.store(dropped.wrapping_add(1), Ordering::Relaxed);
            return false;
        }
        self.ring.slots[write].store(code.bits(), Ordering::Relaxed);
        self.ring.write.store(next, Ordering::Release);
        true
    }
}

/// Consumer end: owned by the task context
pub struct Consumer<'a, const N: usize> {
    ring: &'a SampleRing<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Dequeue the oldest sample, if any
    pub fn pop(&mut self) -> Option<PinCode> {
        let read = self.ring.read.load(Ordering::Relaxed);
        if read == self.ring.write.load(Ordering::Acquire) {
            return None;
        }
        let bits = self.ring.slots[read].load(Ordering::Relaxed);
        self.ring.read.store((read + 1) & SampleRing::<N>::MASK, Ordering::Release);
        Some(PinCode::from_bits(bits))
    }

    /// Samples currently queued
    ///
    /// Exact from the consumer's side; the producer may add more at any
    /// instruction boundary. Useful as a drain bound.
    pub fn len(&self) -> usize {
        let write = self.ring.write.load(Ordering::Acquire);
        let read = self.ring.read.load(Ordering::Relaxed);
        write.wrapping_sub(read) & SampleRing::<N>::MASK
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples dropped because the ring was full, since construction
    pub fn dropped(&self) -> u32 {
        self.ring.dropped()
    }
}
