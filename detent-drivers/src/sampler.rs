//! Interrupt-side pin sampler
//!
//! The entire ISR body is two pin reads and one try-push: O(1), no
//! blocking, no allocation, reentrant against the task side by the ring's
//! single-writer discipline. A full ring drops the sample.

use detent_core::decode::PinCode;
use detent_core::ring::{Producer, SampleRing};
use detent_core::traits::{EdgeInterrupt, InputPin};

/// Interrupt-side half of the input engine
///
/// Owns the two quadrature pins and the producer end of the sample ring.
pub struct Sampler<'r, A, B, const N: usize> {
    a: A,
    b: B,
    samples: Producer<'r, N>,
}

impl<'r, A: InputPin, B: InputPin, const N: usize> Sampler<'r, A, B, N> {
    pub fn new(ring: &'r SampleRing<N>, a: A, b: B) -> Self {
        Self {
            a,
            b,
            samples: ring.producer(),
        }
    }

    /// Read both lines and queue the packed code
    ///
    /// Call from the pin-change interrupt, or directly on platforms with a
    /// raw ISR model (and in host tests).
    pub fn sample(&mut self) {
        let code = PinCode::from_levels(self.a.is_high(), self.b.is_high());
        let _ = self.samples.push(code);
    }

    /// Current packed level of both lines, without queueing anything
    pub fn current_code(&mut self) -> PinCode {
        PinCode::from_levels(self.a.is_high(), self.b.is_high())
    }
}

impl<A, B, const N: usize> Sampler<'static, A, B, N>
where
    A: InputPin + Send + 'static,
    B: InputPin + Send + 'static,
{
    /// Install the sampler as the platform's pin-change callback
    ///
    /// The sampler moves into the closure, so every engine instance
    /// carries its own context and no global instance registry is needed.
    /// Requires the ring to live in a `static`.
    pub fn attach<E: EdgeInterrupt>(mut self, irq: E) {
        irq.on_any_edge(move || self.sample());
    }
}
