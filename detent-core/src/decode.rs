//! Quadrature transition decoding
//!
//! Converts a stream of 2-bit pin codes into detent steps. Each dequeued
//! sample forms a 4-bit transition code `(previous << 2) | current` that
//! classifies it as a forward edge, a backward edge, or noise. Edges
//! accumulate until a full detent's worth agree on one direction; a small
//! counter-swing inside the slop window restarts the count in the new
//! direction instead of cancelling real progress.
//!
//! Quadrature lines bounce mechanically: the edge debounce suppresses
//! electrical chatter at the timing level, the slop tolerance absorbs
//! shaft jitter that produces a spurious reverse edge.

use crate::config::EncoderConfig;
use crate::events::Direction;

/// Instantaneous level of the two quadrature lines, packed as `(A << 1) | B`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinCode(u8);

impl PinCode {
    /// Pack the raw levels of line A and line B
    pub fn from_levels(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | (b as u8))
    }

    /// Reconstruct a code from its low two bits; higher bits are masked off
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// The packed 2-bit value
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Directional weight of a 4-bit transition code
///
/// Half of the 16 possible codes carry direction; the rest are either
/// no-movement or illegal double-line jumps and decode to 0.
fn edge_of(transition: u8) -> i8 {
    match transition {
        0x1 | 0x7 | 0xE | 0x8 => 1,
        0x2 | 0xB | 0xD | 0x4 => -1,
        _ => 0,
    }
}

/// Quadrature decoder state machine
///
/// State is the last accepted pin code plus a signed edge accumulator
/// bounded by the detent threshold. The machine runs for the life of the
/// process; there is no terminal state.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    previous: PinCode,
    accumulator: i8,
    last_edge_us: u32,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current pin levels, so the first
    /// real transition decodes against true hardware state
    pub fn new(initial: PinCode) -> Self {
        Self {
            previous: initial,
            accumulator: 0,
            last_edge_us: 0,
        }
    }

    /// Feed one dequeued sample
    ///
    /// `now_us` is the wrapping microsecond clock at drain time. Returns
    /// the direction of a completed detent, if this sample finished one.
    pub fn feed(
        &mut self,
        code: PinCode,
        now_us: u32,
        config: &EncoderConfig,
    ) -> Option<Direction> {
        let debounce_us = u32::from(config.edge_debounce_ms()) * 1000;
        if debounce_us != 0 && now_us.wrapping_sub(self.last_edge_us) < debounce_us {
            // Too soon after the last accepted sample: electrical chatter.
            // The sample stays consumed but does not advance the state.
            return None;
        }
        self.last_edge_us = now_us;

        let transition = (self.previous.bits() << 2) | code.bits();
        let edge = edge_of(transition);
        self.previous = code;
        if edge == 0 {
            return None;
        }

        let before = self.accumulator;
        let mut next = before + edge;
        if (next > 0 && before < 0) || (next < 0 && before > 0) {
            // Direction flipped. If the discarded progress was within the
            // slop window it was shaft jitter, not intent: restart the
            // count at the new edge rather than cancelling toward zero.
            if before.unsigned_abs() <= config.reversal_slop_edges() {
                next = edge;
            }
        }

        let threshold = config.edges_per_detent() as i8;
        if next >= threshold {
            self.accumulator = 0;
            Some(Direction::Cw)
        } else if next <= -threshold {
            self.accumulator = 0;
            Some(Direction::Ccw)
        } else {
            self.accumulator = next;
            None
        }
    }
}
