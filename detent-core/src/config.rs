//! Tuning configuration for the input engine
//!
//! Invalid values are coerced to known-good defaults rather than rejected:
//! a misconfigured knob should degrade to the stock feel, not brick the UI.

/// Default edges per detent (full-cycle encoders emit 4 edges per click)
pub const DEFAULT_EDGES_PER_DETENT: u8 = 4;

/// Default minimum spacing between accepted edges (ms)
pub const DEFAULT_EDGE_DEBOUNCE_MS: u8 = 1;

/// Default button stability window (ms)
pub const DEFAULT_BUTTON_DEBOUNCE_MS: u8 = 20;

/// Default reversal tolerance (edges)
pub const DEFAULT_REVERSAL_SLOP_EDGES: u8 = 1;

/// Maximum accepted reversal tolerance
pub const MAX_REVERSAL_SLOP_EDGES: u8 = 3;

/// Engine tuning parameters
///
/// Fields are private so every write path goes through the clamping
/// setters. Construct with [`Default`] and adjust from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    edges_per_detent: u8,
    edge_debounce_ms: u8,
    button_debounce_ms: u8,
    reversal_slop_edges: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            edges_per_detent: DEFAULT_EDGES_PER_DETENT,
            edge_debounce_ms: DEFAULT_EDGE_DEBOUNCE_MS,
            button_debounce_ms: DEFAULT_BUTTON_DEBOUNCE_MS,
            reversal_slop_edges: DEFAULT_REVERSAL_SLOP_EDGES,
        }
    }
}

impl EncoderConfig {
    /// Edges required to emit one step
    pub fn edges_per_detent(&self) -> u8 {
        self.edges_per_detent
    }

    /// Set the detent threshold. Only 1, 2 and 4 are meaningful for
    /// quadrature hardware; anything else coerces to 4.
    pub fn set_edges_per_detent(&mut self, edges: u8) {
        self.edges_per_detent = match edges {
            1 | 2 | 4 => edges,
            _ => DEFAULT_EDGES_PER_DETENT,
        };
    }

    /// Minimum spacing between accepted edges in ms (0 = disabled)
    pub fn edge_debounce_ms(&self) -> u8 {
        self.edge_debounce_ms
    }

    /// Set the edge debounce window. 0 disables edge debounce; 0-3 ms is
    /// typical for mechanical encoders.
    pub fn set_edge_debounce_ms(&mut self, ms: u8) {
        self.edge_debounce_ms = ms;
    }

    /// Minimum stable duration before a button state change is trusted (ms)
    pub fn button_debounce_ms(&self) -> u8 {
        self.button_debounce_ms
    }

    /// Set the button debounce window. 10-30 ms is typical.
    pub fn set_button_debounce_ms(&mut self, ms: u8) {
        self.button_debounce_ms = ms;
    }

    /// Tolerance for spurious reversal edges before the accumulator treats
    /// a direction change as genuine
    pub fn reversal_slop_edges(&self) -> u8 {
        self.reversal_slop_edges
    }

    /// Set the reversal tolerance. Values above 3 coerce to the default
    /// of 1 edge.
    pub fn set_reversal_slop_edges(&mut self, edges: u8) {
        self.reversal_slop_edges = if edges <= MAX_REVERSAL_SLOP_EDGES {
            edges
        } else {
            DEFAULT_REVERSAL_SLOP_EDGES
        };
    }
}
