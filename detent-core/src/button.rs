//! Push-button debouncing
//!
//! Time-based debounce of a single logical line: the raw level must hold
//! for the configured window before it is trusted. A click is reported
//! only on the debounced release-to-press transition; releasing produces
//! no event.

use crate::config::EncoderConfig;

/// Debouncer for the encoder push button
///
/// Works on logical state (true = pressed); the caller maps the active-low
/// line to logic before feeding samples.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    last_raw: bool,
    stable: bool,
    last_change_ms: u32,
}

impl ButtonDebouncer {
    pub const fn new() -> Self {
        Self {
            last_raw: false,
            stable: false,
            last_change_ms: 0,
        }
    }

    /// Feed one raw sample at wrapping millisecond time `now_ms`
    ///
    /// Returns true exactly when a debounced press is detected.
    pub fn update(&mut self, pressed: bool, now_ms: u32, config: &EncoderConfig) -> bool {
        if pressed != self.last_raw {
            self.last_raw = pressed;
            self.last_change_ms = now_ms;
        }

        if now_ms.wrapping_sub(self.last_change_ms) >= u32::from(config.button_debounce_ms())
            && pressed != self.stable
        {
            self.stable = pressed;
            return self.stable;
        }
        false
    }

    /// Current debounced state
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
