//! Board-agnostic logic for the Detent rotary-encoder input engine
//!
//! This crate contains everything that does not depend on specific
//! hardware implementations:
//!
//! - Hardware abstraction traits (input pin, monotonic clock, edge interrupt)
//! - SPSC sample ring for the interrupt-to-task handoff
//! - Quadrature decoder state machine with reversal tolerance
//! - Button debouncer
//! - Configuration and event type definitions
//!
//! The decode path is pure: tests feed synthetic pin codes and timestamps,
//! no hardware required. Tests require `std`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod decode;
pub mod events;
pub mod ring;
pub mod traits;
