//! Nullable infrastructure for deterministic testing.
//!
//! The ledger core never reads a clock or delivers notifications on its own:
//! time arrives with each operation and events go to whatever listeners are
//! registered. This crate provides the test-side halves of both:
//! - [`NullClock`] hands out timestamps that only move when told to
//! - [`EventRecorder`] captures every emitted event in order

pub mod clock;
pub mod events;

pub use clock::NullClock;
pub use events::EventRecorder;
