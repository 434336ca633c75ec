//! Integration test utilities for the messaging engine
//!
//! Wires the full stack (store, bus, services, timeline) in process and
//! provides seeded fixtures for the tests under `tests/`.

pub mod fixtures;

pub use fixtures::*;
