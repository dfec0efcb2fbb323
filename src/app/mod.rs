//! Application core — pure domain logic, zero I/O.
//!
//! The alarm lifecycle ([`controller`]) and the orchestration around it
//! ([`service`]) live here.  All interaction with the backend, the clock
//! and the screen happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a network.

pub mod commands;
pub mod controller;
pub mod events;
pub mod ports;
pub mod sequencer;
pub mod service;
