//! Hazardwatch monitoring client library.
//!
//! Exposes the alarm lifecycle core, its ports and adapters, and the
//! runtime for integration testing and for the `hazardwatch` binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod hazard;
pub mod model;
pub mod runtime;
