//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Everything runs on the host with no backend.

mod alert_controller_tests;
mod mock_ports;
mod monitor_service_tests;
