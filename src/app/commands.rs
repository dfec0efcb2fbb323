//! Inbound commands and backend request/response envelopes.
//!
//! [`OperatorCommand`]s come from the operator surface.  The
//! [`MonitorService`](super::service::MonitorService) turns them, and its
//! own timers, into [`BackendRequest`]s; I/O workers answer each one with
//! exactly one [`BackendResponse`].

use crate::error::{ActuatorError, RegistrationError, TransportError};
use crate::model::{
    ActuatorCommand, AlertLogEntry, AlertRegistration, ClassifiedReading, History,
    ManualEmergencyAck, RegistrationOrigin,
};

/// Actions the operator can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Close the emergency modal and start the cooldown.
    Dismiss,

    /// Fan on, doors open, logged as a manual emergency.
    ManualEmergency,

    /// Drive one actuator directly.
    Actuator(ActuatorCommand),

    /// Refresh the charts now instead of waiting for the next period.
    RefreshHistory,

    /// Refresh the alert log now.
    RefreshAlertLog,

    /// Stop the monitor.
    Quit,
}

/// Work for an I/O worker.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    /// `seq` orders reading results; see [`TickSequencer`](super::sequencer::TickSequencer).
    FetchReading { seq: u64 },
    FetchHistory,
    FetchAlertLog,
    RegisterAlert(AlertRegistration),
    ManualEmergency,
    Actuator(ActuatorCommand),
}

/// Result of one [`BackendRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    Reading {
        seq: u64,
        result: Result<ClassifiedReading, TransportError>,
    },
    History(Result<History, TransportError>),
    AlertLog(Result<Vec<AlertLogEntry>, TransportError>),
    Registered {
        origin: RegistrationOrigin,
        result: Result<(), RegistrationError>,
    },
    ManualEmergency(Result<ManualEmergencyAck, ActuatorError>),
    Actuator {
        command: ActuatorCommand,
        result: Result<(), ActuatorError>,
    },
}
