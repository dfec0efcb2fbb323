//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlertController / MonitorService (domain)
//! ```
//!
//! Driven adapters (backend client, clock, renderer, config file) implement
//! these traits.  The domain consumes them via generics, so the alarm
//! logic never touches the network or the wall clock directly.

use crate::config::MonitorConfig;
use crate::error::{ActuatorError, ConfigError, RegistrationError, TransportError};
use crate::model::{
    ActuatorCommand, AlertLogEntry, AlertRegistration, ClassifiedReading, History,
    ManualEmergencyAck,
};

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Injected time source.  Tests drive it by hand.
pub trait ClockPort {
    /// Monotonic milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;

    /// Wall-clock display string stamped on alert registrations.
    fn timestamp(&self) -> String;
}

// ───────────────────────────────────────────────────────────────
// Backend port (driven adapter: domain ↔ installation backend)
// ───────────────────────────────────────────────────────────────

/// Request/response contract with the installation backend.
///
/// Calls block the calling thread; the runtime only invokes them from
/// I/O worker threads, never from the control loop.
pub trait BackendPort {
    /// Latest classified sample.
    fn current_reading(&self) -> Result<ClassifiedReading, TransportError>;

    /// Historical series for both channels.
    fn history(&self) -> Result<History, TransportError>;

    /// The canonical alert log, oldest first.
    fn alert_log(&self) -> Result<Vec<AlertLogEntry>, TransportError>;

    /// Append one entry to the alert log.  Not idempotent.
    fn register_alert(&self, alert: &AlertRegistration) -> Result<(), RegistrationError>;

    /// Trigger the backend's emergency routine (fan on, doors open).
    fn manual_emergency(&self) -> Result<ManualEmergencyAck, ActuatorError>;

    /// Drive one actuator.
    fn actuator(&self, command: ActuatorCommand) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → rendering layer)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide how they are rendered.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// values with [`ConfigError::ValidationFailed`] rather than clamping.
pub trait ConfigPort {
    /// Returns [`MonitorConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}
