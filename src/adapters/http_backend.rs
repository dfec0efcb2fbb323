//! HTTP backend adapter.
//!
//! Implements [`BackendPort`] over the installation backend's JSON API using
//! a blocking `reqwest` client.  Calls block the I/O worker thread that
//! makes them, bounded by the configured request timeout.
//!
//! | Call                | Endpoint                         |
//! |---------------------|----------------------------------|
//! | `current_reading`   | `GET  /leer`                     |
//! | `history`           | `GET  /historico`                |
//! | `alert_log`         | `GET  /alertas`                  |
//! | `register_alert`    | `POST /alertas/registrar`        |
//! | `manual_emergency`  | `POST /emergencia/manual`        |
//! | `actuator`          | `POST /ventilador/{on,off}`      |
//! |                     | `POST /servomotor/{abrir,cerrar}`|

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::app::ports::BackendPort;
use crate::error::{ActuatorError, RegistrationError, TransportError};
use crate::model::{
    ActuatorCommand, AlertLogEntry, AlertRegistration, ClassifiedReading, History,
    ManualEmergencyAck,
};

const READING_PATH: &str = "leer";
const HISTORY_PATH: &str = "historico";
const ALERT_LOG_PATH: &str = "alertas";
const REGISTER_PATH: &str = "alertas/registrar";
const MANUAL_EMERGENCY_PATH: &str = "emergencia/manual";

fn actuator_path(command: ActuatorCommand) -> &'static str {
    match command {
        ActuatorCommand::FanOn => "ventilador/on",
        ActuatorCommand::FanOff => "ventilador/off",
        ActuatorCommand::DoorsOpen => "servomotor/abrir",
        ActuatorCommand::DoorsClose => "servomotor/cerrar",
    }
}

// ── Wire envelopes ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum AlertLogBody {
    Wrapped {
        #[serde(alias = "alerts")]
        alertas: Vec<AlertLogEntry>,
    },
    Bare(Vec<AlertLogEntry>),
}

impl AlertLogBody {
    fn into_entries(self) -> Vec<AlertLogEntry> {
        match self {
            Self::Wrapped { alertas } => alertas,
            Self::Bare(entries) => entries,
        }
    }
}

/// Optional acknowledgement body on actuator endpoints.
#[derive(Deserialize, Default)]
struct ActuatorAck {
    #[serde(default)]
    success: Option<bool>,
    #[serde(rename = "mensaje", alias = "message", default)]
    message: Option<String>,
}

/// Decode an alert-log body, wrapped (`{"alertas": [...]}`) or bare.
pub fn decode_alert_log(body: &str) -> Result<Vec<AlertLogEntry>, TransportError> {
    serde_json::from_str::<AlertLogBody>(body)
        .map(AlertLogBody::into_entries)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

/// Interpret an actuator reply body.  Empty or non-JSON bodies count as
/// success; only an explicit `"success": false` is a rejection.
fn check_actuator_body(body: &str) -> Result<(), ActuatorError> {
    let ack: ActuatorAck = serde_json::from_str(body).unwrap_or_default();
    match ack.success {
        Some(false) => Err(ActuatorError::Rejected(ack.message)),
        _ => Ok(()),
    }
}

// ── Adapter ──────────────────────────────────────────────────

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build the client.  Must run outside any async context.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let resp = self.get(path)?;
        resp.json::<T>()
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn get(&self, path: &str) -> Result<Response, TransportError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(resp)
    }

    /// POST with an empty JSON body; returns the response on any 2xx.
    fn post_empty(&self, path: &str) -> Result<Response, ActuatorError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&serde_json::json!({}))
            .send()
            .map_err(|e| ActuatorError::Unreachable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ActuatorError::Status(status.as_u16()));
        }
        Ok(resp)
    }
}

impl BackendPort for HttpBackend {
    fn current_reading(&self) -> Result<ClassifiedReading, TransportError> {
        self.get_json(READING_PATH)
    }

    fn history(&self) -> Result<History, TransportError> {
        self.get_json(HISTORY_PATH)
    }

    fn alert_log(&self) -> Result<Vec<AlertLogEntry>, TransportError> {
        let body = self
            .get(ALERT_LOG_PATH)?
            .text()
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        decode_alert_log(&body)
    }

    fn register_alert(&self, alert: &AlertRegistration) -> Result<(), RegistrationError> {
        let resp = self
            .client
            .post(self.url(REGISTER_PATH))
            .json(alert)
            .send()
            .map_err(|e| RegistrationError::Unreachable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RegistrationError::Status(status.as_u16()));
        }
        debug!("HTTP: alert registered ({:?})", alert.origin);
        Ok(())
    }

    fn manual_emergency(&self) -> Result<ManualEmergencyAck, ActuatorError> {
        self.post_empty(MANUAL_EMERGENCY_PATH)?
            .json::<ManualEmergencyAck>()
            .map_err(|e| ActuatorError::Unreachable(format!("malformed ack: {e}")))
    }

    fn actuator(&self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        let body = self.post_empty(actuator_path(command))?.text().unwrap_or_default();
        check_actuator_body(&body)
    }
}
