//! Backend data model.
//!
//! The installation backend speaks Spanish field names (`temperatura`,
//! `humo`, `nivel_*`, `tipo`, ...).  Every type here maps them with serde
//! renames and accepts the English spelling as an alias, so a backend
//! variant that emits either decodes into the same structs.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::hazard::HazardState;

// ---------------------------------------------------------------------------
// Danger classification
// ---------------------------------------------------------------------------

/// Backend-assigned classification of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DangerLevel {
    #[serde(rename = "bajo", alias = "low")]
    Low,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "alto", alias = "high")]
    High,
    #[serde(rename = "peligro", alias = "danger")]
    Danger,
    /// Sensor silent, or a level string this client does not know.
    #[default]
    #[serde(rename = "sin_datos", alias = "no_data", other)]
    NoData,
}

impl DangerLevel {
    pub fn is_danger(self) -> bool {
        self == Self::Danger
    }

    /// Indicator text shown next to a live value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Danger => "DANGER!",
            Self::NoData => "NO DATA",
        }
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Live reading
// ---------------------------------------------------------------------------

/// One classified sample, delivered to the controller once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    /// Temperature (°C).
    #[serde(rename = "temperatura", alias = "temperature")]
    pub temperature: f32,
    /// Smoke concentration (ppm).
    #[serde(rename = "humo", alias = "smoke")]
    pub smoke: f32,
    #[serde(rename = "nivel_temperatura", alias = "temperature_level", default)]
    pub temperature_level: DangerLevel,
    #[serde(rename = "nivel_humo", alias = "smoke_level", default)]
    pub smoke_level: DangerLevel,
    /// Display-formatted capture time.
    #[serde(default)]
    pub timestamp: String,
    /// Precomputed "any channel in danger" flag.  Only some backend
    /// variants send it; when absent it is derived from the levels.
    #[serde(
        rename = "alerta",
        alias = "any_danger",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub any_danger: Option<bool>,
}

impl ClassifiedReading {
    /// Per-channel danger booleans.
    pub fn hazard(&self) -> HazardState {
        HazardState::from_levels(self.temperature_level, self.smoke_level)
    }

    /// The backend's flag when present, otherwise derived from the levels.
    pub fn any_danger(&self) -> bool {
        self.any_danger.unwrap_or_else(|| self.hazard().any())
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub time: String,
    pub value: f32,
}

/// Historical series for both channels.  Either may be missing, `null` or
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(
        rename = "temperatura",
        alias = "temperature",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub temperature: Vec<HistoryPoint>,
    #[serde(
        rename = "humo",
        alias = "smoke",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub smoke: Vec<HistoryPoint>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Alert log
// ---------------------------------------------------------------------------

/// Tag attached to an alert-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertTag {
    #[serde(rename = "temperatura", alias = "temperature")]
    Temperature,
    #[serde(rename = "humo", alias = "smoke")]
    Smoke,
    #[serde(rename = "emergencia_manual", alias = "manual_emergency")]
    ManualEmergency,
    /// A tag introduced by a newer backend.
    #[serde(other)]
    Unknown,
}

impl AlertTag {
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Smoke => "Smoke",
            Self::ManualEmergency => "Manual emergency",
            Self::Unknown => "Unknown",
        }
    }
}

/// Tags of one registration: at most one per channel plus the manual tag.
pub type AlertTags = heapless::Vec<AlertTag, 3>;

/// One row of the backend's canonical alert log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertLogEntry {
    #[serde(rename = "temperatura", alias = "temperature", default)]
    pub temperature: f32,
    #[serde(rename = "humo", alias = "smoke", default)]
    pub smoke: f32,
    #[serde(rename = "tipo", alias = "tags", default)]
    pub tags: Vec<AlertTag>,
    #[serde(default)]
    pub timestamp: String,
}

impl AlertLogEntry {
    /// "Temperature and Smoke" style summary of the tags.
    pub fn tag_summary(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// Why a registration was issued.  Not transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationOrigin {
    /// A channel crossed into danger.
    #[default]
    HazardEdge,
    /// The operator triggered the manual emergency.
    ManualEmergency,
}

/// Body of the register-alert POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRegistration {
    #[serde(rename = "temperatura")]
    pub temperature: f32,
    #[serde(rename = "humo")]
    pub smoke: f32,
    #[serde(rename = "tipo")]
    pub tags: AlertTags,
    pub timestamp: String,
    #[serde(skip)]
    pub origin: RegistrationOrigin,
}

// ---------------------------------------------------------------------------
// Operator actions
// ---------------------------------------------------------------------------

/// Answer to the manual-emergency POST.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManualEmergencyAck {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "mensaje", alias = "message", default)]
    pub message: Option<String>,
}

/// Direct actuator commands available to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    FanOn,
    FanOff,
    DoorsOpen,
    DoorsClose,
}

impl ActuatorCommand {
    /// Notice text once the backend acknowledged the command.
    pub fn success_notice(self) -> &'static str {
        match self {
            Self::FanOn => "Fan on, extracting smoke",
            Self::FanOff => "Fan off",
            Self::DoorsOpen => "Evacuation doors OPEN",
            Self::DoorsClose => "Evacuation doors CLOSED",
        }
    }

    /// Notice text when the command could not be delivered.
    pub fn failure_notice(self) -> &'static str {
        match self {
            Self::FanOn => "Failed to turn the fan on",
            Self::FanOff => "Failed to turn the fan off",
            Self::DoorsOpen => "Failed to open the doors",
            Self::DoorsClose => "Failed to close the doors",
        }
    }
}
