//! Outbound application events.
//!
//! The [`AlertController`](super::controller::AlertController) and
//! [`MonitorService`](super::service::MonitorService) emit these through
//! the [`EventSink`](super::ports::EventSink) port.  The rendering layer on
//! the other side decides what a modal, a chart or a toast looks like.

use crate::fsm::AlarmState;
use crate::fsm::context::HideReason;
use crate::model::{AlertLogEntry, ClassifiedReading, HistoryPoint};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(AlarmState),

    /// The alarm FSM transitioned between states.
    StateChanged { from: AlarmState, to: AlarmState },

    /// Show the emergency modal with these values.
    ModalShown(ClassifiedReading),

    /// Hide the emergency modal.
    ModalHidden(HideReason),

    /// Play the audible alert once.
    AudibleAlert,

    /// Read-only view after every applied reading.
    Snapshot(DashboardSnapshot),

    /// Backend reachability changed (`true` = connected).
    Connectivity(bool),

    /// New chart data.  Empty series are left out.
    HistoryUpdated(HistoryUpdate),

    /// The backend's canonical alert log, oldest first.
    AlertLogUpdated(Vec<AlertLogEntry>),

    /// Short operator-facing message.
    Notice(Notice),
}

/// What the rendering layer may read after each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub state: AlarmState,
    pub visible: bool,
    pub last_reading: Option<ClassifiedReading>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryUpdate {
    pub temperature: Option<Vec<HistoryPoint>>,
    pub smoke: Option<Vec<HistoryPoint>>,
}

impl HistoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.smoke.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
