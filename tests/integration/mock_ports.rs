//! Mock port adapters for integration tests.
//!
//! `ManualClock` is advanced by hand, `RecordingSink` keeps every emitted
//! event, and `MockBackend` answers from scripted queues while recording
//! every write-side call.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use hazardwatch::app::events::AppEvent;
use hazardwatch::app::ports::{BackendPort, ClockPort, EventSink};
use hazardwatch::error::{ActuatorError, RegistrationError, TransportError};
use hazardwatch::model::{
    ActuatorCommand, AlertLogEntry, AlertRegistration, ClassifiedReading, DangerLevel, History,
    ManualEmergencyAck,
};

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now_ms: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at_secs(secs: u64) -> Self {
        Self {
            now_ms: Cell::new(secs * 1000),
        }
    }

    pub fn set_secs(&self, secs: u64) {
        self.now_ms.set(secs * 1000);
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn timestamp(&self) -> String {
        format!("t={}s", self.now_ms.get() / 1000)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn modal_shows(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::ModalShown(_)))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockBackend ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Register(AlertRegistration),
    ManualEmergency,
    Actuator(ActuatorCommand),
}

#[derive(Default)]
pub struct MockBackend {
    pub readings: RefCell<VecDeque<Result<ClassifiedReading, TransportError>>>,
    pub alert_log: RefCell<Vec<AlertLogEntry>>,
    pub manual_ack: RefCell<Option<Result<ManualEmergencyAck, ActuatorError>>>,
    pub registration_fails: Cell<bool>,
    pub calls: RefCell<Vec<BackendCall>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reading(&self, reading: Result<ClassifiedReading, TransportError>) {
        self.readings.borrow_mut().push_back(reading);
    }

    pub fn registrations(&self) -> Vec<AlertRegistration> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                BackendCall::Register(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }
}

impl BackendPort for MockBackend {
    fn current_reading(&self) -> Result<ClassifiedReading, TransportError> {
        self.readings
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unreachable("no scripted reading".into())))
    }

    fn history(&self) -> Result<History, TransportError> {
        Ok(History::default())
    }

    fn alert_log(&self) -> Result<Vec<AlertLogEntry>, TransportError> {
        Ok(self.alert_log.borrow().clone())
    }

    fn register_alert(&self, alert: &AlertRegistration) -> Result<(), RegistrationError> {
        self.calls
            .borrow_mut()
            .push(BackendCall::Register(alert.clone()));
        if self.registration_fails.get() {
            return Err(RegistrationError::Status(500));
        }
        self.alert_log.borrow_mut().push(AlertLogEntry {
            temperature: alert.temperature,
            smoke: alert.smoke,
            tags: alert.tags.iter().copied().collect(),
            timestamp: alert.timestamp.clone(),
        });
        Ok(())
    }

    fn manual_emergency(&self) -> Result<ManualEmergencyAck, ActuatorError> {
        self.calls.borrow_mut().push(BackendCall::ManualEmergency);
        self.manual_ack.borrow().clone().unwrap_or(Ok(ManualEmergencyAck {
            success: true,
            message: None,
        }))
    }

    fn actuator(&self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        self.calls.borrow_mut().push(BackendCall::Actuator(command));
        Ok(())
    }
}

// ── Reading builders ──────────────────────────────────────────

pub fn reading(temperature: DangerLevel, smoke: DangerLevel) -> ClassifiedReading {
    ClassifiedReading {
        temperature: if temperature.is_danger() { 62.0 } else { 24.0 },
        smoke: if smoke.is_danger() { 410.0 } else { 35.0 },
        temperature_level: temperature,
        smoke_level: smoke,
        timestamp: String::new(),
        any_danger: None,
    }
}

#[allow(dead_code)]
pub fn danger() -> ClassifiedReading {
    reading(DangerLevel::Danger, DangerLevel::Normal)
}

#[allow(dead_code)]
pub fn calm() -> ClassifiedReading {
    reading(DangerLevel::Normal, DangerLevel::Normal)
}
