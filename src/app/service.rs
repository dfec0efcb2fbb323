//! Monitor service — orchestration around the alert controller.
//!
//! [`MonitorService`] owns the [`AlertController`], the reading
//! [`TickSequencer`] and the connectivity indicator.  It never performs
//! I/O itself: the runtime hands it [`BackendResponse`]s and
//! [`OperatorCommand`]s, and it answers with at most one follow-up
//! [`BackendRequest`] for the I/O workers.
//!
//! ```text
//!  BackendResponse ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                      │     MonitorService     │
//!  OperatorCommand ──▶ │ sequencer · controller │ ──▶ Option<BackendRequest>
//!                      └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::model::{AlertRegistration, AlertTag, AlertTags, RegistrationOrigin};

use super::commands::{BackendRequest, BackendResponse, OperatorCommand};
use super::controller::{AlertController, TickOutcome};
use super::events::{AppEvent, HistoryUpdate, Notice};
use super::ports::{ClockPort, EventSink};
use super::sequencer::TickSequencer;

const MANUAL_EMERGENCY_OK: &str = "Emergency protocol activated: fan on, doors open.";
const MANUAL_EMERGENCY_FAILED: &str = "Could not activate the emergency protocol.";

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    controller: AlertController,
    sequencer: TickSequencer,
    /// `None` until the first fetch completes.
    connected: Option<bool>,
}

impl MonitorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the controller — call [`start`](Self::start) next.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_controller(AlertController::new(config))
    }

    pub fn with_controller(controller: AlertController) -> Self {
        Self {
            controller,
            sequencer: TickSequencer::new(),
            connected: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.controller.start(sink);
        info!("MonitorService started");
    }

    /// Stamp the next reading poll.
    pub fn next_reading_request(&mut self) -> BackendRequest {
        BackendRequest::FetchReading {
            seq: self.sequencer.issue(),
        }
    }

    // ── Response handling ─────────────────────────────────────

    /// Apply one backend result.  Returns a follow-up request, if any.
    pub fn handle_response(
        &mut self,
        response: BackendResponse,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Option<BackendRequest> {
        match response {
            BackendResponse::Reading { seq, result } => match result {
                Ok(reading) => {
                    self.set_connected(true, sink);
                    if !self.sequencer.is_current(seq) {
                        debug!(
                            "Stale reading #{} ignored (last applied #{:?})",
                            seq,
                            self.sequencer.last_applied()
                        );
                        return None;
                    }
                    self.sequencer.mark_applied(seq);
                    let TickOutcome { registration, .. } =
                        self.controller.on_reading(reading, clock, sink);
                    registration.map(BackendRequest::RegisterAlert)
                }
                Err(e) => {
                    warn!("Reading #{} failed: {}", seq, e);
                    // A newer reading already proved the link.
                    if self.sequencer.is_current(seq) {
                        self.set_connected(false, sink);
                    }
                    None
                }
            },

            BackendResponse::History(result) => {
                match result {
                    Ok(history) => {
                        self.set_connected(true, sink);
                        let update = HistoryUpdate {
                            temperature: Some(history.temperature).filter(|s| !s.is_empty()),
                            smoke: Some(history.smoke).filter(|s| !s.is_empty()),
                        };
                        if !update.is_empty() {
                            sink.emit(&AppEvent::HistoryUpdated(update));
                        }
                    }
                    Err(e) => {
                        warn!("History fetch failed: {}", e);
                        self.set_connected(false, sink);
                    }
                }
                None
            }

            BackendResponse::AlertLog(result) => {
                match result {
                    Ok(entries) => {
                        self.set_connected(true, sink);
                        sink.emit(&AppEvent::AlertLogUpdated(entries));
                    }
                    Err(e) => {
                        warn!("Alert log fetch failed: {}", e);
                        self.set_connected(false, sink);
                    }
                }
                None
            }

            BackendResponse::Registered { origin, result } => match result {
                Ok(()) => {
                    debug!("Alert registered ({:?})", origin);
                    Some(BackendRequest::FetchAlertLog)
                }
                Err(e) => {
                    warn!("Alert registration ({:?}) lost: {}", origin, e);
                    None
                }
            },

            BackendResponse::ManualEmergency(result) => match result {
                Ok(ack) if ack.success => {
                    info!("Manual emergency acknowledged");
                    sink.emit(&AppEvent::Notice(Notice::success(
                        ack.message.unwrap_or_else(|| MANUAL_EMERGENCY_OK.into()),
                    )));
                    Some(BackendRequest::RegisterAlert(
                        self.manual_registration(clock),
                    ))
                }
                Ok(ack) => {
                    warn!("Manual emergency rejected: {:?}", ack.message);
                    sink.emit(&AppEvent::Notice(Notice::error(
                        ack.message
                            .unwrap_or_else(|| MANUAL_EMERGENCY_FAILED.into()),
                    )));
                    None
                }
                Err(e) => {
                    warn!("Manual emergency failed: {}", e);
                    sink.emit(&AppEvent::Notice(Notice::error(MANUAL_EMERGENCY_FAILED)));
                    None
                }
            },

            BackendResponse::Actuator { command, result } => {
                match result {
                    Ok(()) => {
                        info!("Actuator {:?} acknowledged", command);
                        sink.emit(&AppEvent::Notice(Notice::success(command.success_notice())));
                    }
                    Err(e) => {
                        warn!("Actuator {:?} failed: {}", command, e);
                        sink.emit(&AppEvent::Notice(Notice::error(command.failure_notice())));
                    }
                }
                None
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command.  Returns the backend request it needs.
    pub fn handle_command(
        &mut self,
        cmd: OperatorCommand,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Option<BackendRequest> {
        match cmd {
            OperatorCommand::Dismiss => {
                self.controller.dismiss(clock, sink);
                None
            }
            OperatorCommand::ManualEmergency => {
                info!("Manual emergency requested");
                Some(BackendRequest::ManualEmergency)
            }
            OperatorCommand::Actuator(command) => Some(BackendRequest::Actuator(command)),
            OperatorCommand::RefreshHistory => Some(BackendRequest::FetchHistory),
            OperatorCommand::RefreshAlertLog => Some(BackendRequest::FetchAlertLog),
            // The runtime owns shutdown.
            OperatorCommand::Quit => None,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn controller(&self) -> &AlertController {
        &self.controller
    }

    /// Last known backend reachability; `false` before the first fetch.
    pub fn is_connected(&self) -> bool {
        self.connected.unwrap_or(false)
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_connected(&mut self, connected: bool, sink: &mut impl EventSink) {
        if self.connected == Some(connected) {
            return;
        }
        if connected {
            info!("Backend reachable");
        } else {
            warn!("Backend unreachable; alarm state held");
        }
        self.connected = Some(connected);
        sink.emit(&AppEvent::Connectivity(connected));
    }

    fn manual_registration(&self, clock: &impl ClockPort) -> AlertRegistration {
        let (temperature, smoke) = self
            .controller
            .last_reading()
            .map_or((0.0, 0.0), |r| (r.temperature, r.smoke));
        let mut tags = AlertTags::new();
        // Capacity is 3; one tag always fits.
        let _ = tags.push(AlertTag::ManualEmergency);
        AlertRegistration {
            temperature,
            smoke,
            tags,
            timestamp: clock.timestamp(),
            origin: RegistrationOrigin::ManualEmergency,
        }
    }
}
