//! Integration tests for the MonitorService → backend round trip.
//!
//! Requests are answered synchronously through `io_task::dispatch` against
//! a scripted `MockBackend`, so each test sees the exact chain of follow-up
//! requests the service produces.

use crate::mock_ports::{BackendCall, ManualClock, MockBackend, RecordingSink, calm, danger};

use hazardwatch::app::commands::{BackendRequest, BackendResponse, OperatorCommand};
use hazardwatch::app::controller::AlertController;
use hazardwatch::app::events::{AppEvent, NoticeLevel};
use hazardwatch::app::service::MonitorService;
use hazardwatch::error::{ActuatorError, TransportError};
use hazardwatch::fsm::AlarmState;
use hazardwatch::model::{ActuatorCommand, AlertTag, ManualEmergencyAck, RegistrationOrigin};
use hazardwatch::runtime::io_task::dispatch;

struct Rig {
    service: MonitorService,
    backend: MockBackend,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut service =
            MonitorService::with_controller(AlertController::with_timing(20_000, 10_000));
        let mut sink = RecordingSink::new();
        service.start(&mut sink);
        Self {
            service,
            backend: MockBackend::new(),
            clock: ManualClock::at_secs(0),
            sink,
        }
    }

    /// Run `request` and every follow-up to completion.  Returns the
    /// requests executed, in order.
    fn pump(&mut self, request: BackendRequest) -> Vec<BackendRequest> {
        let mut executed = Vec::new();
        let mut next = Some(request);
        while let Some(request) = next {
            executed.push(request.clone());
            let response = dispatch(&self.backend, request);
            next = self
                .service
                .handle_response(response, &self.clock, &mut self.sink);
        }
        executed
    }

    fn poll_reading(&mut self, secs: u64) -> Vec<BackendRequest> {
        self.clock.set_secs(secs);
        let request = self.service.next_reading_request();
        self.pump(request)
    }

    fn command(&mut self, cmd: OperatorCommand) -> Vec<BackendRequest> {
        match self
            .service
            .handle_command(cmd, &self.clock, &mut self.sink)
        {
            Some(request) => self.pump(request),
            None => Vec::new(),
        }
    }
}

// ── Reading → registration → log refresh ─────────────────────

#[test]
fn hazard_edge_registers_and_refreshes_log() {
    let mut rig = Rig::new();
    rig.backend.push_reading(Ok(danger()));

    let chain = rig.poll_reading(0);
    assert!(matches!(chain[0], BackendRequest::FetchReading { .. }));
    assert!(matches!(chain[1], BackendRequest::RegisterAlert(_)));
    assert_eq!(chain[2], BackendRequest::FetchAlertLog);
    assert_eq!(chain.len(), 3);

    let Some(AppEvent::AlertLogUpdated(entries)) = rig
        .sink
        .events
        .iter()
        .rev()
        .find(|e| matches!(e, AppEvent::AlertLogUpdated(_)))
    else {
        panic!("alert log was not refreshed");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tags, vec![AlertTag::Temperature]);
    assert_eq!(entries[0].timestamp, "t=0s");
}

#[test]
fn failed_registration_is_not_retried() {
    let mut rig = Rig::new();
    rig.backend.registration_fails.set(true);
    rig.backend.push_reading(Ok(danger()));
    rig.backend.push_reading(Ok(danger()));

    let chain = rig.poll_reading(0);
    assert_eq!(chain.len(), 2, "no log refresh after a failed POST");
    let chain = rig.poll_reading(1);
    assert_eq!(chain.len(), 1, "the lost edge is not re-sent");
    assert_eq!(rig.backend.registrations().len(), 1);
    assert_eq!(
        rig.service.controller().session().last_registered_at,
        Some(0)
    );
}

// ── Connectivity ─────────────────────────────────────────────

#[test]
fn transport_failure_keeps_session_and_flags_link() {
    let mut rig = Rig::new();
    rig.backend.push_reading(Ok(danger()));
    rig.poll_reading(0);
    let before = *rig.service.controller().session();

    rig.backend
        .push_reading(Err(TransportError::Unreachable("connection refused".into())));
    rig.poll_reading(1);

    assert_eq!(*rig.service.controller().session(), before);
    assert_eq!(rig.service.controller().state(), AlarmState::AlarmShown);
    assert!(!rig.service.is_connected());
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::Connectivity(false))
    ));

    rig.backend.push_reading(Ok(danger()));
    rig.poll_reading(2);
    assert!(rig.service.is_connected());
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::Connectivity(true))),
        2
    );
}

// ── Ordering ─────────────────────────────────────────────────

#[test]
fn superseded_reading_is_ignored() {
    let mut rig = Rig::new();
    let BackendRequest::FetchReading { seq: older } = rig.service.next_reading_request() else {
        panic!("expected a reading request");
    };
    let BackendRequest::FetchReading { seq: newer } = rig.service.next_reading_request() else {
        panic!("expected a reading request");
    };

    rig.service.handle_response(
        BackendResponse::Reading {
            seq: newer,
            result: Ok(calm()),
        },
        &rig.clock,
        &mut rig.sink,
    );
    let follow_up = rig.service.handle_response(
        BackendResponse::Reading {
            seq: older,
            result: Ok(danger()),
        },
        &rig.clock,
        &mut rig.sink,
    );

    assert!(follow_up.is_none());
    assert_eq!(rig.service.controller().state(), AlarmState::Idle);
    assert_eq!(rig.service.controller().tick_count(), 1);
}

// ── Operator commands ────────────────────────────────────────

#[test]
fn dismiss_via_command_suppresses() {
    let mut rig = Rig::new();
    rig.backend.push_reading(Ok(danger()));
    rig.poll_reading(0);

    rig.clock.set_secs(1);
    assert!(rig.command(OperatorCommand::Dismiss).is_empty());
    assert_eq!(
        rig.service.controller().state(),
        AlarmState::AlarmSuppressed
    );
}

#[test]
fn manual_emergency_logs_without_touching_alarm() {
    let mut rig = Rig::new();
    rig.backend.push_reading(Ok(calm()));
    rig.poll_reading(0);
    let before = *rig.service.controller().session();

    rig.clock.set_secs(5);
    let chain = rig.command(OperatorCommand::ManualEmergency);
    assert_eq!(chain[0], BackendRequest::ManualEmergency);
    let BackendRequest::RegisterAlert(reg) = &chain[1] else {
        panic!("expected a registration, got {:?}", chain[1]);
    };
    assert_eq!(reg.origin, RegistrationOrigin::ManualEmergency);
    assert_eq!(reg.tags.as_slice(), &[AlertTag::ManualEmergency]);
    assert_eq!(reg.temperature, calm().temperature);
    assert_eq!(chain[2], BackendRequest::FetchAlertLog);

    assert_eq!(*rig.service.controller().session(), before);
    assert_eq!(rig.service.controller().state(), AlarmState::Idle);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::Notice(n) if n.level == NoticeLevel::Success
        )),
        1
    );
}

#[test]
fn manual_emergency_failure_registers_nothing() {
    let mut rig = Rig::new();
    *rig.backend.manual_ack.borrow_mut() =
        Some(Err(ActuatorError::Unreachable("timeout".into())));

    let chain = rig.command(OperatorCommand::ManualEmergency);
    assert_eq!(chain, vec![BackendRequest::ManualEmergency]);
    assert!(rig.backend.registrations().is_empty());
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::Notice(n)) if n.level == NoticeLevel::Error
    ));
}

#[test]
fn manual_emergency_rejection_shows_backend_message() {
    let mut rig = Rig::new();
    *rig.backend.manual_ack.borrow_mut() = Some(Ok(ManualEmergencyAck {
        success: false,
        message: Some("Arduino no conectado".into()),
    }));

    let chain = rig.command(OperatorCommand::ManualEmergency);
    assert_eq!(chain.len(), 1);
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::Notice(n)) if n.message == "Arduino no conectado"
    ));
}

#[test]
fn actuator_commands_only_notify() {
    let mut rig = Rig::new();
    rig.backend.push_reading(Ok(danger()));
    rig.poll_reading(0);
    let before = *rig.service.controller().session();

    for cmd in [
        ActuatorCommand::FanOn,
        ActuatorCommand::DoorsOpen,
        ActuatorCommand::DoorsClose,
        ActuatorCommand::FanOff,
    ] {
        rig.command(OperatorCommand::Actuator(cmd));
    }

    assert_eq!(*rig.service.controller().session(), before);
    assert_eq!(
        rig.backend
            .calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, BackendCall::Actuator(_)))
            .count(),
        4
    );
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::Notice(n) if n.message == ActuatorCommand::FanOn.success_notice()
        )),
        1
    );
}
