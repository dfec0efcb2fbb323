//! Integration tests for the AlertController lifecycle.
//!
//! Drives the controller with a hand-stepped clock and checks modal
//! visibility, suppression and alert-log eligibility tick by tick.

use crate::mock_ports::{ManualClock, RecordingSink, calm, danger, reading};

use hazardwatch::app::controller::{AlertController, DismissOutcome, TickOutcome};
use hazardwatch::app::events::{AppEvent, NoticeLevel};
use hazardwatch::config::MonitorConfig;
use hazardwatch::fsm::AlarmState;
use hazardwatch::fsm::context::HideReason;
use hazardwatch::model::{AlertTag, ClassifiedReading, DangerLevel};

struct Rig {
    controller: AlertController,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Rig {
    /// Cooldown 20 s, registration interval 10 s.
    fn new() -> Self {
        let mut controller = AlertController::with_timing(20_000, 10_000);
        let mut sink = RecordingSink::new();
        controller.start(&mut sink);
        Self {
            controller,
            clock: ManualClock::at_secs(0),
            sink,
        }
    }

    fn at(&mut self, secs: u64, reading: ClassifiedReading) -> TickOutcome {
        self.clock.set_secs(secs);
        self.controller
            .on_reading(reading, &self.clock, &mut self.sink)
    }

    fn dismiss_at(&mut self, secs: u64) -> DismissOutcome {
        self.clock.set_secs(secs);
        self.controller.dismiss(&self.clock, &mut self.sink)
    }
}

// ── Recurring hazard ─────────────────────────────────────────

#[test]
fn danger_danger_normal_danger_registers_twice() {
    let mut rig = Rig::new();

    let t0 = rig.at(0, danger());
    assert_eq!(t0.state, AlarmState::AlarmShown);
    assert!(t0.registration.is_some(), "log#1 at t0");

    let t1 = rig.at(1, danger());
    assert_eq!(t1.state, AlarmState::AlarmShown);
    assert!(t1.registration.is_none(), "no fresh edge at t1");

    let t2 = rig.at(2, calm());
    assert_eq!(t2.state, AlarmState::Idle);
    assert!(!t2.visible);

    let t3 = rig.at(3, danger());
    assert_eq!(t3.state, AlarmState::AlarmShown);
    assert!(t3.registration.is_some(), "log#2 at t3 opens a new episode");

    assert_eq!(rig.sink.modal_shows(), 2);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::ModalHidden(HideReason::HazardCleared))),
        1
    );
}

// ── Dismissal and cooldown ───────────────────────────────────

#[test]
fn dismissed_alarm_returns_only_after_cooldown() {
    let mut rig = Rig::new();

    assert!(rig.at(0, danger()).registration.is_some());
    assert_eq!(
        rig.dismiss_at(1),
        DismissOutcome::Suppressed {
            remaining_ms: 20_000
        }
    );
    assert_eq!(rig.controller.state(), AlarmState::AlarmSuppressed);
    assert!(!rig.controller.is_visible());

    rig.sink.clear();
    for t in 2..=19 {
        let out = rig.at(t, danger());
        assert_eq!(out.state, AlarmState::AlarmSuppressed, "t={t}");
        assert!(!out.visible, "t={t}");
        assert!(out.registration.is_none(), "t={t}");
    }
    assert_eq!(rig.sink.modal_shows(), 0);

    let t21 = rig.at(21, danger());
    assert_eq!(t21.state, AlarmState::AlarmShown);
    assert!(t21.visible);
    assert!(t21.registration.is_none(), "no fresh edge at t21");
    assert_eq!(rig.sink.modal_shows(), 1);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::AudibleAlert)),
        1,
        "re-show plays the alert again"
    );
}

#[test]
fn cleared_hazard_rearms_immediately() {
    let mut rig = Rig::new();
    rig.at(0, danger());
    rig.dismiss_at(1);

    rig.at(2, calm());
    assert_eq!(rig.controller.state(), AlarmState::Idle);
    assert_eq!(rig.controller.session().suppressed_until, None);

    let t3 = rig.at(3, danger());
    assert_eq!(t3.state, AlarmState::AlarmShown, "suppression does not carry over");
    assert!(t3.visible);
    assert!(t3.registration.is_some());
}

#[test]
fn clearing_while_suppressed_hides_nothing() {
    let mut rig = Rig::new();
    rig.at(0, danger());
    rig.dismiss_at(1);
    rig.sink.clear();

    rig.at(2, calm());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ModalHidden(_))),
        0,
        "modal was already hidden"
    );
}

#[test]
fn repeated_dismiss_reports_remaining_time() {
    let mut rig = Rig::new();
    rig.at(0, danger());
    rig.dismiss_at(1);
    rig.sink.clear();

    assert_eq!(
        rig.dismiss_at(11),
        DismissOutcome::AlreadySuppressed {
            remaining_ms: 10_000
        }
    );
    assert_eq!(rig.controller.session().suppressed_until, Some(21_000));
    assert!(matches!(
        rig.sink.events.as_slice(),
        [AppEvent::Notice(n)] if n.level == NoticeLevel::Info && n.message.contains("10s")
    ));
}

#[test]
fn dismiss_when_idle_is_a_no_op() {
    let mut rig = Rig::new();
    rig.at(0, calm());
    let before = *rig.controller.session();
    assert_eq!(rig.dismiss_at(1), DismissOutcome::NothingShown);
    assert_eq!(*rig.controller.session(), before);
    assert_eq!(rig.controller.state(), AlarmState::Idle);
}

// ── Registration rate limit ──────────────────────────────────

#[test]
fn staggered_channels_respect_interval_within_episode() {
    let mut rig = Rig::new();
    let temp = || reading(DangerLevel::Danger, DangerLevel::Normal);
    let both = || reading(DangerLevel::Danger, DangerLevel::Danger);

    let t0 = rig.at(0, temp());
    assert_eq!(
        t0.registration.map(|r| r.tags.to_vec()),
        Some(vec![AlertTag::Temperature])
    );

    // Smoke crosses 4 s later in the same episode.
    assert!(rig.at(4, both()).registration.is_none());

    // Smoke drops and recrosses exactly at the interval boundary.
    rig.at(6, temp());
    assert!(rig.at(10, both()).registration.is_none(), "needs strictly more than 10 s");

    rig.at(11, temp());
    let t12 = rig.at(12, both());
    assert_eq!(
        t12.registration.map(|r| r.tags.to_vec()),
        Some(vec![AlertTag::Temperature, AlertTag::Smoke]),
        "tags cover every channel in danger"
    );
}

#[test]
fn dropped_edge_does_not_reset_the_window() {
    let mut rig = Rig::new();
    let temp = || reading(DangerLevel::Danger, DangerLevel::Normal);
    let both = || reading(DangerLevel::Danger, DangerLevel::Danger);

    rig.at(0, temp());
    rig.at(5, both());
    assert_eq!(rig.controller.session().last_registered_at, Some(0));
}

#[test]
fn backend_flag_shows_modal_without_registering() {
    let mut rig = Rig::new();
    let flagged = ClassifiedReading {
        any_danger: Some(true),
        ..calm()
    };
    let out = rig.at(0, flagged);
    assert_eq!(out.state, AlarmState::AlarmShown);
    assert!(out.registration.is_none(), "no channel crossed into danger");
}

#[test]
fn backend_flag_off_does_not_bypass_rate_limit() {
    let mut rig = Rig::new();
    let unflagged = |smoke| ClassifiedReading {
        any_danger: Some(false),
        ..reading(DangerLevel::Danger, smoke)
    };

    let mut registered = Vec::new();
    for secs in 0..=6 {
        let smoke = if secs % 2 == 0 {
            DangerLevel::Danger
        } else {
            DangerLevel::Normal
        };
        let out = rig.at(secs, unflagged(smoke));
        assert_eq!(out.state, AlarmState::Idle);
        if out.registration.is_some() {
            registered.push(secs);
        }
    }
    // Temperature stays in danger, so smoke flicker is one episode.
    assert_eq!(registered, vec![0]);
    assert_eq!(rig.controller.session().last_registered_at, Some(0));
}

// ── Snapshot ─────────────────────────────────────────────────

#[test]
fn snapshot_follows_every_tick() {
    let mut rig = Rig::new();
    let r = danger();
    rig.at(0, r.clone());

    let snap = rig.controller.snapshot();
    assert!(snap.visible);
    assert_eq!(snap.state, AlarmState::AlarmShown);
    assert_eq!(snap.last_reading, Some(r));
    assert!(matches!(rig.sink.events.last(), Some(AppEvent::Snapshot(_))));
}

#[test]
fn builds_from_config_defaults() {
    let mut sink = RecordingSink::new();
    let clock = ManualClock::at_secs(0);
    let mut controller = AlertController::new(&MonitorConfig::default());
    controller.start(&mut sink);
    controller.on_reading(danger(), &clock, &mut sink);

    clock.set_secs(1);
    assert_eq!(
        controller.dismiss(&clock, &mut sink),
        DismissOutcome::Suppressed {
            remaining_ms: 30_000
        }
    );
}
