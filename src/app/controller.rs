//! Alert controller — the alarm lifecycle core.
//!
//! [`AlertController`] owns the alarm FSM, the [`AlarmSession`] and the
//! registration gate.  It is driven by exactly two entry points:
//!
//! - [`on_reading`](AlertController::on_reading), once per applied tick;
//! - [`dismiss`](AlertController::dismiss), from the operator surface.
//!
//! ```text
//!  ClassifiedReading ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                        │     AlertController      │     (modal, audio, snapshot)
//!        dismiss() ────▶ │  FSM · edges · rate gate │
//!                        └──────────────────────────┘ ──▶ Option<AlertRegistration>
//! ```
//!
//! Time comes from an injected [`ClockPort`]; nothing here blocks or does I/O.

use log::{debug, info};

use crate::config::MonitorConfig;
use crate::fsm::context::{AlarmContext, AlarmSession, ModalCommand};
use crate::fsm::states::build_state_table;
use crate::fsm::{AlarmState, Fsm};
use crate::hazard::{RegistrationGate, log_channel_changes};
use crate::model::{AlertRegistration, ClassifiedReading, RegistrationOrigin};

use super::events::{AppEvent, DashboardSnapshot, Notice};
use super::ports::{ClockPort, EventSink};

/// Result of one reading tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub state: AlarmState,
    pub visible: bool,
    /// Alert-log entry to send, if a rising edge was admitted.
    pub registration: Option<AlertRegistration>,
}

/// Result of a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// The modal was hidden and the cooldown started.
    Suppressed { remaining_ms: u64 },
    /// A cooldown was already running; it was not extended.
    AlreadySuppressed { remaining_ms: u64 },
    /// No alarm was up.
    NothingShown,
}

// ───────────────────────────────────────────────────────────────
// AlertController
// ───────────────────────────────────────────────────────────────

pub struct AlertController {
    fsm: Fsm,
    ctx: AlarmContext,
    gate: RegistrationGate,
    last_reading: Option<ClassifiedReading>,
    tick_count: u64,
}

impl AlertController {
    /// Build the controller from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_timing(config.cooldown_ms(), config.min_registration_interval_ms())
    }

    /// Build with explicit cooldown and rate-limit windows (ms).
    pub fn with_timing(cooldown_ms: u64, min_registration_interval_ms: u64) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), AlarmState::Idle),
            ctx: AlarmContext::new(cooldown_ms),
            gate: RegistrationGate::new(min_registration_interval_ms),
            last_reading: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "AlertController started in {} (cooldown {}s, registration interval {}s)",
            self.fsm.current_state(),
            self.ctx.cooldown_ms / 1000,
            self.gate.min_interval_ms() / 1000
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Apply one classified reading: FSM step, edge detection, snapshot.
    pub fn on_reading(
        &mut self,
        reading: ClassifiedReading,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;
        let now_ms = clock.now_ms();
        let prev_state = self.fsm.current_state();

        let hazard = reading.hazard();
        let previous_hazard = self.ctx.session.last_hazard_state;
        log_channel_changes(previous_hazard, hazard);

        // 1. Visibility
        self.ctx.begin_tick(now_ms, reading.any_danger());
        self.fsm.tick(&mut self.ctx);

        // 2. Alert-log eligibility, independent of visibility
        let edges = hazard.rising_edges(previous_hazard);
        let registration = if edges.any() {
            // Episodes follow the channel levels, not the modal: a backend
            // flag can hold the alarm in IDLE while channels flicker.
            let opens_episode = !previous_hazard.any();
            if self
                .gate
                .admits(self.ctx.session.last_registered_at, now_ms, opens_episode)
            {
                self.ctx.session.last_registered_at = Some(now_ms);
                info!(
                    "Registering hazard event (edges=0b{:02b}, danger=0b{:02b})",
                    edges.mask(),
                    hazard.mask()
                );
                Some(AlertRegistration {
                    temperature: reading.temperature,
                    smoke: reading.smoke,
                    tags: hazard.tags(),
                    timestamp: clock.timestamp(),
                    origin: RegistrationOrigin::HazardEdge,
                })
            } else {
                debug!(
                    "Hazard edge dropped by rate limit (edges=0b{:02b})",
                    edges.mask()
                );
                None
            }
        } else {
            None
        };

        // 3. Edge baseline for the next tick, whatever happened above
        self.ctx.session.last_hazard_state = hazard;

        // 4. Outputs
        self.emit_outputs(&reading, sink);
        let state = self.fsm.current_state();
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }

        self.last_reading = Some(reading);
        sink.emit(&AppEvent::Snapshot(self.snapshot()));

        TickOutcome {
            state,
            visible: self.ctx.session.visible,
            registration,
        }
    }

    // ── Operator actions ──────────────────────────────────────

    /// Manual dismissal.  Safe to call in any state.
    pub fn dismiss(&mut self, clock: &impl ClockPort, sink: &mut impl EventSink) -> DismissOutcome {
        let prev_state = self.fsm.current_state();
        self.ctx.begin_action(clock.now_ms());

        match prev_state {
            AlarmState::AlarmShown => {
                self.fsm
                    .force_transition(AlarmState::AlarmSuppressed, &mut self.ctx);
                if let Some(ModalCommand::Hide(reason)) = self.ctx.outputs.modal {
                    sink.emit(&AppEvent::ModalHidden(reason));
                }
                sink.emit(&AppEvent::StateChanged {
                    from: prev_state,
                    to: AlarmState::AlarmSuppressed,
                });
                let remaining_ms = self.ctx.suppression_remaining_ms();
                sink.emit(&AppEvent::Notice(Notice::info(format!(
                    "Alert dismissed. It will be shown again in {}s if the danger persists.",
                    remaining_ms.div_ceil(1000)
                ))));
                DismissOutcome::Suppressed { remaining_ms }
            }
            AlarmState::AlarmSuppressed => {
                let remaining_ms = self.ctx.suppression_remaining_ms();
                sink.emit(&AppEvent::Notice(Notice::info(format!(
                    "Alert already dismissed. It will be shown again in {}s if the danger persists.",
                    remaining_ms.div_ceil(1000)
                ))));
                DismissOutcome::AlreadySuppressed { remaining_ms }
            }
            AlarmState::Idle => {
                debug!("Dismiss ignored: no alarm is showing");
                DismissOutcome::NothingShown
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> AlarmState {
        self.fsm.current_state()
    }

    pub fn is_visible(&self) -> bool {
        self.ctx.session.visible
    }

    /// The live alarm session (read-only).
    pub fn session(&self) -> &AlarmSession {
        &self.ctx.session
    }

    pub fn last_reading(&self) -> Option<&ClassifiedReading> {
        self.last_reading.as_ref()
    }

    /// Reading ticks applied since start-up.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            state: self.fsm.current_state(),
            visible: self.ctx.session.visible,
            last_reading: self.last_reading.clone(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_outputs(&self, reading: &ClassifiedReading, sink: &mut impl EventSink) {
        match self.ctx.outputs.modal {
            Some(ModalCommand::Show) => sink.emit(&AppEvent::ModalShown(reading.clone())),
            Some(ModalCommand::Hide(reason)) => sink.emit(&AppEvent::ModalHidden(reason)),
            None => {}
        }
        if self.ctx.outputs.audible {
            sink.emit(&AppEvent::AudibleAlert);
        }
    }
}
