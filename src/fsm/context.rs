//! Shared mutable context threaded through every FSM handler.
//!
//! `AlarmContext` is the single struct that state handlers read from and
//! write to: the current tick's inputs, the long-lived [`AlarmSession`],
//! and the output instructions collected during the tick.

use crate::hazard::HazardState;

// ---------------------------------------------------------------------------
// Alarm session (process-scoped state)
// ---------------------------------------------------------------------------

/// Everything the controller remembers between ticks.
///
/// Created once at rest; mutated only by a reading tick or a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmSession {
    /// Whether the emergency modal is currently shown.
    pub visible: bool,
    /// Set on manual dismissal; re-display is suppressed while
    /// `now < suppressed_until`.  Cleared only when the hazard clears.
    pub suppressed_until: Option<u64>,
    /// Previous tick's hazard booleans, for edge detection.
    pub last_hazard_state: HazardState,
    /// Time of the last alert-log registration issued.
    pub last_registered_at: Option<u64>,
}

// ---------------------------------------------------------------------------
// Outputs (written by state handlers; consumed by the controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// The hazard cleared while the modal was up.
    HazardCleared,
    /// The operator dismissed the modal.
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalCommand {
    Show,
    Hide(HideReason),
}

/// Instructions produced during one tick or operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmOutputs {
    pub modal: Option<ModalCommand>,
    pub audible: bool,
}

// ---------------------------------------------------------------------------
// AlarmContext
// ---------------------------------------------------------------------------

pub struct AlarmContext {
    // -- Timing --
    /// Monotonic time of the current tick or action (ms).
    pub now_ms: u64,
    /// Suppression window applied on dismissal (ms).
    pub cooldown_ms: u64,

    // -- Inputs --
    /// Whether any channel is in danger in the current tick.
    pub any_danger: bool,

    // -- State --
    pub session: AlarmSession,

    // -- Outputs --
    pub outputs: AlarmOutputs,
}

impl AlarmContext {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            now_ms: 0,
            cooldown_ms,
            any_danger: false,
            session: AlarmSession::default(),
            outputs: AlarmOutputs::default(),
        }
    }

    /// Load a reading tick's inputs and clear last tick's outputs.
    pub fn begin_tick(&mut self, now_ms: u64, any_danger: bool) {
        self.now_ms = now_ms;
        self.any_danger = any_danger;
        self.outputs = AlarmOutputs::default();
    }

    /// Prepare for an operator action; tick inputs are left untouched.
    pub fn begin_action(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.outputs = AlarmOutputs::default();
    }

    /// True while a dismissal's cooldown is still running.
    pub fn suppression_active(&self) -> bool {
        self.session
            .suppressed_until
            .is_some_and(|until| self.now_ms < until)
    }

    /// Milliseconds left in the current suppression window (0 when none).
    pub fn suppression_remaining_ms(&self) -> u64 {
        self.session
            .suppressed_until
            .map_or(0, |until| until.saturating_sub(self.now_ms))
    }
}
