//! Function-pointer finite state machine engine for the alarm lifecycle.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  StateTable                                           │
//! │  ┌──────────────────┬───────────┬───────────────────┐ │
//! │  │ AlarmState       │ on_enter  │ on_update         │ │
//! │  ├──────────────────┼───────────┼───────────────────┤ │
//! │  │ Idle             │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ AlarmShown       │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  │ AlarmSuppressed  │ fn(ctx)   │ fn(ctx)->Option<> │ │
//! │  └──────────────────┴───────────┴───────────────────┘ │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine updates the current
//! pointer and runs `on_enter` for the next state.  Operator actions (dismiss) use
//! [`Fsm::force_transition`].  All functions receive `&mut AlarmContext`,
//! which holds the tick's inputs, the [`AlarmSession`](context::AlarmSession)
//! and the output instructions.

pub mod context;
pub mod states;

use core::fmt;

use context::AlarmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Alarm lifecycle states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmState {
    /// No danger, modal hidden.
    Idle = 0,
    /// Danger present, modal visible.
    AlarmShown = 1,
    /// Danger present, modal hidden by a recent dismissal.
    AlarmSuppressed = 2,
}

impl AlarmState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert an index back to `AlarmState`.  Panics on out-of-range in
    /// debug builds; returns `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::AlarmShown,
            2 => Self::AlarmSuppressed,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::AlarmShown => "ALARM_SHOWN",
            Self::AlarmSuppressed => "ALARM_SUPPRESSED",
        }
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.
pub type StateActionFn = fn(&mut AlarmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut AlarmContext) -> Option<AlarmState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: AlarmState,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `AlarmState as usize`.
    table: [StateDescriptor; AlarmState::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; AlarmState::COUNT], initial: AlarmState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut AlarmContext) {
        info!("Alarm FSM starting in state: {}", self.current_state());
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    update pointer → `on_enter(next)`.
    ///
    /// At most one transition happens per tick.
    pub fn tick(&mut self, ctx: &mut AlarmContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (used for operator dismissal).
    pub fn force_transition(&mut self, next: AlarmState, ctx: &mut AlarmContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> AlarmState {
        self.table[self.current].id
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: AlarmState, ctx: &mut AlarmContext) {
        let next_idx = next_id as usize;

        info!(
            "Alarm FSM transition: {} -> {}",
            self.current_state(),
            next_id
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
