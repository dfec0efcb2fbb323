//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch.
//!
//! ```text
//!  IDLE ──[danger]──▶ ALARM_SHOWN ──[dismiss]──▶ ALARM_SUPPRESSED
//!    ▲                  │      ▲                      │     │
//!    │            [clear]      └──[cooldown over]─────┘     │
//!    ├──────────────────┘                                   │
//!    └──────────────────────────[clear]─────────────────────┘
//! ```

use super::context::{AlarmContext, HideReason, ModalCommand};
use super::{AlarmState, StateDescriptor};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; AlarmState::COUNT] {
    [
        StateDescriptor {
            id: AlarmState::Idle,
            on_enter: Some(idle_enter),
            on_update: idle_update,
        },
        StateDescriptor {
            id: AlarmState::AlarmShown,
            on_enter: Some(shown_enter),
            on_update: shown_update,
        },
        StateDescriptor {
            id: AlarmState::AlarmSuppressed,
            on_enter: Some(suppressed_enter),
            on_update: suppressed_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — no danger, modal hidden
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut AlarmContext) {
    if ctx.session.visible {
        ctx.outputs.modal = Some(ModalCommand::Hide(HideReason::HazardCleared));
        info!("IDLE: hazard cleared, closing emergency modal");
    }
    ctx.session.visible = false;
    // Full reset: a later hazard starts without any suppression.
    ctx.session.suppressed_until = None;
}

fn idle_update(ctx: &mut AlarmContext) -> Option<AlarmState> {
    if ctx.any_danger {
        return Some(AlarmState::AlarmShown);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM_SHOWN — danger present, modal visible
// ═══════════════════════════════════════════════════════════════════════════

fn shown_enter(ctx: &mut AlarmContext) {
    ctx.session.visible = true;
    ctx.outputs.modal = Some(ModalCommand::Show);
    ctx.outputs.audible = true;
    warn!("ALARM_SHOWN: dangerous levels detected, evacuate");
}

fn shown_update(ctx: &mut AlarmContext) -> Option<AlarmState> {
    if !ctx.any_danger {
        return Some(AlarmState::Idle);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM_SUPPRESSED — danger present, modal hidden by a dismissal
// ═══════════════════════════════════════════════════════════════════════════

fn suppressed_enter(ctx: &mut AlarmContext) {
    ctx.session.visible = false;
    ctx.session.suppressed_until = Some(ctx.now_ms.saturating_add(ctx.cooldown_ms));
    ctx.outputs.modal = Some(ModalCommand::Hide(HideReason::Dismissed));
    info!(
        "ALARM_SUPPRESSED: modal dismissed, re-display held for {}s",
        ctx.cooldown_ms / 1000
    );
}

fn suppressed_update(ctx: &mut AlarmContext) -> Option<AlarmState> {
    if !ctx.any_danger {
        info!("ALARM_SUPPRESSED: hazard cleared, suppression reset");
        return Some(AlarmState::Idle);
    }

    if !ctx.suppression_active() {
        info!("ALARM_SUPPRESSED: cooldown over and hazard persists, re-showing");
        return Some(AlarmState::AlarmShown);
    }

    debug!(
        "ALARM_SUPPRESSED: {}s of suppression left",
        ctx.suppression_remaining_ms().div_ceil(1000)
    );
    None
}
