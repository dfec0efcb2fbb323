//! Inter-thread communication channels.
//!
//! Uses `embassy-sync` bounded MPMC channels to bridge the control loop
//! (single-threaded executor) with the blocking I/O workers and the
//! operator input thread.  All three live in statics, no heap allocation.
//!
//! ```text
//!                    BackendRequest
//! ┌──────────────┐ ─────────────────▶ ┌──────────────┐
//! │ Control loop │                    │  I/O workers │
//! │  (executor)  │ ◀───────────────── │  (threads)   │
//! └──────────────┘   BackendResponse  └──────────────┘
//!        ▲
//!        │ OperatorCommand
//! ┌──────────────┐
//! │   Operator   │
//! └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::commands::{BackendRequest, BackendResponse, OperatorCommand};

/// Channel depth for outbound backend requests.
pub const REQUEST_DEPTH: usize = 8;

/// Channel depth for backend responses.
pub const RESPONSE_DEPTH: usize = 16;

/// Channel depth for operator commands.
pub const OPERATOR_DEPTH: usize = 4;

pub type RequestChannel = Channel<CriticalSectionRawMutex, BackendRequest, REQUEST_DEPTH>;
pub type ResponseChannel = Channel<CriticalSectionRawMutex, BackendResponse, RESPONSE_DEPTH>;
pub type OperatorChannel = Channel<CriticalSectionRawMutex, OperatorCommand, OPERATOR_DEPTH>;

/// Control loop → I/O workers.
pub static REQUEST_CHANNEL: RequestChannel = Channel::new();

/// I/O workers → control loop.
pub static RESPONSE_CHANNEL: ResponseChannel = Channel::new();

/// Operator surface → control loop.
pub static OPERATOR_CHANNEL: OperatorChannel = Channel::new();

/// The set of channels one monitor instance talks over.
#[derive(Clone, Copy)]
pub struct Links {
    pub requests: &'static RequestChannel,
    pub responses: &'static ResponseChannel,
    pub operator: &'static OperatorChannel,
}

impl Links {
    /// The process-wide static channels.
    pub fn global() -> Self {
        Self {
            requests: &REQUEST_CHANNEL,
            responses: &RESPONSE_CHANNEL,
            operator: &OPERATOR_CHANNEL,
        }
    }

    /// Fresh channels, leaked for the rest of the process.  Test harnesses
    /// use this so parallel runs do not share queues.
    pub fn leaked() -> Self {
        Self {
            requests: Box::leak(Box::new(Channel::new())),
            responses: Box::leak(Box::new(Channel::new())),
            operator: Box::leak(Box::new(Channel::new())),
        }
    }
}
