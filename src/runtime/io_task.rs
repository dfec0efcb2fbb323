//! Blocking backend I/O workers.
//!
//! Each worker is a plain OS thread that takes one [`BackendRequest`] at a
//! time from the request channel, performs the blocking call through the
//! [`BackendPort`], and pushes exactly one [`BackendResponse`] back.
//!
//! ```text
//!  REQUEST_CHANNEL ──▶ worker 0 ──┐
//!                  ──▶ worker 1 ──┼──▶ RESPONSE_CHANNEL
//!                  ──▶ worker n ──┘
//! ```
//!
//! Only one worker waits on the request channel at a time (`recv_lock`).
//! The channel keeps a single receiver waker, so parked workers take turns
//! instead of waking each other.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use log::{debug, info, warn};

use crate::app::commands::{BackendRequest, BackendResponse};
use crate::app::ports::BackendPort;

use super::channels::{RequestChannel, ResponseChannel};

/// Perform one request against the backend.
///
/// Pure with respect to the runtime: no channels, no threads.
pub fn dispatch(backend: &impl BackendPort, request: BackendRequest) -> BackendResponse {
    match request {
        BackendRequest::FetchReading { seq } => BackendResponse::Reading {
            seq,
            result: backend.current_reading(),
        },
        BackendRequest::FetchHistory => BackendResponse::History(backend.history()),
        BackendRequest::FetchAlertLog => BackendResponse::AlertLog(backend.alert_log()),
        BackendRequest::RegisterAlert(alert) => BackendResponse::Registered {
            origin: alert.origin,
            result: backend.register_alert(&alert),
        },
        BackendRequest::ManualEmergency => {
            BackendResponse::ManualEmergency(backend.manual_emergency())
        }
        BackendRequest::Actuator(command) => BackendResponse::Actuator {
            command,
            result: backend.actuator(command),
        },
    }
}

/// Hand a response to the control loop.  Dropped with a warning when full.
fn send_response(responses: &ResponseChannel, response: BackendResponse) {
    if let Err(e) = responses.try_send(response) {
        warn!("IO: response channel full, dropping {:?}", e);
    }
}

fn run_worker<B: BackendPort>(
    id: u8,
    backend: &B,
    requests: &RequestChannel,
    responses: &ResponseChannel,
    recv_lock: &Mutex<()>,
) {
    debug!("IO worker {} ready", id);
    loop {
        let request = {
            let _turn = recv_lock.lock().unwrap_or_else(PoisonError::into_inner);
            futures_lite::future::block_on(requests.receive())
        };
        debug!("IO[{}]: {:?}", id, request);
        send_response(responses, dispatch(backend, request));
    }
}

// ── Thread spawn ─────────────────────────────────────────────

/// Spawn `count` I/O worker threads sharing one backend client.
///
/// Workers run until the process exits.
pub fn spawn_workers<B>(
    backend: Arc<B>,
    count: u8,
    requests: &'static RequestChannel,
    responses: &'static ResponseChannel,
) -> std::io::Result<Vec<JoinHandle<()>>>
where
    B: BackendPort + Send + Sync + 'static,
{
    let recv_lock = Arc::new(Mutex::new(()));
    let mut handles = Vec::with_capacity(usize::from(count));

    for id in 0..count {
        let backend = Arc::clone(&backend);
        let recv_lock = Arc::clone(&recv_lock);
        let handle = std::thread::Builder::new()
            .name(format!("io-worker-{id}"))
            .spawn(move || run_worker(id, &*backend, requests, responses, &recv_lock))?;
        handles.push(handle);
    }

    info!("IO: {} worker(s) started", count);
    Ok(handles)
}

// ── Tests ────────────────────────────────────────────────────
