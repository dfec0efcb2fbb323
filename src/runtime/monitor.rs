//! Control loop — single-threaded, reactor-driven.
//!
//! Runs on the calling thread using `edge-executor` for cooperative
//! scheduling and `async-io-mini` for reactor timers.  Four concurrent
//! futures share one [`MonitorService`]:
//!
//! 1. **Readings** — issues a sequenced poll every `reading_interval_ms`
//! 2. **History** — polls the chart series every `history_interval_ms`
//! 3. **Alert log** — polls the log every `alert_log_interval_ms`
//! 4. **Responses** — wakes on `responses.receive()`, applies results
//!
//! The operator loop is the executor's main future; `Quit` ends it and
//! `run` returns.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────┐
//!  │  futures_lite::future::block_on                          │
//!  │  ┌────────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                      │  │
//!  │  │  ┌──────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │  │
//!  │  │  │ Readings │ │ History │ │  Log    │ │ Results │  │  │
//!  │  │  │  1s ⏱    │ │  5s ⏱   │ │  3s ⏱   │ │ on recv │  │  │
//!  │  │  └──────────┘ └─────────┘ └─────────┘ └─────────┘  │  │
//!  │  │            main: operator commands                 │  │
//!  │  └────────────────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `RefCell` borrows are always released before an `.await`.

use core::cell::RefCell;
use core::time::Duration;
use std::rc::Rc;

use log::{info, warn};

use crate::app::commands::{BackendRequest, OperatorCommand};
use crate::app::ports::{ClockPort, EventSink};
use crate::app::service::MonitorService;
use crate::config::MonitorConfig;

use super::channels::Links;

struct Shared<C, S> {
    service: RefCell<MonitorService>,
    sink: RefCell<S>,
    clock: C,
    links: Links,
}

type SharedState<C, S> = Rc<Shared<C, S>>;

impl<C, S> Shared<C, S> {
    /// Queue a request for the I/O workers.  Dropped when the queue is full;
    /// periodic requests are reissued on the next tick.
    fn submit(&self, request: BackendRequest) {
        if let Err(e) = self.links.requests.try_send(request) {
            warn!("Monitor: request channel full, dropping {:?}", e);
        }
    }
}

/// Tick periods, taken from [`MonitorConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Periods {
    pub reading: Duration,
    pub history: Duration,
    pub alert_log: Duration,
}

impl Periods {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            reading: Duration::from_millis(u64::from(config.reading_interval_ms)),
            history: Duration::from_millis(u64::from(config.history_interval_ms)),
            alert_log: Duration::from_millis(u64::from(config.alert_log_interval_ms)),
        }
    }
}

// ── Tasks ────────────────────────────────────────────────────

async fn reading_loop<C, S>(shared: SharedState<C, S>, period: Duration) {
    loop {
        let request = shared.service.borrow_mut().next_reading_request();
        shared.submit(request);
        async_io_mini::Timer::after(period).await;
    }
}

async fn periodic_loop<C, S>(shared: SharedState<C, S>, request: BackendRequest, period: Duration) {
    loop {
        shared.submit(request.clone());
        async_io_mini::Timer::after(period).await;
    }
}

async fn response_loop<C: ClockPort, S: EventSink>(shared: SharedState<C, S>) {
    loop {
        let response = shared.links.responses.receive().await;
        let follow_up = {
            let mut service = shared.service.borrow_mut();
            let mut sink = shared.sink.borrow_mut();
            service.handle_response(response, &shared.clock, &mut *sink)
        };
        if let Some(request) = follow_up {
            shared.submit(request);
        }
    }
}

async fn operator_loop<C: ClockPort, S: EventSink>(shared: SharedState<C, S>) {
    loop {
        let command = shared.links.operator.receive().await;
        if command == OperatorCommand::Quit {
            info!("Monitor: quit requested");
            return;
        }
        let request = {
            let mut service = shared.service.borrow_mut();
            let mut sink = shared.sink.borrow_mut();
            service.handle_command(command, &shared.clock, &mut *sink)
        };
        if let Some(request) = request {
            shared.submit(request);
        }
    }
}

// ── Entry point ──────────────────────────────────────────────

/// Start the service and drive it until the operator quits.
///
/// I/O workers must already be listening on `links.requests`.
pub fn run<C, S>(
    mut service: MonitorService,
    clock: C,
    mut sink: S,
    periods: Periods,
    links: Links,
) where
    C: ClockPort,
    S: EventSink,
{
    service.start(&mut sink);

    let shared: SharedState<C, S> = Rc::new(Shared {
        service: RefCell::new(service),
        sink: RefCell::new(sink),
        clock,
        links,
    });

    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();

    executor
        .spawn(reading_loop(shared.clone(), periods.reading))
        .detach();
    executor
        .spawn(periodic_loop(
            shared.clone(),
            BackendRequest::FetchHistory,
            periods.history,
        ))
        .detach();
    executor
        .spawn(periodic_loop(
            shared.clone(),
            BackendRequest::FetchAlertLog,
            periods.alert_log,
        ))
        .detach();
    executor.spawn(response_loop(shared.clone())).detach();

    info!(
        "Monitor running (readings {:?}, history {:?}, alert log {:?})",
        periods.reading, periods.history, periods.alert_log
    );

    futures_lite::future::block_on(executor.run(operator_loop(shared)));
}
