//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the process logger (stderr via `tracing-subscriber` in the binary).
//! A graphical dashboard would implement the same trait.

use log::{error, info, warn};

use crate::app::events::{AppEvent, NoticeLevel};
use crate::app::ports::EventSink;
use crate::fsm::context::HideReason;
use crate::model::AlertLogEntry;

/// Rows of the alert log shown per refresh.
const LOG_ROWS: usize = 10;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink {
    /// Length of the last rendered alert log; unchanged logs are not reprinted.
    last_log_len: Option<usize>,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_alert_log(&mut self, entries: &[AlertLogEntry]) {
        if self.last_log_len == Some(entries.len()) {
            return;
        }
        self.last_log_len = Some(entries.len());

        if entries.is_empty() {
            info!("LOG   | no alerts recorded");
            return;
        }
        info!("LOG   | {} alert(s), newest first", entries.len());
        for entry in entries.iter().rev().take(LOG_ROWS) {
            info!(
                "LOG   | {} | {} | T={:.1}\u{00b0}C smoke={:.1}ppm",
                entry.timestamp,
                entry.tag_summary(),
                entry.temperature,
                entry.smoke,
            );
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Snapshot(s) => {
                if let Some(r) = &s.last_reading {
                    info!(
                        "READ  | state={} | T={:.1}\u{00b0}C ({}) | smoke={:.1}ppm ({}) | {}",
                        s.state,
                        r.temperature,
                        r.temperature_level,
                        r.smoke,
                        r.smoke_level,
                        r.timestamp,
                    );
                }
            }
            AppEvent::ModalShown(r) => {
                warn!(
                    "ALARM | EMERGENCY | T={:.1}\u{00b0}C ({}) | smoke={:.1}ppm ({}) | type `dismiss` to silence",
                    r.temperature, r.temperature_level, r.smoke, r.smoke_level,
                );
            }
            AppEvent::ModalHidden(HideReason::HazardCleared) => {
                info!("ALARM | cleared, hazard no longer present");
            }
            AppEvent::ModalHidden(HideReason::Dismissed) => {
                info!("ALARM | dismissed by operator");
            }
            AppEvent::AudibleAlert => {
                // Terminal bell.
                eprint!("\u{0007}");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
            AppEvent::Connectivity(true) => {
                info!("LINK  | backend connected");
            }
            AppEvent::Connectivity(false) => {
                warn!("LINK  | backend unreachable, showing last known state");
            }
            AppEvent::HistoryUpdated(h) => {
                let last = |series: &Option<Vec<crate::model::HistoryPoint>>| {
                    series
                        .as_ref()
                        .and_then(|s| s.last())
                        .map_or_else(|| "-".to_string(), |p| format!("{:.1}@{}", p.value, p.time))
                };
                info!(
                    "HIST  | temperature last={} | smoke last={}",
                    last(&h.temperature),
                    last(&h.smoke)
                );
            }
            AppEvent::AlertLogUpdated(entries) => self.render_alert_log(entries),
            AppEvent::Notice(n) => match n.level {
                NoticeLevel::Info => info!("NOTE  | {}", n.message),
                NoticeLevel::Success => info!("OK    | {}", n.message),
                NoticeLevel::Error => error!("FAIL  | {}", n.message),
            },
        }
    }
}
