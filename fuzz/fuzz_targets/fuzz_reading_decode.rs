//! Fuzz target: reading payload decode → `AlertController::on_reading`
//!
//! Decodes arbitrary bytes as a backend reading and, when they parse,
//! feeds the result to a controller.  Asserts that decoding never panics
//! and that the modal is visible exactly when the FSM is in ALARM_SHOWN.
//!
//! cargo fuzz run fuzz_reading_decode

#![no_main]

use std::cell::Cell;

use hazardwatch::app::controller::AlertController;
use hazardwatch::app::events::AppEvent;
use hazardwatch::app::ports::{ClockPort, EventSink};
use hazardwatch::fsm::AlarmState;
use hazardwatch::model::ClassifiedReading;
use libfuzzer_sys::fuzz_target;

struct StepClock(Cell<u64>);

impl ClockPort for StepClock {
    fn now_ms(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 1_000);
        now
    }
    fn timestamp(&self) -> String {
        String::new()
    }
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut controller = AlertController::with_timing(20_000, 10_000);
    let clock = StepClock(Cell::new(0));
    let mut sink = NullSink;
    controller.start(&mut sink);

    // One payload per line, so a single input can drive several ticks.
    for line in data.split(|b| *b == b'\n') {
        let Ok(reading) = serde_json::from_slice::<ClassifiedReading>(line) else {
            continue;
        };
        let out = controller.on_reading(reading, &clock, &mut sink);
        assert_eq!(out.visible, out.state == AlarmState::AlarmShown);
        if let Some(reg) = out.registration {
            assert!(!reg.tags.is_empty(), "registration without a danger tag");
        }
    }
});
