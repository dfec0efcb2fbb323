//! Ordering of reading results.
//!
//! Each reading poll is stamped with a sequence number when it is issued.
//! Responses may come back out of order (several I/O workers, variable
//! latency).  A response is applied only if it is newer than the last one
//! applied; anything older has been superseded and is dropped.

/// Issues and checks reading sequence numbers.
#[derive(Debug, Default)]
pub struct TickSequencer {
    next_seq: u64,
    last_applied: Option<u64>,
}

impl TickSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new poll.
    pub fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Whether a response for `seq` may still be applied.
    pub fn is_current(&self, seq: u64) -> bool {
        self.last_applied.is_none_or(|last| seq > last)
    }

    /// Record that `seq` mutated the alarm session.
    pub fn mark_applied(&mut self, seq: u64) {
        self.last_applied = Some(self.last_applied.map_or(seq, |last| last.max(seq)));
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }
}
