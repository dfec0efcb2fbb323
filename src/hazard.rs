//! Hazard classification and alert-log eligibility.
//!
//! Each tick the controller turns the backend's per-channel levels into a
//! [`HazardState`], compares it with the previous tick's state, and asks
//! the [`RegistrationGate`] whether a rising edge may be written to the
//! alert log.
//!
//! ## Edge lifecycle
//!
//! 1. A channel moves from any level to `danger`: that channel has a
//!    rising edge this tick.
//! 2. The gate admits the edge when it opens a new danger episode, or when
//!    the previous registration is older than the minimum interval.
//! 3. Edges that are not admitted are dropped.  They are never queued.
//! 4. A channel that stays in `danger` produces no further edges until it
//!    leaves `danger` and comes back.

use log::{info, warn};

use crate::model::{AlertTag, AlertTags, DangerLevel};

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Monitored channels, usable as bitmask flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HazardChannel {
    Temperature = 0b0000_0001,
    Smoke = 0b0000_0010,
}

impl HazardChannel {
    pub const ALL: [Self; 2] = [Self::Temperature, Self::Smoke];

    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Alert-log tag for this channel.
    pub fn tag(self) -> AlertTag {
        match self {
            Self::Temperature => AlertTag::Temperature,
            Self::Smoke => AlertTag::Smoke,
        }
    }
}

// ---------------------------------------------------------------------------
// HazardState
// ---------------------------------------------------------------------------

/// Per-channel danger booleans for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct HazardState {
    pub temperature: bool,
    pub smoke: bool,
}

impl HazardState {
    /// Neither channel in danger.
    pub const CLEAR: Self = Self {
        temperature: false,
        smoke: false,
    };

    pub fn from_levels(temperature: DangerLevel, smoke: DangerLevel) -> Self {
        Self {
            temperature: temperature.is_danger(),
            smoke: smoke.is_danger(),
        }
    }

    pub fn any(self) -> bool {
        self.temperature || self.smoke
    }

    pub fn is_set(self, channel: HazardChannel) -> bool {
        match channel {
            HazardChannel::Temperature => self.temperature,
            HazardChannel::Smoke => self.smoke,
        }
    }

    /// Bitmask form (see [`HazardChannel::mask`]).
    pub fn mask(self) -> u8 {
        HazardChannel::ALL
            .iter()
            .filter(|c| self.is_set(**c))
            .fold(0, |acc, c| acc | c.mask())
    }

    /// Channels that are in danger now but were not in `previous`.
    pub fn rising_edges(self, previous: Self) -> Self {
        Self {
            temperature: self.temperature && !previous.temperature,
            smoke: self.smoke && !previous.smoke,
        }
    }

    /// Tags for every channel currently in danger.
    pub fn tags(self) -> AlertTags {
        let mut tags = AlertTags::new();
        for channel in HazardChannel::ALL {
            if self.is_set(channel) {
                // Capacity 3 > channel count.
                let _ = tags.push(channel.tag());
            }
        }
        tags
    }
}

/// Log every channel that entered or left danger between two ticks.
pub fn log_channel_changes(previous: HazardState, current: HazardState) {
    for channel in HazardChannel::ALL {
        match (previous.is_set(channel), current.is_set(channel)) {
            (false, true) => warn!("HAZARD SET: {:?} in danger", channel),
            (true, false) => info!("HAZARD CLEARED: {:?}", channel),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Registration gate
// ---------------------------------------------------------------------------

/// Rate limit for alert-log registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationGate {
    min_interval_ms: u64,
}

impl RegistrationGate {
    pub fn new(min_interval_ms: u64) -> Self {
        Self { min_interval_ms }
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Decide whether a rising edge observed at `now_ms` may be registered.
    ///
    /// `opens_episode` is true when no channel was in danger on the
    /// previous tick.
    /// Such an edge is always admitted; inside an episode the previous
    /// registration must be strictly older than the minimum interval.
    pub fn admits(&self, last_registered_at: Option<u64>, now_ms: u64, opens_episode: bool) -> bool {
        if opens_episode {
            return true;
        }
        match last_registered_at {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.min_interval_ms,
        }
    }
}
