#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FootEventKind {
    Lifted,
    /// Touch-down; the natural hook for footstep sounds and dust effects.
    Planted,
}

/// A gait transition recorded during a tick.
///
/// This is plain data so it can be collected during simulation and consumed later by audio,
/// effects or debug tooling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FootEvent {
    pub tick: u64,
    pub leg: usize,
    pub kind: FootEventKind,
    pub position: Vec3,
}

pub trait FootEventSink {
    fn emit(&mut self, event: FootEvent);
}

#[derive(Debug, Default)]
pub struct NullEventSink;

impl FootEventSink for NullEventSink {
    fn emit(&mut self, _event: FootEvent) {}
}

#[derive(Debug, Default)]
pub struct VecEventSink {
    pub events: Vec<FootEvent>,
}

impl FootEventSink for VecEventSink {
    fn emit(&mut self, event: FootEvent) {
        self.events.push(event);
    }
}

impl VecEventSink {
    pub fn planted(&self) -> impl Iterator<Item = &FootEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == FootEventKind::Planted)
    }

    pub fn lifted(&self) -> impl Iterator<Item = &FootEvent> {
        self.events
            .iter()
            .filter(|e| e.kind == FootEventKind::Lifted)
    }
}
