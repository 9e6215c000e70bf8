//! Observability: wheel lifecycle events and sink abstractions.
//!
//! Sinks watch the wheel; they never steer it. A wheel with no sinks
//! behaves identically to one with many, and a sink that drops events
//! changes nothing about spin outcomes.

use crate::{
    identity::{EntryName, SpinNumber, TicketId, WheelId},
    rig::{RigMissReason, RigMode},
    spin::wheel::Winner,
};
use std::{fmt, rc::Rc};

///
/// WheelEvent
///

#[derive(Clone, Copy, Debug)]
pub enum WheelEvent<'a> {
    RosterRebuilt {
        entries: usize,
    },
    SpinStarted {
        spin: SpinNumber,
        mode: RigMode,
    },
    RigMissed {
        spin: SpinNumber,
        reason: RigMissReason,
    },
    SpinSettled {
        spin: SpinNumber,
        winner: &'a Winner,
    },
    WinnerRemoved {
        name: &'a EntryName,
        ticket: Option<&'a TicketId>,
    },
    SessionReset,
    SnapshotSaved {
        wheel: &'a WheelId,
    },
    SnapshotLoaded {
        wheel: &'a WheelId,
        entries: usize,
    },
}

///
/// WheelEventSink
///

pub trait WheelEventSink {
    fn record(&self, event: WheelEvent<'_>);
}

///
/// NullSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl WheelEventSink for NullSink {
    fn record(&self, _: WheelEvent<'_>) {}
}

///
/// Observers
///
/// The set of sinks one wheel fans events out to. Delivery order is
/// registration order.
///

#[derive(Default)]
pub struct Observers {
    sinks: Vec<Rc<dyn WheelEventSink>>,
}

impl Observers {
    pub fn register(&mut self, sink: Rc<dyn WheelEventSink>) {
        self.sinks.push(sink);
    }

    pub fn emit(&self, event: WheelEvent<'_>) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

///
/// TESTS
///
