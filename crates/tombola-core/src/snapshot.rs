//! Point-in-time wheel persistence.
//!
//! A snapshot is one wheel's entries, derived maps, and settings under a
//! wheel identifier. Saves are idempotent, last write wins; loads are
//! point-in-time reads. The store decides transport, the engine only
//! decides shape.

use crate::{
    identity::WheelId,
    rig::RigMode,
    roster::{Entry, IdentityMaps},
    stamp::Timestamp,
    tuning::SpinTuning,
};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("wheel '{wheel}' has no stored snapshot")]
    NotFound { wheel: WheelId },

    #[error("stored snapshot for wheel '{wheel}' is unreadable: {message}")]
    Corrupt { wheel: WheelId, message: String },

    #[error("snapshot store unavailable: {message}")]
    Unavailable { message: String },
}

///
/// WheelSettings
///
/// Everything configurable that travels with the wheel document.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    pub tuning: SpinTuning,
    pub default_mode: RigMode,
}

///
/// WheelSnapshot
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub wheel: WheelId,
    pub entries: Vec<Entry>,
    pub maps: IdentityMaps,
    pub settings: WheelSettings,
    pub saved_at: Timestamp,
}

///
/// WheelStore
///

pub trait WheelStore {
    fn save(&self, snapshot: &WheelSnapshot) -> Result<(), StoreError>;
    fn load(&self, wheel: &WheelId) -> Result<WheelSnapshot, StoreError>;
    fn reset(&self, wheel: &WheelId) -> Result<(), StoreError>;
}

///
/// MemoryWheelStore
///
/// Keeps the latest snapshot per wheel in memory. Resetting an unknown
/// wheel succeeds; there is nothing to report about deleting nothing.
///

#[derive(Debug, Default)]
pub struct MemoryWheelStore {
    slots: RefCell<BTreeMap<WheelId, WheelSnapshot>>,
}

impl WheelStore for MemoryWheelStore {
    fn save(&self, snapshot: &WheelSnapshot) -> Result<(), StoreError> {
        self.slots
            .borrow_mut()
            .insert(snapshot.wheel.clone(), snapshot.clone());

        Ok(())
    }

    fn load(&self, wheel: &WheelId) -> Result<WheelSnapshot, StoreError> {
        self.slots
            .borrow()
            .get(wheel)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                wheel: wheel.clone(),
            })
    }

    fn reset(&self, wheel: &WheelId) -> Result<(), StoreError> {
        self.slots.borrow_mut().remove(wheel);

        Ok(())
    }
}

///
/// TESTS
///
