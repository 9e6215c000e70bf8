//! One wheel, its rig directives, a persistence slot, and a seeded rng,
//! driven through a single handle.
//!
//! The engine types stay available for callers that want to wire the
//! pieces themselves; `Session` is the batteries-included binding.

use crate::error::Error;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use std::rc::Rc;
use tombola_core::{
    identity::{SpinNumber, WheelId},
    obs::WheelEventSink,
    rig::{MemoryRigStore, RigFallback, RigMode, RigTarget},
    roster::{Entry, EntryDraft},
    snapshot::{MemoryWheelStore, WheelStore},
    spin::{FrameOutcome, SpinPlan, SpinRecord, Wheel},
    stamp::Timestamp,
    tuning::SpinTuning,
};

///
/// Session
///
/// A wheel bound to its rig store, snapshot slot, and rng. Every spin
/// drawn through the same seed replays identically, which is what makes
/// session recordings reproducible.
///

pub struct Session {
    wheel: Wheel,
    rig: MemoryRigStore,
    store: Rc<dyn WheelStore>,
    fallback: Option<Rc<dyn RigFallback>>,
    rng: ChaCha8Rng,
    wheel_id: WheelId,
}

impl Session {
    /// Create a session persisting under `wheel_id`, drawing randomness
    /// from `seed`. Starts with an in-memory snapshot store; swap it with
    /// [`Self::with_store`].
    #[must_use]
    pub fn new(wheel_id: WheelId, seed: u64) -> Self {
        Self {
            wheel: Wheel::default(),
            rig: MemoryRigStore::default(),
            store: Rc::new(MemoryWheelStore::default()),
            fallback: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            wheel_id,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Rc<dyn WheelStore>) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Rc<dyn RigFallback>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub const fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    #[must_use]
    pub const fn wheel_id(&self) -> &WheelId {
        &self.wheel_id
    }

    pub fn register_observer(&mut self, sink: Rc<dyn WheelEventSink>) {
        self.wheel.register_observer(sink);
    }

    //
    // Roster
    //

    pub fn replace_entries(&mut self, drafts: &[EntryDraft]) -> Result<(), Error> {
        self.wheel.replace_entries(drafts)?;

        Ok(())
    }

    pub fn shuffle_entries(&mut self) -> Result<(), Error> {
        self.wheel.shuffle_entries(&mut self.rng)?;

        Ok(())
    }

    pub fn sort_entries(&mut self) -> Result<(), Error> {
        self.wheel.sort_entries()?;

        Ok(())
    }

    //
    // Rigging
    //

    pub fn set_rig_mode(&mut self, spin: SpinNumber, mode: RigMode) {
        self.rig.set_mode(spin, mode);
    }

    pub fn set_rig_target(&mut self, spin: SpinNumber, target: RigTarget) {
        self.rig.set_target(spin, target);
    }

    pub fn clear_rig(&mut self, spin: SpinNumber) {
        self.rig.clear_spin(spin);
    }

    /// The mode spins fall back to when no directive names one.
    pub fn set_default_mode(&mut self, mode: RigMode) {
        let mut settings = self.wheel.settings().clone();
        settings.default_mode = mode;
        self.wheel.set_settings(settings);
    }

    pub fn set_tuning(&mut self, tuning: SpinTuning) {
        let mut settings = self.wheel.settings().clone();
        settings.tuning = tuning;
        self.wheel.set_settings(settings);
    }

    //
    // Spinning
    //

    pub fn spin(&mut self, now: Timestamp) -> Result<SpinPlan, Error> {
        let fallback = self.fallback.as_deref();
        let plan = self.wheel.begin_spin(&self.rig, fallback, &mut self.rng, now)?;

        Ok(plan.clone())
    }

    pub fn frame(&mut self, elapsed_ms: u64) -> FrameOutcome {
        self.wheel.frame(elapsed_ms)
    }

    pub fn idle_drift(&mut self, delta_ms: u64) {
        self.wheel.idle_drift(delta_ms);
    }

    #[must_use]
    pub fn pending_winner(&self) -> Option<&SpinRecord> {
        self.wheel.pending_winner()
    }

    pub fn dismiss_winner(&mut self, remove: bool) -> Result<Option<Entry>, Error> {
        let removed = self.wheel.dismiss_winner(remove)?;

        Ok(removed)
    }

    pub fn reset(&mut self) -> Result<(), Error> {
        self.wheel.reset_session()?;

        Ok(())
    }

    //
    // Persistence
    //

    pub fn save(&self, at: Timestamp) -> Result<(), Error> {
        self.wheel
            .save_to(self.store.as_ref(), self.wheel_id.clone(), at)?;

        Ok(())
    }

    pub fn load(&mut self) -> Result<(), Error> {
        self.wheel.load_from(self.store.as_ref(), &self.wheel_id)?;

        Ok(())
    }

    /// Drop the stored snapshot for this wheel. The live state stays.
    pub fn erase_saved(&self) -> Result<(), Error> {
        self.store.reset(&self.wheel_id)?;

        Ok(())
    }
}

///
/// TESTS
///
