//! The wheel engine: one rotation scalar, a spin state machine, and the
//! winner bookkeeping around them.
//!
//! Invariants:
//! - The rotation scalar has exactly one writer at a time: idle drift while
//!   Idle, the active plan while Spinning, nobody once a winner is pending.
//! - Completion is one-shot. Frames arriving after the spin settles read
//!   state; they never recompute the winner or push a second record.
//! - The roster cannot change while a spin is in flight, so a plan's entry
//!   count stays valid until it settles.

use crate::{
    identity::{EntryName, SpinNumber, TicketId, WheelId},
    obs::{Observers, WheelEvent, WheelEventSink},
    rig::{self, RigFallback, RigMissReason, RigMode, RigOutcome, RigStore},
    roster::{Entry, EntryDraft, Roster, RosterError},
    snapshot::{StoreError, WheelSettings, WheelSnapshot, WheelStore},
    spin::{
        easing::ease,
        geometry::normalize_degrees,
        plan::{SpinPlan, plan_fixed, plan_random},
    },
    stamp::Timestamp,
};
use rand_chacha::rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error as ThisError;

///
/// WheelError
///

#[derive(Debug, ThisError)]
pub enum WheelError {
    #[error("a spin is already in flight")]
    AlreadySpinning,

    #[error("cannot spin an empty wheel")]
    EmptyRoster,

    #[error("entries are locked while a spin is in flight")]
    RosterLocked,

    #[error("no winner is pending")]
    NoPendingWinner,

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

///
/// SpinPhase
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Completed,
}

///
/// Winner
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub index: usize,
    pub name: EntryName,
    pub ticket: Option<TicketId>,
}

///
/// SpinRecord
///
/// One settled spin. Written exactly once, immutable afterwards.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub spin: SpinNumber,
    pub mode: RigMode,
    pub rig: RigOutcome,
    pub rotation_start: f64,
    pub rotation_end: f64,
    pub winner: Winner,
    pub at: Timestamp,
}

///
/// FrameOutcome
///
/// What one animation frame did to the wheel. `settled` is true on the
/// single frame that completes a spin, never again.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    pub rotation: f64,
    pub settled: bool,
}

///
/// ActiveSpin
///

#[derive(Clone, Debug)]
struct ActiveSpin {
    plan: SpinPlan,
    started_at: Timestamp,
}

///
/// Wheel
///

#[derive(Debug, Default)]
pub struct Wheel {
    roster: Roster,
    settings: WheelSettings,
    rotation: f64,
    phase: SpinPhase,
    next_spin: SpinNumber,
    active: Option<ActiveSpin>,
    history: Vec<SpinRecord>,
    observers: Observers,
}

impl Wheel {
    #[must_use]
    pub fn new(settings: WheelSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn register_observer(&mut self, sink: Rc<dyn WheelEventSink>) {
        self.observers.register(sink);
    }

    /// The live rotation scalar. Renderers may sample this at any cadence.
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub const fn phase(&self) -> SpinPhase {
        self.phase
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    /// Replace the settings. Takes effect at the next spin; a spin already
    /// in flight keeps the pacing it started with.
    pub fn set_settings(&mut self, settings: WheelSettings) {
        self.settings = settings;
    }

    #[must_use]
    pub const fn next_spin(&self) -> SpinNumber {
        self.next_spin
    }

    /// How many spins have settled this session.
    #[must_use]
    pub const fn spin_count(&self) -> u32 {
        self.next_spin.get() - 1
    }

    #[must_use]
    pub fn history(&self) -> &[SpinRecord] {
        &self.history
    }

    /// The record awaiting dismissal, if the last spin settled and nobody
    /// has dismissed its winner yet.
    #[must_use]
    pub fn pending_winner(&self) -> Option<&SpinRecord> {
        match self.phase {
            SpinPhase::Completed => self.history.last(),
            SpinPhase::Idle | SpinPhase::Spinning => None,
        }
    }

    /// Replace the whole entry list.
    pub fn replace_entries(&mut self, drafts: &[EntryDraft]) -> Result<(), WheelError> {
        self.ensure_unlocked()?;
        self.roster.rebuild(drafts);
        self.emit_roster_rebuilt();

        Ok(())
    }

    pub fn shuffle_entries(&mut self, rng: &mut impl RngCore) -> Result<(), WheelError> {
        self.ensure_unlocked()?;
        self.roster.shuffle(rng);
        self.emit_roster_rebuilt();

        Ok(())
    }

    pub fn sort_entries(&mut self) -> Result<(), WheelError> {
        self.ensure_unlocked()?;
        self.roster.sort_by_name();
        self.emit_roster_rebuilt();

        Ok(())
    }

    /// Start a spin. Reads the rig directive once, resolves any target
    /// against the current roster, and fixes the angular bounds before any
    /// frame runs. A target that cannot be resolved degrades the spin to
    /// the random path and reports the miss in the plan.
    pub fn begin_spin(
        &mut self,
        rig_store: &dyn RigStore,
        fallback: Option<&dyn RigFallback>,
        rng: &mut impl RngCore,
        now: Timestamp,
    ) -> Result<&SpinPlan, WheelError> {
        if self.phase == SpinPhase::Spinning {
            return Err(WheelError::AlreadySpinning);
        }
        if self.roster.is_empty() {
            return Err(WheelError::EmptyRoster);
        }

        let spin = self.next_spin;
        let directive = rig_store.directive_for(spin);
        let mode = directive.mode.unwrap_or(self.settings.default_mode);
        let start = self.rotation;
        let count = self.roster.len();
        let tuning = self.settings.tuning;

        self.observers.emit(WheelEvent::SpinStarted { spin, mode });

        let plan = match (mode, directive.target.as_ref()) {
            (RigMode::Fixed, Some(target)) => {
                match rig::reconcile(&self.roster, target, fallback, spin) {
                    Ok(index) => plan_fixed(spin, index, start, count, &tuning, rng),
                    Err(reason) => {
                        self.observers.emit(WheelEvent::RigMissed { spin, reason });
                        let rig = RigOutcome::Miss { reason };
                        plan_random(spin, mode, rig, start, count, &tuning, rng)
                    }
                }
            }
            (RigMode::Fixed, None) => {
                let reason = RigMissReason::NoTarget;
                self.observers.emit(WheelEvent::RigMissed { spin, reason });
                let rig = RigOutcome::Miss { reason };
                plan_random(spin, mode, rig, start, count, &tuning, rng)
            }
            (RigMode::Random, _) => {
                plan_random(spin, mode, RigOutcome::NotRigged, start, count, &tuning, rng)
            }
        };

        self.phase = SpinPhase::Spinning;
        let active = self.active.insert(ActiveSpin {
            plan,
            started_at: now,
        });

        Ok(&active.plan)
    }

    /// Advance the active spin to `elapsed_ms` since spin start. Eased
    /// interpolation until the configured duration, then the one-shot
    /// settle. With no spin in flight this only reports the rotation.
    #[allow(clippy::cast_precision_loss)]
    pub fn frame(&mut self, elapsed_ms: u64) -> FrameOutcome {
        let Some((start, end, duration)) = self
            .active
            .as_ref()
            .map(|a| (a.plan.rotation_start, a.plan.rotation_end, a.plan.duration_ms))
        else {
            return FrameOutcome {
                rotation: self.rotation,
                settled: false,
            };
        };

        if elapsed_ms >= duration {
            return self.finalize();
        }

        let t = elapsed_ms as f64 / duration as f64;
        self.rotation = start + (end - start) * ease(t);

        FrameOutcome {
            rotation: self.rotation,
            settled: false,
        }
    }

    fn finalize(&mut self) -> FrameOutcome {
        let Some(active) = self.active.take() else {
            return FrameOutcome {
                rotation: self.rotation,
                settled: false,
            };
        };

        let plan = active.plan;
        let index = plan.winning_index();
        // The roster lock guarantees the count the plan was built against.
        let entry = &self.roster[index];
        let winner = Winner {
            index,
            name: entry.name.clone(),
            ticket: entry.ticket.clone(),
        };

        self.rotation = plan.rotation_end;
        self.phase = SpinPhase::Completed;
        self.next_spin = plan.spin.next();
        self.history.push(SpinRecord {
            spin: plan.spin,
            mode: plan.mode,
            rig: plan.rig,
            rotation_start: plan.rotation_start,
            rotation_end: plan.rotation_end,
            winner,
            at: active.started_at.plus_millis(plan.duration_ms),
        });

        if let Some(record) = self.history.last() {
            self.observers.emit(WheelEvent::SpinSettled {
                spin: record.spin,
                winner: &record.winner,
            });
        }

        FrameOutcome {
            rotation: self.rotation,
            settled: true,
        }
    }

    /// Drift the wheel while nothing else owns the rotation. A no-op while
    /// a spin is in flight or a winner is pending.
    #[allow(clippy::cast_precision_loss)]
    pub fn idle_drift(&mut self, delta_ms: u64) {
        if self.phase != SpinPhase::Idle {
            return;
        }

        let drift = self.settings.tuning.idle_drift_deg_per_sec() * (delta_ms as f64 / 1_000.0);
        self.rotation = normalize_degrees(self.rotation + drift);
    }

    /// Dismiss the pending winner, optionally removing their entry. A
    /// removal that refuses (ambiguous name, vanished ticket) leaves the
    /// winner pending and the roster untouched.
    pub fn dismiss_winner(&mut self, remove: bool) -> Result<Option<Entry>, WheelError> {
        if self.phase != SpinPhase::Completed {
            return Err(WheelError::NoPendingWinner);
        }

        if !remove {
            self.phase = SpinPhase::Idle;
            return Ok(None);
        }

        let Some(record) = self.history.last() else {
            return Err(WheelError::NoPendingWinner);
        };
        let name = record.winner.name.clone();
        let ticket = record.winner.ticket.clone();

        let removed = self.roster.remove_winner(&name, ticket.as_ref())?;
        self.observers.emit(WheelEvent::WinnerRemoved {
            name: &name,
            ticket: ticket.as_ref(),
        });
        self.phase = SpinPhase::Idle;

        Ok(Some(removed))
    }

    /// Restart the session: spin numbering back to 1, history cleared.
    /// Entries and rotation stay.
    pub fn reset_session(&mut self) -> Result<(), WheelError> {
        if self.phase == SpinPhase::Spinning {
            return Err(WheelError::AlreadySpinning);
        }

        self.next_spin = SpinNumber::FIRST;
        self.history.clear();
        self.active = None;
        self.phase = SpinPhase::Idle;
        self.observers.emit(WheelEvent::SessionReset);

        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self, wheel: WheelId, at: Timestamp) -> WheelSnapshot {
        WheelSnapshot {
            wheel,
            entries: self.roster.entries().to_vec(),
            maps: self.roster.maps().clone(),
            settings: self.settings.clone(),
            saved_at: at,
        }
    }

    /// Adopt a snapshot. The stored entry order is authoritative; maps are
    /// rebuilt from it rather than trusted. Spin numbering and history are
    /// session state and survive a load.
    pub fn restore(&mut self, snapshot: WheelSnapshot) -> Result<(), WheelError> {
        if self.phase == SpinPhase::Spinning {
            return Err(WheelError::RosterLocked);
        }

        self.roster = Roster::from_entries(snapshot.entries);
        self.settings = snapshot.settings;
        self.active = None;
        self.phase = SpinPhase::Idle;
        self.emit_roster_rebuilt();

        Ok(())
    }

    pub fn save_to(
        &self,
        store: &dyn WheelStore,
        wheel: WheelId,
        at: Timestamp,
    ) -> Result<(), WheelError> {
        let snapshot = self.snapshot(wheel, at);
        store.save(&snapshot)?;
        self.observers.emit(WheelEvent::SnapshotSaved {
            wheel: &snapshot.wheel,
        });

        Ok(())
    }

    pub fn load_from(&mut self, store: &dyn WheelStore, wheel: &WheelId) -> Result<(), WheelError> {
        if self.phase == SpinPhase::Spinning {
            return Err(WheelError::RosterLocked);
        }

        let snapshot = store.load(wheel)?;
        let entries = snapshot.entries.len();
        self.restore(snapshot)?;
        self.observers.emit(WheelEvent::SnapshotLoaded { wheel, entries });

        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<(), WheelError> {
        if self.phase == SpinPhase::Spinning {
            return Err(WheelError::RosterLocked);
        }

        Ok(())
    }

    fn emit_roster_rebuilt(&self) {
        self.observers.emit(WheelEvent::RosterRebuilt {
            entries: self.roster.len(),
        });
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::{
        rig::{MemoryRigStore, RigTarget},
        snapshot::MemoryWheelStore,
        tuning::SpinTuning,
    };
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
    use std::cell::RefCell;

    struct RecordingSink {
        seen: RefCell<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                seen: RefCell::new(Vec::new()),
            })
        }

        fn kinds(&self) -> Vec<String> {
            self.seen.borrow().clone()
        }
    }

    impl WheelEventSink for RecordingSink {
        fn record(&self, event: WheelEvent<'_>) {
            let kind = match event {
                WheelEvent::RosterRebuilt { .. } => "roster_rebuilt",
                WheelEvent::SpinStarted { .. } => "spin_started",
                WheelEvent::RigMissed { .. } => "rig_missed",
                WheelEvent::SpinSettled { .. } => "spin_settled",
                WheelEvent::WinnerRemoved { .. } => "winner_removed",
                WheelEvent::SessionReset => "session_reset",
                WheelEvent::SnapshotSaved { .. } => "snapshot_saved",
                WheelEvent::SnapshotLoaded { .. } => "snapshot_loaded",
            };
            self.seen.borrow_mut().push(kind.to_string());
        }
    }

    fn drafts(names: &[&str]) -> Vec<EntryDraft> {
        names.iter().map(|n| EntryDraft::new(*n)).collect()
    }

    fn eight() -> Vec<EntryDraft> {
        drafts(&[
            "Ali", "Beatriz", "Charles", "Diya", "Eric", "Fatima", "Gabriel", "Hanna",
        ])
    }

    fn wheel_with(entries: &[EntryDraft]) -> Wheel {
        let mut wheel = Wheel::default();
        wheel.replace_entries(entries).unwrap();
        wheel
    }

    fn spin_number(n: u32) -> SpinNumber {
        SpinNumber::try_new(n).unwrap()
    }

    fn start_spin(wheel: &mut Wheel, rig: &MemoryRigStore, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        wheel
            .begin_spin(rig, None, &mut rng, Timestamp::from_seconds(1_000))
            .unwrap();
    }

    #[test]
    fn spinning_an_empty_wheel_is_refused() {
        let mut wheel = Wheel::default();
        let rig = MemoryRigStore::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = wheel
            .begin_spin(&rig, None, &mut rng, Timestamp::from_seconds(0))
            .unwrap_err();
        assert!(matches!(err, WheelError::EmptyRoster));
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.next_spin(), spin_number(1));
    }

    #[test]
    fn a_second_spin_request_is_refused_outright() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let err = wheel
            .begin_spin(&rig, None, &mut rng, Timestamp::from_seconds(0))
            .unwrap_err();
        assert!(matches!(err, WheelError::AlreadySpinning));
    }

    #[test]
    fn roster_is_locked_while_spinning() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);

        assert!(matches!(
            wheel.replace_entries(&drafts(&["Zoe"])),
            Err(WheelError::RosterLocked)
        ));
        assert!(matches!(wheel.sort_entries(), Err(WheelError::RosterLocked)));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(matches!(
            wheel.shuffle_entries(&mut rng),
            Err(WheelError::RosterLocked)
        ));
        assert_eq!(wheel.roster().len(), 8);

        wheel.frame(6_000);
        wheel.replace_entries(&drafts(&["Zoe"])).unwrap();
        assert_eq!(wheel.roster().len(), 1);
    }

    #[test]
    fn completion_is_one_shot() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 42);

        let mid = wheel.frame(3_000);
        assert!(!mid.settled);
        assert_eq!(wheel.phase(), SpinPhase::Spinning);

        let done = wheel.frame(6_000);
        assert!(done.settled);
        assert_eq!(wheel.phase(), SpinPhase::Completed);
        assert_eq!(wheel.history().len(), 1);
        let settled_rotation = wheel.rotation();

        // Duplicate frame callbacks after completion change nothing.
        let late = wheel.frame(6_000);
        assert!(!late.settled);
        let later = wheel.frame(9_999);
        assert!(!later.settled);
        assert_eq!(wheel.history().len(), 1);
        assert_eq!(wheel.rotation(), settled_rotation);
    }

    #[test]
    fn frames_interpolate_forward_between_bounds() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let plan = wheel
            .begin_spin(&rig, None, &mut rng, Timestamp::from_seconds(0))
            .unwrap();
        let (start, end) = (plan.rotation_start, plan.rotation_end);

        let mut prev = start;
        for elapsed in (0..6_000).step_by(250) {
            let frame = wheel.frame(elapsed);
            assert!(frame.rotation >= prev, "rotation reversed at {elapsed}ms");
            assert!(frame.rotation >= start && frame.rotation <= end);
            prev = frame.rotation;
        }

        assert!(wheel.frame(6_000).settled);
        assert_eq!(wheel.rotation(), end);
    }

    #[test]
    fn rigged_spin_parks_on_diya() {
        let mut rig = MemoryRigStore::default();
        rig.set_mode(spin_number(1), RigMode::Fixed);
        rig.set_target(
            spin_number(1),
            RigTarget::by_name(EntryName::try_new("Diya").unwrap()),
        );

        for seed in 0..50 {
            let mut wheel = wheel_with(&eight());
            start_spin(&mut wheel, &rig, seed);
            let done = wheel.frame(6_000);
            assert!(done.settled);

            let landed = normalize_degrees(wheel.rotation());
            assert!((landed - 67.5).abs() < 1e-9, "seed {seed} landed at {landed}");

            let record = wheel.history().last().unwrap();
            assert_eq!(record.winner.index, 3);
            assert_eq!(record.winner.name.as_str(), "Diya");
            assert_eq!(record.mode, RigMode::Fixed);
            assert_eq!(record.rig, RigOutcome::Hit { index: 3 });
        }
    }

    #[test]
    fn missed_rig_degrades_to_random_and_reports() {
        let mut wheel = wheel_with(&drafts(&["Sam", "Sam", "Ali"]));
        let sink = RecordingSink::new();
        wheel.register_observer(sink.clone());

        let mut rig = MemoryRigStore::default();
        rig.set_mode(spin_number(1), RigMode::Fixed);
        rig.set_target(
            spin_number(1),
            RigTarget::by_name(EntryName::try_new("Sam").unwrap()),
        );

        start_spin(&mut wheel, &rig, 9);
        assert!(wheel.frame(6_000).settled);

        let record = wheel.history().last().unwrap();
        assert_eq!(record.mode, RigMode::Fixed);
        assert_eq!(
            record.rig,
            RigOutcome::Miss {
                reason: RigMissReason::Ambiguous
            }
        );
        assert!(record.winner.index < 3);
        assert_eq!(
            sink.kinds(),
            ["spin_started", "rig_missed", "spin_settled"]
        );
    }

    #[test]
    fn fixed_mode_with_no_target_misses() {
        let mut wheel = wheel_with(&eight());
        let mut rig = MemoryRigStore::default();
        rig.set_mode(spin_number(1), RigMode::Fixed);

        start_spin(&mut wheel, &rig, 3);
        assert!(wheel.frame(6_000).settled);

        let record = wheel.history().last().unwrap();
        assert_eq!(
            record.rig,
            RigOutcome::Miss {
                reason: RigMissReason::NoTarget
            }
        );
    }

    #[test]
    fn session_default_mode_applies_when_unconfigured() {
        let mut wheel = wheel_with(&eight());
        let mut settings = wheel.settings().clone();
        settings.default_mode = RigMode::Fixed;
        wheel.set_settings(settings);

        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 3);
        assert!(wheel.frame(6_000).settled);

        // Fixed by default, but nothing configured a target.
        let record = wheel.history().last().unwrap();
        assert_eq!(record.mode, RigMode::Fixed);
        assert_eq!(
            record.rig,
            RigOutcome::Miss {
                reason: RigMissReason::NoTarget
            }
        );
    }

    #[test]
    fn spin_numbers_advance_and_reset() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();

        start_spin(&mut wheel, &rig, 1);
        wheel.frame(6_000);
        wheel.dismiss_winner(false).unwrap();

        start_spin(&mut wheel, &rig, 2);
        wheel.frame(6_000);

        assert_eq!(wheel.spin_count(), 2);
        assert_eq!(wheel.history()[0].spin, spin_number(1));
        assert_eq!(wheel.history()[1].spin, spin_number(2));
        assert_eq!(wheel.history()[1].at, Timestamp::from_seconds(1_006));

        wheel.reset_session().unwrap();
        assert_eq!(wheel.spin_count(), 0);
        assert_eq!(wheel.next_spin(), spin_number(1));
        assert!(wheel.history().is_empty());
        assert_eq!(wheel.phase(), SpinPhase::Idle);
    }

    #[test]
    fn spinning_again_over_a_pending_winner_is_allowed() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();

        start_spin(&mut wheel, &rig, 1);
        wheel.frame(6_000);
        assert!(wheel.pending_winner().is_some());

        start_spin(&mut wheel, &rig, 2);
        assert_eq!(wheel.phase(), SpinPhase::Spinning);
        assert!(wheel.pending_winner().is_none());
    }

    #[test]
    fn dismissing_without_removal_keeps_the_entry() {
        let mut wheel = wheel_with(&eight());
        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);
        wheel.frame(6_000);

        let kept = wheel.dismiss_winner(false).unwrap();
        assert_eq!(kept, None);
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert_eq!(wheel.roster().len(), 8);
        assert!(wheel.pending_winner().is_none());
    }

    #[test]
    fn dismissing_with_removal_takes_the_winner_out() {
        let mut wheel = wheel_with(&[
            EntryDraft::with_ticket("Sam", "T1"),
            EntryDraft::with_ticket("Sam", "T2"),
            EntryDraft::with_ticket("Ali", "T3"),
        ]);
        let sink = RecordingSink::new();
        wheel.register_observer(sink.clone());

        let mut rig = MemoryRigStore::default();
        rig.set_mode(spin_number(1), RigMode::Fixed);
        rig.set_target(
            spin_number(1),
            RigTarget::by_ticket(TicketId::try_new("T2").unwrap()),
        );

        start_spin(&mut wheel, &rig, 1);
        wheel.frame(6_000);

        let removed = wheel.dismiss_winner(true).unwrap().unwrap();
        assert_eq!(removed.ticket, Some(TicketId::try_new("T2").unwrap()));
        assert_eq!(wheel.roster().len(), 2);
        assert_eq!(wheel.phase(), SpinPhase::Idle);
        assert!(sink.kinds().contains(&"winner_removed".to_string()));

        // The other Sam survived.
        assert!(
            wheel
                .roster()
                .iter()
                .any(|e| e.ticket == Some(TicketId::try_new("T1").unwrap()))
        );
    }

    #[test]
    fn refused_removal_leaves_the_winner_pending() {
        let mut wheel = wheel_with(&drafts(&["Sam", "Sam"]));
        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);
        wheel.frame(6_000);

        let err = wheel.dismiss_winner(true).unwrap_err();
        assert!(matches!(
            err,
            WheelError::Roster(RosterError::AmbiguousName { .. })
        ));
        assert_eq!(wheel.phase(), SpinPhase::Completed, "still pending");
        assert_eq!(wheel.roster().len(), 2, "nothing removed");

        wheel.dismiss_winner(false).unwrap();
        assert_eq!(wheel.phase(), SpinPhase::Idle);
    }

    #[test]
    fn dismissing_with_no_winner_errors() {
        let mut wheel = wheel_with(&eight());
        assert!(matches!(
            wheel.dismiss_winner(false),
            Err(WheelError::NoPendingWinner)
        ));
    }

    #[test]
    fn idle_drift_wraps_and_respects_the_state_machine() {
        let mut wheel = wheel_with(&eight());

        wheel.idle_drift(1_000);
        assert!((wheel.rotation() - 30.0).abs() < 1e-12);

        wheel.idle_drift(11_500);
        assert!((wheel.rotation() - 15.0).abs() < 1e-9, "wraps past a turn");

        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);
        let during = wheel.rotation();
        wheel.idle_drift(1_000);
        assert_eq!(wheel.rotation(), during, "no drift while spinning");

        wheel.frame(6_000);
        let pending = wheel.rotation();
        wheel.idle_drift(1_000);
        assert_eq!(wheel.rotation(), pending, "no drift while a winner is up");
    }

    #[test]
    fn snapshots_round_trip_through_a_store() {
        let store = MemoryWheelStore::default();
        let id = WheelId::try_new("office-party").unwrap();

        let mut wheel = wheel_with(&[
            EntryDraft::with_ticket("Ali", "T1"),
            EntryDraft::new("Beatriz"),
        ]);
        let mut settings = wheel.settings().clone();
        settings.default_mode = RigMode::Fixed;
        wheel.set_settings(settings);

        wheel
            .save_to(&store, id.clone(), Timestamp::from_seconds(500))
            .unwrap();

        let sink = RecordingSink::new();
        let mut other = Wheel::default();
        other.register_observer(sink.clone());
        other.load_from(&store, &id).unwrap();

        assert_eq!(other.roster().len(), 2);
        assert_eq!(other.settings().default_mode, RigMode::Fixed);
        assert_eq!(
            other
                .roster()
                .maps()
                .ticket_index(&TicketId::try_new("T1").unwrap()),
            Some(0)
        );
        assert_eq!(sink.kinds(), ["roster_rebuilt", "snapshot_loaded"]);
    }

    #[test]
    fn loading_a_missing_wheel_propagates_not_found() {
        let store = MemoryWheelStore::default();
        let mut wheel = Wheel::default();
        let id = WheelId::try_new("ghost").unwrap();

        let err = wheel.load_from(&store, &id).unwrap_err();
        assert!(matches!(err, WheelError::Store(StoreError::NotFound { .. })));
    }

    #[test]
    fn restore_trusts_entries_over_stored_maps() {
        // Maps built from a different sequence than the stored entries.
        let mut stale = Roster::default();
        stale.rebuild(&drafts(&["Zoe"]));

        let mut good = Roster::default();
        good.rebuild(&[
            EntryDraft::with_ticket("Ali", "T1"),
            EntryDraft::with_ticket("Beatriz", "T2"),
        ]);

        let snapshot = WheelSnapshot {
            wheel: WheelId::try_new("main").unwrap(),
            entries: good.entries().to_vec(),
            maps: stale.maps().clone(),
            settings: WheelSettings::default(),
            saved_at: Timestamp::from_seconds(0),
        };

        let mut wheel = Wheel::default();
        wheel.restore(snapshot).unwrap();

        assert_eq!(
            wheel
                .roster()
                .maps()
                .ticket_index(&TicketId::try_new("T2").unwrap()),
            Some(1)
        );
        assert_eq!(
            wheel
                .roster()
                .maps()
                .name_index(&EntryName::try_new("Zoe").unwrap().fold()),
            None
        );
    }

    #[test]
    fn custom_tuning_paces_the_spin() {
        let settings = WheelSettings {
            tuning: SpinTuning::try_new(4_000, 3.0, 4.0, 0.0).unwrap(),
            default_mode: RigMode::Random,
        };
        let mut wheel = Wheel::new(settings);
        wheel.replace_entries(&eight()).unwrap();

        let rig = MemoryRigStore::default();
        start_spin(&mut wheel, &rig, 1);

        assert!(!wheel.frame(3_999).settled);
        assert!(wheel.frame(4_000).settled);

        let record = wheel.history().last().unwrap();
        let travel = record.rotation_end - record.rotation_start;
        assert!((3.0 * 360.0..4.0 * 360.0 + 360.0).contains(&travel));
    }
}
