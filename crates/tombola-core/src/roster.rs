//! Canonical entry order and the identity maps derived from it.
//!
//! Invariants:
//! - Slice assignment is positional: slice i shows the entry at position i.
//! - The maps are derived state, rebuilt wholesale on every change; they
//!   never merge with a previous sequence.
//! - A ticket maps only when it differs from its entry's display name, so a
//!   name is never silently treated as its own ticket.
//! - Duplicate display names are allowed; they never serve as a removal or
//!   rig key unless provably unique in the current list.

use crate::identity::{EntryName, NameKey, TicketId};
use derive_more::Deref;
use rand_chacha::rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// RosterError
///

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("no entry holds ticket '{ticket}'")]
    TicketNotFound { ticket: TicketId },

    #[error("no entry is named '{name}'")]
    NameNotFound { name: EntryName },

    #[error("cannot remove by name: '{name}' appears {count} times")]
    AmbiguousName { name: EntryName, count: usize },
}

///
/// EntryDraft
///
/// One line of raw input, as an import or paste hands it over. Validation
/// happens in [`Roster::rebuild`]; blank names are dropped there, blank
/// tickets become `None`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub display_name: String,
    pub ticket_number: Option<String>,
}

impl EntryDraft {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ticket_number: None,
        }
    }

    #[must_use]
    pub fn with_ticket(display_name: impl Into<String>, ticket: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ticket_number: Some(ticket.into()),
        }
    }
}

///
/// Entry
///
/// One validated raffle participant. `source_index` is the position the
/// entry held when the maps were last built.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: EntryName,
    pub ticket: Option<TicketId>,
    pub source_index: usize,
}

///
/// IdentityMaps
///
/// The four derived mappings over the current entry sequence. Name keys are
/// case-folded; duplicate keys resolve last-wins. A ticket appears only when
/// it differs from its entry's display name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct IdentityMaps {
    name_to_ticket: BTreeMap<NameKey, TicketId>,
    ticket_to_name: BTreeMap<TicketId, EntryName>,
    name_to_index: BTreeMap<NameKey, usize>,
    ticket_to_index: BTreeMap<TicketId, usize>,
}

impl IdentityMaps {
    fn build(entries: &[Entry]) -> Self {
        let mut maps = Self::default();

        for (index, entry) in entries.iter().enumerate() {
            let key = entry.name.fold();
            maps.name_to_index.insert(key.clone(), index);

            if let Some(ticket) = entry.ticket.as_ref()
                && ticket.as_str() != entry.name.as_str()
            {
                maps.name_to_ticket.insert(key, ticket.clone());
                maps.ticket_to_name.insert(ticket.clone(), entry.name.clone());
                maps.ticket_to_index.insert(ticket.clone(), index);
            }
        }

        maps
    }

    #[must_use]
    pub fn ticket_index(&self, ticket: &TicketId) -> Option<usize> {
        self.ticket_to_index.get(ticket).copied()
    }

    #[must_use]
    pub fn name_index(&self, key: &NameKey) -> Option<usize> {
        self.name_to_index.get(key).copied()
    }

    #[must_use]
    pub fn ticket_for_name(&self, key: &NameKey) -> Option<&TicketId> {
        self.name_to_ticket.get(key)
    }

    #[must_use]
    pub fn name_for_ticket(&self, ticket: &TicketId) -> Option<&EntryName> {
        self.ticket_to_name.get(ticket)
    }
}

///
/// IdentityResolution
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdentityResolution {
    Resolved(usize),
    Ambiguous { name: EntryName, count: usize },
    NotFound,
}

///
/// Roster
///

#[derive(Clone, Debug, Default, Deref)]
pub struct Roster {
    #[deref]
    entries: Vec<Entry>,
    maps: IdentityMaps,
}

impl Roster {
    /// Rebuild from stored entries. Order is authoritative; positions and
    /// maps are derived from it, whatever the entries used to claim.
    #[must_use]
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.source_index = index;
        }
        let maps = IdentityMaps::build(&entries);

        Self { entries, maps }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub const fn maps(&self) -> &IdentityMaps {
        &self.maps
    }

    /// Replace the whole sequence. Drafts with a blank name are dropped;
    /// blank tickets become `None`. Never merges with the previous sequence.
    pub fn rebuild(&mut self, drafts: &[EntryDraft]) {
        self.entries.clear();

        for draft in drafts {
            let Ok(name) = EntryName::try_new(&draft.display_name) else {
                continue;
            };
            let ticket = draft
                .ticket_number
                .as_deref()
                .and_then(|t| TicketId::try_new(t).ok());
            let source_index = self.entries.len();

            self.entries.push(Entry {
                name,
                ticket,
                source_index,
            });
        }

        self.maps = IdentityMaps::build(&self.entries);
    }

    /// Remove the entry holding `ticket`. Tickets never match display
    /// names; a miss on the entries themselves falls back to the ticket
    /// index map, and a miss there refuses without touching anything.
    pub fn remove_by_ticket(&mut self, ticket: &TicketId) -> Result<Entry, RosterError> {
        if let Some(position) = self
            .entries
            .iter()
            .position(|e| e.ticket.as_ref() == Some(ticket))
        {
            return Ok(self.take(position));
        }

        if let Some(index) = self.maps.ticket_index(ticket)
            && index < self.entries.len()
        {
            return Ok(self.take(index));
        }

        Err(RosterError::TicketNotFound {
            ticket: ticket.clone(),
        })
    }

    /// Remove by display name, allowed only when the name is provably
    /// unique. Ticket-suffixed renderings of one identity (`"Sam (12)"`)
    /// count together, so two of those refuse as ambiguous.
    pub fn remove_by_name(&mut self, name: &EntryName) -> Result<Entry, RosterError> {
        let base = name.fold().base();
        let matches: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name.fold().base() == base)
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [] => Err(RosterError::NameNotFound { name: name.clone() }),
            [index] => Ok(self.take(*index)),
            _ => Err(RosterError::AmbiguousName {
                name: name.clone(),
                count: matches.len(),
            }),
        }
    }

    /// Remove a settled winner. The ticket is authoritative whenever the
    /// winner has one; name removal is the no-ticket path only.
    pub fn remove_winner(
        &mut self,
        name: &EntryName,
        ticket: Option<&TicketId>,
    ) -> Result<Entry, RosterError> {
        match ticket {
            Some(ticket) => self.remove_by_ticket(ticket),
            None => self.remove_by_name(name),
        }
    }

    /// Resolve a target descriptor against the current sequence.
    ///
    /// Tiers, first match wins:
    /// (a) exact ticket via the ticket index map;
    /// (b) ticket plus name matched together on the raw entries, for
    ///     tickets the maps skip because they equal the display name;
    /// (c) with no ticket on the target, a display name that occurs
    ///     exactly once.
    /// A supplied ticket that misses never degrades to name-only matching.
    #[must_use]
    pub fn resolve(
        &self,
        ticket: Option<&TicketId>,
        name: Option<&EntryName>,
    ) -> IdentityResolution {
        if let Some(ticket) = ticket {
            if let Some(index) = self.maps.ticket_index(ticket) {
                return IdentityResolution::Resolved(index);
            }

            if let Some(name) = name
                && let Some(index) = self.entries.iter().position(|e| {
                    e.ticket.as_ref() == Some(ticket) && e.name.fold() == name.fold()
                })
            {
                return IdentityResolution::Resolved(index);
            }

            return IdentityResolution::NotFound;
        }

        let Some(name) = name else {
            return IdentityResolution::NotFound;
        };

        let key = name.fold();
        let count = self.entries.iter().filter(|e| e.name.fold() == key).count();
        match count {
            0 => IdentityResolution::NotFound,
            1 => self
                .maps
                .name_index(&key)
                .map_or(IdentityResolution::NotFound, IdentityResolution::Resolved),
            _ => IdentityResolution::Ambiguous {
                name: name.clone(),
                count,
            },
        }
    }

    /// Fisher-Yates over the current order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn shuffle(&mut self, rng: &mut impl RngCore) {
        for i in (1..self.entries.len()).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            self.entries.swap(i, j);
        }

        self.reindex();
    }

    /// Stable sort by case-folded name.
    pub fn sort_by_name(&mut self) {
        self.entries.sort_by(|a, b| a.name.fold().cmp(&b.name.fold()));
        self.reindex();
    }

    fn take(&mut self, index: usize) -> Entry {
        let removed = self.entries.remove(index);
        self.reindex();

        removed
    }

    fn reindex(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.source_index = index;
        }
        self.maps = IdentityMaps::build(&self.entries);
    }
}

///
/// TESTS
///
