//! Append-only ticket ledger
//!
//! Provides [`TicketLedger`]: the ordered record of every ticket created in
//! a session, optionally mirrored to a [`TicketStore`].

use crate::error::StoreError;
use crate::store::TicketStore;
use crate::ticket::{Ticket, TicketId, TicketKind, TicketPayload, TicketStatus, TICKET_ID_PREFIX};
use chrono::{SubsecRound, Utc};
use ulid::Ulid;

/// Ticket counts for the status indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Emergency tickets
    pub emergency: usize,
    /// General tickets
    pub general: usize,
}

impl StatusSummary {
    /// Count `tickets` by kind
    #[must_use]
    pub fn of(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut summary, ticket| {
            match ticket.kind {
                TicketKind::Emergency => summary.emergency += 1,
                TicketKind::General => summary.general += 1,
            }
            summary
        })
    }

    /// Total ticket count
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.emergency + self.general
    }
}

/// Append-only ledger, oldest ticket first
///
/// Single writer. Tickets are never updated or removed once appended.
#[derive(Debug)]
pub struct TicketLedger {
    tickets: Vec<Ticket>,
    last_id: Option<Ulid>,
    store: Option<Box<dyn TicketStore>>,
}

impl TicketLedger {
    /// Create empty in-memory ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            last_id: None,
            store: None,
        }
    }

    /// Create ledger backed by `store`, loading its snapshot first
    ///
    /// # Errors
    /// Returns error if the existing snapshot cannot be loaded. The store is
    /// not touched in that case so its contents survive.
    pub fn with_store(store: Box<dyn TicketStore>) -> Result<Self, StoreError> {
        let tickets = store.load()?;
        tracing::info!(loaded = tickets.len(), "ticket ledger opened");
        let last_id = tickets
            .iter()
            .filter_map(|t| t.id.as_str().strip_prefix(TICKET_ID_PREFIX))
            .filter_map(|suffix| Ulid::from_string(suffix).ok())
            .max();
        Ok(Self {
            tickets,
            last_id,
            store: Some(store),
        })
    }

    /// Append a new open ticket and return it
    ///
    /// The timestamp is truncated to milliseconds, the snapshot precision, so
    /// the returned ticket equals the stored one. The full ledger is written
    /// to the store afterwards. A failed write is
    /// logged; the in-memory ledger still holds the ticket.
    pub fn append(&mut self, kind: TicketKind, payload: impl Into<TicketPayload>) -> Ticket {
        let ticket = Ticket {
            id: self.next_id(),
            kind,
            created_at: Utc::now().trunc_subsecs(3),
            status: TicketStatus::Open,
            payload: payload.into(),
        };
        self.tickets.push(ticket.clone());

        match kind {
            TicketKind::Emergency => tracing::warn!(id = %ticket.id, "emergency ticket created"),
            TicketKind::General => tracing::info!(id = %ticket.id, "general ticket created"),
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.tickets) {
                tracing::error!(error = %e, "failed to persist ticket snapshot");
            }
        }

        ticket
    }

    /// Monotonic: ids created within the same millisecond, or after a
    /// reopened snapshot written by a faster clock, still sort in order
    fn next_id(&mut self) -> TicketId {
        let fresh = Ulid::new();
        let ulid = match self.last_id {
            Some(last) if fresh <= last => last.increment().unwrap_or(fresh),
            _ => fresh,
        };
        self.last_id = Some(ulid);
        TicketId::from_ulid(ulid)
    }

    /// Number of tickets of `kind`
    #[must_use]
    pub fn count(&self, kind: TicketKind) -> usize {
        self.tickets.iter().filter(|t| t.kind == kind).count()
    }

    /// All tickets, oldest first
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Lookup ticket by id
    #[must_use]
    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    /// Total ticket count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Check if ledger is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Counts per kind
    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        StatusSummary::of(&self.tickets)
    }
}

impl Default for TicketLedger {
    fn default() -> Self {
        Self::new()
    }
}
