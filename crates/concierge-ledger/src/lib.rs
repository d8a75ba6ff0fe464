//! Concierge Ledger
//!
//! Append-only record of completed interactions.
//!
//! # Overview
//!
//! - **Ticket**: immutable general or emergency record
//! - **TicketLedger**: ordered, append-only ledger with per-kind counts
//! - **TicketStore**: durable mirror, rewritten in full on every append
//!
//! # Example
//!
//! ```rust
//! use concierge_ledger::{GeneralPayload, TicketKind, TicketLedger};
//!
//! let mut ledger = TicketLedger::new();
//! let ticket = ledger.append(TicketKind::General, GeneralPayload::new(&["A", "1"], "A.1"));
//!
//! assert_eq!(ledger.count(TicketKind::General), 1);
//! assert_eq!(ledger.all()[0].id, ticket.id);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod ledger;
pub mod store;
pub mod ticket;

// Re-exports
pub use error::StoreError;
pub use ledger::{StatusSummary, TicketLedger};
pub use store::{JsonFileStore, MemoryStore, TicketStore, STORAGE_KEY};
pub use ticket::{
    EmergencyContact, GeneralPayload, Ticket, TicketId, TicketKind, TicketPayload, TicketStatus,
    TICKET_ID_PREFIX,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
