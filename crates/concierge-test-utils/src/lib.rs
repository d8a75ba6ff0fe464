//! Testing utilities for the concierge workspace
//!
//! Shared grids, trees, sessions and forms.

#![allow(missing_docs)]

use concierge_core::{EmergencyForm, Pacing, Session};
use concierge_ledger::{MemoryStore, TicketLedger};
use concierge_tree::{parse, Tree};

/// Build an owned grid from string literals
pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

/// A small salon menu, three levels deep
///
/// ```text
/// Booking
///   Change date
///   Cancel
///     Same day
///     Other day
/// Payment
///   Receipt
/// Stores
/// ```
pub fn salon_grid() -> Vec<Vec<String>> {
    grid(&[
        &["Booking"],
        &["", "Change date"],
        &["", "Cancel"],
        &["", "", "Same day"],
        &["", "", "Other day"],
        &["Payment"],
        &["", "Receipt"],
        &["Stores"],
    ])
}

pub fn salon_tree() -> Tree {
    parse(&salon_grid())
}

/// Session without reply delays, mirrored into an in-memory store
pub fn instant_session(tree: Tree) -> (Session, MemoryStore) {
    let store = MemoryStore::new();
    let ledger = match TicketLedger::with_store(Box::new(store.clone())) {
        Ok(ledger) => ledger,
        Err(e) => panic!("memory store cannot fail to load: {e}"),
    };
    let session = Session::new(tree, ledger).with_pacing(Pacing::instant());
    (session, store)
}

pub fn complete_form() -> EmergencyForm {
    EmergencyForm::new(
        "Hanako Sato",
        "hanako@example.com",
        "Shibuya",
        "The salon is closed at my booking time",
    )
}
