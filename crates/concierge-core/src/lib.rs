//! Concierge Core
//!
//! Navigation state machine for the spreadsheet-driven concierge menu.
//!
//! A [`Session`] walks a [`Tree`](concierge_tree::Tree) one selection at a
//! time, keeps the breadcrumb, and files tickets into a
//! [`TicketLedger`](concierge_ledger::TicketLedger) when the user reaches a
//! leaf or submits the emergency form.
//!
//! # Example
//!
//! ```rust
//! use concierge_core::{Outcome, Pacing, Session};
//! use concierge_ledger::{TicketKind, TicketLedger};
//! use concierge_tree::default_tree;
//!
//! let mut session = Session::new(default_tree(), TicketLedger::new())
//!     .with_pacing(Pacing::instant());
//! session.open();
//!
//! assert!(matches!(session.select_option("B"), Outcome::Drilled { .. }));
//! assert!(matches!(session.select_option("B.1"), Outcome::Resolved { .. }));
//! session.settle();
//!
//! assert!(session.state().is_at_root());
//! assert_eq!(session.ledger().count(TicketKind::General), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod form;
pub mod menu;
pub mod prompts;
pub mod session;
pub mod state;
pub mod transcript;

// Re-exports
pub use error::ValidationError;
pub use form::{EmergencyForm, FormField};
pub use menu::{breadcrumb, breadcrumb_line, menu_options, MenuOption, BREADCRUMB_SEPARATOR};
pub use prompts::{Pacing, Prompts};
pub use session::{Outcome, PendingStep, Session, StepAction};
pub use state::{Mode, NavigationState, Phase};
pub use transcript::{Message, Role, Transcript};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a session
    pub use crate::{
        EmergencyForm, FormField, MenuOption, Mode, Outcome, Pacing, Phase, Session,
        ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
