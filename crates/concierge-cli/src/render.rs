//! Plain-text rendering of session views

use concierge_core::{FormField, Message, Phase, Role, Session, BREADCRUMB_SEPARATOR};
use concierge_ledger::{StatusSummary, Ticket, TicketPayload};
use std::fmt::Write as _;

pub(crate) const HELP: &str = "\
Type the number of an option to choose it.
Commands:
  :back       go up one level
  :emergency  open the urgent inquiry form
  :reset      start the conversation over
  :reload     fetch the menu again and start over
  :tickets    list tickets filed so far
  :quit       leave";

/// One transcript message, every line prefixed with its author
pub(crate) fn message(message: &Message) -> String {
    let prefix = match message.role {
        Role::Bot => "concierge> ",
        Role::User => "you> ",
    };
    let mut out = String::new();
    for line in message.text.lines() {
        let _ = writeln!(out, "{prefix}{line}");
    }
    out
}

/// Breadcrumb, numbered options, available commands and ticket status
pub(crate) fn menu(session: &Session) -> String {
    let mut out = String::new();

    if let Phase::AtNode(_) = session.phase() {
        let _ = writeln!(out, "[{}]", session.breadcrumb().join(BREADCRUMB_SEPARATOR));
    }

    for (i, option) in session.menu_options().iter().enumerate() {
        let marker = if option.has_children { " >" } else { "" };
        let _ = writeln!(out, "  {}) {}{marker}", i + 1, option.value);
    }

    let mut hints = Vec::new();
    if session.can_go_back() {
        hints.push(format!(":back {}", session.prompts().go_back));
    }
    if session.can_request_emergency() {
        hints.push(format!(":emergency {}", session.prompts().emergency_request));
    }
    if !hints.is_empty() {
        let _ = writeln!(out, "  ({})", hints.join(" | "));
    }

    if let Some(summary) = session.status() {
        let _ = writeln!(out, "{}", status(summary));
    }
    out
}

/// Ticket counter line
pub(crate) fn status(summary: StatusSummary) -> String {
    format!(
        "tickets: {} urgent, {} general",
        summary.emergency, summary.general
    )
}

/// Prompt for one form field
pub(crate) fn form_prompt(field: FormField) -> String {
    let label = match field {
        FormField::Name => "Name",
        FormField::Email => "Email",
        FormField::Store => "Store",
        FormField::Situation => "Situation",
    };
    format!("{label}: ")
}

/// One-line ticket listing
pub(crate) fn ticket_line(ticket: &Ticket) -> String {
    let detail = match &ticket.payload {
        TicketPayload::General(general) => general.path.clone(),
        TicketPayload::Emergency(contact) => {
            format!("{} <{}> @ {}", contact.name, contact.email, contact.store)
        }
        TicketPayload::Other(value) => value.to_string(),
    };
    format!(
        "{}  {:<9}  {}  {}",
        ticket.id,
        ticket.kind.to_string(),
        ticket.created_at.format("%Y-%m-%d %H:%M:%S"),
        detail
    )
}
