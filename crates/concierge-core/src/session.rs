//! Chat session: the navigation state machine
//!
//! A [`Session`] owns the tree, the navigation state, the ticket ledger and
//! the transcript. Every user action is one synchronous transition:
//!
//! ```text
//!                 select(branch)          select(leaf) ─► general ticket
//!   ┌────────┐ ─────────────────► ┌────────────┐ ──► reply ──► reply + clear path
//!   │ AtRoot │ ◄───────────────── │ AtNode(p)  │
//!   └────────┘   go_back (len 1)  └────────────┘
//!       │ request_emergency
//!       ▼
//!   ┌───────────────┐ submit(ok) ─► emergency ticket ──► reply + clear path
//!   │ EmergencyForm │ submit(missing fields) ─► stays, no ticket
//!   └───────────────┘
//! ```
//!
//! Bot replies are not written directly. Transitions enqueue
//! [`PendingStep`]s with a delay; the host fires them in FIFO order with
//! [`Session::fire_next`] (after sleeping [`Session::next_delay`]) or all at
//! once with [`Session::settle`]. A later action never cancels steps that
//! are still queued, so a pending "clear path" from a resolution can land
//! after a newer selection.

use crate::error::ValidationError;
use crate::form::{EmergencyForm, FormField};
use crate::menu::{breadcrumb, menu_options, MenuOption, BREADCRUMB_SEPARATOR};
use crate::prompts::{Pacing, Prompts};
use crate::state::{Mode, NavigationState, Phase};
use crate::transcript::{Message, Role, Transcript};
use concierge_ledger::{GeneralPayload, StatusSummary, Ticket, TicketKind, TicketLedger};
use concierge_tree::{split_id, Tree};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing happened (unknown node, or back at the top menu)
    Ignored,
    /// Moved below a node that has children
    Drilled {
        /// Selected node
        node_id: String,
    },
    /// Leaf reached and a general ticket filed
    Resolved {
        /// Filed ticket
        ticket: Ticket,
    },
    /// Moved one level up
    WentBack,
    /// Emergency form opened
    EmergencyRequested,
    /// Emergency ticket filed
    Submitted {
        /// Filed ticket
        ticket: Ticket,
    },
    /// Session cleared
    Reset,
}

/// What a deferred step does when it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Post a bot message
    Say(String),
    /// Post a bot message, then clear the path
    SayAndReturnToRoot(String),
}

/// Bot reply scheduled by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStep {
    /// Delay after the previous step
    pub delay: Duration,
    /// Effect when fired
    pub action: StepAction,
}

/// Single-user concierge session
#[derive(Debug)]
pub struct Session {
    tree: Tree,
    state: NavigationState,
    ledger: TicketLedger,
    transcript: Transcript,
    pending: VecDeque<PendingStep>,
    prompts: Prompts,
    pacing: Pacing,
}

impl Session {
    /// Create session over `tree`, filing tickets into `ledger`
    #[must_use]
    pub fn new(tree: Tree, ledger: TicketLedger) -> Self {
        Self {
            tree,
            state: NavigationState::new(),
            ledger,
            transcript: Transcript::new(),
            pending: VecDeque::new(),
            prompts: Prompts::default(),
            pacing: Pacing::default(),
        }
    }

    /// With custom reply texts
    #[inline]
    #[must_use]
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// With custom reply delays
    #[inline]
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Greet the user if the conversation has not started yet
    pub fn open(&mut self) {
        if self.transcript.is_empty() && self.pending.is_empty() {
            self.transcript.push(Role::Bot, self.prompts.greeting.clone());
        }
    }

    /// Select the option with id `node_id`
    ///
    /// Unknown ids are ignored. A node with children becomes the current
    /// position. A leaf files a general ticket, then two deferred replies
    /// follow: the resolution message, and a follow-up that returns to the
    /// top menu.
    pub fn select_option(&mut self, node_id: &str) -> Outcome {
        let Some(node) = self.tree.get(node_id) else {
            tracing::debug!(node_id, "ignoring selection of unknown node");
            return Outcome::Ignored;
        };
        let is_leaf = node.is_leaf();
        self.transcript.push(Role::User, node.value.clone());

        self.state.path = split_id(node_id);
        self.state.mode = Mode::Browsing;
        let crumb = self.breadcrumb();
        let crumb_line = crumb.join(BREADCRUMB_SEPARATOR);

        if !is_leaf {
            tracing::debug!(node_id, depth = self.state.depth(), "drilled into branch");
            self.schedule(self.pacing.reply(), StepAction::Say(self.prompts.drilled(&crumb_line)));
            return Outcome::Drilled {
                node_id: node_id.to_string(),
            };
        }

        let ticket = self
            .ledger
            .append(TicketKind::General, GeneralPayload::new(&crumb, node_id));
        self.schedule(self.pacing.reply(), StepAction::Say(self.prompts.resolved(&crumb_line)));
        self.schedule(
            self.pacing.followup(),
            StepAction::SayAndReturnToRoot(self.prompts.anything_else.clone()),
        );
        Outcome::Resolved { ticket }
    }

    /// Move one level up; no-op at the top menu
    pub fn go_back(&mut self) -> Outcome {
        if self.state.path.pop().is_none() {
            return Outcome::Ignored;
        }
        self.transcript.push(Role::User, self.prompts.go_back.clone());

        let crumb_line = self.breadcrumb().join(BREADCRUMB_SEPARATOR);
        self.schedule(self.pacing.back(), StepAction::Say(self.prompts.went_back(&crumb_line)));
        Outcome::WentBack
    }

    /// Open the emergency form
    ///
    /// Meant for the top menu, but accepted from anywhere.
    pub fn request_emergency(&mut self) -> Outcome {
        self.transcript
            .push(Role::User, self.prompts.emergency_request.clone());
        self.state.mode = Mode::EmergencyForm;
        self.schedule(
            self.pacing.reply(),
            StepAction::Say(self.prompts.operator_prompt.clone()),
        );
        Outcome::EmergencyRequested
    }

    /// Edit one field of the form draft
    pub fn update_form(&mut self, field: FormField, value: impl Into<String>) {
        self.state.form.set(field, value);
    }

    /// Submit `form` as an emergency ticket
    ///
    /// On success the draft is cleared, the view returns to browsing and a
    /// deferred confirmation returns to the top menu.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingFields`] if any field is empty. The
    /// submitted values are kept as the draft and no ticket is filed.
    pub fn submit_emergency_form(&mut self, form: EmergencyForm) -> Result<Ticket, ValidationError> {
        let contact = match form.validate() {
            Ok(contact) => contact,
            Err(e) => {
                tracing::debug!(error = %e, "emergency form rejected");
                self.state.form = form;
                return Err(e);
            }
        };

        self.transcript.push(Role::User, form_summary(&form));
        let ticket = self.ledger.append(TicketKind::Emergency, contact);

        self.state.form = EmergencyForm::default();
        self.state.mode = Mode::Browsing;
        self.schedule(
            self.pacing.reply(),
            StepAction::SayAndReturnToRoot(self.prompts.emergency_confirmed.clone()),
        );
        Ok(ticket)
    }

    /// Submit the current draft
    ///
    /// # Errors
    /// See [`Session::submit_emergency_form`]
    pub fn submit_draft(&mut self) -> Result<Ticket, ValidationError> {
        let form = self.state.form.clone();
        self.submit_emergency_form(form)
    }

    /// Clear path, form, transcript and queued replies, then greet again
    pub fn reset(&mut self) -> Outcome {
        self.transcript.clear();
        self.pending.clear();
        self.state.clear();
        self.schedule(
            self.pacing.greeting(),
            StepAction::Say(self.prompts.greeting.clone()),
        );
        Outcome::Reset
    }

    /// Replace the tree wholesale
    ///
    /// A tree without roots is rejected and the current tree kept. Returns
    /// whether the tree was installed.
    pub fn install_tree(&mut self, tree: Tree) -> bool {
        if !tree.has_roots() {
            tracing::warn!("keeping current tree, replacement has no roots");
            return false;
        }
        tracing::info!(nodes = tree.len(), roots = tree.roots().len(), "tree installed");
        self.tree = tree;
        true
    }

    // ------------------------------------------------------------------
    // Deferred steps
    // ------------------------------------------------------------------

    fn schedule(&mut self, delay: Duration, action: StepAction) {
        self.pending.push_back(PendingStep { delay, action });
    }

    /// Delay before the oldest queued step, if any
    #[inline]
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        self.pending.front().map(|step| step.delay)
    }

    /// Queued steps, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &PendingStep> {
        self.pending.iter()
    }

    /// Check if replies are still queued
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Fire the oldest queued step, returning the posted message
    pub fn fire_next(&mut self) -> Option<Message> {
        let step = self.pending.pop_front()?;
        let message = match step.action {
            StepAction::Say(text) => self.transcript.push(Role::Bot, text),
            StepAction::SayAndReturnToRoot(text) => {
                let message = self.transcript.push(Role::Bot, text);
                self.state.path.clear();
                message
            }
        };
        Some(message)
    }

    /// Fire every queued step in order, returning the posted messages
    pub fn settle(&mut self) -> Vec<Message> {
        std::iter::from_fn(|| self.fire_next()).collect()
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Navigation state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase<'_> {
        self.state.phase()
    }

    /// Current tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Ticket ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    /// Conversation so far
    #[inline]
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Reply texts in use
    #[inline]
    #[must_use]
    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// Display labels of the current path
    #[must_use]
    pub fn breadcrumb(&self) -> Vec<String> {
        breadcrumb(&self.tree, &self.state.path)
    }

    /// Options to offer now; none while the emergency form is shown
    #[must_use]
    pub fn menu_options(&self) -> Vec<MenuOption> {
        match self.state.mode {
            Mode::EmergencyForm => Vec::new(),
            Mode::Browsing => menu_options(&self.tree, &self.state.path),
        }
    }

    /// Whether a "go back" control should be offered
    #[inline]
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        matches!(self.phase(), Phase::AtNode(_))
    }

    /// Whether the emergency entry point should be offered
    #[inline]
    #[must_use]
    pub fn can_request_emergency(&self) -> bool {
        matches!(self.phase(), Phase::AtRoot)
    }

    /// Ticket counts; `None` while the ledger is empty
    #[must_use]
    pub fn status(&self) -> Option<StatusSummary> {
        (!self.ledger.is_empty()).then(|| self.ledger.summary())
    }
}

fn form_summary(form: &EmergencyForm) -> String {
    FormField::ALL
        .into_iter()
        .map(|field| format!("{}: {}", capitalize(&field.to_string()), form.get(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
