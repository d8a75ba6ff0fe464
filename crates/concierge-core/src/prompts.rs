//! Reply texts and conversational pacing

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Texts the concierge uses
///
/// Every field can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// First bot message of a conversation
    pub greeting: String,
    /// Shown under the breadcrumb after drilling into a branch
    pub continue_choosing: String,
    /// Prefix of the resolution message
    pub selected: String,
    /// Shown under the resolution message
    pub looking_into_it: String,
    /// Follow-up after a resolution
    pub anything_else: String,
    /// User echo for "go back"
    pub go_back: String,
    /// Bot reply after going back to the top menu
    pub back_to_top: String,
    /// Shown under the breadcrumb after going back
    pub choose: String,
    /// User echo for the emergency request
    pub emergency_request: String,
    /// Bot reply opening the emergency form
    pub operator_prompt: String,
    /// Bot reply after an emergency ticket is filed
    pub emergency_confirmed: String,
    /// Shown when the form is incomplete
    pub form_incomplete: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            greeting: "Welcome!\nHow can we help you today?".into(),
            continue_choosing: "Please continue choosing.".into(),
            selected: "Selected: ".into(),
            looking_into_it: "We will look into the details for you.".into(),
            anything_else: "Is there anything else we can help with?".into(),
            go_back: "Go back".into(),
            back_to_top: "Back to the first menu.".into(),
            choose: "Please choose.".into(),
            emergency_request: "Urgent inquiry".into(),
            operator_prompt: "We are very sorry for the trouble.\n\n\
                An operator will contact you directly.\n\
                Please fill in the details below."
                .into(),
            emergency_confirmed: "Your urgent ticket has been created.\n\n\
                Our staff will contact you shortly."
                .into(),
            form_incomplete: "Please fill in every field.".into(),
        }
    }
}

impl Prompts {
    pub(crate) fn drilled(&self, breadcrumb: &str) -> String {
        format!("{breadcrumb}\n\n{}", self.continue_choosing)
    }

    pub(crate) fn resolved(&self, breadcrumb: &str) -> String {
        format!("{}{breadcrumb}\n\n{}", self.selected, self.looking_into_it)
    }

    pub(crate) fn went_back(&self, breadcrumb: &str) -> String {
        if breadcrumb.is_empty() {
            self.back_to_top.clone()
        } else {
            format!("{breadcrumb}\n\n{}", self.choose)
        }
    }
}

/// Delays before deferred bot replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Reply to a selection, emergency request or form submission
    pub reply_ms: u64,
    /// Reply to going back
    pub back_ms: u64,
    /// Follow-up after a resolution message
    pub followup_ms: u64,
    /// Greeting after a reset
    pub greeting_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reply_ms: 500,
            back_ms: 300,
            followup_ms: 1000,
            greeting_ms: 100,
        }
    }
}

impl Pacing {
    /// No delays at all
    #[inline]
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reply_ms: 0,
            back_ms: 0,
            followup_ms: 0,
            greeting_ms: 0,
        }
    }

    pub(crate) fn reply(&self) -> Duration {
        Duration::from_millis(self.reply_ms)
    }

    pub(crate) fn back(&self) -> Duration {
        Duration::from_millis(self.back_ms)
    }

    pub(crate) fn followup(&self) -> Duration {
        Duration::from_millis(self.followup_ms)
    }

    pub(crate) fn greeting(&self) -> Duration {
        Duration::from_millis(self.greeting_ms)
    }
}
