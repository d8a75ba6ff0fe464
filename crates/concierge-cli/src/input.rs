//! Interpretation of typed lines

use concierge_core::{FormField, Mode};

/// One typed line, interpreted for the current mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    /// Pick the n-th listed option (1-based)
    Choose(usize),
    /// Value for the form field being asked
    FieldValue(String),
    /// `:back`
    Back,
    /// `:emergency`
    Emergency,
    /// `:reset`
    Reset,
    /// `:reload`
    Reload,
    /// `:tickets`
    Tickets,
    /// `:help`
    Help,
    /// `:quit`
    Quit,
    /// Anything else
    Unknown(String),
}

impl Input {
    /// Interpret `line` typed while the session is in `mode`
    ///
    /// Commands start with `:` and work in every mode. In form mode any
    /// other line is a field value, kept verbatim.
    pub(crate) fn parse(line: &str, mode: Mode) -> Self {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix(':') {
            return match command.to_ascii_lowercase().as_str() {
                "b" | "back" => Self::Back,
                "e" | "emergency" => Self::Emergency,
                "r" | "reset" => Self::Reset,
                "reload" => Self::Reload,
                "t" | "tickets" => Self::Tickets,
                "h" | "help" => Self::Help,
                "q" | "quit" | "exit" => Self::Quit,
                _ => Self::Unknown(trimmed.to_string()),
            };
        }

        match mode {
            Mode::EmergencyForm => Self::FieldValue(line.trim_end_matches(['\r', '\n']).to_string()),
            Mode::Browsing => match trimmed.parse::<usize>() {
                Ok(n) if n > 0 => Self::Choose(n),
                _ => Self::Unknown(trimmed.to_string()),
            },
        }
    }
}

/// Cursor over the form fields still to be asked
#[derive(Debug, Clone, Default)]
pub(crate) struct FormCursor {
    queue: Vec<FormField>,
}

impl FormCursor {
    /// Ask every field in form order
    pub(crate) fn all() -> Self {
        Self {
            queue: FormField::ALL.to_vec(),
        }
    }

    /// Ask only `fields`, in order
    pub(crate) fn only(fields: &[FormField]) -> Self {
        Self {
            queue: fields.to_vec(),
        }
    }

    /// Field currently being asked
    pub(crate) fn current(&self) -> Option<FormField> {
        self.queue.first().copied()
    }

    /// Move past the current field; `true` once every field was answered
    pub(crate) fn advance(&mut self) -> bool {
        if !self.queue.is_empty() {
            self.queue.remove(0);
        }
        self.queue.is_empty()
    }
}
