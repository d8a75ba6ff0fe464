//! Interactive chat loop
//!
//! Deferred replies fire on their own timers while the loop waits for
//! input, so a line typed before a reply lands is handled right away and
//! the queued reply still fires afterwards.

use crate::input::{FormCursor, Input};
use crate::render;
use concierge_core::{Mode, Outcome, Session};
use concierge_source::{load_tree, GridSource};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;

pub(crate) struct Chat<'a, W: Write> {
    session: Session,
    source: &'a dyn GridSource,
    out: &'a mut W,
    form: Option<FormCursor>,
    deadline: Option<Instant>,
    printed: Option<u64>,
}

impl<'a, W: Write> Chat<'a, W> {
    pub(crate) fn new(session: Session, source: &'a dyn GridSource, out: &'a mut W) -> Self {
        Self {
            session,
            source,
            out,
            form: None,
            deadline: None,
            printed: None,
        }
    }

    /// Run until `:quit` or end of input, returning the session
    ///
    /// At end of input the remaining queued replies are still delivered.
    pub(crate) async fn run<R>(mut self, input: R) -> anyhow::Result<Session>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.session.open();
        self.flush()?;
        self.show_prompt()?;

        loop {
            let Some(deadline) = self.head_deadline() else {
                match lines.next_line().await? {
                    Some(line) => {
                        if !self.handle_line(&line).await? {
                            return Ok(self.session);
                        }
                        continue;
                    }
                    None => break,
                }
            };

            if deadline <= Instant::now() {
                self.fire()?;
                continue;
            }

            tokio::select! {
                biased;
                () = tokio::time::sleep_until(deadline) => self.fire()?,
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if !self.handle_line(&line).await? {
                            return Ok(self.session);
                        }
                    }
                    None => break,
                },
            }
        }

        while let Some(delay) = self.session.next_delay() {
            tokio::time::sleep(delay).await;
            self.fire()?;
        }
        Ok(self.session)
    }

    /// Deadline of the oldest queued reply, started when it became oldest
    fn head_deadline(&mut self) -> Option<Instant> {
        let delay = self.session.next_delay()?;
        Some(*self.deadline.get_or_insert_with(|| Instant::now() + delay))
    }

    fn fire(&mut self) -> anyhow::Result<()> {
        self.deadline = None;
        self.session.fire_next();
        self.flush()?;
        if !self.session.has_pending() {
            self.show_prompt()?;
        }
        Ok(())
    }

    /// Handle one typed line; `false` means quit
    async fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
        match Input::parse(line, self.session.state().mode()) {
            Input::Choose(n) => {
                let chosen = self
                    .session
                    .menu_options()
                    .get(n - 1)
                    .map(|option| option.id.clone());
                match chosen {
                    Some(id) => {
                        self.session.select_option(&id);
                    }
                    None => writeln!(self.out, "There is no option {n}.")?,
                }
            }
            Input::FieldValue(value) => self.fill_field(value)?,
            Input::Back => {
                if self.session.go_back() == Outcome::Ignored {
                    writeln!(self.out, "Already at the first menu.")?;
                }
            }
            Input::Emergency => {
                if self.session.can_request_emergency() {
                    self.session.request_emergency();
                    self.form = Some(FormCursor::all());
                } else {
                    writeln!(self.out, "Urgent inquiries start from the first menu.")?;
                }
            }
            Input::Reset => self.restart(),
            Input::Reload => {
                let tree = load_tree(self.source).await;
                if !self.session.install_tree(tree) {
                    writeln!(self.out, "Menu unavailable, keeping the current one.")?;
                }
                self.restart();
            }
            Input::Tickets => {
                for ticket in self.session.ledger().all() {
                    writeln!(self.out, "{}", render::ticket_line(ticket))?;
                }
                writeln!(self.out, "{}", render::status(self.session.ledger().summary()))?;
            }
            Input::Help => writeln!(self.out, "{}", render::HELP)?,
            Input::Quit => return Ok(false),
            Input::Unknown(text) => {
                if !text.is_empty() {
                    writeln!(self.out, "Unrecognized input {text:?}. Type :help for commands.")?;
                }
            }
        }

        self.flush()?;
        if !self.session.has_pending() {
            self.show_prompt()?;
        }
        Ok(true)
    }

    fn fill_field(&mut self, value: String) -> std::io::Result<()> {
        let cursor = self.form.get_or_insert_with(FormCursor::all);
        let Some(field) = cursor.current() else {
            return Ok(());
        };
        self.session.update_form(field, value);
        if !cursor.advance() {
            return Ok(());
        }

        match self.session.submit_draft() {
            Ok(ticket) => {
                tracing::debug!(id = %ticket.id, "emergency form submitted");
                self.form = None;
            }
            Err(e) => {
                let notice = self.session.prompts().form_incomplete.clone();
                self.form = Some(FormCursor::only(e.missing()));
                writeln!(self.out, "{notice} ({e})")?;
            }
        }
        Ok(())
    }

    fn restart(&mut self) {
        self.session.reset();
        self.form = None;
        self.deadline = None;
    }

    /// Print transcript messages not printed yet
    fn flush(&mut self) -> std::io::Result<()> {
        let printed = self.printed;
        for message in self
            .session
            .transcript()
            .messages()
            .iter()
            .filter(|m| printed.map_or(true, |last| m.id > last))
        {
            write!(self.out, "{}", render::message(message))?;
            self.printed = Some(message.id);
        }
        self.out.flush()
    }

    fn show_prompt(&mut self) -> std::io::Result<()> {
        match self.session.state().mode() {
            Mode::EmergencyForm => {
                if let Some(field) = self.form.as_ref().and_then(FormCursor::current) {
                    write!(self.out, "{}", render::form_prompt(field))?;
                }
            }
            Mode::Browsing => write!(self.out, "{}", render::menu(&self.session))?,
        }
        self.out.flush()
    }
}
