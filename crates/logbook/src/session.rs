//! Interactive line-oriented front end.
//!
//! Each input line is one UI event (navigate, add, delete). The event is
//! applied to the [`Logbook`] and the affected fragment is re-rendered: the
//! whole month after navigation, a single day after an add or delete.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::calendar::Direction;
use crate::date::{DateKey, YearMonth};
use crate::error::{Error, Result};
use crate::logbook::Logbook;
use crate::storage::Backend;

const HELP: &str = "\
commands:
  show                 render the current month
  months               list months in range
  next | prev          move one month
  goto YYYY-MM         jump to a month
  list YYYY-MM-DD      show one day
  add YYYY-MM-DD TEXT  record a duty
  rm YYYY-MM-DD N      delete duty N of a day
  help                 this text
  quit                 leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Render the current month.
    Show,
    /// List the month selector.
    Months,
    /// Step one month.
    Step(Direction),
    /// Jump to a month.
    Goto(YearMonth),
    /// Show one day.
    List(DateKey),
    /// Record a duty; the text may still be blank.
    Add(DateKey, String),
    /// Delete the duty at a position.
    Remove(DateKey, usize),
    /// Print usage.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for SessionCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = split_word(line);
        let unknown = || Error::UnknownCommand {
            input: line.to_string(),
        };

        let command = match word {
            "show" => Self::Show,
            "months" => Self::Months,
            "next" => Self::Step(Direction::Next),
            "prev" => Self::Step(Direction::Prev),
            "goto" => Self::Goto(rest.parse()?),
            "list" => Self::List(rest.parse()?),
            "add" => {
                let (date, text) = split_word(rest);
                Self::Add(date.parse()?, text.to_string())
            }
            "rm" => {
                let (date, index) = split_word(rest);
                Self::Remove(date.parse()?, index.parse().map_err(|_| unknown())?)
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(unknown()),
        };
        Ok(command)
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Output to show.
    Render(String),
    /// Nothing changed and nothing needs redrawing.
    Unchanged,
    /// The session is over.
    Quit,
}

/// A running interactive session.
#[derive(Debug)]
pub struct Session<B> {
    logbook: Logbook<B>,
}

impl<B: Backend> Session<B> {
    /// Start a session over `logbook`.
    pub fn new(logbook: Logbook<B>) -> Self {
        Self { logbook }
    }

    /// The logbook being edited.
    #[must_use]
    pub fn logbook(&self) -> &Logbook<B> {
        &self.logbook
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns the logbook's error for a refused edit or a backend failure.
    pub fn execute(&mut self, command: SessionCommand) -> Result<Outcome> {
        debug!("Executing {:?}", command);
        let outcome = match command {
            SessionCommand::Show => self.render_month()?,
            SessionCommand::Months => Outcome::Render(
                self.logbook
                    .month_buttons()
                    .iter()
                    .map(|b| {
                        let marker = if b.active { '*' } else { ' ' };
                        format!("{marker} {}  {}", b.month, b.label)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            SessionCommand::Step(direction) => {
                if self.logbook.step_month(direction) {
                    self.render_month()?
                } else {
                    Outcome::Unchanged
                }
            }
            SessionCommand::Goto(month) => {
                if self.logbook.set_current_month(month) {
                    self.render_month()?
                } else {
                    Outcome::Unchanged
                }
            }
            SessionCommand::List(date) => self.render_day(date)?,
            // blank input never reaches the store
            SessionCommand::Add(_, text) if text.trim().is_empty() => Outcome::Unchanged,
            SessionCommand::Add(date, text) => {
                self.logbook.add_duty(date, &text)?;
                self.render_day(date)?
            }
            SessionCommand::Remove(date, index) => {
                self.logbook.remove_duty(date, index)?;
                self.render_day(date)?
            }
            SessionCommand::Help => Outcome::Render(HELP.to_string()),
            SessionCommand::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    /// Read commands from `input` until EOF or `quit`, writing renders to
    /// `output`.
    ///
    /// Refused commands are reported on `output` and the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or a backend failure.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        if let Outcome::Render(text) = self.render_month()? {
            writeln!(output, "{text}")?;
        }

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let result = line
                .parse::<SessionCommand>()
                .and_then(|command| self.execute(command));
            match result {
                Ok(Outcome::Render(text)) => writeln!(output, "{text}")?,
                Ok(Outcome::Unchanged) => {}
                Ok(Outcome::Quit) => break,
                Err(e) if e.is_user_error() => {
                    warn!("{}", e);
                    writeln!(output, "error: {e}")?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn render_month(&self) -> Result<Outcome> {
        Ok(Outcome::Render(self.logbook.render_month()?.to_string()))
    }

    fn render_day(&self, date: DateKey) -> Result<Outcome> {
        Ok(Outcome::Render(self.logbook.render_day(date)?.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DisplayRange;
    use crate::duties::DutyStore;
    use crate::logging::init_test_logging;
    use crate::storage::MemoryBackend;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn session() -> Session<MemoryBackend> {
        init_test_logging();
        let range = DisplayRange::new(key("2025-10-06"), key("2026-04-10")).unwrap();
        Session::new(Logbook::new(range, DutyStore::new(MemoryBackend::new())))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("show".parse::<SessionCommand>().unwrap(), SessionCommand::Show);
        assert_eq!(
            "  next ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Step(Direction::Next)
        );
        assert_eq!(
            "goto 2026-01".parse::<SessionCommand>().unwrap(),
            SessionCommand::Goto(YearMonth::new(2026, 1).unwrap())
        );
        assert_eq!(
            "add 2025-10-06   Met supervisor today".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add(key("2025-10-06"), "Met supervisor today".to_string())
        );
        assert_eq!(
            "rm 2025-10-06 2".parse::<SessionCommand>().unwrap(),
            SessionCommand::Remove(key("2025-10-06"), 2)
        );
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "jump".parse::<SessionCommand>(),
            Err(Error::UnknownCommand { .. })
        ));
        assert!(matches!(
            "rm 2025-10-06 first".parse::<SessionCommand>(),
            Err(Error::UnknownCommand { .. })
        ));
        assert!(matches!(
            "add 2025-10-6 x".parse::<SessionCommand>(),
            Err(Error::InvalidDate { .. })
        ));
        assert!(matches!(
            "goto 2026".parse::<SessionCommand>(),
            Err(Error::InvalidMonth { .. })
        ));
    }

    #[test]
    fn test_blank_add_is_a_no_op() {
        let mut session = session();
        let outcome = session
            .execute(SessionCommand::Add(key("2025-10-06"), "   ".to_string()))
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);

        let store = session.logbook.into_store();
        assert_eq!(store.into_backend().unwrap().writes(), 0);
    }

    #[test]
    fn test_add_renders_day() {
        let mut session = session();
        let outcome = session
            .execute(SessionCommand::Add(key("2025-10-06"), "Orientation".to_string()))
            .unwrap();
        let Outcome::Render(text) = outcome else {
            panic!("expected a render");
        };
        assert!(text.contains("Oct 6, 2025"));
        assert!(text.contains("[0] Orientation"));
    }

    #[test]
    fn test_navigation_past_bounds_is_unchanged() {
        let mut session = session();
        assert_eq!(
            session.execute(SessionCommand::Step(Direction::Prev)).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            session
                .execute(SessionCommand::Goto(YearMonth::new(2026, 5).unwrap()))
                .unwrap(),
            Outcome::Unchanged
        );
        assert!(matches!(
            session.execute(SessionCommand::Step(Direction::Next)).unwrap(),
            Outcome::Render(text) if text.contains("November 2025")
        ));
    }

    #[test]
    fn test_run_script() {
        let mut session = session();
        let script = "\
add 2025-10-06 Orientation
add 2025-10-06 Setup laptop
rm 2025-10-06 0
rm 2025-10-06 5
add 2025-09-01 too early
bogus
next
quit
add 2025-10-07 never reached
";
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("  October 2025 >"));
        assert!(out.contains("error: no duty at index 5"));
        assert!(out.contains("error: 2025-09-01 is outside the logbook range"));
        assert!(out.contains("error: unknown command 'bogus'"));
        assert!(out.contains("November 2025"));

        let book = session.logbook();
        assert_eq!(book.list(key("2025-10-06")).unwrap(), vec!["Setup laptop"]);
        assert!(book.list(key("2025-10-07")).unwrap().is_empty());
    }
}
