//! The logbook context.
//!
//! [`Logbook`] owns the month cursor and the duty store for one session and
//! is the only object a front end needs. Commands are synchronous; after
//! each one the caller re-renders whatever it shows.

use tracing::{debug, info};

use crate::calendar::{Direction, DisplayRange, RangeController};
use crate::config::Config;
use crate::date::{DateKey, YearMonth};
use crate::duties::DutyStore;
use crate::error::{Error, Result};
use crate::storage::{Backend, SqliteBackend};
use crate::view::{DayEntry, MonthButton, MonthView};

/// Month cursor plus duty store for one session.
#[derive(Debug)]
pub struct Logbook<B> {
    controller: RangeController,
    store: DutyStore<B>,
}

impl Logbook<SqliteBackend> {
    /// Open the logbook described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured range is invalid or the database
    /// cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let range = config.display_range()?;
        let backend = SqliteBackend::open(config.database_path())?;
        let store = DutyStore::with_key(backend, config.storage.key.clone());
        info!(
            "Logbook {} .. {} opened with record {}",
            range.start(),
            range.end(),
            store.key()
        );
        Ok(Self::new(range, store))
    }
}

impl<B: Backend> Logbook<B> {
    /// Create a session over `store`, positioned on the range's first month.
    pub fn new(range: DisplayRange, store: DutyStore<B>) -> Self {
        Self {
            controller: RangeController::new(range),
            store,
        }
    }

    /// The display range.
    #[must_use]
    pub fn range(&self) -> &DisplayRange {
        self.controller.range()
    }

    /// The month cursor.
    #[must_use]
    pub fn controller(&self) -> &RangeController {
        &self.controller
    }

    /// The duty store.
    #[must_use]
    pub fn store(&self) -> &DutyStore<B> {
        &self.store
    }

    /// Consume the session, returning its store.
    pub fn into_store(self) -> DutyStore<B> {
        self.store
    }

    /// The month currently displayed.
    #[must_use]
    pub fn current_month(&self) -> YearMonth {
        self.controller.current_month()
    }

    /// Whether `month` can be displayed.
    #[must_use]
    pub fn can_navigate_to(&self, month: YearMonth) -> bool {
        self.controller.can_navigate_to(month)
    }

    /// Jump to `month`; ignored if outside the range. Returns whether it moved.
    pub fn set_current_month(&mut self, month: YearMonth) -> bool {
        self.controller.set_current_month(month)
    }

    /// Step one month; ignored at the range boundary. Returns whether it moved.
    pub fn step_month(&mut self, direction: Direction) -> bool {
        self.controller.step_month(direction)
    }

    /// Whether the previous-month control should be disabled.
    #[must_use]
    pub fn is_at_lower_bound(&self) -> bool {
        self.controller.is_at_lower_bound()
    }

    /// Whether the next-month control should be disabled.
    #[must_use]
    pub fn is_at_upper_bound(&self) -> bool {
        self.controller.is_at_upper_bound()
    }

    /// Duties recorded for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn list(&self, date: DateKey) -> Result<Vec<String>> {
        self.store.list(date)
    }

    /// Record a duty for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for days the logbook doesn't show,
    /// [`Error::Validation`] for blank text, or a backend error.
    pub fn add_duty(&self, date: DateKey, text: &str) -> Result<()> {
        self.ensure_in_range(date)?;
        self.store.append(date, text)
    }

    /// Delete the duty at `index` of `date`'s current list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for days the logbook doesn't show,
    /// [`Error::IndexOutOfRange`] for a bad position, or a backend error.
    pub fn remove_duty(&self, date: DateKey, index: usize) -> Result<String> {
        self.ensure_in_range(date)?;
        self.store.remove_at(date, index)
    }

    /// Month selector buttons with the current month marked active.
    #[must_use]
    pub fn month_buttons(&self) -> Vec<MonthButton> {
        let current = self.current_month();
        self.controller
            .months()
            .into_iter()
            .map(|month| MonthButton {
                month,
                label: month.short_label(),
                active: month == current,
            })
            .collect()
    }

    /// Render the current month.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn render_month(&self) -> Result<MonthView> {
        let month = self.current_month();
        let mut map = self.store.snapshot()?;
        let days: Vec<DayEntry> = self
            .controller
            .visible_days(month)
            .into_iter()
            .map(|date| {
                let duties = map.remove(&date.to_string()).unwrap_or_default();
                DayEntry::new(date, duties)
            })
            .collect();
        debug!("Rendered {} with {} day(s)", month, days.len());

        Ok(MonthView {
            month,
            title: month.title(),
            can_go_prev: !self.is_at_lower_bound(),
            can_go_next: !self.is_at_upper_bound(),
            months: self.month_buttons(),
            days,
        })
    }

    /// Render a single day, as after an add or delete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for days the logbook doesn't show, or a
    /// backend error.
    pub fn render_day(&self, date: DateKey) -> Result<DayEntry> {
        self.ensure_in_range(date)?;
        Ok(DayEntry::new(date, self.store.list(date)?))
    }

    fn ensure_in_range(&self, date: DateKey) -> Result<()> {
        if self.range().contains(date) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                date: date.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn logbook() -> Logbook<MemoryBackend> {
        let range = DisplayRange::new(key("2025-10-06"), key("2026-04-10")).unwrap();
        Logbook::new(range, DutyStore::new(MemoryBackend::new()))
    }

    #[test]
    fn test_add_and_remove_scenario() {
        let book = logbook();
        let day = key("2025-10-06");
        book.add_duty(day, "Orientation").unwrap();
        book.add_duty(day, "Setup laptop").unwrap();
        assert_eq!(book.list(day).unwrap(), vec!["Orientation", "Setup laptop"]);

        book.remove_duty(day, 0).unwrap();
        assert_eq!(book.list(day).unwrap(), vec!["Setup laptop"]);
    }

    #[test]
    fn test_add_outside_range_is_refused() {
        let book = logbook();
        let err = book.add_duty(key("2025-10-05"), "too early").unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
        let err = book.add_duty(key("2026-04-11"), "too late").unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));

        assert_eq!(book.into_store().into_backend().unwrap().writes(), 0);
    }

    #[test]
    fn test_navigation_scenario() {
        let mut book = logbook();
        assert!(book.can_navigate_to(month("2025-10")));
        assert!(!book.can_navigate_to(month("2025-09")));
        assert!(!book.can_navigate_to(month("2026-05")));

        assert!(!book.set_current_month(month("2026-05")));
        assert_eq!(book.current_month(), month("2025-10"));

        assert!(book.step_month(Direction::Next));
        assert_eq!(book.current_month(), month("2025-11"));
    }

    #[test]
    fn test_render_first_month_is_partial() {
        let book = logbook();
        book.add_duty(key("2025-10-06"), "Orientation").unwrap();

        let view = book.render_month().unwrap();
        assert_eq!(view.title, "October 2025");
        assert!(!view.can_go_prev);
        assert!(view.can_go_next);
        assert_eq!(view.days.len(), 26);
        assert_eq!(view.days[0].date, key("2025-10-06"));
        assert_eq!(view.days[0].duties[0].text, "Orientation");
        assert!(view.days[1].duties.is_empty());
    }

    #[test]
    fn test_render_never_shows_out_of_range_days() {
        let mut book = logbook();
        loop {
            let view = book.render_month().unwrap();
            for day in &view.days {
                assert!(book.range().contains(day.date));
            }
            if !book.step_month(Direction::Next) {
                break;
            }
        }
        let view = book.render_month().unwrap();
        assert_eq!(view.month, month("2026-04"));
        assert_eq!(view.days.len(), 10);
        assert!(view.can_go_prev);
        assert!(!view.can_go_next);
    }

    #[test]
    fn test_month_buttons_follow_cursor() {
        let mut book = logbook();
        book.set_current_month(month("2026-01"));

        let buttons = book.month_buttons();
        assert_eq!(buttons.len(), 7);
        assert_eq!(buttons[0].label, "Oct 25");
        let active: Vec<_> = buttons.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Jan 26");
    }

    #[test]
    fn test_render_day() {
        let book = logbook();
        book.add_duty(key("2025-12-01"), "Sprint planning").unwrap();

        let entry = book.render_day(key("2025-12-01")).unwrap();
        assert_eq!(entry.duties.len(), 1);
        assert!(book.render_day(key("2025-01-01")).is_err());
    }
}
