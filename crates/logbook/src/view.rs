//! Render-ready projections of the logbook.
//!
//! Views are rebuilt from the controller and the store on demand and own no
//! state; throwing one away loses nothing.

use std::fmt;

use serde::Serialize;

use crate::date::{DateKey, YearMonth};

/// Shown for a day with no duties.
pub const EMPTY_DAY_MESSAGE: &str = "No duties recorded yet";

/// One month-selector button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthButton {
    /// The month the button navigates to.
    pub month: YearMonth,
    /// Short label, e.g. `Oct 25`.
    pub label: String,
    /// Whether this is the month currently displayed.
    pub active: bool,
}

/// A duty with its current position in the day's list.
///
/// Positions are recomputed on every render; they are not stable ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DutyItem {
    /// Position to pass to a delete.
    pub index: usize,
    /// The duty text.
    pub text: String,
}

/// One day of a month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    /// The day.
    pub date: DateKey,
    /// Display label, e.g. `Oct 6, 2025`.
    pub label: String,
    /// Weekday, e.g. `Mon`.
    pub weekday: String,
    /// Duties in display order.
    pub duties: Vec<DutyItem>,
}

impl DayEntry {
    /// Build the entry for `date` from its duties.
    #[must_use]
    pub fn new(date: DateKey, duties: Vec<String>) -> Self {
        Self {
            date,
            label: date.label(),
            weekday: date.weekday_label(),
            duties: duties
                .into_iter()
                .enumerate()
                .map(|(index, text)| DutyItem { index, text })
                .collect(),
        }
    }
}

impl fmt::Display for DayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {}  ({})", self.date, self.label, self.weekday)?;
        if self.duties.is_empty() {
            writeln!(f, "    {EMPTY_DAY_MESSAGE}")?;
        }
        for duty in &self.duties {
            writeln!(f, "    [{}] {}", duty.index, duty.text)?;
        }
        Ok(())
    }
}

/// A fully rendered month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    /// The month shown.
    pub month: YearMonth,
    /// Title, e.g. `October 2025`.
    pub title: String,
    /// Whether the previous-month control is enabled.
    pub can_go_prev: bool,
    /// Whether the next-month control is enabled.
    pub can_go_next: bool,
    /// Month selector, one button per month of the range.
    pub months: Vec<MonthButton>,
    /// Days of the month inside the range, in order.
    pub days: Vec<DayEntry>,
}

impl fmt::Display for MonthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.can_go_prev { "<" } else { " " };
        let next = if self.can_go_next { ">" } else { " " };
        writeln!(f, "{prev} {} {next}", self.title)?;

        let selector: Vec<String> = self
            .months
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.label)
                } else {
                    b.label.clone()
                }
            })
            .collect();
        writeln!(f, "{}", selector.join("  "))?;
        writeln!(f)?;

        for day in &self.days {
            write!(f, "{day}")?;
        }
        Ok(())
    }
}
