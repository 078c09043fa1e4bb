//! Bounded month navigation.
//!
//! A [`DisplayRange`] fixes the inclusive span of days the logbook will ever
//! show, and a [`RangeController`] keeps the current-month cursor inside it.
//!
//! Navigation is checked at month granularity: any month that shares at
//! least one day with the range is reachable. Which days of a month are
//! listed is decided at day granularity by [`RangeController::visible_days`],
//! and that check is the authoritative bound.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::date::{DateKey, YearMonth};
use crate::error::{Error, Result};

/// The inclusive interval of days the logbook accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRange {
    start: DateKey,
    end: DateKey,
}

impl DisplayRange {
    /// Create a range from its first and last day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start` is after `end`.
    pub fn new(start: DateKey, end: DateKey) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub fn start(&self) -> DateKey {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub fn end(&self) -> DateKey {
        self.end
    }

    /// Month containing the first day.
    #[must_use]
    pub fn first_month(&self) -> YearMonth {
        self.start.month()
    }

    /// Month containing the last day.
    #[must_use]
    pub fn last_month(&self) -> YearMonth {
        self.end.month()
    }

    /// Whether `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: DateKey) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `month` shares at least one day with the range.
    #[must_use]
    pub fn overlaps_month(&self, month: YearMonth) -> bool {
        self.first_month() <= month && month <= self.last_month()
    }

    /// Every month overlapping the range, in order.
    #[must_use]
    pub fn months(&self) -> Vec<YearMonth> {
        let last = self.last_month();
        std::iter::successors(Some(self.first_month()), YearMonth::succ)
            .take_while(|m| *m <= last)
            .collect()
    }
}

/// Direction of a single navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One month back.
    Prev,
    /// One month forward.
    Next,
}

impl Direction {
    /// Signed month offset, `-1` or `+1`.
    #[must_use]
    pub fn offset(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Holds the current month and keeps it inside a [`DisplayRange`].
#[derive(Debug, Clone)]
pub struct RangeController {
    range: DisplayRange,
    current: YearMonth,
}

impl RangeController {
    /// Create a controller positioned on the range's first month.
    #[must_use]
    pub fn new(range: DisplayRange) -> Self {
        Self {
            range,
            current: range.first_month(),
        }
    }

    /// The range this controller is bound to.
    #[must_use]
    pub fn range(&self) -> &DisplayRange {
        &self.range
    }

    /// The month currently displayed.
    #[must_use]
    pub fn current_month(&self) -> YearMonth {
        self.current
    }

    /// Whether `target` may become the current month.
    #[must_use]
    pub fn can_navigate_to(&self, target: YearMonth) -> bool {
        self.range.overlaps_month(target)
    }

    /// Move to `target` if it is navigable.
    ///
    /// Out-of-range targets are ignored and leave the cursor untouched.
    /// Returns `true` if the cursor moved.
    pub fn set_current_month(&mut self, target: YearMonth) -> bool {
        if !self.can_navigate_to(target) {
            debug!("Ignoring navigation to {target}: outside range");
            return false;
        }
        if target == self.current {
            return false;
        }
        trace!("Current month {} -> {}", self.current, target);
        self.current = target;
        true
    }

    /// Step one month in `direction`, with [`Self::set_current_month`] semantics.
    pub fn step_month(&mut self, direction: Direction) -> bool {
        self.current
            .shifted(direction.offset())
            .is_some_and(|target| self.set_current_month(target))
    }

    /// Whether the cursor sits on the first month of the range.
    #[must_use]
    pub fn is_at_lower_bound(&self) -> bool {
        self.current <= self.range.first_month()
    }

    /// Whether the cursor sits on the last month of the range.
    #[must_use]
    pub fn is_at_upper_bound(&self) -> bool {
        self.current >= self.range.last_month()
    }

    /// Every month of the range, in order.
    #[must_use]
    pub fn months(&self) -> Vec<YearMonth> {
        self.range.months()
    }

    /// The days of `month` that fall inside the range.
    ///
    /// Days outside the range are omitted entirely.
    #[must_use]
    pub fn visible_days(&self, month: YearMonth) -> Vec<DateKey> {
        month
            .days()
            .map(DateKey::new)
            .filter(|d| self.range.contains(*d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn internship() -> DisplayRange {
        DisplayRange::new(key("2025-10-06"), key("2026-04-10")).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let result = DisplayRange::new(key("2026-04-10"), key("2025-10-06"));
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let range = DisplayRange::new(key("2025-10-06"), key("2025-10-06")).unwrap();
        assert_eq!(range.months(), vec![month("2025-10")]);

        let controller = RangeController::new(range);
        assert_eq!(controller.visible_days(month("2025-10")), vec![key("2025-10-06")]);
        assert!(controller.is_at_lower_bound());
        assert!(controller.is_at_upper_bound());
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = internship();
        assert!(range.contains(key("2025-10-06")));
        assert!(range.contains(key("2026-04-10")));
        assert!(!range.contains(key("2025-10-05")));
        assert!(!range.contains(key("2026-04-11")));
    }

    #[test]
    fn test_range_months() {
        let months = internship().months();
        assert_eq!(months.len(), 7);
        assert_eq!(months.first(), Some(&month("2025-10")));
        assert_eq!(months.last(), Some(&month("2026-04")));
        assert!(months.contains(&month("2026-01")));
    }

    #[test]
    fn test_controller_starts_on_first_month() {
        let controller = RangeController::new(internship());
        assert_eq!(controller.current_month(), month("2025-10"));
        assert!(controller.is_at_lower_bound());
        assert!(!controller.is_at_upper_bound());
    }

    #[test]
    fn test_can_navigate_to() {
        let controller = RangeController::new(internship());
        assert!(controller.can_navigate_to(month("2025-10")));
        assert!(controller.can_navigate_to(month("2026-04")));
        assert!(!controller.can_navigate_to(month("2025-09")));
        assert!(!controller.can_navigate_to(month("2026-05")));
    }

    #[test]
    fn test_set_current_month_out_of_range_is_ignored() {
        let mut controller = RangeController::new(internship());
        assert!(controller.set_current_month(month("2026-01")));
        assert_eq!(controller.current_month(), month("2026-01"));

        assert!(!controller.set_current_month(month("2026-05")));
        assert_eq!(controller.current_month(), month("2026-01"));

        assert!(!controller.set_current_month(month("2025-09")));
        assert_eq!(controller.current_month(), month("2026-01"));
    }

    #[test]
    fn test_step_month_stops_at_bounds() {
        let mut controller = RangeController::new(internship());
        assert!(!controller.step_month(Direction::Prev));
        assert_eq!(controller.current_month(), month("2025-10"));

        for _ in 0..6 {
            assert!(controller.step_month(Direction::Next));
        }
        assert_eq!(controller.current_month(), month("2026-04"));
        assert!(controller.is_at_upper_bound());

        assert!(!controller.step_month(Direction::Next));
        assert_eq!(controller.current_month(), month("2026-04"));

        assert!(controller.step_month(Direction::Prev));
        assert_eq!(controller.current_month(), month("2026-03"));
        assert!(!controller.is_at_upper_bound());
        assert!(!controller.is_at_lower_bound());
    }

    #[test]
    fn test_step_month_follows_direction_offset() {
        let mut controller = RangeController::new(internship());
        assert_eq!(Direction::Next.offset(), 1);
        assert!(controller.step_month(Direction::Next));
        assert!(controller.step_month(Direction::Next));
        assert_eq!(controller.current_month(), month("2025-12"));

        assert_eq!(Direction::Prev.offset(), -1);
        assert!(controller.step_month(Direction::Prev));
        assert_eq!(controller.current_month(), month("2025-11"));
    }

    #[test]
    fn test_visible_days_trims_partial_months() {
        let controller = RangeController::new(internship());

        let october = controller.visible_days(month("2025-10"));
        assert_eq!(october.len(), 26);
        assert_eq!(october.first(), Some(&key("2025-10-06")));
        assert_eq!(october.last(), Some(&key("2025-10-31")));

        let april = controller.visible_days(month("2026-04"));
        assert_eq!(april.len(), 10);
        assert_eq!(april.last(), Some(&key("2026-04-10")));

        assert_eq!(controller.visible_days(month("2025-12")).len(), 31);
    }

    #[test]
    fn test_visible_days_never_leave_range() {
        let controller = RangeController::new(internship());
        for m in controller.months() {
            for d in controller.visible_days(m) {
                assert!(controller.range().contains(d), "{d} leaked into view");
            }
        }
        assert!(controller.visible_days(month("2025-09")).is_empty());
        assert!(controller.visible_days(month("2026-05")).is_empty());
    }
}
