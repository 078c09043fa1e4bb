//! `logbook` - A month-by-month logbook of daily duties
//!
//! This library provides a bounded calendar cursor, a persistent per-day duty
//! store, and render-ready views tying the two together.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod cli;
pub mod config;
pub mod date;
pub mod duties;
pub mod error;
pub mod logbook;
pub mod logging;
pub mod session;
pub mod storage;
pub mod view;

pub use calendar::{Direction, DisplayRange, RangeController};
pub use config::Config;
pub use date::{DateKey, YearMonth};
pub use duties::{DutyMap, DutyStore, DEFAULT_STORAGE_KEY};
pub use error::{Error, Result};
pub use logbook::Logbook;
pub use logging::init_logging;
pub use session::{Outcome, Session, SessionCommand};
pub use storage::{Backend, MemoryBackend, SqliteBackend, StorageStats};
pub use view::{DayEntry, DutyItem, MonthButton, MonthView};
