//! Date engine and flat-file event store for daybook.
//!
//! - `month` / `weekday` for the fixed reference tables
//! - `date::CalendarDate` for validated dates and navigation
//! - `grid::MonthGrid` for laying out a month by weekday
//! - `store::EventStore` for events persisted as CSV

pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod grid;
pub mod month;
pub mod store;
pub mod weekday;

pub use crate::config::DaybookConfig;
pub use crate::date::CalendarDate;
pub use crate::error::{DaybookError, DaybookResult};
pub use crate::event::Event;
pub use crate::grid::MonthGrid;
pub use crate::month::Month;
pub use crate::store::EventStore;
pub use crate::weekday::Weekday;
