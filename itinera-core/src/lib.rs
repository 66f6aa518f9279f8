//! itinera-core: trip-plan domain types and the leaf extractors shared by every parser

pub mod amount;
pub mod classify;
pub mod itinerary;
pub mod lenient;
pub mod model;
pub mod time;

pub use amount::{AmountMatch, extract_amounts, first_amount, largest_amount, largest_daily_amount, parse_amount};
pub use classify::{KeywordTable, classify, classify_activity, classify_section, fold_tr};
pub use itinerary::{EditError, Itinerary, RawDocument};
pub use model::{Activity, BudgetItem, BudgetSummary, Category, DayPlan, Section, SectionKind};
pub use time::{TimeBlock, find_clock_times, localize_iso_date, parse_clock, trip_day_date};
