//! itinera-ingest: LLM trip-plan text -> sections, days and activities.

pub mod activities;
pub mod days;
pub mod lines;
pub mod plan;
pub mod sections;

pub use activities::{BULLET_CAP, NAME_CAP, extract_activities};
pub use days::{ResolveOptions, resolve_days, resolve_days_with};
pub use plan::{TripPlan, parse_trip_plan};
pub use sections::{DAILY_SEPARATOR, SectionMap, split_sections};
