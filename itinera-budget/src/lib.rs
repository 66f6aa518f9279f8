//! itinera-budget: budget estimate parsing, extra-item import and reconciliation

pub mod estimate;
pub mod items_csv;
pub mod reconcile;

pub use estimate::{BreakdownLine, BudgetEstimate, EstimateSource};
pub use items_csv::{parse_items, parse_items_csv};
pub use reconcile::{
    BaseCost, BudgetInput, CONTINGENCY_FACTOR, DEFAULT_PER_PERSON_CATEGORIES, reconcile_budget,
};
