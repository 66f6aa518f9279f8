//! Itinerary and budget record types shared by the parser, the budget view and storage.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Activity categories used by the itinerary and detail views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Transport,
    Accommodation,
    Food,
    Culture,
    Shopping,
    Entertainment,
    Sightseeing,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Transport,
        Category::Accommodation,
        Category::Food,
        Category::Culture,
        Category::Shopping,
        Category::Entertainment,
        Category::Sightseeing,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Accommodation => "accommodation",
            Category::Food => "food",
            Category::Culture => "culture",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Sightseeing => "sightseeing",
            Category::Other => "other",
        }
    }

    /// Lookup by stored name. Unknown names map to `Other`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .unwrap_or(Category::Other)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_name(&s)
    }
}

/// One scheduled item within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// HH:MM
    #[serde(alias = "start_time", deserialize_with = "lenient::string")]
    pub start_time: String,
    /// HH:MM. May precede `start_time`; ingestion does not reorder.
    #[serde(alias = "end_time", deserialize_with = "lenient::string")]
    pub end_time: String,
    /// Never negative; malformed values load as 0
    #[serde(deserialize_with = "lenient::cost")]
    pub cost: f64,
    #[serde(deserialize_with = "lenient::category")]
    pub category: Category,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            cost: 0.0,
            category,
            description: String::new(),
            location: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = if cost.is_finite() { cost.max(0.0) } else { 0.0 };
        self
    }
}

/// The normalized one-day unit of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DayPlan {
    /// 1-based
    #[serde(deserialize_with = "lenient::day_number")]
    pub day: u32,
    /// Display string, e.g. "15 Mart 2025 Cumartesi". Empty when unknown.
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::activities")]
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "lenient::string")]
    pub notes: String,
    /// Derived from `activities`; the stored value is ignored and set again by `refresh`.
    #[serde(skip_deserializing)]
    pub is_empty: bool,
}

impl DayPlan {
    pub fn new(day: u32, date: impl Into<String>, activities: Vec<Activity>) -> Self {
        let is_empty = activities.is_empty();
        Self {
            day,
            date: date.into(),
            activities,
            notes: String::new(),
            is_empty,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Recompute `is_empty` after the activity list changed.
    pub fn refresh(&mut self) {
        self.is_empty = self.activities.is_empty();
    }

    /// Sum of itinerary-embedded activity costs
    pub fn total_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }
}

/// Topic of a chunk of the raw plan document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CityInfo,
    DailyPlan,
    FoodGuide,
    PracticalInfo,
    BudgetEstimate,
}

impl SectionKind {
    /// Classification priority order.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::CityInfo,
        SectionKind::DailyPlan,
        SectionKind::FoodGuide,
        SectionKind::PracticalInfo,
        SectionKind::BudgetEstimate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::CityInfo => "city_info",
            SectionKind::DailyPlan => "daily_plan",
            SectionKind::FoodGuide => "food_guide",
            SectionKind::PracticalInfo => "practical_info",
            SectionKind::BudgetEstimate => "budget_estimate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// A manually tracked extra cost line, separate from `Activity::cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    /// Free-form category label as entered by the user ("konaklama", "aktiviteler", ...)
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub is_estimate: bool,
    #[serde(default)]
    pub is_paid: bool,
}

impl BudgetItem {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: description.into(),
            amount,
            currency: "TL".to_string(),
            is_estimate: false,
            is_paid: false,
        }
    }
}

/// Derived spendable summary. Never stored; recompute on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub extra_items_total: f64,
    pub plan_base_cost: f64,
    pub total_cost: f64,
    pub suggested_budget: f64,
    pub daily_cost: f64,
}
