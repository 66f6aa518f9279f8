//! Merge the AI-estimated base cost with user-tracked extra items into a `BudgetSummary`.

use itinera_core::{BudgetItem, BudgetSummary, fold_tr};
use tracing::debug;

use crate::estimate::BudgetEstimate;

/// Contingency reserve applied on top of the total: suggested = total x 1.25.
pub const CONTINGENCY_FACTOR: f64 = 1.25;

/// Categories billed once per traveler unless configured otherwise.
pub const DEFAULT_PER_PERSON_CATEGORIES: [&str; 6] = [
    "konaklama",
    "yemek",
    "ulaşım",
    "accommodation",
    "food",
    "transport",
];

/// Base cost as stored: already a number, or the budget text it has to be read from.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseCost {
    Numeric(f64),
    Text(String),
}

impl BaseCost {
    /// Text goes through `BudgetEstimate`; no recognizable total means 0.
    pub fn resolve(&self) -> f64 {
        let value = match self {
            BaseCost::Numeric(n) => *n,
            BaseCost::Text(text) => BudgetEstimate::parse(text).total.unwrap_or(0.0),
        };
        non_negative(value)
    }
}

impl Default for BaseCost {
    fn default() -> Self {
        BaseCost::Numeric(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    pub base: BaseCost,
    pub items: Vec<BudgetItem>,
    pub travelers: u32,
    pub per_person_categories: Vec<String>,
    pub duration_days: u32,
}

impl BudgetInput {
    pub fn new(base: BaseCost) -> Self {
        Self {
            base,
            items: Vec::new(),
            travelers: 1,
            per_person_categories: DEFAULT_PER_PERSON_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            duration_days: 1,
        }
    }

    pub fn with_items(mut self, items: Vec<BudgetItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_duration_days(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    pub fn with_per_person_categories(mut self, categories: Vec<String>) -> Self {
        self.per_person_categories = categories;
        self
    }

    /// Exact match after Turkish-aware lowercasing: "Konaklama" and "KONAKLAMA" both count.
    pub fn is_per_person(&self, category: &str) -> bool {
        let folded = fold_tr(category.trim());
        self.per_person_categories
            .iter()
            .any(|c| fold_tr(c.trim()) == folded)
    }

    /// What one item adds to the total. Negative or non-finite amounts count as 0.
    pub fn contribution(&self, item: &BudgetItem) -> f64 {
        let amount = non_negative(item.amount);
        if self.is_per_person(&item.category) {
            amount * f64::from(self.travelers)
        } else {
            amount
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

pub fn reconcile_budget(input: &BudgetInput) -> BudgetSummary {
    let plan_base_cost = input.base.resolve();
    let extra_items_total: f64 = input.items.iter().map(|i| input.contribution(i)).sum();
    let total_cost = plan_base_cost + extra_items_total;
    let days = input.duration_days.max(1);

    let summary = BudgetSummary {
        extra_items_total,
        plan_base_cost,
        total_cost,
        suggested_budget: (total_cost * CONTINGENCY_FACTOR).round(),
        daily_cost: (total_cost / f64::from(days)).round(),
    };
    debug!(
        base = plan_base_cost,
        extras = extra_items_total,
        items = input.items.len(),
        "budget reconciled"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, amount: f64) -> BudgetItem {
        BudgetItem::new("b-1", category, "", amount)
    }

    #[test]
    fn test_per_person_multiplies() {
        let input = BudgetInput::new(BaseCost::Numeric(0.0))
            .with_travelers(2)
            .with_items(vec![item("konaklama", 500.0), item("aktiviteler", 200.0)]);
        assert_eq!(input.contribution(&input.items[0]), 1000.0);
        assert_eq!(input.contribution(&input.items[1]), 200.0);
        assert_eq!(reconcile_budget(&input).extra_items_total, 1200.0);
    }

    #[test]
    fn test_per_person_match_is_exact_and_case_insensitive() {
        let input = BudgetInput::new(BaseCost::default());
        assert!(input.is_per_person("KONAKLAMA"));
        assert!(input.is_per_person(" Ulaşım "));
        assert!(!input.is_per_person("yemek turu"));
    }

    #[test]
    fn test_malformed_item_amounts_count_as_zero() {
        let input = BudgetInput::new(BaseCost::Numeric(1000.0))
            .with_travelers(2)
            .with_items(vec![
                item("konaklama", -500.0),
                item("aktiviteler", f64::NAN),
                item("yemek", f64::INFINITY),
                item("hediyelik", 100.0),
            ]);
        let s = reconcile_budget(&input);
        assert_eq!(s.extra_items_total, 100.0);
        assert_eq!(s.total_cost, 1100.0);
    }

    #[test]
    fn test_suggested_and_daily() {
        let input = BudgetInput::new(BaseCost::Numeric(10_001.0)).with_duration_days(3);
        let s = reconcile_budget(&input);
        assert_eq!(s.total_cost, 10_001.0);
        assert_eq!(s.suggested_budget, 12_501.0);
        assert_eq!(s.daily_cost, 3334.0);
    }

    #[test]
    fn test_zero_duration_treated_as_one_day() {
        let input = BudgetInput::new(BaseCost::Numeric(900.0)).with_duration_days(0);
        assert_eq!(reconcile_budget(&input).daily_cost, 900.0);
    }

    #[test]
    fn test_text_base_uses_largest_figure() {
        let base = BaseCost::Text("Konaklama 4.000 TL\nToplam bütçe: 12.500 TL".to_string());
        assert_eq!(base.resolve(), 12_500.0);
        assert_eq!(BaseCost::Text("yok".to_string()).resolve(), 0.0);
        assert_eq!(BaseCost::Numeric(f64::NAN).resolve(), 0.0);
    }
}
