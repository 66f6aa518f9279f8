//! Whole-document entry point: raw LLM text (or a saved day array) -> sections + days.

use itinera_core::{DayPlan, RawDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::days::{ResolveOptions, resolve_days_with};
use crate::sections::{SectionMap, split_sections};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub sections: SectionMap,
    pub days: Vec<DayPlan>,
}

impl TripPlan {
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }
}

/// Parse a full plan document.
///
/// A saved JSON day array has no sections. For prose, the daily-plan section feeds the
/// day resolver; when the document has no recognizable daily-plan section at all, the
/// whole text is resolved instead so heading-less plans still produce days.
pub fn parse_trip_plan(raw: &str, options: &ResolveOptions) -> TripPlan {
    if let RawDocument::StructuredDays(_) = RawDocument::detect(raw) {
        return TripPlan {
            sections: SectionMap::default(),
            days: resolve_days_with(raw, options),
        };
    }

    let sections = split_sections(raw);
    let daily_text = if sections.daily_plan.trim().is_empty() {
        debug!("no daily-plan section, resolving the whole document");
        raw
    } else {
        sections.daily_plan.as_str()
    };
    let days = resolve_days_with(daily_text, options);

    TripPlan { sections, days }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let raw = "\
İstanbul hakkında kısa bilgi.

## Günlük Plan
### 1. Gün
- **Sabah (09:00 - 12:00):**
- Ayasofya
### 2. Gün
- Kapalıçarşı'da alışveriş

## Tahmini Bütçe
Toplam bütçe: 12.500 TL
";
        let plan = parse_trip_plan(raw, &ResolveOptions::default());
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.activity_count(), 2);
        assert!(plan.sections.budget_estimate.contains("12.500 TL"));
        assert!(plan.sections.city_info.contains("İstanbul"));
    }

    #[test]
    fn test_bold_days_with_meal_block() {
        let raw = "**1. Gün**\n**Sabah (09:00 - 12:00):**\n- Ayasofya\n**Akşam Yemeği (19:00 - 21:00):**\n- Balık restoranı\n**2. Gün**\n- Kahvaltı";
        let plan = parse_trip_plan(raw, &ResolveOptions::default());
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.activity_count(), 3);
        let dinner = &plan.days[0].activities[1];
        assert_eq!(dinner.name, "Balık restoranı");
        assert_eq!((dinner.start_time.as_str(), dinner.end_time.as_str()), ("19:00", "21:00"));
        assert!(plan.sections.food_guide.is_empty());
    }

    #[test]
    fn test_heading_less_plan_still_has_days() {
        let plan = parse_trip_plan("09:00 Kahvaltı\n11:00 Müze", &ResolveOptions::default());
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].activities.len(), 2);
    }

    #[test]
    fn test_saved_json_has_no_sections() {
        let plan = parse_trip_plan(r#"[{"activities": []}]"#, &ResolveOptions::default());
        assert_eq!(plan.sections, SectionMap::default());
        assert_eq!(plan.days.len(), 1);
    }
}
