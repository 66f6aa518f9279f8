//! Stored plan detection and the in-memory editing session.
//!
//! A saved daily-plan field is either legacy LLM prose or a JSON array of days written
//! back after the user edited the plan. `RawDocument::detect` decides which, once.

use serde_json::Value;
use thiserror::Error;

use crate::model::{Activity, DayPlan};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("day {0} does not exist")]
    UnknownDay(u32),
    #[error("day {day} has no activity with id '{id}'")]
    UnknownActivity { day: u32, id: String },
}

/// Unparsed daily-plan field, resolved to one of its two storage shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    LegacyText(String),
    StructuredDays(Vec<DayPlan>),
}

impl RawDocument {
    /// Anything that is not a JSON array is legacy text.
    pub fn detect(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('[') {
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
                return RawDocument::StructuredDays(days_from_values(items));
            }
        }
        RawDocument::LegacyText(raw.to_string())
    }
}

/// Map stored elements positionally to days. The stored `day` field is ignored so that
/// day numbers come out dense (1..=n) whatever the saved file says.
pub fn days_from_values(items: Vec<Value>) -> Vec<DayPlan> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let mut day: DayPlan = if item.is_object() {
                serde_json::from_value(item).unwrap_or_default()
            } else {
                DayPlan::default()
            };
            day.day = i as u32 + 1;
            fill_missing_ids(&mut day.activities);
            day.refresh();
            day
        })
        .collect()
}

fn fill_missing_ids(activities: &mut [Activity]) {
    for (i, a) in activities.iter_mut().enumerate() {
        if a.id.trim().is_empty() {
            a.id = format!("act-{}", i + 1);
        }
    }
}

/// Editable itinerary. Day numbers are kept dense and increasing across edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    days: Vec<DayPlan>,
}

impl Itinerary {
    pub fn new(days: Vec<DayPlan>) -> Self {
        let mut it = Self { days };
        it.renumber();
        it
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn into_days(self) -> Vec<DayPlan> {
        self.days
    }

    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    fn day_mut(&mut self, day: u32) -> Result<&mut DayPlan, EditError> {
        self.days
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(EditError::UnknownDay(day))
    }

    /// Append an empty day and return its number.
    pub fn add_day(&mut self, date: impl Into<String>) -> u32 {
        let n = self.days.len() as u32 + 1;
        self.days.push(DayPlan::new(n, date, Vec::new()));
        n
    }

    pub fn remove_day(&mut self, day: u32) -> Result<DayPlan, EditError> {
        let idx = self
            .days
            .iter()
            .position(|d| d.day == day)
            .ok_or(EditError::UnknownDay(day))?;
        let removed = self.days.remove(idx);
        self.renumber();
        Ok(removed)
    }

    /// Insert keeping start-time order. A blank or clashing id is replaced; the final id
    /// is returned.
    pub fn add_activity(&mut self, day: u32, mut activity: Activity) -> Result<String, EditError> {
        let plan = self.day_mut(day)?;
        if activity.id.trim().is_empty() || plan.activities.iter().any(|a| a.id == activity.id) {
            activity.id = next_free_id(&plan.activities);
        }
        let id = activity.id.clone();
        let pos = plan
            .activities
            .iter()
            .position(|a| a.start_time > activity.start_time)
            .unwrap_or(plan.activities.len());
        plan.activities.insert(pos, activity);
        plan.refresh();
        Ok(id)
    }

    pub fn update_activity(
        &mut self,
        day: u32,
        id: &str,
        edit: impl FnOnce(&mut Activity),
    ) -> Result<(), EditError> {
        let plan = self.day_mut(day)?;
        let activity = plan
            .activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| EditError::UnknownActivity { day, id: id.to_string() })?;
        edit(activity);
        if !activity.cost.is_finite() || activity.cost < 0.0 {
            activity.cost = 0.0;
        }
        Ok(())
    }

    pub fn remove_activity(&mut self, day: u32, id: &str) -> Result<Activity, EditError> {
        let plan = self.day_mut(day)?;
        let idx = plan
            .activities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| EditError::UnknownActivity { day, id: id.to_string() })?;
        let removed = plan.activities.remove(idx);
        plan.refresh();
        Ok(removed)
    }

    pub fn set_notes(&mut self, day: u32, notes: impl Into<String>) -> Result<(), EditError> {
        self.day_mut(day)?.notes = notes.into();
        Ok(())
    }

    /// Itinerary-embedded activity costs across all days.
    pub fn plan_base_cost(&self) -> f64 {
        self.days.iter().map(DayPlan::total_cost).sum()
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// Storage form; supersedes the legacy text on the next load.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.days)
    }

    fn renumber(&mut self) {
        for (i, d) in self.days.iter_mut().enumerate() {
            d.day = i as u32 + 1;
            d.refresh();
        }
    }
}

fn next_free_id(existing: &[Activity]) -> String {
    let mut n = existing.len() + 1;
    loop {
        let candidate = format!("act-{n}");
        if !existing.iter().any(|a| a.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn act(id: &str, start: &str) -> Activity {
        Activity::new(id, format!("activity {id}"), start, start, Category::Other)
    }

    #[test]
    fn test_detect_legacy_text() {
        let doc = RawDocument::detect("### 1. Gün\n- Kahvaltı");
        assert!(matches!(doc, RawDocument::LegacyText(_)));
        // Bracketed prose is still prose
        assert!(matches!(RawDocument::detect("[not json"), RawDocument::LegacyText(_)));
    }

    #[test]
    fn test_detect_structured_days_renumbers() {
        let doc = RawDocument::detect(
            r#"[{"day": 4, "activities": [{"name": "Ayasofya"}]}, {"day": 4}, "junk"]"#,
        );
        let RawDocument::StructuredDays(days) = doc else {
            panic!("expected structured days");
        };
        let numbers: Vec<u32> = days.iter().map(|d| d.day).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(days[0].activities[0].id, "act-1");
        assert!(!days[0].is_empty);
        assert!(days[1].is_empty);
        assert!(days[2].is_empty);
    }

    #[test]
    fn test_add_activity_keeps_time_order_and_unique_ids() {
        let mut it = Itinerary::new(vec![DayPlan::new(1, "", vec![act("act-1", "09:00"), act("act-2", "15:00")])]);
        let id = it.add_activity(1, act("act-1", "12:00")).unwrap();
        assert_eq!(id, "act-3");
        let starts: Vec<&str> = it.days()[0].activities.iter().map(|a| a.start_time.as_str()).collect();
        assert_eq!(starts, vec!["09:00", "12:00", "15:00"]);
    }

    #[test]
    fn test_remove_day_renumbers() {
        let mut it = Itinerary::new(vec![
            DayPlan::new(1, "", vec![]),
            DayPlan::new(2, "", vec![act("a", "09:00")]),
            DayPlan::new(3, "", vec![]),
        ]);
        it.remove_day(1).unwrap();
        let numbers: Vec<u32> = it.days().iter().map(|d| d.day).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(it.days()[0].activities.len(), 1);
    }

    #[test]
    fn test_remove_last_activity_marks_day_empty() {
        let mut it = Itinerary::new(vec![DayPlan::new(1, "", vec![act("a", "09:00")])]);
        it.remove_activity(1, "a").unwrap();
        assert!(it.days()[0].is_empty);
        assert_eq!(
            it.remove_activity(1, "a"),
            Err(EditError::UnknownActivity { day: 1, id: "a".to_string() })
        );
    }

    #[test]
    fn test_unknown_day() {
        let mut it = Itinerary::default();
        assert_eq!(it.set_notes(2, "x"), Err(EditError::UnknownDay(2)));
    }

    #[test]
    fn test_update_activity_clamps_cost() {
        let mut it = Itinerary::new(vec![DayPlan::new(1, "", vec![act("a", "09:00")])]);
        it.update_activity(1, "a", |a| a.cost = -10.0).unwrap();
        assert_eq!(it.plan_base_cost(), 0.0);
        it.update_activity(1, "a", |a| a.cost = 250.0).unwrap();
        assert_eq!(it.plan_base_cost(), 250.0);
    }

    #[test]
    fn test_json_round_trip_through_detect() {
        let mut it = Itinerary::new(vec![DayPlan::new(1, "", vec![])]);
        it.add_day("");
        it.add_activity(2, act("", "10:00")).unwrap();
        let json = it.to_json().unwrap();
        let RawDocument::StructuredDays(days) = RawDocument::detect(&json) else {
            panic!("expected structured days");
        };
        assert_eq!(Itinerary::new(days), it);
    }
}
