//! Daily-plan text -> ordered `DayPlan`s.
//!
//! Strategies, first match wins:
//! 1. structured: the field is a saved JSON array of days
//! 2. dated headings: `### 2025-03-15 ...`
//! 3. numbered headings: `### 1. Gün`
//! 4. single day: everything is day 1

use chrono::NaiveDate;
use itinera_core::{DayPlan, RawDocument, localize_iso_date, trip_day_date};
use tracing::debug;

use crate::activities::extract_activities;
use crate::lines::{dated_heading, numbered_day, prose_lines, with_offsets};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// First day of the trip; fills in dates the text does not give.
    pub start_date: Option<NaiveDate>,
}

type Strategy = fn(&str) -> Option<Vec<DayPlan>>;

const STRATEGIES: [(&str, Strategy); 4] = [
    ("structured", structured),
    ("dated-heading", dated_headings),
    ("numbered-heading", numbered_headings),
    ("single-day", single_day),
];

pub fn resolve_days(daily_text: &str) -> Vec<DayPlan> {
    resolve_days_with(daily_text, &ResolveOptions::default())
}

/// Never fails; unrecognized input ends up as a single day.
pub fn resolve_days_with(daily_text: &str, options: &ResolveOptions) -> Vec<DayPlan> {
    let mut days = STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            strategy(daily_text).inspect(|days| {
                debug!(strategy = *name, days = days.len(), "daily plan resolved");
            })
        })
        .unwrap_or_default();

    if let Some(start) = options.start_date {
        for d in days.iter_mut().filter(|d| d.date.trim().is_empty()) {
            d.date = trip_day_date(start, d.day);
        }
    }
    days
}

/// Saved JSON array. Day numbers are positional, the stored ones are discarded.
pub fn structured(text: &str) -> Option<Vec<DayPlan>> {
    match RawDocument::detect(text) {
        RawDocument::StructuredDays(days) => Some(days),
        RawDocument::LegacyText(_) => None,
    }
}

/// Heading lines carrying `YYYY-MM-DD`; day = order of appearance.
pub fn dated_headings(text: &str) -> Option<Vec<DayPlan>> {
    let markers: Vec<(usize, String)> = with_offsets(text)
        .filter_map(|(offset, line)| dated_heading(line).map(|d| (offset, localize_iso_date(d))))
        .collect();
    if markers.is_empty() {
        return None;
    }

    let days = slices(text, &markers)
        .into_iter()
        .enumerate()
        .map(|(i, (date, slice))| day_from_slice(i as u32 + 1, date, slice, true))
        .collect();
    Some(days)
}

/// `N. Gün` headings; day = the number in the heading.
pub fn numbered_headings(text: &str) -> Option<Vec<DayPlan>> {
    let markers: Vec<(usize, u32)> = with_offsets(text)
        .filter_map(|(offset, line)| numbered_day(line).map(|n| (offset, n)))
        .collect();
    if markers.is_empty() {
        return None;
    }

    let days = slices(text, &markers)
        .into_iter()
        .map(|(n, slice)| day_from_slice(n, String::new(), slice, true))
        .collect();
    Some(days)
}

pub fn single_day(text: &str) -> Option<Vec<DayPlan>> {
    Some(vec![day_from_slice(1, String::new(), text, false)])
}

/// Cut `text` at each marker offset; a slice runs to the next marker or the end.
fn slices<'a, T: Clone>(text: &'a str, markers: &[(usize, T)]) -> Vec<(T, &'a str)> {
    markers
        .iter()
        .enumerate()
        .map(|(i, (start, tag))| {
            let end = markers.get(i + 1).map(|(next, _)| *next).unwrap_or(text.len());
            (tag.clone(), &text[*start..end])
        })
        .collect()
}

fn day_from_slice(day: u32, date: String, slice: &str, has_marker_line: bool) -> DayPlan {
    let activities = extract_activities(slice);
    let body = if has_marker_line {
        slice.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
    } else {
        slice
    };
    DayPlan::new(day, date, activities).with_notes(prose_lines(body).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_headings() {
        let text = "### 2025-03-15\n- Ayasofya\n### 2025-03-16\nDinlenme.\n### 2025-13-01\n- Kahvaltı";
        let days = resolve_days(text);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, "15 Mart 2025 Cumartesi");
        assert_eq!(days[1].day, 2);
        assert!(days[1].is_empty);
        assert_eq!(days[1].notes, "Dinlenme.");
        assert_eq!(days[2].date, "2025-13-01");
        assert!(!days[2].is_empty);
    }

    #[test]
    fn test_numbered_headings_trust_the_number() {
        let text = "Giriş metni\n### 2. Gün\n- Müze\n### 5. Gün\n- Çarşı";
        let days = resolve_days(text);
        let numbers: Vec<u32> = days.iter().map(|d| d.day).collect();
        assert_eq!(numbers, vec![2, 5]);
    }

    #[test]
    fn test_single_day_fallback() {
        let days = resolve_days("Sadece serbest dolaşım.\n- Kahvaltı");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].activities.len(), 1);
        assert_eq!(days[0].notes, "Sadece serbest dolaşım.");
    }

    #[test]
    fn test_empty_text_is_one_empty_day() {
        let days = resolve_days("");
        assert_eq!(days.len(), 1);
        assert!(days[0].is_empty);
    }

    #[test]
    fn test_structured_discards_stored_day_numbers() {
        let json = r#"[{"day": 3, "date": "x", "activities": [{"name": "A"}]}, {"day": 3}]"#;
        let days = resolve_days(json);
        assert_eq!(days.iter().map(|d| d.day).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(days[0].activities.len(), 1);
        assert!(days[1].is_empty);
    }

    #[test]
    fn test_structured_keeps_activities_with_odd_is_empty() {
        let json = r#"[{"day":1,"activities":[{"name":"Ayasofya"},{"name":"Topkapı"}],"isEmpty":null}]"#;
        let days = resolve_days(json);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].activities.len(), 2);
        assert!(!days[0].is_empty);
    }

    #[test]
    fn test_malformed_json_falls_through() {
        let days = resolve_days("[{\"day\": 1,\n### 1. Gün\n- Kahvaltı");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].activities[0].name, "Kahvaltı");
    }

    #[test]
    fn test_start_date_fills_missing_dates() {
        let options = ResolveOptions {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 15),
        };
        let days = resolve_days_with("### 1. Gün\n- A\n### 2. Gün\n- B", &options);
        assert_eq!(days[0].date, "15 Mart 2025 Cumartesi");
        assert_eq!(days[1].date, "16 Mart 2025 Pazar");
    }
}
