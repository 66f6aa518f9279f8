//! Time utilities: clock tokens, named time-of-day blocks, Turkish date display.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;

use crate::classify::fold_tr;

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("clock regex")
});

/// Normalize a clock token like "9:05" to "09:05". Out-of-range values are rejected.
pub fn parse_clock(token: &str) -> Option<String> {
    let (h, m) = token.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 || token.trim().len() > 5 {
        return None;
    }
    Some(format!("{h:02}:{m:02}"))
}

/// All valid clock tokens in `text`, normalized, in order of appearance.
pub fn find_clock_times(text: &str) -> Vec<String> {
    CLOCK_RE
        .find_iter(text)
        .filter_map(|m| parse_clock(m.as_str()))
        .collect()
}

/// Named part of the day an LLM plan tends to group activities under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBlock {
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
}

impl TimeBlock {
    /// Default (start, end) used when the heading gives no explicit times.
    pub fn range(&self) -> (&'static str, &'static str) {
        match self {
            TimeBlock::Morning => ("09:00", "12:00"),
            TimeBlock::Noon => ("12:00", "14:00"),
            TimeBlock::Afternoon => ("14:00", "18:00"),
            TimeBlock::Evening => ("18:00", "22:00"),
            TimeBlock::Night => ("22:00", "23:59"),
        }
    }

    /// Exact label match ("Sabah", "Öğleden Sonra", "Evening"); trailing ':' ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let l = fold_tr(label.trim().trim_end_matches(':').trim());
        match l.as_str() {
            "sabah" | "morning" => Some(TimeBlock::Morning),
            "öğle" | "öğlen" | "öğle vakti" | "noon" | "midday" => Some(TimeBlock::Noon),
            "öğleden sonra" | "afternoon" => Some(TimeBlock::Afternoon),
            "akşam" | "evening" => Some(TimeBlock::Evening),
            "gece" | "night" => Some(TimeBlock::Night),
            _ => None,
        }
    }
}

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül",
    "Ekim", "Kasım", "Aralık",
];

fn weekday_tr(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "Pazartesi",
        Weekday::Tue => "Salı",
        Weekday::Wed => "Çarşamba",
        Weekday::Thu => "Perşembe",
        Weekday::Fri => "Cuma",
        Weekday::Sat => "Cumartesi",
        Weekday::Sun => "Pazar",
    }
}

/// Display form used by the day header, e.g. "15 Mart 2025 Cumartesi".
pub fn format_date_tr(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        date.day(),
        MONTHS_TR[date.month0() as usize],
        date.year(),
        weekday_tr(date.weekday())
    )
}

/// Localize a `YYYY-MM-DD` token; an invalid date comes back unchanged.
pub fn localize_iso_date(token: &str) -> String {
    match NaiveDate::parse_from_str(token.trim(), "%Y-%m-%d") {
        Ok(d) => format_date_tr(d),
        Err(_) => token.to_string(),
    }
}

/// Display date of the `day`-th day (1-based) of a trip starting on `start`.
pub fn trip_day_date(start: NaiveDate, day: u32) -> String {
    start
        .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
        .map(format_date_tr)
        .unwrap_or_default()
}
