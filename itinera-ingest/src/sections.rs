//! Split an LLM trip plan into its topic sections.
//!
//! Expected layout (loosely; nothing is guaranteed):
//!   ## Şehir Hakkında        -> city_info
//!   ## Günlük Plan / ### 1. Gün  -> daily_plan (every occurrence kept)
//!   ## Yeme İçme Rehberi     -> food_guide
//!   ## Pratik Bilgiler       -> practical_info
//!   ## Tahmini Bütçe         -> budget_estimate

use itinera_core::{Section, SectionKind, classify_section};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::lines::{block_heading, dated_heading, heading, numbered_day};

/// Placed between daily-plan fragments found in different parts of the document.
pub const DAILY_SEPARATOR: &str = "\n\n---\n\n";

/// Exactly one text per section kind; missing sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    pub city_info: String,
    pub daily_plan: String,
    pub food_guide: String,
    pub practical_info: String,
    pub budget_estimate: String,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::CityInfo => &self.city_info,
            SectionKind::DailyPlan => &self.daily_plan,
            SectionKind::FoodGuide => &self.food_guide,
            SectionKind::PracticalInfo => &self.practical_info,
            SectionKind::BudgetEstimate => &self.budget_estimate,
        }
    }

    fn slot(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::CityInfo => &mut self.city_info,
            SectionKind::DailyPlan => &mut self.daily_plan,
            SectionKind::FoodGuide => &mut self.food_guide,
            SectionKind::PracticalInfo => &mut self.practical_info,
            SectionKind::BudgetEstimate => &mut self.budget_estimate,
        }
    }

    /// All five sections in classification priority order.
    pub fn sections(&self) -> Vec<Section> {
        SectionKind::ALL
            .into_iter()
            .map(|kind| Section {
                kind,
                text: self.get(kind).to_string(),
            })
            .collect()
    }
}

/// Section being accumulated.
struct Open {
    kind: SectionKind,
    /// Level of the heading that opened it; 0 for the untitled preamble.
    level: u8,
    text: String,
}

impl Open {
    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }
}

/// Scan line by line and bucket text under classified headings.
///
/// - text before the first heading is city info
/// - a heading that names no topic, is nested below the current section's heading, or
///   is a time block (`**Akşam Yemeği (19:00 - 21:00):**`)
///   stays inside the current section; day markers (`### 1. Gün`, `### 2025-03-15`)
///   always start a daily-plan fragment
/// - daily-plan fragments are all kept and joined with `DAILY_SEPARATOR`; any other
///   kind keeps its last occurrence
pub fn split_sections(text: &str) -> SectionMap {
    let mut map = SectionMap::default();
    let mut daily_parts: Vec<String> = Vec::new();
    let mut open = Open {
        kind: SectionKind::CityInfo,
        level: 0,
        text: String::new(),
    };

    for line in text.lines() {
        let Some(h) = heading(line) else {
            open.push_line(line);
            continue;
        };

        // Day markers open a day at any depth; deeper headings and time blocks are content
        let day_marker = numbered_day(line).is_some() || dated_heading(line).is_some();
        let nested = (open.level > 0 && h.level > open.level) || block_heading(line).is_some();
        let kind = if day_marker {
            Some(SectionKind::DailyPlan)
        } else if nested {
            None
        } else {
            classify_section(h.text)
        };
        let Some(kind) = kind else {
            open.push_line(line);
            continue;
        };

        trace!(heading = h.text, kind = kind.as_str(), "section boundary");
        let closed = std::mem::replace(
            &mut open,
            Open {
                kind,
                level: h.level,
                text: String::new(),
            },
        );
        close(closed, &mut map, &mut daily_parts);
        open.push_line(line);
    }
    close(open, &mut map, &mut daily_parts);

    map.daily_plan = daily_parts.join(DAILY_SEPARATOR);
    map
}

fn close(section: Open, map: &mut SectionMap, daily_parts: &mut Vec<String>) {
    let text = section.text.trim();
    // An empty untitled preamble must not wipe anything
    if section.level == 0 && text.is_empty() {
        return;
    }
    match section.kind {
        SectionKind::DailyPlan => {
            if !text.is_empty() {
                daily_parts.push(text.to_string());
            }
        }
        kind => *map.slot(kind) = text.to_string(),
    }
}
