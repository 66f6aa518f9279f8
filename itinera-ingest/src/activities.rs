//! Per-day text -> ordered activities.
//!
//! Strategies, first non-empty result wins:
//! 1. time blocks: `- **Sabah (09:00 - 12:00):**` followed by bullets, or with the item
//!    on the same line
//! 2. inline times: `09:30 Topkapı Sarayı`
//! 3. plain bullets, capped at `BULLET_CAP`

use itinera_core::{Activity, Category, classify_activity, first_amount};
use tracing::debug;

use crate::lines::{block_heading, block_item, bullet_text, heading, inline_time, numbered_day};

/// Display cap for activity names, in characters.
pub const NAME_CAP: usize = 50;
/// Bullet-fallback limit; malformed input can carry hundreds of list lines.
pub const BULLET_CAP: usize = 20;

const FALLBACK_START: &str = "09:00";
const FALLBACK_END: &str = "10:00";

type Strategy = fn(&str) -> Option<Vec<Activity>>;

const STRATEGIES: [(&str, Strategy); 3] = [
    ("time-block", time_blocks),
    ("inline-time", inline_times),
    ("bullet", bullets),
];

/// Never fails; an empty list means the day has nothing scheduled.
pub fn extract_activities(day_text: &str) -> Vec<Activity> {
    for (name, strategy) in STRATEGIES {
        if let Some(activities) = strategy(day_text) {
            debug!(strategy = name, count = activities.len(), "activities extracted");
            return activities;
        }
    }
    Vec::new()
}

/// Cap a display name at `NAME_CAP` characters, ending in '…' when cut.
pub fn display_name(text: &str) -> String {
    if text.chars().count() <= NAME_CAP {
        return text.to_string();
    }
    let mut name: String = text.chars().take(NAME_CAP - 1).collect();
    name.truncate(name.trim_end().len());
    name.push('…');
    name
}

fn non_empty(activities: Vec<Activity>) -> Option<Vec<Activity>> {
    (!activities.is_empty()).then_some(activities)
}

fn build(n: usize, name: String, text: &str, start: &str, end: &str, category: Category) -> Activity {
    Activity::new(format!("act-{n}"), name, start, end, category)
        .with_description(text)
        .with_cost(first_amount(text).unwrap_or(0.0))
}

pub fn time_blocks(text: &str) -> Option<Vec<Activity>> {
    let mut block: Option<(String, String)> = None;
    let mut out = Vec::new();

    for line in text.lines() {
        if let Some(range) = block_heading(line) {
            block = Some(range);
            continue;
        }
        if let Some(b) = block_item(line) {
            let category = classify_activity(&b.item);
            out.push(build(out.len() + 1, display_name(&b.item), &b.item, &b.start, &b.end, category));
            block = Some((b.start, b.end));
            continue;
        }
        if heading(line).is_some() {
            // A structural heading ends the current block
            block = None;
            continue;
        }
        let (Some((start, end)), Some(item)) = (&block, bullet_text(line)) else {
            continue;
        };
        let category = classify_activity(&item);
        out.push(build(out.len() + 1, display_name(&item), &item, start, end, category));
    }

    non_empty(out)
}

/// End time is unknown for single-time lines, so start == end. No classification here.
pub fn inline_times(text: &str) -> Option<Vec<Activity>> {
    let out: Vec<Activity> = text
        .lines()
        .filter_map(inline_time)
        .enumerate()
        .map(|(i, t)| {
            build(
                i + 1,
                display_name(&t.description),
                &t.description,
                &t.start,
                &t.end,
                Category::Other,
            )
        })
        .collect();

    non_empty(out)
}

pub fn bullets(text: &str) -> Option<Vec<Activity>> {
    let out: Vec<Activity> = text
        .lines()
        .filter(|l| block_heading(l).is_none() && numbered_day(l).is_none())
        .filter_map(bullet_text)
        .take(BULLET_CAP)
        .enumerate()
        .map(|(i, item)| {
            let category = classify_activity(&item);
            build(i + 1, item.clone(), &item, FALLBACK_START, FALLBACK_END, category)
        })
        .collect();

    non_empty(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_block_mode() {
        let text = "- **Sabah (09:00 - 12:00):**\n- Topkapı Sarayı ziyareti\n- Ayasofya\n- **Akşam:**\n- Balık restoranında yemek (800 TL)";
        let acts = extract_activities(text);
        assert_eq!(acts.len(), 3);
        assert_eq!(acts[0].name, "Topkapı Sarayı ziyareti");
        assert_eq!((acts[0].start_time.as_str(), acts[0].end_time.as_str()), ("09:00", "12:00"));
        assert_eq!(acts[1].category, Category::Culture);
        assert_eq!(acts[2].start_time, "18:00");
        assert_eq!(acts[2].category, Category::Food);
        assert_eq!(acts[2].cost, 800.0);
        let ids: Vec<&str> = acts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["act-1", "act-2", "act-3"]);
    }

    #[test]
    fn test_block_and_item_on_one_line() {
        let text = "- **Sabah (09:00 - 12:00):** Topkapı Sarayı\n- Gülhane Parkı\n- **Öğleden Sonra (14:00 - 17:00):** Kapalıçarşı";
        let acts = extract_activities(text);
        let names: Vec<&str> = acts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Topkapı Sarayı", "Gülhane Parkı", "Kapalıçarşı"]);
        assert_eq!((acts[0].start_time.as_str(), acts[0].end_time.as_str()), ("09:00", "12:00"));
        assert_eq!(acts[1].start_time, "09:00");
        assert_eq!((acts[2].start_time.as_str(), acts[2].end_time.as_str()), ("14:00", "17:00"));
        assert_eq!(acts[0].category, Category::Culture);
        assert_eq!(acts[2].category, Category::Shopping);
    }

    #[test]
    fn test_bullets_before_first_block_ignored() {
        let text = "- Otelden çıkış\n**Öğleden Sonra (14:00 - 17:00):**\n- Galata Kulesi";
        let acts = extract_activities(text);
        assert_eq!(acts.len(), 1);
        assert_eq!(acts[0].name, "Galata Kulesi");
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "Sultanahmet Meydanı'ndan başlayıp Arasta Çarşısı üzerinden Küçük Ayasofya'ya yürüyüş";
        let text = format!("Sabah (09:00 - 12:00):\n- {long}");
        let acts = extract_activities(&text);
        assert!(acts[0].name.chars().count() <= NAME_CAP);
        assert!(acts[0].name.starts_with("Sultanahmet Meydanı'ndan"));
        assert!(acts[0].name.ends_with("Çarşısı…"));
        assert_eq!(acts[0].description, long);
    }

    #[test]
    fn test_inline_mode_is_uncategorized() {
        let text = "09:00 Topkapı Sarayı\n12:30 Öğle yemeği\n15:00 - 17:00 Boğaz turu";
        let acts = extract_activities(text);
        assert_eq!(acts.len(), 3);
        assert!(acts.iter().all(|a| a.category == Category::Other));
        assert_eq!(acts[0].start_time, acts[0].end_time);
        assert_eq!(acts[2].end_time, "17:00");
    }

    #[test]
    fn test_bullet_fallback() {
        let acts = extract_activities("- Kahvaltı\n- Serbest zaman");
        assert_eq!(acts.len(), 2);
        assert_eq!(acts[0].name, "Kahvaltı");
        assert_eq!((acts[0].start_time.as_str(), acts[0].end_time.as_str()), ("09:00", "10:00"));
        assert_eq!(acts[0].category, Category::Food);
        assert_eq!(acts[1].category, Category::Other);
    }

    #[test]
    fn test_bullet_fallback_cap() {
        let text: String = (1..=35).map(|i| format!("- Durak {i}\n")).collect();
        let acts = extract_activities(&text);
        assert_eq!(acts.len(), BULLET_CAP);
        assert_eq!(acts.last().map(|a| a.id.as_str()), Some("act-20"));
    }

    #[test]
    fn test_nothing_to_extract() {
        assert!(extract_activities("").is_empty());
        assert!(extract_activities("### 3. Gün\nDinlenme günü.").is_empty());
    }
}
