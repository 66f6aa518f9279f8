//! Turkish-lira amount extraction from free-form text.
//!
//! Recognized shapes: "12.500 TL", "1.250,50 TL", "900 TRY", "₺1.800", "300 lira".
//! '.' groups thousands and ',' separates decimals.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::fold_tr;

const NUM: &str = r"\d{1,3}(?:\.\d{3})+(?:,\d{1,2})?|\d+(?:,\d{1,2})?";

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"₺\s*(?P<pre>{NUM})|(?P<post>{NUM})\s*(?:(?i:tl\b|try\b|lira)|₺)"
    ))
    .expect("amount regex")
});

static DAILY_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:/\s*(?:gün|day)|(?:per|a) day|gün başına)")
        .expect("daily suffix regex")
});

const DAILY_WORDS: [&str; 6] = ["günlük", "gün başına", "günde", "daily", "per day", "/gün"];

/// One currency-formatted figure found in text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub value: f64,
    /// Byte span of the whole match, currency marker included.
    pub start: usize,
    pub end: usize,
    /// The clause leading up to the figure (or its unit suffix) mentions a per-day rate.
    pub daily: bool,
}

/// Parse a bare Turkish-format number ("12.500", "1.250,50", "900").
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    // A single '.' followed by 1-2 digits is a decimal point ("45.5"), not a group
    let normalized = match raw.split_once('.') {
        Some((_, frac)) if !raw.contains(',') && frac.len() <= 2 && !frac.contains('.') => {
            raw.to_string()
        }
        _ => raw.replace('.', "").replace(',', "."),
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Scan `text` for currency amounts in order of appearance.
pub fn extract_amounts(text: &str) -> Vec<AmountMatch> {
    let mut out = Vec::new();
    let mut prev_end = 0usize;

    for caps in AMOUNT_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(num) = caps.name("pre").or_else(|| caps.name("post")) else {
            continue;
        };
        let Some(value) = parse_amount(num.as_str()) else {
            continue;
        };

        // Clause context: since the previous figure, never crossing a line break
        let line_start = text[..whole.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let context = fold_tr(&text[prev_end.max(line_start)..whole.start()]);
        let daily = DAILY_WORDS.iter().any(|w| context.contains(w))
            || DAILY_SUFFIX_RE.is_match(&fold_tr(&suffix(text, whole.end())));

        out.push(AmountMatch {
            value,
            start: whole.start(),
            end: whole.end(),
            daily,
        });
        prev_end = whole.end();
    }

    out
}

fn suffix(text: &str, from: usize) -> String {
    text[from..].chars().take(16).collect()
}

/// First amount in the text, e.g. an entrance fee inside an activity line.
pub fn first_amount(text: &str) -> Option<f64> {
    extract_amounts(text).first().map(|m| m.value)
}

/// Largest figure overall. Free-form budget prose tends to end with the grand total,
/// and the grand total is the biggest number in it.
pub fn largest_amount(text: &str) -> Option<f64> {
    max_of(extract_amounts(text).into_iter())
}

/// Largest figure whose clause mentions a per-day rate.
pub fn largest_daily_amount(text: &str) -> Option<f64> {
    max_of(extract_amounts(text).into_iter().filter(|m| m.daily))
}

fn max_of(matches: impl Iterator<Item = AmountMatch>) -> Option<f64> {
    matches.map(|m| m.value).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.500"), Some(12500.0));
        assert_eq!(parse_amount("1.250,50"), Some(1250.5));
        assert_eq!(parse_amount("900"), Some(900.0));
        assert_eq!(parse_amount("45.5"), Some(45.5));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_budget_sentence() {
        let text = "Toplam bütçe: 12.500 TL, günlük yaklaşık 1.800 TL";
        let found = extract_amounts(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, 12500.0);
        assert!(!found[0].daily);
        assert_eq!(found[1].value, 1800.0);
        assert!(found[1].daily);
        assert_eq!(largest_amount(text), Some(12500.0));
        assert_eq!(largest_daily_amount(text), Some(1800.0));
    }

    #[test]
    fn test_prefix_and_suffix_forms() {
        let found = extract_amounts("Müze girişi ₺450, tekne turu 300 lira, yemek 1.250,50 TL");
        let values: Vec<f64> = found.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![450.0, 300.0, 1250.5]);
    }

    #[test]
    fn test_daily_suffix() {
        let found = extract_amounts("Otel 2.000 TL/gün");
        assert_eq!(found.len(), 1);
        assert!(found[0].daily);
    }

    #[test]
    fn test_daily_context_stops_at_line_break() {
        let text = "Günlük harcama: 1.000 TL\nToplam: 7.000 TL";
        assert_eq!(largest_daily_amount(text), Some(1000.0));
        assert_eq!(largest_amount(text), Some(7000.0));
    }

    #[test]
    fn test_plain_numbers_ignored() {
        assert!(extract_amounts("2025-03-15 günü 3 kişi").is_empty());
        assert_eq!(first_amount("Ayasofya"), None);
    }
}
