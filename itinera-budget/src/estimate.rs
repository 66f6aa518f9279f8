//! The AI-written budget estimate: total, daily rate and per-line breakdown.
//!
//! Accepts either a JSON payload (`{"total": 12500, "daily": 1800, "breakdown": {...}}`)
//! or free prose like "Toplam bütçe: 12.500 TL, günlük yaklaşık 1.800 TL". A JSON payload
//! supersedes the prose heuristics.

use itinera_core::{first_amount, fold_tr, largest_amount, largest_daily_amount, parse_amount};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const TOTAL_KEYS: [&str; 4] = ["total", "totalCost", "total_cost", "toplam"];
const DAILY_KEYS: [&str; 4] = ["daily", "dailyCost", "daily_cost", "günlük"];
/// Labels that name a summary figure rather than a cost line.
const SUMMARY_LABELS: [&str; 5] = ["toplam", "total", "günlük", "daily", "gün başına"];
/// "Label: amount" lines with longer labels are prose, not breakdown entries.
const LABEL_CAP: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEstimate {
    pub source: EstimateSource,
    /// Grand total candidate.
    pub total: Option<f64>,
    /// Per-day rate candidate.
    pub daily: Option<f64>,
    pub breakdown: Vec<BreakdownLine>,
}

impl BudgetEstimate {
    /// Never fails: unreadable input yields an estimate with no figures.
    pub fn parse(raw: &str) -> Self {
        if let Some(estimate) = Self::from_json(raw) {
            debug!(total = ?estimate.total, "budget estimate from json");
            return estimate;
        }
        let estimate = Self::from_text(raw);
        debug!(total = ?estimate.total, daily = ?estimate.daily, "budget estimate from text");
        estimate
    }

    /// Structured payload; `None` unless `raw` is a JSON object.
    pub fn from_json(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('{') {
            return None;
        }
        let Value::Object(obj) = serde_json::from_str::<Value>(trimmed).ok()? else {
            return None;
        };

        let breakdown = match obj.get("breakdown") {
            Some(Value::Object(map)) => breakdown_from_map(map),
            Some(Value::Array(items)) => items.iter().filter_map(breakdown_from_entry).collect(),
            _ => Vec::new(),
        };
        Some(Self {
            source: EstimateSource::Json,
            total: first_key(&obj, &TOTAL_KEYS),
            daily: first_key(&obj, &DAILY_KEYS),
            breakdown,
        })
    }

    /// Prose heuristics: the largest figure is the total, the largest per-day figure is
    /// the daily rate.
    pub fn from_text(text: &str) -> Self {
        Self {
            source: EstimateSource::Text,
            total: largest_amount(text),
            daily: largest_daily_amount(text),
            breakdown: text.lines().filter_map(breakdown_line).collect(),
        }
    }

    /// Sum of breakdown lines; can differ from `total` when the model's arithmetic is off.
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|l| l.amount).sum()
    }
}

fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => first_amount(s).or_else(|| parse_amount(s))?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

fn first_key(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(number))
}

fn breakdown_from_map(map: &Map<String, Value>) -> Vec<BreakdownLine> {
    map.iter()
        .filter_map(|(label, v)| {
            Some(BreakdownLine {
                label: label.clone(),
                amount: number(v)?,
            })
        })
        .collect()
}

/// `{"category": "konaklama", "amount": 4000}` style entries.
fn breakdown_from_entry(entry: &Value) -> Option<BreakdownLine> {
    let label = ["category", "label", "name"]
        .iter()
        .find_map(|k| entry.get(*k).and_then(Value::as_str))?;
    let amount = ["amount", "cost", "value"]
        .iter()
        .find_map(|k| entry.get(*k).and_then(number))?;
    Some(BreakdownLine {
        label: label.to_string(),
        amount,
    })
}

/// `- **Konaklama:** 4.000 TL` -> ("Konaklama", 4000). Summary lines are skipped.
fn breakdown_line(line: &str) -> Option<BreakdownLine> {
    let l = line
        .trim()
        .trim_start_matches(['-', '*', '•', '+'])
        .replace("**", "");
    let (label, rest) = l.split_once(':')?;
    let label = label.trim();
    if label.is_empty() || label.chars().count() > LABEL_CAP {
        return None;
    }
    let folded = fold_tr(label);
    if SUMMARY_LABELS.iter().any(|s| folded.contains(s)) {
        return None;
    }
    Some(BreakdownLine {
        label: label.to_string(),
        amount: first_amount(rest)?,
    })
}
