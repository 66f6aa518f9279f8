//! Forgiving field decoders for stored plan JSON.
//!
//! Stored plans are written by several app versions and sometimes hand-edited, so a single
//! odd field must never reject the whole day. Every decoder here accepts any JSON value
//! and falls back to the field's zero value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::{Activity, Category};

fn value<'de, D: Deserializer<'de>>(d: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.unwrap_or(Value::Null))
}

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match value(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Costs are non-negative; strings like "150" or "150,5" are accepted.
pub fn cost<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = match value(d)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if raw.is_finite() && raw > 0.0 { raw } else { 0.0 })
}

pub fn category<'de, D: Deserializer<'de>>(d: D) -> Result<Category, D::Error> {
    Ok(match value(d)? {
        Value::String(s) => Category::from_name(&s),
        _ => Category::Other,
    })
}

pub fn day_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(match value(d)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Entries that are not activity objects are skipped.
pub fn activities<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Activity>, D::Error> {
    Ok(match value(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}
