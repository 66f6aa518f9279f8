//! Import user-tracked extra budget items from CSV.
//!
//! Expected header (column order is free, extra columns are ignored):
//! category,description,amount,currency,is_estimate,is_paid

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use itinera_core::{BudgetItem, parse_amount};
use tracing::debug;

struct Columns {
    category: usize,
    description: Option<usize>,
    amount: usize,
    currency: Option<usize>,
    is_estimate: Option<usize>,
    is_paid: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Option<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Some(Self {
            category: find("category")?,
            description: find("description"),
            amount: find("amount")?,
            currency: find("currency"),
            is_estimate: find("is_estimate"),
            is_paid: find("is_paid"),
        })
    }
}

pub fn parse_items_csv(path: impl AsRef<Path>) -> Result<Vec<BudgetItem>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_items(file).with_context(|| format!("reading {}", path.as_ref().display()))
}

/// Rows before the header and rows without a usable amount are skipped.
pub fn parse_items(reader: impl Read) -> Result<Vec<BudgetItem>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns: Option<Columns> = None;
    let mut items = Vec::new();

    for result in rdr.records() {
        let record = result.context("malformed csv row")?;
        let Some(cols) = &columns else {
            columns = Columns::from_header(&record);
            continue;
        };

        let field = |i: Option<usize>| i.and_then(|i| record.get(i)).unwrap_or("");
        let category = field(Some(cols.category));
        let Some(amount) = parse_amount(field(Some(cols.amount))).filter(|a| *a >= 0.0) else {
            debug!(row = items.len() + 1, "skipping item without amount");
            continue;
        };

        let mut item = BudgetItem::new(
            format!("item-{}", items.len() + 1),
            category,
            field(cols.description),
            amount,
        );
        let currency = field(cols.currency);
        if !currency.is_empty() {
            item.currency = currency.to_string();
        }
        item.is_estimate = flag(field(cols.is_estimate));
        item.is_paid = flag(field(cols.is_paid));
        items.push(item);
    }

    if columns.is_none() {
        anyhow::bail!("no header row with category and amount columns");
    }
    Ok(items)
}

fn flag(raw: &str) -> bool {
    matches!(
        raw.to_lowercase().as_str(),
        "true" | "1" | "yes" | "evet" | "x"
    )
}
