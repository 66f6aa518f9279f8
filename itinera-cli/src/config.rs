use anyhow::{Context, Result};
use chrono::NaiveDate;
use itinera_budget::DEFAULT_PER_PERSON_CATEGORIES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::state::itinera_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetSection,
    #[serde(default)]
    pub parse: ParseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSection {
    pub travelers: u32,
    /// Item categories multiplied by the traveler count.
    pub per_person_categories: Vec<String>,
    /// Display only; amounts are never converted.
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// First trip day, used to date days the plan text leaves undated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Default for BudgetSection {
    fn default() -> Self {
        Self {
            travelers: 1,
            per_person_categories: DEFAULT_PER_PERSON_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            currency: "TL".to_string(),
        }
    }
}

impl Config {
    /// A missing file means defaults; a present but broken one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).with_context(|| format!("parse {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    /// Write the defaults unless `path` exists. Returns whether a file was written.
    pub fn write_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let s = toml::to_string_pretty(&Self::default()).context("serialize config")?;
        fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(true)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(itinera_home()?.join("config.toml"))
}
