// src/models/filter.rs

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::models::{interaction::ItemStatus, item::Difficulty};

/// Constraints for one catalog query. `None` on any field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_constraint")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "deserialize_constraint")]
    pub status: Option<ItemStatus>,
}

impl FilterSpec {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Lower-cased needle, or `None` when the search box is blank.
    pub fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Category constraint with the "all" sentinel folded away.
    pub fn category_constraint(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !is_sentinel(c))
    }
}

/// Query string accepted by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// Search keyword.
    pub q: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<FilterParams> for FilterSpec {
    type Error = String;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        Ok(FilterSpec {
            search_text: params.q,
            category: params.category.filter(|c| !is_sentinel(c)),
            difficulty: parse_constraint(params.difficulty.as_deref())?,
            status: parse_constraint(params.status.as_deref())?,
        })
    }
}

/// Parses an optional constraint, folding the sentinel into `None`.
fn parse_constraint<T>(value: Option<&str>) -> Result<Option<T>, String>
where
    T: FromStr<Err = String>,
{
    match value {
        Some(v) if !is_sentinel(v) => v.parse().map(Some),
        _ => Ok(None),
    }
}

/// Accepts the same spellings as the query string, including `"all"` and `null`.
fn deserialize_constraint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_constraint(raw.as_deref()).map_err(de::Error::custom)
}

/// `"all"` (any case) and blank values impose no constraint.
pub fn is_sentinel(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("all")
}
