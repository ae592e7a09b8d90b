//! Core types shared by every dpt-core layer.
//!
//! This module defines the data structures shared by every layer: the
//! catalog [`Record`], its [`RecordStatus`], the structured [`FilterCriteria`]
//! a search is narrowed with, and the [`SearchMode`] tag recorded in history.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// A design-patent record as supplied by a record source.
///
/// Records are immutable once loaded. JSON field names are camelCase; the
/// aliases accept catalogs exported with the older `applicant` / `class` /
/// `patentNumber` naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    /// Applicant organization.
    #[serde(alias = "applicant")]
    pub organization: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inventors: Vec<String>,
    /// Design classification code, e.g. `D14-138`.
    #[serde(alias = "class")]
    pub category: String,
    pub status: RecordStatus,
    /// Two-letter office code (`US`, `EP`, `JP`, …).
    pub country: String,
    /// Filing date as delivered by the source, normally `YYYY-MM-DD`. Parsed
    /// lazily by the filter engine so one bad record cannot poison a load.
    pub filing_date: String,
    /// Publication / patent number.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "patentNumber")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Match score in percent, assigned after filtering by a
    /// [`MatchScorer`](crate::score::MatchScorer).
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "similarity")]
    pub score: Option<u8>,
}

/// Prosecution status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Granted,
    Abandoned,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Granted => "granted",
            RecordStatus::Abandoned => "abandoned",
        };
        f.pad(name)
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RecordStatus::Pending),
            "granted" => Ok(RecordStatus::Granted),
            "abandoned" => Ok(RecordStatus::Abandoned),
            other => Err(format!("unknown status: {other} (expected pending|granted|abandoned)")),
        }
    }
}

/// Whether a search was issued from the basic or the advanced form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Basic,
    Advanced,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchMode::Basic => "basic",
            SearchMode::Advanced => "advanced",
        };
        f.pad(name)
    }
}

/// Inclusive filing-date window. Either bound may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }

    /// `true` when neither bound carries a value.
    pub fn is_empty(&self) -> bool {
        blank(&self.from) && blank(&self.to)
    }
}

/// Structured search filters applied on top of the free-text query.
///
/// Every field is independent; `None` means "no constraint on this axis".
/// Equality is structural, which is what history deduplication relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the organization.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "applicant")]
    pub organization: Option<String>,
    /// Exact category code.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "class")]
    pub category: Option<String>,
    /// A blank string, as stored by the "all statuses" choice, reads as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_status_as_none"
    )]
    pub status: Option<RecordStatus>,
    /// Exact country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Case-insensitive substring of any inventor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventor: Option<String>,
    /// Case-insensitive substring of the external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "patentNumber")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// `true` when no field constrains the result set.
    pub fn is_empty(&self) -> bool {
        blank(&self.organization)
            && blank(&self.category)
            && self.status.is_none()
            && blank(&self.country)
            && blank(&self.inventor)
            && blank(&self.external_id)
            && self.date_range.as_ref().map_or(true, DateRange::is_empty)
    }

    /// Trim every text field and drop the ones left blank, so that two
    /// criteria which filter identically also compare equal.
    pub fn normalized(self) -> Self {
        let date_range = self
            .date_range
            .map(|r| DateRange::new(tidy(r.from), tidy(r.to)))
            .filter(|r| !r.is_empty());
        Self {
            organization: tidy(self.organization),
            category: tidy(self.category),
            status: self.status,
            country: tidy(self.country),
            inventor: tidy(self.inventor),
            external_id: tidy(self.external_id),
            date_range,
        }
    }
}

fn blank_status_as_none<'de, D>(deserializer: D) -> Result<Option<RecordStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn tidy(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
