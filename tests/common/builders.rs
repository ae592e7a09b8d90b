//! Test builders: ergonomic constructors for `Record`, `FilterCriteria` and
//! history entries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use dpt_core::{DateRange, FilterCriteria, NewHistoryEntry, Record, RecordStatus, SearchMode};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("1", "Office Chair")
///     .organization("FurniDesign")
///     .status(RecordStatus::Pending)
///     .filed("2024-02-20")
///     .inventor("Mike Johnson")
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            record: Record {
                id: id.into(),
                title: title.into(),
                organization: "Test Org".to_string(),
                description: String::new(),
                inventors: Vec::new(),
                category: "D00-000".to_string(),
                status: RecordStatus::Pending,
                country: "US".to_string(),
                filing_date: "2024-01-01".to_string(),
                external_id: None,
                image: None,
                score: None,
            },
        }
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.record.organization = organization.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = description.into();
        self
    }

    pub fn inventor(mut self, name: impl Into<String>) -> Self {
        self.record.inventors.push(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = category.into();
        self
    }

    pub fn status(mut self, status: RecordStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.record.country = country.into();
        self
    }

    pub fn filed(mut self, date: impl Into<String>) -> Self {
        self.record.filing_date = date.into();
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.record.external_id = Some(number.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Criteria helpers
// ---------------------------------------------------------------------------

pub fn by_status(status: RecordStatus) -> FilterCriteria {
    FilterCriteria {
        status: Some(status),
        ..Default::default()
    }
}

pub fn by_country(country: &str) -> FilterCriteria {
    FilterCriteria {
        country: Some(country.to_string()),
        ..Default::default()
    }
}

pub fn filed_between(from: Option<&str>, to: Option<&str>) -> FilterCriteria {
    FilterCriteria {
        date_range: Some(DateRange::new(from.map(Into::into), to.map(Into::into))),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// History helpers
// ---------------------------------------------------------------------------

/// A basic-mode search for `query` with no filters.
pub fn basic_search(query: &str, result_count: usize) -> NewHistoryEntry {
    NewHistoryEntry {
        query: query.to_string(),
        criteria: FilterCriteria::default(),
        result_count,
        mode: SearchMode::Basic,
    }
}

/// An advanced-mode search for `query` with the given filters.
pub fn advanced_search(query: &str, criteria: FilterCriteria) -> NewHistoryEntry {
    NewHistoryEntry {
        query: query.to_string(),
        criteria,
        result_count: 0,
        mode: SearchMode::Advanced,
    }
}
