//! Built-in sample catalog: six design patents used when no catalog file is
//! configured.

use crate::{check_unique_ids, CatalogError, RecordSource};
use dpt_core::{Record, RecordStatus};

// (id, title, organization, filed, category, status, country, number, inventors, description)
type Template = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    RecordStatus,
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static str,
);

const RECORDS: &[Template] = &[
    (
        "1",
        "Smartphone Design with Curved Display",
        "TechCorp Inc.",
        "2024-01-15",
        "D14-138",
        RecordStatus::Granted,
        "US",
        "US1234567",
        &["John Smith", "Jane Doe"],
        "A sleek smartphone design featuring a curved display and minimalist aesthetic.",
    ),
    (
        "2",
        "Ergonomic Office Chair",
        "FurniDesign Ltd.",
        "2024-02-20",
        "D06-301",
        RecordStatus::Pending,
        "US",
        "US2345678",
        &["Mike Johnson"],
        "Modern office chair with advanced ergonomic features and premium materials.",
    ),
    (
        "3",
        "Wireless Headphone Design",
        "AudioTech Solutions",
        "2024-03-10",
        "D14-179",
        RecordStatus::Granted,
        "US",
        "US3456789",
        &["Sarah Wilson", "Tom Brown"],
        "Premium wireless headphones with noise-canceling technology and sleek design.",
    ),
    (
        "4",
        "Smart Watch Interface",
        "WearableTech Inc.",
        "2024-01-28",
        "D14-138",
        RecordStatus::Granted,
        "US",
        "US4567890",
        &["Alex Lee"],
        "Innovative smartwatch design with circular display and premium materials.",
    ),
    (
        "5",
        "Electric Vehicle Charging Station",
        "GreenTech Motors",
        "2023-12-05",
        "D12-108",
        RecordStatus::Granted,
        "EP",
        "EP5678901",
        &["Emma Davis", "Robert Chen"],
        "Sleek and modern electric vehicle charging station with user-friendly interface.",
    ),
    (
        "6",
        "Gaming Controller Design",
        "GameTech Industries",
        "2024-03-22",
        "D21-456",
        RecordStatus::Pending,
        "JP",
        "JP6789012",
        &["David Kim", "Lisa Zhang"],
        "Ergonomic gaming controller with customizable buttons and RGB lighting.",
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn records() -> Vec<Record> {
        RECORDS
            .iter()
            .map(
                |&(id, title, organization, filed, category, status, country, number, inventors, description)| {
                    Record {
                        id: id.to_string(),
                        title: title.to_string(),
                        organization: organization.to_string(),
                        description: description.to_string(),
                        inventors: inventors.iter().map(|s| s.to_string()).collect(),
                        category: category.to_string(),
                        status,
                        country: country.to_string(),
                        filing_date: filed.to_string(),
                        external_id: Some(number.to_string()),
                        image: None,
                        score: None,
                    }
                },
            )
            .collect()
    }
}

impl RecordSource for SampleCatalog {
    fn load(&self) -> Result<Vec<Record>, CatalogError> {
        let records = Self::records();
        check_unique_ids(&records)?;
        tracing::debug!(count = records.len(), "catalog: sample loaded");
        Ok(records)
    }
}
