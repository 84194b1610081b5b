//! Core data types for the enrichment table.

use serde::{Deserialize, Serialize};

/// Placeholder for a field the lookup could not fill.
pub const NOT_AVAILABLE: &str = "N/A";

/// One enriched row of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Candidate name as extracted from the market map
    #[serde(rename = "Startup Name")]
    pub name: String,

    #[serde(rename = "Website URL")]
    pub website_url: String,

    #[serde(rename = "LinkedIn")]
    pub linkedin: String,

    #[serde(rename = "Short Description")]
    pub short_description: String,
}

impl CompanyRecord {
    /// A record whose lookup yielded nothing.
    pub fn not_available(name: &str) -> Self {
        Self {
            name: name.to_string(),
            website_url: NOT_AVAILABLE.to_string(),
            linkedin: NOT_AVAILABLE.to_string(),
            short_description: NOT_AVAILABLE.to_string(),
        }
    }

    /// True when none of the looked-up fields were found.
    pub fn is_unresolved(&self) -> bool {
        self.website_url == NOT_AVAILABLE
            && self.linkedin == NOT_AVAILABLE
            && self.short_description == NOT_AVAILABLE
    }
}

/// Result of one end-to-end run.
#[derive(Debug, Clone)]
pub struct EnrichedTable {
    /// Rows in the order candidates appeared in the completion
    pub records: Vec<CompanyRecord>,

    /// The completion text the candidates were parsed from
    pub raw_completion: String,
}

impl EnrichedTable {
    /// Number of rows where at least one field was found.
    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_unresolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_available_record_is_unresolved() {
        let record = CompanyRecord::not_available("Acme");
        assert_eq!(record.name, "Acme");
        assert_eq!(record.website_url, "N/A");
        assert!(record.is_unresolved());
    }

    #[test]
    fn serializes_with_column_names() {
        let record = CompanyRecord::not_available("Acme");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Startup Name"], "Acme");
        assert_eq!(json["Website URL"], "N/A");
        assert_eq!(json["LinkedIn"], "N/A");
        assert_eq!(json["Short Description"], "N/A");
    }

    #[test]
    fn resolved_count_skips_all_na_rows() {
        let mut found = CompanyRecord::not_available("Globex");
        found.website_url = "https://globex.com".to_string();
        let table = EnrichedTable {
            records: vec![CompanyRecord::not_available("Acme"), found],
            raw_completion: String::new(),
        };
        assert_eq!(table.resolved_count(), 1);
    }
}
