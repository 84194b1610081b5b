//! CSV serialization of the enriched table.

use csv::WriterBuilder;
use std::io::Write;

use crate::error::Result;
use crate::types::CompanyRecord;

/// Header row of the enriched CSV.
pub const CSV_HEADER: [&str; 4] = ["Startup Name", "Website URL", "LinkedIn", "Short Description"];

/// Write `records` as CSV, header first. The header is written even when
/// there are no rows.
pub fn write_csv<W: Write>(records: &[CompanyRecord], writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Serialize `records` to CSV bytes.
pub fn to_csv_bytes(records: &[CompanyRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, site: &str) -> CompanyRecord {
        CompanyRecord {
            website_url: site.to_string(),
            ..CompanyRecord::not_available(name)
        }
    }

    #[test]
    fn header_only_for_empty_table() {
        let csv = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Startup Name,Website URL,LinkedIn,Short Description\n");
    }

    #[test]
    fn rows_follow_input_order() {
        let records = vec![
            record("Acme", "https://acme.io"),
            record("Globex", "https://globex.com"),
        ];
        let csv = String::from_utf8(to_csv_bytes(&records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Startup Name,Website URL,LinkedIn,Short Description",
                "Acme,https://acme.io,N/A,N/A",
                "Globex,https://globex.com,N/A,N/A",
            ]
        );
    }

    #[test]
    fn fields_with_commas_and_quotes_are_quoted() {
        let mut r = record("Acme", "https://acme.io");
        r.short_description = "Fast, \"cheap\" rockets".to_string();
        let csv = String::from_utf8(to_csv_bytes(&[r]).unwrap()).unwrap();
        assert!(csv.contains("\"Fast, \"\"cheap\"\" rockets\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed: Vec<CompanyRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(parsed[0].short_description, "Fast, \"cheap\" rockets");
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enriched_market_map.csv");
        let file = std::fs::File::create(&path).unwrap();
        write_csv(&[record("Acme", "N/A")], file).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Startup Name,"));
        assert!(contents.contains("Acme,N/A,N/A,N/A"));
    }
}
