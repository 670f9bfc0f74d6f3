//! CSV encoding of report entries

use ::csv::{QuoteStyle, WriterBuilder};

use super::{rows, ExportError};
use crate::models::report::ReportEntry;

/// Header row plus one row per record, every field quoted
pub fn encode(entry: &ReportEntry) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(entry.report_type.columns())?;
    for row in rows(&entry.data) {
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{GenerateReport, ReportType};
    use crate::reports::{generate, sample};
    use chrono::{NaiveDate, Utc};

    fn entry(report_type: ReportType) -> ReportEntry {
        let request = GenerateReport {
            report_type,
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            category: None,
        };
        generate(&request, sample::asset_history(), sample::maintenance_logs(), Utc::now()).unwrap()
    }

    fn parse(bytes: &[u8]) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_asset_history_csv() {
        let entry = entry(ReportType::AssetHistory);
        let bytes = encode(&entry).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert_eq!(text.lines().count(), entry.record_count + 1);
        assert!(text.starts_with("\"Asset Tag\",\"Name\","));
        assert!(text.contains("\"Samsung 55\"\" Smart TV\""));

        let records = parse(&bytes);
        assert!(records.iter().all(|r| r.len() == 7));
        assert_eq!(records[3][6], "$1,500");
        assert_eq!(records[1][5], "Jan 15, 2023");
    }

    #[test]
    fn test_multiline_fields_keep_one_line_per_record() {
        let mut history = sample::asset_history();
        history[1].asset_name = "Daikin Split AC Unit\nsecond line".to_string();
        history[2].location = "Room 103\r\nwing B".to_string();
        let request = GenerateReport {
            report_type: ReportType::AssetHistory,
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            category: None,
        };
        let entry = generate(&request, history, sample::maintenance_logs(), Utc::now()).unwrap();

        let text = String::from_utf8(encode(&entry).unwrap()).unwrap();
        assert_eq!(text.lines().count(), entry.record_count + 1);
        assert!(text.contains("\"Daikin Split AC Unit second line\""));
        assert!(text.contains("\"Room 103 wing B\""));
    }

    #[test]
    fn test_maintenance_logs_csv() {
        let entry = entry(ReportType::MaintenanceLogs);
        let bytes = encode(&entry).unwrap();
        let records = parse(&bytes);

        assert_eq!(records.len(), entry.record_count + 1);
        assert_eq!(records[0][3], "Task");
        assert_eq!(records[1], vec![
            "Dec 26, 2024",
            "RH-TV-001",
            "Samsung 55\" Smart TV",
            "TV Software Update",
            "John Smith",
            "Completed",
            "Low",
        ]);
    }
}
