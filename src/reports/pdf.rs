//! Minimal PDF 1.4 writer for report exports
//!
//! Pages are A4 with a fixed text layout in the built-in Courier font.
//! Positions are given in millimetres from the top-left corner and converted
//! to PDF user space (points, origin bottom-left) when written.

use std::io::Write;

use chrono::NaiveDate;

use super::{format::format_date, rows, ExportError};
use crate::models::report::ReportEntry;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_X_MM: f64 = 20.0;
const TABLE_TOP_MM: f64 = 70.0;
const HEADER_GAP_MM: f64 = 10.0;
const ROW_HEIGHT_MM: f64 = 8.0;
const PAGE_BREAK_MM: f64 = 280.0;
const PAGE_TOP_MM: f64 = 20.0;

/// A single line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub size: u32,
    pub y_mm: f64,
    pub text: String,
}

type Page = Vec<TextLine>;

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// Lay the entry out into pages
pub fn layout(entry: &ReportEntry, organization: &str, generated_on: NaiveDate) -> Vec<Page> {
    let line = |size, y_mm, text: String| TextLine { size, y_mm, text };

    let mut page = vec![
        line(20, 20.0, organization.to_string()),
        line(16, 30.0, entry.title.clone()),
        line(12, 40.0, format!("Generated on: {}", format_date(generated_on))),
        line(
            12,
            50.0,
            format!(
                "Date Range: {} - {}",
                format_date(entry.date_range.start),
                format_date(entry.date_range.end)
            ),
        ),
        line(10, TABLE_TOP_MM, entry.report_type.columns().join(" | ")),
    ];
    let mut pages = Vec::new();
    let mut y = TABLE_TOP_MM + HEADER_GAP_MM;

    for row in rows(&entry.data) {
        if y > PAGE_BREAK_MM {
            pages.push(std::mem::take(&mut page));
            y = PAGE_TOP_MM;
        }
        page.push(line(10, y, row.join(" | ")));
        y += ROW_HEIGHT_MM;
    }
    pages.push(page);
    pages
}

/// Encode the entry as a complete PDF document
pub fn encode(
    entry: &ReportEntry,
    organization: &str,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    render(&layout(entry, organization, generated_on))
}

/// Escape a string for a PDF literal. Characters outside ASCII become `?`.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn content_stream(page: &[TextLine]) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    for line in page {
        writeln!(
            out,
            "BT /F1 {} Tf {:.2} {:.2} Td ({}) Tj ET",
            line.size,
            mm_to_pt(MARGIN_X_MM),
            mm_to_pt(PAGE_HEIGHT_MM - line.y_mm),
            escape(&line.text)
        )?;
    }
    Ok(out)
}

/// Serialize pages into PDF bytes.
///
/// Object layout: 1 catalog, 2 page tree, 3 font, then a page object and its
/// content stream for each page.
pub fn render(pages: &[Page]) -> Result<Vec<u8>, ExportError> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.4\n");

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    offsets.push(out.len());
    writeln!(out, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj")?;

    offsets.push(out.len());
    writeln!(
        out,
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj",
        kids.join(" "),
        pages.len()
    )?;

    offsets.push(out.len());
    writeln!(
        out,
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>\nendobj"
    )?;

    for (i, page) in pages.iter().enumerate() {
        let page_id = 4 + 2 * i;
        let content_id = page_id + 1;

        offsets.push(out.len());
        writeln!(
            out,
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj",
            page_id,
            mm_to_pt(PAGE_WIDTH_MM),
            mm_to_pt(PAGE_HEIGHT_MM),
            content_id
        )?;

        let stream = content_stream(page)?;
        offsets.push(out.len());
        writeln!(out, "{} 0 obj\n<< /Length {} >>\nstream", content_id, stream.len())?;
        out.extend_from_slice(&stream);
        writeln!(out, "endstream\nendobj")?;
    }

    let xref_offset = out.len();
    writeln!(out, "xref\n0 {}", offsets.len() + 1)?;
    writeln!(out, "0000000000 65535 f ")?;
    for offset in &offsets {
        writeln!(out, "{:010} 00000 n ", offset)?;
    }
    writeln!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        offsets.len() + 1,
        xref_offset
    )?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::models::report::{
        AssetHistoryRecord, DateRange, ReportRecords, ReportType,
    };

    fn entry_with(count: usize) -> ReportEntry {
        let record = AssetHistoryRecord {
            asset_tag: "RH-TV-001".to_string(),
            asset_name: "Smart TV (55\")".to_string(),
            category: "Electronics".to_string(),
            location: "Room 101".to_string(),
            status: "Active".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            last_maintenance: None,
            value: Decimal::from(800),
        };
        ReportEntry {
            id: 1,
            report_type: ReportType::AssetHistory,
            title: "Asset History Report - Dec 24, 2024 to Dec 26, 2024".to_string(),
            generated_at: Utc::now(),
            date_range: DateRange {
                start: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 12, 26).unwrap(),
            },
            category: None,
            record_count: count,
            data: ReportRecords::AssetHistory(vec![record; count]),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let pages = layout(&entry_with(1), "Ramayana Hotel Makassar", today());
        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page[0], TextLine { size: 20, y_mm: 20.0, text: "Ramayana Hotel Makassar".to_string() });
        assert_eq!(page[2].text, "Generated on: Dec 27, 2024");
        assert_eq!(page[3].text, "Date Range: Dec 24, 2024 - Dec 26, 2024");
        assert_eq!(
            page[4].text,
            "Asset Tag | Name | Category | Location | Status | Purchase Date | Value"
        );
        assert_eq!(page[5].y_mm, 80.0);
        assert!(page[5].text.ends_with("| Jan 15, 2023 | $800"));
    }

    #[test]
    fn test_page_breaks() {
        // First page holds rows at 80..=280mm
        assert_eq!(layout(&entry_with(26), "Hotel", today()).len(), 1);

        let pages = layout(&entry_with(27), "Hotel", today());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1][0].y_mm, 20.0);
    }

    #[test]
    fn test_render_document() {
        let bytes = encode(&entry_with(30), "Hotel", today()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/BaseFont /Courier"));
        assert!(text.contains("Smart TV \\(55\"\\)"));

        let startxref = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap();
        assert!(text[startxref..].starts_with("xref"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a(b)\\c"), "a\\(b\\)\\\\c");
        assert_eq!(escape("Café"), "Caf?");
    }
}
