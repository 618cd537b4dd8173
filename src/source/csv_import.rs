//! CSV Import
//!
//! Reads monthly revenue from CSV files with a period column and a revenue
//! column. Columns can be mapped explicitly or detected from the header.

use super::{parse_revenue, MonthlyRecord, SourceError};
use std::path::Path;

/// CSV revenue importer with configurable column mapping
#[derive(Debug, Clone)]
pub struct CsvRevenueImporter {
    /// Column index for the period label (0-indexed)
    period_column: usize,
    /// Column index for the revenue value
    revenue_column: usize,
    /// Whether the CSV has a header row
    has_header: bool,
}

/// Result of a CSV import operation
#[derive(Debug)]
pub struct RevenueImportResult {
    pub records: Vec<MonthlyRecord>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl Default for CsvRevenueImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRevenueImporter {
    /// Create a new importer: period in column 0, revenue in column 1
    pub fn new() -> Self {
        Self {
            period_column: 0,
            revenue_column: 1,
            has_header: true,
        }
    }

    /// Set the period column index
    pub fn with_period_column(mut self, column: usize) -> Self {
        self.period_column = column;
        self
    }

    /// Set the revenue column index
    pub fn with_revenue_column(mut self, column: usize) -> Self {
        self.revenue_column = column;
        self
    }

    /// Set whether the CSV has a header row
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Auto-detect column mapping from header row
    ///
    /// Returns false when no revenue column could be found.
    pub fn auto_detect_columns(&mut self, headers: &csv::StringRecord) -> bool {
        let mut found_revenue = false;

        for (idx, header) in headers.iter().enumerate() {
            let header_lower = header.trim().to_lowercase();

            if header_lower.contains("revenue") {
                if !found_revenue {
                    self.revenue_column = idx;
                    found_revenue = true;
                }
            } else if header_lower.contains("month")
                || header_lower.contains("period")
                || header_lower.contains("date")
            {
                self.period_column = idx;
            }
        }

        found_revenue
    }

    /// Import records from a CSV file
    pub fn import(&self, path: &Path) -> Result<RevenueImportResult, SourceError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .from_path(path)?;

        Ok(self.read_records(reader))
    }

    /// Import from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> Result<RevenueImportResult, SourceError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        Ok(self.read_records(reader))
    }

    fn read_records<R: std::io::Read>(&self, mut reader: csv::Reader<R>) -> RevenueImportResult {
        let mut records = Vec::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            let actual_line = if self.has_header {
                line_num + 2
            } else {
                line_num + 1
            };

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                    continue;
                }
            };

            let period = match record.get(self.period_column) {
                Some(s) if !s.trim().is_empty() => s.trim().to_string(),
                _ => {
                    errors.push(format!("Line {}: missing period column", actual_line));
                    rows_failed += 1;
                    continue;
                }
            };

            let revenue = match record.get(self.revenue_column).map(parse_revenue) {
                Some(Ok(value)) => value,
                Some(Err(e)) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                    continue;
                }
                None => {
                    errors.push(format!("Line {}: missing revenue column", actual_line));
                    rows_failed += 1;
                    continue;
                }
            };

            records.push(MonthlyRecord::new(period, revenue));
            rows_processed += 1;
        }

        if rows_failed > 0 {
            tracing::warn!(rows_failed, "Skipped unreadable CSV rows");
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        RevenueImportResult {
            records,
            rows_processed,
            rows_failed,
            errors,
        }
    }
}

/// Import a CSV file, detecting the period and revenue columns from its header
pub fn import_revenue_csv(path: &Path) -> Result<RevenueImportResult, SourceError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut importer = CsvRevenueImporter::new();
    if !importer.auto_detect_columns(&headers) {
        tracing::debug!(?path, "No revenue header found, using column 1");
    }

    importer.import(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_csv_import() {
        let csv_data = "month,revenue
january,15000
february,16250.50
march,\"$17,100.00\"";

        let result = CsvRevenueImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.rows_failed, 0);
        assert_eq!(result.records[1], MonthlyRecord::new("february", 16250.5));
        assert_eq!(result.records[2].revenue, 17100.0);
    }

    #[test]
    fn test_csv_with_bad_rows() {
        let csv_data = "month,revenue
january,15000
february,
,12000
april,lots";

        let result = CsvRevenueImporter::new().import_str(csv_data).unwrap();

        assert_eq!(result.rows_processed, 1);
        assert_eq!(result.rows_failed, 3);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[1].starts_with("Line 4:"));
    }

    #[test]
    fn test_auto_detect_columns() {
        let headers = csv::StringRecord::from(vec!["id", "Revenue", "expenses", "Month"]);
        let mut importer = CsvRevenueImporter::new();

        assert!(importer.auto_detect_columns(&headers));
        assert_eq!(importer.period_column, 3);
        assert_eq!(importer.revenue_column, 1);

        let headers = csv::StringRecord::from(vec!["month", "sales"]);
        assert!(!CsvRevenueImporter::new().auto_detect_columns(&headers));
    }

    #[test]
    fn test_revenue_header_naming_a_month() {
        let headers = csv::StringRecord::from(vec!["monthly_revenue", "month"]);
        let mut importer = CsvRevenueImporter::new();

        assert!(importer.auto_detect_columns(&headers));
        assert_eq!(importer.revenue_column, 0);
        assert_eq!(importer.period_column, 1);

        let result = importer
            .import_str("monthly_revenue,month\n15000,january\n16000,february")
            .unwrap();
        assert_eq!(result.records[1], MonthlyRecord::new("february", 16000.0));
    }

    #[test]
    fn test_import_file_with_detection() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "expenses,month,revenue").unwrap();
        writeln!(file, "900,january,15000").unwrap();
        writeln!(file, "950,february,16000").unwrap();

        let result = import_revenue_csv(file.path()).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0], MonthlyRecord::new("january", 15000.0));
    }

    #[test]
    fn test_headerless_import() {
        let result = CsvRevenueImporter::new()
            .with_header(false)
            .with_period_column(1)
            .with_revenue_column(0)
            .import_str("100,jan\n200,feb")
            .unwrap();

        assert_eq!(result.records[1], MonthlyRecord::new("feb", 200.0));
    }
}
