use serde::{Deserialize, Serialize};

use super::model::{Dataset, PropertyRecord};
use crate::error::{DataError, Result};

/// How many coercion warnings are kept verbatim in a [`ParseReport`].
const MAX_WARNING_SAMPLES: usize = 10;

// ---------------------------------------------------------------------------
// Parse options
// ---------------------------------------------------------------------------

/// Header names identifying the four consumed columns.
///
/// Defaults match the published Kyrgyz price dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub period: String,
    pub district: String,
    pub property_type: String,
    pub price_per_area: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            period: "Дата".to_string(),
            district: "Район".to_string(),
            property_type: "Вид недвижимости".to_string(),
            price_per_area: "Среднее (сом/кв,м,)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: u8,
    pub columns: ColumnNames,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            columns: ColumnNames::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse outcome
// ---------------------------------------------------------------------------

/// A price cell that could not be read as a number and was replaced by 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub raw: String,
}

/// Data-quality counters collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub rows: usize,
    /// Total number of coerced price cells.
    pub coerced: usize,
    /// First few coercions, for display and logs.
    pub samples: Vec<CoercionWarning>,
    /// Configured header names that were not present in the file.
    pub missing_columns: Vec<String>,
}

impl ParseReport {
    fn record_coercion(&mut self, row: usize, raw: &str) {
        self.coerced += 1;
        if self.samples.len() < MAX_WARNING_SAMPLES {
            log::warn!("Row {row}: price '{raw}' is not a number, using 0");
            self.samples.push(CoercionWarning {
                row,
                raw: raw.to_string(),
            });
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub dataset: Dataset,
    pub report: ParseReport,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse delimited text (header row required) into a [`Dataset`].
///
/// Columns are located by header name. Rows with missing cells are kept with
/// empty strings; a missing or unreadable price becomes `0.0` and is counted
/// in the returned [`ParseReport`]. Zero data rows is
/// [`DataError::EmptyDataset`].
pub fn parse_text(text: &str, options: &ParseOptions) -> Result<ParseOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut report = ParseReport::default();
    let cols = &options.columns;
    let mut locate = |name: &str| {
        let idx = headers.iter().position(|h| h == name);
        if idx.is_none() {
            log::warn!("Column '{name}' not found in header {headers:?}");
            report.missing_columns.push(name.to_string());
        }
        idx
    };
    let period_idx = locate(&cols.period);
    let district_idx = locate(&cols.district);
    let type_idx = locate(&cols.property_type);
    let price_idx = locate(&cols.price_per_area);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let raw_price = cell(price_idx);
        let (price_per_area, price_coerced) = match parse_price(raw_price) {
            Some(v) => (v, false),
            None => {
                report.record_coercion(row_no, raw_price);
                (0.0, true)
            }
        };

        records.push(PropertyRecord {
            period: cell(period_idx).to_string(),
            district: cell(district_idx).to_string(),
            property_type: cell(type_idx).to_string(),
            price_per_area,
            price_coerced,
        });
    }

    if records.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    report.rows = records.len();
    if report.coerced > 0 {
        log::info!(
            "{} of {} price values could not be parsed and were set to 0",
            report.coerced,
            report.rows
        );
    }

    Ok(ParseOutcome {
        dataset: Dataset::from_records(records),
        report,
    })
}

/// Read a price cell. Accepts `,` or `.` as decimal separator and ignores
/// spaces used as digit grouping. Like a lenient float parse, only the
/// longest numeric prefix is read, so `50000,5 сом` is `50000.5`.
/// Negative and non-finite values are rejected.
pub fn parse_price(raw: &str) -> Option<f64> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect();
    let normalized = compact.replacen(',', ".", 1);
    let prefix = &normalized[..numeric_prefix_len(&normalized)];
    if prefix.is_empty() {
        return None;
    }
    prefix
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Byte length of the leading `[+-]digits[.digits][e[+-]digits]` run.
/// Zero when no digit is found before the exponent.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || mantissa_digits > 0 {
            mantissa_digits += frac_end - (end + 1);
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions {
            delimiter: b';',
            columns: ColumnNames {
                period: "period".into(),
                district: "district".into(),
                property_type: "type".into(),
                price_per_area: "price".into(),
            },
        }
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("50000,5"), Some(50000.5));
        assert_eq!(parse_price("70000"), Some(70000.0));
        assert_eq!(parse_price(" 60000.25 "), Some(60000.25));
        assert_eq!(parse_price("55\u{a0}000"), Some(55000.0));
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price("1e999"), None);
    }

    #[test]
    fn test_parse_price_reads_numeric_prefix() {
        assert_eq!(parse_price("50000,5 сом"), Some(50000.5));
        assert_eq!(parse_price("123abc"), Some(123.0));
        assert_eq!(parse_price("1.5e3m²"), Some(1500.0));
        assert_eq!(parse_price("7e"), Some(7.0));
        assert_eq!(parse_price(".5"), Some(0.5));
        assert_eq!(parse_price("12."), Some(12.0));
        assert_eq!(parse_price("1,2,3"), Some(1.2));
        assert_eq!(parse_price("н/д"), None);
        assert_eq!(parse_price("."), None);
        assert_eq!(parse_price("-12abc"), None);
    }

    #[test]
    fn test_price_with_unit_suffix_is_not_coerced() {
        let text = "period;district;type;price\n2024-01;A;flat;50000,5 сом\n2024-01;A;flat;123abc\n";
        let out = parse_text(text, &opts()).unwrap();

        let prices: Vec<f64> = out.dataset.records.iter().map(|r| r.price_per_area).collect();
        assert_eq!(prices, vec![50000.5, 123.0]);
        assert_eq!(out.report.coerced, 0);
        assert!(out.dataset.records.iter().all(|r| !r.price_coerced));
    }

    #[test]
    fn test_parse_basic_dataset() {
        let text = "period;district;type;price\n\
                    2024-01;A;flat;50000,5\n\
                    2024-01;B;house;70000\n\
                    2024-02;A;flat;60000\n";
        let out = parse_text(text, &opts()).unwrap();

        assert_eq!(out.dataset.len(), 3);
        assert_eq!(out.dataset.records[0].price_per_area, 50000.5);
        assert_eq!(out.dataset.periods, vec!["2024-01", "2024-02"]);
        assert_eq!(out.dataset.districts, vec!["A", "B"]);
        assert_eq!(out.report.rows, 3);
        assert_eq!(out.report.coerced, 0);
        assert!(out.report.missing_columns.is_empty());
    }

    #[test]
    fn test_unparsable_price_is_kept_as_zero() {
        let text = "period;district;type;price\n2024-01;A;flat;abc\n";
        let out = parse_text(text, &opts()).unwrap();

        assert_eq!(out.dataset.len(), 1);
        let rec = &out.dataset.records[0];
        assert_eq!(rec.price_per_area, 0.0);
        assert!(rec.price_coerced);
        assert_eq!(out.report.coerced, 1);
        assert_eq!(
            out.report.samples,
            vec![CoercionWarning { row: 0, raw: "abc".into() }]
        );
    }

    #[test]
    fn test_short_rows_pass_through() {
        let text = "period;district;type;price\n2024-01;A\n";
        let out = parse_text(text, &opts()).unwrap();

        let rec = &out.dataset.records[0];
        assert_eq!(rec.district, "A");
        assert_eq!(rec.property_type, "");
        assert_eq!(rec.price_per_area, 0.0);
        assert_eq!(out.report.coerced, 1);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let text = "period;district;price\n2024-01;A;100\n";
        let out = parse_text(text, &opts()).unwrap();

        assert_eq!(out.report.missing_columns, vec!["type".to_string()]);
        assert_eq!(out.dataset.records[0].property_type, "");
        assert_eq!(out.dataset.records[0].price_per_area, 100.0);
    }

    #[test]
    fn test_headers_with_bom_and_padding() {
        let text = "\u{feff}period ; district;type;price\n2024-01;A;flat;1\n";
        let out = parse_text(text, &opts()).unwrap();
        assert_eq!(out.dataset.records[0].period, "2024-01");
        assert!(out.report.missing_columns.is_empty());
    }

    #[test]
    fn test_default_headers() {
        let text = "Дата;Район;Вид недвижимости;Среднее (сом/кв,м,)\n\
                    2024-03;Ленинский;Квартира;85000,75\n";
        let out = parse_text(text, &ParseOptions::default()).unwrap();
        let rec = &out.dataset.records[0];
        assert_eq!(rec.district, "Ленинский");
        assert_eq!(rec.property_type, "Квартира");
        assert_eq!(rec.price_per_area, 85000.75);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_text("", &opts()), Err(DataError::EmptyDataset)));
        assert!(matches!(
            parse_text("period;district;type;price\n", &opts()),
            Err(DataError::EmptyDataset)
        ));
    }

    #[test]
    fn test_coercion_samples_are_capped() {
        let mut text = String::from("period;district;type;price\n");
        for _ in 0..25 {
            text.push_str("2024-01;A;flat;n/a\n");
        }
        let out = parse_text(&text, &opts()).unwrap();
        assert_eq!(out.report.coerced, 25);
        assert_eq!(out.report.samples.len(), MAX_WARNING_SAMPLES);
    }
}
