//! Row model behind the records table: criteria predicate, free-text
//! search, newest-period-first ordering and pagination.

use crate::data::filter::RowPredicate;
use crate::data::model::PropertyRecord;
use crate::engine::aggregate::RunningMean;
use crate::format::{format_price, CurrencyFormat};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Table configuration. The predicate is supplied by the owner (normally
/// [`Coordinator::row_predicate`](crate::engine::Coordinator::row_predicate))
/// every time the criteria change.
#[derive(Debug, Clone)]
pub struct TableQuery {
    predicate: RowPredicate,
    search: String,
    page: usize,
    page_size: usize,
    /// Used to render prices the way the table shows them, so search hits
    /// the visible text.
    currency: CurrencyFormat,
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a PropertyRecord>,
    /// Rows passing predicate and search, across all pages.
    pub matching: usize,
    pub page: usize,
    pub page_count: usize,
    /// Mean price over all matching rows (0 when none match).
    pub footer_mean: f64,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(RowPredicate::default(), DEFAULT_PAGE_SIZE)
    }
}

impl TableQuery {
    pub fn new(predicate: RowPredicate, page_size: usize) -> Self {
        Self {
            predicate,
            search: String::new(),
            page: 0,
            page_size: page_size.max(1),
            currency: CurrencyFormat::default(),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    /// Replace the predicate; resets to the first page when it changed.
    pub fn set_predicate(&mut self, predicate: RowPredicate) {
        if predicate != self.predicate {
            self.predicate = predicate;
            self.page = 0;
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 0;
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn search_matches(&self, record: &PropertyRecord) -> bool {
        let needle = fold(self.search.trim());
        if needle.is_empty() {
            return true;
        }
        [&record.period, &record.district, &record.property_type]
            .iter()
            .any(|v| fold(v).contains(&needle))
            || fold(&format_price(record.price_per_area, &self.currency)).contains(&needle)
            || record.price_per_area.to_string().contains(&needle)
    }

    /// Run the query over the full record list. The requested page is
    /// clamped to the last available one.
    pub fn run<'a>(&self, records: &'a [PropertyRecord]) -> TablePage<'a> {
        let mut matching: Vec<&PropertyRecord> = records
            .iter()
            .filter(|r| self.predicate.test(r) && self.search_matches(r))
            .collect();
        // Stable: rows within a period keep source order.
        matching.sort_by(|a, b| b.period.cmp(&a.period));

        let total = matching.len();
        let mut footer = RunningMean::default();
        for rec in &matching {
            footer.push(rec.price_per_area);
        }

        let page_count = total.div_ceil(self.page_size).max(1);
        let page = self.page.min(page_count - 1);
        let rows = matching
            .into_iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .collect();

        TablePage {
            rows,
            matching: total,
            page,
            page_count,
            footer_mean: footer.mean,
        }
    }
}

/// Lowercase and turn no-break spaces into plain ones, so a typed `55 000`
/// finds the rendered `55\u{a0}000`.
fn fold(text: &str) -> String {
    text.to_lowercase().replace(['\u{a0}', '\u{202f}'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterCriteria;
    use crate::data::model::RecordField;

    fn records() -> Vec<PropertyRecord> {
        (0..25)
            .map(|i| {
                PropertyRecord::new(
                    format!("2024-{:02}", i % 3 + 1),
                    if i % 2 == 0 { "Ленинский" } else { "Свердловский" },
                    "flat",
                    (i * 100) as f64,
                )
            })
            .collect()
    }

    #[test]
    fn test_pagination_and_newest_first() {
        let recs = records();
        let mut q = TableQuery::default();
        let first = q.run(&recs);
        assert_eq!(first.matching, 25);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.rows.len(), 10);
        assert!(first.rows[..8].iter().all(|r| r.period == "2024-03"));
        assert!(first.rows[8..].iter().all(|r| r.period == "2024-02"));

        q.set_page(7);
        let last = q.run(&recs);
        assert_eq!(last.page, 2);
        assert_eq!(last.rows.len(), 5);
        assert!(last.rows.iter().all(|r| r.period == "2024-01"));
    }

    #[test]
    fn test_predicate_and_footer() {
        let recs = records();
        let mut criteria = FilterCriteria::default();
        criteria.set(RecordField::Period, "2024-01");
        let q = TableQuery::new(RowPredicate::new(criteria), 10);

        let page = q.run(&recs);
        // i = 0, 3, ..., 24
        assert_eq!(page.matching, 9);
        assert_eq!(page.footer_mean, 1200.0);
    }

    #[test]
    fn test_search_is_case_insensitive_and_resets_page() {
        let recs = records();
        let mut q = TableQuery::default();
        q.set_page(2);
        q.set_search("СВЕРДЛ");
        assert_eq!(q.page(), 0);

        let page = q.run(&recs);
        assert_eq!(page.matching, 12);
        assert!(page.rows.iter().all(|r| r.district == "Свердловский"));
    }

    #[test]
    fn test_search_matches_formatted_price() {
        let recs = vec![
            PropertyRecord::new("2024-01", "Ленинский", "flat", 50000.5),
            PropertyRecord::new("2024-01", "Ленинский", "flat", 42000.0),
        ];
        let mut q = TableQuery::default();

        // Rendered as "50 001 сом" with no-break spaces.
        q.set_search("50 001");
        let page = q.run(&recs);
        assert_eq!(page.matching, 1);
        assert_eq!(page.rows[0].price_per_area, 50000.5);

        q.set_search("50\u{a0}001 СОМ");
        assert_eq!(q.run(&recs).matching, 1);

        // Raw value still matches.
        q.set_search("50000.5");
        assert_eq!(q.run(&recs).matching, 1);

        let mut dollars = q.clone().with_currency(CurrencyFormat {
            symbol: "$".into(),
            group_separator: ",".into(),
            position: crate::format::SymbolPosition::Prefix,
        });
        dollars.set_search("$42,000");
        assert_eq!(dollars.run(&recs).matching, 1);
    }

    #[test]
    fn test_no_rows() {
        let q = TableQuery::default();
        let page = q.run(&[]);
        assert_eq!(page.matching, 0);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.footer_mean, 0.0);
        assert!(page.rows.is_empty());
    }
}
