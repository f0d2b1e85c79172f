use std::fmt;

use serde::Serialize;

/// Price or rating cell. Extractors produce `Raw`; normalization turns it into
/// `Number` or drops it to `None` on the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Raw(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self { FieldValue::Number(n) => Some(*n), FieldValue::Raw(_) => None }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Raw(s) => write!(f, "{:?}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Whether the page itself came back. Fields can still be absent on `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Ok,
    Timeout,
    Error,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self { FetchStatus::Ok => "ok", FetchStatus::Timeout => "timeout", FetchStatus::Error => "error" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub source_url: String,
    pub title: Option<String>,
    pub price: Option<FieldValue>,
    pub rating: Option<FieldValue>,
    pub status: FetchStatus,
}

impl ProductRecord {
    /// Row for a page that never became available.
    pub fn absent(url: &str, status: FetchStatus) -> Self {
        ProductRecord { source_url: url.to_string(), title: None, price: None, rating: None, status }
    }
}

pub type ResultTable = Vec<ProductRecord>;

// Result envelope types
#[derive(Serialize)]
pub struct ScrapeTotals { pub ok: usize, pub timeout: usize, pub error: usize }

#[derive(Serialize)]
pub struct ScrapeResult { pub site: &'static str, pub totals: ScrapeTotals, pub records: ResultTable }

impl ScrapeTotals {
    pub fn tally(table: &[ProductRecord]) -> Self {
        let count = |s: FetchStatus| table.iter().filter(|r| r.status == s).count();
        ScrapeTotals { ok: count(FetchStatus::Ok), timeout: count(FetchStatus::Timeout), error: count(FetchStatus::Error) }
    }
}

#[derive(Serialize)]
pub struct SiteRow { pub id: &'static str, pub name: &'static str, pub ready: &'static str, pub title: &'static str, pub price: &'static str, pub rating: &'static str }

#[derive(Serialize)]
pub struct SiteList { pub sites: Vec<SiteRow> }
