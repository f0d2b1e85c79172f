use std::marker::PhantomData;
use tracing::{info, debug, warn, error, Span};

use crate::scrape::types::{FetchStatus, ProductRecord};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

/// Handle components log through. Built once by the application and passed
/// into whatever needs it; the subscriber behind it is configured in `main`.
pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> Clone for LogCtx<O> {
    fn clone(&self) -> Self { LogCtx { json: self.json, _marker: PhantomData } }
}

impl<O: OpMarker> LogCtx<O> {
    pub fn new(json: bool) -> Self { LogCtx { json, _marker: PhantomData } }

    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), phase = ph.name(), "span_start");
        } else {
            debug!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn debug(&self, msg: impl AsRef<str>) { if self.json { debug!(op = %self.op_name(), "{}", msg.as_ref()); } else { debug!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{} {}", msg, details); }
    }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { warn!(op = %self.op_name(), details = %details, "{}", msg); }
        else { warn!("{} {}", msg, details); }
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { error!(op = %self.op_name(), details = %details, "{}", msg); }
        else { error!("{} {}", msg, details); }
    }
}

// Scrape-specific helpers remain available on the typed context
impl LogCtx<crate::telemetry::ops::scrape::Scrape> {
    pub fn record(&self, site: &str, rec: &ProductRecord) {
        let title = rec.title.as_deref().unwrap_or("-");
        let price = rec.price.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        let rating = rec.rating.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        let status = rec.status.as_str();
        if self.json { info!(op = %self.op_name(), site, url = %rec.source_url, status, title, price = %price, rating = %rating, "record"); }
        else { info!("🛒 {} {} [{}] title={:?} price={} rating={}", site, rec.source_url, status, title, price, rating); }
    }

    pub fn totals(&self, site: &str, ok: usize, timeout: usize, error: usize) {
        if self.json { info!(op = %self.op_name(), site, ok, timeout, error, "scrape_totals"); }
        else { info!("📊 Scrape totals — site={} ok={} timeout={} error={}", site, ok, timeout, error); }
    }

    pub fn outcome(&self, status: FetchStatus, url: &str, reason: Option<&str>) {
        match status {
            FetchStatus::Ok => self.info_kv("✅ page ready", [("url", url.to_string())]),
            FetchStatus::Timeout => self.warn_kv("⏱️ page load timeout", [("url", url.to_string())]),
            FetchStatus::Error => self.error_kv("❌ page fetch failed", [("url", url.to_string()), ("reason", reason.unwrap_or("").to_string())]),
        }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
