use std::time::Duration;

use anyhow::Result;

use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::scrape::{Phase as ScrapePhase, Scrape};

use super::extractor::{self, SiteId};
use super::fetch::{PageFetcher, PageOutcome};
use super::types::{FetchStatus, ProductRecord, ResultTable};

pub struct Dispatcher<F: PageFetcher> {
    fetcher: F,
    log: LogCtx<Scrape>,
    timeout: Duration,
    delay: Duration,
}

impl<F: PageFetcher> Dispatcher<F> {
    pub fn new(fetcher: F, log: LogCtx<Scrape>, timeout: Duration, delay: Duration) -> Self {
        Dispatcher { fetcher, log, timeout, delay }
    }

    /// Scrape every non-blank URL in order, one row per URL. The only error is
    /// an unknown site, raised before anything is fetched.
    pub async fn run<S: AsRef<str>>(&self, site: &str, urls: &[S]) -> Result<ResultTable> {
        let site: SiteId = site.parse()?;
        Ok(self.run_site(site, urls).await)
    }

    async fn run_site<S: AsRef<str>>(&self, site: SiteId, urls: &[S]) -> ResultTable {
        let profile = site.profile();
        let urls = filter_urls(urls);
        let mut table: ResultTable = Vec::with_capacity(urls.len());

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let _u = self.log.span_kv(&ScrapePhase::Url, [("site", site.to_string()), ("url", url.to_string())]).entered();
            self.log.info_kv("🔎 scraping", [("site", profile.name.to_string()), ("url", url.to_string()), ("host", host_of(url))]);

            let outcome = {
                let _s = self.log.span(&ScrapePhase::Fetch).entered();
                self.fetcher.fetch(url, profile.ready, self.timeout).await
            };
            let rec = match outcome {
                PageOutcome::Rendered(page) => {
                    self.log.outcome(FetchStatus::Ok, url, None);
                    let _s = self.log.span(&ScrapePhase::Extract).entered();
                    extractor::extract(profile, &page.html, &page.url)
                }
                PageOutcome::Timeout { url } => {
                    self.log.outcome(FetchStatus::Timeout, &url, None);
                    ProductRecord::absent(&url, FetchStatus::Timeout)
                }
                PageOutcome::Failed { url, reason } => {
                    self.log.outcome(FetchStatus::Error, &url, Some(&reason));
                    ProductRecord::absent(&url, FetchStatus::Error)
                }
            };
            self.log.record(site.as_str(), &rec);
            table.push(rec);
        }
        table
    }
}

/// Trim entries and drop the blank ones; a blank URL is not a unit of work.
pub fn filter_urls<S: AsRef<str>>(urls: &[S]) -> Vec<&str> {
    urls.iter().map(|u| u.as_ref().trim()).filter(|u| !u.is_empty()).collect()
}

/// Split a comma separated URL list as typed into a form field.
pub fn split_urls(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn host_of(url: &str) -> String {
    url::Url::parse(url).ok().and_then(|u| u.host_str().map(|s| s.to_string())).unwrap_or_default()
}
