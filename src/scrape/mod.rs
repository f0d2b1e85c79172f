use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;

use crate::output::config::OutputConfig;
use crate::output::types::Meta;
use crate::output::Emitter;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::telemetry::ops::sites::Phase as SitesPhase;

pub mod config;
pub mod dispatch;
pub mod extractor;
pub mod fetch;
pub mod normalize;
pub mod types;

use config::ScrapeConfig;
use dispatch::Dispatcher;
use extractor::SiteId;
use fetch::WebDriverFetcher;
use types::{ScrapeResult, ScrapeTotals, SiteList, SiteRow};

/// shopscrape scrape --site <id> --urls a,b,c
#[derive(Args)]
pub struct ScrapeCmd {
    /// amazon | ebay | aliexpress | walmart (or site-a .. site-d)
    #[arg(long)] pub site: String,
    /// Comma separated product URLs
    #[arg(long)] pub urls: Option<String>,
    /// Product URL; repeatable
    #[arg(long = "url")] pub url: Vec<String>,
    /// Show the browser window instead of running headless
    #[arg(long, default_value_t = false)] pub headed: bool,
    #[arg(long)] pub timeout_secs: Option<u64>,
    #[arg(long)] pub delay_secs: Option<u64>,
    #[arg(long)] pub webdriver_url: Option<String>,
    /// Skip normalization and report the text as scraped
    #[arg(long, default_value_t = false)] pub raw: bool,
}

/// shopscrape sites
#[derive(Args)]
pub struct SitesCmd {}

impl ScrapeCmd {
    fn config(&self, mut cfg: ScrapeConfig) -> ScrapeConfig {
        if let Some(u) = &self.webdriver_url { cfg.webdriver_url = u.clone(); }
        if self.headed { cfg.headless = false; }
        if let Some(s) = self.timeout_secs { cfg.timeout = Duration::from_secs(s); }
        if let Some(s) = self.delay_secs { cfg.delay = Duration::from_secs(s); }
        cfg
    }

    fn url_list(&self) -> Vec<String> {
        let mut urls = self.urls.as_deref().map(dispatch::split_urls).unwrap_or_default();
        urls.extend(self.url.iter().cloned());
        urls
    }
}

pub async fn run(args: ScrapeCmd, out: OutputConfig) -> Result<()> {
    let started = Instant::now();
    let cfg = args.config(ScrapeConfig::from_env());
    let log = telemetry::scrape();
    let _g = log.root_span_kv([
        ("site", args.site.clone()),
        ("headless", cfg.headless.to_string()),
        ("timeout_s", cfg.timeout.as_secs().to_string()),
        ("delay_s", cfg.delay.as_secs().to_string()),
        ("raw", args.raw.to_string()),
    ]).entered();

    let site: SiteId = args.site.parse()?;
    let urls = args.url_list();
    let n = dispatch::filter_urls(&urls).len();
    if n == 0 { bail!("Please enter at least one URL to scrape (--urls or --url)"); }
    log.info(format!("📝 Scraping {} product(s) from {}", n, site.profile().name));

    let fetcher = WebDriverFetcher::new(cfg.webdriver_url.clone(), cfg.headless, log.clone());
    let dispatcher = Dispatcher::new(fetcher, log.clone(), cfg.timeout, cfg.delay);
    let mut records = dispatcher.run(site.as_str(), &urls).await?;

    if !args.raw {
        let _s = log.span(&ScrapePhase::Normalize).entered();
        records = normalize::clean(records);
    }

    let totals = ScrapeTotals::tally(&records);
    log.totals(site.as_str(), totals.ok, totals.timeout, totals.error);

    let result = ScrapeResult { site: site.as_str(), totals, records };
    let meta = Meta { duration_ms: Some(started.elapsed().as_millis()) };
    Emitter::from_config(out).emit("scrape", &result, Some(meta))
}

pub fn list_sites(_args: SitesCmd, out: OutputConfig) -> Result<()> {
    let log = telemetry::sites();
    let _g = log.root_span().entered();
    let _s = log.span(&SitesPhase::List).entered();
    let sites = SiteId::ALL
        .iter()
        .map(|id| id.profile())
        .map(|p| SiteRow { id: p.id.as_str(), name: p.name, ready: p.ready, title: p.title, price: p.price, rating: p.rating })
        .collect();
    log.debug("📡 Site registry listed");
    Emitter::from_config(out).emit("sites", &SiteList { sites }, None)
}
