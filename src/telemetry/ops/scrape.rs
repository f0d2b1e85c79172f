use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Scrape;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Url, Fetch, Extract, Normalize }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Url => "url",
        Phase::Fetch => "fetch",
        Phase::Extract => "extract",
        Phase::Normalize => "normalize",
    }}
    fn span(&self) -> Span { match self {
        Phase::Url => info_span!("url"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Extract => info_span!("extract"),
        Phase::Normalize => info_span!("normalize"),
    }}
}

impl OpMarker for Scrape {
    const NAME: &'static str = "scrape";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("scrape") }
}
