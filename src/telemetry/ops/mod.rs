pub mod scrape;
pub mod sites;
