pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn scrape() -> LogCtx<ops::scrape::Scrape> { LogCtx::new(config::logs_are_json()) }
pub fn sites() -> LogCtx<ops::sites::Sites> { LogCtx::new(config::logs_are_json()) }
