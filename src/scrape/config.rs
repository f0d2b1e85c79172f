use std::env;
use std::time::Duration;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub webdriver_url: String,
    pub headless: bool,
    /// Bound on waiting for a page's ready marker.
    pub timeout: Duration,
    /// Pause between consecutive URLs.
    pub delay: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = ScrapeConfig::default();
        let webdriver_url = get("SHOPSCRAPE_WEBDRIVER_URL").filter(|s| !s.trim().is_empty()).unwrap_or(d.webdriver_url);
        let headless = match get("SHOPSCRAPE_VISIBLE_BROWSER").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => false,
            _ => d.headless,
        };
        let secs = |key: &str, default: Duration| {
            get(key).and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_secs).unwrap_or(default)
        };
        ScrapeConfig {
            webdriver_url,
            headless,
            timeout: secs("SHOPSCRAPE_TIMEOUT_SECS", d.timeout),
            delay: secs("SHOPSCRAPE_DELAY_SECS", d.delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> ScrapeConfig {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ScrapeConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(cfg(&[]), ScrapeConfig::default());
        assert_eq!(ScrapeConfig::default().timeout, Duration::from_secs(10));
        assert_eq!(ScrapeConfig::default().delay, Duration::from_secs(2));
    }

    #[test]
    fn reads_overrides() {
        let c = cfg(&[
            ("SHOPSCRAPE_WEBDRIVER_URL", "http://grid:4444"),
            ("SHOPSCRAPE_VISIBLE_BROWSER", "yes"),
            ("SHOPSCRAPE_TIMEOUT_SECS", "30"),
            ("SHOPSCRAPE_DELAY_SECS", "0"),
        ]);
        assert_eq!(c.webdriver_url, "http://grid:4444");
        assert!(!c.headless);
        assert_eq!(c.timeout, Duration::from_secs(30));
        assert_eq!(c.delay, Duration::ZERO);
    }

    #[test]
    fn bad_numbers_fall_back() {
        let c = cfg(&[("SHOPSCRAPE_TIMEOUT_SECS", "soon"), ("SHOPSCRAPE_WEBDRIVER_URL", " ")]);
        assert_eq!(c.timeout, DEFAULT_TIMEOUT);
        assert_eq!(c.webdriver_url, DEFAULT_WEBDRIVER_URL);
    }
}
