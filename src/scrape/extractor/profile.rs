use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SiteId { Amazon, Ebay, AliExpress, Walmart }

impl SiteId {
    pub const ALL: [SiteId; 4] = [SiteId::Amazon, SiteId::Ebay, SiteId::AliExpress, SiteId::Walmart];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteId::Amazon => "amazon",
            SiteId::Ebay => "ebay",
            SiteId::AliExpress => "aliexpress",
            SiteId::Walmart => "walmart",
        }
    }

    pub fn profile(&self) -> &'static SiteProfile {
        match self {
            SiteId::Amazon => &AMAZON,
            SiteId::Ebay => &EBAY,
            SiteId::AliExpress => &ALIEXPRESS,
            SiteId::Walmart => &WALMART,
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Accepts the site name or its letter slot (`site-a` .. `site-d`), case-insensitive.
impl FromStr for SiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.trim().to_ascii_lowercase().chars().filter(|c| *c != '-' && *c != '_').collect();
        match key.as_str() {
            "amazon" | "sitea" => Ok(SiteId::Amazon),
            "ebay" | "siteb" => Ok(SiteId::Ebay),
            "aliexpress" | "sitec" => Ok(SiteId::AliExpress),
            "walmart" | "sited" => Ok(SiteId::Walmart),
            _ => Err(anyhow!(
                "invalid site identifier {:?} (expected one of: {})",
                s,
                SiteId::ALL.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
            )),
        }
    }
}

/// CSS selectors for one storefront. `ready` is what the fetcher waits on
/// before it hands the page over.
#[derive(Debug)]
pub struct SiteProfile {
    pub id: SiteId,
    pub name: &'static str,
    pub ready: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub rating: &'static str,
}

pub static AMAZON: SiteProfile = SiteProfile {
    id: SiteId::Amazon,
    name: "Amazon",
    ready: "#productTitle",
    title: "span#productTitle",
    price: "span#priceblock_ourprice",
    rating: "span#acrPopover",
};

pub static EBAY: SiteProfile = SiteProfile {
    id: SiteId::Ebay,
    name: "eBay",
    ready: "h1 span span",
    title: "h1.x-item-title__mainTitle",
    price: "span.x-price-primary",
    rating: "div.x-star-rating",
};

pub static ALIEXPRESS: SiteProfile = SiteProfile {
    id: SiteId::AliExpress,
    name: "AliExpress",
    ready: "h1.product-title-text",
    title: "h1.product-title-text",
    price: "span.product-price-value",
    rating: "div.feedback-ratings",
};

pub static WALMART: SiteProfile = SiteProfile {
    id: SiteId::Walmart,
    name: "Walmart",
    ready: "h1.prod-ProductTitle",
    title: "h1.prod-ProductTitle",
    price: "span.price-group",
    rating: "span.ReviewsHeader-ratingPrefix",
};

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn parses_names_and_letter_slots() {
        assert_eq!("Amazon".parse::<SiteId>().unwrap(), SiteId::Amazon);
        assert_eq!("eBay".parse::<SiteId>().unwrap(), SiteId::Ebay);
        assert_eq!("SiteA".parse::<SiteId>().unwrap(), SiteId::Amazon);
        assert_eq!("site-b".parse::<SiteId>().unwrap(), SiteId::Ebay);
        assert_eq!(" walmart ".parse::<SiteId>().unwrap(), SiteId::Walmart);
    }

    #[test]
    fn rejects_unknown_site() {
        let err = "etsy".parse::<SiteId>().unwrap_err();
        assert!(err.to_string().contains("invalid site identifier"));
    }

    #[test]
    fn registry_is_keyed_by_id() {
        for id in SiteId::ALL {
            assert_eq!(id.profile().id, id);
        }
    }

    #[test]
    fn all_selectors_parse() {
        for id in SiteId::ALL {
            let p = id.profile();
            for sel in [p.ready, p.title, p.price, p.rating] {
                assert!(Selector::parse(sel).is_ok(), "bad selector {sel} for {}", p.name);
            }
        }
    }
}
