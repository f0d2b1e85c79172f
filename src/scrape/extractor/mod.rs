use scraper::{Html, Selector};

use super::types::{FetchStatus, FieldValue, ProductRecord};

pub mod profile;

pub use profile::{SiteId, SiteProfile};

/// Pull title/price/rating out of a rendered page. Each field is looked up on
/// its own; a miss leaves only that field empty.
pub fn extract(profile: &SiteProfile, html: &str, url: &str) -> ProductRecord {
    let doc = Html::parse_document(html);
    ProductRecord {
        source_url: url.to_string(),
        title: locate(&doc, profile.title),
        price: locate(&doc, profile.price).map(FieldValue::Raw),
        rating: locate(&doc, profile.rating).map(FieldValue::Raw),
        status: FetchStatus::Ok,
    }
}

fn locate(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let node = doc.select(&sel).next()?;
    let text = collapse_whitespace(&node.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}

fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::profile::{ALIEXPRESS, AMAZON, EBAY, WALMART};

    fn raw(s: &str) -> Option<FieldValue> { Some(FieldValue::Raw(s.to_string())) }

    #[test]
    fn amazon_all_fields() {
        let html = r#"
        <html><body>
          <span id="productTitle">
            Widget Pro 3000
          </span>
          <span id="priceblock_ourprice">$1,299.99</span>
          <span id="acrPopover"> 4.5 out of 5 stars </span>
        </body></html>
        "#;
        let rec = extract(&AMAZON, html, "https://www.amazon.com/dp/B0001");
        assert_eq!(rec.source_url, "https://www.amazon.com/dp/B0001");
        assert_eq!(rec.title.as_deref(), Some("Widget Pro 3000"));
        assert_eq!(rec.price, raw("$1,299.99"));
        assert_eq!(rec.rating, raw("4.5 out of 5 stars"));
        assert_eq!(rec.status, FetchStatus::Ok);
    }

    #[test]
    fn missing_title_keeps_price_and_rating() {
        let html = r#"
        <html><body>
          <h1 class="x-item-title__other">Not the title</h1>
          <span class="x-price-primary"><span>US $24.00</span></span>
          <div class="x-star-rating"><span>4.8</span></div>
        </body></html>
        "#;
        let rec = extract(&EBAY, html, "url1");
        assert_eq!(rec.title, None);
        assert_eq!(rec.price, raw("US $24.00"));
        assert_eq!(rec.rating, raw("4.8"));
    }

    #[test]
    fn first_match_wins_and_text_spans_nodes() {
        let html = r#"
        <html><body>
          <h1 class="product-title-text">Phone <b>Case</b>
             Blue</h1>
          <h1 class="product-title-text">Second</h1>
          <span class="product-price-value">US $3.10</span>
        </body></html>
        "#;
        let rec = extract(&ALIEXPRESS, html, "url2");
        assert_eq!(rec.title.as_deref(), Some("Phone Case Blue"));
        assert_eq!(rec.price, raw("US $3.10"));
        assert_eq!(rec.rating, None);
    }

    #[test]
    fn whitespace_only_node_is_absent() {
        let html = r#"<html><body><h1 class="prod-ProductTitle">   </h1><span class="price-group">$5</span></body></html>"#;
        let rec = extract(&WALMART, html, "url3");
        assert_eq!(rec.title, None);
        assert_eq!(rec.price, raw("$5"));
    }

    #[test]
    fn empty_page_keeps_url() {
        let rec = extract(&WALMART, "", "url4");
        assert_eq!(rec.source_url, "url4");
        assert_eq!((rec.title, rec.price, rec.rating), (None, None, None));
    }
}
