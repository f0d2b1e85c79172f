use std::sync::OnceLock;

use regex::Regex;

use super::types::{FieldValue, ProductRecord};

fn non_numeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9.]").expect("static pattern"))
}

/// Rewrite raw price/rating text as numbers. Row count, order, url, title and
/// status are left alone. Running it twice changes nothing.
pub fn clean(table: Vec<ProductRecord>) -> Vec<ProductRecord> {
    table.into_iter().map(clean_record).collect()
}

pub fn clean_record(mut rec: ProductRecord) -> ProductRecord {
    rec.price = rec.price.and_then(to_number);
    rec.rating = rec.rating.and_then(to_number);
    rec
}

fn to_number(v: FieldValue) -> Option<FieldValue> {
    match v {
        FieldValue::Number(n) => Some(FieldValue::Number(n)),
        FieldValue::Raw(s) => parse_numeric(&s).map(FieldValue::Number),
    }
}

/// Keep only digits and dots, then parse. `None` when nothing usable is left.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let digits = non_numeric().replace_all(text, "");
    if digits.is_empty() { return None; }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::types::FetchStatus;

    fn rec(url: &str, price: Option<&str>, rating: Option<&str>) -> ProductRecord {
        ProductRecord {
            source_url: url.to_string(),
            title: Some(format!("title {url}")),
            price: price.map(|s| FieldValue::Raw(s.to_string())),
            rating: rating.map(|s| FieldValue::Raw(s.to_string())),
            status: FetchStatus::Ok,
        }
    }

    #[test]
    fn strips_currency_and_separators() {
        assert_eq!(parse_numeric("$1,299.99"), Some(1299.99));
        assert_eq!(parse_numeric("US $24.00"), Some(24.0));
        assert_eq!(parse_numeric("4.8"), Some(4.8));
    }

    #[test]
    fn unparseable_is_absent() {
        assert_eq!(parse_numeric("N/A"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("."), None);
        assert_eq!(parse_numeric("1.2.3"), None);
    }

    #[test]
    fn minus_sign_is_stripped() {
        assert_eq!(parse_numeric("-15.50"), Some(15.5));
    }

    #[test]
    fn arbitrary_text_never_negative_or_panics() {
        let inputs = [
            "", " ", "💰💰", "NaN", "inf", "-inf", "1e10", "--", "..", "0", "-0", "٣٫٥",
            "€ 12,50", "£-3", "\u{0}\u{7f}", "9999999999999999999999999999.9", "a1b2c3.d4",
        ];
        for s in inputs {
            if let Some(n) = parse_numeric(s) {
                assert!(n >= 0.0 && n.is_finite(), "{s:?} -> {n}");
            }
        }
        assert_eq!(parse_numeric("1e10"), Some(110.0));
        assert_eq!(parse_numeric("NaN"), None);
    }

    #[test]
    fn clean_keeps_rows_and_order() {
        let table = vec![
            rec("a", Some("$1,299.99"), Some("4.5")),
            ProductRecord::absent("b", FetchStatus::Timeout),
            rec("c", Some("N/A"), None),
        ];
        let out = clean(table);
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().map(|r| r.source_url.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(out[0].price, Some(FieldValue::Number(1299.99)));
        assert_eq!(out[0].rating, Some(FieldValue::Number(4.5)));
        assert_eq!(out[1].price, None);
        assert_eq!(out[1].status, FetchStatus::Timeout);
        assert_eq!(out[2].price, None);
        assert_eq!(out[2].title.as_deref(), Some("title c"));
    }

    #[test]
    fn clean_is_idempotent() {
        let table = vec![
            rec("a", Some("$1,299.99"), Some("4.5 out of 5 stars")),
            rec("b", Some("N/A"), Some("")),
            rec("c", None, Some("3")),
            ProductRecord::absent("d", FetchStatus::Error),
        ];
        let once = clean(table);
        let twice = clean(once.clone());
        assert_eq!(once, twice);
    }
}
