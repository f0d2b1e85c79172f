use std::io::{self, Write};

use crate::scrape::types::{FieldValue, ProductRecord, ScrapeResult, SiteList};

use super::presenter::TextView;

const TITLE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 40;

impl TextView for ScrapeResult {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "Scraped {} product(s) from {}", self.records.len(), self.site)?;
        render_table(&self.records, w)?;
        writeln!(w)?;
        writeln!(w, "Price by product")?;
        render_price_chart(&self.records, w)?;
        writeln!(w, "ok={} timeout={} error={}", self.totals.ok, self.totals.timeout, self.totals.error)
    }
}

impl TextView for SiteList {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for s in &self.sites {
            writeln!(w, "{:<12} {:<12} ready={}", s.id, s.name, s.ready)?;
            writeln!(w, "{:<12} title={} price={} rating={}", "", s.title, s.price, s.rating)?;
        }
        Ok(())
    }
}

pub fn render_table(records: &[ProductRecord], w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:<4} {:<tw$} {:>12} {:>10} {:<8} url", "#", "title", "price", "rating", "status", tw = TITLE_WIDTH)?;
    for (i, r) in records.iter().enumerate() {
        writeln!(
            w,
            "{:<4} {:<tw$} {:>12} {:>10} {:<8} {}",
            i,
            clip(r.title.as_deref().unwrap_or("-"), TITLE_WIDTH),
            cell(r.price.as_ref()),
            cell(r.rating.as_ref()),
            r.status.as_str(),
            r.source_url,
            tw = TITLE_WIDTH,
        )?;
    }
    Ok(())
}

/// Horizontal bars scaled to the largest numeric price; rows without a price
/// are listed as `n/a` so every product keeps its slot on the axis.
pub fn render_price_chart(records: &[ProductRecord], w: &mut dyn Write) -> io::Result<()> {
    let max = records
        .iter()
        .filter_map(|r| r.price.as_ref().and_then(FieldValue::as_number))
        .fold(0.0_f64, f64::max);
    for r in records {
        let label = clip(r.title.as_deref().unwrap_or(&r.source_url), TITLE_WIDTH);
        match r.price.as_ref().and_then(FieldValue::as_number) {
            Some(p) => {
                let len = if max > 0.0 { ((p / max) * BAR_WIDTH as f64).round() as usize } else { 0 };
                writeln!(w, "{:<tw$} |{} {}", label, "█".repeat(len), p, tw = TITLE_WIDTH)?;
            }
            None => writeln!(w, "{:<tw$} | n/a", label, tw = TITLE_WIDTH)?,
        }
    }
    Ok(())
}

fn cell(v: Option<&FieldValue>) -> String {
    match v {
        Some(FieldValue::Number(n)) => n.to_string(),
        Some(FieldValue::Raw(s)) => clip(s, 12),
        None => "-".to_string(),
    }
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max { return s.to_string(); }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::types::{FetchStatus, ScrapeTotals};

    fn rec(url: &str, title: Option<&str>, price: Option<f64>) -> ProductRecord {
        ProductRecord {
            source_url: url.to_string(),
            title: title.map(str::to_string),
            price: price.map(FieldValue::Number),
            rating: None,
            status: FetchStatus::Ok,
        }
    }

    fn render(f: impl Fn(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn chart_scales_to_max_price() {
        let records = vec![rec("a", Some("Big"), Some(100.0)), rec("b", Some("Half"), Some(50.0))];
        let out = render(|w| render_price_chart(&records, w));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn chart_keeps_rows_without_price() {
        let records = vec![rec("https://x/1", None, None)];
        let out = render(|w| render_price_chart(&records, w));
        assert!(out.starts_with("https://x/1"));
        assert!(out.contains("n/a"));
    }

    #[test]
    fn table_has_one_line_per_record() {
        let result = ScrapeResult {
            site: "ebay",
            totals: ScrapeTotals { ok: 1, timeout: 1, error: 0 },
            records: vec![rec("u1", Some("Lamp"), Some(9.5)), ProductRecord::absent("u2", FetchStatus::Timeout)],
        };
        let out = render(|w| result.render_text(w));
        assert!(out.contains("Scraped 2 product(s) from ebay"));
        assert!(out.lines().any(|l| l.contains("Lamp") && l.contains("9.5") && l.ends_with("u1")));
        assert!(out.lines().any(|l| l.contains("timeout") && l.ends_with("u2")));
        assert!(out.contains("ok=1 timeout=1 error=0"));
    }

    #[test]
    fn long_titles_are_clipped() {
        let s = clip(&"x".repeat(60), 10);
        assert_eq!(s.chars().count(), 10);
        assert!(s.ends_with('…'));
    }
}
