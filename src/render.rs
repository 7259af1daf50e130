//! Text rendering for the command line: the form and chart views plus the
//! history table.

use chrono::{DateTime, Duration, Utc};
use std::io::Write;
use std::sync::Mutex;

use crate::aggregate::{CapacityChart, CreationChart, UsageChart};
use crate::controllers::{ChartView, FormView};
use crate::models::{Dataset, ShortLink};
use crate::validate::{ErrorKind, Field};

// ── Display helpers ────────────────────────────────────────────────────────

/// Drop a leading `www.` so links read `example.com/abc`.
pub fn display_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Public URL of a short link.
pub fn short_url(host: &str, code: &str) -> String {
    format!("http://{}/{}", display_host(host), code)
}

/// Conversational age of a timestamp (milliseconds since the epoch).
pub fn age_label(created_at: i64, now: DateTime<Utc>) -> &'static str {
    let age = now.timestamp_millis().saturating_sub(created_at);
    let age = Duration::milliseconds(age);

    if age > Duration::days(365) {
        "year(s) ago"
    } else if age > Duration::days(30) {
        "month(s) ago"
    } else if age > Duration::days(1) {
        "day(s) ago"
    } else if age > Duration::hours(1) {
        "hour(s) ago"
    } else if age > Duration::minutes(2) {
        "minute(s) ago"
    } else {
        "now"
    }
}

pub const HISTORY_CAPTION: &str = "Short Links created from this client";

/// History as a table, newest first.
pub fn history_table(links: &[ShortLink], host: &str, now: DateTime<Utc>) -> String {
    let mut out = format!("{HISTORY_CAPTION}\n");
    if links.is_empty() {
        out.push_str("No Short Links\n");
        return out;
    }

    let host = display_host(host);
    let rows: Vec<(String, &str, &str)> = links
        .iter()
        .rev()
        .map(|l| (format!("{}/{}", host, l.code), l.target.as_str(), age_label(l.created_at, now)))
        .collect();

    let short_width = rows
        .iter()
        .map(|r| r.0.len())
        .chain(std::iter::once("Short Link".len()))
        .max()
        .unwrap_or_default();
    let target_width = rows
        .iter()
        .map(|r| r.1.len())
        .chain(std::iter::once("Target URL".len()))
        .max()
        .unwrap_or_default();

    out.push_str(&format!(
        "{:<short_width$}  {:<target_width$}  Created\n",
        "Short Link", "Target URL"
    ));
    for (short, target, age) in rows {
        out.push_str(&format!("{short:<short_width$}  {target:<target_width$}  {age}\n"));
    }
    out
}

// ── Terminal view ──────────────────────────────────────────────────────────

/// Renders form and chart events as plain text lines.
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    host: String,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout(host: impl Into<String>) -> Self {
        Self::new(std::io::stdout(), host)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, host: impl Into<String>) -> Self {
        Self {
            out: Mutex::new(out),
            host: host.into(),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{text}") {
            tracing::debug!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write + Send> FormView for TerminalView<W> {
    fn set_busy(&self, busy: bool) {
        if busy {
            self.line("Please wait ...");
        }
    }

    fn show_errors(&self, errors: &[ErrorKind]) {
        for kind in errors {
            let field = match kind.field() {
                Field::Target => "target",
                Field::Alias => "alias",
            };
            self.line(&format!("error [{field}]: {}", kind.message()));
        }
    }

    fn show_failure(&self, message: &str) {
        self.line(&format!("error: {message}"));
    }

    fn show_created(&self, link: &ShortLink, short_url: &str) {
        self.line(&format!(
            "Shortlink {}/{} created.",
            display_host(&self.host),
            link.code
        ));
        self.line(&format!("  {} -> {}", short_url, link.target));
    }

    fn show_notice(&self, message: &str) {
        self.line(&format!("note: {message}"));
    }

    fn reset(&self) {}
}

impl<W: Write + Send> ChartView for TerminalView<W> {
    fn draw_creation(&self, chart: &CreationChart) {
        self.line(&format!(
            "{} Short Links created per day.",
            chart.average_text()
        ));
        self.line("Creations by country:");
        for (country, count) in &chart.geo {
            self.line(&format!("  {country:<4} {count}"));
        }
    }

    fn draw_usage(&self, chart: &UsageChart) {
        self.line("Short link use by country:");
        if chart.by_country.is_empty() {
            self.line("  (none)");
        }
        for (country, count) in &chart.by_country {
            self.line(&format!("  {country:<4} {count}"));
        }
    }

    fn draw_capacity(&self, chart: &CapacityChart) {
        self.line(&format!("{} bytes used by Short Links", chart.used_bytes));
        self.line(&format!(
            "{}% of links are used.",
            chart.saturation_text()
        ));
        self.line(&format!("(That's {}/{})", chart.used, chart.total));
    }

    fn unavailable(&self, dataset: Dataset) {
        self.line(&format!("No {} data available.", dataset.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> i64 {
        (noon() - d).timestamp_millis()
    }

    #[test]
    fn short_urls_drop_www() {
        assert_eq!(short_url("www.lnkr.co.za", "abc"), "http://lnkr.co.za/abc");
        assert_eq!(short_url("localhost:8080", "abc"), "http://localhost:8080/abc");
    }

    #[test]
    fn ages_read_conversationally() {
        assert_eq!(age_label(ago(Duration::seconds(30)), noon()), "now");
        assert_eq!(age_label(ago(Duration::minutes(2)), noon()), "now");
        assert_eq!(age_label(ago(Duration::minutes(3)), noon()), "minute(s) ago");
        assert_eq!(age_label(ago(Duration::hours(2)), noon()), "hour(s) ago");
        assert_eq!(age_label(ago(Duration::days(3)), noon()), "day(s) ago");
        assert_eq!(age_label(ago(Duration::days(45)), noon()), "month(s) ago");
        assert_eq!(age_label(ago(Duration::days(400)), noon()), "year(s) ago");
        assert_eq!(age_label(ago(Duration::days(-1)), noon()), "now");
    }

    #[test]
    fn empty_history_says_so() {
        let table = history_table(&[], "lnkr.co.za", noon());
        assert_eq!(table, format!("{HISTORY_CAPTION}\nNo Short Links\n"));
    }

    #[test]
    fn history_lists_newest_first() {
        let links = vec![
            ShortLink::new("old", "http://old.example.com", ago(Duration::days(3))),
            ShortLink::new("new", "http://new.example.com", ago(Duration::seconds(5))),
        ];
        let table = history_table(&links, "www.lnkr.co.za", noon());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], HISTORY_CAPTION);
        assert!(lines[1].starts_with("Short Link"));
        assert!(lines[2].starts_with("lnkr.co.za/new"));
        assert!(lines[2].ends_with("now"));
        assert!(lines[3].starts_with("lnkr.co.za/old"));
        assert!(lines[3].ends_with("day(s) ago"));
    }

    #[test]
    fn terminal_view_prints_one_line_per_error() {
        let view = TerminalView::new(Vec::new(), "lnkr.co.za");
        view.show_errors(&[ErrorKind::AliasReserved, ErrorKind::TargetNotUrl]);
        let text = String::from_utf8(view.into_inner()).unwrap();

        assert_eq!(
            text,
            "error [alias]: You cannot use that short link, it is in use.\n\
             error [target]: Please provide a valid http or https URL to shorten.\n"
        );
    }

    #[test]
    fn terminal_view_draws_capacity_text() {
        let view = TerminalView::new(Vec::new(), "lnkr.co.za");
        view.draw_capacity(&CapacityChart {
            used: 50,
            total: 200,
            used_bytes: 1024,
            saturation_percent: 25.0,
        });
        let text = String::from_utf8(view.into_inner()).unwrap();

        assert!(text.contains("1024 bytes used by Short Links"));
        assert!(text.contains("25.000000000000000% of links are used."));
        assert!(text.contains("(That's 50/200)"));
    }
}
