//! Reshape the backend's statistics tables into chart series.
//!
//! Every transform returns `None` when the table holds nothing usable; the
//! caller renders that as "no data available".

use serde_json::Value;

use crate::models::cell_as_u64;

/// Country code the backend uses for its totals row.
pub const SENTINEL_COUNTRY: &str = "ZZ";

// ── Creation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CreationChart {
    /// `(country, count)` per row, in input order.
    pub geo: Vec<(String, u64)>,
    /// Mean creations per distinct day bucket.
    pub average_per_day: f64,
    /// `(day bucket, count)` in first-appearance order.
    pub daily_totals: Vec<(String, u64)>,
}

impl CreationChart {
    pub fn average_text(&self) -> String {
        format!("{:.2}", self.average_per_day)
    }
}

/// `[country, count, day]` rows. Row 0 is a totals/header row: it may still
/// show up in `geo` if it carries a real country, but it never counts
/// towards the daily average.
pub fn creation_chart(rows: &[Vec<Value>]) -> Option<CreationChart> {
    if rows.is_empty() {
        return None;
    }

    let geo = rows
        .iter()
        .filter_map(|row| {
            let country = country_of(row)?;
            let count = row.get(1).and_then(cell_as_u64)?;
            Some((country.to_owned(), count))
        })
        .collect();

    let mut daily_totals: Vec<(String, u64)> = Vec::new();
    let mut total = 0u64;
    for row in rows.iter().skip(1) {
        let Some(count) = row.get(1).and_then(cell_as_u64) else {
            tracing::debug!("Skipping creation row with non-numeric count: {:?}", row);
            continue;
        };
        let day = row.get(2).map(bucket_key).unwrap_or_default();

        // a day's sum never exceeds the running total
        let Some(next) = total.checked_add(count) else {
            tracing::warn!("Creation counts overflow at row {:?}", row);
            return None;
        };
        total = next;
        match daily_totals.iter_mut().find(|(d, _)| *d == day) {
            Some((_, sum)) => *sum += count,
            None => daily_totals.push((day, count)),
        }
    }

    if daily_totals.is_empty() {
        return None;
    }

    Some(CreationChart {
        geo,
        average_per_day: total as f64 / daily_totals.len() as f64,
        daily_totals,
    })
}

// ── Usage ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageChart {
    /// `(country, not cached + cached)` per row.
    pub by_country: Vec<(String, u64)>,
}

/// `[country, notCached, cached]` rows; row 0 is a header and is ignored.
pub fn usage_chart(rows: &[Vec<Value>]) -> Option<UsageChart> {
    if rows.is_empty() {
        return None;
    }

    let by_country = rows
        .iter()
        .skip(1)
        .filter_map(|row| {
            let country = country_of(row)?;
            let not_cached = row.get(1).and_then(cell_as_u64);
            let cached = row.get(2).and_then(cell_as_u64);
            match (not_cached, cached) {
                (Some(a), Some(b)) => match a.checked_add(b) {
                    Some(sum) => Some((country.to_owned(), sum)),
                    None => {
                        tracing::debug!("Skipping usage row whose counts overflow: {:?}", row);
                        None
                    }
                },
                _ => {
                    tracing::debug!("Skipping usage row with bad counts: {:?}", row);
                    None
                }
            }
        })
        .collect();

    Some(UsageChart { by_country })
}

// ── Capacity ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityChart {
    pub used: u64,
    pub total: u64,
    pub used_bytes: u64,
    pub saturation_percent: f64,
}

impl CapacityChart {
    pub fn saturation_text(&self) -> String {
        format!("{:.15}", self.saturation_percent)
    }
}

/// Header row, then `[used, total, bytes]` at index 1.
pub fn capacity_chart(rows: &[Vec<Value>]) -> Option<CapacityChart> {
    let row = rows.get(1)?;
    let used = row.first().and_then(cell_as_u64)?;
    let total = row.get(1).and_then(cell_as_u64)?;
    let used_bytes = row.get(2).and_then(cell_as_u64)?;

    if total == 0 {
        tracing::debug!("Link space reports a total of zero");
        return None;
    }

    Some(CapacityChart {
        used,
        total,
        used_bytes,
        saturation_percent: used as f64 / total as f64 * 100.0,
    })
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// A real country code: a non-empty string that is not the totals sentinel.
fn country_of(row: &[Value]) -> Option<&str> {
    row.first()
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty() && *c != SENTINEL_COUNTRY)
}

fn bucket_key(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
