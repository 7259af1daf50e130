//! ChartController tests: each dataset draws (or degrades) on its own.

mod common;

use common::{Event, FixedStatsApi, RecordingView};
use serde_json::json;
use std::sync::Arc;

use lnkr::controllers::{ChartController, ChartsReport};
use lnkr::models::Dataset;

fn full_backend() -> FixedStatsApi {
    FixedStatsApi::default()
        .with(
            Dataset::Creation,
            json!({ "data": [["ZZ", 10, "d0"], ["US", 3, "d1"], ["FR", 2, "d1"], ["US", 1, "d2"]] }),
        )
        .with(
            Dataset::Use,
            json!({ "data": [["country", "count-notcached", "count-cached"], ["US", "2", "3"]] }),
        )
        .with(
            Dataset::LinkSpace,
            json!({ "data": [["used", "total", "data_bytes"], [50, 200, 1024]] }),
        )
}

#[tokio::test]
async fn draws_all_three_charts() {
    let charts = ChartController::new(Arc::new(full_backend()), RecordingView::default());

    let report = charts.draw_all().await;

    assert_eq!(
        report,
        ChartsReport {
            creation: true,
            usage: true,
            capacity: true
        }
    );
    assert_eq!(report.drawn(), 3);

    let events = charts.view().events();
    assert_eq!(events.len(), 3);
    let creation = events
        .iter()
        .find_map(|e| match e {
            Event::Creation(c) => Some(c),
            _ => None,
        })
        .unwrap();
    assert_eq!(creation.average_text(), "3.00");
    assert!(events.iter().any(|e| matches!(e, Event::Usage(u) if u.by_country == vec![("US".to_string(), 5)])));
    assert!(events.iter().any(|e| matches!(e, Event::Capacity(c) if c.saturation_text() == "25.000000000000000")));
}

#[tokio::test]
async fn one_failing_endpoint_does_not_block_the_others() {
    let api = full_backend().failing(Dataset::Use);
    let charts = ChartController::new(Arc::new(api), RecordingView::default());

    let report = charts.draw_all().await;

    assert!(report.creation);
    assert!(!report.usage);
    assert!(report.capacity);
    assert!(charts
        .view()
        .events()
        .contains(&Event::Unavailable(Dataset::Use)));
}

#[tokio::test]
async fn empty_or_malformed_tables_mean_no_data() {
    let api = FixedStatsApi::default()
        .with(Dataset::Creation, json!({}))
        .with(Dataset::Use, json!({ "data": [] }))
        .with(Dataset::LinkSpace, json!({ "data": [["used", "total", "data_bytes"], [3, 0, 10]] }));
    let charts = ChartController::new(Arc::new(api), RecordingView::default());

    let report = charts.draw_all().await;

    assert_eq!(report.drawn(), 0);
    let events = charts.view().events();
    for dataset in Dataset::ALL {
        assert!(events.contains(&Event::Unavailable(dataset)), "{dataset:?}");
    }
}
