use tally::{Decimal, MetricKey, Outcome, ReconcileReport, SeriesPoint, Tally};

use crate::helpers::{ACME, MockConnector, day, m_both, req};

#[tokio::test]
async fn grows_history_onto_larger_total() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[10, 10, 10], 31))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();

    assert_eq!(report.outcome, Outcome::Reconciled);
    assert_eq!(report.series.adjusted_counts(), vec![11, 10, 10]);
    assert_eq!(report.series.total(), 31);
    assert_eq!(report.historical_sum, Decimal::from(30));
    assert_eq!(report.authoritative_total, 31);
    assert_eq!(report.owner, ACME);
    assert_eq!(report.metric, MetricKey::views());
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn shrinks_history_onto_smaller_total() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[40, 30, 30], 10))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();
    assert_eq!(report.series.adjusted_counts(), vec![4, 3, 3]);
}

#[tokio::test]
async fn history_is_normalized_to_the_window() {
    // gap on day 2, duplicate day 3, stray point after the window
    let history = vec![
        SeriesPoint::new(day(3), 1u64),
        SeriesPoint::new(day(1), 2u64),
        SeriesPoint::new(day(3), 1u64),
        SeriesPoint::new(day(10), 50u64),
    ];
    let src = MockConnector::builder()
        .name("src")
        .returns_history_ok(history)
        .returns_total_ok(8)
        .build();
    let tally = Tally::builder().with_connector(src).build().unwrap();

    let report = tally.reconcile(&req(MetricKey::clicks(), 3)).await.unwrap();

    assert_eq!(report.series.periods(), vec![day(1), day(2), day(3)]);
    assert_eq!(report.series.adjusted_counts(), vec![4, 0, 4]);
    assert_eq!(report.historical_sum, Decimal::from(4));
}

#[tokio::test]
async fn raw_values_are_kept_alongside_adjusted() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[8, 8, 9], 10))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();
    let raw: Vec<Decimal> = report.series.iter().map(|p| p.raw).collect();
    assert_eq!(raw, vec![Decimal::from(8), Decimal::from(8), Decimal::from(9)]);
    assert_eq!(report.series.adjusted_counts(), vec![3, 3, 4]);
}

#[tokio::test]
async fn report_serializes_to_json_and_back() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[1, 2, 7], 100))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: ReconcileReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
