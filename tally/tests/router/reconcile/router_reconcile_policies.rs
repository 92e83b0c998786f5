use tally::{Decimal, InvalidTotalPolicy, MetricKey, Outcome, SeriesPoint, Tally, TallyError, ZeroHistoryPolicy};

use crate::helpers::{MockConnector, day, m_both, req};

#[tokio::test]
async fn negative_total_fails_by_default() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[5, 5], -3))
        .build()
        .unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, TallyError::InvalidInput(_)));
}

#[tokio::test]
async fn negative_total_unadjusted_policy_keeps_rounded_history() {
    let history = vec![
        SeriesPoint::new(day(1), Decimal::new(25, 1)),
        SeriesPoint::new(day(2), Decimal::new(14, 1)),
        SeriesPoint::new(day(3), 7u64),
    ];
    let src = MockConnector::builder()
        .name("src")
        .returns_history_ok(history)
        .returns_total_ok(-3)
        .build();
    let tally = Tally::builder()
        .with_connector(src)
        .invalid_total(InvalidTotalPolicy::Unadjusted)
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();

    assert_eq!(report.outcome, Outcome::Unadjusted);
    // 2.5 rounds away from zero, 1.4 rounds down
    assert_eq!(report.series.adjusted_counts(), vec![3, 1, 7]);
    assert_eq!(report.authoritative_total, -3);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].is_invalid_input());
}

#[tokio::test]
async fn zero_history_stays_zero_by_default() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[0, 0, 0], 50))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();

    assert_eq!(report.outcome, Outcome::NoHistory);
    assert_eq!(report.series.adjusted_counts(), vec![0, 0, 0]);
    assert_eq!(report.authoritative_total, 50);
}

#[tokio::test]
async fn empty_history_is_filled_with_zero_days() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[], 50))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 4)).await.unwrap();

    assert_eq!(report.outcome, Outcome::NoHistory);
    assert_eq!(report.series.len(), 4);
    assert_eq!(report.series.total(), 0);
}

#[tokio::test]
async fn uniform_policy_spreads_total_over_zero_history() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[0, 0, 0], 50))
        .zero_history(ZeroHistoryPolicy::Uniform)
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 3)).await.unwrap();

    assert_eq!(report.outcome, Outcome::NoHistory);
    assert_eq!(report.series.adjusted_counts(), vec![17, 17, 16]);
}

#[tokio::test]
async fn zero_total_zeroes_every_period() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[3, 9, 4], 0))
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::clicks(), 3)).await.unwrap();
    assert_eq!(report.outcome, Outcome::Reconciled);
    assert_eq!(report.series.adjusted_counts(), vec![0, 0, 0]);
}

#[tokio::test]
async fn unadjusted_policy_does_not_mask_bad_history() {
    let history = vec![
        SeriesPoint::new(day(1), 4u64),
        SeriesPoint::new(day(2), Decimal::from(-2)),
    ];
    let src = MockConnector::builder()
        .name("src")
        .returns_history_ok(history)
        .returns_total_ok(10)
        .build();
    let tally = Tally::builder()
        .with_connector(src)
        .invalid_total(InvalidTotalPolicy::Unadjusted)
        .build()
        .unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, TallyError::Data(_)));
}

#[tokio::test]
async fn unadjusted_policy_ignores_valid_totals() {
    let tally = Tally::builder()
        .with_connector(m_both("src", &[1, 3], 8))
        .invalid_total(InvalidTotalPolicy::Unadjusted)
        .build()
        .unwrap();

    let report = tally.reconcile(&req(MetricKey::views(), 2)).await.unwrap();
    assert_eq!(report.outcome, Outcome::Reconciled);
    assert_eq!(report.series.adjusted_counts(), vec![2, 6]);
    assert!(report.warnings.is_empty());
}
