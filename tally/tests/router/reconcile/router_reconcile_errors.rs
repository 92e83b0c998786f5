use tally::{MetricKey, SeriesPoint, Tally, TallyError};

use crate::helpers::{MockConnector, day, m_hist, m_total, req};

#[tokio::test]
async fn no_totals_source_is_unsupported() {
    let tally = Tally::builder()
        .with_connector(m_hist("hist_only", &[1, 2]))
        .build()
        .unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 2))
        .await
        .unwrap_err();
    match err {
        TallyError::Unsupported { capability } => assert_eq!(capability, "total"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn no_source_for_metric_is_unsupported() {
    let src = MockConnector::builder()
        .name("views_only")
        .supports_metric(MetricKey::views())
        .returns_history_ok(vec![])
        .returns_total_ok(1)
        .build();
    let tally = Tally::builder().with_connector(src).build().unwrap();

    let err = tally
        .reconcile(&req(MetricKey::clicks(), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, TallyError::Unsupported { .. }));
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = MockConnector::builder()
        .name("a")
        .history_fails(TallyError::not_found("a"))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .history_fails(TallyError::not_found("b"))
        .build();

    let tally = Tally::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(m_total("live", 5))
        .build()
        .unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 2))
        .await
        .unwrap_err();
    match err {
        TallyError::NotFound { what } => assert_eq!(what, "views history for acme"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn mixed_failures_collapse_to_all_failed_and_are_tagged() {
    let a = MockConnector::builder()
        .name("a")
        .total_fails(TallyError::Other("boom".into()))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .total_fails(TallyError::not_found("b"))
        .build();

    let tally = Tally::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(m_hist("warehouse", &[1]))
        .build()
        .unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 1))
        .await
        .unwrap_err();
    match err {
        TallyError::AllSourcesFailed(es) => {
            assert_eq!(es.len(), 2);
            assert!(matches!(
                &es[0],
                TallyError::Source { source_name, .. } if source_name == "a"
            ));
            assert!(matches!(&es[1], TallyError::NotFound { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn negative_source_counts_are_data_errors() {
    let src = MockConnector::builder()
        .name("src")
        .returns_history_ok(vec![SeriesPoint::new(day(1), -4i64)])
        .returns_total_ok(3)
        .build();
    let tally = Tally::builder().with_connector(src).build().unwrap();

    let err = tally
        .reconcile(&req(MetricKey::views(), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TallyError::Data(_)));
}
