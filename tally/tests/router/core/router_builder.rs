use std::time::Duration;

use tally::{InvalidTotalPolicy, Tally, TallyConfig, TallyError, ZeroHistoryPolicy};

use crate::helpers::m_both;

#[test]
fn build_without_connectors_is_invalid_input() {
    let err = Tally::builder().build().err().expect("must fail");
    assert!(matches!(err, TallyError::InvalidInput(_)));
}

#[test]
fn build_rejects_zero_source_timeout() {
    let err = Tally::builder()
        .with_connector(m_both("a", &[1], 1))
        .source_timeout(Duration::ZERO)
        .build()
        .err()
        .expect("must fail");
    assert!(err.is_invalid_input());
}

#[test]
fn defaults_match_documented_semantics() {
    let tally = Tally::builder()
        .with_connector(m_both("a", &[1], 1))
        .build()
        .unwrap();
    let cfg = tally.config();
    assert_eq!(cfg.zero_history, ZeroHistoryPolicy::Zeros);
    assert_eq!(cfg.invalid_total, InvalidTotalPolicy::Fail);
    assert_eq!(cfg.source_timeout, Duration::from_secs(5));
    assert_eq!(cfg.request_timeout, None);
}

#[test]
fn setters_override_config() {
    let tally = Tally::builder()
        .with_connector(m_both("a", &[1], 1))
        .config(TallyConfig::default())
        .zero_history(ZeroHistoryPolicy::Uniform)
        .invalid_total(InvalidTotalPolicy::Unadjusted)
        .source_timeout(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let cfg = tally.config();
    assert_eq!(cfg.zero_history, ZeroHistoryPolicy::Uniform);
    assert_eq!(cfg.invalid_total, InvalidTotalPolicy::Unadjusted);
    assert_eq!(cfg.source_timeout, Duration::from_millis(250));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(2)));
}
