//! 스코어링 파이프라인 통합 테스트
//!
//! 원시 체결 기록에서 보고서까지 전체 흐름 검증

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scorer_analytics::indicators::keys;
use scorer_analytics::ScoringEngine;
use scorer_core::{
    BuySellRatio, RatioField, RatioHistory, RatioSnapshot, RecommendationTier, ScorerError,
    ScoringConfig, TickRecord, TradeSide,
};

fn ts(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default()).unwrap()
}

/// 30초 간격 틱 생성
fn ticks_from(prices: &[Decimal], volume: u64, side: TradeSide) -> Vec<TickRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let seconds = i as u32 * 30;
            TickRecord::new(ts(9, 15 + seconds / 60, seconds % 60), *p, volume, side)
        })
        .collect()
}

#[test]
fn test_three_tick_buy_sell_scenario() {
    let ticks = vec![
        TickRecord::new(ts(9, 15, 0), dec!(10.0), 100, TradeSide::Buy),
        TickRecord::new(ts(9, 16, 0), dec!(10.5), 200, TradeSide::Sell),
        TickRecord::new(ts(9, 17, 0), dec!(9.8), 150, TradeSide::Buy),
    ];

    let report = engine()
        .analyze("VCB", ticks, &RatioHistory::default())
        .unwrap();

    assert_eq!(report.session.buy_volume, 250);
    assert_eq!(report.session.sell_volume, 200);
    assert_eq!(report.session.buy_sell_ratio, BuySellRatio::Finite(dec!(1.25)));
    // 1.25 > 1.2 → 20점
    assert_eq!(report.scores.technical.buy_sell_pressure, dec!(20));
}

#[test]
fn test_zero_sell_volume_clamps_to_top_bucket() {
    let ticks = ticks_from(&[dec!(50), dec!(51), dec!(52)], 1_000, TradeSide::Buy);

    let report = engine()
        .analyze("FPT", ticks, &RatioHistory::default())
        .unwrap();

    assert_eq!(report.session.buy_sell_ratio, BuySellRatio::Unbounded);
    assert_eq!(report.scores.technical.buy_sell_pressure, dec!(25));
}

#[test]
fn test_huge_volumes_do_not_overflow() {
    let half = u64::MAX / 2 + 1;
    let ticks = vec![
        TickRecord::new(ts(9, 15, 0), dec!(30), half, TradeSide::Buy),
        TickRecord::new(ts(9, 16, 0), dec!(30.5), half, TradeSide::Buy),
    ];

    let report = engine()
        .analyze("HUGE", ticks, &RatioHistory::default())
        .unwrap();

    assert_eq!(report.session.total_volume, u64::MAX);
    assert_eq!(report.session.buy_sell_ratio, BuySellRatio::Unbounded);
    // 최상위 거래량 구간 25점
    assert_eq!(report.scores.technical.volume, dec!(25));
}

#[test]
fn test_roe_only_fundamentals() {
    let ratios = RatioHistory::new(vec![RatioSnapshot {
        period: Some("2024-Q2".to_string()),
        roe: Some(dec!(16.2)),
        ..Default::default()
    }]);
    let ticks = ticks_from(&[dec!(20), dec!(20.1)], 500, TradeSide::Buy);

    let report = engine().analyze("MBS", ticks, &ratios).unwrap();

    assert_eq!(report.scores.fundamental_score, dec!(30));
    assert_eq!(
        report.scores.fundamental.missing,
        vec![RatioField::Pe, RatioField::Pb, RatioField::Roa]
    );
    assert!(report.financial_leverage.is_none());
}

#[test]
fn test_flat_price_series() {
    let prices = vec![dec!(25); 30];
    let ticks = ticks_from(&prices, 1_000, TradeSide::Buy);

    let report = engine()
        .analyze("GEX", ticks, &RatioHistory::default())
        .unwrap();
    let set = &report.indicators;

    // 볼린저 밴드는 가격선으로 수렴
    assert_eq!(set.latest(keys::BB_UPPER), Some(dec!(25)));
    assert_eq!(set.latest(keys::BB_MIDDLE), Some(dec!(25)));
    assert_eq!(set.latest(keys::BB_LOWER), Some(dec!(25)));
    // 손실이 없으면 RSI 100
    assert_eq!(set.latest(&keys::rsi(14)), Some(dec!(100)));
    // 범위가 0이면 %K 정의되지 않음
    assert_eq!(set.latest(keys::STOCH_K), None);

    assert_eq!(report.session.price_volatility, Decimal::ZERO);
    assert_eq!(report.risk.max_drawdown, Decimal::ZERO);
    assert_eq!(report.risk.sharpe_ratio, Decimal::ZERO);
    // 가격 변화가 없으면 리스크 점수는 모두 100
    assert_eq!(report.risk.overall_risk_score, dec!(100));
    // 20틱 수익률이 모두 0
    assert_eq!(set.latest(keys::MOMENTUM), Some(Decimal::ZERO));
    assert_eq!(set.latest(&keys::volume_ma(20)), Some(dec!(1000)));
    // 30틱은 50틱 심리 윈도우에 못 미침
    assert!(set.is_unavailable(keys::SENTIMENT_RATIO));

    let profile = report.indicators.volume_profile.as_ref().unwrap();
    assert_eq!(profile.price_levels.len(), 1);
    assert_eq!(profile.poc, dec!(25));
}

#[test]
fn test_short_series_marks_indicators_unavailable() {
    let prices: Vec<Decimal> = (0..8).map(|i| dec!(100) + Decimal::from(i)).collect();
    let ticks = ticks_from(&prices, 100, TradeSide::Sell);

    let report = engine()
        .analyze("VND", ticks, &RatioHistory::default())
        .unwrap();
    let set = &report.indicators;

    assert!(set.get(&keys::ma(5)).is_some());
    for name in [keys::ma(10), keys::ma(20), keys::rsi(14)] {
        assert!(set.get(&name).is_none());
        assert!(set.is_unavailable(&name));
    }

    let marker = set.unavailable_reason(keys::MACD).unwrap();
    assert_eq!(marker.required, 34);
    assert_eq!(marker.provided, 8);
    assert!(set.is_unavailable(keys::BB_UPPER));
    // VWAP은 첫 틱부터 계산
    assert!(set.get(keys::VWAP).is_some());
}

#[test]
fn test_empty_input_is_rejected() {
    let err = engine()
        .analyze("VCB", Vec::new(), &RatioHistory::default())
        .unwrap_err();

    assert!(matches!(err, ScorerError::InsufficientData { .. }));
    assert!(err.to_string().contains("no trade data"));
}

#[test]
fn test_unsorted_input_is_normalized() {
    let ticks = vec![
        TickRecord::new(ts(10, 5, 0), dec!(12), 10, TradeSide::Buy),
        TickRecord::new(ts(9, 15, 0), dec!(10), 10, TradeSide::Sell),
        TickRecord::new(ts(9, 45, 0), dec!(11), 10, TradeSide::Buy),
    ];

    let report = engine()
        .analyze("HPG", ticks, &RatioHistory::default())
        .unwrap();

    assert_eq!(report.session.open, dec!(10));
    assert_eq!(report.session.close, dec!(12));
    assert_eq!(report.session.price_change_pct, dec!(20));
    assert_eq!(report.hourly.volume_by_hour.get(&9), Some(&20));
}

#[test]
fn test_full_report_recommendation() {
    // 거래량 많은 강한 상승 세션 + 우량 재무
    let prices: Vec<Decimal> = (0..40).map(|i| dec!(100) + Decimal::from(i) / dec!(4)).collect();
    let mut ticks = ticks_from(&prices, 60_000, TradeSide::Buy);
    ticks[1].side = TradeSide::Sell;

    let ratios = RatioHistory::new(vec![RatioSnapshot {
        roe: Some(dec!(22)),
        pe: Some(dec!(14)),
        pb: Some(dec!(1.3)),
        roa: Some(dec!(12)),
        total_assets: Some(dec!(1000)),
        total_debt: Some(dec!(300)),
        ..Default::default()
    }]);

    let report = engine().analyze("ACB", ticks, &ratios).unwrap();

    assert_eq!(report.scores.fundamental_score, dec!(100));
    assert_eq!(
        report.scores.overall_score,
        (report.scores.technical_score + report.scores.fundamental_score) / dec!(2)
    );
    assert!(report.recommendation.tier >= RecommendationTier::Buy);
    assert_eq!(report.recommendation.reference_price, report.session.close);
    assert!(report.recommendation.target_price > report.session.close);
    assert_eq!(
        report.financial_leverage.map(|l| l.debt_ratio),
        Some(dec!(30))
    );

    // 보고서는 JSON으로 직렬화 가능
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"symbol\":\"ACB\""));
}
