//! 지표/점수 속성 테스트
//!
//! 임의 입력에 대해 값 범위, 단조성, 볼륨 프로파일 포함 관계를 검증

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scorer_analytics::indicators::{
    IndicatorEngine, RsiParams, SmaParams, StochasticParams, WilliamsRParams,
};
use scorer_analytics::{
    FundamentalScorer, IndicatorError, RiskCalculator, TechnicalInputs, TechnicalScorer,
    VolumeProfileCalculator,
};
use scorer_core::{
    BuySellRatio, RatioHistory, RatioSnapshot, RecommendationConfig, ScoreResult, MAX_SCORE,
};

/// 0.01 ~ 1000.00 범위 가격 목록
fn prices(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100_000u32, min_len..max_len)
        .prop_map(|raw| raw.into_iter().map(|p| Decimal::new(p as i64, 2)).collect())
}

fn optional_ratio() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((-5_000i64..10_000i64).prop_map(|v| Decimal::new(v, 2)))
}

proptest! {
    #[test]
    fn rsi_stays_within_bounds(prices in prices(15, 120)) {
        let rsi = IndicatorEngine::new()
            .rsi(&prices, RsiParams { period: 14 })
            .unwrap();

        prop_assert_eq!(rsi.len(), prices.len());
        for value in rsi.into_iter().flatten() {
            prop_assert!(value >= Decimal::ZERO && value <= dec!(100));
        }
    }

    #[test]
    fn stochastic_and_williams_stay_within_bounds(prices in prices(16, 120)) {
        let engine = IndicatorEngine::new();
        let stoch = engine
            .stochastic(&prices, StochasticParams { k_period: 14, d_period: 3 })
            .unwrap();
        let williams = engine
            .williams_r(&prices, WilliamsRParams { period: 14 })
            .unwrap();

        for point in stoch {
            for value in [point.k, point.d].into_iter().flatten() {
                prop_assert!(value >= Decimal::ZERO && value <= dec!(100));
            }
        }
        for value in williams.into_iter().flatten() {
            prop_assert!(value >= dec!(-100) && value <= Decimal::ZERO);
        }
    }

    #[test]
    fn risk_scores_stay_within_bounds(prices in prices(2, 120)) {
        let risk = RiskCalculator::default().calculate(&prices);

        for score in [
            risk.volatility_score,
            risk.var_score,
            risk.drawdown_score,
            risk.overall_risk_score,
        ] {
            prop_assert!(score >= Decimal::ZERO && score <= MAX_SCORE);
        }
    }

    #[test]
    fn short_history_is_unavailable(prices in prices(1, 20), extra in 1usize..10) {
        let period = prices.len() + extra;
        let result = IndicatorEngine::new().sma(&prices, SmaParams { period });

        match result {
            Err(IndicatorError::InsufficientData { required, provided }) => {
                prop_assert_eq!(required, period);
                prop_assert_eq!(provided, prices.len());
            }
            other => prop_assert!(false, "expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn tier_is_monotonic_in_score(a in 0u32..=10_000u32, b in 0u32..=10_000u32) {
        let config = RecommendationConfig::default();
        let (low, high) = (a.min(b), a.max(b));
        let tier = |s: u32| config.tier_for(Decimal::new(s as i64, 2)).map(|r| r.tier);

        prop_assert!(tier(low) <= tier(high));
    }

    #[test]
    fn volume_profile_is_contained_in_range(
        ticks in prop::collection::vec((1u32..50_000u32, 1u32..10_000u32), 1..200),
        levels in 1usize..40,
    ) {
        let prices: Vec<Decimal> = ticks.iter().map(|(p, _)| Decimal::new(*p as i64, 2)).collect();
        let volumes: Vec<Decimal> = ticks.iter().map(|(_, v)| Decimal::from(*v)).collect();

        let profile = VolumeProfileCalculator::new(levels)
            .calculate(&prices, &volumes)
            .unwrap();
        let low = prices.iter().min().copied().unwrap();
        let high = prices.iter().max().copied().unwrap();

        prop_assert!(profile.poc >= low && profile.poc <= high);
        prop_assert!(profile.value_area_low >= low);
        prop_assert!(profile.value_area_high <= high);
        prop_assert!(profile.value_area_low <= profile.poc && profile.poc <= profile.value_area_high);
        prop_assert!(profile.value_area_volume >= profile.total_volume * dec!(0.7));
    }

    #[test]
    fn overall_score_is_mean_of_components(
        change in -2_000i64..2_000i64,
        volume in 0u64..5_000_000u64,
        buy in 0u64..10_000u64,
        sell in 0u64..10_000u64,
        volatility in 0i64..500i64,
        roe in optional_ratio(),
        pe in optional_ratio(),
        pb in optional_ratio(),
        roa in optional_ratio(),
    ) {
        let technical = TechnicalScorer::default().score(&TechnicalInputs {
            price_change_pct: Decimal::new(change, 2),
            total_volume: volume,
            buy_sell_ratio: BuySellRatio::from_volumes(buy, sell),
            volatility: Decimal::new(volatility, 2),
        });
        let fundamental = FundamentalScorer::default().score(&RatioHistory::new(vec![
            RatioSnapshot { roe, pe, pb, roa, ..Default::default() },
        ]));

        let result = ScoreResult::from_breakdowns(technical, fundamental);

        prop_assert!(result.technical_score >= Decimal::ZERO && result.technical_score <= MAX_SCORE);
        prop_assert!(result.fundamental_score >= Decimal::ZERO && result.fundamental_score <= MAX_SCORE);
        prop_assert_eq!(
            result.overall_score,
            (result.technical_score + result.fundamental_score) / dec!(2)
        );
    }
}
