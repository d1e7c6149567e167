//! 투자 의견 생성.
//!
//! 종합 점수로 등급/신뢰도/목표가/투자 기간을 정하고, 두 점수로 리스크 점수를 계산합니다.
//! 강점과 리스크 요인은 세션 요약과 최신 재무 비율에서 도출합니다.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{
    FinancialLeverage, RatioSnapshot, Recommendation, RecommendationConfig, RecommendationTier,
    RiskLevel, ScoreResult, SessionSummary, TimeHorizon,
};

/// 투자 강점.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// 기술적 점수 우수
    StrongTechnical,
    /// 펀더멘털 점수 우수
    StrongFundamental,
    /// 매수 우위
    BuyingPressure,
    /// 풍부한 유동성
    HighLiquidity,
    /// 강한 상승 모멘텀
    StrongMomentum,
    /// 높은 ROE
    HighProfitability,
    /// 적정 P/E
    FairEarningsValuation,
    /// 낮은 P/B
    LowPriceToBook,
    /// 뚜렷한 강점 없음
    NeedsMonitoring,
}

impl Strength {
    /// 보고서용 설명.
    pub fn description(&self) -> &'static str {
        match self {
            Strength::StrongTechnical => "기술적 신호가 강하게 긍정적",
            Strength::StrongFundamental => "재무 지표가 우수",
            Strength::BuyingPressure => "매수 압력이 우세",
            Strength::HighLiquidity => "유동성이 매우 풍부",
            Strength::StrongMomentum => "장중 상승 모멘텀이 강함",
            Strength::HighProfitability => "자기자본이익률(ROE)이 높음",
            Strength::FairEarningsValuation => "P/E가 적정 구간",
            Strength::LowPriceToBook => "P/B 기준 저평가",
            Strength::NeedsMonitoring => "추가 관찰 필요",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 리스크 요인.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// 가격 변동성 높음
    HighVolatility,
    /// 유동성 부족
    LowLiquidity,
    /// 매도 압력 우세
    SellingPressure,
    /// 장중 하락
    NegativeMomentum,
    /// P/E 고평가
    ExpensiveEarnings,
    /// P/B 고평가
    ExpensiveBook,
    /// ROE 낮음
    WeakProfitability,
    /// ROE 데이터 없음
    MissingProfitability,
    /// 부채비율 높음
    HighLeverage,
    /// 일반 시장 리스크
    GeneralMarketRisk,
}

impl RiskFactor {
    /// 보고서용 설명.
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::HighVolatility => "가격 변동성이 높음",
            RiskFactor::LowLiquidity => "유동성이 낮음",
            RiskFactor::SellingPressure => "매도 압력이 강함",
            RiskFactor::NegativeMomentum => "장중 가격 하락",
            RiskFactor::ExpensiveEarnings => "P/E 기준 고평가",
            RiskFactor::ExpensiveBook => "P/B 기준 고평가",
            RiskFactor::WeakProfitability => "자기자본이익률(ROE)이 낮음",
            RiskFactor::MissingProfitability => "ROE 데이터 없음",
            RiskFactor::HighLeverage => "부채비율이 높음",
            RiskFactor::GeneralMarketRisk => "일반적인 시장 리스크",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 투자 의견 엔진.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// 설정으로 엔진을 생성합니다.
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// 투자 의견을 생성합니다.
    ///
    /// # 인자
    ///
    /// * `scores` - 기술적/펀더멘털/종합 점수
    /// * `summary` - 세션 요약 (목표가 기준 종가 포함)
    /// * `ratios` - 최신 재무 비율 스냅샷
    /// * `leverage` - 재무 레버리지 분류
    pub fn recommend(
        &self,
        scores: &ScoreResult,
        summary: &SessionSummary,
        ratios: Option<&RatioSnapshot>,
        leverage: Option<&FinancialLeverage>,
    ) -> Recommendation {
        let (tier, confidence, multiplier, time_horizon) =
            match self.config.tier_for(scores.overall_score) {
                Some(rule) => (rule.tier, rule.confidence, rule.target_multiplier, rule.horizon),
                None => (
                    RecommendationTier::Hold,
                    Decimal::ZERO,
                    Decimal::ONE,
                    TimeHorizon::months(0, 0),
                ),
            };

        let risk_score = self.risk_score(scores);

        Recommendation {
            tier,
            confidence,
            reference_price: summary.close,
            target_price: summary.close * multiplier,
            time_horizon,
            risk_score,
            risk_level: self.risk_level(risk_score),
            strengths: self
                .strengths(scores, summary, ratios)
                .iter()
                .map(|s| s.description().to_string())
                .collect(),
            risk_factors: self
                .risk_factors(summary, ratios, leverage)
                .iter()
                .map(|r| r.description().to_string())
                .collect(),
        }
    }

    /// 리스크 점수 (0-100, 높을수록 위험).
    pub fn risk_score(&self, scores: &ScoreResult) -> Decimal {
        let hundred = Decimal::ONE_HUNDRED;
        self.config.risk_technical_weight * (hundred - scores.technical_score)
            + self.config.risk_fundamental_weight * (hundred - scores.fundamental_score)
    }

    /// 리스크 점수를 수준으로 분류합니다.
    pub fn risk_level(&self, risk_score: Decimal) -> RiskLevel {
        if risk_score > self.config.risk_high_above {
            RiskLevel::High
        } else if risk_score > self.config.risk_medium_above {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// 강점 목록. 해당 사항이 없으면 [`Strength::NeedsMonitoring`] 하나.
    pub fn strengths(
        &self,
        scores: &ScoreResult,
        summary: &SessionSummary,
        ratios: Option<&RatioSnapshot>,
    ) -> Vec<Strength> {
        let t = &self.config.insights;
        let mut strengths = Vec::new();

        if scores.technical_score > t.strong_score {
            strengths.push(Strength::StrongTechnical);
        }
        if scores.fundamental_score > t.strong_score {
            strengths.push(Strength::StrongFundamental);
        }
        if summary.buy_sell_ratio.exceeds(t.dominant_buy_ratio) {
            strengths.push(Strength::BuyingPressure);
        }
        if summary.total_volume > t.high_liquidity_volume {
            strengths.push(Strength::HighLiquidity);
        }
        if summary.price_change_pct > t.strong_momentum_pct {
            strengths.push(Strength::StrongMomentum);
        }

        if let Some(ratios) = ratios {
            if ratios.roe.is_some_and(|roe| roe > t.high_roe) {
                strengths.push(Strength::HighProfitability);
            }
            if ratios
                .pe
                .is_some_and(|pe| pe >= t.fair_pe_low && pe <= t.fair_pe_high)
            {
                strengths.push(Strength::FairEarningsValuation);
            }
            if ratios.pb.is_some_and(|pb| pb < t.cheap_pb) {
                strengths.push(Strength::LowPriceToBook);
            }
        }

        if strengths.is_empty() {
            strengths.push(Strength::NeedsMonitoring);
        }
        strengths
    }

    /// 리스크 요인 목록. 해당 사항이 없으면 [`RiskFactor::GeneralMarketRisk`] 하나.
    pub fn risk_factors(
        &self,
        summary: &SessionSummary,
        ratios: Option<&RatioSnapshot>,
        leverage: Option<&FinancialLeverage>,
    ) -> Vec<RiskFactor> {
        let t = &self.config.insights;
        let mut factors = Vec::new();

        if summary.price_volatility > t.high_volatility {
            factors.push(RiskFactor::HighVolatility);
        }
        if summary.total_volume < t.low_liquidity_volume {
            factors.push(RiskFactor::LowLiquidity);
        }
        if summary.buy_sell_ratio.falls_below(t.selling_pressure_ratio) {
            factors.push(RiskFactor::SellingPressure);
        }
        if summary.price_change_pct < Decimal::ZERO {
            factors.push(RiskFactor::NegativeMomentum);
        }

        let ratios = ratios.cloned().unwrap_or_default();
        if ratios.pe.is_some_and(|pe| pe > t.expensive_pe) {
            factors.push(RiskFactor::ExpensiveEarnings);
        }
        if ratios.pb.is_some_and(|pb| pb >= t.expensive_pb) {
            factors.push(RiskFactor::ExpensiveBook);
        }
        match ratios.roe {
            None => factors.push(RiskFactor::MissingProfitability),
            Some(roe) if roe <= t.weak_roe => factors.push(RiskFactor::WeakProfitability),
            Some(_) => {}
        }

        if leverage.is_some_and(|l| l.level == RiskLevel::High) {
            factors.push(RiskFactor::HighLeverage);
        }

        if factors.is_empty() {
            factors.push(RiskFactor::GeneralMarketRisk);
        }
        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use scorer_core::{
        BuySellRatio, FundamentalBreakdown, MarketSentiment, TechnicalBreakdown, Trend,
    };

    fn summary(close: Decimal, volume: u64, ratio: BuySellRatio) -> SessionSummary {
        let start = NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        SessionSummary {
            symbol: "VCB".to_string(),
            session_start: start,
            session_end: start,
            data_points: 10,
            open: close,
            close,
            high: close,
            low: close,
            average_price: close,
            price_change: Decimal::ZERO,
            price_change_pct: Decimal::ZERO,
            price_volatility: dec!(0.3),
            price_range: Decimal::ZERO,
            total_volume: volume,
            buy_volume: 0,
            sell_volume: 0,
            buy_sell_ratio: ratio,
            sentiment: MarketSentiment::from_ratio(ratio),
            trend: Trend::Sideways,
            peak_hour: Some(9),
            peak_hour_volume: volume,
        }
    }

    fn scores(technical: Decimal, fundamental: Decimal) -> ScoreResult {
        ScoreResult {
            technical_score: technical,
            fundamental_score: fundamental,
            overall_score: (technical + fundamental) / dec!(2),
            technical: TechnicalBreakdown::default(),
            fundamental: FundamentalBreakdown::default(),
        }
    }

    #[test]
    fn test_strong_buy() {
        let engine = RecommendationEngine::default();
        let rec = engine.recommend(
            &scores(dec!(90), dec!(80)),
            &summary(dec!(100), 2_000_000, BuySellRatio::Finite(dec!(1.6))),
            None,
            None,
        );

        assert_eq!(rec.tier, RecommendationTier::StrongBuy);
        assert_eq!(rec.confidence, dec!(90));
        assert_eq!(rec.target_price, dec!(125));
        assert_eq!(rec.time_horizon, TimeHorizon::months(6, 12));
        // 0.4 × 10 + 0.6 × 20 = 16
        assert_eq!(rec.risk_score, dec!(16));
        assert_eq!(rec.risk_level, RiskLevel::Low);
        assert!(rec.strengths.contains(&"매수 압력이 우세".to_string()));
        assert!(rec.strengths.contains(&"유동성이 매우 풍부".to_string()));
    }

    #[test]
    fn test_sell_and_high_risk() {
        let engine = RecommendationEngine::default();
        let rec = engine.recommend(
            &scores(dec!(20), dec!(10)),
            &summary(dec!(50), 50_000, BuySellRatio::Finite(dec!(0.5))),
            None,
            None,
        );

        assert_eq!(rec.tier, RecommendationTier::Sell);
        assert_eq!(rec.confidence, dec!(85));
        assert_eq!(rec.target_price, dec!(42.5));
        // 0.4 × 80 + 0.6 × 90 = 86
        assert_eq!(rec.risk_level, RiskLevel::High);
        assert_eq!(rec.strengths, vec!["추가 관찰 필요".to_string()]);
    }

    #[test]
    fn test_risk_level_boundaries() {
        let engine = RecommendationEngine::default();
        assert_eq!(engine.risk_level(dec!(60)), RiskLevel::Medium);
        assert_eq!(engine.risk_level(dec!(60.01)), RiskLevel::High);
        assert_eq!(engine.risk_level(dec!(40)), RiskLevel::Low);
    }

    #[test]
    fn test_strengths_from_ratios() {
        let engine = RecommendationEngine::default();
        let ratios = RatioSnapshot {
            roe: Some(dec!(18)),
            pe: Some(dec!(12)),
            pb: Some(dec!(1.2)),
            ..Default::default()
        };
        let strengths = engine.strengths(
            &scores(dec!(0), dec!(0)),
            &summary(dec!(10), 0, BuySellRatio::Undefined),
            Some(&ratios),
        );

        assert_eq!(
            strengths,
            vec![
                Strength::HighProfitability,
                Strength::FairEarningsValuation,
                Strength::LowPriceToBook,
            ]
        );
    }

    #[test]
    fn test_unbounded_ratio_counts_as_buying_pressure() {
        let engine = RecommendationEngine::default();
        let strengths = engine.strengths(
            &scores(dec!(0), dec!(0)),
            &summary(dec!(10), 0, BuySellRatio::Unbounded),
            None,
        );
        assert_eq!(strengths, vec![Strength::BuyingPressure]);
    }

    #[test]
    fn test_risk_factors() {
        let engine = RecommendationEngine::default();
        let mut session = summary(dec!(10), 500_000, BuySellRatio::Finite(dec!(1)));

        // ROE가 충분하고 다른 위험 신호가 없으면 기본 문구
        let healthy = RatioSnapshot {
            roe: Some(dec!(12)),
            ..Default::default()
        };
        assert_eq!(
            engine.risk_factors(&session, Some(&healthy), None),
            vec![RiskFactor::GeneralMarketRisk]
        );

        session.price_volatility = dec!(3);
        session.price_change_pct = dec!(-1.5);
        let expensive = RatioSnapshot {
            pe: Some(dec!(30)),
            pb: Some(dec!(3)),
            roe: Some(dec!(4)),
            ..Default::default()
        };
        let leverage = FinancialLeverage {
            debt_ratio: dec!(70),
            level: RiskLevel::High,
        };
        assert_eq!(
            engine.risk_factors(&session, Some(&expensive), Some(&leverage)),
            vec![
                RiskFactor::HighVolatility,
                RiskFactor::NegativeMomentum,
                RiskFactor::ExpensiveEarnings,
                RiskFactor::ExpensiveBook,
                RiskFactor::WeakProfitability,
                RiskFactor::HighLeverage,
            ]
        );

        assert!(engine
            .risk_factors(&session, None, None)
            .contains(&RiskFactor::MissingProfitability));
    }
}
