//! 리스크 지표 계산.
//!
//! 연속 체결(또는 리샘플링된 종가) 사이의 단순 수익률로부터 역사적 VaR,
//! 변동성, 최대 낙폭, 샤프 비율을 계산합니다.
//!
//! # 주요 지표
//!
//! - **VaR**: 수익률 분포의 5%/1% 분위수 (선형 보간, 음수 = 손실)
//! - **연율화 변동성**: 표본 표준편차 × sqrt(연간 기간 수)
//! - **최대 낙폭 (MDD)**: 누적 수익 곡선의 고점 대비 최대 하락률
//! - **샤프 비율**: 평균 / 표준편차 (무위험 수익률 0)
//!
//! # 리스크 점수 (0-100, 높을수록 안전)
//!
//! - 변동성 점수 = 100 - σ × 1000
//! - VaR 점수 = 100 + VaR95 × 1000
//! - 낙폭 점수 = 100 + MDD × 100
//! - 종합 = 세 점수의 평균

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scorer_core::{mean, sample_std_dev, DecimalExt, RiskProfile, MAX_SCORE};

/// 연간 거래일 수 (연율화 기본값).
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 리스크 지표 계산기.
#[derive(Debug, Clone)]
pub struct RiskCalculator {
    periods_per_year: u32,
}

impl Default for RiskCalculator {
    fn default() -> Self {
        Self::new(TRADING_DAYS_PER_YEAR)
    }
}

impl RiskCalculator {
    /// 연율화 기간 수로 계산기를 생성합니다.
    pub fn new(periods_per_year: u32) -> Self {
        Self {
            periods_per_year: periods_per_year.max(1),
        }
    }

    /// 가격 경로로부터 리스크 프로파일을 계산합니다.
    ///
    /// 가격이 2개 미만이면 모든 지표가 0인 프로파일을 반환합니다.
    pub fn calculate(&self, prices: &[Decimal]) -> RiskProfile {
        let returns = simple_returns(prices);
        if returns.is_empty() {
            return RiskProfile::empty();
        }

        let daily_volatility = sample_std_dev(&returns);
        let annualized_volatility =
            daily_volatility * Decimal::from(self.periods_per_year).sqrt_approx();

        let mut sorted = returns.clone();
        sorted.sort();

        let var_95 = percentile(&sorted, dec!(0.05));
        let max_drawdown = max_drawdown(prices);

        let volatility_score = clamp_score(MAX_SCORE - daily_volatility * dec!(1000));
        let var_score = clamp_score(MAX_SCORE + var_95 * dec!(1000));
        let drawdown_score = clamp_score(MAX_SCORE + max_drawdown * Decimal::ONE_HUNDRED);
        let overall_risk_score = (volatility_score + var_score + drawdown_score) / dec!(3);

        RiskProfile {
            daily_volatility,
            annualized_volatility,
            var_95,
            var_99: percentile(&sorted, dec!(0.01)),
            max_drawdown,
            sharpe_ratio: sharpe_ratio(&returns),
            volatility_score,
            var_score,
            drawdown_score,
            overall_risk_score,
            sample_size: returns.len(),
        }
    }
}

fn clamp_score(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(MAX_SCORE)
}

/// 연속 가격 간 단순 수익률 `(p_t - p_{t-1}) / p_{t-1}`.
///
/// 이전 가격이 0인 구간은 건너뜁니다.
pub fn simple_returns(prices: &[Decimal]) -> Vec<Decimal> {
    prices
        .windows(2)
        .filter(|w| !w[0].is_zero())
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// 정렬된 값에서 선형 보간 분위수.
///
/// `q`는 0~1 사이이며, 순위 `q × (n - 1)`의 양옆 값을 보간합니다.
pub fn percentile(sorted: &[Decimal], q: Decimal) -> Decimal {
    if sorted.is_empty() {
        return Decimal::ZERO;
    }

    let q = q.max(Decimal::ZERO).min(Decimal::ONE);
    let rank = q * Decimal::from(sorted.len() - 1);
    let lower = rank.floor().to_usize().unwrap_or(0).min(sorted.len() - 1);
    let upper = rank.ceil().to_usize().unwrap_or(lower).min(sorted.len() - 1);
    let weight = rank - Decimal::from(lower);

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// 최대 낙폭 (0 이하의 소수).
///
/// 누적 수익 곡선 `p_t / p_0`의 이전 고점 대비 하락률 중 최솟값입니다.
pub fn max_drawdown(prices: &[Decimal]) -> Decimal {
    let mut peak: Option<Decimal> = None;
    let mut worst = Decimal::ZERO;

    for price in prices {
        let current_peak = match peak {
            Some(p) if p >= *price => p,
            _ => *price,
        };
        peak = Some(current_peak);

        if current_peak > Decimal::ZERO {
            let drawdown = (*price - current_peak) / current_peak;
            worst = worst.min(drawdown);
        }
    }

    worst
}

/// 샤프 비율 (무위험 수익률 0, 연율화하지 않음).
///
/// 표준편차가 0이면 0을 반환합니다.
pub fn sharpe_ratio(returns: &[Decimal]) -> Decimal {
    let std_dev = sample_std_dev(returns);
    if std_dev.is_zero() {
        return Decimal::ZERO;
    }
    mean(returns).unwrap_or(Decimal::ZERO) / std_dev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[dec!(100), dec!(110), dec!(99)]);
        assert_eq!(returns, vec![dec!(0.1), dec!(-0.1)]);
        assert!(simple_returns(&[dec!(100)]).is_empty());
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted: Vec<Decimal> = (1..=5).map(Decimal::from).collect();
        assert_eq!(percentile(&sorted, dec!(0)), dec!(1));
        assert_eq!(percentile(&sorted, dec!(1)), dec!(5));
        assert_eq!(percentile(&sorted, dec!(0.5)), dec!(3));
        // 순위 0.05 × 4 = 0.2 → 1 + 0.2
        assert_eq!(percentile(&sorted, dec!(0.05)), dec!(1.2));
    }

    #[test]
    fn test_max_drawdown() {
        let prices = vec![dec!(100), dec!(120), dec!(90), dec!(110), dec!(130)];
        // 120 → 90: -25%
        assert_eq!(max_drawdown(&prices), dec!(-0.25));

        let rising = vec![dec!(1), dec!(2), dec!(3)];
        assert_eq!(max_drawdown(&rising), Decimal::ZERO);
    }

    #[test]
    fn test_sharpe_zero_when_flat() {
        assert_eq!(sharpe_ratio(&[dec!(0.01), dec!(0.01), dec!(0.01)]), Decimal::ZERO);
        assert_eq!(sharpe_ratio(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_profile_single_price_is_empty() {
        let profile = RiskCalculator::default().calculate(&[dec!(100)]);
        assert_eq!(profile, RiskProfile::empty());
        assert!(!profile.has_samples());
    }

    #[test]
    fn test_profile_values() {
        let prices = vec![dec!(100), dec!(102), dec!(101), dec!(104), dec!(99), dec!(103)];
        let profile = RiskCalculator::default().calculate(&prices);

        assert_eq!(profile.sample_size, 5);
        assert!(profile.var_99 <= profile.var_95);
        assert!(profile.var_95 < Decimal::ZERO);
        assert!(profile.max_drawdown < Decimal::ZERO);
        // 연율화 변동성 = 일간 변동성 × sqrt(252)
        let ratio = profile.annualized_volatility / profile.daily_volatility;
        assert!((ratio - dec!(15.8745)).abs() < dec!(0.001));
    }

    #[test]
    fn test_risk_scores() {
        // 수익률 +1%, -2%: σ ≈ 0.0212, VaR95 = -0.0185, MDD = -0.02
        let prices = vec![dec!(100), dec!(101), dec!(98.98)];
        let profile = RiskCalculator::default().calculate(&prices);

        let expected_vol = MAX_SCORE - profile.daily_volatility * dec!(1000);
        assert_eq!(profile.volatility_score, expected_vol);
        assert!(profile.volatility_score > dec!(78) && profile.volatility_score < dec!(79));
        // 100 + (-0.0185 × 1000)
        assert_eq!(profile.var_score, dec!(81.5));
        // 100 + (-0.02 × 100)
        assert_eq!(profile.drawdown_score, dec!(98));
        assert_eq!(
            profile.overall_risk_score,
            (profile.volatility_score + profile.var_score + profile.drawdown_score) / dec!(3)
        );
    }

    #[test]
    fn test_risk_scores_are_clamped() {
        // -50% 급락 후 +20% 반등: 변동성과 VaR 점수는 하한 0
        let crash = RiskCalculator::default().calculate(&[dec!(100), dec!(50), dec!(60)]);
        assert_eq!(crash.volatility_score, Decimal::ZERO);
        assert_eq!(crash.var_score, Decimal::ZERO);
        assert_eq!(crash.drawdown_score, dec!(50));
        assert!(crash.overall_risk_score < dec!(20));

        // 변화 없는 가격: 모든 점수가 상한 100
        let flat = RiskCalculator::default().calculate(&[dec!(10), dec!(10), dec!(10)]);
        assert_eq!(flat.volatility_score, MAX_SCORE);
        assert_eq!(flat.var_score, MAX_SCORE);
        assert_eq!(flat.drawdown_score, MAX_SCORE);
        assert_eq!(flat.overall_risk_score, MAX_SCORE);
    }
}
