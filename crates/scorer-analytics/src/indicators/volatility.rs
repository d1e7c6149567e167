//! 변동성 지표 (Volatility Indicators).
//!
//! - Bollinger Bands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use scorer_core::sample_std_dev;

use super::{ensure_len, ensure_period, IndicatorError, IndicatorResult};

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2),
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드.
    pub upper: Option<Decimal>,
    /// 중간 밴드 (SMA).
    pub middle: Option<Decimal>,
    /// 하단 밴드.
    pub lower: Option<Decimal>,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 중간 밴드 = SMA(period), 상/하단 = 중간 ± 배수 × 표본 표준편차(period).
    /// 보합 구간에서는 세 밴드가 모두 가격과 같아집니다.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        let period = params.period;
        ensure_period(period)?;
        ensure_len(period, prices.len())?;

        if params.std_dev_multiplier <= Decimal::ZERO {
            return Err(IndicatorError::InvalidParameter(
                "표준편차 배수는 0보다 커야 합니다".to_string(),
            ));
        }

        let divisor = Decimal::from(period);
        let result = (0..prices.len())
            .map(|i| {
                if i + 1 < period {
                    return BollingerBandsResult::default();
                }
                let window = &prices[i + 1 - period..=i];
                let middle = window.iter().sum::<Decimal>() / divisor;
                let band = sample_std_dev(window) * params.std_dev_multiplier;

                BollingerBandsResult {
                    upper: Some(middle + band),
                    middle: Some(middle),
                    lower: Some(middle - band),
                }
            })
            .collect();

        Ok(result)
    }
}
