//! 거래량 지표 (Volume Indicators).
//!
//! - VWAP (Volume Weighted Average Price) 및 표준편차 밴드
//! - 매수/매도 심리 비율 (롤링 윈도우)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{DecimalExt, TradeSide};

use super::{ensure_len, ensure_period, IndicatorError, IndicatorResult};

/// 특정 시점의 VWAP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VwapPoint {
    /// VWAP 값.
    pub vwap: Decimal,
    /// 누적 거래량 가중 표준편차.
    pub std_dev: Decimal,
    /// 누적 거래량.
    pub cumulative_volume: Decimal,
}

impl VwapPoint {
    /// 상단 밴드 (VWAP + 표준편차 × 배수).
    pub fn upper(&self, multiplier: Decimal) -> Decimal {
        self.vwap + self.std_dev * multiplier
    }

    /// 하단 밴드 (VWAP - 표준편차 × 배수).
    pub fn lower(&self, multiplier: Decimal) -> Decimal {
        self.vwap - self.std_dev * multiplier
    }
}

/// VWAP 계산기.
#[derive(Debug, Default)]
pub struct VwapIndicator;

impl VwapIndicator {
    /// 새로운 VWAP 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 체결 가격 기준 누적 VWAP 계산.
    ///
    /// - VWAP = Σ(가격 × 거래량) / Σ(거래량)
    /// - 분산 = Σ(가격² × 거래량) / Σ(거래량) - VWAP² (음수는 0으로 보정)
    ///
    /// 누적 거래량이 0인 동안은 VWAP를 체결 가격으로 두고 밴드 폭은 0입니다.
    pub fn calculate(&self, prices: &[Decimal], volumes: &[Decimal]) -> IndicatorResult<Vec<VwapPoint>> {
        if prices.len() != volumes.len() {
            return Err(IndicatorError::InvalidParameter(
                "가격과 거래량 데이터의 길이가 일치하지 않습니다".to_string(),
            ));
        }
        if prices.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let mut points = Vec::with_capacity(prices.len());
        let mut cum_pv = Decimal::ZERO;
        let mut cum_p2v = Decimal::ZERO;
        let mut cum_v = Decimal::ZERO;

        for (price, volume) in prices.iter().zip(volumes) {
            cum_pv += *price * *volume;
            cum_p2v += *price * *price * *volume;
            cum_v += *volume;

            let (vwap, std_dev) = if cum_v > Decimal::ZERO {
                let vwap = cum_pv / cum_v;
                let variance = (cum_p2v / cum_v - vwap * vwap).max(Decimal::ZERO);
                (vwap, variance.sqrt_approx())
            } else {
                (*price, Decimal::ZERO)
            };

            points.push(VwapPoint {
                vwap,
                std_dev,
                cumulative_volume: cum_v,
            });
        }

        Ok(points)
    }
}

/// 심리 비율 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentRatioParams {
    /// 롤링 윈도우 (기본: 50틱).
    pub window: usize,
}

impl Default for SentimentRatioParams {
    fn default() -> Self {
        Self { window: 50 }
    }
}

/// 매수/매도 체결 흐름 지표.
#[derive(Debug, Default)]
pub struct OrderFlowIndicator;

impl OrderFlowIndicator {
    /// 새로운 체결 흐름 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 롤링 매수/매도 거래량 비율.
    ///
    /// 인덱스 t의 값은 직전 window개 틱 `[t - window, t)`의 매수 거래량 / 매도 거래량이며,
    /// 현재 틱은 포함하지 않습니다. 윈도우에 매도 거래량이 없으면 중립값 1입니다.
    pub fn sentiment_ratio(
        &self,
        volumes: &[Decimal],
        sides: &[TradeSide],
        params: SentimentRatioParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        if volumes.len() != sides.len() {
            return Err(IndicatorError::InvalidParameter(
                "거래량과 체결 방향 데이터의 길이가 일치하지 않습니다".to_string(),
            ));
        }
        let window = params.window;
        ensure_period(window)?;
        ensure_len(window + 1, volumes.len())?;

        let mut result = vec![None; window];
        for end in window..volumes.len() {
            let start = end - window;
            let (buy, sell) = volumes[start..end].iter().zip(&sides[start..end]).fold(
                (Decimal::ZERO, Decimal::ZERO),
                |(buy, sell), (volume, side)| match side {
                    TradeSide::Buy => (buy + *volume, sell),
                    TradeSide::Sell => (buy, sell + *volume),
                    TradeSide::Unknown => (buy, sell),
                },
            );

            let ratio = if sell > Decimal::ZERO {
                buy / sell
            } else {
                Decimal::ONE
            };
            result.push(Some(ratio));
        }

        Ok(result)
    }
}
