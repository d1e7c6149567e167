//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표들을 제공합니다.
//! - RSI (Relative Strength Index, Wilder 평활)
//! - Stochastic Oscillator
//! - Williams %R
//! - 가격 모멘텀 (틱 수익률의 이동평균)
//!
//! 틱 데이터에는 고가/저가가 없으므로 스토캐스틱과 Williams %R은
//! 윈도우 내 체결 가격의 최고/최저를 사용합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ensure_len, ensure_period, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 스토캐스틱 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StochasticParams {
    /// %K 기간 (기본: 14).
    pub k_period: usize,
    /// %D 기간 (기본: 3).
    pub d_period: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// 스토캐스틱 결과.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StochasticResult {
    /// %K (Fast Stochastic).
    pub k: Option<Decimal>,
    /// %D (%K의 이동평균).
    pub d: Option<Decimal>,
}

/// Williams %R 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WilliamsRParams {
    /// 조회 기간 (기본: 14).
    pub period: usize,
}

impl Default for WilliamsRParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 가격 모멘텀 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceMomentumParams {
    /// 수익률 평균 기간 (기본: 20).
    pub period: usize,
}

impl Default for PriceMomentumParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 첫 평균은 처음 period개 변화량의 단순 평균이고, 이후에는
    /// Wilder 평활 `avg = (prev × (period - 1) + 현재) / period`를 적용합니다.
    /// 평균 하락폭이 0이면 RSI는 100입니다 (보합 구간 포함).
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 period개는 None)
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        ensure_period(period)?;
        ensure_len(period + 1, prices.len())?;

        let period_dec = Decimal::from(period);
        let mut result = vec![None; period];

        let (mut avg_gain, mut avg_loss) = prices[..=period]
            .windows(2)
            .map(|w| split_change(w[1] - w[0]))
            .fold((Decimal::ZERO, Decimal::ZERO), |(g, l), (gain, loss)| {
                (g + gain, l + loss)
            });
        avg_gain /= period_dec;
        avg_loss /= period_dec;
        result.push(Some(rsi_value(avg_gain, avg_loss)));

        for w in prices[period..].windows(2) {
            let (gain, loss) = split_change(w[1] - w[0]);
            avg_gain = (avg_gain * (period_dec - Decimal::ONE) + gain) / period_dec;
            avg_loss = (avg_loss * (period_dec - Decimal::ONE) + loss) / period_dec;
            result.push(Some(rsi_value(avg_gain, avg_loss)));
        }

        Ok(result)
    }

    /// 스토캐스틱 오실레이터 계산.
    ///
    /// %K = (현재가 - 최저가) / (최고가 - 최저가) × 100
    /// %D = %K의 d_period 이동평균
    ///
    /// 윈도우 내 최고가와 최저가가 같으면 %K는 정의되지 않으며(None),
    /// %D는 구성 %K가 모두 정의된 경우에만 계산됩니다.
    pub fn stochastic(
        &self,
        prices: &[Decimal],
        params: StochasticParams,
    ) -> IndicatorResult<Vec<StochasticResult>> {
        ensure_period(params.k_period)?;
        ensure_period(params.d_period)?;
        ensure_len(params.k_period, prices.len())?;

        let k_values: Vec<Option<Decimal>> = rolling_extremes(prices, params.k_period)
            .into_iter()
            .zip(prices)
            .map(|(extremes, price)| {
                let (highest, lowest) = extremes?;
                let range = highest - lowest;
                if range.is_zero() {
                    None
                } else {
                    Some((*price - lowest) / range * Decimal::ONE_HUNDRED)
                }
            })
            .collect();

        let d_divisor = Decimal::from(params.d_period);
        let result = k_values
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let d = if i + 1 >= params.d_period {
                    k_values[i + 1 - params.d_period..=i]
                        .iter()
                        .copied()
                        .sum::<Option<Decimal>>()
                        .map(|sum| sum / d_divisor)
                } else {
                    None
                };
                StochasticResult { k: *k, d }
            })
            .collect();

        Ok(result)
    }

    /// Williams %R 계산.
    ///
    /// %R = -100 × (최고가 - 현재가) / (최고가 - 최저가)
    ///
    /// 범위가 0이면 값이 정의되지 않습니다(None).
    ///
    /// # 반환
    /// -100 ~ 0 사이의 값들
    pub fn williams_r(
        &self,
        prices: &[Decimal],
        params: WilliamsRParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        ensure_period(params.period)?;
        ensure_len(params.period, prices.len())?;

        let result = rolling_extremes(prices, params.period)
            .into_iter()
            .zip(prices)
            .map(|(extremes, price)| {
                let (highest, lowest) = extremes?;
                let range = highest - lowest;
                if range.is_zero() {
                    None
                } else {
                    Some(-Decimal::ONE_HUNDRED * (highest - *price) / range)
                }
            })
            .collect();

        Ok(result)
    }

    /// 가격 모멘텀 계산.
    ///
    /// 연속 틱 간 단순 수익률 `(p_t - p_{t-1}) / p_{t-1}`의 period 이동평균입니다.
    /// 첫 값은 인덱스 period에서 나옵니다.
    pub fn price_momentum(
        &self,
        prices: &[Decimal],
        params: PriceMomentumParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        ensure_period(period)?;
        ensure_len(period + 1, prices.len())?;

        let returns: Vec<Option<Decimal>> = prices
            .windows(2)
            .map(|w| (!w[0].is_zero()).then(|| (w[1] - w[0]) / w[0]))
            .collect();

        let divisor = Decimal::from(period);
        let mut result = vec![None; period];
        result.extend(returns.windows(period).map(|window| {
            window
                .iter()
                .copied()
                .sum::<Option<Decimal>>()
                .map(|sum| sum / divisor)
        }));

        Ok(result)
    }
}

/// 가격 변화를 (상승폭, 하락폭)으로 분리.
fn split_change(delta: Decimal) -> (Decimal, Decimal) {
    if delta > Decimal::ZERO {
        (delta, Decimal::ZERO)
    } else {
        (Decimal::ZERO, -delta)
    }
}

fn rsi_value(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        return Decimal::ONE_HUNDRED;
    }
    let rs = avg_gain / avg_loss;
    Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + rs)
}

/// 각 시점까지 `period`개 윈도우의 (최고가, 최저가).
fn rolling_extremes(prices: &[Decimal], period: usize) -> Vec<Option<(Decimal, Decimal)>> {
    (0..prices.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &prices[i + 1 - period..=i];
            let highest = window.iter().max().copied()?;
            let lowest = window.iter().min().copied()?;
            Some((highest, lowest))
        })
        .collect()
}
