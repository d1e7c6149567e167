//! 추세 지표 (Trend Indicators).
//!
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average, SMA로 시드)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ensure_len, ensure_period, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// 시그널 라인 첫 값까지 필요한 데이터 수.
    pub fn required_len(&self) -> usize {
        self.fast_period.max(self.slow_period) + self.signal_period - 1
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Option<Decimal>,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Option<Decimal>,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Option<Decimal>,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        ensure_period(period)?;
        ensure_len(period, prices.len())?;

        let divisor = Decimal::from(period);
        let mut result = Vec::with_capacity(prices.len());
        let mut window_sum = Decimal::ZERO;

        for (i, price) in prices.iter().enumerate() {
            window_sum += *price;
            if i >= period {
                window_sum -= prices[i - period];
            }

            if i + 1 >= period {
                result.push(Some(window_sum / divisor));
            } else {
                result.push(None);
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// 첫 값은 처음 period개의 SMA이며, 이후 k = 2 / (period + 1)로 평활합니다.
    pub fn ema(
        &self,
        prices: &[Decimal],
        params: EmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;
        ensure_period(period)?;
        ensure_len(period, prices.len())?;

        let k = Decimal::TWO / Decimal::from(period + 1);
        let mut result = vec![None; period - 1];

        let mut prev = prices[..period].iter().sum::<Decimal>() / Decimal::from(period);
        result.push(Some(prev));

        for price in &prices[period..] {
            prev = *price * k + prev * (Decimal::ONE - k);
            result.push(Some(prev));
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// 시그널 라인의 첫 값이 나올 만큼(장기 + 시그널 - 1) 데이터가 있어야 합니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        ensure_period(params.fast_period)?;
        ensure_period(params.slow_period)?;
        ensure_period(params.signal_period)?;
        ensure_len(params.required_len(), prices.len())?;

        let fast = self.ema(prices, EmaParams { period: params.fast_period })?;
        let slow = self.ema(prices, EmaParams { period: params.slow_period })?;

        let macd_line: Vec<Option<Decimal>> = fast
            .iter()
            .zip(slow.iter())
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => Some(*f - *s),
                _ => None,
            })
            .collect();

        // MACD 라인이 정의된 구간에서만 시그널 EMA를 계산
        let offset = params.fast_period.max(params.slow_period) - 1;
        let defined: Vec<Decimal> = macd_line.iter().flatten().copied().collect();
        let signal = self.ema(&defined, EmaParams { period: params.signal_period })?;

        let result = macd_line
            .iter()
            .enumerate()
            .map(|(i, macd)| {
                let signal = i
                    .checked_sub(offset)
                    .and_then(|j| signal.get(j).copied().flatten());
                let histogram = match (*macd, signal) {
                    (Some(m), Some(s)) => Some(m - s),
                    _ => None,
                };
                MacdResult {
                    macd: *macd,
                    signal,
                    histogram,
                }
            })
            .collect();

        Ok(result)
    }
}
