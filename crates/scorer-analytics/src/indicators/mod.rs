//! 기술적 지표 모듈.
//!
//! 틱 시계열에 대한 기술적 지표를 계산합니다. 모든 시계열은 입력 틱과 같은 길이로
//! 정렬되며, 윈도우가 채워지지 않은 구간은 `None`입니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균
//! - **EMA**: 지수 이동평균
//! - **MACD**: 이동평균 수렴/확산
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Wilder 평활)
//! - **Stochastic**: 스토캐스틱 오실레이터
//! - **Williams %R**
//! - **Price Momentum**: 틱 수익률의 이동평균
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! ## 거래량 지표 (Volume Indicators)
//! - **VWAP**: 거래량 가중 평균 가격 및 표준편차 밴드
//! - **Volume MA**: 거래량 이동평균
//! - **Sentiment Ratio**: 롤링 매수/매도 거래량 비율
//!
//! # 사용 예시
//!
//! ```ignore
//! use scorer_analytics::indicators::{IndicatorEngine, RsiParams, SmaParams};
//!
//! let engine = IndicatorEngine::new();
//! let sma = engine.sma(&prices, SmaParams { period: 20 })?;
//! let rsi = engine.rsi(&prices, RsiParams { period: 14 })?;
//!
//! // 설정 전체를 한 번에 계산
//! let set = engine.compute_all(&series, &config.indicators);
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use scorer_core::{IndicatorConfig, IndicatorSet, IndicatorUnavailable, TickSeries, TradeSide};

use crate::levels::SupportResistanceCalculator;
use crate::volume_profile::VolumeProfileCalculator;

pub use momentum::{
    MomentumCalculator, PriceMomentumParams, RsiParams, StochasticParams, StochasticResult,
    WilliamsRParams,
};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};
pub use volume::{OrderFlowIndicator, SentimentRatioParams, VwapIndicator, VwapPoint};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

pub(crate) fn ensure_period(period: usize) -> IndicatorResult<()> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_len(required: usize, provided: usize) -> IndicatorResult<()> {
    if provided < required {
        return Err(IndicatorError::InsufficientData { required, provided });
    }
    Ok(())
}

/// 지표 집합의 키 이름.
pub mod keys {
    use rust_decimal::Decimal;

    pub const BB_UPPER: &str = "BB_upper";
    pub const BB_MIDDLE: &str = "BB_middle";
    pub const BB_LOWER: &str = "BB_lower";
    pub const MACD: &str = "MACD";
    pub const MACD_SIGNAL: &str = "MACD_signal";
    pub const MACD_HISTOGRAM: &str = "MACD_histogram";
    pub const STOCH_K: &str = "STOCH_K";
    pub const STOCH_D: &str = "STOCH_D";
    pub const WILLIAMS_R: &str = "WILLIAMS_R";
    pub const VWAP: &str = "VWAP";
    pub const MOMENTUM: &str = "MOMENTUM";
    pub const SENTIMENT_RATIO: &str = "SENTIMENT_RATIO";
    pub const VOLUME_PROFILE: &str = "VOLUME_PROFILE";

    /// 이동평균 키 (예: `MA20`).
    pub fn ma(period: usize) -> String {
        format!("MA{}", period)
    }

    /// RSI 키 (예: `RSI14`).
    pub fn rsi(period: usize) -> String {
        format!("RSI{}", period)
    }

    /// 거래량 이동평균 키 (예: `VOLUME_MA20`).
    pub fn volume_ma(period: usize) -> String {
        format!("VOLUME_MA{}", period)
    }

    /// VWAP 상단 밴드 키 (예: `VWAP_upper_2`).
    pub fn vwap_upper(multiplier: Decimal) -> String {
        format!("VWAP_upper_{}", multiplier.normalize())
    }

    /// VWAP 하단 밴드 키 (예: `VWAP_lower_2`).
    pub fn vwap_lower(multiplier: Decimal) -> String {
        format!("VWAP_lower_{}", multiplier.normalize())
    }
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    vwap: VwapIndicator,
    order_flow: OrderFlowIndicator,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.ema(prices, params)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI 계산.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    /// 스토캐스틱 오실레이터 계산.
    pub fn stochastic(
        &self,
        prices: &[Decimal],
        params: StochasticParams,
    ) -> IndicatorResult<Vec<StochasticResult>> {
        self.momentum.stochastic(prices, params)
    }

    /// Williams %R 계산.
    pub fn williams_r(
        &self,
        prices: &[Decimal],
        params: WilliamsRParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.williams_r(prices, params)
    }

    /// 가격 모멘텀 (수익률 이동평균) 계산.
    pub fn price_momentum(
        &self,
        prices: &[Decimal],
        params: PriceMomentumParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.price_momentum(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        self.volatility.bollinger_bands(prices, params)
    }

    // ==================== 거래량 지표 ====================

    /// VWAP 계산.
    pub fn vwap(&self, prices: &[Decimal], volumes: &[Decimal]) -> IndicatorResult<Vec<VwapPoint>> {
        self.vwap.calculate(prices, volumes)
    }

    /// 롤링 매수/매도 심리 비율 계산.
    pub fn sentiment_ratio(
        &self,
        volumes: &[Decimal],
        sides: &[TradeSide],
        params: SentimentRatioParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.order_flow.sentiment_ratio(volumes, sides, params)
    }

    // ==================== 일괄 계산 ====================

    /// 설정에 정의된 모든 지표를 계산해 지표 집합을 만듭니다.
    ///
    /// 이력이 윈도우보다 짧은 지표는 시계열 대신 [`IndicatorUnavailable`] 표식으로 기록됩니다.
    pub fn compute_all(&self, series: &TickSeries, config: &IndicatorConfig) -> IndicatorSet {
        let prices = series.prices();
        let volumes = series.volumes();
        let sides: Vec<TradeSide> = series.ticks().iter().map(|t| t.side).collect();
        let mut set = IndicatorSet::new();

        for &period in &config.ma_periods {
            let result = self.sma(&prices, SmaParams { period }).map(|v| vec![v]);
            record(&mut set, &[keys::ma(period)], result);
        }

        let rsi_period = config.rsi_period;
        let result = self
            .rsi(&prices, RsiParams { period: rsi_period })
            .map(|v| vec![v]);
        record(&mut set, &[keys::rsi(rsi_period)], result);

        let params = BollingerBandsParams {
            period: config.bollinger_period,
            std_dev_multiplier: config.bollinger_std_dev,
        };
        let result = self.bollinger_bands(&prices, params).map(|bands| {
            vec![
                bands.iter().map(|b| b.upper).collect(),
                bands.iter().map(|b| b.middle).collect(),
                bands.iter().map(|b| b.lower).collect(),
            ]
        });
        record(
            &mut set,
            &[keys::BB_UPPER, keys::BB_MIDDLE, keys::BB_LOWER].map(String::from),
            result,
        );

        let params = MacdParams {
            fast_period: config.macd_fast,
            slow_period: config.macd_slow,
            signal_period: config.macd_signal,
        };
        let result = self.macd(&prices, params).map(|macd| {
            vec![
                macd.iter().map(|m| m.macd).collect(),
                macd.iter().map(|m| m.signal).collect(),
                macd.iter().map(|m| m.histogram).collect(),
            ]
        });
        record(
            &mut set,
            &[keys::MACD, keys::MACD_SIGNAL, keys::MACD_HISTOGRAM].map(String::from),
            result,
        );

        let params = StochasticParams {
            k_period: config.stochastic_k,
            d_period: config.stochastic_d,
        };
        let result = self.stochastic(&prices, params).map(|stoch| {
            vec![
                stoch.iter().map(|s| s.k).collect(),
                stoch.iter().map(|s| s.d).collect(),
            ]
        });
        record(
            &mut set,
            &[keys::STOCH_K, keys::STOCH_D].map(String::from),
            result,
        );

        let result = self
            .williams_r(&prices, WilliamsRParams { period: config.williams_period })
            .map(|v| vec![v]);
        record(&mut set, &[keys::WILLIAMS_R.to_string()], result);

        let result = self
            .price_momentum(&prices, PriceMomentumParams { period: config.momentum_period })
            .map(|v| vec![v]);
        record(&mut set, &[keys::MOMENTUM.to_string()], result);

        let mut vwap_names = vec![keys::VWAP.to_string()];
        for m in &config.vwap_band_multipliers {
            vwap_names.push(keys::vwap_upper(*m));
            vwap_names.push(keys::vwap_lower(*m));
        }
        let result = self.vwap(&prices, &volumes).map(|points| {
            let mut columns = vec![points.iter().map(|p| Some(p.vwap)).collect()];
            for m in &config.vwap_band_multipliers {
                columns.push(points.iter().map(|p| Some(p.upper(*m))).collect());
                columns.push(points.iter().map(|p| Some(p.lower(*m))).collect());
            }
            columns
        });
        record(&mut set, &vwap_names, result);

        for &period in &config.volume_ma_periods {
            let result = self.sma(&volumes, SmaParams { period }).map(|v| vec![v]);
            record(&mut set, &[keys::volume_ma(period)], result);
        }

        let params = SentimentRatioParams {
            window: config.sentiment_window,
        };
        let result = self
            .sentiment_ratio(&volumes, &sides, params)
            .map(|v| vec![v]);
        record(&mut set, &[keys::SENTIMENT_RATIO.to_string()], result);

        set.volume_profile = VolumeProfileCalculator::new(config.volume_profile_levels)
            .with_value_area_ratio(config.value_area_ratio)
            .calculate(&prices, &volumes);
        if set.volume_profile.is_none() {
            // 체결 거래량이 전혀 없는 세션
            set.mark_unavailable(
                keys::VOLUME_PROFILE,
                IndicatorUnavailable {
                    required: 1,
                    provided: 0,
                },
            );
        }

        set.levels = Some(
            SupportResistanceCalculator::new(config.level_fractions.clone())
                .calculate(series.low(), series.high()),
        );

        set
    }
}

/// 계산 결과를 지표 집합에 기록합니다.
fn record(
    set: &mut IndicatorSet,
    names: &[String],
    result: IndicatorResult<Vec<Vec<Option<Decimal>>>>,
) {
    match result {
        Ok(columns) => {
            for (name, values) in names.iter().zip(columns) {
                set.insert_series(name.clone(), values);
            }
        }
        Err(IndicatorError::InsufficientData { required, provided }) => {
            for name in names {
                set.mark_unavailable(name.clone(), IndicatorUnavailable { required, provided });
            }
        }
        Err(err) => {
            warn!(indicators = ?names, error = %err, "Indicator calculation skipped");
        }
    }
}
