//! 기술적 점수 (0-100).
//!
//! | 항목 | 최대 |
//! |------|------|
//! | 가격 모멘텀 (변동률 %) | 30 |
//! | 거래량 | 25 |
//! | 매수/매도 압력 | 25 |
//! | 변동성 (낮을수록 높음) | 20 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scorer_core::{
    band_points, max_band_points, BuySellRatio, Quantity, SessionSummary, TechnicalBreakdown,
    TechnicalConfig,
};

/// 기술적 점수 입력.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalInputs {
    /// 세션 가격 변동률 (%)
    pub price_change_pct: Decimal,
    /// 총 거래량
    pub total_volume: Quantity,
    /// 매수/매도 비율
    pub buy_sell_ratio: BuySellRatio,
    /// 체결 가격 표준편차
    pub volatility: Decimal,
}

impl From<&SessionSummary> for TechnicalInputs {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            price_change_pct: summary.price_change_pct,
            total_volume: summary.total_volume,
            buy_sell_ratio: summary.buy_sell_ratio,
            volatility: summary.price_volatility,
        }
    }
}

/// 기술적 점수 계산기.
#[derive(Debug, Clone, Default)]
pub struct TechnicalScorer {
    config: TechnicalConfig,
}

impl TechnicalScorer {
    /// 구간 설정으로 계산기를 생성합니다.
    pub fn new(config: TechnicalConfig) -> Self {
        Self { config }
    }

    /// 항목별 점수를 계산합니다.
    ///
    /// 매도 거래량이 0이고 매수 거래량이 있으면 매수/매도 항목은 최고 구간 점수를,
    /// 방향이 확인된 거래량이 없으면 0점을 받습니다.
    pub fn score(&self, inputs: &TechnicalInputs) -> TechnicalBreakdown {
        let buy_sell_pressure = match inputs.buy_sell_ratio {
            BuySellRatio::Finite(ratio) => band_points(&self.config.buy_sell_ratio, ratio),
            BuySellRatio::Unbounded => max_band_points(&self.config.buy_sell_ratio),
            BuySellRatio::Undefined => Decimal::ZERO,
        };

        TechnicalBreakdown {
            momentum: band_points(&self.config.momentum, inputs.price_change_pct),
            volume: band_points(&self.config.volume, Decimal::from(inputs.total_volume)),
            buy_sell_pressure,
            volatility: band_points(&self.config.volatility, inputs.volatility),
        }
    }
}
