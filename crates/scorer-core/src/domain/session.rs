//! 장중 세션 요약.
//!
//! 정규화 단계에서 틱 시계열로부터 한 번 계산되며, 기술적 점수와
//! 투자 의견 근거의 입력으로 쓰입니다.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity};

/// 매수/매도 거래량 비율.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BuySellRatio {
    /// 매도 거래량이 양수인 일반적인 비율
    Finite(Decimal),
    /// 매도 거래량 0, 매수 거래량 양수 (최대값으로 취급)
    Unbounded,
    /// 방향이 확인된 거래량이 없음
    Undefined,
}

impl BuySellRatio {
    /// 매수/매도 거래량으로 비율을 계산합니다.
    pub fn from_volumes(buy_volume: Quantity, sell_volume: Quantity) -> Self {
        match (buy_volume, sell_volume) {
            (0, 0) => BuySellRatio::Undefined,
            (_, 0) => BuySellRatio::Unbounded,
            (buy, sell) => BuySellRatio::Finite(Decimal::from(buy) / Decimal::from(sell)),
        }
    }

    /// 유한한 비율 값.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            BuySellRatio::Finite(v) => Some(*v),
            _ => None,
        }
    }

    /// 비율이 임계값을 초과하는지 확인합니다 (`Unbounded`는 항상 초과).
    pub fn exceeds(&self, threshold: Decimal) -> bool {
        match self {
            BuySellRatio::Finite(v) => *v > threshold,
            BuySellRatio::Unbounded => true,
            BuySellRatio::Undefined => false,
        }
    }

    /// 비율이 임계값 미만인지 확인합니다 (`Undefined`는 판단하지 않음).
    pub fn falls_below(&self, threshold: Decimal) -> bool {
        match self {
            BuySellRatio::Finite(v) => *v < threshold,
            _ => false,
        }
    }
}

impl fmt::Display for BuySellRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuySellRatio::Finite(v) => write!(f, "{:.2}", v),
            BuySellRatio::Unbounded => write!(f, "inf"),
            BuySellRatio::Undefined => write!(f, "n/a"),
        }
    }
}

/// 장중 가격 추세 (종가 대 시가).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// 상승
    Up,
    /// 하락
    Down,
    /// 보합
    Sideways,
}

/// 매수/매도 비율 기반 시장 심리.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSentiment {
    /// 매우 긍정적 (비율 > 1.5)
    VeryPositive,
    /// 긍정적 (비율 > 1.1)
    Positive,
    /// 중립 (비율 > 0.9)
    Neutral,
    /// 부정적
    Negative,
}

impl MarketSentiment {
    /// 매수/매도 비율로 시장 심리를 분류합니다.
    pub fn from_ratio(ratio: BuySellRatio) -> Self {
        match ratio {
            BuySellRatio::Unbounded => MarketSentiment::VeryPositive,
            BuySellRatio::Undefined => MarketSentiment::Neutral,
            BuySellRatio::Finite(v) if v > Decimal::new(15, 1) => MarketSentiment::VeryPositive,
            BuySellRatio::Finite(v) if v > Decimal::new(11, 1) => MarketSentiment::Positive,
            BuySellRatio::Finite(v) if v > Decimal::new(9, 1) => MarketSentiment::Neutral,
            BuySellRatio::Finite(_) => MarketSentiment::Negative,
        }
    }
}

/// 세션 요약 통계.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// 종목 코드
    pub symbol: String,
    /// 세션 시작 시각
    pub session_start: NaiveDateTime,
    /// 세션 종료 시각
    pub session_end: NaiveDateTime,
    /// 체결 건수
    pub data_points: usize,
    /// 시가 (첫 체결 가격)
    pub open: Price,
    /// 종가 (마지막 체결 가격)
    pub close: Price,
    /// 최고가
    pub high: Price,
    /// 최저가
    pub low: Price,
    /// 평균 체결 가격
    pub average_price: Price,
    /// 가격 변동 (종가 - 시가)
    pub price_change: Decimal,
    /// 가격 변동률 (%)
    pub price_change_pct: Decimal,
    /// 체결 가격 표본 표준편차
    pub price_volatility: Decimal,
    /// 가격 범위 (최고가 - 최저가)
    pub price_range: Decimal,
    /// 총 거래량
    pub total_volume: Quantity,
    /// 매수 거래량
    pub buy_volume: Quantity,
    /// 매도 거래량
    pub sell_volume: Quantity,
    /// 매수/매도 비율
    pub buy_sell_ratio: BuySellRatio,
    /// 시장 심리
    pub sentiment: MarketSentiment,
    /// 추세
    pub trend: Trend,
    /// 거래량 최대 시간대
    pub peak_hour: Option<u32>,
    /// 거래량 최대 시간대의 거래량
    pub peak_hour_volume: Quantity,
}
