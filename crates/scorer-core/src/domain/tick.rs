//! 체결(틱) 데이터 모델.
//!
//! 한 종목의 장중 체결 기록과, 검증을 거쳐 시간순으로 정렬된 틱 시계열을 정의합니다.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ScorerError, ScorerResult};
use crate::types::{Price, Quantity};

/// 체결 주체 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// 매수 주도 체결
    Buy,
    /// 매도 주도 체결
    Sell,
    /// 방향 미상 (장전/장후 동시호가 등)
    #[default]
    Unknown,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
            TradeSide::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = std::convert::Infallible;

    /// 알 수 없는 값은 모두 `Unknown`으로 취급합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "buy" | "b" | "bu" => TradeSide::Buy,
            "sell" | "s" | "sd" => TradeSide::Sell,
            _ => TradeSide::Unknown,
        })
    }
}

impl<'de> Deserialize<'de> for TradeSide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.parse().ok())
            .unwrap_or(TradeSide::Unknown))
    }
}

/// 타임스탬프 역직렬화 ('T' 구분자와 공백 구분자 모두 허용).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// 세션 로컬 시각 문자열을 파싱합니다.
pub fn parse_timestamp(raw: &str) -> ScorerResult<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let trimmed = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ScorerError::InvalidInput(format!("잘못된 타임스탬프: {}", raw)))
}

/// 단일 체결 기록.
///
/// 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// 체결 시각 (세션 로컬)
    #[serde(alias = "time", deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// 체결 가격
    pub price: Price,
    /// 체결 수량
    #[serde(default)]
    pub volume: Quantity,
    /// 체결 방향
    #[serde(default, alias = "match_type")]
    pub side: TradeSide,
}

impl TickRecord {
    /// 새 체결 기록을 생성합니다.
    pub fn new(timestamp: NaiveDateTime, price: Price, volume: Quantity, side: TradeSide) -> Self {
        Self {
            timestamp,
            price,
            volume,
            side,
        }
    }

    /// 체결 대금 (가격 × 수량).
    pub fn notional(&self) -> Decimal {
        self.price * Decimal::from(self.volume)
    }
}

/// 한 종목 한 세션의 정렬된 틱 시계열.
///
/// 불변식: 비어 있지 않음, 타임스탬프 비감소, 모든 가격 양수.
#[derive(Debug, Clone, Serialize)]
pub struct TickSeries {
    symbol: String,
    ticks: Vec<TickRecord>,
}

impl TickSeries {
    /// 검증을 거쳐 틱 시계열을 생성합니다.
    ///
    /// # 에러
    /// - 빈 입력: `InsufficientData`
    /// - 정렬되지 않았거나 가격이 양수가 아닌 입력: `InvalidInput`
    pub fn try_new(symbol: impl Into<String>, ticks: Vec<TickRecord>) -> ScorerResult<Self> {
        if ticks.is_empty() {
            return Err(ScorerError::no_trade_data(0));
        }

        if let Some(bad) = ticks.iter().find(|t| t.price <= Decimal::ZERO) {
            return Err(ScorerError::InvalidInput(format!(
                "가격은 양수여야 합니다: {} @ {}",
                bad.price, bad.timestamp
            )));
        }

        if ticks.windows(2).any(|w| w[1].timestamp < w[0].timestamp) {
            return Err(ScorerError::InvalidInput(
                "체결 기록이 시간순으로 정렬되어 있지 않습니다".to_string(),
            ));
        }

        Ok(Self {
            symbol: symbol.into(),
            ticks,
        })
    }

    /// 종목 코드.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 체결 기록 슬라이스.
    pub fn ticks(&self) -> &[TickRecord] {
        &self.ticks
    }

    /// 체결 건수.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// 항상 `false` (불변식상 비어 있을 수 없음).
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// 가격 시계열.
    pub fn prices(&self) -> Vec<Price> {
        self.ticks.iter().map(|t| t.price).collect()
    }

    /// 거래량 시계열 (Decimal).
    pub fn volumes(&self) -> Vec<Decimal> {
        self.ticks.iter().map(|t| Decimal::from(t.volume)).collect()
    }

    /// 첫 체결.
    pub fn first(&self) -> &TickRecord {
        &self.ticks[0]
    }

    /// 마지막 체결.
    pub fn last(&self) -> &TickRecord {
        &self.ticks[self.ticks.len() - 1]
    }

    /// 시가 (첫 체결 가격).
    pub fn open(&self) -> Price {
        self.first().price
    }

    /// 종가 (마지막 체결 가격).
    pub fn close(&self) -> Price {
        self.last().price
    }

    /// 세션 최고가.
    pub fn high(&self) -> Price {
        self.ticks
            .iter()
            .map(|t| t.price)
            .max()
            .unwrap_or_else(|| self.close())
    }

    /// 세션 최저가.
    pub fn low(&self) -> Price {
        self.ticks
            .iter()
            .map(|t| t.price)
            .min()
            .unwrap_or_else(|| self.close())
    }

    /// 세션 시작 시각.
    pub fn start(&self) -> NaiveDateTime {
        self.first().timestamp
    }

    /// 세션 종료 시각.
    pub fn end(&self) -> NaiveDateTime {
        self.last().timestamp
    }
}

/// 시간대(0-23시)별 거래량 집계.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyAggregates {
    /// 시간대별 전체 거래량
    pub volume_by_hour: BTreeMap<u32, Quantity>,
    /// 시간대별 매수 거래량
    pub buy_volume_by_hour: BTreeMap<u32, Quantity>,
    /// 시간대별 매도 거래량
    pub sell_volume_by_hour: BTreeMap<u32, Quantity>,
}

impl HourlyAggregates {
    /// 거래량이 가장 많은 시간대와 거래량 (동률이면 이른 시간대).
    pub fn peak_hour(&self) -> Option<(u32, Quantity)> {
        self.volume_by_hour
            .iter()
            .fold(None, |best: Option<(u32, Quantity)>, (&hour, &volume)| match best {
                Some((_, best_volume)) if best_volume >= volume => best,
                _ => Some((hour, volume)),
            })
    }
}
