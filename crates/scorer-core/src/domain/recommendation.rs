//! 투자 의견.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Score};

/// 투자 의견 등급 (높은 순).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// 매도
    Sell,
    /// 비중 축소
    WeakSell,
    /// 보유
    Hold,
    /// 매수
    Buy,
    /// 적극 매수
    StrongBuy,
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationTier::StrongBuy => write!(f, "STRONG BUY"),
            RecommendationTier::Buy => write!(f, "BUY"),
            RecommendationTier::Hold => write!(f, "HOLD"),
            RecommendationTier::WeakSell => write!(f, "WEAK SELL"),
            RecommendationTier::Sell => write!(f, "SELL"),
        }
    }
}

/// 리스크 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 낮음
    Low,
    /// 중간
    Medium,
    /// 높음
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// 투자 기간 (개월).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeHorizon {
    /// 최소 개월 수
    pub min_months: u32,
    /// 최대 개월 수
    pub max_months: u32,
}

impl TimeHorizon {
    /// 새 투자 기간을 생성합니다.
    pub const fn months(min_months: u32, max_months: u32) -> Self {
        Self {
            min_months,
            max_months,
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} months", self.min_months, self.max_months)
    }
}

/// 재무 레버리지 (부채비율 기반).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialLeverage {
    /// 부채비율 (%)
    pub debt_ratio: Decimal,
    /// 레버리지 리스크 수준
    pub level: RiskLevel,
}

/// 최종 투자 의견.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 등급
    pub tier: RecommendationTier,
    /// 신뢰도 (0-100)
    pub confidence: Score,
    /// 기준 가격 (세션 종가)
    pub reference_price: Price,
    /// 목표가
    pub target_price: Price,
    /// 투자 기간
    pub time_horizon: TimeHorizon,
    /// 리스크 점수 (0-100)
    pub risk_score: Score,
    /// 리스크 수준
    pub risk_level: RiskLevel,
    /// 강점
    pub strengths: Vec<String>,
    /// 리스크 요인
    pub risk_factors: Vec<String>,
}

impl Recommendation {
    /// 목표가 기준 기대 수익률 (%).
    pub fn upside_pct(&self) -> Decimal {
        if self.reference_price.is_zero() {
            return Decimal::ZERO;
        }
        (self.target_price - self.reference_price) / self.reference_price * Decimal::ONE_HUNDRED
    }
}
