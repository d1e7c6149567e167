//! 재무 비율 스냅샷.
//!
//! 모든 필드는 누락될 수 있으며, 누락은 `None`으로 명시적으로 표현합니다.
//! ROE/ROA는 퍼센트 단위입니다 (15 = 15%).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 스코어링에 쓰이는 재무 비율 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioField {
    /// 자기자본이익률 (%)
    Roe,
    /// 주가수익비율
    Pe,
    /// 주가순자산비율
    Pb,
    /// 총자산이익률 (%)
    Roa,
}

impl fmt::Display for RatioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioField::Roe => write!(f, "ROE"),
            RatioField::Pe => write!(f, "P/E"),
            RatioField::Pb => write!(f, "P/B"),
            RatioField::Roa => write!(f, "ROA"),
        }
    }
}

/// 특정 보고 기간의 재무 비율.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioSnapshot {
    /// 보고 기간 라벨 (예: "2024-Q3")
    pub period: Option<String>,
    /// 주가수익비율
    #[serde(alias = "price_to_earning", alias = "pe_ratio")]
    pub pe: Option<Decimal>,
    /// 주가순자산비율
    #[serde(alias = "price_to_book", alias = "pb_ratio")]
    pub pb: Option<Decimal>,
    /// 자기자본이익률 (%)
    pub roe: Option<Decimal>,
    /// 총자산이익률 (%)
    pub roa: Option<Decimal>,
    /// 주당순이익
    #[serde(alias = "earning_per_share")]
    pub eps: Option<Decimal>,
    /// 총자산
    pub total_assets: Option<Decimal>,
    /// 자기자본
    pub total_equity: Option<Decimal>,
    /// 총부채
    pub total_debt: Option<Decimal>,
}

impl RatioSnapshot {
    /// 항목 값을 조회합니다.
    pub fn get(&self, field: RatioField) -> Option<Decimal> {
        match field {
            RatioField::Roe => self.roe,
            RatioField::Pe => self.pe,
            RatioField::Pb => self.pb,
            RatioField::Roa => self.roa,
        }
    }

    /// 부채비율 (총부채 / 총자산 × 100).
    ///
    /// 총자산이 0 이하이거나 항목이 누락되면 `None`.
    pub fn debt_ratio(&self) -> Option<Decimal> {
        match (self.total_debt, self.total_assets) {
            (Some(debt), Some(assets)) if assets > Decimal::ZERO => {
                Some(debt / assets * Decimal::ONE_HUNDRED)
            }
            _ => None,
        }
    }
}

/// 재무 비율 이력 (최신 순).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioHistory {
    snapshots: Vec<RatioSnapshot>,
}

impl RatioHistory {
    /// 최신 순으로 정렬된 스냅샷으로 이력을 생성합니다.
    pub fn new(snapshots: Vec<RatioSnapshot>) -> Self {
        Self { snapshots }
    }

    /// 가장 최근 스냅샷.
    pub fn latest(&self) -> Option<&RatioSnapshot> {
        self.snapshots.first()
    }

    /// 스냅샷 개수.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// 이력이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// 스냅샷 순회 (최신 순).
    pub fn iter(&self) -> impl Iterator<Item = &RatioSnapshot> {
        self.snapshots.iter()
    }
}

impl From<Vec<RatioSnapshot>> for RatioHistory {
    fn from(snapshots: Vec<RatioSnapshot>) -> Self {
        Self::new(snapshots)
    }
}
