//! 기술적/펀더멘털 점수.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ratio::RatioField;
use crate::types::Score;

/// 점수 상한.
pub const MAX_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// 기술적 점수 세부 항목.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalBreakdown {
    /// 가격 모멘텀 (0-30)
    pub momentum: Score,
    /// 거래량 (0-25)
    pub volume: Score,
    /// 매수/매도 압력 (0-25)
    pub buy_sell_pressure: Score,
    /// 변동성, 낮을수록 높은 점수 (0-20)
    pub volatility: Score,
}

impl TechnicalBreakdown {
    /// 합계 (최대 100).
    pub fn total(&self) -> Score {
        (self.momentum + self.volume + self.buy_sell_pressure + self.volatility).min(MAX_SCORE)
    }
}

/// 펀더멘털 점수 세부 항목.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundamentalBreakdown {
    /// ROE (0-30)
    pub roe: Score,
    /// P/E (0-25)
    pub pe: Score,
    /// P/B (0-25)
    pub pb: Score,
    /// ROA (0-20)
    pub roa: Score,
    /// 누락된 항목 (0점 처리됨)
    pub missing: Vec<RatioField>,
}

impl FundamentalBreakdown {
    /// 합계 (최대 100).
    pub fn total(&self) -> Score {
        (self.roe + self.pe + self.pb + self.roa).min(MAX_SCORE)
    }

    /// 항목이 누락되었는지 확인합니다.
    pub fn is_missing(&self, field: RatioField) -> bool {
        self.missing.contains(&field)
    }
}

/// 최종 점수.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 기술적 점수 (0-100)
    pub technical_score: Score,
    /// 펀더멘털 점수 (0-100)
    pub fundamental_score: Score,
    /// 종합 점수 (두 점수의 평균)
    pub overall_score: Score,
    /// 기술적 점수 세부 항목
    pub technical: TechnicalBreakdown,
    /// 펀더멘털 점수 세부 항목
    pub fundamental: FundamentalBreakdown,
}

impl ScoreResult {
    /// 세부 항목으로부터 점수를 조합합니다.
    pub fn from_breakdowns(technical: TechnicalBreakdown, fundamental: FundamentalBreakdown) -> Self {
        let technical_score = technical.total();
        let fundamental_score = fundamental.total();

        Self {
            technical_score,
            fundamental_score,
            overall_score: (technical_score + fundamental_score) / Decimal::TWO,
            technical,
            fundamental,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_overall_is_mean() {
        let technical = TechnicalBreakdown {
            momentum: dec!(30),
            volume: dec!(25),
            buy_sell_pressure: dec!(25),
            volatility: dec!(20),
        };
        let fundamental = FundamentalBreakdown {
            roe: dec!(30),
            missing: vec![RatioField::Pe, RatioField::Pb, RatioField::Roa],
            ..Default::default()
        };

        let result = ScoreResult::from_breakdowns(technical, fundamental);
        assert_eq!(result.technical_score, dec!(100));
        assert_eq!(result.fundamental_score, dec!(30));
        assert_eq!(result.overall_score, dec!(65));
        assert!(result.fundamental.is_missing(RatioField::Pe));
    }

    #[test]
    fn test_total_is_capped() {
        let technical = TechnicalBreakdown {
            momentum: dec!(60),
            volume: dec!(60),
            ..Default::default()
        };
        assert_eq!(technical.total(), MAX_SCORE);
    }
}
