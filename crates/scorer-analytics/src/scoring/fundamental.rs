//! 펀더멘털 점수 (0-100).
//!
//! 가장 최근 재무 비율 스냅샷만 사용합니다. 누락된 항목은 0점이며
//! [`FundamentalBreakdown::missing`]에 기록됩니다.

use rust_decimal::Decimal;

use scorer_core::{
    band_points, FinancialLeverage, FundamentalBreakdown, FundamentalConfig, RatioField,
    RatioHistory, RatioSnapshot, RiskLevel, ThresholdBand,
};

/// 펀더멘털 점수 계산기.
#[derive(Debug, Clone, Default)]
pub struct FundamentalScorer {
    config: FundamentalConfig,
}

impl FundamentalScorer {
    /// 구간 설정으로 계산기를 생성합니다.
    pub fn new(config: FundamentalConfig) -> Self {
        Self { config }
    }

    /// 재무 비율 이력으로 항목별 점수를 계산합니다.
    ///
    /// 이력이 비어 있으면 모든 항목이 누락된 0점 결과를 반환합니다.
    pub fn score(&self, history: &RatioHistory) -> FundamentalBreakdown {
        match history.latest() {
            Some(snapshot) => self.score_snapshot(snapshot),
            None => FundamentalBreakdown {
                missing: vec![RatioField::Roe, RatioField::Pe, RatioField::Pb, RatioField::Roa],
                ..Default::default()
            },
        }
    }

    /// 단일 스냅샷의 항목별 점수.
    pub fn score_snapshot(&self, snapshot: &RatioSnapshot) -> FundamentalBreakdown {
        let mut missing = Vec::new();
        let mut points = |field: RatioField, bands: &[ThresholdBand]| match snapshot.get(field) {
            Some(value) => band_points(bands, value),
            None => {
                missing.push(field);
                Decimal::ZERO
            }
        };

        let roe = points(RatioField::Roe, &self.config.roe);
        let pe = points(RatioField::Pe, &self.config.pe);
        let pb = points(RatioField::Pb, &self.config.pb);
        let roa = points(RatioField::Roa, &self.config.roa);

        FundamentalBreakdown {
            roe,
            pe,
            pb,
            roa,
            missing,
        }
    }

    /// 최신 스냅샷의 부채비율로 레버리지 수준을 분류합니다.
    ///
    /// 총부채나 총자산이 없으면 `None`.
    pub fn leverage(&self, history: &RatioHistory) -> Option<FinancialLeverage> {
        let debt_ratio = history.latest()?.debt_ratio()?;

        let level = if debt_ratio > self.config.leverage_high_above {
            RiskLevel::High
        } else if debt_ratio > self.config.leverage_medium_above {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Some(FinancialLeverage { debt_ratio, level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn history(snapshot: RatioSnapshot) -> RatioHistory {
        RatioHistory::new(vec![snapshot])
    }

    #[test]
    fn test_roe_only() {
        let scorer = FundamentalScorer::default();
        let breakdown = scorer.score(&history(RatioSnapshot {
            roe: Some(dec!(20)),
            ..Default::default()
        }));

        assert_eq!(breakdown.roe, dec!(30));
        assert_eq!(breakdown.total(), dec!(30));
        assert_eq!(
            breakdown.missing,
            vec![RatioField::Pe, RatioField::Pb, RatioField::Roa]
        );
    }

    #[test]
    fn test_full_snapshot() {
        let scorer = FundamentalScorer::default();
        let breakdown = scorer.score(&history(RatioSnapshot {
            roe: Some(dec!(12)),
            pe: Some(dec!(8)),
            pb: Some(dec!(1.8)),
            roa: Some(dec!(3)),
            ..Default::default()
        }));

        assert_eq!(breakdown.roe, dec!(20));
        assert_eq!(breakdown.pe, dec!(20));
        assert_eq!(breakdown.pb, dec!(20));
        assert_eq!(breakdown.roa, dec!(10));
        assert_eq!(breakdown.total(), dec!(70));
        assert!(breakdown.missing.is_empty());
    }

    #[test]
    fn test_uses_latest_snapshot_only() {
        let scorer = FundamentalScorer::default();
        let breakdown = scorer.score(&RatioHistory::new(vec![
            RatioSnapshot {
                pe: Some(dec!(15)),
                ..Default::default()
            },
            RatioSnapshot {
                roe: Some(dec!(25)),
                ..Default::default()
            },
        ]));

        assert_eq!(breakdown.pe, dec!(25));
        assert_eq!(breakdown.roe, Decimal::ZERO);
        assert!(breakdown.is_missing(RatioField::Roe));
    }

    #[test]
    fn test_empty_history() {
        let breakdown = FundamentalScorer::default().score(&RatioHistory::default());
        assert_eq!(breakdown.total(), Decimal::ZERO);
        assert_eq!(breakdown.missing.len(), 4);
    }

    #[test]
    fn test_leverage_levels() {
        let scorer = FundamentalScorer::default();
        let leverage = |debt| {
            scorer.leverage(&history(RatioSnapshot {
                total_assets: Some(dec!(100)),
                total_debt: Some(debt),
                ..Default::default()
            }))
        };

        assert_eq!(leverage(dec!(65)).map(|l| l.level), Some(RiskLevel::High));
        assert_eq!(leverage(dec!(60)).map(|l| l.level), Some(RiskLevel::Medium));
        assert_eq!(leverage(dec!(40)).map(|l| l.level), Some(RiskLevel::Low));
        assert!(scorer.leverage(&RatioHistory::default()).is_none());
    }
}
