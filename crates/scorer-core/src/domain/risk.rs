//! 리스크 프로파일.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 수익률 분포에서 계산한 리스크 지표.
///
/// 모든 수익률 값은 소수 단위입니다 (-0.05 = -5%).
/// 리스크 점수는 0-100이며 높을수록 안전합니다. 수익률이 없으면 모두 0입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// 수익률 표본 표준편차
    pub daily_volatility: Decimal,
    /// 연율화 변동성 (표준편차 × sqrt(연간 기간 수))
    pub annualized_volatility: Decimal,
    /// 95% 역사적 VaR (음수)
    pub var_95: Decimal,
    /// 99% 역사적 VaR (음수)
    pub var_99: Decimal,
    /// 최대 낙폭 (0 이하)
    pub max_drawdown: Decimal,
    /// 샤프 비율 (무위험 수익률 0)
    pub sharpe_ratio: Decimal,
    /// 변동성 점수: 100 - 변동성 × 1000
    pub volatility_score: Decimal,
    /// VaR 점수: 100 + VaR95 × 1000
    pub var_score: Decimal,
    /// 낙폭 점수: 100 + MDD × 100
    pub drawdown_score: Decimal,
    /// 종합 리스크 점수 (세 점수의 평균)
    pub overall_risk_score: Decimal,
    /// 계산에 사용된 수익률 개수
    pub sample_size: usize,
}

impl RiskProfile {
    /// 수익률이 없어 모든 지표가 0인 프로파일.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 계산에 사용된 수익률이 있는지 확인합니다.
    pub fn has_samples(&self) -> bool {
        self.sample_size > 0
    }
}
