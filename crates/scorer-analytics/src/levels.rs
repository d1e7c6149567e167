//! 세션 범위 기반 지지/저항 수준.
//!
//! 최저가에서 범위의 일정 비율만큼 위를 지지선으로, 최고가에서 같은 비율만큼
//! 아래를 저항선으로 둡니다. 기본 비율 0.2, 0.4는 범위의 20%/40%/60%/80% 지점입니다.
//! 참고용 수치이며 점수 계산에는 쓰이지 않습니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scorer_core::SupportResistance;

/// 지지/저항 수준 계산기.
#[derive(Debug, Clone)]
pub struct SupportResistanceCalculator {
    fractions: Vec<Decimal>,
}

impl Default for SupportResistanceCalculator {
    fn default() -> Self {
        Self::new(vec![dec!(0.2), dec!(0.4)])
    }
}

impl SupportResistanceCalculator {
    /// 범위 비율로 계산기를 생성합니다 (오름차순으로 정렬됨).
    pub fn new(mut fractions: Vec<Decimal>) -> Self {
        fractions.sort();
        fractions.dedup();
        Self { fractions }
    }

    /// 세션 최저가/최고가로 지지/저항 수준을 계산합니다.
    pub fn calculate(&self, session_low: Decimal, session_high: Decimal) -> SupportResistance {
        let range = session_high - session_low;

        SupportResistance {
            session_low,
            session_high,
            supports: self.fractions.iter().map(|f| session_low + range * *f).collect(),
            resistances: self
                .fractions
                .iter()
                .map(|f| session_high - range * *f)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let levels = SupportResistanceCalculator::default().calculate(dec!(100), dec!(110));

        assert_eq!(levels.supports, vec![dec!(102), dec!(104)]);
        assert_eq!(levels.resistances, vec![dec!(108), dec!(106)]);
    }

    #[test]
    fn test_flat_range_collapses() {
        let levels = SupportResistanceCalculator::new(vec![dec!(0.4), dec!(0.2), dec!(0.2)])
            .calculate(dec!(50), dec!(50));

        assert_eq!(levels.supports, vec![dec!(50), dec!(50)]);
        assert_eq!(levels.resistances, vec![dec!(50), dec!(50)]);
    }
}
