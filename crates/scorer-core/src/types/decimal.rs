//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 가격, 비율, 점수 계산에 필요한 정밀 소수점 타입과 통계 헬퍼를 제공합니다.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 체결 수량 (주식 수).
pub type Quantity = u64;

/// 퍼센트 타입 (0.01 = 1%).
pub type Percentage = Decimal;

/// 점수 타입 (0-100).
pub type Score = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 퍼센트 문자열로 변환합니다 (예: "5.25%").
    fn to_percentage_string(&self) -> String;

    /// Newton-Raphson 방식 제곱근 근사.
    ///
    /// 음수와 0은 0을 반환합니다.
    fn sqrt_approx(&self) -> Decimal;
}

impl DecimalExt for Decimal {
    fn to_percentage_string(&self) -> String {
        let pct = *self * Decimal::ONE_HUNDRED;
        format!("{:.2}%", pct)
    }

    fn sqrt_approx(&self) -> Decimal {
        let value = *self;
        if value <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // f64 근사값에서 시작하면 큰 값에서도 수렴이 빠르다
        let mut x = value
            .to_f64()
            .map(f64::sqrt)
            .and_then(Decimal::from_f64)
            .filter(|guess| *guess > Decimal::ZERO)
            .unwrap_or(value / Decimal::TWO);
        let tolerance = Decimal::new(1, 10); // 0.0000000001

        for _ in 0..50 {
            let next_x = (x + value / x) / Decimal::TWO;
            if (next_x - x).abs() < tolerance {
                return next_x;
            }
            x = next_x;
        }

        x
    }
}

/// 산술 평균. 빈 슬라이스는 `None`.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// 표본 표준편차 (n-1).
///
/// 값이 2개 미만이면 0을 반환합니다.
pub fn sample_std_dev(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let Some(avg) = mean(values) else {
        return Decimal::ZERO;
    };

    let variance: Decimal = values
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum::<Decimal>()
        / Decimal::from(values.len() - 1);

    variance.sqrt_approx()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_ext() {
        let d = dec!(0.0525);
        assert_eq!(d.to_percentage_string(), "5.25%");
    }

    #[test]
    fn test_sqrt_approx() {
        assert_eq!(dec!(0).sqrt_approx(), Decimal::ZERO);
        assert_eq!(dec!(-4).sqrt_approx(), Decimal::ZERO);
        assert!((dec!(16).sqrt_approx() - dec!(4)).abs() < dec!(0.0000001));
        assert!((dec!(2).sqrt_approx() - dec!(1.41421356)).abs() < dec!(0.0000001));
        assert!((dec!(1000000000000).sqrt_approx() - dec!(1000000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_sample_std_dev() {
        // 2, 4, 4, 4, 5, 5, 7, 9 -> 표본 분산 32/7
        let values = vec![
            dec!(2),
            dec!(4),
            dec!(4),
            dec!(4),
            dec!(5),
            dec!(5),
            dec!(7),
            dec!(9),
        ];
        let std = sample_std_dev(&values);
        assert!((std - dec!(2.13808994)).abs() < dec!(0.000001));

        assert_eq!(sample_std_dev(&[dec!(10)]), Decimal::ZERO);
        assert_eq!(sample_std_dev(&[dec!(10), dec!(10), dec!(10)]), Decimal::ZERO);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[dec!(1), dec!(2), dec!(3)]), Some(dec!(2)));
    }

    proptest! {
        #[test]
        fn sqrt_squares_back(raw in 1i64..10_000_000_000i64) {
            let value = Decimal::new(raw, 4);
            let root = value.sqrt_approx();
            prop_assert!(root > Decimal::ZERO);
            prop_assert!((root * root - value).abs() < dec!(0.00001));
        }
    }
}
