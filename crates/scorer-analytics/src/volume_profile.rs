//! 볼륨 프로파일 (매물대) 계산.
//!
//! 세션 가격 범위를 같은 폭의 가격대로 나누고 체결 거래량을 집계합니다.
//!
//! # 주요 지표
//!
//! - **POC (Point of Control)**: 최대 거래량이 집중된 가격대
//! - **Value Area (VA)**: 거래량 상위 가격대부터 모아 전체의 70% 이상이 되는 최소 집합의 범위
//!
//! # 예시
//!
//! ```rust,ignore
//! use scorer_analytics::volume_profile::VolumeProfileCalculator;
//!
//! let calculator = VolumeProfileCalculator::new(20);
//! if let Some(profile) = calculator.calculate(&prices, &volumes) {
//!     println!("POC: {}", profile.poc);
//!     println!("Value Area: {} ~ {}", profile.value_area_low, profile.value_area_high);
//! }
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scorer_core::{PriceLevel, VolumeProfile};

/// 볼륨 프로파일 계산기.
#[derive(Debug, Clone)]
pub struct VolumeProfileCalculator {
    /// 가격대 수 (기본: 20)
    num_levels: usize,
    /// Value Area 비율 (기본: 0.7 = 70%)
    value_area_ratio: Decimal,
}

impl Default for VolumeProfileCalculator {
    fn default() -> Self {
        Self::new(20)
    }
}

impl VolumeProfileCalculator {
    /// 새 계산기 생성.
    ///
    /// # 인자
    ///
    /// * `num_levels` - 가격대 수 (최소 1)
    pub fn new(num_levels: usize) -> Self {
        Self {
            num_levels: num_levels.max(1),
            value_area_ratio: dec!(0.70),
        }
    }

    /// Value Area 비율 설정 (0 초과 1 이하).
    pub fn with_value_area_ratio(mut self, ratio: Decimal) -> Self {
        if ratio > Decimal::ZERO && ratio <= Decimal::ONE {
            self.value_area_ratio = ratio;
        }
        self
    }

    /// 볼륨 프로파일 계산.
    ///
    /// # 반환
    ///
    /// 데이터가 없거나 총 거래량이 0이면 `None`.
    /// 가격 범위가 0이면 단일 가격대 하나로 구성됩니다.
    pub fn calculate(&self, prices: &[Decimal], volumes: &[Decimal]) -> Option<VolumeProfile> {
        if prices.is_empty() || prices.len() != volumes.len() {
            return None;
        }

        let total_volume: Decimal = volumes.iter().sum();
        if total_volume <= Decimal::ZERO {
            return None;
        }

        let price_low = prices.iter().min().copied()?;
        let price_high = prices.iter().max().copied()?;

        let num_levels = if price_high > price_low {
            self.num_levels
        } else {
            1
        };
        let level_size = (price_high - price_low) / Decimal::from(num_levels);

        // 1. 가격대별 거래량 집계
        let mut level_volumes = vec![Decimal::ZERO; num_levels];
        for (price, volume) in prices.iter().zip(volumes) {
            let index = if level_size.is_zero() {
                0
            } else {
                ((*price - price_low) / level_size)
                    .floor()
                    .to_usize()
                    .unwrap_or(0)
                    .min(num_levels - 1)
            };
            level_volumes[index] += *volume;
        }

        // 2. 가격대 경계 (마지막 가격대의 상단은 세션 최고가)
        let price_levels: Vec<PriceLevel> = level_volumes
            .iter()
            .enumerate()
            .map(|(i, volume)| {
                let lower = price_low + level_size * Decimal::from(i);
                let upper = if i + 1 == num_levels {
                    price_high
                } else {
                    price_low + level_size * Decimal::from(i + 1)
                };
                PriceLevel {
                    price_low: lower,
                    price_high: upper,
                    price: (lower + upper) / Decimal::TWO,
                    volume: *volume,
                    volume_pct: *volume / total_volume * Decimal::ONE_HUNDRED,
                }
            })
            .collect();

        // 3. POC (동률이면 낮은 가격대)
        let poc_index = price_levels
            .iter()
            .enumerate()
            .fold(0, |best, (i, level)| {
                if level.volume > price_levels[best].volume {
                    i
                } else {
                    best
                }
            });

        // 4. Value Area: 거래량 내림차순으로 목표 비율에 도달할 때까지 선택
        let (value_area_low, value_area_high, value_area_volume) =
            self.value_area(&price_levels, total_volume);

        Some(VolumeProfile {
            poc: price_levels[poc_index].price,
            poc_index,
            value_area_high,
            value_area_low,
            value_area_volume,
            total_volume,
            price_low,
            price_high,
            price_levels,
        })
    }

    fn value_area(&self, levels: &[PriceLevel], total_volume: Decimal) -> (Decimal, Decimal, Decimal) {
        let target = total_volume * self.value_area_ratio;

        let mut ranked: Vec<&PriceLevel> = levels.iter().collect();
        ranked.sort_by(|a, b| b.volume.cmp(&a.volume));

        let mut low: Option<Decimal> = None;
        let mut high: Option<Decimal> = None;
        let mut captured = Decimal::ZERO;

        for level in ranked {
            captured += level.volume;
            low = Some(low.map_or(level.price_low, |l| l.min(level.price_low)));
            high = Some(high.map_or(level.price_high, |h| h.max(level.price_high)));
            if captured >= target {
                break;
            }
        }

        let fallback = levels.first().map(|l| l.price_low).unwrap_or_default();
        (
            low.unwrap_or(fallback),
            high.unwrap_or(fallback),
            captured,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_poc_and_value_area() {
        // 가격 10~20, 10개 가격대 (폭 1)
        let prices = vec![dec!(10), dec!(15.5), dec!(15.2), dec!(16.1), dec!(20), dec!(12.3)];
        let volumes = vec![dec!(5), dec!(50), dec!(30), dec!(10), dec!(3), dec!(2)];
        let profile = VolumeProfileCalculator::new(10)
            .calculate(&prices, &volumes)
            .unwrap();

        assert_eq!(profile.price_levels.len(), 10);
        assert_eq!(profile.total_volume, dec!(100));
        // 15 ~ 16 가격대에 80
        assert_eq!(profile.poc_index, 5);
        assert_eq!(profile.poc, dec!(15.5));
        // 80 ≥ 70 이므로 POC 가격대 하나로 충분
        assert_eq!(profile.value_area_low, dec!(15));
        assert_eq!(profile.value_area_high, dec!(16));
        assert_eq!(profile.value_area_volume, dec!(80));
        // 최고가는 마지막 가격대에 포함
        assert_eq!(profile.price_levels[9].volume, dec!(3));
        assert_eq!(profile.price_levels[9].price_high, dec!(20));
    }

    #[test]
    fn test_value_area_spans_multiple_levels() {
        let prices = vec![dec!(10), dec!(11), dec!(12), dec!(13)];
        let volumes = vec![dec!(30), dec!(10), dec!(25), dec!(35)];
        let profile = VolumeProfileCalculator::new(3)
            .calculate(&prices, &volumes)
            .unwrap();

        // 가격대 폭 1: [10,11)=30, [11,12)=10, [12,13]=60
        assert_eq!(profile.poc_index, 2);
        // 60 + 30 = 90 ≥ 70
        assert_eq!(profile.value_area_volume, dec!(90));
        assert_eq!(profile.value_area_low, dec!(10));
        assert_eq!(profile.value_area_high, dec!(13));
    }

    #[test]
    fn test_flat_session_single_level() {
        let prices = vec![dec!(25); 5];
        let volumes = vec![dec!(100); 5];
        let profile = VolumeProfileCalculator::default()
            .calculate(&prices, &volumes)
            .unwrap();

        assert_eq!(profile.price_levels.len(), 1);
        assert_eq!(profile.poc, dec!(25));
        assert_eq!(profile.value_area_low, dec!(25));
        assert_eq!(profile.value_area_high, dec!(25));
    }

    #[test]
    fn test_zero_volume_is_unavailable() {
        let prices = vec![dec!(10), dec!(11)];
        let volumes = vec![dec!(0), dec!(0)];
        assert!(VolumeProfileCalculator::default()
            .calculate(&prices, &volumes)
            .is_none());
    }
}
