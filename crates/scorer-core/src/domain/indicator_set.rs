//! 지표 집합.
//!
//! 틱 시계열과 같은 길이로 정렬된 지표 시계열, 계산 불가 표식,
//! 볼륨 프로파일 및 지지/저항 수준을 한 번의 실행 결과로 묶습니다.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 이력이 지표 윈도우보다 짧아 계산할 수 없음을 나타내는 표식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorUnavailable {
    /// 필요한 데이터 포인트 수
    pub required: usize,
    /// 제공된 데이터 포인트 수
    pub provided: usize,
}

/// 가격대별 거래량 레벨.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// 가격대 하단
    pub price_low: Decimal,
    /// 가격대 상단
    pub price_high: Decimal,
    /// 가격대 중심 가격
    pub price: Decimal,
    /// 해당 가격대의 총 거래량
    pub volume: Decimal,
    /// 전체 거래량 대비 비율 (%)
    pub volume_pct: Decimal,
}

/// 볼륨 프로파일 (매물대).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// 가격대별 거래량 레벨 (가격 오름차순)
    pub price_levels: Vec<PriceLevel>,
    /// POC (Point of Control) - 최대 거래량 가격대의 중심 가격
    pub poc: Decimal,
    /// POC 인덱스
    pub poc_index: usize,
    /// Value Area 상한
    pub value_area_high: Decimal,
    /// Value Area 하한
    pub value_area_low: Decimal,
    /// Value Area에 포함된 거래량
    pub value_area_volume: Decimal,
    /// 전체 거래량
    pub total_volume: Decimal,
    /// 세션 최저가
    pub price_low: Decimal,
    /// 세션 최고가
    pub price_high: Decimal,
}

/// 세션 범위 기반 지지/저항 수준 (참고용).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// 세션 최저가
    pub session_low: Decimal,
    /// 세션 최고가
    pub session_high: Decimal,
    /// 지지선 (최저가에서 가까운 순)
    pub supports: Vec<Decimal>,
    /// 저항선 (최고가에서 가까운 순)
    pub resistances: Vec<Decimal>,
}

/// 한 번의 실행에서 계산된 지표 묶음.
///
/// 생성 후에는 읽기 전용입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// 지표 이름 → 틱과 정렬된 값 (값이 없는 구간은 `None`)
    pub series: BTreeMap<String, Vec<Option<Decimal>>>,
    /// 계산할 수 없었던 지표
    pub unavailable: BTreeMap<String, IndicatorUnavailable>,
    /// 볼륨 프로파일 (거래량이 없으면 `None`)
    pub volume_profile: Option<VolumeProfile>,
    /// 지지/저항 수준
    pub levels: Option<SupportResistance>,
}

impl IndicatorSet {
    /// 빈 지표 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지표 시계열을 추가합니다.
    pub fn insert_series(&mut self, name: impl Into<String>, values: Vec<Option<Decimal>>) {
        self.series.insert(name.into(), values);
    }

    /// 지표를 계산 불가로 표시합니다.
    pub fn mark_unavailable(&mut self, name: impl Into<String>, marker: IndicatorUnavailable) {
        self.unavailable.insert(name.into(), marker);
    }

    /// 지표 시계열을 조회합니다.
    pub fn get(&self, name: &str) -> Option<&[Option<Decimal>]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// 지표의 마지막 값.
    pub fn latest(&self, name: &str) -> Option<Decimal> {
        self.get(name).and_then(|values| values.last().copied().flatten())
    }

    /// 계산 불가 표식을 조회합니다.
    pub fn unavailable_reason(&self, name: &str) -> Option<&IndicatorUnavailable> {
        self.unavailable.get(name)
    }

    /// 지표가 계산 불가로 표시되었는지 확인합니다.
    pub fn is_unavailable(&self, name: &str) -> bool {
        self.unavailable.contains_key(name)
    }
}
