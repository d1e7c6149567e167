//! 스코어링 텔레메트리 싱크.
//!
//! 엔진은 전역 로거에 의존하지 않고, 호스트가 넘겨준 싱크로 진행 상황을 알립니다.
//! 기본 구현 [`TracingSink`]는 이벤트를 `tracing`으로 전달합니다.

use rust_decimal::Decimal;

use super::ratio::RatioField;
use super::recommendation::RecommendationTier;

/// 스코어링 중 발생하는 이벤트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringEvent<'a> {
    /// 정규화 단계에서 버려진 체결 기록
    TicksDropped {
        /// 종목 코드
        symbol: &'a str,
        /// 버려진 건수
        count: usize,
    },
    /// 이력 부족으로 계산하지 못한 지표
    IndicatorUnavailable {
        /// 종목 코드
        symbol: &'a str,
        /// 지표 이름
        name: &'a str,
        /// 필요한 데이터 포인트 수
        required: usize,
        /// 제공된 데이터 포인트 수
        provided: usize,
    },
    /// 누락된 재무 비율
    RatioMissing {
        /// 종목 코드
        symbol: &'a str,
        /// 누락 항목
        field: RatioField,
    },
    /// 스코어링 완료
    Scored {
        /// 종목 코드
        symbol: &'a str,
        /// 종합 점수
        overall_score: Decimal,
        /// 투자 의견 등급
        tier: RecommendationTier,
    },
}

/// 스코어링 이벤트 수신자.
pub trait ScoringSink: Send + Sync {
    /// 이벤트를 기록합니다.
    fn record(&self, event: &ScoringEvent<'_>);
}

/// 이벤트를 `tracing`으로 전달하는 싱크.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ScoringSink for TracingSink {
    fn record(&self, event: &ScoringEvent<'_>) {
        match event {
            ScoringEvent::TicksDropped { symbol, count } => {
                tracing::warn!(symbol = %symbol, count, "Dropped invalid trade records");
            }
            ScoringEvent::IndicatorUnavailable {
                symbol,
                name,
                required,
                provided,
            } => {
                tracing::debug!(
                    symbol = %symbol,
                    indicator = %name,
                    required,
                    provided,
                    "Indicator unavailable"
                );
            }
            ScoringEvent::RatioMissing { symbol, field } => {
                tracing::debug!(symbol = %symbol, field = %field, "Ratio missing");
            }
            ScoringEvent::Scored {
                symbol,
                overall_score,
                tier,
            } => {
                tracing::info!(
                    symbol = %symbol,
                    overall_score = %overall_score,
                    tier = %tier,
                    "Scoring completed"
                );
            }
        }
    }
}
