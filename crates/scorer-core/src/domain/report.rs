//! 종목 분석 보고서.

use serde::{Deserialize, Serialize};

use super::indicator_set::IndicatorSet;
use super::recommendation::{FinancialLeverage, Recommendation};
use super::risk::RiskProfile;
use super::score::ScoreResult;
use super::session::SessionSummary;
use super::tick::HourlyAggregates;

/// 한 번의 스코어링 실행 결과.
///
/// 렌더링/템플릿 처리는 호스트의 몫이며, 이 구조체는 직렬화 가능한 데이터만 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 종목 코드
    pub symbol: String,
    /// 세션 요약
    pub session: SessionSummary,
    /// 시간대별 거래량
    pub hourly: HourlyAggregates,
    /// 기술적 지표
    pub indicators: IndicatorSet,
    /// 리스크 프로파일
    pub risk: RiskProfile,
    /// 점수
    pub scores: ScoreResult,
    /// 투자 의견
    pub recommendation: Recommendation,
    /// 재무 레버리지 (부채/자산 정보가 없으면 `None`)
    pub financial_leverage: Option<FinancialLeverage>,
}
