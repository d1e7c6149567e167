//! 스코어링 파이프라인.
//!
//! 정규화 → 지표/리스크 → 기술적·펀더멘털 점수 → 투자 의견 순으로 실행하며,
//! 실행 간 상태를 공유하지 않습니다.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use scorer_core::{
    AnalysisReport, RatioField, RatioHistory, ScoreResult, ScorerResult, ScoringConfig,
    ScoringEvent, ScoringSink, TickRecord,
};

use crate::indicators::IndicatorEngine;
use crate::normalizer::TickNormalizer;
use crate::recommendation::RecommendationEngine;
use crate::risk::RiskCalculator;
use crate::scoring::{FundamentalScorer, TechnicalInputs, TechnicalScorer};

/// 종목 스코어링 엔진.
///
/// `Send + Sync`이므로 여러 종목을 호스트 스레드에서 병렬로 처리할 수 있습니다.
pub struct ScoringEngine {
    config: ScoringConfig,
    normalizer: TickNormalizer,
    indicators: IndicatorEngine,
    risk: RiskCalculator,
    technical: TechnicalScorer,
    fundamental: FundamentalScorer,
    recommendation: RecommendationEngine,
    sink: Option<Arc<dyn ScoringSink>>,
}

impl fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl ScoringEngine {
    /// 설정을 검증하고 엔진을 생성합니다.
    pub fn new(config: ScoringConfig) -> ScorerResult<Self> {
        config.validate()?;

        Ok(Self {
            normalizer: TickNormalizer::new(),
            indicators: IndicatorEngine::new(),
            risk: RiskCalculator::new(config.risk.periods_per_year),
            technical: TechnicalScorer::new(config.technical.clone()),
            fundamental: FundamentalScorer::new(config.fundamental.clone()),
            recommendation: RecommendationEngine::new(config.recommendation.clone()),
            sink: None,
            config,
        })
    }

    /// 이벤트 싱크를 설정합니다.
    pub fn with_sink(mut self, sink: Arc<dyn ScoringSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// 엔진 설정.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// 한 종목의 장중 체결과 재무 비율로 분석 보고서를 만듭니다.
    ///
    /// # 인자
    ///
    /// * `symbol` - 종목 코드
    /// * `ticks` - 원시 체결 기록 (정렬되지 않아도 됨)
    /// * `ratios` - 재무 비율 이력 (최신 순)
    ///
    /// # 에러
    ///
    /// 유효한 체결이 하나도 없으면 `InsufficientData`.
    pub fn analyze(
        &self,
        symbol: &str,
        ticks: Vec<TickRecord>,
        ratios: &RatioHistory,
    ) -> ScorerResult<AnalysisReport> {
        let received = ticks.len();
        let session = match self.normalizer.normalize(symbol, ticks) {
            Ok(session) => session,
            Err(err) => {
                if received > 0 {
                    self.emit(&ScoringEvent::TicksDropped {
                        symbol,
                        count: received,
                    });
                }
                return Err(err);
            }
        };

        if session.dropped > 0 {
            self.emit(&ScoringEvent::TicksDropped {
                symbol,
                count: session.dropped,
            });
        }

        let indicators = self
            .indicators
            .compute_all(&session.series, &self.config.indicators);
        for (name, marker) in &indicators.unavailable {
            self.emit(&ScoringEvent::IndicatorUnavailable {
                symbol,
                name,
                required: marker.required,
                provided: marker.provided,
            });
        }
        debug!(
            symbol,
            computed = indicators.series.len(),
            unavailable = indicators.unavailable.len(),
            "Indicators computed"
        );

        let risk_prices = match self.config.risk.resample_minutes {
            Some(minutes) => self.normalizer.resample_closes(&session.series, minutes),
            None => session.series.prices(),
        };
        let risk = self.risk.calculate(&risk_prices);
        debug!(
            symbol,
            samples = risk.sample_size,
            overall_risk_score = %risk.overall_risk_score,
            "Risk profile computed"
        );

        let technical = self
            .technical
            .score(&TechnicalInputs::from(&session.summary));
        let fundamental = self.fundamental.score(ratios);
        for field in &fundamental.missing {
            self.emit(&ScoringEvent::RatioMissing {
                symbol,
                field: *field,
            });
        }
        let scores = ScoreResult::from_breakdowns(technical, fundamental);

        let financial_leverage = self.fundamental.leverage(ratios);
        let recommendation = self.recommendation.recommend(
            &scores,
            &session.summary,
            ratios.latest(),
            financial_leverage.as_ref(),
        );

        self.emit(&ScoringEvent::Scored {
            symbol,
            overall_score: scores.overall_score,
            tier: recommendation.tier,
        });

        Ok(AnalysisReport {
            symbol: symbol.to_string(),
            session: session.summary,
            hourly: session.hourly,
            indicators,
            risk,
            scores,
            recommendation,
            financial_leverage,
        })
    }

    fn emit(&self, event: &ScoringEvent<'_>) {
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }
}
