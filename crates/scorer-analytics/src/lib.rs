//! 장중 체결 데이터 분석 및 스코어링 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 틱 시계열 정규화 및 시간대별 집계
//! - 기술적 지표 (이동평균, RSI, 볼린저 밴드, MACD, 스토캐스틱, Williams %R, VWAP)
//! - 볼륨 프로파일 및 지지/저항 수준
//! - 리스크 지표 (VaR, 변동성, 최대 낙폭, 샤프 비율)
//! - 기술적/펀더멘털 점수와 투자 의견
//!
//! # 사용 예시
//!
//! ```ignore
//! use scorer_analytics::ScoringEngine;
//! use scorer_core::{RatioHistory, ScoringConfig};
//!
//! let engine = ScoringEngine::new(ScoringConfig::default())?;
//! let report = engine.analyze("VCB", ticks, &RatioHistory::default())?;
//! println!("{} ({})", report.recommendation.tier, report.scores.overall_score);
//! ```

pub mod engine;
pub mod indicators;
pub mod levels;
pub mod normalizer;
pub mod recommendation;
pub mod risk;
pub mod scoring;
pub mod volume_profile;

pub use engine::ScoringEngine;
pub use indicators::{IndicatorEngine, IndicatorError, IndicatorResult};
pub use levels::SupportResistanceCalculator;
pub use normalizer::{NormalizedSession, TickNormalizer};
pub use recommendation::{RecommendationEngine, RiskFactor, Strength};
pub use risk::RiskCalculator;
pub use scoring::{FundamentalScorer, TechnicalInputs, TechnicalScorer};
pub use volume_profile::VolumeProfileCalculator;
