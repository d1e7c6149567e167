//! 기술적/펀더멘털 점수 계산.
//!
//! 두 점수 모두 설정의 임계 구간([`ThresholdBand`](scorer_core::ThresholdBand))을
//! 앞에서부터 평가해 처음 일치한 구간의 점수를 더하며, 합계는 100점으로 제한됩니다.

mod fundamental;
mod technical;

pub use fundamental::FundamentalScorer;
pub use technical::{TechnicalInputs, TechnicalScorer};
