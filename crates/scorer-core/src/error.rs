//! 스코어링 엔진의 에러 타입.
//!
//! 치명적인 에러만 이 타입으로 표현합니다. 지표 계산 불가, 재무 비율 누락,
//! 0으로 나누기 같은 퇴화 구간은 에러가 아니라 결과 안의 표식으로 기록됩니다.

use thiserror::Error;

/// 핵심 스코어링 에러.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// 분석할 체결 데이터가 없음
    #[error("cannot score this symbol: no trade data (필요 {required}개, 제공 {provided}개)")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 스코어링 작업을 위한 Result 타입.
pub type ScorerResult<T> = Result<T, ScorerError>;

impl ScorerError {
    /// 체결 데이터 부족 에러를 생성합니다.
    pub fn no_trade_data(provided: usize) -> Self {
        Self::InsufficientData {
            required: 1,
            provided,
        }
    }

    /// 입력 데이터 문제로 발생한 에러인지 확인합니다.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InsufficientData { .. } | Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for ScorerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ScorerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trade_data_message() {
        let err = ScorerError::no_trade_data(0);
        assert!(err.to_string().starts_with("cannot score this symbol: no trade data"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_config_error_is_not_input_error() {
        let err = ScorerError::Config("rsi period must be positive".to_string());
        assert!(!err.is_input_error());
    }
}
