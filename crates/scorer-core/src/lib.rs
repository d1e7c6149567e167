//! # Scorer Core
//!
//! 종목 스코어링 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스코어링 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 체결(틱) 기록 및 정렬된 틱 시계열
//! - 재무 비율 스냅샷
//! - 지표 집합, 리스크 프로파일, 점수, 투자 의견
//! - 설정 관리
//! - 로깅 인프라
//! - 텔레메트리 싱크 인터페이스

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
