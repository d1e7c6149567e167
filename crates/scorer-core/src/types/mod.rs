//! 스코어링 파이프라인 전반에서 사용되는 공통 타입.

mod decimal;

pub use decimal::*;
