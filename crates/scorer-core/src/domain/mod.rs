//! 스코어링 파이프라인의 도메인 모델.

mod indicator_set;
mod ratio;
mod recommendation;
mod report;
mod risk;
mod score;
mod session;
mod sink;
mod tick;

pub use indicator_set::*;
pub use ratio::*;
pub use recommendation::*;
pub use report::*;
pub use risk::*;
pub use score::*;
pub use session::*;
pub use sink::*;
pub use tick::*;
