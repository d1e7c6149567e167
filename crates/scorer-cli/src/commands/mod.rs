//! CLI 명령어 구현 모듈.

pub mod config;
pub mod score;
