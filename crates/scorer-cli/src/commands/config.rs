//! 설정 출력 명령어.
//!
//! 기본값, 설정 파일, `SCORER__` 환경 변수를 모두 반영한 최종 설정을 TOML로 출력합니다.

use anyhow::{Context, Result};

use scorer_core::ScoringConfig;

/// 설정 파일(선택)과 환경 변수로 스코어링 설정을 로드합니다.
pub fn load_scoring_config(path: Option<&str>) -> Result<ScoringConfig> {
    let config = match path {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("설정 파일을 불러오지 못했습니다: {}", path))?,
        None => ScoringConfig::load_default().context("기본 설정을 불러오지 못했습니다")?,
    };
    Ok(config)
}

/// 최종 설정을 TOML 문자열로 변환합니다.
pub fn render_config(config: &ScoringConfig) -> Result<String> {
    toml::to_string_pretty(config).context("설정을 TOML로 변환하지 못했습니다")
}

/// 최종 설정을 표준 출력으로 내보냅니다.
pub fn print_effective_config(path: Option<&str>) -> Result<()> {
    let config = load_scoring_config(path)?;
    println!("{}", render_config(&config)?);
    Ok(())
}
