//! 종목 평가 명령어.
//!
//! 장중 체결 파일과 재무 비율 파일을 읽어 분석 보고서를 생성합니다.
//!
//! # 입력 파일 형식
//!
//! 두 파일 모두 JSON 배열이거나 `data` 배열을 가진 객체입니다.
//!
//! ```json
//! {"data": [{"time": "2024-10-01 09:15:03", "price": 92.5, "volume": 300, "match_type": "Buy"}]}
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use scorer_analytics::ScoringEngine;
use scorer_core::{AnalysisReport, RatioHistory, RatioSnapshot, TickRecord, TracingSink};

use super::config::load_scoring_config;

/// 보고서 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 전체 보고서 (JSON)
    #[default]
    Json,
    /// 사람이 읽는 요약
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "summary" | "text" => Ok(Self::Summary),
            _ => Err(format!("Invalid format: {}. Supported: json, summary", s)),
        }
    }
}

/// 평가 명령 설정.
#[derive(Debug, Clone)]
pub struct ScoreCliConfig {
    /// 종목 코드
    pub symbol: String,
    /// 체결 데이터 파일 경로
    pub ticks_path: String,
    /// 재무 비율 파일 경로
    pub ratios_path: Option<String>,
    /// 스코어링 설정 파일 경로
    pub config_path: Option<String>,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 배열 그대로이거나 `data` 필드로 감싼 파일 내용.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataFile<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> DataFile<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            DataFile::Bare(records) | DataFile::Wrapped { data: records } => records,
        }
    }
}

/// 평가를 실행하고 보고서를 표준 출력으로 내보냅니다.
pub fn run_score(config: &ScoreCliConfig) -> Result<AnalysisReport> {
    let _span = scorer_core::scoring_span!("score", config.symbol).entered();

    let scoring_config = load_scoring_config(config.config_path.as_deref())?;
    let engine = ScoringEngine::new(scoring_config)
        .context("스코어링 엔진을 생성하지 못했습니다")?
        .with_sink(Arc::new(TracingSink));

    let ticks: Vec<TickRecord> = load_records(&config.ticks_path)?;
    let ratios = match &config.ratios_path {
        Some(path) => RatioHistory::new(load_records::<RatioSnapshot>(path)?),
        None => RatioHistory::default(),
    };
    debug!(
        ticks = ticks.len(),
        ratio_snapshots = ratios.len(),
        "Input files loaded"
    );

    let report = engine.analyze(&config.symbol, ticks, &ratios)?;

    match config.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("보고서를 JSON으로 변환하지 못했습니다")?;
            println!("{}", json);
        }
        OutputFormat::Summary => println!("{}", render_summary(&report)),
    }

    Ok(report)
}

/// JSON 파일에서 레코드 목록을 읽습니다.
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("파일을 읽지 못했습니다: {}", path.display()))?;
    parse_records(&content)
        .with_context(|| format!("파일 형식이 올바르지 않습니다: {}", path.display()))
}

/// JSON 문자열에서 레코드 목록을 파싱합니다.
pub fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let file: DataFile<T> = serde_json::from_str(content)?;
    Ok(file.into_records())
}

fn fmt_opt(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// 보고서 요약 문자열.
pub fn render_summary(report: &AnalysisReport) -> String {
    let session = &report.session;
    let scores = &report.scores;
    let rec = &report.recommendation;
    let risk = &report.risk;

    let leverage = report
        .financial_leverage
        .map(|l| format!("{:.2}% ({})", l.debt_ratio, l.level))
        .unwrap_or_else(|| "N/A".to_string());
    let poc = fmt_opt(report.indicators.volume_profile.as_ref().map(|p| p.poc));
    let peak_hour = session
        .peak_hour
        .map(|h| format!("{:02}:00 ({})", h, session.peak_hour_volume))
        .unwrap_or_else(|| "N/A".to_string());

    let mut out = format!(
        "{} 종목 평가 요약\n\
         ═══════════════════════════════════════\n\
         세션: {} → {} ({} 건)\n\
         시가/종가: {:.2} → {:.2} ({:+.2}%)\n\
         고가/저가: {:.2} / {:.2}\n\
         거래량: {} (매수 {} / 매도 {}, 비율 {})\n\
         최대 거래 시간대: {}\n\
         POC: {}\n\
         ───────────────────────────────────────\n\
         기술적 점수: {:.1}\n\
         펀더멘털 점수: {:.1}\n\
         종합 점수: {:.1}\n\
         ───────────────────────────────────────\n\
         VaR 95%: {:.2}%\n\
         최대 낙폭: {:.2}%\n\
         샤프 비율: {:.2}\n\
         리스크 점수: {:.1} (변동성 {:.1} / VaR {:.1} / 낙폭 {:.1})\n\
         부채비율: {}\n\
         ───────────────────────────────────────\n\
         투자 의견: {} (신뢰도 {:.0}%)\n\
         목표가: {:.2} ({:+.2}%)\n\
         투자 기간: {}\n\
         리스크: {} ({:.1})\n",
        report.symbol,
        session.session_start.format("%Y-%m-%d %H:%M:%S"),
        session.session_end.format("%H:%M:%S"),
        session.data_points,
        session.open,
        session.close,
        session.price_change_pct,
        session.high,
        session.low,
        session.total_volume,
        session.buy_volume,
        session.sell_volume,
        session.buy_sell_ratio,
        peak_hour,
        poc,
        scores.technical_score,
        scores.fundamental_score,
        scores.overall_score,
        risk.var_95 * Decimal::ONE_HUNDRED,
        risk.max_drawdown * Decimal::ONE_HUNDRED,
        risk.sharpe_ratio,
        risk.overall_risk_score,
        risk.volatility_score,
        risk.var_score,
        risk.drawdown_score,
        leverage,
        rec.tier,
        rec.confidence,
        rec.target_price,
        rec.upside_pct(),
        rec.time_horizon,
        rec.risk_level,
        rec.risk_score,
    );

    out.push_str("강점:\n");
    for strength in &rec.strengths {
        out.push_str(&format!("  + {}\n", strength));
    }
    out.push_str("리스크 요인:\n");
    for factor in &rec.risk_factors {
        out.push_str(&format!("  - {}\n", factor));
    }
    out.push_str("═══════════════════════════════════════");

    out
}
