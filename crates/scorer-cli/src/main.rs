//! 종목 스코어링 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 장중 체결 데이터와 재무 비율로 종목 평가
//! scorer score -s VCB -t data/VCB_intraday.json -r data/VCB_ratios.json
//!
//! # 사용자 설정 파일 + 요약 출력
//! scorer score -s FPT -t data/FPT_intraday.json -c config/scoring.toml --format summary
//!
//! # 현재 적용되는 설정을 TOML로 출력
//! scorer config
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use scorer_core::logging::{init_logging, LogConfig};

mod commands;

use commands::config::print_effective_config;
use commands::score::{run_score, OutputFormat, ScoreCliConfig};

#[derive(Parser)]
#[command(name = "scorer")]
#[command(about = "Equity scorer - 장중 체결과 재무 비율 기반 종목 평가", long_about = None)]
#[command(version)]
struct Cli {
    /// 상세 로그 출력 (debug 레벨)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 평가 보고서 생성
    Score {
        /// 종목 코드 (예: VCB, FPT)
        #[arg(short, long)]
        symbol: String,

        /// 장중 체결 데이터 파일 (JSON 배열 또는 {"data": [...]})
        #[arg(short, long)]
        ticks: String,

        /// 재무 비율 파일 (최신 순, 선택)
        #[arg(short, long)]
        ratios: Option<String>,

        /// 스코어링 설정 파일 (TOML, 선택)
        #[arg(short, long)]
        config: Option<String>,

        /// 출력 형식 (json: 전체 보고서, summary: 요약)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// 적용되는 스코어링 설정을 TOML로 출력
    Config {
        /// 스코어링 설정 파일 (TOML, 선택)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    // .env 파일이 없어도 무시
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::new("debug")
    } else {
        LogConfig::from_env()
    };
    init_logging(log_config).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    match cli.command {
        Commands::Score {
            symbol,
            ticks,
            ratios,
            config,
            format,
        } => {
            let format: OutputFormat = format.parse().map_err(|e: String| anyhow!(e))?;

            let config = ScoreCliConfig {
                symbol,
                ticks_path: ticks,
                ratios_path: ratios,
                config_path: config,
                format,
            };

            let report = run_score(&config)?;
            info!(
                symbol = %report.symbol,
                tier = %report.recommendation.tier,
                "Report generated"
            );
        }

        Commands::Config { config } => {
            print_effective_config(config.as_deref())?;
        }
    }

    Ok(())
}
