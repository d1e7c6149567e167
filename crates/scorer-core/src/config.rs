//! 설정 관리.
//!
//! 스코어링에 쓰이는 모든 기간, 임계값, 가중치를 정의합니다.
//! 기본값은 검증된 기준값이며, TOML 파일과 `SCORER__` 접두사 환경 변수로 조정할 수 있습니다.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{RecommendationTier, TimeHorizon};
use crate::error::{ScorerError, ScorerResult};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "SCORER";

/// 스코어링 설정.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 지표 설정
    pub indicators: IndicatorConfig,
    /// 리스크 설정
    pub risk: RiskConfig,
    /// 기술적 점수 설정
    pub technical: TechnicalConfig,
    /// 펀더멘털 점수 설정
    pub fundamental: FundamentalConfig,
    /// 투자 의견 설정
    pub recommendation: RecommendationConfig,
}

impl ScoringConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ScorerResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::env_source());

        Self::from_builder(builder)
    }

    /// 환경 변수만으로 설정을 로드합니다 (나머지는 기본값).
    pub fn load_default() -> ScorerResult<Self> {
        Self::from_builder(config::Config::builder().add_source(Self::env_source()))
    }

    /// TOML 문자열에서 설정을 로드합니다.
    pub fn from_toml_str(content: &str) -> ScorerResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ScorerResult<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 일관성을 검증합니다.
    pub fn validate(&self) -> ScorerResult<()> {
        self.indicators.validate()?;
        self.risk.validate()?;
        self.technical.validate()?;
        self.fundamental.validate()?;
        self.recommendation.validate()?;
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ScorerError {
    ScorerError::Config(message.into())
}

// ==================== 임계 구간 ====================

/// 점수 구간.
///
/// 지정된 경계 조건을 모두 만족하면 `points`를 부여합니다.
/// 구간 목록은 앞에서부터 평가하며 처음 일치한 구간만 적용됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdBand {
    /// 값 > above
    pub above: Option<Decimal>,
    /// 값 >= at_least
    pub at_least: Option<Decimal>,
    /// 값 < below
    pub below: Option<Decimal>,
    /// 값 <= at_most
    pub at_most: Option<Decimal>,
    /// 부여 점수
    pub points: Decimal,
}

impl ThresholdBand {
    /// `value > threshold` 구간.
    pub fn above(threshold: Decimal, points: Decimal) -> Self {
        Self {
            above: Some(threshold),
            points,
            ..Default::default()
        }
    }

    /// `value < threshold` 구간.
    pub fn below(threshold: Decimal, points: Decimal) -> Self {
        Self {
            below: Some(threshold),
            points,
            ..Default::default()
        }
    }

    /// `min <= value <= max` 구간.
    pub fn between_inclusive(min: Decimal, max: Decimal, points: Decimal) -> Self {
        Self {
            at_least: Some(min),
            at_most: Some(max),
            points,
            ..Default::default()
        }
    }

    /// `min <= value < max` 구간.
    pub fn half_open(min: Decimal, max: Decimal, points: Decimal) -> Self {
        Self {
            at_least: Some(min),
            below: Some(max),
            points,
            ..Default::default()
        }
    }

    /// 값이 구간에 속하는지 확인합니다.
    pub fn matches(&self, value: Decimal) -> bool {
        self.above.map_or(true, |t| value > t)
            && self.at_least.map_or(true, |t| value >= t)
            && self.below.map_or(true, |t| value < t)
            && self.at_most.map_or(true, |t| value <= t)
    }
}

/// 처음 일치한 구간의 점수 (일치하는 구간이 없으면 0).
pub fn band_points(bands: &[ThresholdBand], value: Decimal) -> Decimal {
    bands
        .iter()
        .find(|band| band.matches(value))
        .map(|band| band.points)
        .unwrap_or(Decimal::ZERO)
}

/// 구간 목록의 최고 점수.
pub fn max_band_points(bands: &[ThresholdBand]) -> Decimal {
    bands
        .iter()
        .map(|band| band.points)
        .max()
        .unwrap_or(Decimal::ZERO)
}

fn validate_bands(name: &str, bands: &[ThresholdBand], cap: Decimal) -> ScorerResult<()> {
    for band in bands {
        if band.points < Decimal::ZERO || band.points > cap {
            return Err(invalid(format!(
                "{} 구간 점수는 0~{} 사이여야 합니다: {}",
                name, cap, band.points
            )));
        }
    }
    Ok(())
}

// ==================== 지표 ====================

/// 지표 기간 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// 이동평균 기간들
    pub ma_periods: Vec<usize>,
    /// RSI 기간
    pub rsi_period: usize,
    /// 볼린저 밴드 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 배수
    pub bollinger_std_dev: Decimal,
    /// MACD 단기 EMA 기간
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간
    pub macd_slow: usize,
    /// MACD 시그널 기간
    pub macd_signal: usize,
    /// 스토캐스틱 %K 기간
    pub stochastic_k: usize,
    /// 스토캐스틱 %D 기간
    pub stochastic_d: usize,
    /// Williams %R 기간
    pub williams_period: usize,
    /// VWAP 밴드 표준편차 배수들
    pub vwap_band_multipliers: Vec<Decimal>,
    /// 볼륨 프로파일 가격대 수
    pub volume_profile_levels: usize,
    /// Value Area 거래량 비율
    pub value_area_ratio: Decimal,
    /// 지지/저항 수준 비율 (세션 범위 대비)
    pub level_fractions: Vec<Decimal>,
    /// 매수/매도 심리 비율 롤링 윈도우 (틱 수)
    pub sentiment_window: usize,
    /// 가격 모멘텀 (수익률 이동평균) 기간
    pub momentum_period: usize,
    /// 거래량 이동평균 기간들
    pub volume_ma_periods: Vec<usize>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20],
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: dec!(2),
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stochastic_k: 14,
            stochastic_d: 3,
            williams_period: 14,
            vwap_band_multipliers: vec![dec!(1), dec!(2)],
            volume_profile_levels: 20,
            value_area_ratio: dec!(0.70),
            level_fractions: vec![dec!(0.2), dec!(0.4)],
            sentiment_window: 50,
            momentum_period: 20,
            volume_ma_periods: vec![20, 50],
        }
    }
}

impl IndicatorConfig {
    fn validate(&self) -> ScorerResult<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("bollinger_period", self.bollinger_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("stochastic_k", self.stochastic_k),
            ("stochastic_d", self.stochastic_d),
            ("williams_period", self.williams_period),
            ("volume_profile_levels", self.volume_profile_levels),
            ("sentiment_window", self.sentiment_window),
            ("momentum_period", self.momentum_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(invalid(format!("{}는 0보다 커야 합니다", name)));
        }
        if self.ma_periods.iter().any(|p| *p == 0) {
            return Err(invalid("ma_periods는 0보다 커야 합니다"));
        }
        if self.volume_ma_periods.iter().any(|p| *p == 0) {
            return Err(invalid("volume_ma_periods는 0보다 커야 합니다"));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(invalid("macd_fast는 macd_slow보다 작아야 합니다"));
        }
        if self.value_area_ratio <= Decimal::ZERO || self.value_area_ratio > Decimal::ONE {
            return Err(invalid("value_area_ratio는 (0, 1] 범위여야 합니다"));
        }
        if self.bollinger_std_dev <= Decimal::ZERO
            || self.vwap_band_multipliers.iter().any(|m| *m <= Decimal::ZERO)
        {
            return Err(invalid("밴드 배수는 양수여야 합니다"));
        }
        if self
            .level_fractions
            .iter()
            .any(|f| *f <= Decimal::ZERO || *f >= Decimal::ONE)
        {
            return Err(invalid("level_fractions는 (0, 1) 범위여야 합니다"));
        }
        Ok(())
    }
}

// ==================== 리스크 ====================

/// 리스크 지표 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// 연율화에 쓰이는 연간 기간 수
    pub periods_per_year: u32,
    /// 수익률 계산 전 리샘플링 간격 (분). 없으면 틱 단위 수익률
    pub resample_minutes: Option<u32>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            resample_minutes: None,
        }
    }
}

impl RiskConfig {
    fn validate(&self) -> ScorerResult<()> {
        if self.periods_per_year == 0 {
            return Err(invalid("periods_per_year는 0보다 커야 합니다"));
        }
        if self.resample_minutes == Some(0) {
            return Err(invalid("resample_minutes는 0보다 커야 합니다"));
        }
        Ok(())
    }
}

// ==================== 기술적 점수 ====================

/// 기술적 점수 구간 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConfig {
    /// 가격 변동률(%) 구간 (최대 30점)
    pub momentum: Vec<ThresholdBand>,
    /// 총 거래량 구간 (최대 25점)
    pub volume: Vec<ThresholdBand>,
    /// 매수/매도 비율 구간 (최대 25점)
    pub buy_sell_ratio: Vec<ThresholdBand>,
    /// 가격 변동성 구간, 낮을수록 높은 점수 (최대 20점)
    pub volatility: Vec<ThresholdBand>,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            momentum: vec![
                ThresholdBand::above(dec!(5), dec!(30)),
                ThresholdBand::above(dec!(2), dec!(20)),
                ThresholdBand::above(dec!(0), dec!(10)),
            ],
            volume: vec![
                ThresholdBand::above(dec!(1000000), dec!(25)),
                ThresholdBand::above(dec!(500000), dec!(15)),
                ThresholdBand::above(dec!(100000), dec!(10)),
            ],
            buy_sell_ratio: vec![
                ThresholdBand::above(dec!(1.5), dec!(25)),
                ThresholdBand::above(dec!(1.2), dec!(20)),
                ThresholdBand::above(dec!(1.0), dec!(15)),
            ],
            volatility: vec![
                ThresholdBand::below(dec!(0.5), dec!(20)),
                ThresholdBand::below(dec!(1.0), dec!(15)),
                ThresholdBand::below(dec!(2.0), dec!(10)),
            ],
        }
    }
}

impl TechnicalConfig {
    fn validate(&self) -> ScorerResult<()> {
        validate_bands("momentum", &self.momentum, dec!(30))?;
        validate_bands("volume", &self.volume, dec!(25))?;
        validate_bands("buy_sell_ratio", &self.buy_sell_ratio, dec!(25))?;
        validate_bands("volatility", &self.volatility, dec!(20))
    }
}

// ==================== 펀더멘털 점수 ====================

/// 펀더멘털 점수 구간 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalConfig {
    /// ROE(%) 구간 (최대 30점)
    pub roe: Vec<ThresholdBand>,
    /// P/E 구간 (최대 25점)
    pub pe: Vec<ThresholdBand>,
    /// P/B 구간 (최대 25점)
    pub pb: Vec<ThresholdBand>,
    /// ROA(%) 구간 (최대 20점)
    pub roa: Vec<ThresholdBand>,
    /// 부채비율(%) 이 값 초과 시 레버리지 높음
    pub leverage_high_above: Decimal,
    /// 부채비율(%) 이 값 초과 시 레버리지 중간
    pub leverage_medium_above: Decimal,
}

impl Default for FundamentalConfig {
    fn default() -> Self {
        Self {
            roe: vec![
                ThresholdBand::above(dec!(15), dec!(30)),
                ThresholdBand::above(dec!(10), dec!(20)),
                ThresholdBand::above(dec!(5), dec!(10)),
            ],
            pe: vec![
                ThresholdBand::between_inclusive(dec!(10), dec!(20), dec!(25)),
                ThresholdBand::half_open(dec!(5), dec!(10), dec!(20)),
                ThresholdBand::below(dec!(30), dec!(15)),
            ],
            pb: vec![
                ThresholdBand::below(dec!(1.5), dec!(25)),
                ThresholdBand::below(dec!(2.0), dec!(20)),
                ThresholdBand::below(dec!(3.0), dec!(15)),
            ],
            roa: vec![
                ThresholdBand::above(dec!(10), dec!(20)),
                ThresholdBand::above(dec!(5), dec!(15)),
                ThresholdBand::above(dec!(2), dec!(10)),
            ],
            leverage_high_above: dec!(60),
            leverage_medium_above: dec!(40),
        }
    }
}

impl FundamentalConfig {
    fn validate(&self) -> ScorerResult<()> {
        validate_bands("roe", &self.roe, dec!(30))?;
        validate_bands("pe", &self.pe, dec!(25))?;
        validate_bands("pb", &self.pb, dec!(25))?;
        validate_bands("roa", &self.roa, dec!(20))?;
        if self.leverage_medium_above > self.leverage_high_above {
            return Err(invalid(
                "leverage_medium_above는 leverage_high_above 이하여야 합니다",
            ));
        }
        Ok(())
    }
}

// ==================== 투자 의견 ====================

/// 투자 의견 등급 규칙.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    /// 등급
    pub tier: RecommendationTier,
    /// 종합 점수 하한 (이상)
    pub min_score: Decimal,
    /// 신뢰도 (0-100)
    pub confidence: Decimal,
    /// 목표가 배수
    pub target_multiplier: Decimal,
    /// 투자 기간
    pub horizon: TimeHorizon,
}

impl TierRule {
    fn new(
        tier: RecommendationTier,
        min_score: Decimal,
        confidence: Decimal,
        target_multiplier: Decimal,
        horizon: TimeHorizon,
    ) -> Self {
        Self {
            tier,
            min_score,
            confidence,
            target_multiplier,
            horizon,
        }
    }
}

/// 강점/리스크 요인 판정 임계값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// 기술적/펀더멘털 점수 강점 기준 (초과)
    pub strong_score: Decimal,
    /// 매수 우위 비율 (초과)
    pub dominant_buy_ratio: Decimal,
    /// 풍부한 유동성 거래량 (초과)
    pub high_liquidity_volume: u64,
    /// 강한 상승 모멘텀 가격 변동률 % (초과)
    pub strong_momentum_pct: Decimal,
    /// 높은 ROE % (초과)
    pub high_roe: Decimal,
    /// 적정 P/E 하한 (이상)
    pub fair_pe_low: Decimal,
    /// 적정 P/E 상한 (이하)
    pub fair_pe_high: Decimal,
    /// 저평가 P/B (미만)
    pub cheap_pb: Decimal,
    /// 높은 변동성 (초과)
    pub high_volatility: Decimal,
    /// 낮은 유동성 거래량 (미만)
    pub low_liquidity_volume: u64,
    /// 매도 압력 비율 (미만)
    pub selling_pressure_ratio: Decimal,
    /// 고평가 P/E (초과)
    pub expensive_pe: Decimal,
    /// 고평가 P/B (이상)
    pub expensive_pb: Decimal,
    /// 낮은 ROE % (이하)
    pub weak_roe: Decimal,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_score: dec!(70),
            dominant_buy_ratio: dec!(1.3),
            high_liquidity_volume: 1_000_000,
            strong_momentum_pct: dec!(5),
            high_roe: dec!(15),
            fair_pe_low: dec!(10),
            fair_pe_high: dec!(20),
            cheap_pb: dec!(1.5),
            high_volatility: dec!(2),
            low_liquidity_volume: 100_000,
            selling_pressure_ratio: dec!(0.8),
            expensive_pe: dec!(25),
            expensive_pb: dec!(3),
            weak_roe: dec!(5),
        }
    }
}

/// 투자 의견 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// 등급 규칙 (종합 점수 하한 내림차순)
    pub tiers: Vec<TierRule>,
    /// 리스크 점수의 기술적 가중치
    pub risk_technical_weight: Decimal,
    /// 리스크 점수의 펀더멘털 가중치
    pub risk_fundamental_weight: Decimal,
    /// 리스크 점수 이 값 초과 시 높음
    pub risk_high_above: Decimal,
    /// 리스크 점수 이 값 초과 시 중간
    pub risk_medium_above: Decimal,
    /// 강점/리스크 요인 임계값
    pub insights: InsightThresholds,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        use RecommendationTier::*;

        Self {
            tiers: vec![
                TierRule::new(StrongBuy, dec!(80), dec!(90), dec!(1.25), TimeHorizon::months(6, 12)),
                TierRule::new(Buy, dec!(65), dec!(75), dec!(1.15), TimeHorizon::months(12, 18)),
                TierRule::new(Hold, dec!(50), dec!(60), dec!(1.05), TimeHorizon::months(18, 24)),
                TierRule::new(WeakSell, dec!(35), dec!(70), dec!(0.95), TimeHorizon::months(6, 12)),
                TierRule::new(Sell, dec!(0), dec!(85), dec!(0.85), TimeHorizon::months(3, 6)),
            ],
            risk_technical_weight: dec!(0.4),
            risk_fundamental_weight: dec!(0.6),
            risk_high_above: dec!(60),
            risk_medium_above: dec!(40),
            insights: InsightThresholds::default(),
        }
    }
}

impl RecommendationConfig {
    fn validate(&self) -> ScorerResult<()> {
        if self.tiers.is_empty() {
            return Err(invalid("tiers가 비어 있습니다"));
        }
        for pair in self.tiers.windows(2) {
            if pair[1].min_score >= pair[0].min_score {
                return Err(invalid("tiers는 min_score 내림차순이어야 합니다"));
            }
            if pair[1].tier >= pair[0].tier {
                return Err(invalid("tiers는 등급 내림차순이어야 합니다"));
            }
        }
        for rule in &self.tiers {
            if rule.target_multiplier <= Decimal::ZERO {
                return Err(invalid("target_multiplier는 양수여야 합니다"));
            }
            if rule.confidence < Decimal::ZERO || rule.confidence > Decimal::ONE_HUNDRED {
                return Err(invalid("confidence는 0~100 사이여야 합니다"));
            }
            if rule.horizon.min_months > rule.horizon.max_months {
                return Err(invalid("horizon.min_months는 max_months 이하여야 합니다"));
            }
        }
        if self.risk_technical_weight < Decimal::ZERO || self.risk_fundamental_weight < Decimal::ZERO {
            return Err(invalid("리스크 가중치는 음수일 수 없습니다"));
        }
        if self.risk_medium_above > self.risk_high_above {
            return Err(invalid("risk_medium_above는 risk_high_above 이하여야 합니다"));
        }
        Ok(())
    }

    /// 종합 점수에 해당하는 등급 규칙.
    ///
    /// 하한을 만족하는 첫 규칙을, 없으면 마지막 규칙을 반환합니다.
    pub fn tier_for(&self, overall_score: Decimal) -> Option<&TierRule> {
        self.tiers
            .iter()
            .find(|rule| overall_score >= rule.min_score)
            .or_else(|| self.tiers.last())
    }
}
