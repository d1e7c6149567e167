//! 틱 시계열 정규화.
//!
//! 정렬되지 않았거나 타임스탬프가 중복된 원시 체결 기록을 검증된 [`TickSeries`]로
//! 만들고, 시간대별 거래량 집계와 세션 요약을 계산합니다.

use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;
use tracing::debug;

use scorer_core::{
    mean, sample_std_dev, BuySellRatio, HourlyAggregates, MarketSentiment, Quantity,
    ScorerError, ScorerResult, SessionSummary, TickRecord, TickSeries, TradeSide, Trend,
};

/// 정규화 결과.
#[derive(Debug, Clone)]
pub struct NormalizedSession {
    /// 정렬·검증된 틱 시계열
    pub series: TickSeries,
    /// 시간대별 거래량 집계
    pub hourly: HourlyAggregates,
    /// 세션 요약
    pub summary: SessionSummary,
    /// 가격이 양수가 아니어서 버려진 기록 수
    pub dropped: usize,
}

/// 틱 정규화기.
#[derive(Debug, Default)]
pub struct TickNormalizer;

impl TickNormalizer {
    /// 새로운 정규화기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 원시 체결 기록을 정규화합니다.
    ///
    /// 가격이 양수가 아닌 기록은 버리고, 나머지를 타임스탬프 기준으로 안정 정렬합니다
    /// (같은 시각의 기록은 입력 순서를 유지).
    ///
    /// # 에러
    /// 유효한 기록이 하나도 없으면 `InsufficientData`.
    pub fn normalize(
        &self,
        symbol: &str,
        records: Vec<TickRecord>,
    ) -> ScorerResult<NormalizedSession> {
        let received = records.len();
        let mut ticks: Vec<TickRecord> = records
            .into_iter()
            .filter(|t| t.price > Decimal::ZERO)
            .collect();
        let dropped = received - ticks.len();

        if ticks.is_empty() {
            return Err(ScorerError::no_trade_data(0));
        }

        ticks.sort_by_key(|t| t.timestamp);

        let series = TickSeries::try_new(symbol, ticks)?;
        let hourly = self.hourly_aggregates(&series);
        let summary = self.summarize(&series, &hourly);

        debug!(
            symbol,
            received,
            dropped,
            ticks = series.len(),
            "Tick series normalized"
        );

        Ok(NormalizedSession {
            series,
            hourly,
            summary,
            dropped,
        })
    }

    /// 시간대(0-23시)별 전체/매수/매도 거래량 집계.
    pub fn hourly_aggregates(&self, series: &TickSeries) -> HourlyAggregates {
        let mut hourly = HourlyAggregates::default();

        for tick in series.ticks() {
            let hour = tick.timestamp.hour();
            add_volume(hourly.volume_by_hour.entry(hour).or_insert(0), tick.volume);

            match tick.side {
                TradeSide::Buy => {
                    add_volume(hourly.buy_volume_by_hour.entry(hour).or_insert(0), tick.volume);
                }
                TradeSide::Sell => {
                    add_volume(hourly.sell_volume_by_hour.entry(hour).or_insert(0), tick.volume);
                }
                TradeSide::Unknown => {}
            }
        }

        hourly
    }

    /// 세션 요약 통계를 계산합니다.
    pub fn summarize(&self, series: &TickSeries, hourly: &HourlyAggregates) -> SessionSummary {
        let prices = series.prices();
        let open = series.open();
        let close = series.close();
        let high = series.high();
        let low = series.low();

        let total_volume = saturating_total(series.ticks().iter().map(|t| t.volume));
        let buy_volume = saturating_total(hourly.buy_volume_by_hour.values().copied());
        let sell_volume = saturating_total(hourly.sell_volume_by_hour.values().copied());
        let buy_sell_ratio = BuySellRatio::from_volumes(buy_volume, sell_volume);

        let price_change = close - open;
        let price_change_pct = price_change / open * Decimal::ONE_HUNDRED;

        let trend = if close > open {
            Trend::Up
        } else if close < open {
            Trend::Down
        } else {
            Trend::Sideways
        };

        let (peak_hour, peak_hour_volume) = match hourly.peak_hour() {
            Some((hour, volume)) => (Some(hour), volume),
            None => (None, 0),
        };

        SessionSummary {
            symbol: series.symbol().to_string(),
            session_start: series.start(),
            session_end: series.end(),
            data_points: series.len(),
            open,
            close,
            high,
            low,
            average_price: mean(&prices).unwrap_or(close),
            price_change,
            price_change_pct,
            price_volatility: sample_std_dev(&prices),
            price_range: high - low,
            total_volume,
            buy_volume,
            sell_volume,
            buy_sell_ratio,
            sentiment: MarketSentiment::from_ratio(buy_sell_ratio),
            trend,
            peak_hour,
            peak_hour_volume,
        }
    }

    /// `minutes` 간격 구간별 마지막 체결 가격.
    ///
    /// 리스크 지표를 틱 대신 분봉 종가로 계산할 때 사용합니다.
    pub fn resample_closes(&self, series: &TickSeries, minutes: u32) -> Vec<Decimal> {
        let minutes = minutes.max(1);
        let mut closes: Vec<Decimal> = Vec::new();
        let mut current_bucket: Option<(NaiveDate, u32)> = None;

        for tick in series.ticks() {
            let minute_of_day = tick.timestamp.hour() * 60 + tick.timestamp.minute();
            let bucket = (tick.timestamp.date(), minute_of_day / minutes);

            match closes.last_mut() {
                Some(last) if current_bucket == Some(bucket) => *last = tick.price,
                _ => {
                    closes.push(tick.price);
                    current_bucket = Some(bucket);
                }
            }
        }

        closes
    }
}

/// 거래량 누적 (상한에서 포화).
fn add_volume(total: &mut Quantity, volume: Quantity) {
    *total = total.saturating_add(volume);
}

fn saturating_total(volumes: impl Iterator<Item = Quantity>) -> Quantity {
    volumes.fold(0, Quantity::saturating_add)
}
