//! Market-data collaborator: candle history and live last-trade price.
//!
//! Candles are fetched once per chart load from the configured REST endpoint;
//! the live price is polled on a timer. Both requests run on the
//! [`AsyncComputeTaskPool`] and are polled back into resources on the main
//! schedule. Failures are logged and degrade to an empty series / missing
//! price; nothing here is fatal to the session.

mod candle;

pub use candle::{parse_klines, Candle};

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::config::{AppConfig, ConfigLoaded};
use crate::constants::LIVE_PRICE_POLL_SECS;

/// The loaded candle series, in time order. Empty until the fetch completes
/// (or permanently empty when the fetch fails).
#[derive(Resource, Default)]
pub struct CandleSeries {
    pub candles: Vec<Candle>,
}

/// Visible price range of the chart, derived from the series' closing prices.
///
/// Captured once per chart load; price labels placed against one range keep
/// their price when a later load changes it.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn from_closes(candles: &[Candle]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for candle in candles {
            min = min.min(candle.close);
            max = max.max(candle.close);
        }
        if min.is_finite() && max.is_finite() {
            Self { min, max }
        } else {
            Self::default()
        }
    }

    /// A range is usable only when it spans a positive price interval.
    /// Tools that map y to price must refuse to compute otherwise.
    pub fn is_valid(&self) -> bool {
        self.max > self.min
    }
}

/// Last trade price from the ticker poll, if one has arrived yet.
#[derive(Resource, Default)]
pub struct LivePrice {
    pub price: Option<f64>,
}

/// Result of the one-shot candle history fetch
struct CandleFetchResult {
    candles: Vec<Candle>,
    error: Option<String>,
}

/// Result of one ticker poll
struct TickerResult {
    price: Option<f64>,
    error: Option<String>,
}

/// Background task for the candle history fetch
#[derive(Component)]
struct CandleFetchTask(Task<CandleFetchResult>);

/// Background task for the ticker poll
#[derive(Component)]
struct TickerTask(Task<TickerResult>);

/// Repeating timer driving ticker polls
#[derive(Resource)]
struct TickerPollTimer(Timer);

impl Default for TickerPollTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(LIVE_PRICE_POLL_SECS, TimerMode::Repeating))
    }
}

/// Fetch the candle history (blocking; runs on the task pool)
fn fetch_candles(base_url: String, symbol: String, interval: String, limit: usize) -> CandleFetchResult {
    let url = format!(
        "{}/api/v3/klines?symbol={}&interval={}&limit={}",
        base_url, symbol, interval, limit
    );

    let response = ureq::get(&url).set("User-Agent", "chartmark").call();

    match response {
        Ok(resp) => match resp.into_json::<serde_json::Value>() {
            Ok(raw) => match parse_klines(&raw) {
                Ok(candles) => CandleFetchResult { candles, error: None },
                Err(e) => CandleFetchResult {
                    candles: Vec::new(),
                    error: Some(format!("Failed to parse klines: {}", e)),
                },
            },
            Err(e) => CandleFetchResult {
                candles: Vec::new(),
                error: Some(format!("Failed to read kline response: {}", e)),
            },
        },
        Err(e) => CandleFetchResult {
            candles: Vec::new(),
            error: Some(format!("Failed to fetch candles: {}", e)),
        },
    }
}

/// Fetch the last trade price (blocking; runs on the task pool)
fn fetch_ticker(base_url: String, symbol: String) -> TickerResult {
    let url = format!("{}/api/v3/ticker/price?symbol={}", base_url, symbol);

    match ureq::get(&url).set("User-Agent", "chartmark").call() {
        Ok(resp) => match resp.into_json::<serde_json::Value>() {
            Ok(raw) => {
                let price = raw
                    .get("price")
                    .and_then(|p| p.as_str())
                    .and_then(|s| s.parse::<f64>().ok());
                match price {
                    Some(p) => TickerResult { price: Some(p), error: None },
                    None => TickerResult {
                        price: None,
                        error: Some("ticker response missing price".to_string()),
                    },
                }
            }
            Err(e) => TickerResult {
                price: None,
                error: Some(format!("Failed to read ticker response: {}", e)),
            },
        },
        Err(e) => TickerResult {
            price: None,
            error: Some(format!("Failed to fetch ticker: {}", e)),
        },
    }
}

/// Startup system: kick off the candle history fetch
fn start_candle_fetch(mut commands: Commands, config: Res<AppConfig>) {
    let base_url = config.data.rest_base_url.clone();
    let symbol = config.data.symbol.clone();
    let interval = config.data.interval.clone();
    let limit = config.data.candle_limit;

    info!("Fetching {} candles for {} ({})", limit, symbol, interval);

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { fetch_candles(base_url, symbol, interval, limit) });
    commands.spawn(CandleFetchTask(task));
}

/// Poll the candle fetch task and publish the series + price range
fn poll_candle_fetch(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut CandleFetchTask)>,
    mut series: ResMut<CandleSeries>,
    mut range: ResMut<PriceRange>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if let Some(error) = result.error {
                warn!("Candle fetch failed: {}", error);
            } else {
                info!("Loaded {} candles", result.candles.len());
            }

            *range = PriceRange::from_closes(&result.candles);
            if !range.is_valid() {
                warn!("No usable price range; price-mapped tools disabled");
            }
            series.candles = result.candles;

            commands.entity(entity).despawn();
        }
    }
}

/// Spawn a ticker poll when the timer fires and none is in flight
fn start_ticker_poll(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<TickerPollTimer>,
    config: Res<AppConfig>,
    in_flight: Query<(), With<TickerTask>>,
) {
    if !timer.0.tick(time.delta()).just_finished() || !in_flight.is_empty() {
        return;
    }

    let base_url = config.data.rest_base_url.clone();
    let symbol = config.data.symbol.clone();

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { fetch_ticker(base_url, symbol) });
    commands.spawn(TickerTask(task));
}

/// Poll ticker tasks and publish the live price
fn poll_ticker_task(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut TickerTask)>,
    mut live_price: ResMut<LivePrice>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if let Some(error) = result.error {
                warn!("Ticker poll failed: {}", error);
            } else {
                live_price.price = result.price;
            }
            commands.entity(entity).despawn();
        }
    }
}

pub struct MarketDataPlugin;

impl Plugin for MarketDataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CandleSeries>()
            .init_resource::<PriceRange>()
            .init_resource::<LivePrice>()
            .init_resource::<TickerPollTimer>()
            .add_systems(Startup, start_candle_fetch.after(ConfigLoaded))
            .add_systems(
                Update,
                (poll_candle_fetch, start_ticker_poll, poll_ticker_task),
            );
    }
}
