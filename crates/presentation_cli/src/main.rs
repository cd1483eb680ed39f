//! Skycast CLI
//!
//! Terminal front end for the weather dashboard.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::ports::{DEFAULT_SEARCH_LIMIT, DeviceLocationPort, GeocodingPort};
use application::services::{
    DashboardController, DashboardState, RecentCitiesService, ThrottleConfig, WeatherQuery,
    WeatherQueryService, aggregate_daily,
};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use domain::{CityName, GeoLocation, TemperatureUnit};
use infrastructure::{
    AppConfig, CachedLocationProvider, JsonFileRecentCitiesStore, OpenWeatherAdapter,
    StaticLocationProvider,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Skycast CLI
#[derive(Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "Weather dashboard for the terminal", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Unit system override (metric or imperial)
    #[arg(short, long)]
    units: Option<TemperatureUnit>,

    /// Path to a configuration file
    #[arg(short, long, env = "SKYCAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current conditions for a city
    Current {
        /// City name, optionally "City,CC" with an ISO country code
        city: CityName,
    },

    /// Show the aggregated daily forecast for a city
    Forecast {
        /// City name, optionally "City,CC" with an ISO country code
        city: CityName,
    },

    /// Render the full dashboard once, or keep it refreshing
    ///
    /// Without a city or coordinates the dashboard follows the device
    /// position from the configuration.
    Dashboard {
        /// City name; defaults to the device position when omitted
        city: Option<CityName>,

        /// Latitude of the spot to watch
        #[arg(long, requires = "lon", conflicts_with = "city", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the spot to watch
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,

        /// Seconds between refreshes in watch mode
        #[arg(long, default_value_t = 30, requires = "watch",
              value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,
    },

    /// Search for places matching a name
    Search {
        /// Name to look up
        query: CityName,

        /// Maximum number of candidates
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u8,
    },

    /// List or prune recently viewed cities
    Recent {
        /// Remove every stored entry
        #[arg(long, conflicts_with = "forget")]
        clear: bool,

        /// Remove a single city by name
        #[arg(long, value_name = "NAME")]
        forget: Option<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Wired application services shared by all commands
struct App {
    adapter: Arc<OpenWeatherAdapter>,
    location: Arc<dyn DeviceLocationPort>,
    store: Arc<JsonFileRecentCitiesStore>,
    zone: Tz,
    throttle: ThrottleConfig,
}

impl App {
    fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let adapter = Arc::new(
            OpenWeatherAdapter::new(config.weather.clone())
                .context("failed to build the OpenWeather client")?,
        );

        let source: Arc<dyn DeviceLocationPort> = match &config.geolocation.default_position {
            Some(position) => {
                let location = position
                    .to_location()
                    .context("invalid default position in configuration")?;
                Arc::new(StaticLocationProvider::new(location))
            }
            None => Arc::new(StaticLocationProvider::unavailable()),
        };
        let location: Arc<dyn DeviceLocationPort> = Arc::new(CachedLocationProvider::new(
            source,
            config.geolocation.max_age(),
            config.geolocation.timeout(),
        ));

        Ok(Self {
            adapter,
            location,
            store: Arc::new(JsonFileRecentCitiesStore::new(
                config.recent_cities.path.clone(),
            )),
            zone: config.timezone,
            throttle: config.throttle.to_throttle_config(),
        })
    }

    fn weather(&self) -> WeatherQueryService {
        WeatherQueryService::new(self.adapter.clone(), self.zone)
    }

    fn recents(&self) -> RecentCitiesService {
        RecentCitiesService::new(self.store.clone())
    }

    fn controller(&self, units: TemperatureUnit) -> Arc<DashboardController> {
        Arc::new(DashboardController::new(
            self.weather(),
            Arc::clone(&self.location),
            self.recents(),
            self.throttle,
            units,
        ))
    }
}

/// Where a dashboard request points
enum DashboardTarget {
    City(CityName),
    Coordinates(GeoLocation),
    Device,
}

fn dashboard_target(
    city: Option<CityName>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<DashboardTarget> {
    if let Some(city) = city {
        return Ok(DashboardTarget::City(city));
    }
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(DashboardTarget::Coordinates(GeoLocation::new(lat, lon)?)),
        _ => Ok(DashboardTarget::Device),
    }
}

fn submit_target(controller: &Arc<DashboardController>, target: &DashboardTarget) {
    match target {
        DashboardTarget::City(city) => {
            controller.submit_search(city.clone());
        }
        DashboardTarget::Coordinates(location) => {
            controller.submit_coordinates(*location);
        }
        DashboardTarget::Device => {
            controller.submit_device_location();
        }
    }
}

/// Poll until the controller settles with a result
///
/// A fired request flips `in_flight` before `submit_target` returns, so
/// the first fetch on a fresh controller can never be missed.
async fn await_settled(controller: &Arc<DashboardController>) -> DashboardState {
    loop {
        let state = controller.state();
        if !state.in_flight && (state.bundle.is_some() || state.error.is_some()) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

fn print_watch_frame(state: &DashboardState, zone: Tz) {
    println!(
        "🔄 {}",
        Utc::now().with_timezone(&zone).format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(error) = &state.error {
        println!("⚠️  {error}");
    }
    if let Some(bundle) = &state.bundle {
        println!("{}", render::dashboard(bundle, zone));
    }
}

/// Refresh the dashboard on a fixed cadence until Ctrl+C
async fn run_watch(
    controller: &Arc<DashboardController>,
    target: &DashboardTarget,
    zone: Tz,
    interval: Duration,
) -> anyhow::Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut refresh = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                submit_target(controller, target);
                let state = await_settled(controller).await;
                print_watch_frame(&state, zone);
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for shutdown signal")?;
                info!("shutting down watch mode");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(Some(path)),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    let units = cli.units.unwrap_or(config.units);
    let app = App::build(&config)?;

    match cli.command {
        Commands::Current { city } => {
            let conditions = app
                .weather()
                .current(&WeatherQuery::City(city), units)
                .await?;

            if let Err(error) = app
                .recents()
                .record_view(&conditions.city_name, conditions.country.as_deref())
                .await
            {
                warn!(%error, "failed to record the viewed city");
            }

            println!("{}", render::current_panel(&conditions, units, app.zone));
        }

        Commands::Forecast { city } => {
            let samples = app
                .weather()
                .forecast_samples(&WeatherQuery::City(city), units)
                .await?;
            let today = Utc::now().with_timezone(&app.zone).date_naive();
            let daily = aggregate_daily(&samples, today, app.zone);

            println!("{}", render::daily_table(&daily, units));
        }

        Commands::Dashboard {
            city,
            lat,
            lon,
            watch,
            interval_secs,
        } => {
            let target = dashboard_target(city, lat, lon)?;
            let controller = app.controller(units);

            if watch {
                run_watch(
                    &controller,
                    &target,
                    app.zone,
                    Duration::from_secs(interval_secs),
                )
                .await?;
            } else {
                submit_target(&controller, &target);
                let state = await_settled(&controller).await;
                match state.bundle {
                    Some(bundle) => println!("{}", render::dashboard(&bundle, app.zone)),
                    None => {
                        let reason = state
                            .error
                            .unwrap_or_else(|| "no forecast available".to_string());
                        anyhow::bail!(reason);
                    }
                }
            }
        }

        Commands::Search { query, limit } => {
            let places = app.adapter.search(&query, limit).await?;
            println!("{}", render::place_list(&places));
        }

        Commands::Recent { clear, forget } => {
            let recents = app.recents();
            if clear {
                recents.clear().await?;
                println!("🧹 Cleared the recently viewed list");
            } else if let Some(name) = forget {
                recents.remove(&name).await?;
                println!("🧹 Removed {name} from the recently viewed list");
            } else {
                let cities = recents.list().await?;
                println!("{}", render::recent_list(&cities));
            }
        }
    }

    Ok(())
}
