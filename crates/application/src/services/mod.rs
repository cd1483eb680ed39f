//! Application services - forecast pipeline and dashboard orchestration

mod dashboard_controller;
mod daily_forecast;
mod hourly_forecast;
mod recent_cities;
mod request_throttle;
mod weather_query_service;

pub use dashboard_controller::{DashboardController, DashboardState, QueryStream};
pub use daily_forecast::{DAILY_WINDOW, DailySummary, TemperatureRange, aggregate_daily};
pub use hourly_forecast::{DEFAULT_PRESSURE_HPA, HOURLY_WINDOW, HourlySummary, project_hourly};
pub use recent_cities::RecentCitiesService;
pub use request_throttle::{
    DEFAULT_MIN_INTERVAL, RequestThrottle, ThrottleConfig, ThrottleDecision,
};
pub use weather_query_service::{ForecastBundle, WeatherQuery, WeatherQueryService};
