//! Dashboard controller
//!
//! Owns the mutable dashboard state and serializes refreshes through
//! per-stream throttles. Search queries and geolocation refreshes ride
//! separate lanes so one cannot starve the other; per-lane sequence tokens
//! make sure a response landing after a newer request fired is discarded
//! instead of overwriting fresher data.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use domain::{CityName, GeoLocation, TemperatureUnit};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::DeviceLocationPort,
    services::{
        recent_cities::RecentCitiesService,
        request_throttle::{RequestThrottle, ThrottleConfig, ThrottleDecision},
        weather_query_service::{ForecastBundle, WeatherQuery, WeatherQueryService},
    },
};

/// Input lane a refresh request arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStream {
    /// City searches typed by the user
    Search,
    /// Refreshes against the device's position
    Geolocation,
}

/// What a refresh should resolve against, before units are attached
#[derive(Debug, Clone)]
enum RequestTarget {
    City(CityName),
    Coordinates(GeoLocation),
    DevicePosition,
}

/// One unit of throttled work
#[derive(Debug, Clone)]
struct DashboardRequest {
    target: RequestTarget,
    units: TemperatureUnit,
}

impl DashboardRequest {
    const fn stream(&self) -> QueryStream {
        match self.target {
            RequestTarget::City(_) => QueryStream::Search,
            RequestTarget::Coordinates(_) | RequestTarget::DevicePosition => {
                QueryStream::Geolocation
            }
        }
    }
}

/// Renderable snapshot of the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last successfully fetched forecast, kept across later failures
    pub bundle: Option<ForecastBundle>,
    /// Message of the most recent failure, cleared by the next success
    pub error: Option<String>,
    /// Whether a refresh is currently running
    pub in_flight: bool,
}

/// Throttle plus sequence counter for one input lane
struct StreamLane {
    throttle: RequestThrottle<DashboardRequest>,
    sequence: AtomicU64,
}

impl StreamLane {
    const fn new(config: ThrottleConfig) -> Self {
        Self {
            throttle: RequestThrottle::new(config),
            sequence: AtomicU64::new(0),
        }
    }

    /// Claim the next token; responses carrying older tokens are stale
    fn next_token(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn latest(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

/// Coordinates weather fetches, throttling, and dashboard state
pub struct DashboardController {
    weather: WeatherQueryService,
    location: Arc<dyn DeviceLocationPort>,
    recents: RecentCitiesService,
    search: StreamLane,
    geolocation: StreamLane,
    units: RwLock<TemperatureUnit>,
    active_target: RwLock<Option<RequestTarget>>,
    state: RwLock<DashboardState>,
}

impl fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardController")
            .field("units", &*self.units.read())
            .finish_non_exhaustive()
    }
}

impl DashboardController {
    /// Create a new dashboard controller
    ///
    /// Both lanes share the same throttle tuning but keep independent
    /// windows and sequence counters.
    pub fn new(
        weather: WeatherQueryService,
        location: Arc<dyn DeviceLocationPort>,
        recents: RecentCitiesService,
        throttle: ThrottleConfig,
        units: TemperatureUnit,
    ) -> Self {
        Self {
            weather,
            location,
            recents,
            search: StreamLane::new(throttle),
            geolocation: StreamLane::new(throttle),
            units: RwLock::new(units),
            active_target: RwLock::new(None),
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Snapshot of the current dashboard state
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.state.read().clone()
    }

    /// Unit system applied to new requests
    #[must_use]
    pub fn units(&self) -> TemperatureUnit {
        *self.units.read()
    }

    /// Submit a city search
    pub fn submit_search(self: &Arc<Self>, city: CityName) -> ThrottleDecision {
        self.submit(RequestTarget::City(city))
    }

    /// Submit a refresh against known coordinates
    ///
    /// Rides the geolocation lane, like device refreshes.
    pub fn submit_coordinates(self: &Arc<Self>, location: GeoLocation) -> ThrottleDecision {
        self.submit(RequestTarget::Coordinates(location))
    }

    /// Submit a refresh against the device's position
    pub fn submit_device_location(self: &Arc<Self>) -> ThrottleDecision {
        self.submit(RequestTarget::DevicePosition)
    }

    /// Switch unit system and re-fetch the active view in the new units
    #[instrument(skip(self))]
    pub fn set_units(self: &Arc<Self>, units: TemperatureUnit) {
        {
            let mut current = self.units.write();
            if *current == units {
                return;
            }
            *current = units;
        }
        info!(?units, "switched unit system");

        let target = self.active_target.read().clone();
        if let Some(target) = target {
            self.submit(target);
        }
    }

    /// Flip between metric and imperial
    pub fn toggle_units(self: &Arc<Self>) {
        let next = self.units().toggled();
        self.set_units(next);
    }

    fn submit(self: &Arc<Self>, target: RequestTarget) -> ThrottleDecision {
        let units = *self.units.read();
        *self.active_target.write() = Some(target.clone());

        let request = DashboardRequest { target, units };
        let stream = request.stream();
        let lane = self.lane(stream);

        let decision = lane.throttle.try_fire(request.clone());
        match decision {
            ThrottleDecision::Fire => {
                let token = lane.next_token();
                self.state.write().in_flight = true;
                let controller = Arc::clone(self);
                tokio::spawn(async move {
                    controller.execute(stream, token, request).await;
                });
            }
            ThrottleDecision::Deferred { delay } => {
                debug!(?stream, ?delay, "request parked behind throttle window");
                let controller = Arc::clone(self);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    controller.drain(stream).await;
                });
            }
            ThrottleDecision::Coalesced => {
                debug!(?stream, "request coalesced into pending slot");
            }
        }
        decision
    }

    /// Run the parked request of `stream`, if one survived coalescing
    async fn drain(self: Arc<Self>, stream: QueryStream) {
        let lane = self.lane(stream);
        if let Some(request) = lane.throttle.take_pending() {
            let token = lane.next_token();
            self.state.write().in_flight = true;
            self.execute(stream, token, request).await;
        }
    }

    #[instrument(skip(self, request))]
    async fn execute(&self, stream: QueryStream, token: u64, request: DashboardRequest) {
        let searched_city = matches!(request.target, RequestTarget::City(_));
        let result = self.run_request(request).await;

        if self.lane(stream).latest() != token {
            debug!(?stream, token, "discarding superseded response");
            return;
        }

        match result {
            Ok(bundle) => {
                let city_name = bundle.current.city_name.clone();
                let country = bundle.current.country.clone();
                {
                    let mut state = self.state.write();
                    state.bundle = Some(bundle);
                    state.error = None;
                    state.in_flight = false;
                }
                if searched_city {
                    if let Err(err) = self.recents.record_view(&city_name, country.as_deref()).await
                    {
                        warn!(error = %err, "failed to record recent city");
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, ?stream, "dashboard refresh failed");
                let mut state = self.state.write();
                state.error = Some(err.to_string());
                state.in_flight = false;
            }
        }
    }

    async fn run_request(
        &self,
        request: DashboardRequest,
    ) -> Result<ForecastBundle, ApplicationError> {
        match request.target {
            RequestTarget::City(name) => {
                self.weather
                    .complete_forecast(&WeatherQuery::City(name), request.units)
                    .await
            }
            RequestTarget::Coordinates(location) => {
                self.weather
                    .complete_forecast(&WeatherQuery::Coordinates(location), request.units)
                    .await
            }
            RequestTarget::DevicePosition => {
                let position = self.location.current_position().await?;
                self.weather
                    .complete_forecast(&WeatherQuery::Coordinates(position), request.units)
                    .await
            }
        }
    }

    const fn lane(&self, stream: QueryStream) -> &StreamLane {
        match stream {
            QueryStream::Search => &self.search,
            QueryStream::Geolocation => &self.geolocation,
        }
    }
}
