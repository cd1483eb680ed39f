//! Plain-text rendering for the terminal
//!
//! Pure functions from forecast DTOs to display strings. Values are printed
//! in the unit system they were fetched in; only the symbols come from
//! [`TemperatureUnit`].

use application::ports::{CurrentConditions, PlaceCandidate, RecentCity, WeatherCondition};
use application::services::{DailySummary, ForecastBundle, HourlySummary};
use chrono_tz::Tz;
use domain::TemperatureUnit;

/// Emoji for a provider condition group
fn condition_emoji(condition: &WeatherCondition) -> &'static str {
    match condition.group.as_str() {
        "Thunderstorm" => "⛈️",
        "Drizzle" | "Rain" => "🌧️",
        "Snow" => "❄️",
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Mist" | "Fog" | "Haze" | "Smoke" | "Dust" | "Sand" | "Ash" => "🌫️",
        _ => "🌡️",
    }
}

/// Eight-point compass label for a wind direction in degrees
fn compass_point(degrees: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    POINTS[(usize::from(degrees) + 22) / 45 % 8]
}

/// Multi-line panel for the current conditions
#[must_use]
pub fn current_panel(current: &CurrentConditions, units: TemperatureUnit, zone: Tz) -> String {
    let temp = units.temperature_symbol();
    let wind = units.wind_speed_unit();

    let place = match &current.country {
        Some(country) => format!("{}, {country}", current.city_name),
        None => current.city_name.clone(),
    };

    let mut out = format!(
        "{} {place} - {}\n",
        condition_emoji(&current.condition),
        current.condition.description
    );
    out.push_str(&format!(
        "   {:.1}{temp} (feels like {:.1}{temp})   min {:.1}{temp} / max {:.1}{temp}\n",
        current.temperature, current.feels_like, current.temperature_min, current.temperature_max
    ));
    out.push_str(&format!(
        "   humidity {}%   wind {:.1} {wind} {}   pressure {} hPa\n",
        current.humidity,
        current.wind_speed,
        compass_point(current.wind_direction),
        current.pressure
    ));
    out.push_str(&format!(
        "   sunrise {}   sunset {}\n",
        current.sunrise.with_timezone(&zone).format("%H:%M"),
        current.sunset.with_timezone(&zone).format("%H:%M")
    ));
    out
}

/// Table of the coming days
#[must_use]
pub fn daily_table(daily: &[DailySummary], units: TemperatureUnit) -> String {
    if daily.is_empty() {
        return "📅 No upcoming days in this forecast.\n".to_string();
    }

    let temp = units.temperature_symbol();
    let wind = units.wind_speed_unit();
    let mut out = String::from("📅 Coming days\n");
    for day in daily {
        let mut line = format!(
            "   {}  {} {:<20} {:>5.1}{temp} .. {:>5.1}{temp}  wind {:.1} {wind}",
            day.date.format("%a %d %b"),
            condition_emoji(&day.condition),
            day.condition.description,
            day.temperature.min,
            day.temperature.max,
            day.wind_speed
        );
        if day.precipitation_probability > 0 || day.precipitation_mm > 0.0 {
            line.push_str(&format!(
                "  💧 {}% ({:.1} mm)",
                day.precipitation_probability, day.precipitation_mm
            ));
        }
        line.push('\n');
        out.push_str(&line);
    }
    out
}

/// Strip of the upcoming 3-hour slots
#[must_use]
pub fn hourly_strip(hourly: &[HourlySummary], units: TemperatureUnit, zone: Tz) -> String {
    if hourly.is_empty() {
        return "🕒 No hourly data available.\n".to_string();
    }

    let temp = units.temperature_symbol();
    let mut out = String::from("🕒 Next hours\n");
    for slot in hourly {
        let mut line = format!(
            "   {}  {} {:>5.1}{temp}",
            slot.timestamp.with_timezone(&zone).format("%a %H:%M"),
            condition_emoji(&slot.condition),
            slot.temperature
        );
        if slot.precipitation_probability > 0 {
            line.push_str(&format!("  💧 {}%", slot.precipitation_probability));
        }
        line.push('\n');
        out.push_str(&line);
    }
    out
}

/// Numbered geocoding candidates
#[must_use]
pub fn place_list(places: &[PlaceCandidate]) -> String {
    if places.is_empty() {
        return "📍 No places found.\n".to_string();
    }

    let mut out = String::from("📍 Matching places\n");
    for (index, place) in places.iter().enumerate() {
        out.push_str(&format!(
            "   {}. {}  {}\n",
            index + 1,
            place.label(),
            place.location
        ));
    }
    out
}

/// Recently viewed cities, newest first
#[must_use]
pub fn recent_list(cities: &[RecentCity]) -> String {
    if cities.is_empty() {
        return "🕘 No recently viewed cities yet.\n".to_string();
    }

    let mut out = String::from("🕘 Recently viewed\n");
    for (index, city) in cities.iter().enumerate() {
        let mut line = format!("   {}. {}", index + 1, city.name);
        if let Some(country) = &city.country {
            line.push_str(&format!(", {country}"));
        }
        line.push_str(&format!(
            "  (viewed {})",
            city.last_viewed.format("%Y-%m-%d %H:%M UTC")
        ));
        line.push('\n');
        out.push_str(&line);
    }
    out
}

/// Full dashboard: current panel plus both forecast strips
#[must_use]
pub fn dashboard(bundle: &ForecastBundle, zone: Tz) -> String {
    let mut out = current_panel(&bundle.current, bundle.units, zone);
    out.push('\n');
    out.push_str(&daily_table(&bundle.daily, bundle.units));
    out.push('\n');
    out.push_str(&hourly_strip(&bundle.hourly, bundle.units, zone));
    out
}

#[cfg(test)]
mod tests {
    use application::services::TemperatureRange;
    use chrono::{NaiveDate, TimeZone, Utc};
    use domain::GeoLocation;

    use super::*;

    fn clear_sky() -> WeatherCondition {
        WeatherCondition {
            id: 800,
            group: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn light_rain() -> WeatherCondition {
        WeatherCondition {
            id: 500,
            group: "Rain".to_string(),
            description: "light rain".to_string(),
            icon: "10n".to_string(),
        }
    }

    fn current() -> CurrentConditions {
        CurrentConditions {
            city_name: "London".to_string(),
            coordinates: GeoLocation::london(),
            temperature: 14.0,
            feels_like: 12.5,
            temperature_min: 11.0,
            temperature_max: 16.0,
            humidity: 70,
            pressure: 1012,
            wind_speed: 3.5,
            wind_direction: 240,
            visibility: Some(10_000),
            condition: clear_sky(),
            sunrise: Utc.with_ymd_and_hms(2024, 5, 10, 4, 58, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2024, 5, 10, 19, 42, 0).unwrap(),
            observed_at: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
            country: Some("GB".to_string()),
        }
    }

    fn day(date: NaiveDate, probability: u8, volume: f64) -> DailySummary {
        DailySummary {
            date,
            temperature: TemperatureRange {
                min: 10.0,
                max: 16.0,
            },
            condition: if probability > 0 {
                light_rain()
            } else {
                clear_sky()
            },
            humidity: 65,
            wind_speed: 4.0,
            precipitation_mm: volume,
            precipitation_probability: probability,
        }
    }

    fn slot(hour: u32) -> HourlySummary {
        HourlySummary {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap(),
            temperature: 13.0,
            feels_like: 12.0,
            condition: clear_sky(),
            precipitation_probability: 10,
            wind_speed: 4.0,
            wind_direction: 220,
            humidity: 65,
            cloud_cover: 20,
            pressure: 1011,
        }
    }

    #[test]
    fn current_panel_shows_metric_units() {
        let panel = current_panel(&current(), TemperatureUnit::Metric, chrono_tz::UTC);

        assert!(panel.contains("London, GB"));
        assert!(panel.contains("clear sky"));
        assert!(panel.contains("14.0°C"));
        assert!(panel.contains("humidity 70%"));
        assert!(panel.contains("3.5 m/s SW"));
        assert!(panel.contains("pressure 1012 hPa"));
    }

    #[test]
    fn current_panel_shows_imperial_symbols() {
        let panel = current_panel(&current(), TemperatureUnit::Imperial, chrono_tz::UTC);

        assert!(panel.contains("°F"));
        assert!(panel.contains("mph"));
        assert!(!panel.contains("°C"));
    }

    #[test]
    fn current_panel_localizes_sun_times() {
        // Berlin is UTC+2 on this date
        let panel = current_panel(
            &current(),
            TemperatureUnit::Metric,
            chrono_tz::Europe::Berlin,
        );

        assert!(panel.contains("sunrise 06:58"));
        assert!(panel.contains("sunset 21:42"));
    }

    #[test]
    fn current_panel_without_country_shows_the_name_alone() {
        let mut conditions = current();
        conditions.country = None;

        let panel = current_panel(&conditions, TemperatureUnit::Metric, chrono_tz::UTC);
        assert!(panel.contains(" London -"));
        assert!(!panel.contains("London,"));
    }

    #[test]
    fn daily_table_marks_wet_days_only() {
        let days = vec![
            day(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(), 40, 0.3),
            day(NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(), 0, 0.0),
        ];

        let table = daily_table(&days, TemperatureUnit::Metric);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("Coming days"));
        assert!(lines[1].contains("Sat 11 May"));
        assert!(lines[1].contains("💧 40% (0.3 mm)"));
        assert!(lines[2].contains("Sun 12 May"));
        assert!(!lines[2].contains("💧"));
    }

    #[test]
    fn empty_daily_table_says_so() {
        let table = daily_table(&[], TemperatureUnit::Metric);
        assert!(table.contains("No upcoming days"));
    }

    #[test]
    fn hourly_strip_renders_in_the_target_zone() {
        let strip = hourly_strip(
            &[slot(12)],
            TemperatureUnit::Metric,
            chrono_tz::Europe::Berlin,
        );

        assert!(strip.contains("Fri 14:00"));
        assert!(strip.contains("13.0°C"));
        assert!(strip.contains("💧 10%"));
    }

    #[test]
    fn empty_hourly_strip_says_so() {
        let strip = hourly_strip(&[], TemperatureUnit::Metric, chrono_tz::UTC);
        assert!(strip.contains("No hourly data"));
    }

    #[test]
    fn place_list_numbers_candidates() {
        let places = vec![
            PlaceCandidate {
                name: "Springfield".to_string(),
                location: GeoLocation::new_unchecked(39.801, -89.643),
                country: Some("US".to_string()),
                state: Some("Illinois".to_string()),
            },
            PlaceCandidate {
                name: "Springfield".to_string(),
                location: GeoLocation::new_unchecked(42.101, -72.589),
                country: Some("US".to_string()),
                state: Some("Massachusetts".to_string()),
            },
        ];

        let list = place_list(&places);
        assert!(list.contains("1. Springfield, Illinois, US"));
        assert!(list.contains("2. Springfield, Massachusetts, US"));
    }

    #[test]
    fn empty_place_list_says_so() {
        assert!(place_list(&[]).contains("No places found"));
    }

    #[test]
    fn recent_list_shows_entries_with_view_times() {
        let cities = vec![RecentCity {
            name: "Paris".to_string(),
            country: Some("FR".to_string()),
            last_viewed: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        }];

        let list = recent_list(&cities);
        assert!(list.contains("1. Paris, FR"));
        assert!(list.contains("viewed 2024-05-10 12:00 UTC"));
    }

    #[test]
    fn empty_recent_list_says_so() {
        assert!(recent_list(&[]).contains("No recently viewed cities"));
    }

    #[test]
    fn dashboard_combines_all_sections() {
        let bundle = ForecastBundle {
            current: current(),
            daily: vec![day(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(), 0, 0.0)],
            hourly: vec![slot(15)],
            units: TemperatureUnit::Metric,
        };

        let rendered = dashboard(&bundle, chrono_tz::UTC);
        assert!(rendered.contains("London, GB"));
        assert!(rendered.contains("Coming days"));
        assert!(rendered.contains("Next hours"));
    }

    #[test]
    fn compass_points_cover_the_circle() {
        assert_eq!(compass_point(0), "N");
        assert_eq!(compass_point(45), "NE");
        assert_eq!(compass_point(90), "E");
        assert_eq!(compass_point(240), "SW");
        assert_eq!(compass_point(270), "W");
        assert_eq!(compass_point(359), "N");
    }

    #[test]
    fn unknown_condition_group_gets_a_fallback_emoji() {
        let condition = WeatherCondition {
            id: 781,
            group: "Tornado".to_string(),
            description: "tornado".to_string(),
            icon: "50d".to_string(),
        };
        assert_eq!(condition_emoji(&condition), "🌡️");
        assert_eq!(condition_emoji(&clear_sky()), "☀️");
    }
}
