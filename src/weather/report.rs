//! Spoken and printed weather summaries
//!
//! Spoken lines lead with Fahrenheit, matching the assistant's announced
//! style; printed blocks carry both units.

use super::{AirQuality, CurrentConditions, ForecastEntry};

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// One spoken sentence for current conditions
#[must_use]
pub fn current_summary(conditions: &CurrentConditions) -> String {
    format!(
        "In {}, the temperature is {:.1} degrees Fahrenheit, which is {:.1} degrees Celsius.",
        conditions.city,
        celsius_to_fahrenheit(conditions.temp_c),
        conditions.temp_c
    )
}

/// Multi-line details block for current conditions
#[must_use]
pub fn current_details(conditions: &CurrentConditions) -> String {
    let mut description = conditions.description.clone();
    if let Some(first) = description.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    format!(
        "City: {}\n\
         Temperature: {:.1}°F / {:.1}°C\n\
         Feels Like: {:.1}°F / {:.1}°C\n\
         Weather: {}\n\
         Humidity: {}%\n\
         Wind Speed: {} m/s\n\
         Coordinates: lat {}, lon {}",
        conditions.city,
        celsius_to_fahrenheit(conditions.temp_c),
        conditions.temp_c,
        celsius_to_fahrenheit(conditions.feels_like_c),
        conditions.feels_like_c,
        description,
        conditions.humidity_pct,
        conditions.wind_speed_ms,
        conditions.lat,
        conditions.lon,
    )
}

/// One spoken sentence for an air quality reading
#[must_use]
pub fn air_quality_summary(air: AirQuality) -> String {
    format!(
        "The air quality index is {}, which is considered {}.",
        air.index,
        air.label()
    )
}

/// One spoken sentence summarizing a forecast batch
#[must_use]
pub fn forecast_overview(city: &str, entries: &[ForecastEntry]) -> String {
    if entries.is_empty() {
        return format!("Cannot retrieve forecast data for {city}.");
    }

    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for entry in entries {
        low = low.min(entry.temp_c);
        high = high.max(entry.temp_c);
    }

    format!(
        "The forecast for {city} has {} readings in 3 hour steps. \
         Temperatures range from {:.1} to {:.1} degrees Celsius.",
        entries.len(),
        low,
        high,
    )
}

/// Text table of forecast readings, one line per 3-hour step
#[must_use]
pub fn forecast_table(entries: &[ForecastEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  {:>6.1}°C  {:>3}%  rain {:>4.1}mm  snow {:>4.1}mm",
                e.timestamp.format("%Y-%m-%d %H:%M"),
                e.temp_c,
                e.humidity_pct,
                e.rain_mm,
                e.snow_mm,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_conditions() -> CurrentConditions {
        CurrentConditions {
            city: "Berlin".to_string(),
            description: "light rain".to_string(),
            temp_c: 20.0,
            feels_like_c: 19.0,
            humidity_pct: 56,
            wind_speed_ms: 4.1,
            lat: 52.52,
            lon: 13.41,
        }
    }

    fn sample_entry(temp_c: f64) -> ForecastEntry {
        ForecastEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap(),
            temp_c,
            humidity_pct: 70,
            rain_mm: 0.5,
            snow_mm: 0.0,
        }
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < f64::EPSILON);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_current_summary_leads_with_fahrenheit() {
        let text = current_summary(&sample_conditions());
        assert_eq!(
            text,
            "In Berlin, the temperature is 68.0 degrees Fahrenheit, \
             which is 20.0 degrees Celsius."
        );
    }

    #[test]
    fn test_current_details_capitalizes_description() {
        let text = current_details(&sample_conditions());
        assert!(text.contains("Weather: Light rain"));
        assert!(text.contains("Humidity: 56%"));
    }

    #[test]
    fn test_air_quality_summary() {
        let text = air_quality_summary(AirQuality { index: 2 });
        assert_eq!(
            text,
            "The air quality index is 2, which is considered Fair."
        );
    }

    #[test]
    fn test_forecast_overview_ranges() {
        let text = forecast_overview("Oslo", &[sample_entry(1.5), sample_entry(-3.0)]);
        assert!(text.contains("2 readings"));
        assert!(text.contains("-3.0 to 1.5"));
    }

    #[test]
    fn test_forecast_overview_empty() {
        assert_eq!(
            forecast_overview("Oslo", &[]),
            "Cannot retrieve forecast data for Oslo."
        );
    }

    #[test]
    fn test_forecast_table_lines() {
        let table = forecast_table(&[sample_entry(4.0), sample_entry(5.0)]);
        assert_eq!(table.lines().count(), 2);
        assert!(table.starts_with("2026-08-23 12:00"));
    }
}
