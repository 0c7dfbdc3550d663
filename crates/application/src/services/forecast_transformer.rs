//! Forecast transformer
//!
//! Maps the provider's nested forecast document onto one [`Location`] and one
//! [`ForecastReading`] per forecast slot. Pure: no I/O, no defaults. A missing
//! or mistyped field rejects the whole document.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use domain::{ForecastReading, Location};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::RawForecastDocument};

/// Format of the provider's `dt_txt` field (UTC, no offset)
const SLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Records extracted from one forecast document
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBatch {
    /// The queried location
    pub location: Location,
    /// One reading per forecast slot, in source (chronological) order
    pub readings: Vec<ForecastReading>,
}

/// Provider document shape; only the fields the pipeline consumes
#[derive(Debug, Deserialize)]
struct ForecastDocument {
    city: CityBlock,
    list: Vec<SlotEntry>,
}

#[derive(Debug, Deserialize)]
struct CityBlock {
    name: String,
    country: String,
    coord: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct SlotEntry {
    dt_txt: String,
    main: MainBlock,
    wind: WindBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

/// Transform a raw forecast document into domain records
///
/// # Errors
///
/// Returns [`ApplicationError::Shape`] if a required field is absent or has
/// the wrong type, a slot timestamp cannot be parsed, or a slot has no
/// condition entry.
#[instrument(skip(doc))]
pub fn transform(doc: &RawForecastDocument) -> Result<ForecastBatch, ApplicationError> {
    let document = ForecastDocument::deserialize(doc.as_value())
        .map_err(|e| ApplicationError::Shape(e.to_string()))?;

    let location = Location::new(
        document.city.name,
        document.city.country,
        document.city.coord.lat,
        document.city.coord.lon,
    );

    let readings = document
        .list
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_reading(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        location = %location,
        readings = readings.len(),
        "Forecast document transformed"
    );

    Ok(ForecastBatch { location, readings })
}

/// Map one `list` entry onto a reading
fn to_reading(index: usize, entry: SlotEntry) -> Result<ForecastReading, ApplicationError> {
    let forecast_time = parse_slot_time(&entry.dt_txt)
        .map_err(|e| ApplicationError::Shape(format!("list[{index}].dt_txt: {e}")))?;

    let humidity_percent = coerce_percent(entry.main.humidity)
        .map_err(|e| ApplicationError::Shape(format!("list[{index}].main.humidity: {e}")))?;

    let condition = entry.weather.into_iter().next().ok_or_else(|| {
        ApplicationError::Shape(format!("list[{index}].weather: no condition entry"))
    })?;

    Ok(ForecastReading {
        forecast_time,
        temperature_celsius: entry.main.temp,
        feels_like_celsius: entry.main.feels_like,
        humidity_percent,
        wind_speed_ms: entry.wind.speed,
        description: condition.description,
        weather_icon: condition.icon,
    })
}

/// Parse a `dt_txt` value, interpreting it as UTC
fn parse_slot_time(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s, SLOT_TIME_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| format!("invalid timestamp {s:?}: {e}"))
}

/// Coerce a JSON number to an integer percentage, truncating toward zero
#[allow(clippy::cast_possible_truncation)]
fn coerce_percent(value: f64) -> Result<i32, String> {
    let truncated = value.trunc();
    if !truncated.is_finite()
        || truncated < f64::from(i32::MIN)
        || truncated > f64::from(i32::MAX)
    {
        return Err(format!("{value} is not representable as an integer"));
    }
    Ok(truncated as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokyo_document() -> serde_json::Value {
        serde_json::json!({
            "cod": "200",
            "cnt": 1,
            "city": {
                "id": 1_850_147,
                "name": "Tokyo",
                "country": "JP",
                "coord": { "lat": 35.68, "lon": 139.69 }
            },
            "list": [
                {
                    "dt": 1_704_110_400,
                    "dt_txt": "2024-01-01 12:00:00",
                    "main": { "temp": 10.5, "feels_like": 9.0, "humidity": 60, "pressure": 1015 },
                    "wind": { "speed": 3.2, "deg": 320 },
                    "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
                }
            ]
        })
    }

    fn slot(dt_txt: &str, temp: f64) -> serde_json::Value {
        serde_json::json!({
            "dt_txt": dt_txt,
            "main": { "temp": temp, "feels_like": temp, "humidity": 50 },
            "wind": { "speed": 1.0 },
            "weather": [{ "description": "few clouds", "icon": "02d" }]
        })
    }

    fn transform_value(value: serde_json::Value) -> Result<ForecastBatch, ApplicationError> {
        transform(&RawForecastDocument::new(value))
    }

    #[test]
    fn maps_tokyo_document() {
        let batch = transform_value(tokyo_document()).unwrap();

        assert_eq!(batch.location, Location::new("Tokyo", "JP", 35.68, 139.69));
        assert_eq!(batch.readings.len(), 1);

        let reading = &batch.readings[0];
        assert_eq!(
            reading.forecast_time,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        assert!((reading.temperature_celsius - 10.5).abs() < f64::EPSILON);
        assert!((reading.feels_like_celsius - 9.0).abs() < f64::EPSILON);
        assert_eq!(reading.humidity_percent, 60);
        assert!((reading.wind_speed_ms - 3.2).abs() < f64::EPSILON);
        assert_eq!(reading.description, "clear sky");
        assert_eq!(reading.weather_icon, "01d");
    }

    #[test]
    fn slot_time_is_interpreted_as_utc() {
        let batch = transform_value(tokyo_document()).unwrap();
        assert_eq!(
            batch.readings[0].forecast_time.to_rfc3339(),
            "2024-01-01T12:00:00+00:00"
        );
    }

    #[test]
    fn preserves_source_order() {
        let mut doc = tokyo_document();
        doc["list"] = serde_json::json!([
            slot("2024-01-01 21:00:00", 3.0),
            slot("2024-01-01 12:00:00", 1.0),
            slot("2024-01-01 15:00:00", 2.0),
        ]);

        let batch = transform_value(doc).unwrap();
        let temps: Vec<f64> = batch
            .readings
            .iter()
            .map(|r| r.temperature_celsius)
            .collect();
        assert_eq!(temps, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_list_yields_no_readings() {
        let mut doc = tokyo_document();
        doc["list"] = serde_json::json!([]);

        let batch = transform_value(doc).unwrap();
        assert_eq!(batch.location.city, "Tokyo");
        assert!(batch.readings.is_empty());
    }

    #[test]
    fn missing_latitude_is_rejected() {
        let mut doc = tokyo_document();
        doc["city"]["coord"]
            .as_object_mut()
            .unwrap()
            .remove("lat");

        let err = transform_value(doc).unwrap_err();
        assert!(matches!(err, ApplicationError::Shape(_)));
        assert!(err.to_string().contains("lat"), "unexpected message: {err}");
    }

    #[test]
    fn null_latitude_is_rejected() {
        let mut doc = tokyo_document();
        doc["city"]["coord"]["lat"] = serde_json::Value::Null;

        assert!(matches!(
            transform_value(doc),
            Err(ApplicationError::Shape(_))
        ));
    }

    #[test]
    fn missing_city_block_is_rejected() {
        let mut doc = tokyo_document();
        doc.as_object_mut().unwrap().remove("city");

        assert!(matches!(
            transform_value(doc),
            Err(ApplicationError::Shape(_))
        ));
    }

    #[test]
    fn missing_list_is_rejected() {
        let mut doc = tokyo_document();
        doc.as_object_mut().unwrap().remove("list");

        assert!(matches!(
            transform_value(doc),
            Err(ApplicationError::Shape(_))
        ));
    }

    #[test]
    fn string_temperature_is_rejected() {
        let mut doc = tokyo_document();
        doc["list"][0]["main"]["temp"] = serde_json::json!("10.5");

        assert!(matches!(
            transform_value(doc),
            Err(ApplicationError::Shape(_))
        ));
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let mut doc = tokyo_document();
        doc["list"][0]["weather"] = serde_json::json!([]);

        let err = transform_value(doc).unwrap_err();
        assert!(err.to_string().contains("list[0].weather"));
    }

    #[test]
    fn timestamp_with_offset_format_is_rejected() {
        let mut doc = tokyo_document();
        doc["list"][0]["dt_txt"] = serde_json::json!("2024-01-01T12:00:00Z");

        let err = transform_value(doc).unwrap_err();
        assert!(err.to_string().contains("list[0].dt_txt"));
    }

    #[test]
    fn fractional_humidity_is_truncated() {
        let mut doc = tokyo_document();
        doc["list"][0]["main"]["humidity"] = serde_json::json!(60.9);

        let batch = transform_value(doc).unwrap();
        assert_eq!(batch.readings[0].humidity_percent, 60);
    }

    #[test]
    fn oversized_humidity_is_rejected() {
        assert!(coerce_percent(1e12).is_err());
        assert!(coerce_percent(-1e12).is_err());
        assert_eq!(coerce_percent(100.0), Ok(100));
    }

    #[test]
    fn failure_on_later_slot_rejects_whole_document() {
        let mut doc = tokyo_document();
        let mut broken = slot("2024-01-01 18:00:00", 4.0);
        broken["wind"].as_object_mut().unwrap().remove("speed");
        doc["list"] = serde_json::json!([slot("2024-01-01 15:00:00", 2.0), broken]);

        assert!(matches!(
            transform_value(doc),
            Err(ApplicationError::Shape(_))
        ));
    }

    proptest! {
        #[test]
        fn one_reading_per_slot_in_order(hours in proptest::collection::vec(0u32..24, 0..40)) {
            let mut doc = tokyo_document();
            let slots: Vec<serde_json::Value> = hours
                .iter()
                .enumerate()
                .map(|(i, h)| slot(&format!("2024-01-02 {h:02}:00:00"), f64::from(u32::try_from(i).unwrap())))
                .collect();
            doc["list"] = serde_json::Value::Array(slots);

            let batch = transform_value(doc).unwrap();
            prop_assert_eq!(batch.readings.len(), hours.len());
            for (i, (reading, h)) in batch.readings.iter().zip(&hours).enumerate() {
                prop_assert_eq!(reading.temperature_celsius, f64::from(u32::try_from(i).unwrap()));
                prop_assert_eq!(reading.forecast_time.format("%H").to_string(), format!("{h:02}"));
            }
        }
    }
}
