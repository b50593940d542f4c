//! Daily forecast payload of the public weather API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Columnar `daily` block as returned by the forecast endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyColumns {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily: DailyColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_c: Option<f64>,
    pub min_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

impl DailyForecast {
    /// Rain worth mentioning to someone planning a treatment.
    pub fn is_rainy(&self) -> bool {
        self.precipitation_mm.map(|mm| mm >= 1.0).unwrap_or(false)
    }
}

impl ForecastResponse {
    /// Turn the column arrays into one row per day. Rows with an unparseable
    /// date are skipped; shorter value columns yield `None`.
    pub fn into_days(self) -> Vec<DailyForecast> {
        let daily = self.daily;
        daily
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
                Some(DailyForecast {
                    date,
                    max_c: daily.temperature_2m_max.get(i).copied().flatten(),
                    min_c: daily.temperature_2m_min.get(i).copied().flatten(),
                    precipitation_mm: daily.precipitation_sum.get(i).copied().flatten(),
                })
            })
            .collect()
    }
}

/// Query string for the forecast endpoint.
pub fn forecast_query(latitude: f64, longitude: f64, days: u8) -> String {
    format!(
        "latitude={:.4}&longitude={:.4}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum&timezone=auto&forecast_days={}",
        latitude, longitude, days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_to_rows() {
        let json = r#"{
            "daily": {
                "time": ["2025-09-01", "2025-09-02", "bad"],
                "temperature_2m_max": [28.1, null, 20.0],
                "temperature_2m_min": [14.0, 12.5],
                "precipitation_sum": [0.0, 3.2, 0.0]
            }
        }"#;
        let days = serde_json::from_str::<ForecastResponse>(json).unwrap().into_days();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].max_c, Some(28.1));
        assert_eq!(days[1].max_c, None);
        assert_eq!(days[1].min_c, Some(12.5));
        assert!(!days[0].is_rainy());
        assert!(days[1].is_rainy());
    }

    #[test]
    fn test_forecast_query() {
        assert_eq!(
            forecast_query(41.52, -5.39, 7),
            "latitude=41.5200&longitude=-5.3900&daily=temperature_2m_max,temperature_2m_min,precipitation_sum&timezone=auto&forecast_days=7"
        );
    }
}
