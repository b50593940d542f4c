//! Plot weather: place the plot with the geocoding fallback chain, then
//! pull a short daily forecast.

use contracts::shared::geocoding::{
    country_code_for, geocode_with_fallback, location_queries, GeoCandidate, GeoPoint,
    GeocodingError, GeocodingResponse,
};
use contracts::shared::weather::{forecast_query, DailyForecast, ForecastResponse};
use thiserror::Error;

use crate::shared::api_utils::{self, ApiError};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Location(#[from] GeocodingError),
    #[error("previsión no disponible: {0}")]
    Forecast(#[from] ApiError),
}

/// Where the plot is and what the week looks like there.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotWeather {
    pub place: GeoPoint,
    pub days: Vec<DailyForecast>,
}

pub fn search_url(query: &str) -> String {
    format!(
        "{}?name={}&count=10&language=es&format=json",
        GEOCODING_URL,
        urlencoding::encode(query)
    )
}

async fn search(query: String) -> Result<Vec<GeoCandidate>, ApiError> {
    let response: GeocodingResponse = api_utils::get_external(&search_url(&query)).await?;
    Ok(response.results)
}

/// Municipality of the plot, then the winery's province and country.
pub async fn plot_weather(
    municipio: Option<&str>,
    provincia: Option<&str>,
    pais: Option<&str>,
) -> Result<PlotWeather, WeatherError> {
    let queries = location_queries(municipio, provincia, pais);
    let preferred = pais.and_then(country_code_for);
    let place = geocode_with_fallback(&queries, preferred, search).await?;
    log::debug!("plot located via '{}' at {}", place.query, place.label);

    let url = format!(
        "{}?{}",
        FORECAST_URL,
        forecast_query(place.latitude, place.longitude, FORECAST_DAYS)
    );
    let forecast: ForecastResponse = api_utils::get_external(&url).await?;
    Ok(PlotWeather {
        place,
        days: forecast.into_days(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url("Toro, Zamora, España"),
            "https://geocoding-api.open-meteo.com/v1/search?name=Toro%2C%20Zamora%2C%20Espa%C3%B1a&count=10&language=es&format=json"
        );
    }
}
