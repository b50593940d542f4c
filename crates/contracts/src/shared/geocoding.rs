//! Geocoding with progressively less specific queries.
//!
//! A winery address is rarely precise enough for the public geocoder, so the
//! weather widget tries `city, province, country` first and falls back step by
//! step down to the bare country name.

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// One hit from the geocoding search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoCandidate {
    /// "Toro, Castilla y León, España" with missing parts skipped.
    pub fn label(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str()];
        if let Some(admin) = self.admin1.as_deref().filter(|a| *a != self.name) {
            parts.push(admin);
        }
        if let Some(country) = self.country.as_deref() {
            parts.push(country);
        }
        parts.join(", ")
    }

    fn matches_country(&self, code: &str) -> bool {
        self.country_code
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(code))
            .unwrap_or(false)
    }
}

/// Body of the search endpoint. `results` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeoCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    /// The query string that produced this point.
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodingError {
    #[error("no hay datos de ubicación para buscar")]
    NoQueries,
    #[error("ubicación no encontrada tras {tried} búsquedas")]
    NoResults {
        tried: usize,
        last_error: Option<String>,
    },
}

/// Ordered query list: city+province+country, city+country, city,
/// province+country, province, country. Blank parts and duplicates are dropped.
pub fn location_queries(city: Option<&str>, province: Option<&str>, country: Option<&str>) -> Vec<String> {
    fn clean(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|s| !s.is_empty())
    }
    let city = clean(city);
    let province = clean(province);
    let country = clean(country);

    let combos: Vec<Vec<Option<&str>>> = vec![
        vec![city, province, country],
        vec![city, country],
        vec![city],
        vec![province, country],
        vec![province],
        vec![country],
    ];

    let mut queries: Vec<String> = Vec::new();
    for combo in &combos {
        // A combination only counts when every part it names is present.
        if combo.iter().any(Option::is_none) {
            continue;
        }
        let query = combo.iter().flatten().copied().collect::<Vec<_>>().join(", ");
        if !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}

/// ISO 3166 alpha-2 code for the country names the backend stores.
pub fn country_code_for(country: &str) -> Option<&'static str> {
    let normalized = country.trim().to_lowercase();
    match normalized.as_str() {
        "españa" | "espana" | "spain" | "es" => Some("ES"),
        "portugal" | "pt" => Some("PT"),
        "francia" | "france" | "fr" => Some("FR"),
        "italia" | "italy" | "it" => Some("IT"),
        "alemania" | "germany" | "de" => Some("DE"),
        "argentina" | "ar" => Some("AR"),
        "chile" | "cl" => Some("CL"),
        "méxico" | "mexico" | "mx" => Some("MX"),
        _ => None,
    }
}

/// Pick the result to use from a non-empty candidate list.
///
/// With a preferred country, candidates from that country win when at least
/// one exists; otherwise the unfiltered list is used.
pub fn select_candidate<'a>(
    candidates: &'a [GeoCandidate],
    preferred_country: Option<&str>,
) -> Option<&'a GeoCandidate> {
    if let Some(code) = preferred_country {
        if let Some(found) = candidates.iter().find(|c| c.matches_country(code)) {
            return Some(found);
        }
    }
    candidates.first()
}

/// Run `search` over `queries` in order and stop at the first one with results.
///
/// A lookup error is treated like an empty result and the next query is tried.
pub async fn geocode_with_fallback<F, Fut, E>(
    queries: &[String],
    preferred_country: Option<&str>,
    mut search: F,
) -> Result<GeoPoint, GeocodingError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<GeoCandidate>, E>>,
    E: std::fmt::Display,
{
    if queries.is_empty() {
        return Err(GeocodingError::NoQueries);
    }

    let mut last_error: Option<String> = None;
    for query in queries {
        let candidates = match search(query.clone()).await {
            Ok(found) => found,
            Err(e) => {
                last_error = Some(e.to_string());
                continue;
            }
        };

        if let Some(best) = select_candidate(&candidates, preferred_country) {
            return Ok(GeoPoint {
                latitude: best.latitude,
                longitude: best.longitude,
                label: best.label(),
                query: query.clone(),
            });
        }
    }

    Err(GeocodingError::NoResults {
        tried: queries.len(),
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn candidate(name: &str, lat: f64, code: &str) -> GeoCandidate {
        GeoCandidate {
            name: name.to_string(),
            latitude: lat,
            longitude: -5.0,
            country_code: Some(code.to_string()),
            admin1: None,
            country: None,
        }
    }

    #[test]
    fn test_location_queries_order() {
        let queries = location_queries(Some("Toro"), Some("Zamora"), Some("España"));
        assert_eq!(
            queries,
            vec![
                "Toro, Zamora, España",
                "Toro, España",
                "Toro",
                "Zamora, España",
                "Zamora",
                "España",
            ]
        );
    }

    #[test]
    fn test_location_queries_skip_missing_parts() {
        let queries = location_queries(Some("Toro"), Some("  "), None);
        assert_eq!(queries, vec!["Toro"]);
        assert!(location_queries(None, None, None).is_empty());
    }

    #[test]
    fn test_fallback_prefers_matching_country_on_third_query() {
        let queries = location_queries(Some("Toro"), Some("Zamora"), Some("España"));
        let calls = RefCell::new(Vec::new());

        let result = block_on(geocode_with_fallback(&queries, Some("es"), |q: String| {
            calls.borrow_mut().push(q.clone());
            let index = calls.borrow().len();
            async move {
                if index == 3 {
                    Ok::<_, String>(vec![
                        candidate("Toro", 1.0, "US"),
                        candidate("Toro", 41.5, "ES"),
                        candidate("Toro", 42.0, "ES"),
                    ])
                } else {
                    Ok(Vec::new())
                }
            }
        }))
        .unwrap();

        assert_eq!(calls.borrow().len(), 3);
        assert_eq!(result.latitude, 41.5);
        assert_eq!(result.query, "Toro");
    }

    #[test]
    fn test_fallback_keeps_unfiltered_when_no_country_matches() {
        let queries = vec!["Toro".to_string()];
        let result = block_on(geocode_with_fallback(&queries, Some("PT"), |_q: String| async {
            Ok::<_, String>(vec![candidate("Toro", 7.0, "US"), candidate("Toro", 8.0, "ES")])
        }))
        .unwrap();
        assert_eq!(result.latitude, 7.0);
    }

    #[test]
    fn test_fallback_skips_failing_queries() {
        let queries = vec!["a".to_string(), "b".to_string()];
        let result = block_on(geocode_with_fallback(&queries, None, |q: String| async move {
            if q == "a" {
                Err("timeout".to_string())
            } else {
                Ok(vec![candidate("B", 3.0, "ES")])
            }
        }))
        .unwrap();
        assert_eq!(result.latitude, 3.0);
    }

    #[test]
    fn test_fallback_fails_when_everything_is_empty() {
        let queries = vec!["a".to_string(), "b".to_string()];
        let err = block_on(geocode_with_fallback(&queries, None, |_q: String| async {
            Ok::<Vec<GeoCandidate>, String>(Vec::new())
        }))
        .unwrap_err();
        assert_eq!(err, GeocodingError::NoResults { tried: 2, last_error: None });

        let none: Vec<String> = Vec::new();
        let err = block_on(geocode_with_fallback(&none, None, |_q: String| async {
            Ok::<Vec<GeoCandidate>, String>(Vec::new())
        }))
        .unwrap_err();
        assert_eq!(err, GeocodingError::NoQueries);
    }

    #[test]
    fn test_country_code_and_label() {
        assert_eq!(country_code_for(" España "), Some("ES"));
        assert_eq!(country_code_for("Narnia"), None);
        let c = GeoCandidate {
            name: "Toro".into(),
            latitude: 0.0,
            longitude: 0.0,
            country_code: Some("ES".into()),
            admin1: Some("Castilla y León".into()),
            country: Some("España".into()),
        };
        assert_eq!(c.label(), "Toro, Castilla y León, España");
    }
}
