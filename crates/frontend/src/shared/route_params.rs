//! Reading `:id` and query parameters of the current route.

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

/// Numeric record id from a path segment. `nuevo`/`nueva` and anything
/// unparsable mean "create a new record".
pub fn parse_route_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.eq_ignore_ascii_case("nuevo") && !s.eq_ignore_ascii_case("nueva"))
        .and_then(|s| s.parse::<i64>().ok())
}

/// `:id` of the current route as a record id.
pub fn use_route_id() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| parse_route_id(p.get("id").as_deref())))
}

/// Single query-string value, `None` when absent or blank.
pub fn use_query_value(key: &'static str) -> Memo<Option<String>> {
    let query = use_query_map();
    Memo::new(move |_| {
        query.with(|q| q.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_id() {
        assert_eq!(parse_route_id(Some("42")), Some(42));
        assert_eq!(parse_route_id(Some("nuevo")), None);
        assert_eq!(parse_route_id(Some("Nueva")), None);
        assert_eq!(parse_route_id(Some("abc")), None);
        assert_eq!(parse_route_id(None), None);
    }
}
