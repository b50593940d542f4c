//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a002_cliente--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator makes the entity name searchable: copy the id from the
//! DOM inspector and you land in `domain/a002_cliente/`.

/// Table with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Account, users and other administration pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Public pages outside the shell (landing, login, registration).
pub const PAGE_CAT_PUBLIC: &str = "public";

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a002_cliente--list"));
        assert!(is_valid_page_id("d100_home--dashboard"));
        assert!(!is_valid_page_id("a002_cliente"));
        assert!(!is_valid_page_id("--list"));
    }
}
