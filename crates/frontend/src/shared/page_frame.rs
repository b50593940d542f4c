//! PageFrame: standard root wrapper for every routed page.
//!
//! Usage:
//! ```rust,ignore
//! use crate::shared::page_frame::PageFrame;
//! use crate::shared::page_standard::PAGE_CAT_LIST;
//!
//! #[component]
//! pub fn ClienteList() -> impl IntoView {
//!     view! {
//!         <PageFrame page_id="a002_cliente--list" category=PAGE_CAT_LIST>
//!             <div class="page__content">...</div>
//!         </PageFrame>
//!     }
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

/// Root wrapper that sets `id`, `data-page-category` and the BEM modifier class.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_PUBLIC => "page page--public",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
