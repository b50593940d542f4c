mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::date_utils::{parse_input, today};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::{use_query_value, use_route_id};
pub use view::EventoDetails;

/// `/eventos/nuevo?fecha=2025-09-20` and `/eventos/:id`.
#[component]
pub fn EventoDetailsPage() -> impl IntoView {
    let id = use_route_id();
    let fecha = use_query_value("fecha");
    view! {
        <PageFrame page_id="a009_evento--detail" category=PAGE_CAT_DETAIL>
            {move || {
                let fecha = fecha.get().and_then(|f| parse_input(&f)).unwrap_or_else(today);
                view! { <EventoDetails id=id.get() fecha=fecha /> }
            }}
        </PageFrame>
    }
}
