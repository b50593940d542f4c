mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::{use_query_value, use_route_id};
pub use view::ClienteDetails;

/// `/clientes/nuevo`, `/clientes/:id` and `/clientes/:id?modo=edit`.
#[component]
pub fn ClienteDetailsPage() -> impl IntoView {
    let id = use_route_id();
    let modo = use_query_value("modo");
    view! {
        <PageFrame page_id="a002_cliente--detail" category=PAGE_CAT_DETAIL>
            {move || {
                let editing = modo.get().as_deref() == Some("edit");
                view! { <ClienteDetails id=id.get() editing=editing /> }
            }}
        </PageFrame>
    }
}
