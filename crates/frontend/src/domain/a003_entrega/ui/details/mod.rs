mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::use_route_id;
pub use view::EntregaDetails;

/// `/entregas/nueva` and `/entregas/:id`.
#[component]
pub fn EntregaDetailsPage() -> impl IntoView {
    let id = use_route_id();
    view! {
        <PageFrame page_id="a003_entrega--detail" category=PAGE_CAT_DETAIL>
            {move || view! { <EntregaDetails id=id.get() /> }}
        </PageFrame>
    }
}
