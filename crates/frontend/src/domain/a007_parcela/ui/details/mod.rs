mod registros;
mod view;
mod view_model;
mod weather_card;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::use_route_id;
pub use view::ParcelaDetails;

/// `/parcelas/nueva` and `/parcelas/:id`.
#[component]
pub fn ParcelaDetailsPage() -> impl IntoView {
    let id = use_route_id();
    view! {
        <PageFrame page_id="a007_parcela--detail" category=PAGE_CAT_DETAIL>
            {move || view! { <ParcelaDetails id=id.get() /> }}
        </PageFrame>
    }
}
