mod view;
mod view_model;

use contracts::domain::a004_producto::aggregate::TipoProducto;
use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::{use_query_value, use_route_id};
pub use view::ProductoDetails;

/// `/productos/nuevo?tipo=MATERIAL` and `/productos/:id`.
#[component]
pub fn ProductoDetailsPage() -> impl IntoView {
    let id = use_route_id();
    let tipo = use_query_value("tipo");
    view! {
        <PageFrame page_id="a004_producto--detail" category=PAGE_CAT_DETAIL>
            {move || {
                let tipo = tipo
                    .get()
                    .and_then(|t| TipoProducto::from_code(&t))
                    .unwrap_or_default();
                view! { <ProductoDetails id=id.get() tipo=tipo /> }
            }}
        </PageFrame>
    }
}
