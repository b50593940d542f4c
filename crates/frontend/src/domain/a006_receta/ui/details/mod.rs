mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::use_query_value;
pub use view::RecetaEditor;

/// `/recetas?productoId=12`; without the parameter the wine is picked on the page.
#[component]
pub fn RecetasPage() -> impl IntoView {
    let producto = use_query_value("productoId");
    let producto_id = move || producto.get().and_then(|p| p.parse::<i64>().ok());
    view! {
        <PageFrame page_id="a006_receta--detail" category=PAGE_CAT_DETAIL>
            {move || view! { <RecetaEditor producto_id=producto_id() /> }}
        </PageFrame>
    }
}
