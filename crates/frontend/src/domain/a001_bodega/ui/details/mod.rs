mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
pub use view::BodegaDetails;

#[component]
pub fn BodegaPage() -> impl IntoView {
    view! {
        <PageFrame page_id="a001_bodega--detail" category=PAGE_CAT_DETAIL>
            <BodegaDetails />
        </PageFrame>
    }
}
