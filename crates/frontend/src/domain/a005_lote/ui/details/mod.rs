mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::route_params::use_route_id;
use crate::system::pages::not_found::NotFoundPage;
pub use view::LoteDetails;

/// `/lotes/:id`: lot summary plus its bottling runs. Lots are created from the list.
#[component]
pub fn LoteDetailsPage() -> impl IntoView {
    let id = use_route_id();
    view! {
        <PageFrame page_id="a005_lote--detail" category=PAGE_CAT_DETAIL>
            {move || match id.get() {
                Some(id) => view! { <LoteDetails id=id /> }.into_any(),
                None => view! { <NotFoundPage /> }.into_any(),
            }}
        </PageFrame>
    }
}
