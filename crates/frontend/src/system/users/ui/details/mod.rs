mod view;
mod view_model;

use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::route_params::use_route_id;
use crate::system::auth::guard::RequireAdmin;
pub use view::UsuarioDetails;

/// `/usuarios/nuevo` and `/usuarios/:id`.
#[component]
pub fn UsuarioDetailsPage() -> impl IntoView {
    let id = use_route_id();
    view! {
        <RequireAdmin>
            <PageFrame page_id="sys_usuarios--detail" category=PAGE_CAT_SYSTEM>
                {move || view! { <UsuarioDetails id=id.get() /> }}
            </PageFrame>
        </RequireAdmin>
    }
}
