//! TopHeader - application top bar: winery name, user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();
    let navigate = use_navigate();

    let tenant = move || {
        session
            .session()
            .map(|s| s.tenant_name().to_string())
            .unwrap_or_default()
    };
    let username = move || {
        session
            .session()
            .map(|s| s.display_name().to_string())
            .unwrap_or_default()
    };

    let logout = move |_| {
        log::info!("logout requested");
        session.invalidate();
        navigate("/login", Default::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("lots")}
                </button>
                <span class="top-header__title">"Vinops"</span>
                <span id="topbar-bodega" class="top-header__tenant">{tenant}</span>
            </div>

            <div class="top-header__actions">
                <a class="top-header__user" href="/cuenta">
                    {icon("users")}
                    <span id="topbar-username">{username}</span>
                </a>
                <button id="btn-logout" class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
