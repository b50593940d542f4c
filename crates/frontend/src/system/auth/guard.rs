use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::context::{use_session, SessionStatus};

fn replace() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

/// Renders `children` only with a valid session; otherwise bounces to `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.status() == SessionStatus::Unauthenticated {
            navigate("/login", replace());
        }
    });

    view! {
        {move || match session.status() {
            SessionStatus::Authenticated(_) => children().into_any(),
            SessionStatus::Error(message) => view! {
                <div class="login-container">
                    <div class="login-box">
                        <h2>"No se pudo recuperar la sesión"</h2>
                        <p class="error-message">{message}</p>
                        <a href="/login" class="btn-primary">"Iniciar sesión"</a>
                    </div>
                </div>
            }
            .into_any(),
            SessionStatus::Unauthenticated => ().into_any(),
        }}
    }
}

/// Admin-only area inside an authenticated page.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_admin()
            fallback=|| view! {
                <div class="warning-box">
                    <span class="warning-box__text">"Acceso restringido a administradores."</span>
                </div>
            }
        >
            {children()}
        </Show>
    }
}

/// Public pages (landing, login, registration) send signed-in visitors home.
#[component]
pub fn PublicOnly(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.is_authenticated() {
            navigate("/inicio", replace());
        }
    });

    view! {
        <Show when=move || !session.is_authenticated()>
            {children()}
        </Show>
    }
}
