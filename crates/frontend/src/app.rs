use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::SessionContext;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    provide_context(SessionContext::restore());
    provide_context(AppGlobalContext::new());

    view! {
        <Router>
            <AppRoutes />
        </Router>
    }
}
