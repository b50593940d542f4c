use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Página no encontrada"</h2>
                <a href="/inicio">"Volver al inicio"</a>
            </div>
        </div>
    }
}
