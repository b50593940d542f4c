use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::system::auth::{api, context::use_session};

/// Where a fresh login lands: forced password changes go first.
pub fn landing_path(must_change_password: bool) -> &'static str {
    if must_change_password {
        "/cuenta/password"
    } else {
        "/inicio"
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let session = use_session();
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get().trim().to_string();
        let password_val = password.get();
        if username_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Introduce usuario y contraseña".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) => {
                    let must_change = response.user.debe_cambiar_password;
                    match session.sign_in(response.token, response.user) {
                        Ok(_) => navigate(landing_path(must_change), Default::default()),
                        Err(e) => {
                            log::error!("login accepted but session unusable: {}", e);
                            set_error_message.set(Some(format!("No se pudo iniciar sesión: {}", e)));
                        }
                    }
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_message.set(Some(e.user_message("Usuario o contraseña incorrectos")));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Vinops"</h1>
                <h2>"Acceso a tu bodega"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Usuario"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"¿Tu bodega aún no usa Vinops? " <a href="/registro">"Regístrala"</a></p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_path() {
        assert_eq!(landing_path(true), "/cuenta/password");
        assert_eq!(landing_path(false), "/inicio");
    }
}
