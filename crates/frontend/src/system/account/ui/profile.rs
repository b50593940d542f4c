use contracts::shared::validation::{FieldErrors, GENERAL_VALIDATION_MESSAGE};
use contracts::system::account::{Perfil, PerfilForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::form::{ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::account::api;
use crate::system::auth::context::use_session;

/// `/cuenta`: own name and email.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let perfil: RwSignal<Option<Perfil>> = RwSignal::new(None);
    let nombre = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    spawn_local(async move {
        match session.call(|s| async move { api::fetch_perfil(&s).await }).await {
            Ok(p) => {
                let form = PerfilForm::from_perfil(&p);
                nombre.set(form.nombre);
                email.set(form.email);
                perfil.set(Some(p));
            }
            Err(e) => {
                log::error!("perfil: {}", e);
                error.set(Some(e.user_message("No se pudo cargar tu perfil")));
            }
        }
        loading.set(false);
    });

    let save = move || {
        success.set(None);
        let form = PerfilForm {
            nombre: nombre.get_untracked(),
            email: email.get_untracked(),
        };
        let dto = match form.validate() {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                return;
            }
        };
        errors.set(FieldErrors::new());
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            let body = dto.clone();
            let result = session
                .call(|s| async move { api::update_perfil(&s, &body).await })
                .await;
            saving.set(false);
            match result {
                Ok(()) => {
                    // Keep the top bar in sync without another login.
                    session.update_user(|u| {
                        u.nombre = dto.nombre.clone();
                        u.email = dto.email.clone();
                    });
                    success.set(Some("Perfil actualizado".to_string()));
                }
                Err(e) => error.set(Some(e.user_message("No se pudo guardar el perfil"))),
            }
        });
    };

    view! {
        <PageFrame page_id="sys_account--system" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Mi cuenta">
                <a class="button button--secondary" href="/cuenta/password">
                    {icon("key")}
                    " Cambiar contraseña"
                </a>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| save()
                    disabled=Signal::derive(move || saving.get() || loading.get())
                >
                    {icon("save")}
                    " Guardar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorBanner message=error />
                <SuccessBanner message=success />
                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                {move || perfil.get().map(|p| view! {
                    <Card>
                        <p>
                            <strong>{p.username.clone()}</strong>
                            " · "
                            {p.rol.label()}
                        </p>
                    </Card>
                })}

                <Card>
                    <div class="form">
                        <FormField label="Nombre" field="nombre" errors=errors>
                            <Input value=nombre />
                        </FormField>
                        <FormField label="Email" field="email" errors=errors>
                            <Input value=email input_type=InputType::Email />
                        </FormField>
                    </div>
                </Card>
            </div>
        </PageFrame>
    }
}
