use contracts::shared::validation::FieldErrors;
use contracts::system::account::PasswordForm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::shared::components::form::{ErrorBanner, FormField, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::account::api;
use crate::system::auth::context::use_session;

/// `/cuenta/password`. Also where logins with a forced change land.
#[component]
pub fn PasswordPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let actual = RwSignal::new(String::new());
    let nueva = RwSignal::new(String::new());
    let confirmacion = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let forced = move || {
        session
            .session()
            .map(|s| s.user.debe_cambiar_password)
            .unwrap_or(false)
    };

    let submit = move || {
        error.set(None);
        success.set(None);
        let form = PasswordForm {
            actual: actual.get_untracked(),
            nueva: nueva.get_untracked(),
            confirmacion: confirmacion.get_untracked(),
        };
        let dto = match form.validate() {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        saving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let was_forced = session
                .session_untracked()
                .map(|s| s.user.debe_cambiar_password)
                .unwrap_or(false);
            let result = session
                .call(|s| async move { api::change_password(&s, &dto).await })
                .await;
            saving.set(false);
            match result {
                Ok(()) => {
                    log::info!("password changed");
                    session.update_user(|u| u.debe_cambiar_password = false);
                    actual.set(String::new());
                    nueva.set(String::new());
                    confirmacion.set(String::new());
                    if was_forced {
                        navigate("/inicio", Default::default());
                    } else {
                        success.set(Some("Contraseña actualizada".to_string()));
                    }
                }
                Err(e) => error.set(Some(e.user_message("No se pudo cambiar la contraseña"))),
            }
        });
    };

    view! {
        <PageFrame page_id="sys_password--system" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Cambiar contraseña">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Guardando..." } else { "Cambiar" }}
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show when=forced>
                    <MessageBar intent=MessageBarIntent::Warning>
                        <div>"Debes cambiar tu contraseña antes de continuar."</div>
                    </MessageBar>
                </Show>
                <ErrorBanner message=error />
                <SuccessBanner message=success />

                <Card>
                    <div class="form">
                        <FormField label="Contraseña actual" field="actual" errors=errors required=true>
                            <Input value=actual input_type=InputType::Password />
                        </FormField>
                        <FormField label="Nueva contraseña" field="nueva" errors=errors required=true>
                            <Input value=nueva input_type=InputType::Password />
                        </FormField>
                        <FormField label="Repite la nueva contraseña" field="confirmacion" errors=errors required=true>
                            <Input value=confirmacion input_type=InputType::Password />
                        </FormField>
                        <p class="text-muted">"Al menos 8 caracteres, combinando letras y números."</p>
                    </div>
                </Card>
            </div>
        </PageFrame>
    }
}
