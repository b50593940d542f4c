use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::view_model::UsuarioDetailsVm;
use crate::shared::components::form::{ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn UsuarioDetails(id: Option<i64>) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let vm = UsuarioDetailsVm::new();
    if let Some(id) = id {
        vm.load(session, id);
    }

    let is_edit = vm.is_edit_mode();
    let editing_self = vm.is_self(session);
    let busy = Signal::derive(move || vm.saving.get() || vm.loading.get());

    let nav_saved = navigate.clone();
    let on_saved = Callback::new(move |saved_id: i64| {
        if id.is_none() {
            nav_saved(&format!("/usuarios/{}", saved_id), Default::default());
        }
    });
    let nav_back = navigate.clone();

    let title = if id.is_some() { "Editar usuario" } else { "Nuevo usuario" };

    view! {
        <PageHeader title=title>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| nav_back("/usuarios", Default::default())
            >
                {icon("chevron-left")}
                " Volver"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.save(session, on_saved)
                disabled=busy
            >
                {icon("save")}
                {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
            </Button>
        </PageHeader>

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />

            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            <Card>
                <div class="form">
                    <FormField label="Usuario" field="username" errors=vm.errors required=true>
                        <Input value=vm.username disabled=is_edit placeholder="nombre.apellido" />
                    </FormField>

                    <Show when=move || !is_edit.get()>
                        <FormField label="Contraseña" field="password" errors=vm.errors required=true>
                            <Input value=vm.password input_type=InputType::Password />
                        </FormField>
                        <FormField label="Repetir contraseña" field="password_confirm" errors=vm.errors required=true>
                            <Input value=vm.password_confirm input_type=InputType::Password />
                        </FormField>
                    </Show>

                    <FormField label="Nombre" field="nombre" errors=vm.errors>
                        <Input value=vm.nombre />
                    </FormField>
                    <FormField label="Email" field="email" errors=vm.errors>
                        <Input value=vm.email input_type=InputType::Email />
                    </FormField>

                    <Show
                        when=move || !editing_self.get()
                        fallback=move || view! {
                            <p class="text-muted">
                                {move || Role::from_code(&vm.rol.get()).label()}
                                " · "
                                {move || if vm.activo.get() { "Activo" } else { "Inactivo" }}
                            </p>
                        }
                    >
                        <FormField label="Rol" field="rol" errors=vm.errors>
                            <Select value=vm.rol>
                                <option value=Role::Operario.as_code()>{Role::Operario.label()}</option>
                                <option value=Role::Admin.as_code()>{Role::Admin.label()}</option>
                            </Select>
                        </FormField>
                        <FormField label="Estado" field="activo" errors=vm.errors>
                            <Checkbox checked=vm.activo label="Cuenta activa" />
                        </FormField>
                    </Show>

                    <Show when=move || editing_self.get()>
                        <p class="text-muted">"No puedes cambiar tu propio rol ni desactivar tu cuenta."</p>
                    </Show>
                </div>
            </Card>

            <Show when=move || is_edit.get() && !editing_self.get()>
                <Card>
                    <h3>"Restablecer contraseña"</h3>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <FormField label="Contraseña temporal" field="temp_password" errors=vm.errors>
                            <Input value=vm.temp_password input_type=InputType::Password />
                        </FormField>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.reset_password(session)
                            disabled=busy
                        >
                            {icon("key")}
                            " Restablecer"
                        </Button>
                    </Flex>
                </Card>
            </Show>
        </div>
    }
}
