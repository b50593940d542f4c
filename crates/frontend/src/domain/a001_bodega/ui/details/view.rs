use leptos::prelude::*;
use thaw::*;

use super::view_model::BodegaDetailsVm;
use crate::shared::components::form::{ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

/// Winery profile. Operators see it read-only.
#[component]
pub fn BodegaDetails() -> impl IntoView {
    let session = use_session();
    let vm = BodegaDetailsVm::new();
    vm.load(session);

    let is_admin = Signal::derive(move || session.is_admin());
    let readonly = Signal::derive(move || !is_admin.get());
    let subtitle = Signal::derive(move || vm.bodega.get().map(|b| format!("/{}", b.slug)));

    let field = move |label: &'static str, key: &'static str, value: RwSignal<String>| {
        view! {
            <FormField label=label field=key errors=vm.errors>
                <Input value=value disabled=readonly />
            </FormField>
        }
    };

    view! {
        <PageHeader title="Mi bodega" subtitle=subtitle>
            <Show when=move || is_admin.get()>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save(session)
                    disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                >
                    {icon("save")}
                    {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                </Button>
            </Show>
        </PageHeader>

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>
            <Show when=move || !is_admin.get()>
                <p class="text-muted">"Solo un administrador puede modificar estos datos."</p>
            </Show>

            <Card>
                <div class="form form--two-columns">
                    {field("Nombre", "nombre", vm.nombre)}
                    {field("CIF", "cif", vm.cif)}
                    {field("Teléfono", "telefono", vm.telefono)}
                    {field("Email", "email", vm.email)}
                </div>
            </Card>
            <Card>
                <h3>"Dirección"</h3>
                <div class="form form--two-columns">
                    {field("Dirección", "direccion", vm.direccion)}
                    {field("Código postal", "codigo_postal", vm.codigo_postal)}
                    {field("Ciudad", "ciudad", vm.ciudad)}
                    {field("Provincia", "provincia", vm.provincia)}
                    {field("País", "pais", vm.pais)}
                </div>
            </Card>
        </div>
    }
}
