use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::registros::RegistrosSection;
use super::view_model::ParcelaDetailsVm;
use super::weather_card::{HarvestCard, WeatherCard};
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn ParcelaDetails(id: Option<i64>) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let vm = ParcelaDetailsVm::new();
    if let Some(id) = id {
        vm.load(session, id);
    }

    let nav_saved = navigate.clone();
    let on_saved = Callback::new(move |saved: i64| {
        nav_saved(&format!("/parcelas/{}", saved), Default::default());
    });
    let on_deleted = Callback::new(move |_| navigate("/parcelas", Default::default()));
    let on_registros_changed = Callback::new(move |_| vm.refresh_estimacion(session));

    let title = move || match (id, vm.parcela.get()) {
        (None, _) => "Nueva parcela".to_string(),
        (Some(_), Some(p)) => p.nombre,
        (Some(id), None) => format!("Parcela {}", id),
    };

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/parcelas" back_label="Parcelas">
                {id.map(|_| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            if confirm("¿Eliminar la parcela y todos sus registros?") {
                                vm.delete(session, on_deleted);
                            }
                        }
                    >
                        {icon("delete")}
                        " Eliminar"
                    </Button>
                })}
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save(session, on_saved)
                    disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                >
                    {icon("save")}
                    {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                </Button>
            </PageHeader>
        }}

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            <Card>
                <div class="form form--two-columns">
                    <FormField label="Nombre" field="nombre" errors=vm.errors required=true>
                        <Input value=vm.nombre />
                    </FormField>
                    <FormField label="Variedad" field="variedad" errors=vm.errors>
                        <Input value=vm.variedad />
                    </FormField>
                    <FormField label="Municipio" field="municipio" errors=vm.errors>
                        <Input value=vm.municipio placeholder="Se usa para la previsión" />
                    </FormField>
                    <FormField label="Superficie (ha)" field="superficie_ha" errors=vm.errors>
                        <Input value=vm.superficie_ha />
                    </FormField>
                    <FormField label="Altitud (m)" field="altitud_m" errors=vm.errors>
                        <Input value=vm.altitud_m input_type=InputType::Number />
                    </FormField>
                    <FormField label="Año de plantación" field="ano_plantacion" errors=vm.errors>
                        <Input value=vm.ano_plantacion input_type=InputType::Number />
                    </FormField>
                    <FormField label="Notas" field="notas" errors=vm.errors>
                        <Textarea value=vm.notas attr:rows=3 />
                    </FormField>
                </div>
            </Card>

            {id.map(|parcela_id| view! {
                <div class="detail-grid">
                    <HarvestCard estimacion=vm.estimacion />
                    // Re-rendered once the plot (and its municipality) has loaded.
                    {move || vm.parcela.get().map(|p| view! { <WeatherCard municipio=p.municipio /> })}
                </div>
                <RegistrosSection parcela_id=parcela_id on_changed=on_registros_changed />
            })}
        </div>
    }
}
