use chrono::NaiveDate;
use contracts::domain::a009_evento::aggregate::TipoEvento;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::view_model::EventoDetailsVm;
use crate::domain::a009_evento::i18n::{t, tipo_label, use_lang, Key};
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn EventoDetails(id: Option<i64>, fecha: NaiveDate) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let lang = use_lang();
    let vm = EventoDetailsVm::new(fecha);
    if let Some(id) = id {
        vm.load(session, id);
    }

    let nav_saved = navigate.clone();
    let on_saved = Callback::new(move |saved: i64| {
        if id.is_none() {
            nav_saved(&format!("/eventos/{}", saved), Default::default());
        }
    });
    let on_deleted = Callback::new(move |_| navigate("/eventos", Default::default()));

    let title = move || match (id, vm.evento.get()) {
        (None, _) => t(lang.get(), Key::NewEvent).to_string(),
        (Some(_), Some(e)) => e.titulo,
        (Some(id), None) => format!("#{}", id),
    };

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/eventos" back_label=t(lang.get(), Key::Back).to_string()>
                {id.map(|_| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            if confirm(t(lang.get_untracked(), Key::ConfirmDelete)) {
                                vm.delete(session, on_deleted);
                            }
                        }
                    >
                        {icon("delete")}
                        {format!(" {}", t(lang.get(), Key::Delete))}
                    </Button>
                })}
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save(session, on_saved)
                    disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                >
                    {icon("save")}
                    {format!(" {}", t(lang.get(), Key::Save))}
                </Button>
            </PageHeader>
        }}

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            {move || {
                let lang = lang.get();
                view! {
                    <Card>
                        <div class="form form--two-columns">
                            <FormField label=t(lang, Key::Titulo) field="titulo" errors=vm.errors required=true>
                                <Input value=vm.titulo />
                            </FormField>
                            <FormField label=t(lang, Key::Tipo) field="tipo" errors=vm.errors required=true>
                                <Select value=vm.tipo>
                                    {TipoEvento::ALL.into_iter().map(|tipo| view! {
                                        <option value=tipo.as_code()>{tipo_label(lang, tipo)}</option>
                                    }).collect_view()}
                                </Select>
                            </FormField>
                            <FormField label=t(lang, Key::Fecha) field="fecha" errors=vm.errors required=true>
                                <input
                                    type="date"
                                    class="date-input"
                                    prop:value=move || vm.fecha.get()
                                    on:change=move |ev| vm.fecha.set(event_target_value(&ev))
                                />
                            </FormField>
                            <FormField label=t(lang, Key::Hora) field="hora" errors=vm.errors>
                                <input
                                    type="time"
                                    class="date-input"
                                    prop:value=move || vm.hora.get()
                                    on:change=move |ev| vm.hora.set(event_target_value(&ev))
                                />
                            </FormField>
                            <FormField label=t(lang, Key::Ubicacion) field="ubicacion" errors=vm.errors>
                                <Input value=vm.ubicacion />
                            </FormField>
                            <FormField label=t(lang, Key::Descripcion) field="descripcion" errors=vm.errors>
                                <Textarea value=vm.descripcion attr:rows=4 />
                            </FormField>
                        </div>
                    </Card>
                }
            }}
        </div>
    }
}
