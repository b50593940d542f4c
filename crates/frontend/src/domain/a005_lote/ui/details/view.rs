use contracts::domain::a005_lote::aggregate::Lote;
use leptos::prelude::*;
use thaw::*;

use super::view_model::LoteDetailsVm;
use crate::shared::components::form::{ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::{format_date, format_optional_date, format_thousands};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn LoteDetails(id: i64) -> impl IntoView {
    let session = use_session();
    let vm = LoteDetailsVm::new();
    vm.load(session, id);

    let title = move || {
        vm.lote
            .get()
            .map(|l| format!("Lote {}", l.codigo))
            .unwrap_or_else(|| format!("Lote {}", id))
    };

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/lotes" back_label="Lotes">
                {()}
            </PageHeader>
        }}

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            {move || vm.lote.get().map(|lote| view! { <LoteCard lote=lote /> })}

            <Card>
                <h3>"Registrar embotellado"</h3>
                <div class="form form--two-columns">
                    <FormField label="Fecha" field="fecha" errors=vm.errors required=true>
                        <input
                            type="date"
                            class="date-input"
                            prop:value=move || vm.fecha.get()
                            on:change=move |ev| vm.fecha.set(event_target_value(&ev))
                        />
                    </FormField>
                    <FormField label="Botellas" field="botellas" errors=vm.errors required=true>
                        <Input value=vm.botellas input_type=InputType::Number />
                    </FormField>
                    <FormField label="Notas" field="notas" errors=vm.errors>
                        <Textarea value=vm.notas attr:rows=2 />
                    </FormField>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.add_embotellado(session)
                    disabled=Signal::derive(move || vm.saving.get())
                >
                    {icon("plus")}
                    " Registrar"
                </Button>
            </Card>

            <h3>"Embotellados"</h3>
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Fecha"</TableHeaderCell>
                            <TableHeaderCell>"Botellas"</TableHeaderCell>
                            <TableHeaderCell>"Notas"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || vm.embotellados.get()
                            key=|e| e.id
                            children=move |e| view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{format_date(e.fecha)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format_thousands(e.botellas)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{e.notas.unwrap_or_default()}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        />
                    </TableBody>
                </Table>
            </div>
            <Show when=move || !vm.loading.get() && vm.embotellados.with(|e| e.is_empty())>
                <p class="text-muted">"Este lote aún no tiene embotellados."</p>
            </Show>
        </div>
    }
}

#[component]
fn LoteCard(lote: Lote) -> impl IntoView {
    view! {
        <Card>
            <div class="detail-row">
                <span class="detail-row__label">"Vino"</span>
                <span class="detail-row__value">
                    <a href=format!("/productos/{}", lote.producto_id)>
                        {lote.producto_nombre.clone().unwrap_or_else(|| format!("Producto {}", lote.producto_id))}
                    </a>
                </span>
            </div>
            <div class="detail-row">
                <span class="detail-row__label">"Añada"</span>
                <span class="detail-row__value">{lote.anada.map(|a| a.to_string()).unwrap_or_else(|| "—".into())}</span>
            </div>
            <div class="detail-row">
                <span class="detail-row__label">"Botellas disponibles"</span>
                <span class="detail-row__value">{format_thousands(lote.botellas_disponibles)}</span>
            </div>
            <div class="detail-row">
                <span class="detail-row__label">"Creado"</span>
                <span class="detail-row__value">{format_optional_date(lote.fecha_creacion)}</span>
            </div>
            {lote.notas.clone().filter(|n| !n.trim().is_empty()).map(|n| view! {
                <div class="detail-row">
                    <span class="detail-row__label">"Notas"</span>
                    <span class="detail-row__value">{n}</span>
                </div>
            })}
        </Card>
    }
}
