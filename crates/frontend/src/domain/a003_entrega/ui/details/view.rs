use contracts::domain::a003_entrega::aggregate::Entrega;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::view_model::EntregaDetailsVm;
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::{format_date, format_money};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn EntregaDetails(id: Option<i64>) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let vm = EntregaDetailsVm::new();
    vm.load_catalogs(session);
    if let Some(id) = id {
        vm.load(session, id);
    }

    let on_saved = Callback::new(move |saved: i64| {
        navigate(&format!("/entregas/{}", saved), Default::default());
    });

    let title = move || match (id, vm.entrega.get()) {
        (None, _) => "Nueva entrega".to_string(),
        (Some(_), Some(e)) => format!("Entrega {}", e.display_number()),
        (Some(id), None) => format!("Entrega {}", id),
    };

    let actions = move || {
        vm.entrega
            .get()
            .map(|e| e.estado.available_actions())
            .unwrap_or_default()
    };

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/entregas" back_label="Entregas">
                {vm.entrega.get().map(|e| view! {
                    <span class=e.estado.badge_class()>{e.estado.label()}</span>
                })}
                {actions().into_iter().map(|accion| view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            if confirm(accion.confirm_message()) {
                                vm.apply_action(session, accion);
                            }
                        }
                        disabled=Signal::derive(move || vm.saving.get())
                    >
                        {accion.label()}
                    </Button>
                }).collect_view()}
                {vm.is_editable().then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save(session, on_saved)
                        disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                    >
                        {icon("save")}
                        {move || if vm.saving.get() { " Guardando..." } else { " Guardar borrador" }}
                    </Button>
                })}
            </PageHeader>
        }}

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            <Show
                when=move || vm.is_editable()
                fallback=move || vm.entrega.get().map(|e| view! { <EntregaCard entrega=e /> })
            >
                <EntregaForm vm=vm />
            </Show>
        </div>
    }
}

#[component]
fn EntregaForm(vm: EntregaDetailsVm) -> impl IntoView {
    let line_count = move || vm.lineas.with(|l| l.len());

    view! {
        <Card>
            <div class="form form--two-columns">
                <FormField label="Cliente" field="cliente" errors=vm.errors required=true>
                    <Select value=vm.cliente>
                        <option value="">"Selecciona..."</option>
                        {move || vm.clientes.get().into_iter().map(|c| view! {
                            <option value=c.id.to_string()>{c.nombre}</option>
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="Fecha" field="fecha" errors=vm.errors required=true>
                    <input
                        type="date"
                        class="date-input"
                        prop:value=move || vm.fecha.get()
                        on:change=move |ev| vm.fecha.set(event_target_value(&ev))
                    />
                </FormField>
                <FormField label="Precios" field="incluir_precios" errors=vm.errors>
                    <Checkbox checked=vm.incluir_precios label="Incluir precios en el albarán" />
                </FormField>
                <FormField label="Observaciones" field="observaciones" errors=vm.errors>
                    <Textarea value=vm.observaciones attr:rows=2 />
                </FormField>
            </div>
        </Card>

        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <h3>"Líneas"</h3>
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=move |_| vm.add_linea()>
                    {icon("plus")}
                    " Añadir línea"
                </Button>
            </Flex>
            {move || vm.errors.with(|e| e.get("lineas").map(str::to_string)).map(|m| view! {
                <div class="form__error">{m}</div>
            })}
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Vino"</TableHeaderCell>
                        <TableHeaderCell>"Lote"</TableHeaderCell>
                        <TableHeaderCell>"Botellas"</TableHeaderCell>
                        <Show when=move || vm.incluir_precios.get()>
                            <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                        </Show>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || 0..line_count()
                        key=|i| *i
                        children=move |i| view! { <LineaRow vm=vm index=i /> }
                    />
                </TableBody>
            </Table>
            {move || {
                let (botellas, total) = vm.totals();
                view! {
                    <div class="totals-row">
                        <span>{format!("Total botellas: {}", botellas)}</span>
                        {total.map(|t| view! { <strong>{format!(" · Importe: {}", format_money(t))}</strong> })}
                    </div>
                }
            }}
        </Card>
    }
}

/// Editor for line `index`; reads the line back on every change so removing
/// an earlier line shifts the values into place.
#[component]
fn LineaRow(vm: EntregaDetailsVm, index: usize) -> impl IntoView {
    let linea = move || vm.lineas.with(|l| l.get(index).cloned().unwrap_or_default());

    let opt_id = |value: String| value.parse::<i64>().ok();

    view! {
        <TableRow>
            <TableCell>
                <select
                    class="form-select"
                    prop:value=move || linea().producto_id.map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| vm.set_producto(index, opt_id(event_target_value(&ev)))
                >
                    <option value="">"Selecciona..."</option>
                    {move || {
                        let chosen = linea().producto_id;
                        vm.vinos.get().into_iter().map(|v| view! {
                            <option value=v.id.to_string() selected=Some(v.id) == chosen>{v.nombre}</option>
                        }).collect_view()
                    }}
                </select>
            </TableCell>
            <TableCell>
                <select
                    class="form-select"
                    prop:value=move || linea().lote_id.map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| {
                        let lote_id = opt_id(event_target_value(&ev));
                        vm.update_linea(index, |l| l.lote_id = lote_id);
                    }
                >
                    <option value="">"Sin lote"</option>
                    {move || {
                        let current = linea();
                        vm.lotes_for(current.producto_id, current.lote_id).into_iter().map(|l| view! {
                            <option value=l.id.to_string() selected=Some(l.id) == current.lote_id>
                                {format!("{} ({} bot.)", l.codigo, l.botellas_disponibles)}
                            </option>
                        }).collect_view()
                    }}
                </select>
            </TableCell>
            <TableCell>
                <input
                    type="number"
                    min="1"
                    class="form-input"
                    prop:value=move || linea().cantidad
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.update_linea(index, |l| l.cantidad = value);
                    }
                />
            </TableCell>
            <Show when=move || vm.incluir_precios.get()>
                <TableCell>
                    <input
                        type="text"
                        class="form-input"
                        placeholder="0,00"
                        prop:value=move || linea().precio_unitario
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.update_linea(index, |l| l.precio_unitario = value);
                        }
                    />
                </TableCell>
            </Show>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_linea(index)
                    attr:title="Quitar línea"
                >
                    {icon("delete")}
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[component]
fn EntregaCard(entrega: Entrega) -> impl IntoView {
    let con_precios = entrega.incluir_precios;
    let total = entrega.total();
    let botellas = entrega.total_botellas();
    view! {
        <Card>
            <div class="detail-row">
                <span class="detail-row__label">"Cliente"</span>
                <span class="detail-row__value">
                    <a href=format!("/clientes/{}", entrega.cliente_id)>
                        {entrega.cliente_nombre.clone().unwrap_or_else(|| format!("Cliente {}", entrega.cliente_id))}
                    </a>
                </span>
            </div>
            <div class="detail-row">
                <span class="detail-row__label">"Fecha"</span>
                <span class="detail-row__value">{format_date(entrega.fecha)}</span>
            </div>
            {entrega.observaciones.clone().filter(|o| !o.trim().is_empty()).map(|o| view! {
                <div class="detail-row">
                    <span class="detail-row__label">"Observaciones"</span>
                    <span class="detail-row__value">{o}</span>
                </div>
            })}
        </Card>
        <Card>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Vino"</TableHeaderCell>
                        <TableHeaderCell>"Lote"</TableHeaderCell>
                        <TableHeaderCell>"Botellas"</TableHeaderCell>
                        {con_precios.then(|| view! {
                            <TableHeaderCell>"Precio"</TableHeaderCell>
                            <TableHeaderCell>"Importe"</TableHeaderCell>
                        })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {entrega.lineas.iter().map(|l| {
                        let importe = l.importe();
                        let precio = l.precio_unitario;
                        let producto = l.producto_nombre.clone().unwrap_or_else(|| format!("Producto {}", l.producto_id));
                        let lote_codigo = l.lote_codigo.clone().unwrap_or_default();
                        let cantidad = l.cantidad;
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        {producto}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{lote_codigo}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{cantidad}</TableCellLayout>
                                </TableCell>
                                {con_precios.then(|| view! {
                                    <TableCell>
                                        <TableCellLayout>{precio.map(format_money).unwrap_or_default()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{importe.map(format_money).unwrap_or_default()}</TableCellLayout>
                                    </TableCell>
                                })}
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <div class="totals-row">
                <span>{format!("Total botellas: {}", botellas)}</span>
                {total.map(|t| view! { <strong>{format!(" · Importe: {}", format_money(t))}</strong> })}
            </div>
        </Card>
    }
}
