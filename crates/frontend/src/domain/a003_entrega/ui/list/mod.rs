use contracts::domain::a002_cliente::aggregate::Cliente;
use contracts::domain::a003_entrega::aggregate::{Entrega, EntregaFilter, EstadoEntrega};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a002_cliente::api as clientes_api;
use crate::domain::a003_entrega::api;
use crate::shared::components::form::{ErrorBanner, LoadingRow};
use crate::shared::date_utils::{format_date, format_money, parse_input};
use crate::shared::icons::icon;
use crate::shared::list_utils::Debouncer;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;

const FILTER_DEBOUNCE_MS: i32 = 500;

/// Filter from the raw control values; blanks and garbage are ignored.
pub fn build_filter(estado: &str, cliente: &str, desde: &str, hasta: &str) -> EntregaFilter {
    EntregaFilter {
        estado: EstadoEntrega::from_code(estado),
        cliente_id: cliente.trim().parse().ok(),
        desde: parse_input(desde),
        hasta: parse_input(hasta),
    }
}

#[component]
pub fn EntregasList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let entregas: RwSignal<Vec<Entrega>> = RwSignal::new(Vec::new());
    let clientes: RwSignal<Vec<Cliente>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let estado = RwSignal::new(String::new());
    let cliente = RwSignal::new(String::new());
    let desde = RwSignal::new(String::new());
    let hasta = RwSignal::new(String::new());

    let debouncer = Debouncer::new(FILTER_DEBOUNCE_MS);

    let load = move |filter: EntregaFilter| {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_entregas(&s, &filter).await }).await {
                Ok(data) => entregas.set(data),
                Err(e) => {
                    log::error!("entregas: {}", e);
                    error.set(Some(e.user_message("No se pudieron cargar las entregas")));
                }
            }
            loading.set(false);
        });
    };

    // First run fetches at once; later filter edits wait for the debounce.
    Effect::new(move |prev: Option<()>| {
        let filter = build_filter(&estado.get(), &cliente.get(), &desde.get(), &hasta.get());
        if prev.is_none() {
            load(filter);
        } else {
            debouncer.schedule(move || load(filter));
        }
    });

    spawn_local(async move {
        match session.call(|s| async move { clientes_api::fetch_clientes(&s).await }).await {
            Ok(list) => clientes.set(list),
            Err(e) => log::warn!("clientes for filter: {}", e),
        }
    });

    let clear = move |_| {
        estado.set(String::new());
        cliente.set(String::new());
        desde.set(String::new());
        hasta.set(String::new());
    };

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="a003_entrega--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Entregas"</h1>
                    <Badge>{move || entregas.with(|e| e.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| nav_new("/entregas/nueva", Default::default())
                    >
                        {icon("plus")}
                        " Nueva entrega"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form__group">
                            <Label>"Estado"</Label>
                            <Select value=estado>
                                <option value="">"Todos"</option>
                                {EstadoEntrega::ALL.into_iter().map(|e| view! {
                                    <option value=e.as_code()>{e.label()}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"Cliente"</Label>
                            <Select value=cliente>
                                <option value="">"Todos"</option>
                                {move || clientes.get().into_iter().map(|c| view! {
                                    <option value=c.id.to_string()>{c.nombre}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"Desde"</Label>
                            <input
                                type="date"
                                class="date-input"
                                prop:value=move || desde.get()
                                on:change=move |ev| desde.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <Label>"Hasta"</Label>
                            <input
                                type="date"
                                class="date-input"
                                prop:value=move || hasta.get()
                                on:change=move |ev| hasta.set(event_target_value(&ev))
                            />
                        </div>
                        <Button appearance=ButtonAppearance::Subtle on_click=clear>
                            {icon("x")}
                            " Limpiar"
                        </Button>
                    </Flex>
                </div>

                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Número"</TableHeaderCell>
                                <TableHeaderCell>"Fecha"</TableHeaderCell>
                                <TableHeaderCell>"Cliente"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>"Botellas"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || entregas.get()
                                key=|e| (e.id, e.estado)
                                children=move |entrega| {
                                    let href = format!("/entregas/{}", entrega.id);
                                    let total = entrega.total().map(format_money).unwrap_or_else(|| "—".to_string());
                                    let display_number = entrega.display_number();
                                    let fecha = format_date(entrega.fecha);
                                    let cliente = entrega.cliente_nombre.clone().unwrap_or_else(|| format!("Cliente {}", entrega.cliente_id));
                                    let badge_class = entrega.estado.badge_class();
                                    let estado_label = entrega.estado.label();
                                    let total_botellas = entrega.total_botellas();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href=href style="font-weight: 500;">{display_number}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{fecha}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {cliente}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=badge_class>{estado_label}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total_botellas}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
                <Show when=move || !loading.get() && entregas.with(|e| e.is_empty())>
                    <p class="text-muted">"No hay entregas con estos filtros."</p>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_build_filter() {
        let empty = build_filter("", "", "", "");
        assert_eq!(empty, EntregaFilter::default());

        let f = build_filter("CONFIRMADO", "12", "2025-09-01", "no-date");
        assert_eq!(f.estado, Some(EstadoEntrega::Confirmado));
        assert_eq!(f.cliente_id, Some(12));
        assert_eq!(f.desde, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(f.hasta, None);
    }
}
