mod state;

use contracts::domain::a002_cliente::aggregate::Cliente;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a002_cliente::api;
use crate::shared::components::form::{confirm, ErrorBanner, LoadingRow};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_opt_text, get_sort_indicator, sort_list, SearchInput, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;
pub use state::ActivoFilter;
use state::create_state;

impl Sortable for Cliente {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "tipo" => self.tipo.as_code().cmp(other.tipo.as_code()),
            "nif" => cmp_opt_text(self.nif.as_deref(), other.nif.as_deref()),
            "ciudad" => cmp_opt_text(self.ciudad.as_deref(), other.ciudad.as_deref()),
            "telefono" => cmp_opt_text(self.telefono.as_deref(), other.telefono.as_deref()),
            _ => self.nombre.to_lowercase().cmp(&other.nombre.to_lowercase()),
        }
    }
}

/// Rows shown for the current search, active filter and sort.
pub fn visible_clientes(
    all: &[Cliente],
    query: &str,
    activo: ActivoFilter,
    sort_field: &str,
    ascending: bool,
) -> Vec<Cliente> {
    let mut rows: Vec<Cliente> = all
        .iter()
        .filter(|c| activo.accepts(c) && c.matches_filter(query))
        .cloned()
        .collect();
    sort_list(&mut rows, sort_field, ascending);
    rows
}

#[component]
pub fn ClientesList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let state = create_state();
    let all_clientes: RwSignal<Vec<Cliente>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let activo_code = RwSignal::new("activos".to_string());

    let refresh_view = move || {
        let items = all_clientes.with_untracked(|all| {
            state.with_untracked(|s| {
                visible_clientes(all, &s.search_query, s.activo, &s.sort_field, s.sort_ascending)
            })
        });
        state.update(|s| s.items = items);
    };

    let load_data = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_clientes(&s).await }).await {
                Ok(data) => {
                    all_clientes.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("clientes: {}", e);
                    error.set(Some(e.user_message("No se pudieron cargar los clientes")));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    // Select -> filter
    Effect::new(move |_| {
        let filter = ActivoFilter::from_code(&activo_code.get());
        if state.with_untracked(|s| s.activo) != filter {
            state.update(|s| s.activo = filter);
            refresh_view();
        }
    });

    let on_search = Callback::new(move |q: String| {
        state.update(|s| s.search_query = q);
        refresh_view();
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
            refresh_view();
        }
    };
    let sort_mark = move |field: &'static str| {
        move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
    };

    let deactivate = move |cliente: Cliente| {
        if !confirm(&format!("¿Dar de baja a {}? Seguirá en los albaranes existentes.", cliente.nombre)) {
            return;
        }
        spawn_local(async move {
            let id = cliente.id;
            match session.call(|s| async move { api::set_activo(&s, id, false).await }).await {
                Ok(()) => {
                    all_clientes.update(|list| {
                        if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                            c.activo = false;
                        }
                    });
                    refresh_view();
                }
                Err(e) => error.set(Some(e.user_message("No se pudo dar de baja al cliente"))),
            }
        });
    };

    let remove = move |cliente: Cliente| {
        if !confirm(&format!("¿Eliminar definitivamente a {}?", cliente.nombre)) {
            return;
        }
        spawn_local(async move {
            let id = cliente.id;
            match session.call(|s| async move { api::delete_cliente(&s, id).await }).await {
                Ok(()) => {
                    log::info!("cliente {} deleted", id);
                    all_clientes.update(|list| list.retain(|c| c.id != id));
                    refresh_view();
                }
                Err(e) => error.set(Some(e.user_message(
                    "No se pudo eliminar el cliente. Si tiene entregas, dalo de baja.",
                ))),
            }
        });
    };

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="a002_cliente--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Clientes"</h1>
                    <Badge>{move || state.with(|s| s.items.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| nav_new("/clientes/nuevo", Default::default())
                    >
                        {icon("plus")}
                        " Nuevo cliente"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <SearchInput
                            value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                            on_change=on_search
                            placeholder="Nombre, NIF, email o ciudad..."
                        />
                        <Select value=activo_code>
                            <option value="activos">"Activos"</option>
                            <option value="inactivos">"Dados de baja"</option>
                            <option value="todos">"Todos"</option>
                        </Select>
                    </Flex>
                </div>

                <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                    <LoadingRow />
                </Show>

                <Show
                    when=move || !state.with(|s| s.is_loaded && s.items.is_empty())
                    fallback=|| view! { <p class="text-muted">"No hay clientes que coincidan."</p> }
                >
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=toggle_sort("nombre")>
                                            "Nombre" {sort_mark("nombre")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=toggle_sort("tipo")>
                                            "Tipo" {sort_mark("tipo")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=toggle_sort("nif")>
                                            "NIF/CIF" {sort_mark("nif")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=toggle_sort("ciudad")>
                                            "Ciudad" {sort_mark("ciudad")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>
                                        <div class="table__sortable-header" on:click=toggle_sort("telefono")>
                                            "Teléfono" {sort_mark("telefono")}
                                        </div>
                                    </TableHeaderCell>
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || state.get().items
                                    key=|c| (c.id, c.activo)
                                    children=move |cliente| {
                                        let href = format!("/clientes/{}", cliente.id);
                                        let edit_href = format!("/clientes/{}?modo=edit", cliente.id);
                                        let for_deactivate = cliente.clone();
                                        let for_delete = cliente.clone();
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <a href=href style="font-weight: 500;">{cliente.nombre.clone()}</a>
                                                        {(!cliente.activo).then(|| view! {
                                                            <span class="badge badge--neutral">" baja"</span>
                                                        })}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{cliente.tipo.label()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{cliente.nif.clone().unwrap_or_default()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{cliente.ciudad.clone().unwrap_or_default()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{cliente.telefono.clone().unwrap_or_default()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Flex gap=FlexGap::Small>
                                                        <a href=edit_href title="Editar">{icon("edit")}</a>
                                                        {cliente.activo.then(|| view! {
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                size=ButtonSize::Small
                                                                on_click=move |_| deactivate(for_deactivate.clone())
                                                                attr:title="Dar de baja"
                                                            >
                                                                {icon("cancel")}
                                                            </Button>
                                                        })}
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            size=ButtonSize::Small
                                                            on_click=move |_| remove(for_delete.clone())
                                                            attr:title="Eliminar"
                                                        >
                                                            {icon("delete")}
                                                        </Button>
                                                    </Flex>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_cliente::aggregate::TipoCliente;

    fn cliente(id: i64, nombre: &str, ciudad: Option<&str>, activo: bool) -> Cliente {
        Cliente {
            id,
            tipo: TipoCliente::Particular,
            nombre: nombre.into(),
            nif: None,
            email: None,
            telefono: None,
            direccion: None,
            codigo_postal: None,
            ciudad: ciudad.map(str::to_string),
            provincia: None,
            notas: None,
            activo,
        }
    }

    #[test]
    fn test_visible_clientes() {
        let all = vec![
            cliente(1, "Vinoteca Zamora", Some("Zamora"), true),
            cliente(2, "Bar Central", Some("Toro"), true),
            cliente(3, "Antiguo Cliente", Some("Zamora"), false),
        ];

        let activos = visible_clientes(&all, "", ActivoFilter::Activos, "nombre", true);
        let ids: Vec<i64> = activos.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let zamora = visible_clientes(&all, "zamora", ActivoFilter::Todos, "nombre", false);
        let ids: Vec<i64> = zamora.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let baja = visible_clientes(&all, "", ActivoFilter::Inactivos, "nombre", true);
        assert_eq!(baja.len(), 1);
        assert_eq!(baja[0].id, 3);
    }

    #[test]
    fn test_activo_filter_codes() {
        assert_eq!(ActivoFilter::from_code("todos"), ActivoFilter::Todos);
        assert_eq!(ActivoFilter::from_code("inactivos"), ActivoFilter::Inactivos);
        assert_eq!(ActivoFilter::from_code(""), ActivoFilter::Activos);
    }
}
