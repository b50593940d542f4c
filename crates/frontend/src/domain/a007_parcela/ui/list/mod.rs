use contracts::domain::a007_parcela::aggregate::Parcela;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a007_parcela::api;
use crate::shared::components::form::{ErrorBanner, LoadingRow};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_opt_text, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;

impl Searchable for Parcela {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        [Some(self.nombre.as_str()), self.variedad.as_deref(), self.municipio.as_deref()]
            .into_iter()
            .flatten()
            .any(|v| v.to_lowercase().contains(&filter))
    }
}

impl Sortable for Parcela {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "variedad" => cmp_opt_text(self.variedad.as_deref(), other.variedad.as_deref()),
            "municipio" => cmp_opt_text(self.municipio.as_deref(), other.municipio.as_deref()),
            "superficie" => self
                .superficie_ha
                .partial_cmp(&other.superficie_ha)
                .unwrap_or(Ordering::Equal),
            "altitud" => self.altitud_m.cmp(&other.altitud_m),
            _ => self.nombre.to_lowercase().cmp(&other.nombre.to_lowercase()),
        }
    }
}

/// Hectares of the plots that declare a surface.
pub fn total_hectareas(parcelas: &[Parcela]) -> f64 {
    parcelas.iter().filter_map(|p| p.superficie_ha).sum()
}

#[component]
pub fn ParcelasList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let all: RwSignal<Vec<Parcela>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("nombre".to_string());
    let sort_ascending = RwSignal::new(true);

    loading.set(true);
    spawn_local(async move {
        match session.call(|s| async move { api::fetch_parcelas(&s).await }).await {
            Ok(list) => all.set(list),
            Err(e) => {
                log::error!("parcelas: {}", e);
                error.set(Some(e.user_message("No se pudieron cargar las parcelas")));
            }
        }
        loading.set(false);
    });

    let rows = Memo::new(move |_| {
        let mut rows = filter_list(all.get(), &search.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|a| *a = !*a);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };
    let indicator = move |field: &'static str| get_sort_indicator(&sort_field.get(), field, sort_ascending.get());

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="a007_parcela--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Parcelas"</h1>
                    <Badge>{move || format!("{} · {:.2} ha", rows.with(|r| r.len()), rows.with(|r| total_hectareas(r)))}</Badge>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Nombre, variedad o municipio..."
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| nav_new("/parcelas/nueva", Default::default())
                    >
                        {icon("plus")}
                        " Nueva parcela"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("nombre")>
                                        "Nombre" {move || indicator("nombre")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("variedad")>
                                        "Variedad" {move || indicator("variedad")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("municipio")>
                                        "Municipio" {move || indicator("municipio")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("superficie")>
                                        "Superficie" {move || indicator("superficie")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("altitud")>
                                        "Altitud" {move || indicator("altitud")}
                                    </div>
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|p| p.id
                                children=move |p| view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a href=format!("/parcelas/{}", p.id) style="font-weight: 500;">{p.nombre.clone()}</a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.variedad.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.municipio.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.superficie_ha.map(|s| format!("{:.2} ha", s)).unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.altitud_m.map(|a| format!("{} m", a)).unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
                <Show when=move || !loading.get() && all.with(|a| a.is_empty())>
                    <p class="text-muted">"Aún no hay parcelas. Da de alta la primera."</p>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcela(id: i64, nombre: &str, superficie: Option<f64>, municipio: Option<&str>) -> Parcela {
        Parcela {
            id,
            nombre: nombre.into(),
            superficie_ha: superficie,
            altitud_m: None,
            variedad: Some("Tinta de Toro".into()),
            municipio: municipio.map(Into::into),
            ano_plantacion: None,
            notas: None,
        }
    }

    #[test]
    fn test_search_and_total() {
        let all = vec![
            parcela(1, "El Pago", Some(2.5), Some("Toro")),
            parcela(2, "La Cuesta", None, Some("Morales de Toro")),
            parcela(3, "Valdefinjas", Some(1.25), None),
        ];
        assert_eq!(total_hectareas(&all), 3.75);
        let found = filter_list(all.clone(), "toro");
        assert_eq!(found.len(), 3);
        let found = filter_list(all, "cuesta");
        assert_eq!(found[0].id, 2);
    }
}
