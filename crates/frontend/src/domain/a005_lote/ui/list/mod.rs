use contracts::domain::a004_producto::aggregate::{Producto, Vino};
use contracts::domain::a005_lote::aggregate::{friendly_delete_error, Lote, LoteForm};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_producto::api as productos_api;
use crate::domain::a005_lote::api;
use crate::shared::api_utils::ApiError;
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::date_utils::{format_optional_date, format_thousands};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;

/// Backend rejections of a lot deletion in user terms.
pub fn delete_message(err: &ApiError) -> String {
    match err {
        ApiError::Backend { message, .. } => friendly_delete_error(message),
        other => other.user_message("No se pudo eliminar el lote."),
    }
}

/// Active wines, for the lot's product select.
pub fn active_wines(productos: &[Producto]) -> Vec<Vino> {
    let mut vinos: Vec<Vino> = productos
        .iter()
        .filter_map(Producto::as_vino)
        .filter(|v| v.activo)
        .cloned()
        .collect();
    vinos.sort_by(|a, b| a.nombre.to_lowercase().cmp(&b.nombre.to_lowercase()));
    vinos
}

#[component]
pub fn LotesList() -> impl IntoView {
    let session = use_session();
    let lotes: RwSignal<Vec<Lote>> = RwSignal::new(Vec::new());
    let vinos: RwSignal<Vec<Vino>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let show_form = RwSignal::new(false);
    let producto_filter = RwSignal::new(String::new());

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_lotes(&s).await }).await {
                Ok(list) => lotes.set(list),
                Err(e) => {
                    log::error!("lotes: {}", e);
                    error.set(Some(e.user_message("No se pudieron cargar los lotes")));
                }
            }
            loading.set(false);
        });
    };
    load();

    spawn_local(async move {
        match session.call(|s| async move { productos_api::fetch_productos(&s).await }).await {
            Ok(list) => vinos.set(active_wines(&list)),
            Err(e) => log::warn!("vinos for lotes: {}", e),
        }
    });

    let on_delete = move |lote: Lote| {
        if !confirm(&format!("¿Eliminar el lote {}?", lote.codigo)) {
            return;
        }
        error.set(None);
        success.set(None);
        let id = lote.id;
        spawn_local(async move {
            match session.call(|s| async move { api::delete_lote(&s, id).await }).await {
                Ok(()) => {
                    success.set(Some(format!("Lote {} eliminado", lote.codigo)));
                    load();
                }
                Err(e) => {
                    log::warn!("delete lote {}: {}", id, e);
                    error.set(Some(delete_message(&e)));
                }
            }
        });
    };

    let on_created = Callback::new(move |lote: Lote| {
        show_form.set(false);
        success.set(Some(format!("Lote {} creado", lote.codigo)));
        load();
    });

    let visible = move || {
        let filter = producto_filter.get().parse::<i64>().ok();
        lotes
            .get()
            .into_iter()
            .filter(|l| filter.map_or(true, |p| l.producto_id == p))
            .collect::<Vec<_>>()
    };

    view! {
        <PageFrame page_id="a005_lote--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Lotes"</h1>
                    <Badge>{move || lotes.with(|l| l.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_form.update(|v| *v = !*v)
                    >
                        {icon("plus")}
                        " Nuevo lote"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <SuccessBanner message=success />

                <Show when=move || show_form.get()>
                    <LoteCreateForm vinos=vinos on_created=on_created />
                </Show>

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form__group">
                            <Label>"Vino"</Label>
                            <Select value=producto_filter>
                                <option value="">"Todos"</option>
                                {move || vinos.get().into_iter().map(|v| view! {
                                    <option value=v.id.to_string()>{v.nombre}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                    </Flex>
                </div>

                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Código"</TableHeaderCell>
                                <TableHeaderCell>"Vino"</TableHeaderCell>
                                <TableHeaderCell>"Añada"</TableHeaderCell>
                                <TableHeaderCell>"Botellas disponibles"</TableHeaderCell>
                                <TableHeaderCell>"Creado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=visible
                                key=|l| (l.id, l.botellas_disponibles)
                                children=move |lote| {
                                    let row = lote.clone();
                                    let href = format!("/lotes/{}", lote.id);
                                    let codigo = lote.codigo.clone();
                                    let producto = lote.producto_nombre.clone().unwrap_or_else(|| format!("Producto {}", lote.producto_id));
                                    let anada = lote.anada.map(|a| a.to_string()).unwrap_or_default();
                                    let botellas = format_thousands(lote.botellas_disponibles);
                                    let sin_stock = !lote.has_stock();
                                    let fecha_creacion = format_optional_date(lote.fecha_creacion);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href=href style="font-weight: 500;">{codigo}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {producto}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{anada}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {botellas}
                                                    {sin_stock.then(|| view! {
                                                        " "
                                                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Sin stock"</Badge>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{fecha_creacion}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| on_delete(row.clone())
                                                    attr:title="Eliminar lote"
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn LoteCreateForm(vinos: RwSignal<Vec<Vino>>, on_created: Callback<Lote>) -> impl IntoView {
    let session = use_session();
    let producto = RwSignal::new(String::new());
    let codigo = RwSignal::new(String::new());
    let anada = RwSignal::new(String::new());
    let notas = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |_| {
        errors.set(FieldErrors::new());
        error.set(None);
        let form = LoteForm {
            producto_id: producto.get_untracked().parse().ok(),
            codigo: codigo.get_untracked(),
            anada: anada.get_untracked(),
            notas: notas.get_untracked(),
        };
        let validated = form.validate();
        saving.set(true);
        spawn_local(async move {
            let result = submit_validated(validated, |payload| {
                session.call(|s| async move { api::create_lote(&s, &payload).await })
            })
            .await;
            match result {
                Ok(lote) => {
                    log::info!("lote {} created", lote.id);
                    on_created.run(lote);
                }
                Err(SubmitError::Invalid(e)) => {
                    errors.set(e);
                    error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                }
                Err(SubmitError::Rejected(e)) => error.set(Some(e.user_message("No se pudo crear el lote"))),
            }
            saving.set(false);
        });
    };

    view! {
        <Card>
            <h3>"Nuevo lote"</h3>
            <ErrorBanner message=error />
            <div class="form form--two-columns">
                <FormField label="Vino" field="producto" errors=errors required=true>
                    <Select value=producto>
                        <option value="">"Selecciona..."</option>
                        {move || vinos.get().into_iter().map(|v| view! {
                            <option value=v.id.to_string()>{v.nombre}</option>
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="Código" field="codigo" errors=errors required=true>
                    <Input value=codigo placeholder="L-2025-01" />
                </FormField>
                <FormField label="Añada" field="anada" errors=errors>
                    <Input value=anada input_type=InputType::Number />
                </FormField>
                <FormField label="Notas" field="notas" errors=errors>
                    <Textarea value=notas attr:rows=2 />
                </FormField>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=submit
                disabled=Signal::derive(move || saving.get())
            >
                {icon("save")}
                " Crear lote"
            </Button>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_message() {
        let err = ApiError::Backend {
            status: 409,
            message: "El lote tiene stock".into(),
        };
        assert!(delete_message(&err).contains("botellas disponibles"));
        assert_eq!(
            delete_message(&ApiError::Network("timeout".into())),
            "No se pudo eliminar el lote."
        );
    }

    #[test]
    fn test_active_wines() {
        let json = r#"[
            {"tipo":"VINO","id":2,"nombre":"Roble","activo":true},
            {"tipo":"VINO","id":1,"nombre":"crianza","activo":true},
            {"tipo":"VINO","id":3,"nombre":"Viejo","activo":false},
            {"tipo":"MATERIAL","id":4,"nombre":"Corcho"}
        ]"#;
        let productos: Vec<Producto> = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = active_wines(&productos).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
