use contracts::domain::a004_producto::aggregate::{Material, Producto, TipoProducto, Vino};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a004_producto::api;
use crate::shared::components::form::{confirm, ErrorBanner, LoadingRow, SuccessBanner};
use crate::shared::date_utils::{format_money, format_thousands};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;

/// Products of one tab, name-sorted. Critical materials go first.
pub fn visible_productos(
    all: &[Producto],
    tipo: TipoProducto,
    query: &str,
    solo_activos: bool,
) -> Vec<Producto> {
    let query = query.trim().to_lowercase();
    let mut rows: Vec<Producto> = all
        .iter()
        .filter(|p| p.tipo() == tipo)
        .filter(|p| !solo_activos || p.activo())
        .filter(|p| query.is_empty() || p.nombre().to_lowercase().contains(&query))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        b.is_stock_critical()
            .cmp(&a.is_stock_critical())
            .then_with(|| a.nombre().to_lowercase().cmp(&b.nombre().to_lowercase()))
    });
    rows
}

fn price(p: Option<f64>) -> String {
    p.map(format_money).unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn ProductosList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let all: RwSignal<Vec<Producto>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let tab = RwSignal::new(TipoProducto::Vino.as_code().to_string());
    let search = RwSignal::new(String::new());
    let solo_activos = RwSignal::new(true);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_productos(&s).await }).await {
                Ok(list) => all.set(list),
                Err(e) => {
                    log::error!("productos: {}", e);
                    error.set(Some(e.user_message("No se pudieron cargar los productos")));
                }
            }
            loading.set(false);
        });
    };
    load();

    let toggle_activo = Callback::new(move |(id, nombre, activo): (i64, String, bool)| {
        if !activo && !confirm(&format!("¿Desactivar {}?", nombre)) {
            return;
        }
        spawn_local(async move {
            match session.call(|s| async move { api::set_activo(&s, id, activo).await }).await {
                Ok(()) => {
                    success.set(Some(format!(
                        "{} {}",
                        nombre,
                        if activo { "reactivado" } else { "desactivado" }
                    )));
                    load();
                }
                Err(e) => error.set(Some(e.user_message("No se pudo cambiar el estado"))),
            }
        });
    });

    let rows = Memo::new(move |_| {
        let tipo = TipoProducto::from_code(&tab.get()).unwrap_or_default();
        all.with(|all| visible_productos(all, tipo, &search.get(), solo_activos.get()))
    });
    let critical_count = Memo::new(move |_| all.with(|all| {
        all.iter().filter(|p| p.activo() && p.is_stock_critical()).count()
    }));

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="a004_producto--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Productos"</h1>
                    <Show when=move || { critical_count.get() > 0 }>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                            {move || format!("{} materiales bajo mínimo", critical_count.get())}
                        </Badge>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| {
                            let url = format!("/productos/nuevo?tipo={}", tab.get_untracked());
                            nav_new(&url, Default::default());
                        }
                    >
                        {icon("plus")}
                        " Nuevo producto"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <SuccessBanner message=success />

                <Flex gap=FlexGap::Large align=FlexAlign::Center>
                    <TabList selected_value=tab>
                        <Tab value=TipoProducto::Vino.as_code()>"Vinos"</Tab>
                        <Tab value=TipoProducto::Material.as_code()>"Materiales"</Tab>
                    </TabList>
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| search.set(v))
                        placeholder="Buscar por nombre..."
                    />
                    <Switch checked=solo_activos label="Solo activos" />
                </Flex>

                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                {move || {
                    let tipo = TipoProducto::from_code(&tab.get()).unwrap_or_default();
                    match tipo {
                        TipoProducto::Vino => view! {
                            <VinosTable rows=rows toggle=toggle_activo />
                        }.into_any(),
                        TipoProducto::Material => view! {
                            <MaterialesTable rows=rows toggle=toggle_activo />
                        }.into_any(),
                    }
                }}

                <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                    <p class="text-muted">"No hay productos que mostrar."</p>
                </Show>
            </div>
        </PageFrame>
    }
}

fn activo_button(
    id: i64,
    nombre: String,
    activo: bool,
    toggle: Callback<(i64, String, bool)>,
) -> impl IntoView {
    view! {
        <Button
            appearance=ButtonAppearance::Subtle
            size=ButtonSize::Small
            on_click=move |_| toggle.run((id, nombre.clone(), !activo))
        >
            {if activo { "Desactivar" } else { "Reactivar" }}
        </Button>
    }
}

#[component]
fn VinosTable(
    rows: Memo<Vec<Producto>>,
    toggle: Callback<(i64, String, bool)>,
) -> impl IntoView {
    let vinos = move || {
        rows.get()
            .into_iter()
            .filter_map(|p| p.as_vino().cloned())
            .collect::<Vec<Vino>>()
    };
    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Nombre"</TableHeaderCell>
                        <TableHeaderCell>"Variedad"</TableHeaderCell>
                        <TableHeaderCell>"Añada"</TableHeaderCell>
                        <TableHeaderCell>"P. profesional"</TableHeaderCell>
                        <TableHeaderCell>"P. particular"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=vinos
                        key=|v| (v.id, v.activo)
                        children=move |v| {
                            let href = format!("/productos/{}", v.id);
                            let nombre = v.nombre.clone();
                            let inactivo = !v.activo;
                            let variedad = v.variedad.clone().unwrap_or_default();
                            let anada = v.anada.map(|a| a.to_string()).unwrap_or_default();
                            let precio_profesional = price(v.precio_profesional);
                            let precio_particular = price(v.precio_particular);
                            let receta_href = format!("/recetas?productoId={}", v.id);
                            let (btn_id, btn_nombre, btn_activo) = (v.id, v.nombre.clone(), v.activo);
                            view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        <a href=href>{nombre}</a>
                                        {inactivo.then(|| view! {
                                            " "
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Inactivo"</Badge>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{variedad}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{anada}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{precio_profesional}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{precio_particular}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Flex gap=FlexGap::Small>
                                        <a class="button button--secondary" href=receta_href>
                                            "Receta"
                                        </a>
                                        {activo_button(btn_id, btn_nombre, btn_activo, toggle)}
                                    </Flex>
                                </TableCell>
                            </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}

#[component]
fn MaterialesTable(
    rows: Memo<Vec<Producto>>,
    toggle: Callback<(i64, String, bool)>,
) -> impl IntoView {
    let materiales = move || {
        rows.get()
            .into_iter()
            .filter_map(|p| p.as_material().cloned())
            .collect::<Vec<Material>>()
    };
    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Nombre"</TableHeaderCell>
                        <TableHeaderCell>"Familia"</TableHeaderCell>
                        <TableHeaderCell>"Stock"</TableHeaderCell>
                        <TableHeaderCell>"Mínimo"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=materiales
                        key=|m| (m.id, m.activo, m.stock_unidades)
                        children=move |m| {
                            let critical = m.is_stock_critical();
                            let href = format!("/productos/{}", m.id);
                            let nombre = m.nombre.clone();
                            let inactivo = !m.activo;
                            let familia = m.familia.label();
                            let stock = format_thousands(m.stock_unidades);
                            let stock_minimo = format_thousands(m.stock_minimo_unidades);
                            let (btn_id, btn_nombre, btn_activo) = (m.id, m.nombre.clone(), m.activo);
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            <a href=href>{nombre}</a>
                                            {inactivo.then(|| view! {
                                                " "
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Inactivo"</Badge>
                                            })}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{familia}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span class:text-danger=critical>{stock}</span>
                                            {critical.then(|| view! {
                                                " "
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Stock crítico"</Badge>
                                            })}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{stock_minimo}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        {activo_button(btn_id, btn_nombre, btn_activo, toggle)}
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_producto::aggregate::FamiliaMaterial;

    fn vino(id: i64, nombre: &str, activo: bool) -> Producto {
        Producto::Vino(Vino {
            id,
            nombre: nombre.into(),
            descripcion: None,
            variedad: Some("Tinta de Toro".into()),
            anada: Some(2021),
            precio_profesional: Some(8.0),
            precio_particular: Some(12.0),
            activo,
        })
    }

    fn material(id: i64, nombre: &str, stock: i64, minimo: i64) -> Producto {
        Producto::Material(Material {
            id,
            nombre: nombre.into(),
            descripcion: None,
            familia: FamiliaMaterial::Botella,
            stock_unidades: stock,
            stock_minimo_unidades: minimo,
            activo: true,
        })
    }

    #[test]
    fn test_visible_productos_by_tab_and_activo() {
        let all = vec![
            vino(1, "Toro Roble", true),
            vino(2, "Crianza", false),
            material(3, "Botella", 500, 100),
        ];
        let vinos = visible_productos(&all, TipoProducto::Vino, "", true);
        assert_eq!(vinos.len(), 1);
        assert_eq!(vinos[0].id(), 1);

        let todos = visible_productos(&all, TipoProducto::Vino, "", false);
        assert_eq!(todos.iter().map(Producto::id).collect::<Vec<_>>(), vec![2, 1]);

        let buscados = visible_productos(&all, TipoProducto::Vino, "ROBLE", false);
        assert_eq!(buscados.len(), 1);
    }

    #[test]
    fn test_critical_materials_first() {
        let all = vec![
            material(1, "Botella bordelesa", 500, 100),
            material(2, "Corcho", 10, 100),
            material(3, "Caja 6", 900, 50),
        ];
        let rows = visible_productos(&all, TipoProducto::Material, "", true);
        assert_eq!(rows.iter().map(Producto::id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }
}
