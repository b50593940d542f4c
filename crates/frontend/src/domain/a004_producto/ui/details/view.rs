use contracts::domain::a004_producto::aggregate::{FamiliaMaterial, TipoProducto};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::view_model::ProductoDetailsVm;
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn ProductoDetails(id: Option<i64>, tipo: TipoProducto) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let vm = ProductoDetailsVm::new(tipo);
    if let Some(id) = id {
        vm.load(session, id);
    }

    let on_saved = Callback::new(move |saved: i64| {
        if id.is_none() {
            navigate(&format!("/productos/{}", saved), Default::default());
        }
    });

    let title = move || match (id, vm.producto.get()) {
        (None, _) => "Nuevo producto".to_string(),
        (Some(_), Some(p)) => p.nombre().to_string(),
        (Some(id), None) => format!("Producto {}", id),
    };

    let is_material = move || vm.tipo() == TipoProducto::Material;
    let stock_critical = move || vm.producto.with(|p| p.as_ref().is_some_and(|p| p.is_stock_critical()));

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/productos" back_label="Productos">
                {id.filter(|_| vm.tipo() == TipoProducto::Vino).map(|id| view! {
                    <a class="button button--secondary" href=format!("/recetas?productoId={}", id)>
                        "Receta de embotellado"
                    </a>
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
            <Show when=stock_critical>
                <MessageBar intent=MessageBarIntent::Warning>
                    <div>"Stock igual o inferior al mínimo: conviene reponer."</div>
                </MessageBar>
            </Show>

            <Card>
                <div class="form form--two-columns">
                    <FormField label="Tipo" field="tipo" errors=vm.errors required=true>
                        {if id.is_none() {
                            view! {
                                <Select value=vm.tipo>
                                    <option value=TipoProducto::Vino.as_code()>{TipoProducto::Vino.label()}</option>
                                    <option value=TipoProducto::Material.as_code()>{TipoProducto::Material.label()}</option>
                                </Select>
                            }
                            .into_any()
                        } else {
                            view! {
                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                    {move || vm.tipo().label()}
                                </Badge>
                            }
                            .into_any()
                        }}
                    </FormField>
                    <FormField label="Nombre" field="nombre" errors=vm.errors required=true>
                        <Input value=vm.nombre />
                    </FormField>
                    <FormField label="Descripción" field="descripcion" errors=vm.errors>
                        <Textarea value=vm.descripcion attr:rows=3 />
                    </FormField>

                    <Show
                        when=is_material
                        fallback=move || view! {
                            <FormField label="Variedad" field="variedad" errors=vm.errors>
                                <Input value=vm.variedad placeholder="Tinta de Toro, Verdejo..." />
                            </FormField>
                            <FormField label="Añada" field="anada" errors=vm.errors>
                                <Input value=vm.anada input_type=InputType::Number />
                            </FormField>
                            <FormField label="Precio profesional (€)" field="precio_profesional" errors=vm.errors>
                                <Input value=vm.precio_profesional placeholder="0,00" />
                            </FormField>
                            <FormField label="Precio particular (€)" field="precio_particular" errors=vm.errors>
                                <Input value=vm.precio_particular placeholder="0,00" />
                            </FormField>
                        }
                    >
                        <FormField label="Familia" field="familia" errors=vm.errors required=true>
                            <Select value=vm.familia>
                                {FamiliaMaterial::ALL.into_iter().map(|f| view! {
                                    <option value=f.as_code()>{f.label()}</option>
                                }).collect_view()}
                            </Select>
                        </FormField>
                        <FormField label="Stock (unidades)" field="stock_unidades" errors=vm.errors>
                            <Input value=vm.stock_unidades input_type=InputType::Number />
                        </FormField>
                        <FormField label="Stock mínimo" field="stock_minimo_unidades" errors=vm.errors>
                            <Input value=vm.stock_minimo_unidades input_type=InputType::Number />
                        </FormField>
                    </Show>

                    <FormField label="Estado" field="activo" errors=vm.errors>
                        {if id.is_none() {
                            view! { <Checkbox checked=vm.activo label="Producto activo" /> }.into_any()
                        } else {
                            view! {
                                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                    <span>{move || if vm.activo.get() { "Activo" } else { "Inactivo" }}</span>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        size=ButtonSize::Small
                                        on_click=move |_| {
                                            let activo = vm.activo.get_untracked();
                                            if !activo || confirm("¿Desactivar este producto?") {
                                                vm.set_activo(session, !activo);
                                            }
                                        }
                                    >
                                        {move || if vm.activo.get() { "Desactivar" } else { "Reactivar" }}
                                    </Button>
                                </Flex>
                            }
                            .into_any()
                        }}
                    </FormField>
                </div>
            </Card>
        </div>
    }
}
