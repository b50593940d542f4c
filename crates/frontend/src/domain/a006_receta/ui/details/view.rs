use leptos::prelude::*;
use thaw::*;

use super::view_model::{necesidades, RecetaVm};
use crate::shared::components::form::{ErrorBanner, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::format_thousands;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn RecetaEditor(producto_id: Option<i64>) -> impl IntoView {
    let session = use_session();
    let vm = RecetaVm::new();
    vm.load_catalogs(session);
    vm.producto
        .set(producto_id.map(|id| id.to_string()).unwrap_or_default());

    Effect::new(move |_| {
        if let Some(id) = vm.producto_id() {
            vm.load(session, id);
        }
    });

    let botellas = RwSignal::new("600".to_string());
    let tabla = move || {
        let n = botellas.get().trim().parse::<i64>().unwrap_or(0).max(0);
        vm.materiales.with(|m| necesidades(&vm.current(), n, m))
    };

    view! {
        <PageHeader title="Recetas de embotellado" subtitle="Materiales que consume cada botella">
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.save(session)
                disabled=Signal::derive(move || vm.saving.get() || vm.producto_id().is_none())
            >
                {icon("save")}
                " Guardar receta"
            </Button>
        </PageHeader>

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />

            <div class="form__group">
                <Label>"Vino"</Label>
                <Select value=vm.producto>
                    <option value="">"Selecciona un vino..."</option>
                    {move || vm.vinos.get().into_iter().map(|v| view! {
                        <option value=v.id.to_string()>{v.nombre}</option>
                    }).collect_view()}
                </Select>
            </div>

            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            <Show when=move || vm.producto_id().is_some()>
                <Card>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <h3>"Materiales por botella"</h3>
                        <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=move |_| vm.add_linea()>
                            {icon("plus")}
                            " Añadir material"
                        </Button>
                    </Flex>
                    {move || vm.errors.with(|e| e.get("lineas").map(str::to_string)).map(|m| view! {
                        <div class="form__error">{m}</div>
                    })}
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Material"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad por botella"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || 0..vm.lineas.with(|l| l.len())
                                key=|i| *i
                                children=move |i| view! { <LineaRecetaRow vm=vm index=i /> }
                            />
                        </TableBody>
                    </Table>
                </Card>

                <Card>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <h3>"Simular embotellado de"</h3>
                        <Input value=botellas input_type=InputType::Number />
                        <span>"botellas"</span>
                    </Flex>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Material"</TableHeaderCell>
                                <TableHeaderCell>"Necesario"</TableHeaderCell>
                                <TableHeaderCell>"En stock"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || tabla().into_iter().map(|n| {
                                let falta = n.falta();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{n.nombre}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_thousands(n.necesario.ceil() as i64)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <span class:text-danger=falta>
                                                    {n.stock.map(format_thousands).unwrap_or_else(|| "—".into())}
                                                </span>
                                                {falta.then(|| view! {
                                                    " "
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"Insuficiente"</Badge>
                                                })}
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </Card>
            </Show>
        </div>
    }
}

#[component]
fn LineaRecetaRow(vm: RecetaVm, index: usize) -> impl IntoView {
    let linea = move || vm.lineas.with(|l| l.get(index).cloned().unwrap_or_default());

    view! {
        <TableRow>
            <TableCell>
                <select
                    class="form-select"
                    prop:value=move || linea().material_id.map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| {
                        let id = event_target_value(&ev).parse::<i64>().ok();
                        vm.update_linea(index, |l| l.material_id = id);
                    }
                >
                    <option value="">"Selecciona..."</option>
                    {move || {
                        let chosen = linea().material_id;
                        vm.materiales.get().into_iter().map(|m| view! {
                            <option value=m.id.to_string() selected=Some(m.id) == chosen>
                                {format!("{} ({})", m.nombre, m.familia.label())}
                            </option>
                        }).collect_view()
                    }}
                </select>
            </TableCell>
            <TableCell>
                <input
                    type="text"
                    class="form-input"
                    placeholder="1"
                    prop:value=move || linea().cantidad_por_botella
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.update_linea(index, |l| l.cantidad_por_botella = value);
                    }
                />
            </TableCell>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| vm.remove_linea(index)
                    attr:title="Quitar material"
                >
                    {icon("delete")}
                </Button>
            </TableCell>
        </TableRow>
    }
}
