use contracts::domain::a002_cliente::aggregate::{Cliente, TipoCliente};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::view_model::ClienteDetailsVm;
use crate::shared::components::form::{confirm, ErrorBanner, FormField, LoadingRow, SuccessBanner};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

/// Client page. `id == None` creates; `editing` switches an existing record
/// from the read-only card to the form.
#[component]
pub fn ClienteDetails(id: Option<i64>, editing: bool) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let vm = ClienteDetailsVm::new();
    if let Some(id) = id {
        vm.load(session, id);
    }
    let show_form = id.is_none() || editing;

    let nav_saved = navigate.clone();
    let on_saved = Callback::new(move |saved: i64| {
        nav_saved(&format!("/clientes/{}", saved), Default::default());
    });
    let nav_deleted = navigate.clone();
    let on_deleted = Callback::new(move |_| nav_deleted("/clientes", Default::default()));

    let title = move || match (id, vm.cliente.get()) {
        (None, _) => "Nuevo cliente".to_string(),
        (Some(_), Some(c)) => c.nombre,
        (Some(id), None) => format!("Cliente {}", id),
    };

    let on_delete = move |_| {
        let nombre = vm.nombre.get_untracked();
        if confirm(&format!("¿Eliminar definitivamente a {}?", nombre)) {
            vm.delete(session, on_deleted);
        }
    };

    view! {
        {move || view! {
            <PageHeader title=title() back_href="/clientes" back_label="Clientes">
                {match (id, show_form) {
                    (Some(id), false) => view! {
                        <a class="button button--primary" href=format!("/clientes/{}?modo=edit", id)>
                            {icon("edit")}
                            " Editar"
                        </a>
                    }
                    .into_any(),
                    _ => view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save(session, on_saved)
                            disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                        >
                            {icon("save")}
                            {move || if vm.saving.get() { " Guardando..." } else { " Guardar" }}
                        </Button>
                    }
                    .into_any(),
                }}
            </PageHeader>
        }}

        <div class="page__content">
            <ErrorBanner message=vm.error />
            <SuccessBanner message=vm.success />
            <Show when=move || vm.loading.get()>
                <LoadingRow />
            </Show>

            {if show_form {
                view! { <ClienteForm vm=vm /> }.into_any()
            } else {
                view! {
                    {move || vm.cliente.get().map(|c| view! { <ClienteCard cliente=c /> })}
                    <Flex gap=FlexGap::Small>
                        {move || if vm.activo.get() {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| {
                                        if confirm("¿Dar de baja a este cliente?") {
                                            vm.set_activo(session, false);
                                        }
                                    }
                                >
                                    {icon("cancel")}
                                    " Dar de baja"
                                </Button>
                            }
                            .into_any()
                        } else {
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| vm.set_activo(session, true)
                                >
                                    {icon("check")}
                                    " Reactivar"
                                </Button>
                            }
                            .into_any()
                        }}
                        <Button appearance=ButtonAppearance::Subtle on_click=on_delete>
                            {icon("delete")}
                            " Eliminar"
                        </Button>
                    </Flex>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn ClienteCard(cliente: Cliente) -> impl IntoView {
    let row = |label: &'static str, value: Option<String>| {
        value.filter(|v| !v.trim().is_empty()).map(|v| view! {
            <div class="detail-row">
                <span class="detail-row__label">{label}</span>
                <span class="detail-row__value">{v}</span>
            </div>
        })
    };
    let address = [
        cliente.direccion.clone(),
        cliente.codigo_postal.clone(),
        cliente.ciudad.clone(),
        cliente.provincia.clone(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.trim().is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    view! {
        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {cliente.tipo.label()}
                </Badge>
                {if cliente.activo {
                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Activo"</Badge> }.into_any()
                } else {
                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Dado de baja"</Badge> }.into_any()
                }}
            </Flex>
            {row("NIF/CIF", cliente.nif.clone())}
            {row("Email", cliente.email.clone())}
            {row("Teléfono", cliente.telefono.clone())}
            {row("Dirección", Some(address))}
            {row("Notas", cliente.notas.clone())}
        </Card>
    }
}

#[component]
fn ClienteForm(vm: ClienteDetailsVm) -> impl IntoView {
    view! {
        <Card>
            <div class="form form--two-columns">
                <FormField label="Tipo" field="tipo" errors=vm.errors required=true>
                    <Select value=vm.tipo>
                        <option value=TipoCliente::Empresa.as_code()>{TipoCliente::Empresa.label()}</option>
                        <option value=TipoCliente::Particular.as_code()>{TipoCliente::Particular.label()}</option>
                    </Select>
                </FormField>
                <FormField label="Nombre" field="nombre" errors=vm.errors required=true>
                    <Input value=vm.nombre placeholder="Razón social o nombre completo" />
                </FormField>
                <FormField label="NIF/CIF" field="nif" errors=vm.errors>
                    <Input value=vm.nif placeholder="Obligatorio para empresas" />
                </FormField>
                <FormField label="Email" field="email" errors=vm.errors>
                    <Input value=vm.email input_type=InputType::Email />
                </FormField>
                <FormField label="Teléfono" field="telefono" errors=vm.errors>
                    <Input value=vm.telefono placeholder="600 000 000" />
                </FormField>
                <FormField label="Dirección" field="direccion" errors=vm.errors>
                    <Input value=vm.direccion />
                </FormField>
                <FormField label="Código postal" field="codigo_postal" errors=vm.errors>
                    <Input value=vm.codigo_postal />
                </FormField>
                <FormField label="Ciudad" field="ciudad" errors=vm.errors>
                    <Input value=vm.ciudad />
                </FormField>
                <FormField label="Provincia" field="provincia" errors=vm.errors>
                    <Input value=vm.provincia />
                </FormField>
                <FormField label="Notas" field="notas" errors=vm.errors>
                    <Textarea value=vm.notas attr:rows=3 />
                </FormField>
                <FormField label="Estado" field="activo" errors=vm.errors>
                    <Checkbox checked=vm.activo label="Cliente activo" />
                </FormField>
            </div>
        </Card>
    }
}
