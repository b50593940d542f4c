use contracts::domain::a007_parcela::registro::{RegistroForm, RegistroVinedo, TipoRegistro};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_parcela::api;
use crate::shared::components::form::{confirm, ErrorBanner, FormField};
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::system::auth::context::{use_session, SessionContext};

/// Newest first; same-day records keep the backend order.
pub fn sort_registros(registros: &mut [RegistroVinedo]) {
    registros.sort_by(|a, b| b.fecha.cmp(&a.fecha));
}

#[derive(Clone, Copy)]
struct RegistroVm {
    tipo: RwSignal<String>,
    fecha: RwSignal<String>,
    observaciones: RwSignal<String>,
    labor: RwSignal<String>,
    horas: RwSignal<String>,
    producto: RwSignal<String>,
    dosis: RwSignal<String>,
    unidad_dosis: RwSignal<String>,
    plazo_seguridad_dias: RwSignal<String>,
    grado_brix: RwSignal<String>,
    acidez_total: RwSignal<String>,
    ph: RwSignal<String>,
    kilos: RwSignal<String>,
    grado_probable: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    saving: RwSignal<bool>,
}

impl RegistroVm {
    fn new() -> Self {
        let vm = Self {
            tipo: RwSignal::new(String::new()),
            fecha: RwSignal::new(String::new()),
            observaciones: RwSignal::new(String::new()),
            labor: RwSignal::new(String::new()),
            horas: RwSignal::new(String::new()),
            producto: RwSignal::new(String::new()),
            dosis: RwSignal::new(String::new()),
            unidad_dosis: RwSignal::new(String::new()),
            plazo_seguridad_dias: RwSignal::new(String::new()),
            grado_brix: RwSignal::new(String::new()),
            acidez_total: RwSignal::new(String::new()),
            ph: RwSignal::new(String::new()),
            kilos: RwSignal::new(String::new()),
            grado_probable: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            saving: RwSignal::new(false),
        };
        vm.apply(RegistroForm::new(TipoRegistro::Labor, today()));
        vm
    }

    fn tipo(&self) -> TipoRegistro {
        TipoRegistro::from_code(&self.tipo.get())
    }

    fn apply(&self, form: RegistroForm) {
        self.tipo.set(form.tipo.as_code().to_string());
        self.fecha.set(form.fecha);
        self.observaciones.set(form.observaciones);
        self.labor.set(form.labor);
        self.horas.set(form.horas);
        self.producto.set(form.producto);
        self.dosis.set(form.dosis);
        self.unidad_dosis.set(form.unidad_dosis);
        self.plazo_seguridad_dias.set(form.plazo_seguridad_dias);
        self.grado_brix.set(form.grado_brix);
        self.acidez_total.set(form.acidez_total);
        self.ph.set(form.ph);
        self.kilos.set(form.kilos);
        self.grado_probable.set(form.grado_probable);
    }

    fn form(&self) -> RegistroForm {
        RegistroForm {
            tipo: TipoRegistro::from_code(&self.tipo.get_untracked()),
            fecha: self.fecha.get_untracked(),
            observaciones: self.observaciones.get_untracked(),
            labor: self.labor.get_untracked(),
            horas: self.horas.get_untracked(),
            producto: self.producto.get_untracked(),
            dosis: self.dosis.get_untracked(),
            unidad_dosis: self.unidad_dosis.get_untracked(),
            plazo_seguridad_dias: self.plazo_seguridad_dias.get_untracked(),
            grado_brix: self.grado_brix.get_untracked(),
            acidez_total: self.acidez_total.get_untracked(),
            ph: self.ph.get_untracked(),
            kilos: self.kilos.get_untracked(),
            grado_probable: self.grado_probable.get_untracked(),
        }
    }

    /// Keep the chosen type, clear the rest.
    fn reset(&self) {
        let tipo = TipoRegistro::from_code(&self.tipo.get_untracked());
        self.apply(RegistroForm::new(tipo, today()));
        self.errors.set(FieldErrors::new());
    }
}

/// Vineyard log of one plot: add records per type, list and delete them.
/// `on_changed` fires after every write so the harvest estimate can refresh.
#[component]
pub fn RegistrosSection(parcela_id: i64, on_changed: Callback<()>) -> impl IntoView {
    let session = use_session();
    let registros: RwSignal<Vec<RegistroVinedo>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let vm = RegistroVm::new();

    let load = move |session: SessionContext| {
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_registros(&s, parcela_id).await }).await {
                Ok(mut list) => {
                    sort_registros(&mut list);
                    registros.set(list);
                }
                Err(e) => {
                    log::error!("registros of parcela {}: {}", parcela_id, e);
                    error.set(Some(e.user_message("No se pudieron cargar los registros")));
                }
            }
        });
    };
    load(session);

    let submit = move |_| {
        error.set(None);
        vm.errors.set(FieldErrors::new());
        let validated = vm.form().validate(today());
        vm.saving.set(true);
        spawn_local(async move {
            let result = submit_validated(validated, |payload| {
                session.call(move |s| async move { api::create_registro(&s, parcela_id, &payload).await })
            })
            .await;
            match result {
                Ok(created) => {
                    log::info!("registro {} added to parcela {}", created.id, parcela_id);
                    vm.reset();
                    load(session);
                    on_changed.run(());
                }
                Err(SubmitError::Invalid(errors)) => {
                    vm.errors.set(errors);
                    error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                }
                Err(SubmitError::Rejected(e)) => {
                    error.set(Some(e.user_message("No se pudo guardar el registro")));
                }
            }
            vm.saving.set(false);
        });
    };

    let remove = move |registro_id: i64| {
        if !confirm("¿Eliminar este registro?") {
            return;
        }
        spawn_local(async move {
            match session
                .call(|s| async move { api::delete_registro(&s, parcela_id, registro_id).await })
                .await
            {
                Ok(()) => {
                    load(session);
                    on_changed.run(());
                }
                Err(e) => error.set(Some(e.user_message("No se pudo eliminar el registro"))),
            }
        });
    };

    view! {
        <Card>
            <h3>"Cuaderno de campo"</h3>
            <ErrorBanner message=error />

            <TabList selected_value=vm.tipo>
                {TipoRegistro::ALL.into_iter().map(|t| view! {
                    <Tab value=t.as_code()>{t.label()}</Tab>
                }).collect_view()}
            </TabList>

            <div class="form form--two-columns">
                <FormField label="Fecha" field="fecha" errors=vm.errors required=true>
                    <input
                        type="date"
                        class="date-input"
                        prop:value=move || vm.fecha.get()
                        on:change=move |ev| vm.fecha.set(event_target_value(&ev))
                    />
                </FormField>
                {move || match vm.tipo() {
                    TipoRegistro::Labor => view! {
                        <FormField label="Labor" field="labor" errors=vm.errors required=true>
                            <Input value=vm.labor placeholder="Poda, espergura, laboreo..." />
                        </FormField>
                        <FormField label="Horas" field="horas" errors=vm.errors>
                            <Input value=vm.horas />
                        </FormField>
                    }
                    .into_any(),
                    TipoRegistro::Tratamiento => view! {
                        <FormField label="Producto" field="producto" errors=vm.errors required=true>
                            <Input value=vm.producto placeholder="Azufre, cobre..." />
                        </FormField>
                        <FormField label="Dosis" field="dosis" errors=vm.errors required=true>
                            <Input value=vm.dosis />
                        </FormField>
                        <FormField label="Unidad" field="unidad_dosis" errors=vm.errors>
                            <Input value=vm.unidad_dosis />
                        </FormField>
                        <FormField label="Plazo de seguridad (días)" field="plazo_seguridad_dias" errors=vm.errors>
                            <Input value=vm.plazo_seguridad_dias input_type=InputType::Number />
                        </FormField>
                    }
                    .into_any(),
                    TipoRegistro::Muestreo => view! {
                        <FormField label="Grado Brix" field="grado_brix" errors=vm.errors>
                            <Input value=vm.grado_brix />
                        </FormField>
                        <FormField label="Acidez total (g/l)" field="acidez_total" errors=vm.errors>
                            <Input value=vm.acidez_total />
                        </FormField>
                        <FormField label="pH" field="ph" errors=vm.errors>
                            <Input value=vm.ph />
                        </FormField>
                    }
                    .into_any(),
                    TipoRegistro::Vendimia => view! {
                        <FormField label="Kilos" field="kilos" errors=vm.errors required=true>
                            <Input value=vm.kilos />
                        </FormField>
                        <FormField label="Grado probable (% vol)" field="grado_probable" errors=vm.errors>
                            <Input value=vm.grado_probable />
                        </FormField>
                    }
                    .into_any(),
                }}
                <FormField label="Observaciones" field="observaciones" errors=vm.errors>
                    <Textarea value=vm.observaciones attr:rows=2 />
                </FormField>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=submit
                disabled=Signal::derive(move || vm.saving.get())
            >
                {icon("plus")}
                " Añadir registro"
            </Button>

            <Table attr:style="width: 100%; margin-top: 16px;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Fecha"</TableHeaderCell>
                        <TableHeaderCell>"Tipo"</TableHeaderCell>
                        <TableHeaderCell>"Detalle"</TableHeaderCell>
                        <TableHeaderCell>"Observaciones"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || registros.get()
                        key=|r| r.id
                        children=move |r| {
                            let id = r.id;
                            let fecha = format_date(r.fecha);
                            let tipo_label = r.detalle.tipo().label();
                            let summary = r.detalle.summary();
                            let observaciones = r.observaciones.clone().unwrap_or_default();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{fecha}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                                {tipo_label}
                                            </Badge>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{summary}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{observaciones}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            on_click=move |_| remove(id)
                                            attr:title="Eliminar registro"
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
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a007_parcela::registro::{DatosLabor, DetalleRegistro};

    fn registro(id: i64, day: u32) -> RegistroVinedo {
        RegistroVinedo {
            id,
            parcela_id: 1,
            fecha: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            observaciones: None,
            detalle: DetalleRegistro::Labor(DatosLabor {
                labor: "Poda".into(),
                horas: None,
            }),
        }
    }

    #[test]
    fn test_sort_registros_newest_first() {
        let mut list = vec![registro(1, 3), registro(2, 20), registro(3, 3), registro(4, 11)];
        sort_registros(&mut list);
        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
