use contracts::domain::a009_evento::aggregate::Evento;
use contracts::shared::calendar::{bucket_by_date, first_day_of_month, iso_key, month_grid, shift_month};
use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a009_evento::api;
use crate::domain::a009_evento::i18n::{month_title, t, tipo_label, use_lang, weekday_names, Key, Lang};
use crate::shared::components::form::{ErrorBanner, LoadingRow};
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;

/// Events of the month containing `reference`, soonest first.
pub fn events_in_month(eventos: &[Evento], reference: NaiveDate) -> Vec<Evento> {
    let mut rows: Vec<Evento> = eventos
        .iter()
        .filter(|e| {
            let f = e.fecha();
            f.year() == reference.year() && f.month() == reference.month()
        })
        .cloned()
        .collect();
    rows.sort_by_key(|e| e.fecha_hora);
    rows
}

#[component]
pub fn EventosList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let lang = use_lang();
    let eventos: RwSignal<Vec<Evento>> = RwSignal::new(Vec::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);
    let month = RwSignal::new(first_day_of_month(today()));
    let mode = RwSignal::new("calendar".to_string());

    spawn_local(async move {
        match session.call(|s| async move { api::fetch_eventos(&s).await }).await {
            Ok(list) => eventos.set(list),
            Err(e) => {
                log::error!("eventos: {}", e);
                error.set(Some(e.user_message("No se pudieron cargar los eventos")));
            }
        }
        loading.set(false);
    });

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="a009_evento--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{move || t(lang.get(), Key::Title)}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| lang.update(|l| *l = l.toggled())
                        attr:title="ES / EN"
                    >
                        {move || lang.get().toggled().as_code().to_uppercase()}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| nav_new("/eventos/nuevo", Default::default())
                    >
                        {icon("plus")}
                        {move || format!(" {}", t(lang.get(), Key::NewEvent))}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || loading.get()>
                    <LoadingRow />
                </Show>

                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| month.update(|m| *m = shift_month(*m, -1))>
                        {icon("chevron-left")}
                    </Button>
                    <strong class="calendar__title">{move || month_title(lang.get(), month.get())}</strong>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| month.update(|m| *m = shift_month(*m, 1))>
                        {icon("chevron-right")}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=move |_| month.set(first_day_of_month(today()))>
                        {move || t(lang.get(), Key::Today)}
                    </Button>
                    <TabList selected_value=mode>
                        <Tab value="calendar">{move || t(lang.get(), Key::Calendar)}</Tab>
                        <Tab value="list">{move || t(lang.get(), Key::List)}</Tab>
                    </TabList>
                </Flex>

                {move || if mode.get() == "list" {
                    view! { <MonthList eventos=eventos month=month lang=lang /> }.into_any()
                } else {
                    view! { <MonthGrid eventos=eventos month=month lang=lang /> }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn MonthGrid(eventos: RwSignal<Vec<Evento>>, month: RwSignal<NaiveDate>, lang: RwSignal<Lang>) -> impl IntoView {
    let navigate = use_navigate();
    let today_key = iso_key(today());

    view! {
        <div class="calendar">
            <div class="calendar__header">
                {move || weekday_names(lang.get()).into_iter().map(|d| view! {
                    <div class="calendar__weekday">{d}</div>
                }).collect_view()}
            </div>
            {move || {
                let by_day = eventos.with(|e| bucket_by_date(e, |ev| Some(ev.fecha())));
                let lang = lang.get();
                month_grid(month.get()).into_iter().map(|week| {
                    let navigate = navigate.clone();
                    let today_key = today_key.clone();
                    view! {
                        <div class="calendar__week">
                            {week.into_iter().map(|day| {
                                let key = day.iso_key();
                                let is_today = key == today_key;
                                let items = by_day.get(&key).cloned().unwrap_or_default();
                                let navigate = navigate.clone();
                                let new_url = format!("/eventos/nuevo?fecha={}", key);
                                view! {
                                    <div
                                        class="calendar__day"
                                        class:calendar__day--other=!day.in_current_month
                                        class:calendar__day--today=is_today
                                        on:dblclick=move |_| navigate(&new_url, Default::default())
                                    >
                                        <div class="calendar__day-number">{day.date.day()}</div>
                                        {items.into_iter().map(|ev| view! {
                                            <a
                                                class="calendar__chip"
                                                href=format!("/eventos/{}", ev.id)
                                                style=format!("background: {};", ev.tipo.color())
                                                title=tipo_label(lang, ev.tipo)
                                            >
                                                {format!("{} {}", ev.hora(), ev.titulo)}
                                            </a>
                                        }).collect_view()}
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn MonthList(eventos: RwSignal<Vec<Evento>>, month: RwSignal<NaiveDate>, lang: RwSignal<Lang>) -> impl IntoView {
    let rows = move || eventos.with(|e| events_in_month(e, month.get()));
    view! {
        <Show
            when=move || !rows().is_empty()
            fallback=move || view! { <p class="text-muted">{move || t(lang.get(), Key::NoEvents)}</p> }
        >
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>{move || t(lang.get(), Key::Fecha)}</TableHeaderCell>
                        <TableHeaderCell>{move || t(lang.get(), Key::Hora)}</TableHeaderCell>
                        <TableHeaderCell>{move || t(lang.get(), Key::Titulo)}</TableHeaderCell>
                        <TableHeaderCell>{move || t(lang.get(), Key::Tipo)}</TableHeaderCell>
                        <TableHeaderCell>{move || t(lang.get(), Key::Ubicacion)}</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let lang = lang.get();
                        rows().into_iter().map(|ev| {
                            let fecha = format_date(ev.fecha());
                            let hora = ev.hora();
                            let href = format!("/eventos/{}", ev.id);
                            let titulo = ev.titulo.clone();
                            let dot_style = format!("background: {};", ev.tipo.color());
                            let tipo = tipo_label(lang, ev.tipo);
                            let ubicacion = ev.ubicacion.clone().unwrap_or_default();
                            view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{fecha}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{hora}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        <a href=href>{titulo}</a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <span class="calendar__dot" style=dot_style></span>
                                        {tipo}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{ubicacion}</TableCellLayout>
                                </TableCell>
                            </TableRow>
                            }
                        }).collect_view()
                    }}
                </TableBody>
            </Table>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a009_evento::aggregate::TipoEvento;

    fn evento(id: i64, raw: &str) -> Evento {
        Evento {
            id,
            titulo: format!("Evento {}", id),
            tipo: TipoEvento::Cata,
            fecha_hora: chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").unwrap(),
            ubicacion: None,
            descripcion: None,
        }
    }

    #[test]
    fn test_events_in_month() {
        let all = vec![
            evento(1, "2025-09-20 18:00"),
            evento(2, "2025-10-01 10:00"),
            evento(3, "2025-09-02 09:30"),
            evento(4, "2024-09-02 09:30"),
        ];
        let sept = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let ids: Vec<i64> = events_in_month(&all, sept).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
