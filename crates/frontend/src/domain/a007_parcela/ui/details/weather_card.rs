use contracts::domain::a007_parcela::harvest::{EstimacionVendimia, HarvestBucket};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_bodega::api as bodega_api;
use crate::domain::a007_parcela::weather::{plot_weather, PlotWeather};
use crate::shared::date_utils::format_date;
use crate::system::auth::context::use_session;

#[component]
pub fn HarvestCard(#[prop(into)] estimacion: Signal<Option<EstimacionVendimia>>) -> impl IntoView {
    view! {
        <Card>
            <h3>"Estimación de vendimia"</h3>
            {move || match estimacion.get() {
                None => view! { <p class="text-muted">"Sin estimación disponible."</p> }.into_any(),
                Some(est) => match (est.bucket(), est.dias_restantes) {
                    (Some(bucket), Some(days)) => view! {
                        <div class="harvest">
                            <span class="harvest__badge" style=format!("background: {}; color: #fff;", bucket.color())>
                                {bucket.label()}
                            </span>
                            <span class="harvest__days">{HarvestBucket::describe_days(days)}</span>
                            {est.fecha_estimada.map(|f| view! {
                                <span class="harvest__date">{format!(" · {}", format_date(f))}</span>
                            })}
                        </div>
                        {est.grado_actual.map(|g| view! {
                            <p>{format!(
                                "Grado actual {:.1} ºBx{}",
                                g,
                                est.grado_objetivo.map(|o| format!(" / objetivo {:.1}", o)).unwrap_or_default()
                            )}</p>
                        })}
                    }
                    .into_any(),
                    _ => view! {
                        <p class="text-muted">
                            {est.mensaje.unwrap_or_else(|| "Registra muestreos para estimar la fecha.".to_string())}
                        </p>
                    }
                    .into_any(),
                },
            }}
        </Card>
    }
}

/// Seven-day forecast for the plot's municipality, placed through the
/// winery's province and country when the municipality alone is ambiguous.
#[component]
pub fn WeatherCard(municipio: Option<String>) -> impl IntoView {
    let session = use_session();
    let weather = RwSignal::new(None::<PlotWeather>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);

    spawn_local(async move {
        let bodega = match session.call(|s| async move { bodega_api::fetch_bodega(&s).await }).await {
            Ok(b) => Some(b),
            Err(e) => {
                log::warn!("bodega for weather: {}", e);
                None
            }
        };
        let provincia = bodega.as_ref().and_then(|b| b.provincia.clone());
        let pais = bodega.as_ref().and_then(|b| b.pais.clone());
        match plot_weather(municipio.as_deref(), provincia.as_deref(), pais.as_deref()).await {
            Ok(w) => weather.set(Some(w)),
            Err(e) => {
                log::warn!("weather: {}", e);
                error.set(Some(e.to_string()));
            }
        }
        loading.set(false);
    });

    view! {
        <Card>
            <h3>"Previsión meteorológica"</h3>
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>
            {move || error.get().map(|e| view! { <p class="text-muted">{e}</p> })}
            {move || weather.get().map(|w| view! {
                <p class="text-muted">{w.place.label}</p>
                <div class="forecast">
                    {w.days.into_iter().map(|d| {
                        let temps = match (d.min_c, d.max_c) {
                            (Some(min), Some(max)) => format!("{:.0}º / {:.0}º", min, max),
                            (None, Some(max)) => format!("máx {:.0}º", max),
                            (Some(min), None) => format!("mín {:.0}º", min),
                            (None, None) => "—".to_string(),
                        };
                        view! {
                            <div class="forecast__day" class:forecast__day--rain=d.is_rainy()>
                                <div class="forecast__date">{d.date.format("%d/%m").to_string()}</div>
                                <div class="forecast__temp">{temps}</div>
                                <div class="forecast__rain">
                                    {d.precipitation_mm.map(|mm| format!("{:.1} mm", mm)).unwrap_or_default()}
                                </div>
                            </div>
                        }
                    }).collect_view()}
                </div>
            })}
        </Card>
    }
}
