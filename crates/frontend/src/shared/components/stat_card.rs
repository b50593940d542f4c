use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Neutral,
    Good,
    Warning,
    Bad,
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Formatted value (None = loading/error)
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into)]
    status: Signal<CardStatus>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
    /// Route opened when the card is clicked
    #[prop(optional)]
    href: Option<&'static str>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        CardStatus::Good => "stat-card stat-card--success",
        CardStatus::Bad => "stat-card stat-card--error",
        CardStatus::Warning => "stat-card stat-card--warning",
        CardStatus::Neutral => "stat-card",
    };

    view! {
        <a class=status_class href=href.unwrap_or("#")>
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
            {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
        </a>
    }
}
