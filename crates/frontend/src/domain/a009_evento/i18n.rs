//! Spanish/English labels of the events screens.
//!
//! The choice is remembered under `vinops_lang`; anything unknown falls back
//! to Spanish.

use chrono::{Datelike, NaiveDate};
use contracts::domain::a009_evento::aggregate::TipoEvento;
use leptos::prelude::*;

use crate::system::auth::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub fn as_code(&self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("en") {
            Lang::En
        } else {
            Lang::Es
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Lang::Es => Lang::En,
            Lang::En => Lang::Es,
        }
    }
}

/// Text keys used by the events pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Title,
    NewEvent,
    Calendar,
    List,
    Today,
    NoEvents,
    Titulo,
    Tipo,
    Fecha,
    Hora,
    Ubicacion,
    Descripcion,
    Save,
    Delete,
    ConfirmDelete,
    Back,
}

pub fn t(lang: Lang, key: Key) -> &'static str {
    match (lang, key) {
        (Lang::Es, Key::Title) => "Agenda",
        (Lang::En, Key::Title) => "Calendar",
        (Lang::Es, Key::NewEvent) => "Nuevo evento",
        (Lang::En, Key::NewEvent) => "New event",
        (Lang::Es, Key::Calendar) => "Calendario",
        (Lang::En, Key::Calendar) => "Month",
        (Lang::Es, Key::List) => "Lista",
        (Lang::En, Key::List) => "List",
        (Lang::Es, Key::Today) => "Hoy",
        (Lang::En, Key::Today) => "Today",
        (Lang::Es, Key::NoEvents) => "No hay eventos este mes.",
        (Lang::En, Key::NoEvents) => "No events this month.",
        (Lang::Es, Key::Titulo) => "Título",
        (Lang::En, Key::Titulo) => "Title",
        (Lang::Es, Key::Tipo) => "Tipo",
        (Lang::En, Key::Tipo) => "Type",
        (Lang::Es, Key::Fecha) => "Fecha",
        (Lang::En, Key::Fecha) => "Date",
        (Lang::Es, Key::Hora) => "Hora",
        (Lang::En, Key::Hora) => "Time",
        (Lang::Es, Key::Ubicacion) => "Ubicación",
        (Lang::En, Key::Ubicacion) => "Location",
        (Lang::Es, Key::Descripcion) => "Descripción",
        (Lang::En, Key::Descripcion) => "Description",
        (Lang::Es, Key::Save) => "Guardar",
        (Lang::En, Key::Save) => "Save",
        (Lang::Es, Key::Delete) => "Eliminar",
        (Lang::En, Key::Delete) => "Delete",
        (Lang::Es, Key::ConfirmDelete) => "¿Eliminar este evento?",
        (Lang::En, Key::ConfirmDelete) => "Delete this event?",
        (Lang::Es, Key::Back) => "Agenda",
        (Lang::En, Key::Back) => "Calendar",
    }
}

pub fn tipo_label(lang: Lang, tipo: TipoEvento) -> &'static str {
    match (lang, tipo) {
        (Lang::Es, TipoEvento::Cata) => "Cata",
        (Lang::En, TipoEvento::Cata) => "Tasting",
        (Lang::Es, TipoEvento::Feria) => "Feria",
        (Lang::En, TipoEvento::Feria) => "Trade fair",
        (Lang::Es, TipoEvento::Visita) => "Visita",
        (Lang::En, TipoEvento::Visita) => "Visit",
        (Lang::Es, TipoEvento::Otro) => "Otro",
        (Lang::En, TipoEvento::Otro) => "Other",
    }
}

/// Monday-first short day names.
pub fn weekday_names(lang: Lang) -> [&'static str; 7] {
    match lang {
        Lang::Es => ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
        Lang::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn month_title(lang: Lang, date: NaiveDate) -> String {
    match lang {
        Lang::Es => crate::shared::date_utils::month_title(date),
        Lang::En => format!("{} {}", MONTHS_EN[date.month0() as usize], date.year()),
    }
}

/// Language signal seeded from storage; writes go back to storage.
pub fn use_lang() -> RwSignal<Lang> {
    let lang = RwSignal::new(storage::get_lang().map(|c| Lang::from_code(&c)).unwrap_or_default());
    Effect::new(move |_| storage::save_lang(lang.get().as_code()));
    lang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("EN "), Lang::En);
        assert_eq!(Lang::from_code("fr"), Lang::Es);
        assert_eq!(Lang::Es.toggled(), Lang::En);
    }

    #[test]
    fn test_tables() {
        assert_eq!(t(Lang::En, Key::NewEvent), "New event");
        assert_eq!(tipo_label(Lang::Es, TipoEvento::Feria), "Feria");
        assert_eq!(weekday_names(Lang::En)[0], "Mon");
        let d = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        assert_eq!(month_title(Lang::En, d), "September 2025");
        assert_eq!(month_title(Lang::Es, d), "septiembre 2025");
    }
}
