use contracts::domain::a002_cliente::aggregate::Cliente;
use leptos::prelude::*;

/// Active-flag filter of the client list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivoFilter {
    Activos,
    Inactivos,
    Todos,
}

impl ActivoFilter {
    pub fn from_code(code: &str) -> Self {
        match code {
            "inactivos" => ActivoFilter::Inactivos,
            "todos" => ActivoFilter::Todos,
            _ => ActivoFilter::Activos,
        }
    }

    pub fn accepts(&self, cliente: &Cliente) -> bool {
        match self {
            ActivoFilter::Activos => cliente.activo,
            ActivoFilter::Inactivos => !cliente.activo,
            ActivoFilter::Todos => true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientesListState {
    pub items: Vec<Cliente>,
    pub search_query: String,
    pub activo: ActivoFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for ClientesListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            activo: ActivoFilter::Activos,
            sort_field: "nombre".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<ClientesListState> {
    RwSignal::new(ClientesListState::default())
}
