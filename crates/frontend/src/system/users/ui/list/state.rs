use contracts::system::users::Usuario;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct UsuariosListState {
    /// Filtered and sorted view of the loaded rows.
    pub items: Vec<Usuario>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for UsuariosListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "username".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<UsuariosListState> {
    RwSignal::new(UsuariosListState::default())
}
