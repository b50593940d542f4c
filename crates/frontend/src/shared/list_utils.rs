//! List helpers: client-side search, sorting and the debounced search box.
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Types that can be filtered by a free-text query
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Blank filter keeps everything.
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Case-insensitive comparison of optional text columns, blanks last.
pub fn cmp_opt_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One pending `window.setTimeout` at a time; scheduling again cancels the
/// previous one.
#[derive(Clone, Copy)]
pub struct Debouncer {
    handle: StoredValue<Option<i32>>,
    delay_ms: i32,
}

impl Debouncer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            handle: StoredValue::new(None),
            delay_ms,
        }
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.get_value() {
            if let Some(w) = web_sys::window() {
                w.clear_timeout_with_handle(id);
            }
            self.handle.set_value(None);
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        self.cancel();
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = self.handle;
        let callback = Closure::once_into_js(move || {
            handle.set_value(None);
            f();
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref::<js_sys::Function>(),
            self.delay_ms,
        ) {
            Ok(id) => self.handle.set_value(Some(id)),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    }
}

/// Search box that reports its value 300 ms after the last keystroke
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let debouncer = Debouncer::new(300);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        debouncer.schedule(move || on_change.run(new_value));
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        debouncer.cancel();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder=placeholder
                class:search-input--active=is_filter_active
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, i32);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.0.to_lowercase().contains(&filter.to_lowercase())
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "n" => self.1.cmp(&other.1),
                _ => self.0.cmp(other.0),
            }
        }
    }

    #[test]
    fn test_filter_and_sort() {
        let rows = vec![Row("Tinto", 3), Row("Blanco", 1), Row("Rosado", 2)];
        assert_eq!(filter_list(rows.clone(), "  ").len(), 3);
        assert_eq!(filter_list(rows.clone(), "TIN"), vec![Row("Tinto", 3)]);

        let mut sorted = rows;
        sort_list(&mut sorted, "n", false);
        assert_eq!(sorted[0], Row("Tinto", 3));
        sort_list(&mut sorted, "name", true);
        assert_eq!(sorted[0], Row("Blanco", 1));
    }

    #[test]
    fn test_sort_indicator_and_optional_text() {
        assert_eq!(get_sort_indicator("nombre", "nombre", true), " ▲");
        assert_eq!(get_sort_indicator("nombre", "ciudad", true), " ⇅");
        assert_eq!(cmp_opt_text(Some("b"), Some("A")), Ordering::Greater);
        assert_eq!(cmp_opt_text(None, Some("a")), Ordering::Greater);
    }
}
