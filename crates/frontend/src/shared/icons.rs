use leptos::prelude::*;

/// Stroke icons drawn from path data only (24x24 viewBox).
fn paths(name: &str) -> &'static [&'static str] {
    match name {
        "home" => &["M3 11l9-8 9 8", "M5 10v10h14V10", "M10 20v-6h4v6"],
        "clients" => &[
            "M17 21v-2a4 4 0 0 0-4-4H7a4 4 0 0 0-4 4v2",
            "M9 11a4 4 0 1 0 0-8 4 4 0 0 0 0 8z",
            "M23 21v-2a4 4 0 0 0-3-3.87",
            "M16 3.13a4 4 0 0 1 0 7.75",
        ],
        "deliveries" => &[
            "M3 7h13v10H3z",
            "M16 7h3l2 3v7h-5z",
            "M6 18a1.5 1.5 0 1 0 3 0 1.5 1.5 0 0 0-3 0z",
            "M17 18a1.5 1.5 0 1 0 3 0 1.5 1.5 0 0 0-3 0z",
        ],
        "wine" => &["M8 2h8l-1 7a3 3 0 0 1-6 0z", "M12 12v8", "M8 22h8"],
        "lots" => &[
            "M4 3h6v6H4z",
            "M14 3h6v6h-6z",
            "M14 14h6v6h-6z",
            "M4 14h6v6H4z",
        ],
        "recipe" => &["M14 2H6a2 2 0 0 0-2 2v16l4-2 4 2 4-2 4 2V8z", "M14 2v6h6", "M8 13h8", "M8 17h5"],
        "vineyard" => &[
            "M12 22V12",
            "M12 12C12 7 8 4 3 4c0 5 4 8 9 8z",
            "M12 12c0-5 4-8 9-8 0 5-4 8-9 8z",
        ],
        "calendar" => &["M3 5h18v16H3z", "M3 10h18", "M8 3v4", "M16 3v4"],
        "users" => &["M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2", "M12 11a4 4 0 1 0 0-8 4 4 0 0 0 0 8z"],
        "winery" => &["M3 22h18", "M6 22V8l6-5 6 5v14", "M9 13h6v9H9z"],
        "logout" => &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
        "plus" => &["M12 5v14", "M5 12h14"],
        "refresh" => &["M23 4v6h-6", "M1 20v-6h6", "M3.5 9a9 9 0 0 1 14.9-3.4L23 10", "M1 14l4.6 4.4A9 9 0 0 0 20.5 15"],
        "delete" => &["M3 6h18", "M8 6V4h8v2", "M19 6l-1 14H6L5 6", "M10 11v6", "M14 11v6"],
        "save" => &["M19 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h11l5 5v11a2 2 0 0 1-2 2z", "M17 21v-8H7v8", "M7 3v5h8"],
        "edit" => &["M12 20h9", "M16.5 3.5a2.1 2.1 0 0 1 3 3L7 19l-4 1 1-4z"],
        "cancel" | "x" => &["M18 6L6 18", "M6 6l12 12"],
        "check" => &["M20 6L9 17l-5-5"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevron-right" => &["M9 18l6-6-6-6"],
        "alert" => &["M12 2L1 21h22z", "M12 9v5", "M12 17.5v.5"],
        "rain" => &["M20 16.6A5 5 0 0 0 18 7h-1.3A8 8 0 1 0 4 15.3", "M8 19v2", "M12 17v2", "M16 19v2"],
        "key" => &["M21 2l-2 2", "M15.5 7.5l3 3L22 7l-3-3", "M11.4 11.6a5.5 5.5 0 1 1-7.8 7.8 5.5 5.5 0 0 1 7.8-7.8z", "M11.4 11.6L19 4"],
        _ => &["M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M12 8v4l3 3"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let size = match name {
        "chevron-left" | "chevron-right" | "x" | "check" => "16",
        _ => "20",
    };
    view! {
        <svg width=size height=size viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths(name).iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
