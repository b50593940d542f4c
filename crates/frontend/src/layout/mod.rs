pub mod global_context;
pub mod sidebar;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

/// Private-area shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <aside data-zone="left" class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
                    <Sidebar />
                </aside>
                <main class="app-main">
                    {children()}
                </main>
            </div>
        </div>
    }
}
