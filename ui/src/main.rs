#![allow(non_snake_case)]

use dioxus::prelude::*;

mod api;
mod dom;
mod state;
mod views;

use views::debug_controls::DebugControls;

/// Page element the debug controls are rendered into.
const CONTROLS_ROOT: &str = "f";

fn main() {
    dioxus::logger::initialize_default();
    dioxus::LaunchBuilder::web()
        .with_cfg(dioxus::web::Config::new().rootname(CONTROLS_ROOT))
        .launch(App);
}

#[component]
fn App() -> Element {
    let feed = use_hook(api::init);

    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }

        DebugControls { feed }
    }
}
