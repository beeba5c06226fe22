pub mod cabins;
pub mod not_found;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdHouse;
use dioxus_free_icons::Icon;

use cabins::Cabins;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AppLayout)]
    #[redirect("/", || Route::Cabins {})]
    #[route("/cabins")]
    Cabins {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Dashboard shell: brand, navigation and the routed page.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-layout",
            aside { class: "app-sidebar",
                div { class: "sidebar-brand", "The Wild Oasis" }
                nav { class: "sidebar-nav",
                    Link {
                        to: Route::Cabins {},
                        class: if matches!(route, Route::Cabins {}) { "sidebar-link active" } else { "sidebar-link" },
                        Icon::<LdHouse> { icon: LdHouse, width: 18, height: 18 }
                        "Cabins"
                    }
                }
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}
