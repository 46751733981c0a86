use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CatalogView, DetailView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CatalogView)] Catalog {},
        #[route("/challenge/:id", DetailView)] Challenge { id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "site-header",
                Link { to: Route::Catalog {}, h1 { "Coding Challenges" } }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
