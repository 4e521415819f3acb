use dioxus::prelude::*;

use crate::routes::Route;

/// Fallback for any path outside the password flow.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Nothing here" }
                p { class: "not-found-message",
                    code { "{path}" }
                    " is not part of the password reset flow."
                }
                div { class: "not-found-actions",
                    Link { to: Route::ChangePassword {}, class: "not-found-link",
                        "Set a new password"
                    }
                    Link { to: Route::Login {}, class: "not-found-link", "Go to login" }
                }
            }
        }
    }
}
