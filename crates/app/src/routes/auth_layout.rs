use dioxus::prelude::*;

use crate::routes::Route;

const ILLUSTRATION: Asset = asset!("/assets/change-password.svg");

/// Two-column shell for the signed-out pages: the routed form on the left,
/// an illustration on the right. The illustration column is hidden on narrow
/// screens by `auth.css`.
#[component]
pub fn AuthLayout() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            main { class: "auth-form-column",
                div { class: "auth-form-inner",
                    Outlet::<Route> {}
                }
            }
            aside { class: "auth-illustration", aria_hidden: "true",
                img { src: ILLUSTRATION, alt: "" }
            }
        }
    }
}
