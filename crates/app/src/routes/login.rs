use crate::routes::Route;
use dioxus::prelude::*;

/// Sign-in destination after a successful password change.
///
/// The credential form itself lives outside this app; this page only
/// confirms the change and offers a way back.
#[component]
pub fn Login() -> Element {
    rsx! {
        div { class: "auth-heading",
            h1 { class: "auth-title", "Sign In" }
            p { class: "auth-description",
                "Your password has been updated. Sign in with your new password to continue."
            }
        }
        p { class: "auth-link",
            Link { to: Route::ChangePassword {}, "Set a different password" }
        }
    }
}
