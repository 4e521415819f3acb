pub mod auth_layout;
pub mod change_password;
pub mod login;
pub mod not_found;

use dioxus::prelude::*;

use auth_layout::AuthLayout;
use change_password::ChangePassword;
use login::Login;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AuthLayout)]
        #[redirect("/", || Route::ChangePassword {})]
        #[route("/change-password")]
        ChangePassword {},
        #[route("/login")]
        Login {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
