use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdChevronLeft, LdLockKeyholeOpen};
use dioxus_free_icons::Icon;
use server::api::{submit_password_change, HttpPasswordClient};
use shared_types::{ChangePasswordForm, PasswordField, SubmitEffect};
use shared_ui::{Button, ButtonVariant, Form, FormItem, FormMessage, Input};

/// "Set New Password" page.
///
/// Field errors appear only after a submit attempt. A failed request leaves
/// the user on the form without a message.
#[component]
pub fn ChangePassword() -> Element {
    let mut form = use_signal(ChangePasswordForm::new);
    let client = use_hook(|| {
        HttpPasswordClient::from_env().with_platform(crate::client_platform())
    });

    let handle_submit = move |_: FormEvent| {
        let client = client.clone();
        async move {
            if submit_password_change(form, &client).await == SubmitEffect::NavigateToLogin {
                navigator().push(Route::Login {});
            }
        }
    };

    let state = form();
    let submitting = state.is_submitting();
    let password_error = state.error(PasswordField::Password).map(str::to_string);
    let confirm_error = state
        .error(PasswordField::ConfirmPassword)
        .map(str::to_string);
    let password_invalid = password_error.is_some();
    let confirm_invalid = confirm_error.is_some();

    rsx! {
        div { class: "auth-back",
            Button {
                variant: ButtonVariant::Link,
                onclick: move |_| {
                    navigator().push(Route::Login {});
                },
                Icon::<LdChevronLeft> { icon: LdChevronLeft, width: 18, height: 18 }
                "Back to login"
            }
        }

        div { class: "auth-heading",
            h1 { class: "auth-title", "Set New Password" }
            p { class: "auth-description",
                "Your previous password has been reset. Please set a new password for your account."
            }
        }

        Form { class: "auth-form", onsubmit: handle_submit,
            FormItem {
                Input {
                    input_type: "password",
                    id: "password",
                    placeholder: "Password",
                    value: state.password().to_string(),
                    invalid: password_invalid,
                    disabled: submitting,
                    icon: rsx! {
                        Icon::<LdLockKeyholeOpen> { icon: LdLockKeyholeOpen, width: 18, height: 18 }
                    },
                    on_input: move |e: FormEvent| form.write().set_password(e.value()),
                }
                FormMessage { message: password_error }
            }
            FormItem {
                Input {
                    input_type: "password",
                    id: "confirm_password",
                    placeholder: "Confirm Password",
                    value: state.confirm_password().to_string(),
                    invalid: confirm_invalid,
                    disabled: submitting,
                    icon: rsx! {
                        Icon::<LdLockKeyholeOpen> { icon: LdLockKeyholeOpen, width: 18, height: 18 }
                    },
                    on_input: move |e: FormEvent| form.write().set_confirm_password(e.value()),
                }
                FormMessage { message: confirm_error }
            }
            Button {
                class: "auth-submit",
                button_type: "submit",
                loading: submitting,
                "Set Password"
            }
        }
    }
}
