use dioxus::prelude::*;

/// Text input with an optional leading icon.
///
/// `invalid` sets `aria-invalid` so the field picks up the error styling and
/// screen readers announce it together with the message below it.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] invalid: bool,
    icon: Option<Element>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);
    let aria_invalid = if invalid { "true" } else { "false" };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if let Some(icon) = icon {
                span { class: "input-icon", aria_hidden: "true", {icon} }
            }
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                aria_invalid: aria_invalid,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
        }
    }
}
