use dioxus::prelude::*;

/// A dashboard-styled single-line input.
///
/// Labels and error text live in the surrounding `FormRow`.
#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] on_blur: EventHandler<FocusEvent>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] invalid: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        input {
            id: "{id}",
            name: "{id}",
            r#type: "{input_type}",
            value: value,
            placeholder: placeholder,
            disabled: disabled,
            "aria-invalid": invalid,
            oninput: move |evt| on_input.call(evt),
            onblur: move |evt| on_blur.call(evt),
            ..merged,
        }
    }
}
