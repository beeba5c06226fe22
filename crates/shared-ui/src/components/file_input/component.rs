use dioxus::prelude::*;

/// A styled file picker. The change event carries the browser's file list;
/// reading the bytes is left to the caller.
#[component]
pub fn FileInput(
    #[props(default)] id: String,
    #[props(default = "image/*".to_string())] accept: String,
    #[props(default)] on_change: EventHandler<FormEvent>,
    /// File name shown next to the picker once something is selected.
    #[props(default)] selected: Option<String>,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] invalid: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "file-input-wrapper",
            input {
                id: "{id}",
                name: "{id}",
                class: "file-input",
                r#type: "file",
                accept: "{accept}",
                disabled: disabled,
                "aria-invalid": invalid,
                onchange: move |evt| on_change.call(evt),
            }
            if let Some(name) = selected {
                span { class: "file-input-name", "{name}" }
            }
        }
    }
}
