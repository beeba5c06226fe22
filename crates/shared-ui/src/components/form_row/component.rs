use dioxus::prelude::*;

/// CSS class for a row, flagging rows that carry a validation error.
pub fn form_row_class(has_error: bool) -> &'static str {
    if has_error {
        "form-row form-row-invalid"
    } else {
        "form-row"
    }
}

/// A labeled form row: label, control, and an inline error slot.
#[component]
pub fn FormRow(
    #[props(default)] label: String,
    /// Id of the control, wired to the label's `for` attribute.
    #[props(default)] html_for: String,
    #[props(default)] error: Option<String>,
    children: Element,
) -> Element {
    let class = form_row_class(error.is_some());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "{class}",
            if !label.is_empty() {
                label { class: "form-row-label", r#for: "{html_for}", "{label}" }
            }
            {children}
            if let Some(message) = error {
                span { class: "form-row-error", role: "alert", "{message}" }
            }
        }
    }
}

/// Trailing row for form actions (cancel, submit).
#[component]
pub fn FormActions(children: Element) -> Element {
    rsx! {
        div { class: "form-row form-actions", {children} }
    }
}
