mod create_form;
mod list;

use dioxus::prelude::*;
use shared_ui::components::{Button, ButtonVariant};

use crate::forms::MutationState;

pub use create_form::CreateCabinForm;
pub use list::CabinTable;

/// Label of the show/hide toggle and whether it is locked.
///
/// Hiding the form drops its scope and any create still in flight with it,
/// so the toggle is locked while a create is pending.
fn form_toggle(show_form: bool, mutation: &MutationState) -> (&'static str, bool) {
    let label = if show_form { "Close form" } else { "Add new cabin" };
    (label, mutation.is_pending())
}

/// The cabins page: the listing plus a toggleable create form.
#[component]
pub fn Cabins() -> Element {
    let mut show_form = use_signal(|| false);
    let mutation = use_signal(MutationState::default);

    let (toggle_label, toggle_locked) = form_toggle(show_form(), &mutation.read());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./cabins.css") }

        div { class: "cabins-page",
            div { class: "cabins-header",
                h1 { "All cabins" }
            }

            CabinTable {}

            Button {
                variant: if show_form() { ButtonVariant::Secondary } else { ButtonVariant::Primary },
                button_type: "button",
                disabled: toggle_locked,
                onclick: move |_| {
                    if !mutation.read().is_pending() {
                        show_form.toggle();
                    }
                },
                "{toggle_label}"
            }

            if show_form() {
                CreateCabinForm { mutation }
            }
        }
    }
}
