use dioxus::prelude::*;
use shared_ui::components::{
    Button, ButtonVariant, FileInput, Form, FormActions, FormRow, Input, Textarea,
};
use shared_ui::use_toast;

use crate::forms::{
    new_cabin_form, prepare_submission, settle_create, CabinField, CreateCabinCall, FieldValue,
    MutationState, SelectedFile, ServerCabins,
};
use crate::query::use_query_client;

/// Read every picked file into memory, keeping the selection order.
async fn read_selection(evt: &FormEvent) -> Vec<SelectedFile> {
    let mut selected = Vec::new();
    for file in evt.files() {
        let name = file.name();
        let content_type = file
            .content_type()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        match file.read_bytes().await {
            Ok(bytes) => selected.push(SelectedFile {
                name,
                content_type,
                bytes: bytes.to_vec(),
            }),
            Err(e) => tracing::warn!(file = %name, "Failed to read selected file: {e}"),
        }
    }
    selected
}

/// Form for adding a cabin. Resets itself after a successful create.
///
/// `mutation` is owned by the page so it can keep the form mounted while a
/// create is in flight.
#[component]
pub fn CreateCabinForm(mutation: Signal<MutationState>) -> Element {
    let mut mutation = mutation;
    let toast = use_toast();
    let queries = use_query_client();

    let mut form = use_signal(new_cabin_form);

    let pending = mutation.read().is_pending();

    let handle_submit = move |_: FormEvent| {
        if mutation.read().is_pending() {
            return;
        }
        let Some(req) = prepare_submission(&mut form.write()) else {
            return;
        };
        if !mutation.write().begin() {
            return;
        }

        spawn(async move {
            let result = ServerCabins.create_cabin(req).await;
            settle_create(
                result,
                &mut form.write(),
                &mut mutation.write(),
                &toast,
                &queries,
            );
        });
    };

    let handle_reset = move |_: FormEvent| {
        if !mutation.read().is_pending() {
            form.write().reset();
        }
    };

    let text_of = move |field: CabinField| form.read().text(field).to_string();
    let error_of = move |field: CabinField| form.read().error(field).map(str::to_string);
    let mut set_text = move |field: CabinField, evt: FormEvent| {
        form.write().set_value(field, FieldValue::Text(evt.value()));
    };
    let mut blur = move |field: CabinField| form.write().blur(field);

    let selected_name = form
        .read()
        .files(CabinField::Image)
        .first()
        .map(|file| file.name.clone());
    let picker_key = form.read().reset_count();

    rsx! {
        Form {
            class: "cabin-form",
            onsubmit: handle_submit,
            onreset: handle_reset,

            FormRow {
                label: "Cabin name",
                html_for: CabinField::Name.id().to_string(),
                error: error_of(CabinField::Name),
                Input {
                    id: CabinField::Name.id().to_string(),
                    value: text_of(CabinField::Name),
                    disabled: pending,
                    invalid: error_of(CabinField::Name).is_some(),
                    on_input: move |evt| set_text(CabinField::Name, evt),
                    on_blur: move |_| blur(CabinField::Name),
                }
            }

            FormRow {
                label: "Maximum capacity",
                html_for: CabinField::MaxCapacity.id().to_string(),
                error: error_of(CabinField::MaxCapacity),
                Input {
                    id: CabinField::MaxCapacity.id().to_string(),
                    input_type: "number",
                    value: text_of(CabinField::MaxCapacity),
                    disabled: pending,
                    invalid: error_of(CabinField::MaxCapacity).is_some(),
                    on_input: move |evt| set_text(CabinField::MaxCapacity, evt),
                    on_blur: move |_| blur(CabinField::MaxCapacity),
                }
            }

            FormRow {
                label: "Regular price",
                html_for: CabinField::RegularPrice.id().to_string(),
                error: error_of(CabinField::RegularPrice),
                Input {
                    id: CabinField::RegularPrice.id().to_string(),
                    input_type: "number",
                    value: text_of(CabinField::RegularPrice),
                    disabled: pending,
                    invalid: error_of(CabinField::RegularPrice).is_some(),
                    on_input: move |evt| set_text(CabinField::RegularPrice, evt),
                    on_blur: move |_| blur(CabinField::RegularPrice),
                }
            }

            FormRow {
                label: "Discount",
                html_for: CabinField::Discount.id().to_string(),
                error: error_of(CabinField::Discount),
                Input {
                    id: CabinField::Discount.id().to_string(),
                    input_type: "number",
                    value: text_of(CabinField::Discount),
                    disabled: pending,
                    invalid: error_of(CabinField::Discount).is_some(),
                    on_input: move |evt| set_text(CabinField::Discount, evt),
                    on_blur: move |_| blur(CabinField::Discount),
                }
            }

            FormRow {
                label: "Description for website",
                html_for: CabinField::Description.id().to_string(),
                error: error_of(CabinField::Description),
                Textarea {
                    id: CabinField::Description.id().to_string(),
                    value: text_of(CabinField::Description),
                    disabled: pending,
                    invalid: error_of(CabinField::Description).is_some(),
                    on_input: move |evt| set_text(CabinField::Description, evt),
                    on_blur: move |_| blur(CabinField::Description),
                }
            }

            FormRow {
                label: "Cabin photo",
                html_for: CabinField::Image.id().to_string(),
                error: error_of(CabinField::Image),
                // Re-keyed on reset so the browser drops its selection too.
                FileInput {
                    key: "{picker_key}",
                    id: CabinField::Image.id().to_string(),
                    accept: "image/*",
                    selected: selected_name,
                    disabled: pending,
                    invalid: error_of(CabinField::Image).is_some(),
                    on_change: move |evt: FormEvent| async move {
                        let files = read_selection(&evt).await;
                        form.write().set_value(CabinField::Image, FieldValue::Files(files));
                    },
                }
            }

            FormActions {
                Button {
                    variant: ButtonVariant::Secondary,
                    button_type: "reset",
                    disabled: pending,
                    "Cancel"
                }
                Button {
                    disabled: pending,
                    if pending { "Creating..." } else { "Create new cabin" }
                }
            }
        }
    }
}
