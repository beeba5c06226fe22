use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdTrash2;
use dioxus_free_icons::Icon;
use shared_types::{Cabin, CABINS_QUERY_KEY};
use shared_ui::components::{Button, ButtonVariant};
use shared_ui::{use_toast, ToastOptions};

use crate::format_helpers::{format_capacity, format_currency};
use crate::forms::{Invalidate, RemoteError};
use crate::query::use_query_client;

/// All cabins, refetched whenever the "cabins" key is invalidated.
#[component]
pub fn CabinTable() -> Element {
    let queries = use_query_client();

    let cabins = use_resource(move || {
        // Subscribes this resource to invalidations of the key.
        let _generation = queries.generation(CABINS_QUERY_KEY);
        async move { server::api::list_cabins().await }
    });

    match &*cabins.read() {
        Some(Ok(cabins)) if !cabins.is_empty() => rsx! {
            div { class: "cabin-table", role: "table",
                div { class: "cabin-table-header", role: "row",
                    div {}
                    div { "Cabin" }
                    div { "Capacity" }
                    div { "Price" }
                    div { "Discount" }
                    div {}
                }
                for cabin in cabins.iter() {
                    CabinRow { key: "{cabin.id}", cabin: cabin.clone() }
                }
            }
        },
        Some(Ok(_)) => rsx! {
            p { class: "cabin-table-empty", "No cabins could be found." }
        },
        Some(Err(e)) => {
            let message = RemoteError::from_server_fn_error(e).message;
            rsx! {
                p { class: "cabin-table-error", role: "alert", "{message}" }
            }
        }
        None => rsx! {
            p { class: "cabin-table-loading", "Loading cabins..." }
        },
    }
}

#[component]
fn CabinRow(cabin: Cabin) -> Element {
    let toast = use_toast();
    let queries = use_query_client();
    let mut deleting = use_signal(|| false);

    let id = cabin.id;
    let capacity = format_capacity(cabin.max_capacity);
    let price = format_currency(cabin.regular_price);
    let discount = if cabin.discount > 0.0 {
        format_currency(cabin.discount)
    } else {
        "\u{2014}".to_string()
    };
    let nightly = format_currency(cabin.discounted_price());

    let handle_delete = move |_: MouseEvent| {
        if *deleting.read() {
            return;
        }
        spawn(async move {
            deleting.set(true);
            match server::api::delete_cabin(id).await {
                Ok(()) => {
                    toast.success("Cabin successfully deleted".to_string(), ToastOptions::new());
                    queries.invalidate(CABINS_QUERY_KEY);
                }
                Err(e) => {
                    toast.error(RemoteError::from_server_fn_error(&e).message, ToastOptions::new());
                }
            }
            deleting.set(false);
        });
    };

    rsx! {
        div { class: "cabin-table-row", role: "row",
            img { class: "cabin-thumbnail", src: "{cabin.image}", alt: "Cabin {cabin.name}" }
            div { class: "cabin-name", "{cabin.name}" }
            div { "{capacity}" }
            div { class: "cabin-price", "{price}" }
            div { class: "cabin-discount", title: "Guests pay {nightly} per night", "{discount}" }
            div {
                Button {
                    variant: ButtonVariant::Danger,
                    button_type: "button",
                    disabled: deleting(),
                    onclick: handle_delete,
                    title: "Delete cabin {cabin.name}",
                    Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
                }
            }
        }
    }
}
