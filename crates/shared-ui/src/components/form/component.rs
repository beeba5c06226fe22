use dioxus::prelude::*;

/// A dashboard-styled form wrapper that prevents default submission and reset.
///
/// `onreset` fires for `type="reset"` buttons so the caller can restore its
/// own field state; the browser's native reset would not touch signals.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(default)] onreset: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            novalidate: true,
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            onreset: move |evt| {
                evt.prevent_default();
                onreset.call(evt);
            },
            ..merged,
            {children}
        }
    }
}
