use dioxus::prelude::*;

use crate::controller;
use crate::directory::{use_api, use_directory};
use crate::icons::FaTrashCan;
use crate::Icon;

/// Add/edit form for the contact open in the directory state.
///
/// While a request is in flight the inputs and buttons are disabled. Its
/// outcome is applied to the state as it is when the request finishes.
#[component]
pub fn ContactForm() -> Element {
    let mut state = use_directory();
    let mut saving = use_signal(|| false);
    let client = use_api();

    let current = state();
    let Some(draft) = current.form.draft().cloned() else {
        return rsx! {};
    };
    let editing = current.form.editing_id().is_some();

    let submit_client = client.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let client = submit_client.clone();
        saving.set(true);
        spawn(async move {
            let started = state.peek().clone();
            let landed = controller::submit(&client, &started).await;
            let next = state.peek().clone().land(landed);
            state.set(next);
            saving.set(false);
        });
    };

    let handle_delete = move |_| {
        if saving() {
            return;
        }
        let client = client.clone();
        saving.set(true);
        spawn(async move {
            let started = state.peek().clone();
            let landed = controller::delete(&client, &started).await;
            let next = state.peek().clone().land(landed);
            state.set(next);
            saving.set(false);
        });
    };

    rsx! {
        form {
            class: "contact-form",
            onsubmit: handle_submit,

            if let Some(error) = &current.error {
                div { class: "banner", "{error}" }
            }

            label { r#for: "contact-name", "Name" }
            input {
                id: "contact-name",
                r#type: "text",
                value: "{draft.name}",
                disabled: saving(),
                oninput: move |evt: FormEvent| state.set(state().set_name(evt.value())),
            }

            label { r#for: "contact-email", "Email" }
            input {
                id: "contact-email",
                r#type: "email",
                class: if current.email_error.is_some() { "invalid" },
                value: "{draft.email}",
                disabled: saving(),
                oninput: move |evt: FormEvent| state.set(state().set_email(evt.value())),
            }
            if let Some(error) = &current.email_error {
                p { class: "field-error", "{error}" }
            }

            div {
                class: "form-actions",
                if editing {
                    button {
                        class: "button danger",
                        r#type: "button",
                        disabled: saving(),
                        onclick: handle_delete,
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                        span { "Delete" }
                    }
                }
                button {
                    class: "button",
                    r#type: "button",
                    disabled: saving(),
                    onclick: move |_| state.set(state().cancel()),
                    "Cancel"
                }
                button {
                    class: "button primary",
                    r#type: "submit",
                    disabled: saving(),
                    if editing { "Save" } else { "Add" }
                }
            }
        }
    }
}
