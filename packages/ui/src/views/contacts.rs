use dioxus::prelude::*;

use crate::directory::use_directory;
use crate::icons::FaPlus;
use crate::views::ModalOverlay;
use crate::{ContactCard, ContactForm, Icon, SearchBar};

/// The contacts screen: search, list, and the add/edit modal.
#[component]
pub fn Contacts() -> Element {
    let mut state = use_directory();
    let current = state();
    let title = if current.form.editing_id().is_some() {
        "Edit Contact"
    } else {
        "Add Contact"
    };

    rsx! {
        div {
            class: "contacts",
            header {
                class: "contacts-header",
                h1 { "Contacts" }
                button {
                    class: "button primary",
                    r#type: "button",
                    onclick: move |_| state.set(state().open_add()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "Add Contact" }
                }
            }

            SearchBar {
                query: current.query.clone(),
                on_change: move |query| state.set(state().set_query(query)),
                on_clear: move |_| state.set(state().clear_query()),
            }

            if !current.form.is_open() {
                if let Some(error) = &current.error {
                    div { class: "banner", "{error}" }
                }
            }

            if let Some(message) = current.empty_message() {
                p { class: "empty", "{message}" }
            } else {
                ul {
                    class: "contact-list",
                    for contact in current.visible() {
                        ContactCard {
                            key: "{contact.id}",
                            contact: contact.clone(),
                            on_edit: move |contact| state.set(state().open_edit(contact)),
                        }
                    }
                }
            }

            if current.form.is_open() {
                ModalOverlay {
                    title: title.to_string(),
                    on_close: move |_| state.set(state().cancel()),
                    ContactForm {}
                }
            }
        }
    }
}
