use dioxus::prelude::*;
use store::Contact;

use crate::icons::FaPenToSquare;
use crate::Icon;

#[component]
pub fn ContactCard(contact: Contact, on_edit: EventHandler<Contact>) -> Element {
    let edited = contact.clone();

    rsx! {
        li {
            class: "contact-card",
            div {
                class: "contact-details",
                span { class: "contact-name", "{contact.name}" }
                span { class: "contact-email", "{contact.email}" }
            }
            button {
                class: "icon-button",
                r#type: "button",
                title: "Edit contact",
                onclick: move |_| on_edit.call(edited.clone()),
                Icon { icon: FaPenToSquare, width: 14, height: 14 }
            }
        }
    }
}
