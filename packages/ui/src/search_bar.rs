use dioxus::prelude::*;

use crate::icons::{FaMagnifyingGlass, FaXmark};
use crate::Icon;

/// Search input over name and email. The clear button shows only while a query is set.
#[component]
pub fn SearchBar(query: String, on_change: EventHandler<String>, on_clear: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "search",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                r#type: "search",
                placeholder: "Search by name or email",
                value: "{query}",
                oninput: move |evt: FormEvent| on_change.call(evt.value()),
            }
            if !query.is_empty() {
                button {
                    class: "icon-button",
                    r#type: "button",
                    title: "Clear search",
                    onclick: move |_| on_clear.call(()),
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
        }
    }
}
