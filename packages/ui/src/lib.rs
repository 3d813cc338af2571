//! This crate contains the contacts directory UI shared by every platform.
//!
//! [`controller`] holds the client state and the submit/delete/refresh
//! protocols with no Dioxus dependency; the components render a
//! [`DirectoryState`] signal provided by [`DirectoryProvider`].

use dioxus::prelude::*;

pub mod controller;
pub use controller::{DirectoryState, Form};

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod directory;
pub use directory::{api_client, use_api, use_directory, DirectoryProvider};

mod contact_card;
pub use contact_card::ContactCard;

mod contact_form;
pub use contact_form::ContactForm;

mod search_bar;
pub use search_bar::SearchBar;

pub mod views;
pub use views::{Contacts, ModalOverlay};

pub const MAIN_CSS: Asset = asset!("/assets/main.css");
