//! Directory context and hooks for the UI.

use api::HttpClient;
use dioxus::prelude::*;

use crate::controller::{self, DirectoryState};

/// Origin used when the page origin is not available.
const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Client for the REST API served from the page origin.
pub fn api_client() -> HttpClient {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return HttpClient::new(origin);
        }
    }
    HttpClient::new(DEFAULT_ORIGIN)
}

/// Get the directory state. Every transition replaces the whole snapshot.
pub fn use_directory() -> Signal<DirectoryState> {
    use_context::<Signal<DirectoryState>>()
}

pub fn use_api() -> HttpClient {
    use_context::<HttpClient>()
}

/// Provider component that owns the directory state and the API client.
/// The contact list is fetched once the app is mounted in the browser.
#[component]
pub fn DirectoryProvider(children: Element) -> Element {
    let mut state = use_signal(DirectoryState::default);
    use_context_provider(|| state);
    let client = use_context_provider(api_client);

    use_effect(move || {
        let client = client.clone();
        spawn(async move {
            let landed = controller::refresh(&client).await;
            let next = state.peek().clone().land(landed);
            state.set(next);
        });
    });

    rsx! {
        {children}
    }
}
