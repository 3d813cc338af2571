use dioxus::prelude::*;

use ui::{Contacts, DirectoryProvider};

#[cfg(feature = "server")]
fn main() -> anyhow::Result<()> {
    init_tracing();
    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use api::db::{self, PgStore};
    use api::routes;
    use api::settings::Settings;
    use api::ContactService;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_http::trace::TraceLayer;

    let settings = Settings::new().context("failed to load settings")?;

    let pool = db::connect(&settings.database)
        .await
        .context("failed to connect to database")?;
    db::migrate(&pool).await.context("failed to run migrations")?;

    let cors = routes::cors_layer(&settings.http.client_origin)
        .with_context(|| format!("invalid client origin {:?}", settings.http.client_origin))?;

    // REST API first, then the Dioxus application for everything else
    let router = routes::router(ContactService::new(PgStore::new(pool)))
        .layer(cors)
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(TraceLayer::new_for_http());

    // Configured address, else the one from dx serve, else localhost:8080
    let addr = match settings.http.address {
        Some(addr) => addr,
        None => dioxus::cli_config::fullstack_address_or_localhost().to_string(),
    };
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Contacts" }
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        DirectoryProvider {
            Contacts {}
        }
    }
}
