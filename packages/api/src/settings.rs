use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Full connection string; takes precedence over the parts above.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u32,
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            user: "contacts".into(),
            password: "password".into(),
            host: "localhost".into(),
            port: 5432,
            name: "contacts".into(),
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Listen address; when unset the Dioxus CLI address (or localhost:8080) is used.
    pub address: Option<String>,
    /// The one origin allowed to call the API cross-origin.
    pub client_origin: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            address: None,
            client_origin: "http://localhost:5173".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub http: HttpSettings,
}

impl Settings {
    /// Load from `config.toml` (optional), `CONTACTS_*` variables and `DATABASE_URL`.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_file("config.toml")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("database.user", defaults.database.user)?
            .set_default("database.password", defaults.database.password)?
            .set_default("database.host", defaults.database.host)?
            .set_default("database.port", i64::from(defaults.database.port))?
            .set_default("database.name", defaults.database.name)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.acquire_timeout_secs",
                i64::from(defaults.database.acquire_timeout_secs),
            )?
            .set_default("http.client_origin", defaults.http.client_origin)?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("CONTACTS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}
