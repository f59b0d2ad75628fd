//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for contacts-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:5000"`).
    ///
    /// A bare `PORT` variable replaces only the port component.
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://contacts.db?mode=rwc"`).
    /// Use `"sqlite::memory:"` for a throwaway store.
    pub database_url: String,

    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Reject create requests whose email does not look like `x@y.z`.
    ///
    /// Off by default: the API only requires the field to be present.
    pub strict_email: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_owned(),
            database_url: "sqlite://contacts.db?mode=rwc".to_owned(),
            db_max_connections: 5,
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: true,
            strict_email: false,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut bind_address = lookup("CONTACTS_BIND").unwrap_or(defaults.bind_address);
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            bind_address = with_port(&bind_address, port);
        }

        Self {
            bind_address,
            database_url: lookup("CONTACTS_DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: lookup("CONTACTS_DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db_max_connections),
            log_level: lookup("CONTACTS_LOG").unwrap_or(defaults.log_level),
            log_json: lookup("CONTACTS_LOG_JSON")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.log_json),
            cors_allowed_origins: lookup("CONTACTS_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_swagger: lookup("CONTACTS_ENABLE_SWAGGER")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_swagger),
            strict_email: lookup("CONTACTS_STRICT_EMAIL")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.strict_email),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_flag(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn with_port(bind_address: &str, port: u16) -> String {
    let host = match bind_address.rsplit_once(':') {
        Some((host, _)) => host,
        None => bind_address,
    };
    format!("{host}:{port}")
}
