use std::env;

use crate::models::Principal;

/// AppConfig
///
/// Holds the application's entire configuration state. It is loaded once at startup and never
/// mutated afterwards. `main` consumes it while wiring the server: it picks the log format and
/// the to-do store, and seeds the `StaticIdentity` that goes into `AppState`. Requests never
/// see it directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and whether a database is mandatory.
    pub env: Env,
    // Postgres connection string. `None` in local mode means the in-memory to-do store is used.
    pub db_url: Option<String>,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // The identity fixture every request acts as. Changed only by redeploying configuration.
    pub principal: Principal,
}

/// Env
///
/// Defines the runtime context: pretty logs and optional infrastructure locally,
/// JSON logs and mandatory infrastructure in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Safe, non-panicking configuration for test scaffolding. The principal mirrors the
    /// deployment defaults: logged in and verified, but not an administrator.
    fn default() -> Self {
        Self {
            env: Env::Local,
            db_url: None,
            bind_addr: "127.0.0.1:3000".to_string(),
            principal: Principal::new(true, true, false),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if `DATABASE_URL` is missing in production, or if one of the `PRINCIPAL_*`
    /// flags holds a value that is not a recognizable boolean.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let db_url = match env {
            Env::Production => Some(
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
            ),
            // Local development falls back to the in-memory store.
            Env::Local => env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let principal = Principal::new(
            flag_from_env("PRINCIPAL_IS_AUTHENTICATED", true),
            flag_from_env("PRINCIPAL_EMAIL_VERIFIED", true),
            flag_from_env("PRINCIPAL_IS_PRIVILEGED", false),
        );

        Self {
            env,
            db_url,
            bind_addr,
            principal,
        }
    }
}

/// Reads a boolean flag, returning `default` when the variable is unset.
///
/// # Panics
/// Panics when the variable is set to something other than a boolean spelling.
fn flag_from_env(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => parse_flag(&raw)
            .unwrap_or_else(|| panic!("FATAL: {key} must be a boolean, got {raw:?}")),
        Err(_) => default,
    }
}

/// parse_flag
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
