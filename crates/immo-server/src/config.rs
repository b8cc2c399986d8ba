//! Server configuration, loaded from environment variables at startup.
//!
//! Only ambient settings live here. The upstream space, endpoint and
//! generation parameters are constants in `immo-gradio`.

#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (`IMMO_BIND`, default `0.0.0.0:3000`).
    pub bind_address: String,

    /// Emit log records as newline-delimited JSON (`IMMO_LOG_JSON`).
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("IMMO_BIND")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_json: std::env::var("IMMO_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
