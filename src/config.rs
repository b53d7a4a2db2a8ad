use crate::ai::DEFAULT_DEPTH;

/// Deepest search the configuration accepts.
const MAX_DEPTH: u32 = 8;

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Plies searched for every engine reply.
    pub search_depth: u32,
    /// Consult the opening book before searching.
    pub opening_book: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("HOST").unwrap_or(defaults.host),
            search_depth: lookup("CHESS_SEARCH_DEPTH")
                .and_then(|v| v.parse::<u32>().ok())
                .map_or(defaults.search_depth, |d| d.clamp(1, MAX_DEPTH)),
            opening_book: lookup("CHESS_OPENING_BOOK")
                .map_or(defaults.opening_book, |v| {
                    !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "off")
                }),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 9999,
            host: "0.0.0.0".to_string(),
            search_depth: DEFAULT_DEPTH,
            opening_book: true,
        }
    }
}
