//! Player configuration

/// Bridge endpoint used when nothing is configured
pub const DEFAULT_BRIDGE_URL: &str = "ws://127.0.0.1:8765/bridge";

/// Tracing filter used when neither `RUST_LOG` nor `LITERAPLAY_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "literaplay_player=debug,dioxus=info";

/// Desktop window title
pub const WINDOW_TITLE: &str = "LiteraPlay - Интерактивна Литература";

/// Minimum desktop window size (width, height)
pub const MIN_WINDOW_SIZE: (f64, f64) = (940.0, 760.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// WebSocket URL of the backend bridge
    pub bridge_url: String,
    /// Default tracing filter directive
    pub log_filter: String,
}

impl PlayerConfig {
    /// Load configuration from environment variables.
    ///
    /// `.env.local` and `.env` in the repository root are loaded first when
    /// present; real environment variables win over both.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        load_dotenv_from_repo_root();
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Derive the bridge URL from the page location: same host, `/bridge` path.
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let bridge_url = web_sys::window()
            .and_then(|w| {
                let location = w.location();
                let host = location.host().ok()?;
                let scheme = match location.protocol().ok()?.as_str() {
                    "https:" => "wss",
                    _ => "ws",
                };
                Some(format!("{scheme}://{host}/bridge"))
            })
            .unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string());

        Self {
            bridge_url,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Build from a variable lookup. Blank values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            bridge_url: var("LITERAPLAY_BRIDGE_URL")
                .or_else(|| var("BRIDGE_WS_URL"))
                .unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string()),
            log_filter: var("LITERAPLAY_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(vars: &[(&str, &str)]) -> PlayerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlayerConfig::resolve(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve_with(&[]);
        assert_eq!(config.bridge_url, DEFAULT_BRIDGE_URL);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_primary_url_wins_over_fallback() {
        let config = resolve_with(&[
            ("LITERAPLAY_BRIDGE_URL", "ws://10.0.0.2:9000/bridge"),
            ("BRIDGE_WS_URL", "ws://legacy:1/bridge"),
        ]);
        assert_eq!(config.bridge_url, "ws://10.0.0.2:9000/bridge");
    }

    #[test]
    fn test_fallback_url_and_blank_values() {
        let config = resolve_with(&[
            ("LITERAPLAY_BRIDGE_URL", "   "),
            ("BRIDGE_WS_URL", "ws://legacy:1/bridge"),
            ("LITERAPLAY_LOG", "literaplay_player=trace"),
        ]);
        assert_eq!(config.bridge_url, "ws://legacy:1/bridge");
        assert_eq!(config.log_filter, "literaplay_player=trace");
    }
}
