use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "DiabCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the web front end binds to when `DIABCARE_BIND` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Prediction service location when `DIABCARE_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Delay between the three processing captions shown before `/predict`.
pub const DEFAULT_STEP_DELAY_MS: u64 = 500;

/// Delay between a successful prediction and the category picker.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

/// Idle lifetime of a visitor's prediction session.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

/// Default `EnvFilter` directive when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "diabcare=info,diabcare_lib=info,tower_http=info"
}

/// Runtime configuration for the web front end.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the prediction service, without trailing slash.
    pub backend_url: String,
    pub step_delay: Duration,
    pub reveal_delay: Duration,
    /// `None` keeps backend calls unbounded.
    pub request_timeout: Option<Duration>,
    pub session_ttl: Duration,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            request_timeout: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Missing keys use defaults. Unparseable values are logged and
    /// replaced by the default rather than aborting startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("DIABCARE_BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let request_timeout = lookup("DIABCARE_REQUEST_TIMEOUT_SECS")
            .and_then(|raw| parse_or_warn::<u64>("DIABCARE_REQUEST_TIMEOUT_SECS", &raw))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            bind_addr: load(&lookup, "DIABCARE_BIND", DEFAULT_BIND_ADDR),
            backend_url,
            step_delay: Duration::from_millis(load(
                &lookup,
                "DIABCARE_STEP_DELAY_MS",
                &DEFAULT_STEP_DELAY_MS.to_string(),
            )),
            reveal_delay: Duration::from_millis(load(
                &lookup,
                "DIABCARE_REVEAL_DELAY_MS",
                &DEFAULT_REVEAL_DELAY_MS.to_string(),
            )),
            request_timeout,
            session_ttl: Duration::from_secs(load(
                &lookup,
                "DIABCARE_SESSION_TTL_SECS",
                &DEFAULT_SESSION_TTL_SECS.to_string(),
            )),
        }
    }

    /// Full URL of a backend route, e.g. `endpoint("predict")`.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.backend_url, route.trim_start_matches('/'))
    }
}

fn load<F, T>(lookup: &F, key: &str, default: &str) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let fallback = || {
        default
            .parse::<T>()
            .unwrap_or_else(|e| panic!("default for {key} must parse: {e}"))
    };

    match lookup(key) {
        Some(raw) => parse_or_warn(key, &raw).unwrap_or_else(|| {
            tracing::warn!(key, default, "Falling back to default");
            fallback()
        }),
        None => {
            tracing::debug!(key, default, "Not set, using default");
            fallback()
        }
    }
}

fn parse_or_warn<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| tracing::warn!(key, value = raw, "Invalid value: {e}"))
        .ok()
}
