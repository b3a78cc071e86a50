use std::env;

use tracing::info;

/// Application configuration supplied before activation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the statistics endpoint.
    pub api_key: String,

    /// Gates diagnostic logging only; no behavioral change.
    pub debug: bool,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            api_key: required_env("TUBELENS_API_KEY"),
            debug: env::var("TUBELENS_DEBUG")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Log the loaded config with the credential masked.
    pub fn log_redacted(&self) {
        info!(
            api_key = redact(&self.api_key).as_str(),
            debug = self.debug,
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn redact(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_keeps_short_secrets_opaque() {
        assert_eq!(redact("abc"), "****");
        assert_eq!(redact("abcdefgh"), "abcd****");
    }
}
