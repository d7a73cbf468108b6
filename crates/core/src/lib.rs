pub mod backend;
pub mod domain;
pub mod notice;
pub mod search;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub mod config {
    use anyhow::Context;
    use reqwest::Url;

    pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub backend_url: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                backend_url: std::env::var("NEWSDESK_BACKEND_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// Backend origin; falls back to the local development server.
        pub fn backend_url(&self) -> anyhow::Result<Url> {
            let raw = self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL);
            Url::parse(raw).with_context(|| format!("NEWSDESK_BACKEND_URL is not a valid url: {raw}"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_to_local_backend() {
            let settings = Settings {
                backend_url: None,
                sentry_dsn: None,
            };
            assert_eq!(settings.backend_url().unwrap().as_str(), "http://localhost:8000/");
        }

        #[test]
        fn rejects_malformed_backend_url() {
            let settings = Settings {
                backend_url: Some("localhost 8000".to_string()),
                sentry_dsn: None,
            };
            assert!(settings.backend_url().is_err());
        }
    }
}
