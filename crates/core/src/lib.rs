pub mod catalog;
pub mod domain;
pub mod recommend;

pub use catalog::Catalog;
pub use domain::answers::UserAnswers;
pub use domain::recommendation::RecommendationResult;
pub use recommend::recommend;

pub mod config {
    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub catalog_path: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                catalog_path: non_empty_var("CATALOG_PATH"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
