/// Runtime settings read from the environment; CLI flags override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub log_filter: String,
}

impl AppConfig {
    pub const DEFAULT_DB_URL: &'static str = "sqlite://academy.sqlite3";
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `ACADEMY_DB_URL` picks the database; `ACADEMY_LOG` wins over
    /// `RUST_LOG` for the log filter.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let db_url = non_blank("ACADEMY_DB_URL")
            .map_or_else(|| Self::DEFAULT_DB_URL.to_owned(), normalize_sqlite_url);
        let log_filter = non_blank("ACADEMY_LOG")
            .or_else(|| non_blank("RUST_LOG"))
            .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_owned());
        Self { db_url, log_filter }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_url: Self::DEFAULT_DB_URL.to_owned(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn academy_log_wins_over_rust_log() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("ACADEMY_LOG", "services=debug"),
        ]));
        assert_eq!(config.log_filter, "services=debug");

        let config = AppConfig::from_lookup(lookup(&[("RUST_LOG", "warn"), ("ACADEMY_LOG", " ")]));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn absolute_paths_become_sqlite_urls() {
        assert_eq!(
            normalize_sqlite_url("/tmp/academy.db".into()),
            "sqlite:///tmp/academy.db"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/a.db".into()),
            "sqlite:///tmp/a.db"
        );
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        let config = AppConfig::from_lookup(lookup(&[("ACADEMY_DB_URL", "sqlite://x.db")]));
        assert_eq!(config.db_url, "sqlite://x.db");
    }
}
