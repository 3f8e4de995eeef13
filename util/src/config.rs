//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Callers normally use the free accessor functions at the bottom of this module
//! (`config::port()`, `config::jwt_secret()`, ...) rather than holding the lock.

use std::env;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub frontend_url: String,
    pub admin_url: String,
    pub public_url: String,
    pub media_storage_root: String,
    pub admin_email: String,
    pub admin_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub sender_email: String,
    pub user_email: String,
    pub email_from_name: String,
    pub gemini_api_key: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing values fall back to development defaults. Secrets default to empty
    /// strings; `main` refuses to start without a `JWT_SECRET`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "metrology-store"),
            log_level: var_or("LOG_LEVEL", "api=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/store.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 4000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 60 * 24 * 7),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_default(),
            admin_url: env::var("ADMIN_URL").unwrap_or_default(),
            public_url: var_or("PUBLIC_URL", "http://127.0.0.1:4000"),
            media_storage_root: var_or("MEDIA_STORAGE_ROOT", "data/uploads"),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_default(),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),
            smtp_host: var_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: parsed_or("SMTP_PORT", 587),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            sender_email: env::var("SENDER_EMAIL").unwrap_or_default(),
            user_email: env::var("USER_EMAIL").unwrap_or_default(),
            email_from_name: var_or("EMAIL_FROM_NAME", "Metrology Store"),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_frontend_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.frontend_url = value.into());
    }

    pub fn set_public_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.public_url = value.into());
    }

    pub fn set_media_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.media_storage_root = value.into());
    }

    pub fn set_admin_email(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.admin_email = value.into());
    }

    pub fn set_admin_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.admin_password = value.into());
    }

    pub fn set_smtp_username(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.smtp_username = value.into());
    }

    pub fn set_smtp_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.smtp_password = value.into());
    }

    pub fn set_user_email(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.user_email = value.into());
    }

    pub fn set_gemini_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.gemini_api_key = value.into());
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn frontend_url() -> String {
    AppConfig::global().frontend_url.clone()
}

pub fn admin_url() -> String {
    AppConfig::global().admin_url.clone()
}

pub fn public_url() -> String {
    AppConfig::global().public_url.clone()
}

pub fn media_storage_root() -> String {
    AppConfig::global().media_storage_root.clone()
}

pub fn admin_email() -> String {
    AppConfig::global().admin_email.clone()
}

pub fn admin_password() -> String {
    AppConfig::global().admin_password.clone()
}

pub fn smtp_host() -> String {
    AppConfig::global().smtp_host.clone()
}

pub fn smtp_port() -> u16 {
    AppConfig::global().smtp_port
}

pub fn smtp_username() -> String {
    AppConfig::global().smtp_username.clone()
}

pub fn smtp_password() -> String {
    AppConfig::global().smtp_password.clone()
}

/// Address used in the `From:` header. Falls back to the SMTP login.
pub fn sender_email() -> String {
    let cfg = AppConfig::global();
    if cfg.sender_email.is_empty() {
        cfg.smtp_username.clone()
    } else {
        cfg.sender_email.clone()
    }
}

/// Inbox that receives enquiry and contact notifications.
pub fn user_email() -> String {
    AppConfig::global().user_email.clone()
}

pub fn email_from_name() -> String {
    AppConfig::global().email_from_name.clone()
}

pub fn gemini_api_key() -> String {
    AppConfig::global().gemini_api_key.clone()
}
