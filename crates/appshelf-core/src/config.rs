use std::{fs, path::Path, time::Duration};

use appshelf_schema::UserProfile;
use serde::{Deserialize, Serialize};

use crate::auth::StaticCredential;
use crate::error::{CoreError, CoreResult};

pub const MAIN_CONFIG_FILE: &str = "main.yaml";

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "password123".to_string()
}

fn default_profile() -> UserProfile {
    UserProfile {
        name: "Admin".to_string(),
        avatar_url: "https://i.pravatar.cc/150?u=admin".to_string(),
    }
}

fn default_splash_ms() -> u64 {
    2500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// The single administrator account.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_profile")]
    pub profile: UserProfile,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            profile: default_profile(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

impl AuthConfig {
    pub fn credential(&self) -> StaticCredential {
        StaticCredential::new(&self.username, &self.password)
    }

    pub fn uses_default_password(&self) -> bool {
        self.password == default_password()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashConfig {
    #[serde(default = "default_splash_ms")]
    pub duration_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_splash_ms(),
        }
    }
}

impl SplashConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML list of seed items, relative to the config directory.
    #[serde(default)]
    pub seed_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl MainConfig {
    /// Apply `APPSHELF_*` overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("APPSHELF_BIND") {
            self.server.bind = bind;
        }
        if let Some(username) = lookup("APPSHELF_ADMIN_USERNAME") {
            self.auth.username = username;
        }
        if let Some(password) = lookup("APPSHELF_ADMIN_PASSWORD") {
            self.auth.password = password;
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.auth.username.trim().is_empty() {
            return Err(CoreError::Config("auth.username must not be empty".into()));
        }
        if self.auth.password.is_empty() {
            return Err(CoreError::Config("auth.password must not be empty".into()));
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(CoreError::Config(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

/// Read `<config_dir>/main.yaml` (defaults when absent) and apply environment overrides.
pub fn load_config(config_dir: &Path) -> CoreResult<MainConfig> {
    let path = config_dir.join(MAIN_CONFIG_FILE);
    let mut config = if path.exists() {
        let content = fs::read_to_string(&path).map_err(|e| CoreError::io(&path, e))?;
        serde_yaml::from_str::<MainConfig>(&content).map_err(|e| CoreError::yaml(&path, e))?
    } else {
        tracing::debug!(path = %path.display(), "no main config, using defaults");
        MainConfig::default()
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.splash.duration_ms, 2500);
        assert!(config.catalog.seed_file.is_none());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MAIN_CONFIG_FILE),
            "auth:\n  password: s3cret\nsplash:\n  duration_ms: 0\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "s3cret");
        assert_eq!(config.auth.profile.name, "Admin");
        assert_eq!(config.splash.duration(), Duration::ZERO);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join(MAIN_CONFIG_FILE), "auth: [unclosed").unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, CoreError::Yaml { .. }));
        assert!(err.to_string().contains(MAIN_CONFIG_FILE));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("APPSHELF_BIND", "0.0.0.0:8080"),
            ("APPSHELF_ADMIN_PASSWORD", "rotated"),
        ]
        .into_iter()
        .collect();

        let mut config = MainConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.auth.password, "rotated");
        assert_eq!(config.auth.username, "admin");
        assert!(!config.auth.uses_default_password());
    }

    #[test]
    fn validate_rejects_bad_bind() {
        let mut config = MainConfig::default();
        config.server.bind = "localhost".into();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn debug_redacts_password() {
        let config = MainConfig::default();
        assert!(!format!("{config:?}").contains("password123"));
    }
}
