//! 配置系统
//! 从环境变量加载客户端配置（前缀 INCIDENT_，层级分隔符 __）

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API 源地址，例如 "http://localhost:8000"
    pub base_url: String,
    /// 所有请求共享的路径前缀
    pub prefix: String,
    /// 请求超时时间（秒），刷新请求同样受此限制
    pub timeout_secs: u64,
    /// 刷新令牌的端点（相对前缀）
    pub refresh_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 会话存储后端: memory, file
    pub backend: String,
    /// file 后端使用的文件路径
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// 事件总线缓冲容量
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub events: EventsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                prefix: "api/".to_string(),
                timeout_secs: 5,
                refresh_path: "token/refresh/".to_string(),
            },
            storage: StorageConfig {
                backend: "memory".to_string(),
                path: ".incident-session.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
            events: EventsConfig { capacity: 256 },
        }
    }
}

impl ClientConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.prefix", defaults.api.prefix)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.refresh_path", defaults.api.refresh_path)?
            .set_default("storage.backend", defaults.storage.backend)?
            .set_default("storage.path", defaults.storage.path)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("events.capacity", defaults.events.capacity as u64)?;

        settings = settings.add_source(
            Environment::with_prefix("INCIDENT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: ClientConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Message(format!("Invalid api.base_url: {}", e)))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::Message(format!(
                "api.base_url must use http or https, got {}",
                base.scheme()
            )));
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > 120 {
            return Err(ConfigError::Message(
                "api.timeout_secs must be between 1 and 120".to_string(),
            ));
        }

        if self.api.refresh_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "api.refresh_path must not be empty".to_string(),
            ));
        }

        match self.storage.backend.to_lowercase().as_str() {
            "memory" | "file" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid storage backend: {}. Must be one of: memory, file",
                    self.storage.backend
                )))
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        if self.events.capacity == 0 {
            return Err(ConfigError::Message(
                "events.capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// API 根地址（源地址 + 前缀，始终以 `/` 结尾）
    pub fn api_root(&self) -> Result<Url, ConfigError> {
        let mut base = self.api.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let prefix = self.api.prefix.trim_matches('/');
        if !prefix.is_empty() {
            base.push_str(prefix);
            base.push('/');
        }
        Url::parse(&base).map_err(|e| ConfigError::Message(format!("Invalid API root: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "INCIDENT_API__BASE_URL",
            "INCIDENT_API__TIMEOUT_SECS",
            "INCIDENT_STORAGE__BACKEND",
            "INCIDENT_LOGGING__LEVEL",
            "INCIDENT_LOGGING__FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_config_env_override() {
        clear_env();
        std::env::set_var("INCIDENT_API__BASE_URL", "https://reports.example.com");
        std::env::set_var("INCIDENT_API__TIMEOUT_SECS", "12");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api.base_url, "https://reports.example.com");
        assert_eq!(config.api.timeout_secs, 12);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        clear_env();
        std::env::set_var("INCIDENT_LOGGING__LEVEL", "invalid");

        let result = ClientConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_backend() {
        clear_env();
        std::env::set_var("INCIDENT_STORAGE__BACKEND", "cookie");

        let result = ClientConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    fn test_validation_rejects_non_http_scheme() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_root_joins_prefix() {
        let mut config = ClientConfig::default();
        config.api.base_url = "http://localhost:8000/".to_string();
        config.api.prefix = "/api".to_string();

        let root = config.api_root().unwrap();
        assert_eq!(root.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            root.join("posts/1/").unwrap().as_str(),
            "http://localhost:8000/api/posts/1/"
        );
    }
}
