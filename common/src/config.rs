use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use anyhow::{bail, Context, Result};

/// 默认配置文件位置，按顺序探测
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config/neurowatch.toml", "../config/neurowatch.toml"];

/// 服务配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroWatchConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

/// 监听地址
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// 跨域配置，"*" 表示允许任意来源
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NeuroWatchConfig {
    /// 从TOML文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// 确定配置来源：命令行指定的路径 > 默认路径 > 内置默认值
    pub fn resolve(explicit: Option<&str>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(PathBuf::from(path))));
        }

        for candidate in DEFAULT_CONFIG_PATHS {
            let path = Path::new(candidate);
            if path.exists() {
                return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
            }
        }

        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }

        if tracing::Level::from_str(&self.logging.level).is_err() {
            bail!("logging.level is not a valid level: {}", self.logging.level);
        }

        if self.cors.allowed_origins.is_empty() {
            bail!("cors.allowed_origins must contain at least one origin (use \"*\" for any)");
        }

        Ok(())
    }

    /// 监听地址，形如 `0.0.0.0:8000`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
