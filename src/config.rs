//! 应用配置
//!
//! 配置文件 `~/.config/fanla-notify/config.json`（JSON 格式，所有字段可选）：
//! ```json
//! { "api_level": 34, "registry_path": "/path/to/channels.json" }
//! ```
//! 文件不存在时使用默认值；命令行参数优先于配置文件。
//! 渠道定义是编译时内置的，不从配置读取。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::notification::{FileRegistry, PlatformCapability, CHANNELS_MIN_API_LEVEL};

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 宿主平台 API level（未设置时视为支持渠道）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_level: Option<u32>,
    /// 渠道注册表文件路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fanla-notify")
            .join("config.json")
    }

    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// 从指定路径加载，文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// 用命令行参数覆盖
    pub fn with_overrides(mut self, api_level: Option<u32>, registry_path: Option<PathBuf>) -> Self {
        if api_level.is_some() {
            self.api_level = api_level;
        }
        if registry_path.is_some() {
            self.registry_path = registry_path;
        }
        self
    }

    pub fn capability(&self) -> PlatformCapability {
        PlatformCapability::from_api_level(self.api_level.unwrap_or(CHANNELS_MIN_API_LEVEL))
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(FileRegistry::default_path)
    }
}
