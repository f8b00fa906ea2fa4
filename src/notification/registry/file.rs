//! 文件注册表 - 本地 JSON 文件读写
//!
//! 桌面宿主没有系统级渠道注册表，用 `~/.config/fanla-notify/channels.json`
//! 代替。所有读写都在 `channels.json.lock` 文件锁保护下进行，多个进程
//! 同时注册时由文件锁串行化。

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Registry, RegisteredChannel};
use crate::notification::channel::ChannelDefinition;
use crate::notification::importance::Importance;

/// channels.json 文件格式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChannelsFile {
    #[serde(default)]
    channels: Vec<RegisteredChannel>,
}

impl ChannelsFile {
    fn find(&self, id: &str) -> Option<&RegisteredChannel> {
        self.channels.iter().find(|c| c.id() == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut RegisteredChannel> {
        self.channels.iter_mut().find(|c| c.id() == id)
    }
}

/// 基于本地 JSON 文件的渠道注册表
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    /// 使用指定文件路径（文件不存在时视为空注册表）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认存储路径
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fanla-notify")
            .join("channels.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 同目录下的附属文件：在文件名后追加后缀，如 `channels.json.lock`
    fn sidecar_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn lock_file_path(&self) -> PathBuf {
        self.sidecar_path(".lock")
    }

    fn temp_file_path(&self) -> PathBuf {
        self.sidecar_path(".tmp")
    }

    /// 读取 channels.json（内部使用，不加锁）
    fn read_internal(&self) -> Result<ChannelsFile> {
        if !self.path.exists() {
            return Ok(ChannelsFile::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read channel registry {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt channel registry {}", self.path.display()))
    }

    /// 写入 channels.json（内部使用，不加锁）：先写临时文件再原子替换
    fn write_internal(&self, file: &ChannelsFile) -> Result<()> {
        let temp_path = self.temp_file_path();
        let written = fs::write(&temp_path, serde_json::to_string_pretty(file)?)
            .and_then(|_| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| {
                format!("Cannot write channel registry {}", self.path.display())
            });
        }
        Ok(())
    }

    fn open_lock_file(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(self.lock_file_path())?;
        Ok(lock_file)
    }

    /// 在排他锁保护下执行读-改-写
    fn with_locked_file<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut ChannelsFile) -> Result<(T, bool)>,
    {
        let lock_file = self.open_lock_file()?;
        lock_file.lock_exclusive()?;

        let result = (|| {
            let mut file = self.read_internal()?;
            let (result, changed) = operation(&mut file)?;
            if changed {
                file.channels.sort_by(|a, b| a.id().cmp(b.id()));
                self.write_internal(&file)?;
            }
            Ok(result)
        })();

        let _ = lock_file.unlock();
        result
    }

    /// 在共享锁保护下只读
    fn with_locked_file_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&ChannelsFile) -> T,
    {
        let lock_file = self.open_lock_file()?;
        lock_file.lock_shared()?;

        let result = self.read_internal().map(|file| operation(&file));

        let _ = lock_file.unlock();
        result
    }
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self::open(Self::default_path())
    }
}

impl Registry for FileRegistry {
    fn get(&self, id: &str) -> Result<Option<RegisteredChannel>> {
        self.with_locked_file_read(|file| file.find(id).cloned())
    }

    fn create(&mut self, definition: &ChannelDefinition) -> Result<bool> {
        self.with_locked_file(|file| {
            if file.find(&definition.id).is_some() {
                debug!(channel_id = %definition.id, "Channel already in registry file");
                return Ok((false, false));
            }
            file.channels.push(RegisteredChannel::new(definition.clone()));
            Ok((true, true))
        })
    }

    fn list(&self) -> Result<Vec<RegisteredChannel>> {
        self.with_locked_file_read(|file| {
            let mut channels = file.channels.clone();
            channels.sort_by(|a, b| a.id().cmp(b.id()));
            channels
        })
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        self.with_locked_file(|file| {
            let before = file.channels.len();
            file.channels.retain(|c| c.id() != id);
            let removed = file.channels.len() != before;
            Ok((removed, removed))
        })
    }

    fn update_importance(&mut self, id: &str, importance: Importance) -> Result<bool> {
        self.with_locked_file(|file| match file.find_mut(id) {
            Some(channel) => {
                channel.definition.importance = importance;
                Ok((true, true))
            }
            None => Ok((false, false)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_in(dir: &TempDir) -> FileRegistry {
        FileRegistry::open(dir.path().join("channels.json"))
    }

    #[test]
    fn test_missing_file_is_empty_registry() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);

        assert!(registry.list().unwrap().is_empty());
        assert!(registry.get("anything").unwrap().is_none());
        assert!(!registry.path().exists());
    }

    #[test]
    fn test_create_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        registry
            .create(&ChannelDefinition::new("a", "A", Importance::High).with_lights(true))
            .unwrap();

        let reopened = registry_in(&dir);
        let channel = reopened.get("a").unwrap().unwrap();
        assert_eq!(channel.definition.importance, Importance::High);
        assert!(channel.definition.lights_enabled);
    }

    #[test]
    fn test_create_keeps_existing_entry() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        assert!(registry
            .create(&ChannelDefinition::new("a", "A", Importance::High))
            .unwrap());
        let first = registry.get("a").unwrap().unwrap();

        assert!(!registry
            .create(&ChannelDefinition::new("a", "B", Importance::Low))
            .unwrap());
        let second = registry.get("a").unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.list().unwrap().len(), 1);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let mut registry = FileRegistry::open(dir.path().join("nested/deeper/channels.json"));
        registry
            .create(&ChannelDefinition::new("a", "A", Importance::Default))
            .unwrap();
        assert!(registry.path().exists());
    }

    #[test]
    fn test_sidecar_files_append_to_file_name() {
        let dir = TempDir::new().unwrap();
        let mut registry = FileRegistry::open(dir.path().join("channels.txt"));
        registry
            .create(&ChannelDefinition::new("a", "A", Importance::Default))
            .unwrap();

        assert!(dir.path().join("channels.txt").exists());
        assert!(dir.path().join("channels.txt.lock").exists());
        assert!(!dir.path().join("channels.json.lock").exists());
        assert!(!dir.path().join("channels.txt.tmp").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("channels.json");
        // 目标位置是目录，临时文件写入成功但 rename 失败
        fs::create_dir_all(path.join("occupied")).unwrap();

        let registry = FileRegistry::open(&path);
        let result = registry.write_internal(&ChannelsFile::default());

        assert!(result.is_err());
        assert!(!dir.path().join("channels.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.path(), "not json").unwrap();

        let err = registry.list().unwrap_err();
        assert!(err.to_string().contains("Corrupt channel registry"));
    }

    #[test]
    fn test_update_importance_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        registry
            .create(&ChannelDefinition::new("a", "A", Importance::High))
            .unwrap();

        assert!(registry.update_importance("a", Importance::Low).unwrap());
        assert_eq!(
            registry.get("a").unwrap().unwrap().definition.importance,
            Importance::Low
        );
        assert!(!registry.update_importance("zzz", Importance::Low).unwrap());

        assert!(registry.delete("a").unwrap());
        assert!(!registry.delete("a").unwrap());
        assert!(registry.list().unwrap().is_empty());
    }
}
