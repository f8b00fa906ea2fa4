//! 通知渠道注册表 - 宿主系统渠道存储的抽象
//!
//! 注册表由宿主系统持有，注册器只通过 `Registry` trait 访问它：
//! - `MemoryRegistry`：进程内实现，用于测试和嵌入式宿主
//! - `FileRegistry`：本地 JSON 文件实现，作为桌面宿主的渠道注册表

pub mod file;
pub mod memory;

pub use file::FileRegistry;
pub use memory::MemoryRegistry;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::ChannelDefinition;
use super::importance::Importance;

/// 注册表中已存在的渠道
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredChannel {
    #[serde(flatten)]
    pub definition: ChannelDefinition,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl RegisteredChannel {
    pub fn new(definition: ChannelDefinition) -> Self {
        Self {
            definition,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }
}

/// 渠道注册表 trait
pub trait Registry {
    /// 按 ID 查询渠道
    fn get(&self, id: &str) -> Result<Option<RegisteredChannel>>;

    /// 创建渠道。只创建不更新：ID 已存在时保持原样并返回 `false`，
    /// 本次新建时返回 `true`
    fn create(&mut self, definition: &ChannelDefinition) -> Result<bool>;

    /// 列出所有渠道（按 ID 排序）
    fn list(&self) -> Result<Vec<RegisteredChannel>>;

    /// 删除渠道，返回是否存在
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// 修改渠道重要程度（对应用户在系统设置里的操作），返回是否存在
    fn update_importance(&mut self, id: &str, importance: Importance) -> Result<bool>;
}
