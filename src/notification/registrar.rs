//! 渠道注册器 - 应用启动时把内置渠道写入宿主注册表
//!
//! 规则：
//! 1. 同一次调用中渠道 ID 必须唯一，否则在访问注册表之前整体拒绝
//! 2. 平台不支持渠道（legacy）时直接跳过，这是正常结果而不是错误
//! 3. 已存在的渠道保持原样，不覆盖用户在系统设置中做的修改
//! 4. 注册表故障统一转换为 `RegistryUnavailable`，由调用方决定是否继续启动

use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::channel::ChannelDefinition;
use super::platform::PlatformCapability;
use super::registry::Registry;

/// 注册结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationResult {
    /// 平台不支持渠道，未做任何修改
    Skipped,
    /// 新创建的渠道数量（已存在的不计入）
    Registered(usize),
}

/// 注册错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// 同一次调用中出现重复的渠道 ID
    #[error("Duplicate channel id: {0}")]
    DuplicateChannelId(String),

    /// 宿主注册表不可用
    #[error("Notification registry unavailable: {0}")]
    RegistryUnavailable(String),
}

impl RegistrationError {
    fn registry(error: anyhow::Error) -> Self {
        RegistrationError::RegistryUnavailable(format!("{:#}", error))
    }
}

/// 注册器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrarState {
    NotStarted,
    Completed,
}

/// 渠道注册器
pub struct ChannelRegistrar<R: Registry> {
    registry: R,
    state: RegistrarState,
}

impl<R: Registry> ChannelRegistrar<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            state: RegistrarState::NotStarted,
        }
    }

    pub fn state(&self) -> RegistrarState {
        self.state
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// 计算本次注册会新建哪些渠道（不修改注册表）
    pub fn plan<'a>(
        &self,
        definitions: &'a [ChannelDefinition],
        capability: PlatformCapability,
    ) -> Result<Vec<&'a ChannelDefinition>, RegistrationError> {
        validate_unique_ids(definitions)?;

        if !capability.supports_channels() {
            return Ok(Vec::new());
        }

        let mut missing = Vec::new();
        for definition in definitions {
            let existing = self
                .registry
                .get(&definition.id)
                .map_err(RegistrationError::registry)?;
            match existing {
                Some(_) => {
                    debug!(channel_id = %definition.id, "Channel already registered, leaving untouched");
                }
                None => missing.push(definition),
            }
        }
        Ok(missing)
    }

    /// 注册渠道
    pub fn register_channels(
        &mut self,
        definitions: &[ChannelDefinition],
        capability: PlatformCapability,
    ) -> Result<RegistrationResult, RegistrationError> {
        let missing = self.plan(definitions, capability)?;

        if !capability.supports_channels() {
            info!(capability = %capability, "Platform has no notification channels, skipping registration");
            self.state = RegistrarState::Completed;
            return Ok(RegistrationResult::Skipped);
        }

        let mut created = 0;
        for definition in missing {
            match self.registry.create(definition) {
                Ok(true) => {
                    info!(
                        channel_id = %definition.id,
                        importance = %definition.importance,
                        "Notification channel created"
                    );
                    created += 1;
                }
                // 查询之后被其他进程抢先创建
                Ok(false) => {
                    debug!(channel_id = %definition.id, "Channel created concurrently, leaving untouched");
                }
                Err(e) => {
                    warn!(channel_id = %definition.id, error = %e, "Failed to create notification channel");
                    return Err(RegistrationError::registry(e));
                }
            }
        }

        self.state = RegistrarState::Completed;
        Ok(RegistrationResult::Registered(created))
    }
}

/// 检查 ID 唯一性
fn validate_unique_ids(definitions: &[ChannelDefinition]) -> Result<(), RegistrationError> {
    let mut seen = HashSet::new();
    for definition in definitions {
        if !seen.insert(definition.id.as_str()) {
            return Err(RegistrationError::DuplicateChannelId(definition.id.clone()));
        }
    }
    Ok(())
}
