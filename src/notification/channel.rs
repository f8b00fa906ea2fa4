//! 通知渠道定义

use serde::{Deserialize, Serialize};
use super::importance::Importance;

/// 团队通知渠道 ID（跨版本保持不变，修改会在系统中产生一个新渠道）
pub const TEAM_CHANNEL_ID: &str = "fanla_team_notifications";

/// 通知渠道定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDefinition {
    /// 渠道 ID（幂等键）
    pub id: String,
    /// 系统设置中显示的名称
    pub display_name: String,
    /// 系统设置中显示的说明
    pub description: String,
    /// 重要程度
    pub importance: Importance,
    /// 是否启用指示灯
    pub lights_enabled: bool,
    /// 是否启用振动
    pub vibration_enabled: bool,
}

impl ChannelDefinition {
    /// 创建渠道定义，指示灯和振动默认关闭
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        importance: Importance,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            importance,
            lights_enabled: false,
            vibration_enabled: false,
        }
    }

    /// 设置说明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 启用/关闭指示灯
    pub fn with_lights(mut self, enabled: bool) -> Self {
        self.lights_enabled = enabled;
        self
    }

    /// 启用/关闭振动
    pub fn with_vibration(mut self, enabled: bool) -> Self {
        self.vibration_enabled = enabled;
        self
    }
}

/// 应用内置的渠道列表（启动时注册）
pub fn default_channels() -> Vec<ChannelDefinition> {
    vec![
        ChannelDefinition::new(TEAM_CHANNEL_ID, "Takım Bildirimleri", Importance::High)
            .with_description("Takımlarla ilgili önemli bildirimler")
            .with_lights(true)
            .with_vibration(true),
    ]
}
