//! Fanla Notify - 启动时注册应用通知渠道

pub mod config;
pub mod notification;

pub use config::AppConfig;
pub use notification::{
    default_channels, ChannelDefinition, ChannelRegistrar, FileRegistry, Importance,
    MemoryRegistry, PlatformCapability, RegisteredChannel, RegistrarState, RegistrationError,
    RegistrationResult, Registry, TEAM_CHANNEL_ID,
};
