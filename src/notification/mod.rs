//! 通知渠道注册 - 启动时声明应用的通知渠道
//!
//! # 设计目标
//! 1. 幂等：重复注册不会改变第一次注册的结果
//! 2. 版本门控：平台不支持渠道时跳过，而不是失败
//! 3. 不覆盖：已存在的渠道保持用户在系统设置中的修改
//! 4. 注册表解耦：通过 `Registry` trait 注入，测试时使用内存实现
//!
//! # 使用示例
//! ```ignore
//! use fanla_notify::notification::{
//!     default_channels, ChannelRegistrar, FileRegistry, PlatformCapability,
//! };
//!
//! let mut registrar = ChannelRegistrar::new(FileRegistry::default());
//! let result = registrar.register_channels(
//!     &default_channels(),
//!     PlatformCapability::from_api_level(34),
//! )?;
//! ```

pub mod channel;
pub mod importance;
pub mod platform;
pub mod registrar;
pub mod registry;

pub use channel::{default_channels, ChannelDefinition, TEAM_CHANNEL_ID};
pub use importance::Importance;
pub use platform::{PlatformCapability, CHANNELS_MIN_API_LEVEL};
pub use registrar::{ChannelRegistrar, RegistrarState, RegistrationError, RegistrationResult};
pub use registry::{FileRegistry, MemoryRegistry, RegisteredChannel, Registry};
