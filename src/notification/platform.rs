//! Platform capability tiers
//!
//! Notification channels only exist from API level 26 (Android 8.0) on.
//! Older platforms still deliver notifications, just without per-channel
//! user control, so registration there is skipped rather than failed.

use std::str::FromStr;

/// First API level with notification channels
pub const CHANNELS_MIN_API_LEVEL: u32 = 26;

/// Whether the host platform supports channel-scoped notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformCapability {
    /// No channels; the platform's own fallback applies
    Legacy,
    /// Channel-scoped notifications supported
    Channels,
}

impl PlatformCapability {
    pub fn from_api_level(api_level: u32) -> Self {
        if api_level >= CHANNELS_MIN_API_LEVEL {
            PlatformCapability::Channels
        } else {
            PlatformCapability::Legacy
        }
    }

    pub fn supports_channels(&self) -> bool {
        matches!(self, PlatformCapability::Channels)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformCapability::Legacy => "legacy",
            PlatformCapability::Channels => "channels",
        }
    }
}

impl std::fmt::Display for PlatformCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlatformCapability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PlatformCapability::Legacy),
            "channels" => Ok(PlatformCapability::Channels),
            other => Err(format!("unknown capability tier '{}'", other)),
        }
    }
}
