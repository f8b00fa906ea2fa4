//! Importance levels for notification channels
//!
//! Importance controls how intrusively a channel's notifications are shown:
//! - MIN: no sound, no visual interruption, hidden from the status bar
//! - LOW: shown, but silent
//! - DEFAULT: makes a sound
//! - HIGH: makes a sound and appears as a heads-up notification
//! - MAX: reserved for the most urgent, time-critical notifications
//!
//! The numeric levels match Android's `NotificationManager.IMPORTANCE_*`.

use std::str::FromStr;

/// Channel importance, ordered from least to most intrusive
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Min => "MIN",
            Importance::Low => "LOW",
            Importance::Default => "DEFAULT",
            Importance::High => "HIGH",
            Importance::Max => "MAX",
        }
    }

    /// Platform numeric level (1..=5)
    pub fn as_level(&self) -> u8 {
        match self {
            Importance::Min => 1,
            Importance::Low => 2,
            Importance::Default => 3,
            Importance::High => 4,
            Importance::Max => 5,
        }
    }

    /// Build from a platform numeric level; out-of-range values yield `None`
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Importance::Min),
            2 => Some(Importance::Low),
            3 => Some(Importance::Default),
            4 => Some(Importance::High),
            5 => Some(Importance::Max),
            _ => None,
        }
    }
}

impl FromStr for Importance {
    type Err = String;

    /// Case-insensitive names (`HIGH`, `high`) or platform levels (`4`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Importance::from_level(level)
                .ok_or_else(|| format!("importance level {} out of range 1..=5", level));
        }
        match s.to_ascii_uppercase().as_str() {
            "MIN" => Ok(Importance::Min),
            "LOW" => Ok(Importance::Low),
            "DEFAULT" => Ok(Importance::Default),
            "HIGH" => Ok(Importance::High),
            "MAX" => Ok(Importance::Max),
            other => Err(format!(
                "unknown importance '{}', expected one of MIN, LOW, DEFAULT, HIGH, MAX",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_ordering() {
        assert!(Importance::Min < Importance::Low);
        assert!(Importance::Low < Importance::Default);
        assert!(Importance::Default < Importance::High);
        assert!(Importance::High < Importance::Max);
    }

    #[test]
    fn test_importance_level_mapping() {
        assert_eq!(Importance::Min.as_level(), 1);
        assert_eq!(Importance::High.as_level(), 4);
        assert_eq!(Importance::Max.as_level(), 5);

        for level in 1..=5u8 {
            let importance = Importance::from_level(level).unwrap();
            assert_eq!(importance.as_level(), level);
        }
        assert_eq!(Importance::from_level(0), None);
        assert_eq!(Importance::from_level(6), None);
    }

    #[test]
    fn test_importance_parse_case_insensitive() {
        assert_eq!("HIGH".parse::<Importance>(), Ok(Importance::High));
        assert_eq!("high".parse::<Importance>(), Ok(Importance::High));
        assert_eq!(" Default ".parse::<Importance>(), Ok(Importance::Default));
        assert!("urgent".parse::<Importance>().is_err());
    }

    #[test]
    fn test_importance_parse_numeric_level() {
        assert_eq!("1".parse::<Importance>(), Ok(Importance::Min));
        assert_eq!("4".parse::<Importance>(), Ok(Importance::High));
        assert_eq!(" 5 ".parse::<Importance>(), Ok(Importance::Max));
        assert!("0".parse::<Importance>().is_err());
        assert!("6".parse::<Importance>().is_err());
    }

    #[test]
    fn test_importance_display() {
        assert_eq!(format!("{}", Importance::Min), "MIN");
        assert_eq!(format!("{}", Importance::Default), "DEFAULT");
    }

    #[test]
    fn test_importance_serde_uppercase() {
        let json = serde_json::to_string(&Importance::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let parsed: Importance = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, Importance::Low);
    }
}
