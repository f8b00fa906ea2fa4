//! 内存注册表

use anyhow::Result;
use std::collections::BTreeMap;

use super::{Registry, RegisteredChannel};
use crate::notification::channel::ChannelDefinition;
use crate::notification::importance::Importance;

/// 进程内渠道注册表
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    channels: BTreeMap<String, RegisteredChannel>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Registry for MemoryRegistry {
    fn get(&self, id: &str) -> Result<Option<RegisteredChannel>> {
        Ok(self.channels.get(id).cloned())
    }

    fn create(&mut self, definition: &ChannelDefinition) -> Result<bool> {
        if self.channels.contains_key(&definition.id) {
            return Ok(false);
        }
        self.channels
            .insert(definition.id.clone(), RegisteredChannel::new(definition.clone()));
        Ok(true)
    }

    fn list(&self) -> Result<Vec<RegisteredChannel>> {
        Ok(self.channels.values().cloned().collect())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        Ok(self.channels.remove(id).is_some())
    }

    fn update_importance(&mut self, id: &str, importance: Importance) -> Result<bool> {
        match self.channels.get_mut(id) {
            Some(channel) => {
                channel.definition.importance = importance;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
