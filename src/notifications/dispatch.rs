//! Fan-out delivery to a named set of notifiers.
//!
//! Each member is tried once; a failing channel does not stop the others.
//! Results come back in registration order.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{debug, warn};

use super::channels::ChannelConfig;
use super::factory::{create_async_notifier, create_notifier};
use super::provider::{AsyncNotifier, NotificationMessage, Notifier};
use crate::error::DeliveryResult;

/// Per-channel outcome of a fan-out
pub type ChannelResult = (String, DeliveryResult<()>);

fn log_result(channel: &str, result: &DeliveryResult<()>) {
    match result {
        Ok(()) => debug!(channel, "Notification sent"),
        Err(e) => warn!(channel, error = %e, "Failed to send notification"),
    }
}

/// Blocking notifier set
#[derive(Default)]
pub struct NotifierSet {
    notifiers: Vec<(String, Box<dyn Notifier>)>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one blocking notifier per configured channel.
    pub fn from_channels(channels: &BTreeMap<String, ChannelConfig>) -> Self {
        let mut set = Self::new();
        for (name, config) in channels {
            set.add(name.clone(), create_notifier(config));
        }
        set
    }

    pub fn add(&mut self, name: impl Into<String>, notifier: Box<dyn Notifier>) {
        self.notifiers.push((name.into(), notifier));
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.notifiers.iter().map(|(name, _)| name.as_str())
    }

    /// Sends `message` to every member, one after another.
    pub fn notify_all(&self, message: &NotificationMessage) -> Vec<ChannelResult> {
        self.notifiers
            .iter()
            .map(|(name, notifier)| {
                let result = notifier.notify(message);
                log_result(name, &result);
                (name.clone(), result)
            })
            .collect()
    }

    pub fn close_all(&mut self) {
        for (_, notifier) in &mut self.notifiers {
            notifier.close();
        }
    }
}

/// Async notifier set
#[derive(Default)]
pub struct AsyncNotifierSet {
    notifiers: Vec<(String, Box<dyn AsyncNotifier>)>,
}

impl AsyncNotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one async notifier per configured channel.
    pub fn from_channels(channels: &BTreeMap<String, ChannelConfig>) -> Self {
        let mut set = Self::new();
        for (name, config) in channels {
            set.add(name.clone(), create_async_notifier(config));
        }
        set
    }

    pub fn add(&mut self, name: impl Into<String>, notifier: Box<dyn AsyncNotifier>) {
        self.notifiers.push((name.into(), notifier));
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.notifiers.iter().map(|(name, _)| name.as_str())
    }

    /// Sends `message` to every member concurrently and waits for all of them.
    pub async fn notify_all(&self, message: &NotificationMessage) -> Vec<ChannelResult> {
        let sends = self.notifiers.iter().map(|(name, notifier)| async move {
            let result = notifier.notify(message).await;
            log_result(name, &result);
            (name.clone(), result)
        });
        join_all(sends).await
    }

    pub async fn close_all(&mut self) {
        for (_, notifier) in &mut self.notifiers {
            notifier.close().await;
        }
    }
}
