//! Notification system with pluggable providers.
//!
//! Each transport is usable on its own through its client type, and through
//! the shared [`Notifier`] / [`AsyncNotifier`] traits when the caller wants to
//! treat channels uniformly.

pub mod channels;
pub mod dispatch;
pub mod email;
pub mod factory;
mod provider;
pub mod webhook;

pub use channels::{ChannelConfig, ChannelType, ProtonConfig, SmtpConfig, WebhookConfig};
pub use dispatch::{AsyncNotifierSet, ChannelResult, NotifierSet};
pub use factory::{create_async_notifier, create_notifier};
pub use provider::{AsyncNotifier, NotificationMessage, Notifier};
