// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// Misconfiguration detected by [`InteractionConfig::validate`](crate::config::InteractionConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `auto_add` is enabled but no scene root was supplied to watch.
    #[error("auto_add is enabled but no scene was provided; auto-add stays disabled")]
    AutoAddWithoutScene,
}
