// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manager configuration.

use crate::error::ConfigError;

/// Construction options for [`InteractionManager`](crate::manager::InteractionManager).
///
/// ```
/// use pointcast_interaction::config::InteractionConfig;
///
/// let config = InteractionConfig::default()
///     .with_auto_add(7_u32)
///     .with_treat_touch_events_as_mouse_events(false);
/// assert!(config.validate().is_ok());
/// assert!(InteractionConfig::<u32>::default().auto_add(true).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionConfig<K> {
    /// Listen for moves on the owning document rather than on the surface.
    pub bind_events_on_body_element: bool,
    /// Track nodes automatically as they are attached under [`scene`](Self::scene).
    pub auto_add: bool,
    /// Scene root watched when `auto_add` is on.
    pub scene: Option<K>,
    /// Dispatch touch inputs under their mouse event kinds.
    pub treat_touch_events_as_mouse_events: bool,
}

impl<K> Default for InteractionConfig<K> {
    fn default() -> Self {
        Self {
            bind_events_on_body_element: true,
            auto_add: false,
            scene: None,
            treat_touch_events_as_mouse_events: true,
        }
    }
}

impl<K> InteractionConfig<K> {
    /// Set [`bind_events_on_body_element`](Self::bind_events_on_body_element).
    pub fn bind_events_on_body_element(mut self, on: bool) -> Self {
        self.bind_events_on_body_element = on;
        self
    }

    /// Set [`auto_add`](Self::auto_add) without touching the scene.
    pub fn auto_add(mut self, on: bool) -> Self {
        self.auto_add = on;
        self
    }

    /// Enable auto-add for nodes attached under `scene`.
    pub fn with_auto_add(mut self, scene: K) -> Self {
        self.auto_add = true;
        self.scene = Some(scene);
        self
    }

    /// Set [`treat_touch_events_as_mouse_events`](Self::treat_touch_events_as_mouse_events).
    pub fn with_treat_touch_events_as_mouse_events(mut self, on: bool) -> Self {
        self.treat_touch_events_as_mouse_events = on;
        self
    }

    /// Check option consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_add && self.scene.is_none() {
            return Err(ConfigError::AutoAddWithoutScene);
        }
        Ok(())
    }

    /// Whether auto-add will actually run.
    pub fn auto_add_effective(&self) -> bool {
        self.auto_add && self.scene.is_some()
    }
}
