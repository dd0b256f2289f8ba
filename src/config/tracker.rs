//! Tracker definitions and badge validation.

use serde::{Deserialize, Serialize};

/// Badge used when a tracker does not declare one.
pub const DEFAULT_BADGE: &str = "ZerØ|analytics|#00a5da";

/// One `[[trackers]]` entry.
///
/// Keys this crate does not know about are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub tracking_id: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub badge: String,
}

impl Tracker {
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            ..Self::default()
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    /// Split the badge into `(title, label, color)`.
    pub fn badge_parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.badge.split('|');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(title), Some(label), Some(color), None) => Some((title, label, color)),
            _ => None,
        }
    }
}

/// Check that `badge` has the shape `<title>|<label>|<color>`.
///
/// Only the separator count is checked; empty segments are accepted.
pub fn validate_badge(badge: &str) -> bool {
    badge.split('|').count() == 3
}
