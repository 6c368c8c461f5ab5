//! Reservation settings.
//!
//! Process-wide configuration edited through the host's admin form. This core
//! only reads it; there is no write path here.

use serde::{Deserialize, Serialize};

use crate::interval::{Interval, IntervalUnit};

/// Placeholder in the user-facing message replaced by the configured interval.
pub const INTERVAL_PLACEHOLDER: &str = "[interval]";

const DEFAULT_MESSAGE_TEXT: &str = "Some items in your cart are stock controlled \
and will be removed automatically if not purchased within [interval].";

/// Settings controlling cart expiration and the user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSettings {
    /// Global off-switch: when false, scanner and worker both no-op.
    pub cart_expiration_enabled: bool,
    /// How long a cart may sit unmodified before its reserved, out-of-stock
    /// items become eligible for removal.
    pub interval: Interval,
    /// Whether to show the expiry notice when items are added to a cart.
    pub message_enabled: bool,
    /// Notice template; may contain `[interval]`.
    pub message_text: String,
}

impl Default for ReserveSettings {
    fn default() -> Self {
        Self {
            cart_expiration_enabled: true,
            interval: Interval::new(1, IntervalUnit::Day),
            message_enabled: true,
            message_text: DEFAULT_MESSAGE_TEXT.to_string(),
        }
    }
}

impl ReserveSettings {
    /// The rendered user-facing notice, or `None` when messages are disabled.
    pub fn expiration_notice(&self) -> Option<String> {
        if !self.message_enabled {
            return None;
        }
        Some(
            self.message_text
                .replace(INTERVAL_PLACEHOLDER, &self.interval.to_string()),
        )
    }
}

/// Read access to the process-wide reservation settings.
///
/// Loaded once per scan/processing cycle; a single admin editor is assumed,
/// so no concurrent-write protection is offered here.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> ReserveSettings;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_substitutes_interval() {
        let settings = ReserveSettings {
            interval: Interval::new(2, IntervalUnit::Hour),
            message_text: "gone in [interval]".to_string(),
            ..ReserveSettings::default()
        };
        assert_eq!(settings.expiration_notice().unwrap(), "gone in 2 hours");
    }

    #[test]
    fn notice_is_suppressed_when_disabled() {
        let settings = ReserveSettings {
            message_enabled: false,
            ..ReserveSettings::default()
        };
        assert_eq!(settings.expiration_notice(), None);
    }

    #[test]
    fn default_notice_renders() {
        let rendered = ReserveSettings::default().expiration_notice().unwrap();
        assert!(rendered.contains("1 day"));
        assert!(!rendered.contains(INTERVAL_PLACEHOLDER));
    }
}
