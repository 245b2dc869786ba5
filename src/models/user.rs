// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model and email preference flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// User record stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Internal ID
    pub id: Uuid,
    /// Subject assigned by the identity provider
    pub external_id: String,
    pub email: String,
    /// Raw stored preferences. May be missing, partial, or malformed.
    pub email_preferences: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved email preferences, as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmailPreferences {
    pub weekly_summary: bool,
    pub monthly_summary: bool,
    pub milestones: bool,
    pub daily_reminders: bool,
    pub enabled: bool,
}

impl Default for EmailPreferences {
    fn default() -> Self {
        Self {
            weekly_summary: true,
            monthly_summary: true,
            milestones: true,
            daily_reminders: false,
            enabled: true,
        }
    }
}

impl EmailPreferences {
    /// Names of the only preference keys ever stored.
    pub const KEYS: [&'static str; 5] = [
        "weekly_summary",
        "monthly_summary",
        "milestones",
        "daily_reminders",
        "enabled",
    ];

    /// Apply explicitly stored values on top of these preferences.
    pub fn merged_with(mut self, stored: &StoredEmailPreferences) -> Self {
        if let Some(v) = stored.weekly_summary {
            self.weekly_summary = v;
        }
        if let Some(v) = stored.monthly_summary {
            self.monthly_summary = v;
        }
        if let Some(v) = stored.milestones {
            self.milestones = v;
        }
        if let Some(v) = stored.daily_reminders {
            self.daily_reminders = v;
        }
        if let Some(v) = stored.enabled {
            self.enabled = v;
        }
        self
    }
}

/// The subset of preference flags a user has explicitly set.
///
/// Serializes only the keys that are present, so an update of
/// `{weekly_summary: false}` is stored as exactly that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StoredEmailPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl StoredEmailPreferences {
    /// Set a flag by name. Returns `false` for unknown keys, which are ignored.
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        let slot = match key {
            "weekly_summary" => &mut self.weekly_summary,
            "monthly_summary" => &mut self.monthly_summary,
            "milestones" => &mut self.milestones,
            "daily_reminders" => &mut self.daily_reminders,
            "enabled" => &mut self.enabled,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = EmailPreferences::default();
        assert!(prefs.weekly_summary);
        assert!(prefs.monthly_summary);
        assert!(prefs.milestones);
        assert!(!prefs.daily_reminders);
        assert!(prefs.enabled);
    }

    #[test]
    fn test_stored_preferences_serialize_only_set_keys() {
        let mut stored = StoredEmailPreferences::default();
        assert!(stored.set("weekly_summary", false));
        assert!(!stored.set("bogus_key", true));

        let json = serde_json::to_value(stored).unwrap();
        assert_eq!(json, serde_json::json!({ "weekly_summary": false }));
    }

    #[test]
    fn test_merge_overrides_defaults() {
        let mut stored = StoredEmailPreferences::default();
        stored.set("daily_reminders", true);
        stored.set("enabled", false);

        let merged = EmailPreferences::default().merged_with(&stored);
        assert!(merged.daily_reminders);
        assert!(!merged.enabled);
        assert!(merged.weekly_summary);
    }

    #[test]
    fn test_every_known_key_is_settable() {
        let mut stored = StoredEmailPreferences::default();
        for key in EmailPreferences::KEYS {
            assert!(stored.set(key, false), "{key} should be recognized");
        }
        let merged = EmailPreferences::default().merged_with(&stored);
        assert_eq!(
            merged,
            EmailPreferences {
                weekly_summary: false,
                monthly_summary: false,
                milestones: false,
                daily_reminders: false,
                enabled: false,
            }
        );
    }
}
