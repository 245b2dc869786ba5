// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email preference parsing and filtering.
//!
//! Stored preferences are read leniently: anything that does not parse is
//! logged and replaced by the default for that key. Updates are filtered to
//! the known keys and coerced to booleans.

use crate::models::{EmailPreferences, StoredEmailPreferences};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Read whatever valid flags a stored preference blob contains.
///
/// Accepts an object or a JSON string holding an object. Unknown keys and
/// non-boolean values are skipped.
pub fn parse_stored(user_id: Uuid, raw: Option<&Value>) -> StoredEmailPreferences {
    let mut stored = StoredEmailPreferences::default();

    let parsed;
    let object = match raw {
        None | Some(Value::Null) => return stored,
        Some(Value::Object(map)) => map,
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => {
                parsed = map;
                &parsed
            }
            Ok(_) | Err(_) => {
                tracing::warn!(%user_id, "Stored email preferences are not a JSON object");
                return stored;
            }
        },
        Some(_) => {
            tracing::warn!(%user_id, "Stored email preferences are not a JSON object");
            return stored;
        }
    };

    for (key, value) in object {
        match value {
            Value::Bool(flag) => {
                stored.set(key, *flag);
            }
            _ if EmailPreferences::KEYS.contains(&key.as_str()) => {
                tracing::warn!(%user_id, key = %key, "Ignoring non-boolean email preference");
            }
            _ => {}
        }
    }

    stored
}

/// Defaults overlaid with what the user has stored.
pub fn resolve(user_id: Uuid, raw: Option<&Value>) -> EmailPreferences {
    EmailPreferences::default().merged_with(&parse_stored(user_id, raw))
}

/// Keep only the known keys of a client update, coercing values to booleans.
pub fn filter_update(update: &Map<String, Value>) -> StoredEmailPreferences {
    let mut filtered = StoredEmailPreferences::default();
    for (key, value) in update {
        filtered.set(key, is_truthy(value));
    }
    filtered
}

/// Boolean coercion for loosely typed client input.
///
/// `null`, `false`, `0`, `NaN` and `""` are false; everything else,
/// including empty arrays and objects, is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
