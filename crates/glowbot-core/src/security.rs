//! Guard predicates applied before any workflow logic runs.
//!
//! Handlers call these first and short-circuit with a visible notice on
//! failure; the wrapped action is never invoked for a rejected update.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// Whether the caller is in the configured admin set.
pub fn is_admin(user_id: Option<UserId>, admin_ids: &[i64]) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    if admin_ids.is_empty() {
        return false;
    }
    admin_ids.contains(&user_id.0)
}

/// Whether a decision interaction is older than the staleness window.
pub fn is_stale(sent_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    let age = now.signed_duration_since(sent_at);
    match chrono::Duration::from_std(window) {
        Ok(window) => age > window,
        // A window too large for chrono means nothing is ever stale.
        Err(_) => false,
    }
}
