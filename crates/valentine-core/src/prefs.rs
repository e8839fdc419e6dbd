use serde::{Deserialize, Serialize};

/// Storage key holding the acceptance flag (`"true"` or absent).
pub const ACCEPTED_KEY: &str = "valentine_accepted";
/// Storage key holding the partner's name.
pub const PARTNER_NAME_KEY: &str = "partner_name";
/// Storage key holding the sender's name.
pub const SENDER_NAME_KEY: &str = "sender_name";

/// Every key owned by the preference record.
pub const STORAGE_KEYS: [&str; 3] = [ACCEPTED_KEY, PARTNER_NAME_KEY, SENDER_NAME_KEY];

/// Durable record that survives reloads until an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPreferences {
    /// Whether the proposal has been accepted.
    pub accepted: bool,
    /// Name of the person being asked.
    pub partner_name: Option<String>,
    /// Name of the person asking.
    pub sender_name: Option<String>,
}

impl PersistedPreferences {
    /// Build the record from a key lookup. Missing keys take their defaults and
    /// any value other than `"true"` leaves the flag unset.
    pub fn from_lookup(mut fetch: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            accepted: fetch(ACCEPTED_KEY).as_deref() == Some("true"),
            partner_name: fetch(PARTNER_NAME_KEY).filter(|name| !name.is_empty()),
            sender_name: fetch(SENDER_NAME_KEY).filter(|name| !name.is_empty()),
        }
    }

    /// True when `partner`/`sender` would not change the stored names.
    #[must_use]
    pub fn names_match(&self, partner: Option<&str>, sender: Option<&str>) -> bool {
        partner.is_none_or(|p| self.partner_name.as_deref() == Some(p))
            && sender.is_none_or(|s| self.sender_name.as_deref() == Some(s))
    }
}
