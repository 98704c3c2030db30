//! Account identifiers partitioning the queues

use std::fmt;

/// Account used when a producer or consumer does not name one.
pub const DEFAULT_ACCOUNT: &str = "FTMO";

const KEY_PREFIX: &str = "q:";

/// Upper-cased account name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountKey(String);

impl AccountKey {
    /// Normalize a caller-supplied account. Absent or empty names map to
    /// [`DEFAULT_ACCOUNT`].
    pub fn resolve(account: Option<&str>) -> Self {
        match account {
            Some(name) if !name.is_empty() => Self(name.to_uppercase()),
            _ => Self(DEFAULT_ACCOUNT.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key holding this account's queue in the store: `q:<ACCOUNT>`
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.0)
    }
}

impl Default for AccountKey {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
