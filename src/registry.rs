use std::collections::BTreeMap;

const KEY_PREFIX: &str = "APP_";
const KEY_SUFFIX: &str = "_EMAIL";

/// Read-only mapping from `APP_<NAME>_EMAIL` keys to recipient
/// addresses. Populated once at startup and shared by every request.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    entries: BTreeMap<String, String>,
}

impl AppRegistry {
    /// Build from explicit `(key, address)` pairs. Keys must already be
    /// in the `APP_<NAME>_EMAIL` form; anything else is ignored.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries
                .into_iter()
                .filter(|(k, _)| k.starts_with(KEY_PREFIX) && k.ends_with(KEY_SUFFIX))
                .collect(),
        }
    }

    /// Scan the process environment for registry entries.
    pub fn from_env() -> Self {
        Self::new(std::env::vars())
    }

    /// Uppercase and map hyphens to underscores so `mail-box`,
    /// `Mail_Box` and `MAIL-BOX` all address the same entry.
    pub fn normalize(app_name: &str) -> String {
        app_name.to_uppercase().replace('-', "_")
    }

    pub fn lookup_key(app_name: &str) -> String {
        format!("{KEY_PREFIX}{}{KEY_SUFFIX}", Self::normalize(app_name))
    }

    /// Recipient for the given app name, or None when unregistered.
    pub fn resolve(&self, app_name: &str) -> Option<&str> {
        self.entries
            .get(&Self::lookup_key(app_name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
