//! Configuration sources for the mailer
//!
//! Credential lookup goes through a [`ConfigProvider`], so the process
//! environment is just the default source instead of a hidden global.

use std::collections::HashMap;

/// Name of the environment variable holding the sender address
pub const ADDRESS_VAR: &str = "MISSIVE_ADDRESS";
/// Name of the environment variable holding the authentication secret
pub const SECRET_VAR: &str = "MISSIVE_SECRET";

/// A source of named configuration values
pub trait ConfigProvider {
    /// Look a key up, returning `None` when it is not set
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl ConfigProvider for EnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[cfg(test)]
mod test {
    use super::{ConfigProvider, EnvProvider};
    use std::collections::HashMap;

    #[test]
    fn env_provider_reads_process_environment() {
        std::env::set_var("MISSIVE_CONFIG_TEST_KEY", "value");
        assert_eq!(
            EnvProvider.get("MISSIVE_CONFIG_TEST_KEY").as_deref(),
            Some("value")
        );
        assert_eq!(EnvProvider.get("MISSIVE_CONFIG_TEST_UNSET"), None);
    }

    #[test]
    fn map_provider() {
        let mut map = HashMap::new();
        map.insert("key".to_owned(), "value".to_owned());
        assert_eq!(map.get("key").cloned(), ConfigProvider::get(&map, "key"));
        assert_eq!(ConfigProvider::get(&map, "other"), None);
    }
}
