//! The `network` module resolves a declared network against the process environment.
//! Resolution happens once at startup; a missing required variable is a fatal
//! configuration error rather than an empty-string fallback.

use crate::config::NetworkEntry;
use crate::error::SolremapError;
use std::env;

/// The settings of a network after resolving its environment variables.
///
/// The private key stays inside this struct; the `Debug` output and the summary
/// formatting mask it.
#[derive(Clone)]
pub struct NetworkSettings {
    /// The network name.
    pub name: String,

    /// The RPC endpoint URL.
    pub rpc_url: String,

    /// The chain id.
    pub chain_id: i64,

    /// The deployer private key.
    pub private_key: String,

    /// The contract-verification API key, when configured.
    pub api_key: Option<String>,
}

impl NetworkSettings {
    /// Resolve the settings for the network named `name` from `entry` and the
    /// process environment.
    ///
    /// # Arguments
    ///
    /// * `name` - The network name.
    /// * `entry` - The network declaration from the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SolremapError::NetworkMissingChainId`] when the declaration has no
    /// chain id, and [`SolremapError::MissingEnvironmentVariable`] when the RPC-URL
    /// or private-key variable has no value.  The API-key variable is optional.
    pub fn resolve(name: &str, entry: &NetworkEntry) -> Result<NetworkSettings, SolremapError> {
        let chain_id = match entry.chain_id {
            Some(id) => id,
            None => return Err(SolremapError::NetworkMissingChainId(String::from(name))),
        };

        let rpc_url = require_env(&entry.rpc_url_env)?;
        let private_key = require_env(&entry.private_key_env)?;
        let api_key = env::var(&entry.api_key_env).ok();

        if api_key.is_none() {
            log::info!(
                "Environment variable {} is not set, contract verification disabled for {}",
                entry.api_key_env,
                name
            );
        }

        Ok(NetworkSettings {
            name: String::from(name),
            rpc_url,
            chain_id,
            private_key,
            api_key,
        })
    }

    /// Return a one-network-per-line summary suitable for terminal output.  The
    /// private key never appears in the summary.
    pub fn summary(&self) -> String {
        let api_key_state = if self.api_key.is_some() {
            "set"
        } else {
            "not set"
        };
        format!(
            "network {}: chain id {}, rpc url {}, private key set, api key {}",
            self.name, self.chain_id, self.rpc_url, api_key_state
        )
    }
}

impl std::fmt::Debug for NetworkSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkSettings")
            .field("name", &self.name)
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<masked>")
            .field("api_key", &self.api_key.as_ref().map(|_| "<masked>"))
            .finish()
    }
}

/// Read the environment variable `name`, failing when it is absent or empty.
fn require_env(name: &str) -> Result<String, SolremapError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(SolremapError::MissingEnvironmentVariable(String::from(
            name,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names so the tests can run in parallel.
    fn entry_with_env(prefix: &str) -> NetworkEntry {
        NetworkEntry {
            chain_id: Some(8453),
            rpc_url_env: format!("{prefix}_RPC_URL"),
            private_key_env: format!("{prefix}_PRIVATE_KEY"),
            api_key_env: format!("{prefix}_API_KEY"),
        }
    }

    #[test]
    fn test_network_resolves_from_environment() {
        let entry = entry_with_env("SOLREMAP_TEST_RESOLVE");
        env::set_var(&entry.rpc_url_env, "https://mainnet.base.org");
        env::set_var(&entry.private_key_env, "0xabc123");
        env::set_var(&entry.api_key_env, "apikey");

        let settings = NetworkSettings::resolve("base", &entry).unwrap();

        assert_eq!(settings.name, "base");
        assert_eq!(settings.rpc_url, "https://mainnet.base.org");
        assert_eq!(settings.chain_id, 8453);
        assert_eq!(settings.private_key, "0xabc123");
        assert_eq!(settings.api_key.as_deref(), Some("apikey"));
    }

    #[test]
    fn test_network_missing_rpc_url_fails_fast() {
        let entry = entry_with_env("SOLREMAP_TEST_NO_RPC");
        env::set_var(&entry.private_key_env, "0xabc123");

        match NetworkSettings::resolve("base", &entry) {
            Err(SolremapError::MissingEnvironmentVariable(name)) => {
                assert_eq!(name, "SOLREMAP_TEST_NO_RPC_RPC_URL");
            }
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_network_missing_private_key_fails_fast() {
        let entry = entry_with_env("SOLREMAP_TEST_NO_KEY");
        env::set_var(&entry.rpc_url_env, "https://mainnet.base.org");

        match NetworkSettings::resolve("base", &entry) {
            Err(SolremapError::MissingEnvironmentVariable(name)) => {
                assert_eq!(name, "SOLREMAP_TEST_NO_KEY_PRIVATE_KEY");
            }
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_network_empty_variable_counts_as_missing() {
        let entry = entry_with_env("SOLREMAP_TEST_EMPTY");
        env::set_var(&entry.rpc_url_env, "");
        env::set_var(&entry.private_key_env, "0xabc123");

        assert!(matches!(
            NetworkSettings::resolve("base", &entry),
            Err(SolremapError::MissingEnvironmentVariable(_))
        ));
    }

    #[test]
    fn test_network_api_key_is_optional() {
        let entry = entry_with_env("SOLREMAP_TEST_NO_API");
        env::set_var(&entry.rpc_url_env, "https://mainnet.base.org");
        env::set_var(&entry.private_key_env, "0xabc123");

        let settings = NetworkSettings::resolve("base", &entry).unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_network_missing_chain_id_is_an_error() {
        let mut entry = entry_with_env("SOLREMAP_TEST_NO_CHAIN");
        entry.chain_id = None;

        assert!(matches!(
            NetworkSettings::resolve("base", &entry),
            Err(SolremapError::NetworkMissingChainId(_))
        ));
    }

    #[test]
    fn test_network_summary_masks_private_key() {
        let entry = entry_with_env("SOLREMAP_TEST_SUMMARY");
        env::set_var(&entry.rpc_url_env, "https://mainnet.base.org");
        env::set_var(&entry.private_key_env, "0xsupersecret");

        let settings = NetworkSettings::resolve("base", &entry).unwrap();

        assert!(!settings.summary().contains("0xsupersecret"));
        assert!(!format!("{settings:?}").contains("0xsupersecret"));
    }
}
