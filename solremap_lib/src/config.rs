//! The `config` module contains code for reading a solremap project configuration file.
//! The configuration file declares the Solidity compiler settings, project paths, the
//! remappings file location, and the networks the project deploys to.  Network secrets
//! never live in the file itself; the file names the environment variables that carry
//! them (see the `network` module).

use crate::error::SolremapError;
use crate::json::{load_json_from_file_with_name, JSONQuery};
use jsonxf;
use serde_json::{from_str, json, Value};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;

/// The extension used for solremap configuration files.
pub static CONFIG_FILE_EXTENSION: &str = "json";

/// The key for the Solidity settings object.
pub static SOLIDITY_KEY: &str = "solidity";

/// The key for the list of compiler configurations.
pub static COMPILERS_KEY: &str = "compilers";

/// The key for a compiler version string.
pub static VERSION_KEY: &str = "version";

/// The key for the optimizer settings object.
pub static OPTIMIZER_KEY: &str = "optimizer";

/// The key enabling the optimizer.
pub static ENABLED_KEY: &str = "enabled";

/// The key for the optimizer run count.
pub static RUNS_KEY: &str = "runs";

/// The key for the project paths object.
pub static PATHS_KEY: &str = "paths";

/// The key for the contract sources directory.
pub static SOURCES_KEY: &str = "sources";

/// The key for the compilation artifacts directory.
pub static ARTIFACTS_KEY: &str = "artifacts";

/// The key for the build cache directory.
pub static CACHE_KEY: &str = "cache";

/// The key for the storage-layout report directory.
pub static STORAGE_LAYOUT_KEY: &str = "storage-layout";

/// The key for the contract-size report settings object.
pub static CONTRACT_SIZER_KEY: &str = "contract-sizer";

/// The key for alphabetical sorting of the size report.
pub static ALPHA_SORT_KEY: &str = "alpha-sort";

/// The key for running the size report on every compile.
pub static RUN_ON_COMPILE_KEY: &str = "run-on-compile";

/// The key for disambiguating contract paths in the size report.
pub static DISAMBIGUATE_PATHS_KEY: &str = "disambiguate-paths";

/// The key for the path to the remappings file.
pub static REMAPPINGS_KEY: &str = "remappings";

/// The key for the default network name.
pub static DEFAULT_NETWORK_KEY: &str = "default-network";

/// The key for the named-accounts map.
pub static NAMED_ACCOUNTS_KEY: &str = "named-accounts";

/// The key for the networks map.
pub static NETWORKS_KEY: &str = "networks";

/// The key for a network chain id.
pub static CHAIN_ID_KEY: &str = "chain-id";

/// The key naming the environment variable that carries a network RPC URL.
pub static RPC_URL_ENV_KEY: &str = "rpc-url-env";

/// The key naming the environment variable that carries the deployer private key.
pub static PRIVATE_KEY_ENV_KEY: &str = "private-key-env";

/// The key naming the environment variable that carries the verification API key.
pub static API_KEY_ENV_KEY: &str = "api-key-env";

/// Optimizer settings for one compiler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSettings {
    /// True when the optimizer should run.
    pub enabled: bool,

    /// The optimizer run count.
    pub runs: i64,
}

impl Default for OptimizerSettings {
    fn default() -> OptimizerSettings {
        OptimizerSettings {
            enabled: false,
            runs: 200,
        }
    }
}

/// One Solidity compiler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerConfig {
    /// The compiler version string, e.g. "0.5.17".
    pub version: String,

    /// Optimizer settings for this compiler.
    pub optimizer: OptimizerSettings,
}

/// The directories the toolchain reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct PathsConfig {
    /// Directory holding the contract sources.
    pub sources: PathBuf,

    /// Directory receiving compilation artifacts.
    pub artifacts: PathBuf,

    /// Directory for the build cache.
    pub cache: PathBuf,

    /// Directory receiving storage-layout reports.
    pub storage_layout: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> PathsConfig {
        PathsConfig {
            sources: PathBuf::from("./contracts"),
            artifacts: PathBuf::from("./artifacts"),
            cache: PathBuf::from("./cache"),
            storage_layout: PathBuf::from("./storage_layout"),
        }
    }
}

/// Settings for the contract-size report.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractSizerConfig {
    /// Sort the report alphabetically by contract name.
    pub alpha_sort: bool,

    /// Produce the report on every compile.
    pub run_on_compile: bool,

    /// Show full paths for contracts with colliding names.
    pub disambiguate_paths: bool,
}

impl Default for ContractSizerConfig {
    fn default() -> ContractSizerConfig {
        ContractSizerConfig {
            alpha_sort: true,
            run_on_compile: false,
            disambiguate_paths: false,
        }
    }
}

/// A network declaration from the configuration file.
///
/// The entry carries the chain id and the names of the environment variables that
/// hold the network secrets at runtime.  The variable names default from the
/// network name: `<NAME>_RPC_URL`, `PRIVATE_KEY`, and `<NAME>_API_KEY`.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEntry {
    /// The chain id the network uses.  Required before the network can be resolved.
    pub chain_id: Option<i64>,

    /// Name of the environment variable carrying the RPC endpoint URL.
    pub rpc_url_env: String,

    /// Name of the environment variable carrying the deployer private key.
    pub private_key_env: String,

    /// Name of the environment variable carrying the verification API key.
    pub api_key_env: String,
}

impl NetworkEntry {
    /// Create an entry with the default environment variable names for `network_name`.
    ///
    /// # Arguments
    ///
    /// * `network_name` - The name of the network as declared in the configuration.
    pub fn new_for_network(network_name: &str) -> NetworkEntry {
        let prefix = network_name.to_uppercase().replace('-', "_");
        NetworkEntry {
            chain_id: None,
            rpc_url_env: format!("{prefix}_RPC_URL"),
            private_key_env: String::from("PRIVATE_KEY"),
            api_key_env: format!("{prefix}_API_KEY"),
        }
    }
}

/// Project configuration loaded from a solremap configuration file.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// The declared compiler configurations, in file order.
    pub compilers: Vec<CompilerConfig>,

    /// Project directory layout.
    pub paths: PathsConfig,

    /// Contract-size report settings.
    pub contract_sizer: ContractSizerConfig,

    /// Path to the remappings file used by the preprocessor.
    pub remappings_file: PathBuf,

    /// Name of the network used when no network is requested explicitly.
    pub default_network: String,

    /// Map of account name to account index.
    pub named_accounts: BTreeMap<String, i64>,

    /// The declared networks, by name.
    pub networks: BTreeMap<String, NetworkEntry>,
}

impl Default for ProjectConfig {
    fn default() -> ProjectConfig {
        ProjectConfig {
            compilers: Vec::new(),
            paths: PathsConfig::default(),
            contract_sizer: ContractSizerConfig::default(),
            remappings_file: PathBuf::from("remappings.txt"),
            default_network: String::from("local"),
            named_accounts: BTreeMap::new(),
            networks: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Create a new configuration object by loading the configuration from a JSON
    /// file.  The file must have the extension ".json".
    ///
    /// # Arguments
    ///
    /// * `config_file` - The path to the configuration file in the file system.
    pub fn new_from_file(config_file: &str) -> Result<ProjectConfig, SolremapError> {
        let config_path = PathBuf::from(config_file);
        let extension = config_path.extension();

        if extension != Some(OsStr::new(CONFIG_FILE_EXTENSION)) {
            return Err(SolremapError::ConfigFileBadExtension(String::from(
                config_file,
            )));
        }

        let json_value = match load_json_from_file_with_name(config_file) {
            Ok(v) => v,
            Err(_) => {
                return Err(SolremapError::ConfigFileNotSupported(String::from(
                    config_file,
                )))
            }
        };

        let mut config = ProjectConfig::default();

        let mut missing_keys: Vec<String> = Vec::new();

        if !json_value.contains_key(SOLIDITY_KEY) {
            missing_keys.push(String::from(SOLIDITY_KEY));
        }

        if !missing_keys.is_empty() {
            return Err(SolremapError::ConfigFileMissingRequiredKey(
                String::from(config_file),
                missing_keys,
            ));
        }

        let solidity_node = json_value.get_value_for_key(SOLIDITY_KEY).unwrap();

        if let Some(compilers_array) = solidity_node.get_array_for_key(COMPILERS_KEY) {
            for compiler_node in compilers_array {
                if let Some(compiler) = ProjectConfig::compiler_from_node(compiler_node) {
                    config.compilers.push(compiler);
                }
            }
        }

        if config.compilers.is_empty() {
            return Err(SolremapError::ConfigFileMissingRequiredKey(
                String::from(config_file),
                vec![format!("{SOLIDITY_KEY}.{COMPILERS_KEY}")],
            ));
        }

        if let Some(paths_node) = json_value.get_value_for_key(PATHS_KEY) {
            if let Some(sources) = paths_node.get_str_for_key(SOURCES_KEY) {
                config.paths.sources = PathBuf::from(sources);
            }
            if let Some(artifacts) = paths_node.get_str_for_key(ARTIFACTS_KEY) {
                config.paths.artifacts = PathBuf::from(artifacts);
            }
            if let Some(cache) = paths_node.get_str_for_key(CACHE_KEY) {
                config.paths.cache = PathBuf::from(cache);
            }
            if let Some(storage_layout) = paths_node.get_str_for_key(STORAGE_LAYOUT_KEY) {
                config.paths.storage_layout = PathBuf::from(storage_layout);
            }
        }

        if let Some(sizer_node) = json_value.get_value_for_key(CONTRACT_SIZER_KEY) {
            if let Some(alpha_sort) = sizer_node.get_bool_for_key(ALPHA_SORT_KEY) {
                config.contract_sizer.alpha_sort = alpha_sort;
            }
            if let Some(run_on_compile) = sizer_node.get_bool_for_key(RUN_ON_COMPILE_KEY) {
                config.contract_sizer.run_on_compile = run_on_compile;
            }
            if let Some(disambiguate) = sizer_node.get_bool_for_key(DISAMBIGUATE_PATHS_KEY) {
                config.contract_sizer.disambiguate_paths = disambiguate;
            }
        }

        if let Some(remappings_file) = json_value.get_str_for_key(REMAPPINGS_KEY) {
            config.remappings_file = PathBuf::from(remappings_file);
        }

        if let Some(default_network) = json_value.get_str_for_key(DEFAULT_NETWORK_KEY) {
            config.default_network = String::from(default_network);
        }

        if let Some(accounts_map) = json_value.get_map_for_key(NAMED_ACCOUNTS_KEY) {
            for (name, index_node) in accounts_map {
                if let Some(index) = index_node.as_i64() {
                    config.named_accounts.insert(name.clone(), index);
                }
            }
        }

        if let Some(networks_map) = json_value.get_map_for_key(NETWORKS_KEY) {
            for (name, network_node) in networks_map {
                let mut entry = NetworkEntry::new_for_network(name);

                if let Some(chain_id) = network_node.get_int_for_key(CHAIN_ID_KEY) {
                    entry.chain_id = Some(chain_id);
                }
                if let Some(rpc_url_env) = network_node.get_str_for_key(RPC_URL_ENV_KEY) {
                    entry.rpc_url_env = String::from(rpc_url_env);
                }
                if let Some(private_key_env) = network_node.get_str_for_key(PRIVATE_KEY_ENV_KEY) {
                    entry.private_key_env = String::from(private_key_env);
                }
                if let Some(api_key_env) = network_node.get_str_for_key(API_KEY_ENV_KEY) {
                    entry.api_key_env = String::from(api_key_env);
                }

                config.networks.insert(name.clone(), entry);
            }
        }

        Ok(config)
    }

    /// Return the network entry for `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of a network declared in the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SolremapError::NetworkNotConfigured`] when the configuration does
    /// not declare a network with that name.
    pub fn network(&self, name: &str) -> Result<&NetworkEntry, SolremapError> {
        self.networks
            .get(name)
            .ok_or_else(|| SolremapError::NetworkNotConfigured(String::from(name)))
    }

    /// Helper function to parse one compiler configuration node.
    fn compiler_from_node(node: &Value) -> Option<CompilerConfig> {
        let version = node.get_str_for_key(VERSION_KEY)?;

        let mut optimizer = OptimizerSettings::default();
        if let Some(optimizer_node) = node.get_value_for_key(OPTIMIZER_KEY) {
            if let Some(enabled) = optimizer_node.get_bool_for_key(ENABLED_KEY) {
                optimizer.enabled = enabled;
            }
            if let Some(runs) = optimizer_node.get_int_for_key(RUNS_KEY) {
                optimizer.runs = runs;
            }
        }

        Some(CompilerConfig {
            version: String::from(version),
            optimizer,
        })
    }

    /// Helper function to get the configuration as a JSON object.
    fn convert_to_json(&self) -> Value {
        let mut json_value: Value = from_str("{}").unwrap();

        let mut compiler_nodes: Vec<Value> = Vec::new();
        for compiler in &self.compilers {
            let mut optimizer_node: Value = from_str("{}").unwrap();
            optimizer_node.set_node_for_key(ENABLED_KEY, json![compiler.optimizer.enabled]);
            optimizer_node.set_node_for_key(RUNS_KEY, json![compiler.optimizer.runs]);

            let mut compiler_node: Value = from_str("{}").unwrap();
            compiler_node.set_str_for_key(VERSION_KEY, &compiler.version);
            compiler_node.set_node_for_key(OPTIMIZER_KEY, optimizer_node);
            compiler_nodes.push(compiler_node);
        }

        let mut solidity_node: Value = from_str("{}").unwrap();
        solidity_node.set_node_for_key(COMPILERS_KEY, json![compiler_nodes]);
        json_value.set_node_for_key(SOLIDITY_KEY, solidity_node);

        let mut paths_node: Value = from_str("{}").unwrap();
        paths_node.set_str_for_key(SOURCES_KEY, &self.paths.sources.to_string_lossy());
        paths_node.set_str_for_key(ARTIFACTS_KEY, &self.paths.artifacts.to_string_lossy());
        paths_node.set_str_for_key(CACHE_KEY, &self.paths.cache.to_string_lossy());
        paths_node.set_str_for_key(
            STORAGE_LAYOUT_KEY,
            &self.paths.storage_layout.to_string_lossy(),
        );
        json_value.set_node_for_key(PATHS_KEY, paths_node);

        let mut sizer_node: Value = from_str("{}").unwrap();
        sizer_node.set_node_for_key(ALPHA_SORT_KEY, json![self.contract_sizer.alpha_sort]);
        sizer_node.set_node_for_key(
            RUN_ON_COMPILE_KEY,
            json![self.contract_sizer.run_on_compile],
        );
        sizer_node.set_node_for_key(
            DISAMBIGUATE_PATHS_KEY,
            json![self.contract_sizer.disambiguate_paths],
        );
        json_value.set_node_for_key(CONTRACT_SIZER_KEY, sizer_node);

        json_value.set_str_for_key(REMAPPINGS_KEY, &self.remappings_file.to_string_lossy());
        json_value.set_str_for_key(DEFAULT_NETWORK_KEY, &self.default_network);

        if !self.named_accounts.is_empty() {
            json_value.set_node_for_key(NAMED_ACCOUNTS_KEY, json![self.named_accounts]);
        }

        let mut networks_node: Value = from_str("{}").unwrap();
        for (name, entry) in &self.networks {
            let mut network_node: Value = from_str("{}").unwrap();
            if let Some(chain_id) = entry.chain_id {
                network_node.set_node_for_key(CHAIN_ID_KEY, json![chain_id]);
            }
            network_node.set_str_for_key(RPC_URL_ENV_KEY, &entry.rpc_url_env);
            network_node.set_str_for_key(PRIVATE_KEY_ENV_KEY, &entry.private_key_env);
            network_node.set_str_for_key(API_KEY_ENV_KEY, &entry.api_key_env);
            networks_node.set_node_for_key(name, network_node);
        }
        json_value.set_node_for_key(NETWORKS_KEY, networks_node);

        json_value
    }

    /// Convert the configuration to JSON and write the JSON to `stream`.
    ///
    /// # Arguments
    ///
    /// * `stream` - The stream that will receive the JSON.
    pub fn write_to_stream_as_json(&self, stream: &mut dyn Write) -> Result<(), SolremapError> {
        let json_value = self.convert_to_json();

        // Now pretty print the JSON
        let standard_json = format!("{json_value}");
        let pretty_json = jsonxf::pretty_print(&standard_json).unwrap();

        writeln!(stream, "{pretty_json}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, name: &str, text: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        String::from(path.to_str().unwrap())
    }

    static FULL_CONFIG: &str = r#"{
        "solidity": {
            "compilers": [
                { "version": "0.5.17", "optimizer": { "enabled": true, "runs": 200 } }
            ]
        },
        "paths": {
            "sources": "./contracts",
            "artifacts": "./artifacts",
            "cache": "./cache_build",
            "storage-layout": "./storage_layout"
        },
        "contract-sizer": { "alpha-sort": true, "run-on-compile": false, "disambiguate-paths": false },
        "remappings": "remappings.txt",
        "default-network": "local",
        "named-accounts": { "deployer": 0 },
        "networks": {
            "base": { "chain-id": 8453 }
        }
    }"#;

    #[test]
    fn test_config_parses_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(&dir, "solremap.json", FULL_CONFIG);

        let config = ProjectConfig::new_from_file(&config_file).unwrap();

        assert_eq!(config.compilers.len(), 1);
        assert_eq!(config.compilers[0].version, "0.5.17");
        assert!(config.compilers[0].optimizer.enabled);
        assert_eq!(config.compilers[0].optimizer.runs, 200);

        assert_eq!(config.paths.cache, PathBuf::from("./cache_build"));
        assert_eq!(config.default_network, "local");
        assert_eq!(config.named_accounts.get("deployer"), Some(&0));

        let base = config.network("base").unwrap();
        assert_eq!(base.chain_id, Some(8453));
        assert_eq!(base.rpc_url_env, "BASE_RPC_URL");
        assert_eq!(base.private_key_env, "PRIVATE_KEY");
        assert_eq!(base.api_key_env, "BASE_API_KEY");
    }

    #[test]
    fn test_config_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(&dir, "solremap.toml", FULL_CONFIG);

        let result = ProjectConfig::new_from_file(&config_file);
        assert!(matches!(
            result,
            Err(SolremapError::ConfigFileBadExtension(_))
        ));
    }

    #[test]
    fn test_config_requires_solidity_key() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(&dir, "empty.json", "{}");

        match ProjectConfig::new_from_file(&config_file) {
            Err(SolremapError::ConfigFileMissingRequiredKey(_, keys)) => {
                assert_eq!(keys, vec![String::from("solidity")]);
            }
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_config_requires_at_least_one_compiler() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(
            &dir,
            "nocompilers.json",
            r#"{ "solidity": { "compilers": [] } }"#,
        );

        match ProjectConfig::new_from_file(&config_file) {
            Err(SolremapError::ConfigFileMissingRequiredKey(_, keys)) => {
                assert_eq!(keys, vec![String::from("solidity.compilers")]);
            }
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_config_unknown_network_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(&dir, "solremap.json", FULL_CONFIG);

        let config = ProjectConfig::new_from_file(&config_file).unwrap();
        assert!(matches!(
            config.network("sepolia"),
            Err(SolremapError::NetworkNotConfigured(_))
        ));
    }

    #[test]
    fn test_config_defaults_fill_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(
            &dir,
            "minimal.json",
            r#"{ "solidity": { "compilers": [ { "version": "0.8.24" } ] } }"#,
        );

        let config = ProjectConfig::new_from_file(&config_file).unwrap();

        assert!(!config.compilers[0].optimizer.enabled);
        assert_eq!(config.compilers[0].optimizer.runs, 200);
        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.contract_sizer, ContractSizerConfig::default());
        assert_eq!(config.remappings_file, PathBuf::from("remappings.txt"));
        assert_eq!(config.default_network, "local");
        assert!(config.networks.is_empty());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(&dir, "solremap.json", FULL_CONFIG);
        let config = ProjectConfig::new_from_file(&config_file).unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        config.write_to_stream_as_json(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let reparsed_file = write_config(&dir, "reparsed.json", &text);
        let reparsed = ProjectConfig::new_from_file(&reparsed_file).unwrap();

        assert_eq!(reparsed.compilers, config.compilers);
        assert_eq!(reparsed.networks, config.networks);
        assert_eq!(reparsed.named_accounts, config.named_accounts);
    }
}
