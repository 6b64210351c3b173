//! The `config_info` module provides code to show the loaded project configuration and
//! to check a network declaration against the process environment.

use crate::ConfigCLArgs;
use solremap_lib::config::ProjectConfig;
use solremap_lib::error::SolremapError;
use solremap_lib::network::NetworkSettings;

/// Show the project configuration or check a network resolution.
///
/// # Arguments
///
/// * `params` - The [`ConfigCLArgs`] object.
pub fn display_config_info(params: ConfigCLArgs) -> Result<(), SolremapError> {
    let config = ProjectConfig::new_from_file(&params.config)?;

    if params.show {
        let mut stdout = std::io::stdout();
        config.write_to_stream_as_json(&mut stdout)?;
        return Ok(());
    }

    if params.check {
        let network_name = params
            .network
            .unwrap_or_else(|| config.default_network.clone());

        let entry = config.network(&network_name)?;
        let settings = NetworkSettings::resolve(&network_name, entry)?;

        println!("{}", settings.summary());
    }

    Ok(())
}
