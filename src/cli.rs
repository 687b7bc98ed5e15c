use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use crate::config::DEFAULT_CONFIG_LOCATION;

/// Command-line arguments for quick-csr
#[derive(Parser, Debug, Clone)]
#[command(name = "quick-csr")]
#[command(
    version,
    about = "Generates certificate signing requests (PKCS #10/PEM) with subject information that are defined in a configuration file.",
    after_help = "The profile part of --config is optional and must be preceded by a \":\"."
)]
pub struct Args {
    /// Configuration file location and profile (default: none) separated by a colon
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH[:PROFILE]",
        default_value = DEFAULT_CONFIG_LOCATION
    )]
    pub config: String,

    /// Subject common name, also used to name the output files
    #[arg(value_name = "commonName", value_parser = NonEmptyStringValueParser::new())]
    pub common_name: String,

    /// DNS names for the subjectAltName extension
    #[arg(value_name = "alternativeName")]
    pub alternative_names: Vec<String>,
}

impl Args {
    pub fn config_source(&self) -> ConfigSource {
        ConfigSource::parse(&self.config)
    }
}

/// Where the config comes from, and which profile to apply on top of `[default]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub location: String,
    pub profile: Option<String>,
}

impl ConfigSource {
    /// Split a `PATH[:PROFILE]` value at the first colon. An empty path falls
    /// back to the default location.
    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((location, profile)) => {
                let location = if location.is_empty() {
                    DEFAULT_CONFIG_LOCATION
                } else {
                    location
                };
                Self {
                    location: location.to_string(),
                    profile: Some(profile.to_string()),
                }
            }
            None => Self {
                location: value.to_string(),
                profile: None,
            },
        }
    }
}
