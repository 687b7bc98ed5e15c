//! INI profile files.
//!
//! A config file carries a `[default]` section whose keys seed every plan, plus
//! any number of named sections (profiles) whose keys override the defaults
//! when selected with `-c PATH:PROFILE`. Keys match plan field names and are
//! case-sensitive.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use log::{debug, info};

use crate::error::{CsrError, Result};

pub const DEFAULT_CONFIG_LOCATION: &str = "~/.quick-csr.cfg";
pub const DEFAULT_SECTION: &str = "default";

/// Parsed config file. A missing file yields an empty config.
#[derive(Debug)]
pub struct ProfileConfig {
    path: PathBuf,
    ini: Ini,
}

impl ProfileConfig {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ini: Ini::new(),
        }
    }

    /// Load a config file. Files that cannot be opened are treated as empty.
    pub fn load(path: &Path) -> Result<Self> {
        match Ini::load_from_file_opt(path, parse_option()) {
            Ok(ini) => {
                info!("Loaded config from {}", path.display());
                Self::from_ini(path, ini)
            }
            Err(ini::Error::Io(e)) => {
                if e.kind() == ErrorKind::NotFound {
                    debug!("No config at {}, using built-in defaults", path.display());
                } else {
                    debug!("Ignoring unreadable config {}: {e}", path.display());
                }
                Ok(Self::empty(path))
            }
            Err(ini::Error::Parse(e)) => Err(CsrError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn parse_str(path: impl Into<PathBuf>, source: &str) -> Result<Self> {
        let path = path.into();
        match Ini::load_from_str_opt(source, parse_option()) {
            Ok(ini) => Self::from_ini(&path, ini),
            Err(e) => Err(CsrError::Config {
                path,
                reason: e.to_string(),
            }),
        }
    }

    fn from_ini(path: &Path, ini: Ini) -> Result<Self> {
        if let Some(general) = ini.section(None::<String>)
            && general.iter().next().is_some()
        {
            return Err(CsrError::Config {
                path: path.to_path_buf(),
                reason: "keys must follow a section header such as [default]".to_string(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            ini,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries of the `[default]` section in file order.
    pub fn defaults(&self) -> Vec<(&str, &str)> {
        self.ini
            .section(Some(DEFAULT_SECTION))
            .map(|props| props.iter().collect())
            .unwrap_or_default()
    }

    /// Entries of a named profile in file order. Asking for a profile the file
    /// does not define is an error; `default` always exists.
    pub fn profile(&self, name: &str) -> Result<Vec<(&str, &str)>> {
        if name == DEFAULT_SECTION {
            return Ok(self.defaults());
        }
        self.ini
            .section(Some(name))
            .map(|props| props.iter().collect())
            .ok_or_else(|| CsrError::Config {
                path: self.path.clone(),
                reason: format!("no profile named '{name}'"),
            })
    }
}

// Values are taken literally, so Windows paths keep their backslashes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
