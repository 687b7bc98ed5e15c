//! Merging built-in defaults, config sections and CLI identity into a [`Plan`].

use std::fmt;
use std::path::PathBuf;

use log::debug;

use crate::config::ProfileConfig;
use crate::error::{CsrError, Result};
use crate::subject::SubjectField;

pub const DEFAULT_KEY_SIZE: u32 = 4096;

/// Built-in settings that apply before any config file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDefaults {
    pub key_size: u32,
    pub target_folder: String,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            key_size: DEFAULT_KEY_SIZE,
            target_folder: cwd.to_string_lossy().into_owned(),
        }
    }
}

/// Everything needed to build, sign and write one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub common_name: String,
    pub alternative_names: Vec<String>,
    pub country_name: String,
    pub state_or_province_name: String,
    pub locality_name: String,
    pub organization_name: String,
    pub organizational_unit_name: String,
    pub key_size: u32,
    pub target_folder: String,
    /// Config keys without a meaning here, kept in order of appearance.
    pub extra: Vec<(String, String)>,
}

impl Plan {
    fn from_defaults(defaults: &PlanDefaults) -> Self {
        Self {
            common_name: String::new(),
            alternative_names: Vec::new(),
            country_name: String::new(),
            state_or_province_name: String::new(),
            locality_name: String::new(),
            organization_name: String::new(),
            organizational_unit_name: String::new(),
            key_size: defaults.key_size,
            target_folder: defaults.target_folder.clone(),
            extra: Vec::new(),
        }
    }

    pub fn subject_value(&self, field: SubjectField) -> &str {
        match field {
            SubjectField::CommonName => &self.common_name,
            SubjectField::CountryName => &self.country_name,
            SubjectField::StateOrProvinceName => &self.state_or_province_name,
            SubjectField::LocalityName => &self.locality_name,
            SubjectField::OrganizationName => &self.organization_name,
            SubjectField::OrganizationalUnitName => &self.organizational_unit_name,
        }
    }

    fn subject_value_mut(&mut self, field: SubjectField) -> &mut String {
        match field {
            SubjectField::CommonName => &mut self.common_name,
            SubjectField::CountryName => &mut self.country_name,
            SubjectField::StateOrProvinceName => &mut self.state_or_province_name,
            SubjectField::LocalityName => &mut self.locality_name,
            SubjectField::OrganizationName => &mut self.organization_name,
            SubjectField::OrganizationalUnitName => &mut self.organizational_unit_name,
        }
    }

    /// Set one field from its config key.
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(field) = SubjectField::from_key(key) {
            *self.subject_value_mut(field) = value.to_string();
            return Ok(());
        }
        match key {
            // replaced by the CLI names afterwards; matched only to keep it out of `extra`
            "alternativeNames" => {}
            "key_size" => self.key_size = parse_key_size(value)?,
            "target_folder" => self.target_folder = value.to_string(),
            _ => match self.extra.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value.to_string(),
                None => self.extra.push((key.to_string(), value.to_string())),
            },
        }
        Ok(())
    }

    /// `(key, value)` rows for the summary printed before writing.
    pub fn summary(&self) -> Vec<(&str, String)> {
        let mut rows = vec![
            ("commonName", self.common_name.clone()),
            ("alternativeNames", self.alternative_names.join(", ")),
        ];
        rows.extend(
            SubjectField::ALL
                .into_iter()
                .filter(|field| *field != SubjectField::CommonName)
                .map(|field| (field.key(), self.subject_value(field).to_string())),
        );
        rows.push(("key_size", self.key_size.to_string()));
        rows.push(("target_folder", self.target_folder.clone()));
        rows.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
        rows
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.summary() {
            let value = if value.is_empty() { "./." } else { value.as_str() };
            writeln!(f, "{key:<23}:  {value}")?;
        }
        Ok(())
    }
}

fn parse_key_size(value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| CsrError::InvalidParameter {
            name: "key_size",
            reason: format!("'{value}' is not a positive integer ({e})"),
        })
}

/// Merge defaults, the `[default]` section, an optional profile and the CLI
/// identity, later layers overriding earlier ones.
pub fn build_plan(
    defaults: &PlanDefaults,
    config: &ProfileConfig,
    profile: Option<&str>,
    common_name: &str,
    alternative_names: &[String],
) -> Result<Plan> {
    let mut plan = Plan::from_defaults(defaults);

    for (key, value) in config.defaults() {
        plan.apply(key, value)?;
    }
    if let Some(name) = profile {
        debug!("Applying profile '{name}' from {}", config.path().display());
        for (key, value) in config.profile(name)? {
            plan.apply(key, value)?;
        }
    }

    plan.common_name = common_name.to_string();
    plan.alternative_names = alternative_names.to_vec();
    debug!("Resolved plan: {plan:?}");
    Ok(plan)
}
