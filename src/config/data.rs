//! The configuration structs used to build the AppConfig, and their impls.
use std::{
    collections::{hash_map::Entry, HashMap},
    io::Read,
};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use toml::Value;

use crate::config::{ConfigError, ConfigResult};

pub const KIT_FORM_ID_ENV: &str = "KIT_FORM_ID";
pub const KIT_API_KEY_ENV: &str = "KIT_API_KEY";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub kit_config: KitConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Where and how to reach the Kit API.
/// The credentials selecting the subscription form live in the environment,
/// not in config files - see `KitCredentials`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KitConfig {
    pub url: String,
    pub timeout_millis: u64,
}

/// The form identifier and API key authorizing calls to the Kit form
/// subscribe endpoint.
#[derive(Clone, Debug)]
pub struct KitCredentials {
    pub form_id: String,
    pub api_key: SecretString,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AppConfigBuilder(HashMap<String, HashMap<String, Value>>);

// ###################################
// ->   IMPLs
// ###################################
impl KitConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl KitCredentials {
    /// Reads `KIT_FORM_ID` and `KIT_API_KEY`, returning `None` unless both are
    /// set and non-empty. Absence is not fatal at startup - the subscribe route
    /// reports a configuration error per request.
    pub fn from_env() -> Option<Self> {
        Self::from_pair(
            std::env::var(KIT_FORM_ID_ENV).ok(),
            std::env::var(KIT_API_KEY_ENV).ok(),
        )
    }

    fn from_pair(form_id: Option<String>, api_key: Option<String>) -> Option<Self> {
        let form_id = form_id.filter(|id| !id.is_empty())?;
        let api_key = api_key.filter(|key| !key.is_empty())?;

        Some(KitCredentials {
            form_id,
            api_key: SecretString::from(api_key),
        })
    }
}

impl AppConfig {
    pub fn init() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

impl AppConfigBuilder {
    pub fn add_source(mut self, mut file: std::fs::File) -> ConfigResult<Self> {
        let mut file_content = String::new();
        file.read_to_string(&mut file_content)?;

        let app_conf_builder: AppConfigBuilder = toml::from_str(&file_content)?;
        self.extend_builder(app_conf_builder);

        Ok(self)
    }

    pub fn build(self) -> ConfigResult<AppConfig> {
        let serialized = toml::to_string(&self)?;
        let app_config: AppConfig = toml::from_str(&serialized)?;
        Ok(app_config)
    }

    /// Extends this `AppConfigBuilder` with the contents of `other` builder.
    /// Sections are merged key by key, later sources win.
    fn extend_builder(&mut self, other: Self) {
        for (entry, entry_hm) in other.0 {
            if let Entry::Vacant(e) = self.0.entry(entry.clone()) {
                e.insert(entry_hm);
            } else {
                let target_hm = self.0.get_mut(&entry).expect("Checked above!");
                for (inner_entry, inner_value) in entry_hm {
                    target_hm.insert(inner_entry, inner_value);
                }
            }
        }
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::StringToEnvironmentFail),
        }
    }
}
