// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::context::AppContext;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

pub const ACCESS_TOKEN_ENV: &str = "CHEAT_SHEET_ACCESS_TOKEN";

fn default_family_programming() -> String {
    "Tot shabbat will be starting at 10:30 in the classroom on the left, followed by Parent & Me at 11:00, \
     and junior minyan will be starting at 11:00 in the classroom on the right."
        .to_string()
}

fn default_hebcal() -> String {
    crate::client::hebcal::DEFAULT_BASE_URL.to_string()
}
fn default_sheets() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}
fn default_docs() -> String {
    "https://docs.googleapis.com/v1".to_string()
}
fn default_drive() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

/// Template document ids, one per sheet variant.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Templates {
    pub standard: String,
    pub rosh_chodesh: String,
    pub hanukkah: String,
    pub hanukkah_rosh_chodesh: String,
    pub shuva: String,
    pub shekalim: String,
    pub shekalim_rosh_chodesh: String,
    pub zachor: String,
    pub parah: String,
    pub hachodesh: String,
    pub hachodesh_rosh_chodesh: String,
}

/// Spreadsheet ids. The page-number spreadsheet also holds the Mi Shebeyrach list.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Sheets {
    pub calendar: String,
    pub kiddush: String,
    pub scotch: String,
    pub page_numbers: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Shamash {
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_hebcal")]
    pub hebcal: String,
    #[serde(default = "default_sheets")]
    pub sheets: String,
    #[serde(default = "default_docs")]
    pub docs: String,
    #[serde(default = "default_drive")]
    pub drive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            hebcal: default_hebcal(),
            sheets: default_sheets(),
            docs: default_docs(),
            drive: default_drive(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_family_programming")]
    pub family_programming: String,
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub sheets: Sheets,
    /// Roster short name -> full name.
    #[serde(default)]
    pub shamashim: HashMap<String, Shamash>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            family_programming: default_family_programming(),
            templates: Templates::default(),
            sheets: Sheets::default(),
            shamashim: HashMap::new(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Config file not found (expected at '{}')",
                path.display()
            ));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        err.to_string().contains("Config file not found")
    }

    /// Bearer token for the Google APIs; the environment wins over the file.
    pub fn resolve_access_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV)
            && !token.trim().is_empty()
        {
            return Ok(token.trim().to_string());
        }
        self.access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No access token: set {} or `access_token` in the config file",
                    ACCESS_TOKEN_ENV
                )
            })
    }

    /// Full name for a roster entry, falling back to the entry itself.
    pub fn shamash_name<'a>(&'a self, short: &'a str) -> &'a str {
        self.shamashim
            .get(short)
            .map(|s| s.name.as_str())
            .unwrap_or(short)
    }
}
