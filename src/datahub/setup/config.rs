use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::datahub::setup::error::{Result, SetupError};

/// Operational settings for one invocation of the tool.
///
/// The value is loaded once, never mutated, and passed explicitly to the
/// components that need it. Both supported file formats use the same key
/// set: `HOST`, `PORT`, `SERVICE`, `WEBIN`, `ADMIN_EMAIL`, `EMAIL_PORT`.
/// No defaults are substituted for absent keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    /// Host name for the database connection.
    pub host: String,
    /// Port number for the database connection.
    pub port: u16,
    /// Service name for the database connection.
    pub service: String,
    /// Administrative Webin account that owns newly registered data hubs.
    pub webin: String,
    /// Admin sender address for credential emails.
    pub admin_email: String,
    /// Port number for the mail relay.
    pub email_port: u16,
}

impl Config {
    /// Loads the settings file at `path`.
    ///
    /// A `.toml` suffix selects the structured document format; any other
    /// suffix is treated as the legacy plain-text format of one `KEY=value`
    /// pair per line.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let structured = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));
        if structured {
            Ok(toml::from_str(&text)?)
        } else {
            Self::parse_legacy(&text)
        }
    }

    /// Parses the legacy `KEY=value` settings format. Blank lines are
    /// ignored; a line without exactly one `=` separator is malformed.
    fn parse_legacy(text: &str) -> Result<Self> {
        let mut settings: BTreeMap<String, String> = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(SetupError::MalformedConfig(format!(
                    "expected one KEY=value pair, got '{line}'"
                )));
            };
            if value.contains('=') {
                return Err(SetupError::MalformedConfig(format!(
                    "expected one KEY=value pair, got '{line}'"
                )));
            }
            settings.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self {
            host: required(&settings, "HOST")?,
            port: port_setting(&settings, "PORT")?,
            service: required(&settings, "SERVICE")?,
            webin: required(&settings, "WEBIN")?,
            admin_email: required(&settings, "ADMIN_EMAIL")?,
            email_port: port_setting(&settings, "EMAIL_PORT")?,
        })
    }
}

fn required(settings: &BTreeMap<String, String>, key: &str) -> Result<String> {
    settings
        .get(key)
        .cloned()
        .ok_or_else(|| SetupError::MissingConfigKey(key.to_string()))
}

fn port_setting(settings: &BTreeMap<String, String>, key: &str) -> Result<u16> {
    let value = required(settings, key)?;
    value.parse().map_err(|_| {
        SetupError::MalformedConfig(format!("{key} must be a port number, got '{value}'"))
    })
}
