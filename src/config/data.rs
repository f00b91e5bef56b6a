//! Dataset configuration

use serde::Deserialize;

const DATA_BASE: &str = "https://raw.githubusercontent.com/wdobbels/FIREnet/gh-pages/assets/data";

/// Where the datasets live and which galaxy is selected at startup
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    /// Path or URL of seds.csv
    pub sed_source: String,
    /// Path or URL of uncertainty_validation.csv
    pub uncertainty_source: String,
    /// Galaxy selected when the explorer starts
    pub default_galaxy: String,
    /// Column stems of the dust properties shown in the last grid row
    pub properties: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sed_source: format!("{}/seds.csv", DATA_BASE),
            uncertainty_source: format!("{}/uncertainty_validation.csv", DATA_BASE),
            default_galaxy: "G12.DR1.3786".to_string(),
            properties: vec!["Ldust".into(), "Mdust".into(), "Tdust".into()],
        }
    }
}

/// Data settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileData {
    pub sed_source: Option<String>,
    pub uncertainty_source: Option<String>,
    pub default_galaxy: Option<String>,
    pub properties: Option<Vec<String>>,
}

impl DataConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileData>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            sed_source: file.sed_source.unwrap_or(defaults.sed_source),
            uncertainty_source: file
                .uncertainty_source
                .unwrap_or(defaults.uncertainty_source),
            default_galaxy: file.default_galaxy.unwrap_or(defaults.default_galaxy),
            properties: file.properties.unwrap_or(defaults.properties),
        }
    }
}
