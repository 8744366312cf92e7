use crate::config::OutputFormat;
use crate::core::reference::ReferenceTables;
use crate::utils::error::{CostError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: Option<DataConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory with one JSON file per table.
    pub dir: Option<String>,
    /// Single JSON file holding all four tables.
    pub bundle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub top_n: Option<usize>,
    pub currency_symbol: Option<String>,
    pub format: Option<String>,
}

/// Where reference tables come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    Dir(PathBuf),
    Bundle(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> Result<ReferenceTables> {
        match self {
            DataSource::Bundled => {
                tracing::info!("Using bundled London reference tables");
                ReferenceTables::bundled()
            }
            DataSource::Dir(dir) => ReferenceTables::from_dir(dir),
            DataSource::Bundle(path) => ReferenceTables::from_bundle_file(path),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CostError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            CostError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(data) = &self.data {
            if data.dir.is_some() && data.bundle.is_some() {
                return Err(CostError::ConfigValidationError {
                    field: "data".to_string(),
                    message: "set either data.dir or data.bundle, not both".to_string(),
                });
            }
            if let Some(dir) = &data.dir {
                validate_path("data.dir", dir)?;
            }
            if let Some(bundle) = &data.bundle {
                validate_path("data.bundle", bundle)?;
            }
        }

        if let Some(display) = &self.display {
            if let Some(top_n) = display.top_n {
                validate_positive_number("display.top_n", top_n, 1)?;
            }
            if let Some(symbol) = &display.currency_symbol {
                validate_non_empty_string("display.currency_symbol", symbol)?;
            }
        }
        self.output_format()?;

        Ok(())
    }

    pub fn data_source(&self) -> DataSource {
        match &self.data {
            Some(DataConfig { dir: Some(dir), .. }) => DataSource::Dir(PathBuf::from(dir)),
            Some(DataConfig {
                bundle: Some(bundle),
                ..
            }) => DataSource::Bundle(PathBuf::from(bundle)),
            _ => DataSource::Bundled,
        }
    }

    pub fn top_n(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|d| d.top_n)
            .unwrap_or(DEFAULT_TOP_N)
    }

    pub fn currency_symbol(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|d| d.currency_symbol.as_deref())
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        match self.display.as_ref().and_then(|d| d.format.as_deref()) {
            Some(format) => format.parse(),
            None => Ok(OutputFormat::Text),
        }
    }

    pub fn display_mut(&mut self) -> &mut DisplayConfig {
        self.display.get_or_insert_with(DisplayConfig::default)
    }

    pub fn data_mut(&mut self) -> &mut DataConfig {
        self.data.get_or_insert_with(DataConfig::default)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
dir = "./data"

[display]
top_n = 5
currency_symbol = "$"
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_source(), DataSource::Dir(PathBuf::from("./data")));
        assert_eq!(config.top_n(), 5);
        assert_eq!(config.currency_symbol(), "$");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.data_source(), DataSource::Bundled);
        assert_eq!(config.top_n(), DEFAULT_TOP_N);
        assert_eq!(config.currency_symbol(), "£");
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COST_TEST_DATA_BUNDLE", "/tmp/london.json");

        let config = AppConfig::from_toml_str(
            r#"
[data]
bundle = "${COST_TEST_DATA_BUNDLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.data_source(),
            DataSource::Bundle(PathBuf::from("/tmp/london.json"))
        );

        std::env::remove_var("COST_TEST_DATA_BUNDLE");
    }

    #[test]
    fn test_config_validation() {
        let both = AppConfig::from_toml_str(
            r#"
[data]
dir = "./data"
bundle = "./bundle.json"
"#,
        )
        .unwrap();
        assert!(both.validate().is_err());

        let zero_top = AppConfig::from_toml_str("[display]\ntop_n = 0\n").unwrap();
        assert!(zero_top.validate().is_err());

        let bad_format = AppConfig::from_toml_str("[display]\nformat = \"pdf\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let blank_symbol = AppConfig::from_toml_str("[display]\ncurrency_symbol = \" \"\n").unwrap();
        assert!(blank_symbol.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[display\ntop_n = 3").unwrap_err();
        assert!(matches!(err, CostError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[display]\ntop_n = 1\n").unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.top_n(), 1);
    }

    #[test]
    fn test_bundled_source_loads() {
        let tables = DataSource::Bundled.load().unwrap();
        assert_eq!(tables.area_count(), 32);
    }
}
