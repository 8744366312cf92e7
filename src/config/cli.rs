use crate::config::toml_config::AppConfig;
use crate::core::EstimateRequest;
use crate::utils::error::{CostError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cost-of-living")]
#[command(about = "Estimate monthly living costs and rank the cheapest areas")]
pub struct CliConfig {
    /// Net monthly income, e.g. 2200 or "£2,200"
    #[arg(long, allow_hyphen_values = true)]
    pub income: Option<String>,

    /// Area (borough) to price
    #[arg(long)]
    pub area: Option<String>,

    /// shared-room, studio or one-bed
    #[arg(long, default_value = "studio")]
    pub housing: String,

    /// frugal, average or comfortable
    #[arg(long, default_value = "average")]
    pub lifestyle: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding rent.json, transport.json, utilities.json and groceries.json
    #[arg(long, conflicts_with = "data_bundle")]
    pub data_dir: Option<String>,

    /// Single JSON file holding all reference tables
    #[arg(long)]
    pub data_bundle: Option<String>,

    /// Number of cheapest areas to show
    #[arg(long)]
    pub top: Option<usize>,

    /// text, json or csv
    #[arg(long)]
    pub format: Option<String>,

    /// Print the known areas and exit
    #[arg(long)]
    pub list_areas: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn request(&self) -> Result<EstimateRequest> {
        EstimateRequest::from_form(
            self.income.as_deref().unwrap_or(""),
            self.area.as_deref().unwrap_or(""),
            &self.housing,
            &self.lifestyle,
        )
    }

    /// Loads the config file if one was given and layers command-line flags on top.
    pub fn resolve_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            let data = config.data_mut();
            data.dir = Some(dir.clone());
            data.bundle = None;
        }
        if let Some(bundle) = &self.data_bundle {
            let data = config.data_mut();
            data.bundle = Some(bundle.clone());
            data.dir = None;
        }
        if let Some(top) = self.top {
            config.display_mut().top_n = Some(top);
        }
        if let Some(format) = &self.format {
            config.display_mut().format = Some(format.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(dir) = &self.data_dir {
            validate_path("data_dir", dir)?;
        }
        if let Some(bundle) = &self.data_bundle {
            validate_path("data_bundle", bundle)?;
        }
        if let Some(top) = self.top {
            validate_positive_number("top", top, 1)?;
        }
        if let Some(format) = &self.format {
            format.parse::<crate::config::OutputFormat>()?;
        }
        self.housing
            .parse::<crate::domain::model::HousingType>()
            .map_err(|e| CostError::InvalidConfigValueError {
                field: "housing".to_string(),
                value: self.housing.clone(),
                reason: e.to_string(),
            })?;
        self.lifestyle
            .parse::<crate::domain::model::Lifestyle>()
            .map_err(|e| CostError::InvalidConfigValueError {
                field: "lifestyle".to_string(),
                value: self.lifestyle.clone(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
