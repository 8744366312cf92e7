pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::dashboard::DashboardReport;
pub use config::toml_config::{AppConfig, DataSource};
pub use config::OutputFormat;
pub use crate::core::estimator::{Estimate, Estimator};
pub use crate::core::reference::ReferenceTables;
pub use domain::insight::Affordability;
pub use domain::model::{
    AreaRanking, CostBreakdown, EstimateRequest, HousingType, Lifestyle, RankedArea, ZoneBand,
};
pub use domain::ports::ReferenceData;
pub use utils::error::{CostError, Result};
