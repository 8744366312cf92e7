pub mod estimator;
pub mod reference;

pub use crate::domain::model::{AreaRanking, CostBreakdown, EstimateRequest, RankedArea};
pub use crate::domain::ports::ReferenceData;
pub use crate::utils::error::Result;
