// Presentation helpers: dashboard view model plus json/csv export.

pub mod dashboard;
pub mod export;
