use crate::domain::model::{HousingType, Lifestyle, ZoneBand};
use std::sync::Arc;

/// Read-only cost lookups. Every lookup is total: absent data reads as zero.
pub trait ReferenceData: Send + Sync {
    fn rent(&self, area: &str) -> f64;
    fn transport(&self, band: ZoneBand) -> f64;
    fn utilities(&self, housing_type: HousingType, lifestyle: Lifestyle) -> f64;
    fn groceries(&self, lifestyle: Lifestyle) -> f64;
    /// Area ids in ascending order.
    fn list_areas(&self) -> Vec<String>;
}

impl<R: ReferenceData + ?Sized> ReferenceData for Arc<R> {
    fn rent(&self, area: &str) -> f64 {
        (**self).rent(area)
    }

    fn transport(&self, band: ZoneBand) -> f64 {
        (**self).transport(band)
    }

    fn utilities(&self, housing_type: HousingType, lifestyle: Lifestyle) -> f64 {
        (**self).utilities(housing_type, lifestyle)
    }

    fn groceries(&self, lifestyle: Lifestyle) -> f64 {
        (**self).groceries(lifestyle)
    }

    fn list_areas(&self) -> Vec<String> {
        (**self).list_areas()
    }
}
