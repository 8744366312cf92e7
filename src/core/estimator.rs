use crate::core::{AreaRanking, CostBreakdown, EstimateRequest, RankedArea, ReferenceData};
use crate::domain::insight::Affordability;
use crate::domain::model::{HousingType, Lifestyle, ZoneBand};
use serde::Serialize;
use std::sync::Arc;

/// Point estimate and ranking computed for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub breakdown: CostBreakdown,
    pub affordability: Affordability,
    pub ranking: AreaRanking,
}

/// Cost estimation engine over a shared, read-only reference store.
///
/// Cloning is cheap and clones share the same store, so one estimator can
/// be handed to any number of threads.
pub struct Estimator<R: ReferenceData> {
    store: Arc<R>,
}

impl<R: ReferenceData> Clone for Estimator<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: ReferenceData> Estimator<R> {
    pub fn new(store: R) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<R>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn areas(&self) -> Vec<String> {
        self.store.list_areas()
    }

    /// Prices one request. Without a positive income and a non-blank area the
    /// result is the all-zero breakdown.
    pub fn estimate(&self, request: &EstimateRequest) -> CostBreakdown {
        let (income, area) = match (request.usable_income(), request.usable_area()) {
            (Some(income), Some(area)) => (income, area),
            _ => {
                tracing::debug!(
                    "Not ready to estimate (income: {:?}, area: {:?})",
                    request.net_monthly_income,
                    request.area
                );
                return CostBreakdown::zero();
            }
        };

        let rent = self.store.rent(area);
        let (utilities, groceries, transport) =
            self.profile_costs(request.housing_type, request.lifestyle);
        let total = rent + utilities + groceries + transport;

        let breakdown = CostBreakdown {
            rent,
            utilities,
            groceries,
            transport,
            total,
            leftover: income - total,
            rent_ratio_percent: rent / income * 100.0,
        };

        tracing::debug!(
            "Estimated {} ({}, {}): total {:.2}, leftover {:.2}, rent ratio {:.1}%",
            area,
            request.housing_type,
            request.lifestyle,
            breakdown.total,
            breakdown.leftover,
            breakdown.rent_ratio_percent
        );
        breakdown
    }

    /// Ranks every area by total monthly cost under the request's housing and
    /// lifestyle. Income and area are not needed.
    pub fn rank_areas(&self, request: &EstimateRequest) -> AreaRanking {
        let (utilities, groceries, transport) =
            self.profile_costs(request.housing_type, request.lifestyle);
        let shared = utilities + groceries + transport;

        let entries = self
            .store
            .list_areas()
            .into_iter()
            .map(|area| {
                let total_cost = self.store.rent(&area) + shared;
                RankedArea { area, total_cost }
            })
            .collect();

        let ranking = AreaRanking::from_unsorted(entries);
        if let Some(cheapest) = ranking.cheapest() {
            tracing::debug!(
                "Ranked {} areas, cheapest {} at {:.2}",
                ranking.len(),
                cheapest.area,
                cheapest.total_cost
            );
        }
        ranking
    }

    pub fn evaluate(&self, request: &EstimateRequest) -> Estimate {
        let breakdown = self.estimate(request);
        Estimate {
            affordability: Affordability::classify(&breakdown),
            breakdown,
            ranking: self.rank_areas(request),
        }
    }

    // Utilities, groceries and transport; transport is always the baseline band.
    fn profile_costs(&self, housing_type: HousingType, lifestyle: Lifestyle) -> (f64, f64, f64) {
        (
            self.store.utilities(housing_type, lifestyle),
            self.store.groceries(lifestyle),
            self.store.transport(ZoneBand::BASELINE),
        )
    }
}
