use crate::core::estimator::Estimate;
use crate::core::{CostBreakdown, EstimateRequest};
use crate::domain::insight::Affordability;
use crate::utils::format::{format_currency, format_percent};
use serde::Serialize;

pub const EMPTY_CHART_MESSAGE: &str = "Run an estimate to see the breakdown.";

/// One slice of the category breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub amount: f64,
    pub share_percent: f64,
    pub color: &'static str,
}

/// Chart slices for the four categories, or `None` when there is nothing to draw.
pub fn breakdown_chart(breakdown: &CostBreakdown) -> Option<Vec<ChartSlice>> {
    let categories = [
        ("Rent", breakdown.rent, "#6366f1"),
        ("Utilities", breakdown.utilities, "#22c55e"),
        ("Groceries", breakdown.groceries, "#eab308"),
        ("Transport", breakdown.transport, "#f97316"),
    ];
    let total: f64 = categories.iter().map(|(_, amount, _)| amount).sum();
    if total <= 0.0 {
        return None;
    }

    Some(
        categories
            .into_iter()
            .map(|(label, amount, color)| ChartSlice {
                label,
                amount,
                share_percent: amount / total * 100.0,
                color,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheapArea {
    pub rank: usize,
    pub area: String,
    pub total_cost: f64,
    /// Monthly saving compared with the selected area; negative when dearer.
    pub saving_vs_selected: Option<f64>,
}

/// Everything a front end needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub request: EstimateRequest,
    pub breakdown: CostBreakdown,
    pub affordability: Affordability,
    pub insight: String,
    pub chart: Option<Vec<ChartSlice>>,
    pub cheapest_areas: Vec<CheapArea>,
    pub selected_area_rank: Option<usize>,
}

impl DashboardReport {
    pub fn build(request: &EstimateRequest, estimate: &Estimate, top_n: usize) -> Self {
        let selected = request.usable_area();
        let selected_cost = selected.and_then(|area| estimate.ranking.cost_of(area));

        let cheapest_areas = estimate
            .ranking
            .top(top_n)
            .iter()
            .enumerate()
            .map(|(i, entry)| CheapArea {
                rank: i + 1,
                area: entry.area.clone(),
                total_cost: entry.total_cost,
                saving_vs_selected: selected_cost.map(|cost| cost - entry.total_cost),
            })
            .collect();

        Self {
            request: request.clone(),
            breakdown: estimate.breakdown,
            affordability: estimate.affordability,
            insight: estimate.affordability.insight().to_string(),
            chart: breakdown_chart(&estimate.breakdown),
            cheapest_areas,
            selected_area_rank: selected
                .and_then(|area| estimate.ranking.position(area))
                .map(|i| i + 1),
        }
    }

    pub fn render_text(&self, currency: &str) -> String {
        let b = &self.breakdown;
        let mut lines = vec![
            "London Living Cost Dashboard".to_string(),
            String::new(),
            "Summary".to_string(),
            format!(
                "  Estimated total: {} / month",
                format_currency(b.total, currency)
            ),
            format!("  Leftover:        {}", format_currency(b.leftover, currency)),
            format!(
                "  Rent ratio:      {} of your net income",
                format_percent(b.rent_ratio_percent)
            ),
            String::new(),
            "Breakdown".to_string(),
        ];

        match &self.chart {
            Some(slices) => {
                for slice in slices {
                    lines.push(format!(
                        "  {:<10} {:>8}  {:>5.1}%  {}",
                        slice.label,
                        format_currency(slice.amount, currency),
                        slice.share_percent,
                        bar(slice.share_percent)
                    ));
                }
            }
            None => lines.push(format!("  {}", EMPTY_CHART_MESSAGE)),
        }

        lines.push(String::new());
        lines.push(format!("Insight: {}", self.insight));

        if !self.cheapest_areas.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Cheapest areas ({}, {})",
                self.request.housing_type, self.request.lifestyle
            ));
            for entry in &self.cheapest_areas {
                let mut line = format!(
                    "  {}. {:<24} {} / month",
                    entry.rank,
                    entry.area,
                    format_currency(entry.total_cost, currency)
                );
                if let (Some(saving), Some(selected)) =
                    (entry.saving_vs_selected, self.request.usable_area())
                {
                    if saving > 0.0 {
                        line.push_str(&format!(
                            "  (save {} vs {})",
                            format_currency(saving, currency),
                            selected
                        ));
                    }
                }
                lines.push(line);
            }
            if let (Some(rank), Some(selected)) =
                (self.selected_area_rank, self.request.usable_area())
            {
                lines.push(format!("  {} ranks #{}", selected, rank));
            }
        }

        lines.join("\n")
    }
}

fn bar(share_percent: f64) -> String {
    "#".repeat((share_percent / 5.0).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::estimator::Estimator;
    use crate::core::reference::ReferenceTables;
    use crate::domain::model::{HousingSize, HousingType, Lifestyle, UtilitiesTier, ZoneBand};

    fn estimator() -> Estimator<ReferenceTables> {
        Estimator::new(
            ReferenceTables::new()
                .with_rent("Hackney", 1100.0)
                .with_rent("Bromley", 950.0)
                .with_rent("Sutton", 900.0)
                .with_utilities(HousingSize::SingleFlat, UtilitiesTier::Average, 120.0)
                .with_groceries(Lifestyle::Average, 250.0)
                .with_transport(ZoneBand::Zones1To3, 180.0),
        )
    }

    #[test]
    fn test_chart_shares_sum_to_hundred() {
        let breakdown = CostBreakdown {
            rent: 1100.0,
            utilities: 120.0,
            groceries: 250.0,
            transport: 180.0,
            total: 1650.0,
            leftover: 550.0,
            rent_ratio_percent: 50.0,
        };
        let slices = breakdown_chart(&breakdown).unwrap();
        let labels: Vec<&str> = slices.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Rent", "Utilities", "Groceries", "Transport"]);

        let total_share: f64 = slices.iter().map(|s| s.share_percent).sum();
        assert!((total_share - 100.0).abs() < 1e-9);
        assert!((slices[0].share_percent - 1100.0 / 1650.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_breakdown_has_no_chart() {
        assert!(breakdown_chart(&CostBreakdown::zero()).is_none());
    }

    #[test]
    fn test_report_with_selected_area() {
        let estimator = estimator();
        let request = EstimateRequest::new(HousingType::Studio, Lifestyle::Average)
            .with_income(2200.0)
            .with_area("Hackney");
        let report = DashboardReport::build(&request, &estimator.evaluate(&request), 2);

        assert_eq!(report.cheapest_areas.len(), 2);
        assert_eq!(report.cheapest_areas[0].area, "Sutton");
        assert_eq!(report.cheapest_areas[0].saving_vs_selected, Some(200.0));
        assert_eq!(report.cheapest_areas[1].saving_vs_selected, Some(150.0));
        assert_eq!(report.selected_area_rank, Some(3));

        let text = report.render_text("£");
        assert!(text.contains("£1,650 / month"));
        assert!(text.contains("£550"));
        assert!(text.contains("50%"));
        assert!(text.contains("save £200 vs Hackney"));
        assert!(text.contains("Hackney ranks #3"));
    }

    #[test]
    fn test_report_before_estimate() {
        let estimator = estimator();
        let request = EstimateRequest::new(HousingType::Studio, Lifestyle::Average);
        let report = DashboardReport::build(&request, &estimator.evaluate(&request), 3);

        assert_eq!(report.affordability, Affordability::NotEstimated);
        assert!(report.chart.is_none());
        assert_eq!(report.cheapest_areas.len(), 3);
        assert!(report.cheapest_areas.iter().all(|a| a.saving_vs_selected.is_none()));

        let text = report.render_text("£");
        assert!(text.contains("£0 / month"));
        assert!(text.contains(EMPTY_CHART_MESSAGE));
        assert!(!text.contains("ranks #"));
    }
}
