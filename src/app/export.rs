use crate::app::dashboard::DashboardReport;
use crate::core::AreaRanking;
use crate::utils::error::{CostError, Result};
use serde::Serialize;

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    area: &'a str,
    total_cost: f64,
    saving_vs_cheapest: f64,
}

pub fn report_to_json(report: &DashboardReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Full ranking as CSV: `rank,area,total_cost,saving_vs_cheapest`.
pub fn ranking_to_csv(ranking: &AreaRanking) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let cheapest = ranking.cheapest().map(|e| e.total_cost).unwrap_or(0.0);

    for (i, entry) in ranking.iter().enumerate() {
        writer.serialize(RankingRow {
            rank: i + 1,
            area: &entry.area,
            total_cost: entry.total_cost,
            saving_vs_cheapest: entry.total_cost - cheapest,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CostError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| CostError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
