use crate::utils::error::{CostError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    SharedRoom,
    Studio,
    OneBedFlat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Frugal,
    Average,
    Comfortable,
}

/// Row key of the utilities table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HousingSize {
    SingleFlat,
    OneBed,
}

/// Column key of the utilities table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UtilitiesTier {
    Low,
    Average,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseholdSize {
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroceriesTier {
    Low,
    Medium,
    High,
}

/// Transit fare band. Estimates are only ever priced at [`ZoneBand::BASELINE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneBand {
    Zones1To2,
    Zones1To3,
    Zones1To4,
    Zones1To5,
    Zones1To6,
}

impl HousingType {
    pub const ALL: [HousingType; 3] = [
        HousingType::SharedRoom,
        HousingType::Studio,
        HousingType::OneBedFlat,
    ];

    /// Utilities only distinguish a one-bed flat from everything smaller.
    pub const fn size(self) -> HousingSize {
        match self {
            HousingType::OneBedFlat => HousingSize::OneBed,
            HousingType::SharedRoom | HousingType::Studio => HousingSize::SingleFlat,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            HousingType::SharedRoom => "Room in shared flat",
            HousingType::Studio => "Studio",
            HousingType::OneBedFlat => "1-bed flat",
        }
    }
}

impl Lifestyle {
    pub const ALL: [Lifestyle; 3] = [Lifestyle::Frugal, Lifestyle::Average, Lifestyle::Comfortable];

    pub const fn utilities_tier(self) -> UtilitiesTier {
        match self {
            Lifestyle::Frugal => UtilitiesTier::Low,
            Lifestyle::Average => UtilitiesTier::Average,
            Lifestyle::Comfortable => UtilitiesTier::High,
        }
    }

    pub const fn groceries_tier(self) -> GroceriesTier {
        match self {
            Lifestyle::Frugal => GroceriesTier::Low,
            Lifestyle::Average => GroceriesTier::Medium,
            Lifestyle::Comfortable => GroceriesTier::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Lifestyle::Frugal => "Frugal",
            Lifestyle::Average => "Average",
            Lifestyle::Comfortable => "Comfortable",
        }
    }
}

impl HousingSize {
    pub const fn key(self) -> &'static str {
        match self {
            HousingSize::SingleFlat => "single_flat",
            HousingSize::OneBed => "one_bed",
        }
    }
}

impl UtilitiesTier {
    pub const fn key(self) -> &'static str {
        match self {
            UtilitiesTier::Low => "low",
            UtilitiesTier::Average => "average",
            UtilitiesTier::High => "high",
        }
    }
}

impl HouseholdSize {
    pub const fn key(self) -> &'static str {
        match self {
            HouseholdSize::Single => "single",
        }
    }
}

impl GroceriesTier {
    pub const fn key(self) -> &'static str {
        match self {
            GroceriesTier::Low => "low",
            GroceriesTier::Medium => "medium",
            GroceriesTier::High => "high",
        }
    }
}

/// Flattened groceries key, e.g. `single_medium`.
pub fn groceries_key(household: HouseholdSize, tier: GroceriesTier) -> String {
    format!("{}_{}", household.key(), tier.key())
}

impl ZoneBand {
    /// The band every estimate is priced at.
    pub const BASELINE: ZoneBand = ZoneBand::Zones1To3;

    pub const fn key(self) -> &'static str {
        match self {
            ZoneBand::Zones1To2 => "zones_1_2",
            ZoneBand::Zones1To3 => "zones_1_3",
            ZoneBand::Zones1To4 => "zones_1_4",
            ZoneBand::Zones1To5 => "zones_1_5",
            ZoneBand::Zones1To6 => "zones_1_6",
        }
    }
}

fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

impl FromStr for HousingType {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "shared-room" | "room" | "room-in-shared-flat" | "shared" => Ok(HousingType::SharedRoom),
            "studio" => Ok(HousingType::Studio),
            "one-bed" | "one-bed-flat" | "1-bed" | "1-bed-flat" => Ok(HousingType::OneBedFlat),
            _ => Err(CostError::UnknownLabel {
                kind: "housing type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Lifestyle {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "frugal" => Ok(Lifestyle::Frugal),
            "average" => Ok(Lifestyle::Average),
            "comfortable" => Ok(Lifestyle::Comfortable),
            _ => Err(CostError::UnknownLabel {
                kind: "lifestyle".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One estimation request, as assembled by a front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub net_monthly_income: Option<f64>,
    pub area: Option<String>,
    pub housing_type: HousingType,
    pub lifestyle: Lifestyle,
}

impl EstimateRequest {
    pub fn new(housing_type: HousingType, lifestyle: Lifestyle) -> Self {
        Self {
            net_monthly_income: None,
            area: None,
            housing_type,
            lifestyle,
        }
    }

    pub fn with_income(mut self, income: f64) -> Self {
        self.net_monthly_income = Some(income);
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Builds a request from raw form fields.
    ///
    /// Income text that is not a number becomes an unset income and an empty
    /// area becomes an unset area. Unknown housing or lifestyle labels are
    /// rejected since there is no sensible default row to fall back to.
    pub fn from_form(
        income_text: &str,
        area: &str,
        housing_label: &str,
        lifestyle_label: &str,
    ) -> Result<Self> {
        let area = area.trim();
        Ok(Self {
            net_monthly_income: crate::utils::validation::normalize_income(income_text),
            area: (!area.is_empty()).then(|| area.to_string()),
            housing_type: housing_label.parse()?,
            lifestyle: lifestyle_label.parse()?,
        })
    }

    /// Income usable for a point estimate: positive and finite.
    pub fn usable_income(&self) -> Option<f64> {
        self.net_monthly_income
            .filter(|income| income.is_finite() && *income > 0.0)
    }

    /// Area usable for a point estimate: set and not blank.
    pub fn usable_area(&self) -> Option<&str> {
        self.area
            .as_deref()
            .map(str::trim)
            .filter(|area| !area.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub rent: f64,
    pub utilities: f64,
    pub groceries: f64,
    pub transport: f64,
    pub total: f64,
    pub leftover: f64,
    pub rent_ratio_percent: f64,
}

impl CostBreakdown {
    /// The "not ready to estimate" result.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedArea {
    pub area: String,
    pub total_cost: f64,
}

/// Areas ordered cheapest first; ties are ordered by area id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaRanking {
    entries: Vec<RankedArea>,
}

impl AreaRanking {
    /// Sorts the entries into ranking order.
    pub fn from_unsorted(mut entries: Vec<RankedArea>) -> Self {
        entries.sort_by(|a, b| {
            a.total_cost
                .total_cmp(&b.total_cost)
                .then_with(|| a.area.cmp(&b.area))
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedArea] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[RankedArea] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn cheapest(&self) -> Option<&RankedArea> {
        self.entries.first()
    }

    pub fn position(&self, area: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.area == area)
    }

    pub fn cost_of(&self, area: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.area == area)
            .map(|entry| entry.total_cost)
    }

    /// How much more `area` costs per month than the cheapest area.
    pub fn savings_against_cheapest(&self, area: &str) -> Option<f64> {
        let cheapest = self.cheapest()?;
        self.cost_of(area).map(|cost| cost - cheapest.total_cost)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedArea> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AreaRanking {
    type Item = &'a RankedArea;
    type IntoIter = std::slice::Iter<'a, RankedArea>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
