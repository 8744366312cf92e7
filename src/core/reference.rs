use crate::domain::model::{
    groceries_key, HouseholdSize, HousingSize, HousingType, Lifestyle, UtilitiesTier, ZoneBand,
};
use crate::domain::ports::ReferenceData;
use crate::utils::error::{CostError, Result};
use crate::utils::validation::{validate_amount, Validate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const RENT_FILE: &str = "rent.json";
pub const TRANSPORT_FILE: &str = "transport.json";
pub const UTILITIES_FILE: &str = "utilities.json";
pub const GROCERIES_FILE: &str = "groceries.json";

const BUNDLED_RENT: &str = include_str!("../../data/rent.json");
const BUNDLED_TRANSPORT: &str = include_str!("../../data/transport.json");
const BUNDLED_UTILITIES: &str = include_str!("../../data/utilities.json");
const BUNDLED_GROCERIES: &str = include_str!("../../data/groceries.json");

// Null entries are accepted on input and dropped, so they read as zero.
type RawTable = BTreeMap<String, Option<f64>>;
type RawNestedTable = BTreeMap<String, BTreeMap<String, Option<f64>>>;

#[derive(Debug, Default, Deserialize)]
struct RawBundle {
    #[serde(default)]
    rent: RawTable,
    #[serde(default)]
    transport: RawTable,
    #[serde(default)]
    utilities: RawNestedTable,
    #[serde(default)]
    groceries: RawTable,
}

fn compact(raw: RawTable) -> BTreeMap<String, f64> {
    raw.into_iter()
        .filter_map(|(key, amount)| amount.map(|amount| (key, amount)))
        .collect()
}

fn compact_nested(raw: RawNestedTable) -> BTreeMap<String, BTreeMap<String, f64>> {
    raw.into_iter().map(|(key, row)| (key, compact(row))).collect()
}

/// The four cost tables, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    rent_by_area: BTreeMap<String, f64>,
    transport_by_band: BTreeMap<String, f64>,
    utilities_by_profile: BTreeMap<String, BTreeMap<String, f64>>,
    groceries_by_profile: BTreeMap<String, f64>,
}

impl ReferenceTables {
    /// Empty tables; every lookup reads zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rent(mut self, area: impl Into<String>, amount: f64) -> Self {
        self.rent_by_area.insert(area.into(), amount);
        self
    }

    pub fn with_transport(mut self, band: ZoneBand, amount: f64) -> Self {
        self.transport_by_band.insert(band.key().to_string(), amount);
        self
    }

    pub fn with_utilities(mut self, size: HousingSize, tier: UtilitiesTier, amount: f64) -> Self {
        self.utilities_by_profile
            .entry(size.key().to_string())
            .or_default()
            .insert(tier.key().to_string(), amount);
        self
    }

    pub fn with_groceries(mut self, lifestyle: Lifestyle, amount: f64) -> Self {
        self.groceries_by_profile.insert(
            groceries_key(HouseholdSize::Single, lifestyle.groceries_tier()),
            amount,
        );
        self
    }

    /// The London tables shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_table_strs(
            BUNDLED_RENT,
            BUNDLED_TRANSPORT,
            BUNDLED_UTILITIES,
            BUNDLED_GROCERIES,
        )
    }

    /// Parses one JSON document per table.
    pub fn from_table_strs(
        rent: &str,
        transport: &str,
        utilities: &str,
        groceries: &str,
    ) -> Result<Self> {
        let raw = RawBundle {
            rent: serde_json::from_str(rent)?,
            transport: serde_json::from_str(transport)?,
            utilities: serde_json::from_str(utilities)?,
            groceries: serde_json::from_str(groceries)?,
        };
        Self::from_raw(raw)
    }

    /// Parses a single JSON document holding `rent`, `transport`,
    /// `utilities` and `groceries` objects. Missing tables are empty.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawBundle = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn from_bundle_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::info!("Loading reference bundle from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    /// Loads `rent.json`, `transport.json`, `utilities.json` and
    /// `groceries.json` from `dir`. A missing file yields an empty table, but
    /// the directory itself must exist.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CostError::InvalidConfigValueError {
                field: "data.dir".to_string(),
                value: dir.display().to_string(),
                reason: "directory does not exist".to_string(),
            });
        }
        tracing::info!("Loading reference tables from {}", dir.display());

        let rent = read_table_file(dir, RENT_FILE)?;
        let transport = read_table_file(dir, TRANSPORT_FILE)?;
        let utilities = read_table_file(dir, UTILITIES_FILE)?;
        let groceries = read_table_file(dir, GROCERIES_FILE)?;

        Self::from_table_strs(&rent, &transport, &utilities, &groceries)
    }

    fn from_raw(raw: RawBundle) -> Result<Self> {
        let tables = Self {
            rent_by_area: compact(raw.rent),
            transport_by_band: compact(raw.transport),
            utilities_by_profile: compact_nested(raw.utilities),
            groceries_by_profile: compact(raw.groceries),
        };
        tables.validate()?;

        tracing::info!(
            "Reference tables ready: {} areas, {} zone bands, {} utilities profiles, {} groceries profiles",
            tables.rent_by_area.len(),
            tables.transport_by_band.len(),
            tables.utilities_by_profile.values().map(BTreeMap::len).sum::<usize>(),
            tables.groceries_by_profile.len()
        );
        Ok(tables)
    }

    pub fn area_count(&self) -> usize {
        self.rent_by_area.len()
    }
}

fn read_table_file(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("{} not found, treating the table as empty", path.display());
            Ok("{}".to_string())
        }
        Err(e) => Err(CostError::IoError(e)),
    }
}

impl Validate for ReferenceTables {
    fn validate(&self) -> Result<()> {
        for (area, amount) in &self.rent_by_area {
            if area.trim().is_empty() || area.trim() != area {
                return Err(CostError::InvalidReferenceData {
                    table: "rent".to_string(),
                    key: area.clone(),
                    reason: "area id is blank or has surrounding whitespace".to_string(),
                });
            }
            validate_amount("rent", area, *amount)?;
        }
        for (band, amount) in &self.transport_by_band {
            validate_amount("transport", band, *amount)?;
        }
        for (size, row) in &self.utilities_by_profile {
            for (tier, amount) in row {
                validate_amount("utilities", &format!("{}.{}", size, tier), *amount)?;
            }
        }
        for (profile, amount) in &self.groceries_by_profile {
            validate_amount("groceries", profile, *amount)?;
        }
        Ok(())
    }
}

impl ReferenceData for ReferenceTables {
    fn rent(&self, area: &str) -> f64 {
        let area = area.trim();
        if area.is_empty() {
            return 0.0;
        }
        self.rent_by_area.get(area).copied().unwrap_or(0.0)
    }

    fn transport(&self, band: ZoneBand) -> f64 {
        self.transport_by_band.get(band.key()).copied().unwrap_or(0.0)
    }

    fn utilities(&self, housing_type: HousingType, lifestyle: Lifestyle) -> f64 {
        self.utilities_by_profile
            .get(housing_type.size().key())
            .and_then(|row| row.get(lifestyle.utilities_tier().key()))
            .copied()
            .unwrap_or(0.0)
    }

    fn groceries(&self, lifestyle: Lifestyle) -> f64 {
        let key = groceries_key(HouseholdSize::Single, lifestyle.groceries_tier());
        self.groceries_by_profile.get(&key).copied().unwrap_or(0.0)
    }

    fn list_areas(&self) -> Vec<String> {
        self.rent_by_area.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lookups_on_synthetic_tables() {
        let tables = ReferenceTables::new()
            .with_rent("Hackney", 1100.0)
            .with_transport(ZoneBand::Zones1To3, 180.0)
            .with_utilities(HousingSize::SingleFlat, UtilitiesTier::Average, 120.0)
            .with_utilities(HousingSize::OneBed, UtilitiesTier::Average, 160.0)
            .with_groceries(Lifestyle::Average, 250.0);

        assert_eq!(tables.rent("Hackney"), 1100.0);
        assert_eq!(tables.transport(ZoneBand::Zones1To3), 180.0);
        assert_eq!(tables.utilities(HousingType::SharedRoom, Lifestyle::Average), 120.0);
        assert_eq!(tables.utilities(HousingType::Studio, Lifestyle::Average), 120.0);
        assert_eq!(tables.utilities(HousingType::OneBedFlat, Lifestyle::Average), 160.0);
        assert_eq!(tables.groceries(Lifestyle::Average), 250.0);
    }

    #[test]
    fn test_missing_entries_read_as_zero() {
        let tables = ReferenceTables::new().with_rent("Hackney", 1100.0);
        assert_eq!(tables.rent(""), 0.0);
        assert_eq!(tables.rent("   "), 0.0);
        assert_eq!(tables.rent("Atlantis"), 0.0);
        assert_eq!(tables.transport(ZoneBand::Zones1To3), 0.0);
        assert_eq!(tables.utilities(HousingType::OneBedFlat, Lifestyle::Frugal), 0.0);
        assert_eq!(tables.groceries(Lifestyle::Comfortable), 0.0);
    }

    #[test]
    fn test_list_areas_is_sorted() {
        let tables = ReferenceTables::new()
            .with_rent("Hackney", 1.0)
            .with_rent("Bromley", 1.0)
            .with_rent("Camden", 1.0);
        assert_eq!(tables.list_areas(), vec!["Bromley", "Camden", "Hackney"]);
    }

    #[test]
    fn test_bundled_tables_load() {
        let tables = ReferenceTables::bundled().unwrap();
        assert_eq!(tables.area_count(), 32);
        assert!(tables.rent("Hackney") > 0.0);
        assert!(tables.transport(ZoneBand::BASELINE) > 0.0);
        for housing in HousingType::ALL {
            for lifestyle in Lifestyle::ALL {
                assert!(tables.utilities(housing, lifestyle) > 0.0);
            }
        }
        assert!(tables.groceries(Lifestyle::Frugal) < tables.groceries(Lifestyle::Comfortable));

        for pair in Lifestyle::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            for housing in HousingType::ALL {
                assert!(
                    tables.utilities(housing, lower) <= tables.utilities(housing, higher),
                    "utilities drop from {} to {} for {}",
                    lower,
                    higher,
                    housing
                );
            }
            assert!(tables.groceries(lower) <= tables.groceries(higher));
        }
    }

    #[test]
    fn test_from_json_str_drops_nulls_and_missing_tables() {
        let tables = ReferenceTables::from_json_str(
            r#"{
                "rent": {"Hackney": 1100, "Bromley": null},
                "utilities": {"single_flat": {"average": 120, "high": null}}
            }"#,
        )
        .unwrap();

        assert_eq!(tables.list_areas(), vec!["Hackney"]);
        assert_eq!(tables.rent("Bromley"), 0.0);
        assert_eq!(tables.utilities(HousingType::Studio, Lifestyle::Average), 120.0);
        assert_eq!(tables.utilities(HousingType::Studio, Lifestyle::Comfortable), 0.0);
        assert_eq!(tables.transport(ZoneBand::BASELINE), 0.0);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let err = ReferenceTables::from_json_str(r#"{"rent": {"Hackney": -5}}"#).unwrap_err();
        assert!(matches!(err, CostError::InvalidReferenceData { .. }));
    }

    #[test]
    fn test_padded_or_blank_area_ids_are_rejected() {
        for rent in [
            r#"{"rent": {"Hackney ": 1100, "Bromley": 950}}"#,
            r#"{"rent": {" Hackney": 1100}}"#,
            r#"{"rent": {"": 700, "Bromley": 950}}"#,
            r#"{"rent": {"   ": 700}}"#,
        ] {
            let err = ReferenceTables::from_json_str(rent).unwrap_err();
            assert!(
                matches!(err, CostError::InvalidReferenceData { ref table, .. } if table == "rent"),
                "{} should be rejected",
                rent
            );
        }
    }

    #[test]
    fn test_from_dir_requires_existing_directory() {
        let dir = TempDir::new().unwrap();
        let err = ReferenceTables::from_dir(dir.path().join("nothing-here")).unwrap_err();
        assert!(matches!(err, CostError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let err = ReferenceTables::from_json_str(r#"{"rent": {"Hackney": "cheap"}}"#).unwrap_err();
        assert!(matches!(err, CostError::JsonError(_)));
    }

    #[test]
    fn test_from_dir_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(RENT_FILE), r#"{"Hackney": 1100}"#).unwrap();
        fs::write(dir.path().join(GROCERIES_FILE), r#"{"single_medium": 250}"#).unwrap();

        let tables = ReferenceTables::from_dir(dir.path()).unwrap();
        assert_eq!(tables.rent("Hackney"), 1100.0);
        assert_eq!(tables.groceries(Lifestyle::Average), 250.0);
        assert_eq!(tables.transport(ZoneBand::BASELINE), 0.0);
    }

    #[test]
    fn test_from_bundle_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reference.json");
        fs::write(&path, r#"{"transport": {"zones_1_3": 180}}"#).unwrap();

        let tables = ReferenceTables::from_bundle_file(&path).unwrap();
        assert_eq!(tables.transport(ZoneBand::Zones1To3), 180.0);
        assert!(ReferenceTables::from_bundle_file(dir.path().join("nope.json")).is_err());
    }
}
