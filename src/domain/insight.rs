use crate::domain::model::CostBreakdown;
use serde::{Deserialize, Serialize};

pub const HEALTHY_RENT_RATIO: f64 = 30.0;
pub const HIGH_BURDEN_RENT_RATIO: f64 = 40.0;

/// Affordability band of a breakdown, driven by the rent ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordability {
    NotEstimated,
    Unaffordable,
    Healthy,
    Borderline,
    HighBurden,
}

impl Affordability {
    /// A negative leftover wins over any ratio band. The band edges 30% and
    /// 40% are both borderline.
    pub fn classify(breakdown: &CostBreakdown) -> Self {
        if breakdown.is_zero() {
            return Affordability::NotEstimated;
        }
        if breakdown.leftover < 0.0 {
            return Affordability::Unaffordable;
        }

        let ratio = breakdown.rent_ratio_percent;
        if ratio < HEALTHY_RENT_RATIO {
            Affordability::Healthy
        } else if ratio <= HIGH_BURDEN_RENT_RATIO {
            Affordability::Borderline
        } else {
            Affordability::HighBurden
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            Affordability::NotEstimated => {
                "Enter your income and pick an area to get an estimate."
            }
            Affordability::Unaffordable => {
                "Your estimated costs exceed your income. Consider a cheaper area or housing type."
            }
            Affordability::Healthy => "Rent is under 30% of your income, which is healthy.",
            Affordability::Borderline => {
                "Rent takes 30-40% of your income. Manageable, but keep an eye on other spending."
            }
            Affordability::HighBurden => {
                "Rent is over 40% of your income, which is a high burden."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(rent_ratio_percent: f64, leftover: f64) -> CostBreakdown {
        CostBreakdown {
            rent: 1.0,
            total: 1.0,
            leftover,
            rent_ratio_percent,
            ..CostBreakdown::zero()
        }
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(Affordability::classify(&breakdown(25.0, 300.0)), Affordability::Healthy);
        assert_eq!(Affordability::classify(&breakdown(30.0, 300.0)), Affordability::Borderline);
        assert_eq!(Affordability::classify(&breakdown(40.0, 300.0)), Affordability::Borderline);
        assert_eq!(Affordability::classify(&breakdown(40.1, 300.0)), Affordability::HighBurden);
    }

    #[test]
    fn test_negative_leftover_is_unaffordable() {
        assert_eq!(Affordability::classify(&breakdown(10.0, -1.0)), Affordability::Unaffordable);
        assert_eq!(Affordability::classify(&breakdown(80.0, -500.0)), Affordability::Unaffordable);
    }

    #[test]
    fn test_zero_breakdown_is_not_estimated() {
        assert_eq!(
            Affordability::classify(&CostBreakdown::zero()),
            Affordability::NotEstimated
        );
        assert!(Affordability::NotEstimated.insight().contains("income"));
    }
}
