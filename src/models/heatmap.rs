//! Heatmap query models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "24h",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Day => 1,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrimeCategory {
    #[default]
    All,
    Theft,
    Assault,
    Vandalism,
    Fraud,
}

impl CrimeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrimeCategory::All => "all",
            CrimeCategory::Theft => "theft",
            CrimeCategory::Assault => "assault",
            CrimeCategory::Vandalism => "vandalism",
            CrimeCategory::Fraud => "fraud",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeatmapQuery {
    pub range: TimeRange,
    pub category: CrimeCategory,
}

impl HeatmapQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("range".to_string(), self.range.as_str().to_string()),
            ("category".to_string(), self.category.as_str().to_string()),
        ]
    }
}

/// Aggregated crime intensity at a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    /// 相对强度（0-100）
    pub weight: f64,
    pub name: String,
    pub crimes: u32,
}
