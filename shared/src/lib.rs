use serde::{Deserialize, Serialize};

/// Lightweight camp view for list screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampSummary {
    pub name: String,
    pub location: String,
    /// Camp type code: 1 = Day, 2 = Overnight, 3 = Multi-Day
    pub camp_type: u8,
    pub camp_type_label: String,
    /// Inclusive date range, ISO 8601 (`YYYY-MM-DD`)
    pub start_date: String,
    pub end_date: String,
    pub leader_count: u32,
    pub camper_count: u32,
    /// Units of food per day
    pub food_stock: i64,
    /// Currency units per day
    pub pay_rate: i64,
}

/// Outcome of a food shortage check for one camp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageReport {
    pub camp_name: String,
    pub duration_days: i64,
    pub camper_count: u32,
    /// Units per camper per day from the requirement side store
    pub food_per_camper: i64,
    /// `camper_count * food_per_camper * duration_days`
    pub required: i64,
    /// `food_stock * duration_days`
    pub available: i64,
    pub sufficient: bool,
}

/// One row of the coordinator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampStatisticsRow {
    pub name: String,
    pub location: String,
    pub camp_type: u8,
    pub start_date: String,
    pub end_date: String,
    pub leader_count: u32,
    pub camper_count: u32,
    pub engagement_score: u32,
    pub food_stock: i64,
    pub pay_rate: i64,
}

/// Outcome of a bulk camper import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub camp_name: String,
    pub added: Vec<String>,
    /// Campers skipped because they were already enrolled in the target camp
    pub already_enrolled: Vec<String>,
    /// Human-readable collision messages, one per camper enrolled elsewhere
    pub collisions: Vec<String>,
}

impl ImportReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.already_enrolled.len() + self.collisions.len()
    }
}
