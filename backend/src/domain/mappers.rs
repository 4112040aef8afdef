//! Outbound mappers from domain types to the DTOs in the `shared` crate.
//! The UI shell renders these; the domain layer never returns `shared`
//! types directly.

use crate::domain::commands::accounting::{CampStatistics, FoodStatus, ShortageCheckResult};
use crate::domain::commands::assignments::BulkImportResult;
use crate::domain::models::camp::Camp;

pub fn camp_summary(camp: &Camp) -> shared::CampSummary {
    shared::CampSummary {
        name: camp.name.clone(),
        location: camp.location.clone(),
        camp_type: camp.camp_type.code(),
        camp_type_label: camp.camp_type.label().to_string(),
        start_date: camp.start_date.clone(),
        end_date: camp.end_date.clone(),
        leader_count: camp.scout_leaders.len() as u32,
        camper_count: camp.campers.len() as u32,
        food_stock: camp.food_stock,
        pay_rate: camp.pay_rate,
    }
}

pub fn shortage_report(result: &ShortageCheckResult) -> shared::ShortageReport {
    shared::ShortageReport {
        camp_name: result.forecast.camp_name.clone(),
        duration_days: result.forecast.duration_days,
        camper_count: result.forecast.camper_count as u32,
        food_per_camper: result.forecast.food_per_camper,
        required: result.forecast.required,
        available: result.available,
        sufficient: result.status == FoodStatus::Sufficient,
    }
}

pub fn statistics_row(statistics: &CampStatistics) -> shared::CampStatisticsRow {
    shared::CampStatisticsRow {
        name: statistics.name.clone(),
        location: statistics.location.clone(),
        camp_type: statistics.camp_type.code(),
        start_date: statistics.start_date.clone(),
        end_date: statistics.end_date.clone(),
        leader_count: statistics.leader_count as u32,
        camper_count: statistics.camper_count as u32,
        engagement_score: statistics.engagement_score,
        food_stock: statistics.food_stock,
        pay_rate: statistics.pay_rate,
    }
}

pub fn import_report(result: &BulkImportResult) -> shared::ImportReport {
    shared::ImportReport {
        camp_name: result.camp_name.clone(),
        added: result.added.clone(),
        already_enrolled: result.already_enrolled.clone(),
        collisions: result
            .collisions
            .iter()
            .map(|collision| {
                format!(
                    "{} already assigned to {}.",
                    collision.camper, collision.other_camp
                )
            })
            .collect(),
    }
}
