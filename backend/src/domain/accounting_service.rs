//! Resource accounting: food shortage forecasting, earnings and the
//! engagement heuristic. Everything here is derived arithmetic over the
//! camp list; the only side effect is the shortage notification.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::accounting::{
    CampStatistics, EarningsResult, EngagementResult, FoodForecast, FoodStatus,
    SetFoodRequirementCommand, ShortageCheckResult, StatisticsReport, TotalEarningsResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::camp::Camp;
use crate::storage::json::{
    CampStore, FoodRequirementRepository, JsonConnection, NotificationRepository,
};
use crate::storage::traits::{CampStorage, FoodRequirementStorage, NotificationStorage};

#[derive(Clone)]
pub struct AccountingService {
    camp_store: CampStore,
    food_requirements: FoodRequirementRepository,
    notifications: NotificationRepository,
}

fn find_camp<'a>(camps: &'a [Camp], name: &str) -> Result<&'a Camp> {
    camps
        .iter()
        .find(|camp| camp.name == name)
        .ok_or_else(|| DomainError::CampNotFound(name.to_string()).into())
}

fn forecast_for(camp: &Camp, food_per_camper: i64) -> FoodForecast {
    let duration_days = camp.duration_days();
    let camper_count = camp.campers.len();
    FoodForecast {
        camp_name: camp.name.clone(),
        duration_days,
        camper_count,
        food_per_camper,
        required: camper_count as i64 * food_per_camper * duration_days,
    }
}

impl AccountingService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            camp_store: CampStore::new(connection.clone()),
            food_requirements: FoodRequirementRepository::new(connection.clone()),
            notifications: NotificationRepository::new(connection),
        }
    }

    /// Record the daily food units each camper of a camp needs. Written to
    /// the side store, not the camp record.
    pub fn set_food_requirement(&self, command: SetFoodRequirementCommand) -> Result<()> {
        if command.food_per_camper < 0 {
            return Err(DomainError::Validation(
                "Food per camper must be a non-negative whole number.".to_string(),
            )
            .into());
        }

        let snapshot = self.camp_store.load()?;
        find_camp(&snapshot.camps, &command.camp_name)?;

        self.food_requirements
            .set_requirement(&command.camp_name, command.food_per_camper)?;
        info!(
            "Food requirement for '{}' set to {} units/camper/day",
            command.camp_name, command.food_per_camper
        );
        Ok(())
    }

    fn requirement_for(&self, camp_name: &str) -> Result<i64> {
        let food_per_camper = self
            .food_requirements
            .get_requirement(camp_name)?
            .ok_or_else(|| DomainError::RequirementNotSet(camp_name.to_string()))?;
        if food_per_camper < 0 {
            return Err(DomainError::Validation(
                "Food per camper must be a non-negative whole number.".to_string(),
            )
            .into());
        }
        Ok(food_per_camper)
    }

    /// Total food units the camp needs over its full duration, from the
    /// requirement side store and the current roster.
    pub fn forecast_requirement(&self, camp_name: &str) -> Result<FoodForecast> {
        let food_per_camper = self.requirement_for(camp_name)?;
        let snapshot = self.camp_store.load()?;
        let camp = find_camp(&snapshot.camps, camp_name)?;
        Ok(forecast_for(camp, food_per_camper))
    }

    /// Compare available stock against the forecast requirement. A shortage
    /// appends a notification for the coordinator but does not block or
    /// mutate the camp.
    pub fn check_food_shortage(&self, camp_name: &str) -> Result<ShortageCheckResult> {
        let food_per_camper = self.requirement_for(camp_name)?;
        let snapshot = self.camp_store.load()?;
        let camp = find_camp(&snapshot.camps, camp_name)?;

        let forecast = forecast_for(camp, food_per_camper);
        let available = camp.food_stock * forecast.duration_days;

        let status = if available < forecast.required {
            let message = format!(
                "Food shortage at {}! Only {} units left but {} needed.",
                camp.name, camp.food_stock, forecast.required
            );
            warn!("{}", message);
            self.notifications.add_notification(&message)?;
            FoodStatus::Shortage
        } else {
            info!(
                "Food stock for '{}' is sufficient ({} available, {} required)",
                camp.name, available, forecast.required
            );
            FoodStatus::Sufficient
        };

        Ok(ShortageCheckResult {
            forecast,
            available,
            status,
        })
    }

    /// Earnings for one camp: `pay_rate * duration_days` (day-rate
    /// semantics).
    pub fn camp_earnings(&self, camp_name: &str) -> Result<EarningsResult> {
        let snapshot = self.camp_store.load()?;
        let camp = find_camp(&snapshot.camps, camp_name)?;
        Ok(Self::earnings_for(camp))
    }

    fn earnings_for(camp: &Camp) -> EarningsResult {
        let duration_days = camp.duration_days();
        EarningsResult {
            camp_name: camp.name.clone(),
            duration_days,
            pay_rate: camp.pay_rate,
            earned: camp.pay_rate * duration_days,
        }
    }

    /// Earnings across every camp.
    pub fn total_earnings(&self) -> Result<TotalEarningsResult> {
        let snapshot = self.camp_store.load()?;
        let per_camp: Vec<EarningsResult> =
            snapshot.camps.iter().map(Self::earnings_for).collect();
        let total = per_camp.iter().map(|earnings| earnings.earned).sum();
        Ok(TotalEarningsResult { per_camp, total })
    }

    /// Engagement score for one camp: recorded activity entries plus daily
    /// record entries, unweighted.
    pub fn engagement_score(&self, camp_name: &str) -> Result<EngagementResult> {
        let snapshot = self.camp_store.load()?;
        let camp = find_camp(&snapshot.camps, camp_name)?;
        Ok(EngagementResult {
            camp_name: camp.name.clone(),
            score: camp.engagement_score(),
        })
    }

    /// Engagement scores for every camp, in store order.
    pub fn engagement_scores(&self) -> Result<Vec<EngagementResult>> {
        let snapshot = self.camp_store.load()?;
        Ok(snapshot
            .camps
            .iter()
            .map(|camp| EngagementResult {
                camp_name: camp.name.clone(),
                score: camp.engagement_score(),
            })
            .collect())
    }

    /// Dashboard-style roll-up: one row per camp plus system totals.
    pub fn statistics(&self) -> Result<StatisticsReport> {
        let snapshot = self.camp_store.load()?;

        let rows: Vec<CampStatistics> = snapshot
            .camps
            .iter()
            .map(|camp| CampStatistics {
                name: camp.name.clone(),
                location: camp.location.clone(),
                camp_type: camp.camp_type,
                start_date: camp.start_date.clone(),
                end_date: camp.end_date.clone(),
                leader_count: camp.scout_leaders.len(),
                camper_count: camp.campers.len(),
                engagement_score: camp.engagement_score(),
                food_stock: camp.food_stock,
                pay_rate: camp.pay_rate,
            })
            .collect();

        let total_campers = rows.iter().map(|row| row.camper_count).sum();
        let total_leaders = rows.iter().map(|row| row.leader_count).sum();
        let average_engagement = if rows.is_empty() {
            0.0
        } else {
            let sum: u32 = rows.iter().map(|row| row.engagement_score).sum();
            let mean = f64::from(sum) / rows.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        Ok(StatisticsReport {
            rows,
            total_campers,
            total_leaders,
            average_engagement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::camp::{ActivityEntry, CampType};
    use tempfile::TempDir;

    fn setup_test() -> (AccountingService, Arc<JsonConnection>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (
            AccountingService::new(connection.clone()),
            connection,
            temp_dir,
        )
    }

    /// A five-day camp with three campers and 10 units of daily stock.
    fn five_day_camp() -> Camp {
        let mut camp = Camp::new(
            "Eagle Ridge".to_string(),
            "Peak District".to_string(),
            CampType::MultiDay,
            "2024-06-01".to_string(),
            "2024-06-05".to_string(),
            10,
        );
        camp.assign_campers(vec![
            "Sam".to_string(),
            "Priya".to_string(),
            "Leo".to_string(),
        ]);
        camp
    }

    fn store_camps(connection: &Arc<JsonConnection>, camps: Vec<Camp>) {
        let store = CampStore::new(connection.clone());
        let mut snapshot = store.load().unwrap();
        snapshot.camps = camps;
        store.save(&snapshot).unwrap();
    }

    #[test]
    fn test_sufficient_stock_reports_no_shortage() {
        let (service, connection, _temp_dir) = setup_test();
        store_camps(&connection, vec![five_day_camp()]);
        service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Eagle Ridge".to_string(),
                food_per_camper: 1,
            })
            .unwrap();

        let result = service.check_food_shortage("Eagle Ridge").unwrap();
        assert_eq!(result.available, 50);
        assert_eq!(result.forecast.required, 15);
        assert_eq!(result.forecast.duration_days, 5);
        assert_eq!(result.status, FoodStatus::Sufficient);

        let notifications = NotificationRepository::new(connection.clone());
        assert!(notifications.list_notifications().unwrap().is_empty());
    }

    #[test]
    fn test_shortage_appends_notification() {
        let (service, connection, _temp_dir) = setup_test();
        store_camps(&connection, vec![five_day_camp()]);
        service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Eagle Ridge".to_string(),
                food_per_camper: 4,
            })
            .unwrap();

        let result = service.check_food_shortage("Eagle Ridge").unwrap();
        assert_eq!(result.forecast.required, 60);
        assert_eq!(result.available, 50);
        assert_eq!(result.status, FoodStatus::Shortage);

        let notifications = NotificationRepository::new(connection.clone())
            .list_notifications()
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].contains("Eagle Ridge"));
        assert!(notifications[0].contains("10"));
        assert!(notifications[0].contains("60"));
    }

    #[test]
    fn test_missing_requirement_is_surfaced() {
        let (service, connection, _temp_dir) = setup_test();
        store_camps(&connection, vec![five_day_camp()]);

        let err = service.check_food_shortage("Eagle Ridge").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::RequirementNotSet("Eagle Ridge".to_string()))
        );
    }

    #[test]
    fn test_set_requirement_validates_camp_and_amount() {
        let (service, connection, _temp_dir) = setup_test();
        store_camps(&connection, vec![five_day_camp()]);

        let err = service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Ghost Camp".to_string(),
                food_per_camper: 2,
            })
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::CampNotFound("Ghost Camp".to_string()))
        );

        let err = service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Eagle Ridge".to_string(),
                food_per_camper: -2,
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_dates_clamp_duration_to_one() {
        let (service, connection, _temp_dir) = setup_test();
        let mut camp = five_day_camp();
        camp.start_date = "garbage".to_string();
        store_camps(&connection, vec![camp]);
        service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Eagle Ridge".to_string(),
                food_per_camper: 2,
            })
            .unwrap();

        let forecast = service.forecast_requirement("Eagle Ridge").unwrap();
        assert_eq!(forecast.duration_days, 1);
        assert_eq!(forecast.required, 6);
    }

    #[test]
    fn test_earnings_use_day_rate_times_duration() {
        let (service, connection, _temp_dir) = setup_test();
        let mut camp = five_day_camp();
        camp.pay_rate = 20;
        let mut second = five_day_camp();
        second.name = "Lakeside".to_string();
        second.start_date = "2024-07-01".to_string();
        second.end_date = "2024-07-02".to_string();
        second.pay_rate = 100;
        store_camps(&connection, vec![camp, second]);

        let earnings = service.camp_earnings("Eagle Ridge").unwrap();
        assert_eq!(earnings.duration_days, 5);
        assert_eq!(earnings.earned, 100);

        let total = service.total_earnings().unwrap();
        assert_eq!(total.per_camp.len(), 2);
        assert_eq!(total.total, 100 + 200);
    }

    #[test]
    fn test_engagement_score_counts_entries_and_records() {
        let (service, connection, _temp_dir) = setup_test();
        let mut camp = five_day_camp();
        camp.activities.insert(
            "2024-06-01".to_string(),
            vec![
                ActivityEntry::new(Some("Swim".to_string()), None, "lake".to_string(), None),
                ActivityEntry::new(Some("Climb".to_string()), None, "wall".to_string(), None),
            ],
        );
        camp.daily_records
            .insert("2024-06-01".to_string(), vec!["good day".to_string()]);
        store_camps(&connection, vec![camp]);

        let result = service.engagement_score("Eagle Ridge").unwrap();
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_statistics_roll_up() {
        let (service, connection, _temp_dir) = setup_test();
        let mut camp = five_day_camp();
        camp.assign_leader("alice");
        camp.note_daily_record("2024-06-01", "first note");
        let mut second = five_day_camp();
        second.name = "Lakeside".to_string();
        second.assign_leader("alice");
        second.assign_leader("bob");
        store_camps(&connection, vec![camp, second]);

        let report = service.statistics().unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.total_campers, 6);
        assert_eq!(report.total_leaders, 3);
        assert_eq!(report.average_engagement, 0.5);
    }

    #[test]
    fn test_statistics_empty_store() {
        let (service, _connection, _temp_dir) = setup_test();
        let report = service.statistics().unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.average_engagement, 0.0);
    }
}
