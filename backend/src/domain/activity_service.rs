use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::domain::commands::activities::{
    ActivityStatsResult, LogActivityCommand, LogActivityResult, NoteDailyRecordCommand,
};
use crate::domain::errors::DomainError;
use crate::domain::models::camp::{ActivityEntry, Camp, DATE_FORMAT};
use crate::storage::json::{CampStore, JsonConnection};
use crate::storage::traits::CampStorage;

/// Service for the scout leader's daily workflow: logging activities,
/// keeping the camp diary and summarising what has been recorded.
#[derive(Clone)]
pub struct ActivityService {
    camp_store: CampStore,
}

fn validate_date(date: &str) -> Result<String> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        DomainError::Validation("Invalid date format! Please use YYYY-MM-DD.".to_string())
    })?;
    Ok(trimmed.to_string())
}

fn find_camp_mut<'a>(camps: &'a mut [Camp], name: &str) -> Result<&'a mut Camp> {
    camps
        .iter_mut()
        .find(|camp| camp.name == name)
        .ok_or_else(|| DomainError::CampNotFound(name.to_string()).into())
}

impl ActivityService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            camp_store: CampStore::new(connection),
        }
    }

    /// Append an activity entry to a camp's timeline. The entry's notes
    /// also land in the camp diary, and food-bearing entries bump the day's
    /// usage counter.
    pub fn log_activity(&self, command: LogActivityCommand) -> Result<LogActivityResult> {
        let date = validate_date(&command.date)?;
        if let Some(food) = command.food_used {
            if food < 0 {
                return Err(DomainError::Validation(
                    "Food units must be a non-negative whole number.".to_string(),
                )
                .into());
            }
        }

        let mut snapshot = self.camp_store.load()?;
        let camp = find_camp_mut(&mut snapshot.camps, &command.camp_name)?;

        let entry = ActivityEntry::new(
            command.activity,
            command.time,
            command.notes,
            command.food_used,
        );
        camp.log_activity(&date, entry.clone());
        self.camp_store.save(&snapshot)?;

        info!(
            "Logged activity '{}' for '{}' on {}",
            entry.activity, command.camp_name, date
        );
        Ok(LogActivityResult {
            camp_name: command.camp_name,
            date,
            entry,
        })
    }

    /// Append a free-text diary note for a date.
    pub fn note_daily_record(&self, command: NoteDailyRecordCommand) -> Result<()> {
        let date = validate_date(&command.date)?;

        let mut snapshot = self.camp_store.load()?;
        let camp = find_camp_mut(&mut snapshot.camps, &command.camp_name)?;
        camp.note_daily_record(&date, &command.notes);
        self.camp_store.save(&snapshot)?;

        info!("Added diary entry for '{}' on {}", command.camp_name, date);
        Ok(())
    }

    /// Totals over everything logged for a camp. `total_food_used` is None
    /// when no entry carried a food amount.
    pub fn activity_stats(&self, camp_name: &str) -> Result<ActivityStatsResult> {
        let snapshot = self.camp_store.load()?;
        let camp = snapshot
            .camps
            .iter()
            .find(|camp| camp.name == camp_name)
            .ok_or_else(|| DomainError::CampNotFound(camp_name.to_string()))?;

        let total_entries = camp.activities.values().map(Vec::len).sum();
        let food_amounts: Vec<i64> = camp
            .activities
            .values()
            .flatten()
            .filter_map(|entry| entry.food_used)
            .collect();
        let total_food_used = if food_amounts.is_empty() {
            None
        } else {
            Some(food_amounts.iter().sum())
        };

        Ok(ActivityStatsResult {
            camp_name: camp.name.clone(),
            total_entries,
            total_food_used,
        })
    }
}
