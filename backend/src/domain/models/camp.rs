use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::schedule::DateRange;

/// Date format used everywhere camps carry calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three kinds of camp session, persisted as the codes 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampType {
    Day,
    Overnight,
    MultiDay,
}

impl CampType {
    /// Numeric code used in the camp document.
    pub fn code(&self) -> u8 {
        match self {
            CampType::Day => 1,
            CampType::Overnight => 2,
            CampType::MultiDay => 3,
        }
    }

    /// Parse the numeric code from the camp document.
    pub fn from_code(code: u8) -> Result<Self, CampValidationError> {
        match code {
            1 => Ok(CampType::Day),
            2 => Ok(CampType::Overnight),
            3 => Ok(CampType::MultiDay),
            other => Err(CampValidationError::UnknownCampType(other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampType::Day => "Day Camp",
            CampType::Overnight => "Overnight",
            CampType::MultiDay => "Multi-Day",
        }
    }

    /// Number of nights implied by the camp type. `None` means the caller
    /// must supply a night count (Multi-Day camps).
    pub fn fixed_nights(&self) -> Option<u32> {
        match self {
            CampType::Day => Some(0),
            CampType::Overnight => Some(1),
            CampType::MultiDay => None,
        }
    }
}

/// One logged occurrence within a camp's daily timeline. Entries are
/// append-only; there is no edit or delete of past entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub activity: String,
    pub time: Option<String>,
    pub notes: String,
    pub food_used: Option<i64>,
}

impl ActivityEntry {
    /// Build an entry, defaulting a blank activity name to "unspecified".
    pub fn new(
        activity: Option<String>,
        time: Option<String>,
        notes: String,
        food_used: Option<i64>,
    ) -> Self {
        let activity = match activity {
            Some(a) if !a.trim().is_empty() => a.trim().to_string(),
            _ => "unspecified".to_string(),
        };
        let time = time.and_then(|t| {
            let t = t.trim().to_string();
            if t.is_empty() {
                None
            } else {
                Some(t)
            }
        });
        Self {
            activity,
            time,
            notes,
            food_used,
        }
    }
}

/// Domain model for one scheduled camp session.
///
/// `name` is the de facto primary key; uniqueness is enforced by the camp
/// service at create/rename time. Dates are held as `YYYY-MM-DD` strings and
/// parsed at computation sites, so a record with malformed dates still loads
/// and is handled by the clamping rules below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub name: String,
    pub location: String,
    pub camp_type: CampType,
    pub start_date: String,
    pub end_date: String,
    /// Units of food per day
    pub food_stock: i64,
    pub scout_leaders: Vec<String>,
    pub campers: Vec<String>,
    /// Date string -> entries logged on that date
    pub activities: BTreeMap<String, Vec<ActivityEntry>>,
    /// Date string -> cumulative food units consumed that date
    pub daily_food_usage: BTreeMap<String, i64>,
    /// Date string -> free-text diary notes for that date
    pub daily_records: BTreeMap<String, Vec<String>>,
    /// Currency units per day
    pub pay_rate: i64,
}

impl Camp {
    /// Create a camp with empty rosters and timelines; the system fills
    /// those in later through the workflow services.
    pub fn new(
        name: String,
        location: String,
        camp_type: CampType,
        start_date: String,
        end_date: String,
        initial_food_stock: i64,
    ) -> Self {
        Self {
            name,
            location,
            camp_type,
            start_date,
            end_date,
            food_stock: initial_food_stock,
            scout_leaders: Vec::new(),
            campers: Vec::new(),
            activities: BTreeMap::new(),
            daily_food_usage: BTreeMap::new(),
            daily_records: BTreeMap::new(),
            pay_rate: 0,
        }
    }

    /// Add a supervising leader. Returns false (informational no-op) when
    /// the leader is already assigned.
    pub fn assign_leader(&mut self, leader: &str) -> bool {
        if self.scout_leaders.iter().any(|l| l == leader) {
            return false;
        }
        self.scout_leaders.push(leader.to_string());
        true
    }

    /// Remove a supervising leader. Returns true when the leader was
    /// present.
    pub fn remove_leader(&mut self, leader: &str) -> bool {
        let before = self.scout_leaders.len();
        self.scout_leaders.retain(|l| l != leader);
        self.scout_leaders.len() != before
    }

    /// Enrol each camper that is not already on the roster; returns the
    /// names that were actually added.
    pub fn assign_campers<I>(&mut self, campers: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = Vec::new();
        for camper in campers {
            if !self.campers.iter().any(|c| c == &camper) {
                self.campers.push(camper.clone());
                added.push(camper);
            }
        }
        added
    }

    /// Append a free-text diary note for the given date.
    pub fn note_daily_record(&mut self, date: &str, notes: &str) {
        self.daily_records
            .entry(date.to_string())
            .or_default()
            .push(notes.to_string());
    }

    /// Append an activity entry for the given date. Every entry also leaves
    /// its notes in the daily records; food-bearing entries additionally
    /// bump the day's food usage counter.
    pub fn log_activity(&mut self, date: &str, entry: ActivityEntry) {
        if let Some(food) = entry.food_used {
            *self.daily_food_usage.entry(date.to_string()).or_insert(0) += food;
        }
        self.note_daily_record(date, &entry.notes);
        self.activities
            .entry(date.to_string())
            .or_default()
            .push(entry);
    }

    /// Top up the daily food stock. Negative amounts are rejected.
    pub fn allocate_extra_food(&mut self, amount: i64) -> Result<(), CampValidationError> {
        if amount < 0 {
            return Err(CampValidationError::NegativeAmount);
        }
        self.food_stock += amount;
        Ok(())
    }

    /// The camp's inclusive date range, or None when either stored date
    /// fails to parse.
    pub fn date_range(&self) -> Option<DateRange> {
        let start = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(&self.end_date, DATE_FORMAT).ok()?;
        Some(DateRange { start, end })
    }

    /// Duration in days, inclusive of both endpoints. Clamped to 1 when the
    /// dates are malformed or inverted, so downstream arithmetic never sees
    /// a zero or negative duration.
    pub fn duration_days(&self) -> i64 {
        match self.date_range() {
            Some(range) => (range.end.signed_duration_since(range.start).num_days() + 1).max(1),
            None => 1,
        }
    }

    /// Activity entries plus daily record entries, unweighted. Used as a
    /// coarse proxy for how lively a camp is.
    pub fn engagement_score(&self) -> u32 {
        let activity_events: usize = self.activities.values().map(|entries| entries.len()).sum();
        let record_entries: usize = self.daily_records.values().map(|notes| notes.len()).sum();
        (activity_events + record_entries) as u32
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CampValidationError {
    #[error("amount must be a non-negative whole number")]
    NegativeAmount,
    #[error("unknown camp type code: {0}")]
    UnknownCampType(u8),
}
