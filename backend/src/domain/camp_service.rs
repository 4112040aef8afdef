use anyhow::Result;
use chrono::{Duration, NaiveDate};
use log::info;
use std::sync::Arc;

use crate::domain::commands::camps::{
    CampMutationResult, CreateCampCommand, CreateCampResult, DeleteCampCommand, DeleteCampResult,
    GetCampCommand, GetCampResult, ListCampsResult, SetFoodStockCommand, SetPayRateCommand,
    TopUpFoodCommand, UpdateCampCommand, UpdateCampResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::camp::{Camp, CampType, DATE_FORMAT};
use crate::storage::json::{CampStore, JsonConnection};
use crate::storage::traits::CampStorage;

/// Service for the logistics coordinator's camp management: creating,
/// editing and deleting camps, plus the food-stock and pay-rate mutations.
#[derive(Clone)]
pub struct CampService {
    camp_store: CampStore,
}

/// Derive the inclusive end date from the start date and the camp type's
/// night count. Day camps span one day, Overnight camps one night, and
/// Multi-Day camps need an explicit count of at least 2 nights.
fn derive_dates(
    camp_type: CampType,
    start_date: &str,
    nights: Option<u32>,
) -> Result<(String, String)> {
    let start = NaiveDate::parse_from_str(start_date.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::Validation("Invalid date format! Please use YYYY-MM-DD.".to_string())
    })?;

    let nights = match camp_type.fixed_nights() {
        Some(fixed) => fixed,
        None => {
            let nights = nights.ok_or_else(|| {
                DomainError::Validation("How many nights is the camp?".to_string())
            })?;
            if nights < 2 {
                return Err(DomainError::Validation(
                    "A multi-day camp must be at least 2 nights.".to_string(),
                )
                .into());
            }
            nights
        }
    };

    let end = start + Duration::days(nights as i64);
    Ok((
        start.format(DATE_FORMAT).to_string(),
        end.format(DATE_FORMAT).to_string(),
    ))
}

fn find_camp_mut<'a>(camps: &'a mut [Camp], name: &str) -> Result<&'a mut Camp> {
    camps
        .iter_mut()
        .find(|camp| camp.name == name)
        .ok_or_else(|| DomainError::CampNotFound(name.to_string()).into())
}

impl CampService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            camp_store: CampStore::new(connection),
        }
    }

    /// Create a new camp with an empty roster.
    pub fn create_camp(&self, command: CreateCampCommand) -> Result<CreateCampResult> {
        info!(
            "Creating camp: name={}, type={}",
            command.name,
            command.camp_type.label()
        );

        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("Camp name cannot be empty".to_string()).into());
        }
        let location = command.location.trim().to_string();
        if location.is_empty() {
            return Err(
                DomainError::Validation("Camp location cannot be empty".to_string()).into(),
            );
        }
        if command.initial_food_stock < 0 {
            return Err(DomainError::Validation(
                "Food stock must be a non-negative whole number.".to_string(),
            )
            .into());
        }

        let (start_date, end_date) =
            derive_dates(command.camp_type, &command.start_date, command.nights)?;

        let mut snapshot = self.camp_store.load()?;
        if snapshot.camps.iter().any(|camp| camp.name == name) {
            return Err(DomainError::DuplicateCampName(name).into());
        }

        let camp = Camp::new(
            name,
            location,
            command.camp_type,
            start_date,
            end_date,
            command.initial_food_stock,
        );
        snapshot.camps.push(camp.clone());
        self.camp_store.save(&snapshot)?;

        info!(
            "Created camp '{}' ({} -> {})",
            camp.name, camp.start_date, camp.end_date
        );
        Ok(CreateCampResult { camp })
    }

    /// Edit an existing camp; fields left as `None` keep their current
    /// values.
    pub fn update_camp(&self, command: UpdateCampCommand) -> Result<UpdateCampResult> {
        info!("Updating camp: {}", command.name);

        if let Some(stock) = command.food_stock {
            if stock < 0 {
                return Err(DomainError::Validation(
                    "Food stock must be a non-negative whole number.".to_string(),
                )
                .into());
            }
        }
        if let Some(rate) = command.pay_rate {
            if rate < 0 {
                return Err(DomainError::Validation(
                    "Pay rate must be a non-negative whole number.".to_string(),
                )
                .into());
            }
        }

        let mut snapshot = self.camp_store.load()?;

        if let Some(ref new_name) = command.new_name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(
                    DomainError::Validation("Camp name cannot be empty".to_string()).into(),
                );
            }
            if new_name != command.name
                && snapshot.camps.iter().any(|camp| camp.name == new_name)
            {
                return Err(DomainError::DuplicateCampName(new_name.to_string()).into());
            }
        }

        let camp = find_camp_mut(&mut snapshot.camps, &command.name)?;

        if let Some(new_name) = command.new_name {
            camp.name = new_name.trim().to_string();
        }
        if let Some(location) = command.location {
            let location = location.trim().to_string();
            if location.is_empty() {
                return Err(
                    DomainError::Validation("Camp location cannot be empty".to_string()).into(),
                );
            }
            camp.location = location;
        }
        if let Some(camp_type) = command.camp_type {
            camp.camp_type = camp_type;
        }
        if let Some(dates) = command.dates {
            let (start_date, end_date) =
                derive_dates(camp.camp_type, &dates.start_date, dates.nights)?;
            camp.start_date = start_date;
            camp.end_date = end_date;
        }
        if let Some(stock) = command.food_stock {
            camp.food_stock = stock;
        }
        if let Some(rate) = command.pay_rate {
            camp.pay_rate = rate;
        }

        let camp = camp.clone();
        self.camp_store.save(&snapshot)?;

        info!("Updated camp '{}'", camp.name);
        Ok(UpdateCampResult { camp })
    }

    /// Delete a camp. There is no soft-delete or archival.
    pub fn delete_camp(&self, command: DeleteCampCommand) -> Result<DeleteCampResult> {
        info!("Deleting camp: {}", command.name);

        let mut snapshot = self.camp_store.load()?;
        let index = snapshot
            .camps
            .iter()
            .position(|camp| camp.name == command.name)
            .ok_or_else(|| DomainError::CampNotFound(command.name.clone()))?;

        let removed = snapshot.camps.remove(index);
        self.camp_store.save(&snapshot)?;

        info!("Deleted camp '{}'", removed.name);
        Ok(DeleteCampResult {
            success_message: format!("Camp '{}' deleted successfully", removed.name),
        })
    }

    pub fn get_camp(&self, command: GetCampCommand) -> Result<GetCampResult> {
        let snapshot = self.camp_store.load()?;
        let camp = snapshot
            .camps
            .into_iter()
            .find(|camp| camp.name == command.name);
        Ok(GetCampResult { camp })
    }

    pub fn list_camps(&self) -> Result<ListCampsResult> {
        let snapshot = self.camp_store.load()?;
        Ok(ListCampsResult {
            camps: snapshot.camps,
        })
    }

    /// Replace a camp's daily food stock.
    pub fn set_food_stock(&self, command: SetFoodStockCommand) -> Result<CampMutationResult> {
        if command.food_stock < 0 {
            return Err(DomainError::Validation(
                "Food stock must be a non-negative whole number.".to_string(),
            )
            .into());
        }

        let mut snapshot = self.camp_store.load()?;
        let camp = find_camp_mut(&mut snapshot.camps, &command.camp_name)?;
        camp.food_stock = command.food_stock;
        let camp = camp.clone();
        self.camp_store.save(&snapshot)?;

        info!(
            "Daily food stock for '{}' set to {}",
            camp.name, camp.food_stock
        );
        Ok(CampMutationResult { camp })
    }

    /// Add to a camp's daily food stock. Negative amounts are rejected.
    pub fn top_up_food(&self, command: TopUpFoodCommand) -> Result<CampMutationResult> {
        if command.amount < 0 {
            return Err(DomainError::Validation(
                "Top-up amount must be a non-negative whole number.".to_string(),
            )
            .into());
        }

        let mut snapshot = self.camp_store.load()?;
        let camp = find_camp_mut(&mut snapshot.camps, &command.camp_name)?;
        camp.allocate_extra_food(command.amount)
            .map_err(DomainError::from)?;
        let camp = camp.clone();
        self.camp_store.save(&snapshot)?;

        info!(
            "Food stock for '{}' increased by {}",
            camp.name, command.amount
        );
        Ok(CampMutationResult { camp })
    }

    /// Set a camp's daily pay rate.
    pub fn set_pay_rate(&self, command: SetPayRateCommand) -> Result<CampMutationResult> {
        if command.pay_rate < 0 {
            return Err(DomainError::Validation(
                "Pay rate must be a non-negative whole number.".to_string(),
            )
            .into());
        }

        let mut snapshot = self.camp_store.load()?;
        let camp = find_camp_mut(&mut snapshot.camps, &command.camp_name)?;
        camp.pay_rate = command.pay_rate;
        let camp = camp.clone();
        self.camp_store.save(&snapshot)?;

        info!("Pay rate for '{}' set to {}", camp.name, camp.pay_rate);
        Ok(CampMutationResult { camp })
    }
}
