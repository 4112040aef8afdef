//! Assignment workflows: a leader's supervision selection (guarded by the
//! scheduling-conflict checker) and bulk camper import from CSV.

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Read;
use std::sync::Arc;

use crate::domain::commands::assignments::{
    AssignSupervisionCommand, AssignSupervisionResult, BulkImportCommand, BulkImportResult,
    CamperCollision, CamperImport, CamperRow, LeaderAssignmentsResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::camp::Camp;
use crate::domain::schedule;
use crate::storage::json::{CampStore, JsonConnection};
use crate::storage::traits::CampStorage;

/// Parse camper rows from a `Name,Age,Activities` CSV. Activities are
/// semicolon-separated within their cell. A bad row is reported and skipped;
/// it never fails the whole import.
pub fn parse_campers_csv<R: Read>(reader: R) -> Result<CamperImport> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .context("failed to read CSV headers")?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };

    let name_column = column("Name").ok_or_else(|| {
        DomainError::Validation("CSV file is missing a 'Name' column".to_string())
    })?;
    let age_column = column("Age");
    let activities_column = column("Activities");

    let mut import = CamperImport::default();
    for (row_number, record) in csv_reader.records().enumerate() {
        // +2 accounts for the header line and one-based numbering
        let line = row_number + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping CSV row {}: {}", line, e);
                import.row_errors.push(format!("row {}: {}", line, e));
                continue;
            }
        };

        let name = record.get(name_column).unwrap_or("").trim().to_string();
        if name.is_empty() {
            import
                .row_errors
                .push(format!("row {}: blank camper name", line));
            continue;
        }

        let age = age_column
            .and_then(|index| record.get(index))
            .unwrap_or("")
            .trim()
            .to_string();
        let activities = activities_column
            .and_then(|index| record.get(index))
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|activity| !activity.is_empty())
            .map(str::to_string)
            .collect();

        import.campers.push(CamperRow {
            name,
            age,
            activities,
        });
    }
    Ok(import)
}

/// Service for supervision selection and camper enrolment.
#[derive(Clone)]
pub struct AssignmentService {
    camp_store: CampStore,
}

impl AssignmentService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            camp_store: CampStore::new(connection),
        }
    }

    /// Replace a leader's entire supervision set with the camps at the
    /// given indices. The selection is all-or-nothing: if any selected pair
    /// of camps overlaps, nothing is assigned and nothing is released.
    pub fn assign_supervision(
        &self,
        command: AssignSupervisionCommand,
    ) -> Result<AssignSupervisionResult> {
        info!(
            "Assigning supervision for '{}' over {} selected camps",
            command.leader,
            command.camp_indices.len()
        );

        let mut snapshot = self.camp_store.load()?;

        let mut selected: Vec<usize> = Vec::new();
        for &index in &command.camp_indices {
            if index >= snapshot.camps.len() {
                return Err(DomainError::CampIndexOutOfRange(index).into());
            }
            if !selected.contains(&index) {
                selected.push(index);
            }
        }

        let selected_camps: Vec<&Camp> =
            selected.iter().map(|&index| &snapshot.camps[index]).collect();
        if let Some((first, second)) = schedule::find_conflict(&selected_camps) {
            return Err(DomainError::ScheduleConflict(first, second).into());
        }

        let mut supervised = Vec::new();
        let mut released = Vec::new();
        for (index, camp) in snapshot.camps.iter_mut().enumerate() {
            if selected.contains(&index) {
                camp.assign_leader(&command.leader);
                supervised.push(camp.name.clone());
            } else if camp.remove_leader(&command.leader) {
                released.push(camp.name.clone());
            }
        }

        self.camp_store.save(&snapshot)?;
        info!(
            "'{}' now supervises {:?} (released {:?})",
            command.leader, supervised, released
        );
        Ok(AssignSupervisionResult {
            leader: command.leader,
            supervised,
            released,
        })
    }

    /// Camp -> supervising leaders, omitting camps with no leaders.
    pub fn leader_assignments(&self) -> Result<LeaderAssignmentsResult> {
        let snapshot = self.camp_store.load()?;
        let assignments = snapshot
            .camps
            .iter()
            .filter(|camp| !camp.scout_leaders.is_empty())
            .map(|camp| (camp.name.clone(), camp.scout_leaders.clone()))
            .collect();
        Ok(LeaderAssignmentsResult { assignments })
    }

    /// Enrol a batch of campers into a camp. A camper already enrolled in
    /// any *other* camp is skipped and reported; re-importing a camper into
    /// the same camp is an idempotent skip. The store is written once, at
    /// the end.
    pub fn bulk_import_campers(&self, command: BulkImportCommand) -> Result<BulkImportResult> {
        info!(
            "Importing {} campers into '{}'",
            command.campers.len(),
            command.camp_name
        );

        let mut snapshot = self.camp_store.load()?;
        let target_exists = snapshot
            .camps
            .iter()
            .any(|camp| camp.name == command.camp_name);
        if !target_exists {
            return Err(DomainError::CampNotFound(command.camp_name.clone()).into());
        }

        let mut added: Vec<String> = Vec::new();
        let mut already_enrolled = Vec::new();
        let mut collisions = Vec::new();

        for row in &command.campers {
            let other_camp = snapshot.camps.iter().find(|camp| {
                camp.name != command.camp_name
                    && camp.campers.iter().any(|camper| camper == &row.name)
            });
            if let Some(other) = other_camp {
                warn!(
                    "camper '{}' already assigned to camp '{}'",
                    row.name, other.name
                );
                collisions.push(CamperCollision {
                    camper: row.name.clone(),
                    other_camp: other.name.clone(),
                });
                continue;
            }

            let target = snapshot
                .camps
                .iter()
                .find(|camp| camp.name == command.camp_name)
                .ok_or_else(|| DomainError::CampNotFound(command.camp_name.clone()))?;
            if target.campers.iter().any(|camper| camper == &row.name)
                || added.contains(&row.name)
            {
                already_enrolled.push(row.name.clone());
                continue;
            }

            added.push(row.name.clone());
        }

        if !added.is_empty() {
            let target = snapshot
                .camps
                .iter_mut()
                .find(|camp| camp.name == command.camp_name)
                .ok_or_else(|| DomainError::CampNotFound(command.camp_name.clone()))?;
            target.assign_campers(added.clone());
        }
        self.camp_store.save(&snapshot)?;

        info!(
            "Imported {} campers into '{}' ({} collisions, {} already enrolled)",
            added.len(),
            command.camp_name,
            collisions.len(),
            already_enrolled.len()
        );
        Ok(BulkImportResult {
            camp_name: command.camp_name,
            added,
            already_enrolled,
            collisions,
        })
    }
}
