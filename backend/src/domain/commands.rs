//! Domain-level command and query types.
//!
//! These structs are used by the services inside the domain layer and are
//! **not** the public API surface: the UI shell is responsible for mapping
//! the DTOs in the `shared` crate to these internal types (see
//! `domain::mappers` for the outbound direction).

pub mod camps {
    use crate::domain::models::camp::{Camp, CampType};

    /// Input for creating a new camp.
    #[derive(Debug, Clone)]
    pub struct CreateCampCommand {
        pub name: String,
        pub location: String,
        pub camp_type: CampType,
        /// Start date, `YYYY-MM-DD`
        pub start_date: String,
        /// Night count; required for Multi-Day camps, ignored otherwise
        /// (Day and Overnight camps have fixed durations)
        pub nights: Option<u32>,
        pub initial_food_stock: i64,
    }

    #[derive(Debug, Clone)]
    pub struct CreateCampResult {
        pub camp: Camp,
    }

    /// A date change within an update; the end date is always re-derived
    /// from the start date and the camp type's night count.
    #[derive(Debug, Clone)]
    pub struct DatesUpdate {
        pub start_date: String,
        /// Required when the (possibly updated) camp type is Multi-Day
        pub nights: Option<u32>,
    }

    /// Optional-field edit of an existing camp; `None` keeps the current
    /// value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateCampCommand {
        pub name: String,
        pub new_name: Option<String>,
        pub location: Option<String>,
        pub camp_type: Option<CampType>,
        pub dates: Option<DatesUpdate>,
        pub food_stock: Option<i64>,
        pub pay_rate: Option<i64>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateCampResult {
        pub camp: Camp,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteCampCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteCampResult {
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetCampCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetCampResult {
        pub camp: Option<Camp>,
    }

    #[derive(Debug, Clone)]
    pub struct ListCampsResult {
        pub camps: Vec<Camp>,
    }

    #[derive(Debug, Clone)]
    pub struct SetFoodStockCommand {
        pub camp_name: String,
        pub food_stock: i64,
    }

    #[derive(Debug, Clone)]
    pub struct TopUpFoodCommand {
        pub camp_name: String,
        pub amount: i64,
    }

    #[derive(Debug, Clone)]
    pub struct SetPayRateCommand {
        pub camp_name: String,
        pub pay_rate: i64,
    }

    /// Result of the food-stock and pay-rate mutations.
    #[derive(Debug, Clone)]
    pub struct CampMutationResult {
        pub camp: Camp,
    }
}

pub mod accounting {
    /// Food requirement vs. stock forecast for one camp.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FoodForecast {
        pub camp_name: String,
        pub duration_days: i64,
        pub camper_count: usize,
        /// Units per camper per day, from the requirement side store
        pub food_per_camper: i64,
        /// `camper_count * food_per_camper * duration_days`
        pub required: i64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FoodStatus {
        Sufficient,
        Shortage,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ShortageCheckResult {
        pub forecast: FoodForecast,
        /// `food_stock * duration_days`
        pub available: i64,
        pub status: FoodStatus,
    }

    #[derive(Debug, Clone)]
    pub struct SetFoodRequirementCommand {
        pub camp_name: String,
        pub food_per_camper: i64,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EarningsResult {
        pub camp_name: String,
        pub duration_days: i64,
        pub pay_rate: i64,
        /// `pay_rate * duration_days`
        pub earned: i64,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TotalEarningsResult {
        pub per_camp: Vec<EarningsResult>,
        pub total: i64,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EngagementResult {
        pub camp_name: String,
        pub score: u32,
    }

    /// One dashboard row per camp plus whole-system totals.
    #[derive(Debug, Clone)]
    pub struct StatisticsReport {
        pub rows: Vec<CampStatistics>,
        pub total_campers: usize,
        pub total_leaders: usize,
        pub average_engagement: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CampStatistics {
        pub name: String,
        pub location: String,
        pub camp_type: crate::domain::models::camp::CampType,
        pub start_date: String,
        pub end_date: String,
        pub leader_count: usize,
        pub camper_count: usize,
        pub engagement_score: u32,
        pub food_stock: i64,
        pub pay_rate: i64,
    }
}

pub mod assignments {
    /// A leader's full supervision selection, by zero-based camp index into
    /// the current camp list (the UI presents a numbered list).
    #[derive(Debug, Clone)]
    pub struct AssignSupervisionCommand {
        pub leader: String,
        pub camp_indices: Vec<usize>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssignSupervisionResult {
        pub leader: String,
        /// Names of the camps the leader now supervises
        pub supervised: Vec<String>,
        /// Names of the camps the leader was removed from
        pub released: Vec<String>,
    }

    /// Camp name -> supervising leader usernames.
    #[derive(Debug, Clone)]
    pub struct LeaderAssignmentsResult {
        pub assignments: Vec<(String, Vec<String>)>,
    }

    /// One parsed camper row from the import CSV.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CamperRow {
        pub name: String,
        pub age: String,
        pub activities: Vec<String>,
    }

    /// Parsed CSV contents: good rows plus per-row failure reports.
    #[derive(Debug, Clone, Default)]
    pub struct CamperImport {
        pub campers: Vec<CamperRow>,
        pub row_errors: Vec<String>,
    }

    #[derive(Debug, Clone)]
    pub struct BulkImportCommand {
        pub camp_name: String,
        pub campers: Vec<CamperRow>,
    }

    /// A camper skipped because they are enrolled in a different camp.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CamperCollision {
        pub camper: String,
        pub other_camp: String,
    }

    #[derive(Debug, Clone)]
    pub struct BulkImportResult {
        pub camp_name: String,
        pub added: Vec<String>,
        /// Campers already on the target camp's roster (idempotent skip)
        pub already_enrolled: Vec<String>,
        pub collisions: Vec<CamperCollision>,
    }
}

pub mod activities {
    use crate::domain::models::camp::ActivityEntry;

    #[derive(Debug, Clone)]
    pub struct LogActivityCommand {
        pub camp_name: String,
        /// `YYYY-MM-DD`
        pub date: String,
        /// Blank or missing names default to "unspecified"
        pub activity: Option<String>,
        pub time: Option<String>,
        pub notes: String,
        pub food_used: Option<i64>,
    }

    #[derive(Debug, Clone)]
    pub struct LogActivityResult {
        pub camp_name: String,
        pub date: String,
        pub entry: ActivityEntry,
    }

    #[derive(Debug, Clone)]
    pub struct NoteDailyRecordCommand {
        pub camp_name: String,
        pub date: String,
        pub notes: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ActivityStatsResult {
        pub camp_name: String,
        pub total_entries: usize,
        /// None when no logged entry carried a food amount
        pub total_food_used: Option<i64>,
    }
}

pub mod accounts {
    use crate::domain::models::account::{Role, UserAccount};

    #[derive(Debug, Clone)]
    pub struct AddUserCommand {
        pub role: Role,
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct AddUserResult {
        pub user: UserAccount,
    }

    #[derive(Debug, Clone)]
    pub struct SetPasswordCommand {
        pub username: String,
        pub new_password: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteUserCommand {
        pub username: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListUsersResult {
        pub users: Vec<UserAccount>,
    }

    #[derive(Debug, Clone)]
    pub struct AuthenticateCommand {
        pub username: String,
        pub password: String,
    }

    /// Login failure is an expected outcome, not an error.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum AuthenticationOutcome {
        Success(Role),
        InvalidCredentials,
        Disabled,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AuthenticateResult {
        pub outcome: AuthenticationOutcome,
    }
}
