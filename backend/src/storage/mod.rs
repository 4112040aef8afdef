pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{
    AccountStorage, CampSnapshot, CampStorage, FoodRequirementStorage, NotificationStorage,
};
