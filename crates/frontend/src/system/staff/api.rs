use contracts::system::staff::{StaffAgencyList, StaffAgencyQuery};

use crate::shared::api_utils::{get_json, with_query};

/// Agency of the first staff mapping; failures are logged and yield `None`.
pub async fn get_agency_for_user(user_id: i64) -> Option<i64> {
    let path = match with_query("/staff-agency/", &StaffAgencyQuery { staff_id: user_id }) {
        Ok(path) => path,
        Err(e) => {
            log::error!("Failed to build staff-agency query: {}", e);
            return None;
        }
    };
    match get_json::<StaffAgencyList>(&path).await {
        Ok(list) => list.first_agency(),
        Err(e) => {
            log::error!("Failed to get agency for user {}: {}", user_id, e);
            None
        }
    }
}
