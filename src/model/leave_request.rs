use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::staff::StaffRole;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TravelType {
    Domestic,
    International,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    /// The only legal moves are pending -> approved and pending -> rejected.
    pub fn can_transition_to(self, next: LeaveStatus) -> bool {
        self == LeaveStatus::Pending && next.is_terminal()
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "national_id": "A123456",
        "travel_type": "international",
        "country": "Morocco",
        "start_date": "2024-07-10",
        "end_date": "2024-07-15",
        "days_count": 6,
        "reason": "Family visit abroad",
        "deputies": {"imam": "Yassine Trabelsi"},
        "status": "pending",
        "admin_note": null,
        "user_id": 7,
        "created_at": "2024-07-01T00:00:00Z",
        "updated_at": "2024-07-01T00:00:00Z"
    })
)]
pub struct LeaveRequest {
    pub id: u64,
    pub national_id: String,
    pub travel_type: String,
    pub country: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub days_count: u32,
    pub reason: String,
    #[schema(value_type = Object, nullable = true)]
    pub deputies: Option<Json<HashMap<StaffRole, String>>>,
    pub status: String,
    pub admin_note: Option<String>,
    pub user_id: Option<u64>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn pending_moves_only_to_approved_or_rejected() {
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Approved));
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Rejected));
        assert!(!LeaveStatus::Pending.can_transition_to(LeaveStatus::Pending));
    }

    #[test]
    fn terminal_states_never_move_again() {
        for from in [LeaveStatus::Approved, LeaveStatus::Rejected] {
            for to in [
                LeaveStatus::Pending,
                LeaveStatus::Approved,
                LeaveStatus::Rejected,
            ] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
            }
        }
    }

    #[test]
    fn status_and_travel_type_round_trip_as_strings() {
        assert_eq!(LeaveStatus::Pending.to_string(), "pending");
        assert_eq!(LeaveStatus::from_str("approved").unwrap(), LeaveStatus::Approved);
        assert!(LeaveStatus::from_str("cancelled").is_err());

        assert_eq!(TravelType::International.to_string(), "international");
        assert_eq!(TravelType::from_str("domestic").unwrap(), TravelType::Domestic);
    }

    #[test]
    fn deputies_map_uses_role_keys() {
        let mut deputies = HashMap::new();
        deputies.insert(StaffRole::Imam, "Yassine Trabelsi".to_string());

        let json = serde_json::to_string(&deputies).unwrap();
        assert_eq!(json, r#"{"imam":"Yassine Trabelsi"}"#);

        let parsed: HashMap<StaffRole, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, deputies);
    }
}
