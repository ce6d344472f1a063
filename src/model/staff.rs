use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Religious-duty assignments a staff member can hold. Stored in the
/// database as a native JSON array of these strings, never as
/// double-encoded text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StaffRole {
    Khateeb,
    Imam,
    Muezzin,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "national_id": "A123456",
        "full_name": "Ahmed Ben Salah",
        "phone_number": "+21698123456",
        "roles": ["imam", "muezzin"],
        "mosque_name": "Al-Nour Mosque",
        "user_id": 7,
        "created_at": "2024-01-01T00:00:00Z"
    })
)]
pub struct Staff {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "A123456")]
    pub national_id: String,

    #[schema(example = "Ahmed Ben Salah")]
    pub full_name: String,

    #[schema(example = "+21698123456")]
    pub phone_number: String,

    #[schema(value_type = Vec<StaffRole>)]
    pub roles: Json<Vec<StaffRole>>,

    #[schema(example = "Al-Nour Mosque")]
    pub mosque_name: String,

    /// Account that registered this record, when claimed
    #[schema(example = 7, nullable = true)]
    pub user_id: Option<u64>,

    #[schema(example = "2024-01-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_round_trip_as_lowercase_strings() {
        assert_eq!(StaffRole::Khateeb.to_string(), "khateeb");
        assert_eq!(StaffRole::from_str("muezzin").unwrap(), StaffRole::Muezzin);
        assert!(StaffRole::from_str("janitor").is_err());
    }

    #[test]
    fn roles_serialize_as_a_native_json_array() {
        let roles = vec![StaffRole::Imam, StaffRole::Khateeb];
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"["imam","khateeb"]"#);

        let parsed: Vec<StaffRole> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, roles);
    }
}
