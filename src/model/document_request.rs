use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Official documents staff can request a printed copy of.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentType {
    /// Certifies employment with the religious-affairs authority
    WorkCertificate,
    /// States that a leave request was approved
    LeaveNotice,
    /// Confirms return to duty after leave
    WorkResumption,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DocumentRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "A123456")]
    pub national_id: String,
    #[schema(example = "work_certificate")]
    pub document_type: String,
    #[schema(example = "printed")]
    pub status: String,
    #[schema(example = "2024-01-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn document_types_round_trip_as_snake_case() {
        assert_eq!(DocumentType::WorkCertificate.to_string(), "work_certificate");
        assert_eq!(
            DocumentType::from_str("leave_notice").unwrap(),
            DocumentType::LeaveNotice
        );
        assert!(DocumentType::from_str("payslip").is_err());
    }
}
