use std::collections::HashMap;
use std::str::FromStr;

use crate::{
    api::staff::{CreateStaff, insert_staff, validate_new_staff},
    auth::auth::AuthUser,
    config::Config,
    eligibility,
    model::leave_request::{LeaveRequest, LeaveStatus, TravelType},
    model::staff::StaffRole,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use sqlx::types::Json;
use utoipa::{IntoParams, ToSchema};

const MIN_NATIONAL_ID_LEN: usize = 5;
const MIN_REASON_LEN: usize = 5;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "A123456")]
    pub national_id: String,
    #[schema(example = "domestic")]
    pub travel_type: TravelType,
    /// Destination, required for international travel
    #[schema(example = "Morocco", nullable = true)]
    pub country: Option<String>,
    #[schema(example = "2024-07-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-07-15", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family visit")]
    pub reason: String,
    /// Deputy covering each duty during the absence
    #[schema(value_type = Object, nullable = true)]
    pub deputies: Option<HashMap<StaffRole, String>>,

    // Contact fields, used to register staff on a first submission with an
    // unknown national ID. Ignored when the staff record already exists.
    #[schema(example = "Ahmed Ben Salah", nullable = true)]
    pub full_name: Option<String>,
    #[schema(example = "+21698123456", nullable = true)]
    pub phone_number: Option<String>,
    #[schema(example = json!(["imam"]), nullable = true)]
    pub roles: Option<Vec<StaffRole>>,
    #[schema(example = "Al-Nour Mosque", nullable = true)]
    pub mosque_name: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = "A123456")]
    /// Filter by national ID
    pub national_id: Option<String>,
    #[schema(example = "pending")]
    /// Filter by request status
    pub status: Option<String>,
    #[schema(example = 7)]
    /// Filter by submitting account
    pub user_id: Option<u64>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct DecisionNote {
    #[schema(example = "Approved, deputy confirmed", nullable = true)]
    pub note: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Calendar year, defaults to the current one
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct AnnualLeaveSummary {
    #[schema(example = "A123456")]
    pub national_id: String,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 6)]
    pub approved_days: u32,
    #[schema(example = 20)]
    pub ceiling: u32,
    #[schema(example = 14)]
    pub remaining_days: u32,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

/// Field checks that must pass before any database work happens.
pub fn validate_submission(payload: &CreateLeave) -> Result<(), &'static str> {
    if payload.national_id.trim().len() < MIN_NATIONAL_ID_LEN {
        return Err("National ID is too short");
    }

    if payload.end_date < payload.start_date {
        return Err("End date must not be before the start date");
    }

    if payload.travel_type == TravelType::International
        && payload
            .country
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        return Err("Destination country is required for international travel");
    }

    if payload.reason.trim().len() < MIN_REASON_LEN {
        return Err("A reason for the leave is required");
    }

    Ok(())
}

/// Sum of approved leave days whose start date falls in the given year.
async fn approved_days_in_year(
    pool: &MySqlPool,
    national_id: &str,
    year: i32,
) -> Result<u32, sqlx::Error> {
    let (from, to) = eligibility::year_bounds(year);

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT CAST(COALESCE(SUM(days_count), 0) AS SIGNED)
        FROM leave_requests
        WHERE national_id = ?
        AND status = 'approved'
        AND start_date BETWEEN ? AND ?
        "#,
    )
    .bind(national_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(total.max(0) as u32)
}

/* =========================
Create leave request
========================= */
/// Submit a leave request
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "status": "pending",
            "eligibility": {
                "requested_days": 6,
                "prior_approved_days": 0,
                "annual_total": 6,
                "ceiling": 20,
                "over_limit": false
            }
         })
        ),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown national ID without contact details"),
        (status = 422, description = "Annual ceiling exceeded"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    // 1. field validation, before any database work
    if let Err(msg) = validate_submission(&payload) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": msg
        })));
    }

    let national_id = payload.national_id.trim().to_uppercase();

    // 2. resolve the staff record; first-time submitters register in passing
    let staff_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE national_id = ? LIMIT 1)")
            .bind(&national_id)
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %national_id, "Failed to look up staff");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    if !staff_exists {
        let (Some(full_name), Some(phone_number), Some(roles), Some(mosque_name)) = (
            payload.full_name.clone(),
            payload.phone_number.clone(),
            payload.roles.clone(),
            payload.mosque_name.clone(),
        ) else {
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": "No staff record for this national ID; include full_name, phone_number, roles and mosque_name to register"
            })));
        };

        let registration = CreateStaff {
            national_id: national_id.clone(),
            full_name,
            phone_number,
            roles,
            mosque_name,
        };

        if let Err(msg) = validate_new_staff(&registration) {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": msg
            })));
        }

        if let Err(err_resp) = insert_staff(&registration, auth.user_id, pool.get_ref()).await {
            return Ok(err_resp);
        }

        tracing::info!(%national_id, "Registered staff on first leave submission");
    }

    // 3. eligibility against already-approved days of the leave year
    let prior = approved_days_in_year(pool.get_ref(), &national_id, payload.start_date.year())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %national_id, "Failed to sum approved days");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let evaluation = eligibility::evaluate(
        payload.start_date,
        payload.end_date,
        prior,
        config.annual_leave_ceiling,
    );

    if evaluation.over_limit {
        return Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "message": "Requested leave exceeds the annual ceiling",
            "eligibility": evaluation
        })));
    }

    // 4. insert the pending request
    sqlx::query(
        r#"
        INSERT INTO leave_requests
            (national_id, travel_type, country, start_date, end_date,
             days_count, reason, deputies, status, user_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(&national_id)
    .bind(payload.travel_type.to_string())
    .bind(payload.country.as_deref().map(str::trim))
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(evaluation.requested_days)
    .bind(payload.reason.trim())
    .bind(payload.deputies.as_ref().map(Json))
    .bind(auth.user_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, %national_id, "Failed to create leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Leave request submitted",
        "status": "pending",
        "eligibility": evaluation
    })))
}

/* =========================
Approve leave (Admin)
========================= */
/// Approve a pending request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    request_body = DecisionNote,
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 400, description = "Leave request not found or already processed"),
        (status = 422, description = "Approval would exceed the annual ceiling"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    body: Option<web::Json<DecisionNote>>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let leave_id = path.into_inner();
    let note = body.and_then(|b| b.into_inner().note);

    let row = sqlx::query_as::<_, (String, NaiveDate, NaiveDate, String)>(
        r#"
        SELECT national_id, start_date, end_date, status
        FROM leave_requests
        WHERE id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((national_id, start_date, end_date, status)) = row else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        })));
    };

    let current = LeaveStatus::from_str(&status).map_err(|_| {
        tracing::error!(leave_id, %status, "Unrecognized status in storage");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if !current.can_transition_to(LeaveStatus::Approved) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave request not found or already processed"
        })));
    }

    // Re-check the ceiling with the approved days as of the decision, so
    // two pending requests cannot both be waved past the limit.
    let prior = approved_days_in_year(pool.get_ref(), &national_id, start_date.year())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to sum approved days");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let evaluation =
        eligibility::evaluate(start_date, end_date, prior, config.annual_leave_ceiling);

    if evaluation.over_limit {
        return Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "message": "Approving this request would exceed the annual ceiling",
            "eligibility": evaluation
        })));
    }

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'approved', admin_note = ?
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(&note)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Approve leave failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave request not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved"
    })))
}

/* =========================
Reject leave (Admin)
========================= */
/// Reject a pending request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    request_body = DecisionNote,
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Leave request not found or already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: Option<web::Json<DecisionNote>>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let leave_id = path.into_inner();
    let note = body.and_then(|b| b.into_inner().note);

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'rejected', admin_note = ?
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(&note)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Reject leave failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave request not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected"
    })))
}

/// Fetch one leave request
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let leave = sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match leave {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

/// List leave requests
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(national_id) = query.national_id.as_deref() {
        where_sql.push_str(" AND national_id = ?");
        args.push(FilterValue::Str(national_id));
    }

    if let Some(status) = query.status.as_deref() {
        if LeaveStatus::from_str(status).is_err() {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Unknown status. Allowed: pending, approved, rejected"
            })));
        }
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    if let Some(user_id) = query.user_id {
        where_sql.push_str(" AND user_id = ?");
        args.push(FilterValue::U64(user_id));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error=%e, "Failed to count leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT *
        FROM leave_requests
        {}
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let leaves = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error=%e, "Failed to fetch leave list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // -------------------------
    // Response
    // -------------------------
    let response = LeaveListResponse {
        data: leaves,
        page: page as u32,
        per_page: per_page as u32,
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}

/* =========================
Delete leave request
========================= */
/// Owners may withdraw a pending request; admins may delete any.
#[utoipa::path(
    delete,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to delete")
    ),
    responses(
        (status = 200, description = "Leave request deleted", body = Object, example = json!({
            "message": "Leave request deleted"
        })),
        (status = 403, description = "Not the owner, or the request was already processed"),
        (status = 404, description = "Leave request not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let row = sqlx::query_as::<_, (Option<u64>, String)>(
        "SELECT user_id, status FROM leave_requests WHERE id = ?",
    )
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((owner, status)) = row else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        })));
    };

    let owns_pending =
        owner == Some(auth.user_id) && status == LeaveStatus::Pending.to_string();

    if !auth.is_admin() && !owns_pending {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "You do not have permission to delete this request"
        })));
    }

    sqlx::query("DELETE FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to delete leave request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request deleted"
    })))
}

/* =========================
Annual leave summary
========================= */
/// Approved days and remaining allowance for a staff member
#[utoipa::path(
    get,
    path = "/api/v1/leave/summary/{national_id}",
    params(
        ("national_id", Path, description = "National ID of the staff member"),
        SummaryQuery
    ),
    responses(
        (status = 200, description = "Annual leave summary", body = AnnualLeaveSummary),
        (status = 404, description = "Staff not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_summary(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    let national_id = path.into_inner().trim().to_uppercase();

    let staff_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE national_id = ? LIMIT 1)")
            .bind(&national_id)
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %national_id, "Failed to look up staff");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    if !staff_exists {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "No staff record for this national ID"
        })));
    }

    let year = query.year.unwrap_or_else(eligibility::current_year);

    let approved_days = approved_days_in_year(pool.get_ref(), &national_id, year)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %national_id, "Failed to sum approved days");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let ceiling = config.annual_leave_ceiling;

    Ok(HttpResponse::Ok().json(AnnualLeaveSummary {
        national_id,
        year,
        approved_days,
        ceiling,
        remaining_days: ceiling.saturating_sub(approved_days),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn valid_submission() -> CreateLeave {
        CreateLeave {
            national_id: "A123456".into(),
            travel_type: TravelType::Domestic,
            country: None,
            start_date: d(2024, 7, 10),
            end_date: d(2024, 7, 15),
            reason: "Family visit".into(),
            deputies: None,
            full_name: None,
            phone_number: None,
            roles: None,
            mosque_name: None,
        }
    }

    #[test]
    fn accepts_a_valid_domestic_submission() {
        assert!(validate_submission(&valid_submission()).is_ok());
    }

    #[test]
    fn rejects_reversed_date_range() {
        let mut p = valid_submission();
        p.start_date = d(2024, 7, 15);
        p.end_date = d(2024, 7, 10);
        assert_eq!(
            validate_submission(&p),
            Err("End date must not be before the start date")
        );
    }

    #[test]
    fn international_without_destination_fails_before_any_io() {
        let mut p = valid_submission();
        p.travel_type = TravelType::International;
        p.country = None;
        assert!(validate_submission(&p).is_err());

        p.country = Some("   ".into());
        assert!(validate_submission(&p).is_err());

        p.country = Some("Morocco".into());
        assert!(validate_submission(&p).is_ok());
    }

    #[test]
    fn rejects_blank_reason() {
        let mut p = valid_submission();
        p.reason = "  ".into();
        assert!(validate_submission(&p).is_err());
    }
}
