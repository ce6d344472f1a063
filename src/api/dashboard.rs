use crate::{
    auth::auth::AuthUser, config::Config, eligibility, model::leave_request::LeaveRequest,
};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

const RECENT_LIMIT: i64 = 5;

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 5)]
    pub pending: i64,
    #[schema(example = 24)]
    pub approved: i64,
    #[schema(example = 3)]
    pub rejected: i64,
    #[schema(example = 32)]
    pub total: i64,
    /// Approved leave days across all staff in the current year
    #[schema(example = 118)]
    pub approved_days_this_year: i64,
    #[schema(example = 20)]
    pub ceiling: u32,
    /// Five most recent submissions
    pub recent: Vec<LeaveRequest>,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Request counters and recent submissions", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let counts = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM leave_requests GROUP BY status",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to count leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let mut pending = 0;
    let mut approved = 0;
    let mut rejected = 0;
    for (status, count) in counts {
        match status.as_str() {
            "pending" => pending = count,
            "approved" => approved = count,
            "rejected" => rejected = count,
            other => error!(status = other, "Unrecognized status in storage"),
        }
    }

    let (from, to) = eligibility::year_bounds(eligibility::current_year());

    let approved_days_this_year: i64 = sqlx::query_scalar(
        r#"
        SELECT CAST(COALESCE(SUM(days_count), 0) AS SIGNED)
        FROM leave_requests
        WHERE status = 'approved'
        AND start_date BETWEEN ? AND ?
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to sum approved days");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let recent = sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM leave_requests ORDER BY created_at DESC LIMIT ?",
    )
    .bind(RECENT_LIMIT)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch recent leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(DashboardStats {
        pending,
        approved,
        rejected,
        total: pending + approved + rejected,
        approved_days_this_year,
        ceiling: config.annual_leave_ceiling,
        recent,
    }))
}
